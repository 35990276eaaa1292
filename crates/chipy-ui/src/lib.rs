//! # chipy-ui — HUD and settings state
//!
//! Framework-free UI state for the slot client: bet selection, the spin
//! button gate, the autospin menu, paytable pages, HUD layout anchors and
//! persisted player settings. A rendering frontend reads this state every
//! frame and feeds interactions back in; nothing here draws.

pub mod assets;
pub mod controls;
pub mod info;
pub mod layout;
pub mod settings;

pub use assets::*;
pub use controls::*;
pub use info::*;
pub use layout::*;
pub use settings::*;
