//! # chipy-engine — Spin animation and reconciliation engine
//!
//! The server decides every outcome; this crate makes the reels look like
//! they did. It drives a staggered, decelerating scroll that lands
//! pixel-aligned on the server's final grid, presents wins, and loops spins
//! under an autospin policy.
//!
//! ## Architecture
//!
//! ```text
//! SlotMachine (scene-owned façade)
//!     │
//!     ├── SpinEngine ── RemoteClient (chipy-remote)
//!     │       └── Reel × cols (idle → constant → decelerating → aligning)
//!     ├── WinPresenter (overlays, win label, bonus panel)
//!     └── AutospinController (policy-driven loop)
//! ```
//!
//! Everything runs on one thread, advanced by per-frame `tick(now, dt)`
//! calls from the rendering framework. The only suspension points are the
//! two remote calls, polled from the tick.

pub mod autospin;
pub mod config;
pub mod events;
pub mod machine;
pub mod presenter;
pub mod reel;
pub mod spin;
pub mod timing;

pub use autospin::*;
pub use config::*;
pub use events::*;
pub use machine::*;
pub use presenter::*;
pub use reel::*;
pub use spin::*;
pub use timing::*;
