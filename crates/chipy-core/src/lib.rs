//! # chipy-core — Shared types for the Chipy slot client
//!
//! The client never decides outcomes: the server owns randomness, balances
//! and win evaluation. Everything in this crate is therefore presentation
//! bookkeeping — symbol grids as delivered on the wire, currency formatting
//! for labels, and the error taxonomy shared by the other crates.

pub mod error;
pub mod grid;
pub mod money;

pub use error::*;
pub use grid::*;
pub use money::*;
