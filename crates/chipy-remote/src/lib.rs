//! # chipy-remote — Remote game protocol for the Chipy slot client
//!
//! The server owns all randomness and accounting; this crate is the thin
//! boundary the rest of the client talks through. Two operations exist:
//! `init` and `spin`. Both are JSON-over-HTTP POSTs to a single game
//! endpoint, both may suspend arbitrarily long, and neither is retried.
//!
//! ## Architecture
//!
//! ```text
//! SpinEngine ── submit/poll ──> RemoteClient
//!                                   │
//!                     ┌─────────────┴─────────────┐
//!                Threaded mode               Direct mode
//!            (worker thread + channels)   (scripted/testing)
//!                     │                         │
//!                     └────── Transport ────────┘
//!                      HttpTransport / ScriptedTransport
//! ```

pub mod client;
pub mod error;
pub mod http;
pub mod protocol;
pub mod scripted;

pub use client::*;
pub use error::*;
pub use http::*;
pub use protocol::*;
pub use scripted::*;
