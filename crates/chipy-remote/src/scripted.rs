//! Scripted transport
//!
//! Canned JSON responses standing in for a live backend. Drives the
//! integration scenarios and offline demos: queue an init value and a
//! sequence of spin values, then play them back in order.

use std::collections::VecDeque;

use serde_json::Value;

use crate::client::Transport;
use crate::error::RemoteError;
use crate::protocol::{ApiRequest, ApiResponse};

/// Transport that replays queued JSON responses.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    init: Option<Value>,
    spins: VecDeque<Value>,
    /// Spin bodies received, for asserting request counts
    spin_log: Vec<i64>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the init response.
    pub fn with_init(mut self, init: Value) -> Self {
        self.init = Some(init);
        self
    }

    /// Append one spin response.
    pub fn push_spin(&mut self, spin: Value) {
        self.spins.push_back(spin);
    }

    /// Append several spin responses in order.
    pub fn with_spins(mut self, spins: impl IntoIterator<Item = Value>) -> Self {
        self.spins.extend(spins);
        self
    }

    /// Bets of the spin requests served so far.
    pub fn spin_log(&self) -> &[i64] {
        &self.spin_log
    }

    /// Spin responses not yet consumed.
    pub fn remaining_spins(&self) -> usize {
        self.spins.len()
    }
}

impl Transport for ScriptedTransport {
    fn send(&mut self, request: &ApiRequest) -> Result<ApiResponse, RemoteError> {
        match request {
            ApiRequest::Init => {
                let value = self
                    .init
                    .take()
                    .ok_or_else(|| RemoteError::Protocol("script has no init response".into()))?;
                Ok(ApiResponse::Init(serde_json::from_value(value)?))
            }
            ApiRequest::Spin { bet } => {
                self.spin_log.push(*bet);
                let value = self
                    .spins
                    .pop_front()
                    .ok_or_else(|| RemoteError::Protocol("script exhausted".into()))?;
                Ok(ApiResponse::Spin(serde_json::from_value(value)?))
            }
        }
    }
}
