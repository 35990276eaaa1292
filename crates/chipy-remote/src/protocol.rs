//! Wire protocol definitions
//!
//! Request body: `{command: "init" | "spin", options?: {bet}}`. Response
//! shapes mirror the game server exactly, including its quirks: symbol ids
//! arrive as strings, the init `screen` is row-major while the spin
//! `screen` is column-major, win entries are heterogeneous JSON tuples, and
//! `paytable`/`paytables` may both be populated. Decoding keeps wire
//! orientation; the consumer transposes.

use std::collections::HashMap;

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use chipy_core::{Currency, LinePattern};

/// One of the two remote operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiRequest {
    /// Fetch game options and the opening balance
    Init,
    /// Play one round at `bet` subunits
    Spin { bet: i64 },
}

impl ApiRequest {
    /// Serializable POST body for this request.
    pub fn body(&self) -> RequestBody {
        match *self {
            ApiRequest::Init => RequestBody {
                command: "init",
                options: None,
            },
            ApiRequest::Spin { bet } => RequestBody {
                command: "spin",
                options: Some(RequestOptions { bet }),
            },
        }
    }
}

/// JSON body of a game request.
#[derive(Debug, Clone, Serialize)]
pub struct RequestBody {
    pub command: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<RequestOptions>,
}

/// Options attached to a spin request.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RequestOptions {
    /// Bet in subunits
    pub bet: i64,
}

/// A decoded response, tagged by the request that produced it.
#[derive(Debug, Clone)]
pub enum ApiResponse {
    Init(InitResponse),
    Spin(SpinResponse),
}

/// Wallet snapshot attached to every response.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct WireBalance {
    /// In-game bonus balance (unused by this client)
    #[serde(default)]
    pub game: f64,
    /// Wallet balance in subunits
    pub wallet: f64,
}

/// Grid geometry from the init options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct LayoutSpec {
    /// Number of reels (columns)
    pub reels: usize,
    /// Visible rows per reel
    pub rows: usize,
}

/// Base reel strips keyed by game mode; only `main` is used here.
#[derive(Debug, Clone, Deserialize)]
pub struct ReelSet {
    pub main: Vec<Vec<String>>,
}

/// A special-symbol declaration from the init options.
#[derive(Debug, Clone, Deserialize)]
pub struct SpecialSymbol {
    pub kind: String,
    pub symbol: String,
}

/// The `options` block of the init response. Every field is optional at
/// the wire level; `GameConfig` decides what is fatal.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GameOptions {
    #[serde(default)]
    pub available_bets: Option<Vec<i64>>,
    #[serde(default)]
    pub currency: Option<Currency>,
    #[serde(default)]
    pub default_bet: Option<i64>,
    #[serde(default)]
    pub layout: Option<LayoutSpec>,
    #[serde(default)]
    pub lines: Option<Vec<LinePattern>>,
    /// Flat paytable: symbol id → pay row (last entry is the multiplier)
    #[serde(default)]
    pub paytable: Option<HashMap<String, Vec<f64>>>,
    /// Redundant nested form: symbol id → {"default": pay row}
    #[serde(default)]
    pub paytables: Option<HashMap<String, HashMap<String, Vec<f64>>>>,
    #[serde(default)]
    pub reels: Option<ReelSet>,
    /// Initial visible grid, row-major
    #[serde(default)]
    pub screen: Option<Vec<Vec<String>>>,
    #[serde(default)]
    pub special_symbols: Vec<SpecialSymbol>,
}

/// Full init response.
#[derive(Debug, Clone, Deserialize)]
pub struct InitResponse {
    #[serde(default)]
    pub balance: Option<WireBalance>,
    #[serde(default)]
    pub options: Option<GameOptions>,
    #[serde(default)]
    pub error: Option<String>,
}

/// One win entry from the spin outcome. On the wire this is a tuple
/// `[kind, amount, location, lineIndex?]` where `location` is a line
/// pattern for line wins and a list of `[col, row]` positions for
/// scatters.
#[derive(Debug, Clone, PartialEq)]
pub enum WireWin {
    Line {
        /// Amount in subunits
        amount: f64,
        /// Row index per column
        pattern: Vec<usize>,
        /// Index into the configured line table
        line_index: usize,
    },
    Scatter {
        /// Amount in subunits
        amount: f64,
        /// `[col, row]` positions of the scatter symbols
        positions: Vec<[usize; 2]>,
    },
}

impl<'de> Deserialize<'de> for WireWin {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Vec::<Value>::deserialize(deserializer)?;
        if raw.len() < 3 {
            return Err(D::Error::custom("win tuple needs at least 3 elements"));
        }
        let kind = raw[0]
            .as_str()
            .ok_or_else(|| D::Error::custom("win kind must be a string"))?;
        let amount = raw[1]
            .as_f64()
            .ok_or_else(|| D::Error::custom("win amount must be a number"))?;

        match kind {
            "line" => {
                let pattern: Vec<usize> = serde_json::from_value(raw[2].clone())
                    .map_err(|e| D::Error::custom(format!("line pattern: {e}")))?;
                let line_index = raw
                    .get(3)
                    .and_then(Value::as_u64)
                    .ok_or_else(|| D::Error::custom("line win missing line index"))?
                    as usize;
                Ok(WireWin::Line {
                    amount,
                    pattern,
                    line_index,
                })
            }
            "scatter" => {
                let positions: Vec<[usize; 2]> = serde_json::from_value(raw[2].clone())
                    .map_err(|e| D::Error::custom(format!("scatter positions: {e}")))?;
                Ok(WireWin::Scatter { amount, positions })
            }
            other => Err(D::Error::custom(format!("unknown win kind {other:?}"))),
        }
    }
}

/// Bonus presentation data.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct BonusData {
    pub multiplier: u32,
}

/// Feature payloads attached to an outcome.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireFeatures {
    #[serde(default)]
    pub bonus_data: Option<BonusData>,
}

/// The `outcome` block of a spin response. `screen` is column-major.
#[derive(Debug, Clone, Deserialize)]
pub struct WireOutcome {
    /// Final grid, `screen[col][row]`
    pub screen: Vec<Vec<String>>,
    /// Bet echo in subunits
    #[serde(default)]
    pub bet: f64,
    /// Total win in subunits (may be fractional)
    #[serde(default)]
    pub win: f64,
    #[serde(default)]
    pub wins: Vec<WireWin>,
    /// Engine-specific payload, passed through untouched
    #[serde(default)]
    pub special_symbols: Value,
    #[serde(default)]
    pub features: Option<WireFeatures>,
}

/// Full spin response.
#[derive(Debug, Clone, Deserialize)]
pub struct SpinResponse {
    #[serde(default)]
    pub balance: Option<WireBalance>,
    #[serde(default)]
    pub outcome: Option<WireOutcome>,
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_bodies() {
        let init = serde_json::to_value(ApiRequest::Init.body()).unwrap();
        assert_eq!(init, json!({"command": "init"}));

        let spin = serde_json::to_value(ApiRequest::Spin { bet: 10 }.body()).unwrap();
        assert_eq!(spin, json!({"command": "spin", "options": {"bet": 10}}));
    }

    #[test]
    fn test_decode_line_win() {
        let win: WireWin = serde_json::from_value(json!(["line", 60.0, [2, 2, 2], 2])).unwrap();
        assert_eq!(
            win,
            WireWin::Line {
                amount: 60.0,
                pattern: vec![2, 2, 2],
                line_index: 2
            }
        );
    }

    #[test]
    fn test_decode_scatter_win() {
        let win: WireWin =
            serde_json::from_value(json!(["scatter", 20.2, [[0, 2], [1, 0], [2, 1]]])).unwrap();
        assert_eq!(
            win,
            WireWin::Scatter {
                amount: 20.2,
                positions: vec![[0, 2], [1, 0], [2, 1]]
            }
        );
    }

    #[test]
    fn test_decode_bad_win_kind() {
        let bad = serde_json::from_value::<WireWin>(json!(["ways", 1.0, [0, 0, 0]]));
        assert!(bad.is_err());
    }

    #[test]
    fn test_decode_spin_response() {
        let resp: SpinResponse = serde_json::from_value(json!({
            "balance": {"game": 0.0, "wallet": 99990.0},
            "outcome": {
                "screen": [["3", "4", "2"], ["0", "2", "2"], ["1", "6", "0"]],
                "bet": 10.0,
                "win": 0.0,
                "wins": [],
                "special_symbols": {},
                "storage": null
            }
        }))
        .unwrap();

        assert!(resp.error.is_none());
        let outcome = resp.outcome.unwrap();
        assert_eq!(outcome.screen.len(), 3);
        assert_eq!(outcome.win, 0.0);
        assert_eq!(resp.balance.unwrap().wallet, 99990.0);
    }

    #[test]
    fn test_decode_error_response() {
        let resp: SpinResponse =
            serde_json::from_value(json!({"error": "insufficient funds"})).unwrap();
        assert_eq!(resp.error.as_deref(), Some("insufficient funds"));
        assert!(resp.outcome.is_none());
    }

    #[test]
    fn test_decode_bonus_feature() {
        let features: WireFeatures =
            serde_json::from_value(json!({"bonus_data": {"multiplier": 101}})).unwrap();
        assert_eq!(features.bonus_data.unwrap().multiplier, 101);
    }
}
