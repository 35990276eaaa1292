//! Paytable info page
//!
//! Rows for the "i" screen, built from the session config: one row per
//! paying symbol with its atlas key and payout multiplier, highest pay
//! first. The scatter gets its own flagged row.

use chipy_engine::GameConfig;

use crate::assets::symbol_key;

/// One paytable screen row.
#[derive(Debug, Clone, PartialEq)]
pub struct PaytableRow {
    /// Atlas key of the symbol sprite
    pub symbol_key: &'static str,
    /// Payout multiplier applied to the bet
    pub multiplier: f64,
    /// Scatter rows render with the bonus banner
    pub is_scatter: bool,
}

/// Build the info-page rows from the config, highest multiplier first.
pub fn paytable_rows(config: &GameConfig) -> Vec<PaytableRow> {
    let mut rows: Vec<PaytableRow> = config
        .paytable
        .keys()
        .filter_map(|&symbol| {
            config.payout_multiplier(symbol).map(|multiplier| PaytableRow {
                symbol_key: symbol_key(symbol),
                multiplier,
                is_scatter: config.scatter_symbol == Some(symbol),
            })
        })
        .filter(|row| row.multiplier > 0.0)
        .collect();
    rows.sort_by(|a, b| b.multiplier.total_cmp(&a.multiplier));
    rows
}

/// "LINES: n" footer label.
pub fn lines_label(config: &GameConfig) -> String {
    format!("LINES: {}", config.lines.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chipy_remote::InitResponse;
    use serde_json::json;

    fn config() -> GameConfig {
        let init: InitResponse = serde_json::from_value(json!({
            "balance": {"wallet": 100000.0},
            "options": {
                "available_bets": [1],
                "currency": {"code": "FUN", "exponent": 2, "subunits": 100, "symbol": "FUN"},
                "default_bet": 1,
                "layout": {"reels": 3, "rows": 3},
                "lines": [[0, 0, 0], [1, 1, 1], [2, 2, 2]],
                "paytable": {
                    "0": [0, 0, 300],
                    "1": [0, 0, 1],
                    "7": [0, 0, 5],
                    "8": [0, 0, 20],
                    "2": [0, 0, 0]
                },
                "reels": {"main": [["1", "2"], ["1", "2"], ["1", "2"]]},
                "screen": [["1", "1", "1"], ["2", "2", "2"], ["1", "1", "1"]],
                "special_symbols": [{"kind": "scatter", "symbol": "8"}]
            }
        }))
        .unwrap();
        GameConfig::from_init(&init).unwrap().0
    }

    #[test]
    fn test_rows_sorted_by_pay() {
        let rows = paytable_rows(&config());
        // Non-paying symbol 2 is dropped
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].symbol_key, "seven");
        assert_eq!(rows[0].multiplier, 300.0);
        assert!(rows.windows(2).all(|w| w[0].multiplier >= w[1].multiplier));
    }

    #[test]
    fn test_scatter_row_flagged() {
        let rows = paytable_rows(&config());
        let scatter = rows.iter().find(|r| r.is_scatter).unwrap();
        assert_eq!(scatter.symbol_key, "star");
        assert_eq!(scatter.multiplier, 20.0);
    }

    #[test]
    fn test_lines_label() {
        assert_eq!(lines_label(&config()), "LINES: 3");
    }
}
