//! Currency and amount formatting
//!
//! All wire amounts are in currency subunits (e.g. cents). Balances are kept
//! as integer subunits; win amounts may be fractional subunits and stay
//! `f64` until display. Display divides by `subunits` and prints `exponent`
//! decimals.

use serde::{Deserialize, Serialize};

/// Currency descriptor delivered by the init response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Currency {
    /// ISO-ish code ("FUN", "EUR", …)
    pub code: String,
    /// Display symbol
    pub symbol: String,
    /// Decimal places shown
    pub exponent: u32,
    /// Subunits per major unit (100 for cents)
    pub subunits: i64,
}

impl Currency {
    /// Format a subunit amount as a major-unit decimal string
    /// (`61` subunits with exponent 2, subunits 100 → `"0.61"`).
    pub fn format(&self, subunit_amount: f64) -> String {
        let major = subunit_amount / self.subunits.max(1) as f64;
        format!("{major:.prec$}", prec = self.exponent as usize)
    }

    /// Format an integer subunit balance.
    pub fn format_balance(&self, balance: i64) -> String {
        self.format(balance as f64)
    }

    /// Format with the currency symbol appended (bet and balance labels).
    pub fn format_with_symbol(&self, subunit_amount: f64) -> String {
        format!("{} {}", self.format(subunit_amount), self.symbol)
    }
}

/// The win-total label shown by the presenter.
pub fn format_win_label(currency: &Currency, win_subunits: f64) -> String {
    format!("WIN {}", currency.format(win_subunits))
}
