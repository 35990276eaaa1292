//! Game configuration and session state
//!
//! `GameConfig` is built once from the init response and is immutable for
//! the rest of the session. Missing layout, reels or currency is fatal;
//! everything else degrades to sensible defaults.

use std::collections::BTreeMap;

use chipy_core::{
    parse_symbol, parse_symbol_matrix, ClientError, ClientResult, Currency, Grid, LinePattern,
    SymbolId,
};
use chipy_remote::{GameOptions, InitResponse};

/// Immutable game setup for one session.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Visible rows
    pub rows: usize,
    /// Reel columns
    pub cols: usize,
    /// Base strip per reel column
    pub base_reels: Vec<Vec<SymbolId>>,
    /// Payline patterns (row index per column)
    pub lines: Vec<LinePattern>,
    /// Symbol id → pay row; the last entry is the payout multiplier
    pub paytable: BTreeMap<SymbolId, Vec<f64>>,
    /// Selectable bets in subunits, in server order
    pub available_bets: Vec<i64>,
    /// Server-suggested bet in subunits
    pub default_bet: i64,
    pub currency: Currency,
    /// Scatter symbol id, if the game declares one
    pub scatter_symbol: Option<SymbolId>,
    /// Grid visible before the first spin (row-major)
    pub initial_grid: Grid,
}

impl GameConfig {
    /// Consume an init response into a config and the opening balance.
    pub fn from_init(init: &InitResponse) -> ClientResult<(Self, i64)> {
        if let Some(err) = &init.error {
            return Err(ClientError::Game(err.clone()));
        }
        let options = init
            .options
            .as_ref()
            .ok_or_else(|| ClientError::Config("init response has no options".into()))?;

        let layout = options
            .layout
            .ok_or_else(|| ClientError::Config("init options missing layout".into()))?;
        let rows = layout.rows;
        let cols = layout.reels;
        if rows == 0 || cols == 0 {
            return Err(ClientError::Config(format!(
                "degenerate layout {rows}x{cols}"
            )));
        }

        let currency = options
            .currency
            .clone()
            .ok_or_else(|| ClientError::Config("init options missing currency".into()))?;

        let base_reels = Self::parse_strips(options, cols)?;
        let paytable = Self::parse_paytable(options)?;
        let lines = options.lines.clone().unwrap_or_default();

        let default_bet = options.default_bet.unwrap_or(1);
        let mut available_bets = options.available_bets.clone().unwrap_or_default();
        if available_bets.is_empty() {
            available_bets.push(default_bet);
        }

        let scatter_symbol = options
            .special_symbols
            .iter()
            .find(|s| s.kind == "scatter")
            .map(|s| parse_symbol(&s.symbol))
            .transpose()?;

        let initial_grid = match &options.screen {
            Some(screen) => Grid::from_rows(parse_symbol_matrix(screen)?, rows, cols)?,
            // No opening screen: show the top of each base strip
            None => {
                let grid_rows = (0..rows)
                    .map(|r| base_reels.iter().map(|strip| strip[r % strip.len()]).collect())
                    .collect();
                Grid::from_rows(grid_rows, rows, cols)?
            }
        };

        let balance = init
            .balance
            .as_ref()
            .map(|b| b.wallet.round() as i64)
            .unwrap_or(0);

        Ok((
            Self {
                rows,
                cols,
                base_reels,
                lines,
                paytable,
                available_bets,
                default_bet,
                currency,
                scatter_symbol,
                initial_grid,
            },
            balance,
        ))
    }

    fn parse_strips(options: &GameOptions, cols: usize) -> ClientResult<Vec<Vec<SymbolId>>> {
        let reels = options
            .reels
            .as_ref()
            .ok_or_else(|| ClientError::Config("init options missing reels".into()))?;
        if reels.main.len() != cols {
            return Err(ClientError::Config(format!(
                "expected {cols} reel strips, got {}",
                reels.main.len()
            )));
        }
        let strips = parse_symbol_matrix(&reels.main)?;
        if strips.iter().any(|s| s.is_empty()) {
            return Err(ClientError::Config("empty base reel strip".into()));
        }
        Ok(strips)
    }

    /// Prefer the flat `paytable`; fall back to the redundant nested
    /// `paytables[symbol].default` form the server sometimes sends instead.
    fn parse_paytable(options: &GameOptions) -> ClientResult<BTreeMap<SymbolId, Vec<f64>>> {
        let mut table = BTreeMap::new();
        if let Some(flat) = &options.paytable {
            for (key, pays) in flat {
                table.insert(parse_symbol(key)?, pays.clone());
            }
        } else if let Some(nested) = &options.paytables {
            for (key, variants) in nested {
                if let Some(pays) = variants.get("default") {
                    table.insert(parse_symbol(key)?, pays.clone());
                }
            }
        }
        Ok(table)
    }

    /// Payout multiplier for a symbol (last entry of its pay row).
    pub fn payout_multiplier(&self, symbol: SymbolId) -> Option<f64> {
        self.paytable.get(&symbol).and_then(|row| row.last().copied())
    }

    /// The initial bet selection: `default_bet` when offered, else the
    /// first available bet.
    pub fn starting_bet(&self) -> i64 {
        if self.available_bets.contains(&self.default_bet) {
            self.default_bet
        } else {
            self.available_bets[0]
        }
    }
}

/// Mutable per-session values. The balance is whatever the server last
/// reported — the client never debits speculatively.
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Balance in subunits
    pub balance: i64,
    /// Selected bet in subunits
    pub current_bet: i64,
    /// Symbols presently visible (row-major)
    pub current_grid: Grid,
}

impl SessionState {
    pub fn new(config: &GameConfig, balance: i64) -> Self {
        Self {
            balance,
            current_bet: config.starting_bet(),
            current_grid: config.initial_grid.clone(),
        }
    }
}
