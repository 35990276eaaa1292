//! Symbol grids and line patterns
//!
//! The visible window is a `rows × cols` matrix of symbol ids. Grids in this
//! crate are always row-major (`grid[row][col]`); the spin response delivers
//! its screen column-major and every consumer transposes it explicitly —
//! never silently at the decode boundary.

use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};

/// Symbol identifier (small non-negative integer, rendered as a string on
/// the wire).
pub type SymbolId = u32;

/// A payline: one row index per reel column.
pub type LinePattern = Vec<usize>;

/// Row-major symbol matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    rows: Vec<Vec<SymbolId>>,
}

impl Grid {
    /// Build from row-major data, validating a rectangular `rows × cols`
    /// shape.
    pub fn from_rows(rows: Vec<Vec<SymbolId>>, want_rows: usize, want_cols: usize) -> ClientResult<Self> {
        if rows.len() != want_rows || rows.iter().any(|r| r.len() != want_cols) {
            return Err(ClientError::Protocol(format!(
                "grid shape mismatch: expected {}x{}, got {}x{}",
                want_rows,
                want_cols,
                rows.len(),
                rows.first().map(|r| r.len()).unwrap_or(0)
            )));
        }
        Ok(Self { rows })
    }

    /// Build from column-major data (the spin `screen` orientation) by
    /// transposing into row-major.
    pub fn from_columns(cols: Vec<Vec<SymbolId>>, want_rows: usize, want_cols: usize) -> ClientResult<Self> {
        if cols.len() != want_cols || cols.iter().any(|c| c.len() != want_rows) {
            return Err(ClientError::Protocol(format!(
                "grid shape mismatch: expected {} columns of {} rows, got {} of {}",
                want_cols,
                want_rows,
                cols.len(),
                cols.first().map(|c| c.len()).unwrap_or(0)
            )));
        }
        let rows = (0..want_rows)
            .map(|r| (0..want_cols).map(|c| cols[c][r]).collect())
            .collect();
        Ok(Self { rows })
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.rows.first().map(|r| r.len()).unwrap_or(0)
    }

    /// Symbol at `[row][col]`
    pub fn at(&self, row: usize, col: usize) -> SymbolId {
        self.rows[row][col]
    }

    /// One column, top to bottom
    pub fn column(&self, col: usize) -> Vec<SymbolId> {
        self.rows.iter().map(|r| r[col]).collect()
    }

    /// Row-major view
    pub fn as_rows(&self) -> &[Vec<SymbolId>] {
        &self.rows
    }
}

/// Parse a wire symbol (string form) into a `SymbolId`.
pub fn parse_symbol(raw: &str) -> ClientResult<SymbolId> {
    raw.trim()
        .parse::<SymbolId>()
        .map_err(|_| ClientError::Protocol(format!("invalid symbol id: {raw:?}")))
}

/// Parse a wire matrix of string symbols without changing its orientation.
pub fn parse_symbol_matrix(raw: &[Vec<String>]) -> ClientResult<Vec<Vec<SymbolId>>> {
    raw.iter()
        .map(|line| line.iter().map(|s| parse_symbol(s)).collect())
        .collect()
}
