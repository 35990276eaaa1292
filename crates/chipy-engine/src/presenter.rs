//! Win presentation model
//!
//! Geometry and text for the host to draw: polyline overlays for line
//! wins, a modal bonus panel for scatters, and the win-total label. No
//! rendering happens here. Overlays persist until the next spin starts;
//! the engine façade calls `clear` at that moment.

use chipy_core::{format_win_label, Currency};
use chipy_remote::WireWin;

use crate::config::GameConfig;
use crate::spin::SpinOutcome;
use crate::timing::ReelGeometry;

/// A polyline drawn through the winning line's sprite centres.
#[derive(Debug, Clone, PartialEq)]
pub struct LineOverlay {
    /// Index into the configured line table
    pub line_index: usize,
    /// Win amount for this line, in subunits
    pub amount: f64,
    /// `(x, y)` per reel column, left to right
    pub points: Vec<(f64, f64)>,
}

/// Modal scatter/bonus panel state.
#[derive(Debug, Clone, PartialEq)]
pub struct BonusPanel {
    /// Headline text
    pub title: String,
    /// Multiplier text ("x101") when the server provided one
    pub multiplier_label: Option<String>,
    /// Set once the player closes the panel
    pub dismissed: bool,
}

/// Win overlays, bonus panel and win label for the current round.
#[derive(Debug, Default)]
pub struct WinPresenter {
    overlays: Vec<LineOverlay>,
    win_label: Option<String>,
    bonus: Option<BonusPanel>,
}

impl WinPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every overlay and label. Called at the start of each spin.
    pub fn clear(&mut self) {
        self.overlays.clear();
        self.win_label = None;
        self.bonus = None;
    }

    /// Consume a settled outcome into presentation state. Outcomes with no
    /// win leave the presenter empty.
    pub fn present(&mut self, outcome: &SpinOutcome, config: &GameConfig, geometry: &ReelGeometry) {
        self.clear();
        if outcome.win <= 0.0 {
            return;
        }
        self.win_label = Some(format_win_label(&config.currency, outcome.win));

        for win in &outcome.wins {
            match win {
                WireWin::Line {
                    amount,
                    pattern,
                    line_index,
                } => {
                    let points = pattern
                        .iter()
                        .enumerate()
                        .map(|(col, &row)| (geometry.reel_x(col), geometry.slot_y(row, config.rows)))
                        .collect();
                    self.overlays.push(LineOverlay {
                        line_index: *line_index,
                        amount: *amount,
                        points,
                    });
                }
                WireWin::Scatter { .. } => {
                    self.bonus = Some(BonusPanel {
                        title: "BONUS!".into(),
                        multiplier_label: outcome.bonus_multiplier.map(|m| format!("x{m}")),
                        dismissed: false,
                    });
                }
            }
        }
    }

    /// Close the bonus panel; the win text becomes visible.
    pub fn dismiss_bonus(&mut self) {
        if let Some(bonus) = &mut self.bonus {
            bonus.dismissed = true;
        }
    }

    pub fn overlays(&self) -> &[LineOverlay] {
        &self.overlays
    }

    pub fn bonus(&self) -> Option<&BonusPanel> {
        self.bonus.as_ref()
    }

    /// True while a bonus panel is open (modal).
    pub fn bonus_open(&self) -> bool {
        self.bonus.as_ref().is_some_and(|b| !b.dismissed)
    }

    pub fn win_label(&self) -> Option<&str> {
        self.win_label.as_deref()
    }

    /// The win text hides behind an open bonus panel.
    pub fn win_text_visible(&self) -> bool {
        self.win_label.is_some() && !self.bonus_open()
    }

    /// Formatted balance label for the HUD.
    pub fn balance_label(currency: &Currency, balance: i64) -> String {
        currency.format_balance(balance)
    }
}
