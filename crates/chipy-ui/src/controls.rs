//! Bet selector, spin button gate and autospin menu
//!
//! Pure widget state. The frontend renders from these structs and calls
//! back into them on clicks; the machine façade is consulted only for the
//! busy flags.

use chipy_core::Currency;
use chipy_engine::AutospinPolicy;

/// Cyclic selector over the server's bet ladder.
#[derive(Debug, Clone)]
pub struct BetSelector {
    bets: Vec<i64>,
    index: usize,
}

impl BetSelector {
    /// `bets` in server order; `current` selects the starting bet (falls
    /// back to the first entry when absent).
    pub fn new(bets: Vec<i64>, current: i64) -> Self {
        let index = bets.iter().position(|&b| b == current).unwrap_or(0);
        Self { bets, index }
    }

    /// Selected bet in subunits.
    pub fn current(&self) -> i64 {
        self.bets[self.index]
    }

    /// Step to the next bet, wrapping at the top of the ladder.
    pub fn next(&mut self) -> i64 {
        self.index = (self.index + 1) % self.bets.len();
        self.current()
    }

    /// Step to the previous bet, wrapping at the bottom.
    pub fn prev(&mut self) -> i64 {
        self.index = (self.index + self.bets.len() - 1) % self.bets.len();
        self.current()
    }

    /// "BET 0.10" style label.
    pub fn label(&self, currency: &Currency) -> String {
        format!("BET {}", currency.format_balance(self.current()))
    }
}

/// Spin button visual state, derived fresh each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinButtonState {
    /// Clickable, starts a round
    Ready,
    /// A round is active; the button is dimmed
    Disabled,
    /// Autospin runs; the button reads STOP
    Stop,
}

impl SpinButtonState {
    pub fn derive(can_spin: bool, autospin_active: bool) -> Self {
        if autospin_active {
            SpinButtonState::Stop
        } else if can_spin {
            SpinButtonState::Ready
        } else {
            SpinButtonState::Disabled
        }
    }

    pub fn is_clickable(&self) -> bool {
        // STOP stays clickable: pressing it cancels the run
        !matches!(self, SpinButtonState::Disabled)
    }
}

/// Autospin count choices offered by the menu; `None` is "until stopped".
pub const AUTOSPIN_COUNTS: [Option<u32>; 5] = [Some(10), Some(20), Some(50), Some(100), None];

/// State of the autospin setup menu.
#[derive(Debug, Clone, Default)]
pub struct AutospinMenu {
    selected: usize,
    policy: AutospinPolicy,
    open: bool,
}

impl AutospinMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn select_count(&mut self, index: usize) {
        if index < AUTOSPIN_COUNTS.len() {
            self.selected = index;
        }
    }

    /// The chosen spin count; `None` means run until a stop condition.
    pub fn count(&self) -> Option<u32> {
        AUTOSPIN_COUNTS[self.selected]
    }

    /// Label for a menu row.
    pub fn count_label(index: usize) -> String {
        match AUTOSPIN_COUNTS.get(index) {
            Some(Some(n)) => n.to_string(),
            Some(None) => "∞".to_string(),
            None => String::new(),
        }
    }

    pub fn policy(&self) -> &AutospinPolicy {
        &self.policy
    }

    pub fn policy_mut(&mut self) -> &mut AutospinPolicy {
        &mut self.policy
    }
}

/// Autospin button caption: remaining count while a run is active,
/// otherwise the static glyph.
pub fn autospin_button_label(active: bool, remaining: Option<u32>) -> String {
    if !active {
        return "AUTO".to_string();
    }
    match remaining {
        Some(n) => n.to_string(),
        None => "∞".to_string(),
    }
}
