//! Autospin scheduling
//!
//! Tracks the remaining spin count and the stop conditions, and schedules
//! the next spin a short gap after each settle. The controller never talks
//! to the remote itself; the machine façade asks `take_due_spin` once per
//! frame and issues the request.

use log::debug;

/// Conditions that end an autospin run early. Checked in order after each
/// settled spin; the first hit stops the run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AutospinPolicy {
    /// Stop on any winning spin
    pub stop_on_any_win: bool,
    /// Stop when a single win reaches this many subunits
    pub stop_when_win_at_least: Option<f64>,
    /// Stop when the balance has risen this much since the run started
    pub stop_when_balance_up_by: Option<i64>,
    /// Stop when the balance has fallen this much since the run started
    pub stop_when_balance_down_by: Option<i64>,
}

/// State of one autospin run.
#[derive(Debug)]
pub struct AutospinController {
    policy: AutospinPolicy,
    /// Spins left; `None` runs until a stop condition or cancel
    remaining: Option<u32>,
    /// Balance when the run started, for the up/down conditions
    start_balance: i64,
    active: bool,
    /// When the next spin should be issued
    next_spin_at: Option<f64>,
    gap_ms: f64,
}

impl AutospinController {
    pub fn new(gap_ms: f64) -> Self {
        Self {
            policy: AutospinPolicy::default(),
            remaining: None,
            start_balance: 0,
            active: false,
            next_spin_at: None,
            gap_ms,
        }
    }

    /// Begin a run. The first spin is due immediately.
    pub fn start(&mut self, count: Option<u32>, policy: AutospinPolicy, balance: i64, now_ms: f64) {
        self.policy = policy;
        self.remaining = count;
        self.start_balance = balance;
        self.active = true;
        self.next_spin_at = Some(now_ms);
        debug!("autospin started, count {count:?}");
    }

    /// Player cancel. Any spin in flight finishes normally.
    pub fn cancel(&mut self) {
        self.active = false;
        self.next_spin_at = None;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn remaining(&self) -> Option<u32> {
        self.remaining
    }

    /// Evaluate stop conditions against a settled spin, then either stop
    /// or schedule the next spin.
    pub fn on_spin_settled(&mut self, win: f64, balance: i64, now_ms: f64) {
        if !self.active {
            return;
        }
        if self.policy.stop_on_any_win && win > 0.0 {
            debug!("autospin stop: win {win}");
            self.cancel();
            return;
        }
        if let Some(threshold) = self.policy.stop_when_win_at_least {
            if win >= threshold {
                debug!("autospin stop: win {win} >= {threshold}");
                self.cancel();
                return;
            }
        }
        if let Some(up) = self.policy.stop_when_balance_up_by {
            if balance - self.start_balance >= up {
                debug!("autospin stop: balance up {}", balance - self.start_balance);
                self.cancel();
                return;
            }
        }
        if let Some(down) = self.policy.stop_when_balance_down_by {
            if self.start_balance - balance >= down {
                debug!(
                    "autospin stop: balance down {}",
                    self.start_balance - balance
                );
                self.cancel();
                return;
            }
        }
        if let Some(remaining) = &mut self.remaining {
            *remaining = remaining.saturating_sub(1);
            if *remaining == 0 {
                debug!("autospin stop: count exhausted");
                self.cancel();
                return;
            }
        }
        self.next_spin_at = Some(now_ms + self.gap_ms);
    }

    /// Any failure halts the run; the player must restart it.
    pub fn on_spin_failed(&mut self) {
        if self.active {
            debug!("autospin stop: spin failed");
            self.cancel();
        }
    }

    /// True exactly once when a scheduled spin falls due.
    pub fn take_due_spin(&mut self, now_ms: f64) -> bool {
        if !self.active {
            return false;
        }
        match self.next_spin_at {
            Some(due) if now_ms >= due => {
                self.next_spin_at = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> AutospinController {
        AutospinController::new(400.0)
    }

    #[test]
    fn test_first_spin_due_immediately() {
        let mut auto = controller();
        auto.start(Some(5), AutospinPolicy::default(), 1000, 100.0);
        assert!(auto.take_due_spin(100.0));
        // Consumed; not due again until the next settle schedules one
        assert!(!auto.take_due_spin(100.0));
    }

    #[test]
    fn test_count_decrements_and_exhausts() {
        let mut auto = controller();
        auto.start(Some(2), AutospinPolicy::default(), 1000, 0.0);
        assert!(auto.take_due_spin(0.0));

        auto.on_spin_settled(0.0, 999, 1000.0);
        assert_eq!(auto.remaining(), Some(1));
        assert!(auto.is_active());
        assert!(!auto.take_due_spin(1100.0));
        assert!(auto.take_due_spin(1400.0));

        auto.on_spin_settled(0.0, 998, 2000.0);
        assert_eq!(auto.remaining(), Some(0));
        assert!(!auto.is_active());
        assert!(!auto.take_due_spin(10_000.0));
    }

    #[test]
    fn test_unbounded_run_keeps_scheduling() {
        let mut auto = controller();
        auto.start(None, AutospinPolicy::default(), 1000, 0.0);
        assert!(auto.take_due_spin(0.0));
        for i in 0..100 {
            let now = 1000.0 * (i + 1) as f64;
            auto.on_spin_settled(0.0, 1000 - i, now);
            assert!(auto.is_active());
            assert!(auto.take_due_spin(now + 400.0));
        }
    }

    #[test]
    fn test_stop_on_any_win() {
        let mut auto = controller();
        auto.start(
            Some(5),
            AutospinPolicy {
                stop_on_any_win: true,
                ..Default::default()
            },
            1000,
            0.0,
        );
        auto.on_spin_settled(0.0, 995, 500.0);
        assert!(auto.is_active());
        auto.on_spin_settled(1.0, 996, 1000.0);
        assert!(!auto.is_active());
        // Count untouched by the early stop
        assert_eq!(auto.remaining(), Some(4));
    }

    #[test]
    fn test_stop_on_win_threshold() {
        let mut auto = controller();
        auto.start(
            None,
            AutospinPolicy {
                stop_when_win_at_least: Some(50.0),
                ..Default::default()
            },
            1000,
            0.0,
        );
        auto.on_spin_settled(49.9, 1049, 500.0);
        assert!(auto.is_active());
        auto.on_spin_settled(50.0, 1099, 1000.0);
        assert!(!auto.is_active());
    }

    #[test]
    fn test_stop_on_balance_swings() {
        let mut auto = controller();
        auto.start(
            None,
            AutospinPolicy {
                stop_when_balance_up_by: Some(100),
                ..Default::default()
            },
            1000,
            0.0,
        );
        auto.on_spin_settled(0.0, 1099, 500.0);
        assert!(auto.is_active());
        auto.on_spin_settled(10.0, 1100, 1000.0);
        assert!(!auto.is_active());

        let mut auto = controller();
        auto.start(
            None,
            AutospinPolicy {
                stop_when_balance_down_by: Some(100),
                ..Default::default()
            },
            1000,
            0.0,
        );
        auto.on_spin_settled(0.0, 901, 500.0);
        assert!(auto.is_active());
        auto.on_spin_settled(0.0, 900, 1000.0);
        assert!(!auto.is_active());
    }

    #[test]
    fn test_any_win_checked_before_count() {
        // A winning final spin stops via the policy, not count exhaustion
        let mut auto = controller();
        auto.start(
            Some(1),
            AutospinPolicy {
                stop_on_any_win: true,
                ..Default::default()
            },
            1000,
            0.0,
        );
        auto.on_spin_settled(5.0, 1005, 500.0);
        assert!(!auto.is_active());
        assert_eq!(auto.remaining(), Some(1));
    }

    #[test]
    fn test_failure_halts_run() {
        let mut auto = controller();
        auto.start(Some(10), AutospinPolicy::default(), 1000, 0.0);
        auto.on_spin_failed();
        assert!(!auto.is_active());
        assert!(!auto.take_due_spin(10_000.0));
    }

    #[test]
    fn test_cancel_mid_run() {
        let mut auto = controller();
        auto.start(None, AutospinPolicy::default(), 1000, 0.0);
        auto.on_spin_settled(0.0, 999, 500.0);
        auto.cancel();
        assert!(!auto.is_active());
        assert!(!auto.take_due_spin(900.0));
        // Settles after cancel are ignored
        auto.on_spin_settled(0.0, 998, 1000.0);
        assert!(!auto.is_active());
    }
}
