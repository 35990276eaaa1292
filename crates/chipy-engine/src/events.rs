//! Game events
//!
//! Timestamped notifications the host drains once per frame. Rendering and
//! audio live outside this crate; the reel-stop sound, for example, is the
//! host reacting to `ReelStopped` if sound is enabled in its settings.

use std::collections::VecDeque;

/// Something the host may want to react to.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A spin request was accepted and sent to the server
    SpinRequested { bet: i64 },
    /// The response arrived and the reels started scrolling
    ReelsSpinning,
    /// A reel entered alignment (reel-stop sound cue)
    ReelStopped { reel: usize },
    /// All reels idle; the round is settled
    SpinSettled { win: f64 },
    /// The spin failed before any animation (transport/protocol/game error)
    SpinFailed { message: String },
    /// A scatter bonus was presented
    BonusTriggered { multiplier: Option<u32> },
    /// Balance label should re-render
    BalanceUpdated { balance: i64 },
    /// Autospin entered the running state
    AutospinStarted { count: Option<u32> },
    /// Autospin left the running state (policy hit, cancel, or failure)
    AutospinStopped,
}

/// An event with the frame time it occurred at.
#[derive(Debug, Clone, PartialEq)]
pub struct StampedEvent {
    pub event: GameEvent,
    pub at_ms: f64,
}

/// FIFO event queue drained by the host.
#[derive(Debug, Default)]
pub struct EventQueue {
    queue: VecDeque<StampedEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: GameEvent, at_ms: f64) {
        self.queue.push_back(StampedEvent { event, at_ms });
    }

    /// Remove and return everything queued so far.
    pub fn drain(&mut self) -> Vec<StampedEvent> {
        self.queue.drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_drain() {
        let mut q = EventQueue::new();
        q.push(GameEvent::SpinRequested { bet: 10 }, 1.0);
        q.push(GameEvent::ReelsSpinning, 2.0);

        let drained = q.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].event, GameEvent::SpinRequested { bet: 10 });
        assert_eq!(drained[1].at_ms, 2.0);
        assert!(q.is_empty());
    }
}
