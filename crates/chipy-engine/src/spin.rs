//! Spin engine — request gate, reconciliation, animation orchestration
//!
//! `request_spin` is the only way a round starts. While the request is in
//! flight the reels stay idle; when the response arrives each reel is
//! programmed with a symbol queue whose head continues the previous frame
//! and whose tail is the server's final column, then released into the
//! staggered scroll. Completion applies the server state in a fixed order:
//! grid, balance, flags, notification.

use rand::prelude::*;

use chipy_core::{parse_symbol_matrix, ClientError, ClientResult, Grid};
use chipy_remote::{ApiRequest, ApiResponse, RemoteClient, SpinResponse, WireWin};

use crate::config::{GameConfig, SessionState};
use crate::events::{EventQueue, GameEvent, StampedEvent};
use crate::reel::Reel;
use crate::timing::{ReelGeometry, SpinTuning};

/// A decoded, transposed, validated spin result. Consumed once by the
/// engine to program reels and once by the presenter at completion.
#[derive(Debug, Clone)]
pub struct SpinOutcome {
    /// Final grid, row-major
    pub final_grid: Grid,
    /// Total win in subunits (may be fractional)
    pub win: f64,
    /// Individual win entries
    pub wins: Vec<WireWin>,
    /// Bonus multiplier when a scatter bonus fired
    pub bonus_multiplier: Option<u32>,
    /// Server balance after the round, in subunits
    pub balance_after: i64,
    /// The bet this round was played at, in subunits
    pub bet: i64,
}

/// What one engine tick amounted to.
#[derive(Debug)]
pub enum SpinTick {
    /// Nothing in progress (or still waiting on the server)
    Idle,
    /// Reels are moving
    Animating,
    /// The round settled this frame
    Settled(SpinOutcome),
    /// The spin failed before any animation
    Failed(String),
}

/// The reel-spin and reconciliation state machine.
pub struct SpinEngine {
    config: GameConfig,
    session: SessionState,
    reels: Vec<Reel>,
    tuning: SpinTuning,
    geometry: ReelGeometry,
    remote: RemoteClient,
    events: EventQueue,
    rng: StdRng,
    quick_spin: bool,
    /// Network window flag: set at acceptance, cleared at completion
    requesting: bool,
    /// Animation flag: set when reels start, cleared at completion
    animating: bool,
    pending: Option<SpinOutcome>,
}

impl SpinEngine {
    pub fn new(
        config: GameConfig,
        balance: i64,
        remote: RemoteClient,
        tuning: SpinTuning,
        geometry: ReelGeometry,
    ) -> Self {
        let session = SessionState::new(&config, balance);
        let reels = (0..config.cols)
            .map(|c| Reel::new(&config.initial_grid.column(c), &geometry))
            .collect();
        Self {
            config,
            session,
            reels,
            tuning,
            geometry,
            remote,
            events: EventQueue::new(),
            rng: StdRng::from_os_rng(),
            quick_spin: false,
            requesting: false,
            animating: false,
            pending: None,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Mutable session access for bet selection. The UI must not touch
    /// spin state; flags live on the engine.
    pub fn session_mut(&mut self) -> &mut SessionState {
        &mut self.session
    }

    pub fn reels(&self) -> &[Reel] {
        &self.reels
    }

    pub fn geometry(&self) -> &ReelGeometry {
        &self.geometry
    }

    /// True from response arrival until all reels are idle again.
    pub fn is_spinning(&self) -> bool {
        self.animating
    }

    /// True from request acceptance until completion (or failure).
    pub fn is_requesting(&self) -> bool {
        self.requesting
    }

    pub fn can_spin(&self) -> bool {
        !self.requesting && !self.animating
    }

    pub fn quick_spin(&self) -> bool {
        self.quick_spin
    }

    pub fn set_quick_spin(&mut self, enabled: bool) {
        self.quick_spin = enabled;
    }

    /// Deterministic cosmetic queues for tests and replays.
    pub fn set_rng_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Drain the frame's events for the host.
    pub fn drain_events(&mut self) -> Vec<StampedEvent> {
        self.events.drain()
    }

    pub(crate) fn push_event(&mut self, event: GameEvent, now_ms: f64) {
        self.events.push(event, now_ms);
    }

    /// Issue a spin at the current bet. Rejected while a round is active
    /// in any form.
    pub fn request_spin(&mut self, now_ms: f64) -> ClientResult<()> {
        if self.requesting || self.animating {
            return Err(ClientError::Busy);
        }
        let bet = self.session.current_bet;
        if let Err(err) = self.remote.submit(ApiRequest::Spin { bet }) {
            let err: ClientError = err.into();
            self.events.push(
                GameEvent::SpinFailed {
                    message: err.to_string(),
                },
                now_ms,
            );
            return Err(err);
        }
        self.requesting = true;
        self.events.push(GameEvent::SpinRequested { bet }, now_ms);
        log::debug!("spin requested at bet {bet}");
        Ok(())
    }

    /// Advance one frame: poll the network window, move reels, settle.
    pub fn tick(&mut self, now_ms: f64, dt_ms: f64) -> SpinTick {
        if self.requesting && !self.animating {
            match self.remote.poll() {
                Some(Ok(ApiResponse::Spin(response))) => {
                    if let Err(err) = self.accept_response(response, now_ms) {
                        return self.fail(err, now_ms);
                    }
                }
                Some(Ok(ApiResponse::Init(_))) => {
                    return self.fail(
                        ClientError::Protocol("unexpected init response to spin".into()),
                        now_ms,
                    );
                }
                Some(Err(err)) => return self.fail(err.into(), now_ms),
                None => return SpinTick::Idle,
            }
        }

        if self.animating {
            let mut all_idle = true;
            for (i, reel) in self.reels.iter_mut().enumerate() {
                if reel.tick(now_ms, dt_ms, &self.geometry, &self.tuning) {
                    self.events.push(GameEvent::ReelStopped { reel: i }, now_ms);
                }
                all_idle &= reel.is_idle();
            }
            if all_idle {
                return self.settle(now_ms);
            }
            return SpinTick::Animating;
        }

        SpinTick::Idle
    }

    /// Invalidate the session mid-flight: any outstanding response is
    /// discarded and the reels snap back to the current grid.
    pub fn reset(&mut self) {
        self.remote.reset();
        self.requesting = false;
        self.animating = false;
        self.pending = None;
        for c in 0..self.config.cols {
            let column = self.session.current_grid.column(c);
            self.reels[c].show_column(&column, &self.geometry);
        }
    }

    fn fail(&mut self, err: ClientError, now_ms: f64) -> SpinTick {
        self.requesting = false;
        self.animating = false;
        self.pending = None;
        let message = err.to_string();
        log::warn!("spin failed: {message}");
        self.events
            .push(GameEvent::SpinFailed { message: message.clone() }, now_ms);
        SpinTick::Failed(message)
    }

    fn accept_response(&mut self, response: SpinResponse, now_ms: f64) -> ClientResult<()> {
        let outcome = self.decode(response)?;
        self.program_reels(&outcome, now_ms);
        self.pending = Some(outcome);
        self.animating = true;
        self.events.push(GameEvent::ReelsSpinning, now_ms);
        Ok(())
    }

    /// Validate and transpose a spin response into a `SpinOutcome`.
    fn decode(&self, response: SpinResponse) -> ClientResult<SpinOutcome> {
        if let Some(err) = response.error {
            return Err(ClientError::Game(err));
        }
        let outcome = response
            .outcome
            .ok_or_else(|| ClientError::Protocol("spin response missing outcome".into()))?;

        // The spin screen is column-major; transpose here, explicitly.
        let columns = parse_symbol_matrix(&outcome.screen)?;
        let final_grid = Grid::from_columns(columns, self.config.rows, self.config.cols)?;

        let balance_after = response
            .balance
            .ok_or_else(|| ClientError::Protocol("spin response missing balance".into()))?
            .wallet
            .round() as i64;

        let bonus_multiplier = outcome
            .features
            .and_then(|f| f.bonus_data)
            .map(|b| b.multiplier);

        Ok(SpinOutcome {
            final_grid,
            win: outcome.win,
            wins: outcome.wins,
            bonus_multiplier,
            balance_after,
            bet: self.session.current_bet,
        })
    }

    /// Build each reel's symbol queue and release it.
    ///
    /// `order = last_col ++ middle ++ final_col`: the first cells to rotate
    /// in continue the previous frame and the last cells are the final
    /// symbols. The middle is a cosmetic draw from the base strip —
    /// alignment enforces correctness even when the queue is not consumed
    /// exactly.
    fn program_reels(&mut self, outcome: &SpinOutcome, now_ms: f64) {
        let rows = self.config.rows;
        for c in 0..self.config.cols {
            let last_col = self.session.current_grid.column(c);
            let final_col = outcome.final_grid.column(c);
            let plateau_ms = self.tuning.plateau_ms(c, self.quick_spin);
            let loops = self
                .tuning
                .queue_len(plateau_ms, self.geometry.symbol_spacing, rows);
            let middle_len = loops.saturating_sub(2 * rows);

            let strip = &self.config.base_reels[c];
            let mut order = Vec::with_capacity(last_col.len() + middle_len + final_col.len());
            order.extend_from_slice(&last_col);
            for _ in 0..middle_len {
                order.push(strip[self.rng.random_range(0..strip.len())]);
            }
            order.extend_from_slice(&final_col);

            self.reels[c].start(
                order,
                final_col,
                now_ms + plateau_ms,
                self.tuning.spin_speed,
            );
        }
    }

    fn settle(&mut self, now_ms: f64) -> SpinTick {
        let Some(outcome) = self.pending.take() else {
            // Reels settled with nothing pending; treat as already idle
            self.animating = false;
            self.requesting = false;
            return SpinTick::Idle;
        };
        self.session.current_grid = outcome.final_grid.clone();
        self.session.balance = outcome.balance_after;
        self.animating = false;
        self.requesting = false;
        self.events.push(
            GameEvent::BalanceUpdated {
                balance: outcome.balance_after,
            },
            now_ms,
        );
        self.events
            .push(GameEvent::SpinSettled { win: outcome.win }, now_ms);
        log::debug!(
            "spin settled: win {} balance {}",
            outcome.win,
            outcome.balance_after
        );
        SpinTick::Settled(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chipy_remote::{RemoteClient, ScriptedTransport};
    use serde_json::json;

    fn init_value() -> serde_json::Value {
        json!({
            "balance": {"game": 0.0, "wallet": 100000.0},
            "options": {
                "available_bets": [1, 10],
                "currency": {"code": "FUN", "exponent": 2, "subunits": 100, "symbol": "FUN"},
                "default_bet": 10,
                "layout": {"reels": 3, "rows": 3},
                "lines": [[0, 0, 0], [1, 1, 1], [2, 2, 2]],
                "paytable": {"7": [0, 0, 5]},
                "reels": {"main": [
                    ["1", "7", "3", "4", "5"],
                    ["1", "3", "5", "2", "6"],
                    ["1", "7", "0", "6", "2"]
                ]},
                "screen": [["1", "7", "7"], ["1", "3", "8"], ["1", "7", "7"]],
                "special_symbols": [{"kind": "scatter", "symbol": "8"}]
            }
        })
    }

    fn engine_with_spins(spins: Vec<serde_json::Value>) -> SpinEngine {
        let transport = ScriptedTransport::new().with_spins(spins);
        let init: chipy_remote::InitResponse = serde_json::from_value(init_value()).unwrap();
        let (config, balance) = GameConfig::from_init(&init).unwrap();
        let mut engine = SpinEngine::new(
            config,
            balance,
            RemoteClient::direct(transport),
            SpinTuning::normal(),
            ReelGeometry::standard(),
        );
        engine.set_rng_seed(7);
        engine
    }

    fn loss_response() -> serde_json::Value {
        json!({
            "balance": {"game": 0.0, "wallet": 99990.0},
            "outcome": {
                "screen": [["3", "4", "2"], ["0", "2", "2"], ["1", "6", "0"]],
                "bet": 10.0,
                "win": 0.0,
                "wins": [],
                "special_symbols": {}
            }
        })
    }

    /// Tick until the engine settles or fails.
    fn run_spin(engine: &mut SpinEngine, start_ms: f64) -> SpinTick {
        engine.request_spin(start_ms).unwrap();
        let mut now = start_ms;
        for _ in 0..20_000 {
            now += 16.0;
            match engine.tick(now, 16.0) {
                SpinTick::Settled(outcome) => return SpinTick::Settled(outcome),
                SpinTick::Failed(message) => return SpinTick::Failed(message),
                _ => {}
            }
        }
        panic!("spin never completed");
    }

    #[test]
    fn test_reentry_rejected_during_request() {
        let mut engine = engine_with_spins(vec![loss_response()]);
        engine.request_spin(0.0).unwrap();
        assert!(engine.is_requesting());
        assert!(matches!(engine.request_spin(1.0), Err(ClientError::Busy)));
    }

    #[test]
    fn test_spin_reconciles_grid_and_balance() {
        let mut engine = engine_with_spins(vec![loss_response()]);
        let tick = run_spin(&mut engine, 0.0);
        let SpinTick::Settled(outcome) = tick else {
            panic!("expected settle, got {tick:?}");
        };

        // Transposed: screen[col][row] → grid[row][col]
        assert_eq!(outcome.final_grid.as_rows()[0], vec![3, 0, 1]);
        assert_eq!(engine.session().current_grid, outcome.final_grid);
        assert_eq!(engine.session().balance, 99990);
        assert!(engine.can_spin());

        // Every reel shows the final column at canonical positions
        for c in 0..3 {
            assert_eq!(
                engine.reels()[c].visible_column(),
                outcome.final_grid.column(c)
            );
        }
    }

    #[test]
    fn test_game_error_aborts_without_animation() {
        let mut engine = engine_with_spins(vec![json!({"error": "insufficient funds"})]);
        engine.request_spin(0.0).unwrap();
        let tick = engine.tick(16.0, 16.0);
        assert!(matches!(tick, SpinTick::Failed(_)));
        assert!(!engine.is_spinning());
        assert!(!engine.is_requesting());
        // Grid unchanged
        assert_eq!(engine.session().current_grid.as_rows()[0], vec![1, 7, 7]);
    }

    #[test]
    fn test_wrong_shape_grid_is_protocol_error() {
        let mut engine = engine_with_spins(vec![json!({
            "balance": {"wallet": 99990.0},
            "outcome": {"screen": [["1", "2"], ["3", "4"]], "win": 0.0, "wins": []}
        })]);
        engine.request_spin(0.0).unwrap();
        assert!(matches!(engine.tick(16.0, 16.0), SpinTick::Failed(_)));
        assert!(engine.can_spin());
    }

    #[test]
    fn test_queue_shape() {
        let mut engine = engine_with_spins(vec![loss_response()]);
        engine.request_spin(0.0).unwrap();
        // First tick consumes the response and programs the reels
        engine.tick(16.0, 16.0);

        // Columns of the init grid and of the (transposed) final grid
        let last_cols: [[u32; 3]; 3] = [[1, 1, 1], [7, 3, 7], [7, 8, 7]];
        let final_cols: [[u32; 3]; 3] = [[3, 4, 2], [0, 2, 2], [1, 6, 0]];
        for c in 0..3 {
            let order = engine.reels()[c].order();
            let rows = 3;
            assert!(order.len() >= 2 * rows);
            // Head continues the previous frame
            assert_eq!(&order[..rows], &last_cols[c][..]);
            // Tail is exactly the final column
            assert_eq!(&order[order.len() - rows..], &final_cols[c][..]);
        }
    }

    #[test]
    fn test_reset_discards_in_flight_response() {
        let mut engine = engine_with_spins(vec![loss_response()]);
        engine.request_spin(0.0).unwrap();
        engine.reset();
        assert!(engine.can_spin());

        // The queued response is stale and must not animate anything
        for frame in 1..10 {
            let now = frame as f64 * 16.0;
            assert!(matches!(engine.tick(now, 16.0), SpinTick::Idle));
        }
        assert_eq!(engine.session().current_grid.as_rows()[0], vec![1, 7, 7]);
    }
}
