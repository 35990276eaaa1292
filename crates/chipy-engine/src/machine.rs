//! Machine façade and session bootstrap
//!
//! `SlotMachine` is what the scene owns: it wires the spin engine, the win
//! presenter and the autospin controller together and exposes the handful
//! of calls a frontend needs. `Bootstrap` performs the init round trip and
//! hands over a ready machine.

use chipy_core::{ClientError, ClientResult};
use chipy_remote::{ApiRequest, ApiResponse, RemoteClient};

use crate::autospin::{AutospinController, AutospinPolicy};
use crate::config::{GameConfig, SessionState};
use crate::events::{GameEvent, StampedEvent};
use crate::presenter::WinPresenter;
use crate::reel::Reel;
use crate::spin::{SpinEngine, SpinOutcome, SpinTick};
use crate::timing::{ReelGeometry, SpinTuning};

/// One fully initialised game session.
pub struct SlotMachine {
    engine: SpinEngine,
    presenter: WinPresenter,
    autospin: AutospinController,
    last_outcome: Option<SpinOutcome>,
}

impl SlotMachine {
    pub fn new(
        config: GameConfig,
        balance: i64,
        remote: RemoteClient,
        tuning: SpinTuning,
        geometry: ReelGeometry,
    ) -> Self {
        let autospin = AutospinController::new(tuning.autospin_gap_ms);
        Self {
            engine: SpinEngine::new(config, balance, remote, tuning, geometry),
            presenter: WinPresenter::new(),
            autospin,
            last_outcome: None,
        }
    }

    /// The spin button. While autospin runs this is a cancel; otherwise it
    /// starts a round. `Busy` while a round is already active.
    pub fn press_spin(&mut self, now_ms: f64) -> ClientResult<()> {
        if self.autospin.is_active() {
            self.autospin.cancel();
            self.engine.push_event(GameEvent::AutospinStopped, now_ms);
            return Ok(());
        }
        self.spin_once(now_ms)
    }

    /// Begin an autospin run. The first spin happens on the next tick.
    pub fn start_autospin(
        &mut self,
        count: Option<u32>,
        policy: AutospinPolicy,
        now_ms: f64,
    ) -> ClientResult<()> {
        if !self.engine.can_spin() {
            return Err(ClientError::Busy);
        }
        self.autospin
            .start(count, policy, self.engine.session().balance, now_ms);
        self.engine
            .push_event(GameEvent::AutospinStarted { count }, now_ms);
        Ok(())
    }

    /// Advance one frame.
    pub fn tick(&mut self, now_ms: f64, dt_ms: f64) -> SpinTick {
        let tick = self.engine.tick(now_ms, dt_ms);
        match &tick {
            SpinTick::Settled(outcome) => {
                self.presenter
                    .present(outcome, self.engine.config(), self.engine.geometry());
                if self.presenter.bonus().is_some() {
                    self.engine.push_event(
                        GameEvent::BonusTriggered {
                            multiplier: outcome.bonus_multiplier,
                        },
                        now_ms,
                    );
                }
                let was_active = self.autospin.is_active();
                self.autospin
                    .on_spin_settled(outcome.win, outcome.balance_after, now_ms);
                if was_active && !self.autospin.is_active() {
                    self.engine.push_event(GameEvent::AutospinStopped, now_ms);
                }
                self.last_outcome = Some(outcome.clone());
            }
            SpinTick::Failed(_) => {
                if self.autospin.is_active() {
                    self.autospin.on_spin_failed();
                    self.engine.push_event(GameEvent::AutospinStopped, now_ms);
                }
            }
            SpinTick::Idle | SpinTick::Animating => {}
        }

        if self.engine.can_spin() && self.autospin.take_due_spin(now_ms) {
            // Submit errors never reach the Failed arm; halt the run here
            if self.spin_once(now_ms).is_err() {
                self.autospin.on_spin_failed();
                self.engine.push_event(GameEvent::AutospinStopped, now_ms);
            }
        }

        tick
    }

    fn spin_once(&mut self, now_ms: f64) -> ClientResult<()> {
        self.presenter.clear();
        self.engine.request_spin(now_ms)
    }

    /// Close the bonus panel.
    pub fn dismiss_bonus(&mut self) {
        self.presenter.dismiss_bonus();
    }

    /// Abandon any in-flight round and show the last settled grid.
    pub fn reset(&mut self) {
        self.autospin.cancel();
        self.presenter.clear();
        self.engine.reset();
    }

    pub fn config(&self) -> &GameConfig {
        self.engine.config()
    }

    pub fn session(&self) -> &SessionState {
        self.engine.session()
    }

    pub fn session_mut(&mut self) -> &mut SessionState {
        self.engine.session_mut()
    }

    pub fn reels(&self) -> &[Reel] {
        self.engine.reels()
    }

    pub fn presenter(&self) -> &WinPresenter {
        &self.presenter
    }

    pub fn last_outcome(&self) -> Option<&SpinOutcome> {
        self.last_outcome.as_ref()
    }

    pub fn is_spinning(&self) -> bool {
        self.engine.is_spinning()
    }

    pub fn is_requesting(&self) -> bool {
        self.engine.is_requesting()
    }

    pub fn can_spin(&self) -> bool {
        self.engine.can_spin()
    }

    pub fn autospin_active(&self) -> bool {
        self.autospin.is_active()
    }

    pub fn autospin_remaining(&self) -> Option<u32> {
        self.autospin.remaining()
    }

    pub fn set_quick_spin(&mut self, enabled: bool) {
        self.engine.set_quick_spin(enabled);
    }

    /// Deterministic cosmetic reel queues.
    pub fn set_rng_seed(&mut self, seed: u64) {
        self.engine.set_rng_seed(seed);
    }

    pub fn drain_events(&mut self) -> Vec<StampedEvent> {
        self.engine.drain_events()
    }
}

/// The init round trip. `begin` sends the request; `poll` each frame until
/// a machine (or a fatal error) comes back.
pub struct Bootstrap {
    remote: Option<RemoteClient>,
    tuning: SpinTuning,
    geometry: ReelGeometry,
}

impl Bootstrap {
    pub fn new(remote: RemoteClient, tuning: SpinTuning, geometry: ReelGeometry) -> Self {
        Self {
            remote: Some(remote),
            tuning,
            geometry,
        }
    }

    /// Send the init request.
    pub fn begin(&mut self) -> ClientResult<()> {
        let remote = self
            .remote
            .as_mut()
            .ok_or_else(|| ClientError::Protocol("bootstrap already consumed".into()))?;
        remote.submit(ApiRequest::Init)?;
        Ok(())
    }

    /// `None` while the response is outstanding. On success the client is
    /// handed to the machine; on error the bootstrap is spent.
    pub fn poll(&mut self) -> Option<ClientResult<SlotMachine>> {
        let remote = self.remote.as_mut()?;
        match remote.poll()? {
            Ok(ApiResponse::Init(init)) => {
                let result = GameConfig::from_init(&init);
                match result {
                    Ok((config, balance)) => {
                        let remote = self.remote.take()?;
                        Some(Ok(SlotMachine::new(
                            config,
                            balance,
                            remote,
                            self.tuning,
                            self.geometry,
                        )))
                    }
                    Err(err) => {
                        self.remote = None;
                        Some(Err(err))
                    }
                }
            }
            Ok(ApiResponse::Spin(_)) => {
                self.remote = None;
                Some(Err(ClientError::Protocol(
                    "unexpected spin response to init".into(),
                )))
            }
            Err(err) => {
                self.remote = None;
                Some(Err(err.into()))
            }
        }
    }
}
