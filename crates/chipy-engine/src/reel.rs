//! Per-reel state machine
//!
//! One reel owns `rows` sprite slots that are recycled forever: a sprite
//! scrolled past the bottom wraps to the top and takes the next symbol
//! from the reel's queued `order`. The terminal phase snaps every sprite
//! to its canonical slot and overwrites its symbol with the server's final
//! column — the aligned frame is authoritative regardless of how much of
//! the queue was consumed.
//!
//! Phases: Idle → Constant → Decelerating → Aligning → Idle.

use chipy_core::SymbolId;

use crate::timing::{ReelGeometry, SpinTuning};

/// Reel animation phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReelPhase {
    Idle,
    Constant,
    Decelerating,
    Aligning,
}

/// One recycled sprite slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteSlot {
    /// Vertical centre position (px)
    pub y: f64,
    /// Symbol currently textured on this slot
    pub symbol: SymbolId,
}

/// Alignment tween for a single sprite.
#[derive(Debug, Clone, Copy)]
struct AlignTween {
    start_y: f64,
    target_y: f64,
}

/// Mutable state of one reel column.
#[derive(Debug)]
pub struct Reel {
    sprites: Vec<SpriteSlot>,
    speed: f64,
    phase: ReelPhase,
    stop_deadline_ms: f64,
    /// Symbols future recycled sprites must adopt
    order: Vec<SymbolId>,
    /// Cursor into `order`
    index: usize,
    /// Server-decided final column, applied during alignment
    final_column: Vec<SymbolId>,
    tweens: Vec<AlignTween>,
    align_start_ms: f64,
    align_duration_ms: f64,
}

impl Reel {
    /// Create an idle reel showing `column` (top to bottom) at the
    /// canonical slots.
    pub fn new(column: &[SymbolId], geometry: &ReelGeometry) -> Self {
        let rows = column.len();
        let sprites = column
            .iter()
            .enumerate()
            .map(|(i, &symbol)| SpriteSlot {
                y: geometry.slot_y(i, rows),
                symbol,
            })
            .collect();
        Self {
            sprites,
            speed: 0.0,
            phase: ReelPhase::Idle,
            stop_deadline_ms: 0.0,
            order: Vec::new(),
            index: 0,
            final_column: Vec::new(),
            tweens: Vec::new(),
            align_start_ms: 0.0,
            align_duration_ms: 0.0,
        }
    }

    pub fn phase(&self) -> ReelPhase {
        self.phase
    }

    pub fn is_idle(&self) -> bool {
        self.phase == ReelPhase::Idle
    }

    pub fn sprites(&self) -> &[SpriteSlot] {
        &self.sprites
    }

    /// Queued recycle symbols (inspection for tests).
    pub(crate) fn order(&self) -> &[SymbolId] {
        &self.order
    }

    /// Symbols scanned top to bottom in current sprite order.
    pub fn visible_column(&self) -> Vec<SymbolId> {
        let mut ranked: Vec<&SpriteSlot> = self.sprites.iter().collect();
        ranked.sort_by(|a, b| a.y.total_cmp(&b.y));
        ranked.iter().map(|s| s.symbol).collect()
    }

    /// Snap the idle reel to a new column without animation (session reset).
    pub fn show_column(&mut self, column: &[SymbolId], geometry: &ReelGeometry) {
        let rows = self.sprites.len();
        for (i, sprite) in self.sprites.iter_mut().enumerate() {
            sprite.y = geometry.slot_y(i, rows);
            sprite.symbol = column.get(i).copied().unwrap_or(sprite.symbol);
        }
        self.phase = ReelPhase::Idle;
        self.speed = 0.0;
        self.order.clear();
        self.index = 0;
        self.final_column.clear();
        self.tweens.clear();
    }

    /// Program the reel and enter the constant phase.
    pub fn start(
        &mut self,
        order: Vec<SymbolId>,
        final_column: Vec<SymbolId>,
        stop_deadline_ms: f64,
        speed: f64,
    ) {
        self.order = order;
        self.index = 0;
        self.final_column = final_column;
        self.stop_deadline_ms = stop_deadline_ms;
        self.speed = speed;
        self.phase = ReelPhase::Constant;
        self.tweens.clear();
    }

    /// Advance one frame. Returns `true` on the frame this reel enters
    /// alignment (the reel-stop moment).
    pub fn tick(
        &mut self,
        now_ms: f64,
        dt_ms: f64,
        geometry: &ReelGeometry,
        tuning: &SpinTuning,
    ) -> bool {
        let dt_s = dt_ms / 1000.0;
        match self.phase {
            ReelPhase::Idle => false,
            ReelPhase::Constant => {
                self.advance(dt_s, geometry);
                if now_ms >= self.stop_deadline_ms {
                    self.phase = ReelPhase::Decelerating;
                }
                false
            }
            ReelPhase::Decelerating => {
                self.advance(dt_s, geometry);
                self.speed -= tuning.deceleration * dt_s;
                if self.speed <= 0.0 {
                    self.speed = 0.0;
                    self.begin_align(now_ms, tuning.align_ms, geometry);
                    true
                } else {
                    false
                }
            }
            ReelPhase::Aligning => {
                self.step_align(now_ms);
                false
            }
        }
    }

    /// Scroll sprites down and recycle those past the window bottom.
    fn advance(&mut self, dt_s: f64, geometry: &ReelGeometry) {
        let rows = self.sprites.len();
        let window_px = geometry.symbol_spacing * rows as f64;
        let threshold = geometry.wrap_threshold();
        for sprite in &mut self.sprites {
            sprite.y += self.speed * dt_s;
            while sprite.y > threshold {
                sprite.y -= window_px;
                if !self.order.is_empty() {
                    sprite.symbol = self.order[self.index % self.order.len()];
                    self.index += 1;
                }
            }
        }
    }

    /// Rank sprites top to bottom, tween each to its canonical slot and
    /// adopt the final column. The alignment frame decides what the player
    /// sees; the queue is cosmetic.
    fn begin_align(&mut self, now_ms: f64, align_ms: f64, geometry: &ReelGeometry) {
        let rows = self.sprites.len();
        let mut ranked: Vec<usize> = (0..rows).collect();
        ranked.sort_by(|&a, &b| self.sprites[a].y.total_cmp(&self.sprites[b].y));

        self.tweens = vec![
            AlignTween {
                start_y: 0.0,
                target_y: 0.0,
            };
            rows
        ];
        for (rank, &sprite_idx) in ranked.iter().enumerate() {
            self.tweens[sprite_idx] = AlignTween {
                start_y: self.sprites[sprite_idx].y,
                target_y: geometry.slot_y(rank, rows),
            };
            if let Some(&symbol) = self.final_column.get(rank) {
                self.sprites[sprite_idx].symbol = symbol;
            }
        }
        self.align_start_ms = now_ms;
        self.align_duration_ms = align_ms.max(1.0);
        self.phase = ReelPhase::Aligning;
    }

    fn step_align(&mut self, now_ms: f64) {
        let t = ((now_ms - self.align_start_ms) / self.align_duration_ms).clamp(0.0, 1.0);
        for (sprite, tween) in self.sprites.iter_mut().zip(&self.tweens) {
            sprite.y = tween.start_y + (tween.target_y - tween.start_y) * t;
        }
        if t >= 1.0 {
            for (sprite, tween) in self.sprites.iter_mut().zip(&self.tweens) {
                sprite.y = tween.target_y;
            }
            self.tweens.clear();
            self.phase = ReelPhase::Idle;
        }
    }
}
