//! Spin tuning and reel geometry
//!
//! Design constants for the reel scroll: plateau speed, deceleration,
//! per-column stagger, and the quick-spin scale factor. The travel/queue
//! math lives here because it is pure arithmetic over these constants.

use serde::{Deserialize, Serialize};

/// Timing and physics constants for a spin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpinTuning {
    /// Initial and plateau scroll speed (px/s)
    pub spin_speed: f64,
    /// Constant deceleration magnitude after the stop deadline (px/s²)
    pub deceleration: f64,
    /// Plateau duration of the first reel (ms)
    pub base_offset_ms: f64,
    /// Extra plateau per reel column (ms)
    pub stagger_ms: f64,
    /// Multiplier applied to all delays in quick-spin mode (< 1)
    pub quick_spin_factor: f64,
    /// Alignment tween duration (ms)
    pub align_ms: f64,
    /// Gap between autospin rounds (ms)
    pub autospin_gap_ms: f64,
}

impl SpinTuning {
    /// Normal gameplay timing.
    pub fn normal() -> Self {
        Self {
            spin_speed: 2400.0,
            deceleration: 60000.0,
            base_offset_ms: 1000.0,
            stagger_ms: 300.0,
            quick_spin_factor: 0.5,
            align_ms: 150.0,
            autospin_gap_ms: 400.0,
        }
    }

    /// Scale all durations by `factor` (< 1.0 = faster). Speeds are left
    /// alone; only the plateau, alignment and autospin gap shrink.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            base_offset_ms: self.base_offset_ms * factor,
            stagger_ms: self.stagger_ms * factor,
            align_ms: self.align_ms * factor,
            autospin_gap_ms: self.autospin_gap_ms * factor,
            ..*self
        }
    }

    /// Plateau duration for reel `col`, honoring quick-spin.
    pub fn plateau_ms(&self, col: usize, quick_spin: bool) -> f64 {
        let base = self.base_offset_ms + col as f64 * self.stagger_ms;
        if quick_spin {
            base * self.quick_spin_factor
        } else {
            base
        }
    }

    /// Total pixel travel of a reel: plateau distance plus the area under
    /// the deceleration ramp.
    pub fn travel_px(&self, plateau_ms: f64) -> f64 {
        self.spin_speed * (plateau_ms / 1000.0)
            + 0.5 * self.spin_speed * (self.spin_speed / self.deceleration)
    }

    /// Number of symbol cells the queue must cover for this plateau, never
    /// less than two full windows.
    pub fn queue_len(&self, plateau_ms: f64, symbol_spacing: f64, rows: usize) -> usize {
        let loops = (self.travel_px(plateau_ms) / (symbol_spacing * rows as f64)).round() as usize;
        loops.max(rows * 2)
    }
}

impl Default for SpinTuning {
    fn default() -> Self {
        Self::normal()
    }
}

/// Pixel geometry of the reel window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReelGeometry {
    /// X of the first reel's column centre
    pub start_x: f64,
    /// Horizontal distance between reel centres
    pub reel_width: f64,
    /// Y of the window centre
    pub center_y: f64,
    /// Vertical distance between adjacent symbol centres
    pub symbol_spacing: f64,
}

impl ReelGeometry {
    pub fn standard() -> Self {
        Self {
            start_x: 200.0,
            reel_width: 150.0,
            center_y: 300.0,
            symbol_spacing: 200.0,
        }
    }

    /// Column centre X for reel `col`.
    pub fn reel_x(&self, col: usize) -> f64 {
        self.start_x + col as f64 * self.reel_width
    }

    /// Canonical Y of visible slot `i` (0 = top) in a window of `rows`.
    pub fn slot_y(&self, i: usize, rows: usize) -> f64 {
        self.center_y + (i as f64 - (rows as f64 - 1.0) / 2.0) * self.symbol_spacing
    }

    /// A sprite past this Y wraps back to the top of the reel.
    pub fn wrap_threshold(&self) -> f64 {
        self.center_y + self.symbol_spacing
    }
}

impl Default for ReelGeometry {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_plateau_stagger() {
        let tuning = SpinTuning::normal();
        assert_relative_eq!(tuning.plateau_ms(0, false), 1000.0);
        assert_relative_eq!(tuning.plateau_ms(1, false), 1300.0);
        assert_relative_eq!(tuning.plateau_ms(2, false), 1600.0);

        // Quick spin scales every delay down
        assert!(tuning.plateau_ms(2, true) < tuning.plateau_ms(2, false));
    }

    #[test]
    fn test_travel_area_under_curve() {
        let tuning = SpinTuning::normal();
        // 2400 px/s for 1 s plus 2400²/(2·60000) of deceleration run-out
        assert_relative_eq!(tuning.travel_px(1000.0), 2400.0 + 48.0);
    }

    #[test]
    fn test_queue_len_floor() {
        let tuning = SpinTuning::normal();
        // travel 2448 px over 600 px windows rounds to 4, floored to 2·rows
        assert_eq!(tuning.queue_len(1000.0, 200.0, 3), 6);
        // A long plateau escapes the floor
        assert!(tuning.queue_len(10000.0, 200.0, 3) > 6);
    }

    #[test]
    fn test_slot_positions() {
        let g = ReelGeometry::standard();
        assert_relative_eq!(g.slot_y(0, 3), 100.0);
        assert_relative_eq!(g.slot_y(1, 3), 300.0);
        assert_relative_eq!(g.slot_y(2, 3), 500.0);
        assert_relative_eq!(g.wrap_threshold(), 500.0);
    }

    #[test]
    fn test_scaled_keeps_speeds() {
        let tuning = SpinTuning::normal().scaled(0.5);
        assert_relative_eq!(tuning.spin_speed, 2400.0);
        assert_relative_eq!(tuning.base_offset_ms, 500.0);
    }
}
