//! HUD layout anchors
//!
//! Screen-space positions for the HUD widgets, recomputed on resize. The
//! right-hand setting mirrors the control column so the spin button sits
//! under the thumb on either side.

use serde::{Deserialize, Serialize};

/// A widget anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub x: f64,
    pub y: f64,
}

/// Anchors for every HUD widget at the current screen size.
#[derive(Debug, Clone, PartialEq)]
pub struct HudLayout {
    pub screen_width: f64,
    pub screen_height: f64,
    pub spin_button: Anchor,
    pub autospin_button: Anchor,
    pub bet_selector: Anchor,
    pub balance_label: Anchor,
    pub win_label: Anchor,
    pub settings_button: Anchor,
}

/// Horizontal inset of the control column from the screen edge.
const CONTROL_INSET: f64 = 90.0;
/// Vertical gap between stacked control buttons.
const CONTROL_GAP: f64 = 110.0;

impl HudLayout {
    /// Compute anchors for a screen. `right_hand` puts the control column
    /// on the right edge, otherwise on the left.
    pub fn compute(screen_width: f64, screen_height: f64, right_hand: bool) -> Self {
        let column_x = if right_hand {
            screen_width - CONTROL_INSET
        } else {
            CONTROL_INSET
        };
        let label_x = screen_width / 2.0;
        let mid_y = screen_height / 2.0;

        Self {
            screen_width,
            screen_height,
            spin_button: Anchor {
                x: column_x,
                y: mid_y,
            },
            autospin_button: Anchor {
                x: column_x,
                y: mid_y + CONTROL_GAP,
            },
            bet_selector: Anchor {
                x: column_x,
                y: mid_y - CONTROL_GAP,
            },
            balance_label: Anchor {
                x: label_x,
                y: screen_height - 40.0,
            },
            win_label: Anchor {
                x: label_x,
                y: screen_height - 80.0,
            },
            settings_button: Anchor {
                x: if right_hand { 40.0 } else { screen_width - 40.0 },
                y: 40.0,
            },
        }
    }
}
