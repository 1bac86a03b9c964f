//! Static ring placement and the cosmetic hover response.
//!
//! Slot angles are fixed for the lifetime of a ring: item `i` always sits
//! at `2π·i/n`.  The time-varying rotation lives on the parent (the
//! renderer applies [`crate::core::ring::RingState::angle`] when
//! projecting), so placements are computed once per layout, not per frame.

use std::f32::consts::{PI, TAU};

use crate::core::layout::RingLayout;

/// Cosmetic scale a hovered card eases toward.
const HOVER_SCALE: f32 = 1.02;
/// Easing rate for the hover scale (1/s).
const HOVER_EASE_RATE: f32 = 6.0;

/// Fixed slot angle for item `index` of `count`.
pub fn slot_angle(index: usize, count: usize) -> f32 {
    index as f32 / count.max(1) as f32 * TAU
}

/// World-space pose of one card before the parent ring rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemPlacement {
    /// Position on the ring: `(r·cos θ, 0, r·sin θ)`.
    pub position: [f32; 3],
    /// Facing rotation about Y so the card front points outward.
    pub yaw: f32,
}

/// Place every card of `layout` on the ring.
pub fn place_ring(layout: &RingLayout) -> Vec<ItemPlacement> {
    (0..layout.item_count)
        .map(|index| {
            let theta = slot_angle(index, layout.item_count);
            ItemPlacement {
                position: [
                    layout.radius * theta.cos(),
                    0.0,
                    layout.radius * theta.sin(),
                ],
                yaw: PI - theta,
            }
        })
        .collect()
}

// ───────────────────────────────────────── hover lift ────────

/// Per-card hover scale animator.
///
/// Eases a card toward [`HOVER_SCALE`] while the pointer is over it and
/// back to 1.0 otherwise.  Purely cosmetic — the angular centering motion
/// runs independently in the interaction controller.
#[derive(Debug, Clone)]
pub struct HoverLift {
    scales: Vec<f32>,
    hovered: Option<usize>,
}

impl HoverLift {
    pub fn new(count: usize) -> Self {
        Self {
            scales: vec![1.0; count],
            hovered: None,
        }
    }

    pub fn set_hovered(&mut self, item: Option<usize>) {
        self.hovered = item;
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Current cosmetic scale for `item` (1.0 for unknown indices).
    pub fn scale(&self, item: usize) -> f32 {
        self.scales.get(item).copied().unwrap_or(1.0)
    }

    /// Normalised lift progress for `item`: 0.0 at rest, 1.0 fully lifted.
    pub fn progress(&self, item: usize) -> f32 {
        ((self.scale(item) - 1.0) / (HOVER_SCALE - 1.0)).clamp(0.0, 1.0)
    }

    /// Advance all card scales by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }
        let blend = (dt * HOVER_EASE_RATE).min(1.0);
        for (index, scale) in self.scales.iter_mut().enumerate() {
            let target = if self.hovered == Some(index) {
                HOVER_SCALE
            } else {
                1.0
            };
            *scale += (target - *scale) * blend;
        }
    }
}

// ───────────────────────────────────────── tests ─────────────
