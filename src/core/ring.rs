//! Ring interaction controller.
//!
//! Owns the authoritative rotation angle for one mounted carousel and
//! converts wheel/drag/hover input into angular motion, advanced once per
//! rendered frame.  Drag is direct manipulation; wheel feeds a decaying
//! angular velocity; hovering a card requests a one-shot easing motion
//! that centres the card at the front of the ring.

use std::f32::consts::{PI, TAU};

/// Velocity added per wheel notch.
const WHEEL_IMPULSE: f32 = 0.01;
/// Radians of ring rotation per pixel of horizontal drag.
const DRAG_RADIANS_PER_PX: f32 = 0.005;
/// Cumulative drag distance (px) above which a release is not a click.
const CLICK_SLOP_PX: f32 = 5.0;
/// Easing rate toward the centering target (1/s).
const CENTER_EASE_RATE: f32 = 6.0;
/// Remaining arc below which the centering motion snaps home (rad).
const SNAP_EPSILON: f32 = 0.01;
/// Velocity decay per frame while free-spinning.
const FREE_DECAY: f32 = 0.95;
/// Velocity decay per frame while a centering motion runs.
const CENTER_DECAY: f32 = 0.9;
/// Free-spin integration scale — velocity is expressed per 60 Hz frame.
const FREE_RATE: f32 = 60.0 * 0.02;
/// Speed below which the ring counts as idle and auto-spin may engage.
const IDLE_SPEED: f32 = 1e-4;

/// The world angle that faces the camera.  Centring card `i` means
/// rotating the ring so that `slot_angle(i) + angle == FRONT_ANGLE`.
pub const FRONT_ANGLE: f32 = PI / 2.0;

/// Shortest signed arc from `from` to `to`, in `(-π, π]`.
///
/// `rem_euclid` keeps this well-defined for negative operands; the raw
/// `%` operator would not be.
pub fn shortest_arc(from: f32, to: f32) -> f32 {
    let d = (to - from).rem_euclid(TAU);
    if d > PI {
        d - TAU
    } else {
        d
    }
}

/// Mutable interaction state for one carousel instance.
///
/// Created on mount, mutated by input events and once per frame by
/// [`RingState::tick`], discarded on unmount.  Never shared between
/// carousel instances.
#[derive(Debug, Clone)]
pub struct RingState {
    /// Current ring rotation in radians.  Wraps implicitly through the
    /// periodic placement functions; no normalisation is applied.
    pub angle: f32,
    /// Signed free-spin speed, decayed every frame.
    pub angular_velocity: f32,
    /// Idle rotation rate (rad/s); zero disables auto-spin.
    pub auto_spin: f32,
    target_angle: Option<f32>,
    centering_in_flight: bool,
    locked_item: Option<usize>,
    is_dragging: bool,
    drag_accumulated_px: f32,
    last_pointer_x: f32,
}

impl Default for RingState {
    fn default() -> Self {
        Self::new()
    }
}

impl RingState {
    pub fn new() -> Self {
        Self {
            angle: 0.0,
            angular_velocity: 0.0,
            auto_spin: 0.0,
            target_angle: None,
            centering_in_flight: false,
            locked_item: None,
            is_dragging: false,
            drag_accumulated_px: 0.0,
            last_pointer_x: 0.0,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    pub fn target_angle(&self) -> Option<f32> {
        self.target_angle
    }

    /// Item currently owning the hover-centering motion, if any.
    pub fn locked_item(&self) -> Option<usize> {
        self.locked_item
    }

    /// True while a centering motion is still easing toward its target.
    pub fn is_centering(&self) -> bool {
        self.centering_in_flight
    }

    // ── input entry points ──────────────────────────────────────

    /// Wheel scroll.  Explicit user input always overrides an automatic
    /// centering motion.
    pub fn on_wheel(&mut self, delta_y: f32) {
        if delta_y != 0.0 {
            self.angular_velocity += delta_y.signum() * WHEEL_IMPULSE;
        }
        self.cancel_centering();
    }

    /// Pointer pressed — begin a drag gesture.
    pub fn on_drag_start(&mut self, pointer_x: f32) {
        self.is_dragging = true;
        self.drag_accumulated_px = 0.0;
        self.last_pointer_x = pointer_x;
        self.cancel_centering();
    }

    /// Pointer moved while pressed.  Drag rotates the ring directly; the
    /// travelled distance feeds the click-vs-drag gate.
    pub fn on_drag_move(&mut self, pointer_x: f32) {
        if !self.is_dragging {
            return;
        }
        let dx = pointer_x - self.last_pointer_x;
        self.last_pointer_x = pointer_x;
        self.drag_accumulated_px += dx.abs();
        self.angle += dx * DRAG_RADIANS_PER_PX;
    }

    /// Pointer released.  No inertia is derived from the release — a
    /// flick contributes nothing beyond whatever wheel velocity is
    /// already present.
    pub fn on_drag_end(&mut self) {
        self.is_dragging = false;
    }

    /// Pointer entered card `item`, whose fixed slot angle is
    /// `slot_angle`.  Requests rotation that brings the card to the
    /// front.  While another card's centering motion is in flight, the
    /// first hover wins and this request is ignored.
    pub fn on_item_hover_start(&mut self, item: usize, slot_angle: f32) {
        if self.centering_in_flight && self.locked_item.is_some_and(|locked| locked != item) {
            return;
        }
        self.locked_item = Some(item);
        self.target_angle = Some(FRONT_ANGLE - slot_angle);
    }

    /// Pointer left card `item`.  Only the lock owner may release it, and
    /// an in-flight motion is always allowed to finish.
    pub fn on_item_hover_end(&mut self, item: usize) {
        if self.locked_item == Some(item) && !self.centering_in_flight {
            self.locked_item = None;
            self.target_angle = None;
        }
    }

    /// Card `item` was released under the pointer.  Returns the item to
    /// navigate to, or `None` when the gesture was a drag rather than a
    /// click.
    pub fn on_item_click(&self, item: usize) -> Option<usize> {
        if self.is_dragging || self.drag_accumulated_px > CLICK_SLOP_PX {
            return None;
        }
        Some(item)
    }

    // ── per-frame advance ───────────────────────────────────────

    /// Advance the rotation by `dt` wall-clock seconds.
    ///
    /// Zero, negative, or non-finite `dt` is a no-op, so repeated
    /// zero-`dt` calls cannot drift the angle or the velocity.
    pub fn tick(&mut self, dt: f32) {
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }

        if !self.is_dragging {
            if let Some(target) = self.target_angle {
                let delta = shortest_arc(self.angle, target);
                self.angle += delta * (dt * CENTER_EASE_RATE).min(1.0);
                if delta.abs() < SNAP_EPSILON {
                    self.angle = target;
                    self.target_angle = None;
                    self.centering_in_flight = false;
                } else {
                    self.centering_in_flight = true;
                }
                self.angular_velocity *= CENTER_DECAY;
                return;
            }
        }

        self.angle += self.angular_velocity * dt * FREE_RATE;
        self.angular_velocity *= FREE_DECAY;

        if !self.is_dragging && self.angular_velocity.abs() < IDLE_SPEED {
            self.angle += self.auto_spin * dt;
        }
    }

    fn cancel_centering(&mut self) {
        self.target_angle = None;
        self.locked_item = None;
        self.centering_in_flight = false;
    }
}

// ───────────────────────────────────────── tests ─────────────

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn shortest_arc_wraps_both_directions() {
        assert!((shortest_arc(0.1, TAU - 0.1) - (-0.2)).abs() < 1e-5);
        assert!((shortest_arc(TAU - 0.1, 0.1) - 0.2).abs() < 1e-5);
        assert!((shortest_arc(-3.0 * TAU, PI) - PI).abs() < 1e-5);
        // Opposite side maps to +π, not −π.
        assert!((shortest_arc(0.0, PI) - PI).abs() < 1e-6);
    }

    #[test]
    fn zero_dt_ticks_are_idempotent() {
        let mut ring = RingState::new();
        ring.on_wheel(3.0);
        ring.on_item_hover_start(2, 1.0);
        let angle = ring.angle;
        let velocity = ring.angular_velocity;
        for _ in 0..100 {
            ring.tick(0.0);
            ring.tick(-1.0);
            ring.tick(f32::NAN);
        }
        assert_eq!(ring.angle, angle);
        assert_eq!(ring.angular_velocity, velocity);
    }

    #[test]
    fn centering_converges_without_overshoot() {
        let mut ring = RingState::new();
        ring.angle = 2.0;
        ring.on_item_hover_start(0, 0.0);
        let target = ring.target_angle().expect("target set");

        let mut frames = 0;
        let initial = shortest_arc(ring.angle, target).abs();
        while ring.target_angle().is_some() {
            let before = shortest_arc(ring.angle, target).abs();
            ring.tick(DT);
            let after = shortest_arc(ring.angle, target).abs();
            assert!(after <= before + 1e-6, "overshoot at frame {frames}");
            frames += 1;
            assert!(frames < 600, "did not converge (started {initial} rad away)");
        }
        assert!((ring.angle - target).abs() < SNAP_EPSILON);
        assert!(!ring.is_centering());
    }

    #[test]
    fn wheel_adds_fixed_impulse_and_decays() {
        let mut ring = RingState::new();
        ring.on_wheel(120.0);
        assert!((ring.angular_velocity - WHEEL_IMPULSE).abs() < 1e-7);
        ring.on_wheel(-1.0);
        assert!(ring.angular_velocity.abs() < 1e-7);

        ring.on_wheel(1.0);
        let before = ring.angle;
        ring.tick(DT);
        assert!(ring.angle > before);
        assert!(ring.angular_velocity < WHEEL_IMPULSE);
    }

    #[test]
    fn drag_is_direct_manipulation() {
        let mut ring = RingState::new();
        ring.on_drag_start(100.0);
        ring.on_drag_move(110.0);
        assert!((ring.angle - 10.0 * 0.005).abs() < 1e-6);
        ring.on_drag_move(104.0);
        // Distance accumulates unsigned: 10 px out, 6 px back.
        assert!((ring.angle - 4.0 * 0.005).abs() < 1e-6);
        ring.on_drag_end();
        assert!(!ring.is_dragging());
    }

    #[test]
    fn short_drag_still_clicks_long_drag_does_not() {
        let mut ring = RingState::new();
        ring.on_drag_start(0.0);
        ring.on_drag_move(3.0);
        ring.on_drag_end();
        assert_eq!(ring.on_item_click(5), Some(5));

        ring.on_drag_start(0.0);
        ring.on_drag_move(8.0);
        ring.on_drag_end();
        assert_eq!(ring.on_item_click(5), None);
    }

    #[test]
    fn click_is_suppressed_mid_drag() {
        let mut ring = RingState::new();
        ring.on_drag_start(0.0);
        assert_eq!(ring.on_item_click(1), None);
    }

    #[test]
    fn drag_and_wheel_interrupt_centering() {
        let mut ring = RingState::new();
        ring.angle = 1.0;
        ring.on_item_hover_start(3, 0.0);
        ring.tick(DT);
        assert!(ring.is_centering());

        ring.on_drag_start(50.0);
        assert!(ring.target_angle().is_none());
        assert!(ring.locked_item().is_none());

        ring.angle = 1.0;
        ring.on_item_hover_start(3, 0.0);
        ring.tick(DT);
        ring.on_wheel(1.0);
        assert!(ring.target_angle().is_none());
        assert!(ring.locked_item().is_none());
    }

    #[test]
    fn first_hover_wins_while_in_flight() {
        let mut ring = RingState::new();
        ring.angle = 1.5;
        ring.on_item_hover_start(0, 0.0);
        ring.tick(DT);
        assert!(ring.is_centering());

        // A second hover mid-motion is ignored…
        ring.on_item_hover_start(1, 2.0);
        assert_eq!(ring.locked_item(), Some(0));
        assert_eq!(ring.target_angle(), Some(FRONT_ANGLE));

        // …and so is the losing card's hover-end.
        ring.on_item_hover_end(1);
        assert_eq!(ring.locked_item(), Some(0));
    }

    #[test]
    fn hover_end_mid_flight_lets_the_motion_finish() {
        let mut ring = RingState::new();
        ring.angle = 1.5;
        ring.on_item_hover_start(0, 0.0);
        ring.tick(DT);
        assert!(ring.is_centering());

        ring.on_item_hover_end(0);
        assert!(ring.target_angle().is_some(), "in-flight motion must finish");

        while ring.target_angle().is_some() {
            ring.tick(DT);
        }
        // After the snap the owner's hover-end releases the lock.
        ring.on_item_hover_end(0);
        assert!(ring.locked_item().is_none());
    }

    #[test]
    fn rehovering_the_same_card_mid_flight_is_allowed() {
        let mut ring = RingState::new();
        ring.angle = 1.5;
        ring.on_item_hover_start(0, 0.0);
        ring.tick(DT);
        ring.on_item_hover_start(0, 0.0);
        assert_eq!(ring.locked_item(), Some(0));
    }

    #[test]
    fn free_spin_decays_toward_rest() {
        let mut ring = RingState::new();
        ring.angular_velocity = 1.0;
        for _ in 0..400 {
            ring.tick(DT);
        }
        assert!(ring.angular_velocity.abs() < 1e-3);
    }

    #[test]
    fn auto_spin_engages_only_when_idle() {
        let mut ring = RingState::new();
        ring.auto_spin = 0.5;
        let before = ring.angle;
        ring.tick(DT);
        assert!((ring.angle - before - 0.5 * DT).abs() < 1e-6);

        // Wheel velocity suppresses the idle spin until it decays.
        ring.on_wheel(1.0);
        let spun = ring.angle;
        ring.tick(DT);
        let moved = ring.angle - spun;
        assert!((moved - WHEEL_IMPULSE * DT * FREE_RATE).abs() < 1e-6);
    }

    #[test]
    fn dragging_blocks_both_centering_and_auto_spin() {
        let mut ring = RingState::new();
        ring.auto_spin = 1.0;
        ring.on_drag_start(0.0);
        let angle = ring.angle;
        ring.tick(DT);
        assert_eq!(ring.angle, angle);
    }
}
