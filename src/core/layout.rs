//! Layout engine — sizes the ring from the viewport.
//!
//! Given a viewport snapshot and an item count, compute one shared card
//! scale and a ring radius so that a fixed fraction of the visible width
//! is filled by evenly spaced cards.  Pure: the result depends only on the
//! arguments, never on a previous layout.

use crate::core::viewport::Viewport;

/// Fraction of the visible width the ring should occupy.
pub const FILL_FACTOR: f32 = 0.8;
/// World-space breathing room kept on each side of the ring.
pub const GUTTER: f32 = 0.25;
/// Unscaled card width; `scale` is expressed relative to this.
pub const BASE_CARD_WIDTH: f32 = 1.4;
/// The ring never collapses tighter than this radius.
pub const MIN_RADIUS: f32 = 2.5;
/// Card world-width clamp — keeps cards legible on tiny viewports and
/// sane on ultra-wide ones.
const MIN_CARD_WIDTH: f32 = 0.9;
const MAX_CARD_WIDTH: f32 = 2.2;

/// Derived metrics shared by every card on the ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingLayout {
    /// World-space width visible at the focal plane.
    pub visible_width: f32,
    /// World-space width of one card after scaling.
    pub item_world_width: f32,
    /// Uniform card scale relative to [`BASE_CARD_WIDTH`].
    pub scale: f32,
    /// Ring radius in world units.
    pub radius: f32,
    /// Number of items the layout was computed for.
    pub item_count: usize,
}

/// Compute the shared card scale and ring radius.
///
/// Every divisor is clamped, so degenerate inputs (zero items, zero zoom,
/// zero focal distance) still yield a positive, finite layout.
pub fn compute_layout(viewport: &Viewport, item_count: usize) -> RingLayout {
    let visible_width = viewport.visible_width();
    let band = visible_width * FILL_FACTOR;

    // Estimated simultaneously-visible cards.  Only used to size cards —
    // nothing is ever culled from the ring.
    let divisor = item_count.max(1);
    let approx_visible = (item_count / 2).max(4).min(divisor) as f32;

    let item_world_width =
        ((band - 2.0 * GUTTER) / approx_visible).clamp(MIN_CARD_WIDTH, MAX_CARD_WIDTH);
    let scale = item_world_width / BASE_CARD_WIDTH;
    let radius = (band / 2.0 - item_world_width / 2.0 - GUTTER).max(MIN_RADIUS);

    RingLayout {
        visible_width,
        item_world_width,
        scale,
        radius,
        item_count,
    }
}

// ───────────────────────────────────────── memoization ───────

/// Caches the last layout on its `(viewport, item_count)` key.
///
/// Layouts are recomputed on window resize or camera change, which in
/// practice happens once per resize burst, not once per frame.
#[derive(Debug, Default)]
pub struct LayoutCache {
    last: Option<(Viewport, usize, RingLayout)>,
}

impl LayoutCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached layout, recomputing only when the key changed.
    pub fn get(&mut self, viewport: &Viewport, item_count: usize) -> RingLayout {
        if let Some((cached_vp, cached_n, layout)) = &self.last {
            if cached_vp == viewport && *cached_n == item_count {
                return *layout;
            }
        }
        let layout = compute_layout(viewport, item_count);
        self.last = Some((*viewport, item_count, layout));
        layout
    }
}

// ───────────────────────────────────────── tests ─────────────
