//! Shared application state.
//!
//! One [`AppState`] exists per run and owns the catalog, the interaction
//! controller, the layout cache, and everything the renderer produced
//! last frame (hit zones in particular, which input handling needs).

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use image::RgbaImage;
use ratatui::layout::{Position, Rect};

use crate::config::AppConfig;
use crate::core::catalog::Catalog;
use crate::core::layout::{compute_layout, LayoutCache, RingLayout};
use crate::core::placement::{place_ring, slot_angle, HoverLift, ItemPlacement};
use crate::core::ring::{shortest_arc, RingState, FRONT_ANGLE};
use crate::core::viewport::{Camera, Viewport};
use crate::ui::scene::HitZone;

/// Longest `dt` fed into the animators; protects against huge jumps
/// after a suspend or a stalled terminal.
const MAX_FRAME_DT: f32 = 0.25;

pub struct AppState {
    pub catalog: Catalog,
    pub config: AppConfig,
    pub camera: Camera,
    pub ring: RingState,
    pub hover: HoverLift,
    pub layout: RingLayout,
    pub placements: Vec<ItemPlacement>,
    /// Decoded card textures keyed by the catalog's image path.
    pub textures: HashMap<PathBuf, Arc<RgbaImage>>,
    /// Hit zones produced by the most recent render, in paint order.
    pub hit_zones: Vec<HitZone>,
    pub scene_area: Rect,
    /// Item the left button went down on, for click resolution on release.
    pub pressed_item: Option<usize>,
    /// URL to hand to the shell wrapper after teardown.
    pub nav_url: Option<String>,
    pub status_message: Option<String>,
    pub should_quit: bool,
    pub last_frame: Instant,
    layout_cache: LayoutCache,
}

impl AppState {
    pub fn new(catalog: Catalog, config: AppConfig, camera: Camera) -> Self {
        let count = catalog.len();
        let mut ring = RingState::new();
        ring.auto_spin = if config.auto_spin {
            config.spin_speed
        } else {
            0.0
        };

        // Nominal 80×24-cell viewport (48 half-block pixels tall) until
        // the first frame reports the real one.
        let viewport = Viewport::new(80.0, 48.0, camera);

        Self {
            hover: HoverLift::new(count),
            ring,
            layout: compute_layout(&viewport, count),
            placements: Vec::new(),
            catalog,
            config,
            camera,
            textures: HashMap::new(),
            hit_zones: Vec::new(),
            scene_area: Rect::default(),
            pressed_item: None,
            nav_url: None,
            status_message: None,
            should_quit: false,
            last_frame: Instant::now(),
            layout_cache: LayoutCache::new(),
        }
    }

    /// Recompute layout and placements for the current scene area.
    ///
    /// Called once per frame before painting; the cache makes this free
    /// while the terminal size is stable.
    pub fn sync_layout(&mut self, scene_area: Rect) {
        self.scene_area = scene_area;
        let viewport = Viewport::new(
            scene_area.width as f32,
            scene_area.height as f32 * 2.0, // half-block pixels
            self.camera,
        );
        let layout = self.layout_cache.get(&viewport, self.catalog.len());
        if layout != self.layout || self.placements.len() != layout.item_count {
            self.layout = layout;
            self.placements = place_ring(&layout);
        }
    }

    /// Advance the animators to `now`.
    pub fn advance(&mut self, now: Instant) {
        let dt = now
            .duration_since(self.last_frame)
            .as_secs_f32()
            .min(MAX_FRAME_DT);
        self.last_frame = now;
        self.ring.tick(dt);
        self.hover.tick(dt);
    }

    /// Item under a screen position, topmost card first.
    pub fn item_at(&self, pos: Position) -> Option<usize> {
        self.hit_zones
            .iter()
            .rev()
            .find(|zone| zone.rect.contains(pos))
            .map(|zone| zone.item)
    }

    /// Apply a pointer hover change: release the old card, lock the new
    /// one, and point the cosmetic lift at it.
    pub fn update_hover(&mut self, item: Option<usize>) {
        let previous = self.hover.hovered();
        if previous == item {
            return;
        }
        if let Some(old) = previous {
            self.ring.on_item_hover_end(old);
        }
        if let Some(new) = item {
            self.ring
                .on_item_hover_start(new, slot_angle(new, self.catalog.len()));
        }
        self.hover.set_hovered(item);
    }

    /// Item whose card currently sits nearest the front of the ring.
    pub fn front_item(&self) -> Option<usize> {
        let count = self.catalog.len();
        (0..count).min_by(|&a, &b| {
            let da = shortest_arc(slot_angle(a, count) + self.ring.angle, FRONT_ANGLE).abs();
            let db = shortest_arc(slot_angle(b, count) + self.ring.angle, FRONT_ANGLE).abs();
            da.total_cmp(&db)
        })
    }

    /// A click on `item` was confirmed by the controller's slop gate:
    /// record the product URL and quit so the shell wrapper can open it.
    pub fn confirm_click(&mut self, item: usize) {
        let Some(confirmed) = self.ring.on_item_click(item) else {
            return; // the gesture was a drag
        };
        if let Some(product) = self.catalog.get(confirmed) {
            self.nav_url = Some(format!(
                "{}/{}",
                self.config.base_url.trim_end_matches('/'),
                product.slug
            ));
            self.should_quit = true;
        }
    }

    /// Note how many declared card images failed to decode; shown in the
    /// status bar instead of the key hint.
    pub fn note_missing_textures(&mut self) {
        let declared = self
            .catalog
            .iter()
            .filter(|product| product.image.is_some())
            .count();
        let missing = declared.saturating_sub(self.textures.len());
        if missing > 0 {
            self.status_message = Some(format!(
                "{missing} card texture(s) failed to load — check --assets"
            ));
        }
    }

    /// Status-bar text: an explicit message, or the key hint.
    pub fn status_line(&self) -> &str {
        if let Some(message) = self.status_message.as_deref() {
            return message;
        }
        "drag/scroll spin · hover to centre · click/enter opens · q quits"
    }
}

// ───────────────────────────────────────── tests ─────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AppState {
        AppState::new(
            Catalog::demo(),
            AppConfig::default(),
            Camera::Perspective {
                fov_deg: 55.0,
                focal_distance: 6.0,
            },
        )
    }

    #[test]
    fn sync_layout_populates_placements_once_per_size() {
        let mut state = state();
        state.sync_layout(Rect::new(0, 0, 120, 40));
        assert_eq!(state.placements.len(), 8);
        let layout = state.layout;
        state.sync_layout(Rect::new(0, 0, 120, 40));
        assert_eq!(state.layout, layout);
    }

    #[test]
    fn hover_change_moves_the_centering_lock() {
        let mut state = state();
        state.update_hover(Some(2));
        assert_eq!(state.ring.locked_item(), Some(2));
        assert_eq!(state.hover.hovered(), Some(2));

        // Leaving before the motion starts releases the lock.
        state.update_hover(None);
        assert_eq!(state.ring.locked_item(), None);
    }

    #[test]
    fn confirmed_click_records_url_and_quits() {
        let mut state = state();
        state.confirm_click(0);
        assert_eq!(state.nav_url.as_deref(), Some("/products/1"));
        assert!(state.should_quit);
    }

    #[test]
    fn click_after_a_real_drag_is_rejected() {
        let mut state = state();
        state.ring.on_drag_start(0.0);
        state.ring.on_drag_move(80.0);
        state.ring.on_drag_end();
        state.confirm_click(0);
        assert!(state.nav_url.is_none());
        assert!(!state.should_quit);
    }

    #[test]
    fn missing_textures_surface_in_the_status_line() {
        let mut state = state();
        // Demo catalog declares 8 images; none are decoded.
        state.note_missing_textures();
        let line = state.status_line().to_string();
        assert!(line.contains("8 card texture(s)"), "{line}");
    }

    #[test]
    fn fully_loaded_textures_keep_the_key_hint() {
        let mut state = state();
        for product in Catalog::demo().iter() {
            if let Some(path) = &product.image {
                state
                    .textures
                    .insert(path.clone(), Arc::new(RgbaImage::new(1, 1)));
            }
        }
        state.note_missing_textures();
        assert!(state.status_line().contains("q quits"));
    }

    #[test]
    fn front_item_follows_the_ring_rotation() {
        let mut state = state();
        // Rotate so slot 3 faces the camera.
        state.ring.angle = FRONT_ANGLE - slot_angle(3, 8);
        assert_eq!(state.front_item(), Some(3));

        state.ring.angle = FRONT_ANGLE - slot_angle(6, 8) + 0.05;
        assert_eq!(state.front_item(), Some(6));
    }

    #[test]
    fn disabled_auto_spin_zeroes_the_idle_rate() {
        let config = AppConfig {
            auto_spin: false,
            ..AppConfig::default()
        };
        let state = AppState::new(
            Catalog::demo(),
            config,
            Camera::Orthographic { zoom: 10.0 },
        );
        assert_eq!(state.ring.auto_spin, 0.0);
    }
}
