//! 3D ring scene — projects the carousel into terminal cells.
//!
//! The scene owns the camera math: card placements come in as world-space
//! poses, the ring rotation is applied here as a parent transform, and each
//! card is projected onto a half-block pixel grid (1 column = 1 px wide,
//! 1 row = 2 px tall).  Cards are painted far-to-near so near cards occlude
//! far ones, with the hovered card always painted last.
//!
//! Rendering also produces the frame's [`HitZone`] list — the screen
//! rectangles the input handler uses to translate pointer positions back
//! into item indices.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use image::RgbaImage;
use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::style::Color;

use crate::core::catalog::{format_price, Catalog};
use crate::core::layout::RingLayout;
use crate::core::placement::{HoverLift, ItemPlacement};
use crate::core::viewport::Camera;
use crate::ui::theme::Theme;

/// Cards are 1.4 world units wide per 1.0 tall.
const CARD_ASPECT: f32 = 1.4;
/// Vertical anchor of the ring centre as a fraction of scene height.
const RING_VERTICAL_ANCHOR: f32 = 0.45;
/// Cards closer than this to the camera plane are culled.
const NEAR_PLANE: f32 = 0.1;

/// Screen rectangle occupied by one card this frame.
///
/// Zones are recorded in paint order, so when rectangles overlap the
/// topmost card is the *last* matching zone — hit-test in reverse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitZone {
    pub item: usize,
    pub rect: Rect,
}

/// One frame of the ring, ready to paint.
pub struct RingScene<'a> {
    pub catalog: &'a Catalog,
    pub layout: &'a RingLayout,
    pub placements: &'a [ItemPlacement],
    /// Current parent ring rotation in radians.
    pub angle: f32,
    pub hover: &'a HoverLift,
    pub textures: &'a HashMap<PathBuf, Arc<RgbaImage>>,
    pub camera: Camera,
}

/// A card projected to half-block pixel space.
#[derive(Debug, Clone, Copy)]
struct CardDraw {
    item: usize,
    /// Centre in half-block pixels.
    cx: f32,
    cy: f32,
    px_width: f32,
    px_height: f32,
    /// World z after ring rotation; smaller is farther from the camera.
    depth_key: f32,
}

#[derive(Debug, Clone, Copy)]
struct Projected {
    x: f32,
    y: f32,
    px_per_world: f32,
    depth_key: f32,
}

/// Rotate a point about the Y axis.
fn rotate_y(p: [f32; 3], angle: f32) -> [f32; 3] {
    let (sin, cos) = angle.sin_cos();
    [
        p[0] * cos - p[2] * sin,
        p[1],
        p[0] * sin + p[2] * cos,
    ]
}

/// Project a world point into half-block pixel space.
///
/// The camera sits on the +Z axis looking at the origin; `None` means the
/// point fell behind the near plane.
fn project(camera: Camera, pw: f32, ph: f32, world: [f32; 3]) -> Option<Projected> {
    match camera {
        Camera::Perspective {
            fov_deg,
            focal_distance,
        } => {
            let half_fov = (fov_deg.clamp(1.0, 179.0) * 0.5).to_radians();
            let focal_px = ph / (2.0 * half_fov.tan());
            let depth = focal_distance - world[2];
            if depth < NEAR_PLANE {
                return None;
            }
            let px_per_world = focal_px / depth;
            Some(Projected {
                x: pw * 0.5 + world[0] * px_per_world,
                y: ph * RING_VERTICAL_ANCHOR - world[1] * px_per_world,
                px_per_world,
                depth_key: world[2],
            })
        }
        Camera::Orthographic { zoom } => {
            let px_per_world = zoom.max(1e-3);
            Some(Projected {
                x: pw * 0.5 + world[0] * px_per_world,
                y: ph * RING_VERTICAL_ANCHOR - world[1] * px_per_world,
                px_per_world,
                depth_key: world[2],
            })
        }
    }
}

impl RingScene<'_> {
    /// Paint the ring into `buf` and return this frame's hit zones.
    pub fn render(&self, area: Rect, buf: &mut Buffer) -> Vec<HitZone> {
        if area.width < 4 || area.height < 4 {
            return Vec::new();
        }
        if self.layout.item_count == 0 {
            let msg = "catalog is empty";
            let x = area.x + area.width.saturating_sub(msg.len() as u16) / 2;
            let y = area.y + area.height / 2;
            buf.set_string(x, y, msg, Theme::detail_style());
            return Vec::new();
        }

        let pw = area.width as f32;
        let ph = area.height as f32 * 2.0;

        let mut cards: Vec<CardDraw> = Vec::with_capacity(self.placements.len());
        for (item, placement) in self.placements.iter().enumerate() {
            let world = rotate_y(placement.position, self.angle);
            let Some(p) = project(self.camera, pw, ph, world) else {
                continue;
            };
            let world_width = self.layout.item_world_width * self.hover.scale(item);
            let px_width = world_width * p.px_per_world;
            cards.push(CardDraw {
                item,
                cx: p.x,
                cy: p.y,
                px_width,
                px_height: px_width / CARD_ASPECT,
                depth_key: p.depth_key,
            });
        }

        // Painter's order: far to near, hovered on top.
        cards.sort_by(|a, b| a.depth_key.total_cmp(&b.depth_key));
        if let Some(hovered) = self.hover.hovered() {
            if let Some(pos) = cards.iter().position(|c| c.item == hovered) {
                let card = cards.remove(pos);
                cards.push(card);
            }
        }

        let mut zones = Vec::with_capacity(cards.len());
        for card in &cards {
            if let Some(zone) = self.draw_card(card, area, buf) {
                zones.push(zone);
            }
        }
        zones
    }

    /// Paint one card and return its hit zone, or `None` if it is entirely
    /// off-screen or too small to show.
    fn draw_card(&self, card: &CardDraw, area: Rect, buf: &mut Buffer) -> Option<HitZone> {
        let cols = card.px_width.round().max(0.0) as i32;
        let rows = (card.px_height / 2.0).round().max(0.0) as i32;
        if cols < 2 || rows < 1 {
            return None;
        }

        let col0 = (card.cx - card.px_width / 2.0).round() as i32 + area.x as i32;
        let row0 = ((card.cy - card.px_height / 2.0) / 2.0).round() as i32 + area.y as i32;

        let product = self.catalog.get(card.item)?;
        let texture = product
            .image
            .as_ref()
            .and_then(|path| self.textures.get(path));

        match (texture, &product.image) {
            (Some(texture), _) => {
                self.draw_texture(texture, col0, row0, cols, rows, area, buf);
            }
            // Image declared but not loadable: keep the slot, show an
            // outline instead of a fill.
            (None, Some(_)) => {
                draw_outline(col0, row0, cols, rows, area, buf);
            }
            (None, None) => {
                draw_fill(Theme::card_fill(card.item), col0, row0, cols, rows, area, buf);
            }
        }

        let hovered = self.hover.hovered() == Some(card.item);
        self.draw_label(product, hovered, col0, row0 + rows, cols, area, buf);

        // Hit zone covers the card plus its label row, clipped to the scene.
        let zone = clip_rect(col0, row0, cols, rows + 1, area)?;
        Some(HitZone {
            item: card.item,
            rect: zone,
        })
    }

    /// Half-block texture paint: resize to the card's pixel rect and emit
    /// `▀` cells, two source rows per terminal row.
    fn draw_texture(
        &self,
        texture: &RgbaImage,
        col0: i32,
        row0: i32,
        cols: i32,
        rows: i32,
        area: Rect,
        buf: &mut Buffer,
    ) {
        use image::imageops::FilterType;

        let resized = image::imageops::resize(
            texture,
            cols as u32,
            (rows * 2) as u32,
            FilterType::Triangle,
        );
        for row in 0..rows {
            let y = row0 + row;
            if y < area.y as i32 || y >= (area.y + area.height) as i32 {
                continue;
            }
            let top = (row * 2) as u32;
            let bottom = top + 1;
            for col in 0..cols {
                let x = col0 + col;
                if x < area.x as i32 || x >= (area.x + area.width) as i32 {
                    continue;
                }
                let t = resized.get_pixel(col as u32, top);
                let b = resized.get_pixel(col as u32, bottom.min(resized.height() - 1));
                if let Some(cell) = buf.cell_mut(Position::new(x as u16, y as u16)) {
                    cell.set_char('▀')
                        .set_fg(Color::Rgb(t[0], t[1], t[2]))
                        .set_bg(Color::Rgb(b[0], b[1], b[2]));
                }
            }
        }
    }

    fn draw_label(
        &self,
        product: &crate::core::catalog::Product,
        hovered: bool,
        col0: i32,
        row: i32,
        cols: i32,
        area: Rect,
        buf: &mut Buffer,
    ) {
        if row < area.y as i32 || row >= (area.y + area.height) as i32 {
            return;
        }
        let label = format!("{} {}", product.title, format_price(product.price_minor));
        let width = (label.chars().count() as i32).min(cols);
        let x = (col0 + (cols - width) / 2).max(area.x as i32);
        let max_width = ((area.x + area.width) as i32 - x).min(width).max(0) as usize;
        if max_width == 0 {
            return;
        }
        let style = if hovered {
            Theme::hovered_title_style()
        } else {
            Theme::card_title_style()
        };
        buf.set_stringn(x as u16, row as u16, &label, max_width, style);
    }
}

/// Fill a card rect with a flat colour.
fn draw_fill(color: Color, col0: i32, row0: i32, cols: i32, rows: i32, area: Rect, buf: &mut Buffer) {
    let Some(rect) = clip_rect(col0, row0, cols, rows, area) else {
        return;
    };
    for y in rect.top()..rect.bottom() {
        for x in rect.left()..rect.right() {
            if let Some(cell) = buf.cell_mut(Position::new(x, y)) {
                cell.set_char(' ').set_bg(color);
            }
        }
    }
}

/// Draw a box outline only — used when a declared texture failed to load.
fn draw_outline(col0: i32, row0: i32, cols: i32, rows: i32, area: Rect, buf: &mut Buffer) {
    let Some(rect) = clip_rect(col0, row0, cols, rows, area) else {
        return;
    };
    let style = Theme::missing_texture_style();
    for x in rect.left()..rect.right() {
        for y in [rect.top(), rect.bottom().saturating_sub(1)] {
            if let Some(cell) = buf.cell_mut(Position::new(x, y)) {
                cell.set_char('─').set_style(style);
            }
        }
    }
    for y in rect.top()..rect.bottom() {
        for x in [rect.left(), rect.right().saturating_sub(1)] {
            if let Some(cell) = buf.cell_mut(Position::new(x, y)) {
                cell.set_char('│').set_style(style);
            }
        }
    }
}

/// Intersect an i32 rect with `area`; `None` when nothing survives.
fn clip_rect(col0: i32, row0: i32, cols: i32, rows: i32, area: Rect) -> Option<Rect> {
    let x0 = col0.max(area.x as i32);
    let y0 = row0.max(area.y as i32);
    let x1 = (col0 + cols).min((area.x + area.width) as i32);
    let y1 = (row0 + rows).min((area.y + area.height) as i32);
    if x1 <= x0 || y1 <= y0 {
        return None;
    }
    Some(Rect::new(
        x0 as u16,
        y0 as u16,
        (x1 - x0) as u16,
        (y1 - y0) as u16,
    ))
}

// ───────────────────────────────────────── tests ─────────────

#[cfg(test)]
mod tests {
    use std::f32::consts::{FRAC_PI_2, PI};

    use super::*;
    use crate::core::layout::compute_layout;
    use crate::core::placement::{place_ring, slot_angle};
    use crate::core::viewport::Viewport;

    const CAMERA: Camera = Camera::Perspective {
        fov_deg: 55.0,
        focal_distance: 6.0,
    };

    #[test]
    fn front_cards_project_larger_than_back_cards() {
        let front = project(CAMERA, 120.0, 80.0, [0.0, 0.0, 2.5]).unwrap();
        let back = project(CAMERA, 120.0, 80.0, [0.0, 0.0, -2.5]).unwrap();
        assert!(front.px_per_world > back.px_per_world);
        assert!(front.depth_key > back.depth_key);
    }

    #[test]
    fn points_behind_the_camera_are_culled() {
        assert!(project(CAMERA, 120.0, 80.0, [0.0, 0.0, 7.0]).is_none());
    }

    #[test]
    fn orthographic_projection_ignores_depth_for_size() {
        let camera = Camera::Orthographic { zoom: 10.0 };
        let near = project(camera, 120.0, 80.0, [1.0, 0.0, 2.0]).unwrap();
        let far = project(camera, 120.0, 80.0, [1.0, 0.0, -2.0]).unwrap();
        assert_eq!(near.px_per_world, far.px_per_world);
        assert_eq!(near.x, far.x);
    }

    #[test]
    fn centering_rotation_puts_the_slot_at_screen_centre() {
        let viewport = Viewport::new(120.0, 80.0, CAMERA);
        let layout = compute_layout(&viewport, 8);
        let placements = place_ring(&layout);

        // The controller centres item i by rotating to π/2 − slot(i); after
        // that rotation the item must project to the horizontal centre, on
        // the near side of the ring.
        for item in [0, 3, 5] {
            let angle = FRAC_PI_2 - slot_angle(item, 8);
            let world = rotate_y(placements[item].position, angle);
            let p = project(CAMERA, 120.0, 80.0, world).unwrap();
            assert!((p.x - 60.0).abs() < 1e-3, "item {item}: x={}", p.x);
            assert!(p.depth_key > 0.0, "item {item} should be near side");
        }
    }

    #[test]
    fn rotation_preserves_ring_radius() {
        let p = rotate_y([2.5, 0.0, 0.0], 1.234);
        let dist = (p[0] * p[0] + p[2] * p[2]).sqrt();
        assert!((dist - 2.5).abs() < 1e-5);
        assert_eq!(p[1], 0.0);
    }

    #[test]
    fn render_returns_one_zone_per_visible_card_and_hovered_last() {
        let viewport = Viewport::new(120.0, 80.0, CAMERA);
        let layout = compute_layout(&viewport, 4);
        let placements = place_ring(&layout);
        let catalog = Catalog::demo();
        let mut hover = HoverLift::new(4);
        hover.set_hovered(Some(2));
        let textures = HashMap::new();

        let scene = RingScene {
            catalog: &catalog,
            layout: &layout,
            placements: &placements,
            angle: FRAC_PI_2 - slot_angle(2, 4),
            hover: &hover,
            textures: &textures,
            camera: CAMERA,
        };
        let area = Rect::new(0, 0, 120, 40);
        let mut buf = Buffer::empty(area);
        let zones = scene.render(area, &mut buf);

        assert!(!zones.is_empty());
        assert_eq!(zones.last().unwrap().item, 2);
        for zone in &zones {
            assert!(zone.rect.width > 0 && zone.rect.height > 0);
            assert!(area.contains(Position::new(zone.rect.x, zone.rect.y)));
        }
    }

    #[test]
    fn empty_catalog_renders_no_zones() {
        let viewport = Viewport::new(120.0, 80.0, CAMERA);
        let layout = compute_layout(&viewport, 0);
        let catalog = Catalog::demo();
        let hover = HoverLift::new(0);
        let textures = HashMap::new();
        let scene = RingScene {
            catalog: &catalog,
            layout: &layout,
            placements: &[],
            angle: PI,
            hover: &hover,
            textures: &textures,
            camera: CAMERA,
        };
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        assert!(scene.render(area, &mut buf).is_empty());
    }
}
