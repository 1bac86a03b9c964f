//! Viewport and camera description.
//!
//! The ring sizes itself from the world-space width visible at the focal
//! plane, so the only camera knowledge the core needs is "how wide is the
//! world on screen".  Both projection models reduce to that one number.

/// Fallback world width when camera parameters are meaningless
/// (non-finite fov, zero zoom, and so on).
pub const DEFAULT_VISIBLE_WIDTH: f32 = 8.0;

/// Smallest accepted zoom / focal-plane distance.
const MIN_DENOM: f32 = 1e-3;

/// Active projection model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Camera {
    /// Vertical field of view in degrees, and the distance from the camera
    /// to the focal plane (the ring centre sits on the focal plane).
    Perspective { fov_deg: f32, focal_distance: f32 },
    /// Pixels per world unit.
    Orthographic { zoom: f32 },
}

/// Per-frame snapshot of the host viewport.  Cheap to copy and compare;
/// the layout cache keys on it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub px_width: f32,
    pub px_height: f32,
    pub camera: Camera,
}

impl Viewport {
    pub fn new(px_width: f32, px_height: f32, camera: Camera) -> Self {
        Self {
            px_width,
            px_height,
            camera,
        }
    }

    /// Pixel aspect ratio, guarded against a zero-height viewport.
    pub fn aspect(&self) -> f32 {
        self.px_width.max(1.0) / self.px_height.max(1.0)
    }

    /// World-space width visible at the focal plane.
    ///
    /// Perspective: `2·tan(vfov/2)·distance·aspect`.  Orthographic:
    /// `px_width / zoom`.  Degenerate parameters produce
    /// [`DEFAULT_VISIBLE_WIDTH`] rather than zero, negative, or NaN — the
    /// layout downstream must never divide by garbage.
    pub fn visible_width(&self) -> f32 {
        let width = match self.camera {
            Camera::Perspective {
                fov_deg,
                focal_distance,
            } => {
                let half_fov = (fov_deg.clamp(1.0, 179.0) * 0.5).to_radians();
                let depth = focal_distance.max(MIN_DENOM);
                2.0 * half_fov.tan() * depth * self.aspect()
            }
            Camera::Orthographic { zoom } => self.px_width.max(1.0) / zoom.max(MIN_DENOM),
        };

        if width.is_finite() && width > 0.0 {
            width
        } else {
            DEFAULT_VISIBLE_WIDTH
        }
    }
}

// ───────────────────────────────────────── tests ─────────────
