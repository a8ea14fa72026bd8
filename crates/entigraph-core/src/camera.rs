//! Camera module for viewport pan/zoom.

use kurbo::{Affine, Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Zoom level that corresponds to "100%".
pub const DEFAULT_ZOOM: f64 = 1.0;

/// Camera holds the viewport transform of the canvas.
///
/// The rendering layer pans and zooms it; the coordinate transform inverts it
/// so that pointer positions land in canvas space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Current translation offset (pan), in screen pixels.
    pub offset: Vec2,
    /// Current zoom level.
    pub zoom: f64,
    /// Minimum allowed zoom level
    pub min_zoom: f64,
    /// Maximum allowed zoom level
    pub max_zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: DEFAULT_ZOOM,
            min_zoom: 0.1,
            max_zoom: 10.0,
        }
    }
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a camera with custom zoom limits.
    pub fn with_zoom_limits(min_zoom: f64, max_zoom: f64) -> Self {
        Self {
            min_zoom,
            max_zoom,
            zoom: DEFAULT_ZOOM.clamp(min_zoom, max_zoom),
            ..Self::default()
        }
    }

    /// Canvas to screen: scale by `zoom`, then shift by `offset`.
    pub fn transform(&self) -> Affine {
        Affine::new([self.zoom, 0.0, 0.0, self.zoom, self.offset.x, self.offset.y])
    }

    /// Screen to canvas.
    pub fn inverse_transform(&self) -> Affine {
        self.transform().inverse()
    }

    pub fn screen_to_world(&self, screen_point: Point) -> Point {
        ((screen_point.to_vec2() - self.offset) / self.zoom).to_point()
    }

    pub fn world_to_screen(&self, world_point: Point) -> Point {
        (world_point.to_vec2() * self.zoom + self.offset).to_point()
    }

    /// Shift the view by `delta` screen pixels.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Multiply zoom by `factor` within limits. The canvas point under
    /// `screen_point` stays put.
    pub fn zoom_at(&mut self, screen_point: Point, factor: f64) {
        let zoom = (self.zoom * factor).clamp(self.min_zoom, self.max_zoom);
        if (zoom - self.zoom).abs() < f64::EPSILON {
            return;
        }
        let pinned = self.screen_to_world(screen_point);
        self.zoom = zoom;
        self.offset = screen_point.to_vec2() - pinned.to_vec2() * zoom;
    }

    /// Back to no pan and default zoom.
    pub fn reset(&mut self) {
        self.offset = Vec2::ZERO;
        self.zoom = DEFAULT_ZOOM.clamp(self.min_zoom, self.max_zoom);
    }

    /// Zoom and center so `bounds` fills `viewport` minus `padding` per side.
    /// Degenerate bounds reset the camera.
    pub fn fit_to_bounds(&mut self, bounds: Rect, viewport: Size, padding: f64) {
        if bounds.is_zero_area() {
            self.reset();
            return;
        }

        let usable_w = (viewport.width - 2.0 * padding).max(1.0);
        let usable_h = (viewport.height - 2.0 * padding).max(1.0);
        self.zoom = (usable_w / bounds.width())
            .min(usable_h / bounds.height())
            .clamp(self.min_zoom, self.max_zoom);

        let viewport_center = Vec2::new(viewport.width, viewport.height) / 2.0;
        self.offset = viewport_center - bounds.center().to_vec2() * self.zoom;
    }
}
