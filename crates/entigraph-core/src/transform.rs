//! Pointer-to-canvas coordinate transform shared by the drag and drop controllers.

use crate::camera::Camera;
use crate::config::{EditorConfig, TransformMode};
use crate::error::{GraphError, GraphResult};
use kurbo::{Point, Rect, Vec2};

/// Parameters of a single pointer-to-canvas conversion.
#[derive(Debug, Clone, Copy)]
pub struct CanvasTransform<'a> {
    /// Bounding rect of the canvas element in pointer coordinates, if mounted.
    pub origin: Option<Rect>,
    /// Viewport transform. `None` means identity (basic mode).
    pub camera: Option<&'a Camera>,
    /// Clamp results to non-negative coordinates.
    pub clamp: bool,
}

impl<'a> CanvasTransform<'a> {
    /// Build the transform for the configured mode.
    pub fn from_config(config: &EditorConfig, origin: Option<Rect>, camera: &'a Camera) -> Self {
        let camera = match config.transform_mode {
            TransformMode::Basic => None,
            TransformMode::ViewportAware => Some(camera),
        };
        Self {
            origin,
            camera,
            clamp: config.clamp_non_negative,
        }
    }

    /// Map a pointer position into canvas space and subtract `anchor`.
    ///
    /// `anchor` is expressed in canvas units: the drop centering offset for new
    /// nodes, or the captured press offset while dragging an existing node.
    pub fn to_canvas_space(&self, pointer: Point, anchor: Vec2) -> GraphResult<Point> {
        let origin = self.origin.ok_or(GraphError::TransformUnavailable)?;
        if !pointer.is_finite() || !origin.origin().is_finite() {
            return Err(GraphError::TransformUnavailable);
        }

        let local = pointer - origin.origin();
        let world = match self.camera {
            Some(camera) => camera.screen_to_world(local.to_point()),
            None => local.to_point(),
        };

        let mut position = world - anchor;
        if self.clamp {
            position.x = position.x.max(0.0);
            position.y = position.y.max(0.0);
        }
        Ok(position)
    }

    /// Canvas-space location of the pointer, without anchor or clamping.
    pub fn pointer_in_canvas(&self, pointer: Point) -> GraphResult<Point> {
        Self { clamp: false, ..*self }.to_canvas_space(pointer, Vec2::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin_at(x: f64, y: f64) -> Option<Rect> {
        Some(Rect::new(x, y, x + 800.0, y + 600.0))
    }

    #[test]
    fn test_basic_drop_position() {
        let transform = CanvasTransform { origin: origin_at(20.0, 20.0), camera: None, clamp: true };
        let pos = transform
            .to_canvas_space(Point::new(130.0, 130.0), Vec2::new(30.0, 30.0))
            .unwrap();
        assert!((pos.x - 80.0).abs() < f64::EPSILON);
        assert!((pos.y - 80.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_basic_clamps_to_non_negative() {
        let transform = CanvasTransform { origin: origin_at(20.0, 20.0), camera: None, clamp: true };
        let pos = transform
            .to_canvas_space(Point::new(25.0, 40.0), Vec2::new(30.0, 30.0))
            .unwrap();
        assert_eq!(pos, Point::new(0.0, 0.0));
    }

    #[test]
    fn test_unclamped_allows_negative() {
        let transform = CanvasTransform { origin: origin_at(20.0, 20.0), camera: None, clamp: false };
        let pos = transform
            .to_canvas_space(Point::new(25.0, 40.0), Vec2::new(30.0, 30.0))
            .unwrap();
        assert_eq!(pos, Point::new(-25.0, -10.0));
    }

    #[test]
    fn test_viewport_aware_inverts_pan_and_zoom() {
        let mut camera = Camera::new();
        camera.offset = Vec2::new(100.0, 50.0);
        camera.zoom = 2.0;
        let transform = CanvasTransform { origin: origin_at(10.0, 10.0), camera: Some(&camera), clamp: false };

        // (510, 260) -> local (500, 250) -> world ((500-100)/2, (250-50)/2) = (200, 100)
        let pos = transform
            .to_canvas_space(Point::new(510.0, 260.0), Vec2::new(90.0, 30.0))
            .unwrap();
        assert!((pos.x - 110.0).abs() < 1e-10);
        assert!((pos.y - 70.0).abs() < 1e-10);
    }

    #[test]
    fn test_missing_origin_is_unavailable() {
        let transform = CanvasTransform { origin: None, camera: None, clamp: true };
        assert_eq!(
            transform.to_canvas_space(Point::new(1.0, 1.0), Vec2::ZERO),
            Err(GraphError::TransformUnavailable)
        );
    }

    #[test]
    fn test_non_finite_pointer_is_unavailable() {
        let transform = CanvasTransform { origin: origin_at(0.0, 0.0), camera: None, clamp: true };
        assert!(transform.to_canvas_space(Point::new(f64::NAN, 1.0), Vec2::ZERO).is_err());
    }

    #[test]
    fn test_from_config_ignores_camera_in_basic_mode() {
        let config = EditorConfig::default();
        let mut camera = Camera::new();
        camera.zoom = 3.0;
        let transform = CanvasTransform::from_config(&config, origin_at(0.0, 0.0), &camera);
        let pos = transform.pointer_in_canvas(Point::new(60.0, 90.0)).unwrap();
        assert_eq!(pos, Point::new(60.0, 90.0));
    }
}
