//! Drag-and-drop of new entities from the palette onto the canvas.
//!
//! The palette writes the entity tag into the drag payload under
//! [`ENTITY_DRAG_FORMAT`]; the canvas reads it back on drop. Nothing is kept
//! between drops.

use crate::entity::EntityType;
use crate::error::GraphResult;
use crate::graph::{Graph, NodeId};
use crate::transform::CanvasTransform;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Payload key carrying the entity type tag.
pub const ENTITY_DRAG_FORMAT: &str = "application/reactflow";

/// Key/value transport between drag source and drop target.
///
/// Hosts that use something other than the platform's drag data must keep the
/// same key and value.
pub trait DataTransfer {
    fn set_data(&mut self, format: &str, data: &str);
    fn get_data(&self, format: &str) -> Option<String>;
}

/// In-memory [`DataTransfer`]. Serializes as a plain `{ format: data }` map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DragPayload {
    entries: HashMap<String, String>,
}

impl DragPayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Payload as written by the palette for `entity_type`.
    pub fn for_entity(entity_type: EntityType) -> Self {
        let mut payload = Self::new();
        DropController::begin_palette_drag(&mut payload, entity_type);
        payload
    }
}

impl DataTransfer for DragPayload {
    fn set_data(&mut self, format: &str, data: &str) {
        self.entries.insert(format.to_string(), data.to_string());
    }

    fn get_data(&self, format: &str) -> Option<String> {
        self.entries.get(format).cloned()
    }
}

/// Drop effect advertised during drag-over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropEffect {
    None,
    Copy,
    Move,
}

/// Host instructions for a drag-over event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragOverResponse {
    /// Suppress the platform default, which would reject the drop.
    pub prevent_default: bool,
    pub drop_effect: DropEffect,
}

/// Stateless drop handling.
#[derive(Debug, Clone, Copy, Default)]
pub struct DropController;

impl DropController {
    /// Palette item pressed: tag the payload with the entity type.
    pub fn begin_palette_drag(payload: &mut dyn DataTransfer, entity_type: EntityType) {
        payload.set_data(ENTITY_DRAG_FORMAT, entity_type.tag());
    }

    /// Canvas drag-over: always accept.
    pub fn drag_over() -> DragOverResponse {
        DragOverResponse {
            prevent_default: true,
            drop_effect: DropEffect::Move,
        }
    }

    /// Canvas drop: create a node under the pointer.
    ///
    /// Fails with `UnknownEntityType` when the payload has no tag or an
    /// unrecognised one, and with `TransformUnavailable` when the canvas
    /// geometry is missing. In both cases the graph is untouched.
    pub fn drop(
        graph: &mut Graph,
        payload: &dyn DataTransfer,
        pointer: Point,
        transform: &CanvasTransform<'_>,
        anchor: Vec2,
    ) -> GraphResult<NodeId> {
        let tag = payload.get_data(ENTITY_DRAG_FORMAT).unwrap_or_default();
        let entity_type: EntityType = tag.parse()?;
        let position = transform.to_canvas_space(pointer, anchor)?;
        graph.add_node(entity_type, position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GraphError;
    use kurbo::Rect;

    fn canvas_at(x: f64, y: f64) -> CanvasTransform<'static> {
        CanvasTransform {
            origin: Some(Rect::new(x, y, x + 800.0, y + 600.0)),
            camera: None,
            clamp: true,
        }
    }

    #[test]
    fn test_drop_supplier() {
        let mut graph = Graph::new();
        let payload = DragPayload::for_entity(EntityType::Supplier);

        let id = DropController::drop(
            &mut graph,
            &payload,
            Point::new(130.0, 130.0),
            &canvas_at(20.0, 20.0),
            Vec2::new(30.0, 30.0),
        )
        .unwrap();

        let node = graph.node(id).unwrap();
        assert_eq!(node.position, Point::new(80.0, 80.0));
        assert_eq!(node.name, "New Supplier");
    }

    #[test]
    fn test_missing_tag_creates_nothing() {
        let mut graph = Graph::new();
        let result = DropController::drop(
            &mut graph,
            &DragPayload::new(),
            Point::new(10.0, 10.0),
            &canvas_at(0.0, 0.0),
            Vec2::ZERO,
        );
        assert!(matches!(result, Err(GraphError::UnknownEntityType(_))));
        assert!(graph.is_empty());
    }

    #[test]
    fn test_unknown_tag_creates_nothing() {
        let mut graph = Graph::new();
        let mut payload = DragPayload::new();
        payload.set_data(ENTITY_DRAG_FORMAT, "customer");
        let result = DropController::drop(&mut graph, &payload, Point::ZERO, &canvas_at(0.0, 0.0), Vec2::ZERO);
        assert!(result.is_err());
        assert!(graph.is_empty());
    }

    #[test]
    fn test_unmounted_canvas_discards_drop() {
        let mut graph = Graph::new();
        let payload = DragPayload::for_entity(EntityType::Company);
        let unmounted = CanvasTransform { origin: None, camera: None, clamp: true };
        let result = DropController::drop(&mut graph, &payload, Point::ZERO, &unmounted, Vec2::ZERO);
        assert_eq!(result, Err(GraphError::TransformUnavailable));
        assert!(graph.is_empty());
    }

    #[test]
    fn test_drag_over_accepts() {
        let response = DropController::drag_over();
        assert!(response.prevent_default);
        assert_eq!(response.drop_effect, DropEffect::Move);
    }

    #[test]
    fn test_payload_uses_fixed_key() {
        let payload = DragPayload::for_entity(EntityType::Employee);
        assert_eq!(payload.get_data(ENTITY_DRAG_FORMAT).as_deref(), Some("employee"));
        assert_eq!(payload.get_data("text/plain"), None);
    }
}
