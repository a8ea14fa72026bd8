//! Pointer-driven repositioning of existing nodes.

use crate::capture::{CaptureHandle, PointerCapture};
use crate::error::{GraphError, GraphResult};
use crate::graph::{Graph, NodeId};
use crate::input::PressTarget;
use crate::transform::CanvasTransform;
use kurbo::{Point, Vec2};

/// State of the drag controller.
#[derive(Debug, Default)]
pub enum DragState {
    /// No drag in progress.
    #[default]
    Idle,
    /// A node follows the pointer.
    Dragging {
        node: NodeId,
        /// Vector from the node's top-left to the press point, in canvas units.
        pointer_offset: Vec2,
        /// Window-level move/up subscription, released when this state is left.
        capture: PointerCapture,
    },
}

/// Drives the `Idle -> Dragging -> Idle` cycle for one editor session.
#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
    captures: CaptureHandle,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    /// The node being dragged, if any.
    pub fn dragging(&self) -> Option<NodeId> {
        match &self.state {
            DragState::Dragging { node, .. } => Some(*node),
            DragState::Idle => None,
        }
    }

    /// Whether the host should deliver window-level pointer events.
    pub fn is_captured(&self) -> bool {
        self.captures.is_captured()
    }

    /// Handle a pointer press.
    ///
    /// Only a press on a node body starts a drag; presses on the name input
    /// or the pane return `Ok(false)`. An active drag is replaced, not stacked.
    pub fn press(
        &mut self,
        graph: &mut Graph,
        target: PressTarget,
        pointer: Point,
        transform: &CanvasTransform<'_>,
    ) -> GraphResult<bool> {
        let PressTarget::NodeBody(id) = target else {
            return Ok(false);
        };
        let node = graph.node(id).ok_or(GraphError::NodeNotFound(id))?;
        let pressed_at = transform.pointer_in_canvas(pointer)?;
        let pointer_offset = pressed_at - node.position;

        // Dropping the previous state releases its capture first
        self.state = DragState::Idle;
        self.state = DragState::Dragging {
            node: id,
            pointer_offset,
            capture: self.captures.acquire(),
        };
        graph.bring_to_front(id);
        log::debug!("Drag started on {} with offset ({}, {})", id, pointer_offset.x, pointer_offset.y);
        Ok(true)
    }

    /// Follow the pointer. Does nothing while idle.
    ///
    /// If the dragged node has disappeared the drag ends and the error is returned.
    pub fn pointer_move(
        &mut self,
        graph: &mut Graph,
        pointer: Point,
        transform: &CanvasTransform<'_>,
    ) -> GraphResult<()> {
        let DragState::Dragging { node, pointer_offset, .. } = &self.state else {
            return Ok(());
        };
        let (node, pointer_offset) = (*node, *pointer_offset);

        let position = transform.to_canvas_space(pointer, pointer_offset)?;
        if let Err(err) = graph.move_node(node, position) {
            if matches!(err, GraphError::NodeNotFound(_)) {
                self.state = DragState::Idle;
            }
            return Err(err);
        }
        Ok(())
    }

    /// End the drag. Returns the node that was being dragged.
    pub fn release(&mut self) -> Option<NodeId> {
        let node = self.dragging();
        self.state = DragState::Idle;
        if let Some(id) = node {
            log::debug!("Drag ended on {}", id);
        }
        node
    }

    /// Abandon the drag if it targets `id`. Called when a node is deleted.
    pub fn forget_node(&mut self, id: NodeId) {
        if self.dragging() == Some(id) {
            self.state = DragState::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityType;
    use kurbo::Rect;

    fn canvas_at_origin() -> CanvasTransform<'static> {
        CanvasTransform {
            origin: Some(Rect::new(0.0, 0.0, 1000.0, 1000.0)),
            camera: None,
            clamp: true,
        }
    }

    #[test]
    fn test_drag_keeps_press_offset() {
        let mut graph = Graph::new();
        let a = graph.add_node(EntityType::Company, Point::new(50.0, 60.0)).unwrap();
        let transform = canvas_at_origin();
        let mut drag = DragController::new();

        assert!(drag.press(&mut graph, PressTarget::NodeBody(a), Point::new(65.0, 70.0), &transform).unwrap());
        drag.pointer_move(&mut graph, Point::new(200.0, 200.0), &transform).unwrap();

        assert_eq!(graph.node(a).unwrap().position, Point::new(185.0, 190.0));
    }

    #[test]
    fn test_name_input_press_does_not_drag() {
        let mut graph = Graph::new();
        let a = graph.add_node(EntityType::Employee, Point::ZERO).unwrap();
        let transform = canvas_at_origin();
        let mut drag = DragController::new();

        assert!(!drag.press(&mut graph, PressTarget::NameInput(a), Point::new(5.0, 5.0), &transform).unwrap());
        drag.pointer_move(&mut graph, Point::new(300.0, 300.0), &transform).unwrap();

        assert_eq!(graph.node(a).unwrap().position, Point::ZERO);
        assert!(!drag.is_captured());
    }

    #[test]
    fn test_capture_lifecycle() {
        let mut graph = Graph::new();
        let a = graph.add_node(EntityType::Supplier, Point::ZERO).unwrap();
        let transform = canvas_at_origin();
        let mut drag = DragController::new();

        drag.press(&mut graph, PressTarget::NodeBody(a), Point::new(1.0, 1.0), &transform).unwrap();
        assert!(drag.is_captured());
        assert_eq!(drag.release(), Some(a));
        assert!(!drag.is_captured());
        assert_eq!(drag.release(), None);
    }

    #[test]
    fn test_moves_after_release_are_ignored() {
        let mut graph = Graph::new();
        let a = graph.add_node(EntityType::Supplier, Point::ZERO).unwrap();
        let transform = canvas_at_origin();
        let mut drag = DragController::new();

        drag.press(&mut graph, PressTarget::NodeBody(a), Point::ZERO, &transform).unwrap();
        drag.pointer_move(&mut graph, Point::new(10.0, 10.0), &transform).unwrap();
        drag.release();
        drag.pointer_move(&mut graph, Point::new(90.0, 90.0), &transform).unwrap();

        assert_eq!(graph.node(a).unwrap().position, Point::new(10.0, 10.0));
    }

    #[test]
    fn test_new_press_overwrites_active_drag() {
        let mut graph = Graph::new();
        let a = graph.add_node(EntityType::Company, Point::ZERO).unwrap();
        let b = graph.add_node(EntityType::Company, Point::new(300.0, 0.0)).unwrap();
        let transform = canvas_at_origin();
        let mut drag = DragController::new();

        drag.press(&mut graph, PressTarget::NodeBody(a), Point::ZERO, &transform).unwrap();
        drag.press(&mut graph, PressTarget::NodeBody(b), Point::new(300.0, 0.0), &transform).unwrap();
        assert_eq!(drag.dragging(), Some(b));

        drag.pointer_move(&mut graph, Point::new(400.0, 100.0), &transform).unwrap();
        assert_eq!(graph.node(a).unwrap().position, Point::ZERO);
        assert_eq!(graph.node(b).unwrap().position, Point::new(400.0, 100.0));

        drag.release();
        assert!(!drag.is_captured());
    }

    #[test]
    fn test_deleted_node_ends_drag() {
        let mut graph = Graph::new();
        let a = graph.add_node(EntityType::Company, Point::ZERO).unwrap();
        let transform = canvas_at_origin();
        let mut drag = DragController::new();

        drag.press(&mut graph, PressTarget::NodeBody(a), Point::ZERO, &transform).unwrap();
        graph.delete_node(a).unwrap();

        let result = drag.pointer_move(&mut graph, Point::new(5.0, 5.0), &transform);
        assert_eq!(result, Err(GraphError::NodeNotFound(a)));
        assert_eq!(drag.dragging(), None);
        assert!(!drag.is_captured());
    }

    #[test]
    fn test_unmounted_canvas_keeps_position() {
        let mut graph = Graph::new();
        let a = graph.add_node(EntityType::Company, Point::new(5.0, 5.0)).unwrap();
        let mut drag = DragController::new();

        drag.press(&mut graph, PressTarget::NodeBody(a), Point::new(5.0, 5.0), &canvas_at_origin())
            .unwrap();
        let unmounted = CanvasTransform { origin: None, camera: None, clamp: true };
        assert_eq!(
            drag.pointer_move(&mut graph, Point::new(50.0, 50.0), &unmounted),
            Err(GraphError::TransformUnavailable)
        );
        assert_eq!(graph.node(a).unwrap().position, Point::new(5.0, 5.0));
        assert_eq!(drag.dragging(), Some(a));
    }

    #[test]
    fn test_press_brings_node_to_front() {
        let mut graph = Graph::new();
        let a = graph.add_node(EntityType::Company, Point::ZERO).unwrap();
        let b = graph.add_node(EntityType::Employee, Point::ZERO).unwrap();
        let mut drag = DragController::new();

        drag.press(&mut graph, PressTarget::NodeBody(a), Point::ZERO, &canvas_at_origin()).unwrap();
        let order: Vec<NodeId> = graph.nodes().map(|n| n.id()).collect();
        assert_eq!(order, vec![b, a]);
    }
}
