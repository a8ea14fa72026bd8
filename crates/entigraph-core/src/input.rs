//! Pointer input types delivered by the host.

use crate::graph::NodeId;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
}

/// What the pointer was over when it was pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "node", rename_all = "snake_case")]
pub enum PressTarget {
    /// The body of a node. Starts a drag.
    NodeBody(NodeId),
    /// The inline name input of a node. Never starts a drag so that text
    /// can be selected and edited.
    NameInput(NodeId),
    /// Empty canvas.
    Pane,
}

impl PressTarget {
    pub fn node(&self) -> Option<NodeId> {
        match self {
            PressTarget::NodeBody(id) | PressTarget::NameInput(id) => Some(*id),
            PressTarget::Pane => None,
        }
    }
}

/// Pointer events in host (screen) coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        position: Point,
        button: MouseButton,
        target: PressTarget,
    },
    Move {
        position: Point,
    },
    Up {
        position: Point,
        button: MouseButton,
    },
}

impl PointerEvent {
    pub fn position(&self) -> Point {
        match self {
            PointerEvent::Down { position, .. }
            | PointerEvent::Move { position }
            | PointerEvent::Up { position, .. } => *position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_press_target_node() {
        let id = Uuid::new_v4();
        assert_eq!(PressTarget::NodeBody(id).node(), Some(id));
        assert_eq!(PressTarget::NameInput(id).node(), Some(id));
        assert_eq!(PressTarget::Pane.node(), None);
    }

    #[test]
    fn test_press_target_json_shape() {
        let id = Uuid::nil();
        let json = serde_json::to_value(PressTarget::NameInput(id)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "kind": "name_input", "node": "00000000-0000-0000-0000-000000000000" })
        );
        let pane: PressTarget = serde_json::from_str(r#"{ "kind": "pane" }"#).unwrap();
        assert_eq!(pane, PressTarget::Pane);
    }

    #[test]
    fn test_event_position() {
        let event = PointerEvent::Up { position: Point::new(3.0, 4.0), button: MouseButton::Left };
        assert_eq!(event.position(), Point::new(3.0, 4.0));
    }
}
