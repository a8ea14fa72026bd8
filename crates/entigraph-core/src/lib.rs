//! Entigraph Core Library
//!
//! Platform-agnostic graph store and canvas interaction state machines for the
//! Entigraph entity diagram editor.

pub mod camera;
pub mod capture;
pub mod config;
pub mod dnd;
pub mod drag;
pub mod entity;
pub mod error;
pub mod export;
pub mod graph;
pub mod input;
pub mod session;
pub mod transform;

pub use camera::Camera;
pub use config::{EditorConfig, TransformMode};
pub use dnd::{DataTransfer, DragPayload, DropController, ENTITY_DRAG_FORMAT};
pub use drag::{DragController, DragState};
pub use entity::{EntityInfo, EntityType};
pub use error::{GraphError, GraphResult};
pub use export::{EdgeStyle, GraphExport};
pub use graph::{ConnectPolicy, Edge, EdgeId, Graph, GraphChange, Node, NodeId};
pub use input::{MouseButton, PointerEvent, PressTarget};
pub use session::{EditorEvent, EditorSession, EventOutcome};
pub use transform::CanvasTransform;
