//! Editor session: owns the graph and routes host events to the controllers.
//!
//! This is the recovery boundary. Every error raised below it is logged and
//! turned into a no-op, so a malformed event never leaves the editor unusable.

use crate::camera::Camera;
use crate::config::EditorConfig;
use crate::dnd::{DragOverResponse, DragPayload, DropController};
use crate::drag::DragController;
use crate::entity::EntityType;
use crate::error::{GraphError, GraphResult};
use crate::export::{EdgeStyle, GraphExport};
use crate::graph::{ConnectPolicy, EdgeId, Graph, GraphChange, NodeId};
use crate::input::{MouseButton, PointerEvent, PressTarget};
use crate::transform::CanvasTransform;
use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Padding used by [`EditorSession::fit_view`] when none is given.
pub const DEFAULT_FIT_PADDING: f64 = 50.0;

fn default_fit_padding() -> f64 {
    DEFAULT_FIT_PADDING
}

/// Events a host feeds into the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EditorEvent {
    /// Canvas element mounted, resized or unmounted (`None`).
    SetCanvasOrigin { rect: Option<Rect> },
    PointerDown {
        position: Point,
        target: PressTarget,
        #[serde(default)]
        button: MouseButton,
    },
    PointerMove { position: Point },
    PointerUp {
        position: Point,
        #[serde(default)]
        button: MouseButton,
    },
    /// Palette item picked up.
    PaletteDragStart { entity: EntityType },
    DragOver,
    /// Drop on the canvas. Without an explicit payload the one from the last
    /// palette drag is used.
    Drop {
        position: Point,
        #[serde(default)]
        payload: Option<DragPayload>,
    },
    Connect {
        source: NodeId,
        #[serde(default)]
        source_handle: Option<String>,
        target: NodeId,
        #[serde(default)]
        target_handle: Option<String>,
    },
    Rename { node: NodeId, name: String },
    DeleteNode { node: NodeId },
    DeleteEdge { edge: EdgeId },
    Pan { delta: Vec2 },
    Zoom { at: Point, factor: f64 },
    FitView {
        viewport: Size,
        #[serde(default = "default_fit_padding")]
        padding: f64,
    },
}

/// What handling an event did.
#[derive(Debug, Clone, PartialEq)]
pub enum EventOutcome {
    /// Handled, nothing to report.
    Handled,
    NodeCreated(NodeId),
    EdgeCreated(EdgeId),
    DragStarted(NodeId),
    DragEnded(NodeId),
    DragOver(DragOverResponse),
    PaletteDrag(DragPayload),
    /// Dropped as a no-op.
    Ignored(GraphError),
}

/// A single editing session over one diagram.
#[derive(Debug)]
pub struct EditorSession {
    config: EditorConfig,
    graph: Graph,
    camera: Camera,
    /// Canvas element rect in host coordinates; `None` while unmounted.
    canvas_origin: Option<Rect>,
    drag: DragController,
    /// Platform drag data of the palette drag in flight.
    in_flight: Option<DragPayload>,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl EditorSession {
    /// Create a session with an empty graph.
    pub fn new(config: EditorConfig) -> Self {
        Self::with_graph(Graph::new(), config)
    }

    /// Create a session over an existing graph.
    pub fn with_graph(mut graph: Graph, config: EditorConfig) -> Self {
        graph.set_policy(ConnectPolicy {
            allow_self_loops: config.allow_self_loops,
            allow_parallel_edges: config.allow_parallel_edges,
        });
        Self {
            camera: Camera::with_zoom_limits(config.min_zoom, config.max_zoom),
            config,
            graph,
            canvas_origin: None,
            drag: DragController::new(),
            in_flight: None,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Read-only view of the graph. Mutation goes through the session.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn canvas_origin(&self) -> Option<Rect> {
        self.canvas_origin
    }

    /// Node currently following the pointer.
    pub fn dragging(&self) -> Option<NodeId> {
        self.drag.dragging()
    }

    /// Whether the host should route window-level pointer move/up events here.
    pub fn is_pointer_captured(&self) -> bool {
        self.drag.is_captured()
    }

    /// Drain change notifications for the rendering layer.
    pub fn take_changes(&mut self) -> Vec<GraphChange> {
        self.graph.take_changes()
    }

    fn recover<T>(&self, action: &str, result: GraphResult<T>) -> Result<T, GraphError> {
        result.inspect_err(|err| log::warn!("Ignoring {}: {}", action, err))
    }

    pub fn set_canvas_origin(&mut self, rect: Option<Rect>) {
        self.canvas_origin = rect;
    }

    /// Dispatch one event.
    pub fn handle(&mut self, event: EditorEvent) -> EventOutcome {
        let outcome = match event {
            EditorEvent::SetCanvasOrigin { rect } => {
                self.set_canvas_origin(rect);
                Ok(EventOutcome::Handled)
            }
            EditorEvent::PointerDown { position, target, button } => self
                .pointer(PointerEvent::Down { position, button, target }),
            EditorEvent::PointerMove { position } => self.pointer(PointerEvent::Move { position }),
            EditorEvent::PointerUp { position, button } => {
                self.pointer(PointerEvent::Up { position, button })
            }
            EditorEvent::PaletteDragStart { entity } => {
                Ok(EventOutcome::PaletteDrag(self.palette_drag_start(entity)))
            }
            EditorEvent::DragOver => Ok(EventOutcome::DragOver(self.drag_over())),
            EditorEvent::Drop { position, payload } => {
                let payload = payload.or_else(|| self.in_flight.take()).unwrap_or_default();
                self.drop(&payload, position).map(EventOutcome::NodeCreated)
            }
            EditorEvent::Connect { source, source_handle, target, target_handle } => self
                .connect(source, source_handle.as_deref(), target, target_handle.as_deref())
                .map(EventOutcome::EdgeCreated),
            EditorEvent::Rename { node, name } => {
                self.rename_node(node, &name).map(|_| EventOutcome::Handled)
            }
            EditorEvent::DeleteNode { node } => self.delete_node(node).map(|_| EventOutcome::Handled),
            EditorEvent::DeleteEdge { edge } => self.delete_edge(edge).map(|_| EventOutcome::Handled),
            EditorEvent::Pan { delta } => {
                self.camera.pan(delta);
                Ok(EventOutcome::Handled)
            }
            EditorEvent::Zoom { at, factor } => {
                if factor.is_finite() && factor > 0.0 {
                    self.camera.zoom_at(at, factor);
                    Ok(EventOutcome::Handled)
                } else {
                    self.recover("zoom", Err(GraphError::TransformUnavailable))
                }
            }
            EditorEvent::FitView { viewport, padding } => {
                self.fit_view(viewport, padding);
                Ok(EventOutcome::Handled)
            }
        };
        outcome.unwrap_or_else(EventOutcome::Ignored)
    }

    /// Feed a pointer event to the drag controller.
    pub fn pointer(&mut self, event: PointerEvent) -> GraphResult<EventOutcome> {
        let transform = CanvasTransform::from_config(&self.config, self.canvas_origin, &self.camera);
        match event {
            PointerEvent::Down { position, button, target } => {
                if button != MouseButton::Left {
                    return Ok(EventOutcome::Handled);
                }
                let started = self.drag.press(&mut self.graph, target, position, &transform);
                if self.recover("pointer down", started)? {
                    Ok(target.node().map_or(EventOutcome::Handled, EventOutcome::DragStarted))
                } else {
                    Ok(EventOutcome::Handled)
                }
            }
            PointerEvent::Move { position } => {
                let moved = self.drag.pointer_move(&mut self.graph, position, &transform);
                self.recover("pointer move", moved)?;
                Ok(EventOutcome::Handled)
            }
            PointerEvent::Up { button, .. } => {
                if button != MouseButton::Left {
                    return Ok(EventOutcome::Handled);
                }
                Ok(self
                    .drag
                    .release()
                    .map_or(EventOutcome::Handled, EventOutcome::DragEnded))
            }
        }
    }

    /// Palette item picked up: build the drag payload for it.
    pub fn palette_drag_start(&mut self, entity: EntityType) -> DragPayload {
        let payload = DragPayload::for_entity(entity);
        self.in_flight = Some(payload.clone());
        payload
    }

    pub fn drag_over(&self) -> DragOverResponse {
        DropController::drag_over()
    }

    /// Drop a payload at `pointer`, creating a node.
    pub fn drop(&mut self, payload: &DragPayload, pointer: Point) -> GraphResult<NodeId> {
        self.in_flight = None;
        let transform = CanvasTransform::from_config(&self.config, self.canvas_origin, &self.camera);
        let anchor = self.config.drop_anchor();
        let created = DropController::drop(&mut self.graph, payload, pointer, &transform, anchor);
        self.recover("drop", created)
    }

    /// Link two node handles.
    pub fn connect(
        &mut self,
        source: NodeId,
        source_handle: Option<&str>,
        target: NodeId,
        target_handle: Option<&str>,
    ) -> GraphResult<EdgeId> {
        let created = self.graph.connect(source, source_handle, target, target_handle);
        self.recover("connect", created)
    }

    /// Commit an inline name edit. Returns whether the name changed.
    pub fn rename_node(&mut self, id: NodeId, name: &str) -> GraphResult<bool> {
        let renamed = self.graph.rename_node(id, name);
        self.recover("rename", renamed)
    }

    /// Delete a node and its edges. A drag on that node ends.
    pub fn delete_node(&mut self, id: NodeId) -> GraphResult<()> {
        let deleted = self.graph.delete_node(id).map(|_| ());
        self.recover("delete node", deleted)?;
        self.drag.forget_node(id);
        Ok(())
    }

    pub fn delete_edge(&mut self, id: EdgeId) -> GraphResult<()> {
        let deleted = self.graph.delete_edge(id).map(|_| ());
        self.recover("delete edge", deleted)
    }

    /// Fit the camera to all nodes. An empty graph resets the camera.
    pub fn fit_view(&mut self, viewport: Size, padding: f64) {
        match self.graph.bounds(self.config.node_size) {
            Some(bounds) => self.camera.fit_to_bounds(bounds, viewport, padding),
            None => self.camera.reset(),
        }
    }

    fn edge_style(&self) -> EdgeStyle {
        EdgeStyle {
            kind: self.config.edge_style.clone(),
            animated: self.config.animated_edges,
        }
    }

    /// Snapshot of the graph in export form.
    pub fn export(&self) -> GraphExport {
        self.graph.to_export(&self.edge_style())
    }

    /// Snapshot as JSON.
    pub fn export_json(&self, pretty: bool) -> GraphResult<String> {
        self.export().to_json(pretty)
    }

    /// Replace the graph with an imported snapshot. Any drag in progress ends.
    ///
    /// The change queue reports the old contents as removed before the
    /// imported ones are added.
    pub fn import_json(&mut self, json: &str) -> GraphResult<()> {
        let imported = Graph::from_json(json, self.graph.policy());
        let graph = self.recover("import", imported)?;
        self.drag.release();
        self.graph.replace_with(graph);
        Ok(())
    }
}
