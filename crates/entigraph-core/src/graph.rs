//! Graph state store: the nodes and edges of a diagram.
//!
//! All mutation goes through the methods on [`Graph`]. Each state-changing
//! operation records a [`GraphChange`] that the rendering layer drains with
//! [`Graph::take_changes`].

use crate::entity::EntityType;
use crate::error::{GraphError, GraphResult};
use kurbo::{Point, Rect, Size};
use std::collections::HashMap;
use uuid::Uuid;

/// Unique identifier for a node.
pub type NodeId = Uuid;

/// Unique identifier for an edge.
pub type EdgeId = Uuid;

/// An entity placed on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: NodeId,
    entity_type: EntityType,
    /// Display name, edited inline.
    pub name: String,
    /// Top-left corner in canvas coordinates.
    pub position: Point,
}

impl Node {
    fn new(entity_type: EntityType, position: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            entity_type,
            name: entity_type.info().initial_name.to_string(),
            position,
        }
    }

    pub(crate) fn restore(id: NodeId, entity_type: EntityType, name: String, position: Point) -> Self {
        Self { id, entity_type, name, position }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn entity_type(&self) -> EntityType {
        self.entity_type
    }

    /// Footprint of the node for a given node size.
    pub fn bounds(&self, size: Size) -> Rect {
        Rect::from_origin_size(self.position, size)
    }
}

/// A connection between two node handles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    id: EdgeId,
    source: NodeId,
    target: NodeId,
    source_handle: Option<String>,
    target_handle: Option<String>,
}

impl Edge {
    pub(crate) fn restore(
        id: EdgeId,
        source: NodeId,
        source_handle: Option<String>,
        target: NodeId,
        target_handle: Option<String>,
    ) -> Self {
        Self { id, source, target, source_handle, target_handle }
    }

    pub fn id(&self) -> EdgeId {
        self.id
    }

    pub fn source(&self) -> NodeId {
        self.source
    }

    pub fn target(&self) -> NodeId {
        self.target
    }

    pub fn source_handle(&self) -> Option<&str> {
        self.source_handle.as_deref()
    }

    pub fn target_handle(&self) -> Option<&str> {
        self.target_handle.as_deref()
    }

    /// Whether either endpoint is `node`.
    pub fn touches(&self, node: NodeId) -> bool {
        self.source == node || self.target == node
    }
}

/// Which connections [`Graph::connect`] accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectPolicy {
    pub allow_self_loops: bool,
    pub allow_parallel_edges: bool,
}

impl Default for ConnectPolicy {
    fn default() -> Self {
        Self {
            allow_self_loops: true,
            allow_parallel_edges: true,
        }
    }
}

/// A change notification emitted by the store.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphChange {
    NodeAdded(NodeId),
    NodeRenamed(NodeId),
    NodeMoved(NodeId),
    /// Moved to the top of the z-order.
    NodeRaised(NodeId),
    NodeRemoved(NodeId),
    EdgeAdded(EdgeId),
    EdgeRemoved(EdgeId),
}

/// The in-memory diagram.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: HashMap<NodeId, Node>,
    /// Node ids back to front; insertion order unless raised.
    z_order: Vec<NodeId>,
    /// Edges in creation order.
    edges: Vec<Edge>,
    policy: ConnectPolicy,
    changes: Vec<GraphChange>,
}

fn ensure_finite(position: Point) -> GraphResult<()> {
    if position.is_finite() {
        Ok(())
    } else {
        Err(GraphError::NonFinitePosition { x: position.x, y: position.y })
    }
}

impl Graph {
    /// Create an empty graph with the default connection policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty graph with a custom connection policy.
    pub fn with_policy(policy: ConnectPolicy) -> Self {
        Self { policy, ..Self::default() }
    }

    pub fn policy(&self) -> ConnectPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: ConnectPolicy) {
        self.policy = policy;
    }

    /// Add a node of the given type at `position`. It becomes the topmost node.
    pub fn add_node(&mut self, entity_type: EntityType, position: Point) -> GraphResult<NodeId> {
        ensure_finite(position)?;
        let node = Node::new(entity_type, position);
        let id = node.id;
        self.insert_node(node)?;
        log::debug!("Added {} node {} at ({}, {})", entity_type, id, position.x, position.y);
        Ok(id)
    }

    /// Add a node from a type tag, failing on tags not in the registry.
    pub fn add_node_tagged(&mut self, tag: &str, position: Point) -> GraphResult<NodeId> {
        let entity_type: EntityType = tag.parse()?;
        self.add_node(entity_type, position)
    }

    pub(crate) fn insert_node(&mut self, node: Node) -> GraphResult<()> {
        if self.nodes.contains_key(&node.id) {
            return Err(GraphError::DuplicateId(node.id.to_string()));
        }
        let id = node.id;
        self.z_order.push(id);
        self.nodes.insert(id, node);
        self.changes.push(GraphChange::NodeAdded(id));
        Ok(())
    }

    /// Rename a node.
    ///
    /// The name is trimmed. Returns `Ok(false)` without touching the node when
    /// the trimmed name is empty or equal to the current name.
    pub fn rename_node(&mut self, id: NodeId, new_name: &str) -> GraphResult<bool> {
        let node = self.nodes.get_mut(&id).ok_or(GraphError::NodeNotFound(id))?;
        let trimmed = new_name.trim();
        if trimmed.is_empty() || trimmed == node.name {
            return Ok(false);
        }
        node.name = trimmed.to_string();
        self.changes.push(GraphChange::NodeRenamed(id));
        Ok(true)
    }

    /// Move a node to `position`.
    pub fn move_node(&mut self, id: NodeId, position: Point) -> GraphResult<()> {
        ensure_finite(position)?;
        let node = self.nodes.get_mut(&id).ok_or(GraphError::NodeNotFound(id))?;
        if node.position != position {
            node.position = position;
            self.changes.push(GraphChange::NodeMoved(id));
        }
        Ok(())
    }

    /// Delete a node together with every edge that touches it.
    pub fn delete_node(&mut self, id: NodeId) -> GraphResult<Node> {
        let node = self.nodes.remove(&id).ok_or(GraphError::NodeNotFound(id))?;
        self.z_order.retain(|&node_id| node_id != id);

        let mut removed = Vec::new();
        self.edges.retain(|edge| {
            if edge.touches(id) {
                removed.push(edge.id);
                false
            } else {
                true
            }
        });
        log::debug!("Deleted node {} and {} incident edge(s)", id, removed.len());

        self.changes.extend(removed.into_iter().map(GraphChange::EdgeRemoved));
        self.changes.push(GraphChange::NodeRemoved(id));
        Ok(node)
    }

    /// Connect `source` to `target`, returning the new edge id.
    pub fn connect(
        &mut self,
        source: NodeId,
        source_handle: Option<&str>,
        target: NodeId,
        target_handle: Option<&str>,
    ) -> GraphResult<EdgeId> {
        self.check_connection(source, target)?;

        let edge = Edge {
            id: Uuid::new_v4(),
            source,
            target,
            source_handle: source_handle.map(str::to_string),
            target_handle: target_handle.map(str::to_string),
        };
        let id = edge.id;
        self.edges.push(edge);
        self.changes.push(GraphChange::EdgeAdded(id));
        log::debug!("Connected {} -> {} with edge {}", source, target, id);
        Ok(id)
    }

    /// Endpoints must exist and the connection policy must admit the pair.
    fn check_connection(&self, source: NodeId, target: NodeId) -> GraphResult<()> {
        for endpoint in [source, target] {
            if !self.nodes.contains_key(&endpoint) {
                return Err(GraphError::InvalidEndpoint(endpoint));
            }
        }
        if source == target && !self.policy.allow_self_loops {
            return Err(GraphError::SelfLoop(source));
        }
        if !self.policy.allow_parallel_edges
            && self.edges.iter().any(|e| e.source == source && e.target == target)
        {
            return Err(GraphError::DuplicateEdge { source_id: source, target_id: target });
        }
        Ok(())
    }

    pub(crate) fn insert_edge(&mut self, edge: Edge) -> GraphResult<()> {
        if self.edges.iter().any(|e| e.id == edge.id) {
            return Err(GraphError::DuplicateId(edge.id.to_string()));
        }
        self.check_connection(edge.source, edge.target)?;
        self.changes.push(GraphChange::EdgeAdded(edge.id));
        self.edges.push(edge);
        Ok(())
    }

    /// Delete a single edge.
    pub fn delete_edge(&mut self, id: EdgeId) -> GraphResult<Edge> {
        let index = self
            .edges
            .iter()
            .position(|e| e.id == id)
            .ok_or(GraphError::EdgeNotFound(id))?;
        let edge = self.edges.remove(index);
        self.changes.push(GraphChange::EdgeRemoved(id));
        Ok(edge)
    }

    /// Remove all nodes and edges.
    pub fn clear(&mut self) {
        self.changes.extend(self.edges.drain(..).map(|e| GraphChange::EdgeRemoved(e.id)));
        self.changes.extend(self.z_order.drain(..).map(GraphChange::NodeRemoved));
        self.nodes.clear();
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Nodes in z-order (back to front).
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.z_order.iter().filter_map(|id| self.nodes.get(id))
    }

    /// Edges in creation order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    /// Edges with `id` as either endpoint.
    pub fn edges_of(&self, id: NodeId) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(move |e| e.touches(id))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Raise a node to the top of the z-order.
    pub fn bring_to_front(&mut self, id: NodeId) {
        if self.z_order.last() == Some(&id) || !self.nodes.contains_key(&id) {
            return;
        }
        self.z_order.retain(|&node_id| node_id != id);
        self.z_order.push(id);
        self.changes.push(GraphChange::NodeRaised(id));
    }

    /// Topmost node whose footprint contains `point`.
    pub fn node_at(&self, point: Point, node_size: Size) -> Option<NodeId> {
        self.z_order
            .iter()
            .rev()
            .copied()
            .find(|id| {
                self.nodes
                    .get(id)
                    .is_some_and(|n| n.bounds(node_size).contains(point))
            })
    }

    /// Bounding box of all node footprints.
    pub fn bounds(&self, node_size: Size) -> Option<Rect> {
        self.nodes()
            .map(|n| n.bounds(node_size))
            .reduce(|acc, r| acc.union(r))
    }

    /// Replace the contents with `other`, keeping this graph's policy.
    ///
    /// Pending changes are kept, followed by removals for the old contents
    /// and then the changes queued on `other`.
    pub fn replace_with(&mut self, mut other: Graph) {
        self.clear();
        self.changes.append(&mut other.changes);
        self.nodes = other.nodes;
        self.z_order = other.z_order;
        self.edges = other.edges;
    }

    /// Drain pending change notifications.
    pub fn take_changes(&mut self) -> Vec<GraphChange> {
        std::mem::take(&mut self.changes)
    }
}
