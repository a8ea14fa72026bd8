//! JSON snapshot of a graph, shaped for the diagram renderer and for
//! downstream graph-database import.

use crate::entity::EntityType;
use crate::error::{GraphError, GraphResult};
use crate::graph::{ConnectPolicy, Edge, EdgeId, Graph, Node, NodeId};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Rendering attributes stamped on every exported edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeStyle {
    pub kind: String,
    pub animated: bool,
}

impl Default for EdgeStyle {
    fn default() -> Self {
        Self {
            kind: "smoothstep".to_string(),
            animated: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExportPosition {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportNodeData {
    pub name: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportNode {
    pub id: NodeId,
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    pub position: ExportPosition,
    pub data: ExportNodeData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportEdge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    #[serde(default)]
    pub source_handle: Option<String>,
    #[serde(default)]
    pub target_handle: Option<String>,
    #[serde(rename = "type", default)]
    pub edge_type: Option<String>,
    #[serde(default)]
    pub animated: bool,
}

/// `{ nodes, edges }` snapshot. Nodes are in z-order, edges in creation order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GraphExport {
    pub nodes: Vec<ExportNode>,
    pub edges: Vec<ExportEdge>,
}

impl From<&Node> for ExportNode {
    fn from(node: &Node) -> Self {
        Self {
            id: node.id(),
            entity_type: node.entity_type(),
            position: ExportPosition {
                x: node.position.x,
                y: node.position.y,
            },
            data: ExportNodeData {
                name: node.name.clone(),
                label: node.entity_type().label().to_string(),
            },
        }
    }
}

impl ExportEdge {
    fn from_edge(edge: &Edge, style: &EdgeStyle) -> Self {
        Self {
            id: edge.id(),
            source: edge.source(),
            target: edge.target(),
            source_handle: edge.source_handle().map(str::to_string),
            target_handle: edge.target_handle().map(str::to_string),
            edge_type: Some(style.kind.clone()),
            animated: style.animated,
        }
    }
}

impl GraphExport {
    pub fn to_json(&self, pretty: bool) -> GraphResult<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    pub fn from_json(json: &str) -> GraphResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Graph {
    /// Deep copy of all nodes and edges in export form.
    pub fn to_export(&self, style: &EdgeStyle) -> GraphExport {
        GraphExport {
            nodes: self.nodes().map(ExportNode::from).collect(),
            edges: self.edges().map(|e| ExportEdge::from_edge(e, style)).collect(),
        }
    }

    /// Rebuild a graph from an export snapshot.
    ///
    /// Ids are kept. Duplicate ids, non-finite positions, edges whose
    /// endpoints are missing and edges `policy` forbids are rejected. Names
    /// are trimmed; a blank name falls back to the type's initial name.
    /// Rendering-only fields (`label`, edge `type`, `animated`) are ignored.
    pub fn from_export(export: &GraphExport, policy: ConnectPolicy) -> GraphResult<Self> {
        let mut graph = Graph::with_policy(policy);
        for node in &export.nodes {
            let position = Point::new(node.position.x, node.position.y);
            if !position.is_finite() {
                return Err(GraphError::NonFinitePosition {
                    x: position.x,
                    y: position.y,
                });
            }
            let name = match node.data.name.trim() {
                "" => node.entity_type.info().initial_name.to_string(),
                trimmed => trimmed.to_string(),
            };
            graph.insert_node(Node::restore(node.id, node.entity_type, name, position))?;
        }
        for edge in &export.edges {
            graph.insert_edge(Edge::restore(
                edge.id,
                edge.source,
                edge.source_handle.clone(),
                edge.target,
                edge.target_handle.clone(),
            ))?;
        }
        log::debug!(
            "Imported graph with {} node(s) and {} edge(s)",
            graph.node_count(),
            graph.edge_count()
        );
        Ok(graph)
    }

    /// Parse an export JSON document into a graph.
    pub fn from_json(json: &str, policy: ConnectPolicy) -> GraphResult<Self> {
        Self::from_export(&GraphExport::from_json(json)?, policy)
    }
}
