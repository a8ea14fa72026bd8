//! Editor configuration.

use crate::error::{GraphError, GraphResult};
use kurbo::{Size, Vec2};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default on-canvas footprint of a node.
pub const DEFAULT_NODE_SIZE: Size = Size::new(180.0, 60.0);

/// Offset subtracted from drop positions in basic mode.
pub const DEFAULT_DROP_CENTERING_OFFSET: f64 = 30.0;

/// How pointer positions are mapped into canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformMode {
    /// Subtract the canvas origin only; pan and zoom are ignored.
    #[default]
    Basic,
    /// Invert the camera's pan/zoom and center dropped nodes on the pointer.
    ViewportAware,
}

/// Tunable behaviour of an editor session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub transform_mode: TransformMode,
    /// Centering offset applied to drops in [`TransformMode::Basic`].
    pub drop_centering_offset: f64,
    /// Default node footprint, used for hit testing and viewport-aware drops.
    pub node_size: Size,
    /// Clamp transformed positions to non-negative coordinates.
    pub clamp_non_negative: bool,
    pub allow_self_loops: bool,
    pub allow_parallel_edges: bool,
    /// Edge `type` written to the export.
    pub edge_style: String,
    pub animated_edges: bool,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            transform_mode: TransformMode::Basic,
            drop_centering_offset: DEFAULT_DROP_CENTERING_OFFSET,
            node_size: DEFAULT_NODE_SIZE,
            clamp_non_negative: true,
            allow_self_loops: true,
            allow_parallel_edges: true,
            edge_style: "smoothstep".to_string(),
            animated_edges: true,
            min_zoom: 0.1,
            max_zoom: 10.0,
        }
    }
}

impl EditorConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> GraphResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    pub fn load(path: &Path) -> GraphResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| GraphError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_json(&json)
    }

    /// Anchor subtracted from a drop position so the new node sits under the pointer.
    pub fn drop_anchor(&self) -> Vec2 {
        match self.transform_mode {
            TransformMode::Basic => Vec2::new(self.drop_centering_offset, self.drop_centering_offset),
            TransformMode::ViewportAware => {
                Vec2::new(self.node_size.width / 2.0, self.node_size.height / 2.0)
            }
        }
    }

    fn validate(&self) -> GraphResult<()> {
        if !(self.min_zoom > 0.0 && self.min_zoom <= self.max_zoom) {
            return Err(GraphError::Serialization(format!(
                "invalid zoom range {}..{}",
                self.min_zoom, self.max_zoom
            )));
        }
        if !(self.node_size.width > 0.0 && self.node_size.height > 0.0) {
            return Err(GraphError::Serialization("node_size must be positive".to_string()));
        }
        if !self.drop_centering_offset.is_finite() {
            return Err(GraphError::Serialization(
                "drop_centering_offset must be finite".to_string(),
            ));
        }
        Ok(())
    }
}
