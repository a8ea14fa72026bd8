//! Entity registry: the closed set of node types and their display metadata.

use crate::error::GraphError;
use peniko::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of business entity a node represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Company,
    Employee,
    Supplier,
}

/// Display metadata for an entity type.
#[derive(Debug, Clone, Copy)]
pub struct EntityInfo {
    /// Icon name understood by the rendering layer.
    pub icon: &'static str,
    /// Accent color for the node.
    pub color: Color,
    /// Name given to freshly dropped nodes.
    pub initial_name: &'static str,
    /// Palette tooltip.
    pub description: &'static str,
}

impl EntityType {
    /// All entity types, in palette order.
    pub const ALL: [EntityType; 3] = [EntityType::Company, EntityType::Employee, EntityType::Supplier];

    /// Human readable label.
    pub fn label(&self) -> &'static str {
        match self {
            EntityType::Company => "Company",
            EntityType::Employee => "Employee",
            EntityType::Supplier => "Supplier",
        }
    }

    /// Wire tag used in drag payloads and the export format.
    pub fn tag(&self) -> &'static str {
        match self {
            EntityType::Company => "company",
            EntityType::Employee => "employee",
            EntityType::Supplier => "supplier",
        }
    }

    /// Look up the display metadata for this type.
    pub fn info(&self) -> EntityInfo {
        match self {
            EntityType::Company => EntityInfo {
                icon: "building",
                color: Color::from_rgba8(59, 130, 246, 255),
                initial_name: "New Company",
                description: "An organization that employs people and buys from suppliers",
            },
            EntityType::Employee => EntityInfo {
                icon: "user",
                color: Color::from_rgba8(34, 197, 94, 255),
                initial_name: "New Employee",
                description: "A person working for a company",
            },
            EntityType::Supplier => EntityInfo {
                icon: "truck",
                color: Color::from_rgba8(249, 115, 22, 255),
                initial_name: "New Supplier",
                description: "A vendor supplying goods or services to a company",
            },
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EntityType {
    type Err = GraphError;

    /// Parse a type tag. Matching ignores case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        EntityType::ALL
            .into_iter()
            .find(|ty| ty.tag().eq_ignore_ascii_case(tag))
            .ok_or_else(|| GraphError::UnknownEntityType(s.to_string()))
    }
}

/// Resolve a type tag to its entity type and metadata.
pub fn lookup(tag: &str) -> Result<(EntityType, EntityInfo), GraphError> {
    let ty: EntityType = tag.parse()?;
    Ok((ty, ty.info()))
}
