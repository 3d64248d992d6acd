//! Editor tuning constants.

use crate::shapes::ShapeKind;
use serde::{Deserialize, Serialize};

/// Squared grab radius around connector endpoints (about 16px).
pub const DEFAULT_GRAB_RADIUS_SQ: f64 = 255.0;
/// Distance from the arrow tip back to the wing base.
pub const DEFAULT_ARROW_BACK_OFFSET: f64 = 10.0;
/// Distance from the wing base out to each wing tip.
pub const DEFAULT_ARROW_WING_OFFSET: f64 = 5.0;
/// Half-width of the invisible corridor that makes connectors clickable.
pub const DEFAULT_CORRIDOR_RADIUS: f64 = 5.0;
/// Margin between a node's bounds and its drawn outline.
pub const DEFAULT_NODE_MARGIN: f64 = 2.0;

/// Geometry constants shared by hit testing, dragging and rendering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Pointer-down within this squared distance of a connector endpoint drags only that endpoint.
    pub grab_radius_sq: f64,
    /// Arrowhead back offset along the connector.
    pub arrow_back_offset: f64,
    /// Arrowhead wing offset along the perpendicular.
    pub arrow_wing_offset: f64,
    /// Connector hit corridor half-width.
    pub corridor_radius: f64,
    /// Node outline margin; also the node hit tolerance.
    pub node_margin: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            grab_radius_sq: DEFAULT_GRAB_RADIUS_SQ,
            arrow_back_offset: DEFAULT_ARROW_BACK_OFFSET,
            arrow_wing_offset: DEFAULT_ARROW_WING_OFFSET,
            corridor_radius: DEFAULT_CORRIDOR_RADIUS,
            node_margin: DEFAULT_NODE_MARGIN,
        }
    }
}

impl EditorConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the grab radius, given as a plain (not squared) distance.
    pub fn with_grab_radius(mut self, radius: f64) -> Self {
        self.grab_radius_sq = radius * radius;
        self
    }

    /// Set the arrowhead offsets.
    pub fn with_arrowhead(mut self, back: f64, wing: f64) -> Self {
        self.arrow_back_offset = back;
        self.arrow_wing_offset = wing;
        self
    }

    /// Set the connector corridor half-width.
    pub fn with_corridor_radius(mut self, radius: f64) -> Self {
        self.corridor_radius = radius;
        self
    }

    /// Set the node outline margin.
    pub fn with_node_margin(mut self, margin: f64) -> Self {
        self.node_margin = margin;
        self
    }

    /// Hit tolerance for a shape of the given kind.
    pub fn hit_tolerance(&self, kind: ShapeKind) -> f64 {
        match kind {
            ShapeKind::Node => self.node_margin,
            ShapeKind::Connector => self.corridor_radius,
        }
    }
}
