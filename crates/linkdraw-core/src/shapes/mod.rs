//! Shape definitions for the diagram.

mod connector;
mod node;

pub use connector::{Connector, ConnectorGrip};
pub use node::Node;

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// Common trait for all shapes.
pub trait ShapeTrait {
    /// Get the unique identifier.
    fn id(&self) -> ShapeId;

    /// Get the bounding box.
    fn bounds(&self) -> Rect;

    /// Check if a point hits this shape.
    fn hit_test(&self, point: Point, tolerance: f64) -> bool;
}

/// Variant tag of a [`Shape`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Node,
    Connector,
}

/// Enum wrapper for all shape types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Node(Node),
    Connector(Connector),
}

impl Shape {
    pub fn id(&self) -> ShapeId {
        match self {
            Shape::Node(s) => s.id(),
            Shape::Connector(s) => s.id(),
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Node(_) => ShapeKind::Node,
            Shape::Connector(_) => ShapeKind::Connector,
        }
    }

    pub fn bounds(&self) -> Rect {
        match self {
            Shape::Node(s) => s.bounds(),
            Shape::Connector(s) => s.bounds(),
        }
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        match self {
            Shape::Node(s) => s.hit_test(point, tolerance),
            Shape::Connector(s) => s.hit_test(point, tolerance),
        }
    }

    pub fn is_connector(&self) -> bool {
        matches!(self, Shape::Connector(_))
    }

    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Shape::Node(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_node_mut(&mut self) -> Option<&mut Node> {
        match self {
            Shape::Node(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_connector(&self) -> Option<&Connector> {
        match self {
            Shape::Connector(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_connector_mut(&mut self) -> Option<&mut Connector> {
        match self {
            Shape::Connector(c) => Some(c),
            _ => None,
        }
    }
}

impl From<Node> for Shape {
    fn from(node: Node) -> Self {
        Shape::Node(node)
    }
}

impl From<Connector> for Shape {
    fn from(connector: Connector) -> Self {
        Shape::Connector(connector)
    }
}

/// Shapes in draw order: every node, then every connector, each group in
/// collection order.
///
/// Connectors are drawn above nodes, and hit testing picks the last match in
/// this order, so a connector wins over the node underneath it.
pub fn draw_order(shapes: &[Shape]) -> impl Iterator<Item = &Shape> {
    shapes
        .iter()
        .filter(|s| !s.is_connector())
        .chain(shapes.iter().filter(|s| s.is_connector()))
}

/// Flat, serializable description of a shape, as supplied by callers.
///
/// Missing coordinates default to 0, which may produce zero-size shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShapeDescriptor {
    Node {
        id: ShapeId,
        #[serde(default)]
        x: f64,
        #[serde(default)]
        y: f64,
        #[serde(default)]
        width: f64,
        #[serde(default)]
        height: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text: Option<String>,
    },
    Connector {
        id: ShapeId,
        #[serde(default)]
        x1: f64,
        #[serde(default)]
        y1: f64,
        #[serde(default)]
        x2: f64,
        #[serde(default)]
        y2: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        source_id: Option<ShapeId>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target_id: Option<ShapeId>,
    },
}

impl ShapeDescriptor {
    pub fn id(&self) -> ShapeId {
        match self {
            ShapeDescriptor::Node { id, .. } | ShapeDescriptor::Connector { id, .. } => *id,
        }
    }
}

impl From<ShapeDescriptor> for Shape {
    fn from(descriptor: ShapeDescriptor) -> Self {
        match descriptor {
            ShapeDescriptor::Node {
                id,
                x,
                y,
                width,
                height,
                text,
            } => Shape::Node(Node::reconstruct(id, Point::new(x, y), width, height, text)),
            ShapeDescriptor::Connector {
                id,
                x1,
                y1,
                x2,
                y2,
                source_id,
                target_id,
            } => Shape::Connector(Connector::reconstruct(
                id,
                Point::new(x1, y1),
                Point::new(x2, y2),
                source_id,
                target_id,
            )),
        }
    }
}

impl From<&Shape> for ShapeDescriptor {
    fn from(shape: &Shape) -> Self {
        match shape {
            Shape::Node(n) => ShapeDescriptor::Node {
                id: n.id,
                x: n.position.x,
                y: n.position.y,
                width: n.width,
                height: n.height,
                text: n.text.clone(),
            },
            Shape::Connector(c) => ShapeDescriptor::Connector {
                id: c.id,
                x1: c.start.x,
                y1: c.start.y,
                x2: c.end.x,
                y2: c.end.y,
                source_id: c.source,
                target_id: c.target,
            },
        }
    }
}
