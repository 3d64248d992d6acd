//! The ordered shape collection an editor session owns.

use crate::config::EditorConfig;
use crate::shapes::{Shape, ShapeDescriptor, ShapeId, draw_order};
use kurbo::Point;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Diagram construction errors.
#[derive(Debug, Error)]
pub enum DiagramError {
    #[error("Duplicate shape id: {0}")]
    DuplicateId(ShapeId),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for diagram operations.
pub type DiagramResult<T> = Result<T, DiagramError>;

/// Shapes in caller-supplied order, with an id index for link lookups.
///
/// Order is significant: within each kind it is the draw order, and the
/// relation resolver and hit testing break ties in favour of later shapes.
#[derive(Debug, Clone, Default)]
pub struct Diagram {
    shapes: Vec<Shape>,
    index: HashMap<ShapeId, usize>,
}

impl Diagram {
    /// Build a diagram from shapes.
    ///
    /// Connector links that do not name a node in the same collection are dropped.
    pub fn new(mut shapes: Vec<Shape>) -> DiagramResult<Self> {
        let mut index = HashMap::with_capacity(shapes.len());
        for (i, shape) in shapes.iter().enumerate() {
            if index.insert(shape.id(), i).is_some() {
                return Err(DiagramError::DuplicateId(shape.id()));
            }
        }

        let node_ids: HashSet<ShapeId> = shapes
            .iter()
            .filter_map(|s| s.as_node().map(|n| n.id))
            .collect();
        for connector in shapes.iter_mut().filter_map(Shape::as_connector_mut) {
            let connector_id = connector.id;
            for link in [&mut connector.source, &mut connector.target] {
                if let Some(id) = *link {
                    if !node_ids.contains(&id) {
                        log::warn!("Connector {} links to unknown node {}, dropping link", connector_id, id);
                        *link = None;
                    }
                }
            }
        }

        Ok(Self { shapes, index })
    }

    /// Build a diagram from flat descriptors.
    pub fn from_descriptors(descriptors: Vec<ShapeDescriptor>) -> DiagramResult<Self> {
        Self::new(descriptors.into_iter().map(Shape::from).collect())
    }

    /// Parse a JSON array of shape descriptors.
    pub fn from_json(json: &str) -> DiagramResult<Self> {
        let descriptors: Vec<ShapeDescriptor> =
            serde_json::from_str(json).map_err(|e| DiagramError::Serialization(e.to_string()))?;
        Self::from_descriptors(descriptors)
    }

    /// Serialize the diagram as a JSON array of shape descriptors.
    pub fn to_json(&self) -> DiagramResult<String> {
        serde_json::to_string_pretty(&self.descriptors())
            .map_err(|e| DiagramError::Serialization(e.to_string()))
    }

    /// Flat descriptors in collection order.
    pub fn descriptors(&self) -> Vec<ShapeDescriptor> {
        self.shapes.iter().map(ShapeDescriptor::from).collect()
    }

    /// All shapes in collection order.
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Mutable access to the shapes for in-place geometry and link updates.
    ///
    /// Callers must not replace a shape with one of a different id, or the
    /// index goes stale.
    pub(crate) fn shapes_mut(&mut self) -> &mut [Shape] {
        &mut self.shapes
    }

    /// Get a shape by ID.
    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.index.get(&id).map(|&i| &self.shapes[i])
    }

    /// Get a mutable reference to a shape by ID. The same id rule as
    /// [`shapes_mut`](Self::shapes_mut) applies.
    pub(crate) fn get_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.index.get(&id).map(|&i| &mut self.shapes[i])
    }

    /// Connectors with an endpoint linked to `node`, in collection order.
    pub fn connectors_attached_to(&self, node: ShapeId) -> Vec<ShapeId> {
        self.shapes
            .iter()
            .filter_map(Shape::as_connector)
            .filter(|c| c.attaches_to(node))
            .map(|c| c.id)
            .collect()
    }

    /// Topmost shape under `point`; see [`topmost_hit`].
    pub fn hit_test(&self, point: Point, config: &EditorConfig) -> Option<ShapeId> {
        topmost_hit(&self.shapes, point, config)
    }

    /// Check if the diagram is empty.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Get the number of shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }
}

/// Id of the last shape in [`draw_order`] whose hit area contains `point`.
///
/// Later-drawn shapes win, so connectors beat the nodes beneath them and a
/// node later in the collection beats an earlier overlapping one.
pub fn topmost_hit(shapes: &[Shape], point: Point, config: &EditorConfig) -> Option<ShapeId> {
    draw_order(shapes)
        .filter(|s| s.hit_test(point, config.hit_tolerance(s.kind())))
        .last()
        .map(Shape::id)
}
