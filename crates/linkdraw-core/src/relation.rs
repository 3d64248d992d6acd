//! Relation resolution: which node each connector endpoint sits in.

use crate::shapes::{Shape, ShapeId};
use kurbo::Rect;

/// A connector whose source or target changed during a resolve pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationChange {
    pub connector: ShapeId,
    pub previous_source: Option<ShapeId>,
    pub previous_target: Option<ShapeId>,
    pub source: Option<ShapeId>,
    pub target: Option<ShapeId>,
}

/// Recompute `source` and `target` of every connector from geometry alone.
///
/// An endpoint links to a node when it lies inside the node's bounds, edges
/// included. When several nodes contain the same endpoint the last one in
/// collection order wins. Endpoints inside no node are unlinked.
///
/// Returns the connectors whose links changed.
pub fn resolve(shapes: &mut [Shape]) -> Vec<RelationChange> {
    let nodes: Vec<(ShapeId, Rect)> = shapes
        .iter()
        .filter_map(Shape::as_node)
        .map(|n| (n.id, n.as_rect()))
        .collect();

    let mut changes = Vec::new();
    for connector in shapes.iter_mut().filter_map(Shape::as_connector_mut) {
        let mut source = None;
        let mut target = None;
        for &(id, rect) in &nodes {
            if crate::geometry::point_in_rect_inclusive(connector.start, rect) {
                source = Some(id);
            }
            if crate::geometry::point_in_rect_inclusive(connector.end, rect) {
                target = Some(id);
            }
        }

        if source != connector.source || target != connector.target {
            log::debug!(
                "Connector {} relinked: {:?} -> {:?}",
                connector.id,
                (connector.source, connector.target),
                (source, target)
            );
            changes.push(RelationChange {
                connector: connector.id,
                previous_source: connector.source,
                previous_target: connector.target,
                source,
                target,
            });
            connector.source = source;
            connector.target = target;
        }
    }
    changes
}
