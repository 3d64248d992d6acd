//! Connector shape.

use super::{ShapeId, ShapeTrait};
use crate::geometry::{self, arrowhead_triangle, hit_corridor, point_in_polygon};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which part of a connector a drag moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectorGrip {
    /// Only the start point.
    Start,
    /// Only the end point.
    End,
    /// Both endpoints.
    Whole,
}

/// A directed line from `start` to `end` with an arrowhead at `end`.
///
/// `source` and `target` are weak references to the nodes the endpoints
/// currently sit in, as of the last relation resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connector {
    pub(crate) id: ShapeId,
    /// Start point.
    pub start: Point,
    /// End point (where the arrowhead points).
    pub end: Point,
    /// Node containing the start point.
    #[serde(default)]
    pub source: Option<ShapeId>,
    /// Node containing the end point.
    #[serde(default)]
    pub target: Option<ShapeId>,
}

impl Connector {
    /// Create a new, unattached connector.
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            end,
            source: None,
            target: None,
        }
    }

    /// Reconstruct a connector with a specific ID (from a descriptor).
    pub(crate) fn reconstruct(
        id: ShapeId,
        start: Point,
        end: Point,
        source: Option<ShapeId>,
        target: Option<ShapeId>,
    ) -> Self {
        Self {
            id,
            start,
            end,
            source,
            target,
        }
    }

    /// Whether start and end coincide.
    pub fn is_degenerate(&self) -> bool {
        geometry::is_degenerate(self.start, self.end)
    }

    /// Whether either endpoint is linked to `node`.
    pub fn attaches_to(&self, node: ShapeId) -> bool {
        self.source == Some(node) || self.target == Some(node)
    }

    /// Invisible quadrilateral used for hit testing.
    pub fn corridor(&self, radius: f64) -> Option<[Point; 4]> {
        hit_corridor(self.start, self.end, radius)
    }

    /// Arrowhead path at the end point: `[wing, tip, wing]`.
    pub fn arrowhead(&self, back: f64, wing: f64) -> Option<[Point; 3]> {
        arrowhead_triangle(self.start, self.end, back, wing)
    }

    /// Decide which part a press at `point` grabs.
    ///
    /// The start point wins when both endpoints are within reach.
    pub fn grip_at(&self, point: Point, grab_radius_sq: f64) -> ConnectorGrip {
        if geometry::distance(point, self.start) <= grab_radius_sq {
            ConnectorGrip::Start
        } else if geometry::distance(point, self.end) <= grab_radius_sq {
            ConnectorGrip::End
        } else {
            ConnectorGrip::Whole
        }
    }

    /// Move the gripped part by `delta`.
    pub fn translate(&mut self, grip: ConnectorGrip, delta: Vec2) {
        match grip {
            ConnectorGrip::Start => self.start += delta,
            ConnectorGrip::End => self.end += delta,
            ConnectorGrip::Whole => {
                self.start += delta;
                self.end += delta;
            }
        }
    }
}

impl ShapeTrait for Connector {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        Rect::from_points(self.start, self.end)
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        match self.corridor(tolerance) {
            Some(quad) => point_in_polygon(point, &quad),
            // Zero-length connector: treat as a dot of radius `tolerance`.
            None => geometry::distance(point, self.start) <= tolerance * tolerance,
        }
    }
}
