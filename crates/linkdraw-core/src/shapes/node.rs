//! Node shape.

use super::{ShapeId, ShapeTrait};
use crate::geometry::point_in_rect_inclusive;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A rectangular diagram node with an optional centered label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub(crate) id: ShapeId,
    /// Top-left corner position.
    pub position: Point,
    /// Width of the node.
    pub width: f64,
    /// Height of the node.
    pub height: f64,
    /// Label drawn at the center.
    #[serde(default)]
    pub text: Option<String>,
}

impl Node {
    /// Create a new node.
    pub fn new(position: Point, width: f64, height: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            width,
            height,
            text: None,
        }
    }

    /// Reconstruct a node with a specific ID (from a descriptor).
    pub(crate) fn reconstruct(
        id: ShapeId,
        position: Point,
        width: f64,
        height: f64,
        text: Option<String>,
    ) -> Self {
        Self {
            id,
            position,
            width,
            height,
            text,
        }
    }

    /// Set the label.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Get the node as a kurbo Rect.
    pub fn as_rect(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + self.width,
            self.position.y + self.height,
        )
        .abs()
    }

    /// Center of the node, where the label is anchored.
    pub fn center(&self) -> Point {
        self.as_rect().center()
    }

    /// Whether `point` lies inside the node's bounds, edges included.
    pub fn contains(&self, point: Point) -> bool {
        point_in_rect_inclusive(point, self.as_rect())
    }
}

impl ShapeTrait for Node {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        self.as_rect()
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        point_in_rect_inclusive(point, self.as_rect().inflate(tolerance, tolerance))
    }
}
