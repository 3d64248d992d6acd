//! Pointer events delivered to the interaction controller.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Pointer event in drawing-surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PointerEvent {
    Down { position: Point },
    Move { position: Point },
    Up { position: Point },
}

impl PointerEvent {
    pub fn down(x: f64, y: f64) -> Self {
        PointerEvent::Down {
            position: Point::new(x, y),
        }
    }

    pub fn moved(x: f64, y: f64) -> Self {
        PointerEvent::Move {
            position: Point::new(x, y),
        }
    }

    pub fn up(x: f64, y: f64) -> Self {
        PointerEvent::Up {
            position: Point::new(x, y),
        }
    }

    /// Position carried by the event.
    pub fn position(&self) -> Point {
        match self {
            PointerEvent::Down { position }
            | PointerEvent::Move { position }
            | PointerEvent::Up { position } => *position,
        }
    }
}

/// Build the event sequence of a simple press-drag-release gesture.
pub fn drag_gesture(from: Point, to: Point, steps: usize) -> Vec<PointerEvent> {
    let steps = steps.max(1);
    let mut events = Vec::with_capacity(steps + 2);
    events.push(PointerEvent::Down { position: from });
    for i in 1..=steps {
        let t = i as f64 / steps as f64;
        events.push(PointerEvent::Move {
            position: from.lerp(to, t),
        });
    }
    events.push(PointerEvent::Up { position: to });
    events
}
