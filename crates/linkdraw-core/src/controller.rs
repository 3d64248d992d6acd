//! Pointer-driven interaction state machine.
//!
//! The controller owns the diagram for the length of an editing session. Each
//! pointer event runs one synchronous transition:
//!
//! - press: ask the renderer what lies under the pointer, make it active and
//!   snapshot it (plus, for a node, every connector linked to it);
//! - move: re-apply the drag delta to the snapshots and redraw;
//! - release: resolve relations, hand the shapes to the result callback, and
//!   redraw once more.

use crate::config::EditorConfig;
use crate::diagram::Diagram;
use crate::input::PointerEvent;
use crate::relation::{self, RelationChange};
use crate::shapes::{ConnectorGrip, Shape, ShapeId};
use kurbo::{Point, Vec2};
use std::collections::HashMap;

/// Drawing backend seen by the controller.
pub trait SceneRenderer {
    /// Redraw every shape, highlighting `active`.
    ///
    /// When `query` is given, also report the last shape in draw order whose
    /// hit area contains it.
    fn render(&mut self, shapes: &[Shape], active: Option<ShapeId>, query: Option<Point>) -> Option<ShapeId>;
}

/// Callback receiving the shapes after every completed drag.
pub type ResultCallback = Box<dyn FnMut(&[Shape])>;

/// State of an in-progress drag.
#[derive(Debug, Clone)]
pub struct DragState {
    /// Pointer position at press time.
    pub start_point: Point,
    /// Pre-drag copies of every shape the drag moves.
    pub original_shapes: HashMap<ShapeId, Shape>,
    /// Part of the active connector being dragged (None for nodes).
    pub grip: Option<ConnectorGrip>,
}

impl DragState {
    /// Get the drag delta for a pointer at `current`.
    pub fn delta(&self, current: Point) -> Vec2 {
        current - self.start_point
    }
}

/// Interaction state.
#[derive(Debug, Clone, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Dragging(DragState),
}

/// What a single pointer event did.
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionOutcome {
    /// Press; carries the shape that became active.
    Pressed(Option<ShapeId>),
    /// Move; whether any shape moved.
    Moved(bool),
    /// Release; carries the links changed by relation resolution.
    Released(Vec<RelationChange>),
}

/// Editor session: diagram, renderer, active shape and drag state.
pub struct InteractionController<R: SceneRenderer> {
    diagram: Diagram,
    renderer: R,
    config: EditorConfig,
    active: Option<ShapeId>,
    state: InteractionState,
    on_result: Option<ResultCallback>,
}

impl<R: SceneRenderer> InteractionController<R> {
    /// Create a controller. Nothing is drawn until [`start`](Self::start).
    pub fn new(diagram: Diagram, renderer: R, config: EditorConfig) -> Self {
        Self {
            diagram,
            renderer,
            config,
            active: None,
            state: InteractionState::Idle,
            on_result: None,
        }
    }

    /// Set the callback invoked after each completed drag.
    pub fn with_result_callback(mut self, callback: impl FnMut(&[Shape]) + 'static) -> Self {
        self.on_result = Some(Box::new(callback));
        self
    }

    /// Resolve initial relations and draw the diagram.
    pub fn start(&mut self) -> Vec<RelationChange> {
        let changes = relation::resolve(self.diagram.shapes_mut());
        log::debug!(
            "Editor started with {} shapes, {} links resolved",
            self.diagram.len(),
            changes.len()
        );
        self.redraw();
        changes
    }

    /// Dispatch a pointer event to its transition.
    pub fn handle(&mut self, event: PointerEvent) -> InteractionOutcome {
        match event {
            PointerEvent::Down { position } => InteractionOutcome::Pressed(self.on_pointer_down(position)),
            PointerEvent::Move { position } => InteractionOutcome::Moved(self.on_pointer_move(position)),
            PointerEvent::Up { position } => InteractionOutcome::Released(self.on_pointer_up(position)),
        }
    }

    /// Idle → Dragging. Returns the shape under the pointer, now active.
    pub fn on_pointer_down(&mut self, position: Point) -> Option<ShapeId> {
        if matches!(self.state, InteractionState::Dragging(_)) {
            log::debug!("Pointer down during a drag; restarting the drag");
        }

        let hit = self
            .renderer
            .render(self.diagram.shapes(), self.active, Some(position));
        self.active = hit;

        let mut original_shapes = HashMap::new();
        let mut grip = None;
        if let Some(shape) = hit.and_then(|id| self.diagram.get(id)) {
            match shape {
                Shape::Node(node) => {
                    for id in self.diagram.connectors_attached_to(node.id) {
                        if let Some(connector) = self.diagram.get(id) {
                            original_shapes.insert(id, connector.clone());
                        }
                    }
                }
                Shape::Connector(connector) => {
                    grip = Some(connector.grip_at(position, self.config.grab_radius_sq));
                }
            }
            original_shapes.insert(shape.id(), shape.clone());
        }

        log::debug!(
            "Pointer down at ({}, {}): active {:?}, {} shapes snapshotted",
            position.x,
            position.y,
            hit,
            original_shapes.len()
        );
        self.state = InteractionState::Dragging(DragState {
            start_point: position,
            original_shapes,
            grip,
        });
        hit
    }

    /// Dragging → Dragging. Returns whether anything moved.
    pub fn on_pointer_move(&mut self, position: Point) -> bool {
        let InteractionState::Dragging(drag) = &self.state else {
            log::trace!("Pointer move while idle, ignored");
            return false;
        };
        let Some(active) = self.active else {
            log::trace!("Pointer move without an active shape, ignored");
            return false;
        };
        let Some(original) = drag.original_shapes.get(&active) else {
            return false;
        };

        let delta = drag.delta(position);
        let mut updates: Vec<Shape> = Vec::with_capacity(drag.original_shapes.len());
        match original {
            Shape::Node(node) => {
                let mut moved = node.clone();
                moved.position = node.position + delta;
                updates.push(moved.into());

                for (id, snapshot) in &drag.original_shapes {
                    if *id == active {
                        continue;
                    }
                    if let Shape::Connector(connector) = snapshot {
                        let mut moved = connector.clone();
                        if connector.source == Some(active) {
                            moved.start = connector.start + delta;
                        }
                        if connector.target == Some(active) {
                            moved.end = connector.end + delta;
                        }
                        updates.push(moved.into());
                    }
                }
            }
            Shape::Connector(connector) => {
                let mut moved = connector.clone();
                moved.translate(drag.grip.unwrap_or(ConnectorGrip::Whole), delta);
                updates.push(moved.into());
            }
        }

        log::trace!("Drag delta ({}, {}) applied to {} shapes", delta.x, delta.y, updates.len());
        for update in updates {
            if let Some(slot) = self.diagram.get_mut(update.id()) {
                *slot = update;
            }
        }
        self.redraw();
        true
    }

    /// Dragging → Idle. Returns the relation changes; empty when idle.
    pub fn on_pointer_up(&mut self, position: Point) -> Vec<RelationChange> {
        if !matches!(self.state, InteractionState::Dragging(_)) {
            log::trace!("Pointer up while idle, ignored");
            return Vec::new();
        }
        self.state = InteractionState::Idle;

        let changes = relation::resolve(self.diagram.shapes_mut());
        log::debug!(
            "Pointer up at ({}, {}): {:?} released, {} links changed",
            position.x,
            position.y,
            self.active,
            changes.len()
        );

        if let Some(callback) = self.on_result.as_mut() {
            callback(self.diagram.shapes());
        }

        self.active = None;
        self.redraw();
        changes
    }

    fn redraw(&mut self) {
        self.renderer.render(self.diagram.shapes(), self.active, None);
    }

    /// The diagram being edited.
    pub fn diagram(&self) -> &Diagram {
        &self.diagram
    }

    /// Currently active shape.
    pub fn active(&self) -> Option<ShapeId> {
        self.active
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, InteractionState::Dragging(_))
    }

    /// Current interaction state.
    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }
}
