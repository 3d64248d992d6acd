//! linkdraw Core Library
//!
//! Platform-agnostic diagram model, geometry and pointer interaction for the
//! linkdraw editor. Drawing is delegated to a [`SceneRenderer`].

pub mod config;
pub mod controller;
pub mod diagram;
pub mod geometry;
pub mod input;
pub mod relation;
pub mod shapes;

pub use config::EditorConfig;
pub use controller::{InteractionController, InteractionOutcome, InteractionState, SceneRenderer};
pub use diagram::{Diagram, DiagramError, DiagramResult};
pub use input::PointerEvent;
pub use relation::RelationChange;
pub use shapes::{Connector, Node, Shape, ShapeDescriptor, ShapeId, ShapeKind};
