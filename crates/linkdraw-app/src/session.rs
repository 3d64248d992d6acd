//! Replays a scene's pointer script through an interaction controller.

use crate::scene::Scene;
use anyhow::{Context, Result};
use kurbo::Size;
use linkdraw_core::{Diagram, InteractionController, InteractionOutcome, RelationChange, ShapeDescriptor};
use linkdraw_render::{SceneRecorder, ShapeRenderer, to_svg};
use std::cell::Cell;
use std::rc::Rc;

/// Output canvas settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppConfig {
    pub width: f64,
    pub height: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

/// Result of a replayed session.
#[derive(Debug, Clone)]
pub struct SessionReport {
    /// Shapes after the last event.
    pub shapes: Vec<ShapeDescriptor>,
    /// Number of completed drags.
    pub drags: usize,
    /// Every link change, including the initial resolution.
    pub changes: Vec<RelationChange>,
    /// The final frame as SVG.
    pub svg: String,
}

/// Build the diagram, draw it, and feed it every scripted event in order.
pub fn run(scene: Scene, app: &AppConfig) -> Result<SessionReport> {
    let Scene {
        config,
        shapes,
        script,
    } = scene;
    let diagram = Diagram::from_descriptors(shapes).context("Scene shapes are invalid")?;
    let renderer = ShapeRenderer::new(SceneRecorder::new(), config);

    let drags = Rc::new(Cell::new(0usize));
    let counter = drags.clone();
    let mut controller = InteractionController::new(diagram, renderer, config).with_result_callback(move |shapes| {
        counter.set(counter.get() + 1);
        log::info!("Drag {} finished with {} shapes", counter.get(), shapes.len());
    });

    let mut changes = controller.start();
    for event in script {
        if let InteractionOutcome::Released(released) = controller.handle(event) {
            for change in &released {
                log::info!(
                    "Connector {} relinked: {:?} -> {:?}, {:?} -> {:?}",
                    change.connector,
                    change.previous_source,
                    change.source,
                    change.previous_target,
                    change.target
                );
            }
            changes.extend(released);
        }
        controller.renderer_mut().surface_mut().compact();
    }

    let svg = to_svg(
        controller.renderer().surface().last_frame(),
        Size::new(app.width, app.height),
    );
    Ok(SessionReport {
        shapes: controller.diagram().descriptors(),
        drags: drags.get(),
        changes,
        svg,
    })
}
