//! linkdraw Render Library
//!
//! Draws linkdraw diagrams onto any [`DrawingSurface`]. [`SceneRecorder`] is an
//! in-memory surface whose output can be exported with [`to_svg`].

mod recorder;
mod renderer;
mod surface;
mod svg;

pub use recorder::{DrawCommand, SceneRecorder};
pub use renderer::{RenderStyle, ShapeRenderer};
pub use surface::DrawingSurface;
pub use svg::to_svg;
