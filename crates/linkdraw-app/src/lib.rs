//! linkdraw Application
//!
//! Headless editor shell: loads a scene, replays its pointer script through
//! the interaction controller and reports the resulting diagram.

mod scene;
mod session;

pub use scene::Scene;
pub use session::{AppConfig, SessionReport, run};
