//! Command-line entry point.

use anyhow::{Context, Result, bail};
use linkdraw_app::{AppConfig, Scene};
use std::path::Path;

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(scene_path) = args.next() else {
        bail!("usage: linkdraw <scene.json> [output.svg]");
    };
    let svg_path = args.next();

    log::info!("Starting linkdraw with scene {}", scene_path);
    let scene = Scene::load(Path::new(&scene_path))?;
    let report = linkdraw_app::run(scene, &AppConfig::default())?;
    log::info!(
        "Replayed {} drags, {} link changes",
        report.drags,
        report.changes.len()
    );

    if let Some(path) = svg_path {
        std::fs::write(&path, &report.svg).with_context(|| format!("Failed to write {path}"))?;
        log::info!("Wrote {}", path);
    }

    println!("{}", serde_json::to_string_pretty(&report.shapes)?);
    Ok(())
}
