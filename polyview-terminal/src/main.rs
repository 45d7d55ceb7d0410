/// Polyview Terminal - interactive cube viewer
///
/// Usage: polyview-terminal [config.toml]
///
/// Controls:
///   - W/S: Move forward/back
///   - A/D: Strafe left/right
///   - Q/E: Move up/down
///   - Arrow Keys / Left-drag: Look around
///   - Esc / Ctrl-C: Quit

use std::env;
use std::fs::File;
use std::io;
use std::path::Path;

use env_logger::{Env, Target};
use polyview_core::Scene;
use polyview_terminal::{TerminalApp, ViewerConfig};

fn init_logging(config: &ViewerConfig) -> io::Result<()> {
    // The alternate screen owns the terminal, so only log when there is a file
    let default_filter = if config.log_file.is_some() { "debug" } else { "off" };
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or(default_filter));
    if let Some(path) = &config.log_file {
        builder.target(Target::Pipe(Box::new(File::create(path)?)));
    }
    if let Err(e) = builder.try_init() {
        eprintln!("logger already initialized: {}", e);
    }
    Ok(())
}

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().collect();

    let config = match args.get(1) {
        Some(path) => ViewerConfig::load(Path::new(path))
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("Failed to load config: {}", e)))?,
        None => ViewerConfig::default(),
    };
    init_logging(&config)?;

    let scene = Scene::cube(config.render.cube_size)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("Failed to build scene: {}", e)))?;
    log::info!(
        "scene: {} vertices, {} faces",
        scene.vertices().len(),
        scene.faces().len()
    );

    // Run the terminal app
    let mut app = TerminalApp::new(scene, &config)?;
    app.run()?;

    println!("Thank you for using Polyview!");
    Ok(())
}
