/// Example: Render one frame of the cube to stdout as plain text
///
/// Usage: cargo run --example snapshot -- [columns] [rows]

use std::env;
use std::io;

use polyview_core::{Camera, CameraPose, RenderStyle, Scene};
use polyview_terminal::AsciiSurface;

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().collect();
    let parse = |index: usize, default: usize| {
        args.get(index)
            .map(|value| {
                value
                    .parse()
                    .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, format!("Bad size {:?}: {}", value, e)))
            })
            .unwrap_or(Ok(default))
    };
    let columns = parse(1, 80)?;
    let rows = parse(2, 30)?;

    let scene = Scene::cube(1.0)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("Failed to build scene: {}", e)))?;
    let mut surface = AsciiSurface::new(columns, rows, 2.0);
    let camera = Camera::from_pose(&CameraPose::default(), surface.viewport());

    let stats = scene.draw(&camera, &mut surface, &RenderStyle::default());
    println!("{}", surface.to_text());
    println!("{} faces drawn, {} culled", stats.drawn, stats.culled);
    Ok(())
}
