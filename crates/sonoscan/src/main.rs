//! Headless scan builder.
//!
//! Usage: `sonoscan [options.json]`
//!
//! Builds the configured demo scan, extracts its cell mesh, and logs what a
//! renderer would upload.

use env_logger::Env;
use sonoscan::{ScanOptions, ScanScene, CELL_VERTEX_LAYOUT};

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    if let Err(err) = run() {
        log::error!("{err}");
        std::process::exit(1);
    }
}

fn run() -> sonoscan::Result<()> {
    let options = match std::env::args_os().nth(1) {
        Some(path) => ScanOptions::load(path)?,
        None => ScanOptions::default(),
    };
    log::info!(
        "dimension {}, {:?} deposition, splat radius {}",
        options.dimension,
        options.deposit,
        options.resolved_splat_radius()
    );

    let mut scene = ScanScene::with_demo(options)?;
    scene.tick();
    let lit = scene.grid().cells().iter().filter(|&&v| v > 0.0).count();
    let max_density = scene.grid().max_density();

    let mesh = scene.cell_mesh();
    log::info!(
        "cell mesh: {} quads, {} vertices, {} bytes at stride {}",
        mesh.num_quads(),
        mesh.num_vertices(),
        mesh.as_bytes().len(),
        CELL_VERTEX_LAYOUT.stride
    );
    let elapsed = scene.tick();
    log::info!("{lit} lit voxels, peak density {max_density:.3}, mesh built in {elapsed:.3}s");

    let uniforms = scene.frame_uniforms(16.0 / 9.0);
    log::debug!("frame uniforms: {uniforms:?}");
    log::debug!("wireframe: {:?}", scene.wireframe());

    Ok(())
}
