//! Image rasterizer binary — classifies a reference image into a voxel grid
//! and exports the labeled voxels.
//!
//! Usage: cargo run --release --bin rasterize -- --image <PNG> [OPTIONS]
//!
//! Options:
//!   --image <PATH>      Reference image (required)
//!   --out <PATH>        Output CSV path (default: voxels.csv)
//!   --size <X,Y,Z>      Active grid extent (default: 32,10,32)
//!   --max-size <X,Y,Z>  Backing capacity (default: same as --size)
//!   --params <PATH>     StructureParams JSON file (default: built-in defaults)
//!   --layer-png <PATH>  Also render the floor slice to a PNG

use std::path::PathBuf;
use std::process::ExitCode;

use voxsketch::config::StructureParams;
use voxsketch::core::types::{IVec3, Result};
use voxsketch::export;
use voxsketch::grid::{VoxelGrid, VoxelState};

fn main() -> ExitCode {
    voxsketch::core::logging::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let Some(image_path) = parse_str_arg(&args, "--image") else {
        eprintln!("usage: rasterize --image <PNG> [--out <CSV>] [--size X,Y,Z] [--params <JSON>]");
        return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, "--image is required").into());
    };
    let out = parse_str_arg(&args, "--out").unwrap_or_else(|| "voxels.csv".to_string());
    let size = parse_ivec3_arg(&args, "--size").unwrap_or(IVec3::new(32, 10, 32));
    let max_size = parse_ivec3_arg(&args, "--max-size").unwrap_or(size);

    let params = match parse_str_arg(&args, "--params") {
        Some(path) => StructureParams::from_json_file(&PathBuf::from(path))?,
        None => StructureParams::default(),
    };

    let image = image::open(&image_path)?.to_rgba8();
    log::info!("loaded {image_path} ({}x{})", image.width(), image.height());

    let mut grid = VoxelGrid::new(size, max_size);
    grid.set_states_from_image(&image, &params);

    let structural = grid
        .voxels()
        .filter(|v| matches!(v.state, VoxelState::Red | VoxelState::Black))
        .count();
    log::info!("classified {structural} structural voxels in a {size} grid");

    export::save_voxels(&grid, &[VoxelState::Red, VoxelState::Black], &PathBuf::from(&out))?;

    if let Some(layer_png) = parse_str_arg(&args, "--layer-png") {
        let slice = grid.image_from_grid(0, false)?;
        slice.save(&layer_png)?;
        log::info!("wrote floor slice to {layer_png}");
    }

    Ok(())
}

fn parse_str_arg(args: &[String], name: &str) -> Option<String> {
    args.iter()
        .position(|a| a == name)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn parse_ivec3_arg(args: &[String], name: &str) -> Option<IVec3> {
    let raw = parse_str_arg(args, name)?;
    let parts: Vec<i32> = raw.split(',').filter_map(|p| p.trim().parse().ok()).collect();
    match parts[..] {
        [x, y, z] => Some(IVec3::new(x, y, z)),
        _ => {
            eprintln!("expected {name} as X,Y,Z, got '{raw}'");
            None
        }
    }
}
