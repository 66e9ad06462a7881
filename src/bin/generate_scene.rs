//! Scene generator binary — scatters random boxes over the floor of a grid
//! and exports the result, for building training sample sets.
//!
//! Usage: cargo run --release --bin generate_scene -- [OPTIONS]
//!
//! Options:
//!   --seed <SEED>     Random seed (default: 666)
//!   --count <N>       Number of boxes to place (default: 8)
//!   --size <X,Y,Z>    Grid extent (default: 32,10,32)
//!   --extent <X,Y,Z>  Maximum box extent (default: 5,4,5)
//!   --out <PATH>      Output CSV path (default: scene.csv)
//!
//! Output is reproducible for a fixed seed.

use std::path::PathBuf;
use std::process::ExitCode;

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
    let seed = parse_u64_arg(&args, "--seed").unwrap_or(666);
    let count = parse_u64_arg(&args, "--count").unwrap_or(8);
    let size = parse_ivec3_arg(&args, "--size").unwrap_or(IVec3::new(32, 10, 32));
    let max_extent = parse_ivec3_arg(&args, "--extent")
        .unwrap_or(IVec3::new(5, 4, 5))
        .max(IVec3::ONE);
    let out = parse_str_arg(&args, "--out").unwrap_or_else(|| "scene.csv".to_string());

    let mut rng = fastrand::Rng::with_seed(seed);
    let mut grid = VoxelGrid::new(size, size);
    let size = grid.size();
    if size.x < 1 || size.y < 1 || size.z < 1 {
        return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, "grid extent must be positive").into());
    }

    for _ in 0..count {
        let corner = IVec3::new(rng.i32(0..size.x), 0, rng.i32(0..size.z));
        let extent = IVec3::new(
            rng.i32(1..=max_extent.x),
            rng.i32(1..=max_extent.y),
            rng.i32(1..=max_extent.z),
        );
        grid.box_from_corner(corner, extent, &mut rng);
    }

    let blacks = grid.voxels().filter(|v| v.state == VoxelState::Black).count();
    log::info!("placed {count} boxes ({blacks} solid voxels) with seed {seed}");

    export::save_voxels(&grid, &[VoxelState::Black], &PathBuf::from(&out))
}

fn parse_str_arg(args: &[String], name: &str) -> Option<String> {
    args.iter()
        .position(|a| a == name)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn parse_u64_arg(args: &[String], name: &str) -> Option<u64> {
    parse_str_arg(args, name).and_then(|v| v.parse().ok())
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
