//! Labeled voxel export
//!
//! Writes one `x,y,z,StateName` record per kept voxel, no header, in the
//! grid's fixed enumeration order. Downstream ML pipelines consume this exact
//! shape as ground truth.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use log::info;

use crate::core::types::Result;
use crate::grid::{VoxelGrid, VoxelState};

/// Write the records of every active voxel whose state is in `filter`.
///
/// Order follows [`VoxelGrid::voxels`]; no reordering or deduplication.
/// An empty filter produces no output.
pub fn write_voxels<W: Write>(grid: &VoxelGrid, filter: &[VoxelState], out: &mut W) -> Result<()> {
    for voxel in grid.voxels().filter(|v| filter.contains(&v.state)) {
        let index = voxel.index;
        writeln!(out, "{},{},{},{}", index.x, index.y, index.z, voxel.state)?;
    }
    Ok(())
}

/// Save filtered voxel records to a file, creating parent directories as
/// needed. A path without a file name is rejected.
pub fn save_voxels(grid: &VoxelGrid, filter: &[VoxelState], path: &Path) -> Result<()> {
    if path.file_stem().is_none() {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "missing file name").into());
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut writer = BufWriter::new(File::create(path)?);
    write_voxels(grid, filter, &mut writer)?;
    writer.flush()?;
    info!("saved voxels to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::IVec3;

    fn sample_grid() -> VoxelGrid {
        let mut grid = VoxelGrid::new(IVec3::new(2, 2, 2), IVec3::new(2, 2, 2));
        grid.set_state(IVec3::new(0, 1, 0), VoxelState::Black);
        grid.set_state(IVec3::new(1, 0, 1), VoxelState::Black);
        grid.set_state(IVec3::new(1, 1, 1), VoxelState::Red);
        grid
    }

    #[test]
    fn test_filter_and_order() {
        let grid = sample_grid();
        let mut out = Vec::new();
        write_voxels(&grid, &[VoxelState::Black], &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "0,1,0,Black\n1,0,1,Black\n"
        );
    }

    #[test]
    fn test_multiple_states_in_index_order() {
        let grid = sample_grid();
        let mut out = Vec::new();
        write_voxels(&grid, &[VoxelState::Red, VoxelState::Black], &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "0,1,0,Black\n1,0,1,Black\n1,1,1,Red\n"
        );
    }

    #[test]
    fn test_empty_filter_writes_nothing() {
        let grid = sample_grid();
        let mut out = Vec::new();
        write_voxels(&grid, &[], &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let grid = sample_grid();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grids/sample.csv");
        save_voxels(&grid, &[VoxelState::Black], &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.starts_with("0,1,0,Black"));
    }
}
