//! Voxsketch - the voxel grid model behind an interactive structure-sketching tool
//!
//! A [`grid::VoxelGrid`] is a fixed-capacity 3D arena of cell states with a
//! resizable active extent. A front end drives it through selection, box-fill,
//! resize and image-rasterization operations, then exports labeled voxels as
//! training data for a paired ML pipeline.

pub mod core;
pub mod grid;
pub mod image;
pub mod export;
pub mod config;
