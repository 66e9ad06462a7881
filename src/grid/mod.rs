//! Voxel grid container and editing operations
//!
//! The grid owns a flat arena sized to `max_size` and a logical `size` gating
//! which cells are active. Shrinking marks cells `NotUsed` without releasing
//! their arena slot; growing reactivates the same slots with default states,
//! so painted cells inside an overlap survive any resize sequence.

use image::{Rgba, RgbaImage};
use log::{debug, warn};

use crate::config::StructureParams;
use crate::core::types::IVec3;
use crate::image::classify::{classify, PixelClass};
use crate::image::sampler::sample_nearest;

pub mod voxel;

pub use voxel::{Voxel, VoxelState};

/// Check whether an index lies inside `[0, size)` on every axis
pub fn in_bounds(index: IVec3, size: IVec3) -> bool {
    index.x >= 0 && index.x < size.x
        && index.y >= 0 && index.y < size.y
        && index.z >= 0 && index.z < size.z
}

/// A 3D grid of voxel cells with a fixed-capacity backing arena and a
/// resizable active extent.
///
/// Holds at most one selection at a time: a corner pair plus the cells of the
/// inclusive axis-aligned box between them, recorded in x, y, z order.
pub struct VoxelGrid {
    size: IVec3,
    max_size: IVec3,
    arena: Vec<VoxelState>,
    corners: Option<[IVec3; 2]>,
    selection: Vec<IVec3>,
}

impl VoxelGrid {
    /// Create a grid with the given active extent and maximum capacity.
    ///
    /// `size` is clamped component-wise into `[0, max_size]`. Cells inside the
    /// active extent start at their structural default (`White` on the floor,
    /// `Empty` above); the rest of the arena starts `NotUsed`.
    pub fn new(size: IVec3, max_size: IVec3) -> Self {
        let max_size = max_size.max(IVec3::ZERO);
        let size = size.clamp(IVec3::ZERO, max_size);
        let volume = (max_size.x * max_size.y * max_size.z) as usize;

        let mut grid = Self {
            size,
            max_size,
            arena: vec![VoxelState::NotUsed; volume],
            corners: None,
            selection: Vec::new(),
        };

        for x in 0..size.x {
            for y in 0..size.y {
                for z in 0..size.z {
                    let slot = grid.slot(IVec3::new(x, y, z));
                    grid.arena[slot] = VoxelState::default_for_height(y);
                }
            }
        }

        grid
    }

    /// Current active extent
    pub fn size(&self) -> IVec3 {
        self.size
    }

    /// Maximum extent the grid may ever grow to
    pub fn max_size(&self) -> IVec3 {
        self.max_size
    }

    /// Corner pair of the active selection, if any
    pub fn corners(&self) -> Option<[IVec3; 2]> {
        self.corners
    }

    /// Cells of the active selection box, in x, y, z order
    pub fn selection(&self) -> &[IVec3] {
        &self.selection
    }

    /// State of the cell at `index`, or `None` outside the active extent
    pub fn state(&self, index: IVec3) -> Option<VoxelState> {
        if !in_bounds(index, self.size) {
            return None;
        }
        Some(self.arena[self.slot(index)])
    }

    /// Voxel handle for the cell at `index`, or `None` outside the active extent
    pub fn voxel(&self, index: IVec3) -> Option<Voxel> {
        self.state(index).map(|state| Voxel::new(index, state))
    }

    /// Set the state of an active cell. Indices outside the active extent are
    /// ignored; no neighbor validation is applied.
    pub fn set_state(&mut self, index: IVec3, state: VoxelState) {
        if !in_bounds(index, self.size) {
            debug!("set_state outside active extent: {index}");
            return;
        }
        let slot = self.slot(index);
        self.arena[slot] = state;
    }

    /// Face-adjacent voxels of `index` in +x, -x, +y, -y, +z, -z order.
    ///
    /// Adjacency is evaluated against the current active extent, so a cell on
    /// a boundary face yields `None` in that direction. An index outside the
    /// extent has no neighbours at all.
    pub fn face_neighbours(&self, index: IVec3) -> [Option<Voxel>; 6] {
        if !in_bounds(index, self.size) {
            return [None; 6];
        }
        const OFFSETS: [IVec3; 6] = [
            IVec3::new(1, 0, 0),
            IVec3::new(-1, 0, 0),
            IVec3::new(0, 1, 0),
            IVec3::new(0, -1, 0),
            IVec3::new(0, 0, 1),
            IVec3::new(0, 0, -1),
        ];
        OFFSETS.map(|offset| self.voxel(index + offset))
    }

    /// Iterator over the existing face neighbours of `index`
    pub fn face_neighbour_voxels(&self, index: IVec3) -> impl Iterator<Item = Voxel> + '_ {
        self.face_neighbours(index).into_iter().flatten()
    }

    /// Iterate every active voxel in x (outer), y, z (inner) order
    pub fn voxels(&self) -> impl Iterator<Item = Voxel> + '_ {
        let size = self.size;
        (0..size.x).flat_map(move |x| {
            (0..size.y).flat_map(move |y| {
                (0..size.z).map(move |z| {
                    let index = IVec3::new(x, y, z);
                    Voxel::new(index, self.arena[self.slot(index)])
                })
            })
        })
    }

    /// Change the active extent, preserving cell state inside the overlap.
    ///
    /// `new_size` is clamped into `[0, max_size]`. Cells leaving the extent
    /// become `NotUsed` but keep their arena slot; cells entering it are
    /// reactivated to their structural default; cells inside both extents are
    /// left untouched.
    pub fn change_grid_size(&mut self, new_size: IVec3) {
        let clamped = new_size.clamp(IVec3::ZERO, self.max_size);
        if clamped != new_size {
            warn!("grid size {new_size} clamped to {clamped} (max {})", self.max_size);
        }

        let end = self.size.max(clamped);
        for x in 0..end.x {
            for y in 0..end.y {
                for z in 0..end.z {
                    let index = IVec3::new(x, y, z);
                    let was_active = in_bounds(index, self.size);
                    let is_active = in_bounds(index, clamped);
                    if was_active && !is_active {
                        let slot = self.slot(index);
                        self.arena[slot] = VoxelState::NotUsed;
                    } else if !was_active && is_active {
                        let slot = self.slot(index);
                        self.arena[slot] = VoxelState::default_for_height(y);
                    }
                }
            }
        }

        debug!("grid resized {} -> {clamped}", self.size);
        self.size = clamped;
    }

    /// Start or replace the selection from a pair of corner cells.
    ///
    /// Every cell of the inclusive box between the corners except the first
    /// corner is marked `Yellow`; cells of a previous selection still marked
    /// `Yellow` revert to `White` first. Equal or out-of-bounds corners are
    /// rejected without touching grid state.
    pub fn set_corners(&mut self, corners: [IVec3; 2]) {
        let [c0, c1] = corners;
        if c0 == c1 || !in_bounds(c0, self.size) || !in_bounds(c1, self.size) {
            warn!("rejected corner pair {c0} / {c1}");
            return;
        }

        self.revert_selection_preview();
        self.corners = Some(corners);
        self.selection.clear();

        let min = c0.min(c1);
        let max = c0.max(c1);
        for x in min.x..=max.x {
            for y in min.y..=max.y {
                for z in min.z..=max.z {
                    let index = IVec3::new(x, y, z);
                    self.selection.push(index);
                    if index != c0 {
                        self.set_state(index, VoxelState::Yellow);
                    }
                }
            }
        }
    }

    /// Fill the columns of the active selection from the floor up to `height`
    /// layers with `Black`, then clear the selection.
    ///
    /// The fill is driven purely by `height` (clamped to the grid height);
    /// without an active selection this is a no-op.
    pub fn make_box(&mut self, height: i32) {
        if self.selection.is_empty() {
            return;
        }

        let height = height.clamp(0, self.size.y);
        for i in 0..self.selection.len() {
            let column = self.selection[i];
            for y in 0..height {
                self.set_state(IVec3::new(column.x, y, column.z), VoxelState::Black);
            }
        }

        self.corners = None;
        self.selection.clear();
    }

    /// Fill a box of the given extent anchored at `corner`, picking the
    /// diagonal corner from the four shuffled (±x, ±z) sign combinations with
    /// a fixed +y extension. The first candidate inside the active extent
    /// wins; if none fits, nothing is painted.
    ///
    /// The fill is exclusive on the upper x bound and inclusive on y and z.
    pub fn box_from_corner(&mut self, corner: IVec3, extent: IVec3, rng: &mut fastrand::Rng) {
        if !in_bounds(corner, self.size) {
            warn!("box corner {corner} outside active extent");
            return;
        }

        let mut x_dirs = [1, -1];
        let mut z_dirs = [1, -1];
        rng.shuffle(&mut x_dirs);
        rng.shuffle(&mut z_dirs);

        let mut diagonal = None;
        'search: for &dx in &x_dirs {
            for &dz in &z_dirs {
                let candidate = IVec3::new(
                    corner.x + dx * extent.x,
                    corner.y + extent.y,
                    corner.z + dz * extent.z,
                );
                if in_bounds(candidate, self.size) {
                    diagonal = Some(candidate);
                    break 'search;
                }
            }
        }

        let Some(c1) = diagonal else {
            debug!("no diagonal corner fits {corner} + {extent}");
            return;
        };

        let min = corner.min(c1);
        let max = corner.max(c1);
        for x in min.x..max.x {
            for y in min.y..=max.y {
                for z in min.z..=max.z {
                    self.set_state(IVec3::new(x, y, z), VoxelState::Black);
                }
            }
        }
    }

    /// Reset every active cell to its structural default, discarding all
    /// painted state and any selection
    pub fn clear_grid(&mut self) {
        for x in 0..self.size.x {
            for y in 0..self.size.y {
                for z in 0..self.size.z {
                    let slot = self.slot(IVec3::new(x, y, z));
                    self.arena[slot] = VoxelState::default_for_height(y);
                }
            }
        }
        self.corners = None;
        self.selection.clear();
    }

    /// Reset only `Red` cells to their structural default
    pub fn clear_reds(&mut self) {
        for x in 0..self.size.x {
            for y in 0..self.size.y {
                for z in 0..self.size.z {
                    let slot = self.slot(IVec3::new(x, y, z));
                    if self.arena[slot] == VoxelState::Red {
                        self.arena[slot] = VoxelState::default_for_height(y);
                    }
                }
            }
        }
    }

    /// Render one horizontal XZ slice of the grid into a pixel buffer.
    ///
    /// `Black`, `Red` and `Yellow` cells map to their opaque colors; every
    /// other state maps to white, fully transparent when `transparent` is set.
    pub fn image_from_grid(&self, layer: i32, transparent: bool) -> crate::core::Result<RgbaImage> {
        if layer < 0 || layer >= self.size.y {
            return Err(crate::core::Error::Grid(format!(
                "layer {layer} outside grid height {}",
                self.size.y
            )));
        }

        let background_alpha = if transparent { 0 } else { 255 };
        let mut image = RgbaImage::new(self.size.x as u32, self.size.z as u32);
        for x in 0..self.size.x {
            for z in 0..self.size.z {
                let color = match self.arena[self.slot(IVec3::new(x, layer, z))] {
                    VoxelState::Black => Rgba([0, 0, 0, 255]),
                    VoxelState::Red => Rgba([255, 0, 0, 255]),
                    VoxelState::Yellow => Rgba([255, 255, 0, 255]),
                    _ => Rgba([255, 255, 255, background_alpha]),
                };
                image.put_pixel(x as u32, z as u32, color);
            }
        }
        Ok(image)
    }

    /// Classify a reference image into the grid: structural inference.
    ///
    /// The image is resampled (nearest-neighbor) to one pixel per XZ column.
    /// Reddish pixels dark enough to pass the sensitivity gate place a `Red`
    /// cell whose height maps the pixel's HSV saturation into the band between
    /// `bottom_limit` and `top_limit`, extended `thickness - 1` cells downward
    /// without ever reaching the floor. When `set_blacks` is enabled, fully
    /// opaque black pixels fill their whole column above the floor with
    /// `Black`. All other pixels leave their column untouched.
    pub fn set_states_from_image(&mut self, image: &RgbaImage, params: &StructureParams) {
        if self.size.x == 0 || self.size.y == 0 || self.size.z == 0 {
            return;
        }

        let top_span = (self.size.y - 1) as f32;
        let start_y = (params.bottom_limit.clamp(0.0, 1.0) * top_span).round() as i32;
        let end_y = (params.top_limit.clamp(0.0, 1.0) * top_span).round() as i32;

        let resampled = sample_nearest(image, self.size.x as u32, self.size.z as u32);
        for x in 0..self.size.x {
            for z in 0..self.size.z {
                let pixel = resampled.get_pixel(x as u32, z as u32);
                match classify(*pixel, params.sensitivity) {
                    PixelClass::Structure { saturation } => {
                        let y = ((end_y - start_y) as f32 * saturation).round() as i32 + start_y;
                        if y == 0 {
                            // no structure at floor level
                            continue;
                        }
                        if y > 0 && y < self.size.y {
                            self.set_state(IVec3::new(x, y, z), VoxelState::Red);
                        }
                        for i in 1..params.thickness as i32 {
                            let below = y - i;
                            if below == 0 {
                                break;
                            }
                            if below > 0 && below < self.size.y {
                                self.set_state(IVec3::new(x, below, z), VoxelState::Red);
                            }
                        }
                    }
                    PixelClass::Solid if params.set_blacks => {
                        for y in 1..self.size.y {
                            self.set_state(IVec3::new(x, y, z), VoxelState::Black);
                        }
                    }
                    _ => {}
                }
            }
        }
    }

    fn slot(&self, index: IVec3) -> usize {
        ((index.x * self.max_size.y + index.y) * self.max_size.z + index.z) as usize
    }

    /// Revert cells of the previous selection still marked `Yellow` to `White`
    fn revert_selection_preview(&mut self) {
        for i in 0..self.selection.len() {
            let index = self.selection[i];
            if self.state(index) == Some(VoxelState::Yellow) {
                self.set_state(index, VoxelState::White);
            }
        }
    }
}
