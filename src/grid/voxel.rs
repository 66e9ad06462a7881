//! Voxel cell handle and state

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::core::types::IVec3;

/// State of a single grid cell.
///
/// `White` is the floor-level default, `Black` a user-placed solid cell,
/// `Red` a cell classified from a reference image, `Yellow` a selection
/// preview, `NotUsed` a backing-store cell outside the active extent and
/// `Empty` the default everywhere else.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoxelState {
    #[default]
    Empty,
    White,
    Black,
    Red,
    Yellow,
    NotUsed,
}

impl VoxelState {
    /// Structural default for a cell at the given height: floor cells are
    /// `White`, everything above is `Empty`.
    pub fn default_for_height(y: i32) -> Self {
        if y == 0 { VoxelState::White } else { VoxelState::Empty }
    }

    /// Textual name used by the export format
    pub fn name(&self) -> &'static str {
        match self {
            VoxelState::Empty => "Empty",
            VoxelState::White => "White",
            VoxelState::Black => "Black",
            VoxelState::Red => "Red",
            VoxelState::Yellow => "Yellow",
            VoxelState::NotUsed => "NotUsed",
        }
    }
}

impl fmt::Display for VoxelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single addressable cell: its index in the grid plus a snapshot of its
/// state at lookup time.
///
/// The grid's arena is the single owner of cell state; a `Voxel` is a value
/// handle and carries no link back to storage. After a resize, handles must
/// be re-derived from the grid. Identity is defined by `index` alone.
#[derive(Clone, Copy, Debug)]
pub struct Voxel {
    pub index: IVec3,
    pub state: VoxelState,
}

impl Voxel {
    pub fn new(index: IVec3, state: VoxelState) -> Self {
        Self { index, state }
    }
}

impl PartialEq for Voxel {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl Eq for Voxel {}

impl Hash for Voxel {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_identity_by_index_only() {
        let a = Voxel::new(IVec3::new(1, 2, 3), VoxelState::Black);
        let b = Voxel::new(IVec3::new(1, 2, 3), VoxelState::Red);
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }

    #[test]
    fn test_default_for_height() {
        assert_eq!(VoxelState::default_for_height(0), VoxelState::White);
        assert_eq!(VoxelState::default_for_height(1), VoxelState::Empty);
        assert_eq!(VoxelState::default_for_height(7), VoxelState::Empty);
    }

    #[test]
    fn test_state_names() {
        assert_eq!(VoxelState::Black.to_string(), "Black");
        assert_eq!(VoxelState::NotUsed.to_string(), "NotUsed");
    }
}
