//! Occupancy grid face source

use facetmesh_core::{Error, Result};

use crate::config::GridConfig;
use crate::face::FaceMask;
use crate::grid::FaceSource;

/// Boolean voxel grid; a face is present wherever a filled cell borders an
/// empty one or the edge of the grid.
///
/// Cell `(x, y, z)` is placed at world `(x, -y, z)`, so the next row is on
/// the negative y side.
#[derive(Debug, Clone)]
pub struct VoxelGrid {
    filled: Vec<bool>,
    /// Grid dimensions as [width, height, depth]
    dimensions: [usize; 3],
}

impl VoxelGrid {
    pub fn new(width: usize, height: usize, depth: usize) -> Self {
        Self {
            filled: vec![false; width * height * depth],
            dimensions: [width, height, depth],
        }
    }

    /// A `width` x `height` x `depth` block with every cell filled
    pub fn solid(width: usize, height: usize, depth: usize) -> Self {
        Self {
            filled: vec![true; width * height * depth],
            dimensions: [width, height, depth],
        }
    }

    pub fn dimensions(&self) -> [usize; 3] {
        self.dimensions
    }

    fn offset(&self, x: usize, y: usize, z: usize) -> Option<usize> {
        let [w, h, d] = self.dimensions;
        (x < w && y < h && z < d).then(|| (z * h + y) * w + x)
    }

    /// Is the cell filled; cells outside the grid are empty
    pub fn get(&self, x: usize, y: usize, z: usize) -> bool {
        self.offset(x, y, z).is_some_and(|i| self.filled[i])
    }

    pub fn set(&mut self, x: usize, y: usize, z: usize, filled: bool) -> Result<()> {
        let i = self.offset(x, y, z).ok_or_else(|| {
            Error::InvalidData(format!(
                "Voxel ({}, {}, {}) out of bounds for dimensions {:?}",
                x, y, z, self.dimensions
            ))
        })?;
        self.filled[i] = filled;
        Ok(())
    }
}

impl FaceSource for VoxelGrid {
    fn width(&self) -> usize {
        self.dimensions[0]
    }

    fn height(&self) -> usize {
        self.dimensions[1]
    }

    /// Layers at or above `config.levels` are treated as empty
    fn faces(&self, x: usize, y: usize, z: usize, config: &GridConfig) -> FaceMask {
        let levels = config.levels as usize;
        let occupied = |x: Option<usize>, y: Option<usize>, z: Option<usize>| match (x, y, z) {
            (Some(x), Some(y), Some(z)) => z < levels && self.get(x, y, z),
            _ => false,
        };

        if !occupied(Some(x), Some(y), Some(z)) {
            return FaceMask::empty();
        }

        let mut faces = FaceMask::empty();
        faces.set(FaceMask::NEG_X, !occupied(x.checked_sub(1), Some(y), Some(z)));
        faces.set(FaceMask::POS_X, !occupied(Some(x + 1), Some(y), Some(z)));
        // rows grow towards negative y
        faces.set(FaceMask::NEG_Y, !occupied(Some(x), Some(y + 1), Some(z)));
        faces.set(FaceMask::POS_Y, !occupied(Some(x), y.checked_sub(1), Some(z)));
        faces.set(FaceMask::NEG_Z, !occupied(Some(x), Some(y), z.checked_sub(1)));
        faces.set(FaceMask::POS_Z, !occupied(Some(x), Some(y), Some(z + 1)));
        faces
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_voxel_has_all_faces() {
        let grid = VoxelGrid::solid(1, 1, 1);
        assert_eq!(grid.faces(0, 0, 0, &GridConfig::default()), FaceMask::all());
    }

    #[test]
    fn test_shared_faces_hidden() {
        let grid = VoxelGrid::solid(2, 2, 1);
        let faces = grid.faces(0, 0, 0, &GridConfig::default());
        assert!(faces.contains(FaceMask::NEG_X | FaceMask::POS_Y | FaceMask::POS_Z));
        assert!(!faces.contains(FaceMask::POS_X));
        assert!(!faces.contains(FaceMask::NEG_Y));
    }

    #[test]
    fn test_empty_cell() {
        let mut grid = VoxelGrid::solid(2, 1, 1);
        grid.set(1, 0, 0, false).unwrap();
        assert!(grid.faces(1, 0, 0, &GridConfig::default()).is_empty());
        assert!(grid.faces(0, 0, 0, &GridConfig::default()).contains(FaceMask::POS_X));
    }

    #[test]
    fn test_levels_cap_the_top() {
        let grid = VoxelGrid::solid(1, 1, 3);
        let config = GridConfig::new().with_levels(2);
        assert!(grid.faces(0, 0, 1, &config).contains(FaceMask::POS_Z));
        assert!(!grid.faces(0, 0, 0, &config).contains(FaceMask::POS_Z));
        assert!(grid.faces(0, 0, 2, &config).is_empty());
    }

    #[test]
    fn test_set_out_of_bounds() {
        let mut grid = VoxelGrid::new(2, 2, 2);
        assert!(grid.set(2, 0, 0, true).is_err());
        assert!(!grid.get(5, 5, 5));
    }
}
