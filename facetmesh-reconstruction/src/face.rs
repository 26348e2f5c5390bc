//! Voxel face selection

use bitflags::bitflags;

bitflags! {
    /// Faces of a grid cell to emit, in world axes
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FaceMask: u8 {
        const NEG_X = 1 << 0;
        const POS_X = 1 << 1;
        const NEG_Y = 1 << 2;
        const POS_Y = 1 << 3;
        const NEG_Z = 1 << 4;
        const POS_Z = 1 << 5;
    }
}

impl FaceMask {
    /// Number of faces selected
    pub fn face_count(self) -> usize {
        self.bits().count_ones() as usize
    }
}
