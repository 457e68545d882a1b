use super::species::AttributeTag;
use nalgebra::Point3;

/// A single lattice monomer.
///
/// Positions are stored unfolded, i.e. they may lie outside the box; analyzers fold
/// displacements with the minimum-image convention when they need distances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Particle {
    /// Lattice coordinates of the monomer's lower corner.
    pub position: Point3<i32>,
    /// Species label, see [`super::species`].
    pub tag: AttributeTag,
}

impl Particle {
    pub fn new(position: Point3<i32>, tag: AttributeTag) -> Self {
        Self { position, tag }
    }

    pub fn at(x: i32, y: i32, z: i32, tag: AttributeTag) -> Self {
        Self::new(Point3::new(x, y, z), tag)
    }

    pub fn has_tag(&self, tag: AttributeTag) -> bool {
        self.tag == tag
    }
}

impl Default for Particle {
    fn default() -> Self {
        Self::at(0, 0, 0, 0)
    }
}
