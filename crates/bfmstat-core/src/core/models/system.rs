use super::particle::Particle;
use super::snapshot::Snapshot;
use super::species::AttributeTag;
use nalgebra::Point3;

/// Extents of the periodic simulation box in lattice units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoxDims {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BoxDims {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub fn cubic(length: i32) -> Self {
        Self::new(length, length, length)
    }

    /// Every extent must be strictly positive for minimum-image folding to be defined.
    pub fn is_valid(&self) -> bool {
        self.x > 0 && self.y > 0 && self.z > 0
    }

    /// Wraps an unfolded lattice position back into `[0, L)` along each axis.
    pub fn wrap(&self, position: &Point3<i32>) -> Point3<i32> {
        Point3::new(
            position.x.rem_euclid(self.x),
            position.y.rem_euclid(self.y),
            position.z.rem_euclid(self.z),
        )
    }
}

impl Default for BoxDims {
    fn default() -> Self {
        Self::cubic(64)
    }
}

/// Periodicity flags of the three box axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Periodicity {
    pub x: bool,
    pub y: bool,
    pub z: bool,
}

impl Default for Periodicity {
    fn default() -> Self {
        Self {
            x: true,
            y: true,
            z: true,
        }
    }
}

/// A bond between two particles, stored as zero-based particle indices with `a < b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Bond {
    pub a: usize,
    pub b: usize,
}

impl Bond {
    pub fn new(i: usize, j: usize) -> Self {
        Self {
            a: i.min(j),
            b: i.max(j),
        }
    }
}

/// One complete lattice configuration: particles, bonds, box and simulation age.
///
/// This is the owned container the stepwise reader fills and the updaters modify.
/// Analyzers see it only through [`Snapshot`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LatticeSystem {
    name: String,
    box_dims: BoxDims,
    periodicity: Periodicity,
    particles: Vec<Particle>,
    bonds: Vec<Bond>,
    age: u64,
}

impl LatticeSystem {
    /// Creates an empty system with the given name and box.
    pub fn new(name: impl Into<String>, box_dims: BoxDims) -> Self {
        Self {
            name: name.into(),
            box_dims,
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn box_dims(&self) -> BoxDims {
        self.box_dims
    }

    pub fn set_box_dims(&mut self, box_dims: BoxDims) {
        self.box_dims = box_dims;
    }

    pub fn periodicity(&self) -> Periodicity {
        self.periodicity
    }

    pub fn set_periodicity(&mut self, periodicity: Periodicity) {
        self.periodicity = periodicity;
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    /// Appends a particle and returns its index.
    pub fn add_particle(&mut self, particle: Particle) -> usize {
        self.particles.push(particle);
        self.particles.len() - 1
    }

    /// Grows or shrinks the particle list; new particles sit at the origin without a tag.
    pub fn resize(&mut self, len: usize) {
        self.particles.resize(len, Particle::default());
        self.bonds.retain(|bond| bond.b < len);
    }

    /// Connects two existing particles. Returns `false` if either index is out of range,
    /// the indices coincide, or the bond already exists.
    pub fn add_bond(&mut self, i: usize, j: usize) -> bool {
        if i == j || i >= self.particles.len() || j >= self.particles.len() {
            return false;
        }
        let bond = Bond::new(i, j);
        if self.bonds.contains(&bond) {
            return false;
        }
        self.bonds.push(bond);
        true
    }

    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    pub fn age(&self) -> u64 {
        self.age
    }

    pub fn set_age(&mut self, age: u64) {
        self.age = age;
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Overwrites the attribute tag of every particle in `range` (zero-based, half-open).
    pub fn set_tags(&mut self, range: std::ops::Range<usize>, tag: AttributeTag) {
        for particle in &mut self.particles[range] {
            particle.tag = tag;
        }
    }
}

impl Snapshot for LatticeSystem {
    fn particles(&self) -> &[Particle] {
        &self.particles
    }

    fn box_dims(&self) -> BoxDims {
        self.box_dims
    }

    fn age(&self) -> u64 {
        self.age
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::species::{CHAIN, COSOLVENT};

    #[test]
    fn wrap_maps_unfolded_positions_into_box() {
        let dims = BoxDims::new(10, 20, 30);
        assert_eq!(dims.wrap(&Point3::new(-1, 21, 30)), Point3::new(9, 1, 0));
    }

    #[test]
    fn add_bond_rejects_self_duplicate_and_out_of_range_bonds() {
        let mut system = LatticeSystem::new("test", BoxDims::cubic(16));
        system.add_particle(Particle::at(0, 0, 0, CHAIN));
        system.add_particle(Particle::at(2, 0, 0, CHAIN));

        assert!(system.add_bond(1, 0));
        assert!(!system.add_bond(0, 1));
        assert!(!system.add_bond(0, 0));
        assert!(!system.add_bond(0, 5));
        assert_eq!(system.bonds(), &[Bond::new(0, 1)]);
    }

    #[test]
    fn resize_drops_bonds_to_removed_particles() {
        let mut system = LatticeSystem::new("test", BoxDims::cubic(16));
        system.resize(3);
        system.add_bond(0, 1);
        system.add_bond(1, 2);
        system.resize(2);
        assert_eq!(system.len(), 2);
        assert_eq!(system.bonds(), &[Bond::new(0, 1)]);
    }

    #[test]
    fn count_tagged_counts_only_matching_species() {
        let mut system = LatticeSystem::new("test", BoxDims::cubic(16));
        system.resize(5);
        system.set_tags(0..3, CHAIN);
        system.set_tags(3..5, COSOLVENT);
        assert_eq!(system.count_tagged(CHAIN), 3);
        assert_eq!(system.count_tagged(COSOLVENT), 2);
        assert_eq!(system.count_tagged(7), 0);
    }
}
