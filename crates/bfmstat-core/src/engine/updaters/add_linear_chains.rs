use crate::core::models::bondset::BondVectorSet;
use crate::core::models::particle::Particle;
use crate::core::models::species::AttributeTag;
use crate::core::models::system::{BoxDims, LatticeSystem};
use crate::engine::error::EngineError;
use crate::engine::traits::Updater;
use nalgebra::{Point3, Vector3};
use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::collections::HashSet;
use tracing::{debug, info, instrument};

const MONOMER_ATTEMPTS: usize = 1000;
const CHAIN_ATTEMPTS: usize = 100;

/// Lattice sites blocked by the 2x2x2 cubes of placed monomers, folded into the box.
#[derive(Debug)]
struct Occupancy {
    dims: BoxDims,
    sites: HashSet<Point3<i32>>,
}

impl Occupancy {
    fn new(dims: BoxDims) -> Self {
        Self {
            dims,
            sites: HashSet::new(),
        }
    }

    fn cube(position: Point3<i32>) -> impl Iterator<Item = Point3<i32>> {
        (0..8).map(move |corner: i32| {
            position + Vector3::new(corner & 1, (corner >> 1) & 1, (corner >> 2) & 1)
        })
    }

    fn is_free(&self, position: &Point3<i32>, staged: &HashSet<Point3<i32>>) -> bool {
        Self::cube(*position).all(|site| {
            let site = self.dims.wrap(&site);
            !self.sites.contains(&site) && !staged.contains(&site)
        })
    }

    fn stage(&self, position: &Point3<i32>, staged: &mut HashSet<Point3<i32>>) {
        staged.extend(Self::cube(*position).map(|site| self.dims.wrap(&site)));
    }

    fn occupy(&mut self, position: &Point3<i32>) {
        let dims = self.dims;
        self.sites
            .extend(Self::cube(*position).map(|site| dims.wrap(&site)));
    }
}

/// Adds linear chains to the system as excluded-volume random walks over the classic
/// BFM bond set. Monomers alternate between two tags, starting with `tag_even`.
///
/// Chains of length one place free molecules such as co-solvent. The updater runs once;
/// later calls to `execute` leave the system unchanged.
pub struct AddLinearChainsUpdater {
    n_chains: usize,
    chain_length: usize,
    tag_even: AttributeTag,
    tag_odd: AttributeTag,
    bond_set: BondVectorSet,
    rng: StdRng,
    executed: bool,
}

impl AddLinearChainsUpdater {
    pub fn new(
        n_chains: usize,
        chain_length: usize,
        tag_even: AttributeTag,
        tag_odd: AttributeTag,
        rng: StdRng,
    ) -> Self {
        Self {
            n_chains,
            chain_length,
            tag_even,
            tag_odd,
            bond_set: BondVectorSet::bfm_classic(),
            rng,
            executed: false,
        }
    }

    pub fn was_executed(&self) -> bool {
        self.executed
    }

    fn random_position(&mut self, dims: BoxDims) -> Point3<i32> {
        Point3::new(
            self.rng.gen_range(0..dims.x),
            self.rng.gen_range(0..dims.y),
            self.rng.gen_range(0..dims.z),
        )
    }

    /// One attempt at a full chain. Nothing is committed unless every monomer fits.
    fn try_chain(&mut self, occupancy: &Occupancy) -> Option<Vec<Point3<i32>>> {
        let mut staged = HashSet::new();
        let mut positions = Vec::with_capacity(self.chain_length);

        let first = (0..MONOMER_ATTEMPTS)
            .map(|_| self.random_position(occupancy.dims))
            .find(|p| occupancy.is_free(p, &staged))?;
        occupancy.stage(&first, &mut staged);
        positions.push(first);

        while positions.len() < self.chain_length {
            let parent = positions[positions.len() - 1];
            let mut next = None;
            for _ in 0..MONOMER_ATTEMPTS {
                let bond = self.bond_set.vectors().choose(&mut self.rng)?;
                let candidate = parent + bond;
                if occupancy.is_free(&candidate, &staged) {
                    next = Some(candidate);
                    break;
                }
            }
            let next = next?;
            occupancy.stage(&next, &mut staged);
            positions.push(next);
        }
        Some(positions)
    }

    fn tag_for(&self, monomer: usize) -> AttributeTag {
        if monomer % 2 == 0 {
            self.tag_even
        } else {
            self.tag_odd
        }
    }
}

impl Updater for AddLinearChainsUpdater {
    fn name(&self) -> &'static str {
        "AddLinearChainsUpdater"
    }

    fn initialize(&mut self, system: &mut LatticeSystem) -> Result<(), EngineError> {
        if !system.box_dims().is_valid() {
            return Err(EngineError::Initialization(format!(
                "cannot place chains in box {:?}",
                system.box_dims()
            )));
        }
        self.executed = false;
        Ok(())
    }

    #[instrument(skip_all, name = "add_linear_chains", fields(chains = self.n_chains, length = self.chain_length))]
    fn execute(&mut self, system: &mut LatticeSystem) -> Result<bool, EngineError> {
        if self.executed {
            return Ok(true);
        }

        let mut occupancy = Occupancy::new(system.box_dims());
        for particle in system.particles() {
            occupancy.occupy(&particle.position);
        }

        for chain in 0..self.n_chains {
            let positions = (0..CHAIN_ATTEMPTS)
                .find_map(|_| self.try_chain(&occupancy))
                .ok_or_else(|| EngineError::Placement {
                    chain,
                    message: format!(
                        "no free space for {} monomers after {} attempts",
                        self.chain_length, CHAIN_ATTEMPTS
                    ),
                })?;

            let mut previous = None;
            for (monomer, position) in positions.iter().enumerate() {
                occupancy.occupy(position);
                let index = system.add_particle(Particle::new(*position, self.tag_for(monomer)));
                if let Some(previous) = previous {
                    system.add_bond(previous, index);
                }
                previous = Some(index);
            }
            debug!(chain, "Chain placed.");
        }

        self.executed = true;
        info!(
            particles = system.len(),
            "Added {} chains of length {}.", self.n_chains, self.chain_length
        );
        Ok(true)
    }

    fn cleanup(&mut self, _system: &mut LatticeSystem) -> Result<(), EngineError> {
        Ok(())
    }
}
