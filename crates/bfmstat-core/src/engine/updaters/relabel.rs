use crate::core::models::species::{AttributeTag, species_name};
use crate::core::models::system::LatticeSystem;
use crate::engine::error::EngineError;
use crate::engine::traits::Updater;
use tracing::info;

pub struct RelabelUpdater {
    tag: AttributeTag,
    executed: bool,
}

impl RelabelUpdater {
    pub fn new(tag: AttributeTag) -> Self {
        Self {
            tag,
            executed: false,
        }
    }
}

impl Updater for RelabelUpdater {
    fn name(&self) -> &'static str {
        "RelabelUpdater"
    }

    fn initialize(&mut self, system: &mut LatticeSystem) -> Result<(), EngineError> {
        self.execute(system)?;
        Ok(())
    }

    fn execute(&mut self, system: &mut LatticeSystem) -> Result<bool, EngineError> {
        if self.executed {
            return Ok(true);
        }
        let len = system.len();
        system.set_tags(0..len, self.tag);
        self.executed = true;
        info!(
            particles = len,
            "Relabeled all particles as {} ({}).",
            self.tag,
            species_name(self.tag)
        );
        Ok(true)
    }

    fn cleanup(&mut self, _system: &mut LatticeSystem) -> Result<(), EngineError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::particle::Particle;
    use crate::core::models::species::{CHAIN, COSOLVENT, SOLVENT};
    use crate::core::models::system::BoxDims;

    #[test]
    fn every_particle_gets_the_new_tag_once() {
        let mut system = LatticeSystem::new("sys", BoxDims::cubic(8));
        system.add_particle(Particle::at(0, 0, 0, CHAIN));
        system.add_particle(Particle::at(2, 0, 0, SOLVENT));

        let mut updater = RelabelUpdater::new(COSOLVENT);
        updater.initialize(&mut system).unwrap();
        assert!(system.particles().iter().all(|p| p.tag == COSOLVENT));

        system.add_particle(Particle::at(4, 0, 0, CHAIN));
        assert!(updater.execute(&mut system).unwrap());
        assert_eq!(system.particles()[2].tag, CHAIN);
    }
}
