use super::particle::Particle;
use super::species::AttributeTag;
use super::system::BoxDims;

/// The capabilities an analyzer needs from one configuration delivered by the host.
///
/// Implementors expose an ordered particle sequence, the periodic box extents and the
/// simulation age of the snapshot. Analyzers never mutate a snapshot.
pub trait Snapshot {
    /// Particles in host order. The order carries no meaning for the analyzers.
    fn particles(&self) -> &[Particle];

    /// Periodic box extents, constant for the duration of one run.
    fn box_dims(&self) -> BoxDims;

    /// Monte-Carlo step counter of this configuration.
    fn age(&self) -> u64;

    /// Name of the configuration source, usually the input file path.
    fn name(&self) -> &str;

    /// Number of particles carrying `tag`.
    fn count_tagged(&self, tag: AttributeTag) -> usize {
        self.particles().iter().filter(|p| p.has_tag(tag)).count()
    }
}
