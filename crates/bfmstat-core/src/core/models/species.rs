//! Attribute tag conventions shared by all analyzers and updaters.
//!
//! The tags are fixed per analyzer and are not configurable at runtime.

/// Integer species label carried by every particle.
pub type AttributeTag = i32;

/// Polymer backbone monomer.
pub const CHAIN: AttributeTag = 1;
/// Plain solvent particle.
pub const SOLVENT: AttributeTag = 2;
/// Co-solvent particle probed by the shell contact analyzer.
pub const COSOLVENT: AttributeTag = 3;
/// Second co-solvent variant.
pub const COSOLVENT_ALT: AttributeTag = 4;

/// Returns a human-readable species name for log output.
pub fn species_name(tag: AttributeTag) -> &'static str {
    match tag {
        CHAIN => "chain",
        SOLVENT => "solvent",
        COSOLVENT => "co-solvent",
        COSOLVENT_ALT => "co-solvent (alt)",
        _ => "unlabeled",
    }
}
