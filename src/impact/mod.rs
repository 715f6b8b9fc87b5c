//! Impact effects: the local estimator and the helpers that present its
//! results (or the simulation service's)

mod composition;
mod estimate;
mod region;
mod severity;

pub use composition::{preset, Composition, ImpactPreset, PRESETS};
pub use estimate::{estimate, AsteroidParams, ImpactEstimate};
pub use region::ImpactRegion;
pub use severity::{format_quantity, hiroshima_equivalents, DestructionLevel};

impl ImpactEstimate {
    /// Destruction level implied by the released energy
    pub fn destruction_level(&self) -> DestructionLevel {
        DestructionLevel::from_energy(self.energy_megatons_tnt)
    }
}
