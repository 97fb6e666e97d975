//! Defense system - armour reduction from layered material factors

mod armour;

pub use armour::{
    damage_after_reduction, effective_reduction, ArmorClass, ArmorLayers, DefenseProfile,
    Reduction,
};

/// Defense calculation constants
pub mod constants {
    /// Base reduction multiplier of light armour (physical and magical)
    pub const LIGHT_BASE: f64 = 0.45;

    /// Base reduction multiplier of medium armour
    pub const MEDIUM_BASE: f64 = 0.65;

    /// Base reduction multiplier of heavy armour
    pub const HEAVY_BASE: f64 = 0.85;

    /// Layer weights: outer shell, inner lining, binding
    pub const OUTER_LAYER_WEIGHT: f64 = 0.80;
    pub const INNER_LAYER_WEIGHT: f64 = 0.15;
    pub const BINDING_LAYER_WEIGHT: f64 = 0.05;

    /// No armour reduces more than this
    pub const MAX_REDUCTION: f64 = 0.95;

    /// Positive reductions below this are raised to it
    pub const MIN_REDUCTION_FLOOR: f64 = 0.05;
}
