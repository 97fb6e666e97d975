//! material_core - Material property scoring for game equipment
//!
//! This library provides:
//! - Scoring: raw physical properties to bounded offensive and defensive scores
//! - Factors: the persisted per-material shape read by gameplay formulas
//! - CategoryNormalizer: category-relative rescaling of physical factors
//! - Defense: armour reduction from layered material factors

pub mod category;
pub mod config;
pub mod defense;
pub mod factors;
pub mod material;
pub mod prelude;
pub mod scoring;
pub mod stats;
pub mod types;

// Re-export core types for convenience
pub use category::{
    normalize_by_category, CategoryNode, CategoryNormalizer, CategoryPolicy, DatabaseMaterial,
    MaterialDatabase,
};
pub use config::{ConfigError, DefenseConstants};
pub use defense::{effective_reduction, ArmorClass, ArmorLayers, DefenseProfile};
pub use factors::{FactorSource, Factors};
pub use material::{DamageScores, EnrichedMaterial, MaterialRecord, ResistanceScores, ScoredMaterial};
pub use scoring::{score, ArmorBias, Attunement, ScoringOptions};
pub use types::{Channel, Element, PhysicalType, Property};
