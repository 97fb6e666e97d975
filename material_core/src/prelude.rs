//! Prelude module for convenient imports
//!
//! ```rust
//! use material_core::prelude::*;
//! ```

// Core types
pub use crate::material::{MaterialRecord, ScoredMaterial};
pub use crate::types::{Channel, Element, PhysicalType, Property};

// Scoring
pub use crate::scoring::{score, ArmorBias, Attunement, ScoringOptions};

// Database
pub use crate::category::{CategoryNode, CategoryNormalizer, CategoryPolicy, MaterialDatabase};
pub use crate::factors::{FactorSource, Factors};

// Defense
pub use crate::defense::{effective_reduction, ArmorClass, ArmorLayers};

// Config
pub use crate::config::{ConfigError, DefenseConstants};
