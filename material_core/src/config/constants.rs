//! Defense constants configuration

use super::ConfigError;
use crate::defense::constants::{
    BINDING_LAYER_WEIGHT, HEAVY_BASE, INNER_LAYER_WEIGHT, LIGHT_BASE, MAX_REDUCTION, MEDIUM_BASE,
    MIN_REDUCTION_FLOOR, OUTER_LAYER_WEIGHT,
};
use serde::{Deserialize, Serialize};

/// Tunable constants for armour reduction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefenseConstants {
    #[serde(default)]
    pub armor_classes: ArmorClassConstants,
    #[serde(default)]
    pub layers: LayerWeights,
    /// Hard cap on any reduction
    #[serde(default = "default_max_reduction")]
    pub max_reduction: f64,
    /// Positive reductions below this are raised to it
    #[serde(default = "default_min_floor")]
    pub min_reduction_floor: f64,
}

impl Default for DefenseConstants {
    fn default() -> Self {
        DefenseConstants {
            armor_classes: ArmorClassConstants::default(),
            layers: LayerWeights::default(),
            max_reduction: MAX_REDUCTION,
            min_reduction_floor: MIN_REDUCTION_FLOOR,
        }
    }
}

impl DefenseConstants {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.max_reduction > 0.0 && self.max_reduction <= 1.0) {
            return Err(ConfigError::ValidationError(format!(
                "max_reduction must be in (0, 1], got {}",
                self.max_reduction
            )));
        }
        if !(self.min_reduction_floor >= 0.0 && self.min_reduction_floor <= self.max_reduction) {
            return Err(ConfigError::ValidationError(format!(
                "min_reduction_floor must be in [0, {}], got {}",
                self.max_reduction, self.min_reduction_floor
            )));
        }

        let weights = [
            ("outer", self.layers.outer),
            ("inner", self.layers.inner),
            ("binding", self.layers.binding),
        ];
        for (layer, weight) in weights {
            if !(weight.is_finite() && weight >= 0.0) {
                return Err(ConfigError::ValidationError(format!(
                    "{layer} layer weight must be non-negative, got {weight}"
                )));
            }
        }

        let classes = [
            ("light", self.armor_classes.light),
            ("medium", self.armor_classes.medium),
            ("heavy", self.armor_classes.heavy),
        ];
        for (class, base) in classes {
            for value in [base.physical, base.magical] {
                if !(0.0..=1.0).contains(&value) {
                    return Err(ConfigError::ValidationError(format!(
                        "{class} armour base must be in [0, 1], got {value}"
                    )));
                }
            }
        }

        Ok(())
    }
}

fn default_max_reduction() -> f64 {
    MAX_REDUCTION
}
fn default_min_floor() -> f64 {
    MIN_REDUCTION_FLOOR
}

/// Base reduction multipliers for one armour class
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArmorClassBase {
    pub physical: f64,
    pub magical: f64,
}

impl ArmorClassBase {
    pub const NONE: ArmorClassBase = ArmorClassBase {
        physical: 0.0,
        magical: 0.0,
    };

    const fn uniform(value: f64) -> Self {
        ArmorClassBase {
            physical: value,
            magical: value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArmorClassConstants {
    #[serde(default = "default_light")]
    pub light: ArmorClassBase,
    #[serde(default = "default_medium")]
    pub medium: ArmorClassBase,
    #[serde(default = "default_heavy")]
    pub heavy: ArmorClassBase,
}

impl Default for ArmorClassConstants {
    fn default() -> Self {
        ArmorClassConstants {
            light: default_light(),
            medium: default_medium(),
            heavy: default_heavy(),
        }
    }
}

fn default_light() -> ArmorClassBase {
    ArmorClassBase::uniform(LIGHT_BASE)
}
fn default_medium() -> ArmorClassBase {
    ArmorClassBase::uniform(MEDIUM_BASE)
}
fn default_heavy() -> ArmorClassBase {
    ArmorClassBase::uniform(HEAVY_BASE)
}

/// Contribution of each armour layer to the combined factor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerWeights {
    #[serde(default = "default_outer")]
    pub outer: f64,
    #[serde(default = "default_inner")]
    pub inner: f64,
    #[serde(default = "default_binding")]
    pub binding: f64,
}

impl Default for LayerWeights {
    fn default() -> Self {
        LayerWeights {
            outer: OUTER_LAYER_WEIGHT,
            inner: INNER_LAYER_WEIGHT,
            binding: BINDING_LAYER_WEIGHT,
        }
    }
}

fn default_outer() -> f64 {
    OUTER_LAYER_WEIGHT
}
fn default_inner() -> f64 {
    INNER_LAYER_WEIGHT
}
fn default_binding() -> f64 {
    BINDING_LAYER_WEIGHT
}
