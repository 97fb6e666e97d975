//! Armour - damage reduction from the factors of an armour piece's layers

use crate::category::MaterialDatabase;
use crate::config::{ArmorClassBase, DefenseConstants};
use crate::factors::Factors;
use crate::stats::clamp01;
use crate::types::{Channel, Element, PhysicalType};
use serde::{Deserialize, Serialize};

/// Weight class of an armour piece
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArmorClass {
    #[default]
    None,
    Light,
    Medium,
    Heavy,
}

impl ArmorClass {
    pub fn all() -> &'static [ArmorClass] {
        &[
            ArmorClass::None,
            ArmorClass::Light,
            ArmorClass::Medium,
            ArmorClass::Heavy,
        ]
    }

    /// Base multipliers for this class
    pub fn base(self, constants: &DefenseConstants) -> ArmorClassBase {
        match self {
            ArmorClass::None => ArmorClassBase::NONE,
            ArmorClass::Light => constants.armor_classes.light,
            ArmorClass::Medium => constants.armor_classes.medium,
            ArmorClass::Heavy => constants.armor_classes.heavy,
        }
    }
}

/// Factors of the three material layers of an armour piece
///
/// A missing layer contributes nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArmorLayers<'a> {
    pub outer: Option<&'a Factors>,
    pub inner: Option<&'a Factors>,
    pub binding: Option<&'a Factors>,
}

impl<'a> ArmorLayers<'a> {
    /// Look up each layer as a `(category, material name)` pair
    pub fn from_database(
        db: &'a MaterialDatabase,
        outer: (&str, &str),
        inner: (&str, &str),
        binding: (&str, &str),
    ) -> Self {
        ArmorLayers {
            outer: db.factors_for(outer.0, outer.1),
            inner: db.factors_for(inner.0, inner.1),
            binding: db.factors_for(binding.0, binding.1),
        }
    }

    /// Weighted sum of `f` over the layers
    fn combine(&self, constants: &DefenseConstants, f: impl Fn(&Factors) -> f64) -> f64 {
        let weights = &constants.layers;
        [
            (self.outer, weights.outer),
            (self.inner, weights.inner),
            (self.binding, weights.binding),
        ]
        .into_iter()
        .map(|(layer, weight)| layer.map_or(0.0, &f) * weight)
        .sum()
    }
}

/// Reduction for one damage type
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Reduction {
    /// Fraction of incoming damage removed
    pub value: f64,
    /// Whether the value was raised to the minimum floor
    pub floored: bool,
}

/// Reductions for every damage type
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DefenseProfile {
    pub slash: Reduction,
    pub pierce: Reduction,
    pub blunt: Reduction,
    pub fire: Reduction,
    pub earth: Reduction,
    pub water: Reduction,
    pub wind: Reduction,
}

impl DefenseProfile {
    pub fn get(&self, channel: Channel) -> Reduction {
        match channel {
            Channel::Physical(PhysicalType::Slash) => self.slash,
            Channel::Physical(PhysicalType::Pierce) => self.pierce,
            Channel::Physical(PhysicalType::Blunt) => self.blunt,
            Channel::Elemental(Element::Fire) => self.fire,
            Channel::Elemental(Element::Earth) => self.earth,
            Channel::Elemental(Element::Water) => self.water,
            Channel::Elemental(Element::Wind) => self.wind,
        }
    }
}

/// Calculate the damage reduction of an armour piece
///
/// Physical types combine `factor × defense_factor` per layer; elements use
/// the elemental factor alone. The combined value is scaled by the armour
/// class base, capped, and raised to the floor when positive but tiny.
///
/// # Arguments
/// * `class` - The armour piece's weight class
/// * `layers` - Factors of the outer, inner and binding materials
/// * `constants` - Class bases, layer weights, cap and floor
pub fn effective_reduction(
    class: ArmorClass,
    layers: &ArmorLayers<'_>,
    constants: &DefenseConstants,
) -> DefenseProfile {
    let base = class.base(constants);

    let physical = |damage_type: PhysicalType| {
        let combined = layers.combine(constants, |f| f.offense(damage_type) * f.defense(damage_type));
        finish(base.physical * combined, constants)
    };
    let elemental = |element: Element| {
        let combined = layers.combine(constants, |f| f.elemental(element));
        finish(base.magical * combined, constants)
    };

    DefenseProfile {
        slash: physical(PhysicalType::Slash),
        pierce: physical(PhysicalType::Pierce),
        blunt: physical(PhysicalType::Blunt),
        fire: elemental(Element::Fire),
        earth: elemental(Element::Earth),
        water: elemental(Element::Water),
        wind: elemental(Element::Wind),
    }
}

fn finish(raw: f64, constants: &DefenseConstants) -> Reduction {
    let value = clamp01(raw).min(constants.max_reduction);
    if value > 0.0 && value < constants.min_reduction_floor {
        Reduction {
            value: constants.min_reduction_floor,
            floored: true,
        }
    } else {
        Reduction {
            value,
            floored: false,
        }
    }
}

/// Damage left after a reduction is applied
pub fn damage_after_reduction(damage: f64, reduction: Reduction) -> f64 {
    if damage <= 0.0 {
        return 0.0;
    }
    (damage * (1.0 - reduction.value)).max(0.0)
}
