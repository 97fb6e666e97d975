//! Material records at each stage of the scoring pipeline
//!
//! - `MaterialRecord`: raw input, any property may be missing
//! - `EnrichedMaterial`: imputed properties plus hardness proxy and specific stiffness
//! - `ScoredMaterial`: enriched material plus offensive and defensive scores

use crate::stats::GLOBAL_CLASS;
use crate::types::{Channel, Element, PhysicalType, Property};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Raw material properties as loaded from a material family file
///
/// Units are up to the caller but must agree across one batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaterialRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Grouping tag used to scope statistics (e.g. "Metal", "Wood")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(rename = "YS", alias = "yieldStrength", default, skip_serializing_if = "Option::is_none")]
    pub yield_strength: Option<f64>,
    #[serde(rename = "UTS", alias = "tensileStrength", default, skip_serializing_if = "Option::is_none")]
    pub tensile_strength: Option<f64>,
    #[serde(rename = "E", alias = "elasticModulus", default, skip_serializing_if = "Option::is_none")]
    pub elastic_modulus: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub density: Option<f64>,
    #[serde(rename = "k", alias = "thermalConductivity", default, skip_serializing_if = "Option::is_none")]
    pub thermal_conductivity: Option<f64>,
    #[serde(rename = "cp", alias = "specificHeat", default, skip_serializing_if = "Option::is_none")]
    pub specific_heat: Option<f64>,
    #[serde(rename = "Tm", alias = "meltingPoint", default, skip_serializing_if = "Option::is_none")]
    pub melting_point: Option<f64>,
    #[serde(rename = "re", alias = "electricalResistivity", default, skip_serializing_if = "Option::is_none")]
    pub electrical_resistivity: Option<f64>,
    #[serde(rename = "brinellMPa", default, skip_serializing_if = "Option::is_none")]
    pub brinell_mpa: Option<f64>,
    /// Brinell hardness number (HB)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brinell: Option<f64>,
    #[serde(rename = "vickersMPa", default, skip_serializing_if = "Option::is_none")]
    pub vickers_mpa: Option<f64>,
    /// Vickers hardness number (HV)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vickers: Option<f64>,
    /// Any other keys, carried through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MaterialRecord {
    /// Create an empty record with a name
    pub fn named(name: impl Into<String>) -> Self {
        MaterialRecord {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Builder-style class assignment
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Builder-style property assignment
    pub fn with(mut self, property: Property, value: f64) -> Self {
        self.set(property, Some(value));
        self
    }

    /// Class used for statistics, `"global"` when untagged
    pub fn class_key(&self) -> &str {
        self.class.as_deref().unwrap_or(GLOBAL_CLASS)
    }

    /// Read a base property; non-finite values count as missing.
    /// Derived properties are never stored on a raw record.
    pub fn get(&self, property: Property) -> Option<f64> {
        let value = match property {
            Property::YieldStrength => self.yield_strength,
            Property::TensileStrength => self.tensile_strength,
            Property::ElasticModulus => self.elastic_modulus,
            Property::Density => self.density,
            Property::ThermalConductivity => self.thermal_conductivity,
            Property::SpecificHeat => self.specific_heat,
            Property::MeltingPoint => self.melting_point,
            Property::ElectricalResistivity => self.electrical_resistivity,
            Property::HardnessProxy | Property::SpecificStiffness => None,
        };
        value.filter(|v| v.is_finite())
    }

    /// Write a base property. Derived properties are ignored.
    pub fn set(&mut self, property: Property, value: Option<f64>) {
        let slot = match property {
            Property::YieldStrength => &mut self.yield_strength,
            Property::TensileStrength => &mut self.tensile_strength,
            Property::ElasticModulus => &mut self.elastic_modulus,
            Property::Density => &mut self.density,
            Property::ThermalConductivity => &mut self.thermal_conductivity,
            Property::SpecificHeat => &mut self.specific_heat,
            Property::MeltingPoint => &mut self.melting_point,
            Property::ElectricalResistivity => &mut self.electrical_resistivity,
            Property::HardnessProxy | Property::SpecificStiffness => return,
        };
        *slot = value;
    }
}

/// A record with every imputable property filled and derived values attached
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnrichedMaterial {
    #[serde(flatten)]
    pub record: MaterialRecord,
    /// Hardness proxy in the same pressure unit as YS/UTS
    #[serde(rename = "H_MP", default, skip_serializing_if = "Option::is_none")]
    pub hardness_mpa: Option<f64>,
    /// Elastic modulus over density
    #[serde(rename = "SS", default, skip_serializing_if = "Option::is_none")]
    pub specific_stiffness: Option<f64>,
}

impl EnrichedMaterial {
    pub fn class_key(&self) -> &str {
        self.record.class_key()
    }

    pub fn name(&self) -> Option<&str> {
        self.record.name.as_deref()
    }

    /// Read any tracked property, including the derived ones
    pub fn get(&self, property: Property) -> Option<f64> {
        match property {
            Property::HardnessProxy => self.hardness_mpa.filter(|v| v.is_finite()),
            Property::SpecificStiffness => self.specific_stiffness.filter(|v| v.is_finite()),
            _ => self.record.get(property),
        }
    }
}

/// Offensive scores (`D_*`), normalized hardness, tensile strength and density
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DamageScores {
    #[serde(rename = "D_slash")]
    pub slash: f64,
    #[serde(rename = "D_pierce")]
    pub pierce: f64,
    #[serde(rename = "D_blunt")]
    pub blunt: f64,
}

impl DamageScores {
    pub fn get(&self, damage_type: PhysicalType) -> f64 {
        match damage_type {
            PhysicalType::Slash => self.slash,
            PhysicalType::Pierce => self.pierce,
            PhysicalType::Blunt => self.blunt,
        }
    }

    pub(crate) fn map(self, f: impl Fn(f64) -> f64) -> Self {
        DamageScores {
            slash: f(self.slash),
            pierce: f(self.pierce),
            blunt: f(self.blunt),
        }
    }
}

/// Defensive channel scores (`R_*`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ResistanceScores {
    #[serde(rename = "R_slash")]
    pub slash: f64,
    #[serde(rename = "R_pierce")]
    pub pierce: f64,
    #[serde(rename = "R_blunt")]
    pub blunt: f64,
    #[serde(rename = "R_fire")]
    pub fire: f64,
    #[serde(rename = "R_earth")]
    pub earth: f64,
    #[serde(rename = "R_water")]
    pub water: f64,
    #[serde(rename = "R_wind")]
    pub wind: f64,
}

impl ResistanceScores {
    pub fn get(&self, channel: Channel) -> f64 {
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

    pub fn get_mut(&mut self, channel: Channel) -> &mut f64 {
        match channel {
            Channel::Physical(PhysicalType::Slash) => &mut self.slash,
            Channel::Physical(PhysicalType::Pierce) => &mut self.pierce,
            Channel::Physical(PhysicalType::Blunt) => &mut self.blunt,
            Channel::Elemental(Element::Fire) => &mut self.fire,
            Channel::Elemental(Element::Earth) => &mut self.earth,
            Channel::Elemental(Element::Water) => &mut self.water,
            Channel::Elemental(Element::Wind) => &mut self.wind,
        }
    }

    /// Apply `f` to every channel
    pub fn map(mut self, f: impl Fn(f64) -> f64) -> Self {
        for &channel in Channel::all() {
            let value = self.get_mut(channel);
            *value = f(*value);
        }
        self
    }
}

/// Output keys owned by `DamageScores` and `ResistanceScores`
const SCORE_KEYS: [&str; 10] = [
    "D_slash", "D_pierce", "D_blunt", "R_slash", "R_pierce", "R_blunt", "R_fire", "R_earth",
    "R_water", "R_wind",
];

/// Final output of the scorer for one material
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "ScoredFields")]
pub struct ScoredMaterial {
    #[serde(flatten)]
    pub material: EnrichedMaterial,
    #[serde(flatten)]
    pub damage: DamageScores,
    #[serde(flatten)]
    pub resistance: ResistanceScores,
}

/// Wire shape of a scored material. The record's catch-all map sees every
/// key, so the score keys are dropped from it on the way in.
#[derive(Deserialize)]
struct ScoredFields {
    #[serde(flatten)]
    material: EnrichedMaterial,
    #[serde(flatten)]
    damage: DamageScores,
    #[serde(flatten)]
    resistance: ResistanceScores,
}

impl From<ScoredFields> for ScoredMaterial {
    fn from(fields: ScoredFields) -> Self {
        let mut material = fields.material;
        for key in SCORE_KEYS {
            material.record.extra.remove(key);
        }
        ScoredMaterial {
            material,
            damage: fields.damage,
            resistance: fields.resistance,
        }
    }
}

impl ScoredMaterial {
    pub fn name(&self) -> Option<&str> {
        self.material.name()
    }

    pub fn class_key(&self) -> &str {
        self.material.class_key()
    }
}
