//! Factors - the persisted per-material score shape read by gameplay code

use crate::material::ScoredMaterial;
use crate::types::{Element, PhysicalType};
use serde::{Deserialize, Serialize};

/// Which scores populate the offensive `slash/pierce/blunt` slots
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorSource {
    /// Offensive and defensive slots both take the `R_*` channels
    #[default]
    Resistance,
    /// Offensive slots take the `D_*` scores, defensive slots `R_*`
    Damage,
}

/// Material factors as stored in the material database
///
/// Missing keys read as 0 so partially filled entries still load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Factors {
    pub slash: f64,
    pub pierce: f64,
    pub blunt: f64,
    pub defense_slash: f64,
    pub defense_pierce: f64,
    pub defense_blunt: f64,
    pub fire: f64,
    pub water: f64,
    pub wind: f64,
    pub earth: f64,
}

impl Factors {
    /// Every slot set to `value`
    pub fn uniform(value: f64) -> Self {
        Factors {
            slash: value,
            pierce: value,
            blunt: value,
            defense_slash: value,
            defense_pierce: value,
            defense_blunt: value,
            fire: value,
            water: value,
            wind: value,
            earth: value,
        }
    }

    /// Build the persisted shape from a scored material
    pub fn from_scored(scored: &ScoredMaterial, source: FactorSource) -> Self {
        let r = &scored.resistance;
        let (slash, pierce, blunt) = match source {
            FactorSource::Resistance => (r.slash, r.pierce, r.blunt),
            FactorSource::Damage => (scored.damage.slash, scored.damage.pierce, scored.damage.blunt),
        };

        Factors {
            slash,
            pierce,
            blunt,
            defense_slash: r.slash,
            defense_pierce: r.pierce,
            defense_blunt: r.blunt,
            fire: r.fire,
            water: r.water,
            wind: r.wind,
            earth: r.earth,
        }
    }

    /// Offensive factor for a physical damage type
    pub fn offense(&self, damage_type: PhysicalType) -> f64 {
        match damage_type {
            PhysicalType::Slash => self.slash,
            PhysicalType::Pierce => self.pierce,
            PhysicalType::Blunt => self.blunt,
        }
    }

    pub fn offense_mut(&mut self, damage_type: PhysicalType) -> &mut f64 {
        match damage_type {
            PhysicalType::Slash => &mut self.slash,
            PhysicalType::Pierce => &mut self.pierce,
            PhysicalType::Blunt => &mut self.blunt,
        }
    }

    /// Defensive factor for a physical damage type
    pub fn defense(&self, damage_type: PhysicalType) -> f64 {
        match damage_type {
            PhysicalType::Slash => self.defense_slash,
            PhysicalType::Pierce => self.defense_pierce,
            PhysicalType::Blunt => self.defense_blunt,
        }
    }

    pub fn elemental(&self, element: Element) -> f64 {
        match element {
            Element::Fire => self.fire,
            Element::Earth => self.earth,
            Element::Water => self.water,
            Element::Wind => self.wind,
        }
    }
}
