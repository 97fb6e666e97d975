//! Channel formulas - weighted blends of normalized property signals

use crate::material::{DamageScores, EnrichedMaterial, ResistanceScores};
use crate::stats::NormalizationBounds;
use crate::types::Property;

/// Normalized [0, 1] inputs for one material
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Signals {
    pub hardness: f64,
    pub yield_strength: f64,
    pub tensile_strength: f64,
    pub elastic_modulus: f64,
    pub density: f64,
    pub specific_stiffness: f64,
    /// `1 - k`: low conductivity reads high
    pub insulation: f64,
    pub specific_heat: f64,
    pub melting_point: f64,
    pub resistivity: f64,
}

impl Signals {
    /// Normalize a material against its class bounds
    pub fn from_material(material: &EnrichedMaterial, bounds: &NormalizationBounds) -> Self {
        let class = material.class_key();
        let norm = |property| bounds.normalize(class, property, material.get(property));

        Signals {
            hardness: norm(Property::HardnessProxy),
            yield_strength: norm(Property::YieldStrength),
            tensile_strength: norm(Property::TensileStrength),
            elastic_modulus: norm(Property::ElasticModulus),
            density: norm(Property::Density),
            specific_stiffness: norm(Property::SpecificStiffness),
            insulation: bounds.normalize_inverse(
                class,
                Property::ThermalConductivity,
                material.get(Property::ThermalConductivity),
            ),
            specific_heat: norm(Property::SpecificHeat),
            melting_point: norm(Property::MeltingPoint),
            resistivity: norm(Property::ElectricalResistivity),
        }
    }

    /// Defensive channels before any options are applied
    pub fn resistance(&self) -> ResistanceScores {
        ResistanceScores {
            slash: 0.50 * self.hardness + 0.30 * self.yield_strength + 0.20 * self.elastic_modulus,
            pierce: 0.45 * self.hardness + 0.35 * self.yield_strength + 0.20 * self.tensile_strength,
            blunt: 0.35 * self.elastic_modulus + 0.35 * self.yield_strength + 0.30 * self.density,
            fire: 0.45 * self.melting_point + 0.35 * self.specific_heat + 0.20 * self.insulation,
            earth: 0.50 * self.hardness + 0.30 * self.elastic_modulus + 0.20 * self.density,
            water: 0.45 * self.resistivity
                + 0.25 * self.hardness
                + 0.15 * self.insulation
                + 0.15 * self.specific_heat,
            wind: 0.40 * self.specific_stiffness + 0.30 * self.hardness + 0.30 * self.resistivity,
        }
    }

    /// Offensive scores: hardness cuts, tensile strength pierces, mass crushes
    pub fn damage(&self) -> DamageScores {
        DamageScores {
            slash: self.hardness,
            pierce: self.tensile_strength,
            blunt: self.density,
        }
    }
}
