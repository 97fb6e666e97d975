//! Missing-value imputation and derived properties
//!
//! Fallback order per field:
//! - `YS`: own value → `UTS / ratio` → class median → global median
//! - `UTS`: own value → `YS × ratio` → class median → global median
//! - `E`, `density`, `k`, `cp`, `Tm`, `re`: own value → class median → global median
//! - `H_MP`: max of Brinell MPa, Vickers MPa, `YS × 3`, `UTS × 2`
//! - `SS`: `E / density` → batch median of `E / density`

use crate::material::{EnrichedMaterial, MaterialRecord};
use crate::stats::{specific_stiffness, BatchStatistics};
use crate::types::Property;

/// Hardness number (HB/HV, kgf/mm²) to MPa
pub const HARDNESS_TO_MPA: f64 = 9.807;

/// Empirical hardness-to-yield-strength ratio
pub const YIELD_HARDNESS_FACTOR: f64 = 3.0;

/// Empirical hardness-to-tensile-strength ratio
pub const TENSILE_HARDNESS_FACTOR: f64 = 2.0;

/// Properties filled purely from medians
const MEDIAN_FILLED: [Property; 6] = [
    Property::ElasticModulus,
    Property::Density,
    Property::ThermalConductivity,
    Property::SpecificHeat,
    Property::MeltingPoint,
    Property::ElectricalResistivity,
];

/// Impute every material of a batch against its statistics
pub fn impute(materials: &[MaterialRecord], stats: &BatchStatistics) -> Vec<EnrichedMaterial> {
    materials.iter().map(|m| impute_material(m, stats)).collect()
}

/// Fill one record's missing properties and derive `H_MP` and `SS`
pub fn impute_material(material: &MaterialRecord, stats: &BatchStatistics) -> EnrichedMaterial {
    let class = material.class_key();
    let ratio = stats.strength_ratio(class);
    let mut record = material.clone();

    let (yield_strength, tensile_strength) = match (
        material.get(Property::YieldStrength),
        material.get(Property::TensileStrength),
    ) {
        (Some(ys), Some(uts)) => (Some(ys), Some(uts)),
        (None, Some(uts)) => (Some(uts / ratio), Some(uts)),
        (Some(ys), None) => (Some(ys), Some(ys * ratio)),
        (None, None) => (
            stats.median(class, Property::YieldStrength),
            stats.median(class, Property::TensileStrength),
        ),
    };
    record.set(Property::YieldStrength, yield_strength);
    record.set(Property::TensileStrength, tensile_strength);

    for property in MEDIAN_FILLED {
        let value = material
            .get(property)
            .or_else(|| stats.median(class, property));
        record.set(property, value);
    }

    record.brinell_mpa = hardness_mpa(material.brinell_mpa, material.brinell);
    record.vickers_mpa = hardness_mpa(material.vickers_mpa, material.vickers);

    let hardness = hardness_proxy(&record);
    let stiffness = specific_stiffness(
        record.get(Property::ElasticModulus),
        record.get(Property::Density),
    )
    .or(stats.median_specific_stiffness());

    EnrichedMaterial {
        record,
        hardness_mpa: hardness,
        specific_stiffness: stiffness,
    }
}

/// Measured value in MPa, or the hardness number converted to MPa
fn hardness_mpa(mpa: Option<f64>, number: Option<f64>) -> Option<f64> {
    let mpa = mpa.filter(|v| v.is_finite());
    let number = number.filter(|v| v.is_finite());
    mpa.or(number.map(|n| n * HARDNESS_TO_MPA))
}

/// Hardest of the available hardness estimates
fn hardness_proxy(record: &MaterialRecord) -> Option<f64> {
    [
        record.brinell_mpa,
        record.vickers_mpa,
        record
            .get(Property::YieldStrength)
            .map(|ys| ys * YIELD_HARDNESS_FACTOR),
        record
            .get(Property::TensileStrength)
            .map(|uts| uts * TENSILE_HARDNESS_FACTOR),
    ]
    .into_iter()
    .flatten()
    .filter(|v| v.is_finite())
    .reduce(f64::max)
}
