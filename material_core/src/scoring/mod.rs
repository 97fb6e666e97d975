//! Material defense scoring
//!
//! Turns a batch of raw material records into bounded [0, 1] scores:
//!
//! 1. Batch statistics (per-class and global medians, UTS:YS ratios)
//! 2. Imputation of missing properties, hardness proxy, specific stiffness
//! 3. Per-class percentile normalization bounds
//! 4. Weighted channel formulas
//! 5. Thickness, bias, attunement, minimum defense, feel transform
//!
//! Bounds are batch-scoped, so score one material family per call.

mod channels;
mod impute;
mod options;

pub use channels::Signals;
pub use impute::{
    impute, impute_material, HARDNESS_TO_MPA, TENSILE_HARDNESS_FACTOR, YIELD_HARDNESS_FACTOR,
};
pub use options::{feel_transform, ArmorBias, Attunement, ScoringOptions};

use crate::material::{EnrichedMaterial, MaterialRecord, ScoredMaterial};
use crate::stats::{round_to, BatchStatistics, NormalizationBounds};

/// Score a batch of materials
///
/// Output has the same length and order as the input. Never fails: missing
/// data falls back through class and global medians, and properties absent
/// from the whole batch normalize to 0.
pub fn score(materials: &[MaterialRecord], options: &ScoringOptions) -> Vec<ScoredMaterial> {
    let stats = BatchStatistics::compute(materials);
    let enriched = impute(materials, &stats);
    let bounds = NormalizationBounds::build(&enriched);

    tracing::debug!(
        materials = materials.len(),
        classes = stats.classes().count(),
        "scoring material batch"
    );

    score_enriched(enriched, &bounds, options)
}

/// Score already-enriched materials against precomputed bounds
pub fn score_enriched(
    enriched: Vec<EnrichedMaterial>,
    bounds: &NormalizationBounds,
    options: &ScoringOptions,
) -> Vec<ScoredMaterial> {
    enriched
        .into_iter()
        .map(|material| score_material(material, bounds, options))
        .collect()
}

fn score_material(
    material: EnrichedMaterial,
    bounds: &NormalizationBounds,
    options: &ScoringOptions,
) -> ScoredMaterial {
    let signals = Signals::from_material(&material, bounds);

    let mut damage = signals.damage();
    let mut resistance = options.finish(options.adjust(signals.resistance()));

    if let Some(places) = options.precision {
        damage = damage.map(|v| round_to(v, places));
        resistance = resistance.map(|v| round_to(v, places));
    }

    ScoredMaterial {
        material,
        damage,
        resistance,
    }
}
