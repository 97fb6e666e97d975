//! Per-batch median statistics used for imputation

use super::median;
use crate::material::MaterialRecord;
use crate::types::Property;
use std::collections::HashMap;

/// Class name given to materials without a `class`
pub const GLOBAL_CLASS: &str = "global";

/// Typical UTS:YS ratio for engineering materials, used when a batch gives
/// no better estimate
pub const FALLBACK_STRENGTH_RATIO: f64 = 1.3;

/// Medians and ratios for one scoring batch
///
/// Built once per invocation and read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchStatistics {
    global_medians: HashMap<Property, f64>,
    class_medians: HashMap<String, HashMap<Property, f64>>,
    class_ratios: HashMap<String, f64>,
    global_ratio: f64,
    median_specific_stiffness: Option<f64>,
}

impl BatchStatistics {
    /// Aggregate the base properties of a batch, per class and globally
    pub fn compute(materials: &[MaterialRecord]) -> Self {
        let mut class_values: HashMap<&str, HashMap<Property, Vec<f64>>> = HashMap::new();
        let mut global_values: HashMap<Property, Vec<f64>> = HashMap::new();

        for material in materials {
            let bucket = class_values.entry(material.class_key()).or_default();
            for property in Property::BASE {
                if let Some(value) = material.get(property) {
                    bucket.entry(property).or_default().push(value);
                    global_values.entry(property).or_default().push(value);
                }
            }
        }

        let global_medians = medians_of(&global_values);
        let class_medians: HashMap<String, HashMap<Property, f64>> = class_values
            .iter()
            .map(|(class, values)| (class.to_string(), medians_of(values)))
            .collect();
        let class_ratios = class_medians
            .iter()
            .map(|(class, medians)| (class.clone(), strength_ratio(medians)))
            .collect();
        let global_ratio = strength_ratio(&global_medians);

        let stiffness: Vec<f64> = materials
            .iter()
            .filter_map(|m| {
                specific_stiffness(m.get(Property::ElasticModulus), m.get(Property::Density))
            })
            .collect();

        tracing::trace!(
            classes = class_medians.len(),
            global_ratio,
            "computed batch statistics"
        );

        BatchStatistics {
            global_medians,
            class_medians,
            class_ratios,
            global_ratio,
            median_specific_stiffness: median(&stiffness),
        }
    }

    /// Median of a property within a class, if the class supplied it
    pub fn class_median(&self, class: &str, property: Property) -> Option<f64> {
        self.class_medians
            .get(class)
            .and_then(|medians| medians.get(&property))
            .copied()
    }

    /// Median of a property over the whole batch
    pub fn global_median(&self, property: Property) -> Option<f64> {
        self.global_medians.get(&property).copied()
    }

    /// Class median, falling back to the global median
    pub fn median(&self, class: &str, property: Property) -> Option<f64> {
        self.class_median(class, property)
            .or_else(|| self.global_median(property))
    }

    /// UTS:YS ratio for a class, falling back to the batch-wide ratio
    pub fn strength_ratio(&self, class: &str) -> f64 {
        self.class_ratios
            .get(class)
            .copied()
            .unwrap_or(self.global_ratio)
    }

    pub fn global_strength_ratio(&self) -> f64 {
        self.global_ratio
    }

    /// Median E/density over materials that supplied both
    pub fn median_specific_stiffness(&self) -> Option<f64> {
        self.median_specific_stiffness
    }

    /// Classes seen in the batch
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.class_medians.keys().map(String::as_str)
    }
}

fn medians_of(values: &HashMap<Property, Vec<f64>>) -> HashMap<Property, f64> {
    values
        .iter()
        .filter_map(|(property, list)| median(list).map(|m| (*property, m)))
        .collect()
}

fn strength_ratio(medians: &HashMap<Property, f64>) -> f64 {
    match (
        medians.get(&Property::YieldStrength),
        medians.get(&Property::TensileStrength),
    ) {
        (Some(&ys), Some(&uts)) if ys != 0.0 && uts != 0.0 => uts / ys,
        _ => FALLBACK_STRENGTH_RATIO,
    }
}

/// E/density when both are present and the quotient is finite
pub(crate) fn specific_stiffness(elastic_modulus: Option<f64>, density: Option<f64>) -> Option<f64> {
    let ratio = elastic_modulus? / density?;
    ratio.is_finite().then_some(ratio)
}
