//! Percentile-trimmed normalization bounds, per class and batch-wide

use super::{clamp01, GLOBAL_CLASS};
use crate::material::EnrichedMaterial;
use crate::types::Property;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Buckets smaller than this keep their full range
const PERCENTILE_MIN_SAMPLES: usize = 20;
const LOWER_PERCENTILE: f64 = 0.05;
const UPPER_PERCENTILE: f64 = 0.95;

/// Normalization range `[a, b]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub a: f64,
    pub b: f64,
}

impl Bounds {
    /// Bounds over the finite values in `values`
    ///
    /// Small samples use min/max; from 20 samples on, the 5th and 95th
    /// percentile entries are used so outliers don't flatten the range.
    pub fn from_values(values: &[f64]) -> Option<Bounds> {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(f64::total_cmp);

        let n = sorted.len();
        if n < PERCENTILE_MIN_SAMPLES {
            return Some(Bounds {
                a: sorted[0],
                b: sorted[n - 1],
            });
        }

        let span = (n - 1) as f64;
        let lower = (LOWER_PERCENTILE * span).floor() as usize;
        let upper = ((UPPER_PERCENTILE * span).ceil() as usize).min(n - 1);
        Some(Bounds {
            a: sorted[lower],
            b: sorted[upper],
        })
    }

    pub fn is_degenerate(&self) -> bool {
        self.a == self.b
    }

    /// `(x - a) / (b - a)` clamped to [0, 1]; 0 for a degenerate range
    pub fn normalize(&self, value: f64) -> f64 {
        if self.is_degenerate() {
            return 0.0;
        }
        clamp01((value - self.a) / (self.b - self.a))
    }

    /// Normalization against flipped bounds: 1 at `a`, 0 at `b`
    ///
    /// Equals `1 - normalize(value)` on a proper range, but stays 0 on a
    /// degenerate one.
    pub fn normalize_inverse(&self, value: f64) -> f64 {
        if self.is_degenerate() {
            return 0.0;
        }
        clamp01((self.b - value) / (self.b - self.a))
    }
}

/// Bounds for every normalized property, per class with a global fallback
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizationBounds {
    global: HashMap<Property, Bounds>,
    by_class: HashMap<String, HashMap<Property, Bounds>>,
}

impl NormalizationBounds {
    /// Build bounds over an enriched batch
    ///
    /// A class with no values for a property inherits the global bounds.
    /// Unclassed materials get no bucket of their own and always read the
    /// global bounds.
    pub fn build(materials: &[EnrichedMaterial]) -> Self {
        let mut global_buckets: HashMap<Property, Vec<f64>> = HashMap::new();
        let mut class_buckets: HashMap<&str, HashMap<Property, Vec<f64>>> = HashMap::new();

        for material in materials {
            let class = material.class_key();
            for property in Property::NORMALIZED {
                if let Some(value) = material.get(property) {
                    global_buckets.entry(property).or_default().push(value);
                    if class != GLOBAL_CLASS {
                        class_buckets
                            .entry(class)
                            .or_default()
                            .entry(property)
                            .or_default()
                            .push(value);
                    }
                }
            }
        }

        let global: HashMap<Property, Bounds> = global_buckets
            .iter()
            .filter_map(|(property, values)| Bounds::from_values(values).map(|b| (*property, b)))
            .collect();

        let by_class = class_buckets
            .iter()
            .map(|(class, buckets)| {
                let bounds = Property::NORMALIZED
                    .iter()
                    .filter_map(|property| {
                        let own = buckets
                            .get(property)
                            .filter(|values| !values.is_empty())
                            .and_then(|values| Bounds::from_values(values));
                        own.or_else(|| global.get(property).copied())
                            .map(|b| (*property, b))
                    })
                    .collect();
                (class.to_string(), bounds)
            })
            .collect();

        NormalizationBounds { global, by_class }
    }

    /// Bounds for a property within a class (global bounds for unseen
    /// classes and unclassed materials)
    pub fn get(&self, class: &str, property: Property) -> Option<Bounds> {
        if class == GLOBAL_CLASS {
            return self.global(property);
        }
        self.by_class
            .get(class)
            .and_then(|bounds| bounds.get(&property))
            .or_else(|| self.global.get(&property))
            .copied()
    }

    pub fn global(&self, property: Property) -> Option<Bounds> {
        self.global.get(&property).copied()
    }

    /// Normalized signal for a value; 0 when the value or bounds are missing
    pub fn normalize(&self, class: &str, property: Property, value: Option<f64>) -> f64 {
        match (value, self.get(class, property)) {
            (Some(value), Some(bounds)) => bounds.normalize(value),
            _ => 0.0,
        }
    }

    /// Inverted signal (low raw value reads high); 0 when undefined
    pub fn normalize_inverse(&self, class: &str, property: Property, value: Option<f64>) -> f64 {
        match (value, self.get(class, property)) {
            (Some(value), Some(bounds)) => bounds.normalize_inverse(value),
            _ => 0.0,
        }
    }
}
