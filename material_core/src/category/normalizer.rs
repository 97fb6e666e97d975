//! Category-relative rescaling of the physical damage factors
//!
//! Within each top-level category, every material's `slash`, `pierce` and
//! `blunt` factor is divided by that category's maximum, so the strongest
//! material of each category reads 1.0. Elemental and `defense_*` factors
//! are left alone.
//!
//! Not idempotent on arbitrary data: run it once, after every batch has
//! been scored and attached.

use super::{CategoryNode, MaterialDatabase};
use crate::types::PhysicalType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Caller policy for which categories get rescaled and how
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryPolicy {
    /// Categories left untouched
    pub skip: BTreeSet<String>,
    /// Categories whose direct subcategories are rescaled independently
    pub split: BTreeSet<String>,
}

impl CategoryPolicy {
    pub fn skip(mut self, category: impl Into<String>) -> Self {
        self.skip.insert(category.into());
        self
    }

    pub fn split(mut self, category: impl Into<String>) -> Self {
        self.split.insert(category.into());
        self
    }
}

/// Largest physical factor seen per damage type
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CategoryMaxima {
    pub slash: f64,
    pub pierce: f64,
    pub blunt: f64,
}

impl CategoryMaxima {
    /// Maxima over every material beneath `node` that carries factors
    pub fn of(node: &CategoryNode) -> Self {
        let mut maxima = CategoryMaxima::default();
        node.visit(&mut |material| {
            if let Some(factors) = &material.factors {
                for &damage_type in PhysicalType::all() {
                    let max = maxima.get_mut(damage_type);
                    *max = f64::max(*max, factors.offense(damage_type));
                }
            }
        });
        maxima
    }

    pub fn get(&self, damage_type: PhysicalType) -> f64 {
        match damage_type {
            PhysicalType::Slash => self.slash,
            PhysicalType::Pierce => self.pierce,
            PhysicalType::Blunt => self.blunt,
        }
    }

    fn get_mut(&mut self, damage_type: PhysicalType) -> &mut f64 {
        match damage_type {
            PhysicalType::Slash => &mut self.slash,
            PhysicalType::Pierce => &mut self.pierce,
            PhysicalType::Blunt => &mut self.blunt,
        }
    }
}

/// Rescales physical factors per category according to a policy
#[derive(Debug, Clone, Default)]
pub struct CategoryNormalizer {
    policy: CategoryPolicy,
}

impl CategoryNormalizer {
    pub fn new(policy: CategoryPolicy) -> Self {
        CategoryNormalizer { policy }
    }

    pub fn policy(&self) -> &CategoryPolicy {
        &self.policy
    }

    /// Rescale in place
    pub fn normalize(&self, db: &mut MaterialDatabase) {
        for (category, node) in db.categories.iter_mut() {
            if self.policy.skip.contains(category) {
                tracing::trace!(category = category.as_str(), "skipping category");
                continue;
            }

            let split = self.policy.split.contains(category);
            match node {
                CategoryNode::Groups(groups) if split => {
                    for (subcategory, child) in groups.iter_mut() {
                        rescale(subcategory, child);
                    }
                }
                node => rescale(category, node),
            }
        }
    }

    /// Rescaled copy; `db` is left as it was
    pub fn normalized(&self, db: &MaterialDatabase) -> MaterialDatabase {
        let mut out = db.clone();
        self.normalize(&mut out);
        out
    }
}

/// Rescale every category of `db` as a whole
pub fn normalize_by_category(db: &mut MaterialDatabase) {
    CategoryNormalizer::default().normalize(db);
}

fn rescale(label: &str, node: &mut CategoryNode) {
    let maxima = CategoryMaxima::of(node);
    tracing::debug!(
        category = label,
        slash = maxima.slash,
        pierce = maxima.pierce,
        blunt = maxima.blunt,
        "rescaling category"
    );

    node.visit_mut(&mut |material| {
        if let Some(factors) = material.factors.as_mut() {
            for &damage_type in PhysicalType::all() {
                let max = maxima.get(damage_type);
                if max > 0.0 {
                    *factors.offense_mut(damage_type) /= max;
                }
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::DatabaseMaterial;
    use crate::factors::Factors;

    fn material(name: &str, slash: f64, pierce: f64, blunt: f64) -> DatabaseMaterial {
        DatabaseMaterial::new(name).with_factors(Factors {
            slash,
            pierce,
            blunt,
            fire: 0.3,
            defense_slash: 0.6,
            ..Default::default()
        })
    }

    fn database() -> MaterialDatabase {
        let mut db = MaterialDatabase::new();
        db.insert(
            "Metals",
            CategoryNode::Groups(
                [
                    (
                        "Elemental Metals".to_string(),
                        CategoryNode::Materials(vec![
                            material("Iron", 20.0, 5.0, 2.0),
                            material("Copper", 10.0, 10.0, 4.0),
                        ]),
                    ),
                    (
                        "Metal Alloys".to_string(),
                        CategoryNode::Materials(vec![
                            material("Bronze", 5.0, 1.0, 1.0),
                            material("Steel", 15.0, 2.0, 3.0),
                        ]),
                    ),
                ]
                .into_iter()
                .collect(),
            ),
        );
        db.insert(
            "Wood",
            CategoryNode::Groups(
                [
                    (
                        "Hardwood".to_string(),
                        CategoryNode::Materials(vec![material("Oak", 3.0, 1.0, 1.0)]),
                    ),
                    (
                        "Softwood".to_string(),
                        CategoryNode::Materials(vec![material("Pine", 6.0, 2.0, 2.0)]),
                    ),
                ]
                .into_iter()
                .collect(),
            ),
        );
        db.insert(
            "Dev",
            CategoryNode::Materials(vec![DatabaseMaterial::new("Dev Material")]),
        );
        db
    }

    fn max_slash(db: &MaterialDatabase, category: &str, sub: Option<&str>) -> f64 {
        db.items(category, sub)
            .iter()
            .filter_map(|m| m.factors.map(|f| f.slash))
            .fold(0.0, f64::max)
    }

    #[test]
    fn test_category_ceiling() {
        let mut db = database();
        normalize_by_category(&mut db);

        assert_eq!(max_slash(&db, "Wood", None), 1.0);
        assert_eq!(max_slash(&db, "Metals", None), 1.0);

        let oak = db.factors_for("Wood", "Oak").unwrap();
        assert!((oak.slash - 0.5).abs() < f64::EPSILON);
        assert!((oak.pierce - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_elemental_and_defense_untouched() {
        let mut db = database();
        normalize_by_category(&mut db);

        let pine = db.factors_for("Wood", "Pine").unwrap();
        assert!((pine.fire - 0.3).abs() < f64::EPSILON);
        assert!((pine.defense_slash - 0.6).abs() < f64::EPSILON);
    }

    #[test]
    fn test_split_subcategories() {
        let normalizer = CategoryNormalizer::new(CategoryPolicy::default().split("Metals"));
        let mut db = database();
        normalizer.normalize(&mut db);

        assert_eq!(max_slash(&db, "Metals", Some("Elemental Metals")), 1.0);
        assert_eq!(max_slash(&db, "Metals", Some("Metal Alloys")), 1.0);
        let bronze = db.factors_for("Metals", "Bronze").unwrap();
        assert!((bronze.slash - 5.0 / 15.0).abs() < 1e-12);
    }

    #[test]
    fn test_skip_category() {
        let normalizer = CategoryNormalizer::new(CategoryPolicy::default().skip("Metals"));
        let mut db = database();
        normalizer.normalize(&mut db);

        let iron = db.factors_for("Metals", "Iron").unwrap();
        assert!((iron.slash - 20.0).abs() < f64::EPSILON);
        assert_eq!(max_slash(&db, "Wood", None), 1.0);
    }

    #[test]
    fn test_pure_variant_leaves_input() {
        let db = database();
        let normalized = CategoryNormalizer::default().normalized(&db);

        assert_eq!(db, database());
        assert_ne!(normalized, db);
    }

    #[test]
    fn test_zero_and_empty_categories() {
        let mut db = MaterialDatabase::new();
        db.insert("Empty", CategoryNode::Materials(Vec::new()));
        db.insert(
            "Flat",
            CategoryNode::Materials(vec![
                material("A", 0.0, 0.0, 0.0),
                material("B", 0.0, 0.0, 0.0),
            ]),
        );
        let before = db.clone();
        normalize_by_category(&mut db);
        assert_eq!(db, before);
    }

    #[test]
    fn test_maxima() {
        let db = database();
        let maxima = CategoryMaxima::of(db.category("Metals").unwrap());
        assert!((maxima.slash - 20.0).abs() < f64::EPSILON);
        assert!((maxima.pierce - 10.0).abs() < f64::EPSILON);
        assert!((maxima.blunt - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_policy() {
        let policy: CategoryPolicy = toml::from_str(r#"skip = ["Metals"]"#).unwrap();
        let normalizer = CategoryNormalizer::new(policy);
        assert!(normalizer.policy().skip.contains("Metals"));
        assert!(normalizer.policy().split.is_empty());
    }
}
