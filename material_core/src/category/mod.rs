//! Material database - category → subcategory → materials
//!
//! Mirrors the JSON layout of the material database: each top-level
//! category holds either a flat list of materials or a map of named
//! subcategories (which may nest further).

mod normalizer;

pub use normalizer::{normalize_by_category, CategoryMaxima, CategoryNormalizer, CategoryPolicy};

use crate::factors::{FactorSource, Factors};
use crate::material::ScoredMaterial;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Subcategory key marking a category with no real subcategories
pub const NO_SUBCATEGORY_KEY: &str = "A";

/// One material entry in the database
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatabaseMaterial {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub factors: Option<Factors>,
    /// Raw properties and any other keys
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DatabaseMaterial {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        DatabaseMaterial {
            id: Some(slug(&name)),
            name,
            ..Default::default()
        }
    }

    pub fn with_factors(mut self, factors: Factors) -> Self {
        self.factors = Some(factors);
        self
    }
}

/// Lowercase id with whitespace runs replaced by underscores
pub fn slug(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
}

/// A category or subcategory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryNode {
    Materials(Vec<DatabaseMaterial>),
    Groups(BTreeMap<String, CategoryNode>),
}

impl CategoryNode {
    /// Every material beneath this node, in tree order
    pub fn materials(&self) -> Vec<&DatabaseMaterial> {
        let mut out = Vec::new();
        self.visit(&mut |m| out.push(m));
        out
    }

    pub(crate) fn visit<'a, F: FnMut(&'a DatabaseMaterial)>(&'a self, f: &mut F) {
        match self {
            CategoryNode::Materials(list) => list.iter().for_each(|m| f(m)),
            CategoryNode::Groups(groups) => {
                for child in groups.values() {
                    child.visit(f);
                }
            }
        }
    }

    pub(crate) fn visit_mut<F: FnMut(&mut DatabaseMaterial)>(&mut self, f: &mut F) {
        match self {
            CategoryNode::Materials(list) => list.iter_mut().for_each(|m| f(m)),
            CategoryNode::Groups(groups) => {
                for child in groups.values_mut() {
                    child.visit_mut(f);
                }
            }
        }
    }
}

/// Nested material database keyed by top-level category
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaterialDatabase {
    pub categories: BTreeMap<String, CategoryNode>,
}

impl MaterialDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, category: impl Into<String>, node: CategoryNode) {
        self.categories.insert(category.into(), node);
    }

    pub fn category(&self, category: &str) -> Option<&CategoryNode> {
        self.categories.get(category)
    }

    /// Sorted subcategory names; empty for flat categories and for
    /// categories that only use the placeholder key
    pub fn subcategories(&self, category: &str) -> Vec<&str> {
        match self.category(category) {
            Some(CategoryNode::Groups(groups)) => {
                let keys: Vec<&str> = groups.keys().map(String::as_str).collect();
                if keys == [NO_SUBCATEGORY_KEY] {
                    Vec::new()
                } else {
                    keys
                }
            }
            _ => Vec::new(),
        }
    }

    /// Materials of a category, or of one subcategory, sorted by name
    pub fn items(&self, category: &str, subcategory: Option<&str>) -> Vec<&DatabaseMaterial> {
        let node = match (self.category(category), subcategory) {
            (Some(CategoryNode::Groups(groups)), Some(sub)) => groups.get(sub),
            (Some(CategoryNode::Materials(_)), Some(_)) => None,
            (node, _) => node,
        };

        let mut items = node.map(CategoryNode::materials).unwrap_or_default();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        items
    }

    /// Factors of a named material within a category
    pub fn factors_for(&self, category: &str, name: &str) -> Option<&Factors> {
        self.category(category)?
            .materials()
            .into_iter()
            .find(|m| m.name == name)
            .and_then(|m| m.factors.as_ref())
    }

    /// Write scored factors onto the materials of a category, matching by
    /// name. Returns how many entries were updated.
    pub fn attach_factors(
        &mut self,
        category: &str,
        scored: &[ScoredMaterial],
        source: FactorSource,
    ) -> usize {
        let by_name: BTreeMap<&str, Factors> = scored
            .iter()
            .filter_map(|s| s.name().map(|name| (name, Factors::from_scored(s, source))))
            .collect();

        let mut updated = 0;
        if let Some(node) = self.categories.get_mut(category) {
            node.visit_mut(&mut |material| {
                if let Some(factors) = by_name.get(material.name.as_str()) {
                    material.factors = Some(*factors);
                    updated += 1;
                }
            });
        }

        tracing::debug!(category, updated, "attached material factors");
        updated
    }
}
