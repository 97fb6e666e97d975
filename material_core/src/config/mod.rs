//! Configuration and data loading from TOML and JSON files

mod constants;

pub use constants::{ArmorClassBase, ArmorClassConstants, DefenseConstants, LayerWeights};

use crate::category::MaterialDatabase;
use crate::material::MaterialRecord;
use crate::scoring::ScoringOptions;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration loading error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Configuration validation error: {0}")]
    ValidationError(String),
}

/// Load a TOML file and deserialize it
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_toml(&content)
}

/// Load a TOML string and deserialize it
pub fn parse_toml<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    let config: T = toml::from_str(content)?;
    Ok(config)
}

/// Load a JSON file and deserialize it
pub fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_json(&content)
}

/// Load a JSON string and deserialize it
pub fn parse_json<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    let data: T = serde_json::from_str(content)?;
    Ok(data)
}

/// Load and validate scoring options from a TOML file
pub fn load_scoring_options(path: &Path) -> Result<ScoringOptions, ConfigError> {
    let options: ScoringOptions = load_toml(path)?;
    options.validate()?;
    Ok(options)
}

/// Load and validate defense constants from a TOML file
pub fn load_defense_constants(path: &Path) -> Result<DefenseConstants, ConfigError> {
    let constants: DefenseConstants = load_toml(path)?;
    constants.validate()?;
    Ok(constants)
}

/// Load one material family from a JSON array of records
pub fn load_material_batch(path: &Path) -> Result<Vec<MaterialRecord>, ConfigError> {
    let batch: Vec<MaterialRecord> = load_json(path)?;
    tracing::debug!(path = %path.display(), materials = batch.len(), "loaded material batch");
    Ok(batch)
}

/// Load the nested material database
pub fn load_material_database(path: &Path) -> Result<MaterialDatabase, ConfigError> {
    load_json(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_parse_json_batch() {
        let batch: Vec<MaterialRecord> =
            parse_json(r#"[{"name": "Oak", "class": "Wood", "density": 0.75}]"#).unwrap();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].class.as_deref(), Some("Wood"));
    }

    #[test]
    fn test_parse_errors() {
        let json = parse_json::<Vec<MaterialRecord>>("{not json");
        assert!(matches!(json, Err(ConfigError::JsonError(_))));

        let toml = parse_toml::<ScoringOptions>("feel = ");
        assert!(matches!(toml, Err(ConfigError::ParseError(_))));
    }

    fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_scoring_options() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "options.toml",
            "feel = true\nthickness = 1.2\nmin_defense = 0.3\n\n[armor_bias]\nslash = 0.1\n",
        );
        let options = load_scoring_options(&path).unwrap();
        assert!(options.feel);
        assert!((options.thickness - 1.2).abs() < f64::EPSILON);
        assert_eq!(options.min_defense, Some(0.3));
        assert!((options.armor_bias.slashing - 0.1).abs() < f64::EPSILON);

        let path = write_file(&dir, "bad_thickness.toml", "thickness = nan\n");
        assert!(matches!(
            load_scoring_options(&path),
            Err(ConfigError::ValidationError(_))
        ));

        let path = write_file(&dir, "bad_min.toml", "min_defense = 2.0\n");
        assert!(matches!(
            load_scoring_options(&path),
            Err(ConfigError::ValidationError(_))
        ));

        let path = write_file(&dir, "bad_precision.toml", "precision = 400\n");
        assert!(matches!(
            load_scoring_options(&path),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_load_defense_constants() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "defense.toml",
            "max_reduction = 0.9\n\n[layers]\nouter = 0.7\n",
        );
        let constants = load_defense_constants(&path).unwrap();
        assert!((constants.max_reduction - 0.9).abs() < f64::EPSILON);
        assert!((constants.layers.outer - 0.7).abs() < f64::EPSILON);
        assert!((constants.layers.inner - 0.15).abs() < f64::EPSILON);

        let path = write_file(&dir, "bad_defense.toml", "max_reduction = 1.5\n");
        assert!(matches!(
            load_defense_constants(&path),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_load_material_database() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "materials.json",
            r#"{"Wood": {"Hardwood": [{"id": "oak", "name": "Oak", "factors": {"slash": 0.5}}]},
                "Dev": [{"name": "Dev Material"}]}"#,
        );
        let db = load_material_database(&path).unwrap();
        assert_eq!(db.subcategories("Wood"), vec!["Hardwood"]);
        let oak = db.factors_for("Wood", "Oak").unwrap();
        assert!((oak.slash - 0.5).abs() < f64::EPSILON);
        assert_eq!(db.items("Dev", None).len(), 1);

        let path = write_file(&dir, "broken.json", "{\"Wood\": 3}");
        assert!(matches!(
            load_material_database(&path),
            Err(ConfigError::JsonError(_))
        ));
    }

    #[test]
    fn test_load_material_batch() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "wood.json", r#"[{"name": "Oak", "YS": 40}]"#);
        let batch = load_material_batch(&path).unwrap();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].yield_strength, Some(40.0));
    }

    #[test]
    fn test_missing_file() {
        let result = load_material_batch(Path::new("/nonexistent/materials.json"));
        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }
}
