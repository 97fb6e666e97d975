//! Scoring options and post-processing of channel scores

use crate::config::ConfigError;
use crate::material::ResistanceScores;
use crate::stats::{clamp, clamp01, MAX_ROUND_PLACES};
use crate::types::{Channel, Element, PhysicalType};
use serde::{Deserialize, Serialize};

/// Allowed range for the thickness multiplier
pub const MIN_THICKNESS: f64 = 0.5;
pub const MAX_THICKNESS: f64 = 1.5;

/// Feel transform: `FEEL_FLOOR + FEEL_SPAN * r`
pub const FEEL_FLOOR: f64 = 0.05;
pub const FEEL_SPAN: f64 = 0.90;

/// Options for one scoring run
///
/// Every field has a default, so a partial TOML table is valid:
///
/// ```toml
/// feel = true
/// thickness = 1.2
///
/// [armor_bias]
/// slash = 0.1
///
/// [attunement]
/// fire = 0.2
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringOptions {
    /// Compress every defensive channel into [0.05, 0.95]
    pub feel: bool,
    pub armor_bias: ArmorBias,
    /// Multiplier on the physical channels, clamped to [0.5, 1.5]
    pub thickness: f64,
    pub attunement: Attunement,
    /// Pull defensive channels below this value halfway up to it, in [0, 1]
    pub min_defense: Option<f64>,
    /// Round all scores to this many decimal places (at most 15)
    pub precision: Option<u32>,
}

impl Default for ScoringOptions {
    fn default() -> Self {
        ScoringOptions {
            feel: false,
            armor_bias: ArmorBias::default(),
            thickness: 1.0,
            attunement: Attunement::default(),
            min_defense: None,
            precision: None,
        }
    }
}

impl ScoringOptions {
    /// Reject values that can't come from a sensible options file
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.thickness.is_finite() {
            return Err(ConfigError::ValidationError(format!(
                "thickness must be a finite number, got {}",
                self.thickness
            )));
        }
        if let Some(min) = self.min_defense {
            if !(0.0..=1.0).contains(&min) {
                return Err(ConfigError::ValidationError(format!(
                    "min_defense must be in [0, 1], got {min}"
                )));
            }
        }
        if let Some(places) = self.precision {
            if places > MAX_ROUND_PLACES {
                return Err(ConfigError::ValidationError(format!(
                    "precision must be at most {MAX_ROUND_PLACES} places, got {places}"
                )));
            }
        }
        Ok(())
    }

    /// Thickness after clamping into the allowed range
    pub fn thickness_factor(&self) -> f64 {
        clamp(self.thickness, MIN_THICKNESS, MAX_THICKNESS)
    }

    /// Thickness, bias, attunement and minimum-defense adjustments.
    /// Each channel is clamped to [0, 1] after its additive offsets.
    pub fn adjust(&self, raw: ResistanceScores) -> ResistanceScores {
        let thickness = self.thickness_factor();
        let mut adjusted = raw;

        for &channel in Channel::all() {
            let value = adjusted.get_mut(channel);
            *value = match channel {
                Channel::Physical(damage_type) => {
                    clamp01(*value * thickness + self.armor_bias.physical(damage_type))
                }
                Channel::Elemental(element) => clamp01(
                    *value + self.armor_bias.elemental(element) + self.attunement.get(element),
                ),
            };
            if let Some(min) = self.min_defense {
                *value = clamp01(pull_toward_minimum(*value, min));
            }
        }

        adjusted
    }

    /// Apply the feel transform when enabled
    pub fn finish(&self, adjusted: ResistanceScores) -> ResistanceScores {
        if self.feel {
            adjusted.map(feel_transform)
        } else {
            adjusted
        }
    }
}

/// Perceptual remap of [0, 1] into [0.05, 0.95]
pub fn feel_transform(value: f64) -> f64 {
    FEEL_FLOOR + FEEL_SPAN * value
}

fn pull_toward_minimum(value: f64, min: f64) -> f64 {
    if value < min {
        min - (min - value) * 0.5
    } else {
        value
    }
}

/// Additive offset per channel, applied after normalization
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArmorBias {
    #[serde(alias = "slash")]
    pub slashing: f64,
    #[serde(alias = "pierce")]
    pub piercing: f64,
    pub blunt: f64,
    pub fire: f64,
    pub earth: f64,
    pub water: f64,
    pub wind: f64,
}

impl ArmorBias {
    pub fn physical(&self, damage_type: PhysicalType) -> f64 {
        match damage_type {
            PhysicalType::Slash => self.slashing,
            PhysicalType::Pierce => self.piercing,
            PhysicalType::Blunt => self.blunt,
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

/// Additive elemental offset stacked on top of the armor bias
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Attunement {
    pub fire: f64,
    pub earth: f64,
    pub water: f64,
    pub wind: f64,
}

impl Attunement {
    pub fn get(&self, element: Element) -> f64 {
        match element {
            Element::Fire => self.fire,
            Element::Earth => self.earth,
            Element::Water => self.water,
            Element::Wind => self.wind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(value: f64) -> ResistanceScores {
        ResistanceScores::default().map(|_| value)
    }

    #[test]
    fn test_defaults_are_identity() {
        let options = ScoringOptions::default();
        let raw = flat(0.4);
        assert_eq!(options.finish(options.adjust(raw)), raw);
    }

    #[test]
    fn test_thickness_clamped() {
        let thick = ScoringOptions {
            thickness: 3.0,
            ..Default::default()
        };
        assert!((thick.thickness_factor() - 1.5).abs() < f64::EPSILON);

        let thin = ScoringOptions {
            thickness: 0.1,
            ..Default::default()
        };
        assert!((thin.thickness_factor() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_thickness_only_scales_physical() {
        let options = ScoringOptions {
            thickness: 1.5,
            ..Default::default()
        };
        let adjusted = options.adjust(flat(0.4));
        assert!((adjusted.slash - 0.6).abs() < 1e-12);
        assert!((adjusted.blunt - 0.6).abs() < 1e-12);
        assert!((adjusted.fire - 0.4).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bias_and_attunement_clamp() {
        let options = ScoringOptions {
            armor_bias: ArmorBias {
                fire: 0.5,
                ..Default::default()
            },
            attunement: Attunement {
                fire: 0.3,
                water: -0.9,
                ..Default::default()
            },
            ..Default::default()
        };
        let adjusted = options.adjust(flat(0.4));
        assert!((adjusted.fire - 1.0).abs() < f64::EPSILON);
        assert!((adjusted.water - 0.0).abs() < f64::EPSILON);
        assert!((adjusted.wind - 0.4).abs() < f64::EPSILON);
    }

    #[test]
    fn test_min_defense_pull() {
        let options = ScoringOptions {
            min_defense: Some(0.8),
            ..Default::default()
        };
        let adjusted = options.adjust(flat(0.2));
        // 0.8 - (0.8 - 0.2) * 0.5 = 0.5
        assert!((adjusted.slash - 0.5).abs() < 1e-12);
        assert!((adjusted.fire - 0.5).abs() < 1e-12);

        let strong = options.adjust(flat(0.9));
        assert!((strong.slash - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn test_min_defense_out_of_range_stays_bounded() {
        let options = ScoringOptions {
            feel: true,
            min_defense: Some(2.0),
            ..Default::default()
        };
        // 2.0 - (2.0 - 0.8) * 0.5 = 1.4 before the clamp
        let adjusted = options.adjust(flat(0.8));
        assert!((adjusted.slash - 1.0).abs() < f64::EPSILON);
        let finished = options.finish(adjusted);
        assert!((finished.slash - 0.95).abs() < 1e-12);

        let negative = ScoringOptions {
            min_defense: Some(-1.0),
            ..Default::default()
        };
        assert!((negative.adjust(flat(0.3)).fire - 0.3).abs() < f64::EPSILON);
    }

    #[test]
    fn test_validate() {
        assert!(ScoringOptions::default().validate().is_ok());

        let cases = [
            ScoringOptions {
                thickness: f64::NAN,
                ..Default::default()
            },
            ScoringOptions {
                min_defense: Some(2.0),
                ..Default::default()
            },
            ScoringOptions {
                precision: Some(400),
                ..Default::default()
            },
        ];
        for options in cases {
            assert!(matches!(
                options.validate(),
                Err(ConfigError::ValidationError(_))
            ));
        }

        let ok = ScoringOptions {
            min_defense: Some(0.3),
            precision: Some(MAX_ROUND_PLACES),
            ..Default::default()
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_attunement_per_element() {
        let attunement = Attunement {
            fire: 0.1,
            earth: 0.2,
            water: 0.3,
            wind: 0.4,
        };
        let total: f64 = Element::all().iter().map(|&e| attunement.get(e)).sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_feel() {
        let options = ScoringOptions {
            feel: true,
            ..Default::default()
        };
        let finished = options.finish(flat(0.0));
        assert!((finished.slash - 0.05).abs() < f64::EPSILON);
        assert!((options.finish(flat(1.0)).wind - 0.95).abs() < 1e-12);
    }

    #[test]
    fn test_parse_options_toml() {
        let toml = r#"
feel = true
thickness = 1.2

[armor_bias]
slash = 0.1
pierce = 0.2
water = 0.05

[attunement]
fire = 0.2
"#;
        let options: ScoringOptions = toml::from_str(toml).unwrap();
        assert!(options.feel);
        assert!((options.armor_bias.slashing - 0.1).abs() < f64::EPSILON);
        assert!((options.armor_bias.piercing - 0.2).abs() < f64::EPSILON);
        assert!((options.armor_bias.water - 0.05).abs() < f64::EPSILON);
        assert!((options.attunement.fire - 0.2).abs() < f64::EPSILON);
        assert_eq!(options.min_defense, None);
    }
}
