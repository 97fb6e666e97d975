//! Core types shared across the scoring pipeline

use serde::{Deserialize, Serialize};

/// Physical property tracked by the scorer
///
/// The first eight are read from material records; `HardnessProxy` and
/// `SpecificStiffness` are derived during imputation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Property {
    YieldStrength,
    TensileStrength,
    ElasticModulus,
    Density,
    ThermalConductivity,
    SpecificHeat,
    MeltingPoint,
    ElectricalResistivity,
    HardnessProxy,
    SpecificStiffness,
}

impl Property {
    /// Properties aggregated into medians and imputed per material
    pub const BASE: [Property; 8] = [
        Property::YieldStrength,
        Property::TensileStrength,
        Property::ElasticModulus,
        Property::Density,
        Property::ThermalConductivity,
        Property::SpecificHeat,
        Property::MeltingPoint,
        Property::ElectricalResistivity,
    ];

    /// Properties that receive normalization bounds
    pub const NORMALIZED: [Property; 10] = [
        Property::HardnessProxy,
        Property::YieldStrength,
        Property::TensileStrength,
        Property::ElasticModulus,
        Property::Density,
        Property::SpecificStiffness,
        Property::ThermalConductivity,
        Property::SpecificHeat,
        Property::MeltingPoint,
        Property::ElectricalResistivity,
    ];

    /// Short key used in the material JSON files
    pub fn key(self) -> &'static str {
        match self {
            Property::YieldStrength => "YS",
            Property::TensileStrength => "UTS",
            Property::ElasticModulus => "E",
            Property::Density => "density",
            Property::ThermalConductivity => "k",
            Property::SpecificHeat => "cp",
            Property::MeltingPoint => "Tm",
            Property::ElectricalResistivity => "re",
            Property::HardnessProxy => "H_MP",
            Property::SpecificStiffness => "SS",
        }
    }

    /// Whether this property is derived rather than read from input
    pub fn is_derived(self) -> bool {
        matches!(self, Property::HardnessProxy | Property::SpecificStiffness)
    }
}

/// Physical damage types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhysicalType {
    Slash,
    Pierce,
    Blunt,
}

impl PhysicalType {
    pub fn all() -> &'static [PhysicalType] {
        &[PhysicalType::Slash, PhysicalType::Pierce, PhysicalType::Blunt]
    }
}

/// Elemental (magic) damage types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Element {
    Fire,
    Earth,
    Water,
    Wind,
}

impl Element {
    pub fn all() -> &'static [Element] {
        &[Element::Fire, Element::Earth, Element::Water, Element::Wind]
    }
}

/// One of the seven defensive output channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Physical(PhysicalType),
    Elemental(Element),
}

impl Channel {
    pub const SLASH: Channel = Channel::Physical(PhysicalType::Slash);
    pub const PIERCE: Channel = Channel::Physical(PhysicalType::Pierce);
    pub const BLUNT: Channel = Channel::Physical(PhysicalType::Blunt);
    pub const FIRE: Channel = Channel::Elemental(Element::Fire);
    pub const EARTH: Channel = Channel::Elemental(Element::Earth);
    pub const WATER: Channel = Channel::Elemental(Element::Water);
    pub const WIND: Channel = Channel::Elemental(Element::Wind);

    /// All channels in output order
    pub fn all() -> &'static [Channel] {
        &[
            Channel::SLASH,
            Channel::PIERCE,
            Channel::BLUNT,
            Channel::FIRE,
            Channel::EARTH,
            Channel::WATER,
            Channel::WIND,
        ]
    }

    pub fn is_physical(self) -> bool {
        matches!(self, Channel::Physical(_))
    }
}
