use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Dataset key for an animal. Matches the ordinal of [`AnimalKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnimalId(pub u32);

impl fmt::Display for AnimalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fixed animal list shown on the home screen, in dataset order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimalKind {
    CrossbredCow,
    Buffalo,
    GrowingHeifer,
}

impl AnimalKind {
    pub const ALL: [AnimalKind; 3] = [
        AnimalKind::CrossbredCow,
        AnimalKind::Buffalo,
        AnimalKind::GrowingHeifer,
    ];

    pub fn id(self) -> AnimalId {
        match self {
            AnimalKind::CrossbredCow => AnimalId(0),
            AnimalKind::Buffalo => AnimalId(1),
            AnimalKind::GrowingHeifer => AnimalId(2),
        }
    }

    pub fn from_id(id: AnimalId) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.id() == id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeedDetails {
    pub concentrate: f64,
    pub green_fodder: f64,
    pub dry_roughage: f64,
}

impl FeedDetails {
    pub fn quantity(&self, component: FeedComponent) -> f64 {
        match component {
            FeedComponent::Concentrate => self.concentrate,
            FeedComponent::GreenFodder => self.green_fodder,
            FeedComponent::DryRoughage => self.dry_roughage,
        }
    }

    /// Quantities in chart order.
    pub fn components(&self) -> [(FeedComponent, f64); 3] {
        FeedComponent::ALL.map(|c| (c, self.quantity(c)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedComponent {
    Concentrate,
    GreenFodder,
    DryRoughage,
}

impl FeedComponent {
    pub const ALL: [FeedComponent; 3] = [
        FeedComponent::Concentrate,
        FeedComponent::GreenFodder,
        FeedComponent::DryRoughage,
    ];
}

/// Prints whole quantities without a fractional part (`2`, `2.5`).
pub fn format_quantity(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

/// Slider label for a milk yield: always at least one decimal (`5.0`, `7.5`).
pub fn format_milk_yield(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FodderAvailability {
    High,
    Moderate,
    Low,
}

impl FodderAvailability {
    pub const ALL: [FodderAvailability; 3] = [
        FodderAvailability::High,
        FodderAvailability::Moderate,
        FodderAvailability::Low,
    ];

    /// Stable upper-case name used for persistence.
    pub fn name(self) -> &'static str {
        match self {
            FodderAvailability::High => "HIGH",
            FodderAvailability::Moderate => "MODERATE",
            FodderAvailability::Low => "LOW",
        }
    }

    pub fn index(self) -> usize {
        match self {
            FodderAvailability::High => 0,
            FodderAvailability::Moderate => 1,
            FodderAvailability::Low => 2,
        }
    }
}

impl FromStr for FodderAvailability {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(FodderAvailability::High),
            "moderate" => Ok(FodderAvailability::Moderate),
            "low" => Ok(FodderAvailability::Low),
            other => anyhow::bail!("unknown fodder availability: {other}"),
        }
    }
}

/// Husbandry regime with its own expected daily gain curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HusbandrySystem {
    Intensive,
    SemiIntensive,
}

impl HusbandrySystem {
    /// Switch order on the body-weight screen.
    pub const ALL: [HusbandrySystem; 2] =
        [HusbandrySystem::Intensive, HusbandrySystem::SemiIntensive];

    pub fn index(self) -> usize {
        match self {
            HusbandrySystem::Intensive => 0,
            HusbandrySystem::SemiIntensive => 1,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl FromStr for HusbandrySystem {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "intensive" | "intensive-system" => Ok(HusbandrySystem::Intensive),
            "semi-intensive" | "semi-intensive-system" => Ok(HusbandrySystem::SemiIntensive),
            other => anyhow::bail!("unknown husbandry system: {other}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GainBucket {
    /// Body-weight bucket in kilograms.
    pub body_weight: u32,
    /// Grams per day under each system.
    pub intensive: u32,
    pub semi_intensive: u32,
}

impl GainBucket {
    pub fn gain(&self, system: HusbandrySystem) -> u32 {
        match system {
            HusbandrySystem::Intensive => self.intensive,
            HusbandrySystem::SemiIntensive => self.semi_intensive,
        }
    }
}

/// Expected daily gain per body-weight bucket, in dataset order.
///
/// Both systems always share the same bucket set; the loader rejects tables where they differ.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpectedDailyGain {
    buckets: Vec<GainBucket>,
}

impl ExpectedDailyGain {
    pub(crate) fn new(buckets: Vec<GainBucket>) -> Self {
        Self { buckets }
    }

    pub fn buckets(&self) -> &[GainBucket] {
        &self.buckets
    }

    pub fn gain(&self, body_weight: u32, system: HusbandrySystem) -> Option<u32> {
        self.buckets
            .iter()
            .find(|b| b.body_weight == body_weight)
            .map(|b| b.gain(system))
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// Which UI and lookup path a recommendation list uses. Wire value is the `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayType {
    MilkYield,
    BodyWeight,
}

impl DisplayType {
    pub fn from_wire(value: u8) -> Option<Self> {
        match value {
            0 => Some(DisplayType::MilkYield),
            1 => Some(DisplayType::BodyWeight),
            _ => None,
        }
    }
}

/// The independent variable a record is keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKey {
    /// Liters per day.
    MilkYield(f64),
    /// Kilograms.
    BodyWeight(u32),
}

impl RecommendationKey {
    pub fn display_type(&self) -> DisplayType {
        match self {
            RecommendationKey::MilkYield(_) => DisplayType::MilkYield,
            RecommendationKey::BodyWeight(_) => DisplayType::BodyWeight,
        }
    }

    pub fn as_f64(&self) -> f64 {
        match *self {
            RecommendationKey::MilkYield(v) => v,
            RecommendationKey::BodyWeight(v) => f64::from(v),
        }
    }

    pub fn label(&self) -> String {
        match *self {
            RecommendationKey::MilkYield(v) => format_milk_yield(v),
            RecommendationKey::BodyWeight(v) => v.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedRecommendation {
    pub key: RecommendationKey,
    pub fodder_availability: BTreeMap<FodderAvailability, FeedDetails>,
    pub expected_daily_gain: Option<ExpectedDailyGain>,
}

impl FeedRecommendation {
    pub fn display_type(&self) -> DisplayType {
        self.key.display_type()
    }

    pub fn milk_yield(&self) -> Option<f64> {
        match self.key {
            RecommendationKey::MilkYield(v) => Some(v),
            RecommendationKey::BodyWeight(_) => None,
        }
    }

    pub fn body_weight(&self) -> Option<u32> {
        match self.key {
            RecommendationKey::BodyWeight(v) => Some(v),
            RecommendationKey::MilkYield(_) => None,
        }
    }
}
