//! Key-value preference storage for selections and UI flags.
//!
//! Writes are best-effort: a store that cannot persist logs and carries on, and readers always
//! supply a default.

pub mod file;
pub mod memory;

use crate::domain::feed::AnimalId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-animal selection slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PrefField {
    MilkYield,
    BodyWeight,
    SystemType,
    FodderAvailability,
}

impl PrefField {
    pub fn name(self) -> &'static str {
        match self {
            PrefField::MilkYield => "milk_yield",
            PrefField::BodyWeight => "body_weight",
            PrefField::SystemType => "system_type",
            PrefField::FodderAvailability => "fodder_availability",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PrefKey {
    Selection { animal: AnimalId, field: PrefField },
    Language,
    ValuesExpanded,
}

impl PrefKey {
    pub fn selection(animal: AnimalId, field: PrefField) -> Self {
        PrefKey::Selection { animal, field }
    }

    /// Flat key used by on-disk stores, e.g. `animal.2.body_weight`.
    pub fn storage_key(&self) -> String {
        match self {
            PrefKey::Selection { animal, field } => format!("animal.{animal}.{}", field.name()),
            PrefKey::Language => "language".to_string(),
            PrefKey::ValuesExpanded => "values_expanded".to_string(),
        }
    }
}

impl fmt::Display for PrefKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.storage_key())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum PrefValue {
    Float(f64),
    Int(i64),
    Text(String),
    Bool(bool),
}

pub trait PreferenceStore {
    fn get(&self, key: &PrefKey) -> Option<PrefValue>;

    fn set(&mut self, key: PrefKey, value: PrefValue);

    fn get_f64(&self, key: &PrefKey, default: f64) -> f64 {
        match self.get(key) {
            Some(PrefValue::Float(v)) => v,
            Some(PrefValue::Int(v)) => v as f64,
            _ => default,
        }
    }

    fn get_i64(&self, key: &PrefKey, default: i64) -> i64 {
        match self.get(key) {
            Some(PrefValue::Int(v)) => v,
            _ => default,
        }
    }

    fn get_text(&self, key: &PrefKey, default: &str) -> String {
        match self.get(key) {
            Some(PrefValue::Text(v)) => v,
            _ => default.to_string(),
        }
    }

    fn get_bool(&self, key: &PrefKey, default: bool) -> bool {
        match self.get(key) {
            Some(PrefValue::Bool(v)) => v,
            _ => default,
        }
    }
}
