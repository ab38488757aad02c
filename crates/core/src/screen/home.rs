use crate::dataset::Dataset;
use crate::domain::feed::{AnimalId, AnimalKind, DisplayType};
use crate::locale::{MessageKey, Strings};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnimalEntry {
    pub id: AnimalId,
    pub name: String,
    pub description: String,
    pub display_type: DisplayType,
    pub records: usize,
    /// Smallest and largest slider label.
    pub range: (String, String),
}

pub fn name_key(kind: AnimalKind) -> MessageKey {
    match kind {
        AnimalKind::CrossbredCow => MessageKey::CrossbredCow,
        AnimalKind::Buffalo => MessageKey::Buffalo,
        AnimalKind::GrowingHeifer => MessageKey::GrowingHeifer,
    }
}

fn description_key(kind: AnimalKind) -> MessageKey {
    match kind {
        AnimalKind::CrossbredCow => MessageKey::CrossbredCowDescription,
        AnimalKind::Buffalo => MessageKey::BuffaloDescription,
        AnimalKind::GrowingHeifer => MessageKey::GrowingHeiferDescription,
    }
}

/// Screen title for an animal; ids outside the catalogue get a generic name.
pub fn animal_name(animal: AnimalId, strings: &Strings) -> String {
    AnimalKind::from_id(animal)
        .map(|kind| strings.get(name_key(kind)).to_string())
        .unwrap_or_else(|| format!("#{animal}"))
}

/// Home list: catalogue animals that have records, in catalogue order.
pub fn animal_entries(dataset: &Dataset, strings: &Strings) -> Vec<AnimalEntry> {
    let mut entries = Vec::new();
    for kind in AnimalKind::ALL {
        let id = kind.id();
        let Some(records) = dataset.recommendations(id) else {
            tracing::debug!(animal = %id, "catalogue animal missing from dataset");
            continue;
        };
        let (Some(first), Some(last)) = (records.first(), records.last()) else {
            continue;
        };
        entries.push(AnimalEntry {
            id,
            name: strings.get(name_key(kind)).to_string(),
            description: strings.get(description_key(kind)).to_string(),
            display_type: first.display_type(),
            records: records.len(),
            range: (first.key.label(), last.key.label()),
        });
    }
    entries
}
