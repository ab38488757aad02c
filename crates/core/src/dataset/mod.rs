pub mod error;

use crate::domain::contract::RawFeedRecommendation;
use crate::domain::feed::{AnimalId, DisplayType, FeedRecommendation};
use error::{DataFormatError, DataFormatErrorKind};
use std::collections::BTreeMap;
use std::path::Path;

pub const DATASET_VERSION: &str = "2024.2";

const BUNDLED_DATASET: &str = include_str!("../../data/feed_recommendations.json");

/// Read-only feed recommendations per animal, each list ascending by its independent variable.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    animals: BTreeMap<AnimalId, Vec<FeedRecommendation>>,
}

impl Dataset {
    pub fn animals(&self) -> impl Iterator<Item = AnimalId> + '_ {
        self.animals.keys().copied()
    }

    pub fn recommendations(&self, animal: AnimalId) -> Option<&[FeedRecommendation]> {
        self.animals.get(&animal).map(Vec::as_slice)
    }

    pub fn display_type(&self, animal: AnimalId) -> Option<DisplayType> {
        self.recommendations(animal)
            .and_then(|records| records.first())
            .map(FeedRecommendation::display_type)
    }

    pub fn len(&self) -> usize {
        self.animals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animals.is_empty()
    }
}

/// Dataset compiled into the binary.
pub fn load_bundled() -> Result<Dataset, DataFormatError> {
    load_dataset(BUNDLED_DATASET)
}

pub fn load_from_path(path: &Path) -> Result<Dataset, DataFormatError> {
    let json = std::fs::read_to_string(path)
        .map_err(|err| DataFormatError::new(DataFormatErrorKind::Io(err)))?;
    load_dataset(&json)
}

pub fn load_dataset(json: &str) -> Result<Dataset, DataFormatError> {
    let raw = serde_json::from_str::<BTreeMap<String, Vec<RawFeedRecommendation>>>(json)
        .map_err(|err| DataFormatError::new(DataFormatErrorKind::Json(err)))?;

    let mut animals = BTreeMap::new();
    for (raw_id, raw_records) in raw {
        let animal = raw_id
            .trim()
            .parse::<u32>()
            .map(AnimalId)
            .map_err(|_| DataFormatError::new(DataFormatErrorKind::InvalidAnimalId(raw_id.clone())))?;

        let records = validate_records(raw_records).map_err(|err| err.at_animal(animal))?;
        animals.insert(animal, records);
    }

    tracing::debug!(
        animals = animals.len(),
        records = animals.values().map(Vec::len).sum::<usize>(),
        "feed dataset loaded"
    );

    Ok(Dataset { animals })
}

fn validate_records(
    raw_records: Vec<RawFeedRecommendation>,
) -> Result<Vec<FeedRecommendation>, DataFormatError> {
    if raw_records.is_empty() {
        return Err(DataFormatErrorKind::EmptyRecommendations.into());
    }

    let mut records: Vec<FeedRecommendation> = Vec::with_capacity(raw_records.len());
    for (idx, raw) in raw_records.into_iter().enumerate() {
        let record = raw
            .validate_and_into_recommendation()
            .map_err(|err| err.at_record(idx))?;

        if let Some(previous) = records.last() {
            if previous.display_type() != record.display_type() {
                return Err(DataFormatError::new(DataFormatErrorKind::MixedDisplayTypes).at_record(idx));
            }
            // Slider steps follow list order, so the list must not go backwards.
            let (prev, cur) = (previous.key.as_f64(), record.key.as_f64());
            if cur < prev {
                return Err(DataFormatError::new(DataFormatErrorKind::Unsorted {
                    previous: prev,
                    current: cur,
                })
                .at_record(idx));
            }
        }

        records.push(record);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::feed::{AnimalKind, RecommendationKey};
    use serde_json::json;

    #[test]
    fn bundled_dataset_loads_for_every_animal_kind() {
        let dataset = load_bundled().unwrap();
        for kind in AnimalKind::ALL {
            let records = dataset.recommendations(kind.id()).unwrap();
            assert!(!records.is_empty(), "no records for {kind:?}");
        }
        assert_eq!(
            dataset.display_type(AnimalKind::CrossbredCow.id()),
            Some(DisplayType::MilkYield)
        );
        assert_eq!(
            dataset.display_type(AnimalKind::GrowingHeifer.id()),
            Some(DisplayType::BodyWeight)
        );
    }

    #[test]
    fn bundled_lists_are_sorted_ascending() {
        let dataset = load_bundled().unwrap();
        for animal in dataset.animals() {
            let keys: Vec<f64> = dataset
                .recommendations(animal)
                .unwrap()
                .iter()
                .map(|r| r.key.as_f64())
                .collect();
            assert!(
                keys.windows(2).all(|w| w[0] <= w[1]),
                "animal {animal} not ascending: {keys:?}"
            );
        }
    }

    #[test]
    fn loads_minimal_document() {
        let json = json!({
            "0": [{
                "milk_yield": 5,
                "green_fodder_availability": {
                    "high": {"concentrate": 2, "green_fodder": 10, "dry_roughage": 3}
                }
            }]
        })
        .to_string();
        let dataset = load_dataset(&json).unwrap();
        assert_eq!(dataset.len(), 1);
        let records = dataset.recommendations(AnimalId(0)).unwrap();
        assert_eq!(records[0].key, RecommendationKey::MilkYield(5.0));
    }

    #[test]
    fn reports_animal_and_record_of_a_bad_entry() {
        let json = json!({
            "0": [{"milk_yield": 5.0}],
            "3": [{"body_weight": 75}, {"milk_yield": 1.0, "body_weight": 100}]
        })
        .to_string();
        let err = load_dataset(&json).unwrap_err();
        assert_eq!(err.animal, Some(AnimalId(3)));
        assert_eq!(err.record, Some(1));
        assert!(matches!(err.kind, DataFormatErrorKind::AmbiguousKey));
        assert!(err.to_string().contains("animal=3, record=1"));
    }

    #[test]
    fn rejects_malformed_documents() {
        assert!(matches!(
            load_dataset("{not json").unwrap_err().kind,
            DataFormatErrorKind::Json(_)
        ));
        assert!(matches!(
            load_dataset(r#"{"cow": [{"milk_yield": 5}]}"#).unwrap_err().kind,
            DataFormatErrorKind::InvalidAnimalId(_)
        ));
        assert!(matches!(
            load_dataset(r#"{"0": []}"#).unwrap_err().kind,
            DataFormatErrorKind::EmptyRecommendations
        ));
    }

    #[test]
    fn rejects_mixed_and_descending_lists() {
        let mixed = r#"{"0": [{"milk_yield": 5}, {"body_weight": 100}]}"#;
        assert!(matches!(
            load_dataset(mixed).unwrap_err().kind,
            DataFormatErrorKind::MixedDisplayTypes
        ));

        let descending = r#"{"0": [{"body_weight": 150}, {"body_weight": 100}]}"#;
        assert!(matches!(
            load_dataset(descending).unwrap_err().kind,
            DataFormatErrorKind::Unsorted { .. }
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_from_path(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err.kind, DataFormatErrorKind::Io(_)));
    }
}
