//! Recommendation lookups. A miss is `None`: the screen renders a placeholder.

use crate::domain::feed::{FeedDetails, FeedRecommendation, FodderAvailability, HusbandrySystem};

/// First record whose milk yield equals `milk_yield` exactly.
///
/// No tolerance is applied. Slider values are taken verbatim from the dataset, so a value
/// computed elsewhere (e.g. `0.1 + 0.2`) may miss a stored `0.3`.
pub fn find_by_milk_yield(
    records: &[FeedRecommendation],
    milk_yield: f64,
) -> Option<&FeedRecommendation> {
    records.iter().find(|r| r.milk_yield() == Some(milk_yield))
}

/// First record whose body weight equals `body_weight`.
pub fn find_by_body_weight(
    records: &[FeedRecommendation],
    body_weight: u32,
) -> Option<&FeedRecommendation> {
    records.iter().find(|r| r.body_weight() == Some(body_weight))
}

pub fn resolve_feed_details(
    record: &FeedRecommendation,
    availability: FodderAvailability,
) -> Option<FeedDetails> {
    record.fodder_availability.get(&availability).copied()
}

/// Grams per day for a body-weight bucket of the record's gain table.
pub fn resolve_gain(
    record: &FeedRecommendation,
    body_weight: u32,
    system: HusbandrySystem,
) -> Option<u32> {
    record
        .expected_daily_gain
        .as_ref()
        .and_then(|gain| gain.gain(body_weight, system))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{load_bundled, load_dataset};
    use crate::domain::feed::{AnimalId, AnimalKind};
    use serde_json::json;

    #[test]
    fn end_to_end_lookup_of_feed_details() {
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
        let records = dataset.recommendations(AnimalId(0)).unwrap();

        let record = find_by_milk_yield(records, 5.0).unwrap();
        assert_eq!(
            resolve_feed_details(record, FodderAvailability::High),
            Some(FeedDetails {
                concentrate: 2.0,
                green_fodder: 10.0,
                dry_roughage: 3.0
            })
        );
        assert_eq!(resolve_feed_details(record, FodderAvailability::Low), None);
    }

    #[test]
    fn every_slider_value_resolves_to_its_own_record() {
        let dataset = load_bundled().unwrap();
        for animal in dataset.animals() {
            let records = dataset.recommendations(animal).unwrap();
            for record in records {
                let found = match (record.milk_yield(), record.body_weight()) {
                    (Some(v), _) => find_by_milk_yield(records, v),
                    (_, Some(v)) => find_by_body_weight(records, v),
                    _ => unreachable!(),
                };
                assert_eq!(found, Some(record));
            }
        }
    }

    #[test]
    fn misses_are_none() {
        let dataset = load_bundled().unwrap();
        let cows = dataset.recommendations(AnimalKind::CrossbredCow.id()).unwrap();
        assert!(find_by_milk_yield(cows, 999.0).is_none());
        assert!(find_by_body_weight(cows, 100).is_none());

        let heifers = dataset.recommendations(AnimalKind::GrowingHeifer.id()).unwrap();
        assert!(find_by_milk_yield(heifers, 5.0).is_none());
    }

    #[test]
    fn first_match_wins_on_duplicate_keys() {
        let json = json!({
            "0": [
                {"body_weight": 100, "expected_daily_gain": {
                    "semi_intensive_system": {"100": 1}, "intensive_system": {"100": 2}}},
                {"body_weight": 100, "expected_daily_gain": {
                    "semi_intensive_system": {"100": 3}, "intensive_system": {"100": 4}}}
            ]
        })
        .to_string();
        let dataset = load_dataset(&json).unwrap();
        let records = dataset.recommendations(AnimalId(0)).unwrap();
        let record = find_by_body_weight(records, 100).unwrap();
        assert_eq!(resolve_gain(record, 100, HusbandrySystem::Intensive), Some(2));
        assert_eq!(resolve_gain(record, 100, HusbandrySystem::SemiIntensive), Some(1));
        assert_eq!(resolve_gain(record, 75, HusbandrySystem::Intensive), None);
    }
}
