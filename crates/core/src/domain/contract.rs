use crate::dataset::error::{DataFormatError, DataFormatErrorKind};
use crate::domain::feed::{
    DisplayType, ExpectedDailyGain, FeedDetails, FeedRecommendation, FodderAvailability,
    GainBucket, RecommendationKey,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// One record as it appears in the bundled JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawFeedRecommendation {
    #[serde(rename = "type", default)]
    pub display_type: Option<u8>,
    #[serde(default)]
    pub milk_yield: Option<f64>,
    #[serde(default)]
    pub body_weight: Option<u32>,
    #[serde(default)]
    pub green_fodder_availability: Option<BTreeMap<FodderAvailability, FeedDetails>>,
    #[serde(default)]
    pub expected_daily_gain: Option<RawExpectedDailyGain>,
}

/// Gain tables keep their JSON key order (`serde_json` is built with `preserve_order`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawExpectedDailyGain {
    pub semi_intensive_system: Map<String, Value>,
    pub intensive_system: Map<String, Value>,
}

impl RawFeedRecommendation {
    pub fn validate_and_into_recommendation(self) -> Result<FeedRecommendation, DataFormatError> {
        let key = self.resolve_key()?;
        if let RecommendationKey::MilkYield(v) = key {
            ensure_quantity("milk_yield", v)?;
        }

        let fodder_availability = self.green_fodder_availability.unwrap_or_default();
        for details in fodder_availability.values() {
            ensure_quantity("concentrate", details.concentrate)?;
            ensure_quantity("green_fodder", details.green_fodder)?;
            ensure_quantity("dry_roughage", details.dry_roughage)?;
        }

        let expected_daily_gain = self
            .expected_daily_gain
            .map(RawExpectedDailyGain::validate_and_into_gain)
            .transpose()?;

        Ok(FeedRecommendation {
            key,
            fodder_availability,
            expected_daily_gain,
        })
    }

    fn resolve_key(&self) -> Result<RecommendationKey, DataFormatError> {
        let display_type = match self.display_type {
            Some(raw) => Some(
                DisplayType::from_wire(raw)
                    .ok_or(DataFormatErrorKind::UnknownDisplayType(raw))?,
            ),
            None => None,
        };

        // An explicit type wins; the other field, if present, is ignored.
        let key = match (display_type, self.milk_yield, self.body_weight) {
            (Some(DisplayType::MilkYield), Some(v), _) => RecommendationKey::MilkYield(v),
            (Some(DisplayType::MilkYield), None, _) => {
                return Err(DataFormatErrorKind::MissingField("milk_yield").into())
            }
            (Some(DisplayType::BodyWeight), _, Some(v)) => RecommendationKey::BodyWeight(v),
            (Some(DisplayType::BodyWeight), _, None) => {
                return Err(DataFormatErrorKind::MissingField("body_weight").into())
            }
            (None, Some(v), None) => RecommendationKey::MilkYield(v),
            (None, None, Some(v)) => RecommendationKey::BodyWeight(v),
            (None, Some(_), Some(_)) => return Err(DataFormatErrorKind::AmbiguousKey.into()),
            (None, None, None) => return Err(DataFormatErrorKind::MissingKey.into()),
        };
        Ok(key)
    }
}

impl RawExpectedDailyGain {
    fn validate_and_into_gain(self) -> Result<ExpectedDailyGain, DataFormatError> {
        for bucket in self.intensive_system.keys() {
            if !self.semi_intensive_system.contains_key(bucket) {
                return Err(DataFormatErrorKind::MismatchedGainBuckets {
                    bucket: bucket.clone(),
                }
                .into());
            }
        }

        let mut buckets = Vec::with_capacity(self.semi_intensive_system.len());
        for (raw_bucket, semi) in &self.semi_intensive_system {
            let intensive = self.intensive_system.get(raw_bucket).ok_or_else(|| {
                DataFormatErrorKind::MismatchedGainBuckets {
                    bucket: raw_bucket.clone(),
                }
            })?;

            let body_weight = raw_bucket
                .trim()
                .parse::<u32>()
                .map_err(|_| DataFormatErrorKind::InvalidGainBucket(raw_bucket.clone()))?;

            buckets.push(GainBucket {
                body_weight,
                intensive: grams(raw_bucket, intensive)?,
                semi_intensive: grams(raw_bucket, semi)?,
            });
        }

        Ok(ExpectedDailyGain::new(buckets))
    }
}

fn grams(bucket: &str, value: &Value) -> Result<u32, DataFormatError> {
    value
        .as_u64()
        .and_then(|v| u32::try_from(v).ok())
        .ok_or_else(|| {
            DataFormatErrorKind::InvalidGain {
                bucket: bucket.to_string(),
                value: value.to_string(),
            }
            .into()
        })
}

fn ensure_quantity(field: &'static str, value: f64) -> Result<(), DataFormatError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(DataFormatErrorKind::InvalidQuantity { field, value }.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::feed::HusbandrySystem;
    use serde_json::json;

    fn parse(v: Value) -> Result<FeedRecommendation, DataFormatError> {
        serde_json::from_value::<RawFeedRecommendation>(v)
            .unwrap()
            .validate_and_into_recommendation()
    }

    #[test]
    fn infers_milk_yield_key_without_type() {
        let rec = parse(json!({
            "milk_yield": 5,
            "green_fodder_availability": {
                "high": {"concentrate": 2, "green_fodder": 10, "dry_roughage": 3}
            }
        }))
        .unwrap();
        assert_eq!(rec.key, RecommendationKey::MilkYield(5.0));
        assert_eq!(
            rec.fodder_availability.get(&FodderAvailability::High).copied(),
            Some(FeedDetails {
                concentrate: 2.0,
                green_fodder: 10.0,
                dry_roughage: 3.0
            })
        );
        assert!(rec.expected_daily_gain.is_none());
    }

    #[test]
    fn explicit_type_selects_the_key() {
        let rec = parse(json!({"type": 1, "milk_yield": 5.0, "body_weight": 150})).unwrap();
        assert_eq!(rec.key, RecommendationKey::BodyWeight(150));
    }

    #[test]
    fn rejects_missing_and_ambiguous_keys() {
        let err = parse(json!({"green_fodder_availability": {}})).unwrap_err();
        assert!(matches!(err.kind, DataFormatErrorKind::MissingKey));

        let err = parse(json!({"milk_yield": 5.0, "body_weight": 100})).unwrap_err();
        assert!(matches!(err.kind, DataFormatErrorKind::AmbiguousKey));

        let err = parse(json!({"type": 0, "body_weight": 100})).unwrap_err();
        assert!(matches!(err.kind, DataFormatErrorKind::MissingField("milk_yield")));

        let err = parse(json!({"type": 7, "body_weight": 100})).unwrap_err();
        assert!(matches!(err.kind, DataFormatErrorKind::UnknownDisplayType(7)));
    }

    #[test]
    fn rejects_negative_feed_quantities() {
        let err = parse(json!({
            "milk_yield": 5.0,
            "green_fodder_availability": {
                "low": {"concentrate": -1, "green_fodder": 10, "dry_roughage": 3}
            }
        }))
        .unwrap_err();
        assert!(matches!(
            err.kind,
            DataFormatErrorKind::InvalidQuantity { field: "concentrate", .. }
        ));
    }

    #[test]
    fn gain_buckets_keep_dataset_order() {
        let rec = parse(json!({
            "body_weight": 100,
            "expected_daily_gain": {
                "semi_intensive_system": {"200": 460, "75": 350, "100": 370},
                "intensive_system": {"75": 410, "100": 430, "200": 540}
            }
        }))
        .unwrap();
        let gain = rec.expected_daily_gain.unwrap();
        let order: Vec<u32> = gain.buckets().iter().map(|b| b.body_weight).collect();
        assert_eq!(order, vec![200, 75, 100]);
        assert_eq!(gain.gain(75, HusbandrySystem::Intensive), Some(410));
    }

    #[test]
    fn rejects_mismatched_gain_buckets() {
        let err = parse(json!({
            "body_weight": 100,
            "expected_daily_gain": {
                "semi_intensive_system": {"75": 350},
                "intensive_system": {"75": 410, "100": 430}
            }
        }))
        .unwrap_err();
        assert!(matches!(
            err.kind,
            DataFormatErrorKind::MismatchedGainBuckets { ref bucket } if bucket == "100"
        ));

        let err = parse(json!({
            "body_weight": 100,
            "expected_daily_gain": {
                "semi_intensive_system": {"75": 350, "90": 360},
                "intensive_system": {"75": 410}
            }
        }))
        .unwrap_err();
        assert!(matches!(
            err.kind,
            DataFormatErrorKind::MismatchedGainBuckets { ref bucket } if bucket == "90"
        ));
    }

    #[test]
    fn rejects_non_integer_gains() {
        let err = parse(json!({
            "body_weight": 100,
            "expected_daily_gain": {
                "semi_intensive_system": {"75": "lots"},
                "intensive_system": {"75": 410}
            }
        }))
        .unwrap_err();
        assert!(matches!(err.kind, DataFormatErrorKind::InvalidGain { .. }));
    }
}
