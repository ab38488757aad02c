use crate::domain::feed::AnimalId;
use std::fmt;

/// The bundled dataset could not be turned into typed recommendations.
#[derive(Debug)]
pub struct DataFormatError {
    pub animal: Option<AnimalId>,
    pub record: Option<usize>,
    pub kind: DataFormatErrorKind,
}

#[derive(Debug)]
pub enum DataFormatErrorKind {
    Io(std::io::Error),
    Json(serde_json::Error),
    InvalidAnimalId(String),
    EmptyRecommendations,
    /// Neither `milk_yield` nor `body_weight` is present.
    MissingKey,
    /// Both keys present and no `type` to pick one.
    AmbiguousKey,
    UnknownDisplayType(u8),
    MissingField(&'static str),
    InvalidQuantity { field: &'static str, value: f64 },
    InvalidGainBucket(String),
    InvalidGain { bucket: String, value: String },
    MismatchedGainBuckets { bucket: String },
    MixedDisplayTypes,
    Unsorted { previous: f64, current: f64 },
}

impl DataFormatError {
    pub(crate) fn new(kind: DataFormatErrorKind) -> Self {
        Self {
            animal: None,
            record: None,
            kind,
        }
    }

    pub(crate) fn at_animal(mut self, animal: AnimalId) -> Self {
        self.animal = Some(animal);
        self
    }

    pub(crate) fn at_record(mut self, record: usize) -> Self {
        self.record = Some(record);
        self
    }
}

impl From<DataFormatErrorKind> for DataFormatError {
    fn from(kind: DataFormatErrorKind) -> Self {
        Self::new(kind)
    }
}

impl fmt::Display for DataFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "malformed feed dataset")?;
        match (self.animal, self.record) {
            (Some(animal), Some(record)) => write!(f, " (animal={animal}, record={record})")?,
            (Some(animal), None) => write!(f, " (animal={animal})")?,
            (None, Some(record)) => write!(f, " (record={record})")?,
            (None, None) => {}
        }
        write!(f, ": ")?;

        match &self.kind {
            DataFormatErrorKind::Io(err) => write!(f, "read failed: {err}"),
            DataFormatErrorKind::Json(err) => write!(f, "invalid JSON: {err}"),
            DataFormatErrorKind::InvalidAnimalId(raw) => write!(f, "invalid animal id {raw:?}"),
            DataFormatErrorKind::EmptyRecommendations => write!(f, "recommendation list is empty"),
            DataFormatErrorKind::MissingKey => {
                write!(f, "record has neither milk_yield nor body_weight")
            }
            DataFormatErrorKind::AmbiguousKey => write!(
                f,
                "record has both milk_yield and body_weight but no type discriminator"
            ),
            DataFormatErrorKind::UnknownDisplayType(t) => write!(f, "unknown type {t}"),
            DataFormatErrorKind::MissingField(field) => {
                write!(f, "type requires {field} but it is absent")
            }
            DataFormatErrorKind::InvalidQuantity { field, value } => {
                write!(f, "{field} must be a finite non-negative number (got {value})")
            }
            DataFormatErrorKind::InvalidGainBucket(raw) => {
                write!(f, "gain bucket {raw:?} is not a body weight")
            }
            DataFormatErrorKind::InvalidGain { bucket, value } => {
                write!(f, "gain for bucket {bucket} is not a gram count: {value}")
            }
            DataFormatErrorKind::MismatchedGainBuckets { bucket } => write!(
                f,
                "bucket {bucket} is missing from one of the husbandry systems"
            ),
            DataFormatErrorKind::MixedDisplayTypes => {
                write!(f, "list mixes milk-yield and body-weight records")
            }
            DataFormatErrorKind::Unsorted { previous, current } => write!(
                f,
                "list is not ascending ({current} follows {previous})"
            ),
        }
    }
}

impl std::error::Error for DataFormatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            DataFormatErrorKind::Io(err) => Some(err),
            DataFormatErrorKind::Json(err) => Some(err),
            _ => None,
        }
    }
}
