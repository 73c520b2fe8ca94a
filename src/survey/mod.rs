use enum_dispatch::enum_dispatch;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::codes::TOTAL_CODE;

pub mod age_gender;
pub mod aggregator;
pub mod entity;
pub mod purpose;
pub mod territory;


pub use age_gender::AgeGender;
pub use aggregator::{aggregate, Aggregator, RawRow};
pub use entity::{CategoryKey, Entity, EntityKind};
pub use purpose::{PurposeEntry, Purposes};
pub use territory::Territory;

/// Purpose labels that are not real spending destinations and never count
/// towards a territory's highest percentage.
pub const EXCLUDED_PURPOSES: [&str; 2] = [TOTAL_CODE, "total"];

pub fn is_excluded_purpose(purpose: &str) -> bool {
    EXCLUDED_PURPOSES.iter().any(|excluded| *excluded == purpose)
}

#[derive(Debug, PartialEq, Error)]
pub enum SurveyError {
    #[error("unsupported entity kind '{0}'")]
    UnsupportedKind(String),
    #[error("malformed row {index}: missing {field} in {row}")]
    MalformedRow {
        index: usize,
        field: &'static str,
        row: String,
    },
    #[error("invalid value '{value}' in row {index}")]
    InvalidValue { index: usize, value: String },
}

#[enum_dispatch]
pub trait PurposeTracker {
    /// Records whichever of `population` / `percentage` is supplied for
    /// `purpose`, creating the entry if needed. Fields passed as `None` keep
    /// their previous value.
    fn update_purpose(&mut self, purpose: &str, population: Option<u64>, percentage: Option<Decimal>);

    fn purposes(&self) -> &Purposes;

    fn category(&self) -> CategoryKey;
}
