use getset::Getters;
use rust_decimal::Decimal;

use super::entity::CategoryKey;
use super::purpose::Purposes;
use super::PurposeTracker;

/// A demographic bracket. `age` and `gender` hold the survey codes
/// (e.g. `Y18T34`, `F`), see [`crate::codes`] for display labels.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct AgeGender {
    #[getset(get = "pub")]
    age: String,
    #[getset(get = "pub")]
    gender: String,
    purposes: Purposes,
}

impl AgeGender {
    pub fn new(age: impl Into<String>, gender: impl Into<String>) -> AgeGender {
        AgeGender {
            age: age.into(),
            gender: gender.into(),
            purposes: Purposes::new(),
        }
    }
}

impl PurposeTracker for AgeGender {
    fn update_purpose(&mut self, purpose: &str, population: Option<u64>, percentage: Option<Decimal>) {
        self.purposes.update(purpose, population, percentage);
    }

    fn purposes(&self) -> &Purposes {
        &self.purposes
    }

    fn category(&self) -> CategoryKey {
        CategoryKey::AgeGender {
            age: self.age.clone(),
            gender: self.gender.clone(),
        }
    }
}
