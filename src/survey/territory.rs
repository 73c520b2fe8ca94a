use getset::{CopyGetters, Getters};
use rust_decimal::Decimal;

use super::entity::CategoryKey;
use super::purpose::Purposes;
use super::{is_excluded_purpose, PurposeTracker};

#[derive(Debug, Clone, PartialEq, Eq, Getters, CopyGetters)]
pub struct Territory {
    #[getset(get = "pub")]
    name: String,
    purposes: Purposes,

    /// Maximum percentage recorded for any substantive purpose.
    #[getset(get_copy = "pub")]
    highest_percentage: Option<Decimal>,
}

impl Territory {
    pub fn new(name: impl Into<String>) -> Territory {
        Territory {
            name: name.into(),
            purposes: Purposes::new(),
            highest_percentage: None,
        }
    }
}

impl PurposeTracker for Territory {
    fn update_purpose(&mut self, purpose: &str, population: Option<u64>, percentage: Option<Decimal>) {
        self.purposes.update(purpose, population, percentage);

        if let Some(percentage) = percentage {
            if !is_excluded_purpose(purpose) {
                self.highest_percentage = Some(match self.highest_percentage {
                    Some(highest) => highest.max(percentage),
                    None => percentage,
                });
            }
        }
    }

    fn purposes(&self) -> &Purposes {
        &self.purposes
    }

    fn category(&self) -> CategoryKey {
        CategoryKey::Territory(self.name.clone())
    }
}
