use std::collections::HashMap;

use log::debug;
use rust_decimal::Decimal;

use super::entity::{CategoryKey, Entity, EntityKind};
use super::{PurposeTracker, SurveyError};

/// One observation as handed over by a row source. Empty strings are
/// treated the same as missing values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    pub territory: Option<String>,
    pub age: Option<String>,
    pub gender: Option<String>,
    pub purpose: Option<String>,
    pub population: Option<u64>,
    pub percentage: Option<Decimal>,
}

impl RawRow {
    pub fn territory(name: &str, purpose: &str) -> RawRow {
        RawRow {
            territory: Some(name.to_string()),
            purpose: Some(purpose.to_string()),
            ..Default::default()
        }
    }

    pub fn age_gender(age: &str, gender: &str, purpose: &str) -> RawRow {
        RawRow {
            age: Some(age.to_string()),
            gender: Some(gender.to_string()),
            purpose: Some(purpose.to_string()),
            ..Default::default()
        }
    }

    pub fn with_population(mut self, population: u64) -> RawRow {
        self.population = Some(population);
        self
    }

    pub fn with_percentage(mut self, percentage: Decimal) -> RawRow {
        self.percentage = Some(percentage);
        self
    }

    fn category_key(&self, kind: EntityKind, index: usize) -> Result<CategoryKey, SurveyError> {
        match kind {
            EntityKind::Territory => {
                let name = self.required(&self.territory, "territory", index)?;
                Ok(CategoryKey::Territory(name.to_string()))
            },
            EntityKind::AgeGender => {
                let age = self.required(&self.age, "age", index)?;
                let gender = self.required(&self.gender, "gender", index)?;
                Ok(CategoryKey::AgeGender {
                    age: age.to_string(),
                    gender: gender.to_string(),
                })
            },
        }
    }

    fn required<'a>(
        &self,
        value: &'a Option<String>,
        field: &'static str,
        index: usize,
    ) -> Result<&'a str, SurveyError> {
        match value.as_deref() {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(SurveyError::MalformedRow {
                index,
                field,
                row: format!("{:?}", self),
            }),
        }
    }
}

/// Folds rows into entities. Entities are kept in the order their
/// category key was first seen.
#[derive(Debug)]
pub struct Aggregator {
    kind: EntityKind,
    index: HashMap<CategoryKey, usize>,
    entities: Vec<Entity>,
}

impl Aggregator {
    pub fn new(kind: EntityKind) -> Aggregator {
        Aggregator {
            kind,
            index: HashMap::new(),
            entities: Vec::new(),
        }
    }

    /// `index` is the zero-based position of the row in its source and is
    /// only used for error reporting.
    pub fn apply_row(&mut self, index: usize, row: &RawRow) -> Result<(), SurveyError> {
        let key = row.category_key(self.kind, index)?;
        let purpose = row.required(&row.purpose, "purpose", index)?;

        let position = match self.index.get(&key) {
            Some(&position) => position,
            None => {
                debug!("new {} entity, key={}", self.kind, key);
                let position = self.entities.len();
                self.index.insert(key.clone(), position);
                self.entities.push(Entity::new(key));
                position
            },
        };

        let entity = &mut self.entities[position];
        entity.update_purpose(purpose, row.population, row.percentage);

        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn into_entities(self) -> Vec<Entity> {
        self.entities
    }
}

/// Aggregates `rows` into entities of the given kind. The first malformed
/// row aborts the whole run.
pub fn aggregate<I>(rows: I, kind: EntityKind) -> Result<Vec<Entity>, SurveyError>
where
    I: IntoIterator<Item = RawRow>,
{
    let mut aggregator = Aggregator::new(kind);
    for (index, row) in rows.into_iter().enumerate() {
        aggregator.apply_row(index, &row)?;
    }

    if aggregator.is_empty() {
        debug!("no {} rows to aggregate", kind);
    } else {
        debug!("aggregated {} {} entities", aggregator.len(), kind);
    }

    Ok(aggregator.into_entities())
}
