use std::fs::File;
use std::io;
use std::path::Path;
use std::str::FromStr;

use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::survey::{aggregate, Entity, EntityKind, PurposeTracker, RawRow, SurveyError};

#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read row {index}, err={source}")]
    Csv {
        index: usize,
        #[source]
        source: csv::Error,
    },
    #[error("failed to write record, err={0}")]
    Export(#[from] csv::Error),
    #[error("{0}")]
    Io(#[from] io::Error),
    #[error("{0}")]
    Survey(#[from] SurveyError),
}

/// One line of the published survey tables. Both the territory and the age
/// and gender tables share this layout, each leaving the other's key columns
/// out.
#[derive(Debug, Deserialize)]
pub struct ObservationRecord {
    #[serde(rename = "TERRITORIO#es", default)]
    pub territory: Option<String>,
    #[serde(rename = "EDAD_CODE", default)]
    pub age: Option<String>,
    #[serde(rename = "SEXO_CODE", default)]
    pub gender: Option<String>,
    #[serde(rename = "TASA_TURISTICA_FINALIDAD_CODE", default)]
    pub purpose: Option<String>,
    #[serde(rename = "OBS_VALUE", default)]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObservationValue {
    Population(u64),
    Percentage(Decimal),
}

impl ObservationValue {
    /// Whole numbers are population counts, anything else with a decimal
    /// form is a percentage.
    pub fn parse(value: &str, index: usize) -> Result<ObservationValue, SurveyError> {
        if let Ok(population) = value.parse::<u64>() {
            return Ok(ObservationValue::Population(population));
        }

        match Decimal::from_str(value) {
            Ok(percentage) if percentage >= dec!(0) && percentage <= dec!(100) => {
                Ok(ObservationValue::Percentage(percentage))
            },
            _ => Err(SurveyError::InvalidValue {
                index,
                value: value.to_string(),
            }),
        }
    }
}

impl ObservationRecord {
    pub fn into_raw_row(self, index: usize) -> Result<RawRow, SurveyError> {
        let value = match self.value.as_deref() {
            Some(value) if !value.is_empty() => Some(ObservationValue::parse(value, index)?),
            _ => None,
        };

        let (population, percentage) = match value {
            Some(ObservationValue::Population(population)) => (Some(population), None),
            Some(ObservationValue::Percentage(percentage)) => (None, Some(percentage)),
            None => (None, None),
        };

        Ok(RawRow {
            territory: self.territory,
            age: self.age,
            gender: self.gender,
            purpose: self.purpose,
            population,
            percentage,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct EntityRecord {
    pub category: String,
    pub purpose: String,
    pub population: Option<u64>,
    pub percentage: Option<Decimal>,
}

/// Reads survey rows from `reader` and aggregates them into entities of
/// `kind` (`territory` or `age_gender`).
pub fn read_csv<R: io::Read>(reader: R, kind: &str) -> Result<Vec<Entity>, DataError> {
    let kind = EntityKind::from_str(kind)?;
    read_entities(reader, kind)
}

pub fn read_csv_path<P: AsRef<Path>>(path: P, kind: &str) -> Result<Vec<Entity>, DataError> {
    let kind = EntityKind::from_str(kind)?;
    let file = File::open(path)?;
    read_entities(file, kind)
}

fn read_entities<R: io::Read>(reader: R, kind: EntityKind) -> Result<Vec<Entity>, DataError> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let mut rows = Vec::new();
    for (index, record) in csv_reader.deserialize::<ObservationRecord>().enumerate() {
        let record = record.map_err(|source| DataError::Csv { index, source })?;
        rows.push(record.into_raw_row(index)?);
    }

    debug!("read {} {} rows", rows.len(), kind);

    Ok(aggregate(rows, kind)?)
}

/// Writes one record per entity and purpose. Unknown values are left empty.
pub fn export_csv<W: io::Write>(entities: &[Entity], writer: W) -> Result<(), DataError> {
    let mut csv_writer = csv::WriterBuilder::new().from_writer(writer);
    for entity in entities {
        let category = entity.category().to_string();
        for (purpose, entry) in entity.purposes() {
            csv_writer.serialize(EntityRecord {
                category: category.clone(),
                purpose: purpose.clone(),
                population: entry.population(),
                percentage: entry.percentage(),
            })?;
        }
    }

    csv_writer.flush()?;

    Ok(())
}
