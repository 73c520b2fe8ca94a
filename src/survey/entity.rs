use std::fmt;
use std::str::FromStr;

use enum_dispatch::enum_dispatch;

use super::age_gender::AgeGender;
use super::territory::Territory;
use super::SurveyError;

#[enum_dispatch(PurposeTracker)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entity {
    Territory,
    AgeGender,
}

impl Entity {
    pub fn new(key: CategoryKey) -> Entity {
        match key {
            CategoryKey::Territory(name) => Entity::Territory(Territory::new(name)),
            CategoryKey::AgeGender { age, gender } => Entity::AgeGender(AgeGender::new(age, gender)),
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Territory(_) => EntityKind::Territory,
            Entity::AgeGender(_) => EntityKind::AgeGender,
        }
    }

    pub fn as_territory(&self) -> Option<&Territory> {
        match self {
            Entity::Territory(territory) => Some(territory),
            Entity::AgeGender(_) => None,
        }
    }

    pub fn into_territory(self) -> Option<Territory> {
        match self {
            Entity::Territory(territory) => Some(territory),
            Entity::AgeGender(_) => None,
        }
    }

    pub fn as_age_gender(&self) -> Option<&AgeGender> {
        match self {
            Entity::AgeGender(group) => Some(group),
            Entity::Territory(_) => None,
        }
    }

    pub fn into_age_gender(self) -> Option<AgeGender> {
        match self {
            Entity::AgeGender(group) => Some(group),
            Entity::Territory(_) => None,
        }
    }
}

/// Identifies the entity a row is merged into.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CategoryKey {
    Territory(String),
    AgeGender { age: String, gender: String },
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryKey::Territory(name) => write!(f, "{}", name),
            CategoryKey::AgeGender { age, gender } => write!(f, "{}/{}", age, gender),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Territory,
    AgeGender,
}

impl FromStr for EntityKind {
    type Err = SurveyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "territory" => Ok(EntityKind::Territory),
            "age_gender" | "age-gender" => Ok(EntityKind::AgeGender),
            _ => Err(SurveyError::UnsupportedKind(s.to_string())),
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Territory => write!(f, "territory"),
            EntityKind::AgeGender => write!(f, "age_gender"),
        }
    }
}
