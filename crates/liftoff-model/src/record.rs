use crate::site::{LaunchSite, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Binary launch result: 1 = success, 0 = failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(into = "u8", try_from = "u8")]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        match input.trim() {
            "0" => Ok(Self::Failure),
            "1" => Ok(Self::Success),
            other => Err(ValidationError(format!(
                "outcome must be 0 or 1, got '{other}'"
            ))),
        }
    }

    #[must_use]
    pub const fn as_u8(self) -> u8 {
        match self {
            Self::Failure => 0,
            Self::Success => 1,
        }
    }

    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

impl From<Outcome> for u8 {
    fn from(value: Outcome) -> Self {
        value.as_u8()
    }
}

impl TryFrom<u8> for Outcome {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Failure),
            1 => Ok(Self::Success),
            other => Err(ValidationError(format!(
                "outcome must be 0 or 1, got {other}"
            ))),
        }
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// Booster version category. Display/color dimension only, never filtered on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct BoosterCategory(String);

impl BoosterCategory {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let s = input.trim();
        if s.is_empty() {
            return Err(ValidationError(
                "booster category must not be empty".to_string(),
            ));
        }
        Ok(Self(s.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for BoosterCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One immutable row of the launch table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LaunchRecord {
    pub site: LaunchSite,
    pub payload_mass_kg: f64,
    pub outcome: Outcome,
    pub booster_category: BoosterCategory,
}

impl LaunchRecord {
    pub fn new(
        site: LaunchSite,
        payload_mass_kg: f64,
        outcome: Outcome,
        booster_category: BoosterCategory,
    ) -> Result<Self, ValidationError> {
        if !payload_mass_kg.is_finite() || payload_mass_kg < 0.0 {
            return Err(ValidationError(format!(
                "payload mass must be a finite non-negative number, got {payload_mass_kg}"
            )));
        }
        Ok(Self {
            site,
            payload_mass_kg,
            outcome,
            booster_category,
        })
    }
}

/// The ordered, immutable table of launch records. Built once at load
/// time; every query reads it, nothing ever mutates it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordTable(Vec<LaunchRecord>);

impl RecordTable {
    #[must_use]
    pub fn from_records(records: Vec<LaunchRecord>) -> Self {
        Self(records)
    }

    #[must_use]
    pub fn records(&self) -> &[LaunchRecord] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LaunchRecord> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a RecordTable {
    type Item = &'a LaunchRecord;
    type IntoIter = std::slice::Iter<'a, LaunchRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
