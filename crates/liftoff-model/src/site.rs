use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError(pub String);

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ValidationError {}

pub const SITE_MAX_LEN: usize = 64;

/// A launch-site identifier as it appears in the `Launch Site` column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct LaunchSite(String);

impl LaunchSite {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let s = input.trim();
        if s.is_empty() {
            return Err(ValidationError("launch site must not be empty".to_string()));
        }
        if s.len() > SITE_MAX_LEN {
            return Err(ValidationError(format!(
                "launch site exceeds max length {SITE_MAX_LEN}"
            )));
        }
        if !s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == ' ' || c == '-' || c == '_')
        {
            return Err(ValidationError(
                "launch site must match [A-Za-z0-9 _-]+".to_string(),
            ));
        }
        Ok(Self(s.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for LaunchSite {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One entry of the fixed dropdown catalog: display label plus the
/// identifier the selector carries. The catalog may list sites the
/// loaded table never mentions; selecting one yields empty results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiteCatalogEntry {
    pub label: &'static str,
    pub value: &'static str,
}

pub const KNOWN_SITES: [SiteCatalogEntry; 4] = [
    SiteCatalogEntry {
        label: "CCAFS LC-40",
        value: "CCAFS LC-40",
    },
    SiteCatalogEntry {
        label: "CCAFS SLC-40",
        value: "CCAFS SLC-40",
    },
    SiteCatalogEntry {
        label: "KSC LC-39A",
        value: "KSC LC-39A",
    },
    SiteCatalogEntry {
        label: "VAFB SLC-4E",
        value: "VAFB SLC-4E",
    },
];

#[must_use]
pub fn is_known_site(site: &LaunchSite) -> bool {
    KNOWN_SITES.iter().any(|entry| entry.value == site.as_str())
}
