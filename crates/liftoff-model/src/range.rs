use serde::{Deserialize, Serialize};

/// Closed payload-mass interval `[lo, hi]`, both ends inclusive.
///
/// Construction does not check ordering: whether `lo > hi` is a
/// contract violation is the query engine's call, and it rejects such
/// ranges instead of silently swapping the bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PayloadRange {
    pub lo: f64,
    pub hi: f64,
}

impl PayloadRange {
    #[must_use]
    pub const fn new(lo: f64, hi: f64) -> Self {
        Self { lo, hi }
    }

    #[must_use]
    pub fn is_inverted(&self) -> bool {
        self.lo > self.hi
    }

    #[must_use]
    pub fn contains(&self, payload_mass_kg: f64) -> bool {
        self.lo <= payload_mass_kg && payload_mass_kg <= self.hi
    }
}

/// Global payload extent of a loaded table, computed once at load time
/// and used to initialize the range control's default span.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PayloadBounds {
    pub min: f64,
    pub max: f64,
}

impl PayloadBounds {
    #[must_use]
    pub const fn full_range(&self) -> PayloadRange {
        PayloadRange::new(self.min, self.max)
    }
}
