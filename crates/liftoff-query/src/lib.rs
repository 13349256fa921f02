// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

//! The query engine: deterministic, stateless transforms from
//! (table, site selector, payload range) to the two datasets the chart
//! renderer consumes. No I/O, no hidden state; every call is an
//! independent pure computation over the immutable table.

use liftoff_model::{BoosterCategory, LaunchSite, Outcome, PayloadRange, RecordTable};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub const CRATE_NAME: &str = "liftoff-query";

/// The user's scope: one specific launch site, or the all-sites view.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SiteSelector {
    All,
    Site(LaunchSite),
}

impl SiteSelector {
    #[must_use]
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl Display for SiteSelector {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "ALL"),
            Self::Site(site) => write!(f, "{site}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteSuccessCount {
    pub site: LaunchSite,
    pub successes: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutcomeCount {
    pub outcome: Outcome,
    pub count: u64,
}

/// Success-count aggregation for the breakdown chart. The grouping
/// dimension depends on scope: per-site success totals for the
/// all-sites view, per-outcome row counts for a single site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationResult {
    BySite(Vec<SiteSuccessCount>),
    ByOutcome(Vec<OutcomeCount>),
}

impl AggregationResult {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::BySite(entries) => entries.is_empty(),
            Self::ByOutcome(entries) => entries.is_empty(),
        }
    }
}

/// One point of the payload-vs-outcome correlation view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScatterPoint {
    pub payload_mass_kg: f64,
    pub outcome: Outcome,
    pub booster_category: BoosterCategory,
}

/// Caller contract violation: an inverted payload range. The engine
/// rejects it rather than silently swapping the bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvalidRangeError {
    pub lo: f64,
    pub hi: f64,
}

impl Display for InvalidRangeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid payload range: lo {} exceeds hi {}",
            self.lo, self.hi
        )
    }
}
impl std::error::Error for InvalidRangeError {}

/// Success-count aggregation for the breakdown chart.
///
/// All-sites scope groups by site and sums successes; the payload range
/// is not an input here. Single-site scope filters to the site and
/// counts rows per outcome value actually present. A selector naming a
/// site with no rows, including sites outside the known catalog, yields
/// an empty result, never an error. Grouping order is first-seen, so
/// output is stable across identical calls.
#[must_use]
pub fn aggregate_outcomes(table: &RecordTable, selector: &SiteSelector) -> AggregationResult {
    match selector {
        SiteSelector::All => {
            let mut entries: Vec<SiteSuccessCount> = Vec::new();
            for record in table {
                match entries.iter_mut().find(|e| e.site == record.site) {
                    Some(entry) => {
                        if record.outcome.is_success() {
                            entry.successes += 1;
                        }
                    }
                    None => entries.push(SiteSuccessCount {
                        site: record.site.clone(),
                        successes: u64::from(record.outcome.is_success()),
                    }),
                }
            }
            AggregationResult::BySite(entries)
        }
        SiteSelector::Site(site) => {
            let mut entries: Vec<OutcomeCount> = Vec::new();
            for record in table.iter().filter(|r| r.site == *site) {
                match entries.iter_mut().find(|e| e.outcome == record.outcome) {
                    Some(entry) => entry.count += 1,
                    None => entries.push(OutcomeCount {
                        outcome: record.outcome,
                        count: 1,
                    }),
                }
            }
            AggregationResult::ByOutcome(entries)
        }
    }
}

/// Row subset for the correlation view, projected to
/// (payload mass, outcome, booster category) in original row order.
///
/// The all-sites scope returns every row and ignores the range. A
/// single-site scope keeps rows inside the closed interval, both ends
/// inclusive. An inverted range is rejected up front, for every
/// selector.
pub fn filter_for_scatter(
    table: &RecordTable,
    selector: &SiteSelector,
    range: &PayloadRange,
) -> Result<Vec<ScatterPoint>, InvalidRangeError> {
    if range.is_inverted() {
        return Err(InvalidRangeError {
            lo: range.lo,
            hi: range.hi,
        });
    }
    let points = table
        .iter()
        .filter(|record| match selector {
            SiteSelector::All => true,
            SiteSelector::Site(site) => {
                record.site == *site && range.contains(record.payload_mass_kg)
            }
        })
        .map(|record| ScatterPoint {
            payload_mass_kg: record.payload_mass_kg,
            outcome: record.outcome,
            booster_category: record.booster_category.clone(),
        })
        .collect();
    Ok(points)
}
