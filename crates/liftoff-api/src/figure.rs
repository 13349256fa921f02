// SPDX-License-Identifier: Apache-2.0

//! Figure descriptions handed to the rendering layer. A figure is data
//! plus a title; how it is drawn is the front end's business.

use liftoff_query::{AggregationResult, ScatterPoint, SiteSelector};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FigureKind {
    Pie,
    Scatter,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PieSlice {
    pub label: String,
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScatterMark {
    pub x: f64,
    pub y: u8,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FigureSpec {
    pub kind: FigureKind,
    pub title: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub slices: Vec<PieSlice>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub marks: Vec<ScatterMark>,
}

/// Builds the success pie from an aggregation result. In the all-sites
/// scope each slice is a site's success count; for a single site the
/// slices are the outcome totals.
#[must_use]
pub fn success_figure(selector: &SiteSelector, result: &AggregationResult) -> FigureSpec {
    let (title, slices) = match result {
        AggregationResult::BySite(counts) => (
            "Total Success Launches by Site".to_string(),
            counts
                .iter()
                .map(|entry| PieSlice {
                    label: entry.site.as_str().to_string(),
                    value: entry.successes,
                })
                .collect(),
        ),
        AggregationResult::ByOutcome(counts) => (
            format!("Success vs. Failure for {selector}"),
            counts
                .iter()
                .map(|entry| PieSlice {
                    label: if entry.outcome.is_success() {
                        "Success".to_string()
                    } else {
                        "Failure".to_string()
                    },
                    value: entry.count,
                })
                .collect(),
        ),
    };
    FigureSpec {
        kind: FigureKind::Pie,
        title,
        slices,
        marks: Vec::new(),
    }
}

/// Builds the payload-versus-outcome scatter. Marks keep the row order
/// of the underlying points and are colored by booster category.
#[must_use]
pub fn scatter_figure(points: &[ScatterPoint]) -> FigureSpec {
    FigureSpec {
        kind: FigureKind::Scatter,
        title: "Payload vs. Launch Outcome".to_string(),
        slices: Vec::new(),
        marks: points
            .iter()
            .map(|point| ScatterMark {
                x: point.payload_mass_kg,
                y: point.outcome.as_u8(),
                color: point.booster_category.as_str().to_string(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use liftoff_model::{BoosterCategory, LaunchSite, Outcome};
    use liftoff_query::{OutcomeCount, SiteSuccessCount};

    fn site(name: &str) -> LaunchSite {
        LaunchSite::parse(name).expect("valid site")
    }

    #[test]
    fn by_site_aggregation_becomes_per_site_slices() {
        let result = AggregationResult::BySite(vec![
            SiteSuccessCount {
                site: site("KSC LC-39A"),
                successes: 7,
            },
            SiteSuccessCount {
                site: site("VAFB SLC-4E"),
                successes: 2,
            },
        ]);
        let figure = success_figure(&SiteSelector::All, &result);
        assert_eq!(figure.kind, FigureKind::Pie);
        assert_eq!(figure.title, "Total Success Launches by Site");
        assert_eq!(
            figure.slices,
            vec![
                PieSlice {
                    label: "KSC LC-39A".to_string(),
                    value: 7
                },
                PieSlice {
                    label: "VAFB SLC-4E".to_string(),
                    value: 2
                },
            ]
        );
        assert!(figure.marks.is_empty());
    }

    #[test]
    fn by_outcome_aggregation_names_the_site_in_the_title() {
        let selector = SiteSelector::Site(site("CCAFS LC-40"));
        let result = AggregationResult::ByOutcome(vec![
            OutcomeCount {
                outcome: Outcome::Success,
                count: 3,
            },
            OutcomeCount {
                outcome: Outcome::Failure,
                count: 5,
            },
        ]);
        let figure = success_figure(&selector, &result);
        assert_eq!(figure.title, "Success vs. Failure for CCAFS LC-40");
        assert_eq!(figure.slices[0].label, "Success");
        assert_eq!(figure.slices[1].label, "Failure");
    }

    #[test]
    fn scatter_marks_keep_row_order_and_booster_colors() {
        let points = vec![
            ScatterPoint {
                payload_mass_kg: 500.0,
                outcome: Outcome::Success,
                booster_category: BoosterCategory::parse("FT").expect("valid category"),
            },
            ScatterPoint {
                payload_mass_kg: 120.0,
                outcome: Outcome::Failure,
                booster_category: BoosterCategory::parse("v1.0").expect("valid category"),
            },
        ];
        let figure = scatter_figure(&points);
        assert_eq!(figure.kind, FigureKind::Scatter);
        assert_eq!(figure.marks.len(), 2);
        assert_eq!(figure.marks[0].x, 500.0);
        assert_eq!(figure.marks[0].y, 1);
        assert_eq!(figure.marks[1].color, "v1.0");
        assert!(figure.slices.is_empty());
    }

    #[test]
    fn empty_inputs_yield_empty_figures() {
        let figure = success_figure(&SiteSelector::All, &AggregationResult::BySite(Vec::new()));
        assert!(figure.slices.is_empty());
        let figure = scatter_figure(&[]);
        assert!(figure.marks.is_empty());
    }
}
