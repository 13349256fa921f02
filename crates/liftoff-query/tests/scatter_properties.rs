// SPDX-License-Identifier: Apache-2.0

use liftoff_model::{BoosterCategory, LaunchRecord, LaunchSite, Outcome, PayloadRange, RecordTable};
use liftoff_query::{aggregate_outcomes, filter_for_scatter, AggregationResult, SiteSelector};
use proptest::prelude::*;
use proptest::test_runner::Config;

const SITES: [&str; 3] = ["CCAFS LC-40", "KSC LC-39A", "VAFB SLC-4E"];

fn arb_record() -> impl Strategy<Value = LaunchRecord> {
    (0_usize..SITES.len(), 0.0_f64..10_000.0, prop::bool::ANY).prop_map(
        |(site_idx, payload, success)| {
            LaunchRecord::new(
                LaunchSite::parse(SITES[site_idx]).expect("site"),
                payload,
                if success {
                    Outcome::Success
                } else {
                    Outcome::Failure
                },
                BoosterCategory::parse("FT").expect("booster"),
            )
            .expect("record")
        },
    )
}

fn arb_table() -> impl Strategy<Value = RecordTable> {
    prop::collection::vec(arb_record(), 0..40).prop_map(RecordTable::from_records)
}

proptest! {
    #![proptest_config(Config::with_cases(128))]

    #[test]
    fn every_scatter_point_is_inside_site_and_range(
        table in arb_table(),
        site_idx in 0_usize..SITES.len(),
        lo in 0.0_f64..10_000.0,
        span in 0.0_f64..5_000.0
    ) {
        let site = LaunchSite::parse(SITES[site_idx]).expect("site");
        let range = PayloadRange::new(lo, lo + span);
        let points = filter_for_scatter(&table, &SiteSelector::Site(site.clone()), &range)
            .expect("ordered range");
        for point in &points {
            prop_assert!(range.contains(point.payload_mass_kg));
        }
        let matching = table
            .iter()
            .filter(|r| r.site == site && range.contains(r.payload_mass_kg))
            .count();
        prop_assert_eq!(points.len(), matching);
    }

    #[test]
    fn all_scope_aggregation_covers_each_distinct_site_exactly_once(table in arb_table()) {
        let agg = aggregate_outcomes(&table, &SiteSelector::All);
        let AggregationResult::BySite(entries) = agg else {
            panic!("ALL scope must group by site");
        };
        for entry in &entries {
            let successes = table
                .iter()
                .filter(|r| r.site == entry.site && r.outcome.is_success())
                .count() as u64;
            prop_assert_eq!(entry.successes, successes);
        }
        let mut sites: Vec<&str> = entries.iter().map(|e| e.site.as_str()).collect();
        let distinct_in_table: std::collections::BTreeSet<&str> =
            table.iter().map(|r| r.site.as_str()).collect();
        sites.sort_unstable();
        prop_assert_eq!(sites.len(), distinct_in_table.len());
    }

    #[test]
    fn per_outcome_counts_sum_to_site_row_count(
        table in arb_table(),
        site_idx in 0_usize..SITES.len()
    ) {
        let site = LaunchSite::parse(SITES[site_idx]).expect("site");
        let agg = aggregate_outcomes(&table, &SiteSelector::Site(site.clone()));
        let AggregationResult::ByOutcome(entries) = agg else {
            panic!("single-site scope must group by outcome");
        };
        let total: u64 = entries.iter().map(|e| e.count).sum();
        let rows = table.iter().filter(|r| r.site == site).count() as u64;
        prop_assert_eq!(total, rows);
    }

    #[test]
    fn identical_calls_yield_identical_results(
        table in arb_table(),
        site_idx in 0_usize..SITES.len(),
        lo in 0.0_f64..10_000.0,
        span in 0.0_f64..5_000.0
    ) {
        let selector = SiteSelector::Site(LaunchSite::parse(SITES[site_idx]).expect("site"));
        let range = PayloadRange::new(lo, lo + span);
        prop_assert_eq!(
            aggregate_outcomes(&table, &selector),
            aggregate_outcomes(&table, &selector)
        );
        prop_assert_eq!(
            filter_for_scatter(&table, &selector, &range).expect("first"),
            filter_for_scatter(&table, &selector, &range).expect("second")
        );
    }
}
