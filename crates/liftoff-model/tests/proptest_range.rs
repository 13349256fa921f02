// SPDX-License-Identifier: Apache-2.0

use liftoff_model::PayloadRange;
use proptest::prelude::*;
use proptest::test_runner::Config;

proptest! {
    #![proptest_config(Config::with_cases(128))]
    #[test]
    fn ordered_ranges_contain_their_endpoints(
        lo in 0.0_f64..50_000.0,
        span in 0.0_f64..10_000.0
    ) {
        let range = PayloadRange::new(lo, lo + span);
        prop_assert!(!range.is_inverted());
        prop_assert!(range.contains(range.lo));
        prop_assert!(range.contains(range.hi));
    }

    #[test]
    fn containment_implies_order(
        lo in 0.0_f64..50_000.0,
        hi in 0.0_f64..50_000.0,
        probe in 0.0_f64..50_000.0
    ) {
        let range = PayloadRange::new(lo, hi);
        if range.contains(probe) {
            prop_assert!(range.lo <= probe && probe <= range.hi);
        }
    }
}
