// SPDX-License-Identifier: Apache-2.0

use crate::errors::ApiError;
use liftoff_model::{LaunchSite, PayloadBounds, PayloadRange};
use liftoff_query::SiteSelector;
use std::collections::BTreeMap;

/// Dropdown value for the all-sites aggregate scope.
pub const ALL_SITES_VALUE: &str = "ALL";

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardParams {
    pub selector: SiteSelector,
    pub range: PayloadRange,
}

/// Parses the `site`, `lo` and `hi` query parameters for a dashboard
/// request. A missing `site` defaults to the all-sites scope; missing
/// bounds default to the table's full payload extent, matching the
/// range control's initial position. Ordering of `lo`/`hi` is not
/// checked here; that contract belongs to the query engine.
pub fn parse_dashboard_params(
    params: &BTreeMap<String, String>,
    bounds: &PayloadBounds,
) -> Result<DashboardParams, ApiError> {
    let selector = match params.get("site").map(String::as_str) {
        None | Some(ALL_SITES_VALUE) => SiteSelector::All,
        Some(raw) => {
            let site =
                LaunchSite::parse(raw).map_err(|_| ApiError::invalid_param("site", raw))?;
            SiteSelector::Site(site)
        }
    };
    let lo = parse_bound(params, "lo", bounds.min)?;
    let hi = parse_bound(params, "hi", bounds.max)?;
    Ok(DashboardParams {
        selector,
        range: PayloadRange::new(lo, hi),
    })
}

fn parse_bound(
    params: &BTreeMap<String, String>,
    name: &str,
    default: f64,
) -> Result<f64, ApiError> {
    match params.get(name) {
        None => Ok(default),
        Some(raw) => {
            let value: f64 = raw
                .trim()
                .parse()
                .map_err(|_| ApiError::invalid_param(name, raw))?;
            if !value.is_finite() || value < 0.0 {
                return Err(ApiError::invalid_param(name, raw));
            }
            Ok(value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ApiErrorCode;

    fn bounds() -> PayloadBounds {
        PayloadBounds {
            min: 20.0,
            max: 9600.0,
        }
    }

    fn params(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_to_all_sites_and_full_extent() {
        let parsed = parse_dashboard_params(&params(&[]), &bounds()).expect("parse");
        assert!(parsed.selector.is_all());
        assert_eq!(parsed.range, PayloadRange::new(20.0, 9600.0));
    }

    #[test]
    fn explicit_site_and_bounds_are_honored() {
        let parsed = parse_dashboard_params(
            &params(&[("site", "KSC LC-39A"), ("lo", "100"), ("hi", "4000")]),
            &bounds(),
        )
        .expect("parse");
        assert_eq!(parsed.selector.to_string(), "KSC LC-39A");
        assert_eq!(parsed.range, PayloadRange::new(100.0, 4000.0));
    }

    #[test]
    fn all_value_is_case_sensitive_like_the_dropdown() {
        let parsed =
            parse_dashboard_params(&params(&[("site", "ALL")]), &bounds()).expect("parse");
        assert!(parsed.selector.is_all());
        // "all" is treated as a (soft-failing) site name, not the aggregate.
        let parsed = parse_dashboard_params(&params(&[("site", "all")]), &bounds()).expect("parse");
        assert!(!parsed.selector.is_all());
    }

    #[test]
    fn malformed_bounds_are_field_errors() {
        for bad in [("lo", "abc"), ("hi", "-5"), ("lo", "NaN"), ("hi", "inf")] {
            let err = parse_dashboard_params(&params(&[bad]), &bounds()).expect_err("bad bound");
            assert_eq!(err.code, ApiErrorCode::InvalidQueryParameter);
        }
    }

    #[test]
    fn inverted_bounds_pass_through_to_the_engine() {
        let parsed = parse_dashboard_params(
            &params(&[("lo", "5000"), ("hi", "100")]),
            &bounds(),
        )
        .expect("parse succeeds; engine rejects");
        assert!(parsed.range.is_inverted());
    }

    #[test]
    fn unparseable_site_is_a_field_error() {
        let err = parse_dashboard_params(&params(&[("site", "bad\tsite")]), &bounds())
            .expect_err("bad site");
        assert_eq!(err.code, ApiErrorCode::InvalidQueryParameter);
    }
}
