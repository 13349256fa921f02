// SPDX-License-Identifier: Apache-2.0

use crate::figure::FigureSpec;
use crate::params::ALL_SITES_VALUE;
use liftoff_model::KNOWN_SITES;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteOptionDto {
    pub label: String,
    pub value: String,
}

/// Options for the site dropdown: the all-sites entry first, then the
/// known sites in catalog order.
#[must_use]
pub fn site_options() -> Vec<SiteOptionDto> {
    let mut options = Vec::with_capacity(KNOWN_SITES.len() + 1);
    options.push(SiteOptionDto {
        label: "All Sites".to_string(),
        value: ALL_SITES_VALUE.to_string(),
    });
    options.extend(KNOWN_SITES.iter().map(|entry| SiteOptionDto {
        label: entry.label.to_string(),
        value: entry.value.to_string(),
    }));
    options
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SitesResponseDto {
    pub api_version: String,
    pub options: Vec<SiteOptionDto>,
    pub payload_min: f64,
    pub payload_max: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RangeDto {
    pub lo: f64,
    pub hi: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DashboardResponseDto {
    pub api_version: String,
    pub site: String,
    pub range: RangeDto,
    pub success_figure: FigureSpec,
    pub scatter_figure: FigureSpec,
}
