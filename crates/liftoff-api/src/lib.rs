// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

//! Wire contract between the query engine and the UI collaborator:
//! request parsing, response DTOs, machine-readable errors, and the
//! figure-spec payloads handed to the plotting collaborator.

mod dto;
mod errors;
mod figure;
mod params;

pub const CRATE_NAME: &str = "liftoff-api";
pub const API_VERSION: &str = "1";

pub use dto::{site_options, DashboardResponseDto, RangeDto, SiteOptionDto, SitesResponseDto};
pub use errors::{ApiError, ApiErrorCode};
pub use figure::{scatter_figure, success_figure, FigureKind, FigureSpec, PieSlice, ScatterMark};
pub use params::{parse_dashboard_params, DashboardParams, ALL_SITES_VALUE};
