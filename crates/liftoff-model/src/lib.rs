// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

//! Domain types for the launch-records dashboard: validated identifiers,
//! the immutable record table, and payload-range primitives.

mod range;
mod record;
mod site;

pub const CRATE_NAME: &str = "liftoff-model";

pub use range::{PayloadBounds, PayloadRange};
pub use record::{BoosterCategory, LaunchRecord, Outcome, RecordTable};
pub use site::{is_known_site, LaunchSite, SiteCatalogEntry, ValidationError, KNOWN_SITES};
