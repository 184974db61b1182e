//! Mapping of free-text `License:` fields to Arch license identifiers.
//!
//! - [`rules`]: the ordered rule table; the first matching rule decides.
//! - [`classifier`]: entry point producing a [`LicenseClassification`](crate::models::LicenseClassification),
//!   including the bundled license file scan.

pub mod classifier;
pub mod rules;
