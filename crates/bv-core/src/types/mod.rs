//! Domain types for brickview.
//!
//! # Module Organization
//!
//! - [`record`] - Raw inventory rows as returned by the catalog
//! - [`part`] - Element aggregates, part groups, and their color variants
//! - [`set`] - Set metadata shown in the header
//!
//! All public types are re-exported here and at the crate root:
//!
//! ```
//! use bv_core::{PartGroup, PartRecord, SetMetadata, Variant};
//! ```

mod part;
mod record;
mod set;

pub use part::{ElementAggregate, PartGroup, Variant};
pub use record::PartRecord;
pub use set::SetMetadata;

/// Placeholder for any name the catalog or reference tables cannot resolve.
pub const UNKNOWN: &str = "Unknown";
