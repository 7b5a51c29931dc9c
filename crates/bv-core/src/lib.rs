//! Core types, grouping, and filtering for the brickview inventory browser.
//!
//! This crate holds everything that does not touch the network or the
//! terminal:
//!
//! - Domain types ([`PartRecord`], [`ElementAggregate`], [`PartGroup`], [`SetMetadata`])
//! - Static reference tables ([`CategoryTable`], [`FavouriteSets`])
//! - The two-step [`grouping`] engine
//! - [`FilterState`] and option derivation
//! - The [`gallery`] projection that decides which cards are visible
//! - Configuration structures and error types
//!
//! The whole pipeline is a pure function of its inputs:
//!
//! ```
//! use bv_core::{CategoryTable, FilterState, PartRecord, gallery, grouping};
//!
//! let records = vec![
//!     PartRecord::new("A", "3001", "Brick 2 x 4", "Red", 2).with_category(11),
//!     PartRecord::new("B", "3001", "Brick 2 x 4", "Blue", 1).with_category(11),
//! ];
//! let groups = grouping::group(records, &CategoryTable::builtin());
//!
//! let mut filter = FilterState::default();
//! filter.set_search(bv_core::SearchField::Color, "blu");
//!
//! let cards = gallery::render(&groups, &filter);
//! assert_eq!(cards.len(), 1);
//! assert_eq!(cards[0].variants.len(), 1);
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod collections;
pub mod config;
pub mod error;
pub mod filter;
pub mod gallery;
pub mod grouping;
pub mod reference;
pub mod types;

pub use collections::{FxHashMap, FxHashSet, InsertionMap};
pub use config::{ApiConfig, ColorScheme, Config, ReferenceConfig, TuiConfig};
pub use error::{ConfigError, ReferenceError};
pub use filter::{FilterOptions, FilterState, SearchField};
pub use gallery::{CardRef, GallerySummary, PartCard};
pub use reference::{CategoryTable, FavouriteSet, FavouriteSets, ReferenceData};
pub use types::{ElementAggregate, PartGroup, PartRecord, SetMetadata, UNKNOWN, Variant};
