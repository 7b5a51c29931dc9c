//! Rebrickable catalog client for brickview.
//!
//! [`CatalogClient`] fetches set metadata, theme names and paginated parts
//! listings. Every result is memoized in a [`MemoCache`] owned by the client,
//! so redrawing the gallery never re-issues a request.
//!
//! # Modules
//!
//! - [`client`] - The client and its result types
//! - [`transport`] - The [`Transport`] seam and its `reqwest` implementation
//! - [`cache`] - Per-session memoization
//! - [`error`] - [`ClientError`]

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod cache;
pub mod client;
pub mod error;
pub mod transport;
mod wire;

pub use cache::MemoCache;
pub use client::{CatalogClient, Inventory, LoadedSet};
pub use error::ClientError;
pub use transport::{HttpTransport, Response, Transport};
