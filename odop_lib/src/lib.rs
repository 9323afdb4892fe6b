//! Library layer for the ODOP product atlas: cached API client, place
//! name reconciliation, aggregation, and the choropleth model.
//!
//! Wraps the `odop_api` crate with an in-memory TTL cache and builds the
//! derived views — state/district aggregates, the color-bucketed map
//! layer, and the filterable product list — as pure functions of the
//! fetched snapshot.

pub mod aggregate;
pub mod app;
pub mod boundary;
pub mod cache;
pub mod choropleth;
pub mod client;
pub mod color;
pub mod error;
pub mod filter;
pub mod names;

pub use odop_api;
pub use odop_api::types;
pub use odop_api::{ProductQuery, ProductSortBy, Query, SortDirection};

pub use boundary::{BoundarySet, BoundaryShape, DISTRICT_NAME_KEYS, STATE_NAME_KEYS};
pub use choropleth::{ChoroplethLayer, ChoroplethShape, Level, Mercator};
pub use client::CachedClient;
pub use color::{bucket_for, ColorBucket};
pub use error::OdopError;
pub use filter::{FilterAction, FilterState};
