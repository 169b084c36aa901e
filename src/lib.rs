//! News Mosaic - deterministic layout core for clustered news search
//!
//! Turns a query's clustered, sentiment-scored articles into two renderable
//! geometries: a seeded mosaic grid of coloured tiles for the landing and
//! loading screens, and a sunburst partition (sentiment-first or
//! cluster-first) of the results. Every layout is a pure function of its
//! inputs, so the same query always draws the same picture.

pub mod cli;
pub mod color;
pub mod config;
pub mod error;
pub mod grid;
pub mod hierarchy;
pub mod model;
pub mod radial;
pub mod random;
pub mod sentiment;

pub use error::{MosaicError, Result};
