//! Cache module - in-memory caching using Moka.
//!
//! Stores front their backing database with a [`TypedCache`] built from a
//! [`CacheConfig`], so hot lookups skip the database round-trip.

mod config;
mod typed;

pub use config::CacheConfig;
pub use typed::TypedCache;
