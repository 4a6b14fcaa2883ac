//! Core enrichment pipeline for ProfileScout.
//!
//! Ties the other crates together: discovers candidate websites on a
//! profile, scrapes each through an injected capability (or serves it from
//! the insight cache), normalizes the raw scrapes, and aggregates them into
//! one enrichment block attached to the profile.

pub mod aggregate;
pub mod enrich;
pub mod normalizer;

pub use enrich::{EnrichProgress, SilentProgress, enrich_profile};
