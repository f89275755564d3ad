//! URL handling module for Link-Census
//!
//! This module provides URL normalization into dedup keys and the host-scope
//! check that decides which links are internal.

mod domain;
mod normalize;

// Re-export main functions
pub use domain::{host_key, is_same_host};
pub use normalize::{normalize_parsed, normalize_url, NormalizedUrl};
