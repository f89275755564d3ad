//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlState`: Shared visited set and inbound link counts for one run
//! - `TaskPhase`: Phase of an individual crawl task (admitted, fetching, expanding, done)
//! - `TaskOutcome`: Why a task reached its terminal phase

mod crawl_state;
mod task_phase;

// Re-export main types
pub use crawl_state::CrawlState;
pub use task_phase::{TaskOutcome, TaskPhase};
