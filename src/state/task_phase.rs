//! Task phase definitions for tracking a single crawl task
//!
//! Every task walks Admitted -> Fetching -> Expanding -> Done, and may jump
//! straight to Done from any earlier phase. There is no cancelled phase.

use std::fmt;

/// Represents the current phase of a crawl task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskPhase {
    /// Task holds a concurrency slot but has not started work
    Admitted,

    /// Task passed the cap check and is deduplicating, scoping, and fetching
    Fetching,

    /// Page was fetched; links are being recorded and children launched
    Expanding,

    /// Task finished; slot released and pending count decremented
    Done,
}

impl TaskPhase {
    /// Returns true if moving from `self` to `next` is a legal transition
    pub fn can_transition_to(&self, next: TaskPhase) -> bool {
        matches!(
            (self, next),
            (Self::Admitted, Self::Fetching)
                | (Self::Admitted, Self::Done)
                | (Self::Fetching, Self::Expanding)
                | (Self::Fetching, Self::Done)
                | (Self::Expanding, Self::Done)
        )
    }

    /// Moves to `next`, tracing the transition for `url`
    pub fn advance(self, next: TaskPhase, url: &str) -> TaskPhase {
        debug_assert!(
            self.can_transition_to(next),
            "invalid task transition {} -> {}",
            self,
            next
        );
        tracing::trace!("{}: {} -> {}", url, self, next);
        next
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admitted => "admitted",
            Self::Fetching => "fetching",
            Self::Expanding => "expanding",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for TaskPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Why a task reached Done
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskOutcome {
    /// Page was fetched and its links were recorded and launched
    Expanded {
        /// Number of links launched as child tasks
        links: usize,
    },

    /// Page cap was already reached when the task was admitted
    CapReached,

    /// Page was already recorded, by an earlier visit or as a link target
    AlreadyVisited,

    /// Page is outside the crawl host; recorded but never fetched
    OffDomain,

    /// Task URL could not be parsed
    InvalidUrl,

    /// Fetch failed (network, HTTP status, or content type)
    FetchFailed,

    /// Concurrency slot could not be acquired
    NotAdmitted,
}
