//! ResearchPulse Runtime
//!
//! Everything around the ranking stages:
//! - **Fetch**: [`PaperSource`] adapters and the [`FetchCoordinator`]
//! - **Social**: [`SocialTracker`] adapters and the [`SocialCoordinator`]
//! - **Pipeline**: one end-to-end run producing a [`PipelineReport`]
//!
//! Network adapters live outside this crate; the JSON-backed source and
//! tracker let the whole pipeline run from files.

pub mod fetch;
pub mod social;
pub mod pipeline;

pub use fetch::*;
pub use social::*;
pub use pipeline::*;
