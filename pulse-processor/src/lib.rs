//! ResearchPulse Processor
//!
//! The paper ranking and deduplication stages:
//! - **Deduplicator**: keeps the first record of each paper across sources
//! - **Filter**: drops excluded topics and old, uncited papers
//! - **Merger**: attaches social engagement records to papers
//! - **Relevance**: scores papers against tracked terms and authors
//! - **Ranker**: orders papers by a weighted combined score
//!
//! [`PaperProcessor`] bundles the stages behind one tracking configuration.
//! Every stage is synchronous and treats an empty input as a normal case.

pub mod dedup;
pub mod filter;
pub mod merge;
pub mod relevance;
pub mod ranker;
pub mod processor;

pub use dedup::*;
pub use filter::*;
pub use merge::*;
pub use relevance::*;
pub use ranker::*;
pub use processor::*;
