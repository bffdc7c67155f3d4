//! ResearchPulse Core - Paper records and configuration for the ranking pipeline
//!
//! This crate provides the foundational primitives:
//! - Canonical paper records with defaulted computed scores
//! - Social signal records produced by engagement trackers
//! - Tracking and social configuration loaded from TOML
//! - Title normalization and paper-age helpers shared by every stage

pub mod paper;
pub mod signals;
pub mod config;
pub mod text;

pub use paper::*;
pub use signals::*;
pub use config::*;
pub use text::*;

/// Weight of the relevance score in the combined score
pub const RELEVANCE_WEIGHT: f64 = 0.6;

/// Weight of the social score in the combined score
pub const SOCIAL_WEIGHT: f64 = 0.3;

/// Weight of the scaled citation count in the combined score
pub const CITATION_WEIGHT: f64 = 0.1;

/// Citations are divided by this before weighting
pub const CITATION_SCALE: f64 = 100.0;

/// Bonus for a tracked term found in the title
pub const TITLE_MATCH_BONUS: f64 = 5.0;

/// Bonus for a tracked term found in the abstract
pub const ABSTRACT_MATCH_BONUS: f64 = 2.0;

/// Bonus for each paper author matching a tracked author
pub const AUTHOR_MATCH_BONUS: f64 = 10.0;

/// Papers at most this many days old skip the citation threshold
pub const RECENT_PAPER_DAYS: i64 = 7;

/// Citation threshold used when the filters section omits one
pub const DEFAULT_MIN_CITATIONS: u64 = 5;

/// Fetch window used when the filters section omits one
pub const DEFAULT_MAX_AGE_DAYS: i64 = 30;

/// Number of papers kept after ranking
pub const DEFAULT_TOP_N: usize = 50;
