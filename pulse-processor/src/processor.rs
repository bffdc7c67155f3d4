//! Paper processor
//!
//! Binds the pipeline stages to one tracking configuration and one notion of
//! "now". The reference time defaults to the local clock at each call; tests
//! pin it with [`PaperProcessor::with_reference_time`].

use chrono::NaiveDateTime;

use pulse_core::{local_now, Paper, SocialSignals, TrackingConfig};

use crate::{dedup, merge, ranker, FilterEngine, RelevanceScorer};

/// Deduplicates, filters and ranks papers for one tracking configuration
#[derive(Debug, Clone)]
pub struct PaperProcessor {
    tracking: TrackingConfig,
    filter: FilterEngine,
    reference_time: Option<NaiveDateTime>,
}

impl PaperProcessor {
    pub fn new(tracking: TrackingConfig) -> Self {
        let filter = FilterEngine::new(&tracking.filters);
        Self {
            tracking,
            filter,
            reference_time: None,
        }
    }

    /// Evaluate ages against a fixed time instead of the clock
    pub fn with_reference_time(mut self, now: NaiveDateTime) -> Self {
        self.reference_time = Some(now);
        self
    }

    pub fn tracking(&self) -> &TrackingConfig {
        &self.tracking
    }

    pub fn filter_engine(&self) -> &FilterEngine {
        &self.filter
    }

    fn now(&self) -> NaiveDateTime {
        self.reference_time.unwrap_or_else(local_now)
    }

    pub fn deduplicate(&self, papers: Vec<Paper>) -> Vec<Paper> {
        dedup::deduplicate(papers)
    }

    pub fn filter_papers(&self, papers: Vec<Paper>) -> Vec<Paper> {
        self.filter.filter_papers(papers, self.now())
    }

    /// Rank against `tracking`, which need not be the bound configuration
    pub fn rank_papers(
        &self,
        papers: Vec<Paper>,
        social_signals: &SocialSignals,
        tracking: &TrackingConfig,
    ) -> Vec<Paper> {
        ranker::rank_papers(papers, social_signals, tracking, self.now())
    }

    /// Rank against the bound tracking configuration
    pub fn rank(&self, papers: Vec<Paper>, social_signals: &SocialSignals) -> Vec<Paper> {
        self.rank_papers(papers, social_signals, &self.tracking)
    }

    pub fn merge_social_signals(&self, papers: &mut [Paper], social_signals: &SocialSignals) {
        merge::merge_social_signals(papers, social_signals)
    }

    pub fn get_top_papers(&self, papers: Vec<Paper>, limit: usize) -> Vec<Paper> {
        ranker::get_top_papers(papers, limit)
    }

    pub fn calculate_relevance(&self, paper: &Paper) -> f64 {
        RelevanceScorer::new(&self.tracking).score(paper, self.now())
    }
}
