//! Ranker
//!
//! Blends relevance, social engagement and citations into one score:
//!
//! `combined = relevance * 0.6 + social * 0.3 + (citations / 100) * 0.1`
//!
//! and orders papers by it, highest first. The sort is stable, so papers
//! with equal scores keep their incoming order.

use chrono::NaiveDateTime;
use std::cmp::Ordering;
use tracing::info;

use pulse_core::{
    Paper, SocialSignals, TrackingConfig, CITATION_SCALE, CITATION_WEIGHT, RELEVANCE_WEIGHT,
    SOCIAL_WEIGHT,
};

use crate::RelevanceScorer;

/// Weighted blend of the three ranking signals
pub fn combined_score(relevance: f64, social: f64, citations: u64) -> f64 {
    relevance * RELEVANCE_WEIGHT
        + social * SOCIAL_WEIGHT
        + (citations as f64 / CITATION_SCALE) * CITATION_WEIGHT
}

/// Score every paper and sort by combined score, descending.
///
/// `social_score` is read from `social_signals` here even if the signal
/// merger already ran; both read the same `total_score`.
pub fn rank_papers(
    mut papers: Vec<Paper>,
    social_signals: &SocialSignals,
    tracking: &TrackingConfig,
    now: NaiveDateTime,
) -> Vec<Paper> {
    let scorer = RelevanceScorer::new(tracking);

    for paper in papers.iter_mut() {
        paper.relevance_score = scorer.score(paper, now);
        paper.social_score = social_signals
            .get(&paper.paper_id)
            .map_or(0.0, |record| record.score());
        paper.combined_score =
            combined_score(paper.relevance_score, paper.social_score, paper.citations);
    }

    papers.sort_by(|a, b| {
        b.combined_score
            .partial_cmp(&a.combined_score)
            .unwrap_or(Ordering::Equal)
    });

    info!("Ranked {} papers", papers.len());
    papers
}

/// The first `limit` papers, in their current order
pub fn get_top_papers(mut papers: Vec<Paper>, limit: usize) -> Vec<Paper> {
    papers.truncate(limit);
    papers
}
