//! Signal merger
//!
//! Folds social signals into papers in place. Papers without a record keep
//! their current `social_score` and get no `social_signals`.

use tracing::info;

use pulse_core::{Paper, SocialSignals};

/// Attach each paper's social record and score, if it has one
pub fn merge_social_signals(papers: &mut [Paper], social_signals: &SocialSignals) {
    let mut merged = 0;

    for paper in papers.iter_mut() {
        if let Some(record) = social_signals.get(&paper.paper_id) {
            paper.social_score = record.score();
            paper.social_signals = Some(record.clone());
            merged += 1;
        }
    }

    info!("Merged social signals into {} of {} papers", merged, papers.len());
}
