//! Relevance scoring against tracked interests
//!
//! Additive, case-insensitive substring matching:
//! - each tracked term: +5 if in the title, +2 if in the abstract
//! - each paper author matching a tracked author: +10
//!
//! The total is then boosted for recent papers.

use chrono::NaiveDateTime;

use pulse_core::{
    age_days, Paper, TrackingConfig, ABSTRACT_MATCH_BONUS, AUTHOR_MATCH_BONUS, TITLE_MATCH_BONUS,
};

/// Tracked terms and author names, lowercased once
#[derive(Debug, Clone, Default)]
pub struct RelevanceScorer {
    terms: Vec<String>,
    authors: Vec<String>,
}

impl RelevanceScorer {
    pub fn new(tracking: &TrackingConfig) -> Self {
        Self {
            terms: tracking.all_terms().map(|t| t.to_lowercase()).collect(),
            authors: tracking
                .authors
                .iter()
                .map(|a| a.name.to_lowercase())
                .collect(),
        }
    }

    /// Score one paper as of `now`
    pub fn score(&self, paper: &Paper, now: NaiveDateTime) -> f64 {
        let score = self.keyword_score(paper) + self.author_score(paper);
        score * recency_multiplier(age_days(paper.published_date, now))
    }

    fn keyword_score(&self, paper: &Paper) -> f64 {
        let title = paper.title.to_lowercase();
        let abstract_text = paper.abstract_text.to_lowercase();

        self.terms.iter().fold(0.0, |mut score, term| {
            if title.contains(term.as_str()) {
                score += TITLE_MATCH_BONUS;
            }
            if abstract_text.contains(term.as_str()) {
                score += ABSTRACT_MATCH_BONUS;
            }
            score
        })
    }

    fn author_score(&self, paper: &Paper) -> f64 {
        let matched = paper
            .authors
            .iter()
            .filter(|author| {
                let author = author.to_lowercase();
                // Containment both ways tolerates "Last, First" vs "First Last"
                self.authors
                    .iter()
                    .any(|tracked| author.contains(tracked.as_str()) || tracked.contains(author.as_str()))
            })
            .count();

        matched as f64 * AUTHOR_MATCH_BONUS
    }
}

/// Boost applied to fresh papers
pub fn recency_multiplier(age_days: i64) -> f64 {
    if age_days <= 1 {
        1.5
    } else if age_days <= 3 {
        1.3
    } else if age_days <= 7 {
        1.1
    } else {
        1.0
    }
}

/// Score `paper` against `tracking` as of `now`
pub fn calculate_relevance(paper: &Paper, tracking: &TrackingConfig, now: NaiveDateTime) -> f64 {
    RelevanceScorer::new(tracking).score(paper, now)
}
