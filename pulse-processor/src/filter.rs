//! Filter engine
//!
//! Drops papers that mention an excluded keyword, and older papers that have
//! not gathered enough citations.
//! - Keyword check: literal, case-insensitive substring of "title abstract"
//! - Citation check: skipped for papers at most a week old

use chrono::NaiveDateTime;
use tracing::{debug, info};

use pulse_core::{age_days, preview, FilterConfig, Paper, RECENT_PAPER_DAYS};

/// Inclusion criteria, with excluded keywords lowercased once
#[derive(Debug, Clone)]
pub struct FilterEngine {
    min_citations: u64,
    exclude_keywords: Vec<String>,
}

impl FilterEngine {
    pub fn new(config: &FilterConfig) -> Self {
        Self {
            min_citations: config.min_citations,
            exclude_keywords: config
                .exclude_keywords
                .iter()
                .map(|kw| kw.to_lowercase())
                .collect(),
        }
    }

    pub fn min_citations(&self) -> u64 {
        self.min_citations
    }

    pub fn exclude_keywords(&self) -> &[String] {
        &self.exclude_keywords
    }

    /// Whether title or abstract mentions an excluded keyword
    pub fn contains_excluded_keywords(&self, title: &str, abstract_text: &str) -> bool {
        let text = format!("{} {}", title, abstract_text).to_lowercase();
        self.exclude_keywords.iter().any(|kw| text.contains(kw.as_str()))
    }

    /// Whether the paper is recent enough or cited enough
    pub fn meets_citation_threshold(&self, paper: &Paper, now: NaiveDateTime) -> bool {
        age_days(paper.published_date, now) <= RECENT_PAPER_DAYS
            || paper.citations >= self.min_citations
    }

    /// Keep the papers passing both checks, in order
    pub fn filter_papers(&self, papers: Vec<Paper>, now: NaiveDateTime) -> Vec<Paper> {
        let total = papers.len();

        let filtered: Vec<Paper> = papers
            .into_iter()
            .filter(|paper| {
                if self.contains_excluded_keywords(&paper.title, &paper.abstract_text) {
                    debug!("Filtered out (excluded keywords): {}", preview(&paper.title, 50));
                    return false;
                }
                if !self.meets_citation_threshold(paper, now) {
                    debug!("Filtered out (low citations): {}", preview(&paper.title, 50));
                    return false;
                }
                true
            })
            .collect();

        info!("Filtered {} -> {} papers", total, filtered.len());
        filtered
    }
}
