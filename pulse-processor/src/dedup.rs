//! Deduplication
//!
//! Papers arrive from several sources, each keyed its own way. A paper is a
//! duplicate when its `paper_id`, `arxiv_id` or `doi` was already seen, or
//! when its normalized title was.
//!
//! The three identifier namespaces share one identity key set on purpose: a
//! DOI that equals an earlier paper's `paper_id` counts as a collision.

use std::collections::HashSet;
use tracing::info;

use pulse_core::{normalize_title, Paper};

/// Seen identity keys and titles
#[derive(Debug, Default)]
pub struct Deduplicator {
    identity_keys: HashSet<String>,
    titles: HashSet<String>,
}

impl Deduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `paper` collides with anything registered so far
    pub fn is_duplicate(&self, paper: &Paper) -> bool {
        if self.identity_keys.contains(&paper.paper_id) {
            return true;
        }
        if paper
            .arxiv_key()
            .is_some_and(|id| self.identity_keys.contains(id))
        {
            return true;
        }
        if paper
            .doi_key()
            .is_some_and(|doi| self.identity_keys.contains(doi))
        {
            return true;
        }
        self.titles.contains(&normalize_title(&paper.title))
    }

    /// Record the paper's identity keys and title
    pub fn register(&mut self, paper: &Paper) {
        self.identity_keys.insert(paper.paper_id.clone());
        if let Some(id) = paper.arxiv_key() {
            self.identity_keys.insert(id.to_string());
        }
        if let Some(doi) = paper.doi_key() {
            self.identity_keys.insert(doi.to_string());
        }
        self.titles.insert(normalize_title(&paper.title));
    }

    /// Register and keep the paper unless it is a duplicate
    pub fn admit(&mut self, paper: &Paper) -> bool {
        if self.is_duplicate(paper) {
            return false;
        }
        self.register(paper);
        true
    }
}

/// Keep the first occurrence of every paper, preserving order
pub fn deduplicate(papers: Vec<Paper>) -> Vec<Paper> {
    let total = papers.len();
    let mut seen = Deduplicator::new();

    let unique: Vec<Paper> = papers.into_iter().filter(|p| seen.admit(p)).collect();

    info!("Deduplicated {} -> {} papers", total, unique.len());
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, NaiveDateTime};

    fn now() -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn paper(title: &str, url: &str, paper_id: &str) -> Paper {
        Paper::new(title, vec!["Author".to_string()], "Abstract", url, now(), "test")
            .with_paper_id(paper_id)
    }

    fn titles(papers: &[Paper]) -> Vec<&str> {
        papers.iter().map(|p| p.title.as_str()).collect()
    }

    #[test]
    fn test_deduplicate_by_paper_id() {
        let papers = vec![
            paper("Title 1", "http://url1.com", "paper1"),
            paper("Title 2", "http://url2.com", "paper1"),
            paper("Title 3", "http://url3.com", "paper2"),
        ];

        let unique = deduplicate(papers);
        assert_eq!(titles(&unique), vec!["Title 1", "Title 3"]);
    }

    #[test]
    fn test_deduplicate_by_arxiv_id() {
        let papers = vec![
            paper("Title 1", "http://url1.com", "p1").with_arxiv_id("2401.00001"),
            paper("Title 2", "http://url2.com", "p2").with_arxiv_id("2401.00001"),
            paper("Title 3", "http://url3.com", "p3").with_arxiv_id("2401.00002"),
        ];

        let unique = deduplicate(papers);
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].arxiv_id.as_deref(), Some("2401.00001"));
        assert_eq!(unique[1].arxiv_id.as_deref(), Some("2401.00002"));
    }

    #[test]
    fn test_deduplicate_by_doi() {
        let papers = vec![
            paper("Title 1", "http://url1.com", "p1").with_doi("10.1234/test1"),
            paper("Title 2", "http://url2.com", "p2").with_doi("10.1234/test1"),
            paper("Title 3", "http://url3.com", "p3").with_doi("10.1234/test2"),
        ];

        let unique = deduplicate(papers);
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].doi.as_deref(), Some("10.1234/test1"));
        assert_eq!(unique[1].doi.as_deref(), Some("10.1234/test2"));
    }

    #[test]
    fn test_deduplicate_by_normalized_title() {
        let papers = vec![
            paper("Attention Is All You Need", "http://url1.com", "p1"),
            paper("Attention is all you need!", "http://url2.com", "p2"),
            paper("Different Title", "http://url3.com", "p3"),
        ];

        let unique = deduplicate(papers);
        let ids: Vec<&str> = unique.iter().map(|p| p.paper_id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p3"]);
    }

    #[test]
    fn test_numeric_symbols_keep_titles_apart() {
        let papers = vec![
            paper("Fitting R²", "http://url1.com", "p1"),
            paper("Fitting R", "http://url2.com", "p2"),
            paper("Fitting R²!", "http://url3.com", "p3"),
        ];

        let unique = deduplicate(papers);
        let ids: Vec<&str> = unique.iter().map(|p| p.paper_id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p2"]);
    }

    #[test]
    fn test_identity_keys_are_pooled_across_namespaces() {
        // An arXiv id equal to an earlier paper_id is a collision
        let papers = vec![
            paper("Title 1", "http://url1.com", "2401.00001"),
            paper("Title 2", "http://url2.com", "p2").with_arxiv_id("2401.00001"),
            // A paper_id equal to an earlier DOI is too
            paper("Title 3", "http://url3.com", "p3").with_doi("10.1234/x"),
            paper("Title 4", "http://url4.com", "10.1234/x"),
        ];

        let unique = deduplicate(papers);
        assert_eq!(titles(&unique), vec!["Title 1", "Title 3"]);
    }

    #[test]
    fn test_paper_id_falls_back_to_url() {
        let papers = vec![
            Paper::new("Title 1", vec![], "", "http://same.com", now(), "arxiv"),
            Paper::new("Title 2", vec![], "", "http://same.com", now(), "semantic_scholar"),
        ];

        assert_eq!(deduplicate(papers).len(), 1);
    }

    #[test]
    fn test_empty_identifiers_do_not_collide() {
        let papers = vec![
            paper("Title 1", "http://url1.com", "p1").with_arxiv_id("").with_doi(""),
            paper("Title 2", "http://url2.com", "p2").with_arxiv_id("").with_doi(""),
        ];

        assert_eq!(deduplicate(papers).len(), 2);
    }

    #[test]
    fn test_dropped_duplicates_register_nothing() {
        // p2 is dropped for its title, so its DOI must not block p3
        let papers = vec![
            paper("Same Title", "http://url1.com", "p1"),
            paper("Same Title", "http://url2.com", "p2").with_doi("10.1/x"),
            paper("Other Title", "http://url3.com", "p3").with_doi("10.1/x"),
        ];

        let unique = deduplicate(papers);
        let ids: Vec<&str> = unique.iter().map(|p| p.paper_id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p3"]);
    }

    #[test]
    fn test_deduplicate_is_idempotent_and_order_preserving() {
        let papers = vec![
            paper("Gamma", "http://g.com", "g"),
            paper("Alpha", "http://a.com", "a").with_arxiv_id("2401.1"),
            paper("alpha!", "http://a2.com", "a2"),
            paper("Beta", "http://b.com", "b").with_arxiv_id("2401.1"),
            paper("Delta", "http://d.com", "d"),
            paper("Gamma", "http://g2.com", "g2"),
        ];

        let once = deduplicate(papers.clone());
        assert_eq!(titles(&once), vec!["Gamma", "Alpha", "Delta"]);

        // Subsequence of the input in original order
        let mut input = papers.iter();
        for kept in &once {
            assert!(input.any(|p| p == kept));
        }

        let twice = deduplicate(once.clone());
        assert_eq!(twice, once);
    }

    #[test]
    fn test_deduplicate_empty_list() {
        assert!(deduplicate(Vec::new()).is_empty());
    }
}
