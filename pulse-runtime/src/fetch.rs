//! Paper sources and fetch coordination
//!
//! Each academic source sits behind [`PaperSource`]. The coordinator turns
//! the tracking configuration into requests:
//! - keyword groups: every listed source, 50 results each
//! - tracked authors: every source, 20 results each
//! - key papers: citing papers from Semantic Scholar, 30 results each
//!
//! Requests run concurrently; results are concatenated in request order.
//! A failing request is logged and contributes nothing.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use futures::future::{join_all, BoxFuture, FutureExt};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

use pulse_core::{age_days, local_now, Paper, TrackingConfig};

/// Source that can follow citations
pub const CITATION_SOURCE: &str = "semantic_scholar";

const KEYWORD_RESULTS: usize = 50;
const AUTHOR_RESULTS: usize = 20;
const CITATION_RESULTS: usize = 30;

/// Errors from paper sources
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Request failed: {0}")]
    Request(String),
}

/// An academic paper source
#[async_trait]
pub trait PaperSource: Send + Sync {
    /// Source name as used in keyword group `sources`
    fn name(&self) -> &str;

    /// Papers matching any of `terms`
    async fn fetch_by_keywords(
        &self,
        terms: &[String],
        max_results: usize,
    ) -> Result<Vec<Paper>, SourceError>;

    /// Papers by `author`
    async fn fetch_by_author(&self, author: &str, max_results: usize)
        -> Result<Vec<Paper>, SourceError>;

    /// Papers citing `paper_id`. Not every source supports this.
    async fn fetch_by_citation(
        &self,
        _paper_id: &str,
        _max_results: usize,
    ) -> Result<Vec<Paper>, SourceError> {
        warn!("{} does not support citation tracking", self.name());
        Ok(Vec::new())
    }
}

pub type SharedSource = Arc<dyn PaperSource>;

/// Routes tracking configuration to the registered sources
#[derive(Default, Clone)]
pub struct FetchCoordinator {
    sources: BTreeMap<String, SharedSource>,
}

impl FetchCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source(mut self, source: SharedSource) -> Self {
        self.register(source);
        self
    }

    pub fn register(&mut self, source: SharedSource) {
        self.sources.insert(source.name().to_string(), source);
    }

    pub fn source_names(&self) -> Vec<&str> {
        self.sources.keys().map(|k| k.as_str()).collect()
    }

    /// Fetch everything the tracking configuration asks for
    pub async fn fetch_all_papers(&self, tracking: &TrackingConfig) -> Vec<Paper> {
        let mut requests: Vec<(String, BoxFuture<'_, Result<Vec<Paper>, SourceError>>)> =
            Vec::new();

        for group in &tracking.keywords {
            let area = group.area.as_deref().unwrap_or("unnamed");
            info!("Fetching papers for area: {}", area);

            for source_name in &group.sources {
                match self.sources.get(source_name) {
                    Some(source) => requests.push((
                        format!("{} keywords ({})", source_name, area),
                        source.fetch_by_keywords(&group.terms, KEYWORD_RESULTS),
                    )),
                    None => warn!("Unknown source {} for area {}", source_name, area),
                }
            }
        }

        for author in &tracking.authors {
            info!("Fetching papers for author: {}", author.name);

            for (source_name, source) in &self.sources {
                requests.push((
                    format!("{} author ({})", source_name, author.name),
                    source.fetch_by_author(&author.name, AUTHOR_RESULTS),
                ));
            }
        }

        if let Some(source) = self.sources.get(CITATION_SOURCE) {
            for key_paper in &tracking.key_papers {
                info!(
                    "Fetching citations for: {}",
                    key_paper.title.as_deref().unwrap_or(&key_paper.arxiv_id)
                );
                let paper_id = format!("arXiv:{}", key_paper.arxiv_id);
                let request = async move {
                    source.fetch_by_citation(&paper_id, CITATION_RESULTS).await
                };
                requests.push((
                    format!("{} citations ({})", CITATION_SOURCE, key_paper.arxiv_id),
                    request.boxed(),
                ));
            }
        }

        let (labels, futures): (Vec<_>, Vec<_>) = requests.into_iter().unzip();
        let results = join_all(futures).await;

        let mut papers = Vec::new();
        for (label, result) in labels.into_iter().zip(results) {
            match result {
                Ok(batch) => papers.extend(batch),
                Err(e) => error!("Fetch {} failed: {}", label, e),
            }
        }

        info!("Total papers fetched: {}", papers.len());
        papers
    }
}

/// Offline source backed by a JSON array of papers
pub struct JsonPaperSource {
    name: String,
    papers: Vec<Paper>,
    max_age_days: i64,
    reference_time: Option<NaiveDateTime>,
}

impl JsonPaperSource {
    pub fn new(name: &str, papers: Vec<Paper>, max_age_days: i64) -> Self {
        Self {
            name: name.to_string(),
            papers,
            max_age_days,
            reference_time: None,
        }
    }

    pub fn from_file<P: AsRef<Path>>(
        name: &str,
        path: P,
        max_age_days: i64,
    ) -> Result<Self, SourceError> {
        let content = std::fs::read_to_string(path)?;
        let papers: Vec<Paper> = serde_json::from_str(&content)?;
        Ok(Self::new(name, papers, max_age_days))
    }

    /// Evaluate the age window against a fixed time instead of the clock
    pub fn with_reference_time(mut self, now: NaiveDateTime) -> Self {
        self.reference_time = Some(now);
        self
    }

    pub fn len(&self) -> usize {
        self.papers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.papers.is_empty()
    }

    fn within_window<'a>(&'a self) -> impl Iterator<Item = &'a Paper> + 'a {
        let now = self.reference_time.unwrap_or_else(local_now);
        self.papers
            .iter()
            .filter(move |p| age_days(p.published_date, now) <= self.max_age_days)
    }
}

#[async_trait]
impl PaperSource for JsonPaperSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_by_keywords(
        &self,
        terms: &[String],
        max_results: usize,
    ) -> Result<Vec<Paper>, SourceError> {
        let terms: Vec<String> = terms
            .iter()
            .map(|t| t.to_lowercase())
            .filter(|t| !t.trim().is_empty())
            .collect();

        Ok(self
            .within_window()
            .filter(|p| {
                let title = p.title.to_lowercase();
                let abstract_text = p.abstract_text.to_lowercase();
                terms
                    .iter()
                    .any(|t| title.contains(t.as_str()) || abstract_text.contains(t.as_str()))
            })
            .take(max_results)
            .cloned()
            .collect())
    }

    async fn fetch_by_author(
        &self,
        author: &str,
        max_results: usize,
    ) -> Result<Vec<Paper>, SourceError> {
        let author = author.to_lowercase();

        Ok(self
            .within_window()
            .filter(|p| p.authors.iter().any(|a| a.to_lowercase().contains(&author)))
            .take(max_results)
            .cloned()
            .collect())
    }
}
