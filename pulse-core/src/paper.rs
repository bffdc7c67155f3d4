//! Canonical paper records
//!
//! A [`Paper`] is built by a fetcher, then enriched in place by the later
//! pipeline stages:
//! - the signal merger sets `social_score` and `social_signals`
//! - the ranker sets `relevance_score`, `social_score` and `combined_score`
//!
//! Every computed field has a defined default, so a stage that never ran
//! leaves zeros and `None` behind rather than missing data.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::SocialSignalRecord;

/// One research paper and its computed scores
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "PaperRecord")]
pub struct Paper {
    pub title: String,
    pub authors: Vec<String>,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    /// Canonical link
    pub url: String,
    pub published_date: NaiveDateTime,
    /// Origin system (arxiv, semantic_scholar, ...)
    pub source: String,
    /// Unique within a run; falls back to `url`
    pub paper_id: String,
    pub arxiv_id: Option<String>,
    pub doi: Option<String>,
    pub citations: u64,
    pub venue: Option<String>,
    pub pdf_url: Option<String>,
    /// Category tags
    pub keywords: Vec<String>,

    pub summary: Option<String>,
    pub contributions: Option<Vec<String>>,
    pub social_score: f64,
    pub relevance_score: f64,
    pub combined_score: f64,
    pub social_signals: Option<SocialSignalRecord>,
}

impl Paper {
    /// Create a paper from the fields every source provides.
    /// `paper_id` starts out as the url.
    pub fn new(
        title: impl Into<String>,
        authors: Vec<String>,
        abstract_text: impl Into<String>,
        url: impl Into<String>,
        published_date: NaiveDateTime,
        source: impl Into<String>,
    ) -> Self {
        let url = url.into();
        Self {
            title: title.into(),
            authors,
            abstract_text: abstract_text.into(),
            paper_id: url.clone(),
            url,
            published_date,
            source: source.into(),
            arxiv_id: None,
            doi: None,
            citations: 0,
            venue: None,
            pdf_url: None,
            keywords: Vec::new(),
            summary: None,
            contributions: None,
            social_score: 0.0,
            relevance_score: 0.0,
            combined_score: 0.0,
            social_signals: None,
        }
    }

    /// Set the source-specific id. An empty id keeps the url fallback.
    pub fn with_paper_id(mut self, paper_id: &str) -> Self {
        if !paper_id.is_empty() {
            self.paper_id = paper_id.to_string();
        }
        self
    }

    pub fn with_arxiv_id(mut self, arxiv_id: &str) -> Self {
        self.arxiv_id = Some(arxiv_id.to_string());
        self
    }

    pub fn with_doi(mut self, doi: &str) -> Self {
        self.doi = Some(doi.to_string());
        self
    }

    pub fn with_citations(mut self, citations: u64) -> Self {
        self.citations = citations;
        self
    }

    pub fn with_venue(mut self, venue: &str) -> Self {
        self.venue = Some(venue.to_string());
        self
    }

    pub fn with_pdf_url(mut self, pdf_url: &str) -> Self {
        self.pdf_url = Some(pdf_url.to_string());
        self
    }

    pub fn with_keywords(mut self, keywords: Vec<String>) -> Self {
        self.keywords = keywords;
        self
    }

    /// arXiv id, if set and non-empty
    pub fn arxiv_key(&self) -> Option<&str> {
        self.arxiv_id.as_deref().filter(|id| !id.is_empty())
    }

    /// DOI, if set and non-empty
    pub fn doi_key(&self) -> Option<&str> {
        self.doi.as_deref().filter(|doi| !doi.is_empty())
    }
}

/// Wire shape of a paper: only the fetcher-provided fields are required
#[derive(Debug, Deserialize)]
struct PaperRecord {
    title: String,
    #[serde(default)]
    authors: Vec<String>,
    #[serde(default, rename = "abstract")]
    abstract_text: String,
    url: String,
    published_date: NaiveDateTime,
    source: String,
    #[serde(default)]
    paper_id: Option<String>,
    #[serde(default)]
    arxiv_id: Option<String>,
    #[serde(default)]
    doi: Option<String>,
    #[serde(default)]
    citations: u64,
    #[serde(default)]
    venue: Option<String>,
    #[serde(default)]
    pdf_url: Option<String>,
    #[serde(default)]
    keywords: Vec<String>,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    contributions: Option<Vec<String>>,
    #[serde(default)]
    social_score: f64,
    #[serde(default)]
    relevance_score: f64,
    #[serde(default)]
    combined_score: f64,
    #[serde(default)]
    social_signals: Option<SocialSignalRecord>,
}

impl From<PaperRecord> for Paper {
    fn from(record: PaperRecord) -> Self {
        let paper_id = record
            .paper_id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| record.url.clone());

        Self {
            title: record.title,
            authors: record.authors,
            abstract_text: record.abstract_text,
            url: record.url,
            published_date: record.published_date,
            source: record.source,
            paper_id,
            arxiv_id: record.arxiv_id,
            doi: record.doi,
            citations: record.citations,
            venue: record.venue,
            pdf_url: record.pdf_url,
            keywords: record.keywords,
            summary: record.summary,
            contributions: record.contributions,
            social_score: record.social_score,
            relevance_score: record.relevance_score,
            combined_score: record.combined_score,
            social_signals: record.social_signals,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn published() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2017, 6, 12)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_paper_defaults() {
        let paper = Paper::new(
            "Attention Is All You Need",
            vec!["Vaswani, Ashish".to_string()],
            "We propose a new simple network architecture.",
            "https://arxiv.org/abs/1706.03762",
            published(),
            "arxiv",
        );

        assert_eq!(paper.paper_id, "https://arxiv.org/abs/1706.03762");
        assert_eq!(paper.citations, 0);
        assert!(paper.keywords.is_empty());
        assert_eq!(paper.social_score, 0.0);
        assert_eq!(paper.relevance_score, 0.0);
        assert_eq!(paper.combined_score, 0.0);
        assert!(paper.summary.is_none());
        assert!(paper.contributions.is_none());
        assert!(paper.social_signals.is_none());
    }

    #[test]
    fn test_empty_paper_id_keeps_url() {
        let paper = Paper::new("T", vec![], "", "http://url.com", published(), "test")
            .with_paper_id("");
        assert_eq!(paper.paper_id, "http://url.com");

        let paper = paper.with_paper_id("paper123");
        assert_eq!(paper.paper_id, "paper123");
    }

    #[test]
    fn test_identifier_keys_skip_empty() {
        let paper = Paper::new("T", vec![], "", "http://url.com", published(), "test")
            .with_arxiv_id("")
            .with_doi("10.1234/test");
        assert_eq!(paper.arxiv_key(), None);
        assert_eq!(paper.doi_key(), Some("10.1234/test"));
    }

    #[test]
    fn test_deserialize_applies_defaults() {
        let json = r#"{
            "title": "Attention Is All You Need",
            "abstract": "Transformers.",
            "url": "https://arxiv.org/abs/1706.03762",
            "published_date": "2017-06-12T00:00:00",
            "source": "arxiv",
            "arxiv_id": "1706.03762"
        }"#;

        let paper: Paper = serde_json::from_str(json).unwrap();
        assert_eq!(paper.paper_id, "https://arxiv.org/abs/1706.03762");
        assert_eq!(paper.abstract_text, "Transformers.");
        assert_eq!(paper.arxiv_id.as_deref(), Some("1706.03762"));
        assert!(paper.authors.is_empty());
        assert_eq!(paper.published_date, published());
        assert_eq!(paper.social_score, 0.0);
    }

    #[test]
    fn test_serialize_round_trip_keeps_scores() {
        let mut paper = Paper::new("T", vec!["A".to_string()], "abs", "http://u", published(), "test")
            .with_paper_id("p1")
            .with_citations(12)
            .with_venue("NeurIPS 2017");
        paper.combined_score = 3.5;

        let json = serde_json::to_string(&paper).unwrap();
        assert!(json.contains("\"abstract\":\"abs\""));

        let back: Paper = serde_json::from_str(&json).unwrap();
        assert_eq!(back, paper);
    }
}
