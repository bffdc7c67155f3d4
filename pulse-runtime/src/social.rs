//! Social trackers and social coordination
//!
//! Each engagement platform sits behind [`SocialTracker`]. The coordinator
//! runs the enabled trackers concurrently, overlays their per-paper records
//! in registration order and then sets every record's `total_score` from
//! the configured weights. A failing tracker is logged and skipped.

use async_trait::async_trait;
use futures::future::join_all;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

use pulse_core::{Paper, SocialConfig, SocialSignals};

/// Errors from social trackers
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Request failed: {0}")]
    Request(String),
}

/// An engagement platform reporting per-paper signals
#[async_trait]
pub trait SocialTracker: Send + Sync {
    /// Platform name, matching the `[platforms.<name>]` config table
    fn name(&self) -> &str;

    /// Signals for the given papers, keyed by `paper_id`
    async fn track_papers(&self, papers: &[Paper]) -> Result<SocialSignals, TrackerError>;
}

pub type SharedTracker = Arc<dyn SocialTracker>;

/// Runs the trackers and scores their combined findings
#[derive(Clone)]
pub struct SocialCoordinator {
    config: SocialConfig,
    trackers: Vec<SharedTracker>,
}

impl SocialCoordinator {
    pub fn new(config: SocialConfig) -> Self {
        Self {
            config,
            trackers: Vec::new(),
        }
    }

    pub fn with_tracker(mut self, tracker: SharedTracker) -> Self {
        self.register(tracker);
        self
    }

    /// Add a tracker unless its platform is switched off
    pub fn register(&mut self, tracker: SharedTracker) {
        if self.config.is_enabled(tracker.name()) {
            self.trackers.push(tracker);
        } else {
            info!("Social tracker {} disabled by configuration", tracker.name());
        }
    }

    pub fn tracker_count(&self) -> usize {
        self.trackers.len()
    }

    /// Collect and score social signals for `papers`
    pub async fn track_all_papers(&self, papers: &[Paper]) -> SocialSignals {
        let results = join_all(self.trackers.iter().map(|t| t.track_papers(papers))).await;

        let mut all_signals = SocialSignals::new();
        for (tracker, result) in self.trackers.iter().zip(results) {
            match result {
                Ok(signals) => {
                    info!("Tracker {} reported on {} papers", tracker.name(), signals.len());
                    for (paper_id, record) in signals {
                        all_signals.entry(paper_id).or_default().absorb(record);
                    }
                }
                Err(e) => error!("Error tracking with {}: {}", tracker.name(), e),
            }
        }

        for record in all_signals.values_mut() {
            record.total_score = Some(record.weighted_total(&self.config.scoring));
        }

        info!("Tracked social signals for {} papers", all_signals.len());
        all_signals
    }
}

/// Offline tracker backed by a JSON `paper_id -> record` file
pub struct JsonSignalTracker {
    name: String,
    signals: SocialSignals,
}

impl JsonSignalTracker {
    pub fn new(name: &str, signals: SocialSignals) -> Self {
        Self {
            name: name.to_string(),
            signals,
        }
    }

    pub fn from_file<P: AsRef<Path>>(name: &str, path: P) -> Result<Self, TrackerError> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::new(name, serde_json::from_str(&content)?))
    }
}

#[async_trait]
impl SocialTracker for JsonSignalTracker {
    fn name(&self) -> &str {
        &self.name
    }

    async fn track_papers(&self, papers: &[Paper]) -> Result<SocialSignals, TrackerError> {
        let found: SocialSignals = papers
            .iter()
            .filter_map(|p| {
                self.signals
                    .get(&p.paper_id)
                    .map(|record| (p.paper_id.clone(), record.clone()))
            })
            .collect();

        if found.len() < self.signals.len() {
            warn!(
                "{}: {} recorded papers are not part of this run",
                self.name,
                self.signals.len() - found.len()
            );
        }
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;
    use pulse_core::{
        DiscussionMetrics, GithubMetrics, PlatformConfig, SocialSignalRecord, WebMentionMetrics,
    };
    use serde_json::json;
    use std::io::Write;

    fn paper(paper_id: &str) -> Paper {
        Paper::new(
            "Title",
            vec![],
            "",
            format!("http://{}", paper_id),
            Local::now().naive_local(),
            "arxiv",
        )
        .with_paper_id(paper_id)
    }

    fn single_record(record: SocialSignalRecord, paper_id: &str) -> SocialSignals {
        SocialSignals::from([(paper_id.to_string(), record)])
    }

    struct FailingTracker;

    #[async_trait]
    impl SocialTracker for FailingTracker {
        fn name(&self) -> &str {
            "hackernews"
        }

        async fn track_papers(&self, _papers: &[Paper]) -> Result<SocialSignals, TrackerError> {
            Err(TrackerError::Request("503 Service Unavailable".to_string()))
        }
    }

    fn reddit_tracker() -> JsonSignalTracker {
        JsonSignalTracker::new(
            "reddit",
            single_record(
                SocialSignalRecord {
                    reddit: Some(DiscussionMetrics {
                        posts: vec![],
                        total_score: 10,
                        total_comments: 4,
                    }),
                    ..Default::default()
                },
                "p1",
            ),
        )
    }

    fn github_tracker() -> JsonSignalTracker {
        let mut signals = single_record(
            SocialSignalRecord {
                github: Some(GithubMetrics {
                    implementations: vec![],
                    total_stars: 50,
                }),
                ..Default::default()
            },
            "p1",
        );
        signals.insert(
            "p2".to_string(),
            SocialSignalRecord {
                google_search: Some(WebMentionMetrics {
                    mentions: vec![],
                    count: 3,
                }),
                ..Default::default()
            },
        );
        JsonSignalTracker::new("github", signals)
    }

    #[tokio::test]
    async fn test_records_merge_and_score() {
        let coordinator = SocialCoordinator::new(SocialConfig::default())
            .with_tracker(Arc::new(reddit_tracker()))
            .with_tracker(Arc::new(github_tracker()));

        let signals = coordinator.track_all_papers(&[paper("p1"), paper("p2")]).await;

        let p1 = &signals["p1"];
        assert_eq!(p1.platforms(), vec!["reddit", "github"]);
        // 10*1.0 + 4*0.5 + 50*0.8
        assert_eq!(p1.total_score, Some(52.0));
        // 3 mentions * 2.0
        assert_eq!(signals["p2"].total_score, Some(6.0));
    }

    #[tokio::test]
    async fn test_failing_tracker_is_skipped() {
        let coordinator = SocialCoordinator::new(SocialConfig::default())
            .with_tracker(Arc::new(FailingTracker))
            .with_tracker(Arc::new(reddit_tracker()));

        let signals = coordinator.track_all_papers(&[paper("p1")]).await;
        assert_eq!(signals.len(), 1);
        assert_eq!(signals["p1"].total_score, Some(12.0));
    }

    #[tokio::test]
    async fn test_disabled_tracker_is_not_registered() {
        let mut config = SocialConfig::default();
        config
            .platforms
            .insert("reddit".to_string(), PlatformConfig { enabled: false });

        let coordinator = SocialCoordinator::new(config)
            .with_tracker(Arc::new(reddit_tracker()))
            .with_tracker(Arc::new(github_tracker()));

        assert_eq!(coordinator.tracker_count(), 1);
        let signals = coordinator.track_all_papers(&[paper("p1")]).await;
        assert_eq!(signals["p1"].total_score, Some(40.0));
    }

    #[tokio::test]
    async fn test_only_papers_in_run_are_reported() {
        let coordinator =
            SocialCoordinator::new(SocialConfig::default()).with_tracker(Arc::new(github_tracker()));

        let signals = coordinator.track_all_papers(&[paper("p2"), paper("p3")]).await;
        assert_eq!(signals.len(), 1);
        assert!(signals.contains_key("p2"));
    }

    #[tokio::test]
    async fn test_no_trackers_no_signals() {
        let coordinator = SocialCoordinator::new(SocialConfig::default());
        assert!(coordinator.track_all_papers(&[paper("p1")]).await.is_empty());
    }

    #[tokio::test]
    async fn test_tracker_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let body = json!({
            "p1": {
                "hackernews": { "posts": [], "total_score": 120, "total_comments": 30 },
                "reddit_mentions": 5
            }
        });
        write!(file, "{}", body).unwrap();

        let tracker = JsonSignalTracker::from_file("signals", file.path()).unwrap();
        let signals = tracker.track_papers(&[paper("p1")]).await.unwrap();

        let record = &signals["p1"];
        assert_eq!(record.hackernews.as_ref().map(|h| h.total_score), Some(120));
        assert_eq!(record.extra.get("reddit_mentions"), Some(&json!(5)));
        assert_eq!(record.weighted_total(&Default::default()), 120.0);
    }
}
