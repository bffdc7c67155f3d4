//! Pipeline runner
//!
//! One run of the ranking pipeline:
//! - fetch papers from every source
//! - deduplicate and filter them
//! - collect social signals and merge them into the papers
//! - rank and keep the top N
//!
//! A run that ends up with no papers is not an error; it returns an empty
//! report and logs why.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use pulse_core::{local_now, Paper, SocialConfig, TrackingConfig, DEFAULT_TOP_N};
use pulse_processor::PaperProcessor;

use crate::{FetchCoordinator, SharedSource, SharedTracker, SocialCoordinator};

/// Pipeline configuration
pub struct PipelineConfig {
    /// What to track and how to filter
    pub tracking: TrackingConfig,
    /// Tracker switches and scoring weights
    pub social: SocialConfig,
    /// Paper sources (pre-constructed)
    pub sources: Vec<SharedSource>,
    /// Social trackers (pre-constructed)
    pub trackers: Vec<SharedTracker>,
    /// Papers kept after ranking
    pub top_n: usize,
    /// Fixed "now" for age computations; the clock when unset
    pub reference_time: Option<NaiveDateTime>,
}

impl PipelineConfig {
    pub fn new(tracking: TrackingConfig) -> Self {
        Self {
            tracking,
            social: SocialConfig::default(),
            sources: Vec::new(),
            trackers: Vec::new(),
            top_n: DEFAULT_TOP_N,
            reference_time: None,
        }
    }
}

/// Outcome of one pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineReport {
    pub run_id: Uuid,
    pub generated_at: NaiveDateTime,
    /// Papers returned by the sources
    pub fetched: usize,
    /// Papers left after deduplication
    pub deduplicated: usize,
    /// Papers left after filtering
    pub filtered: usize,
    /// Top papers, best first
    pub papers: Vec<Paper>,
}

/// The paper ranking pipeline
pub struct Pipeline {
    processor: PaperProcessor,
    fetcher: FetchCoordinator,
    social: SocialCoordinator,
    top_n: usize,
    reference_time: Option<NaiveDateTime>,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        let mut processor = PaperProcessor::new(config.tracking);
        if let Some(now) = config.reference_time {
            processor = processor.with_reference_time(now);
        }

        let mut fetcher = FetchCoordinator::new();
        for source in config.sources {
            fetcher.register(source);
        }

        let mut social = SocialCoordinator::new(config.social);
        for tracker in config.trackers {
            social.register(tracker);
        }

        info!(
            "Pipeline ready with sources [{}] and {} social trackers",
            fetcher.source_names().join(", "),
            social.tracker_count()
        );

        Self {
            processor,
            fetcher,
            social,
            top_n: config.top_n,
            reference_time: config.reference_time,
        }
    }

    /// Run the pipeline once
    pub async fn run(&self) -> Result<PipelineReport, anyhow::Error> {
        let run_id = Uuid::new_v4();
        let span = info_span!("pipeline", %run_id);
        self.run_stages(run_id).instrument(span).await
    }

    async fn run_stages(&self, run_id: Uuid) -> Result<PipelineReport, anyhow::Error> {
        let mut report = PipelineReport {
            run_id,
            generated_at: self.reference_time.unwrap_or_else(local_now),
            fetched: 0,
            deduplicated: 0,
            filtered: 0,
            papers: Vec::new(),
        };

        info!("Step 1: Fetching papers from academic sources");
        let papers = self.fetcher.fetch_all_papers(self.processor.tracking()).await;
        report.fetched = papers.len();

        if papers.is_empty() {
            warn!("No papers fetched; check sources and tracking configuration");
            return Ok(report);
        }

        info!("Step 2: Deduplicating and filtering papers");
        let papers = self.processor.deduplicate(papers);
        report.deduplicated = papers.len();

        let mut papers = self.processor.filter_papers(papers);
        report.filtered = papers.len();

        if papers.is_empty() {
            warn!("No papers left after filtering");
            return Ok(report);
        }

        info!("Step 3: Tracking social signals");
        let social_signals = self.social.track_all_papers(&papers).await;
        self.processor.merge_social_signals(&mut papers, &social_signals);

        info!("Step 4: Ranking papers by relevance and social engagement");
        let ranked = self.processor.rank(papers, &social_signals);
        report.papers = self.processor.get_top_papers(ranked, self.top_n);

        info!(
            "Pipeline completed: {} fetched, {} unique, {} kept, {} ranked",
            report.fetched,
            report.deduplicated,
            report.filtered,
            report.papers.len()
        );
        Ok(report)
    }
}
