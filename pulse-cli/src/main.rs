//! ResearchPulse CLI
//!
//! Ranks tracked research papers by relevance and social engagement.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use pulse_core::{preview, SocialConfig, TrackingConfig, DEFAULT_TOP_N};
use pulse_runtime::{
    JsonPaperSource, JsonSignalTracker, Pipeline, PipelineConfig, PipelineReport, SharedSource,
    SharedTracker,
};

#[derive(Parser)]
#[command(name = "research-pulse")]
#[command(author, version, about = "ResearchPulse: rank new papers by relevance and buzz", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity level (0-3)
    #[arg(short, long, default_value = "1")]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the ranking pipeline once
    Run {
        /// Tracking configuration (TOML)
        #[arg(short, long, env = "PULSE_TRACKING_CONFIG")]
        tracking: PathBuf,

        /// Social tracker configuration (TOML)
        #[arg(short, long, env = "PULSE_SOCIAL_CONFIG")]
        social: Option<PathBuf>,

        /// Papers to rank (JSON array)
        #[arg(short, long)]
        papers: PathBuf,

        /// Source name the papers are served under
        #[arg(long, default_value = "arxiv")]
        source: String,

        /// Social signals keyed by paper_id (JSON object)
        #[arg(long)]
        signals: Option<PathBuf>,

        /// Number of papers to keep
        #[arg(long, default_value_t = DEFAULT_TOP_N)]
        top: usize,

        /// Output file for the report (default: ranked_<timestamp>.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Parse and validate configuration files
    CheckConfig {
        /// Tracking configuration (TOML)
        #[arg(short, long, env = "PULSE_TRACKING_CONFIG")]
        tracking: PathBuf,

        /// Social tracker configuration (TOML)
        #[arg(short, long, env = "PULSE_SOCIAL_CONFIG")]
        social: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let log_level = match cli.verbose {
        0 => Level::ERROR,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .init();

    match cli.command {
        Commands::Run {
            tracking,
            social,
            papers,
            source,
            signals,
            top,
            output,
        } => {
            run_pipeline(
                &tracking,
                social.as_deref(),
                &papers,
                &source,
                signals.as_deref(),
                top,
                output,
            )
            .await?;
        }
        Commands::CheckConfig { tracking, social } => {
            check_config(&tracking, social.as_deref())?;
        }
    }

    Ok(())
}

fn load_configs(tracking: &Path, social: Option<&Path>) -> Result<(TrackingConfig, SocialConfig)> {
    let tracking = TrackingConfig::load(tracking)
        .with_context(|| format!("loading tracking config {}", tracking.display()))?;
    let social = match social {
        Some(path) => SocialConfig::load(path)
            .with_context(|| format!("loading social config {}", path.display()))?,
        None => SocialConfig::default(),
    };
    Ok((tracking, social))
}

async fn run_pipeline(
    tracking_path: &Path,
    social_path: Option<&Path>,
    papers_path: &Path,
    source_name: &str,
    signals_path: Option<&Path>,
    top_n: usize,
    output: Option<PathBuf>,
) -> Result<()> {
    println!("📚 ResearchPulse - paper ranking\n");

    let (tracking, social) = load_configs(tracking_path, social_path)?;

    let source = JsonPaperSource::from_file(source_name, papers_path, tracking.filters.max_age_days)
        .with_context(|| format!("reading papers from {}", papers_path.display()))?;
    println!("📥 Source: {} ({} papers)", source_name, source.len());
    let sources: Vec<SharedSource> = vec![Arc::new(source)];

    let mut trackers: Vec<SharedTracker> = Vec::new();
    if let Some(path) = signals_path {
        let tracker = JsonSignalTracker::from_file("signals", path)
            .with_context(|| format!("reading social signals from {}", path.display()))?;
        trackers.push(Arc::new(tracker));
    }
    println!("📡 Social trackers: {}", trackers.len());
    println!(
        "🔍 Tracking {} keyword groups and {} authors\n",
        tracking.keywords.len(),
        tracking.authors.len()
    );

    let config = PipelineConfig {
        social,
        sources,
        trackers,
        top_n,
        ..PipelineConfig::new(tracking)
    };

    let report = Pipeline::new(config).run().await?;

    let output_path = output.unwrap_or_else(|| {
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        PathBuf::from(format!("ranked_{}.json", timestamp))
    });
    fs::write(&output_path, serde_json::to_string_pretty(&report)?)?;

    print_report(&report);
    println!("\n📄 Report saved to: {}", output_path.display());

    Ok(())
}

fn print_report(report: &PipelineReport) {
    println!(
        "✅ {} fetched, {} unique, {} kept after filtering",
        report.fetched, report.deduplicated, report.filtered
    );

    if report.papers.is_empty() {
        println!("\n⚠️  No papers ranked. Check the tracking terms and filters.");
        return;
    }

    println!("\n{}", "=".repeat(60));
    for (idx, paper) in report.papers.iter().take(10).enumerate() {
        println!("{:>2}. [{:.2}] {}", idx + 1, paper.combined_score, preview(&paper.title, 80));
        println!(
            "    relevance {:.1} | social {:.1} | citations {} | {}",
            paper.relevance_score, paper.social_score, paper.citations, paper.url
        );
        if let Some(signals) = &paper.social_signals {
            let platforms = signals.platforms();
            if !platforms.is_empty() {
                println!("    buzz from {}", platforms.join(", "));
            }
        }
    }
    if report.papers.len() > 10 {
        println!("...\n[{} more in the report file]", report.papers.len() - 10);
    }
}

fn check_config(tracking_path: &Path, social_path: Option<&Path>) -> Result<()> {
    let (tracking, social) = load_configs(tracking_path, social_path)?;

    println!("✅ Tracking config OK: {}", tracking_path.display());
    for group in &tracking.keywords {
        println!(
            "   {} -> {} terms on [{}]",
            group.area.as_deref().unwrap_or("(unnamed)"),
            group.terms.len(),
            group.sources.join(", ")
        );
    }
    println!("   Authors: {}", tracking.authors.len());
    println!("   Key papers: {}", tracking.key_papers.len());
    println!(
        "   Filters: min {} citations, max age {} days, {} excluded keywords",
        tracking.filters.min_citations,
        tracking.filters.max_age_days,
        tracking.filters.exclude_keywords.len()
    );

    let disabled: Vec<&str> = social
        .platforms
        .iter()
        .filter(|(_, p)| !p.enabled)
        .map(|(name, _)| name.as_str())
        .collect();
    println!(
        "✅ Social config OK ({})",
        social_path.map_or_else(|| "defaults".to_string(), |p| p.display().to_string())
    );
    if !disabled.is_empty() {
        println!("   Disabled trackers: {}", disabled.join(", "));
    }

    Ok(())
}
