//! Social engagement signals attached to papers
//!
//! Trackers report per-platform metrics keyed by `paper_id`. The ranking
//! stages only read `total_score`; the platform sections are kept so that
//! the social coordinator can compute that total and so reports carry the
//! evidence behind it.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

/// Social signal records keyed by `paper_id`
pub type SocialSignals = HashMap<String, SocialSignalRecord>;

/// Everything the trackers found about one paper
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialSignalRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reddit: Option<DiscussionMetrics>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hackernews: Option<DiscussionMetrics>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<GithubMetrics>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_search: Option<WebMentionMetrics>,
    /// Weighted engagement total, set by the social coordinator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_score: Option<f64>,
    /// Platform sections this crate has no schema for
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Reddit or HackerNews threads linking to a paper
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiscussionMetrics {
    #[serde(default)]
    pub posts: Vec<DiscussionPost>,
    #[serde(default)]
    pub total_score: i64,
    #[serde(default)]
    pub total_comments: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscussionPost {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub comments: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subreddit: Option<String>,
}

/// Repositories implementing a paper
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GithubMetrics {
    #[serde(default)]
    pub implementations: Vec<Repository>,
    #[serde(default)]
    pub total_stars: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub stars: i64,
    #[serde(default)]
    pub description: Option<String>,
}

/// Web pages mentioning a paper
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebMentionMetrics {
    #[serde(default)]
    pub mentions: Vec<WebMention>,
    #[serde(default)]
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebMention {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub snippet: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

/// Per-unit weights used to fold platform metrics into `total_score`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialScoring {
    pub reddit_upvote: f64,
    pub reddit_comment: f64,
    pub hn_score: f64,
    pub github_star: f64,
    pub google_mention: f64,
}

impl Default for SocialScoring {
    fn default() -> Self {
        Self {
            reddit_upvote: 1.0,
            reddit_comment: 0.5,
            hn_score: 1.0,
            github_star: 0.8,
            google_mention: 2.0,
        }
    }
}

impl SocialSignalRecord {
    /// Score used by the ranking stages; absent totals count as zero
    pub fn score(&self) -> f64 {
        self.total_score.unwrap_or(0.0)
    }

    /// Weighted sum of the known platform metrics
    pub fn weighted_total(&self, scoring: &SocialScoring) -> f64 {
        let mut score = 0.0;

        if let Some(reddit) = &self.reddit {
            score += reddit.total_score as f64 * scoring.reddit_upvote;
            score += reddit.total_comments as f64 * scoring.reddit_comment;
        }
        if let Some(hn) = &self.hackernews {
            score += hn.total_score as f64 * scoring.hn_score;
        }
        if let Some(github) = &self.github {
            score += github.total_stars as f64 * scoring.github_star;
        }
        if let Some(search) = &self.google_search {
            score += search.count as f64 * scoring.google_mention;
        }

        score
    }

    /// Overlay the sections present in `other`; sections it lacks are kept
    pub fn absorb(&mut self, other: SocialSignalRecord) {
        if other.reddit.is_some() {
            self.reddit = other.reddit;
        }
        if other.hackernews.is_some() {
            self.hackernews = other.hackernews;
        }
        if other.github.is_some() {
            self.github = other.github;
        }
        if other.google_search.is_some() {
            self.google_search = other.google_search;
        }
        if other.total_score.is_some() {
            self.total_score = other.total_score;
        }
        self.extra.extend(other.extra);
    }

    /// Names of the platforms that reported anything
    pub fn platforms(&self) -> Vec<&str> {
        let mut names = Vec::new();
        if self.reddit.is_some() {
            names.push("reddit");
        }
        if self.hackernews.is_some() {
            names.push("hackernews");
        }
        if self.github.is_some() {
            names.push("github");
        }
        if self.google_search.is_some() {
            names.push("google_search");
        }
        names.extend(self.extra.keys().map(|k| k.as_str()));
        names
    }
}
