//! Chart rendering for analyzed articles
//!
//! The `Visualizer` writes a fixed battery of charts into a fresh
//! timestamped directory:
//! - `word_cloud.png`: word frequencies, colored by grammatical category
//! - `word_count_pie.svg`: the most frequent words
//! - `scatter_sentiment.svg`, `scatter.svg`, `sentiment_scatter.svg`,
//!   `boxplot.svg`: headline sentiment views

mod charts;
mod cloud;
mod palette;
mod visualizer;

pub use charts::{pie_slices, Slice};
pub use cloud::{layout as cloud_layout, PlacedWord};
pub use palette::viridis;
pub use visualizer::{run_directory_name, Visualizer, ARTIFACTS};

use plotters::drawing::DrawingAreaErrorKind;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, thiserror::Error)]
pub enum VisualizeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("rendering failed: {0}")]
    Render(String),

    #[error("unknown visual kind: {0} (expected sentiment, wordcount or grammar)")]
    UnknownKind(String),
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for VisualizeError {
    fn from(e: DrawingAreaErrorKind<E>) -> Self {
        VisualizeError::Render(e.to_string())
    }
}

/// A chart family that can be requested on the command line.
///
/// Requests are recorded but the whole battery is always rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualKind {
    Sentiment,
    Wordcount,
    Grammar,
}

impl VisualKind {
    pub const ALL: [VisualKind; 3] = [VisualKind::Sentiment, VisualKind::Wordcount, VisualKind::Grammar];

    pub fn as_str(&self) -> &'static str {
        match self {
            VisualKind::Sentiment => "sentiment",
            VisualKind::Wordcount => "wordcount",
            VisualKind::Grammar => "grammar",
        }
    }
}

impl fmt::Display for VisualKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VisualKind {
    type Err = VisualizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        VisualKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == lowered)
            .ok_or_else(|| VisualizeError::UnknownKind(s.to_string()))
    }
}
