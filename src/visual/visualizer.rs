//! The visualizer stage

use super::{charts, cloud, VisualKind, VisualizeError};
use crate::analysis::{word_frequencies, AnalysisOutput};
use crate::model::AnalyzedArticle;
use crate::pipeline::{PipelineContext, PipelineError, PipelineStage};
use crate::progress::{ProgressSink, ProgressTask};
use crate::schema::{self, SchemaViolation};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File names of the chart battery, in rendering order.
pub const ARTIFACTS: [&str; 6] = [
    "word_cloud.png",
    "word_count_pie.svg",
    "scatter_sentiment.svg",
    "scatter.svg",
    "sentiment_scatter.svg",
    "boxplot.svg",
];

/// Directory name for a run started at `at`.
pub fn run_directory_name(at: DateTime<Utc>) -> String {
    at.format("%Y%m%d%H%M%S").to_string()
}

/// Renders the chart battery under an output directory.
pub struct Visualizer {
    output_dir: PathBuf,
    kinds: Vec<VisualKind>,
}

impl Visualizer {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            kinds: VisualKind::ALL.to_vec(),
        }
    }

    /// Record which chart families were asked for.
    pub fn with_kinds(mut self, kinds: Vec<VisualKind>) -> Self {
        self.kinds = kinds;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn kinds(&self) -> &[VisualKind] {
        &self.kinds
    }

    /// Analyzed rows must satisfy the analyzed schema before any chart is drawn.
    pub fn validate(&self, rows: &[AnalyzedArticle]) -> Result<(), SchemaViolation> {
        schema::validate_rows(&schema::analyzed(), rows).map(|_| ())
    }

    /// Render every chart into `<output_dir>/<YYYYmmddHHMMSS>/`.
    pub fn render(
        &self,
        progress: &dyn ProgressSink,
        output: &AnalysisOutput,
    ) -> Result<Vec<PathBuf>, VisualizeError> {
        self.render_at(progress, output, Utc::now())
    }

    fn render_at(
        &self,
        progress: &dyn ProgressSink,
        output: &AnalysisOutput,
        at: DateTime<Utc>,
    ) -> Result<Vec<PathBuf>, VisualizeError> {
        let requested: Vec<&str> = self.kinds.iter().map(VisualKind::as_str).collect();
        info!(requested = %requested.join(","), "rendering full chart battery");

        let dir = self.output_dir.join(run_directory_name(at));
        fs::create_dir_all(&dir)?;

        let frequencies = word_frequencies(&output.words);
        let rows = &output.rows;

        let task = ProgressTask::start(progress, "visualize", ARTIFACTS.len() as u64);
        let mut written = Vec::with_capacity(ARTIFACTS.len());
        for name in ARTIFACTS {
            let path = dir.join(name);
            match name {
                "word_cloud.png" => cloud::render(&path, &frequencies)?,
                "word_count_pie.svg" => charts::word_count_pie(&path, &frequencies)?,
                "scatter_sentiment.svg" => charts::scatter_sentiment(&path, rows)?,
                "scatter.svg" => charts::scatter(&path, rows)?,
                "sentiment_scatter.svg" => charts::sentiment_scatter(&path, rows)?,
                _ => charts::boxplot(&path, rows)?,
            }
            debug!(path = %path.display(), "wrote chart");
            written.push(path);
            task.advance();
        }
        task.finish();

        info!(dir = %dir.display(), charts = written.len(), "charts written");
        Ok(written)
    }
}

#[async_trait]
impl PipelineStage for Visualizer {
    type Input = AnalysisOutput;
    type Output = Vec<PathBuf>;

    fn name(&self) -> &str {
        "visualizer"
    }

    async fn run(
        &self,
        ctx: &PipelineContext,
        input: AnalysisOutput,
    ) -> Result<Vec<PathBuf>, PipelineError> {
        self.validate(&input.rows)?;
        Ok(self.render(ctx.progress(), &input)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Analyzer;
    use crate::model::{Article, Publisher};
    use crate::progress::NoopProgress;
    use chrono::TimeZone;

    fn output() -> AnalysisOutput {
        let rows = vec![
            Article {
                headline: "Voters celebrate a historic win".into(),
                description: "Crowds cheered late into the night.".into(),
                url: "https://example.com/win".into(),
                published_date: "2024-11-05T12:00:00Z".into(),
                publisher: Publisher::new("Example", "https://example.com"),
            },
            Article {
                headline: "Storm damage leaves towns in ruins".into(),
                description: "Residents fear the worst.".into(),
                url: "https://example.com/storm".into(),
                published_date: "2024-11-06T12:00:00Z".into(),
                publisher: Publisher::new("Example", "https://example.com"),
            },
        ];
        Analyzer::new("test").analyze(&NoopProgress, &rows)
    }

    #[test]
    fn directory_is_named_by_timestamp() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        assert_eq!(run_directory_name(at), "20240309070501");
    }

    #[test]
    fn every_kind_is_requested_by_default() {
        let visualizer = Visualizer::new("out");
        assert_eq!(visualizer.kinds(), &VisualKind::ALL);
        let visualizer = visualizer.with_kinds(vec![VisualKind::Grammar]);
        assert_eq!(visualizer.kinds(), &[VisualKind::Grammar]);
    }

    #[test]
    fn analyzed_rows_pass_validation() {
        assert!(Visualizer::new("out").validate(&output().rows).is_ok());
    }

    // Text rendering needs a system sans-serif font.
    #[test]
    #[ignore]
    fn renders_full_battery_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let visualizer = Visualizer::new(dir.path()).with_kinds(vec![VisualKind::Sentiment]);
        let at = Utc.with_ymd_and_hms(2024, 11, 5, 20, 0, 0).unwrap();

        let written = visualizer.render_at(&NoopProgress, &output(), at).unwrap();

        let run_dir = dir.path().join("20241105200000");
        let expected: Vec<PathBuf> = ARTIFACTS.iter().map(|name| run_dir.join(name)).collect();
        assert_eq!(written, expected);
        for path in &written {
            assert!(fs::metadata(path).unwrap().len() > 0);
        }
    }
}
