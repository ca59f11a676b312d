//! The analyzer stage

use super::text::analyze_text;
use super::words::build_words;
use crate::model::{AnalyzedArticle, Article, Record, ToRecord, WordRow};
use crate::nlp::SentimentAnalyzer;
use crate::pipeline::{PipelineContext, PipelineError, PipelineStage};
use crate::progress::{ProgressSink, ProgressTask};
use crate::schema::{self, SchemaViolation};
use crate::storage::StorageError;
use async_trait::async_trait;
use tracing::info;

/// Analyzed rows plus the word rows feeding the frequency charts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisOutput {
    pub rows: Vec<AnalyzedArticle>,
    pub words: Vec<WordRow>,
}

/// Derives text features from article rows.
pub struct Analyzer {
    sentiment: SentimentAnalyzer,
    table: String,
}

impl Analyzer {
    /// Analyzer whose rows are persisted to `<table>_analyzer`.
    pub fn new(table: &str) -> Self {
        Self {
            sentiment: SentimentAnalyzer::new(),
            table: format!("{}_analyzer", table),
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Analyze the headline and description of every row, in order.
    pub fn analyze(&self, progress: &dyn ProgressSink, rows: &[Article]) -> AnalysisOutput {
        let words = build_words(rows);

        let task = ProgressTask::start(progress, "analyze", rows.len() as u64);
        let analyzed = rows
            .iter()
            .map(|article| {
                let row = AnalyzedArticle {
                    headline: analyze_text(&article.headline, &self.sentiment),
                    description: analyze_text(&article.description, &self.sentiment),
                    article: article.clone(),
                };
                task.advance();
                row
            })
            .collect::<Vec<_>>();
        task.finish();

        info!(rows = analyzed.len(), words = words.len(), "analyzed articles");
        AnalysisOutput {
            rows: analyzed,
            words,
        }
    }

    /// Check analyzed rows against the analyzed schema.
    pub fn validate(&self, output: &AnalysisOutput) -> Result<Vec<Record>, SchemaViolation> {
        schema::validate_rows(&schema::analyzed(), &output.rows)
    }

    /// Append analyzed rows to this analyzer's table.
    pub fn save(&self, ctx: &PipelineContext, output: &AnalysisOutput) -> Result<usize, StorageError> {
        let records: Vec<Record> = output.rows.iter().map(ToRecord::to_record).collect();
        ctx.save(&self.table, &records)
    }
}

#[async_trait]
impl PipelineStage for Analyzer {
    type Input = Vec<Article>;
    type Output = AnalysisOutput;

    fn name(&self) -> &str {
        &self.table
    }

    async fn run(
        &self,
        ctx: &PipelineContext,
        input: Vec<Article>,
    ) -> Result<AnalysisOutput, PipelineError> {
        Ok(self.analyze(ctx.progress(), &input))
    }
}
