//! The generator stage

use super::prompts::{description_prompt, headline_prompt};
use crate::llm::ChatClient;
use crate::model::{Article, Publisher, Record, ToRecord};
use crate::pipeline::{PipelineContext, PipelineError, PipelineStage};
use crate::progress::ProgressTask;
use crate::schema::{self, SchemaViolation};
use crate::storage::StorageError;
use async_trait::async_trait;
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use std::sync::Arc;
use tracing::{debug, info};

/// Publisher title stamped on every generated article
pub const PUBLISHER_LABEL: &str = "Made by Ollama";

/// Produces `n` synthetic articles seeded by a phrase.
pub struct Generator {
    client: Arc<dyn ChatClient>,
    seed: String,
    count: usize,
    table: String,
}

/// Model replies often arrive wrapped in quotes.
fn clean_reply(reply: &str) -> String {
    reply.trim().trim_matches('"').trim().to_string()
}

impl Generator {
    /// Generator writing to `<table>_generator`.
    pub fn new(client: Arc<dyn ChatClient>, seed: impl Into<String>, table: &str) -> Self {
        Self {
            client,
            seed: seed.into(),
            count: 1,
            table: format!("{}_generator", table),
        }
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Generate articles one at a time: a headline from the seed, then a
    /// description from the headline.
    ///
    /// Publication timestamps are strictly increasing within one call.
    pub async fn generate(&self, ctx: &PipelineContext) -> Result<Vec<Article>, PipelineError> {
        let task = ProgressTask::start(
            ctx.progress(),
            format!("generate {}", self.table),
            self.count as u64,
        );
        let host = self.client.host().to_string();
        let mut rows = Vec::with_capacity(self.count);
        let mut last_stamp: Option<DateTime<Utc>> = None;

        for _ in 0..self.count {
            let headline = clean_reply(&self.client.chat(&headline_prompt(&self.seed)).await?);
            debug!(%headline, "generated headline");
            let description = clean_reply(&self.client.chat(&description_prompt(&headline)).await?);

            let mut stamp = Utc::now();
            if let Some(previous) = last_stamp {
                if stamp <= previous {
                    stamp = previous + Duration::microseconds(1);
                }
            }
            last_stamp = Some(stamp);

            rows.push(Article {
                headline,
                description,
                url: host.clone(),
                published_date: stamp.to_rfc3339_opts(SecondsFormat::Micros, true),
                publisher: Publisher::new(PUBLISHER_LABEL, host.clone()),
            });
            task.advance();
        }
        task.finish();

        info!(table = %self.table, rows = rows.len(), seed = %self.seed, "generated articles");
        Ok(rows)
    }

    /// Check rows against the article schema.
    pub fn validate(&self, rows: &[Article]) -> Result<Vec<Record>, SchemaViolation> {
        schema::validate_rows(&schema::article(), rows)
    }

    /// Append rows to this generator's table.
    pub fn save(&self, ctx: &PipelineContext, rows: &[Article]) -> Result<usize, StorageError> {
        let records: Vec<Record> = rows.iter().map(ToRecord::to_record).collect();
        ctx.save(&self.table, &records)
    }
}

#[async_trait]
impl PipelineStage for Generator {
    type Input = ();
    type Output = Vec<Article>;

    fn name(&self) -> &str {
        &self.table
    }

    async fn run(&self, ctx: &PipelineContext, _input: ()) -> Result<Vec<Article>, PipelineError> {
        self.generate(ctx).await
    }
}
