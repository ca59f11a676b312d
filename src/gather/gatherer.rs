//! The gatherer stage

use super::client::NewsSearchClient;
use super::query::{QueryDescriptor, SearchRequest};
use crate::model::{Article, Record, ToRecord};
use crate::pipeline::{PipelineContext, PipelineError, PipelineStage};
use crate::progress::ProgressTask;
use crate::schema::{self, SchemaViolation};
use crate::storage::StorageError;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

/// Fetches article rows for one query descriptor.
pub struct Gatherer {
    client: Arc<dyn NewsSearchClient>,
    query: QueryDescriptor,
    table: String,
    max_results: usize,
}

impl Gatherer {
    /// Gatherer writing to `<table>_gatherer`.
    pub fn new(client: Arc<dyn NewsSearchClient>, query: QueryDescriptor, table: &str) -> Self {
        Self {
            client,
            query,
            table: format!("{}_gatherer", table),
            max_results: 1,
        }
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn query(&self) -> &QueryDescriptor {
        &self.query
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Fetch articles, one request per populated filter.
    ///
    /// Each request replaces the rows of the one before, so only the last
    /// populated filter's results are returned. An empty descriptor fetches
    /// top stories.
    pub async fn gather(&self, ctx: &PipelineContext) -> Result<Vec<Article>, PipelineError> {
        let mut requests = self.query.requests();
        if requests.is_empty() {
            requests.push(SearchRequest::Top);
        }
        if requests.len() > 1 {
            warn!(
                query = %self.query,
                "several filters set; each fetch replaces the previous one and only the last is kept"
            );
        }

        let task = ProgressTask::start(
            ctx.progress(),
            format!("gather {}", self.query),
            requests.len() as u64,
        );
        let mut rows = Vec::new();
        for request in &requests {
            rows = self
                .client
                .fetch(request, self.max_results)
                .await?
                .into_iter()
                .map(|article| article.into_article())
                .collect();
            task.advance();
        }
        task.finish();

        info!(table = %self.table, rows = rows.len(), "gathered articles");
        Ok(rows)
    }

    /// Check rows against the article schema.
    pub fn validate(&self, rows: &[Article]) -> Result<Vec<Record>, SchemaViolation> {
        schema::validate_rows(&schema::article(), rows)
    }

    /// Append rows to this gatherer's table.
    pub fn save(&self, ctx: &PipelineContext, rows: &[Article]) -> Result<usize, StorageError> {
        let records: Vec<Record> = rows.iter().map(ToRecord::to_record).collect();
        ctx.save(&self.table, &records)
    }
}

#[async_trait]
impl PipelineStage for Gatherer {
    type Input = ();
    type Output = Vec<Article>;

    fn name(&self) -> &str {
        &self.table
    }

    async fn run(&self, ctx: &PipelineContext, _input: ()) -> Result<Vec<Article>, PipelineError> {
        self.gather(ctx).await
    }
}
