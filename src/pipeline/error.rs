use crate::config::ConfigError;
use crate::gather::SearchError;
use crate::llm::LlmError;
use crate::schema::SchemaViolation;
use crate::storage::StorageError;
use crate::visual::VisualizeError;
use thiserror::Error;

/// Any failure that aborts a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("schema violation: {0}")]
    Schema(#[from] SchemaViolation),

    #[error("news search failed: {0}")]
    Search(#[from] SearchError),

    #[error("text generation failed: {0}")]
    Llm(#[from] LlmError),

    #[error("visualization failed: {0}")]
    Visualize(#[from] VisualizeError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}
