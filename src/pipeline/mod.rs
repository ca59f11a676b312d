//! Pipeline plumbing shared by every stage
//!
//! Stages receive a `PipelineContext` owning the store and progress handles
//! instead of reaching for shared globals, and implement `PipelineStage`.

mod context;
mod error;

pub use context::PipelineContext;
pub use error::PipelineError;

use async_trait::async_trait;

/// A step of the news pipeline
///
/// Gatherers and generators take no input and produce article rows; the
/// analyzer turns article rows into analyzed rows; the visualizer turns
/// analyzed rows into chart files.
#[async_trait]
pub trait PipelineStage: Send + Sync {
    type Input: Send;
    type Output: Send;

    /// Label used for logging and progress reporting
    fn name(&self) -> &str;

    async fn run(
        &self,
        ctx: &PipelineContext,
        input: Self::Input,
    ) -> Result<Self::Output, PipelineError>;
}
