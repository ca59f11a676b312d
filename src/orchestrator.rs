//! Orchestrator: runs the stages in strict sequence
//!
//! gather (every gatherer) → validate and save gathered rows → generate,
//! validate and save (every generator) → analyze the union → validate and
//! save analyzed rows → render charts. Each stage finishes before the next
//! starts; the first error aborts the run.

use crate::analysis::Analyzer;
use crate::gather::Gatherer;
use crate::generate::Generator;
use crate::model::Article;
use crate::pipeline::{PipelineContext, PipelineError, PipelineStage};
use crate::visual::Visualizer;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Which optional stages to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    pub analyze: bool,
    pub visualize: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            analyze: true,
            visualize: true,
        }
    }
}

/// What a run produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    /// Rows returned by all gatherers
    pub gathered: usize,
    /// Rows returned by all generators
    pub generated: usize,
    /// Rows analyzed (0 when analysis was skipped)
    pub analyzed: usize,
    /// Chart files written, in rendering order
    pub artifacts: Vec<PathBuf>,
    /// Names of the stages that ran, in order
    pub stages: Vec<String>,
}

impl RunReport {
    async fn run_stage<S: PipelineStage>(
        &mut self,
        stage: &S,
        ctx: &PipelineContext,
        input: S::Input,
    ) -> Result<S::Output, PipelineError> {
        debug!(stage = stage.name(), "stage starting");
        let output = stage.run(ctx, input).await?;
        self.stages.push(stage.name().to_string());
        Ok(output)
    }
}

/// Owns the registered stages of one run.
pub struct Orchestrator {
    gatherers: Vec<Gatherer>,
    generators: Vec<Generator>,
    analyzer: Analyzer,
    visualizer: Option<Visualizer>,
}

impl Orchestrator {
    /// Orchestrator whose analyzed rows go to `<table>_analyzer`.
    pub fn new(table: &str) -> Self {
        Self {
            gatherers: Vec::new(),
            generators: Vec::new(),
            analyzer: Analyzer::new(table),
            visualizer: None,
        }
    }

    pub fn add_gatherer(&mut self, gatherer: Gatherer) {
        self.gatherers.push(gatherer);
    }

    pub fn add_gatherers(&mut self, gatherers: impl IntoIterator<Item = Gatherer>) {
        self.gatherers.extend(gatherers);
    }

    pub fn add_generator(&mut self, generator: Generator) {
        self.generators.push(generator);
    }

    pub fn add_generators(&mut self, generators: impl IntoIterator<Item = Generator>) {
        self.generators.extend(generators);
    }

    pub fn set_visualizer(&mut self, visualizer: Visualizer) {
        self.visualizer = Some(visualizer);
    }

    pub fn analyzer(&self) -> &Analyzer {
        &self.analyzer
    }

    pub async fn run(&self, ctx: &PipelineContext, options: RunOptions) -> Result<RunReport, PipelineError> {
        let mut report = RunReport::default();

        // Every gatherer fetches before any of them saves
        let mut gathered: Vec<Vec<Article>> = Vec::with_capacity(self.gatherers.len());
        for gatherer in &self.gatherers {
            gathered.push(report.run_stage(gatherer, ctx, ()).await?);
        }
        for (gatherer, rows) in self.gatherers.iter().zip(&gathered) {
            gatherer.validate(rows)?;
            gatherer.save(ctx, rows)?;
            report.gathered += rows.len();
        }

        let mut generated: Vec<Vec<Article>> = Vec::with_capacity(self.generators.len());
        for generator in &self.generators {
            let rows = report.run_stage(generator, ctx, ()).await?;
            generator.validate(&rows)?;
            generator.save(ctx, &rows)?;
            report.generated += rows.len();
            generated.push(rows);
        }

        if !options.analyze {
            if options.visualize {
                warn!("visualization requested without analysis; skipping charts");
            }
            info!(gathered = report.gathered, generated = report.generated, "run complete");
            return Ok(report);
        }

        let union: Vec<Article> = gathered.into_iter().chain(generated).flatten().collect();
        let output = report.run_stage(&self.analyzer, ctx, union).await?;
        self.analyzer.validate(&output)?;
        self.analyzer.save(ctx, &output)?;
        report.analyzed = output.rows.len();

        if options.visualize {
            match &self.visualizer {
                Some(visualizer) => {
                    report.artifacts = report.run_stage(visualizer, ctx, output).await?;
                }
                None => warn!("visualization requested but no output directory configured"),
            }
        }

        info!(
            gathered = report.gathered,
            generated = report.generated,
            analyzed = report.analyzed,
            artifacts = report.artifacts.len(),
            "run complete"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gather::{MockSearchClient, QueryDescriptor};
    use crate::llm::MockChatClient;
    use crate::storage::{OpenStore, SqliteStore};
    use std::sync::Arc;

    fn context() -> PipelineContext {
        PipelineContext::with_store(Arc::new(SqliteStore::open_in_memory().unwrap()))
    }

    fn orchestrator() -> Orchestrator {
        let mut orchestrator = Orchestrator::new("io");
        orchestrator.add_gatherer(
            Gatherer::new(Arc::new(MockSearchClient::new()), QueryDescriptor::keyword("election"), "io")
                .with_max_results(2),
        );
        orchestrator.add_generator(
            Generator::new(Arc::new(MockChatClient::new()), "space", "io").with_count(1),
        );
        orchestrator
    }

    #[tokio::test]
    async fn runs_every_stage_and_persists() {
        let ctx = context();
        let report = orchestrator()
            .run(&ctx, RunOptions { analyze: true, visualize: false })
            .await
            .unwrap();

        assert_eq!(report.gathered, 2);
        assert_eq!(report.generated, 1);
        assert_eq!(report.analyzed, 3);
        assert!(report.artifacts.is_empty());
        assert_eq!(report.stages, vec!["io_gatherer", "io_generator", "io_analyzer"]);

        let store = ctx.store();
        assert_eq!(store.load("io_gatherer").unwrap().len(), 2);
        assert_eq!(store.load("io_generator").unwrap().len(), 1);
        let analyzed = store.load("io_analyzer").unwrap();
        assert_eq!(analyzed.len(), 3);
        // Gathered rows come first in the union
        assert_eq!(analyzed[0]["headline"], "Headline 1 for keyword=election");
        assert_eq!(analyzed[2]["publisher"]["title"], "Made by Ollama");
    }

    #[tokio::test]
    async fn skipping_analysis_skips_charts() {
        let ctx = context();
        let dir = tempfile::tempdir().unwrap();
        let mut orchestrator = orchestrator();
        orchestrator.set_visualizer(Visualizer::new(dir.path()));

        let report = orchestrator
            .run(&ctx, RunOptions { analyze: false, visualize: true })
            .await
            .unwrap();

        assert_eq!(report.analyzed, 0);
        assert!(report.artifacts.is_empty());
        assert_eq!(report.stages, vec!["io_gatherer", "io_generator"]);
        assert!(ctx.store().load("io_analyzer").unwrap().is_empty());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn provider_failure_aborts_before_saving() {
        let ctx = context();
        let mut orchestrator = Orchestrator::new("io");
        orchestrator.add_gatherer(Gatherer::new(
            Arc::new(MockSearchClient::new()),
            QueryDescriptor::keyword("fine"),
            "io",
        ));
        orchestrator.add_gatherer(Gatherer::new(
            Arc::new(MockSearchClient::failing("offline")),
            QueryDescriptor::keyword("broken"),
            "other",
        ));

        let err = orchestrator.run(&ctx, RunOptions::default()).await.unwrap_err();
        assert!(matches!(err, PipelineError::Search(_)));
        assert!(ctx.store().tables().unwrap().is_empty());
    }
}
