//! looksatwords: gather, generate, analyze and chart news headlines
//!
//! A sequential pipeline over a local table store:
//!
//! - **Gatherers** fetch real articles from a news-search provider
//! - **Generators** ask a chat model for synthetic headlines and stories
//! - The **Analyzer** derives cleaned text, sentiment, word counts and
//!   grammatical category counts for every headline and description
//! - The **Visualizer** renders a fixed battery of charts
//!
//! Every stage receives a `PipelineContext` that owns the store and the
//! progress sink; the `Orchestrator` runs the stages in order.
//!
//! # Example
//!
//! ```
//! use looksatwords::{Analyzer, NoopProgress};
//!
//! let analyzer = Analyzer::new("news");
//! let output = analyzer.analyze(&NoopProgress, &[]);
//! assert!(output.rows.is_empty());
//! ```

pub mod analysis;
pub mod config;
pub mod gather;
pub mod generate;
pub mod llm;
pub mod model;
pub mod nlp;
pub mod orchestrator;
pub mod pipeline;
pub mod progress;
pub mod schema;
pub mod storage;
pub mod visual;

pub use analysis::{AnalysisOutput, Analyzer};
pub use config::{ConfigError, PipelineConfig};
pub use gather::{GNewsClient, Gatherer, NewsSearchClient, QueryDescriptor, SearchError};
pub use generate::Generator;
pub use llm::{ChatClient, LlmError, OllamaClient};
pub use model::{AnalyzedArticle, Article, Publisher, Record, ToRecord, WordRow};
pub use orchestrator::{Orchestrator, RunOptions, RunReport};
pub use pipeline::{PipelineContext, PipelineError, PipelineStage};
pub use progress::{NoopProgress, ProgressEvent, ProgressSink, TerminalProgress};
pub use schema::SchemaViolation;
pub use storage::{OpenStore, SqliteStore, StorageError, StorageResult, TableStore, TableSummary};
pub use visual::{VisualKind, VisualizeError, Visualizer};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
