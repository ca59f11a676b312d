//! Row shapes flowing through the pipeline
//!
//! - `Article`: the common row produced by gatherers and generators
//! - `AnalyzedArticle`: an article plus derived text features per field
//! - `WordRow`: one lower-cased token, used for frequency charts
//! - `Record`: the dynamic, column-keyed form rows take in the store and
//!   in schema validation

mod analyzed;
mod article;

pub use analyzed::{AnalyzedArticle, GrammarCounts, SentimentScores, TextFeatures, WordRow};
pub use article::{Article, Publisher};

/// A row as a column-name → value map.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Typed rows that flatten into store/schema columns.
pub trait ToRecord {
    fn to_record(&self) -> Record;
}

/// Column names shared by the schemas and the record conversions.
pub mod column {
    pub const HEADLINE: &str = "headline";
    pub const DESCRIPTION: &str = "description";
    pub const URL: &str = "url";
    pub const PUBLISHED_DATE: &str = "published_date";
    pub const PUBLISHER: &str = "publisher";

    /// The two text fields every analysis step runs over.
    pub const TEXT_FIELDS: [&str; 2] = [HEADLINE, DESCRIPTION];

    pub fn cleaned(field: &str) -> String {
        format!("{field}_cleaned")
    }

    pub fn abstracted(field: &str) -> String {
        format!("abstracted_{field}")
    }

    pub fn derived(field: &str, suffix: &str) -> String {
        format!("{field}_{suffix}")
    }
}
