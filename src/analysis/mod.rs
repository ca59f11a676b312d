//! Text analysis over article rows
//!
//! For each article's headline and description:
//! - `clean_text`: stop words, publisher suffix and extra lines removed, nouns lemmatized
//! - `abstract_text`: POS-aware lemmas without stop words
//! - sentiment, word count and grammatical category counts of the cleaned text
//!
//! Word rows (every raw token, lower-cased) feed the frequency charts.

mod analyzer;
mod text;
mod words;

pub use analyzer::{AnalysisOutput, Analyzer};
pub use text::{abstract_text, analyze_text, clean_text, grammar_counts, word_count};
pub use words::{build_words, word_frequencies};
