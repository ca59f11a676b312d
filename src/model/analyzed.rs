//! Analyzed rows and word rows

use super::{column, Article, Record, ToRecord};
use crate::nlp::GrammarCategory;
use serde::{Deserialize, Serialize};

/// Polarity subscores for one piece of text.
///
/// `positive`, `negative` and `neutral` are proportions in `[0, 1]`;
/// `compound` is the normalised overall score in `[-1, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentScores {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
    pub compound: f64,
}

/// Token counts per grammatical category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarCounts {
    pub noun: u64,
    pub verb: u64,
    pub adjective: u64,
    pub adverb: u64,
    pub pronoun: u64,
    pub conjunction: u64,
    pub preposition: u64,
    pub interjection: u64,
}

impl GrammarCounts {
    pub fn get(&self, category: GrammarCategory) -> u64 {
        match category {
            GrammarCategory::Noun => self.noun,
            GrammarCategory::Verb => self.verb,
            GrammarCategory::Adjective => self.adjective,
            GrammarCategory::Adverb => self.adverb,
            GrammarCategory::Pronoun => self.pronoun,
            GrammarCategory::Conjunction => self.conjunction,
            GrammarCategory::Preposition => self.preposition,
            GrammarCategory::Interjection => self.interjection,
        }
    }

    pub fn increment(&mut self, category: GrammarCategory) {
        let slot = match category {
            GrammarCategory::Noun => &mut self.noun,
            GrammarCategory::Verb => &mut self.verb,
            GrammarCategory::Adjective => &mut self.adjective,
            GrammarCategory::Adverb => &mut self.adverb,
            GrammarCategory::Pronoun => &mut self.pronoun,
            GrammarCategory::Conjunction => &mut self.conjunction,
            GrammarCategory::Preposition => &mut self.preposition,
            GrammarCategory::Interjection => &mut self.interjection,
        };
        *slot += 1;
    }

    pub fn total(&self) -> u64 {
        GrammarCategory::ALL.iter().map(|c| self.get(*c)).sum()
    }
}

/// Everything derived from one text field of an article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextFeatures {
    /// Stop-word-free, lemmatized, single-line text
    pub cleaned: String,
    /// POS-aware lemmatized token stream without stop words
    pub abstracted: String,
    pub sentiment: SentimentScores,
    pub wordcount: u64,
    pub grammar: GrammarCounts,
}

impl TextFeatures {
    fn write_columns(&self, field: &str, record: &mut Record) {
        record.insert(column::cleaned(field), self.cleaned.clone().into());
        record.insert(column::abstracted(field), self.abstracted.clone().into());
        record.insert(column::derived(field, "positive"), self.sentiment.positive.into());
        record.insert(column::derived(field, "negative"), self.sentiment.negative.into());
        record.insert(column::derived(field, "neutral"), self.sentiment.neutral.into());
        record.insert(column::derived(field, "compound"), self.sentiment.compound.into());
        record.insert(column::derived(field, "wordcount"), self.wordcount.into());
        for category in GrammarCategory::ALL {
            record.insert(
                column::derived(field, category.column_suffix()),
                self.grammar.get(category).into(),
            );
        }
    }
}

/// An article with features for its headline and description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedArticle {
    pub article: Article,
    pub headline: TextFeatures,
    pub description: TextFeatures,
}

impl AnalyzedArticle {
    pub fn features(&self, field: &str) -> Option<&TextFeatures> {
        match field {
            column::HEADLINE => Some(&self.headline),
            column::DESCRIPTION => Some(&self.description),
            _ => None,
        }
    }
}

impl ToRecord for AnalyzedArticle {
    /// Flatten into article columns plus `<field>_<suffix>` feature columns.
    fn to_record(&self) -> Record {
        let mut record = self.article.to_record();
        self.headline.write_columns(column::HEADLINE, &mut record);
        self.description.write_columns(column::DESCRIPTION, &mut record);
        record
    }
}

/// A single lower-cased token and the row it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordRow {
    pub word: String,
    pub row: usize,
}
