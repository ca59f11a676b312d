//! Per-field text feature extraction

use crate::model::{GrammarCounts, TextFeatures};
use crate::nlp::{
    is_alphabetic, is_punctuation, is_stopword, lemmatize, pos_tag, word_tokenize,
    GrammarCategory, SentimentAnalyzer, WordClass,
};

/// Regex-escape residue some feeds leave in their text
const ESCAPE_ARTIFACT: &str = r"[^\w\s]";
/// Separator between a headline and its publisher ("Vote counted - Example News")
const PUBLISHER_SEPARATOR: &str = " - ";

/// Normalize a headline or description.
///
/// Drops the publisher suffix and everything after the first line, removes
/// escape artifacts, turns hyphens into spaces, removes stop words and
/// noun-lemmatizes the remaining words. Capitalized words keep their form.
///
/// Cleaning cleaned text returns it unchanged.
pub fn clean_text(text: &str) -> String {
    let text = text.split(PUBLISHER_SEPARATOR).next().unwrap_or_default();
    let text = text.lines().next().unwrap_or_default();
    let mut text = text.to_string();
    while text.contains(ESCAPE_ARTIFACT) {
        text = text.replace(ESCAPE_ARTIFACT, "");
    }
    let text = text.replace('-', " ");

    text.split_whitespace()
        .filter(|word| !is_stopword(word))
        .map(|word| lemmatize(word, WordClass::Noun))
        .filter(|lemma| !is_stopword(lemma))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lower-cased, POS-lemmatized token stream without stop words.
pub fn abstract_text(text: &str) -> String {
    let tokens: Vec<String> = word_tokenize(text)
        .into_iter()
        .map(|token| token.to_lowercase())
        .filter(|token| is_alphabetic(token) || is_punctuation(token))
        .collect();

    pos_tag(&tokens)
        .into_iter()
        .map(|(word, tag)| lemmatize(&word, WordClass::from_tag(tag)))
        .filter(|lemma| !is_stopword(lemma))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Number of whitespace-separated tokens.
pub fn word_count(text: &str) -> u64 {
    text.split_whitespace().count() as u64
}

/// Count whitespace tokens per grammatical category.
///
/// Each token is tagged once (surrounding punctuation ignored), so the
/// counts never add up to more than `word_count(text)`.
pub fn grammar_counts(text: &str) -> GrammarCounts {
    let tokens: Vec<String> = text
        .split_whitespace()
        .map(|token| {
            let trimmed = token.trim_matches(|c: char| c.is_ascii_punctuation());
            let word = if trimmed.is_empty() { token } else { trimmed };
            word.to_string()
        })
        .collect();

    let mut counts = GrammarCounts::default();
    for (_, tag) in pos_tag(&tokens) {
        if let Some(category) = GrammarCategory::from_tag(tag) {
            counts.increment(category);
        }
    }
    counts
}

/// All features for one text field.
pub fn analyze_text(text: &str, sentiment: &SentimentAnalyzer) -> TextFeatures {
    let cleaned = clean_text(text);
    TextFeatures {
        abstracted: abstract_text(&cleaned),
        sentiment: sentiment.polarity_scores(&cleaned),
        wordcount: word_count(&cleaned),
        grammar: grammar_counts(&cleaned),
        cleaned,
    }
}
