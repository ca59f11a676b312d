//! Natural-language toolkit used by the analyzer
//!
//! - **tokenize**: word/punctuation tokenizer with clitic splitting
//! - **stopwords**: the English stop-word list
//! - **lemma**: rule-based lemmatizer keyed by word class
//! - **pos**: Penn Treebank part-of-speech tagger and grammatical categories
//! - **sentiment**: lexicon-based polarity scorer

mod lemma;
mod pos;
mod sentiment;
mod stopwords;
mod tokenize;

pub use lemma::{lemmatize, WordClass};
pub use pos::{pos_tag, GrammarCategory};
pub use sentiment::SentimentAnalyzer;
pub use stopwords::is_stopword;
pub use tokenize::word_tokenize;

/// True for a single ASCII punctuation character.
pub fn is_punctuation(token: &str) -> bool {
    let mut chars = token.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_ascii_punctuation())
}

/// True when every character is alphabetic (and there is at least one).
pub fn is_alphabetic(token: &str) -> bool {
    !token.is_empty() && token.chars().all(char::is_alphabetic)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn punctuation_is_single_char() {
        assert!(is_punctuation("!"));
        assert!(is_punctuation(","));
        assert!(!is_punctuation("!!"));
        assert!(!is_punctuation("a"));
        assert!(!is_punctuation(""));
    }

    #[test]
    fn alphabetic_tokens() {
        assert!(is_alphabetic("election"));
        assert!(is_alphabetic("Élection"));
        assert!(!is_alphabetic("well-known"));
        assert!(!is_alphabetic("2024"));
        assert!(!is_alphabetic(""));
    }
}
