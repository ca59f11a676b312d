//! Word tokenizer
//!
//! Splits text into words (keeping internal hyphens and apostrophes) and
//! single punctuation characters, then separates English clitics the way
//! treebank tokenizers do: `don't` → `do n't`, `Trump's` → `Trump 's`.

use regex::Regex;
use std::sync::LazyLock;

static WORD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+(?:[-'’]\w+)*|[^\w\s]").unwrap());

const CLITICS: &[&str] = &["'s", "'re", "'ve", "'ll", "'d", "'m"];

/// Tokenize text into words and punctuation marks.
pub fn word_tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    for m in WORD_REGEX.find_iter(text) {
        split_clitics(&m.as_str().replace('’', "'"), &mut tokens);
    }
    tokens
}

fn split_clitics(word: &str, out: &mut Vec<String>) {
    // can't → ca n't, won't → wo n't
    for suffix in std::iter::once("n't").chain(CLITICS.iter().copied()) {
        if let Some(split) = suffix_start(word, suffix) {
            out.push(word[..split].to_string());
            out.push(word[split..].to_string());
            return;
        }
    }
    out.push(word.to_string());
}

/// Byte offset where `suffix` (ASCII, case-insensitive) starts, if the word
/// has something in front of it.
fn suffix_start(word: &str, suffix: &str) -> Option<usize> {
    if word.len() <= suffix.len() {
        return None;
    }
    let split = word.len() - suffix.len();
    (word.is_char_boundary(split) && word[split..].eq_ignore_ascii_case(suffix)).then_some(split)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_words_and_punctuation() {
        assert_eq!(
            word_tokenize("Stocks rally, bonds slip!"),
            vec!["Stocks", "rally", ",", "bonds", "slip", "!"]
        );
    }

    #[test]
    fn keeps_hyphenated_words() {
        assert_eq!(word_tokenize("a well-known case"), vec!["a", "well-known", "case"]);
    }

    #[test]
    fn splits_clitics() {
        assert_eq!(word_tokenize("Trump's plan"), vec!["Trump", "'s", "plan"]);
        assert_eq!(word_tokenize("they don't"), vec!["they", "do", "n't"]);
        assert_eq!(word_tokenize("we’re here"), vec!["we", "'re", "here"]);
    }

    #[test]
    fn empty_text_has_no_tokens() {
        assert!(word_tokenize("   ").is_empty());
    }
}
