//! Word rows for frequency charts

use crate::model::{Article, WordRow};
use std::collections::HashMap;

/// Every whitespace token of every headline, then of every description,
/// lower-cased and tagged with the index of its row.
pub fn build_words(rows: &[Article]) -> Vec<WordRow> {
    let headlines = rows.iter().enumerate().map(|(i, r)| (i, r.headline.as_str()));
    let descriptions = rows.iter().enumerate().map(|(i, r)| (i, r.description.as_str()));

    headlines
        .chain(descriptions)
        .flat_map(|(row, text)| {
            text.split_whitespace().map(move |word| WordRow {
                word: word.to_lowercase(),
                row,
            })
        })
        .collect()
}

/// Word counts, most frequent first; ties in alphabetical order.
pub fn word_frequencies(words: &[WordRow]) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for word in words {
        *counts.entry(word.word.as_str()).or_insert(0) += 1;
    }
    let mut frequencies: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(word, count)| (word.to_string(), count))
        .collect();
    frequencies.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    frequencies
}
