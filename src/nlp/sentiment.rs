//! Lexicon and rule-based sentiment scoring
//!
//! Follows the VADER approach: each word carries a valence in `[-4, 4]`,
//! adjusted by preceding boosters, negations, capitalization and a
//! contrastive "but". The summed valence, amplified by `!` and `?`, is
//! squashed into a compound score in `[-1, 1]`.

use crate::model::SentimentScores;
use std::collections::{HashMap, HashSet};

/// Valence added by a booster word
const B_INCR: f64 = 0.293;
/// Valence subtracted by a dampener word
const B_DECR: f64 = -0.293;
/// Valence added by an ALL-CAPS word in mixed-case text
const C_INCR: f64 = 0.733;
/// Multiplier applied to negated words
const N_SCALAR: f64 = -0.74;
/// Normalization constant for the compound score
const ALPHA: f64 = 15.0;

const LEXICON: &[(&str, f64)] = &[
    ("abandon", -1.9), ("abuse", -3.2), ("accept", 1.6), ("accident", -2.1),
    ("accuse", -1.9), ("accused", -1.2), ("achieve", 1.9), ("achievement", 2.1),
    ("admire", 2.1), ("afraid", -2.2), ("aggressive", -0.6), ("agree", 1.5),
    ("agreement", 2.2), ("alarm", -1.4), ("amazing", 2.8), ("anger", -2.7),
    ("angry", -2.3), ("anxiety", -0.7), ("anxious", -1.0), ("applaud", 2.0),
    ("arrest", -1.4), ("arrested", -2.1), ("ashamed", -2.1), ("attack", -2.1),
    ("attacked", -2.0), ("awesome", 3.1), ("awful", -2.0), ("bad", -2.5),
    ("ban", -2.6), ("banned", -2.0), ("beautiful", 2.9), ("benefit", 2.0),
    ("best", 3.2), ("better", 1.9), ("betray", -3.2), ("blame", -1.4),
    ("bless", 1.8), ("bomb", -2.2), ("boost", 1.7), ("brave", 2.4),
    ("breakthrough", 2.1), ("brilliant", 2.8), ("broken", -2.1), ("calm", 1.3),
    ("care", 2.2), ("catastrophe", -3.4), ("celebrate", 2.7), ("celebration", 2.6),
    ("chaos", -2.7), ("cheat", -2.0), ("cheer", 2.3), ("collapse", -2.2),
    ("comfort", 1.5), ("condemn", -1.6), ("confident", 2.2), ("conflict", -1.3),
    ("confusion", -1.2), ("corrupt", -3.0), ("corruption", -1.9), ("crash", -1.7),
    ("crime", -2.5), ("crisis", -3.1), ("critical", -1.3), ("criticism", -1.9),
    ("cruel", -2.8), ("cut", -1.1), ("damage", -2.2), ("danger", -2.4),
    ("dangerous", -2.1), ("dead", -3.3), ("deadly", -2.5), ("death", -2.9),
    ("decline", -1.1), ("defeat", -2.0), ("delight", 2.9), ("deny", -1.4),
    ("destroy", -2.5), ("destroyed", -2.8), ("disaster", -3.1), ("disappoint", -2.3),
    ("disappointed", -1.9), ("dispute", -1.7), ("doubt", -1.5), ("enjoy", 2.2),
    ("excellent", 3.2), ("excited", 2.2), ("exciting", 2.2), ("fail", -2.5),
    ("failed", -2.3), ("failure", -2.3), ("fair", 1.3), ("fake", -2.1),
    ("fantastic", 2.6), ("fear", -2.2), ("fight", -1.6), ("fine", 0.8),
    ("fraud", -2.8), ("free", 2.3), ("freedom", 3.2), ("friend", 2.2),
    ("friendly", 2.2), ("fun", 2.3), ("gain", 2.4), ("gains", 1.8),
    ("glad", 2.0), ("good", 1.9), ("great", 3.1), ("greed", -1.7),
    ("grief", -2.2), ("growth", 1.6), ("guilty", -1.8), ("happy", 2.7),
    ("harm", -2.5), ("hate", -2.7), ("hero", 2.6), ("honest", 2.3),
    ("honor", 2.2), ("hope", 1.9), ("hopeful", 2.3), ("horrible", -2.5),
    ("hostile", -2.2), ("hurt", -2.4), ("illegal", -2.6), ("improve", 1.9),
    ("improved", 2.1), ("injured", -1.7), ("injury", -1.9), ("innocent", 1.4),
    ("inspire", 2.7), ("justice", 2.4), ("kill", -3.7), ("killed", -3.5),
    ("kind", 2.4), ("lack", -1.3), ("laugh", 2.6), ("liar", -2.4),
    ("lie", -1.4), ("lies", -1.8), ("like", 2.0), ("lose", -1.6),
    ("loss", -1.3), ("lost", -1.3), ("love", 3.2), ("lucky", 1.8),
    ("mess", -1.5), ("miss", -0.6), ("murder", -3.7), ("nice", 1.8),
    ("outrage", -2.3), ("pain", -2.3), ("panic", -2.3), ("peace", 2.5),
    ("pleased", 1.9), ("poor", -2.1), ("popular", 1.8), ("positive", 2.6),
    ("praise", 2.6), ("pretty", 2.2), ("problem", -1.7), ("problems", -1.7),
    ("progress", 1.8), ("promise", 1.3), ("protect", 1.6), ("protest", -1.0),
    ("proud", 2.1), ("rage", -2.6), ("recover", 1.9), ("recovery", 1.4),
    ("reject", -1.7), ("relief", 2.1), ("rescue", 1.5), ("rich", 1.9),
    ("risk", -1.1), ("sad", -2.1), ("safe", 1.9), ("safety", 1.8),
    ("scandal", -1.9), ("scare", -2.2), ("shock", -1.6), ("smart", 1.7),
    ("strong", 2.3), ("stupid", -2.4), ("success", 2.7), ("successful", 2.8),
    ("suffer", -2.5), ("support", 1.7), ("supported", 1.3), ("terrible", -2.1),
    ("terror", -3.0), ("thank", 1.5), ("thanks", 1.9), ("threat", -2.4),
    ("tragedy", -3.4), ("trouble", -1.7), ("trust", 2.3), ("ugly", -2.3),
    ("unfair", -2.1), ("upset", -1.6), ("victim", -2.8), ("victory", 2.8),
    ("violence", -3.1), ("war", -2.9), ("warning", -1.4), ("weak", -1.9),
    ("welcome", 2.0), ("win", 2.8), ("winner", 2.8), ("wins", 2.7),
    ("won", 2.7), ("wonderful", 2.7), ("worry", -1.9), ("worse", -2.1),
    ("worst", -3.1), ("wrong", -2.1),
];

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "none", "nobody", "nothing", "neither", "nor",
    "nowhere", "cannot", "without", "rarely", "seldom", "despite",
];

const BOOSTERS: &[(&str, f64)] = &[
    ("absolutely", B_INCR), ("amazingly", B_INCR), ("completely", B_INCR),
    ("considerably", B_INCR), ("deeply", B_INCR), ("enormously", B_INCR),
    ("entirely", B_INCR), ("especially", B_INCR), ("extremely", B_INCR),
    ("fully", B_INCR), ("greatly", B_INCR), ("highly", B_INCR),
    ("hugely", B_INCR), ("incredibly", B_INCR), ("intensely", B_INCR),
    ("more", B_INCR), ("most", B_INCR), ("particularly", B_INCR),
    ("purely", B_INCR), ("quite", B_INCR), ("really", B_INCR),
    ("remarkably", B_INCR), ("so", B_INCR), ("substantially", B_INCR),
    ("thoroughly", B_INCR), ("totally", B_INCR), ("tremendously", B_INCR),
    ("truly", B_INCR), ("unbelievably", B_INCR), ("utterly", B_INCR),
    ("very", B_INCR),
    ("almost", B_DECR), ("barely", B_DECR), ("hardly", B_DECR),
    ("less", B_DECR), ("little", B_DECR), ("marginally", B_DECR),
    ("occasionally", B_DECR), ("partly", B_DECR), ("scarcely", B_DECR),
    ("slightly", B_DECR), ("somewhat", B_DECR),
];

/// Sentiment scorer over a built-in English lexicon.
#[derive(Debug, Clone)]
pub struct SentimentAnalyzer {
    lexicon: HashMap<&'static str, f64>,
    boosters: HashMap<&'static str, f64>,
    negations: HashSet<&'static str>,
}

impl Default for SentimentAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentAnalyzer {
    pub fn new() -> Self {
        Self {
            lexicon: LEXICON.iter().copied().collect(),
            boosters: BOOSTERS.iter().copied().collect(),
            negations: NEGATIONS.iter().copied().collect(),
        }
    }

    /// Score a text. Text without any word yields all-zero scores.
    pub fn polarity_scores(&self, text: &str) -> SentimentScores {
        let words = split_words(text);
        if words.is_empty() {
            return SentimentScores::default();
        }
        let cap_differential = is_cap_differential(&words);

        let mut valences: Vec<f64> = words
            .iter()
            .enumerate()
            .map(|(i, _)| self.word_valence(&words, i, cap_differential))
            .collect();
        apply_but_rule(&words, &mut valences);

        score_valences(&valences, punctuation_emphasis(text))
    }

    fn word_valence(&self, words: &[&str], i: usize, cap_differential: bool) -> f64 {
        let lower = words[i].to_lowercase();
        if self.boosters.contains_key(lower.as_str()) {
            return 0.0;
        }
        let Some(&base) = self.lexicon.get(lower.as_str()) else {
            return 0.0;
        };

        let mut valence = base;
        if cap_differential && is_upper(words[i]) {
            valence += if valence > 0.0 { C_INCR } else { -C_INCR };
        }

        for distance in 1..=3 {
            let Some(prev) = i.checked_sub(distance).map(|p| words[p]) else {
                break;
            };
            let prev_lower = prev.to_lowercase();
            if self.lexicon.contains_key(prev_lower.as_str()) {
                continue;
            }
            let mut boost = self.booster_scalar(prev, &prev_lower, valence, cap_differential);
            // Boosters further away count for less
            boost *= match distance {
                2 => 0.95,
                3 => 0.9,
                _ => 1.0,
            };
            valence += boost;
            if self.is_negation(&prev_lower) {
                valence *= N_SCALAR;
            }
        }
        valence
    }

    fn booster_scalar(&self, word: &str, lower: &str, valence: f64, cap_differential: bool) -> f64 {
        let Some(&scalar) = self.boosters.get(lower) else {
            return 0.0;
        };
        let mut scalar = if valence < 0.0 { -scalar } else { scalar };
        if cap_differential && is_upper(word) {
            scalar += if valence > 0.0 { C_INCR } else { -C_INCR };
        }
        scalar
    }

    fn is_negation(&self, lower: &str) -> bool {
        self.negations.contains(lower) || lower.ends_with("n't")
    }
}

/// Whitespace tokens with surrounding punctuation removed, single characters dropped.
fn split_words(text: &str) -> Vec<&str> {
    text.split_whitespace()
        .map(|token| {
            let stripped = token.trim_matches(|c: char| c.is_ascii_punctuation());
            if stripped.chars().count() <= 2 {
                token
            } else {
                stripped
            }
        })
        .filter(|word| word.chars().count() > 1)
        .collect()
}

fn is_upper(word: &str) -> bool {
    word.chars().any(char::is_alphabetic) && !word.chars().any(char::is_lowercase)
}

/// Some, but not all, words are ALL CAPS.
fn is_cap_differential(words: &[&str]) -> bool {
    let upper = words.iter().filter(|w| is_upper(w)).count();
    upper > 0 && upper < words.len()
}

/// Halve sentiment before "but" and boost it by half after.
fn apply_but_rule(words: &[&str], valences: &mut [f64]) {
    let Some(but) = words.iter().position(|w| w.eq_ignore_ascii_case("but")) else {
        return;
    };
    for (i, valence) in valences.iter_mut().enumerate() {
        if i < but {
            *valence *= 0.5;
        } else if i > but {
            *valence *= 1.5;
        }
    }
}

fn punctuation_emphasis(text: &str) -> f64 {
    let exclamations = text.matches('!').count().min(4) as f64 * 0.292;
    let questions = match text.matches('?').count() {
        0 | 1 => 0.0,
        n @ 2..=3 => n as f64 * 0.18,
        _ => 0.96,
    };
    exclamations + questions
}

fn normalize(score: f64) -> f64 {
    (score / (score * score + ALPHA).sqrt()).clamp(-1.0, 1.0)
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

fn score_valences(valences: &[f64], emphasis: f64) -> SentimentScores {
    let mut sum: f64 = valences.iter().sum();
    if sum > 0.0 {
        sum += emphasis;
    } else if sum < 0.0 {
        sum -= emphasis;
    }
    let compound = normalize(sum);

    let mut positive: f64 = valences.iter().filter(|v| **v > 0.0).map(|v| v + 1.0).sum();
    let mut negative: f64 = valences.iter().filter(|v| **v < 0.0).map(|v| v - 1.0).sum();
    let neutral = valences.iter().filter(|v| **v == 0.0).count() as f64;

    if positive > negative.abs() {
        positive += emphasis;
    } else if positive < negative.abs() {
        negative -= emphasis;
    }

    let total = positive + negative.abs() + neutral;
    if total == 0.0 {
        return SentimentScores::default();
    }
    SentimentScores {
        positive: round_to((positive / total).abs(), 3),
        negative: round_to((negative / total).abs(), 3),
        neutral: round_to((neutral / total).abs(), 3),
        compound: round_to(compound, 4),
    }
}
