//! Part-of-speech tagging with Penn Treebank tags
//!
//! A small deterministic tagger: closed-class words and common irregular
//! verbs come from a lexicon, the rest is decided by context (the tag of the
//! previous token) and by suffix heuristics, falling back to `NN`.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Grammatical category counted per text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GrammarCategory {
    Noun,
    Verb,
    Adjective,
    Adverb,
    Pronoun,
    Conjunction,
    Preposition,
    Interjection,
}

impl GrammarCategory {
    pub const ALL: [GrammarCategory; 8] = [
        GrammarCategory::Noun,
        GrammarCategory::Verb,
        GrammarCategory::Adjective,
        GrammarCategory::Adverb,
        GrammarCategory::Pronoun,
        GrammarCategory::Conjunction,
        GrammarCategory::Preposition,
        GrammarCategory::Interjection,
    ];

    /// Suffix used for the per-field count column, e.g. `headline_noun`.
    pub fn column_suffix(&self) -> &'static str {
        match self {
            GrammarCategory::Noun => "noun",
            GrammarCategory::Verb => "verb",
            GrammarCategory::Adjective => "adjective",
            GrammarCategory::Adverb => "adverb",
            GrammarCategory::Pronoun => "pronoun",
            GrammarCategory::Conjunction => "conjunction",
            GrammarCategory::Preposition => "preposition",
            GrammarCategory::Interjection => "interjection",
        }
    }

    /// Penn Treebank tags belonging to this category.
    pub fn tags(&self) -> &'static [&'static str] {
        match self {
            GrammarCategory::Noun => &["NN", "NNS", "NNP", "NNPS"],
            GrammarCategory::Verb => &["VB", "VBD", "VBG", "VBN", "VBP", "VBZ"],
            GrammarCategory::Adjective => &["JJ", "JJR", "JJS"],
            GrammarCategory::Adverb => &["RB", "RBR", "RBS"],
            GrammarCategory::Pronoun => &["PRP", "PRP$", "WP", "WP$"],
            GrammarCategory::Conjunction => &["CC"],
            GrammarCategory::Preposition => &["IN"],
            GrammarCategory::Interjection => &["UH"],
        }
    }

    /// Category of a tag; tags outside every category (DT, CD, punctuation) give `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.tags().contains(&tag))
    }
}

static LEXICON: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let groups: &[(&str, &[&str])] = &[
        ("DT", &["the", "a", "an", "this", "that", "these", "those", "every", "each", "some", "any", "no", "all", "both", "another", "either", "neither"]),
        ("PRP", &["i", "you", "he", "she", "it", "we", "they", "me", "him", "us", "them", "myself", "yourself", "himself", "herself", "itself", "ourselves", "themselves"]),
        ("PRP$", &["my", "your", "his", "her", "its", "our", "their"]),
        ("WP", &["who", "whom", "what"]),
        ("WP$", &["whose"]),
        ("WDT", &["which"]),
        ("WRB", &["when", "where", "why", "how"]),
        ("CC", &["and", "or", "but", "nor"]),
        ("IN", &["of", "in", "on", "at", "by", "for", "with", "from", "about", "into", "over", "after", "before", "under", "between", "through", "during", "without", "against", "among", "since", "until", "upon", "within", "across", "behind", "beyond", "despite", "near", "amid", "toward", "towards", "onto", "per", "via", "than", "because", "if", "while", "although", "though", "whether", "as", "like", "unless"]),
        ("TO", &["to"]),
        ("MD", &["will", "would", "can", "could", "shall", "should", "may", "might", "must", "'ll", "'d"]),
        ("UH", &["oh", "wow", "hey", "alas", "ouch", "hooray", "oops", "hello", "ah", "ugh", "yes"]),
        ("VB", &["be"]),
        ("VBZ", &["is", "has", "does", "says"]),
        ("VBP", &["are", "am", "have", "do", "'re", "'ve", "'m"]),
        ("VBD", &["was", "were", "had", "did", "said", "made", "went", "took", "got", "came", "saw", "knew", "gave", "found", "told", "thought", "felt", "kept", "began", "brought", "bought", "held", "met", "ran", "sent", "sold", "stood", "won", "wrote", "fell", "rose", "struck", "fought", "caught", "drove", "chose", "spoke", "broke", "flew", "grew", "threw", "became", "fled"]),
        ("VBN", &["been", "done", "gone", "taken", "seen", "known", "given", "written", "fallen", "risen", "driven", "chosen", "spoken", "broken", "grown", "thrown", "shown"]),
        ("VBG", &["being", "having", "doing"]),
        ("RB", &["not", "n't", "very", "also", "just", "now", "then", "still", "already", "soon", "never", "always", "often", "again", "here", "too", "only", "even", "really", "almost", "quite", "perhaps", "ever", "yet", "so", "there"]),
        ("JJ", &["good", "new", "old", "big", "great", "high", "small", "large", "long", "little", "few", "many", "much", "other", "own", "same", "top", "bad", "first", "last", "major", "key", "local", "national", "global", "political"]),
        ("JJR", &["better", "worse", "more", "less"]),
        ("JJS", &["best", "worst", "most", "least"]),
        ("POS", &["'s"]),
        ("CD", &["one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten", "hundred", "thousand", "million", "billion"]),
    ];
    groups
        .iter()
        .flat_map(|(tag, words)| words.iter().map(move |w| (*w, *tag)))
        .collect()
});

const ADJECTIVE_SUFFIXES: &[&str] = &["ous", "ful", "less", "able", "ible", "ive", "ic", "ical", "ional", "ish"];
const NOUN_SUFFIXES: &[&str] = &["tion", "sion", "ment", "ness", "ity", "ship", "ism", "ist", "ance", "ence"];

fn punctuation_tag(token: &str) -> Option<&'static str> {
    let tag = match token {
        "." | "!" | "?" => ".",
        "," => ",",
        ":" | ";" | "-" | "..." => ":",
        "(" | "[" | "{" => "(",
        ")" | "]" | "}" => ")",
        "\"" | "`" | "``" => "``",
        "''" => "''",
        "$" => "$",
        "#" => "#",
        _ if token.chars().all(|c| !c.is_alphanumeric()) => "SYM",
        _ => return None,
    };
    Some(tag)
}

fn is_number(token: &str) -> bool {
    token.chars().any(|c| c.is_ascii_digit())
        && token.chars().all(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | '%'))
}

fn starts_uppercase(token: &str) -> bool {
    token.chars().next().is_some_and(char::is_uppercase)
}

fn suffix_tag(word: &str) -> &'static str {
    let len = word.chars().count();
    let plural_stem = word
        .strip_suffix('s')
        .filter(|_| len > 3 && !["ss", "us", "is"].iter().any(|s| word.ends_with(s)));

    if len > 4 && word.ends_with("ly") {
        "RB"
    } else if len > 4 && word.ends_with("ing") {
        "VBG"
    } else if len > 3 && word.ends_with("ed") {
        "VBD"
    } else if ADJECTIVE_SUFFIXES.iter().any(|s| word.ends_with(s)) && len > 4 {
        "JJ"
    } else if NOUN_SUFFIXES.iter().any(|s| word.ends_with(s)) {
        "NN"
    } else if plural_stem.is_some() {
        "NNS"
    } else {
        "NN"
    }
}

fn initial_tag(token: &str, index: usize, tokens: &[String]) -> &'static str {
    if let Some(tag) = punctuation_tag(token) {
        return tag;
    }
    if is_number(token) {
        return "CD";
    }
    let lower = token.to_lowercase();
    if let Some(tag) = LEXICON.get(lower.as_str()) {
        return tag;
    }
    let sentence_start = index == 0 || matches!(tokens[index - 1].as_str(), "." | "!" | "?");
    if starts_uppercase(token) && !sentence_start {
        // Acronyms stay singular: "NATO", "GOP"
        let acronym = token.chars().all(|c| !c.is_lowercase());
        return if !acronym && lower.chars().count() > 4 && suffix_tag(&lower) == "NNS" {
            "NNPS"
        } else {
            "NNP"
        };
    }
    suffix_tag(&lower)
}

/// Retag a token given the tag of the token before it.
fn contextual_tag(token: &str, tag: &'static str, prev: Option<(&str, &str)>, next: Option<&str>) -> &'static str {
    let lower = token.to_lowercase();
    if lower == "there" {
        let before_be = next.is_some_and(|n| {
            matches!(n.to_lowercase().as_str(), "is" | "are" | "was" | "were" | "'s" | "be")
        });
        return if before_be { "EX" } else { "RB" };
    }
    let in_lexicon = LEXICON.contains_key(lower.as_str());
    let Some((prev_word, prev_tag)) = prev else {
        return tag;
    };
    let prev_lower = prev_word.to_lowercase();
    if in_lexicon || tag == "NNP" || tag == "NNPS" || tag == "CD" || punctuation_tag(token).is_some() {
        return tag;
    }

    match prev_tag {
        "TO" | "MD" if tag.starts_with('N') || tag == "VBD" => "VB",
        "DT" | "PRP$" if tag == "VBG" => "NN",
        _ if matches!(prev_lower.as_str(), "he" | "she" | "it") && tag == "NNS" => "VBZ",
        _ if matches!(prev_lower.as_str(), "i" | "you" | "we" | "they") && tag == "NN" => "VBP",
        _ if tag == "VBD"
            && matches!(
                prev_lower.as_str(),
                "has" | "have" | "had" | "having" | "is" | "are" | "was" | "were" | "be" | "been" | "being"
            ) =>
        {
            "VBN"
        }
        _ => tag,
    }
}

/// Tag each token with a Penn Treebank part-of-speech tag.
pub fn pos_tag(tokens: &[String]) -> Vec<(String, &'static str)> {
    let initial: Vec<&'static str> = tokens
        .iter()
        .enumerate()
        .map(|(i, token)| initial_tag(token, i, tokens))
        .collect();

    let mut tagged: Vec<(String, &'static str)> = Vec::with_capacity(tokens.len());
    for (i, token) in tokens.iter().enumerate() {
        let prev = i
            .checked_sub(1)
            .map(|p| (tokens[p].as_str(), tagged[p].1));
        let next = tokens.get(i + 1).map(String::as_str);
        let tag = contextual_tag(token, initial[i], prev, next);
        tagged.push((token.clone(), tag));
    }
    tagged
}
