//! Rule-based lemmatizer
//!
//! Irregular forms come from per-class exception tables; regular forms are
//! reduced with suffix rules (plural `-s`/`-es`/`-ies`, verb `-ed`/`-ing`,
//! comparative `-er`/`-est`). Capitalized words and words containing
//! anything but letters are returned unchanged.
//!
//! The result is always a fixed point: lemmatizing a lemma returns it as is.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Word class used to pick lemmatization rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WordClass {
    Noun,
    Verb,
    Adjective,
    Adverb,
}

impl WordClass {
    /// Word class for a Penn Treebank tag; anything unrecognised is a noun.
    pub fn from_tag(tag: &str) -> Self {
        match tag.chars().next() {
            Some('J') => WordClass::Adjective,
            Some('V') => WordClass::Verb,
            Some('R') => WordClass::Adverb,
            _ => WordClass::Noun,
        }
    }
}

static NOUN_EXCEPTIONS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    [
        ("men", "man"),
        ("women", "woman"),
        ("children", "child"),
        ("feet", "foot"),
        ("teeth", "tooth"),
        ("geese", "goose"),
        ("mice", "mouse"),
        ("lives", "life"),
        ("wives", "wife"),
        ("knives", "knife"),
        ("wolves", "wolf"),
        ("leaves", "leaf"),
        ("halves", "half"),
        ("shelves", "shelf"),
        ("thieves", "thief"),
        ("crises", "crisis"),
        ("analyses", "analysis"),
        ("theses", "thesis"),
        ("data", "datum"),
        ("criteria", "criterion"),
        ("phenomena", "phenomenon"),
        ("heroes", "hero"),
        ("potatoes", "potato"),
        ("tomatoes", "tomato"),
        ("vetoes", "veto"),
    ]
    .into_iter()
    .collect()
});

static VERB_EXCEPTIONS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    [
        ("am", "be"), ("is", "be"), ("are", "be"), ("was", "be"), ("were", "be"),
        ("been", "be"), ("being", "be"), ("has", "have"), ("had", "have"),
        ("having", "have"), ("does", "do"), ("did", "do"), ("done", "do"),
        ("doing", "do"), ("said", "say"), ("says", "say"), ("made", "make"),
        ("went", "go"), ("gone", "go"), ("goes", "go"), ("took", "take"),
        ("taken", "take"), ("got", "get"), ("gotten", "get"), ("came", "come"),
        ("saw", "see"), ("seen", "see"), ("knew", "know"), ("known", "know"),
        ("gave", "give"), ("given", "give"), ("found", "find"), ("told", "tell"),
        ("thought", "think"), ("left", "leave"), ("felt", "feel"), ("kept", "keep"),
        ("began", "begin"), ("begun", "begin"), ("brought", "bring"),
        ("bought", "buy"), ("built", "build"), ("held", "hold"), ("led", "lead"),
        ("lost", "lose"), ("meant", "mean"), ("met", "meet"), ("paid", "pay"),
        ("ran", "run"), ("sent", "send"), ("sold", "sell"), ("spent", "spend"),
        ("stood", "stand"), ("won", "win"), ("wrote", "write"), ("written", "write"),
        ("fell", "fall"), ("fallen", "fall"), ("rose", "rise"), ("risen", "rise"),
        ("struck", "strike"), ("fought", "fight"), ("caught", "catch"),
        ("taught", "teach"), ("sought", "seek"), ("ate", "eat"), ("eaten", "eat"),
        ("drove", "drive"), ("driven", "drive"), ("chose", "choose"),
        ("chosen", "choose"), ("spoke", "speak"), ("spoken", "speak"),
        ("broke", "break"), ("broken", "break"), ("flew", "fly"), ("flown", "fly"),
        ("grew", "grow"), ("grown", "grow"), ("threw", "throw"), ("thrown", "throw"),
        ("became", "become"), ("shook", "shake"), ("shaken", "shake"),
        ("hid", "hide"), ("hidden", "hide"), ("sank", "sink"), ("sunk", "sink"),
        ("swore", "swear"), ("sworn", "swear"), ("tore", "tear"), ("torn", "tear"),
        ("wore", "wear"), ("worn", "wear"), ("withdrew", "withdraw"),
        ("withdrawn", "withdraw"), ("forgot", "forget"), ("forgotten", "forget"),
        ("dies", "die"), ("died", "die"), ("dying", "die"), ("ties", "tie"),
        ("tied", "tie"), ("lies", "lie"), ("lied", "lie"), ("lying", "lie"),
        ("used", "use"), ("caused", "cause"), ("refused", "refuse"),
        ("accused", "accuse"), ("fled", "flee"), ("slid", "slide"),
        ("understood", "understand"), ("sang", "sing"), ("sung", "sing"),
        ("rang", "ring"), ("rung", "ring"), ("heard", "hear"), ("stole", "steal"),
        ("stolen", "steal"), ("woke", "wake"), ("woken", "wake"),
    ]
    .into_iter()
    .collect()
});

static ADJECTIVE_EXCEPTIONS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    [
        ("better", "good"),
        ("best", "good"),
        ("worse", "bad"),
        ("worst", "bad"),
        ("farther", "far"),
        ("farthest", "far"),
        ("further", "far"),
        ("furthest", "far"),
        ("less", "little"),
        ("least", "little"),
        ("more", "much"),
        ("most", "much"),
    ]
    .into_iter()
    .collect()
});

static ADVERB_EXCEPTIONS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    [
        ("better", "well"),
        ("best", "well"),
        ("farther", "far"),
        ("further", "far"),
        ("harder", "hard"),
        ("hardest", "hard"),
    ]
    .into_iter()
    .collect()
});

/// Words that look inflected but are already base forms.
const INVARIANT: &[&str] = &[
    "news", "series", "species", "means", "physics", "politics", "economics",
    "mathematics", "athletics", "lens", "always", "perhaps", "whereas", "yes",
    "this", "thus", "us", "its", "his", "hers", "ours", "yours", "theirs",
    "christmas", "texas", "atlas", "chaos", "canvas", "alias", "bias", "gas",
    "speed", "breed", "bleed", "feed", "seed", "heed", "weed", "greed", "deed",
    "need", "steed", "proceed", "succeed", "exceed", "bring", "thing", "king",
    "ring", "sing", "string", "spring", "swing", "wing", "sting", "during",
    "nothing", "something", "anything", "everything", "morning", "evening",
    "other", "former", "latter", "proper", "eager", "bitter", "clever", "sober",
    "tender", "silver", "super", "inner", "outer", "upper", "under", "over",
    "after", "never", "ever", "honest", "modest", "earnest", "manifest", "west",
    "interest", "forest", "guest", "chest", "rest", "test", "contest",
];

const VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u'];

fn is_vowel(c: char) -> bool {
    VOWELS.contains(&c)
}

/// Lemmatize a word as the given class.
pub fn lemmatize(word: &str, class: WordClass) -> String {
    if !is_lowercase_word(word) {
        return word.to_string();
    }
    let mut current = word.to_string();
    // Every rule shortens the word or lands on a base form, so this settles
    // within a few rounds.
    for _ in 0..8 {
        let next = lemmatize_once(&current, class);
        if next == current {
            break;
        }
        current = next;
    }
    current
}

fn is_lowercase_word(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| c.is_alphabetic() && !c.is_uppercase())
}

fn lemmatize_once(word: &str, class: WordClass) -> String {
    if INVARIANT.contains(&word) {
        return word.to_string();
    }
    let exceptions = match class {
        WordClass::Noun => &*NOUN_EXCEPTIONS,
        WordClass::Verb => &*VERB_EXCEPTIONS,
        WordClass::Adjective => &*ADJECTIVE_EXCEPTIONS,
        WordClass::Adverb => &*ADVERB_EXCEPTIONS,
    };
    if let Some(lemma) = exceptions.get(word) {
        return (*lemma).to_string();
    }
    match class {
        WordClass::Noun => noun_rules(word),
        WordClass::Verb => verb_rules(word),
        WordClass::Adjective => adjective_rules(word),
        WordClass::Adverb => None,
    }
    .unwrap_or_else(|| word.to_string())
}

/// Replace `suffix` with `replacement` if at least `min_stem` chars remain.
fn swap_suffix(word: &str, suffix: &str, replacement: &str, min_stem: usize) -> Option<String> {
    let stem = word.strip_suffix(suffix)?;
    (stem.chars().count() >= min_stem).then(|| format!("{stem}{replacement}"))
}

fn plural_s(word: &str) -> Option<String> {
    if ["ss", "us", "is", "as", "'s"].iter().any(|s| word.ends_with(s)) {
        return None;
    }
    swap_suffix(word, "s", "", 3)
}

fn noun_rules(word: &str) -> Option<String> {
    swap_suffix(word, "ies", "y", 2)
        .or_else(|| swap_suffix(word, "sses", "ss", 1))
        .or_else(|| swap_suffix(word, "shes", "sh", 1))
        .or_else(|| swap_suffix(word, "ches", "ch", 1))
        .or_else(|| swap_suffix(word, "xes", "x", 1))
        .or_else(|| swap_suffix(word, "zzes", "zz", 1))
        .or_else(|| {
            ["smen", "rmen", "cemen"]
                .iter()
                .any(|s| word.ends_with(s))
                .then(|| format!("{}man", &word[..word.len() - 3]))
        })
        .or_else(|| plural_s(word))
}

fn verb_rules(word: &str) -> Option<String> {
    swap_suffix(word, "ies", "y", 2)
        .or_else(|| swap_suffix(word, "sses", "ss", 1))
        .or_else(|| swap_suffix(word, "shes", "sh", 1))
        .or_else(|| swap_suffix(word, "ches", "ch", 1))
        .or_else(|| swap_suffix(word, "xes", "x", 1))
        .or_else(|| plural_s(word))
        .or_else(|| swap_suffix(word, "ied", "y", 2))
        .or_else(|| swap_suffix(word, "eed", "ee", 2))
        .or_else(|| strip_verb_ending(word, "ed"))
        .or_else(|| strip_verb_ending(word, "ing"))
}

fn adjective_rules(word: &str) -> Option<String> {
    swap_suffix(word, "iest", "y", 2)
        .or_else(|| swap_suffix(word, "ier", "y", 2))
        .or_else(|| strip_comparative(word, "est"))
        .or_else(|| strip_comparative(word, "er"))
}

/// `stopped` → `stop`, `voted` → `vote`, `visited` → `visit`
fn strip_verb_ending(word: &str, suffix: &str) -> Option<String> {
    let stem = word.strip_suffix(suffix)?;
    if stem.chars().count() < 2 || !stem.contains(VOWELS) {
        return None;
    }
    Some(restore_stem(stem))
}

/// `bigger` → `big`, `larger` → `large`, `faster` → `fast`
fn strip_comparative(word: &str, suffix: &str) -> Option<String> {
    let stem = word.strip_suffix(suffix)?;
    if stem.chars().count() < 3 || !stem.contains(VOWELS) {
        return None;
    }
    Some(restore_stem(stem))
}

fn restore_stem(stem: &str) -> String {
    let chars: Vec<char> = stem.chars().collect();
    let n = chars.len();
    if n >= 3 && chars[n - 1] == chars[n - 2] && !is_vowel(chars[n - 1]) && !"lsz".contains(chars[n - 1]) {
        return chars[..n - 1].iter().collect();
    }
    if needs_final_e(&chars) {
        return format!("{stem}e");
    }
    stem.to_string()
}

/// Guess whether a stripped stem lost a silent `e` (`vot` → `vote`).
fn needs_final_e(chars: &[char]) -> bool {
    let n = chars.len();
    let stem: String = chars.iter().collect();
    let consonant = |i: usize| !is_vowel(chars[i]) && chars[i] != 'y';

    if ["v", "c", "iz", "yz", "dg", "bl", "pl", "tl", "dl", "gl", "kl", "zl", "rs", "ns", "ps", "ls", "uir", "ang", "rg", "iat", "creat"]
        .iter()
        .any(|e| stem.ends_with(e))
    {
        return true;
    }
    if n < 3 {
        return false;
    }
    let (c1, v, c2) = (n - 3, n - 2, n - 1);
    let cvc = consonant(c1) && is_vowel(chars[v]) && consonant(c2) && !"wx".contains(chars[c2]);
    if !cvc {
        return false;
    }
    // Short stems: vot, bas, stat, nam
    if n == 3 || (n == 4 && consonant(0)) {
        return true;
    }
    // Longer stems with a final long vowel: decid, includ, compar, promot
    let ending: String = chars[v..].iter().collect();
    (ending == "at" && !stem.ends_with("eat") && !stem.ends_with("oat"))
        || ["id", "ud", "ad", "od", "ut", "ot", "ar", "ir", "ur", "or", "am", "im", "um", "om", "in"]
            .contains(&ending.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nouns() {
        let cases = [
            ("elections", "election"),
            ("cities", "city"),
            ("glasses", "glass"),
            ("boxes", "box"),
            ("churches", "church"),
            ("children", "child"),
            ("congressmen", "congressman"),
            ("news", "news"),
            ("bus", "bus"),
            ("crisis", "crisis"),
            ("days", "day"),
        ];
        for (word, lemma) in cases {
            assert_eq!(lemmatize(word, WordClass::Noun), lemma, "{word}");
        }
    }

    #[test]
    fn verbs() {
        let cases = [
            ("was", "be"),
            ("rallied", "rally"),
            ("stopped", "stop"),
            ("voted", "vote"),
            ("visited", "visit"),
            ("agreed", "agree"),
            ("running", "run"),
            ("calling", "call"),
            ("making", "make"),
            ("decided", "decide"),
            ("announces", "announce"),
            ("bring", "bring"),
            ("says", "say"),
        ];
        for (word, lemma) in cases {
            assert_eq!(lemmatize(word, WordClass::Verb), lemma, "{word}");
        }
    }

    #[test]
    fn adjectives_and_adverbs() {
        assert_eq!(lemmatize("bigger", WordClass::Adjective), "big");
        assert_eq!(lemmatize("larger", WordClass::Adjective), "large");
        assert_eq!(lemmatize("happier", WordClass::Adjective), "happy");
        assert_eq!(lemmatize("better", WordClass::Adjective), "good");
        assert_eq!(lemmatize("other", WordClass::Adjective), "other");
        assert_eq!(lemmatize("better", WordClass::Adverb), "well");
        assert_eq!(lemmatize("quickly", WordClass::Adverb), "quickly");
    }

    #[test]
    fn regular_adverbs_pass_through() {
        for word in ["quickly", "softly", "hardly", "soon", "ties"] {
            assert_eq!(lemmatize_once(word, WordClass::Adverb), word);
            assert_eq!(lemmatize(word, WordClass::Adverb), word);
        }
        assert_eq!(lemmatize_once("harder", WordClass::Adverb), "hard");
    }

    #[test]
    fn capitalized_and_non_alphabetic_untouched() {
        assert_eq!(lemmatize("Paris", WordClass::Noun), "Paris");
        assert_eq!(lemmatize("NATO", WordClass::Noun), "NATO");
        assert_eq!(lemmatize("votes,", WordClass::Noun), "votes,");
        assert_eq!(lemmatize("2020s", WordClass::Noun), "2020s");
        assert_eq!(lemmatize("", WordClass::Noun), "");
    }

    #[test]
    fn lemmas_are_fixed_points() {
        let words = [
            "elections", "cities", "glasses", "stopped", "voted", "rallies", "larger",
            "biggest", "congressmen", "running", "announced", "decided", "crises",
            "mice", "analyses", "threw", "earliest",
        ];
        for class in [WordClass::Noun, WordClass::Verb, WordClass::Adjective, WordClass::Adverb] {
            for word in words {
                let once = lemmatize(word, class);
                assert_eq!(lemmatize(&once, class), once, "{word} as {class:?}");
            }
        }
    }

    #[test]
    fn exception_targets_are_stable() {
        for (table, class) in [
            (&*NOUN_EXCEPTIONS, WordClass::Noun),
            (&*VERB_EXCEPTIONS, WordClass::Verb),
            (&*ADJECTIVE_EXCEPTIONS, WordClass::Adjective),
            (&*ADVERB_EXCEPTIONS, WordClass::Adverb),
        ] {
            for lemma in table.values() {
                assert_eq!(lemmatize_once(lemma, class), *lemma, "{lemma} as {class:?}");
            }
        }
    }

    #[test]
    fn word_class_from_tag() {
        assert_eq!(WordClass::from_tag("JJR"), WordClass::Adjective);
        assert_eq!(WordClass::from_tag("VBD"), WordClass::Verb);
        assert_eq!(WordClass::from_tag("RB"), WordClass::Adverb);
        assert_eq!(WordClass::from_tag("NNS"), WordClass::Noun);
        assert_eq!(WordClass::from_tag("IN"), WordClass::Noun);
    }
}
