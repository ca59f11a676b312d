//! Colors shared by the charts

use crate::nlp::GrammarCategory;
use plotters::style::RGBColor;

/// Viridis anchor colors at t = 0, 0.25, 0.5, 0.75, 1
const VIRIDIS: [(u8, u8, u8); 5] = [
    (68, 1, 84),
    (59, 82, 139),
    (33, 145, 140),
    (94, 201, 98),
    (253, 231, 37),
];

/// Viridis color for `t` in `[0, 1]`; values outside are clamped.
pub fn viridis(t: f64) -> RGBColor {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let scaled = t * (VIRIDIS.len() - 1) as f64;
    let index = (scaled.floor() as usize).min(VIRIDIS.len() - 2);
    let frac = scaled - index as f64;
    let (a, b) = (VIRIDIS[index], VIRIDIS[index + 1]);
    let lerp = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * frac).round() as u8;
    RGBColor(lerp(a.0, b.0), lerp(a.1, b.1), lerp(a.2, b.2))
}

/// Position of `value` within `[low, high]`, 0.5 when the range is empty.
pub fn normalize(value: f64, low: f64, high: f64) -> f64 {
    if high - low <= f64::EPSILON {
        0.5
    } else {
        ((value - low) / (high - low)).clamp(0.0, 1.0)
    }
}

const CATEGORICAL: [RGBColor; 10] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
    RGBColor(188, 189, 34),
    RGBColor(23, 190, 207),
];

/// Distinct colors for pie slices, cycling after ten.
pub fn categorical(index: usize) -> RGBColor {
    CATEGORICAL[index % CATEGORICAL.len()]
}

/// Word cloud color for a word's grammatical category.
pub fn grammar_color(category: Option<GrammarCategory>) -> RGBColor {
    match category {
        Some(GrammarCategory::Noun) => RGBColor(0, 0, 255),
        Some(GrammarCategory::Verb) => RGBColor(0, 128, 0),
        Some(GrammarCategory::Adjective) => RGBColor(255, 0, 0),
        Some(GrammarCategory::Adverb) => RGBColor(255, 165, 0),
        Some(GrammarCategory::Pronoun) => RGBColor(128, 0, 128),
        Some(GrammarCategory::Conjunction) => RGBColor(255, 255, 0),
        Some(GrammarCategory::Preposition) => RGBColor(255, 192, 203),
        Some(GrammarCategory::Interjection) => RGBColor(165, 42, 42),
        None => RGBColor(255, 255, 255),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viridis_endpoints_and_clamping() {
        assert_eq!(viridis(0.0), RGBColor(68, 1, 84));
        assert_eq!(viridis(1.0), RGBColor(253, 231, 37));
        assert_eq!(viridis(0.5), RGBColor(33, 145, 140));
        assert_eq!(viridis(-3.0), viridis(0.0));
        assert_eq!(viridis(7.0), viridis(1.0));
        assert_eq!(viridis(f64::NAN), viridis(0.0));
    }

    #[test]
    fn normalize_handles_flat_ranges() {
        assert_eq!(normalize(0.2, 0.2, 0.2), 0.5);
        assert_eq!(normalize(0.0, -1.0, 1.0), 0.5);
        assert_eq!(normalize(2.0, -1.0, 1.0), 1.0);
    }

    #[test]
    fn categorical_cycles() {
        assert_eq!(categorical(0), categorical(10));
        assert_ne!(categorical(0), categorical(1));
    }
}
