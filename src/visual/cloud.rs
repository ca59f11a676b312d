//! Word cloud layout and rendering
//!
//! Layout is pure geometry over a coarse occupancy grid. Words go in most
//! frequent first, sized linearly by relative frequency, each at the free
//! spot nearest the centre. A word that fits nowhere is retried at shrinking
//! sizes down to `MIN_FONT`. Text extents are estimated from the font size so
//! the layout needs no font files.

use super::palette::grammar_color;
use super::VisualizeError;
use crate::nlp::{pos_tag, GrammarCategory};
use plotters::prelude::*;
use std::path::Path;
use tracing::debug;

pub const WIDTH: u32 = 1000;
pub const HEIGHT: u32 = 750;
pub const MAX_WORDS: usize = 500;

const BACKGROUND: RGBColor = RGBColor(169, 169, 169);
const MIN_FONT: f64 = 4.0;
const SHRINK: f64 = 0.9;
const CHAR_WIDTH: f64 = 0.6;
const PADDING: i32 = 2;
/// Side of one occupancy cell, in pixels
const CELL: usize = 4;

/// A word with its final position (top-left corner) and size.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord {
    pub word: String,
    pub x: i32,
    pub y: i32,
    pub font_size: f64,
    pub width: i32,
    pub height: i32,
}

#[cfg(test)]
impl PlacedWord {
    fn overlaps(&self, other: &PlacedWord) -> bool {
        self.x < other.x + other.width + PADDING
            && other.x < self.x + self.width + PADDING
            && self.y < other.y + other.height + PADDING
            && other.y < self.y + self.height + PADDING
    }
}

fn extent(word: &str, font_size: f64) -> (i32, i32) {
    let width = (word.chars().count() as f64 * font_size * CHAR_WIDTH).ceil() as i32;
    (width.max(1), font_size.ceil() as i32)
}

/// Cells needed to hold `pixels` plus padding.
fn span(pixels: i32) -> usize {
    ((pixels + PADDING).max(1) as usize).div_ceil(CELL)
}

/// Which grid cells are taken, with a summed-area table for O(1) box queries.
struct Occupancy {
    cols: usize,
    rows: usize,
    width: f64,
    height: f64,
    taken: Vec<bool>,
    summed: Vec<u32>,
    free: usize,
}

impl Occupancy {
    fn new(width: u32, height: u32) -> Self {
        let cols = width as usize / CELL;
        let rows = height as usize / CELL;
        Self {
            cols,
            rows,
            width: width as f64,
            height: height as f64,
            taken: vec![false; cols * rows],
            summed: vec![0; (cols + 1) * (rows + 1)],
            free: cols * rows,
        }
    }

    fn summed_at(&self, col: usize, row: usize) -> u32 {
        self.summed[row * (self.cols + 1) + col]
    }

    fn taken_in(&self, col: usize, row: usize, cols: usize, rows: usize) -> u32 {
        self.summed_at(col + cols, row + rows) + self.summed_at(col, row)
            - self.summed_at(col + cols, row)
            - self.summed_at(col, row + rows)
    }

    /// Free top-left corner for a `w` x `h` box whose centre is nearest the
    /// canvas centre, measured on an ellipse matching the canvas aspect.
    fn find(&self, w: i32, h: i32) -> Option<(i32, i32)> {
        let (cols, rows) = (span(w), span(h));
        if cols > self.cols || rows > self.rows || cols * rows > self.free {
            return None;
        }
        let (cx, cy) = (self.width / 2.0, self.height / 2.0);
        let stretch = self.width / self.height;

        let mut best: Option<(f64, usize, usize)> = None;
        for row in 0..=self.rows - rows {
            for col in 0..=self.cols - cols {
                if self.taken_in(col, row, cols, rows) > 0 {
                    continue;
                }
                let dx = (col * CELL) as f64 + w as f64 / 2.0 - cx;
                let dy = ((row * CELL) as f64 + h as f64 / 2.0 - cy) * stretch;
                let distance = dx * dx + dy * dy;
                if best.map_or(true, |(d, _, _)| distance < d) {
                    best = Some((distance, col, row));
                }
            }
        }
        best.map(|(_, col, row)| ((col * CELL) as i32, (row * CELL) as i32))
    }

    fn occupy(&mut self, x: i32, y: i32, w: i32, h: i32) {
        let (col0, row0) = (x as usize / CELL, y as usize / CELL);
        let col1 = (col0 + span(w)).min(self.cols);
        let row1 = (row0 + span(h)).min(self.rows);
        for row in row0..row1 {
            for col in col0..col1 {
                let cell = &mut self.taken[row * self.cols + col];
                if !*cell {
                    *cell = true;
                    self.free -= 1;
                }
            }
        }

        let stride = self.cols + 1;
        for row in 0..self.rows {
            let mut run = 0;
            for col in 0..self.cols {
                run += self.taken[row * self.cols + col] as u32;
                self.summed[(row + 1) * stride + col + 1] = self.summed[row * stride + col + 1] + run;
            }
        }
    }
}

/// Place up to `max_words` of `frequencies` (most frequent first) on a
/// `width` x `height` canvas.
///
/// Font sizes never grow along the list, so equal counts do not retry sizes
/// that already failed. Words that fit nowhere even at the minimum font size
/// are dropped.
pub fn layout(
    frequencies: &[(String, usize)],
    width: u32,
    height: u32,
    max_words: usize,
) -> Vec<PlacedWord> {
    let mut grid = Occupancy::new(width, height);
    let max_count = frequencies.iter().map(|(_, c)| *c).max().unwrap_or(1).max(1) as f64;
    let max_font = (height as f64 / 5.0).max(MIN_FONT);
    let mut ceiling = max_font;

    let mut placed: Vec<PlacedWord> = Vec::new();
    let mut dropped = 0usize;
    for (word, count) in frequencies.iter().take(max_words) {
        let relative = *count as f64 / max_count;
        let mut font_size = (MIN_FONT + (max_font - MIN_FONT) * relative).min(ceiling);

        let slot = loop {
            let (w, h) = extent(word, font_size);
            if let Some((x, y)) = grid.find(w, h) {
                break Some((x, y, w, h));
            }
            if font_size <= MIN_FONT {
                break None;
            }
            font_size = (font_size * SHRINK).max(MIN_FONT);
        };

        match slot {
            Some((x, y, w, h)) => {
                grid.occupy(x, y, w, h);
                ceiling = font_size;
                placed.push(PlacedWord {
                    word: word.clone(),
                    x,
                    y,
                    font_size,
                    width: w,
                    height: h,
                });
            }
            None => {
                dropped += 1;
                debug!(word = %word, count, "no room left for word in cloud");
            }
        }
    }
    if dropped > 0 {
        debug!(placed = placed.len(), dropped, "word cloud dropped words");
    }
    placed
}

/// Grammatical category of a single word, for coloring.
pub fn word_category(word: &str) -> Option<GrammarCategory> {
    pos_tag(&[word.to_string()])
        .first()
        .and_then(|(_, tag)| GrammarCategory::from_tag(tag))
}

/// Render the word cloud as a PNG.
pub fn render(path: &Path, frequencies: &[(String, usize)]) -> Result<(), VisualizeError> {
    let words = layout(frequencies, WIDTH, HEIGHT, MAX_WORDS);

    let root = BitMapBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&BACKGROUND)?;
    for placed in &words {
        let color = grammar_color(word_category(&placed.word));
        let style = ("sans-serif", placed.font_size).into_font().color(&color);
        root.draw(&Text::new(placed.word.clone(), (placed.x, placed.y), style))?;
    }
    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn freqs(pairs: &[(&str, usize)]) -> Vec<(String, usize)> {
        pairs.iter().map(|(w, c)| (w.to_string(), *c)).collect()
    }

    #[test]
    fn words_do_not_overlap_and_stay_on_canvas() {
        let frequencies: Vec<(String, usize)> = (0..60)
            .map(|i| (format!("word{}", i), 60 - i))
            .collect();
        let placed = layout(&frequencies, WIDTH, HEIGHT, MAX_WORDS);

        assert!(!placed.is_empty());
        for (i, a) in placed.iter().enumerate() {
            assert!(a.x >= 0 && a.y >= 0);
            assert!(a.x + a.width <= WIDTH as i32);
            assert!(a.y + a.height <= HEIGHT as i32);
            for b in &placed[i + 1..] {
                assert!(!a.overlaps(b), "{} overlaps {}", a.word, b.word);
            }
        }
    }

    #[test]
    fn most_frequent_word_is_largest_and_centred() {
        let placed = layout(&freqs(&[("election", 10), ("vote", 3), ("poll", 1)]), WIDTH, HEIGHT, MAX_WORDS);
        assert_eq!(placed[0].word, "election");
        assert!(placed[0].font_size > placed[1].font_size);
        assert!(placed[1].font_size > placed[2].font_size);

        let centre_x = placed[0].x + placed[0].width / 2;
        assert!((centre_x - WIDTH as i32 / 2).abs() <= CELL as i32);
    }

    #[test]
    fn zipf_vocabulary_mostly_fits() {
        let frequencies: Vec<(String, usize)> = (0..300)
            .map(|i| (format!("term{}", i), (600 / (i + 1)).max(1)))
            .collect();
        let placed = layout(&frequencies, WIDTH, HEIGHT, MAX_WORDS);

        assert!(placed.len() >= 270, "placed {} of 300", placed.len());
        assert!(placed.iter().any(|p| p.font_size <= 10.0));
        for (i, a) in placed.iter().enumerate() {
            for b in &placed[i + 1..] {
                assert!(!a.overlaps(b), "{} overlaps {}", a.word, b.word);
            }
        }
    }

    #[test]
    fn equal_counts_shrink_instead_of_dropping() {
        let frequencies: Vec<(String, usize)> =
            (0..MAX_WORDS).map(|i| (format!("word{}", i), 1)).collect();
        let placed = layout(&frequencies, WIDTH, HEIGHT, MAX_WORDS);

        assert!(placed.len() >= MAX_WORDS * 9 / 10, "placed {}", placed.len());
        assert!(placed.windows(2).all(|p| p[0].font_size >= p[1].font_size));
    }

    #[test]
    fn max_words_is_respected() {
        let frequencies: Vec<(String, usize)> = (0..20).map(|i| (format!("w{}", i), 1)).collect();
        assert_eq!(layout(&frequencies, WIDTH, HEIGHT, 5).len(), 5);
        assert!(layout(&[], WIDTH, HEIGHT, 5).is_empty());
    }

    #[test]
    fn oversized_words_are_dropped() {
        let long = "x".repeat(200);
        let placed = layout(&freqs(&[(&long, 1)]), 100, 50, MAX_WORDS);
        assert!(placed.is_empty());
    }

    #[test]
    fn categories_color_words() {
        assert_eq!(word_category("they"), Some(GrammarCategory::Pronoun));
        assert_eq!(word_category("quickly"), Some(GrammarCategory::Adverb));
    }
}
