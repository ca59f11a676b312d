//! SVG charts over analyzed headlines

use super::palette::{categorical, normalize, viridis};
use super::VisualizeError;
use crate::model::AnalyzedArticle;
use plotters::prelude::*;
use std::f64::consts::PI;
use std::path::Path;

pub const CHART_SIZE: (u32, u32) = (1200, 800);
pub const PIE_WORDS: usize = 20;

const POSITIVE: RGBColor = RGBColor(0x14, 0x34, 0x64);
const NEGATIVE: RGBColor = RGBColor(0x34, 0x14, 0x64);
const COMPOUND: RGBColor = RGBColor(0x46, 0x41, 0x34);
const SERIES_ALPHA: f64 = 0.6;

/// One pie wedge, angles in radians clockwise from 12 o'clock.
#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub word: String,
    pub count: usize,
    pub start: f64,
    pub end: f64,
}

/// Wedges for the `top` most frequent words.
pub fn pie_slices(frequencies: &[(String, usize)], top: usize) -> Vec<Slice> {
    let shown = &frequencies[..frequencies.len().min(top)];
    let total: usize = shown.iter().map(|(_, c)| *c).sum();
    if total == 0 {
        return Vec::new();
    }
    let mut start = 0.0;
    shown
        .iter()
        .map(|(word, count)| {
            let end = start + 2.0 * PI * *count as f64 / total as f64;
            let slice = Slice {
                word: word.clone(),
                count: *count,
                start,
                end,
            };
            start = end;
            slice
        })
        .collect()
}

/// Marker radius in pixels for a word count.
pub fn marker_size(wordcount: u64) -> i32 {
    i32::try_from(wordcount)
        .unwrap_or(i32::MAX)
        .saturating_mul(2)
        .saturating_add(3)
        .clamp(3, 30)
}

fn wedge_points(center: (i32, i32), radius: f64, slice: &Slice) -> Vec<(i32, i32)> {
    let steps = ((slice.end - slice.start) / (PI / 90.0)).ceil().max(1.0) as usize;
    let mut points = vec![center];
    for i in 0..=steps {
        let angle = slice.start + (slice.end - slice.start) * i as f64 / steps as f64;
        points.push((
            center.0 + (radius * angle.sin()).round() as i32,
            center.1 - (radius * angle.cos()).round() as i32,
        ));
    }
    points
}

/// Pie chart of the most frequent words.
pub fn word_count_pie(path: &Path, frequencies: &[(String, usize)]) -> Result<(), VisualizeError> {
    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled("Word Frequency", ("sans-serif", 30))?;

    let (width, height) = root.dim_in_pixel();
    let radius = (height.min(width) as f64 / 2.0) * 0.85;
    let center = ((height / 2) as i32 + 20, (height / 2) as i32);

    for (i, slice) in pie_slices(frequencies, PIE_WORDS).iter().enumerate() {
        let color = categorical(i);
        root.draw(&Polygon::new(wedge_points(center, radius, slice), color.filled()))?;

        let legend_x = center.0 + radius as i32 + 60;
        let legend_y = 20 + i as i32 * 24;
        root.draw(&Rectangle::new(
            [(legend_x, legend_y), (legend_x + 16, legend_y + 16)],
            color.filled(),
        ))?;
        root.draw(&Text::new(
            format!("{} ({})", slice.word, slice.count),
            (legend_x + 24, legend_y),
            ("sans-serif", 16),
        ))?;
    }
    root.present()?;
    Ok(())
}

/// Positivity vs. negativity, sized by word count, colored by compound.
pub fn scatter_sentiment(path: &Path, rows: &[AnalyzedArticle]) -> Result<(), VisualizeError> {
    let compounds = rows.iter().map(|r| r.headline.sentiment.compound);
    let low = compounds.clone().fold(f64::INFINITY, f64::min);
    let high = compounds.fold(f64::NEG_INFINITY, f64::max);

    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption("Word Counts", ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(-0.05f64..1.05f64, -0.05f64..1.05f64)?;
    chart
        .configure_mesh()
        .x_desc("Positivity")
        .y_desc("Negativity")
        .draw()?;

    chart.draw_series(rows.iter().map(|row| {
        let s = row.headline.sentiment;
        let color = viridis(normalize(s.compound, low, high));
        Circle::new(
            (s.positive, s.negative),
            marker_size(row.headline.wordcount),
            color.mix(0.8).filled(),
        )
    }))?;
    root.present()?;
    Ok(())
}

/// Neutral score against positive, negative and compound, one series each.
pub fn scatter(path: &Path, rows: &[AnalyzedArticle]) -> Result<(), VisualizeError> {
    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption("Sentiment Analysis", ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(-0.05f64..1.05f64, -1.05f64..1.05f64)?;
    chart
        .configure_mesh()
        .x_desc("Neutral")
        .y_desc("Pos/Neg/Compound")
        .draw()?;

    type Pick = fn(&AnalyzedArticle) -> f64;
    let series: [(&str, RGBColor, Pick); 3] = [
        ("Positive", POSITIVE, |r| r.headline.sentiment.positive),
        ("Negative", NEGATIVE, |r| r.headline.sentiment.negative),
        ("Compound", COMPOUND, |r| r.headline.sentiment.compound),
    ];
    for (label, color, pick) in series {
        let style = color.mix(SERIES_ALPHA).filled();
        chart
            .draw_series(rows.iter().map(|row| {
                Circle::new(
                    (row.headline.sentiment.neutral, pick(row)),
                    marker_size(row.headline.wordcount),
                    style,
                )
            }))?
            .label(label)
            .legend(move |(x, y)| Circle::new((x, y), 5, style));
    }
    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;
    root.present()?;
    Ok(())
}

/// Word count against compound score.
pub fn sentiment_scatter(path: &Path, rows: &[AnalyzedArticle]) -> Result<(), VisualizeError> {
    let max_words = rows.iter().map(|r| r.headline.wordcount).max().unwrap_or(0) as f64;

    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption("Sentiment by Word Count", ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..(max_words + 1.0), -1.05f64..1.05f64)?;
    chart
        .configure_mesh()
        .x_desc("Word Count")
        .y_desc("Sentiment Score")
        .draw()?;

    chart.draw_series(rows.iter().map(|row| {
        Circle::new(
            (row.headline.wordcount as f64, row.headline.sentiment.compound),
            5,
            BLUE.filled(),
        )
    }))?;
    root.present()?;
    Ok(())
}

fn short_label(text: &str) -> String {
    const MAX: usize = 24;
    if text.chars().count() <= MAX {
        text.to_string()
    } else {
        let cut: String = text.chars().take(MAX - 3).collect();
        format!("{}...", cut)
    }
}

/// Per-headline sentiment: whisker from negative to positive, bars from
/// compound to neutral and neutral to negative, a point per score.
pub fn boxplot(path: &Path, rows: &[AnalyzedArticle]) -> Result<(), VisualizeError> {
    let count = rows.len().max(1);
    let labels: Vec<String> = rows.iter().map(|r| short_label(&r.article.headline)).collect();
    let label_for = |x: &f64| {
        let index = x.round();
        if (x - index).abs() < 1e-6 && index >= 0.0 {
            labels.get(index as usize).cloned().unwrap_or_default()
        } else {
            String::new()
        }
    };

    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption("Boxplot for Sentiment Analysis of Article titles", ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(120)
        .y_label_area_size(60)
        .build_cartesian_2d(-0.5f64..(count as f64 - 0.5), -1.05f64..1.05f64)?;
    chart
        .configure_mesh()
        .x_labels(count)
        .x_label_formatter(&label_for)
        .x_label_style(("sans-serif", 12).into_font().transform(FontTransform::Rotate90))
        .y_desc("Score")
        .draw()?;

    let half = 0.2;
    for (i, row) in rows.iter().enumerate() {
        let x = i as f64;
        let s = row.headline.sentiment;

        chart.draw_series(std::iter::once(PathElement::new(
            vec![(x, s.negative), (x, s.positive)],
            BLACK,
        )))?;
        chart.draw_series([s.negative, s.positive].into_iter().map(|y| {
            PathElement::new(vec![(x - half / 2.0, y), (x + half / 2.0, y)], BLACK)
        }))?;
        chart.draw_series([
            Rectangle::new([(x - half, s.compound), (x + half, s.neutral)], BLUE.mix(0.5).filled()),
            Rectangle::new([(x - half, s.neutral), (x + half, s.negative)], GREEN.mix(0.5).filled()),
        ])?;
    }

    type Pick = fn(&AnalyzedArticle) -> f64;
    let points: [(&str, RGBColor, Pick); 4] = [
        ("Compound", BLUE, |r| r.headline.sentiment.compound),
        ("Positive", GREEN, |r| r.headline.sentiment.positive),
        ("Negative", RED, |r| r.headline.sentiment.negative),
        ("Neutral", RGBColor(128, 128, 128), |r| r.headline.sentiment.neutral),
    ];
    for (label, color, pick) in points {
        chart
            .draw_series(
                rows.iter()
                    .enumerate()
                    .map(|(i, row)| Circle::new((i as f64, pick(row)), 5, color.filled())),
            )?
            .label(label)
            .legend(move |(x, y)| Circle::new((x, y), 5, color.filled()));
    }
    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;
    root.present()?;
    Ok(())
}
