// src/render.rs
//! Terminal presentation of a processed batch: coloured words, a legend and a
//! bar-chart stand-in for the origin pie.
use crate::core::types::{OriginLabel, OriginStat, ProcessedWord, Resolution};
use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use std::io::{self, Write};

const CHART_WIDTH: usize = 40;

pub const PALETTE: [(OriginLabel, &str); 13] = [
    (OriginLabel::OldEnglish, "#8B4513"),
    (OriginLabel::Latin, "#DC143C"),
    (OriginLabel::French, "#4169E1"),
    (OriginLabel::OldNorse, "#228B22"),
    (OriginLabel::Germanic, "#FF8C00"),
    (OriginLabel::Greek, "#9932CC"),
    (OriginLabel::Celtic, "#2E8B57"),
    (OriginLabel::Sanskrit, "#B8860B"),
    (OriginLabel::Dutch, "#FF4500"),
    (OriginLabel::Italian, "#8B008B"),
    (OriginLabel::Spanish, "#FF69B4"),
    (OriginLabel::Arabic, "#556B2F"),
    (OriginLabel::Unknown, "#808080"),
];

pub fn hex_for(label: OriginLabel) -> &'static str {
    PALETTE
        .iter()
        .find(|(origin, _)| *origin == label)
        .map(|(_, hex)| *hex)
        .unwrap_or("#808080")
}

pub fn color_for(label: OriginLabel) -> Color {
    let hex = hex_for(label).trim_start_matches('#');
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).unwrap_or(0x80);
    Color::Rgb { r: channel(0), g: channel(2), b: channel(4) }
}

fn paint<W: Write>(out: &mut W, text: &str, label: OriginLabel) -> io::Result<()> {
    queue!(out, SetForegroundColor(color_for(label)), Print(text), ResetColor)
}

/// Each word in its origin colour. Compound words show both parts side by side.
pub fn write_colored_text<W: Write>(out: &mut W, results: &[ProcessedWord]) -> io::Result<()> {
    for (i, word) in results.iter().enumerate() {
        if i > 0 {
            queue!(out, Print(" "))?;
        }
        match &word.resolution {
            Resolution::Simple { origin } => paint(out, &word.word, *origin)?,
            Resolution::Compound(compound) => {
                for part in &compound.parts {
                    paint(out, &part.text, part.origin)?;
                }
            }
        }
    }
    queue!(out, Print("\n"))?;
    out.flush()
}

pub fn write_legend<W: Write>(out: &mut W, languages: &[OriginLabel]) -> io::Result<()> {
    for language in languages {
        paint(out, "■ ", *language)?;
        queue!(out, Print(language.as_str()), Print("\n"))?;
    }
    out.flush()
}

pub fn write_chart<W: Write>(out: &mut W, stats: &[OriginStat]) -> io::Result<()> {
    let name_width = stats
        .iter()
        .map(|stat| stat.origin.as_str().len())
        .max()
        .unwrap_or(0);
    for stat in stats {
        let filled = ((stat.angle / 360.0) * CHART_WIDTH as f64).round() as usize;
        queue!(out, Print(format!("{:<name_width$} ", stat.origin.as_str())))?;
        paint(out, &"█".repeat(filled.max(1)), stat.origin)?;
        queue!(
            out,
            Print(format!(" {} ({}%)\n", stat.count, stat.percentage))
        )?;
    }
    out.flush()
}
