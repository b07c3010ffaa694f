#![allow(dead_code)]

use docxside_reflow::{Cursor, Line, ParagraphMeasure, Run, TextMeasurer, TextRun};

/// Every character is the same width, whatever the font.
pub struct FixedMeasurer(pub f32);

impl TextMeasurer for FixedMeasurer {
    fn measure_slice(&self, run: &TextRun, from_char: usize, to_char: usize) -> f32 {
        let len = run.text.chars().count();
        to_char.min(len).saturating_sub(from_char) as f32 * self.0
    }
}

pub fn text(s: &str) -> Run {
    Run::text(s, "Arial", 16.0)
}

pub fn sized(s: &str, font_size: f32) -> Run {
    Run::text(s, "Arial", font_size)
}

pub fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

#[track_caller]
pub fn assert_approx(actual: f32, expected: f32) {
    assert!(approx(actual, expected), "expected {expected}, got {actual}");
}

/// The characters a line covers, with tabs and breaks rendered as `\t` and `\n`.
pub fn line_text(runs: &[Run], line: &Line) -> String {
    let mut out = String::new();
    let start = line.start().normalized(runs);
    let end = line.end().normalized(runs);
    for (ri, run) in runs.iter().enumerate() {
        for ci in 0..run.unit_len() {
            let c = Cursor::new(ri, ci);
            if c < start || c >= end {
                continue;
            }
            match run {
                Run::Text(t) => out.extend(t.text.chars().nth(ci)),
                Run::Tab => out.push('\t'),
                Run::LineBreak | Run::Break { .. } => out.push('\n'),
                Run::Image { .. } => out.push('▣'),
                Run::FieldAnnotation => out.push('◆'),
            }
        }
    }
    out
}

pub fn texts(runs: &[Run], measure: &ParagraphMeasure) -> Vec<String> {
    measure.lines.iter().map(|l| line_text(runs, l)).collect()
}

/// Lines cover the whole run sequence in order, without gaps or overlaps.
#[track_caller]
pub fn assert_partition(runs: &[Run], lines: &[Line]) {
    assert!(!lines.is_empty(), "no lines");
    assert_eq!(lines[0].start(), Cursor::START);
    for pair in lines.windows(2) {
        assert_eq!(
            pair[0].end().normalized(runs),
            pair[1].start().normalized(runs),
            "gap or overlap between {:?} and {:?}",
            pair[0],
            pair[1]
        );
    }
    for line in lines {
        if !runs.is_empty() {
            assert!(
                line.start().normalized(runs) < line.end().normalized(runs),
                "empty line {line:?}"
            );
        }
    }
    if let Some(last) = lines.last() {
        assert_eq!(last.end().normalized(runs), Cursor::new(runs.len(), 0));
    }
}
