use crate::model::{TextRun, TextTransform};

pub const FALLBACK_CHAR_WIDTH_RATIO: f32 = 0.6;
pub const DEFAULT_FONT_SIZE_PX: f32 = 16.0;

/// Measures slices of a text run in layout pixels.
///
/// Implementations apply the run's text transform without touching the stored
/// text, and must return a finite, non-negative width for any input. Char
/// indices past the end of the run are clamped.
pub trait TextMeasurer {
    fn measure_slice(&self, run: &TextRun, from_char: usize, to_char: usize) -> f32;

    /// Width of `ch`, the character at `char_index` of `run`, with `prev` the
    /// character before it. Layout measures one character at a time through
    /// this, so implementations should not walk the run.
    fn measure_char(&self, run: &TextRun, char_index: usize, ch: char, prev: Option<char>) -> f32 {
        let _ = (ch, prev);
        self.measure_slice(run, char_index, char_index + 1)
    }
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for &T {
    fn measure_slice(&self, run: &TextRun, from_char: usize, to_char: usize) -> f32 {
        (**self).measure_slice(run, from_char, to_char)
    }

    fn measure_char(&self, run: &TextRun, char_index: usize, ch: char, prev: Option<char>) -> f32 {
        (**self).measure_char(run, char_index, ch, prev)
    }
}

/// Measurement without a font backend: every character is `0.6em` wide.
#[derive(Clone, Copy, Debug, Default)]
pub struct FallbackMeasurer;

impl TextMeasurer for FallbackMeasurer {
    fn measure_slice(&self, run: &TextRun, from_char: usize, to_char: usize) -> f32 {
        let count = transformed_slice(run, from_char, to_char).chars().count();
        count as f32 * font_size_px(run) * FALLBACK_CHAR_WIDTH_RATIO
    }

    fn measure_char(&self, run: &TextRun, _: usize, ch: char, prev: Option<char>) -> f32 {
        let mut count = 0;
        for_each_display_char(run.text_transform, ch, prev, |_| count += 1);
        count as f32 * font_size_px(run) * FALLBACK_CHAR_WIDTH_RATIO
    }
}

pub(crate) fn font_size_px(run: &TextRun) -> f32 {
    if run.font_size.is_finite() && run.font_size > 0.0 {
        run.font_size
    } else {
        DEFAULT_FONT_SIZE_PX
    }
}

pub(crate) fn sanitize_width(width: f32) -> f32 {
    if width.is_finite() && width > 0.0 { width } else { 0.0 }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '\'' || c == '\u{2019}'
}

pub(crate) fn for_each_display_char(
    transform: TextTransform,
    c: char,
    prev: Option<char>,
    mut f: impl FnMut(char),
) {
    match transform {
        TextTransform::None => f(c),
        TextTransform::Uppercase => c.to_uppercase().for_each(f),
        TextTransform::Lowercase => c.to_lowercase().for_each(f),
        TextTransform::Capitalize if prev.is_none_or(|p| !is_word_char(p)) => {
            c.to_uppercase().for_each(f)
        }
        TextTransform::Capitalize => f(c),
    }
}

/// The characters `from_char..to_char` of `run` as they are displayed.
///
/// Capitalization looks at the character preceding the slice, so a word split
/// across two slices is only capitalized once.
pub fn transformed_slice(run: &TextRun, from_char: usize, to_char: usize) -> String {
    let mut out = String::new();
    if to_char <= from_char {
        return out;
    }
    let skip = from_char.saturating_sub(1);
    let mut chars = run.text.chars().skip(skip);
    let mut prev = if from_char > 0 { chars.next() } else { None };
    for c in chars.take(to_char - from_char) {
        for_each_display_char(run.text_transform, c, prev, |d| out.push(d));
        prev = Some(c);
    }
    out
}
