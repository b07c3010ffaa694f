use crate::measure::{DEFAULT_FONT_SIZE_PX, TextMeasurer, sanitize_width};
use crate::model::{
    MarkerConfig, MarkerMeasure, ParagraphIndent, TextRun, TextTransform, WordLayoutConfig,
};

/// Space between a list marker and the text when the numbering gives none.
pub const DEFAULT_MARKER_GUTTER_PX: f32 = 8.0;
const DEFAULT_MARKER_FONT: &str = "Arial";

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ResolvedIndent {
    pub left: f32,
    pub right: f32,
    pub first_line: f32,
    pub hanging: f32,
    /// The raw left or right indent was negative before clamping.
    pub has_negative: bool,
}

fn finite_or_zero(v: f32) -> f32 {
    if v.is_finite() { v } else { 0.0 }
}

impl ResolvedIndent {
    pub fn from_indent(indent: Option<&ParagraphIndent>) -> Self {
        let Some(indent) = indent else {
            return Self::default();
        };
        let left = finite_or_zero(indent.left);
        let right = finite_or_zero(indent.right);
        let resolved = Self {
            left: left.max(0.0),
            right: right.max(0.0),
            first_line: finite_or_zero(indent.first_line).max(0.0),
            hanging: finite_or_zero(indent.hanging).max(0.0),
            has_negative: left < 0.0 || right < 0.0,
        };
        if resolved.left != indent.left
            || resolved.right != indent.right
            || resolved.first_line != indent.first_line
            || resolved.hanging != indent.hanging
        {
            log::debug!("Sanitized paragraph indent {indent:?} to {resolved:?}");
        }
        resolved
    }
}

pub trait ListMarkerGeometryResolver {
    fn resolve_text_start(
        &self,
        config: &WordLayoutConfig,
        indent_left: f32,
        indent_first_line: f32,
        indent_hanging: f32,
        measure_marker_text: &dyn Fn(&str) -> f32,
    ) -> Option<f32>;
}

/// Word's list geometry.
#[derive(Clone, Copy, Debug, Default)]
pub struct WordMarkerGeometry;

impl ListMarkerGeometryResolver for WordMarkerGeometry {
    fn resolve_text_start(
        &self,
        config: &WordLayoutConfig,
        indent_left: f32,
        indent_first_line: f32,
        indent_hanging: f32,
        measure_marker_text: &dyn Fn(&str) -> f32,
    ) -> Option<f32> {
        if let Some(x) = config
            .marker
            .as_ref()
            .and_then(|m| m.text_start_x)
            .filter(|x| x.is_finite())
        {
            return Some(x);
        }
        if let Some(x) = config.text_start_px.filter(|x| x.is_finite()) {
            return Some(x);
        }
        let marker = config.marker.as_ref()?;
        if config.first_line_indent_mode != Some(true) {
            return None;
        }
        let marker_start = (indent_left + indent_first_line - indent_hanging).max(0.0);
        Some(marker_start + measure_marker_text(&marker.text) + marker_gutter(marker))
    }
}

fn marker_gutter(marker: &MarkerConfig) -> f32 {
    marker
        .gutter_width_px
        .filter(|g| g.is_finite() && *g >= 0.0)
        .unwrap_or(DEFAULT_MARKER_GUTTER_PX)
}

pub fn marker_text_run(marker: &MarkerConfig) -> TextRun {
    let style = marker.run.clone().unwrap_or_default();
    TextRun {
        text: marker.text.clone(),
        font_family: style
            .font_family
            .unwrap_or_else(|| DEFAULT_MARKER_FONT.to_string()),
        font_size: style
            .font_size
            .filter(|s| s.is_finite() && *s > 0.0)
            .unwrap_or(DEFAULT_FONT_SIZE_PX),
        bold: style.bold,
        italic: style.italic,
        text_transform: TextTransform::None,
    }
}

pub fn measure_marker_text(marker: &MarkerConfig, text: &str, measurer: &dyn TextMeasurer) -> f32 {
    let mut run = marker_text_run(marker);
    run.text = text.to_string();
    let len = run.text.chars().count();
    sanitize_width(measurer.measure_slice(&run, 0, len))
}

pub fn measure_marker(
    marker: &MarkerConfig,
    indent: &ResolvedIndent,
    measurer: &dyn TextMeasurer,
) -> MarkerMeasure {
    let marker_text_width = measure_marker_text(marker, &marker.text, measurer);
    let gutter_width = marker_gutter(marker);
    MarkerMeasure {
        marker_width: indent.hanging.max(marker_text_width + gutter_width),
        marker_text_width,
        indent_left: indent.left,
        gutter_width,
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineBox {
    pub max_width: f32,
    /// Paragraph-absolute x where the line's content begins.
    pub indent: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FirstLineGeometry {
    pub content_width: f32,
    pub first_line_width: f32,
    pub first_line_offset: f32,
    /// Paragraph-absolute x where the first line's content begins.
    pub first_line_indent: f32,
    pub indent_left: f32,
}

impl FirstLineGeometry {
    pub fn resolve(
        indent: &ResolvedIndent,
        max_width: f32,
        first_line_indent_override: Option<f32>,
        word_layout: Option<&WordLayoutConfig>,
        text_start_px: Option<f32>,
    ) -> Self {
        let base_offset =
            first_line_indent_override.unwrap_or(indent.first_line - indent.hanging);
        let has_marker = word_layout.is_some_and(|w| w.marker.is_some());
        // An outdent is only honored when no marker could be eating into it.
        let allow_negative = !has_marker && !indent.has_negative && base_offset < 0.0;
        let first_line_offset = if allow_negative { base_offset } else { base_offset.max(0.0) };

        let content_width = (max_width - indent.left - indent.right).max(1.0);
        let text_start = text_start_px.filter(|x| x.is_finite());

        // Word keeps the full width for plain first-line-indented paragraphs
        // that only carry a text start from the numbering definition.
        let treat_as_hanging = !has_marker
            && text_start.is_some()
            && indent.left == 0.0
            && indent.hanging == 0.0
            && indent.first_line > 0.0;

        let geometry = match text_start {
            Some(start) if start > indent.left && !treat_as_hanging => Self {
                content_width,
                first_line_width: (max_width - start - indent.right).max(1.0),
                first_line_offset: start - indent.left,
                first_line_indent: start,
                indent_left: indent.left,
            },
            _ => Self {
                content_width,
                first_line_width: (content_width - first_line_offset).max(1.0),
                first_line_offset,
                first_line_indent: indent.left + first_line_offset,
                indent_left: indent.left,
            },
        };
        log::trace!("First-line geometry for width {max_width}: {geometry:?}");
        geometry
    }

    pub fn line_box(&self, line_index: usize) -> LineBox {
        if line_index == 0 {
            LineBox {
                max_width: self.first_line_width,
                indent: self.first_line_indent,
            }
        } else {
            LineBox {
                max_width: self.content_width,
                indent: self.indent_left,
            }
        }
    }
}
