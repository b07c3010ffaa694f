mod breaker;
mod cursor;
mod error;
mod fonts;
mod geometry;
mod height;
mod layout;
mod measure;
mod model;
mod scanner;
mod tab_layout;
mod tabs;

pub use cursor::Cursor;
pub use error::Error;
pub use fonts::FontMeasurer;
pub use geometry::{
    DEFAULT_MARKER_GUTTER_PX, FirstLineGeometry, LineBox, ListMarkerGeometryResolver,
    ResolvedIndent, WordMarkerGeometry, marker_text_run, measure_marker,
};
pub use height::{LINE_HEIGHT_FACTOR, estimate_line_height};
pub use layout::{ParagraphLayout, measure_paragraph};
pub use measure::{
    DEFAULT_FONT_SIZE_PX, FALLBACK_CHAR_WIDTH_RATIO, FallbackMeasurer, TextMeasurer,
    transformed_slice,
};
pub use model::{
    BreakType, Leader, Line, LineSegment, MarkerConfig, MarkerMeasure, MarkerRun, ParagraphAttrs,
    ParagraphBlock, ParagraphIndent, ParagraphMeasure, Run, TabAlignment, TabLeader, TabStopPx,
    TabStopSpec, TextRun, TextTransform, WordLayoutConfig,
};
pub use tabs::{
    DEFAULT_TAB_INTERVAL_TWIPS, IndentTwips, NextTabStop, OoxmlTabStops, TAB_EPSILON_PX,
    TWIPS_PER_PX, TabStopAlgorithm, TabStops, next_stop, px_to_twips, resolve_tab_stops,
    twips_to_px,
};

use std::path::Path;

/// Settings for laying out a paragraph read from disk.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReflowOptions {
    pub max_width: f32,
    pub first_line_indent: Option<f32>,
    /// Measure with installed fonts instead of the fixed-ratio fallback.
    pub font_metrics: bool,
}

/// Read a JSON paragraph block from `input` and lay it out.
pub fn reflow_paragraph_file(
    input: &Path,
    options: &ReflowOptions,
) -> Result<ParagraphMeasure, Error> {
    let json = std::fs::read_to_string(input)?;
    let block = ParagraphBlock::from_json(&json)?;
    if options.font_metrics {
        let measurer = FontMeasurer::new();
        measure_paragraph(&block, options.max_width, options.first_line_indent, &measurer)
    } else {
        measure_paragraph(
            &block,
            options.max_width,
            options.first_line_indent,
            &FallbackMeasurer,
        )
    }
}
