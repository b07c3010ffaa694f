use crate::breaker::break_lines;
use crate::cursor::RunSeq;
use crate::error::Error;
use crate::geometry::{
    FirstLineGeometry, ListMarkerGeometryResolver, ResolvedIndent, WordMarkerGeometry,
    measure_marker, measure_marker_text,
};
use crate::height::estimate_line_height;
use crate::measure::TextMeasurer;
use crate::model::{MarkerConfig, ParagraphBlock, ParagraphMeasure};
use crate::scanner::decimal_separator;
use crate::tab_layout::layout_line_tabs;
use crate::tabs::{OoxmlTabStops, TabStopAlgorithm, TabStops, resolve_tab_stops};

pub(crate) struct LayoutContext<'a> {
    pub(crate) seq: RunSeq<'a>,
    pub(crate) measurer: &'a dyn TextMeasurer,
    pub(crate) tab_stops: &'a TabStops,
    pub(crate) decimal: char,
    pub(crate) geometry: &'a FirstLineGeometry,
}

pub struct ParagraphLayout<'a> {
    measurer: &'a dyn TextMeasurer,
    tab_algorithm: &'a dyn TabStopAlgorithm,
    marker_resolver: &'a dyn ListMarkerGeometryResolver,
}

impl<'a> ParagraphLayout<'a> {
    pub fn new(measurer: &'a dyn TextMeasurer) -> Self {
        Self {
            measurer,
            tab_algorithm: &OoxmlTabStops,
            marker_resolver: &WordMarkerGeometry,
        }
    }

    pub fn with_tab_algorithm(mut self, tab_algorithm: &'a dyn TabStopAlgorithm) -> Self {
        self.tab_algorithm = tab_algorithm;
        self
    }

    pub fn with_marker_resolver(
        mut self,
        marker_resolver: &'a dyn ListMarkerGeometryResolver,
    ) -> Self {
        self.marker_resolver = marker_resolver;
        self
    }

    /// Break `block` into lines no wider than `max_width` pixels.
    ///
    /// `first_line_indent_override` replaces the paragraph's
    /// `firstLine - hanging` offset when given.
    pub fn measure(
        &self,
        block: &ParagraphBlock,
        max_width: f32,
        first_line_indent_override: Option<f32>,
    ) -> Result<ParagraphMeasure, Error> {
        if !max_width.is_finite() || max_width <= 0.0 {
            return Err(Error::InvalidMaxWidth(max_width));
        }
        if let Some(v) = first_line_indent_override
            && !v.is_finite()
        {
            return Err(Error::InvalidFirstLineIndent(v));
        }

        let attrs = &block.attrs;
        let indent = ResolvedIndent::from_indent(attrs.indent.as_ref());
        let word_layout = attrs.word_layout.as_ref();
        let marker = word_layout.and_then(|w| w.marker.as_ref());

        let text_start = word_layout.and_then(|config| {
            let default_marker = MarkerConfig::default();
            let style = marker.unwrap_or(&default_marker);
            let measure_text = |text: &str| measure_marker_text(style, text, self.measurer);
            self.marker_resolver.resolve_text_start(
                config,
                indent.left,
                indent.first_line,
                indent.hanging,
                &measure_text,
            )
        });
        let geometry = FirstLineGeometry::resolve(
            &indent,
            max_width,
            first_line_indent_override,
            word_layout,
            text_start,
        );
        let tab_stops = resolve_tab_stops(
            &indent,
            &attrs.tabs,
            attrs.tab_interval_twips,
            self.tab_algorithm,
        )?;

        let ctx = LayoutContext {
            seq: RunSeq::new(&block.runs),
            measurer: self.measurer,
            tab_stops: &tab_stops,
            decimal: decimal_separator(attrs.decimal_separator.as_deref()),
            geometry: &geometry,
        };

        let mut lines = break_lines(&ctx);
        for (i, line) in lines.iter_mut().enumerate() {
            layout_line_tabs(&ctx, line, geometry.line_box(i));
            line.line_height = estimate_line_height(&block.runs, line);
        }
        let total_height = lines.iter().map(|line| line.line_height).sum();
        log::debug!(
            "Measured {} runs at width {max_width}: {} lines, height {total_height:.2}",
            block.runs.len(),
            lines.len()
        );

        Ok(ParagraphMeasure {
            lines,
            total_height,
            marker: marker.map(|m| measure_marker(m, &indent, self.measurer)),
        })
    }
}

pub fn measure_paragraph(
    block: &ParagraphBlock,
    max_width: f32,
    first_line_indent_override: Option<f32>,
    measurer: &dyn TextMeasurer,
) -> Result<ParagraphMeasure, Error> {
    ParagraphLayout::new(measurer).measure(block, max_width, first_line_indent_override)
}
