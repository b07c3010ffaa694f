use serde::{Deserialize, Serialize};

use crate::error::Error;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextTransform {
    #[default]
    None,
    Uppercase,
    Lowercase,
    Capitalize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRun {
    pub text: String,
    pub font_family: String,
    pub font_size: f32, // px
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub text_transform: TextTransform,
}

impl TextRun {
    pub fn new(text: impl Into<String>, font_family: impl Into<String>, font_size: f32) -> Self {
        Self {
            text: text.into(),
            font_family: font_family.into(),
            font_size,
            bold: false,
            italic: false,
            text_transform: TextTransform::None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BreakType {
    #[default]
    Line,
    Page,
    Column,
}

/// One unit of inline content. Runs are caller-owned and never modified by layout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Run {
    Text(TextRun),
    Tab,
    LineBreak,
    #[serde(rename_all = "camelCase")]
    Break {
        #[serde(default)]
        break_type: BreakType,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        width: Option<f32>,
    },
    Image {
        width: f32,
    },
    FieldAnnotation,
}

impl Run {
    pub fn text(text: impl Into<String>, font_family: impl Into<String>, font_size: f32) -> Self {
        Run::Text(TextRun::new(text, font_family, font_size))
    }

    pub fn as_text(&self) -> Option<&TextRun> {
        match self {
            Run::Text(run) => Some(run),
            _ => None,
        }
    }

    /// Number of cursor positions this run spans: one per character for text, one otherwise.
    pub fn unit_len(&self) -> usize {
        match self {
            Run::Text(run) => run.text.chars().count(),
            Run::Tab
            | Run::LineBreak
            | Run::Break { .. }
            | Run::Image { .. }
            | Run::FieldAnnotation => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParagraphIndent {
    pub left: f32,
    pub right: f32,
    pub first_line: f32,
    pub hanging: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TabAlignment {
    Start,
    End,
    Center,
    Decimal,
    /// Draws a vertical bar; never a tab target.
    Bar,
    /// Removes an inherited stop at this position.
    Clear,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TabLeader {
    #[default]
    None,
    Dot,
    Hyphen,
    Underscore,
    Heavy,
    MiddleDot,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabStopSpec {
    pub position_twips: f32,
    pub alignment: TabAlignment,
    #[serde(default)]
    pub leader: TabLeader,
}

impl TabStopSpec {
    pub fn new(position_twips: f32, alignment: TabAlignment) -> Self {
        Self { position_twips, alignment, leader: TabLeader::None }
    }

    pub fn with_leader(mut self, leader: TabLeader) -> Self {
        self.leader = leader;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabStopPx {
    pub pos: f32,
    pub alignment: TabAlignment,
    pub leader: TabLeader,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MarkerRun {
    pub font_family: Option<String>,
    pub font_size: Option<f32>,
    pub bold: bool,
    pub italic: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerConfig {
    pub text: String,
    #[serde(default)]
    pub text_start_x: Option<f32>,
    #[serde(default)]
    pub gutter_width_px: Option<f32>,
    #[serde(default)]
    pub run: Option<MarkerRun>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WordLayoutConfig {
    pub first_line_indent_mode: Option<bool>,
    pub text_start_px: Option<f32>,
    pub marker: Option<MarkerConfig>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParagraphAttrs {
    pub indent: Option<ParagraphIndent>,
    pub tabs: Vec<TabStopSpec>,
    pub tab_interval_twips: Option<f32>,
    pub decimal_separator: Option<String>,
    pub word_layout: Option<WordLayoutConfig>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphBlock {
    pub runs: Vec<Run>,
    #[serde(default)]
    pub attrs: ParagraphAttrs,
}

impl ParagraphBlock {
    pub fn new(runs: Vec<Run>) -> Self {
        Self { runs, attrs: ParagraphAttrs::default() }
    }

    pub fn from_json(json: &str) -> Result<Self, Error> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        match value.get("runs") {
            Some(serde_json::Value::Array(_)) => {}
            Some(other) => {
                return Err(Error::InvalidParagraph(format!(
                    "`runs` must be an array, got {other}"
                )));
            }
            None => return Err(Error::InvalidParagraph("missing `runs`".into())),
        }
        Ok(serde_json::from_value(value)?)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineSegment {
    pub run_index: usize,
    pub from_char: usize,
    pub to_char: usize,
    pub width: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leader {
    pub from: f32,
    pub to: f32,
    pub style: TabLeader,
}

/// A visual line: the half-open span `[from, to)` over the run/char cursor space.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    pub from_run: usize,
    pub from_char: usize,
    pub to_run: usize,
    pub to_char: usize,
    pub width: f32,
    pub line_height: f32,
    pub max_width: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segments: Option<Vec<LineSegment>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leaders: Option<Vec<Leader>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerMeasure {
    pub marker_width: f32,
    pub marker_text_width: f32,
    pub indent_left: f32,
    pub gutter_width: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphMeasure {
    pub lines: Vec<Line>,
    pub total_height: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker: Option<MarkerMeasure>,
}
