use crate::measure::{TextMeasurer, sanitize_width};
use crate::model::{Line, Run, TextRun};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cursor {
    pub run_index: usize,
    pub char_index: usize,
}

impl Cursor {
    pub const START: Cursor = Cursor { run_index: 0, char_index: 0 };

    pub fn new(run_index: usize, char_index: usize) -> Self {
        Self { run_index, char_index }
    }

    pub fn normalized(self, runs: &[Run]) -> Cursor {
        let mut c = self;
        while c.run_index < runs.len() && c.char_index >= runs[c.run_index].unit_len() {
            c = Cursor::new(c.run_index + 1, 0);
        }
        if c.run_index >= runs.len() {
            c = Cursor::new(runs.len(), 0);
        }
        c
    }
}

impl Line {
    pub fn start(&self) -> Cursor {
        Cursor::new(self.from_run, self.from_char)
    }

    pub fn end(&self) -> Cursor {
        Cursor::new(self.to_run, self.to_char)
    }
}

/// Spaces are break opportunities and hang past the line end. No-break spaces are not.
pub(crate) fn is_break_space(ch: char) -> bool {
    ch.is_whitespace() && !matches!(ch, '\u{00A0}' | '\u{2007}' | '\u{202F}')
}

#[derive(Clone, Copy, Debug)]
pub(crate) enum Unit<'a> {
    Char {
        run: &'a TextRun,
        char_index: usize,
        ch: char,
        prev: Option<char>,
    },
    Tab,
    LineBreak { width: f32 },
    Inline { width: f32 },
}

impl Unit<'_> {
    pub(crate) fn width(&self, measurer: &dyn TextMeasurer) -> f32 {
        match *self {
            Unit::Char { run, char_index, ch, prev } => {
                sanitize_width(measurer.measure_char(run, char_index, ch, prev))
            }
            Unit::Tab => 0.0,
            Unit::LineBreak { width } | Unit::Inline { width } => width,
        }
    }
}

pub(crate) struct RunSeq<'a> {
    runs: &'a [Run],
    chars: Vec<Vec<char>>,
}

impl<'a> RunSeq<'a> {
    pub(crate) fn new(runs: &'a [Run]) -> Self {
        let chars = runs
            .iter()
            .map(|run| match run {
                Run::Text(t) => t.text.chars().collect(),
                _ => Vec::new(),
            })
            .collect();
        Self { runs, chars }
    }

    pub(crate) fn unit_len(&self, run_index: usize) -> usize {
        match self.runs.get(run_index) {
            Some(Run::Text(_)) => self.chars[run_index].len(),
            Some(_) => 1,
            None => 0,
        }
    }

    pub(crate) fn end(&self) -> Cursor {
        Cursor::new(self.runs.len(), 0)
    }

    pub(crate) fn settle(&self, cursor: Cursor) -> Cursor {
        let mut c = cursor;
        while c.run_index < self.runs.len() && c.char_index >= self.unit_len(c.run_index) {
            c = Cursor::new(c.run_index + 1, 0);
        }
        if c.run_index >= self.runs.len() {
            c = self.end();
        }
        c
    }

    pub(crate) fn is_end(&self, cursor: Cursor) -> bool {
        self.settle(cursor).run_index >= self.runs.len()
    }

    pub(crate) fn next(&self, cursor: Cursor) -> Cursor {
        let c = self.settle(cursor);
        self.settle(Cursor::new(c.run_index, c.char_index + 1))
    }

    pub(crate) fn unit_at(&self, cursor: Cursor) -> Option<Unit<'a>> {
        let c = self.settle(cursor);
        let run = self.runs.get(c.run_index)?;
        let unit = match run {
            Run::Text(text) => {
                let chars = &self.chars[c.run_index];
                match chars[c.char_index] {
                    '\n' => Unit::LineBreak { width: 0.0 },
                    '\t' => Unit::Tab,
                    ch => Unit::Char {
                        run: text,
                        char_index: c.char_index,
                        ch,
                        prev: c.char_index.checked_sub(1).map(|i| chars[i]),
                    },
                }
            }
            Run::Tab => Unit::Tab,
            Run::LineBreak => Unit::LineBreak { width: 0.0 },
            Run::Break { width, .. } => Unit::LineBreak {
                width: width.map(sanitize_width).unwrap_or(0.0),
            },
            Run::Image { width } => Unit::Inline { width: sanitize_width(*width) },
            Run::FieldAnnotation => Unit::Inline { width: 0.0 },
        };
        Some(unit)
    }

    /// Report a line end as `(run, len)` rather than `(run + 1, 0)` when it falls on a run boundary.
    pub(crate) fn line_end(&self, from: Cursor, to: Cursor) -> Cursor {
        if to.char_index == 0 && to.run_index > from.run_index {
            let prev = to.run_index - 1;
            Cursor::new(prev, self.unit_len(prev))
        } else {
            to
        }
    }
}
