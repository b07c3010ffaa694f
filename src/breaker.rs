use crate::cursor::{Cursor, Unit, is_break_space};
use crate::geometry::LineBox;
use crate::layout::LayoutContext;
use crate::model::Line;
use crate::scanner::{group_start, is_aligned, scan_group};
use crate::tabs::next_stop;

pub(crate) const OVERFLOW_TOLERANCE_PX: f32 = 0.5;

#[derive(Clone, Copy, Debug)]
struct BreakOpportunity {
    at: Cursor,
    width: f32,
}

struct LineState {
    cursor: Cursor,
    width: f32,
    // hanging spaces at the end of `width`
    trailing_space: f32,
    last_break: Option<BreakOpportunity>,
    tab_cursor: usize,
}

impl LineState {
    fn content_width(&self) -> f32 {
        (self.width - self.trailing_space).max(0.0)
    }
}

pub(crate) fn break_lines(ctx: &LayoutContext) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut start = Cursor::START;
    while !ctx.seq.is_end(start) {
        let line_box = ctx.geometry.line_box(lines.len());
        let (line, next) = break_line(ctx, start, line_box);
        log::trace!(
            "Line {}: ({}, {})..({}, {}) width {:.2}/{:.2}",
            lines.len(),
            line.from_run,
            line.from_char,
            line.to_run,
            line.to_char,
            line.width,
            line.max_width
        );
        lines.push(line);
        start = next;
    }
    if lines.is_empty() {
        lines.push(Line {
            from_run: 0,
            from_char: 0,
            to_run: 0,
            to_char: 0,
            width: 0.0,
            line_height: 0.0,
            max_width: ctx.geometry.line_box(0).max_width,
            segments: None,
            leaders: None,
        });
    }
    lines
}

fn break_line(ctx: &LayoutContext, start: Cursor, line_box: LineBox) -> (Line, Cursor) {
    let seq = &ctx.seq;
    let limit = line_box.max_width - OVERFLOW_TOLERANCE_PX;
    let mut state = LineState {
        cursor: seq.settle(start),
        width: 0.0,
        trailing_space: 0.0,
        last_break: None,
        tab_cursor: 0,
    };

    let (end, width) = loop {
        let Some(unit) = seq.unit_at(state.cursor) else {
            break (state.cursor, state.content_width());
        };
        let after = seq.next(state.cursor);
        match unit {
            Unit::LineBreak { width } => break (after, state.content_width() + width),
            Unit::Tab => advance_tab(ctx, &mut state, line_box, after),
            Unit::Char { ch, .. } if is_break_space(ch) => {
                let w = unit.width(ctx.measurer);
                state.last_break = Some(BreakOpportunity {
                    at: after,
                    width: state.content_width(),
                });
                state.width += w;
                state.trailing_space += w;
                state.cursor = after;
            }
            Unit::Char { .. } | Unit::Inline { .. } => {
                let w = unit.width(ctx.measurer);
                if state.width + w > limit && state.width > 0.0 {
                    match state.last_break {
                        Some(op) => break (op.at, op.width),
                        None => break (state.cursor, state.content_width()),
                    }
                }
                state.width += w;
                state.trailing_space = 0.0;
                if let Unit::Char { ch: '-', .. } = unit {
                    state.last_break = Some(BreakOpportunity {
                        at: after,
                        width: state.width,
                    });
                }
                state.cursor = after;
            }
        }
    };

    let to = seq.line_end(start, end);
    let line = Line {
        from_run: start.run_index,
        from_char: start.char_index,
        to_run: to.run_index,
        to_char: to.char_index,
        width: width.max(0.0),
        line_height: 0.0,
        max_width: line_box.max_width,
        segments: None,
        leaders: None,
    };
    (line, end)
}

fn advance_tab(ctx: &LayoutContext, state: &mut LineState, line_box: LineBox, after_tab: Cursor) {
    let next = next_stop(
        line_box.indent + state.width,
        &ctx.tab_stops.stops,
        state.tab_cursor,
        ctx.tab_stops.default_interval_px,
    );
    state.tab_cursor = next.next_cursor;
    let target = next.target.min(line_box.max_width + line_box.indent) - line_box.indent;

    if let Some(stop) = next.stop
        && is_aligned(stop.alignment)
    {
        let group = scan_group(&ctx.seq, after_tab, ctx.measurer, ctx.decimal);
        if group.total_width > 0.0 {
            let group_x = group_start(stop.alignment, target, &group);
            let width = state.content_width().max(group_x + group.total_width);
            let resume = group.resume.unwrap_or(after_tab);
            log::trace!(
                "{:?} tab at {:.2}: group of {:.2} up to ({}, {}) placed at {:.2}",
                stop.alignment,
                target,
                group.total_width,
                group.end_run,
                group.end_char,
                group_x
            );
            state.width = width;
            state.trailing_space = 0.0;
            state.last_break = Some(BreakOpportunity { at: resume, width });
            state.cursor = resume;
            return;
        }
    }

    state.last_break = Some(BreakOpportunity {
        at: after_tab,
        width: state.content_width(),
    });
    // Hanging spaces already past the target stay hanging.
    if target > state.width {
        state.width = target;
        state.trailing_space = 0.0;
    }
    state.cursor = after_tab;
}
