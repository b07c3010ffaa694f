use crate::cursor::{Unit, is_break_space};
use crate::geometry::LineBox;
use crate::layout::LayoutContext;
use crate::model::{Leader, Line, LineSegment, TabLeader};
use crate::scanner::{group_start, is_aligned, scan_group_in_line};
use crate::tabs::next_stop;

/// Position the content of a line that contains tabs.
pub(crate) fn layout_line_tabs(ctx: &LayoutContext, line: &mut Line, line_box: LineBox) {
    let seq = &ctx.seq;
    let end = seq.settle(line.end());
    let mut c = seq.settle(line.start());

    let mut x: f32 = 0.0;
    let mut trailing_space: f32 = 0.0;
    let mut tab_cursor = 0;
    let mut saw_tab = false;
    let mut segments: Vec<LineSegment> = Vec::new();
    let mut leaders: Vec<Leader> = Vec::new();
    let mut open: Option<LineSegment> = None;

    while c < end {
        let Some(unit) = seq.unit_at(c) else { break };
        let after = seq.next(c);
        match unit {
            Unit::Tab => {
                segments.extend(open.take());
                saw_tab = true;

                let next = next_stop(
                    line_box.indent + x,
                    &ctx.tab_stops.stops,
                    tab_cursor,
                    ctx.tab_stops.default_interval_px,
                );
                tab_cursor = next.next_cursor;
                let target =
                    next.target.min(line_box.max_width + line_box.indent) - line_box.indent;

                let mut new_x = x.max(target);
                if let Some(stop) = next.stop
                    && is_aligned(stop.alignment)
                {
                    let group = scan_group_in_line(seq, after, end, ctx.measurer, ctx.decimal);
                    if group.total_width > 0.0 {
                        new_x = group_start(stop.alignment, target, &group);
                    }
                }
                if let Some(stop) = next.stop
                    && stop.leader != TabLeader::None
                {
                    leaders.push(Leader {
                        from: x,
                        to: new_x.max(x),
                        style: stop.leader,
                    });
                }
                if new_x > x {
                    trailing_space = 0.0;
                }
                x = new_x;
            }
            Unit::LineBreak { width } => {
                segments.extend(open.take());
                x += width;
                trailing_space = 0.0;
            }
            Unit::Char { .. } | Unit::Inline { .. } => {
                let w = unit.width(ctx.measurer);
                match open.as_mut() {
                    Some(seg) if seg.run_index == c.run_index && seg.to_char == c.char_index => {
                        seg.to_char += 1;
                        seg.width += w;
                    }
                    _ => {
                        segments.extend(open.take());
                        open = Some(LineSegment {
                            run_index: c.run_index,
                            from_char: c.char_index,
                            to_char: c.char_index + 1,
                            width: w,
                            x: Some(x),
                        });
                    }
                }
                x += w;
                trailing_space = match unit {
                    Unit::Char { ch, .. } if is_break_space(ch) => trailing_space + w,
                    _ => 0.0,
                };
            }
        }
        c = after;
    }
    segments.extend(open.take());

    if !saw_tab {
        return;
    }
    line.width = line.width.max(x - trailing_space);
    line.segments = Some(segments);
    line.leaders = if leaders.is_empty() { None } else { Some(leaders) };
}
