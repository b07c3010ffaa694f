use crate::cursor::{Cursor, RunSeq, Unit};
use crate::measure::TextMeasurer;
use crate::model::TabAlignment;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GroupMeasure {
    pub total_width: f32,
    /// Width before the first decimal separator, if the group contains one.
    pub before_decimal_width: Option<f32>,
    pub end_run: usize,
    pub end_char: usize,
    /// Where scanning stopped, normalized. Only set by the unbounded scan.
    pub resume: Option<Cursor>,
}

pub(crate) fn decimal_separator(attr: Option<&str>) -> char {
    match attr.map(str::trim) {
        Some(",") => ',',
        Some(".") | None => '.',
        Some(other) => {
            log::debug!("Unsupported decimal separator {other:?}, using '.'");
            '.'
        }
    }
}

fn scan(
    seq: &RunSeq,
    start: Cursor,
    limit: Cursor,
    measurer: &dyn TextMeasurer,
    decimal: char,
) -> (f32, Option<f32>, Cursor) {
    let mut total = 0.0;
    let mut before_decimal = None;
    let mut c = seq.settle(start);
    while c < limit {
        let Some(unit) = seq.unit_at(c) else { break };
        match unit {
            Unit::Tab | Unit::LineBreak { .. } => break,
            Unit::Char { ch, .. } => {
                if before_decimal.is_none() && ch == decimal {
                    before_decimal = Some(total);
                }
                total += unit.width(measurer);
            }
            Unit::Inline { width } => total += width,
        }
        c = seq.next(c);
    }
    (total, before_decimal, c)
}

/// Scan from `start` through the rest of the paragraph.
pub(crate) fn scan_group(
    seq: &RunSeq,
    start: Cursor,
    measurer: &dyn TextMeasurer,
    decimal: char,
) -> GroupMeasure {
    let (total_width, before_decimal_width, stop) =
        scan(seq, start, seq.end(), measurer, decimal);
    let end = seq.line_end(start, stop);
    GroupMeasure {
        total_width,
        before_decimal_width,
        end_run: end.run_index,
        end_char: end.char_index,
        resume: Some(stop),
    }
}

/// Scan from `start`, never past `line_end`.
pub(crate) fn scan_group_in_line(
    seq: &RunSeq,
    start: Cursor,
    line_end: Cursor,
    measurer: &dyn TextMeasurer,
    decimal: char,
) -> GroupMeasure {
    let limit = seq.settle(line_end);
    let (total_width, before_decimal_width, stop) = scan(seq, start, limit, measurer, decimal);
    let end = seq.line_end(start, stop);
    GroupMeasure {
        total_width,
        before_decimal_width,
        end_run: end.run_index,
        end_char: end.char_index,
        resume: None,
    }
}

pub(crate) fn group_start(alignment: TabAlignment, target: f32, group: &GroupMeasure) -> f32 {
    let width = group.total_width;
    match alignment {
        TabAlignment::End => (target - width).max(0.0),
        TabAlignment::Center => (target - width / 2.0).max(0.0),
        TabAlignment::Decimal => (target - group.before_decimal_width.unwrap_or(width)).max(0.0),
        TabAlignment::Start | TabAlignment::Bar | TabAlignment::Clear => target,
    }
}

pub(crate) fn is_aligned(alignment: TabAlignment) -> bool {
    matches!(
        alignment,
        TabAlignment::End | TabAlignment::Center | TabAlignment::Decimal
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::FallbackMeasurer;
    use crate::model::Run;

    fn runs() -> Vec<Run> {
        vec![
            Run::text("a", "Arial", 10.0),
            Run::Tab,
            Run::text("12", "Arial", 10.0),
            Run::text(".50", "Arial", 10.0),
            Run::Tab,
            Run::text("x", "Arial", 10.0),
        ]
    }

    #[test]
    fn group_stops_at_next_tab() {
        let runs = runs();
        let seq = RunSeq::new(&runs);
        let group = scan_group(&seq, Cursor::new(2, 0), &FallbackMeasurer, '.');
        assert!((group.total_width - 30.0).abs() < 1e-4);
        let before = group.before_decimal_width.unwrap_or_default();
        assert!((before - 12.0).abs() < 1e-4);
        assert_eq!((group.end_run, group.end_char), (3, 3));
        assert_eq!(group.resume, Some(Cursor::new(4, 0)));
    }

    #[test]
    fn comma_separator_is_not_found_in_dot_number() {
        let runs = runs();
        let seq = RunSeq::new(&runs);
        let group = scan_group(&seq, Cursor::new(2, 0), &FallbackMeasurer, ',');
        assert_eq!(group.before_decimal_width, None);
        let start = group_start(TabAlignment::Decimal, 100.0, &group);
        assert!((start - (100.0 - group.total_width)).abs() < 1e-4);
    }

    #[test]
    fn line_bounded_scan_stops_at_line_end() {
        let runs = runs();
        let seq = RunSeq::new(&runs);
        let group = scan_group_in_line(
            &seq,
            Cursor::new(2, 0),
            Cursor::new(3, 1),
            &FallbackMeasurer,
            '.',
        );
        assert!((group.total_width - 18.0).abs() < 1e-4);
        assert_eq!((group.end_run, group.end_char), (3, 1));
        assert_eq!(group.resume, None);
    }

    #[test]
    fn unknown_separator_falls_back_to_dot() {
        assert_eq!(decimal_separator(Some(";")), '.');
        assert_eq!(decimal_separator(Some(",")), ',');
        assert_eq!(decimal_separator(None), '.');
    }

    #[test]
    fn alignment_never_starts_left_of_line() {
        let group = GroupMeasure {
            total_width: 80.0,
            before_decimal_width: None,
            end_run: 0,
            end_char: 0,
            resume: None,
        };
        assert_eq!(group_start(TabAlignment::End, 50.0, &group), 0.0);
        assert_eq!(group_start(TabAlignment::Center, 50.0, &group), 10.0);
        assert_eq!(group_start(TabAlignment::Decimal, 100.0, &group), 20.0);
    }
}
