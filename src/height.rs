use crate::measure::DEFAULT_FONT_SIZE_PX;
use crate::model::{Line, Run};

pub const LINE_HEIGHT_FACTOR: f32 = 1.2;

/// Line height from the largest font size on the line.
pub fn estimate_line_height(runs: &[Run], line: &Line) -> f32 {
    let last_run = if line.to_char == 0 && line.to_run > line.from_run {
        line.to_run - 1
    } else {
        line.to_run
    };
    let max_size = runs
        .iter()
        .enumerate()
        .skip(line.from_run)
        .take_while(|(i, _)| *i <= last_run)
        .filter_map(|(_, run)| run.as_text())
        .map(|text| text.font_size)
        .filter(|size| size.is_finite() && *size > 0.0)
        .reduce(f32::max);
    max_size.unwrap_or(DEFAULT_FONT_SIZE_PX) * LINE_HEIGHT_FACTOR
}
