use crate::error::Error;
use crate::geometry::ResolvedIndent;
use crate::model::{TabAlignment, TabStopPx, TabStopSpec};

/// 1440 twips per inch at 96 px per inch.
pub const TWIPS_PER_PX: f32 = 15.0;
/// Word's default tab interval of half an inch.
pub const DEFAULT_TAB_INTERVAL_TWIPS: f32 = 720.0;
/// Stops this close to the pen are skipped, so measurement rounding never lands on them.
pub const TAB_EPSILON_PX: f32 = 0.1;

const MAX_DEFAULT_STOP_TWIPS: f32 = 22.0 * 1440.0;
const SAME_POSITION_TWIPS: f32 = 0.5;

pub fn px_to_twips(px: f32) -> f32 {
    px * TWIPS_PER_PX
}

pub fn twips_to_px(twips: f32) -> f32 {
    twips / TWIPS_PER_PX
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct IndentTwips {
    pub left: f32,
    pub right: f32,
    pub first_line: f32,
    pub hanging: f32,
}

impl From<&ResolvedIndent> for IndentTwips {
    fn from(indent: &ResolvedIndent) -> Self {
        Self {
            left: px_to_twips(indent.left),
            right: px_to_twips(indent.right),
            first_line: px_to_twips(indent.first_line),
            hanging: px_to_twips(indent.hanging),
        }
    }
}

/// Merges explicit stops, default stops and the paragraph indent into the
/// effective stop list. The result must be sorted strictly ascending.
pub trait TabStopAlgorithm {
    fn compute(
        &self,
        explicit: &[TabStopSpec],
        default_interval_twips: f32,
        indent: &IndentTwips,
    ) -> Vec<TabStopSpec>;
}

/// WordprocessingML tab semantics.
#[derive(Clone, Copy, Debug, Default)]
pub struct OoxmlTabStops;

fn same_position(a: f32, b: f32) -> bool {
    (a - b).abs() < SAME_POSITION_TWIPS
}

pub(crate) fn sanitize_interval_twips(interval: Option<f32>) -> f32 {
    match interval {
        Some(v) if v.is_finite() && v >= 1.0 => v,
        _ => DEFAULT_TAB_INTERVAL_TWIPS,
    }
}

impl TabStopAlgorithm for OoxmlTabStops {
    fn compute(
        &self,
        explicit: &[TabStopSpec],
        default_interval_twips: f32,
        indent: &IndentTwips,
    ) -> Vec<TabStopSpec> {
        let interval = sanitize_interval_twips(Some(default_interval_twips));
        let mut cleared: Vec<f32> = Vec::new();
        let mut stops: Vec<TabStopSpec> = Vec::new();

        for stop in explicit.iter().filter(|s| s.position_twips.is_finite()) {
            match stop.alignment {
                TabAlignment::Clear => cleared.push(stop.position_twips),
                TabAlignment::Bar => {}
                _ => {
                    stops.retain(|s| !same_position(s.position_twips, stop.position_twips));
                    stops.push(*stop);
                }
            }
        }

        if indent.hanging > 0.0
            && !stops
                .iter()
                .any(|s| same_position(s.position_twips, indent.left))
        {
            stops.push(TabStopSpec::new(indent.left, TabAlignment::Start));
        }

        stops.sort_by(|a, b| a.position_twips.total_cmp(&b.position_twips));

        let last = stops.last().map_or(0.0, |s| s.position_twips.max(0.0));
        let mut k = (last / interval).floor() + 1.0;
        loop {
            let pos = k * interval;
            if pos > MAX_DEFAULT_STOP_TWIPS {
                break;
            }
            if !cleared.iter().any(|&c| same_position(c, pos)) {
                stops.push(TabStopSpec::new(pos, TabAlignment::Start));
            }
            k += 1.0;
        }
        stops
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TabStops {
    pub stops: Vec<TabStopPx>,
    pub default_interval_px: f32,
}

/// Run `algorithm` on the paragraph's stops and convert the result to pixels.
pub fn resolve_tab_stops(
    indent: &ResolvedIndent,
    explicit: &[TabStopSpec],
    interval_twips: Option<f32>,
    algorithm: &dyn TabStopAlgorithm,
) -> Result<TabStops, Error> {
    let interval = sanitize_interval_twips(interval_twips);
    let specs = algorithm.compute(explicit, interval, &IndentTwips::from(indent));

    let mut stops: Vec<TabStopPx> = Vec::with_capacity(specs.len());
    for (index, spec) in specs.iter().enumerate() {
        let pos = twips_to_px(spec.position_twips);
        if !pos.is_finite() || stops.last().is_some_and(|prev| prev.pos >= pos) {
            return Err(Error::UnsortedTabStops { index, pos });
        }
        stops.push(TabStopPx {
            pos,
            alignment: spec.alignment,
            leader: spec.leader,
        });
    }
    log::trace!("Resolved {} tab stops", stops.len());

    Ok(TabStops {
        stops,
        default_interval_px: twips_to_px(interval),
    })
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NextTabStop {
    pub target: f32,
    pub next_cursor: usize,
    pub stop: Option<TabStopPx>,
}

/// Find the first stop strictly right of `current_x`, searching from `cursor`.
///
/// Past the last stop the target is `current_x + default_interval_px` and no
/// stop is returned. The returned cursor is never less than `cursor`.
pub fn next_stop(
    current_x: f32,
    stops: &[TabStopPx],
    cursor: usize,
    default_interval_px: f32,
) -> NextTabStop {
    let mut i = cursor;
    while i < stops.len() && stops[i].pos <= current_x + TAB_EPSILON_PX {
        i += 1;
    }
    match stops.get(i) {
        Some(stop) => NextTabStop {
            target: stop.pos,
            next_cursor: i + 1,
            stop: Some(*stop),
        },
        None => NextTabStop {
            target: current_x + default_interval_px,
            next_cursor: i.max(cursor),
            stop: None,
        },
    }
}
