use smallvec::SmallVec;

pub const AXIS_VALUE_TARGET_SPACING_PX: f64 = 80.0;
pub const AXIS_VALUE_MIN_TICKS: usize = 2;
pub const AXIS_VALUE_MAX_TICKS: usize = 10;

pub type AxisTickValues = SmallVec<[f64; 12]>;

pub fn axis_tick_target_count(
    axis_span_px: f64,
    target_spacing_px: f64,
    min_ticks: usize,
    max_ticks: usize,
) -> usize {
    if !axis_span_px.is_finite() || axis_span_px <= 0.0 {
        return min_ticks;
    }
    if !target_spacing_px.is_finite() || target_spacing_px <= 0.0 {
        return min_ticks;
    }

    let raw = (axis_span_px / target_spacing_px).floor() as usize + 1;
    raw.clamp(min_ticks, max_ticks)
}

/// Smallest 1/2/5 x 10^k step that yields at most `tick_count` intervals.
pub fn nice_tick_step(span: f64, tick_count: usize) -> f64 {
    if !span.is_finite() || span <= 0.0 || tick_count == 0 {
        return 0.0;
    }
    let raw_step = span / tick_count as f64;
    let magnitude = 10_f64.powf(raw_step.log10().floor());
    let normalized = raw_step / magnitude;
    let nice = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Tick values across `[domain.0, domain.1]` on a nice step, both ends inclusive.
pub fn value_axis_ticks(domain: (f64, f64), tick_count: usize) -> AxisTickValues {
    let mut ticks = AxisTickValues::new();
    let (start, end) = domain;
    let step = nice_tick_step(end - start, tick_count);
    if !step.is_finite() || step <= 0.0 {
        return ticks;
    }

    let first = (start / step).ceil();
    let last = (end / step).floor();
    let mut index = first;
    while index <= last {
        // Multiply rather than accumulate so float error does not drift.
        let value = index * step;
        ticks.push(if value == 0.0 { 0.0 } else { value });
        index += 1.0;
    }
    ticks
}
