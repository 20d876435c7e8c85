//! Fixed-width ASCII usage gauge.

/// Number of segments in a gauge; each one stands for 5%.
pub const GAUGE_SEGMENTS: usize = 20;

const PERCENT_PER_SEGMENT: i64 = 5;

/// Filled segments for `percent`, rounded to the nearest whole percent.
pub fn filled_segments(percent: f64) -> usize {
    if !percent.is_finite() {
        return 0;
    }
    let whole = percent.round() as i64;
    (whole / PERCENT_PER_SEGMENT).clamp(0, GAUGE_SEGMENTS as i64) as usize
}

/// Renders `percent` as `#` for filled segments and `-` for the rest.
pub fn gauge(percent: f64) -> String {
    let filled = filled_segments(percent);
    let mut bar = "#".repeat(filled);
    bar.push_str(&"-".repeat(GAUGE_SEGMENTS - filled));
    bar
}
