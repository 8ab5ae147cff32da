/// A contiguous above-threshold run `[start, end)` in an energy profile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Segment {
    pub start: usize,
    pub end: usize,
    pub size: usize,
}

impl Segment {
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            size: end.saturating_sub(start),
        }
    }
}

const THRESHOLD_MAX_FRACTION: f64 = 0.02;
const THRESHOLD_MEAN_FRACTION: f64 = 0.3;
const GAP_FRACTION: f64 = 0.005;
const MIN_SEGMENT_FRACTION: f64 = 0.03;

/// `min(2% of max, 30% of mean)` of the profile.
pub fn adaptive_threshold(profile: &[f64]) -> f64 {
    if profile.is_empty() {
        return 0.0;
    }
    let max = profile.iter().copied().fold(0.0, f64::max);
    let mean = profile.iter().sum::<f64>() / profile.len() as f64;
    (max * THRESHOLD_MAX_FRACTION).min(mean * THRESHOLD_MEAN_FRACTION)
}

/// Find content runs in `profile`.
///
/// Dips of up to `max(1, round(0.5% of len))` samples are bridged, and runs shorter than 3% of
/// the profile are dropped as noise. With `expected`, the result has exactly that many
/// segments: the largest ones when too many were found, a uniform partition when too few.
pub fn detect_segments(profile: &[f64], expected: Option<usize>) -> Vec<Segment> {
    let len = profile.len();
    if len == 0 {
        return Vec::new();
    }

    let threshold = adaptive_threshold(profile);
    let max_gap = ((len as f64 * GAP_FRACTION).round() as usize).max(1);
    let min_size = len as f64 * MIN_SEGMENT_FRACTION;

    let mut found = Vec::new();
    let mut run_start: Option<usize> = None;
    let mut last_above = 0usize;
    for (i, &value) in profile.iter().enumerate() {
        if value > threshold {
            if run_start.is_none() {
                run_start = Some(i);
            }
            last_above = i;
        } else if let Some(start) = run_start
            && i - last_above > max_gap
        {
            found.push(Segment::new(start, last_above + 1));
            run_start = None;
        }
    }
    if let Some(start) = run_start {
        found.push(Segment::new(start, last_above + 1));
    }
    found.retain(|s| s.size as f64 >= min_size);

    match expected {
        None => found,
        Some(n) => fit_to_expected(found, n, len),
    }
}

fn fit_to_expected(mut found: Vec<Segment>, expected: usize, len: usize) -> Vec<Segment> {
    if found.len() == expected {
        return found;
    }
    if found.len() < expected {
        tracing::debug!(
            found = found.len(),
            expected,
            "too few segments, using uniform partition"
        );
        return uniform_segments(len, expected);
    }

    // Stable sort keeps earlier segments first among equal sizes.
    found.sort_by(|a, b| b.size.cmp(&a.size));
    found.truncate(expected);
    found.sort_by_key(|s| s.start);
    found
}

/// Split `[0, len)` into `count` contiguous segments of (near) equal size.
pub fn uniform_segments(len: usize, count: usize) -> Vec<Segment> {
    (0..count)
        .map(|i| Segment::new(i * len / count, (i + 1) * len / count))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/analysis/segments.rs"]
mod tests;
