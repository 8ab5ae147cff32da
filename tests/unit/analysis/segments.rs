use super::*;

fn profile(runs: &[(usize, f64)]) -> Vec<f64> {
    runs.iter()
        .flat_map(|&(n, v)| std::iter::repeat_n(v, n))
        .collect()
}

#[test]
fn threshold_is_min_of_max_and_mean_fractions() {
    assert_eq!(adaptive_threshold(&[]), 0.0);
    // max 100 -> 2.0, mean 25 -> 7.5
    assert_eq!(adaptive_threshold(&[100.0, 0.0, 0.0, 0.0]), 2.0);
    // max 10 -> 0.2, mean 0.25 -> 0.075
    let mut p = vec![0.0; 40];
    p[0] = 10.0;
    assert!((adaptive_threshold(&p) - 0.075).abs() < 1e-12);
}

#[test]
fn finds_runs_separated_by_gaps() {
    let p = profile(&[(40, 100.0), (10, 0.0), (50, 100.0)]);
    let segs = detect_segments(&p, None);
    assert_eq!(segs, vec![Segment::new(0, 40), Segment::new(50, 100)]);
    assert_eq!(segs[1].size, 50);
}

#[test]
fn single_sample_dip_does_not_split_a_run() {
    let p = profile(&[(30, 100.0), (1, 0.0), (30, 100.0), (20, 0.0)]);
    let segs = detect_segments(&p, None);
    assert_eq!(segs, vec![Segment::new(0, 61)]);
}

#[test]
fn short_runs_are_discarded_as_noise() {
    // 3% of 200 = 6 samples.
    let p = profile(&[(5, 0.0), (3, 100.0), (20, 0.0), (80, 100.0), (92, 0.0)]);
    let segs = detect_segments(&p, None);
    assert_eq!(segs, vec![Segment::new(28, 108)]);
}

#[test]
fn flat_profile_has_no_segments() {
    assert!(detect_segments(&[0.0; 50], None).is_empty());
    assert!(detect_segments(&[], Some(3)).is_empty());
}

#[test]
fn keeps_largest_when_too_many_found_in_spatial_order() {
    let p = profile(&[
        (30, 100.0),
        (10, 0.0),
        (10, 100.0),
        (10, 0.0),
        (40, 100.0),
    ]);
    let segs = detect_segments(&p, Some(2));
    assert_eq!(segs, vec![Segment::new(0, 30), Segment::new(60, 100)]);
}

#[test]
fn uniform_fallback_when_too_few_found() {
    let p = profile(&[(90, 100.0)]);
    let segs = detect_segments(&p, Some(3));
    assert_eq!(
        segs,
        vec![Segment::new(0, 30), Segment::new(30, 60), Segment::new(60, 90)]
    );

    let flat = detect_segments(&[0.0; 10], Some(2));
    assert_eq!(flat, vec![Segment::new(0, 5), Segment::new(5, 10)]);
}

#[test]
fn uniform_segments_cover_the_axis() {
    let segs = uniform_segments(10, 3);
    assert_eq!(
        segs,
        vec![Segment::new(0, 3), Segment::new(3, 6), Segment::new(6, 10)]
    );
    assert_eq!(segs.iter().map(|s| s.size).sum::<usize>(), 10);
}
