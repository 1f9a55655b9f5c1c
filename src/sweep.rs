/// Contiguous bands of width `step` starting at `min`: `(lo, lo + step - 1)`
/// for every `lo < max`. Adjacent bands do not share a boundary value.
///
/// A non-positive step yields no bands. The sweep ends early rather than
/// overflowing when a band would run past `i64::MAX`.
pub fn generate_ranges(min: i64, max: i64, step: i64) -> Vec<(i64, i64)> {
    if step <= 0 {
        return Vec::new();
    }

    let mut ranges = Vec::new();
    let mut lo = min;
    while lo < max {
        let Some(hi) = lo.checked_add(step - 1) else {
            break;
        };
        ranges.push((lo, hi));
        match lo.checked_add(step) {
            Some(next) => lo = next,
            None => break,
        }
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sweep_has_fifteen_bands() {
        let ranges = generate_ranges(50, 200, 10);
        assert_eq!(ranges.len(), 15);
        assert_eq!(ranges.first(), Some(&(50, 59)));
        assert_eq!(ranges[1], (60, 69));
        assert_eq!(ranges.last(), Some(&(190, 199)));
    }

    #[test]
    fn bands_do_not_overlap() {
        let ranges = generate_ranges(50, 200, 10);
        for pair in ranges.windows(2) {
            assert_eq!(pair[0].1 + 1, pair[1].0);
        }
    }

    #[test]
    fn last_band_may_overshoot_max() {
        assert_eq!(generate_ranges(0, 25, 10), vec![(0, 9), (10, 19), (20, 29)]);
    }

    #[test]
    fn empty_when_min_reaches_max() {
        assert!(generate_ranges(200, 200, 10).is_empty());
        assert!(generate_ranges(210, 200, 10).is_empty());
    }

    #[test]
    fn sweep_near_i64_max_stops_instead_of_overflowing() {
        assert!(generate_ranges(i64::MAX - 5, i64::MAX, 10).is_empty());
        assert_eq!(
            generate_ranges(i64::MAX - 25, i64::MAX, 10),
            vec![(i64::MAX - 25, i64::MAX - 16), (i64::MAX - 15, i64::MAX - 6)]
        );
    }

    #[test]
    fn non_positive_step_yields_nothing() {
        assert!(generate_ranges(50, 200, 0).is_empty());
        assert!(generate_ranges(50, 200, -10).is_empty());
    }
}
