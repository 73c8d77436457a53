//! Timeline partitioning.

use super::errors::PlanError;
use crate::models::SegmentWindow;

/// Partition `[0, duration_seconds)` into windows of at most
/// `max_length_seconds`.
///
/// The window count is `ceil(duration / max_length)`; every window except
/// possibly the last has the maximum length, and the last carries the
/// remainder. A duration no longer than the maximum still yields one
/// window spanning the whole file - splitting is performed, not skipped.
///
/// Invalid inputs are rejected, never clamped.
pub fn plan(
    duration_seconds: f64,
    max_length_seconds: f64,
) -> Result<Vec<SegmentWindow>, PlanError> {
    if !duration_seconds.is_finite() || duration_seconds <= 0.0 {
        return Err(PlanError::InvalidDuration(duration_seconds));
    }
    if !max_length_seconds.is_finite() || max_length_seconds <= 0.0 {
        return Err(PlanError::InvalidMaxLength(max_length_seconds));
    }

    let segment_count = (duration_seconds / max_length_seconds).ceil() as usize;

    let mut windows = Vec::with_capacity(segment_count);
    for index in 0..segment_count {
        let start_seconds = index as f64 * max_length_seconds;
        let length_seconds = max_length_seconds.min(duration_seconds - start_seconds);
        windows.push(SegmentWindow {
            index,
            start_seconds,
            length_seconds,
        });
    }

    Ok(windows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_partition_invariants(windows: &[SegmentWindow], duration: f64, max_length: f64) {
        assert!(!windows.is_empty());
        assert_eq!(windows[0].start_seconds, 0.0);
        for (i, window) in windows.iter().enumerate() {
            assert_eq!(window.index, i);
            assert!(window.length_seconds > 0.0);
            assert!(window.length_seconds <= max_length);
            if let Some(next) = windows.get(i + 1) {
                assert!((next.start_seconds - window.end_seconds()).abs() < 1e-9);
            }
        }
        let total: f64 = windows.iter().map(|w| w.length_seconds).sum();
        assert!((total - duration).abs() < 1e-9);
    }

    #[test]
    fn single_window_when_duration_fits() {
        let windows = plan(200.0, 270.0).unwrap();
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].start_seconds, 0.0);
        assert_eq!(windows[0].length_seconds, 200.0);
    }

    #[test]
    fn exact_multiple_has_no_remainder_window() {
        let windows = plan(540.0, 270.0).unwrap();
        assert_eq!(windows.len(), 2);
        assert_eq!(windows[0].length_seconds, 270.0);
        assert_eq!(windows[1].start_seconds, 270.0);
        assert_eq!(windows[1].length_seconds, 270.0);
    }

    #[test]
    fn remainder_shortens_the_last_window() {
        let windows = plan(600.0, 270.0).unwrap();
        assert_eq!(windows.len(), 3);
        assert_eq!(windows[0].start_seconds, 0.0);
        assert_eq!(windows[1].start_seconds, 270.0);
        assert_eq!(windows[2].start_seconds, 540.0);
        assert_eq!(windows[2].length_seconds, 60.0);
    }

    #[test]
    fn partition_covers_awkward_durations() {
        for (duration, max_length) in [
            (1.0, 270.0),
            (269.999, 270.0),
            (270.001, 270.0),
            (3600.5, 271.25),
            (0.3, 0.1),
        ] {
            let windows = plan(duration, max_length).unwrap();
            assert_partition_invariants(&windows, duration, max_length);
        }
    }

    #[test]
    fn invalid_inputs_are_rejected() {
        assert!(matches!(
            plan(0.0, 270.0),
            Err(PlanError::InvalidDuration(_))
        ));
        assert!(matches!(
            plan(-5.0, 270.0),
            Err(PlanError::InvalidDuration(_))
        ));
        assert!(matches!(
            plan(f64::NAN, 270.0),
            Err(PlanError::InvalidDuration(_))
        ));
        assert!(matches!(
            plan(600.0, 0.0),
            Err(PlanError::InvalidMaxLength(_))
        ));
        assert!(matches!(
            plan(600.0, f64::INFINITY),
            Err(PlanError::InvalidMaxLength(_))
        ));
    }
}
