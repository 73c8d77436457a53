//! The aggregate run report.

use serde::{Deserialize, Serialize};

use super::media::MediaInfo;
use super::segments::{SegmentOutcome, SegmentStatus};

/// Ordered result of attempting every planned segment in one run.
///
/// Owned by the controller and exposed read-only once the run completes.
/// A report existing at all means the run reached its execution phase;
/// individual segments may still have failed, and callers are expected to
/// inspect the outcomes to detect partial failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Number of segments that were planned (always `outcomes.len()`).
    pub total_segments: usize,
    /// When the run started, RFC 3339.
    pub started_at: String,
    /// Probed metadata of the source file.
    pub media: MediaInfo,
    /// Per-segment outcomes, in window order.
    pub outcomes: Vec<SegmentOutcome>,
}

impl RunReport {
    /// Create a report for a run that is about to execute its segments.
    pub fn new(media: MediaInfo, total_segments: usize) -> Self {
        Self {
            total_segments,
            started_at: chrono::Local::now().to_rfc3339(),
            media,
            outcomes: Vec::with_capacity(total_segments),
        }
    }

    /// Record the next segment outcome.
    pub fn record(&mut self, outcome: SegmentOutcome) {
        self.outcomes.push(outcome);
    }

    /// Number of segments that completed successfully.
    pub fn completed_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.status.is_completed())
            .count()
    }

    /// Number of segments that failed.
    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.completed_count()
    }

    /// Whether every planned segment completed.
    pub fn is_fully_successful(&self) -> bool {
        self.outcomes.len() == self.total_segments && self.failed_count() == 0
    }

    /// Iterate over the outcomes that failed.
    pub fn failed_outcomes(&self) -> impl Iterator<Item = &SegmentOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, SegmentStatus::Failed { .. }))
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::models::{SegmentTask, SegmentWindow};

    fn task(index: usize) -> SegmentTask {
        SegmentTask {
            window: SegmentWindow {
                index,
                start_seconds: index as f64 * 270.0,
                length_seconds: 270.0,
            },
            output_path: PathBuf::from(format!("/out/clip_{:02}.mp4", index + 1)),
        }
    }

    fn media() -> MediaInfo {
        MediaInfo {
            duration_seconds: 540.0,
            width: 1280,
            height: 720,
            audio_codec: "aac".to_string(),
            bitrate_bps: 2_000_000,
        }
    }

    #[test]
    fn report_counts_outcomes() {
        let mut report = RunReport::new(media(), 2);
        report.record(SegmentOutcome::completed(task(0)));
        report.record(SegmentOutcome::failed(task(1), "boom", Some(1)));

        assert_eq!(report.total_segments, 2);
        assert_eq!(report.completed_count(), 1);
        assert_eq!(report.failed_count(), 1);
        assert!(!report.is_fully_successful());
        assert_eq!(report.failed_outcomes().count(), 1);
    }

    #[test]
    fn fully_successful_requires_all_outcomes() {
        let mut report = RunReport::new(media(), 2);
        report.record(SegmentOutcome::completed(task(0)));
        // One outcome still missing.
        assert!(!report.is_fully_successful());

        report.record(SegmentOutcome::completed(task(1)));
        assert!(report.is_fully_successful());
    }

    #[test]
    fn report_serializes() {
        let report = RunReport::new(media(), 0);
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"total_segments\":0"));
        assert!(json.contains("\"started_at\""));
    }
}
