//! Run orchestration: probe, plan, allocate, execute.

use std::path::Path;

use super::errors::SplitError;
use super::executor::SegmentExecutor;
use super::naming::{FsPathLookup, NameAllocator, PathLookup};
use super::planner;
use crate::models::{RunReport, SegmentStatus};
use crate::tool::MediaToolkit;

/// Sequences one split run and aggregates its report.
///
/// Probe, plan, and allocation errors abort the run before any segment
/// executes (`Err` from [`split`](SplitController::split) is the `Aborted`
/// terminal state). Once execution begins the run always reaches
/// `Completed`: a failing segment is recorded in the report and the
/// remaining segments still execute, in window order.
pub struct SplitController<'a> {
    toolkit: &'a dyn MediaToolkit,
    lookup: &'a dyn PathLookup,
}

impl<'a> SplitController<'a> {
    /// Create a controller over the given toolkit, using the real file
    /// system for name allocation.
    pub fn new(toolkit: &'a dyn MediaToolkit) -> Self {
        Self {
            toolkit,
            lookup: &FsPathLookup,
        }
    }

    /// Substitute the file-system lookup (used by tests).
    pub fn with_path_lookup(mut self, lookup: &'a dyn PathLookup) -> Self {
        self.lookup = lookup;
        self
    }

    /// Split `input_path` into segments of at most `max_length_seconds`,
    /// written into `output_dir`.
    pub fn split(
        &self,
        input_path: &Path,
        output_dir: &Path,
        max_length_seconds: f64,
    ) -> Result<RunReport, SplitError> {
        let media = self.toolkit.probe(input_path)?;
        tracing::info!("Total video duration: {:.2} seconds", media.duration_seconds);
        tracing::info!("Video resolution: {}", media.resolution());
        tracing::info!("Audio codec: {}", media.audio_codec);
        tracing::info!("Video bitrate: {} bps", media.bitrate_bps);

        let windows = planner::plan(media.duration_seconds, max_length_seconds)?;
        tracing::info!("Splitting into {} segments", windows.len());

        let base_name = input_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "segment".to_string());
        let extension = input_path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("mp4");

        let allocator = NameAllocator::new(output_dir, &base_name, extension, self.lookup);
        let tasks = allocator.allocate(&windows)?;

        let mut report = RunReport::new(media, tasks.len());
        let executor = SegmentExecutor::new(self.toolkit, input_path);

        for task in &tasks {
            let outcome = executor.execute(task);
            match &outcome.status {
                SegmentStatus::Completed => tracing::info!(
                    "Segment {} saved as {}",
                    task.window.number(),
                    task.output_path.display()
                ),
                SegmentStatus::Failed { reason, .. } => tracing::error!(
                    "Segment {} failed: {}",
                    task.window.number(),
                    reason
                ),
            }
            report.record(outcome);
        }

        if report.is_fully_successful() {
            tracing::info!("Video splitting completed successfully");
        } else {
            tracing::warn!(
                "{} of {} segments failed",
                report.failed_count(),
                report.total_segments
            );
        }

        Ok(report)
    }
}
