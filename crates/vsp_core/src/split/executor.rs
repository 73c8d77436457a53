//! Per-segment execution against the external tool.

use std::fs;
use std::path::Path;

use crate::models::{SegmentOutcome, SegmentTask};
use crate::tool::MediaToolkit;

/// Runs one external extraction per task and records the outcome.
///
/// A segment is successful only when the tool exits 0 **and** a non-empty
/// file exists at the allocated output path. Failures are captured in the
/// outcome, never raised as errors, so the controller can continue with
/// the remaining segments.
pub struct SegmentExecutor<'a> {
    toolkit: &'a dyn MediaToolkit,
    input_path: &'a Path,
}

impl<'a> SegmentExecutor<'a> {
    /// Create an executor for one source file.
    pub fn new(toolkit: &'a dyn MediaToolkit, input_path: &'a Path) -> Self {
        Self {
            toolkit,
            input_path,
        }
    }

    /// Extract the task's window into its allocated output path.
    pub fn execute(&self, task: &SegmentTask) -> SegmentOutcome {
        let window = task.window;
        tracing::info!(
            "Processing segment {}: start {:.3}s, length {:.3}s -> {}",
            window.number(),
            window.start_seconds,
            window.length_seconds,
            task.output_path.display()
        );

        match self.toolkit.extract(
            self.input_path,
            window.start_seconds,
            window.length_seconds,
            &task.output_path,
        ) {
            Ok(()) => self.check_output(task),
            Err(err) => {
                let exit_code = err.exit_code();
                SegmentOutcome::failed(task.clone(), err.to_string(), exit_code)
            }
        }
    }

    /// Exit 0 alone is not success; the output must exist and be non-empty.
    fn check_output(&self, task: &SegmentTask) -> SegmentOutcome {
        match fs::metadata(&task.output_path) {
            Ok(meta) if meta.len() > 0 => SegmentOutcome::completed(task.clone()),
            Ok(_) => SegmentOutcome::failed(
                task.clone(),
                format!("output file is empty: {}", task.output_path.display()),
                None,
            ),
            Err(e) => SegmentOutcome::failed(
                task.clone(),
                format!(
                    "output file missing: {}: {}",
                    task.output_path.display(),
                    e
                ),
                None,
            ),
        }
    }
}
