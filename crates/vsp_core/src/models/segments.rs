//! Segment structures (windows, tasks, outcomes).

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One contiguous slice of the source timeline.
///
/// Windows are created by the planner and never mutated. For a plan over
/// duration `D` with maximum length `L`, window `0` starts at `0`, each
/// window starts where the previous one ends, no window is longer than
/// `L`, and the lengths sum to `D` (the last window carries the
/// remainder).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentWindow {
    /// 0-based, sequential position within the plan.
    pub index: usize,
    /// Start of the window on the source timeline, in seconds.
    pub start_seconds: f64,
    /// Length of the window in seconds.
    pub length_seconds: f64,
}

impl SegmentWindow {
    /// End of the window on the source timeline, in seconds.
    pub fn end_seconds(&self) -> f64 {
        self.start_seconds + self.length_seconds
    }

    /// 1-based number for display and file naming.
    pub fn number(&self) -> usize {
        self.index + 1
    }
}

/// A window bound to its allocated output path.
///
/// Created by the name allocator, consumed once by the executor. No file
/// exists at `output_path` at creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentTask {
    /// The timeline window to extract.
    pub window: SegmentWindow,
    /// Collision-free destination for the extracted segment.
    pub output_path: PathBuf,
}

/// Terminal status of one segment extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SegmentStatus {
    /// The tool exited 0 and produced a non-empty output file.
    Completed,
    /// The extraction failed; the reason carries the exit code or the
    /// tool-reported error text.
    Failed {
        reason: String,
        exit_code: Option<i32>,
    },
}

impl SegmentStatus {
    /// Create a failed status.
    pub fn failed(reason: impl Into<String>, exit_code: Option<i32>) -> Self {
        Self::Failed {
            reason: reason.into(),
            exit_code,
        }
    }

    /// Whether this status is `Completed`.
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// The recorded result of attempting one segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentOutcome {
    /// The task that was attempted.
    pub task: SegmentTask,
    /// How the attempt ended.
    pub status: SegmentStatus,
}

impl SegmentOutcome {
    /// Create an outcome for a completed segment.
    pub fn completed(task: SegmentTask) -> Self {
        Self {
            task,
            status: SegmentStatus::Completed,
        }
    }

    /// Create an outcome for a failed segment.
    pub fn failed(task: SegmentTask, reason: impl Into<String>, exit_code: Option<i32>) -> Self {
        Self {
            task,
            status: SegmentStatus::failed(reason, exit_code),
        }
    }
}
