//! Error types for the split pipeline.
//!
//! These cover the prerequisite stages only. A segment that fails during
//! execution is recorded as data in its outcome and is deliberately not
//! an error type here.

use std::path::PathBuf;

use thiserror::Error;

use crate::tool::ProbeError;

/// Caller-contract violation on the planning inputs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanError {
    /// The duration is not a positive, finite number of seconds.
    #[error("duration must be positive and finite, got {0}")]
    InvalidDuration(f64),

    /// The maximum segment length is not a positive, finite number of
    /// seconds.
    #[error("maximum segment length must be positive and finite, got {0}")]
    InvalidMaxLength(f64),
}

/// The output directory cannot receive segment files.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AllocationError {
    /// The output directory does not exist.
    #[error("Output directory not found: {0}")]
    DirectoryMissing(PathBuf),

    /// The output path exists but is not a writable directory.
    #[error("Output directory is not writable: {0}")]
    DirectoryNotWritable(PathBuf),
}

/// A prerequisite stage failed before any segment executed.
///
/// This is the `Aborted` terminal state of a run: nothing downstream of
/// the failed stage can be trusted, so no segment work was attempted.
#[derive(Error, Debug)]
pub enum SplitError {
    /// Probing the input failed.
    #[error(transparent)]
    Probe(#[from] ProbeError),

    /// The planning inputs violate the caller contract.
    #[error("Invalid plan input: {0}")]
    InvalidPlanInput(#[from] PlanError),

    /// Output names could not be allocated.
    #[error(transparent)]
    Allocation(#[from] AllocationError),
}

impl SplitError {
    /// Name of the stage that aborted the run.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Probe(_) => "probe",
            Self::InvalidPlanInput(_) => "plan",
            Self::Allocation(_) => "allocate",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_error_names_its_stage() {
        let err = SplitError::from(PlanError::InvalidMaxLength(0.0));
        assert_eq!(err.stage(), "plan");
        assert!(err.to_string().contains("maximum segment length"));

        let err = SplitError::from(AllocationError::DirectoryMissing(PathBuf::from("/missing")));
        assert_eq!(err.stage(), "allocate");
    }
}
