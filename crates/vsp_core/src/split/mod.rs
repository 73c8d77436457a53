//! Segmentation planner and invocation driver.
//!
//! This module turns one source file into a sequence of bounded-length
//! segments by driving the external tool once per segment:
//!
//! ```text
//! SplitController
//!     ├── probe     (MediaToolkit)
//!     ├── plan      (planner)
//!     ├── allocate  (NameAllocator)
//!     └── execute   (SegmentExecutor, one window at a time, in order)
//! ```
//!
//! Probe, plan, and allocation failures abort the run before any segment
//! executes. Once execution begins, a failing segment is recorded and the
//! remaining segments still run - partial failure is a reported state,
//! not an abort.

mod controller;
mod errors;
mod executor;
mod naming;
mod planner;

pub use controller::SplitController;
pub use errors::{AllocationError, PlanError, SplitError};
pub use executor::SegmentExecutor;
pub use naming::{FsPathLookup, NameAllocator, PathLookup};
pub use planner::plan;
