//! External media tool boundary.
//!
//! Everything that touches ffmpeg/ffprobe lives behind the
//! [`MediaToolkit`] trait so that the planner, allocator, and controller
//! can be unit tested without spawning a real process:
//!
//! - **Probe**: one ffprobe invocation in JSON mode, parsed into
//!   [`MediaInfo`](crate::models::MediaInfo)
//! - **Extract**: one ffmpeg invocation per segment, stream copy by
//!   default
//!
//! The production implementation is [`FfmpegToolkit`].

mod errors;
mod ffmpeg;
mod ffprobe;

pub use errors::{ExtractError, ProbeError};
pub use ffmpeg::FfmpegToolkit;

use std::path::Path;

use crate::models::MediaInfo;

/// Capability interface for the external media tool.
///
/// One implementation drives the real ffmpeg/ffprobe binaries; tests
/// substitute fakes. Both operations block until the external process has
/// been awaited - implementations must never leave a child detached.
pub trait MediaToolkit: Send + Sync {
    /// Query `input` for duration and stream metadata without modifying it.
    fn probe(&self, input: &Path) -> Result<MediaInfo, ProbeError>;

    /// Extract the timeline range `[start, start + length)` from `input`
    /// into a new file at `dest`.
    ///
    /// Returning `Ok` means the tool exited 0; whether the output file is
    /// usable is judged by the caller.
    fn extract(
        &self,
        input: &Path,
        start_seconds: f64,
        length_seconds: f64,
        dest: &Path,
    ) -> Result<(), ExtractError>;
}
