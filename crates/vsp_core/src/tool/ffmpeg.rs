//! Production [`MediaToolkit`] backed by the ffmpeg and ffprobe binaries.

use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use super::errors::{ExtractError, ProbeError};
use super::ffprobe;
use super::MediaToolkit;
use crate::config::Settings;
use crate::models::MediaInfo;

/// How often a child with a deadline is polled for completion.
const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Drives ffprobe for probing and ffmpeg for segment extraction.
///
/// Extraction uses stream copy by default so the per-segment cost is
/// proportional to copy time; disabling it falls back to ffmpeg's default
/// encoders for the output container. `-y` is never passed: the name
/// allocator guarantees a fresh output path and pre-existing files must
/// not be overwritten.
#[derive(Debug, Clone)]
pub struct FfmpegToolkit {
    ffmpeg_path: String,
    ffprobe_path: String,
    stream_copy: bool,
    timeout_secs: Option<u64>,
}

impl FfmpegToolkit {
    /// Create a toolkit resolving both binaries from PATH.
    pub fn new() -> Self {
        Self {
            ffmpeg_path: "ffmpeg".to_string(),
            ffprobe_path: "ffprobe".to_string(),
            stream_copy: true,
            timeout_secs: None,
        }
    }

    /// Create a toolkit configured from application settings.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            ffmpeg_path: settings.tools.ffmpeg_path.clone(),
            ffprobe_path: settings.tools.ffprobe_path.clone(),
            stream_copy: settings.split.stream_copy,
            timeout_secs: settings.split.tool_timeout_secs,
        }
    }

    /// Set a custom path to the ffmpeg executable.
    pub fn with_ffmpeg_path(mut self, path: impl Into<String>) -> Self {
        self.ffmpeg_path = path.into();
        self
    }

    /// Set a custom path to the ffprobe executable.
    pub fn with_ffprobe_path(mut self, path: impl Into<String>) -> Self {
        self.ffprobe_path = path.into();
        self
    }

    /// Enable or disable stream copy.
    pub fn with_stream_copy(mut self, stream_copy: bool) -> Self {
        self.stream_copy = stream_copy;
        self
    }

    /// Kill an extraction that runs longer than `seconds`.
    pub fn with_timeout_secs(mut self, seconds: u64) -> Self {
        self.timeout_secs = Some(seconds);
        self
    }

    /// Build the ffmpeg argument list for one segment.
    fn build_extract_args(
        &self,
        input: &Path,
        start_seconds: f64,
        length_seconds: f64,
        dest: &Path,
    ) -> Vec<String> {
        let mut args = vec![
            "-nostdin".to_string(),
            "-v".to_string(),
            "error".to_string(),
            "-i".to_string(),
            input.display().to_string(),
            "-ss".to_string(),
            format_seconds(start_seconds),
            "-t".to_string(),
            format_seconds(length_seconds),
        ];
        if self.stream_copy {
            args.extend(
                ["-c", "copy", "-avoid_negative_ts", "1"]
                    .iter()
                    .map(|s| s.to_string()),
            );
        }
        args.push(dest.display().to_string());
        args
    }

    /// Spawn ffmpeg and wait for it, honoring the configured timeout.
    fn run_ffmpeg(&self, args: &[String]) -> Result<(), ExtractError> {
        tracing::debug!("Running: {} {}", self.ffmpeg_path, args.join(" "));

        let mut child = Command::new(&self.ffmpeg_path)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| ExtractError::execution_failed("ffmpeg", e.to_string()))?;

        // Drain stderr on a thread so a chatty child cannot fill the pipe
        // and stall behind it while we wait.
        let stderr_reader = child.stderr.take().map(|mut pipe| {
            std::thread::spawn(move || {
                let mut buf = String::new();
                let _ = pipe.read_to_string(&mut buf);
                buf
            })
        });

        let wait_result = match self.timeout_secs {
            None => child
                .wait()
                .map_err(|e| ExtractError::execution_failed("ffmpeg", e.to_string())),
            Some(limit) => wait_with_deadline(&mut child, limit),
        };

        let stderr_text = stderr_reader
            .map(|handle| handle.join().unwrap_or_default())
            .unwrap_or_default();

        let status = wait_result?;
        if !status.success() {
            return Err(ExtractError::command_failed(
                "ffmpeg",
                status.code().unwrap_or(-1),
                stderr_text.trim().to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for FfmpegToolkit {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaToolkit for FfmpegToolkit {
    fn probe(&self, input: &Path) -> Result<MediaInfo, ProbeError> {
        ffprobe::probe_file(&self.ffprobe_path, input)
    }

    fn extract(
        &self,
        input: &Path,
        start_seconds: f64,
        length_seconds: f64,
        dest: &Path,
    ) -> Result<(), ExtractError> {
        let args = self.build_extract_args(input, start_seconds, length_seconds, dest);
        self.run_ffmpeg(&args)
    }
}

/// Poll the child until it exits or the deadline passes.
///
/// On timeout the child is killed and reaped before returning, so no
/// process outlives the call.
fn wait_with_deadline(child: &mut Child, limit_secs: u64) -> Result<ExitStatus, ExtractError> {
    let deadline = Instant::now() + Duration::from_secs(limit_secs);
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok(status),
            Ok(None) => {
                if Instant::now() >= deadline {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(ExtractError::TimedOut {
                        tool: "ffmpeg".to_string(),
                        seconds: limit_secs,
                    });
                }
                std::thread::sleep(WAIT_POLL_INTERVAL);
            }
            Err(e) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(ExtractError::execution_failed("ffmpeg", e.to_string()));
            }
        }
    }
}

/// Format a timeline position for the ffmpeg command line.
fn format_seconds(seconds: f64) -> String {
    format!("{:.3}", seconds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn stream_copy_args() {
        let toolkit = FfmpegToolkit::new();
        let args = toolkit.build_extract_args(
            Path::new("/videos/match.mp4"),
            270.0,
            270.0,
            Path::new("/out/match_02.mp4"),
        );
        let args: Vec<&str> = args.iter().map(|s| s.as_str()).collect();
        assert_eq!(
            args,
            [
                "-nostdin",
                "-v",
                "error",
                "-i",
                "/videos/match.mp4",
                "-ss",
                "270.000",
                "-t",
                "270.000",
                "-c",
                "copy",
                "-avoid_negative_ts",
                "1",
                "/out/match_02.mp4",
            ]
        );
    }

    #[test]
    fn reencode_args_drop_codec_copy() {
        let toolkit = FfmpegToolkit::new().with_stream_copy(false);
        let args = toolkit.build_extract_args(Path::new("in.mkv"), 0.0, 60.5, Path::new("out.mkv"));
        assert!(!args.contains(&"-c".to_string()));
        assert!(!args.contains(&"copy".to_string()));
        assert_eq!(args.last(), Some(&"out.mkv".to_string()));
        assert!(args.contains(&"60.500".to_string()));
    }

    #[test]
    fn builder_overrides_paths() {
        let toolkit = FfmpegToolkit::new()
            .with_ffmpeg_path("/opt/ffmpeg/bin/ffmpeg")
            .with_ffprobe_path("/opt/ffmpeg/bin/ffprobe")
            .with_timeout_secs(30);
        assert_eq!(toolkit.ffmpeg_path, "/opt/ffmpeg/bin/ffmpeg");
        assert_eq!(toolkit.ffprobe_path, "/opt/ffmpeg/bin/ffprobe");
        assert_eq!(toolkit.timeout_secs, Some(30));
    }

    #[test]
    fn probe_missing_input_does_not_spawn() {
        let toolkit = FfmpegToolkit::new().with_ffprobe_path("/nonexistent/ffprobe");
        let result = toolkit.probe(&PathBuf::from("/nonexistent/input.mp4"));
        assert!(matches!(result, Err(ProbeError::InputNotFound(_))));
    }
}
