//! Source file probing using ffprobe in JSON mode.
//!
//! A single invocation retrieves the container duration, the first video
//! stream's dimensions, the first audio stream's codec, and the overall
//! bitrate. Only the duration is mandatory; everything else degrades to a
//! default when the container does not report it.

use std::path::Path;
use std::process::Command;

use serde_json::Value;

use super::errors::ProbeError;
use crate::models::MediaInfo;

/// Probe a media file for duration and stream metadata.
pub(crate) fn probe_file(ffprobe: &str, input: &Path) -> Result<MediaInfo, ProbeError> {
    if !input.exists() {
        return Err(ProbeError::InputNotFound(input.to_path_buf()));
    }

    tracing::debug!("Probing file: {}", input.display());

    let output = Command::new(ffprobe)
        .args(["-v", "error", "-show_format", "-show_streams", "-of", "json"])
        .arg(input)
        .output()
        .map_err(|e| ProbeError::execution_failed("ffprobe", e.to_string()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ProbeError::command_failed(
            "ffprobe",
            output.status.code().unwrap_or(-1),
            stderr.trim().to_string(),
        ));
    }

    parse_probe_output(&String::from_utf8_lossy(&output.stdout))
}

/// Parse the JSON output of `ffprobe -show_format -show_streams -of json`.
pub(crate) fn parse_probe_output(raw: &str) -> Result<MediaInfo, ProbeError> {
    let json: Value = serde_json::from_str(raw)
        .map_err(|e| ProbeError::parse_error("ffprobe output", e.to_string()))?;

    let format = json.get("format");
    let streams = json
        .get("streams")
        .and_then(|s| s.as_array())
        .map(|s| s.as_slice())
        .unwrap_or(&[]);

    let duration_seconds = format
        .and_then(|f| f.get("duration"))
        .and_then(|d| d.as_str())
        .and_then(parse_duration)
        .or_else(|| {
            // Some containers only carry per-stream durations.
            streams
                .iter()
                .filter_map(|s| s.get("duration").and_then(|d| d.as_str()))
                .find_map(parse_duration)
        })
        .ok_or(ProbeError::MissingDuration)?;

    if !(duration_seconds > 0.0) || !duration_seconds.is_finite() {
        return Err(ProbeError::InvalidDuration(duration_seconds));
    }

    let video = first_stream_of_type(streams, "video");
    let width = video
        .and_then(|s| s.get("width"))
        .and_then(|w| w.as_u64())
        .unwrap_or(0) as u32;
    let height = video
        .and_then(|s| s.get("height"))
        .and_then(|h| h.as_u64())
        .unwrap_or(0) as u32;

    let audio_codec = first_stream_of_type(streams, "audio")
        .and_then(|s| s.get("codec_name"))
        .and_then(|c| c.as_str())
        .unwrap_or("none")
        .to_string();

    let bitrate_bps = format
        .and_then(|f| f.get("bit_rate"))
        .and_then(|b| b.as_str())
        .and_then(|b| b.parse().ok())
        .unwrap_or(0);

    Ok(MediaInfo {
        duration_seconds,
        width,
        height,
        audio_codec,
        bitrate_bps,
    })
}

fn first_stream_of_type<'a>(streams: &'a [Value], codec_type: &str) -> Option<&'a Value> {
    streams
        .iter()
        .find(|s| s.get("codec_type").and_then(|t| t.as_str()) == Some(codec_type))
}

/// Parse a duration reported either as fractional seconds ("600.250000")
/// or as timestamp text ("00:10:00.250").
fn parse_duration(text: &str) -> Option<f64> {
    let text = text.trim();
    if let Ok(seconds) = text.parse::<f64>() {
        return Some(seconds);
    }

    let mut parts = text.split(':');
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(h), Some(m), Some(s), None) => {
            let hours: f64 = h.parse().ok()?;
            let minutes: f64 = m.parse().ok()?;
            let seconds: f64 = s.parse().ok()?;
            Some(hours * 3600.0 + minutes * 60.0 + seconds)
        }
        _ => None,
    }
}
