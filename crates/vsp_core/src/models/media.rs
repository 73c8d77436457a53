//! Media metadata structures.

use serde::{Deserialize, Serialize};

/// Container and stream metadata for a source video file.
///
/// Produced once by the probe and immutable afterwards. Only the duration
/// is guaranteed: the probe rejects files without a positive duration,
/// while the remaining fields fall back to `0` / `"none"` when the
/// container does not report them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaInfo {
    /// Total duration in seconds (always > 0).
    pub duration_seconds: f64,
    /// Video width in pixels (0 if no video stream was reported).
    #[serde(default)]
    pub width: u32,
    /// Video height in pixels (0 if no video stream was reported).
    #[serde(default)]
    pub height: u32,
    /// Codec name of the first audio stream (e.g., "aac", "ac3").
    #[serde(default = "default_audio_codec")]
    pub audio_codec: String,
    /// Overall bitrate in bits per second (0 if unknown).
    #[serde(default)]
    pub bitrate_bps: u64,
}

fn default_audio_codec() -> String {
    "none".to_string()
}

impl MediaInfo {
    /// Get a display string for the video resolution.
    pub fn resolution(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }

    /// Whether the container reported an audio stream.
    pub fn has_audio(&self) -> bool {
        self.audio_codec != "none" && !self.audio_codec.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_formats_dimensions() {
        let info = MediaInfo {
            duration_seconds: 600.0,
            width: 1920,
            height: 1080,
            audio_codec: "aac".to_string(),
            bitrate_bps: 4_500_000,
        };
        assert_eq!(info.resolution(), "1920x1080");
        assert!(info.has_audio());
    }

    #[test]
    fn media_info_deserializes_with_defaults() {
        let info: MediaInfo = serde_json::from_str(r#"{"duration_seconds": 12.5}"#).unwrap();
        assert_eq!(info.duration_seconds, 12.5);
        assert_eq!(info.width, 0);
        assert_eq!(info.audio_codec, "none");
        assert!(!info.has_audio());
    }
}
