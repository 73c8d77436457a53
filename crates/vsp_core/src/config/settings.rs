//! Settings struct with TOML-based sections.

use serde::{Deserialize, Serialize};

use crate::logging::LogLevel;

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Path-related settings.
    #[serde(default)]
    pub paths: PathSettings,

    /// Splitting behavior.
    #[serde(default)]
    pub split: SplitSettings,

    /// External tool locations.
    #[serde(default)]
    pub tools: ToolSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            paths: PathSettings::default(),
            split: SplitSettings::default(),
            tools: ToolSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

/// Remembered dialog locations.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PathSettings {
    /// Directory the input file picker starts in.
    #[serde(default)]
    pub last_input_dir: String,

    /// Directory the output folder picker starts in.
    #[serde(default)]
    pub last_output_dir: String,
}

/// Splitting behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitSettings {
    /// Maximum length of one segment in seconds.
    #[serde(default = "default_max_segment_length")]
    pub max_segment_length_secs: f64,

    /// Extract without re-encoding (`-c copy`). Disabling falls back to
    /// the tool's default encoders for the output container.
    #[serde(default = "default_true")]
    pub stream_copy: bool,

    /// Kill an extraction that runs longer than this many seconds.
    #[serde(default)]
    pub tool_timeout_secs: Option<u64>,
}

// 4 minutes 30 seconds per segment.
fn default_max_segment_length() -> f64 {
    270.0
}

fn default_true() -> bool {
    true
}

impl Default for SplitSettings {
    fn default() -> Self {
        Self {
            max_segment_length_secs: default_max_segment_length(),
            stream_copy: true,
            tool_timeout_secs: None,
        }
    }
}

/// External tool locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSettings {
    /// ffmpeg executable (name resolved from PATH, or absolute path).
    #[serde(default = "default_ffmpeg")]
    pub ffmpeg_path: String,

    /// ffprobe executable (name resolved from PATH, or absolute path).
    #[serde(default = "default_ffprobe")]
    pub ffprobe_path: String,
}

fn default_ffmpeg() -> String {
    "ffmpeg".to_string()
}

fn default_ffprobe() -> String {
    "ffprobe".to_string()
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            ffmpeg_path: default_ffmpeg(),
            ffprobe_path: default_ffprobe(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LoggingSettings {
    /// Fallback console log level when RUST_LOG is unset.
    #[serde(default)]
    pub level: LogLevel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_classic_behavior() {
        let settings = Settings::default();
        assert_eq!(settings.split.max_segment_length_secs, 270.0);
        assert!(settings.split.stream_copy);
        assert_eq!(settings.split.tool_timeout_secs, None);
        assert_eq!(settings.tools.ffmpeg_path, "ffmpeg");
        assert_eq!(settings.logging.level, LogLevel::Info);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [split]
            max_segment_length_secs = 120.0
            "#,
        )
        .unwrap();
        assert_eq!(settings.split.max_segment_length_secs, 120.0);
        assert!(settings.split.stream_copy);
        assert_eq!(settings.tools.ffprobe_path, "ffprobe");
    }

    #[test]
    fn settings_round_trip_through_toml() {
        let mut settings = Settings::default();
        settings.paths.last_input_dir = "/videos".to_string();
        settings.split.tool_timeout_secs = Some(90);

        let text = toml::to_string_pretty(&settings).unwrap();
        let reloaded: Settings = toml::from_str(&text).unwrap();
        assert_eq!(reloaded.paths.last_input_dir, "/videos");
        assert_eq!(reloaded.split.tool_timeout_secs, Some(90));
    }
}
