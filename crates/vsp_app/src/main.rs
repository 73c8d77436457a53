//! Video Split GUI front-end.
//!
//! The GUI surface is two native pickers: one for the input video file,
//! one for the output directory. Everything else happens in `vsp_core`
//! and is reported on the console.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use directories::ProjectDirs;
use rfd::FileDialog;

use vsp_core::config::ConfigManager;
use vsp_core::split::SplitController;
use vsp_core::tool::FfmpegToolkit;

/// Extensions offered by the input file picker.
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mkv", "avi", "mov", "webm", "m4v", "ts", "m2ts"];

fn main() -> ExitCode {
    let (mut config, config_warning) = open_config();
    vsp_core::logging::init_tracing(config.settings().logging.level);
    if let Some(warning) = config_warning {
        tracing::warn!("{}", warning);
    }
    tracing::info!("Video Split GUI {}", vsp_core::version());

    let Some(input_path) = pick_input_file(&config.settings().paths.last_input_dir) else {
        tracing::error!("No file selected. Exiting.");
        return ExitCode::FAILURE;
    };
    let Some(output_dir) = pick_output_dir(&config.settings().paths.last_output_dir) else {
        tracing::error!("No output directory selected. Exiting.");
        return ExitCode::FAILURE;
    };

    remember_dialog_dirs(&mut config, &input_path, &output_dir);

    let settings = config.settings().clone();
    let toolkit = FfmpegToolkit::from_settings(&settings);
    let controller = SplitController::new(&toolkit);

    match controller.split(
        &input_path,
        &output_dir,
        settings.split.max_segment_length_secs,
    ) {
        Ok(report) if report.is_fully_successful() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(err) => {
            tracing::error!("Run aborted during {}: {}", err.stage(), err);
            ExitCode::FAILURE
        }
    }
}

/// Locate and load (or create) the settings file.
///
/// A broken config is not fatal: the run continues on defaults and the
/// problem is reported once tracing is up.
fn open_config() -> (ConfigManager, Option<String>) {
    let path = ProjectDirs::from("", "", "video-split-gui")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("video-split-gui.toml"));

    let mut manager = ConfigManager::new(path);
    let warning = manager
        .load_or_create()
        .err()
        .map(|e| format!("Using default settings, config unavailable: {}", e));
    (manager, warning)
}

/// Open the input file picker, starting from the remembered directory.
fn pick_input_file(last_dir: &str) -> Option<PathBuf> {
    let mut dialog = FileDialog::new()
        .set_title("Select Video File")
        .add_filter("Video Files", VIDEO_EXTENSIONS)
        .add_filter("All Files", &["*"]);
    if !last_dir.is_empty() && Path::new(last_dir).is_dir() {
        dialog = dialog.set_directory(last_dir);
    }
    dialog.pick_file()
}

/// Open the output directory picker, starting from the remembered
/// directory.
fn pick_output_dir(last_dir: &str) -> Option<PathBuf> {
    let mut dialog = FileDialog::new().set_title("Select Output Directory");
    if !last_dir.is_empty() && Path::new(last_dir).is_dir() {
        dialog = dialog.set_directory(last_dir);
    }
    dialog.pick_folder()
}

/// Save the dialog locations for the next run.
fn remember_dialog_dirs(config: &mut ConfigManager, input_path: &Path, output_dir: &Path) {
    if let Some(parent) = input_path.parent() {
        config.settings_mut().paths.last_input_dir = parent.to_string_lossy().into_owned();
    }
    config.settings_mut().paths.last_output_dir = output_dir.to_string_lossy().into_owned();
    if let Err(e) = config.save() {
        tracing::warn!("Failed to save settings: {}", e);
    }
}
