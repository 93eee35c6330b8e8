// src/config/model.rs

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// Top-level configuration as read from a TOML file, before validation.
///
/// ```toml
/// [camera]
/// shutter_us = 500
/// iso = 100
///
/// [capture]
/// output_dir = "/home/pi/dualcam"
/// clip_interval_minutes = 10
///
/// [gate]
/// value_path = "/sys/class/gpio/gpio6/value"
/// ```
///
/// All sections are optional; defaults match the deployed dual-view rig.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawConfigFile {
    /// Optics/imaging parameters from `[camera]`.
    #[serde(default)]
    pub camera: CameraSection,

    /// Scheduling, deadlines and artifact thresholds from `[capture]`.
    #[serde(default)]
    pub capture: CaptureSection,

    /// Gating signal source from `[gate]`.
    #[serde(default)]
    pub gate: GateSection,
}

/// Validated configuration.
///
/// Construct via `ConfigFile::try_from(raw)` (see [`super::validate`]) or
/// [`super::loader::load_and_validate`]; the fields are the same as the raw
/// form but sanity-checked.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub camera: CameraSection,
    pub capture: CaptureSection,
    pub gate: GateSection,
}

impl ConfigFile {
    /// Build without validation. Only `validate` should call this.
    pub(crate) fn new_unchecked(
        camera: CameraSection,
        capture: CaptureSection,
        gate: GateSection,
    ) -> Self {
        Self {
            camera,
            capture,
            gate,
        }
    }
}

/// `[camera]` section: parameters passed through to raspistill/raspivid.
#[derive(Debug, Clone, Deserialize)]
pub struct CameraSection {
    /// Shutter speed in microseconds (`-ss`).
    #[serde(default = "default_shutter_us")]
    pub shutter_us: u32,

    /// ISO value (`-ISO`).
    #[serde(default = "default_iso")]
    pub iso: u32,

    /// White balance red/green gain (`-awbg <red>,<blue>`; auto WB is off).
    #[serde(default = "default_awb_red")]
    pub awb_red: f64,

    /// White balance blue/green gain.
    #[serde(default = "default_awb_blue")]
    pub awb_blue: f64,

    /// Frame rate for motion clips (`-fps`).
    #[serde(default = "default_fps")]
    pub fps: u32,

    /// Still image dimensions in pixels.
    #[serde(default = "default_still_width")]
    pub still_width: u32,
    #[serde(default = "default_still_height")]
    pub still_height: u32,

    /// Motion clip dimensions in pixels. The H264 encoder constrains these.
    #[serde(default = "default_clip_width")]
    pub clip_width: u32,
    #[serde(default = "default_clip_height")]
    pub clip_height: u32,
}

fn default_shutter_us() -> u32 {
    500
}

fn default_iso() -> u32 {
    100
}

fn default_awb_red() -> f64 {
    1.0
}

fn default_awb_blue() -> f64 {
    2.4
}

fn default_fps() -> u32 {
    30
}

fn default_still_width() -> u32 {
    4056
}

fn default_still_height() -> u32 {
    3040
}

fn default_clip_width() -> u32 {
    1920
}

fn default_clip_height() -> u32 {
    1080
}

impl Default for CameraSection {
    fn default() -> Self {
        Self {
            shutter_us: default_shutter_us(),
            iso: default_iso(),
            awb_red: default_awb_red(),
            awb_blue: default_awb_blue(),
            fps: default_fps(),
            still_width: default_still_width(),
            still_height: default_still_height(),
            clip_width: default_clip_width(),
            clip_height: default_clip_height(),
        }
    }
}

/// `[capture]` section: where artifacts land and how cycles are paced.
#[derive(Debug, Clone, Deserialize)]
pub struct CaptureSection {
    /// Root directory holding the `images/` and `videos/` namespaces and
    /// the status log.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Status log filename, relative to `output_dir`.
    #[serde(default = "default_status_log")]
    pub status_log: String,

    /// Motion clip duration in seconds.
    #[serde(default = "default_clip_duration_secs")]
    pub clip_duration_secs: u64,

    /// Minimum interval between motion clips in minutes.
    #[serde(default = "default_clip_interval_minutes")]
    pub clip_interval_minutes: u64,

    /// Pause after a still-image cycle in seconds.
    #[serde(default = "default_still_delay_secs")]
    pub still_delay_secs: u64,

    /// Pause between gate polls while the gate is low, in seconds.
    #[serde(default = "default_idle_poll_secs")]
    pub idle_poll_secs: u64,

    /// An artifact must be strictly larger than this many bytes to count
    /// as valid. Shared by both modes.
    #[serde(default = "default_min_artifact_bytes")]
    pub min_artifact_bytes: u64,

    /// Wall-clock deadline for a still capture, in seconds.
    #[serde(default = "default_still_deadline_secs")]
    pub still_deadline_secs: u64,

    /// Grace added on top of the clip duration for the clip deadline,
    /// in seconds.
    #[serde(default = "default_clip_deadline_slack_secs")]
    pub clip_deadline_slack_secs: u64,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_status_log() -> String {
    "dualcam_status.log".to_string()
}

fn default_clip_duration_secs() -> u64 {
    60
}

fn default_clip_interval_minutes() -> u64 {
    10
}

fn default_still_delay_secs() -> u64 {
    3
}

fn default_idle_poll_secs() -> u64 {
    5
}

fn default_min_artifact_bytes() -> u64 {
    10_000
}

fn default_still_deadline_secs() -> u64 {
    15
}

fn default_clip_deadline_slack_secs() -> u64 {
    10
}

impl Default for CaptureSection {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            status_log: default_status_log(),
            clip_duration_secs: default_clip_duration_secs(),
            clip_interval_minutes: default_clip_interval_minutes(),
            still_delay_secs: default_still_delay_secs(),
            idle_poll_secs: default_idle_poll_secs(),
            min_artifact_bytes: default_min_artifact_bytes(),
            still_deadline_secs: default_still_deadline_secs(),
            clip_deadline_slack_secs: default_clip_deadline_slack_secs(),
        }
    }
}

impl CaptureSection {
    pub fn clip_duration(&self) -> Duration {
        Duration::from_secs(self.clip_duration_secs)
    }

    pub fn clip_interval(&self) -> Duration {
        Duration::from_secs(self.clip_interval_minutes * 60)
    }

    pub fn still_delay(&self) -> Duration {
        Duration::from_secs(self.still_delay_secs)
    }

    pub fn idle_poll(&self) -> Duration {
        Duration::from_secs(self.idle_poll_secs)
    }

    /// Deadline for a still capture: fixed bound over the tool runtime.
    pub fn still_deadline(&self) -> Duration {
        Duration::from_secs(self.still_deadline_secs)
    }

    /// Deadline for a motion clip: requested duration plus fixed slack, so
    /// longer clips get proportionally more grace.
    pub fn clip_deadline(&self) -> Duration {
        Duration::from_secs(self.clip_duration_secs + self.clip_deadline_slack_secs)
    }

    /// Full path of the status log file.
    pub fn status_log_path(&self) -> PathBuf {
        self.output_dir.join(&self.status_log)
    }
}

/// `[gate]` section: where the boolean gating signal is read from.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct GateSection {
    /// Path to a GPIO value file exported through sysfs ("0"/"1").
    ///
    /// If absent, the gate is treated as always high (ungated bench rig).
    #[serde(default)]
    pub value_path: Option<PathBuf>,
}
