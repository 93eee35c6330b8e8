// src/capture/command.rs

//! Capture tool command construction.
//!
//! Builds ordered argument lists for raspistill (stills) and raspivid
//! (motion clips) from the configured optics parameters. Auto white
//! balance is always off; explicit gains are passed instead.

use std::path::Path;
use std::time::Duration;

use crate::config::model::CameraSection;
use crate::exec::CommandSpec;

/// Tool runtime handed to raspistill via `-t`, in milliseconds.
///
/// The tool previews for this long before capturing the frame.
pub const STILL_TOOL_RUNTIME_MS: u64 = 500;

/// JPEG quality for stills (`-q`).
const STILL_QUALITY: u32 = 100;

/// Command for a single still frame, writing to `output`.
pub fn still_command(camera: &CameraSection, output: &Path) -> CommandSpec {
    CommandSpec::new("raspistill")
        .arg("-n")
        .arg("-q")
        .arg(STILL_QUALITY.to_string())
        .arg("-w")
        .arg(camera.still_width.to_string())
        .arg("-h")
        .arg(camera.still_height.to_string())
        .arg("-awb")
        .arg("off")
        .arg("-awbg")
        .arg(awb_gains(camera))
        .arg("-ISO")
        .arg(camera.iso.to_string())
        .arg("-ss")
        .arg(camera.shutter_us.to_string())
        .arg("-t")
        .arg(STILL_TOOL_RUNTIME_MS.to_string())
        .arg("-o")
        .arg(output.display().to_string())
}

/// Command for a motion clip of `clip_duration`, writing to `output`.
pub fn clip_command(
    camera: &CameraSection,
    clip_duration: Duration,
    output: &Path,
) -> CommandSpec {
    CommandSpec::new("raspivid")
        .arg("-n")
        .arg("-w")
        .arg(camera.clip_width.to_string())
        .arg("-h")
        .arg(camera.clip_height.to_string())
        .arg("-awb")
        .arg("off")
        .arg("-awbg")
        .arg(awb_gains(camera))
        .arg("-ISO")
        .arg(camera.iso.to_string())
        .arg("-fps")
        .arg(camera.fps.to_string())
        .arg("-ss")
        .arg(camera.shutter_us.to_string())
        .arg("-t")
        .arg(clip_duration.as_millis().to_string())
        .arg("-o")
        .arg(output.display().to_string())
}

fn awb_gains(camera: &CameraSection) -> String {
    format!("{:.1},{:.1}", camera.awb_red, camera.awb_blue)
}
