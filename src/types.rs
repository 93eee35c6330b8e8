use std::fmt;
use std::str::FromStr;
use serde::Deserialize;

/// Acquisition mode for one capture cycle.
///
/// - `StillImage`: a single static frame (raspistill).
/// - `MotionClip`: a continuous-duration video segment (raspivid).
///
/// The status log and the on-disk layout both key off this; anything
/// mode-shaped outside tests goes through this enum, never a raw integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptureMode {
    StillImage,
    MotionClip,
}

impl CaptureMode {
    /// Field value used in the status log: 0 = still image, 1 = motion clip.
    ///
    /// External monitoring parses these literals; do not renumber.
    pub fn log_field(self) -> u8 {
        match self {
            CaptureMode::StillImage => 0,
            CaptureMode::MotionClip => 1,
        }
    }

    /// Storage namespace (directory name) for artifacts of this mode.
    pub fn namespace(self) -> &'static str {
        match self {
            CaptureMode::StillImage => "images",
            CaptureMode::MotionClip => "videos",
        }
    }

    /// File extension for artifacts of this mode.
    pub fn extension(self) -> &'static str {
        match self {
            CaptureMode::StillImage => "jpg",
            CaptureMode::MotionClip => "h264",
        }
    }
}

impl fmt::Display for CaptureMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureMode::StillImage => write!(f, "still"),
            CaptureMode::MotionClip => write!(f, "clip"),
        }
    }
}

impl FromStr for CaptureMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "still" | "stillimage" | "image" => Ok(CaptureMode::StillImage),
            "clip" | "motionclip" | "video" => Ok(CaptureMode::MotionClip),
            other => Err(format!(
                "invalid capture mode: {other} (expected \"still\" or \"clip\")"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_fields_are_stable() {
        assert_eq!(CaptureMode::StillImage.log_field(), 0);
        assert_eq!(CaptureMode::MotionClip.log_field(), 1);
    }

    #[test]
    fn namespaces_and_extensions() {
        assert_eq!(CaptureMode::StillImage.namespace(), "images");
        assert_eq!(CaptureMode::StillImage.extension(), "jpg");
        assert_eq!(CaptureMode::MotionClip.namespace(), "videos");
        assert_eq!(CaptureMode::MotionClip.extension(), "h264");
    }

    #[test]
    fn parses_from_str() {
        assert_eq!("still".parse::<CaptureMode>(), Ok(CaptureMode::StillImage));
        assert_eq!("video".parse::<CaptureMode>(), Ok(CaptureMode::MotionClip));
        assert!("burst".parse::<CaptureMode>().is_err());
    }
}
