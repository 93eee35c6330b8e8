// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{DualcamError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::DualcamError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.camera, raw.capture, raw.gate))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_camera(cfg)?;
    validate_capture(cfg)?;
    Ok(())
}

fn validate_camera(cfg: &RawConfigFile) -> Result<()> {
    let cam = &cfg.camera;

    for (name, value) in [
        ("still_width", cam.still_width),
        ("still_height", cam.still_height),
        ("clip_width", cam.clip_width),
        ("clip_height", cam.clip_height),
        ("fps", cam.fps),
    ] {
        if value == 0 {
            return Err(DualcamError::ConfigError(format!(
                "[camera].{name} must be >= 1 (got 0)"
            )));
        }
    }

    if !(cam.awb_red.is_finite() && cam.awb_red > 0.0)
        || !(cam.awb_blue.is_finite() && cam.awb_blue > 0.0)
    {
        return Err(DualcamError::ConfigError(format!(
            "[camera].awb_red/awb_blue must be positive finite gains (got {}, {})",
            cam.awb_red, cam.awb_blue
        )));
    }

    Ok(())
}

fn validate_capture(cfg: &RawConfigFile) -> Result<()> {
    let cap = &cfg.capture;

    for (name, value) in [
        ("clip_duration_secs", cap.clip_duration_secs),
        ("clip_interval_minutes", cap.clip_interval_minutes),
        ("min_artifact_bytes", cap.min_artifact_bytes),
        ("still_deadline_secs", cap.still_deadline_secs),
    ] {
        if value == 0 {
            return Err(DualcamError::ConfigError(format!(
                "[capture].{name} must be >= 1 (got 0)"
            )));
        }
    }

    if cap.status_log.is_empty() {
        return Err(DualcamError::ConfigError(
            "[capture].status_log must not be empty".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::config::model::{ConfigFile, RawConfigFile};

    #[test]
    fn defaults_validate() {
        let raw = RawConfigFile::default();
        assert!(ConfigFile::try_from(raw).is_ok());
    }

    #[test]
    fn rejects_zero_clip_duration() {
        let mut raw = RawConfigFile::default();
        raw.capture.clip_duration_secs = 0;
        assert!(ConfigFile::try_from(raw).is_err());
    }

    #[test]
    fn rejects_zero_fps() {
        let mut raw = RawConfigFile::default();
        raw.camera.fps = 0;
        assert!(ConfigFile::try_from(raw).is_err());
    }

    #[test]
    fn rejects_nonpositive_awb_gain() {
        let mut raw = RawConfigFile::default();
        raw.camera.awb_blue = 0.0;
        assert!(ConfigFile::try_from(raw).is_err());
    }
}
