// src/lib.rs

pub mod capture;
pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod gate;
pub mod logging;
pub mod schedule;
pub mod types;

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::watch;
use tracing::{debug, info};

use crate::capture::command::{clip_command, still_command};
use crate::capture::{AcquisitionController, OutputValidator, StatusRecorder, artifact_path};
use crate::cli::CliArgs;
use crate::config::loader::load_and_validate;
use crate::config::model::ConfigFile;
use crate::exec::RealProcessRunner;
use crate::fs::{FileSystem, RealFileSystem};
use crate::gate::{AlwaysHigh, Gate, SysfsGate};
use crate::schedule::{LoopOptions, SchedulerLoop};
use crate::types::CaptureMode;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - artifact namespace bootstrap
/// - gate + controller + scheduler loop
/// - Ctrl-C / SIGTERM handling
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = load_and_validate(&args.config)?;

    if args.dry_run {
        print_dry_run(&cfg);
        return Ok(());
    }

    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);

    // The validator expects both namespaces to exist before the first
    // cycle.
    bootstrap_namespaces(fs.as_ref(), &cfg)?;

    let validator = OutputValidator::new(
        Arc::clone(&fs),
        cfg.capture.output_dir.clone(),
        cfg.capture.min_artifact_bytes,
    );
    let recorder = StatusRecorder::new(Arc::clone(&fs), cfg.capture.status_log_path());
    let controller = AcquisitionController::new(
        RealProcessRunner,
        validator,
        recorder,
        cfg.camera.clone(),
        cfg.capture.clone(),
    );

    let gate: Box<dyn Gate> = match &cfg.gate.value_path {
        Some(path) => {
            info!(?path, "gating on sysfs GPIO value");
            Box::new(SysfsGate::new(path.clone()))
        }
        None => {
            info!("no gate configured; acquisition is always enabled");
            Box::new(AlwaysHigh)
        }
    };

    // Ctrl-C / SIGTERM → graceful shutdown between cycles.
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        wait_for_shutdown_signal().await;
        let _ = shutdown_tx.send(true);
    });

    let options = LoopOptions {
        once: args.once,
        max_polls: None,
    };

    SchedulerLoop::new(controller, gate, cfg.capture.clone(), options, shutdown_rx)
        .run()
        .await?;
    Ok(())
}

/// Create the per-mode artifact namespaces if absent.
fn bootstrap_namespaces(fs: &dyn FileSystem, cfg: &ConfigFile) -> Result<()> {
    for mode in [CaptureMode::StillImage, CaptureMode::MotionClip] {
        let dir = cfg.capture.output_dir.join(mode.namespace());
        if fs.is_dir(&dir) {
            debug!(?dir, "found artifact namespace");
        } else {
            info!(?dir, "artifact namespace not found; creating it");
            fs.create_dir_all(&dir)?;
        }
    }
    Ok(())
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut sigterm = match signal(SignalKind::terminate()) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("failed to listen for SIGTERM: {e}");
                let _ = tokio::signal::ctrl_c().await;
                return;
            }
        };

        tokio::select! {
            _ = tokio::signal::ctrl_c() => info!("received Ctrl-C, shutting down"),
            _ = sigterm.recv() => info!("received SIGTERM, shutting down"),
        }
    }

    #[cfg(not(unix))]
    {
        if let Err(e) = tokio::signal::ctrl_c().await {
            eprintln!("failed to listen for Ctrl+C: {e}");
        }
    }
}

/// Simple dry-run output: print resolved settings and the commands one
/// cycle of each mode would run.
fn print_dry_run(cfg: &ConfigFile) {
    println!("dualcam dry-run");
    println!("  capture.output_dir = {:?}", cfg.capture.output_dir);
    println!("  capture.status_log = {}", cfg.capture.status_log);
    println!(
        "  capture.clip_interval_minutes = {}",
        cfg.capture.clip_interval_minutes
    );
    println!(
        "  capture.min_artifact_bytes = {}",
        cfg.capture.min_artifact_bytes
    );
    println!(
        "  deadlines: still = {:?}, clip = {:?}",
        cfg.capture.still_deadline(),
        cfg.capture.clip_deadline()
    );
    match &cfg.gate.value_path {
        Some(path) => println!("  gate.value_path = {:?}", path),
        None => println!("  gate: always high"),
    }
    println!();

    let ts = 0.0;
    let still_out = artifact_path(&cfg.capture.output_dir, CaptureMode::StillImage, ts);
    let clip_out = artifact_path(&cfg.capture.output_dir, CaptureMode::MotionClip, ts);
    println!(
        "still: {}",
        still_command(&cfg.camera, &still_out).display_line()
    );
    println!(
        "clip:  {}",
        clip_command(&cfg.camera, cfg.capture.clip_duration(), &clip_out).display_line()
    );

    debug!("dry-run complete (no execution)");
}
