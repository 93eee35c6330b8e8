// tests/property/error_counter.rs

use crate::common::Harness;

use proptest::prelude::*;

use dualcam::capture::artifact_path;
use dualcam::types::CaptureMode;
use dualcam_test_utils::builders::ConfigFileBuilder;

/// On-disk state of the artifact for one scripted cycle.
#[derive(Debug, Clone, Copy)]
enum Artifact {
    Missing,
    Undersized,
    Valid,
}

#[derive(Debug, Clone, Copy)]
struct ScriptedCycle {
    trigger_motion: bool,
    timed_out: bool,
    artifact: Artifact,
}

impl ScriptedCycle {
    fn failed(&self) -> bool {
        self.timed_out || !matches!(self.artifact, Artifact::Valid)
    }
}

fn cycle_strategy() -> impl Strategy<Value = ScriptedCycle> {
    (
        any::<bool>(),
        any::<bool>(),
        prop_oneof![
            Just(Artifact::Missing),
            Just(Artifact::Undersized),
            Just(Artifact::Valid),
        ],
    )
        .prop_map(|(trigger_motion, timed_out, artifact)| ScriptedCycle {
            trigger_motion,
            timed_out,
            artifact,
        })
}

proptest! {
    /// The error counter equals the number of failed cycles so far, never
    /// decreases, and never moves by more than 1 per cycle.
    #[test]
    fn error_counter_tracks_failed_cycles(
        cycles in proptest::collection::vec(cycle_strategy(), 1..40)
    ) {
        let rt = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();

        rt.block_on(async {
            let cfg = ConfigFileBuilder::new().build();
            let min = cfg.capture.min_artifact_bytes;
            let output_dir = cfg.capture.output_dir.clone();
            let script: Vec<bool> = cycles.iter().map(|c| c.timed_out).collect();
            let mut h = Harness::new(cfg, script);

            let mut expected_errors = 0u64;

            for (i, cycle) in cycles.iter().enumerate() {
                // Distinct timestamp per attempt, as the loop guarantees.
                let ts = 1000.0 + (i as f64) * 10.0;
                let mode = if cycle.trigger_motion {
                    CaptureMode::MotionClip
                } else {
                    CaptureMode::StillImage
                };

                match cycle.artifact {
                    Artifact::Missing => {}
                    Artifact::Undersized => {
                        h.fs.add_file_of_size(artifact_path(&output_dir, mode, ts), min as usize);
                    }
                    Artifact::Valid => {
                        h.fs.add_file_of_size(
                            artifact_path(&output_dir, mode, ts),
                            min as usize + 1,
                        );
                    }
                }

                let before = h.controller.error_count();
                let report = h.controller.run_cycle(cycle.trigger_motion, ts).await.unwrap();
                let after = h.controller.error_count();

                prop_assert_eq!(report.mode, mode);
                prop_assert_eq!(report.failed, cycle.failed());
                prop_assert!(after >= before);
                prop_assert!(after - before <= 1);

                if cycle.failed() {
                    expected_errors += 1;
                }
                prop_assert_eq!(after, expected_errors);
            }

            Ok(())
        })?;
    }
}
