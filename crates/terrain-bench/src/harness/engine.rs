// Terrain Bench - Terrain Generation Benchmark Sweeps
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The sweep engine.
//!
//! One engine drives every entry point: it walks the planned grid
//! sequentially, aggregates each cell's surviving runs, computes speedups
//! once a resolution is complete and hands each finished resolution to the
//! [`ReportEmitter`] before moving on.

use crate::core::{CellKey, ConfigCell, SweepConfig, TelemetryRecord};
use crate::error::Result;
use crate::harness::aggregator::aggregate;
use crate::harness::baseline::BaselineTracker;
use crate::harness::interrupt::Interrupt;
use crate::harness::invoker::{ProcessInvoker, Workload};
use crate::harness::outcome::{CellGap, DroppedRun, ResolutionResults, RunFailure, SweepOutcome};
use crate::harness::parser::decode_outcome;
use crate::harness::planner::SweepPlan;
use crate::harness::smoke::{run_smoke, SmokeReport};
use crate::reporters::ReportEmitter;
use std::path::Path;
use std::thread;
use tracing::{info, warn};

/// Timestamp format used in every report.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn timestamp() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Runs a [`SweepPlan`] against a [`Workload`].
pub struct SweepEngine<W: Workload> {
    config: SweepConfig,
    plan: SweepPlan,
    workload: W,
    interrupt: Interrupt,
}

impl SweepEngine<ProcessInvoker> {
    /// Builds an engine that launches the configured executable.
    ///
    /// # Errors
    ///
    /// Fails before any work starts if the configuration is invalid or the
    /// executable does not exist.
    pub fn for_process(config: SweepConfig, interrupt: Interrupt) -> Result<Self> {
        config.validate()?;
        config.check_executable()?;
        let invoker = ProcessInvoker::new(&config.executable, config.timeout)
            .with_interrupt(interrupt.clone());
        Ok(Self::new(config, invoker)?.with_interrupt(interrupt))
    }
}

impl<W: Workload> SweepEngine<W> {
    /// Validates `config` and plans the sweep.
    pub fn new(config: SweepConfig, workload: W) -> Result<Self> {
        config.validate()?;
        let plan = SweepPlan::new(&config);
        Ok(Self {
            config,
            plan,
            workload,
            interrupt: Interrupt::new(),
        })
    }

    /// Replaces the plan, e.g. to pin `MAX` to a known value.
    pub fn with_plan(mut self, plan: SweepPlan) -> Self {
        self.plan = plan;
        self
    }

    /// Shares a stop flag with the engine.
    pub fn with_interrupt(mut self, interrupt: Interrupt) -> Self {
        self.interrupt = interrupt;
        self
    }

    pub fn plan(&self) -> &SweepPlan {
        &self.plan
    }

    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    /// Invokes the workload once for `cell` without aggregating or emitting
    /// anything.
    pub fn smoke(&self, cell: ConfigCell, artifact_root: Option<&Path>) -> SmokeReport {
        run_smoke(&self.workload, cell, artifact_root)
    }

    /// Runs the whole sweep and writes every report.
    ///
    /// Failed runs and empty cells are recorded in the returned outcome. An
    /// interruption stops scheduling and still emits reports for everything
    /// completed so far.
    ///
    /// # Errors
    ///
    /// Only failures to write artifacts abort the sweep.
    pub fn run(&self) -> Result<SweepOutcome> {
        let emitter = ReportEmitter::new(&self.config.output_dir);
        let mut baselines = BaselineTracker::new();
        let mut outcome = SweepOutcome {
            plan: self.plan.clone(),
            resolutions: Vec::new(),
            dropped_runs: Vec::new(),
            interrupted: false,
        };

        info!(
            resolutions = ?self.plan.resolutions,
            threads = ?self.plan.thread_counts,
            runs = self.plan.runs,
            max_threads = self.plan.max_threads,
            total = self.plan.total_runs(),
            "starting sweep"
        );

        for &resolution in &self.plan.resolutions {
            if self.interrupt.is_triggered() {
                outcome.interrupted = true;
                break;
            }

            let mut results = ResolutionResults::new(resolution);
            let mut cells = Vec::new();

            for &threads in &self.plan.thread_counts {
                let key = CellKey::new(resolution, threads);
                let (records, attempted) = self.measure_cell(key, &mut outcome);

                match aggregate(key, &records) {
                    Some(cell) => {
                        info!(
                            cell = %key,
                            runs = cell.num_runs,
                            mean_secs = cell.total_time,
                            std_dev_secs = cell.std_dev_total_time,
                            "cell measured"
                        );
                        cells.push(cell);
                    }
                    None if attempted > 0 => {
                        warn!(cell = %key, attempted, "every run failed, cell omitted");
                        results.gaps.push(CellGap { key, attempted });
                    }
                    None => {}
                }

                if outcome.interrupted {
                    break;
                }
            }

            if outcome.interrupted && cells.is_empty() && results.gaps.is_empty() {
                break;
            }

            results.cells = baselines.annotate_resolution(cells);
            emitter.emit_resolution(&results, &timestamp())?;
            outcome.resolutions.push(results);

            if outcome.interrupted {
                break;
            }
        }

        if outcome.interrupted {
            warn!(
                completed = outcome.measured_count(),
                "sweep interrupted, writing partial reports"
            );
        }

        emitter.emit_sweep(&outcome, &timestamp())?;
        info!(
            measured = outcome.measured_count(),
            gaps = outcome.gaps().count(),
            dropped = outcome.dropped_runs.len(),
            "sweep complete"
        );
        Ok(outcome)
    }

    /// Runs every repetition of one cell. Returns the surviving records and
    /// how many runs were actually attempted.
    fn measure_cell(&self, key: CellKey, outcome: &mut SweepOutcome) -> (Vec<TelemetryRecord>, u32) {
        let mut records = Vec::new();
        let mut attempted = 0;

        for cell in self.plan.runs_for(key.resolution, key.thread_count) {
            if self.interrupt.is_triggered() {
                outcome.interrupted = true;
                break;
            }

            let invocation = self.workload.invoke(&cell);
            let launched_ok = invocation.is_success();

            match decode_outcome(invocation, &cell) {
                Ok(record) => records.push(record),
                Err(RunFailure::Interrupted) => {
                    outcome.interrupted = true;
                    break;
                }
                Err(failure) => {
                    warn!(cell = %cell, %failure, "run dropped");
                    outcome.dropped_runs.push(DroppedRun { cell, failure });
                }
            }
            attempted += 1;

            if launched_ok && !self.config.pause.is_zero() {
                thread::sleep(self.config.pause);
            }
        }

        (records, attempted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ThreadSpec;
    use crate::harness::invoker::InvocationOutcome;
    use std::sync::Mutex;
    use std::time::Duration;
    use tempfile::TempDir;

    /// Replies with `total_time = 8 / threads` and counts invocations.
    struct Linear {
        calls: Mutex<Vec<ConfigCell>>,
    }

    impl Workload for Linear {
        fn invoke(&self, cell: &ConfigCell) -> InvocationOutcome {
            self.calls.lock().unwrap().push(*cell);
            let t = 8.0 / f64::from(cell.thread_count);
            InvocationOutcome::Success {
                stdout: format!(
                    r#"{{"total_time":{t},"peak_memory_kb":100,"stage_times":{{"hydraulic_erosion":{t}}},"threads":{}}}"#,
                    cell.thread_count
                ),
                wall_clock: Duration::from_millis(5),
            }
        }
    }

    fn config(out: &TempDir) -> SweepConfig {
        SweepConfig::new("unused")
            .with_resolutions(&[256])
            .with_threads(&[ThreadSpec::Fixed(2), ThreadSpec::Fixed(1)])
            .with_runs(2)
            .with_pause(Duration::ZERO)
            .with_output_dir(out.path())
    }

    #[test]
    fn test_invocation_order() {
        let out = TempDir::new().unwrap();
        let engine = SweepEngine::new(config(&out), Linear { calls: Mutex::new(Vec::new()) }).unwrap();
        engine.run().unwrap();

        let calls = engine.workload.calls.lock().unwrap();
        let order: Vec<(u32, u32)> = calls.iter().map(|c| (c.thread_count, c.run_index)).collect();
        assert_eq!(order, vec![(2, 1), (2, 2), (1, 1), (1, 2)]);
    }

    #[test]
    fn test_baseline_after_other_cells() {
        let out = TempDir::new().unwrap();
        let engine = SweepEngine::new(config(&out), Linear { calls: Mutex::new(Vec::new()) }).unwrap();
        let outcome = engine.run().unwrap();

        let two = outcome.cell(CellKey::new(256, 2)).unwrap();
        assert!(two.has_speedup());
        assert_eq!(two.total_speedup, 2.0);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let out = TempDir::new().unwrap();
        let result = SweepEngine::new(config(&out).with_runs(0), Linear { calls: Mutex::new(Vec::new()) });
        assert!(result.is_err());
    }

    #[test]
    fn test_for_process_requires_executable() {
        let out = TempDir::new().unwrap();
        let config = config(&out).with_executable(out.path().join("missing.exe"));
        let result = SweepEngine::for_process(config, Interrupt::new());
        assert!(matches!(
            result,
            Err(crate::error::BenchError::WorkloadUnavailable { .. })
        ));
    }
}
