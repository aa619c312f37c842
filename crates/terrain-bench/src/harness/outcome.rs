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

//! What a sweep produced: measured cells, gaps and dropped runs.

use crate::core::{CellKey, ConfigCell};
use crate::harness::aggregator::AggregatedResult;
use crate::harness::baseline::BaselineStatus;
use crate::harness::planner::SweepPlan;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a single run contributed nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RunFailure {
    /// The run exceeded its ceiling and was killed.
    Timeout {
        /// Seconds waited.
        after_secs: f64,
    },
    /// The workload exited with a non-zero status.
    ProcessFailed {
        /// Exit code, if any.
        status: Option<i32>,
        /// Captured standard error.
        stderr: String,
    },
    /// The workload could not be started.
    LaunchFailed {
        /// OS error.
        message: String,
    },
    /// The workload's output was not a valid telemetry record.
    MalformedTelemetry {
        /// Decoder message.
        reason: String,
    },
    /// The sweep was interrupted while the run was in flight.
    ///
    /// Never recorded as a dropped run.
    Interrupted,
}

impl fmt::Display for RunFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunFailure::Timeout { after_secs } => write!(f, "timed out after {:.0}s", after_secs),
            RunFailure::ProcessFailed { status, stderr } => {
                match status {
                    Some(code) => write!(f, "exited with status {}", code)?,
                    None => write!(f, "terminated by signal")?,
                }
                let stderr = stderr.trim();
                if !stderr.is_empty() {
                    write!(f, ": {}", stderr)?;
                }
                Ok(())
            }
            RunFailure::LaunchFailed { message } => write!(f, "could not launch: {}", message),
            RunFailure::MalformedTelemetry { reason } => write!(f, "malformed telemetry: {}", reason),
            RunFailure::Interrupted => write!(f, "interrupted"),
        }
    }
}

/// A run that was attempted and dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DroppedRun {
    /// The run's coordinates.
    pub cell: ConfigCell,
    /// Why it was dropped.
    pub failure: RunFailure,
}

/// A cell whose every attempted run was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellGap {
    /// The missing cell.
    pub key: CellKey,
    /// Runs attempted before giving up on the cell.
    pub attempted: u32,
}

/// Annotated results for one resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionResults {
    /// Square map resolution.
    pub resolution: u32,
    /// Measured cells, in sweep order.
    pub cells: Vec<AggregatedResult>,
    /// Cells that produced no data.
    pub gaps: Vec<CellGap>,
}

impl ResolutionResults {
    /// Creates an empty result set.
    pub fn new(resolution: u32) -> Self {
        Self {
            resolution,
            cells: Vec::new(),
            gaps: Vec::new(),
        }
    }

    /// Gets the cell measured at `threads`.
    pub fn cell(&self, threads: u32) -> Option<&AggregatedResult> {
        self.cells.iter().find(|c| c.threads == threads)
    }

    /// The reference cell, if the baseline was measured.
    pub fn baseline(&self) -> Option<&AggregatedResult> {
        self.cells
            .iter()
            .find(|c| c.baseline == BaselineStatus::Reference)
    }

    /// The cell with the highest measured total speedup.
    ///
    /// Cells without a baseline are not candidates. Ties go to the cell
    /// with fewer threads.
    pub fn recommended(&self) -> Option<&AggregatedResult> {
        self.cells
            .iter()
            .filter(|c| c.has_speedup())
            .fold(None, |best: Option<&AggregatedResult>, cell| match best {
                Some(b) if b.total_speedup > cell.total_speedup => Some(b),
                Some(b) if b.total_speedup == cell.total_speedup && b.threads <= cell.threads => {
                    Some(b)
                }
                _ => Some(cell),
            })
    }
}

/// Everything a sweep execution produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepOutcome {
    /// The concrete grid that was swept.
    pub plan: SweepPlan,
    /// Results per resolution that was reached.
    pub resolutions: Vec<ResolutionResults>,
    /// Runs dropped along the way.
    pub dropped_runs: Vec<DroppedRun>,
    /// Whether the user stopped the sweep early.
    pub interrupted: bool,
}

impl SweepOutcome {
    /// Every measured cell, in sweep order.
    pub fn cells(&self) -> impl Iterator<Item = &AggregatedResult> {
        self.resolutions.iter().flat_map(|r| r.cells.iter())
    }

    /// Every empty cell, in sweep order.
    pub fn gaps(&self) -> impl Iterator<Item = &CellGap> {
        self.resolutions.iter().flat_map(|r| r.gaps.iter())
    }

    /// Number of measured cells.
    pub fn measured_count(&self) -> usize {
        self.cells().count()
    }

    /// Gets one measured cell.
    pub fn cell(&self, key: CellKey) -> Option<&AggregatedResult> {
        self.resolutions
            .iter()
            .find(|r| r.resolution == key.resolution)
            .and_then(|r| r.cell(key.thread_count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::StageTimes;

    fn result(threads: u32, speedup: f64, status: BaselineStatus) -> AggregatedResult {
        AggregatedResult {
            resolution: 256,
            threads,
            total_time: 10.0 / speedup,
            std_dev_total_time: 0.0,
            min_total_time: 10.0 / speedup,
            max_total_time: 10.0 / speedup,
            peak_memory_kb: 1024.0,
            wall_clock_time: 10.0 / speedup,
            stage_times: StageTimes::new(),
            num_runs: 3,
            speedup_per_stage: StageTimes::new(),
            total_speedup: speedup,
            efficiency: Some(speedup / f64::from(threads)),
            baseline: status,
        }
    }

    #[test]
    fn test_recommended_highest_speedup() {
        let mut results = ResolutionResults::new(256);
        results.cells = vec![
            result(1, 1.0, BaselineStatus::Reference),
            result(4, 3.1, BaselineStatus::Measured),
            result(8, 2.7, BaselineStatus::Measured),
        ];
        assert_eq!(results.recommended().map(|c| c.threads), Some(4));
        assert_eq!(results.baseline().map(|c| c.threads), Some(1));
    }

    #[test]
    fn test_recommended_tie_prefers_fewer_threads() {
        let mut results = ResolutionResults::new(256);
        results.cells = vec![
            result(1, 1.0, BaselineStatus::Reference),
            result(8, 2.0, BaselineStatus::Measured),
            result(4, 2.0, BaselineStatus::Measured),
        ];
        assert_eq!(results.recommended().map(|c| c.threads), Some(4));
    }

    #[test]
    fn test_recommended_ignores_placeholders() {
        let mut results = ResolutionResults::new(256);
        results.cells = vec![
            result(2, 1.0, BaselineStatus::Unavailable),
            result(4, 1.0, BaselineStatus::Unavailable),
        ];
        assert!(results.recommended().is_none());
        assert!(results.baseline().is_none());
    }

    #[test]
    fn test_failure_display() {
        let failure = RunFailure::ProcessFailed {
            status: Some(2),
            stderr: "bad args\n".into(),
        };
        assert_eq!(failure.to_string(), "exited with status 2: bad args");
        let timeout = RunFailure::Timeout { after_secs: 3600.2 };
        assert_eq!(timeout.to_string(), "timed out after 3600s");
        assert_eq!(RunFailure::Interrupted.to_string(), "interrupted");
    }
}
