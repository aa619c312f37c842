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

//! JSON reporter: per-cell records and the sweep-wide summary.

use crate::core::{resolution_label, CellKey};
use crate::error::{BenchError, Result};
use crate::harness::{AggregatedResult, CellGap, DroppedRun, SweepOutcome};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Suffix shared by every per-cell record file.
pub const CELL_RECORD_SUFFIX: &str = "_threads_result.json";

/// Path of a cell's record inside its resolution directory.
pub fn cell_record_path(resolution_dir: &Path, key: CellKey) -> PathBuf {
    resolution_dir.join(format!("{}{}", key.thread_count, CELL_RECORD_SUFFIX))
}

/// Writes one aggregated cell, replacing any previous record.
pub fn export_cell_record(result: &AggregatedResult, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    fs::write(path, json).map_err(|e| BenchError::io_error(path, e))
}

/// Reads a record written by [`export_cell_record`].
pub fn load_cell_record(path: &Path) -> Result<AggregatedResult> {
    let contents = fs::read_to_string(path).map_err(|e| BenchError::io_error(path, e))?;
    Ok(serde_json::from_str(&contents)?)
}

/// Sweep parameters echoed at the top of the summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepInfo {
    /// Resolutions planned.
    pub resolutions: Vec<u32>,
    /// Concrete thread counts planned.
    pub thread_counts: Vec<u32>,
    /// What `MAX` resolved to on this host.
    pub max_threads: u32,
    /// Repetitions per cell.
    pub runs_per_config: u32,
    /// Workload seed.
    pub seed: u32,
    /// When the summary was written.
    pub timestamp: String,
    /// Whether the sweep was cut short.
    pub interrupted: bool,
}

/// One resolution's block in the summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionSummary {
    /// Label such as `256x256`.
    pub resolution: String,
    /// Measured cells.
    pub cells: Vec<AggregatedResult>,
    /// Cells with no data.
    pub gaps: Vec<CellGap>,
}

/// Machine-readable summary of a whole sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepSummary {
    /// Sweep parameters.
    pub benchmark_info: SweepInfo,
    /// Results grouped by resolution.
    pub results: Vec<ResolutionSummary>,
    /// Every dropped run with its reason.
    pub dropped_runs: Vec<DroppedRun>,
}

impl SweepSummary {
    /// Builds the summary for an outcome.
    pub fn from_outcome(outcome: &SweepOutcome, timestamp: &str) -> Self {
        Self {
            benchmark_info: SweepInfo {
                resolutions: outcome.plan.resolutions.clone(),
                thread_counts: outcome.plan.thread_counts.clone(),
                max_threads: outcome.plan.max_threads,
                runs_per_config: outcome.plan.runs,
                seed: outcome.plan.seed,
                timestamp: timestamp.to_string(),
                interrupted: outcome.interrupted,
            },
            results: outcome
                .resolutions
                .iter()
                .map(|r| ResolutionSummary {
                    resolution: resolution_label(r.resolution),
                    cells: r.cells.clone(),
                    gaps: r.gaps.clone(),
                })
                .collect(),
            dropped_runs: outcome.dropped_runs.clone(),
        }
    }
}

/// Writes the sweep summary.
pub fn export_sweep_summary(outcome: &SweepOutcome, timestamp: &str, path: &Path) -> Result<()> {
    let summary = SweepSummary::from_outcome(outcome, timestamp);
    let json = serde_json::to_string_pretty(&summary)?;
    fs::write(path, json).map_err(|e| BenchError::io_error(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{StageTimes, TelemetryRecord};
    use crate::harness::{aggregate, BaselineStatus, BaselineTracker};
    use tempfile::TempDir;

    fn annotated() -> AggregatedResult {
        let stage_times: StageTimes = [("hydraulic_erosion".to_string(), 2.0)].into_iter().collect();
        let record = TelemetryRecord {
            total_time: 2.5,
            peak_memory_kb: 4096,
            stage_times,
            wall_clock_time: 2.7,
            resolution: Some("256x256".into()),
            threads: Some(1),
        };
        let result = aggregate(CellKey::new(256, 1), &[record]).unwrap();
        BaselineTracker::new().annotate(result)
    }

    #[test]
    fn test_cell_record_path() {
        let path = cell_record_path(Path::new("out/256x256"), CellKey::new(256, 4));
        assert_eq!(path, PathBuf::from("out/256x256/4_threads_result.json"));
    }

    #[test]
    fn test_export_and_load_cell_record() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("1_threads_result.json");
        let result = annotated();

        export_cell_record(&result, &path).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"num_runs\": 1"));
        assert!(content.contains("\"baseline\": \"reference\""));
        assert!(content.contains("speedup_per_stage"));

        let loaded = load_cell_record(&path).unwrap();
        assert_eq!(loaded.baseline, BaselineStatus::Reference);
        assert_eq!(loaded.total_time, 2.5);
    }

    #[test]
    fn test_load_missing_record() {
        let dir = TempDir::new().unwrap();
        let err = load_cell_record(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, BenchError::Io { .. }));
    }
}
