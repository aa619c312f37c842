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

//! Writes every sweep artifact under one output root.
//!
//! ```text
//! <output>/
//! ├── MASTER_BENCHMARK_REPORT.md
//! ├── benchmark_summary.csv
//! ├── benchmark_summary.json
//! └── 256x256/
//!     ├── BENCHMARK_REPORT.md
//!     ├── summary.csv
//!     ├── 1_threads_result.json
//!     └── 2_threads_result.json
//! ```
//!
//! Every write replaces what a previous sweep left for the same resolution.

use crate::core::resolution_label;
use crate::error::{BenchError, Result};
use crate::harness::{ResolutionResults, SweepOutcome};
use crate::reporters::json::{
    cell_record_path, export_cell_record, export_sweep_summary, CELL_RECORD_SUFFIX,
};
use crate::reporters::markdown::{
    export_master_report, export_resolution_report, MASTER_REPORT, RESOLUTION_REPORT,
};
use crate::reporters::table::export_summary_csv;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Sweep-wide CSV file name.
pub const SWEEP_CSV: &str = "benchmark_summary.csv";
/// Sweep-wide JSON file name.
pub const SWEEP_JSON: &str = "benchmark_summary.json";
/// Per-resolution CSV file name.
pub const RESOLUTION_CSV: &str = "summary.csv";

#[derive(Debug, Clone)]
pub struct ReportEmitter {
    output_dir: PathBuf,
}

impl ReportEmitter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// `<output>/<res>x<res>`
    pub fn resolution_dir(&self, resolution: u32) -> PathBuf {
        self.output_dir.join(resolution_label(resolution))
    }

    /// Writes the per-cell records, the per-resolution CSV and the
    /// per-resolution report.
    pub fn emit_resolution(&self, results: &ResolutionResults, generated: &str) -> Result<()> {
        let dir = self.resolution_dir(results.resolution);
        create_dir(&dir)?;
        remove_stale_records(&dir)?;

        for cell in &results.cells {
            export_cell_record(cell, &cell_record_path(&dir, cell.key()))?;
        }
        export_summary_csv(&dir.join(RESOLUTION_CSV), &results.cells)?;
        export_resolution_report(results, generated, &dir.join(RESOLUTION_REPORT))?;

        info!(
            dir = %dir.display(),
            cells = results.cells.len(),
            gaps = results.gaps.len(),
            "resolution reports written"
        );
        Ok(())
    }

    /// Writes the sweep-wide JSON, CSV and master report.
    pub fn emit_sweep(&self, outcome: &SweepOutcome, generated: &str) -> Result<()> {
        create_dir(&self.output_dir)?;

        export_sweep_summary(outcome, generated, &self.output_dir.join(SWEEP_JSON))?;
        export_summary_csv(&self.output_dir.join(SWEEP_CSV), outcome.cells())?;
        export_master_report(outcome, generated, &self.output_dir.join(MASTER_REPORT))?;

        info!(dir = %self.output_dir.display(), "sweep reports written");
        Ok(())
    }
}

fn create_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| BenchError::io_error(dir, e))
}

/// Drops per-cell records a previous sweep wrote for thread counts that
/// this one did not measure.
fn remove_stale_records(dir: &Path) -> Result<()> {
    let entries = fs::read_dir(dir).map_err(|e| BenchError::io_error(dir, e))?;
    for entry in entries {
        let path = entry.map_err(|e| BenchError::io_error(dir, e))?.path();
        let stale = path
            .file_name()
            .and_then(|name| name.to_str())
            .map_or(false, |name| name.ends_with(CELL_RECORD_SUFFIX));
        if stale && path.is_file() {
            debug!(path = %path.display(), "removing stale cell record");
            fs::remove_file(&path).map_err(|e| BenchError::io_error(&path, e))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CellKey, TelemetryRecord};
    use crate::harness::{aggregate, BaselineTracker};
    use tempfile::TempDir;

    fn results(threads: &[u32]) -> ResolutionResults {
        let cells = threads
            .iter()
            .map(|&t| {
                let record = TelemetryRecord {
                    total_time: 8.0 / f64::from(t),
                    peak_memory_kb: 1024,
                    stage_times: [("hydraulic_erosion".to_string(), 8.0 / f64::from(t))]
                        .into_iter()
                        .collect(),
                    wall_clock_time: 8.0 / f64::from(t),
                    resolution: None,
                    threads: None,
                };
                aggregate(CellKey::new(256, t), &[record]).unwrap()
            })
            .collect();
        let mut results = ResolutionResults::new(256);
        results.cells = BaselineTracker::new().annotate_resolution(cells);
        results
    }

    #[test]
    fn test_emit_resolution_layout() {
        let out = TempDir::new().unwrap();
        let emitter = ReportEmitter::new(out.path());
        emitter.emit_resolution(&results(&[1, 2]), "now").unwrap();

        let dir = out.path().join("256x256");
        assert!(dir.join("1_threads_result.json").is_file());
        assert!(dir.join("2_threads_result.json").is_file());
        assert!(dir.join(RESOLUTION_CSV).is_file());
        assert!(dir.join(RESOLUTION_REPORT).is_file());
    }

    #[test]
    fn test_emit_resolution_removes_stale_records() {
        let out = TempDir::new().unwrap();
        let emitter = ReportEmitter::new(out.path());
        emitter.emit_resolution(&results(&[1, 2, 4]), "first").unwrap();
        emitter.emit_resolution(&results(&[1, 2]), "second").unwrap();

        let dir = out.path().join("256x256");
        assert!(!dir.join("4_threads_result.json").exists());
        let csv = fs::read_to_string(dir.join(RESOLUTION_CSV)).unwrap();
        assert_eq!(csv.lines().count(), 3);
        let report = fs::read_to_string(dir.join(RESOLUTION_REPORT)).unwrap();
        assert!(report.contains("**Generated:** second"));
    }
}
