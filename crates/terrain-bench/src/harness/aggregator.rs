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

//! Run aggregation and statistics computation.
//!
//! Reduces the repeated [`TelemetryRecord`]s of one cell to a single
//! [`AggregatedResult`]. Speedup fields start out as placeholders and are
//! filled in by the baseline tracker.

use crate::core::{CellKey, StageTimes, TelemetryRecord};
use crate::harness::baseline::BaselineStatus;
use serde::{Deserialize, Serialize};

/// Statistical summary of a sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Statistics {
    /// Arithmetic mean.
    pub mean: f64,
    /// Sample standard deviation (N-1 denominator), 0 for a single value.
    pub std_dev: f64,
    /// Minimum value.
    pub min: f64,
    /// Maximum value.
    pub max: f64,
    /// Number of values.
    pub count: usize,
}

/// Computes mean, sample standard deviation and range.
///
/// Returns `None` for an empty sample.
pub fn compute_statistics(values: &[f64]) -> Option<Statistics> {
    if values.is_empty() {
        return None;
    }

    let count = values.len();
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    // Summation error can push the mean a hair outside the sample range.
    let mean = (values.iter().sum::<f64>() / count as f64).clamp(min, max);

    let std_dev = if count > 1 {
        let variance = values
            .iter()
            .map(|v| {
                let diff = v - mean;
                diff * diff
            })
            .sum::<f64>()
            / (count - 1) as f64;
        variance.sqrt()
    } else {
        0.0
    };

    Some(Statistics {
        mean,
        std_dev,
        min,
        max,
        count,
    })
}

/// Averaged measurements for one (resolution, thread count) cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedResult {
    /// Square map resolution.
    pub resolution: u32,
    /// Concrete thread count.
    pub threads: u32,
    /// Mean self-reported total time (s).
    pub total_time: f64,
    /// Sample standard deviation of `total_time` (s).
    pub std_dev_total_time: f64,
    /// Fastest contributing run (s).
    pub min_total_time: f64,
    /// Slowest contributing run (s).
    pub max_total_time: f64,
    /// Mean peak memory (KiB).
    pub peak_memory_kb: f64,
    /// Mean invoker-measured wall clock (s).
    pub wall_clock_time: f64,
    /// Per-stage mean time (s).
    pub stage_times: StageTimes,
    /// Runs that contributed. May be below the planned count.
    pub num_runs: usize,
    /// Baseline stage mean / this stage mean.
    pub speedup_per_stage: StageTimes,
    /// Baseline time / this cell's time.
    pub total_speedup: f64,
    /// `total_speedup / threads`; absent without a baseline.
    pub efficiency: Option<f64>,
    /// Where the speedup figures came from.
    pub baseline: BaselineStatus,
}

impl AggregatedResult {
    /// The cell this result belongs to.
    pub fn key(&self) -> CellKey {
        CellKey::new(self.resolution, self.threads)
    }

    /// Sum of per-stage mean times.
    pub fn stage_sum(&self) -> f64 {
        self.stage_times.values().sum()
    }

    /// Returns whether the speedup figures are real measurements.
    pub fn has_speedup(&self) -> bool {
        self.baseline.is_measured()
    }
}

/// Reduces the runs of one cell.
///
/// Returns `None` when `records` is empty: a cell whose runs all failed is
/// missing from the sweep, never zero-filled.
pub fn aggregate(key: CellKey, records: &[TelemetryRecord]) -> Option<AggregatedResult> {
    let first = records.first()?;

    let totals: Vec<f64> = records.iter().map(|r| r.total_time).collect();
    let total = compute_statistics(&totals)?;
    let memory: Vec<f64> = records.iter().map(|r| r.peak_memory_kb as f64).collect();
    let wall: Vec<f64> = records.iter().map(|r| r.wall_clock_time).collect();

    // Stage set is taken from the first record; later records missing a
    // stage do not drag its mean towards zero.
    let mut stage_times = StageTimes::new();
    for stage in first.stage_times.keys() {
        let values: Vec<f64> = records
            .iter()
            .filter_map(|r| r.stage_times.get(stage).copied())
            .collect();
        if let Some(stats) = compute_statistics(&values) {
            stage_times.insert(stage.clone(), stats.mean);
        }
    }

    let speedup_per_stage = stage_times.keys().map(|s| (s.clone(), 1.0)).collect();

    Some(AggregatedResult {
        resolution: key.resolution,
        threads: key.thread_count,
        total_time: total.mean,
        std_dev_total_time: total.std_dev,
        min_total_time: total.min,
        max_total_time: total.max,
        peak_memory_kb: compute_statistics(&memory).map_or(0.0, |s| s.mean),
        wall_clock_time: compute_statistics(&wall).map_or(0.0, |s| s.mean),
        stage_times,
        num_runs: records.len(),
        speedup_per_stage,
        total_speedup: 1.0,
        efficiency: None,
        baseline: BaselineStatus::Pending,
    })
}
