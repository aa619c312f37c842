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

//! Baseline tracking and speedup computation.
//!
//! Each resolution's single-thread cell is its baseline. A
//! [`BaselineTracker`] is owned by one sweep run and dropped with it, so
//! separate sweeps never share baselines.
//!
//! Speedups are assigned per resolution in a second pass, once all of that
//! resolution's cells are aggregated ([`BaselineTracker::annotate_resolution`]).
//! The order in which thread counts ran therefore does not matter.

use crate::core::StageTimes;
use crate::harness::aggregator::AggregatedResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Thread count that defines a resolution's baseline.
pub const BASELINE_THREADS: u32 = 1;

/// Provenance of a result's speedup figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaselineStatus {
    /// Not yet annotated.
    Pending,
    /// This result is its resolution's baseline; speedups are 1 by definition.
    Reference,
    /// Speedups were computed against the resolution's baseline.
    Measured,
    /// No baseline exists for the resolution; the unit speedups are placeholders.
    Unavailable,
}

impl BaselineStatus {
    /// Returns whether the speedup figures carry information.
    pub fn is_measured(&self) -> bool {
        matches!(self, BaselineStatus::Reference | BaselineStatus::Measured)
    }

    /// Returns the status as a string.
    pub fn as_str(&self) -> &str {
        match self {
            BaselineStatus::Pending => "pending",
            BaselineStatus::Reference => "reference",
            BaselineStatus::Measured => "measured",
            BaselineStatus::Unavailable => "unavailable",
        }
    }
}

/// Per-resolution single-thread results for one sweep.
#[derive(Debug, Clone, Default)]
pub struct BaselineTable {
    baselines: BTreeMap<u32, AggregatedResult>,
}

impl BaselineTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `result` as its resolution's baseline.
    ///
    /// Only single-thread results are accepted, and only the first one per
    /// resolution; later calls leave the table unchanged and return `false`.
    pub fn record(&mut self, result: &AggregatedResult) -> bool {
        if result.threads != BASELINE_THREADS || self.baselines.contains_key(&result.resolution) {
            return false;
        }
        self.baselines.insert(result.resolution, result.clone());
        true
    }

    /// Gets a resolution's baseline.
    pub fn get(&self, resolution: u32) -> Option<&AggregatedResult> {
        self.baselines.get(&resolution)
    }

    /// Returns whether a resolution has a baseline.
    pub fn contains(&self, resolution: u32) -> bool {
        self.baselines.contains_key(&resolution)
    }

    /// Number of resolutions with a baseline.
    pub fn len(&self) -> usize {
        self.baselines.len()
    }

    /// Returns whether no baseline has been recorded.
    pub fn is_empty(&self) -> bool {
        self.baselines.is_empty()
    }
}

/// Assigns speedup and efficiency to aggregated results.
#[derive(Debug, Default)]
pub struct BaselineTracker {
    table: BaselineTable,
}

impl BaselineTracker {
    /// Creates a tracker with an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The baselines recorded so far.
    pub fn table(&self) -> &BaselineTable {
        &self.table
    }

    /// Annotates one result against the table as it stands.
    ///
    /// A single-thread result becomes its resolution's baseline if none
    /// exists yet. Any other result without a baseline gets unit speedups
    /// marked [`BaselineStatus::Unavailable`].
    pub fn annotate(&mut self, mut result: AggregatedResult) -> AggregatedResult {
        if self.table.record(&result) {
            debug!(cell = %result.key(), total_time = result.total_time, "recorded baseline");
        }

        match self.table.get(result.resolution) {
            Some(baseline) if baseline.threads == result.threads => {
                result.speedup_per_stage = unit_speedups(&result.stage_times);
                result.total_speedup = 1.0;
                result.efficiency = Some(1.0 / f64::from(result.threads));
                result.baseline = BaselineStatus::Reference;
            }
            Some(baseline) => {
                result.speedup_per_stage =
                    compute_stage_speedups(&baseline.stage_times, &result.stage_times);
                result.total_speedup = compute_total_speedup(baseline, &result);
                result.efficiency = Some(result.total_speedup / f64::from(result.threads));
                result.baseline = BaselineStatus::Measured;
            }
            None => {
                warn!(
                    cell = %result.key(),
                    "no single-thread baseline for this resolution, speedup unavailable"
                );
                result.speedup_per_stage = unit_speedups(&result.stage_times);
                result.total_speedup = 1.0;
                result.efficiency = None;
                result.baseline = BaselineStatus::Unavailable;
            }
        }
        result
    }

    /// Annotates every cell of one resolution.
    ///
    /// The single-thread cell, wherever it sits in `cells`, is recorded first,
    /// so every other cell sees the baseline. Input order is preserved.
    pub fn annotate_resolution(&mut self, cells: Vec<AggregatedResult>) -> Vec<AggregatedResult> {
        if let Some(baseline) = cells.iter().find(|c| c.threads == BASELINE_THREADS) {
            self.table.record(baseline);
        }
        cells.into_iter().map(|cell| self.annotate(cell)).collect()
    }
}

fn unit_speedups(stage_times: &StageTimes) -> StageTimes {
    stage_times.keys().map(|s| (s.clone(), 1.0)).collect()
}

/// Per-stage speedup of `current` relative to `baseline`.
///
/// A stage missing on either side, or with a zero time on either side,
/// gets 1.0. Values below 1 (slowdowns) are kept as measured.
pub fn compute_stage_speedups(baseline: &StageTimes, current: &StageTimes) -> StageTimes {
    let mut speedups = StageTimes::new();
    for (stage, &base) in baseline {
        let speedup = match current.get(stage) {
            Some(&now) if base > 0.0 && now > 0.0 => base / now,
            _ => 1.0,
        };
        speedups.insert(stage.clone(), speedup);
    }
    for stage in current.keys() {
        speedups.entry(stage.clone()).or_insert(1.0);
    }
    speedups
}

/// Whole-run speedup of `current` relative to `baseline`.
///
/// Uses the ratio of stage-time sums when both are positive, otherwise the
/// ratio of self-reported total times, otherwise 1.0.
pub fn compute_total_speedup(baseline: &AggregatedResult, current: &AggregatedResult) -> f64 {
    let (base_sum, now_sum) = (baseline.stage_sum(), current.stage_sum());
    if base_sum > 0.0 && now_sum > 0.0 {
        base_sum / now_sum
    } else if baseline.total_time > 0.0 && current.total_time > 0.0 {
        baseline.total_time / current.total_time
    } else {
        1.0
    }
}
