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

//! Telemetry emitted by one workload run.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Named workload stages, in report and CSV column order.
pub const STAGES: [&str; 5] = [
    "heightmap_and_voronoi",
    "hydraulic_erosion",
    "river_generation",
    "biome_classification",
    "object_placement",
];

/// Seconds spent per named stage.
pub type StageTimes = BTreeMap<String, f64>;

/// One workload run's measurement.
///
/// `total_time` is what the workload reports about itself; `wall_clock_time`
/// is measured by the invoker around the whole process and is never derived
/// from, or written into, `total_time`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryRecord {
    /// Self-reported total time in seconds.
    pub total_time: f64,
    /// Peak resident memory in KiB.
    pub peak_memory_kb: u64,
    /// Per-stage times in seconds. Need not sum to `total_time`.
    pub stage_times: StageTimes,
    /// Invoker-measured process lifetime in seconds.
    pub wall_clock_time: f64,
    /// Resolution label echoed by the workload, e.g. `256x256`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
    /// Thread count echoed by the workload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threads: Option<u32>,
}

impl TelemetryRecord {
    /// Sum of all stage times.
    pub fn stage_sum(&self) -> f64 {
        self.stage_times.values().sum()
    }
}

/// Returns the stage with the largest time, if any.
pub fn slowest_stage(stage_times: &StageTimes) -> Option<(&str, f64)> {
    stage_times
        .iter()
        .max_by(|a, b| a.1.total_cmp(b.1))
        .map(|(name, time)| (name.as_str(), *time))
}

/// Turns `hydraulic_erosion` into `Hydraulic Erosion`.
pub fn display_stage_name(stage: &str) -> String {
    stage
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
