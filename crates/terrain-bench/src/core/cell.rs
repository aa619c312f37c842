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

//! Sweep grid coordinates.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One point in the sweep grid, for one repetition.
///
/// `thread_count` is always the concrete count handed to the workload,
/// never the symbolic `MAX` specifier it may have come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConfigCell {
    /// Square map resolution (width = height).
    pub resolution: u32,
    /// Concrete thread count.
    pub thread_count: u32,
    /// 1-based repetition index.
    pub run_index: u32,
    /// Workload seed.
    pub seed: u32,
}

impl ConfigCell {
    /// Creates a new cell.
    pub fn new(resolution: u32, thread_count: u32, run_index: u32, seed: u32) -> Self {
        Self {
            resolution,
            thread_count,
            run_index,
            seed,
        }
    }

    /// Positional workload arguments: `<width> <height> <threads> <run_id> <seed>`.
    pub fn args(&self) -> [String; 5] {
        [
            self.resolution.to_string(),
            self.resolution.to_string(),
            self.thread_count.to_string(),
            self.run_index.to_string(),
            self.seed.to_string(),
        ]
    }

    /// The aggregation key this run contributes to.
    pub fn key(&self) -> CellKey {
        CellKey::new(self.resolution, self.thread_count)
    }
}

impl fmt::Display for ConfigCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} run {}", self.key(), self.run_index)
    }
}

/// A (resolution, thread count) pair: the unit of aggregation and reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellKey {
    /// Square map resolution.
    pub resolution: u32,
    /// Concrete thread count.
    pub thread_count: u32,
}

impl CellKey {
    /// Creates a new key.
    pub fn new(resolution: u32, thread_count: u32) -> Self {
        Self {
            resolution,
            thread_count,
        }
    }

    /// Directory-style resolution label, e.g. `256x256`.
    pub fn resolution_label(&self) -> String {
        resolution_label(self.resolution)
    }

    /// Thread label used in artifact names, e.g. `4_threads`.
    pub fn thread_label(&self) -> String {
        format!("{}_threads", self.thread_count)
    }
}

impl fmt::Display for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.resolution_label(), self.thread_label())
    }
}

/// Formats a square resolution as `<res>x<res>`.
pub fn resolution_label(resolution: u32) -> String {
    format!("{}x{}", resolution, resolution)
}
