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

//! Sweep planning.
//!
//! Expands a [`SweepConfig`] into the ordered grid of [`ConfigCell`]s:
//! resolution, then thread count, then run index `1..=runs`.

use crate::core::{ConfigCell, SweepConfig, ThreadSpec, FALLBACK_MAX_THREADS};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use tracing::{debug, warn};

/// Queries the host for its available concurrency.
pub fn host_max_threads() -> Option<u32> {
    std::thread::available_parallelism()
        .ok()
        .map(NonZeroUsize::get)
        .and_then(|n| u32::try_from(n).ok())
}

/// Resolves the `MAX` specifier once, substituting the fallback on failure.
pub fn resolve_max_threads<F>(query: F) -> u32
where
    F: FnOnce() -> Option<u32>,
{
    match query() {
        Some(n) if n > 0 => n,
        _ => {
            warn!(
                fallback = FALLBACK_MAX_THREADS,
                "could not determine available concurrency, using fallback"
            );
            FALLBACK_MAX_THREADS
        }
    }
}

/// The concrete grid for one sweep execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepPlan {
    /// Value `MAX` resolved to for this sweep.
    pub max_threads: u32,
    /// Resolutions, in sweep order, without duplicates.
    pub resolutions: Vec<u32>,
    /// Concrete thread counts, in sweep order, without duplicates.
    pub thread_counts: Vec<u32>,
    /// Repetitions per cell.
    pub runs: u32,
    /// Workload seed.
    pub seed: u32,
}

impl SweepPlan {
    /// Plans a sweep, querying the host for `MAX`.
    pub fn new(config: &SweepConfig) -> Self {
        let needs_max = config.threads.contains(&ThreadSpec::Max);
        let max_threads = if needs_max {
            resolve_max_threads(host_max_threads)
        } else {
            host_max_threads().unwrap_or(FALLBACK_MAX_THREADS)
        };
        Self::with_max_threads(config, max_threads)
    }

    /// Plans a sweep with an already-resolved `MAX`.
    pub fn with_max_threads(config: &SweepConfig, max_threads: u32) -> Self {
        let mut resolutions: Vec<u32> = Vec::with_capacity(config.resolutions.len());
        for &resolution in &config.resolutions {
            if resolutions.contains(&resolution) {
                warn!(resolution, "resolution listed more than once, skipping");
                continue;
            }
            resolutions.push(resolution);
        }

        let mut thread_counts: Vec<u32> = Vec::with_capacity(config.threads.len());
        for spec in &config.threads {
            let count = spec.resolve(max_threads);
            if thread_counts.contains(&count) {
                warn!(
                    spec = %spec,
                    threads = count,
                    "thread specifier resolves to an already planned count, skipping"
                );
                continue;
            }
            thread_counts.push(count);
        }

        debug!(max_threads, ?resolutions, ?thread_counts, "planned sweep");

        Self {
            max_threads,
            resolutions,
            thread_counts,
            runs: config.runs,
            seed: config.seed,
        }
    }

    /// Repetitions of one (resolution, thread count) cell.
    pub fn runs_for(&self, resolution: u32, thread_count: u32) -> impl Iterator<Item = ConfigCell> {
        let seed = self.seed;
        (1..=self.runs).map(move |run| ConfigCell::new(resolution, thread_count, run, seed))
    }

    /// Every cell of the sweep, in execution order.
    pub fn cells(&self) -> impl Iterator<Item = ConfigCell> + '_ {
        self.resolutions.iter().flat_map(move |&resolution| {
            self.thread_counts
                .iter()
                .flat_map(move |&threads| self.runs_for(resolution, threads))
        })
    }

    /// Number of workload invocations the sweep will issue.
    pub fn total_runs(&self) -> usize {
        self.resolutions.len() * self.thread_counts.len() * self.runs as usize
    }
}
