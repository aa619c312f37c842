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

//! Sweep harness: planning, invocation, aggregation and baselines.
//!
//! # Modules
//!
//! - `planner`: expands a configuration into the cell grid
//! - `invoker`: runs the workload with a timeout
//! - `parser`: decodes workload telemetry
//! - `aggregator`: per-cell statistics
//! - `baseline`: single-thread baselines and speedups
//! - `outcome`: sweep results, gaps and dropped runs
//! - `engine`: the sweep loop
//! - `smoke`: single-invocation checks
//! - `interrupt`: user stop flag

pub mod aggregator;
pub mod baseline;
pub mod engine;
pub mod interrupt;
pub mod invoker;
pub mod outcome;
pub mod parser;
pub mod planner;
pub mod smoke;

pub use aggregator::{aggregate, compute_statistics, AggregatedResult, Statistics};
pub use baseline::{
    compute_stage_speedups, compute_total_speedup, BaselineStatus, BaselineTable,
    BaselineTracker, BASELINE_THREADS,
};
pub use engine::{SweepEngine, TIMESTAMP_FORMAT};
pub use interrupt::Interrupt;
pub use invoker::{InvocationOutcome, ProcessInvoker, Workload, DEFAULT_POLL_INTERVAL};
pub use outcome::{CellGap, DroppedRun, ResolutionResults, RunFailure, SweepOutcome};
pub use parser::{decode_outcome, parse_telemetry};
pub use planner::{host_max_threads, resolve_max_threads, SweepPlan};
pub use smoke::{run_smoke, SmokeReport};
