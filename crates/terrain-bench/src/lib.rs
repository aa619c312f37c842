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

//! Terrain generation benchmark sweeps.
//!
//! Drives an external terrain generator across a grid of map resolutions
//! and thread counts, repeats each configuration, aggregates the telemetry
//! it prints, computes speedup against the single-thread baseline of each
//! resolution and writes JSON, CSV and Markdown reports.
//!
//! ## Usage
//!
//! ```no_run
//! use terrain_bench::{Interrupt, SweepConfig, SweepEngine};
//!
//! let config = SweepConfig::single_resolution("build/bin/terrain-gen-benchmark.exe", 512)
//!     .with_output_dir("benchmark_results");
//! let engine = SweepEngine::for_process(config, Interrupt::new())?;
//! let outcome = engine.run()?;
//! println!("{} cells measured", outcome.measured_count());
//! # Ok::<(), terrain_bench::BenchError>(())
//! ```

pub mod artifacts;
pub mod core;
pub mod error;
pub mod harness;
pub mod reporters;

pub use crate::core::{
    CellKey, ConfigCell, StageTimes, SweepConfig, TelemetryRecord, ThreadSpec, STAGES,
};
pub use error::{BenchError, Result};
pub use harness::{
    AggregatedResult, BaselineStatus, Interrupt, ProcessInvoker, ResolutionResults, SmokeReport,
    SweepEngine, SweepOutcome, SweepPlan, Workload,
};
pub use reporters::ReportEmitter;
