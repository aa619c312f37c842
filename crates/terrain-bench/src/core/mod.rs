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

//! Core sweep data model.
//!
//! # Modules
//!
//! - `config`: Sweep configuration and thread specifiers
//! - `cell`: Grid coordinates and aggregation keys
//! - `telemetry`: Per-run telemetry records and the fixed stage set

pub mod cell;
pub mod config;
pub mod telemetry;

pub use cell::{resolution_label, CellKey, ConfigCell};
pub use config::{
    SweepConfig, ThreadSpec, DEFAULT_EXECUTABLE, DEFAULT_OUTPUT_DIR, DEFAULT_PAUSE,
    DEFAULT_RESOLUTIONS, DEFAULT_RUNS, DEFAULT_SEED, DEFAULT_THREADS, DEFAULT_TIMEOUT,
    FALLBACK_MAX_THREADS, SINGLE_RESOLUTION_TIMEOUT, SMOKE_TIMEOUT,
};
pub use telemetry::{display_stage_name, slowest_stage, StageTimes, TelemetryRecord, STAGES};
