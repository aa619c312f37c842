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

//! Sweep reporters.
//!
//! # Modules
//!
//! - `json`: per-cell records and the sweep-wide JSON summary
//! - `table`: fixed-column CSV summaries
//! - `markdown`: per-resolution and master reports
//! - `console`: terminal summaries
//! - `emitter`: writes all of the above under one output root

pub mod console;
pub mod emitter;
pub mod json;
pub mod markdown;
pub mod table;

pub use console::{print_smoke_report, print_sweep_summary, render_smoke_report, render_sweep_summary};
pub use emitter::{ReportEmitter, RESOLUTION_CSV, SWEEP_CSV, SWEEP_JSON};
pub use json::{
    cell_record_path, export_cell_record, export_sweep_summary, load_cell_record, SweepSummary,
};
pub use markdown::{
    export_master_report, export_resolution_report, render_master_report,
    render_resolution_report, MASTER_REPORT, RESOLUTION_REPORT,
};
pub use table::{export_summary_csv, summary_header, write_summary_csv};
