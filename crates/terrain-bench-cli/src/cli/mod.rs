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

//! CLI command definitions and argument parsing.
//!
//! - [`sweep`]: `sweep` and `resolution`
//! - [`smoke`]: `smoke`

mod smoke;
mod sweep;

use crate::error::CliError;
use clap::{Parser, Subcommand};
use terrain_bench::Interrupt;

pub use smoke::SmokeArgs;
pub use sweep::{ResolutionArgs, SweepArgs};

/// Terrain generation benchmark sweeps
///
/// Runs the terrain generator across resolutions and thread counts,
/// aggregates its telemetry and writes JSON, CSV and Markdown reports.
///
/// # Examples
///
/// ```bash
/// # Full sweep with the default grid
/// terrain-bench sweep
///
/// # Two resolutions, threads 1, 4 and all cores, five runs each
/// terrain-bench sweep --resolutions 512,1024 --threads 1,4,MAX --runs 5
///
/// # Quick check of one resolution
/// terrain-bench resolution 512
///
/// # Single invocation with artifact check
/// terrain-bench smoke
/// ```
#[derive(Parser, Debug)]
#[command(name = "terrain-bench")]
#[command(author, version, about = "Terrain generation benchmark sweeps", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sweep every resolution and thread count
    Sweep(SweepArgs),

    /// Quick sweep of a single resolution at 1, 2 and 4 threads
    Resolution(ResolutionArgs),

    /// Invoke the workload once and check its output
    Smoke(SmokeArgs),
}

impl Commands {
    /// Execute the command.
    ///
    /// `interrupt` is shared with the Ctrl-C handler.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Interrupted`] after writing partial reports if the
    /// user stopped the sweep.
    pub fn execute(self, interrupt: Interrupt) -> Result<(), CliError> {
        match self {
            Commands::Sweep(args) => sweep::run_sweep(args.into_config()?, interrupt),
            Commands::Resolution(args) => sweep::run_sweep(args.into_config(), interrupt),
            Commands::Smoke(args) => smoke::run(args, interrupt),
        }
    }
}
