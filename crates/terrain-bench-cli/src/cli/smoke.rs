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

//! `smoke` command.

use crate::error::CliError;
use clap::Args;
use std::path::PathBuf;
use std::time::Duration;
use terrain_bench::artifacts::DEFAULT_ARTIFACT_ROOT;
use terrain_bench::core::{DEFAULT_EXECUTABLE, DEFAULT_SEED, SMOKE_TIMEOUT};
use terrain_bench::reporters::print_smoke_report;
use terrain_bench::{ConfigCell, Interrupt, SweepConfig, SweepEngine, ThreadSpec};

#[derive(Args, Debug, Clone)]
pub struct SmokeArgs {
    /// Path to the terrain generator executable
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_EXECUTABLE)]
    pub executable: PathBuf,

    /// Resolution (width and height)
    #[arg(short, long, default_value_t = 256)]
    pub resolution: u32,

    /// Thread count
    #[arg(short, long, default_value_t = 1)]
    pub threads: u32,

    /// Run id passed to the generator
    #[arg(long, default_value_t = 1)]
    pub run: u32,

    /// Seed passed to the generator
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u32,

    /// Timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = SMOKE_TIMEOUT.as_secs())]
    pub timeout: u64,

    /// Directory the generator writes its images under
    #[arg(long, value_name = "DIR", default_value = DEFAULT_ARTIFACT_ROOT)]
    pub artifact_root: PathBuf,

    /// Do not check for generated images
    #[arg(long)]
    pub skip_artifacts: bool,
}

pub(crate) fn run(args: SmokeArgs, interrupt: Interrupt) -> Result<(), CliError> {
    let config = SweepConfig::new(&args.executable)
        .with_resolutions(&[args.resolution])
        .with_threads(&[ThreadSpec::Fixed(args.threads)])
        .with_runs(1)
        .with_seed(args.seed)
        .with_timeout(Duration::from_secs(args.timeout));
    let engine = SweepEngine::for_process(config, interrupt)?;

    let cell = ConfigCell::new(args.resolution, args.threads, args.run, args.seed);
    let artifact_root = (!args.skip_artifacts).then_some(args.artifact_root.as_path());
    let report = engine.smoke(cell, artifact_root);
    print_smoke_report(&report);

    if report.passed() {
        Ok(())
    } else {
        Err(CliError::SmokeFailed {
            cell: cell.to_string(),
        })
    }
}
