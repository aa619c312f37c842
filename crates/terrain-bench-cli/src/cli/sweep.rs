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

//! `sweep` and `resolution` commands.

use crate::error::CliError;
use clap::Args;
use std::path::PathBuf;
use std::time::Duration;
use terrain_bench::core::DEFAULT_EXECUTABLE;
use terrain_bench::reporters::print_sweep_summary;
use terrain_bench::{Interrupt, SweepConfig, SweepEngine, ThreadSpec};
use tracing::info;

/// Arguments of `sweep`. Flags override values from `--config`.
#[derive(Args, Debug, Clone)]
pub struct SweepArgs {
    /// Configuration file (JSON, or YAML for .yaml/.yml)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Resolutions to sweep, comma separated
    #[arg(short, long, value_delimiter = ',', value_name = "RES")]
    pub resolutions: Option<Vec<u32>>,

    /// Thread counts to sweep, comma separated; MAX means all available cores
    #[arg(short, long, value_delimiter = ',', value_name = "N|MAX")]
    pub threads: Option<Vec<ThreadSpec>>,

    /// Runs per configuration
    #[arg(short = 'n', long)]
    pub runs: Option<u32>,

    /// Output directory for reports
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Path to the terrain generator executable
    #[arg(short, long, value_name = "PATH")]
    pub executable: Option<PathBuf>,

    /// Seed passed to the generator
    #[arg(long)]
    pub seed: Option<u32>,

    /// Per-run timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Pause after each successful run, in milliseconds
    #[arg(long, value_name = "MS")]
    pub pause_ms: Option<u64>,
}

impl SweepArgs {
    /// Builds the sweep configuration: defaults, then the file, then flags.
    pub fn into_config(self) -> Result<SweepConfig, CliError> {
        let mut config = match &self.config {
            Some(path) => SweepConfig::from_file(path)?,
            None => SweepConfig::default(),
        };

        if let Some(resolutions) = &self.resolutions {
            config = config.with_resolutions(resolutions);
        }
        if let Some(threads) = &self.threads {
            config = config.with_threads(threads);
        }
        if let Some(runs) = self.runs {
            config = config.with_runs(runs);
        }
        if let Some(output) = self.output {
            config = config.with_output_dir(output);
        }
        if let Some(executable) = self.executable {
            config = config.with_executable(executable);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if let Some(timeout) = self.timeout {
            config = config.with_timeout(Duration::from_secs(timeout));
        }
        if let Some(pause) = self.pause_ms {
            config = config.with_pause(Duration::from_millis(pause));
        }

        Ok(config)
    }
}

/// Arguments of `resolution`.
#[derive(Args, Debug, Clone)]
pub struct ResolutionArgs {
    /// Resolution to sweep (e.g. 512 for 512x512)
    #[arg(value_name = "RES")]
    pub resolution: u32,

    /// Output directory for reports
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Path to the terrain generator executable
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_EXECUTABLE)]
    pub executable: PathBuf,
}

impl ResolutionArgs {
    pub fn into_config(self) -> SweepConfig {
        let config = SweepConfig::single_resolution(self.executable, self.resolution);
        match self.output {
            Some(output) => config.with_output_dir(output),
            None => config,
        }
    }
}

pub(crate) fn run_sweep(config: SweepConfig, interrupt: Interrupt) -> Result<(), CliError> {
    let output = config.output_dir.display().to_string();
    let engine = SweepEngine::for_process(config, interrupt)?;
    info!(
        executable = %engine.config().executable.display(),
        output = %output,
        "running sweep"
    );

    let outcome = engine.run()?;
    print_sweep_summary(&outcome);

    if outcome.interrupted {
        return Err(CliError::Interrupted {
            measured: outcome.measured_count(),
            output,
        });
    }
    Ok(())
}
