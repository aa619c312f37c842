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

//! Centralized sweep configuration.
//!
//! One [`SweepConfig`] drives every entry point: the full sweep, the
//! single-resolution preset and the smoke run only differ in the values
//! they put here.

use crate::error::{BenchError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// Resolutions swept by default (square maps, pixels per side).
pub const DEFAULT_RESOLUTIONS: &[u32] = &[256, 512, 1024, 2048];

/// Thread specifiers swept by default.
pub const DEFAULT_THREADS: &[ThreadSpec] = &[
    ThreadSpec::Fixed(1),
    ThreadSpec::Fixed(2),
    ThreadSpec::Fixed(4),
    ThreadSpec::Fixed(8),
    ThreadSpec::Fixed(14),
    ThreadSpec::Max,
];

/// Repetitions per (resolution, thread count) cell.
pub const DEFAULT_RUNS: u32 = 3;

/// Seed passed to every workload invocation.
pub const DEFAULT_SEED: u32 = 424_242;

/// Per-run ceiling for full sweeps.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3600);

/// Per-run ceiling for the single-resolution preset.
pub const SINGLE_RESOLUTION_TIMEOUT: Duration = Duration::from_secs(600);

/// Per-run ceiling for a smoke run.
pub const SMOKE_TIMEOUT: Duration = Duration::from_secs(300);

/// Pause after each successful run, outside the measured interval.
pub const DEFAULT_PAUSE: Duration = Duration::from_secs(1);

/// Substituted for `MAX` when the host cannot report its parallelism.
pub const FALLBACK_MAX_THREADS: u32 = 14;

/// Default workload executable path.
pub const DEFAULT_EXECUTABLE: &str = "build/bin/terrain-gen-benchmark.exe";

/// Default output root.
pub const DEFAULT_OUTPUT_DIR: &str = "benchmark_results";

/// A thread-count specifier: a concrete count or the host maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ThreadSpecRepr", into = "ThreadSpecRepr")]
pub enum ThreadSpec {
    /// A concrete positive thread count.
    Fixed(u32),
    /// The host's available concurrency, resolved once per sweep.
    Max,
}

impl ThreadSpec {
    /// Resolves this specifier against the sweep's maximum thread count.
    pub fn resolve(self, max_threads: u32) -> u32 {
        match self {
            ThreadSpec::Fixed(n) => n,
            ThreadSpec::Max => max_threads,
        }
    }
}

impl FromStr for ThreadSpec {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("max") {
            return Ok(ThreadSpec::Max);
        }
        match s.parse::<u32>() {
            Ok(0) => Err(BenchError::invalid_config(
                "threads",
                "thread count must be positive",
            )),
            Ok(n) => Ok(ThreadSpec::Fixed(n)),
            Err(_) => Err(BenchError::invalid_config(
                "threads",
                format!("'{}' is neither a positive integer nor MAX", s),
            )),
        }
    }
}

impl fmt::Display for ThreadSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThreadSpec::Fixed(n) => write!(f, "{}", n),
            ThreadSpec::Max => write!(f, "MAX"),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum ThreadSpecRepr {
    Count(u32),
    Token(String),
}

impl TryFrom<ThreadSpecRepr> for ThreadSpec {
    type Error = BenchError;

    fn try_from(repr: ThreadSpecRepr) -> Result<Self> {
        match repr {
            ThreadSpecRepr::Count(n) => ThreadSpec::from_str(&n.to_string()),
            ThreadSpecRepr::Token(s) => ThreadSpec::from_str(&s),
        }
    }
}

impl From<ThreadSpec> for ThreadSpecRepr {
    fn from(spec: ThreadSpec) -> Self {
        match spec {
            ThreadSpec::Fixed(n) => ThreadSpecRepr::Count(n),
            ThreadSpec::Max => ThreadSpecRepr::Token("MAX".to_string()),
        }
    }
}

/// Configuration for one sweep execution.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepConfig {
    /// Resolutions to sweep, in order.
    pub resolutions: Vec<u32>,
    /// Thread specifiers to sweep, in order.
    pub threads: Vec<ThreadSpec>,
    /// Repetitions per cell.
    pub runs: u32,
    /// Seed passed to the workload.
    pub seed: u32,
    /// Root directory for every emitted artifact.
    pub output_dir: PathBuf,
    /// Path to the workload executable.
    pub executable: PathBuf,
    /// Wall-clock ceiling per invocation.
    pub timeout: Duration,
    /// Pause after each successful invocation.
    pub pause: Duration,
}

impl SweepConfig {
    /// Creates a configuration with the default grid for the given executable.
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            resolutions: DEFAULT_RESOLUTIONS.to_vec(),
            threads: DEFAULT_THREADS.to_vec(),
            runs: DEFAULT_RUNS,
            seed: DEFAULT_SEED,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            executable: executable.into(),
            timeout: DEFAULT_TIMEOUT,
            pause: DEFAULT_PAUSE,
        }
    }

    /// Quick sweep of one resolution: threads 1, 2 and 4, two runs each.
    pub fn single_resolution(executable: impl Into<PathBuf>, resolution: u32) -> Self {
        Self::new(executable)
            .with_resolutions(&[resolution])
            .with_threads(&[
                ThreadSpec::Fixed(1),
                ThreadSpec::Fixed(2),
                ThreadSpec::Fixed(4),
            ])
            .with_runs(2)
            .with_timeout(SINGLE_RESOLUTION_TIMEOUT)
    }

    /// Loads a configuration file (JSON, or YAML for `.yaml`/`.yml`).
    ///
    /// Fields absent from the file keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| BenchError::io_error(path, e))?;
        let is_yaml = matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yaml") | Some("yml")
        );
        let file: SweepConfigFile = if is_yaml {
            serde_yaml::from_str(&contents)
                .map_err(|e| BenchError::invalid_config(path.display().to_string(), e.to_string()))?
        } else {
            serde_json::from_str(&contents)
                .map_err(|e| BenchError::invalid_config(path.display().to_string(), e.to_string()))?
        };
        Ok(file.apply(Self::default()))
    }

    /// Sets the resolutions to sweep.
    pub fn with_resolutions(mut self, resolutions: &[u32]) -> Self {
        self.resolutions = resolutions.to_vec();
        self
    }

    /// Sets the thread specifiers to sweep.
    pub fn with_threads(mut self, threads: &[ThreadSpec]) -> Self {
        self.threads = threads.to_vec();
        self
    }

    /// Sets the repetitions per cell.
    pub fn with_runs(mut self, runs: u32) -> Self {
        self.runs = runs;
        self
    }

    /// Sets the workload seed.
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the output root.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Sets the workload executable.
    pub fn with_executable(mut self, executable: impl Into<PathBuf>) -> Self {
        self.executable = executable.into();
        self
    }

    /// Sets the per-invocation timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the pause after each successful invocation.
    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    /// Checks the grid and limits before any work starts.
    pub fn validate(&self) -> Result<()> {
        if self.resolutions.is_empty() {
            return Err(BenchError::invalid_config(
                "resolutions",
                "at least one resolution is required",
            ));
        }
        if self.resolutions.contains(&0) {
            return Err(BenchError::invalid_config(
                "resolutions",
                "resolutions must be positive",
            ));
        }
        if self.threads.is_empty() {
            return Err(BenchError::invalid_config(
                "threads",
                "at least one thread count is required",
            ));
        }
        if self.threads.contains(&ThreadSpec::Fixed(0)) {
            return Err(BenchError::invalid_config(
                "threads",
                "thread count must be positive",
            ));
        }
        if self.runs == 0 {
            return Err(BenchError::invalid_config("runs", "must be at least 1"));
        }
        if self.timeout.is_zero() {
            return Err(BenchError::invalid_config("timeout", "must be non-zero"));
        }
        Ok(())
    }

    /// Checks that the workload executable exists.
    pub fn check_executable(&self) -> Result<()> {
        if self.executable.is_file() {
            Ok(())
        } else {
            Err(BenchError::WorkloadUnavailable {
                path: self.executable.clone(),
            })
        }
    }
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self::new(DEFAULT_EXECUTABLE)
    }
}

/// On-disk form of [`SweepConfig`]; every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SweepConfigFile {
    resolutions: Option<Vec<u32>>,
    threads: Option<Vec<ThreadSpec>>,
    runs: Option<u32>,
    seed: Option<u32>,
    output_dir: Option<PathBuf>,
    executable: Option<PathBuf>,
    timeout_secs: Option<u64>,
    pause_ms: Option<u64>,
}

impl SweepConfigFile {
    fn apply(self, mut config: SweepConfig) -> SweepConfig {
        if let Some(resolutions) = self.resolutions {
            config.resolutions = resolutions;
        }
        if let Some(threads) = self.threads {
            config.threads = threads;
        }
        if let Some(runs) = self.runs {
            config.runs = runs;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(dir) = self.output_dir {
            config.output_dir = dir;
        }
        if let Some(executable) = self.executable {
            config.executable = executable;
        }
        if let Some(secs) = self.timeout_secs {
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(ms) = self.pause_ms {
            config.pause = Duration::from_millis(ms);
        }
        config
    }
}
