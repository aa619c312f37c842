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

//! Terrain generation benchmark driver.
//!
//! # Usage
//!
//! ```bash
//! # Full sweep
//! terrain-bench sweep --executable build/bin/terrain-gen-benchmark.exe
//!
//! # With debug logging
//! RUST_LOG=terrain_bench=debug terrain-bench sweep
//! ```
//!
//! Ctrl-C stops the sweep, writes reports for everything measured so far
//! and exits with status 130.

use clap::Parser;
use std::process::ExitCode;
use terrain_bench::Interrupt;
use terrain_bench_cli::Cli;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_DIRECTIVE: &str = "terrain_bench=info,terrain_bench_cli=info";

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_DIRECTIVE)),
        )
        .with_writer(std::io::stderr)
        .init();

    let interrupt = Interrupt::new();
    let handler = interrupt.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        info!("interrupt received, stopping sweep");
        handler.trigger();
    }) {
        warn!(error = %e, "could not install Ctrl-C handler");
    }

    match cli.command.execute(interrupt) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
