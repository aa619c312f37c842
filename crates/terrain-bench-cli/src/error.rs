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

//! Error types for the command-line driver.

use terrain_bench::BenchError;
use thiserror::Error;

/// Errors surfaced by a subcommand.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CliError {
    /// A library error: bad configuration, missing executable or a failed
    /// artifact write.
    #[error(transparent)]
    Bench(#[from] BenchError),

    /// The sweep was stopped by the user. Partial reports were written.
    #[error("sweep interrupted after {measured} measured configuration(s); partial reports written to '{output}'")]
    Interrupted {
        /// Cells measured before the stop
        measured: usize,
        /// Output root holding the partial reports
        output: String,
    },

    /// The smoke run did not pass.
    #[error("smoke run failed for {cell}")]
    SmokeFailed {
        /// The cell that was invoked
        cell: String,
    },
}

impl CliError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Interrupted { .. } => 130,
            _ => 1,
        }
    }
}
