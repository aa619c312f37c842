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

//! Command-line driver for terrain generation benchmark sweeps.
//!
//! # Commands
//!
//! - **sweep**: full resolution x thread-count sweep
//! - **resolution**: quick sweep of one resolution at 1, 2 and 4 threads
//! - **smoke**: one invocation, telemetry printout and artifact check
//!
//! Every command only builds a [`terrain_bench::SweepConfig`] and hands it
//! to [`terrain_bench::SweepEngine`].

pub mod cli;
pub mod error;

pub use cli::{Cli, Commands};
pub use error::CliError;
