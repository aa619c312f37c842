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

//! Telemetry decoding.
//!
//! The workload prints exactly one JSON object on success:
//!
//! ```json
//! {
//!     "resolution": "256x256",
//!     "threads": 4,
//!     "run_id": 1,
//!     "stage_times": { "hydraulic_erosion": 3.2, "river_generation": 0.8 },
//!     "total_time": 5.1,
//!     "peak_memory_kb": 184320
//! }
//! ```

use crate::core::{ConfigCell, StageTimes, TelemetryRecord};
use crate::error::{BenchError, Result};
use crate::harness::invoker::InvocationOutcome;
use crate::harness::outcome::RunFailure;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::warn;

#[derive(Debug, Deserialize)]
struct RawTelemetry {
    total_time: f64,
    peak_memory_kb: u64,
    stage_times: StageTimes,
    #[serde(default)]
    resolution: Option<Value>,
    #[serde(default)]
    threads: Option<u32>,
}

/// Decodes a workload's standard output into a [`TelemetryRecord`].
///
/// `wall_clock` is the invoker's own measurement and is stored alongside,
/// never in place of, the self-reported `total_time`.
///
/// # Errors
///
/// Returns [`BenchError::MalformedTelemetry`] when the output is empty, is not
/// a JSON object with the required fields, or carries a negative, non-finite
/// or zero `total_time`, or a negative or non-finite stage time.
pub fn parse_telemetry(stdout: &str, wall_clock: Duration) -> Result<TelemetryRecord> {
    let text = stdout.trim();
    if text.is_empty() {
        return Err(BenchError::malformed("workload produced no output"));
    }

    let raw: RawTelemetry =
        serde_json::from_str(text).map_err(|e| BenchError::malformed(e.to_string()))?;

    if !raw.total_time.is_finite() || raw.total_time < 0.0 {
        return Err(BenchError::malformed(format!(
            "total_time must be a non-negative number, got {}",
            raw.total_time
        )));
    }
    // A zero reading means the workload did not measure anything.
    if raw.total_time == 0.0 {
        return Err(BenchError::malformed("total_time is zero"));
    }
    for (stage, &time) in &raw.stage_times {
        if !time.is_finite() || time < 0.0 {
            return Err(BenchError::malformed(format!(
                "stage '{}' has invalid time {}",
                stage, time
            )));
        }
    }

    let resolution = raw.resolution.map(|value| match value {
        Value::String(s) => s,
        other => other.to_string(),
    });

    Ok(TelemetryRecord {
        total_time: raw.total_time,
        peak_memory_kb: raw.peak_memory_kb,
        stage_times: raw.stage_times,
        wall_clock_time: wall_clock.as_secs_f64(),
        resolution,
        threads: raw.threads,
    })
}

/// Turns one invocation into either a telemetry record or the reason the run
/// contributes nothing.
pub fn decode_outcome(
    outcome: InvocationOutcome,
    cell: &ConfigCell,
) -> std::result::Result<TelemetryRecord, RunFailure> {
    let (stdout, wall_clock) = match outcome {
        InvocationOutcome::Success { stdout, wall_clock } => (stdout, wall_clock),
        InvocationOutcome::Timeout { after } => {
            return Err(RunFailure::Timeout {
                after_secs: after.as_secs_f64(),
            })
        }
        InvocationOutcome::Failed { status, stderr } => {
            return Err(RunFailure::ProcessFailed { status, stderr })
        }
        InvocationOutcome::LaunchFailed { message } => {
            return Err(RunFailure::LaunchFailed { message })
        }
        InvocationOutcome::Interrupted => return Err(RunFailure::Interrupted),
    };

    let record = parse_telemetry(&stdout, wall_clock).map_err(|e| match e {
        BenchError::MalformedTelemetry { reason } => RunFailure::MalformedTelemetry { reason },
        other => RunFailure::MalformedTelemetry {
            reason: other.to_string(),
        },
    })?;

    if let Some(threads) = record.threads {
        if threads != cell.thread_count {
            warn!(cell = %cell, reported = threads, "workload echoed a different thread count");
        }
    }

    Ok(record)
}
