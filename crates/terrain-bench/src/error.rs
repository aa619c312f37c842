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

//! Error types for benchmark sweep operations.
//!
//! Only configuration problems, a missing workload executable and artifact
//! persistence failures surface as [`BenchError`] from the sweep engine.
//! Per-run failures (timeouts, non-zero exits, malformed telemetry) are
//! recorded as gaps in the sweep outcome and never abort a sweep.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for benchmarking operations
pub type Result<T> = std::result::Result<T, BenchError>;

/// Errors that can occur during benchmarking operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BenchError {
    /// The workload executable does not exist at the configured path.
    #[error("Workload executable not found at '{}'", path.display())]
    WorkloadUnavailable {
        /// Configured executable path
        path: PathBuf,
    },

    /// Invalid configuration parameter
    #[error("Invalid configuration parameter '{parameter}': {reason}")]
    InvalidConfig {
        /// Parameter name
        parameter: String,
        /// Reason for invalidity
        reason: String,
    },

    /// The workload's standard output did not decode as a telemetry record.
    #[error("Malformed telemetry: {reason}")]
    MalformedTelemetry {
        /// Reason for rejection
        reason: String,
    },

    /// I/O error while reading configuration or writing artifacts.
    #[error("I/O error for '{}': {message}", path.display())]
    Io {
        /// Path involved in the failed operation
        path: PathBuf,
        /// The error message
        message: String,
    },

    /// Serialization of a report or record failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl BenchError {
    /// Create an I/O error with path context.
    pub fn io_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Create an invalid-configuration error.
    pub fn invalid_config(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// Create a malformed-telemetry error.
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedTelemetry {
            reason: reason.into(),
        }
    }

    /// Returns whether this error must stop a sweep before or while it runs.
    ///
    /// Malformed telemetry only ever drops a single run.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, BenchError::MalformedTelemetry { .. })
    }
}

impl From<serde_json::Error> for BenchError {
    fn from(err: serde_json::Error) -> Self {
        BenchError::Serialization(err.to_string())
    }
}

impl From<csv::Error> for BenchError {
    fn from(err: csv::Error) -> Self {
        BenchError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BenchError::WorkloadUnavailable {
            path: PathBuf::from("build/bin/terrain-gen-benchmark.exe"),
        };
        let msg = err.to_string();
        assert!(msg.contains("not found"));
        assert!(msg.contains("terrain-gen-benchmark.exe"));

        let err = BenchError::invalid_config("runs", "must be at least 1");
        let msg = err.to_string();
        assert!(msg.contains("runs"));
        assert!(msg.contains("must be at least 1"));
    }

    #[test]
    fn test_io_error_keeps_path() {
        let err = BenchError::io_error(
            "out/256x256",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        let msg = err.to_string();
        assert!(msg.contains("out/256x256"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn test_fatality() {
        assert!(!BenchError::malformed("missing field").is_fatal());
        assert!(BenchError::invalid_config("runs", "zero").is_fatal());
        assert!(BenchError::Serialization("x".into()).is_fatal());
    }

    #[test]
    fn test_from_serde_json() {
        let err: BenchError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, BenchError::Serialization(_)));
    }
}
