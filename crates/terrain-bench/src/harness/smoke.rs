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

//! Single-invocation smoke run.

use crate::artifacts::{check_run_artifacts, run_artifact_dir, ArtifactReport};
use crate::core::{ConfigCell, TelemetryRecord};
use crate::harness::invoker::Workload;
use crate::harness::outcome::RunFailure;
use crate::harness::parser::decode_outcome;
use std::path::Path;
use tracing::{info, warn};

/// What one smoke invocation produced.
#[derive(Debug, Clone, PartialEq)]
pub struct SmokeReport {
    pub cell: ConfigCell,
    pub result: Result<TelemetryRecord, RunFailure>,
    /// Image check, when an artifact root was given and the run succeeded.
    pub artifacts: Option<ArtifactReport>,
}

impl SmokeReport {
    /// Returns whether the run succeeded and every checked image is present.
    pub fn passed(&self) -> bool {
        self.result.is_ok() && self.artifacts.as_ref().map_or(true, ArtifactReport::is_complete)
    }
}

/// Invokes the workload once for `cell` and, if `artifact_root` is given,
/// checks that the run left its images behind.
pub fn run_smoke<W: Workload + ?Sized>(
    workload: &W,
    cell: ConfigCell,
    artifact_root: Option<&Path>,
) -> SmokeReport {
    info!(cell = %cell, "smoke run");
    let result = decode_outcome(workload.invoke(&cell), &cell);

    let artifacts = match (&result, artifact_root) {
        (Ok(_), Some(root)) => {
            let report = check_run_artifacts(&run_artifact_dir(root, cell.key(), cell.run_index));
            if !report.is_complete() {
                warn!(
                    dir = %report.dir.display(),
                    missing = report.missing.len(),
                    empty = report.empty.len(),
                    "smoke run artifacts incomplete"
                );
            }
            Some(report)
        }
        _ => None,
    };

    if let Err(failure) = &result {
        warn!(cell = %cell, %failure, "smoke run failed");
    }

    SmokeReport {
        cell,
        result,
        artifacts,
    }
}
