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

//! CLI integration tests

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn bench_cmd() -> Command {
    Command::cargo_bin("terrain-bench").expect("Failed to find terrain-bench binary")
}

// ===== Help Tests =====

#[test]
fn test_help_output() {
    bench_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Terrain generation benchmark sweeps"))
        .stdout(predicate::str::contains("sweep"))
        .stdout(predicate::str::contains("smoke"));
}

#[test]
fn test_sweep_help_lists_flags() {
    bench_cmd()
        .args(["sweep", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--resolutions"))
        .stdout(predicate::str::contains("--threads"))
        .stdout(predicate::str::contains("--runs"));
}

// ===== Precondition Tests =====

#[test]
fn test_missing_executable_fails_before_sweep() {
    let out = TempDir::new().unwrap();
    let output = out.path().join("results");

    bench_cmd()
        .args(["sweep", "--executable"])
        .arg(out.path().join("no-such-generator"))
        .arg("--output")
        .arg(&output)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("not found"));

    assert!(!output.exists());
}

#[test]
fn test_invalid_runs_rejected() {
    let out = TempDir::new().unwrap();
    bench_cmd()
        .args(["sweep", "--runs", "0", "--output"])
        .arg(out.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("runs"));
}

#[test]
fn test_invalid_thread_token_rejected() {
    bench_cmd()
        .args(["sweep", "--threads", "1,many"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("many"));
}

// ===== Workload Tests =====

#[cfg(unix)]
mod workload {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};

    /// Writes a generator stand-in that reports `8 / threads` seconds and
    /// writes its images under `benchmark_output/` in the working directory.
    fn fake_generator(dir: &Path) -> PathBuf {
        let path = dir.join("terrain-gen.sh");
        let script = r#"#!/bin/sh
size=$1
threads=$3
run=$4
out="benchmark_output/${size}x${size}/${threads}_threads/run_${run}"
mkdir -p "$out"
for img in 01_height_before_erosion 02_height_after_erosion 03_height_after_rivers \
    04_biome_before_erosion 05_biome_after_erosion 06_biome_after_rivers 07_erosion_eroded \
    08_erosion_deposited 09_river_map 10_height_final 11_biome_final; do
    printf 'P6 1 1 255\n...' > "$out/$img.ppm"
done
total=$(awk "BEGIN { print 8 / $threads }")
echo "{\"resolution\": \"${size}x${size}\", \"threads\": $threads, \"run_id\": $run, \"total_time\": $total, \"peak_memory_kb\": 2048, \"stage_times\": {\"hydraulic_erosion\": $total}}"
"#;
        fs::write(&path, script).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[test]
    fn test_sweep_writes_reports() {
        let dir = TempDir::new().unwrap();
        let exe = fake_generator(dir.path());

        bench_cmd()
            .current_dir(dir.path())
            .args(["sweep", "--resolutions", "64", "--threads", "1,2", "--runs", "2"])
            .args(["--pause-ms", "0", "--output", "results", "--executable"])
            .arg(&exe)
            .assert()
            .success()
            .stdout(predicate::str::contains("64x64"))
            .stdout(predicate::str::contains("2.00x"));

        let results = dir.path().join("results");
        assert!(results.join("MASTER_BENCHMARK_REPORT.md").is_file());
        assert!(results.join("benchmark_summary.csv").is_file());
        let record: serde_json::Value = serde_json::from_str(
            &fs::read_to_string(results.join("64x64/2_threads_result.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(record["total_speedup"], 2.0);
        assert_eq!(record["num_runs"], 2);
    }

    #[test]
    fn test_smoke_checks_images() {
        let dir = TempDir::new().unwrap();
        let exe = fake_generator(dir.path());

        bench_cmd()
            .current_dir(dir.path())
            .args(["smoke", "--resolution", "64", "--executable"])
            .arg(&exe)
            .assert()
            .success()
            .stdout(predicate::str::contains("Total time: 8.000s"))
            .stdout(predicate::str::contains("11_biome_final.ppm"))
            .stdout(predicate::str::contains("Result: PASSED"));
    }

    #[test]
    fn test_smoke_fails_on_missing_images() {
        let dir = TempDir::new().unwrap();
        let exe = fake_generator(dir.path());

        bench_cmd()
            .current_dir(dir.path())
            .args(["smoke", "--resolution", "64", "--artifact-root", "elsewhere", "--executable"])
            .arg(&exe)
            .assert()
            .failure()
            .stdout(predicate::str::contains("[missing]"))
            .stderr(predicate::str::contains("smoke run failed"));
    }
}
