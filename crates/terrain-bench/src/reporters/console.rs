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

//! Console reporter for sweep and smoke results.
//!
//! Rendering is separate from printing so the layout can be tested.

use crate::core::{display_stage_name, resolution_label};
use crate::harness::{SmokeReport, SweepOutcome};

/// Renders the end-of-sweep summary.
pub fn render_sweep_summary(outcome: &SweepOutcome) -> String {
    let mut out = String::new();
    let plan = &outcome.plan;

    out.push_str(&format!("\n{}\n", "=".repeat(80)));
    out.push_str("TERRAIN GENERATION BENCHMARK SUMMARY\n");
    out.push_str(&format!("{}\n", "=".repeat(80)));
    out.push_str(&format!(
        "Measured configurations: {} of {}\n",
        outcome.measured_count(),
        plan.resolutions.len() * plan.thread_counts.len()
    ));
    out.push_str(&format!("Dropped runs: {}\n", outcome.dropped_runs.len()));
    if outcome.interrupted {
        out.push_str("Status: INTERRUPTED (partial results)\n");
    }

    for results in &outcome.resolutions {
        out.push_str(&format!("\n{}\n", "-".repeat(80)));
        out.push_str(&format!("{}:\n", resolution_label(results.resolution)));
        out.push_str(&format!("{}\n", "-".repeat(80)));
        out.push_str(&format!(
            "{:>8} {:>6} {:>12} {:>10} {:>14} {:>9}\n",
            "Threads", "Runs", "Time (s)", "Std Dev", "Memory (KB)", "Speedup"
        ));

        for cell in &results.cells {
            let speedup = if cell.has_speedup() {
                format!("{:.2}x", cell.total_speedup)
            } else {
                "n/a".to_string()
            };
            out.push_str(&format!(
                "{:>8} {:>6} {:>12.3} {:>10.3} {:>14.0} {:>9}\n",
                cell.threads,
                cell.num_runs,
                cell.total_time,
                cell.std_dev_total_time,
                cell.peak_memory_kb,
                speedup
            ));
        }

        for gap in &results.gaps {
            out.push_str(&format!(
                "{:>8} {:>6}  all runs failed\n",
                gap.key.thread_count, gap.attempted
            ));
        }

        if let Some(best) = results.recommended() {
            out.push_str(&format!(
                "Recommended: {} threads ({:.2}x)\n",
                best.threads, best.total_speedup
            ));
        }
    }

    out.push_str(&format!("{}\n", "=".repeat(80)));
    out
}

/// Prints the end-of-sweep summary.
pub fn print_sweep_summary(outcome: &SweepOutcome) {
    print!("{}", render_sweep_summary(outcome));
}

/// Renders a smoke run's telemetry and artifact check.
pub fn render_smoke_report(report: &SmokeReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("\n{}\n", "=".repeat(60)));
    out.push_str(&format!("SMOKE RUN: {}\n", report.cell));
    out.push_str(&format!("{}\n", "=".repeat(60)));

    match &report.result {
        Ok(record) => {
            out.push_str(&format!("Total time: {:.3}s\n", record.total_time));
            out.push_str(&format!("Wall clock: {:.3}s\n", record.wall_clock_time));
            out.push_str(&format!("Peak memory: {} KB\n", record.peak_memory_kb));
            if let Some(resolution) = &record.resolution {
                out.push_str(&format!("Reported resolution: {}\n", resolution));
            }
            if let Some(threads) = record.threads {
                out.push_str(&format!("Reported threads: {}\n", threads));
            }
            out.push_str("Stages:\n");
            for (stage, time) in &record.stage_times {
                out.push_str(&format!("  {:<24} {:.3}s\n", display_stage_name(stage), time));
            }
        }
        Err(failure) => out.push_str(&format!("FAILED: {}\n", failure)),
    }

    if let Some(artifacts) = &report.artifacts {
        out.push_str(&format!("\nArtifacts in {}:\n", artifacts.dir.display()));
        for (name, size) in &artifacts.present {
            out.push_str(&format!("  [ok]      {} ({} bytes)\n", name, size));
        }
        for name in &artifacts.empty {
            out.push_str(&format!("  [empty]   {}\n", name));
        }
        for name in &artifacts.missing {
            out.push_str(&format!("  [missing] {}\n", name));
        }
    }

    out.push_str(&format!(
        "Result: {}\n",
        if report.passed() { "PASSED" } else { "FAILED" }
    ));
    out.push_str(&format!("{}\n", "=".repeat(60)));
    out
}

/// Prints a smoke run's report.
pub fn print_smoke_report(report: &SmokeReport) {
    print!("{}", render_smoke_report(report));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CellKey, ConfigCell, SweepConfig, TelemetryRecord, ThreadSpec};
    use crate::harness::{
        aggregate, BaselineTracker, CellGap, ResolutionResults, RunFailure, SweepPlan,
    };

    fn record(total: f64) -> TelemetryRecord {
        TelemetryRecord {
            total_time: total,
            peak_memory_kb: 512,
            stage_times: [("hydraulic_erosion".to_string(), total)].into_iter().collect(),
            wall_clock_time: total,
            resolution: Some("256x256".into()),
            threads: Some(1),
        }
    }

    #[test]
    fn test_sweep_summary() {
        let config = SweepConfig::new("gen")
            .with_resolutions(&[256])
            .with_threads(&[ThreadSpec::Fixed(1), ThreadSpec::Fixed(2), ThreadSpec::Fixed(4)]);
        let mut results = ResolutionResults::new(256);
        results.cells = BaselineTracker::new().annotate_resolution(vec![
            aggregate(CellKey::new(256, 1), &[record(8.0)]).unwrap(),
            aggregate(CellKey::new(256, 4), &[record(2.0)]).unwrap(),
        ]);
        results.gaps.push(CellGap {
            key: CellKey::new(256, 2),
            attempted: 3,
        });
        let outcome = SweepOutcome {
            plan: SweepPlan::with_max_threads(&config, 8),
            resolutions: vec![results],
            dropped_runs: Vec::new(),
            interrupted: false,
        };

        let text = render_sweep_summary(&outcome);
        assert!(text.contains("Measured configurations: 2 of 3"));
        assert!(text.contains("256x256:"));
        assert!(text.contains("4.00x"));
        assert!(text.contains("all runs failed"));
        assert!(text.contains("Recommended: 4 threads (4.00x)"));
        assert!(!text.contains("INTERRUPTED"));
    }

    #[test]
    fn test_smoke_report() {
        let report = SmokeReport {
            cell: ConfigCell::new(256, 1, 1, 424_242),
            result: Ok(record(1.25)),
            artifacts: None,
        };
        let text = render_smoke_report(&report);
        assert!(text.contains("Total time: 1.250s"));
        assert!(text.contains("Hydraulic Erosion"));
        assert!(text.contains("Result: PASSED"));

        let failed = SmokeReport {
            result: Err(RunFailure::Timeout { after_secs: 300.0 }),
            ..report
        };
        let text = render_smoke_report(&failed);
        assert!(text.contains("FAILED: timed out after 300s"));
    }
}
