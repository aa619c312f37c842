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

//! Markdown reporter: per-resolution reports and the master report.

use crate::artifacts::EXPECTED_IMAGES;
use crate::core::{display_stage_name, resolution_label, slowest_stage, STAGES};
use crate::error::{BenchError, Result};
use crate::harness::{AggregatedResult, BaselineStatus, ResolutionResults, SweepOutcome};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Thread counts eligible for the stage breakdown table.
pub const STAGE_TABLE_THREADS: [u32; 4] = [1, 2, 4, 8];

/// File name of each per-resolution report.
pub const RESOLUTION_REPORT: &str = "BENCHMARK_REPORT.md";

/// File name of the master report.
pub const MASTER_REPORT: &str = "MASTER_BENCHMARK_REPORT.md";

fn format_speedup(result: &AggregatedResult) -> String {
    match result.baseline {
        BaselineStatus::Reference => "1.00x (baseline)".to_string(),
        BaselineStatus::Measured => format!("{:.2}x", result.total_speedup),
        BaselineStatus::Unavailable | BaselineStatus::Pending => "n/a".to_string(),
    }
}

fn format_efficiency(result: &AggregatedResult) -> String {
    result
        .efficiency
        .map(|e| format!("{:.2}", e))
        .unwrap_or_else(|| "n/a".to_string())
}

/// Stage names across all cells: the known stages first, in column order,
/// then any others alphabetically.
fn stage_names(cells: &[AggregatedResult]) -> Vec<String> {
    let seen: BTreeSet<&str> = cells
        .iter()
        .flat_map(|c| c.stage_times.keys().map(String::as_str))
        .collect();
    let mut names: Vec<String> = STAGES
        .iter()
        .filter(|s| seen.contains(*s))
        .map(|s| s.to_string())
        .collect();
    names.extend(
        seen.iter()
            .filter(|s| !STAGES.contains(*s))
            .map(|s| s.to_string()),
    );
    names
}

/// Renders the report for one resolution.
pub fn render_resolution_report(results: &ResolutionResults, generated: &str) -> String {
    let label = resolution_label(results.resolution);
    let mut md = String::new();

    md.push_str(&format!("# Terrain Generation Benchmark Report - {}\n\n", label));
    md.push_str(&format!("**Generated:** {}\n\n", generated));

    md.push_str("## Executive Summary\n\n");
    match results.baseline() {
        Some(baseline) => {
            md.push_str(&format!(
                "- **Baseline Performance (1 thread):** {:.3}s\n",
                baseline.total_time
            ));
            md.push_str(&format!(
                "- **Peak Memory Usage:** {:.0} KB\n",
                baseline.peak_memory_kb
            ));
            let slowest = slowest_stage(&baseline.stage_times)
                .map(|(stage, time)| format!("{} ({:.3}s)", display_stage_name(stage), time))
                .unwrap_or_else(|| "Unknown".to_string());
            md.push_str(&format!("- **Most Time-Consuming Stage:** {}\n", slowest));
        }
        None => {
            md.push_str("- **Baseline Performance (1 thread):** unavailable, no single-thread configuration completed\n");
        }
    }
    md.push_str(&format!(
        "- **Measured Configurations:** {}\n",
        results.cells.len()
    ));
    if !results.gaps.is_empty() {
        md.push_str(&format!(
            "- **Missing Configurations:** {}\n",
            results.gaps.len()
        ));
    }
    md.push('\n');

    md.push_str("## Performance Results\n\n");
    if results.cells.is_empty() {
        md.push_str("No configuration produced a measurement.\n\n");
    } else {
        md.push_str("| Threads | Runs | Total Time (s) | Std Dev (s) | Memory (KB) | Speedup | Efficiency |\n");
        md.push_str("|---------|------|----------------|-------------|-------------|---------|------------|\n");
        for cell in &results.cells {
            md.push_str(&format!(
                "| {} | {} | {:.3} | {:.3} | {:.0} | {} | {} |\n",
                cell.threads,
                cell.num_runs,
                cell.total_time,
                cell.std_dev_total_time,
                cell.peak_memory_kb,
                format_speedup(cell),
                format_efficiency(cell)
            ));
        }
        md.push('\n');
    }

    md.push_str("## Stage Performance Analysis\n\n");
    let columns: Vec<&AggregatedResult> = STAGE_TABLE_THREADS
        .iter()
        .filter_map(|&t| results.cell(t))
        .collect();
    if columns.is_empty() {
        md.push_str("No measurements at 1, 2, 4 or 8 threads.\n\n");
    } else {
        md.push_str("| Stage |");
        for cell in &columns {
            let unit = if cell.threads == 1 { "Thread" } else { "Threads" };
            md.push_str(&format!(" {} {} (s) |", cell.threads, unit));
        }
        md.push_str("\n|-------|");
        for _ in &columns {
            md.push_str("------|");
        }
        md.push('\n');

        for stage in stage_names(&results.cells) {
            md.push_str(&format!("| {} |", display_stage_name(&stage)));
            for cell in &columns {
                match cell.stage_times.get(&stage) {
                    Some(time) => md.push_str(&format!(" {:.3} |", time)),
                    None => md.push_str(" N/A |"),
                }
            }
            md.push('\n');
        }
        md.push('\n');
    }

    md.push_str("## Recommended Configuration\n\n");
    match results.recommended() {
        Some(best) => {
            md.push_str(&format!("- **Threads:** {}\n", best.threads));
            md.push_str(&format!("- **Total Time:** {:.3}s\n", best.total_time));
            md.push_str(&format!("- **Speedup:** {:.2}x\n", best.total_speedup));
            md.push_str(&format!("- **Efficiency:** {}\n\n", format_efficiency(best)));
        }
        None => {
            md.push_str("No recommendation: speedup needs a completed single-thread baseline.\n\n");
        }
    }

    md.push_str("## Generated Images\n\n");
    md.push_str("For each test case, the following images are generated in order:\n\n");
    for (i, image) in EXPECTED_IMAGES.iter().enumerate() {
        md.push_str(&format!(
            "{}. **{}** - {}\n",
            i + 1,
            image.title,
            image.description
        ));
    }
    md.push('\n');

    md.push_str("## Directory Structure\n\n");
    md.push_str("```\n");
    md.push_str(&format!("{}/\n", label));
    md.push_str(&format!("├── {}\n", RESOLUTION_REPORT));
    for cell in &results.cells {
        md.push_str(&format!("├── {}_threads_result.json\n", cell.threads));
    }
    for cell in &results.cells {
        md.push_str(&format!("├── {}_threads/\n", cell.threads));
        md.push_str("│   └── run_1/\n");
        if let (Some(first), Some(last)) = (EXPECTED_IMAGES.first(), EXPECTED_IMAGES.last()) {
            md.push_str(&format!("│       ├── {}\n", first.file_name));
            md.push_str("│       ├── ...\n");
            md.push_str(&format!("│       └── {}\n", last.file_name));
        }
    }
    md.push_str("```\n");

    if !results.gaps.is_empty() {
        md.push_str("\n## Missing Configurations\n\n");
        for gap in &results.gaps {
            md.push_str(&format!(
                "- {} threads: all {} attempted run(s) failed\n",
                gap.key.thread_count, gap.attempted
            ));
        }
    }

    md
}

/// Renders the master report linking every resolution report.
pub fn render_master_report(outcome: &SweepOutcome, generated: &str) -> String {
    let plan = &outcome.plan;
    let mut md = String::new();

    md.push_str("# Terrain Generation Benchmark Master Report\n\n");
    md.push_str(&format!("**Generated:** {}\n\n", generated));
    if outcome.interrupted {
        md.push_str("**Status:** interrupted, results cover the configurations completed before the stop\n\n");
    }

    md.push_str("## Overview\n\n");
    md.push_str("This benchmark analysis covers terrain generation performance across multiple resolutions and thread counts.\n\n");

    md.push_str("## Test Configurations\n\n");
    let resolutions: Vec<String> = plan.resolutions.iter().map(|&r| resolution_label(r)).collect();
    let threads: Vec<String> = plan.thread_counts.iter().map(|t| t.to_string()).collect();
    md.push_str(&format!("- **Resolutions:** {}\n", resolutions.join(", ")));
    md.push_str(&format!(
        "- **Thread Counts:** {} (MAX = {})\n",
        threads.join(", "),
        plan.max_threads
    ));
    md.push_str(&format!("- **Runs per Configuration:** {}\n", plan.runs));
    md.push_str(&format!("- **Total Test Cases:** {}\n", plan.total_runs()));
    md.push_str(&format!(
        "- **Measured Configurations:** {}\n\n",
        outcome.measured_count()
    ));

    md.push_str("## Resolution Reports\n\n");
    if outcome.resolutions.is_empty() {
        md.push_str("No resolution was reached.\n");
    }
    for results in &outcome.resolutions {
        let label = resolution_label(results.resolution);
        md.push_str(&format!(
            "- [{} Report]({}/{})\n",
            label, label, RESOLUTION_REPORT
        ));
    }
    md.push('\n');

    let gaps: Vec<_> = outcome.gaps().collect();
    if !gaps.is_empty() {
        md.push_str("## Missing Configurations\n\n");
        for gap in gaps {
            md.push_str(&format!(
                "- {}: all {} attempted run(s) failed\n",
                gap.key, gap.attempted
            ));
        }
        md.push('\n');
    }

    md
}

/// Writes a resolution report to `path`.
pub fn export_resolution_report(results: &ResolutionResults, generated: &str, path: &Path) -> Result<()> {
    fs::write(path, render_resolution_report(results, generated))
        .map_err(|e| BenchError::io_error(path, e))
}

/// Writes the master report to `path`.
pub fn export_master_report(outcome: &SweepOutcome, generated: &str, path: &Path) -> Result<()> {
    fs::write(path, render_master_report(outcome, generated))
        .map_err(|e| BenchError::io_error(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CellKey, SweepConfig, TelemetryRecord, ThreadSpec};
    use crate::harness::{aggregate, BaselineTracker, CellGap, SweepPlan};

    fn cell(threads: u32, total: f64) -> AggregatedResult {
        let record = TelemetryRecord {
            total_time: total,
            peak_memory_kb: 2048,
            stage_times: [
                ("hydraulic_erosion".to_string(), total * 0.6),
                ("river_generation".to_string(), total * 0.4),
            ]
            .into_iter()
            .collect(),
            wall_clock_time: total,
            resolution: None,
            threads: None,
        };
        aggregate(CellKey::new(256, threads), &[record]).unwrap()
    }

    fn results(cells: Vec<AggregatedResult>) -> ResolutionResults {
        let mut results = ResolutionResults::new(256);
        results.cells = BaselineTracker::new().annotate_resolution(cells);
        results
    }

    #[test]
    fn test_resolution_report_sections() {
        let report = render_resolution_report(
            &results(vec![cell(1, 10.0), cell(2, 5.0), cell(16, 2.0)]),
            "2025-01-01 00:00:00",
        );

        assert!(report.contains("# Terrain Generation Benchmark Report - 256x256"));
        assert!(report.contains("**Baseline Performance (1 thread):** 10.000s"));
        assert!(report.contains("**Peak Memory Usage:** 2048 KB"));
        assert!(report.contains("**Most Time-Consuming Stage:** Hydraulic Erosion (6.000s)"));
        assert!(report.contains("| 2 | 1 | 5.000 | 0.000 | 2048 | 2.00x | 1.00 |"));
        assert!(report.contains("| 1 | 1 | 10.000 | 0.000 | 2048 | 1.00x (baseline) | 1.00 |"));
        assert!(report.contains("11_biome_final.ppm"));
        assert!(report.contains("- **Threads:** 16"));
    }

    #[test]
    fn test_stage_table_limited_to_present_counts() {
        let report = render_resolution_report(&results(vec![cell(1, 10.0), cell(4, 3.0), cell(16, 2.0)]), "now");
        assert!(report.contains("| Stage | 1 Thread (s) | 4 Threads (s) |\n"));
        assert!(!report.contains("2 Threads (s)"));
        assert!(!report.contains("16 Threads (s)"));
        assert!(report.contains("| Hydraulic Erosion | 6.000 | 1.800 |"));
    }

    #[test]
    fn test_report_without_baseline() {
        let report = render_resolution_report(&results(vec![cell(2, 5.0)]), "now");
        assert!(report.contains("unavailable, no single-thread configuration completed"));
        assert!(report.contains("| 2 | 1 | 5.000 | 0.000 | 2048 | n/a | n/a |"));
        assert!(report.contains("No recommendation"));
    }

    #[test]
    fn test_gap_rows_absent_from_tables() {
        let mut res = results(vec![cell(1, 10.0), cell(4, 3.0)]);
        res.gaps.push(CellGap {
            key: CellKey::new(256, 2),
            attempted: 3,
        });
        let report = render_resolution_report(&res, "now");

        assert!(!report.contains("| 2 |"));
        assert!(!report.contains("2 Threads (s)"));
        assert!(report.contains("- 2 threads: all 3 attempted run(s) failed"));
    }

    #[test]
    fn test_master_report_links() {
        let config = SweepConfig::new("gen")
            .with_resolutions(&[256, 512])
            .with_threads(&[ThreadSpec::Fixed(1), ThreadSpec::Max])
            .with_runs(3);
        let outcome = SweepOutcome {
            plan: SweepPlan::with_max_threads(&config, 8),
            resolutions: vec![results(vec![cell(1, 10.0)]), ResolutionResults::new(512)],
            dropped_runs: Vec::new(),
            interrupted: true,
        };
        let report = render_master_report(&outcome, "now");

        assert!(report.contains("- [256x256 Report](256x256/BENCHMARK_REPORT.md)"));
        assert!(report.contains("- [512x512 Report](512x512/BENCHMARK_REPORT.md)"));
        assert!(report.contains("**Thread Counts:** 1, 8 (MAX = 8)"));
        assert!(report.contains("**Total Test Cases:** 12"));
        assert!(report.contains("**Status:** interrupted"));
    }
}
