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

//! CSV reporter: tabular summaries with a fixed column order.
//!
//! Columns: `resolution,threads,total_time,peak_memory_kb,<stages...>,total_speedup`.
//! A stage a cell did not report, and the speedup of a cell without a
//! baseline, are written as empty fields rather than zeros.

use crate::core::{resolution_label, STAGES};
use crate::error::{BenchError, Result};
use crate::harness::AggregatedResult;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Header row shared by the per-resolution and sweep-wide summaries.
pub fn summary_header() -> Vec<&'static str> {
    let mut header = vec!["resolution", "threads", "total_time", "peak_memory_kb"];
    header.extend_from_slice(&STAGES);
    header.push("total_speedup");
    header
}

fn summary_row(result: &AggregatedResult) -> Vec<String> {
    let mut row = Vec::with_capacity(STAGES.len() + 5);
    row.push(resolution_label(result.resolution));
    row.push(result.threads.to_string());
    row.push(format!("{:.3}", result.total_time));
    row.push(format!("{:.0}", result.peak_memory_kb));
    for stage in STAGES {
        row.push(
            result
                .stage_times
                .get(stage)
                .map(|t| format!("{:.3}", t))
                .unwrap_or_default(),
        );
    }
    row.push(if result.has_speedup() {
        format!("{:.2}", result.total_speedup)
    } else {
        String::new()
    });
    row
}

/// Writes a summary table to any writer.
pub fn write_summary_csv<'a, W, I>(writer: W, results: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a AggregatedResult>,
{
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(summary_header())?;
    for result in results {
        wtr.write_record(summary_row(result))?;
    }
    wtr.flush()
        .map_err(|e| BenchError::Serialization(format!("Failed to flush CSV writer: {}", e)))
}

/// Writes a summary table to `path`, replacing any previous file.
pub fn export_summary_csv<'a, I>(path: &Path, results: I) -> Result<()>
where
    I: IntoIterator<Item = &'a AggregatedResult>,
{
    let file = File::create(path).map_err(|e| BenchError::io_error(path, e))?;
    write_summary_csv(file, results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CellKey, TelemetryRecord};
    use crate::harness::{aggregate, BaselineTracker};

    fn cell(threads: u32, total: f64, erosion: f64) -> AggregatedResult {
        let record = TelemetryRecord {
            total_time: total,
            peak_memory_kb: 1000 + u64::from(threads),
            stage_times: [("hydraulic_erosion".to_string(), erosion)].into_iter().collect(),
            wall_clock_time: total,
            resolution: None,
            threads: None,
        };
        aggregate(CellKey::new(256, threads), &[record]).unwrap()
    }

    fn render(results: &[AggregatedResult]) -> String {
        let mut buf = Vec::new();
        write_summary_csv(&mut buf, results).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_header_order() {
        assert_eq!(
            summary_header().join(","),
            "resolution,threads,total_time,peak_memory_kb,heightmap_and_voronoi,\
             hydraulic_erosion,river_generation,biome_classification,object_placement,\
             total_speedup"
        );
    }

    #[test]
    fn test_rows() {
        let mut tracker = BaselineTracker::new();
        let results = tracker.annotate_resolution(vec![cell(1, 8.0, 6.0), cell(2, 4.0, 3.0)]);
        let text = render(&results);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "256x256,1,8.000,1001,,6.000,,,,1.00");
        assert_eq!(lines[2], "256x256,2,4.000,1002,,3.000,,,,2.00");
    }

    #[test]
    fn test_unavailable_speedup_left_blank() {
        let mut tracker = BaselineTracker::new();
        let results = tracker.annotate_resolution(vec![cell(4, 2.0, 1.0)]);
        let text = render(&results);
        assert!(text.lines().nth(1).unwrap().ends_with(",1.000,,,,"));
    }
}
