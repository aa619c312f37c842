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

//! Property tests for run aggregation.

use proptest::prelude::*;
use terrain_bench::harness::{aggregate, compute_statistics};
use terrain_bench::{CellKey, StageTimes, TelemetryRecord};

fn record(total: f64) -> TelemetryRecord {
    let mut stage_times = StageTimes::new();
    stage_times.insert("hydraulic_erosion".to_string(), total / 2.0);
    stage_times.insert("river_generation".to_string(), total / 2.0);
    TelemetryRecord {
        total_time: total,
        peak_memory_kb: 1024,
        stage_times,
        wall_clock_time: total,
        resolution: None,
        threads: None,
    }
}

proptest! {
    #[test]
    fn prop_mean_within_range(values in prop::collection::vec(0.001f64..10_000.0, 1..32)) {
        let stats = compute_statistics(&values).unwrap();
        prop_assert!(stats.mean >= stats.min);
        prop_assert!(stats.mean <= stats.max);
        prop_assert_eq!(stats.count, values.len());
    }

    #[test]
    fn prop_std_dev_zero_iff_all_equal(values in prop::collection::vec(0.001f64..10_000.0, 1..32)) {
        let stats = compute_statistics(&values).unwrap();
        let all_equal = values.iter().all(|&v| v == values[0]);
        prop_assert_eq!(stats.std_dev == 0.0, all_equal);
    }

    #[test]
    fn prop_repeated_value_has_no_spread(value in 0.001f64..10_000.0, n in 1usize..16) {
        let stats = compute_statistics(&vec![value; n]).unwrap();
        prop_assert_eq!(stats.std_dev, 0.0);
        prop_assert_eq!(stats.mean, value);
    }

    #[test]
    fn prop_aggregate_counts_every_record(totals in prop::collection::vec(0.001f64..1_000.0, 1..16)) {
        let records: Vec<TelemetryRecord> = totals.iter().map(|&t| record(t)).collect();
        let result = aggregate(CellKey::new(256, 2), &records).unwrap();
        prop_assert_eq!(result.num_runs, totals.len());
        prop_assert!(result.total_time >= result.min_total_time);
        prop_assert!(result.total_time <= result.max_total_time);
        prop_assert_eq!(result.stage_times.len(), 2);
    }
}

#[test]
fn test_empty_cell_has_no_aggregate() {
    assert!(compute_statistics(&[]).is_none());
    assert!(aggregate(CellKey::new(256, 2), &[]).is_none());
}
