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

//! Image artifacts written by the workload.
//!
//! The workload writes eleven PPM images per run under
//! `<root>/<res>x<res>/<threads>_threads/run_<id>/`. They are only checked
//! for presence and non-zero size, never decoded.

use crate::core::CellKey;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory the workload writes images into, relative to its working directory.
pub const DEFAULT_ARTIFACT_ROOT: &str = "benchmark_output";

/// An image the workload is expected to produce for every run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpectedImage {
    /// File name inside the run directory.
    pub file_name: &'static str,
    /// Short title.
    pub title: &'static str,
    /// What the image shows.
    pub description: &'static str,
}

/// The fixed image set, in generation order.
pub const EXPECTED_IMAGES: [ExpectedImage; 11] = [
    ExpectedImage {
        file_name: "01_height_before_erosion.ppm",
        title: "Height Before Erosion",
        description: "Initial terrain heightmap",
    },
    ExpectedImage {
        file_name: "02_height_after_erosion.ppm",
        title: "Height After Erosion",
        description: "Terrain after hydraulic erosion",
    },
    ExpectedImage {
        file_name: "03_height_after_rivers.ppm",
        title: "Height After Rivers",
        description: "Final terrain with river carving",
    },
    ExpectedImage {
        file_name: "04_biome_before_erosion.ppm",
        title: "Biome Before Erosion",
        description: "Initial biome classification",
    },
    ExpectedImage {
        file_name: "05_biome_after_erosion.ppm",
        title: "Biome After Erosion",
        description: "Biome classification after erosion",
    },
    ExpectedImage {
        file_name: "06_biome_after_rivers.ppm",
        title: "Biome After Rivers",
        description: "Final biome classification",
    },
    ExpectedImage {
        file_name: "07_erosion_eroded.ppm",
        title: "Erosion Eroded",
        description: "Areas where material was removed",
    },
    ExpectedImage {
        file_name: "08_erosion_deposited.ppm",
        title: "Erosion Deposited",
        description: "Areas where material was deposited",
    },
    ExpectedImage {
        file_name: "09_river_map.ppm",
        title: "River Map",
        description: "River network visualization",
    },
    ExpectedImage {
        file_name: "10_height_final.ppm",
        title: "Height Final",
        description: "Final heightmap",
    },
    ExpectedImage {
        file_name: "11_biome_final.ppm",
        title: "Biome Final",
        description: "Final biome map",
    },
];

/// Directory holding one run's images.
pub fn run_artifact_dir(root: &Path, key: CellKey, run_index: u32) -> PathBuf {
    root.join(key.resolution_label())
        .join(key.thread_label())
        .join(format!("run_{}", run_index))
}

/// Presence check of one run's images.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtifactReport {
    /// Directory that was inspected.
    pub dir: PathBuf,
    /// Images found with a non-zero size, with their size in bytes.
    pub present: Vec<(String, u64)>,
    /// Images found but empty.
    pub empty: Vec<String>,
    /// Images not found.
    pub missing: Vec<String>,
}

impl ArtifactReport {
    /// Returns whether every expected image exists and is non-empty.
    pub fn is_complete(&self) -> bool {
        self.empty.is_empty() && self.missing.is_empty()
    }
}

/// Checks that every expected image exists in `dir` and is non-empty.
pub fn check_run_artifacts(dir: &Path) -> ArtifactReport {
    let mut report = ArtifactReport {
        dir: dir.to_path_buf(),
        ..Default::default()
    };

    for image in &EXPECTED_IMAGES {
        match fs::metadata(dir.join(image.file_name)) {
            Ok(meta) if meta.is_file() && meta.len() > 0 => {
                report.present.push((image.file_name.to_string(), meta.len()));
            }
            Ok(meta) if meta.is_file() => report.empty.push(image.file_name.to_string()),
            _ => report.missing.push(image.file_name.to_string()),
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_run_artifact_dir() {
        let dir = run_artifact_dir(Path::new("benchmark_output"), CellKey::new(256, 4), 2);
        assert_eq!(dir, PathBuf::from("benchmark_output/256x256/4_threads/run_2"));
    }

    #[test]
    fn test_expected_images_ordered() {
        for (i, image) in EXPECTED_IMAGES.iter().enumerate() {
            assert!(image.file_name.starts_with(&format!("{:02}_", i + 1)));
            assert!(image.file_name.ends_with(".ppm"));
        }
    }

    #[test]
    fn test_check_complete_run() {
        let dir = TempDir::new().unwrap();
        for image in &EXPECTED_IMAGES {
            fs::write(dir.path().join(image.file_name), b"P6\n1 1\n255\n\0\0\0").unwrap();
        }
        let report = check_run_artifacts(dir.path());
        assert!(report.is_complete());
        assert_eq!(report.present.len(), 11);
    }

    #[test]
    fn test_check_partial_run() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("01_height_before_erosion.ppm"), b"P6").unwrap();
        fs::write(dir.path().join("02_height_after_erosion.ppm"), b"").unwrap();

        let report = check_run_artifacts(dir.path());
        assert!(!report.is_complete());
        assert_eq!(report.present.len(), 1);
        assert_eq!(report.empty, vec!["02_height_after_erosion.ppm".to_string()]);
        assert_eq!(report.missing.len(), 9);
    }
}
