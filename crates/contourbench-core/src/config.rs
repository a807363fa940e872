// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Benchmark configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{BenchError, Result};

/// Settings for one benchmark run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchmarkConfig {
    /// Source images, processed in order.
    pub images: Vec<PathBuf>,
    /// JPEG quality levels (1-100) applied to every image, in order.
    pub qualities: Vec<u8>,
    /// Directory receiving the `compressed_*` and `processed_*` files.
    pub output_dir: PathBuf,
    /// JPEG quality used when writing the annotated contour overlays.
    pub annotation_quality: u8,
    /// Optional destination for a JSON copy of the report.
    pub json_report: Option<PathBuf>,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            images: vec![
                PathBuf::from("rpi_86_field.png"),
                PathBuf::from("rpi_empac.png"),
                PathBuf::from("rpi_office_for_research.png"),
            ],
            // High, medium, low.
            qualities: vec![90, 50, 1],
            output_dir: PathBuf::from("."),
            annotation_quality: 95,
            json_report: None,
        }
    }
}

impl BenchmarkConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(data: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(data)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&data)
    }

    /// Check that the run is well-formed: at least one image and one quality,
    /// and every quality within 1..=100.
    pub fn validate(&self) -> Result<()> {
        if self.images.is_empty() {
            return Err(BenchError::Config("no input images configured".into()));
        }
        if self.qualities.is_empty() {
            return Err(BenchError::Config("no quality levels configured".into()));
        }
        if let Some(bad) = self.qualities.iter().find(|q| !(1..=100).contains(*q)) {
            return Err(BenchError::Config(format!(
                "quality {bad} is outside 1..=100"
            )));
        }
        if !(1..=100).contains(&self.annotation_quality) {
            return Err(BenchError::Config(format!(
                "annotation quality {} is outside 1..=100",
                self.annotation_quality
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = BenchmarkConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.images.len(), 3);
        assert_eq!(config.qualities, vec![90, 50, 1]);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = BenchmarkConfig::from_json(r#"{ "qualities": [100, 10] }"#)
            .expect("valid config");
        assert_eq!(config.qualities, vec![100, 10]);
        assert_eq!(config.output_dir, PathBuf::from("."));
        assert_eq!(config.annotation_quality, 95);
        assert!(config.json_report.is_none());
    }

    #[test]
    fn zero_quality_rejected() {
        let err = BenchmarkConfig::from_json(r#"{ "qualities": [90, 0] }"#).unwrap_err();
        assert!(matches!(err, BenchError::Config(_)), "got {err}");
    }

    #[test]
    fn empty_image_list_rejected() {
        let config = BenchmarkConfig {
            images: Vec::new(),
            ..BenchmarkConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn malformed_json_is_serialization_error() {
        let err = BenchmarkConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, BenchError::Serialization(_)));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("contourbench.json");
        std::fs::write(&path, r#"{ "images": ["x.png"], "json_report": "out.json" }"#)
            .expect("write config");

        let config = BenchmarkConfig::load(&path).expect("load");
        assert_eq!(config.images, vec![PathBuf::from("x.png")]);
        assert_eq!(config.json_report, Some(PathBuf::from("out.json")));
    }
}
