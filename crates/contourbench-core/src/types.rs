// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types: contours, per-quality results and the results table.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Text shown in place of an output path when a quality level produced no
/// annotated image.
pub const PROCESSING_FAILED: &str = "Processing failed";

/// A pixel coordinate on a contour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// One connected outer boundary, as an ordered sequence of points.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Contour {
    pub points: Vec<Point>,
}

impl Contour {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Where the annotated overlay for one quality level ended up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessedOutput {
    /// Overlay written to this path.
    Written(PathBuf),
    /// Reload, detection, or overlay write failed.
    Failed,
}

impl ProcessedOutput {
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Written(path) => Some(path),
            Self::Failed => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed)
    }
}

impl std::fmt::Display for ProcessedOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Written(path) => write!(f, "{}", path.display()),
            Self::Failed => f.write_str(PROCESSING_FAILED),
        }
    }
}

/// Measurements for one (image, quality) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultEntry {
    /// Wall-clock time of the detection pass on the re-encoded file.
    pub processing_time_secs: f64,
    pub contour_count: usize,
    pub output: ProcessedOutput,
}

impl ResultEntry {
    /// Entry for a quality level whose variant could not be produced or
    /// reloaded.
    pub fn failed(processing_time_secs: f64) -> Self {
        Self {
            processing_time_secs,
            contour_count: 0,
            output: ProcessedOutput::Failed,
        }
    }
}

/// A single quality level's entry within an [`ImageResults`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityResult {
    pub quality: u8,
    pub entry: ResultEntry,
}

/// All quality levels measured for one source image, in run order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageResults {
    pub image: PathBuf,
    pub qualities: Vec<QualityResult>,
}

impl ImageResults {
    pub fn new(image: impl Into<PathBuf>) -> Self {
        Self {
            image: image.into(),
            qualities: Vec::new(),
        }
    }

    /// Record the entry for `quality`, replacing any earlier one.
    pub fn insert(&mut self, quality: u8, entry: ResultEntry) {
        match self.qualities.iter_mut().find(|r| r.quality == quality) {
            Some(existing) => existing.entry = entry,
            None => self.qualities.push(QualityResult { quality, entry }),
        }
    }

    pub fn get(&self, quality: u8) -> Option<&ResultEntry> {
        self.qualities
            .iter()
            .find(|r| r.quality == quality)
            .map(|r| &r.entry)
    }

    pub fn len(&self) -> usize {
        self.qualities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.qualities.is_empty()
    }
}

/// Image path → quality → [`ResultEntry`], plus the images that were skipped
/// because the original could not be loaded.
///
/// Built once by the runner and handed back by value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultsTable {
    images: Vec<ImageResults>,
    skipped: Vec<PathBuf>,
}

impl ResultsTable {
    pub fn new(images: Vec<ImageResults>, skipped: Vec<PathBuf>) -> Self {
        Self { images, skipped }
    }

    /// Per-image results in input order.
    pub fn images(&self) -> &[ImageResults] {
        &self.images
    }

    /// Images whose original failed to load. These never have entries.
    pub fn skipped(&self) -> &[PathBuf] {
        &self.skipped
    }

    pub fn image(&self, path: impl AsRef<Path>) -> Option<&ImageResults> {
        self.images.iter().find(|r| r.image == path.as_ref())
    }

    pub fn entry(&self, path: impl AsRef<Path>, quality: u8) -> Option<&ResultEntry> {
        self.image(path)?.get(quality)
    }

    pub fn contains_image(&self, path: impl AsRef<Path>) -> bool {
        self.image(path).is_some()
    }

    /// Iterate every `(image, quality, entry)` triple.
    pub fn entries(&self) -> impl Iterator<Item = (&Path, u8, &ResultEntry)> {
        self.images.iter().flat_map(|img| {
            img.qualities
                .iter()
                .map(move |q| (img.image.as_path(), q.quality, &q.entry))
        })
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(count: usize) -> ResultEntry {
        ResultEntry {
            processing_time_secs: 0.25,
            contour_count: count,
            output: ProcessedOutput::Written(PathBuf::from("processed_90_a.png")),
        }
    }

    #[test]
    fn failed_output_displays_sentinel() {
        assert_eq!(ProcessedOutput::Failed.to_string(), "Processing failed");
        assert!(ResultEntry::failed(0.0).output.is_failed());
        assert_eq!(ResultEntry::failed(0.0).contour_count, 0);
    }

    #[test]
    fn insert_replaces_same_quality() {
        let mut img = ImageResults::new("a.png");
        img.insert(90, entry(3));
        img.insert(1, entry(1));
        img.insert(90, entry(7));

        assert_eq!(img.len(), 2);
        assert_eq!(img.get(90).map(|e| e.contour_count), Some(7));
        // Insertion order is preserved.
        assert_eq!(img.qualities[0].quality, 90);
        assert_eq!(img.qualities[1].quality, 1);
    }

    #[test]
    fn table_lookup_and_iteration() {
        let mut a = ImageResults::new("a.png");
        a.insert(90, entry(4));
        a.insert(1, entry(2));
        let table = ResultsTable::new(vec![a], vec![PathBuf::from("b.png")]);

        assert!(table.contains_image("a.png"));
        assert!(!table.contains_image("b.png"));
        assert_eq!(table.entry("a.png", 1).map(|e| e.contour_count), Some(2));
        assert!(table.entry("a.png", 50).is_none());
        assert_eq!(table.skipped(), &[PathBuf::from("b.png")]);

        let qualities: Vec<u8> = table.entries().map(|(_, q, _)| q).collect();
        assert_eq!(qualities, vec![90, 1]);
    }
}
