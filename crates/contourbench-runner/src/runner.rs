// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Quality-sweep runner. For every source image and every JPEG quality level:
// re-encode, reload through the detection pipeline (timed), overlay the
// contours, and record one ResultEntry.
//
// Failures never escape the runner. An unreadable original skips the image;
// anything that goes wrong for one quality level turns into a
// "Processing failed" entry for that level only.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Instant;

use contourbench_core::{BenchmarkConfig, ImageResults, ProcessedOutput, ResultEntry, ResultsTable};
use contourbench_vision::{CONTOUR_COLOR, CONTOUR_THICKNESS, codec, detect_path, draw_contours};
use image::DynamicImage;
use tracing::{error, info, instrument, warn};

/// Runs the compression/detection sweep and writes its output files.
#[derive(Debug, Clone)]
pub struct BenchmarkRunner {
    output_dir: PathBuf,
    annotation_quality: u8,
}

impl BenchmarkRunner {
    pub fn new(output_dir: impl Into<PathBuf>, annotation_quality: u8) -> Self {
        Self {
            output_dir: output_dir.into(),
            annotation_quality,
        }
    }

    pub fn from_config(config: &BenchmarkConfig) -> Self {
        Self::new(config.output_dir.clone(), config.annotation_quality)
    }

    /// `{output_dir}/compressed_{quality}_{file name}`
    pub fn compressed_path(&self, image: &Path, quality: u8) -> PathBuf {
        self.output_path("compressed", image, quality)
    }

    /// `{output_dir}/processed_{quality}_{file name}`
    pub fn processed_path(&self, image: &Path, quality: u8) -> PathBuf {
        self.output_path("processed", image, quality)
    }

    fn output_path(&self, prefix: &str, image: &Path, quality: u8) -> PathBuf {
        let mut name = OsString::from(format!("{prefix}_{quality}_"));
        name.push(image.file_name().unwrap_or(image.as_os_str()));
        self.output_dir.join(name)
    }

    /// Run every image against every quality level.
    ///
    /// Images are visited in order, qualities in order within each image.
    #[instrument(skip_all, fields(images = images.len(), qualities = qualities.len()))]
    pub fn run(&self, images: &[PathBuf], qualities: &[u8]) -> ResultsTable {
        let mut results: Vec<ImageResults> = Vec::with_capacity(images.len());
        let mut skipped = Vec::new();

        for image_path in images {
            let original = match codec::decode(image_path) {
                Ok(img) => img,
                Err(err) => {
                    error!(
                        path = %image_path.display(),
                        error = %err,
                        "image cannot be loaded"
                    );
                    if !skipped.contains(image_path) {
                        skipped.push(image_path.clone());
                    }
                    continue;
                }
            };

            let image_results = self.run_image(image_path, &original, qualities);
            // A path listed twice keeps one entry set; the later pass wins.
            match results.iter_mut().find(|r| r.image == *image_path) {
                Some(existing) => *existing = image_results,
                None => results.push(image_results),
            }
        }

        info!(
            processed = results.len(),
            skipped = skipped.len(),
            "Benchmark run complete"
        );
        ResultsTable::new(results, skipped)
    }

    #[instrument(skip(self, image_path, original, qualities), fields(path = %image_path.display()))]
    fn run_image(&self, image_path: &Path, original: &DynamicImage, qualities: &[u8]) -> ImageResults {
        let mut results = ImageResults::new(image_path);
        for &quality in qualities {
            let entry = self.run_quality(image_path, original, quality);
            results.insert(quality, entry);
        }
        results
    }

    /// Measure one quality level. Everything here is local to the iteration.
    fn run_quality(&self, image_path: &Path, original: &DynamicImage, quality: u8) -> ResultEntry {
        let compressed_path = self.compressed_path(image_path, quality);
        if let Err(err) = codec::encode_jpeg(original, &compressed_path, quality) {
            warn!(quality, error = %err, "compression failed; skipping reload");
            return ResultEntry::failed(0.0);
        }

        self.measure(image_path, &compressed_path, quality)
    }

    /// Reload `compressed_path`, detect, overlay, and record the entry.
    fn measure(&self, image_path: &Path, compressed_path: &Path, quality: u8) -> ResultEntry {
        // Timed section covers the reload and detection only.
        let started = Instant::now();
        let detection = detect_path(compressed_path);
        let processing_time_secs = started.elapsed().as_secs_f64();

        let detection = match detection {
            Ok(detection) => detection,
            Err(err) => {
                warn!(quality, error = %err, "compressed variant could not be processed");
                return ResultEntry::failed(processing_time_secs);
            }
        };

        let contour_count = detection.contour_count();
        let mut canvas = detection.image.to_rgb8();
        draw_contours(&mut canvas, &detection.contours, CONTOUR_COLOR, CONTOUR_THICKNESS);

        let processed_path = self.processed_path(image_path, quality);
        let output = match codec::encode_jpeg(
            &DynamicImage::ImageRgb8(canvas),
            &processed_path,
            self.annotation_quality,
        ) {
            Ok(()) => ProcessedOutput::Written(processed_path),
            Err(err) => {
                warn!(quality, error = %err, "annotated image could not be written");
                ProcessedOutput::Failed
            }
        };

        info!(
            quality,
            contour_count,
            seconds = processing_time_secs,
            "Quality level measured"
        );
        ResultEntry {
            processing_time_secs,
            contour_count,
            output,
        }
    }
}

/// Run the benchmark described by `config`.
pub fn run_benchmark(config: &BenchmarkConfig) -> ResultsTable {
    BenchmarkRunner::from_config(config).run(&config.images, &config.qualities)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_paths_use_file_name_only() {
        let runner = BenchmarkRunner::new("/tmp/out", 95);
        let image = Path::new("photos/rpi_empac.png");
        assert_eq!(
            runner.compressed_path(image, 90),
            PathBuf::from("/tmp/out/compressed_90_rpi_empac.png")
        );
        assert_eq!(
            runner.processed_path(image, 1),
            PathBuf::from("/tmp/out/processed_1_rpi_empac.png")
        );
    }

    #[test]
    fn output_paths_are_unique_per_pair() {
        let runner = BenchmarkRunner::new(".", 95);
        let a = Path::new("a.png");
        assert_ne!(runner.compressed_path(a, 90), runner.compressed_path(a, 50));
        assert_ne!(runner.compressed_path(a, 90), runner.processed_path(a, 90));
    }

    #[test]
    fn unreadable_compressed_variant_is_recorded_as_failed() {
        let dir = tempfile::tempdir().expect("tempdir");
        let runner = BenchmarkRunner::new(dir.path(), 95);
        let image = Path::new("a.png");

        let corrupt = runner.compressed_path(image, 50);
        std::fs::write(&corrupt, b"not a jpeg at all").expect("write corrupt variant");
        let readable = runner.compressed_path(image, 90);
        let scene = image::RgbImage::from_fn(64, 48, |x, _| {
            if (16..48).contains(&x) {
                image::Rgb([230, 230, 230])
            } else {
                image::Rgb([20, 20, 20])
            }
        });
        codec::encode_jpeg(&DynamicImage::ImageRgb8(scene), &readable, 90)
            .expect("encode readable variant");

        let failed = runner.measure(image, &corrupt, 50);
        assert_eq!(failed.output, ProcessedOutput::Failed);
        assert_eq!(failed.contour_count, 0);
        assert!(failed.processing_time_secs >= 0.0);
        assert!(!runner.processed_path(image, 50).exists());

        let ok = runner.measure(image, &readable, 90);
        assert_eq!(
            ok.output,
            ProcessedOutput::Written(runner.processed_path(image, 90))
        );
        assert!(ok.contour_count > 0);
    }

    #[test]
    fn from_config_uses_output_settings() {
        let config = BenchmarkConfig {
            output_dir: PathBuf::from("results"),
            ..BenchmarkConfig::default()
        };
        let runner = BenchmarkRunner::from_config(&config);
        assert_eq!(
            runner.compressed_path(Path::new("x.png"), 50),
            PathBuf::from("results/compressed_50_x.png")
        );
    }
}
