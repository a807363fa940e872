// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Edge-contour detection pipeline:
//
//   decode -> grayscale -> 5x5 Gaussian blur -> Canny (50/150) -> external contours
//
// Thresholds and kernel size are fixed so that runs at different JPEG
// qualities are directly comparable.

use std::path::Path;

use contourbench_core::Contour;
use contourbench_core::error::Result;
use image::{DynamicImage, GrayImage};
use imageproc::edges::canny;
use imageproc::filter::separable_filter_equal;
use tracing::{debug, info, instrument};

use crate::codec;
use crate::contours::find_external_contours;

/// Canny hysteresis thresholds.
pub const CANNY_LOW: f32 = 50.0;
pub const CANNY_HIGH: f32 = 150.0;

/// 5-tap Gaussian with sigma derived from the kernel size (the binomial
/// 1-4-6-4-1 row, normalised).
pub const BLUR_KERNEL: [f32; 5] = [0.0625, 0.25, 0.375, 0.25, 0.0625];

/// Output of one detection pass.
#[derive(Debug, Clone)]
pub struct Detection {
    /// The decoded image at full resolution and original colour.
    pub image: DynamicImage,
    pub contours: Vec<Contour>,
}

impl Detection {
    pub fn contour_count(&self) -> usize {
        self.contours.len()
    }
}

/// Decode `path` and run the detection pipeline on it.
///
/// Returns `Err(BenchError::Decode)` if the file is missing or unreadable.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn detect_path(path: impl AsRef<Path>) -> Result<Detection> {
    let image = codec::decode(path.as_ref())?;
    let contours = detect_image(&image);
    info!(
        width = image.width(),
        height = image.height(),
        contours = contours.len(),
        "Detection complete"
    );
    Ok(Detection { image, contours })
}

/// Run the detection pipeline on an already decoded image.
pub fn detect_image(image: &DynamicImage) -> Vec<Contour> {
    let edges = edge_map(image);
    let contours = find_external_contours(&edges);
    debug!(contours = contours.len(), "External contours extracted");
    contours
}

/// Grayscale, blur and Canny: the binary edge image contours are traced from.
pub fn edge_map(image: &DynamicImage) -> GrayImage {
    let gray = image.to_luma8();
    let blurred = blur(&gray);
    debug!("Applied 5x5 Gaussian blur");
    canny(&blurred, CANNY_LOW, CANNY_HIGH)
}

fn blur(gray: &GrayImage) -> GrayImage {
    separable_filter_equal(gray, &BLUR_KERNEL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Luma, Rgb, RgbImage};

    /// Dark background with a bright filled rectangle.
    fn rectangle_scene(width: u32, height: u32) -> DynamicImage {
        let mut img = RgbImage::from_pixel(width, height, Rgb([20, 20, 20]));
        for y in height / 4..height * 3 / 4 {
            for x in width / 4..width * 3 / 4 {
                img.put_pixel(x, y, Rgb([230, 230, 230]));
            }
        }
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn blur_kernel_is_normalised() {
        let sum: f32 = BLUR_KERNEL.iter().sum();
        assert!((sum - 1.0).abs() < 1e-6);
        assert_eq!(BLUR_KERNEL.len(), 5);
    }

    #[test]
    fn blur_leaves_flat_image_flat() {
        let flat = GrayImage::from_pixel(16, 16, Luma([77u8]));
        let out = blur(&flat);
        assert!(out.pixels().all(|p| p.0[0] == 77));
    }

    #[test]
    fn solid_image_has_no_edges_or_contours() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(64, 48, Rgb([90, 140, 200])));
        assert!(edge_map(&img).pixels().all(|p| p.0[0] == 0));
        assert!(detect_image(&img).is_empty());
    }

    #[test]
    fn rectangle_produces_contours() {
        let img = rectangle_scene(120, 90);
        let edges = edge_map(&img);
        assert!(edges.pixels().any(|p| p.0[0] > 0), "Canny found no edges");
        assert!(!detect_image(&img).is_empty());
    }

    #[test]
    fn detection_is_deterministic() {
        let img = rectangle_scene(100, 80);
        assert_eq!(detect_image(&img), detect_image(&img));
    }

    #[test]
    fn detect_path_returns_full_resolution_original() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("scene.png");
        rectangle_scene(120, 90).save(&path).expect("save png");

        let detection = detect_path(&path).expect("detect");
        assert_eq!((detection.image.width(), detection.image.height()), (120, 90));
        assert_eq!(detection.contour_count(), detection.contours.len());
        assert!(detection.contour_count() > 0);
    }

    #[test]
    fn detect_path_missing_file_errors() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(detect_path(dir.path().join("missing.png")).is_err());
    }
}
