// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// contourbench-vision - Image side of the benchmark.
//
// Provides decoding and JPEG re-encoding (codec), the fixed edge-detection
// pipeline (grayscale, 5x5 Gaussian blur, Canny, external contours), and
// contour overlays drawn onto the decoded image.

pub mod codec;
pub mod contours;
pub mod detect;
pub mod overlay;

pub use codec::{decode, encode_jpeg};
pub use detect::{Detection, detect_image, detect_path};
pub use overlay::{CONTOUR_COLOR, CONTOUR_THICKNESS, draw_contours};
