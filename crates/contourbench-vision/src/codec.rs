// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Decoding from disk and JPEG re-encoding to disk.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use contourbench_core::error::{BenchError, Result};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageReader};
use tracing::{debug, instrument};

/// Load an image from a file path.
///
/// The format is sniffed from the file contents rather than the extension, so
/// a JPEG stream stored as `compressed_90_photo.png` decodes correctly.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn decode(path: impl AsRef<Path>) -> Result<DynamicImage> {
    let path = path.as_ref();
    let decode_err = |reason: String| BenchError::Decode {
        path: path.to_path_buf(),
        reason,
    };

    let image = ImageReader::open(path)
        .map_err(|err| decode_err(err.to_string()))?
        .with_guessed_format()
        .map_err(|err| decode_err(err.to_string()))?
        .decode()
        .map_err(|err| decode_err(err.to_string()))?;

    debug!(
        width = image.width(),
        height = image.height(),
        "Image decoded"
    );
    Ok(image)
}

/// Encode `image` as JPEG with the given quality (1-100) and write it to
/// `path`, creating or overwriting the file.
///
/// Alpha is dropped; JPEG only carries colour or luma.
#[instrument(skip(image), fields(path = %path.as_ref().display(), quality))]
pub fn encode_jpeg(image: &DynamicImage, path: impl AsRef<Path>, quality: u8) -> Result<()> {
    let path = path.as_ref();
    let encode_err = |reason: String| BenchError::Encode {
        path: path.to_path_buf(),
        reason,
    };

    let file = File::create(path).map_err(|err| encode_err(err.to_string()))?;
    let mut writer = BufWriter::new(file);
    let encoder = JpegEncoder::new_with_quality(&mut writer, quality.clamp(1, 100));
    image
        .to_rgb8()
        .write_with_encoder(encoder)
        .map_err(|err| encode_err(format!("JPEG encoding failed: {err}")))?;
    writer.flush().map_err(|err| encode_err(err.to_string()))?;

    debug!(quality, "JPEG written");
    Ok(())
}
