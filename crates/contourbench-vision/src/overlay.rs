// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Contour overlays drawn onto the decoded image for visual inspection.

use contourbench_core::Contour;
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;

/// Overlay colour (green).
pub const CONTOUR_COLOR: Rgb<u8> = Rgb([0, 255, 0]);

/// Overlay stroke width in pixels.
pub const CONTOUR_THICKNESS: u32 = 3;

/// Draw every contour as a closed polyline onto `canvas`, in place.
///
/// Strokes wider than one pixel are built by repeating the one-pixel segment
/// at every offset within the stroke, and stamping a square at each vertex so
/// single-point contours remain visible. Drawing is clipped to the canvas.
pub fn draw_contours(canvas: &mut RgbImage, contours: &[Contour], color: Rgb<u8>, thickness: u32) {
    let thickness = thickness.max(1);
    let half = (thickness / 2) as i32;

    for contour in contours {
        let points = &contour.points;
        for (i, p) in points.iter().enumerate() {
            draw_filled_rect_mut(
                canvas,
                Rect::at(p.x - half, p.y - half).of_size(thickness, thickness),
                color,
            );

            if points.len() < 2 {
                continue;
            }
            let q = points[(i + 1) % points.len()];
            for dy in -half..=half {
                for dx in -half..=half {
                    draw_line_segment_mut(
                        canvas,
                        ((p.x + dx) as f32, (p.y + dy) as f32),
                        ((q.x + dx) as f32, (q.y + dy) as f32),
                        color,
                    );
                }
            }
        }
    }
}
