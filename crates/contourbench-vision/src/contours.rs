// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// External-contour retrieval with simple chain approximation.

use contourbench_core::{Contour, Point};
use image::GrayImage;
use imageproc::contours::{BorderType, find_contours};

/// Trace the outermost boundaries of the non-zero regions in `edges`.
///
/// Borders nested inside another region (holes, and anything inside a hole)
/// are discarded. Each retained border is compressed with
/// [`approximate_simple`].
pub fn find_external_contours(edges: &GrayImage) -> Vec<Contour> {
    find_contours::<i32>(edges)
        .into_iter()
        .filter(|c| matches!(c.border_type, BorderType::Outer) && c.parent.is_none())
        .map(|c| {
            let points: Vec<Point> = c.points.iter().map(|p| Point::new(p.x, p.y)).collect();
            Contour::new(approximate_simple(&points))
        })
        .collect()
}

/// Collapse horizontal, vertical and diagonal runs of a closed chain down to
/// their end points.
///
/// A point survives only if the step arriving at it differs from the step
/// leaving it. Chains shorter than three points are returned as-is.
pub fn approximate_simple(points: &[Point]) -> Vec<Point> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }

    let step = |a: Point, b: Point| ((b.x - a.x).signum(), (b.y - a.y).signum());

    let kept: Vec<Point> = points
        .iter()
        .enumerate()
        .filter(|&(i, &p)| {
            let prev = points[(i + n - 1) % n];
            let next = points[(i + 1) % n];
            step(prev, p) != step(p, next)
        })
        .map(|(_, &p)| p)
        .collect();

    if kept.is_empty() {
        vec![points[0]]
    } else {
        kept
    }
}
