//! Foreground-region extraction from a binary mask.
//!
//! Outer contours only (holes inside a region never count as separate
//! motion), traced with `imageproc` and measured with the shoelace formula
//! over the boundary polygon.

use image::GrayImage;
use imageproc::contours::{find_contours, BorderType, Contour};

/// One connected foreground region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionRegion {
    /// Polygon area of the traced outer boundary, in pixels squared.
    pub area: f64,
    /// Bounding box top-left corner.
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Extract outer foreground contours and their areas from a binary mask.
///
/// Non-zero pixels are foreground. Degenerate contours (single pixels, thin
/// lines) report an area of zero, matching traced-polygon semantics.
pub fn find_motion_regions(mask: &GrayImage) -> Vec<MotionRegion> {
    find_contours::<i32>(mask)
        .into_iter()
        .filter(|c| c.border_type == BorderType::Outer)
        .map(region_from_contour)
        .collect()
}

fn region_from_contour(contour: Contour<i32>) -> MotionRegion {
    let points = &contour.points;

    let mut min_x = i32::MAX;
    let mut min_y = i32::MAX;
    let mut max_x = i32::MIN;
    let mut max_y = i32::MIN;
    for p in points {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }

    MotionRegion {
        area: polygon_area(points),
        x: min_x.max(0) as u32,
        y: min_y.max(0) as u32,
        width: (max_x - min_x + 1).max(0) as u32,
        height: (max_y - min_y + 1).max(0) as u32,
    }
}

/// Shoelace area of a closed polygon given by its boundary points.
fn polygon_area(points: &[imageproc::point::Point<i32>]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut twice_area = 0i64;
    for (i, p) in points.iter().enumerate() {
        let q = &points[(i + 1) % points.len()];
        twice_area += p.x as i64 * q.y as i64 - q.x as i64 * p.y as i64;
    }
    (twice_area.abs() as f64) / 2.0
}
