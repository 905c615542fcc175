//! Corner rounding: replacing sharp polygon vertices with circular arcs.

use std::f64::consts::TAU;

use crate::point::Point;
use crate::polygon::Polygon;

/// An error produced while rounding polygon corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FilletError {
    /// The polygon has fewer than 3 vertices.
    #[error("cannot round corners of a polygon with fewer than 3 vertices")]
    TooFewPoints,
    /// A fillet radius was negative.
    #[error("fillet radii must be non-negative")]
    NegativeRadius,
    /// The requested radius does not fit on the edges adjacent to a vertex.
    #[error("fillet radius {radius} exceeds the support of the edges at vertex {vertex}")]
    RadiusTooLarge {
        /// The index of the offending vertex.
        vertex: usize,
        /// The requested radius at that vertex.
        radius: i64,
    },
    /// Rounding produced (or was given) a self-intersecting polygon.
    #[error("corner rounding produced a self-intersecting polygon")]
    SelfIntersecting,
}

/// Replaces each vertex of `polygon` with a circular arc.
///
/// Convex vertices are rounded with `outer_radius`; concave vertices with
/// `inner_radius`. A radius of zero leaves the corresponding vertices sharp.
/// `arc_segments` is the number of segments used to tessellate a full
/// circle, so sharper corners receive proportionally fewer points.
///
/// Radii are in DBU. The arc must fit within half of each adjacent edge;
/// otherwise [`FilletError::RadiusTooLarge`] is returned and the input is
/// left untouched. Collinear vertices pass through unmodified.
pub fn round_corners(
    polygon: &Polygon,
    inner_radius: i64,
    outer_radius: i64,
    arc_segments: usize,
) -> Result<Polygon, FilletError> {
    let pts = polygon.points();
    let n = pts.len();
    if n < 3 {
        return Err(FilletError::TooFewPoints);
    }
    if inner_radius < 0 || outer_radius < 0 {
        return Err(FilletError::NegativeRadius);
    }
    let arc_segments = arc_segments.max(1);
    let ccw = polygon.is_ccw();

    let mut out: Vec<Point> = Vec::with_capacity(n);
    for i in 0..n {
        let prev = pts[(i + n - 1) % n];
        let v = pts[i];
        let next = pts[(i + 1) % n];

        let ax = (v.x - prev.x) as f64;
        let ay = (v.y - prev.y) as f64;
        let bx = (next.x - v.x) as f64;
        let by = (next.y - v.y) as f64;
        let turn = ax * by - ay * bx;
        if turn == 0.0 {
            out.push(v);
            continue;
        }

        let convex = (turn > 0.0) == ccw;
        let radius = if convex { outer_radius } else { inner_radius };
        if radius == 0 {
            out.push(v);
            continue;
        }

        let len_a = ax.hypot(ay);
        let len_b = bx.hypot(by);
        // Unit vectors pointing away from the vertex along each edge.
        let (u1x, u1y) = (-ax / len_a, -ay / len_a);
        let (u2x, u2y) = (bx / len_b, by / len_b);

        // Half the interior angle at the vertex.
        let cos_theta = (u1x * u2x + u1y * u2y).clamp(-1.0, 1.0);
        let half = cos_theta.acos() / 2.0;
        let r = radius as f64;
        let tangent = r / half.tan();
        if tangent > len_a / 2.0 + 1e-9 || tangent > len_b / 2.0 + 1e-9 {
            return Err(FilletError::RadiusTooLarge { vertex: i, radius });
        }

        // The fillet center sits on the interior angle bisector.
        let (mut bis_x, mut bis_y) = (u1x + u2x, u1y + u2y);
        let bis_len = bis_x.hypot(bis_y);
        bis_x /= bis_len;
        bis_y /= bis_len;
        let cx = v.x as f64 + bis_x * r / half.sin();
        let cy = v.y as f64 + bis_y * r / half.sin();

        // Tangent points on the incoming and outgoing edges.
        let (sx, sy) = (v.x as f64 + u1x * tangent, v.y as f64 + u1y * tangent);
        let (ex, ey) = (v.x as f64 + u2x * tangent, v.y as f64 + u2y * tangent);

        let start = (sy - cy).atan2(sx - cx);
        let end = (ey - cy).atan2(ex - cx);
        // Sweep in the direction the boundary turns at this vertex.
        let mut sweep = end - start;
        if turn > 0.0 && sweep < 0.0 {
            sweep += TAU;
        } else if turn < 0.0 && sweep > 0.0 {
            sweep -= TAU;
        }

        let steps = ((arc_segments as f64 * sweep.abs() / TAU).round() as usize).max(1);
        for k in 0..=steps {
            let angle = start + sweep * k as f64 / steps as f64;
            let px = (cx + r * angle.cos()).round() as i64;
            let py = (cy + r * angle.sin()).round() as i64;
            out.push(Point::new(px, py));
        }
    }

    // Rounding to the DBU grid can produce coincident neighbors.
    out.dedup();
    if out.len() > 1 && out.first() == out.last() {
        out.pop();
    }

    let rounded = Polygon::from_verts(out);
    if !rounded.is_simple() {
        return Err(FilletError::SelfIntersecting);
    }
    Ok(rounded)
}
