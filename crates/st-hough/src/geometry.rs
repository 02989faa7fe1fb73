use st_core::{LineSegment, Point2f};

const EPS: f32 = 1e-6;

/// Normal-form parameters `(rho, theta)` of the line through `p1` and `p2`.
///
/// `theta` (radians) is `atan2(dx, -dy)`, so the normal points to the left of
/// the direction `p1 -> p2` in image coordinates (y down).
pub fn points_to_rho_theta(p1: Point2f, p2: Point2f) -> (f32, f32) {
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    let theta = dx.atan2(-dy);
    let rho = p1.x * theta.cos() + p1.y * theta.sin();
    (rho, theta)
}

/// Intersects the infinite line `(rho, theta)` with the pixel-center box
/// `[0, width-1] x [0, height-1]`.
///
/// The returned segment starts at the endpoint with the smaller `x` (then
/// smaller `y`). `None` if the line misses the box.
pub fn clip_line_to_image(
    rho: f32,
    theta: f32,
    width: usize,
    height: usize,
) -> Option<LineSegment> {
    if width == 0 || height == 0 {
        return None;
    }

    let x_max = (width - 1) as f32;
    let y_max = (height - 1) as f32;
    let (s, c) = theta.sin_cos();
    let inside = |p: &Point2f| {
        p.x >= -1e-3 && p.x <= x_max + 1e-3 && p.y >= -1e-3 && p.y <= y_max + 1e-3
    };

    let mut hits: Vec<Point2f> = Vec::with_capacity(4);
    if s.abs() > EPS {
        for x in [0.0, x_max] {
            hits.push(Point2f::new(x, (rho - x * c) / s));
        }
    }
    if c.abs() > EPS {
        for y in [0.0, y_max] {
            hits.push(Point2f::new((rho - y * s) / c, y));
        }
    }
    hits.retain(inside);
    if hits.is_empty() {
        return None;
    }

    // Farthest pair among at most four hits; corners may be duplicated.
    let mut best = (hits[0], hits[0]);
    let mut best_d = -1.0f32;
    for (i, a) in hits.iter().enumerate() {
        for b in hits.iter().skip(i) {
            let d = (*b - *a).norm();
            if d > best_d {
                best_d = d;
                best = (*a, *b);
            }
        }
    }

    let (mut start, mut end) = best;
    if (end.x, end.y) < (start.x, start.y) {
        core::mem::swap(&mut start, &mut end);
    }
    Some(LineSegment::new(
        Point2f::new(start.x.clamp(0.0, x_max), start.y.clamp(0.0, y_max)),
        Point2f::new(end.x.clamp(0.0, x_max), end.y.clamp(0.0, y_max)),
    ))
}
