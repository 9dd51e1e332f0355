// Stroke normalization, the "$1" pipeline: resample to a fixed point
// count, rotate so the start-point direction is canonical, scale to a
// reference square, translate the centroid to the origin. Two strokes run
// through this become comparable no matter how fast, how large, or at what
// starting orientation they were drawn.

use crate::types::Point;

/// Side length of the reference square all strokes are scaled into.
pub const SQUARE_SIZE: f32 = 250.0;

/// Default resample target; recognition quality is stable from ~32 up.
pub const DEFAULT_RESAMPLE_COUNT: usize = 64;

const DEGENERATE_EXTENT: f32 = 1e-6;

/// Run the full pipeline. Empty input (or a target below 2) yields an
/// empty stroke; every non-empty input yields exactly `target_count`
/// points, origin-centered and unit-scaled.
pub fn normalize(points: &[Point], target_count: usize) -> Vec<Point> {
    if points.is_empty() || target_count < 2 {
        return Vec::new();
    }
    let resampled = resample(points, target_count);
    let rotated = rotate_to_indicative_angle(&resampled);
    let scaled = scale_to_square(&rotated, SQUARE_SIZE);
    translate_to_origin(&scaled)
}

/// Sum of consecutive-point distances along the stroke.
pub fn path_length(points: &[Point]) -> f32 {
    let mut length = 0.0;
    for pair in points.windows(2) {
        length += pair[0].distance(pair[1]);
    }
    length
}

/// Mean position of all points.
pub fn centroid(points: &[Point]) -> Point {
    let mut cx = 0.0;
    let mut cy = 0.0;
    for p in points {
        cx += p.x;
        cy += p.y;
    }
    let n = points.len() as f32;
    Point::new(cx / n, cy / n)
}

/// Resample into `n` points spaced evenly along the path. The first input
/// point is always kept; rounding drift at the tail is corrected by
/// clamping to the last input point. Empty input (or n < 2) resamples to
/// nothing.
pub fn resample(points: &[Point], n: usize) -> Vec<Point> {
    if points.is_empty() || n < 2 {
        return Vec::new();
    }
    let interval = path_length(points) / (n - 1) as f32;

    let mut out = Vec::with_capacity(n);
    out.push(points[0]);

    // All points coincident (single-point stroke): repeat in place.
    if interval <= 0.0 {
        while out.len() < n {
            out.push(points[0]);
        }
        return out;
    }

    let mut carried = 0.0;
    for i in 1..points.len() {
        let mut dist = points[i - 1].distance(points[i]);
        if carried + dist >= interval {
            let mut prev = points[i - 1];
            while carried + dist >= interval && out.len() < n {
                let t = if dist != 0.0 {
                    ((interval - carried) / dist).clamp(0.0, 1.0)
                } else {
                    0.5
                };
                let q = Point::new(
                    prev.x + t * (points[i].x - prev.x),
                    prev.y + t * (points[i].y - prev.y),
                );
                out.push(q);
                // Remainder of this segment carries into the next step.
                dist = carried + dist - interval;
                carried = 0.0;
                prev = q;
            }
            carried = dist;
        } else {
            carried += dist;
        }
    }

    while out.len() < n {
        out.push(*points.last().unwrap());
    }
    out.truncate(n);
    out
}

/// Rotate every point by `angle` radians about `origin`.
pub fn rotate_by(points: &[Point], angle: f32, origin: Point) -> Vec<Point> {
    let (sin, cos) = angle.sin_cos();
    points
        .iter()
        .map(|p| {
            let dx = p.x - origin.x;
            let dy = p.y - origin.y;
            Point::new(
                dx * cos - dy * sin + origin.x,
                dx * sin + dy * cos + origin.y,
            )
        })
        .collect()
}

/// Rotate about the centroid so the centroid-to-first-point direction
/// lands on the positive x axis. Removes stroke-start-orientation bias.
/// Empty input stays empty.
pub fn rotate_to_indicative_angle(points: &[Point]) -> Vec<Point> {
    if points.is_empty() {
        return Vec::new();
    }
    let c = centroid(points);
    let angle = (points[0].y - c.y).atan2(points[0].x - c.x);
    rotate_by(points, -angle, c)
}

/// Scale each axis so the bounding box matches `size` x `size`. An axis
/// with (near) zero extent is left unscaled rather than divided by zero.
pub fn scale_to_square(points: &[Point], size: f32) -> Vec<Point> {
    let mut min_x = f32::MAX;
    let mut min_y = f32::MAX;
    let mut max_x = f32::MIN;
    let mut max_y = f32::MIN;
    for p in points {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    let width = max_x - min_x;
    let height = max_y - min_y;

    let sx = if width > DEGENERATE_EXTENT { size / width } else { 1.0 };
    let sy = if height > DEGENERATE_EXTENT { size / height } else { 1.0 };

    points
        .iter()
        .map(|p| Point::new(p.x * sx, p.y * sy))
        .collect()
}

/// Translate so the centroid sits at the origin.
pub fn translate_to_origin(points: &[Point]) -> Vec<Point> {
    let c = centroid(points);
    points
        .iter()
        .map(|p| Point::new(p.x - c.x, p.y - c.y))
        .collect()
}
