// Brush rasterization: a filled disc stamped into a PixelBuffer, and a
// segment stroked by stamping discs at unit-length steps so sparse input
// sampling still produces a continuous-looking line.

use crate::buffer::PixelBuffer;
use crate::types::{Color, Point};

/// Stamp a filled disc of `radius` pixels centered at `center`.
/// Opaque overwrite, no blending; pixels outside the buffer are skipped.
pub fn stamp_disc(buffer: &mut PixelBuffer, center: Point, radius: i32, color: Color) {
    let cx = center.x.floor() as i32;
    let cy = center.y.floor() as i32;
    let r2 = radius * radius;

    // Scan the bounding square; the squared-distance test carves the disc.
    for y in (cy - radius)..=(cy + radius) {
        for x in (cx - radius)..=(cx + radius) {
            let dx = x - cx;
            let dy = y - cy;
            if dx * dx + dy * dy <= r2 {
                buffer.set(x, y, color);
            }
        }
    }
}

/// Stamp discs every 1.0 distance units from `start` toward `end`,
/// including `start` itself. `start == end` stamps exactly once.
pub fn draw_segment(
    buffer: &mut PixelBuffer,
    start: Point,
    end: Point,
    radius: i32,
    color: Color,
) {
    let distance = start.distance(end);
    if distance == 0.0 {
        stamp_disc(buffer, start, radius, color);
        return;
    }

    let dir_x = (end.x - start.x) / distance;
    let dir_y = (end.y - start.y) / distance;

    let mut travelled = 0.0;
    while travelled < distance {
        let p = Point::new(start.x + dir_x * travelled, start.y + dir_y * travelled);
        stamp_disc(buffer, p, radius, color);
        travelled += 1.0;
    }
}
