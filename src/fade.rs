// Per-pixel fade animation: each tick moves the current buffer a fixed
// fraction toward the target buffer. A plain lerp never actually arrives,
// so pixels whose alpha falls under a small threshold snap to the target
// value exactly; the animation reports completion once every pixel is under
// the threshold.

use crate::buffer::PixelBuffer;

/// Alpha at or below this counts as fully faded.
pub const ALPHA_THRESHOLD: f32 = 0.1;

/// Advance the fade by one tick. `rate` is the lerp fraction per tick,
/// in (0,1). Returns true when every pixel has converged; the caller stops
/// ticking at that point.
/// Both buffers must share identical dimensions.
pub fn tick(current: &mut PixelBuffer, target: &PixelBuffer, rate: f32) -> bool {
    debug_assert_eq!(current.len(), target.len());

    let mut finished = true;
    let targets = target.pixels();
    for (i, pixel) in current.pixels_mut().iter_mut().enumerate() {
        let faded = pixel.lerp(targets[i], rate);
        if faded.a > ALPHA_THRESHOLD {
            finished = false;
            *pixel = faded;
        } else {
            // Snap so the animation terminates instead of approaching
            // the target asymptotically.
            *pixel = targets[i];
        }
    }
    finished
}
