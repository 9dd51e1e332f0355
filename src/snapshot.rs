// Canvas snapshot export: packs a PixelBuffer into an RGBA image and
// writes it as PNG (the format is picked from the file extension).

use std::path::Path;

use image::{Rgba, RgbaImage};
use tracing::info;

use crate::buffer::PixelBuffer;
use crate::error::{Error, Result};

pub fn save_png(buffer: &PixelBuffer, path: &Path) -> Result<()> {
    let (w, h) = (buffer.width() as u32, buffer.height() as u32);
    let img = RgbaImage::from_fn(w, h, |x, y| {
        // from_fn only asks for in-range coordinates, so get() always hits.
        let color = buffer.get(x as i32, y as i32).unwrap_or_default();
        Rgba(color.to_rgba8())
    });
    img.save(path)
        .map_err(|e| Error::Snapshot(format!("{}: {e}", path.display())))?;
    info!(path = %path.display(), "snapshot written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;

    #[test]
    fn writes_a_decodable_png() {
        let mut buffer = PixelBuffer::filled(8, 6, Color::WHITE);
        buffer.set(3, 2, Color::RED);

        let path = std::env::temp_dir().join(format!(
            "gesture-canvas-snapshot-{}.png",
            std::process::id()
        ));
        save_png(&buffer, &path).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.dimensions(), (8, 6));
        assert_eq!(img.get_pixel(3, 2).0, [255, 0, 0, 255]);
        assert_eq!(img.get_pixel(0, 0).0, [255, 255, 255, 255]);

        let _ = std::fs::remove_file(&path);
    }
}
