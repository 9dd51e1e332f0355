// Window + software HUD drawing.
// Visual pieces provided here:
// 1) A window that shows the composited canvas and reports input state.
// 2) A brush cursor: a one-pixel ring outlining the brush footprint.
// 3) A compact 3x5 column-packed font, doubled to 6x10 on screen, for the
//    HUD line (template names, scores, FPS).

use crate::error::{Error, Result};
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

/// The u32 surface pushed to the window each frame, 0x00RRGGBB per pixel.
pub struct Surface {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u32>,
}

impl Surface {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0u32; width * height],
        }
    }

    /// Write one pixel, ignoring coordinates outside the surface.
    #[inline]
    pub fn plot(&mut self, x: i32, y: i32, color: u32) {
        if (0..self.width as i32).contains(&x) && (0..self.height as i32).contains(&y) {
            self.pixels[y as usize * self.width + x as usize] = color;
        }
    }

    /// Fill a size x size block; the scaled-up pixels of the HUD font.
    fn fill_block(&mut self, x: i32, y: i32, size: i32, color: u32) {
        for dy in 0..size {
            for dx in 0..size {
                self.plot(x + dx, y + dy, color);
            }
        }
    }
}

/// Everything the main loop wants to know about this frame's input.
/// The `*_once` style keys report true only on the frame they go down.
#[derive(Clone, Copy, Debug, Default)]
pub struct InputState {
    /// Pointer position in window pixels, clamped to the window.
    pub mouse: Option<(usize, usize)>,
    /// True while the left button is held (the stroke is being drawn).
    pub mouse_down: bool,
    /// ESC: leave the main loop.
    pub quit: bool,
    /// T: toggle save-as-template mode.
    pub toggle_save_mode: bool,
    /// C: throw away the in-progress stroke.
    pub cancel_stroke: bool,
    /// S: export a PNG of the visible canvas.
    pub take_snapshot: bool,
    /// Number row 1..=5: chosen brush color slot.
    pub palette_slot: Option<usize>,
}

pub struct Drawer {
    window: Window, // the on-screen window you see
}

impl Drawer {
    /// Create a window sized to the canvas.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self> {
        let window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        Ok(Self { window })
    }

    /// Push the pixels for this frame to the screen.
    pub fn present(&mut self, surface: &Surface) -> Result<()> {
        self.window
            .update_with_buffer(&surface.pixels, surface.width, surface.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// Snapshot this frame's input in one call.
    pub fn input(&self) -> InputState {
        const PALETTE_KEYS: [Key; 5] = [Key::Key1, Key::Key2, Key::Key3, Key::Key4, Key::Key5];
        InputState {
            mouse: self
                .window
                .get_mouse_pos(MouseMode::Clamp)
                .map(|(x, y)| (x.max(0.0) as usize, y.max(0.0) as usize)),
            mouse_down: self.window.get_mouse_down(MouseButton::Left),
            quit: self.window.is_key_down(Key::Escape),
            toggle_save_mode: self.window.is_key_pressed(Key::T, KeyRepeat::No),
            cancel_stroke: self.window.is_key_pressed(Key::C, KeyRepeat::No),
            take_snapshot: self.window.is_key_pressed(Key::S, KeyRepeat::No),
            palette_slot: PALETTE_KEYS
                .iter()
                .position(|k| self.window.is_key_pressed(*k, KeyRepeat::No)),
        }
    }
}

/* ---------- brush cursor ---------- */

/// Outline the brush footprint: a one-pixel ring at `radius` around the
/// pointer plus a center dot, so the next stamp's width is visible before
/// the stroke starts.
pub fn draw_brush_cursor(surface: &mut Surface, cx: i32, cy: i32, radius: i32, color: u32) {
    let radius = radius.max(1);
    // d2 in [r^2 - r, r^2 + r] keeps the ring about one pixel thick.
    let band_lo = radius * radius - radius;
    let band_hi = radius * radius + radius;
    for dy in (-radius - 1)..=(radius + 1) {
        for dx in (-radius - 1)..=(radius + 1) {
            let d2 = dx * dx + dy * dy;
            if d2 >= band_lo && d2 <= band_hi {
                surface.plot(cx + dx, cy + dy, color);
            }
        }
    }
    surface.plot(cx, cy, color);
}

/* ---------- HUD text: 3x5 glyphs, column-packed, drawn at 2x ---------- */

/// On-screen scale factor for the HUD font.
const HUD_SCALE: i32 = 2;
/// Columns per glyph cell, including the one-column gap.
const CELL_COLUMNS: i32 = 4;
/// Glyph height in font pixels.
const GLYPH_ROWS: i32 = 5;

/// Each glyph is three columns; a column's low five bits are its pixels,
/// bit 0 at the top. Lowercase input is folded onto the uppercase shapes.
const GLYPHS: &[(char, [u8; 3])] = &[
    ('0', [31, 17, 31]),
    ('1', [18, 31, 16]),
    ('2', [29, 21, 23]),
    ('3', [21, 21, 31]),
    ('4', [7, 4, 31]),
    ('5', [23, 21, 29]),
    ('6', [31, 21, 29]),
    ('7', [1, 1, 31]),
    ('8', [31, 21, 31]),
    ('9', [23, 21, 31]),
    ('A', [30, 5, 30]),
    ('B', [31, 21, 10]),
    ('C', [14, 17, 17]),
    ('D', [31, 17, 14]),
    ('E', [31, 21, 17]),
    ('F', [31, 5, 1]),
    ('G', [14, 17, 29]),
    ('H', [31, 4, 31]),
    ('I', [17, 31, 17]),
    ('J', [8, 16, 15]),
    ('K', [31, 4, 27]),
    ('L', [31, 16, 16]),
    ('M', [31, 2, 31]),
    ('N', [31, 1, 30]),
    ('O', [14, 17, 14]),
    ('P', [31, 5, 2]),
    ('Q', [14, 17, 30]),
    ('R', [31, 5, 26]),
    ('S', [18, 21, 9]),
    ('T', [1, 31, 1]),
    ('U', [15, 16, 15]),
    ('V', [7, 24, 7]),
    ('W', [31, 8, 31]),
    ('X', [27, 4, 27]),
    ('Y', [3, 28, 3]),
    ('Z', [25, 21, 19]),
    (' ', [0, 0, 0]),
    ('|', [0, 31, 0]),
    (':', [0, 10, 0]),
    ('.', [0, 16, 0]),
    ('-', [4, 4, 4]),
    ('%', [25, 4, 19]),
    ('?', [1, 21, 2]),
];

fn glyph(ch: char) -> Option<[u8; 3]> {
    let ch = ch.to_ascii_uppercase();
    GLYPHS.iter().find(|(g, _)| *g == ch).map(|(_, cols)| *cols)
}

/// Pixel width of `text` when drawn with `draw_hud_text`.
pub fn hud_text_width(text: &str) -> i32 {
    text.chars().count() as i32 * CELL_COLUMNS * HUD_SCALE
}

/// Draw a HUD string at (x,y). Characters without a glyph leave their
/// cell empty.
pub fn draw_hud_text(surface: &mut Surface, x: i32, y: i32, text: &str, color: u32) {
    let mut pen = x;
    for ch in text.chars() {
        if let Some(columns) = glyph(ch) {
            for (ci, bits) in columns.iter().enumerate() {
                for row in 0..GLYPH_ROWS {
                    if bits & (1 << row) != 0 {
                        surface.fill_block(
                            pen + ci as i32 * HUD_SCALE,
                            y + row * HUD_SCALE,
                            HUD_SCALE,
                            color,
                        );
                    }
                }
            }
        }
        pen += CELL_COLUMNS * HUD_SCALE;
    }
}

/// Draw a HUD string over a backing strip sized to the text, so the line
/// stays readable over whatever the canvas holds.
pub fn draw_hud_line(surface: &mut Surface, x: i32, y: i32, text: &str, fg: u32, bg: u32) {
    let width = hud_text_width(text);
    let height = GLYPH_ROWS * HUD_SCALE;
    for py in (y - 2)..(y + height + 2) {
        for px in (x - 2)..(x + width + 2) {
            surface.plot(px, py, bg);
        }
    }
    draw_hud_text(surface, x, y, text, fg);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_hud_character_has_a_glyph() {
        for ch in ('a'..='z')
            .chain('A'..='Z')
            .chain('0'..='9')
            .chain(" |:.-%?".chars())
        {
            assert!(glyph(ch).is_some(), "missing glyph for {ch:?}");
        }
    }

    #[test]
    fn hud_line_renders_text_over_its_backing_strip() {
        let mut surface = Surface::new(200, 24);
        draw_hud_line(&mut surface, 4, 4, "circle 97% | FPS: 60.0", 0x0020_2020, 0x00F4_F4F4);
        assert!(surface.pixels.iter().any(|p| *p == 0x0020_2020));
        assert!(surface.pixels.iter().any(|p| *p == 0x00F4_F4F4));
    }

    #[test]
    fn hud_text_clips_at_the_surface_edge() {
        let mut surface = Surface::new(12, 8);
        draw_hud_text(&mut surface, 6, 2, "WWWW", 0x00FF_FFFF);
        draw_hud_line(&mut surface, -4, -4, "edge", 0x00FF_FFFF, 0x0011_1111);
    }

    #[test]
    fn text_width_counts_cells() {
        assert_eq!(hud_text_width(""), 0);
        assert_eq!(hud_text_width("AB"), 2 * CELL_COLUMNS * HUD_SCALE);
    }

    #[test]
    fn brush_cursor_ring_sits_at_the_brush_radius() {
        let mut surface = Surface::new(64, 64);
        draw_brush_cursor(&mut surface, 32, 32, 10, 0x00FF_CC33);

        let at = |x: i32, y: i32| surface.pixels[y as usize * 64 + x as usize];
        // On the ring, one radius to the right of center.
        assert_eq!(at(42, 32), 0x00FF_CC33);
        // Center dot is marked, the ring interior is not.
        assert_eq!(at(32, 32), 0x00FF_CC33);
        assert_eq!(at(36, 32), 0);
        // Well outside the ring stays untouched.
        assert_eq!(at(45, 32), 0);
    }

    #[test]
    fn brush_cursor_clips_outside_the_surface() {
        let mut surface = Surface::new(16, 16);
        draw_brush_cursor(&mut surface, 0, 0, 8, 0x00FF_CC33);
        assert!(surface.pixels.iter().any(|p| *p == 0x00FF_CC33));
    }
}
