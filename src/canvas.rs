// The drawing session: owns the three pixel buffers (paint, reference,
// fading), captures the in-progress stroke, and runs the end-of-stroke
// sequence (recognize or store, recolor pass, fade kickoff). Buffers are
// allocated once here and mutated in place for the life of the session.
//
// What you see: while the mouse is down the stroke appears in the paint
// color; on release the painted pixels flip to the matched template's
// color and fade out over the following ticks.

use tracing::{debug, info};

use crate::brush;
use crate::buffer::PixelBuffer;
use crate::config::Config;
use crate::fade;
use crate::recognize::{GestureRecognizer, RecognitionResult};
use crate::templates::TemplateStore;
use crate::types::{Color, Point};

/// What a finished stroke is used for.
#[derive(Clone, Debug)]
pub enum StrokeMode {
    /// Score against the store and report the best match.
    Recognize,
    /// Store the stroke as a new example under `name` instead.
    SaveTemplate { name: String, color: Color },
}

pub struct Canvas {
    paint: PixelBuffer,
    reference: PixelBuffer, // the blank state; clear source and fade target
    fading: PixelBuffer,

    points: Vec<Point>,
    previous: Option<Point>,
    drawing: bool,
    fading_active: bool,

    brush_radius: i32,
    paint_color: Color,
    finished_color: Color,
    fade_rate: f32,
    color_tolerance: f32,
}

impl Canvas {
    pub fn new(config: &Config) -> Self {
        let (w, h) = (config.canvas_width, config.canvas_height);
        Self {
            paint: PixelBuffer::new(w, h),
            reference: PixelBuffer::new(w, h),
            fading: PixelBuffer::new(w, h),
            points: Vec::new(),
            previous: None,
            drawing: false,
            fading_active: false,
            brush_radius: config.brush_radius,
            paint_color: config.paint_color(),
            finished_color: config.finished_color(),
            fade_rate: config.fade_rate,
            color_tolerance: config.color_tolerance,
        }
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    pub fn is_fading(&self) -> bool {
        self.fading_active
    }

    pub fn paint_color(&self) -> Color {
        self.paint_color
    }

    pub fn set_paint_color(&mut self, color: Color) {
        self.paint_color = color;
    }

    pub fn paint(&self) -> &PixelBuffer {
        &self.paint
    }

    pub fn fading(&self) -> &PixelBuffer {
        &self.fading
    }

    /// Begin capturing a stroke. A second start while one is already in
    /// progress is ignored; one stroke at a time.
    pub fn start_stroke(&mut self) {
        if self.drawing {
            return;
        }
        self.drawing = true;
        self.points.clear();
        self.previous = None;
    }

    /// Append a point and paint it. Updates outside a start/end pair are
    /// ignored, as is a point identical to the previous one.
    pub fn update_stroke(&mut self, point: Point) {
        if !self.drawing {
            return;
        }
        if self.previous == Some(point) {
            return;
        }
        if let Some(prev) = self.previous {
            brush::draw_segment(&mut self.paint, prev, point, self.brush_radius, self.paint_color);
        }
        brush::stamp_disc(&mut self.paint, point, self.brush_radius, self.paint_color);
        self.points.push(point);
        self.previous = Some(point);
    }

    /// Finish the stroke: recognize (or store) it, run the recolor pass
    /// into the fading buffer, reset the paint buffer, start the fade.
    /// Returns the recognition outcome in `Recognize` mode.
    pub fn end_stroke(
        &mut self,
        recognizer: &GestureRecognizer,
        store: &mut TemplateStore,
        mode: &StrokeMode,
    ) -> Option<RecognitionResult> {
        if !self.drawing {
            return None;
        }
        self.drawing = false;
        self.previous = None;
        let points = std::mem::take(&mut self.points);

        let (result, finished) = match mode {
            StrokeMode::Recognize => {
                let result = recognizer.recognize(&points, store);
                match &result.name {
                    Some(name) => info!(name = %name, score = result.score, "gesture recognized"),
                    None => info!("no matching gesture"),
                }
                let finished = if result.is_match() {
                    result.color
                } else {
                    self.finished_color
                };
                (Some(result), finished)
            }
            StrokeMode::SaveTemplate { name, color } => {
                store.upsert(name, *color, recognizer.prepare_example(&points));
                (None, *color)
            }
        };

        self.recolor_and_reset(finished);
        self.fading_active = true;
        result
    }

    /// Abandon the stroke: nothing is recognized or stored and the
    /// partially painted buffer goes back to blank.
    pub fn cancel_stroke(&mut self) {
        if !self.drawing {
            return;
        }
        self.drawing = false;
        self.previous = None;
        self.points.clear();
        self.paint.copy_from(&self.reference);
        debug!("stroke cancelled");
    }

    /// Advance the fade by one tick if one is running. Returns true while
    /// the fade is still animating.
    pub fn tick(&mut self) -> bool {
        if self.fading_active && fade::tick(&mut self.fading, &self.reference, self.fade_rate) {
            self.fading_active = false;
            debug!("fade complete");
        }
        self.fading_active
    }

    /// Move finished paint into the fading buffer, recoloring pixels that
    /// carry the brush color to `finished`; then reset the paint buffer
    /// from the reference. Runs exactly once per completed stroke.
    fn recolor_and_reset(&mut self, finished: Color) {
        let tolerance = self.color_tolerance;
        let brush_color = self.paint_color;
        for (dst, src) in self.fading.pixels_mut().iter_mut().zip(self.paint.pixels()) {
            *dst = if src.distance(brush_color) <= tolerance {
                finished
            } else {
                *src
            };
        }
        self.paint.copy_from(&self.reference);
    }

    /// Pack fading-over-paint-over-background into a 0x00RRGGBB window
    /// surface. `surface` must hold width*height entries.
    pub fn present_into(&self, surface: &mut [u32], background: Color) {
        debug_assert_eq!(surface.len(), self.paint.len());
        for (i, out) in surface.iter_mut().enumerate() {
            let mut color = background;
            color = self.fading.pixels()[i].over(color);
            color = self.paint.pixels()[i].over(color);
            *out = color.to_0rgb();
        }
    }

    /// Same composite as an owned RGBA buffer (used for snapshots).
    pub fn composited(&self, background: Color) -> PixelBuffer {
        let mut out = PixelBuffer::filled(self.paint.width(), self.paint.height(), background);
        for (i, dst) in out.pixels_mut().iter_mut().enumerate() {
            let mut color = *dst;
            color = self.fading.pixels()[i].over(color);
            color = self.paint.pixels()[i].over(color);
            *dst = color;
        }
        out
    }
}
