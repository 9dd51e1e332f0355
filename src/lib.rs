//! Freehand gesture canvas: draw a stroke with a round brush, match it
//! against a library of named templates with a "$1"-style recognizer, and
//! fade the finished drawing back to blank.
//!
//! The pieces compose left to right: raw points go through
//! [`normalize`] into [`recognize`] (which consults a
//! [`templates::TemplateStore`]), while the same points drive
//! [`brush`] stamping into a [`buffer::PixelBuffer`]. The
//! [`canvas::Canvas`] session object owns the buffers and sequences the
//! end-of-stroke recolor pass and the [`fade`] animation.

pub mod brush;
pub mod buffer;
pub mod canvas;
pub mod config;
pub mod draw;
pub mod error;
pub mod fade;
pub mod normalize;
pub mod recognize;
pub mod snapshot;
pub mod templates;
pub mod types;

pub use buffer::PixelBuffer;
pub use canvas::{Canvas, StrokeMode};
pub use config::Config;
pub use error::{Error, Result};
pub use recognize::{GestureRecognizer, RecognitionResult};
pub use templates::{Template, TemplateStore};
pub use types::{Color, Point};
