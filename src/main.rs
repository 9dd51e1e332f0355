// What you SEE now:
// • A blank canvas. Hold Left Mouse: you draw in the paint color.
// • Release: the stroke is scored against the stored templates, the HUD
//   shows the best name + score, and the drawing fades out on its own.
// • T toggles save-as-template mode (finished strokes are stored, not scored).
// • 1..5 pick the brush color. C cancels the stroke. S saves a PNG. ESC quits.

use std::path::Path;
use std::time::{Duration, Instant};

use tracing::warn;

use gesture_canvas::canvas::{Canvas, StrokeMode};
use gesture_canvas::config::Config;
use gesture_canvas::draw::{Drawer, Surface, draw_brush_cursor, draw_hud_line};
use gesture_canvas::error::Error;
use gesture_canvas::recognize::GestureRecognizer;
use gesture_canvas::types::{Color, Point};
use gesture_canvas::{snapshot, templates};

/// Brush colors on the number row.
const PALETTE: [Color; 5] = [
    Color::RED,
    Color::GREEN,
    Color::BLUE,
    Color::new(1.0, 0.8, 0.0, 1.0), // yellow
    Color::new(0.1, 0.1, 0.1, 1.0), // near-black
];

const BACKGROUND: Color = Color::WHITE;

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    /* --- Config + template library ---
       Visual: nothing yet; decides canvas size, colors and where
       templates live. A missing config file just means defaults. */
    let config_path = std::env::args().nth(1).unwrap_or_else(|| "gesture-canvas.toml".into());
    let config = Config::load_or_default(Path::new(&config_path))?;
    let mut store = templates::load_from_dir(&config.template_dir);
    let recognizer = GestureRecognizer::new(
        config.resample_count,
        config.angle_range_deg,
        config.angle_precision_deg,
    );

    /* --- Canvas session + window ---
       Visual: the window opens showing a blank (background-colored) canvas. */
    let mut canvas = Canvas::new(&config);
    let mut drawer = Drawer::new(
        "Gesture Canvas — draw, match, fade",
        config.canvas_width,
        config.canvas_height,
    )?;
    let mut surface = Surface::new(config.canvas_width, config.canvas_height);

    /* --- Interaction state --- */
    let mut mode = StrokeMode::Recognize;
    let mut was_mouse_down = false;
    let mut hud_result = String::from("draw a gesture");

    /* --- HUD / FPS --- */
    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;
    let mut hud_fps_text = String::from("FPS: 0.0");

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() {
        let now = Instant::now();
        let input = drawer.input();
        if input.quit {
            break;
        }

        /* 1) Keys */
        if let Some(slot) = input.palette_slot {
            canvas.set_paint_color(PALETTE[slot]);
        }
        if input.toggle_save_mode {
            // Toggle between scoring strokes and storing them as examples.
            mode = match mode {
                StrokeMode::Recognize => {
                    let name = format!("gesture-{}", store.len() + 1);
                    hud_result = format!("saving as {name}");
                    StrokeMode::SaveTemplate { name, color: canvas.paint_color() }
                }
                StrokeMode::SaveTemplate { .. } => {
                    hud_result = String::from("draw a gesture");
                    StrokeMode::Recognize
                }
            };
        }
        if input.cancel_stroke {
            canvas.cancel_stroke(); // visual: the half-drawn stroke vanishes
        }
        if input.take_snapshot
            && let Err(err) = snapshot::save_png(
                &canvas.composited(BACKGROUND),
                Path::new("canvas-snapshot.png"),
            )
        {
            warn!(%err, "snapshot failed");
        }

        /* 2) Mouse -> stroke events.
           Visual: paint appears under the cursor while the button is held. */
        if input.mouse_down && !was_mouse_down {
            canvas.start_stroke();
        }
        if input.mouse_down && let Some((mx, my)) = input.mouse {
            canvas.update_stroke(Point::new(mx as f32, my as f32));
        }
        if !input.mouse_down && was_mouse_down {
            // Visual: paint flips to the matched color and starts fading.
            match canvas.end_stroke(&recognizer, &mut store, &mode) {
                Some(result) => {
                    hud_result = match &result.name {
                        Some(name) => {
                            format!("{name} {}%", (result.score * 100.0).round() as u32)
                        }
                        None => String::from("no match"),
                    };
                }
                None => {
                    if let StrokeMode::SaveTemplate { name, .. } = &mode {
                        hud_result = format!("stored {name}");
                    }
                }
            }
        }
        was_mouse_down = input.mouse_down;

        /* 3) Advance the fade one tick (no-op when nothing is fading). */
        canvas.tick();

        /* 4) Composite the buffers into the window surface. */
        canvas.present_into(&mut surface.pixels, BACKGROUND);

        /* 5) Brush cursor + HUD text on top.
           Visual: the ring previews the configured brush footprint. */
        if let Some((mx, my)) = input.mouse {
            draw_brush_cursor(
                &mut surface,
                mx as i32,
                my as i32,
                config.brush_radius,
                0x00FF_CC33,
            );
        }
        let tag = match &mode {
            StrokeMode::Recognize => "MATCH",
            StrokeMode::SaveTemplate { .. } => "SAVE",
        };
        let hud = format!("{tag} | {hud_result} | {hud_fps_text}");
        draw_hud_line(&mut surface, 8, 8, &hud, 0x0020_2020, 0x00F4_F4F4);

        /* 6) Present to the window. */
        drawer.present(&surface)?;

        /* 7) FPS counter, refreshed once per second. */
        frames_this_second += 1;
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let secs = now.duration_since(last_fps_time).as_secs_f32();
            hud_fps_text = format!("FPS: {:.1}", frames_this_second as f32 / secs);
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    /* --- Shutdown: persist the template library --- */
    if let Err(err) = templates::save_to_dir(&store, &config.template_dir) {
        warn!(%err, "saving templates failed");
    }

    Ok(())
}
