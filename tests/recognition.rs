// End-to-end scenarios: raw stroke in, recognition + fade out, and the
// template library surviving a trip through disk.

use std::fs;
use std::path::PathBuf;

use gesture_canvas::canvas::{Canvas, StrokeMode};
use gesture_canvas::config::Config;
use gesture_canvas::recognize::GestureRecognizer;
use gesture_canvas::templates::{self, TemplateStore};
use gesture_canvas::types::{Color, Point};

fn circle(points: usize, cx: f32, cy: f32, radius: f32) -> Vec<Point> {
    (0..points)
        .map(|i| {
            let t = i as f32 / points as f32 * std::f32::consts::TAU;
            Point::new(cx + radius * t.cos(), cy + radius * t.sin())
        })
        .collect()
}

fn temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("gesture-canvas-it-{tag}-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    dir
}

#[test]
fn hundred_point_circle_matches_a_scaled_template() {
    let recognizer = GestureRecognizer::default();
    let mut store = TemplateStore::new();

    // The stored example is the same shape at a different size and place.
    store.upsert(
        "circle",
        Color::BLUE,
        recognizer.prepare_example(&circle(64, 40.0, 40.0, 22.0)),
    );

    let drawn = circle(100, 320.0, 240.0, 130.0);
    let result = recognizer.recognize(&drawn, &store);

    assert_eq!(result.name.as_deref(), Some("circle"));
    assert!(result.score > 0.8, "score was {}", result.score);
    assert_eq!(result.color, Color::BLUE);
}

#[test]
fn drawn_stroke_recognizes_recolors_and_fades_out() {
    let config = Config {
        canvas_width: 200,
        canvas_height: 200,
        brush_radius: 10,
        fade_rate: 0.2,
        ..Config::default()
    };
    let recognizer = GestureRecognizer::default();
    let mut store = TemplateStore::new();
    store.upsert(
        "circle",
        Color::GREEN,
        recognizer.prepare_example(&circle(48, 60.0, 60.0, 35.0)),
    );

    let mut canvas = Canvas::new(&config);
    canvas.start_stroke();
    for p in circle(100, 100.0, 100.0, 60.0) {
        canvas.update_stroke(p);
    }
    let result = canvas
        .end_stroke(&recognizer, &mut store, &StrokeMode::Recognize)
        .expect("recognize mode returns a result");

    assert_eq!(result.name.as_deref(), Some("circle"));
    assert!(result.score > 0.8);

    // The ring took the template color; the untouched center did not.
    assert_eq!(canvas.fading().get(160, 100), Some(Color::GREEN));
    assert_eq!(canvas.fading().get(100, 100), Some(Color::TRANSPARENT));

    // Fade runs to completion and ends exactly blank.
    let mut ticks = 0;
    while canvas.tick() {
        ticks += 1;
        assert!(ticks < 200, "fade did not converge");
    }
    assert!(
        canvas
            .fading()
            .pixels()
            .iter()
            .all(|p| *p == Color::TRANSPARENT)
    );
}

#[test]
fn templates_saved_in_one_session_recognize_in_the_next() {
    let dir = temp_dir("sessions");
    let config = Config {
        canvas_width: 160,
        canvas_height: 160,
        template_dir: dir.clone(),
        ..Config::default()
    };
    let recognizer = GestureRecognizer::new(
        config.resample_count,
        config.angle_range_deg,
        config.angle_precision_deg,
    );

    // Session one: draw a circle in save mode, then persist the store.
    {
        let mut store = TemplateStore::new();
        let mut canvas = Canvas::new(&config);
        canvas.start_stroke();
        for p in circle(60, 80.0, 80.0, 45.0) {
            canvas.update_stroke(p);
        }
        let mode = StrokeMode::SaveTemplate {
            name: "loop".into(),
            color: Color::new(1.0, 0.8, 0.0, 1.0),
        };
        assert!(canvas.end_stroke(&recognizer, &mut store, &mode).is_none());
        templates::save_to_dir(&store, &dir).unwrap();
    }

    // Session two: reload and recognize a differently sized circle.
    let store = templates::load_from_dir(&dir);
    assert_eq!(store.len(), 1);

    let result = recognizer.recognize(&circle(90, 50.0, 60.0, 28.0), &store);
    assert_eq!(result.name.as_deref(), Some("loop"));
    assert!(result.score > 0.8, "score was {}", result.score);
    assert_eq!(result.color, Color::new(1.0, 0.8, 0.0, 1.0));

    let _ = fs::remove_dir_all(&dir);
}
