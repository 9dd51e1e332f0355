// Nearest-template scoring. A candidate stroke is normalized, then
// compared against every stored example with a mean point-to-point
// distance, minimized over a small rotation window with a golden-section
// search so slightly tilted drawings still match.

use crate::normalize::{self, SQUARE_SIZE};
use crate::templates::TemplateStore;
use crate::types::{Color, Point};

/// Golden ratio fraction used by the section search.
const PHI: f32 = 0.618_034;

/// Outcome of scoring a stroke against the template store.
/// `name` is None when nothing matched (empty store or degenerate stroke);
/// `color` is only meaningful when `name` is Some.
#[derive(Clone, Debug, PartialEq)]
pub struct RecognitionResult {
    pub name: Option<String>,
    pub score: f32,
    pub color: Color,
}

impl RecognitionResult {
    pub fn no_match() -> Self {
        Self {
            name: None,
            score: 0.0,
            color: Color::WHITE,
        }
    }

    pub fn is_match(&self) -> bool {
        self.name.is_some()
    }
}

/// Recognition parameters; see Config for the user-facing knobs.
#[derive(Clone, Debug)]
pub struct GestureRecognizer {
    resample_count: usize,
    angle_range: f32,     // radians, search window is +/- this
    angle_precision: f32, // radians, search stops below this width
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self::new(normalize::DEFAULT_RESAMPLE_COUNT, 45.0, 2.0)
    }
}

impl GestureRecognizer {
    /// Angles are taken in degrees here because that is how they read in
    /// configuration; they are stored in radians.
    pub fn new(resample_count: usize, angle_range_deg: f32, angle_precision_deg: f32) -> Self {
        Self {
            resample_count,
            angle_range: angle_range_deg.to_radians(),
            angle_precision: angle_precision_deg.to_radians(),
        }
    }

    pub fn resample_count(&self) -> usize {
        self.resample_count
    }

    /// Normalize `raw` for storage with this recognizer's resample count.
    pub fn prepare_example(&self, raw: &[Point]) -> Vec<Point> {
        normalize::normalize(raw, self.resample_count)
    }

    /// Score `raw` against every example of every template and return the
    /// best match. Never fails: a degenerate stroke or an empty store
    /// yields the no-match sentinel with score 0. Ties keep the first
    /// template in creation order.
    pub fn recognize(&self, raw: &[Point], store: &TemplateStore) -> RecognitionResult {
        if raw.len() < 2 || store.is_empty() {
            return RecognitionResult::no_match();
        }

        let candidate = normalize::normalize(raw, self.resample_count);
        let half_diagonal = 0.5 * (2.0 * SQUARE_SIZE * SQUARE_SIZE).sqrt();

        let mut best = RecognitionResult::no_match();
        for template in store.all() {
            for example in template.examples() {
                let d = self.distance_at_best_angle(&candidate, example);
                let score = (1.0 - d / half_diagonal).clamp(0.0, 1.0);
                // A populated store always produces a named result; later
                // templates must strictly beat the incumbent score.
                if !best.is_match() || score > best.score {
                    best = RecognitionResult {
                        name: Some(template.name().to_owned()),
                        score,
                        color: template.color(),
                    };
                }
            }
        }
        best
    }

    /// Golden-section search for the rotation of `candidate` minimizing
    /// the mean point distance to `template`, over +/- the angle window.
    fn distance_at_best_angle(&self, candidate: &[Point], template: &[Point]) -> f32 {
        let mut a = -self.angle_range;
        let mut b = self.angle_range;

        let mut x1 = PHI * a + (1.0 - PHI) * b;
        let mut f1 = distance_at_angle(candidate, template, x1);
        let mut x2 = (1.0 - PHI) * a + PHI * b;
        let mut f2 = distance_at_angle(candidate, template, x2);

        while (b - a).abs() > self.angle_precision {
            if f1 < f2 {
                b = x2;
                x2 = x1;
                f2 = f1;
                x1 = PHI * a + (1.0 - PHI) * b;
                f1 = distance_at_angle(candidate, template, x1);
            } else {
                a = x1;
                x1 = x2;
                f1 = f2;
                x2 = (1.0 - PHI) * a + PHI * b;
                f2 = distance_at_angle(candidate, template, x2);
            }
        }
        f1.min(f2)
    }
}

/// Mean point-to-point distance after rotating `candidate` by `angle`
/// about its centroid.
fn distance_at_angle(candidate: &[Point], template: &[Point], angle: f32) -> f32 {
    let c = normalize::centroid(candidate);
    let rotated = normalize::rotate_by(candidate, angle, c);
    path_distance(&rotated, template)
}

/// Mean distance between points at matching indices.
fn path_distance(a: &[Point], b: &[Point]) -> f32 {
    let n = a.len().min(b.len());
    if n == 0 {
        return f32::MAX;
    }
    let mut sum = 0.0;
    for i in 0..n {
        sum += a[i].distance(b[i]);
    }
    sum / n as f32
}
