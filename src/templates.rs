// Named gesture templates and their on-disk representation.
//
// The store holds templates in creation order. On disk each (name, example)
// pair is one small JSON file named `{name}_{index}.json`, so a template
// with three examples is three records sharing a name; loading folds them
// back together. Saving skips records whose stored color already matches,
// which makes repeated saves idempotent.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::types::{Color, Point};

/// Colors closer than this count as equal when deciding whether a record
/// on disk needs rewriting.
const COLOR_MATCH_EPSILON: f32 = 1e-3;

/// A named reference gesture: a display color plus one or more example
/// strokes, each already normalized.
#[derive(Clone, Debug, PartialEq)]
pub struct Template {
    name: String,
    color: Color,
    examples: Vec<Vec<Point>>,
}

impl Template {
    fn new(name: &str, color: Color, example: Vec<Point>) -> Self {
        Self {
            name: name.to_owned(),
            color,
            examples: vec![example],
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn examples(&self) -> &[Vec<Point>] {
        &self.examples
    }
}

/// Templates in creation order. Names are unique and case-sensitive;
/// templates are never deleted.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TemplateStore {
    templates: Vec<Template>,
}

impl TemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.name == name)
    }

    /// Append `example` to the template called `name`, creating the
    /// template when the name is unseen. The color only applies at
    /// creation; appending leaves the stored color untouched.
    /// Empty examples are dropped.
    pub fn upsert(&mut self, name: &str, color: Color, example: Vec<Point>) {
        if example.is_empty() {
            warn!(name, "ignoring empty example stroke");
            return;
        }
        match self.templates.iter_mut().find(|t| t.name == name) {
            Some(template) => {
                template.examples.push(example);
                info!(name, examples = template.examples.len(), "appended example to template");
            }
            None => {
                self.templates.push(Template::new(name, color, example));
                info!(name, "created template");
            }
        }
    }

    /// All templates, creation order.
    pub fn all(&self) -> &[Template] {
        &self.templates
    }
}

/// One (name, example) pair as stored on disk.
#[derive(Serialize, Deserialize)]
struct TemplateRecord {
    name: String,
    color: [f32; 4],
    points: Vec<[f32; 2]>,
}

impl TemplateRecord {
    fn from_example(template: &Template, example: &[Point]) -> Self {
        Self {
            name: template.name.clone(),
            color: template.color.to_array(),
            points: example.iter().map(|p| [p.x, p.y]).collect(),
        }
    }
}

fn read_record(path: &Path) -> std::io::Result<TemplateRecord> {
    let text = fs::read_to_string(path)?;
    serde_json::from_str(&text).map_err(std::io::Error::other)
}

/// Record file name for a template's i-th example. Characters that don't
/// belong in a file name are replaced so template names can't escape the
/// directory.
fn record_path(dir: &Path, name: &str, index: usize) -> PathBuf {
    let safe: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    dir.join(format!("{safe}_{index}.json"))
}

/// Load every record under `dir` into a fresh store. A missing directory
/// or an unreadable record is logged and skipped; the core always starts
/// with a usable (possibly empty) store.
pub fn load_from_dir(dir: &Path) -> TemplateStore {
    let mut store = TemplateStore::new();

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            warn!(dir = %dir.display(), %err, "no template directory, starting empty");
            return store;
        }
    };

    // Sort paths so template creation order is stable across runs.
    let mut paths: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();

    for path in paths {
        match read_record(&path) {
            Ok(record) => {
                let points = record.points.iter().map(|p| Point::new(p[0], p[1])).collect();
                store.upsert(&record.name, Color::from_array(record.color), points);
            }
            Err(err) => warn!(path = %path.display(), %err, "skipping unreadable template record"),
        }
    }

    info!(templates = store.len(), "loaded gesture templates");
    store
}

/// Write every example of every template to `dir`, one record per pair.
/// Records whose stored color already matches the template are left alone.
pub fn save_to_dir(store: &TemplateStore, dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .map_err(|e| Error::TemplateSave(format!("create {}: {e}", dir.display())))?;

    for template in store.all() {
        for (i, example) in template.examples.iter().enumerate() {
            let path = record_path(dir, &template.name, i);

            if let Ok(existing) = read_record(&path)
                && Color::from_array(existing.color).distance(template.color) <= COLOR_MATCH_EPSILON
            {
                debug!(path = %path.display(), "record up to date, skipping");
                continue;
            }

            let record = TemplateRecord::from_example(template, example);
            let json = serde_json::to_string_pretty(&record)
                .map_err(|e| Error::TemplateSave(format!("encode {}: {e}", path.display())))?;
            fs::write(&path, json)
                .map_err(|e| Error::TemplateSave(format!("write {}: {e}", path.display())))?;
        }
    }

    info!(dir = %dir.display(), "templates saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example(offset: f32) -> Vec<Point> {
        (0..8).map(|i| Point::new(offset + i as f32, offset)).collect()
    }

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "gesture-canvas-{tag}-{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn upsert_appends_and_keeps_creation_color() {
        let mut store = TemplateStore::new();
        store.upsert("X", Color::RED, example(0.0));
        store.upsert("X", Color::BLUE, example(5.0));

        assert_eq!(store.len(), 1);
        let template = store.find_by_name("X").unwrap();
        assert_eq!(template.examples().len(), 2);
        assert_eq!(template.color(), Color::RED);
    }

    #[test]
    fn names_are_case_sensitive_and_order_is_creation_order() {
        let mut store = TemplateStore::new();
        store.upsert("swipe", Color::RED, example(0.0));
        store.upsert("Swipe", Color::BLUE, example(1.0));

        assert_eq!(store.len(), 2);
        assert!(store.find_by_name("swipe").is_some());
        assert!(store.find_by_name("SWIPE").is_none());
        let names: Vec<&str> = store.all().iter().map(|t| t.name()).collect();
        assert_eq!(names, ["swipe", "Swipe"]);
    }

    #[test]
    fn empty_examples_are_dropped() {
        let mut store = TemplateStore::new();
        store.upsert("ghost", Color::RED, Vec::new());
        assert!(store.is_empty());
    }

    #[test]
    fn store_round_trips_through_disk() {
        let dir = temp_dir("roundtrip");
        let mut store = TemplateStore::new();
        store.upsert("circle", Color::GREEN, example(0.0));
        store.upsert("circle", Color::RED, example(3.0));
        store.upsert("zigzag", Color::BLUE, example(7.0));

        save_to_dir(&store, &dir).unwrap();
        let loaded = load_from_dir(&dir);

        assert_eq!(loaded.len(), 2);
        let circle = loaded.find_by_name("circle").unwrap();
        assert_eq!(circle.examples().len(), 2);
        assert_eq!(circle.color(), Color::GREEN);
        for (a, b) in circle
            .examples()
            .iter()
            .flatten()
            .zip(store.find_by_name("circle").unwrap().examples().iter().flatten())
        {
            assert!(a.distance(*b) < 1e-5);
        }
        assert_eq!(loaded.find_by_name("zigzag").unwrap().color(), Color::BLUE);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn unchanged_records_are_not_rewritten() {
        let dir = temp_dir("idempotent");
        let mut store = TemplateStore::new();
        store.upsert("tap", Color::RED, example(0.0));
        save_to_dir(&store, &dir).unwrap();

        // Scribble on the file without touching the color; a second save
        // must leave our scribble in place.
        let path = record_path(&dir, "tap", 0);
        let mut record = read_record(&path).unwrap();
        record.points.push([999.0, 999.0]);
        fs::write(&path, serde_json::to_string_pretty(&record).unwrap()).unwrap();
        let scribbled = fs::read_to_string(&path).unwrap();

        save_to_dir(&store, &dir).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), scribbled);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn load_of_missing_directory_is_an_empty_store() {
        let dir = temp_dir("missing");
        assert!(load_from_dir(&dir).is_empty());
    }
}
