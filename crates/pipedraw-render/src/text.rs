//! Font lookup and text measurement.
//!
//! Fonts are resolved through the system font database once per process
//! and cached per family/weight. When no usable face exists (headless CI
//! hosts), measurement falls back to fixed per-character metrics so that
//! scale solving stays deterministic everywhere.

use std::collections::HashMap;
use std::fs;
use std::sync::{Mutex, OnceLock};

use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use rusttype::{Font, Scale};

use crate::canvas::TextExtents;

/// Advance width per character, in em, for the fallback metrics.
const FALLBACK_ADVANCE_EM: f64 = 0.556;
/// Ink height of a label, in em, for the fallback metrics.
const FALLBACK_HEIGHT_EM: f64 = 0.716;

#[derive(Clone, Eq, PartialEq, Hash)]
struct FontKey {
    family: String,
    bold: bool,
}

fn db() -> &'static Database {
    static DB: OnceLock<Database> = OnceLock::new();
    DB.get_or_init(|| {
        let mut db = Database::new();
        db.load_system_fonts();
        db
    })
}

/// Returns the resolved font for a family/weight, if the host has one.
pub fn font_for(family: &str, bold: bool) -> Option<&'static Font<'static>> {
    static CACHE: OnceLock<Mutex<HashMap<FontKey, Option<&'static Font<'static>>>>> =
        OnceLock::new();
    let cache = CACHE.get_or_init(|| Mutex::new(HashMap::new()));

    let key = FontKey {
        family: family.to_string(),
        bold,
    };

    if let Some(entry) = cache.lock().unwrap_or_else(|p| p.into_inner()).get(&key) {
        return *entry;
    }

    let loaded = load_font_from_system(family, bold);
    let entry: Option<&'static Font<'static>> = loaded.map(|f| &*Box::leak(Box::new(f)));

    cache
        .lock()
        .unwrap_or_else(|p| p.into_inner())
        .insert(key, entry);
    entry
}

fn load_font_from_system(family: &str, bold: bool) -> Option<Font<'static>> {
    // Named family first, generic sans as the fallback.
    let families: Vec<Family<'_>> = match family.trim() {
        "" | "Sans" => vec![Family::SansSerif],
        other => vec![Family::Name(other), Family::SansSerif],
    };

    let query = Query {
        families: &families,
        weight: if bold { Weight::BOLD } else { Weight::NORMAL },
        stretch: Stretch::Normal,
        style: Style::Normal,
    };

    let id = db().query(&query)?;
    let face = db().face(id)?;

    match &face.source {
        fontdb::Source::File(path) => {
            let bytes = fs::read(path).ok()?;
            Font::try_from_vec(bytes)
        }
        fontdb::Source::SharedFile(path, _) => {
            let bytes = fs::read(path).ok()?;
            Font::try_from_vec(bytes)
        }
        fontdb::Source::Binary(bytes) => Font::try_from_vec(bytes.as_ref().as_ref().to_vec()),
    }
}

/// Measures the ink extents of `text` at `size` user units.
pub fn measure(family: &str, bold: bool, size: f64, text: &str) -> TextExtents {
    if let Some(font) = font_for(family, bold) {
        let scale = Scale::uniform(size as f32);
        let mut advance = 0.0f32;
        let mut min_x = f32::MAX;
        let mut max_x = f32::MIN;
        let mut min_y = f32::MAX;
        let mut max_y = f32::MIN;
        for glyph in font.layout(text, scale, rusttype::point(0.0, 0.0)) {
            let pos = glyph.position();
            advance = pos.x + glyph.unpositioned().h_metrics().advance_width;
            if let Some(bb) = glyph.unpositioned().exact_bounding_box() {
                min_x = min_x.min(pos.x + bb.min.x);
                max_x = max_x.max(pos.x + bb.max.x);
                min_y = min_y.min(bb.min.y);
                max_y = max_y.max(bb.max.y);
            }
        }
        let width = if max_x > min_x {
            (max_x - min_x) as f64
        } else {
            0.0
        };
        let height = if max_y > min_y {
            (max_y - min_y) as f64
        } else {
            0.0
        };
        return TextExtents {
            width,
            height,
            advance: advance as f64,
        };
    }
    fallback_measure(size, text)
}

/// Deterministic metrics used when no system font is available.
pub fn fallback_measure(size: f64, text: &str) -> TextExtents {
    let chars = text.chars().count() as f64;
    let width = chars * size * FALLBACK_ADVANCE_EM;
    TextExtents {
        width,
        height: if text.is_empty() {
            0.0
        } else {
            size * FALLBACK_HEIGHT_EM
        },
        advance: width,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_width_grows_with_length() {
        let short = fallback_measure(8.0, "12");
        let long = fallback_measure(8.0, "1234");
        assert!(long.width > short.width);
        assert_eq!(long.height, short.height);
    }

    #[test]
    fn measure_empty_string_is_zero() {
        let e = measure("Sans", false, 8.0, "");
        assert_eq!(e.width, 0.0);
        assert_eq!(e.height, 0.0);
    }
}
