//! System font lookup for preset-text rasterization.
//!
//! Queries the system font database once and caches the result. When no
//! usable sans-serif face exists (headless CI), callers fall back to the
//! badge rendering in the snapshot module.

use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use rusttype::Font;
use std::{fs, sync::OnceLock};

fn db() -> &'static Database {
    static DB: OnceLock<Database> = OnceLock::new();
    DB.get_or_init(|| {
        let mut db = Database::new();
        db.load_system_fonts();
        db
    })
}

/// A bold sans-serif face, if the system has one.
pub fn text_font() -> Option<&'static Font<'static>> {
    static FONT: OnceLock<Option<Font<'static>>> = OnceLock::new();
    FONT.get_or_init(|| {
        for family in [Family::SansSerif, Family::Serif, Family::Monospace] {
            if let Some(font) = load_family(family) {
                return Some(font);
            }
        }
        None
    })
    .as_ref()
}

fn load_family(family: Family<'_>) -> Option<Font<'static>> {
    let query = Query {
        families: &[family],
        weight: Weight::BOLD,
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
