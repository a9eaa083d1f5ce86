use anyhow::{Context, Result, anyhow};
use std::path::Path;
use std::sync::Arc;
use ttf_parser::Face;
use ttf_parser::name_id;
use usvg::fontdb;

use crate::card::FontChoice;

/// Advance-width metrics for one font face. Layout measures text with these
/// so the measured box matches what the rasterizer draws with the same font.
#[derive(Clone)]
pub struct FontMetrics {
    data: Arc<Vec<u8>>,
    units_per_em: u16,
    space_advance: u16,
    descent: u16,
    family: Option<String>,
    face_index: u32,
}

impl FontMetrics {
    pub fn family(&self) -> Option<&str> {
        self.family.as_deref()
    }

    pub fn data(&self) -> &[u8] {
        self.data.as_ref()
    }

    /// Pixels from the alphabetic baseline down to the glyph bottom.
    pub fn descent_px(&self, font_size: f32) -> f32 {
        self.descent as f32 * font_size / self.units_per_em.max(1) as f32
    }
}

/// Font family set selectable on a card. The renderer queries the system
/// font database for the first installed candidate.
impl FontChoice {
    pub fn candidates(self) -> &'static [&'static str] {
        match self {
            FontChoice::System => &[
                "Helvetica Neue",
                "Arial",
                "Hiragino Kaku Gothic ProN",
                "Hiragino Sans",
                "Meiryo",
            ],
            FontChoice::NotoSansJp => &["Noto Sans JP", "Noto Sans CJK JP", "Noto Sans"],
            FontChoice::MplusRounded => &["M PLUS Rounded 1c"],
            FontChoice::NotoSerifJp => &["Noto Serif JP", "Noto Serif CJK JP", "Noto Serif"],
            FontChoice::ZenMaru => &["Zen Maru Gothic"],
        }
    }

    pub fn generic_family(self) -> &'static str {
        match self {
            FontChoice::NotoSerifJp => "serif",
            _ => "sans-serif",
        }
    }
}

pub struct ResolvedCardFont {
    pub metrics: Option<FontMetrics>,
    pub family: String,
}

/// Resolve the card's font choice against an explicit font file or the
/// system font database. Resolution is best-effort: when nothing matches,
/// text falls back to estimated metrics and a generic family so a render
/// never fails for lack of an installed font.
pub fn resolve_card_font(font_path: Option<&Path>, choice: FontChoice) -> Result<ResolvedCardFont> {
    if let Some(path) = font_path {
        let metrics = load_font_metrics(path)?;
        let family = metrics
            .family()
            .map(|name| name.to_string())
            .unwrap_or_else(|| choice.generic_family().to_string());
        return Ok(ResolvedCardFont {
            metrics: Some(metrics),
            family,
        });
    }

    let mut db = fontdb::Database::new();
    db.load_system_fonts();

    for candidate in choice.candidates() {
        if let Ok(resolved) = load_font_from_family(&db, candidate) {
            return Ok(resolved);
        }
    }
    if let Ok(resolved) = load_font_from_family(&db, choice.generic_family()) {
        return Ok(resolved);
    }

    tracing::warn!(
        "no installed font matched {:?}; falling back to estimated metrics",
        choice
    );
    Ok(ResolvedCardFont {
        metrics: None,
        family: choice.generic_family().to_string(),
    })
}

pub fn load_font_metrics(path: &Path) -> Result<FontMetrics> {
    let data =
        std::fs::read(path).with_context(|| format!("failed to read font: {}", path.display()))?;
    load_font_metrics_from_data(&data, None)
        .map_err(|err| anyhow!("failed to parse font: {} ({})", path.display(), err))
}

pub(crate) fn measure_text_width_px(text: &str, font_size: f32, font: Option<&FontMetrics>) -> f32 {
    if let Some(font) = font {
        if let Ok(face) = Face::parse(&font.data, font.face_index) {
            let mut advance = 0u32;
            for ch in text.chars() {
                if ch == '\n' {
                    continue;
                }
                if ch == ' ' {
                    advance = advance.saturating_add(font.space_advance as u32);
                    continue;
                }
                if let Some(glyph) = face.glyph_index(ch) {
                    let glyph_advance = face.glyph_hor_advance(glyph).unwrap_or(font.space_advance);
                    advance = advance.saturating_add(glyph_advance as u32);
                } else {
                    advance = advance.saturating_add(font.space_advance as u32);
                }
            }
            let units = font.units_per_em.max(1) as f32;
            return advance as f32 * (font_size / units);
        }
    }
    estimate_text_width_units(text) * font_size
}

/// Baseline-to-glyph-bottom distance; estimated when no face is available.
pub(crate) fn descent_px(font_size: f32, font: Option<&FontMetrics>) -> f32 {
    match font {
        Some(metrics) => metrics.descent_px(font_size),
        None => font_size * 0.2,
    }
}

fn estimate_char_units_for_width(ch: char) -> f32 {
    if ch.is_whitespace() {
        0.25
    } else if ch.is_ascii_alphanumeric() {
        0.55
    } else if ch.is_ascii() {
        0.35
    } else if matches!(
        ch as u32,
        0x4E00..=0x9FFF | 0x3040..=0x30FF | 0x31F0..=0x31FF
    ) {
        1.0
    } else {
        0.9
    }
}

fn estimate_text_width_units(text: &str) -> f32 {
    text.chars().map(estimate_char_units_for_width).sum()
}

fn load_font_metrics_from_data(data: &[u8], preferred_family: Option<&str>) -> Result<FontMetrics> {
    let mut fallback = None;
    let count = ttf_parser::fonts_in_collection(data).unwrap_or(1);
    for index in 0..count {
        if let Ok(face) = Face::parse(data, index) {
            let family = extract_family_name(&face);
            let units_per_em = face.units_per_em().max(1);
            let space_advance = face
                .glyph_index(' ')
                .and_then(|id| face.glyph_hor_advance(id))
                .unwrap_or(units_per_em / 2);
            let descent = (-i32::from(face.descender())).max(0) as u16;
            let metrics = FontMetrics {
                data: Arc::new(data.to_vec()),
                units_per_em,
                space_advance,
                descent,
                family: family.clone(),
                face_index: index,
            };
            if let (Some(preferred), Some(found)) = (preferred_family, &family) {
                if found.eq_ignore_ascii_case(preferred) {
                    return Ok(metrics);
                }
            }
            if fallback.is_none() {
                fallback = Some(metrics);
            }
        }
    }
    if preferred_family.is_some() {
        return Err(anyhow!("font family not found in font file"));
    }
    fallback.ok_or_else(|| anyhow!("failed to parse font data"))
}

fn load_font_from_family(db: &fontdb::Database, family: &str) -> Result<ResolvedCardFont> {
    let families = match family {
        "sans-serif" => vec![fontdb::Family::SansSerif],
        "serif" => vec![fontdb::Family::Serif],
        name => vec![fontdb::Family::Name(name)],
    };
    let query = fontdb::Query {
        families: &families,
        ..Default::default()
    };
    let id = db
        .query(&query)
        .ok_or_else(|| anyhow!("font not found: {}", family))?;
    let (data, _face_index) = db
        .with_face_data(id, |data, index| (data.to_vec(), index))
        .ok_or_else(|| anyhow!("failed to load font data: {}", family))?;
    let metrics = load_font_metrics_from_data(&data, None)?;
    let resolved_family = metrics
        .family()
        .map(|name| name.to_string())
        .unwrap_or_else(|| family.to_string());
    Ok(ResolvedCardFont {
        metrics: Some(metrics),
        family: resolved_family,
    })
}

fn extract_family_name(face: &Face<'_>) -> Option<String> {
    let mut fallback = None;
    for name in face.names() {
        if name.name_id == name_id::TYPOGRAPHIC_FAMILY {
            if let Some(value) = name.to_string() {
                return Some(value);
            }
        } else if name.name_id == name_id::FAMILY && fallback.is_none() {
            fallback = name.to_string();
        }
    }
    fallback
}
