use std::cell::{OnceCell, RefCell};
use std::collections::HashMap;
use std::path::PathBuf;
use std::rc::Rc;

use ttf_parser::Face;

use crate::measure::{
    FALLBACK_CHAR_WIDTH_RATIO, FallbackMeasurer, TextMeasurer, font_size_px,
    for_each_display_char, transformed_slice,
};
use crate::model::TextRun;

/// (lowercase family name, bold, italic) -> (file path, face index within TTC)
type FontLookup = HashMap<(String, bool, bool), (PathBuf, u32)>;

struct LoadedFont {
    data: Vec<u8>,
    face_index: u32,
    /// Advance per char in em units; `None` when the font has no glyph for it.
    advances: RefCell<HashMap<char, Option<f32>>>,
}

impl LoadedFont {
    fn advance_em(&self, c: char) -> Option<f32> {
        if let Some(cached) = self.advances.borrow().get(&c) {
            return *cached;
        }
        let advance = Face::parse(&self.data, self.face_index).ok().and_then(|face| {
            let units = face.units_per_em() as f32;
            face.glyph_index(c)
                .and_then(|gid| face.glyph_hor_advance(gid))
                .map(|adv| adv as f32 / units)
        });
        self.advances.borrow_mut().insert(c, advance);
        advance
    }

    /// Missing glyphs get the fallback advance.
    fn advance_px(&self, c: char, size: f32) -> f32 {
        match self.advance_em(c) {
            Some(em) => em * size,
            None => size * FALLBACK_CHAR_WIDTH_RATIO,
        }
    }
}

/// Measures text with real advance widths from installed TrueType/OpenType fonts.
///
/// Fonts are looked up by family name and style in `DOCXSIDE_FONTS` and the
/// platform font directories. The directory scan happens on first use and is
/// owned by this measurer, as are the glyph caches; the measurer is not `Sync`.
/// Unknown fonts and missing glyphs fall back to [`FallbackMeasurer`] widths.
#[derive(Default)]
pub struct FontMeasurer {
    extra_dirs: Vec<PathBuf>,
    index: OnceCell<FontLookup>,
    loaded: RefCell<HashMap<(String, bool, bool), Option<Rc<LoadedFont>>>>,
}

impl FontMeasurer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Search `dirs` before the default font directories.
    pub fn with_font_dirs(dirs: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            extra_dirs: dirs.into_iter().collect(),
            ..Self::default()
        }
    }

    fn font_index(&self) -> &FontLookup {
        self.index.get_or_init(|| {
            let mut dirs = self.extra_dirs.clone();
            dirs.extend(font_directories());
            let index = scan_font_dirs(dirs);
            log::debug!("Indexed {} font faces", index.len());
            index
        })
    }

    fn font_for(&self, run: &TextRun) -> Option<Rc<LoadedFont>> {
        let family = primary_font_name(&run.font_family).to_lowercase();
        let key = (family, run.bold, run.italic);
        if let Some(entry) = self.loaded.borrow().get(&key) {
            return entry.clone();
        }
        let font = find_font_file(self.font_index(), &key.0, run.bold, run.italic).and_then(
            |(path, face_index)| {
                let data = std::fs::read(&path).ok()?;
                Face::parse(&data, face_index).ok()?;
                Some(Rc::new(LoadedFont {
                    data,
                    face_index,
                    advances: RefCell::new(HashMap::new()),
                }))
            },
        );
        if font.is_none() {
            log::warn!(
                "Font not found: {} bold={} italic={}, using fallback widths",
                run.font_family,
                run.bold,
                run.italic
            );
        }
        self.loaded.borrow_mut().insert(key, font.clone());
        font
    }
}

impl TextMeasurer for FontMeasurer {
    fn measure_slice(&self, run: &TextRun, from_char: usize, to_char: usize) -> f32 {
        let Some(font) = self.font_for(run) else {
            return FallbackMeasurer.measure_slice(run, from_char, to_char);
        };
        let size = font_size_px(run);
        transformed_slice(run, from_char, to_char)
            .chars()
            .map(|c| font.advance_px(c, size))
            .sum()
    }

    fn measure_char(&self, run: &TextRun, char_index: usize, ch: char, prev: Option<char>) -> f32 {
        let Some(font) = self.font_for(run) else {
            return FallbackMeasurer.measure_char(run, char_index, ch, prev);
        };
        let size = font_size_px(run);
        let mut width = 0.0;
        for_each_display_char(run.text_transform, ch, prev, |c| {
            width += font.advance_px(c, size);
        });
        width
    }
}

fn font_family_name(face: &Face) -> Option<String> {
    // Use ID 1 (Family): DOCX references "Aptos Display" and "Aptos Narrow"
    // separately, while ID 16 (Typographic Family) groups them under one name.
    for name in face.names() {
        if name.name_id == ttf_parser::name_id::FAMILY
            && name.is_unicode()
            && let Some(s) = name.to_string()
        {
            return Some(s);
        }
    }
    None
}

fn read_font_style(data: &[u8], face_index: u32) -> Option<(String, bool, bool)> {
    let face = Face::parse(data, face_index).ok()?;
    let family = font_family_name(&face)?;
    Some((family, face.is_bold(), face.is_italic()))
}

fn font_directories() -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = Vec::new();

    if let Ok(val) = std::env::var("DOCXSIDE_FONTS") {
        let sep = if cfg!(windows) { ';' } else { ':' };
        dirs.extend(
            val.split(sep)
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(PathBuf::from),
        );
    }

    #[cfg(target_os = "macos")]
    {
        dirs.extend([
            "/Applications/Microsoft Word.app/Contents/Resources/DFonts".into(),
            "/Library/Fonts".into(),
            "/Library/Fonts/Microsoft".into(),
            "/System/Library/Fonts".into(),
            "/System/Library/Fonts/Supplemental".into(),
        ]);
    }

    #[cfg(target_os = "linux")]
    {
        dirs.extend([
            "/usr/share/fonts".into(),
            "/usr/local/share/fonts".into(),
        ]);
        if let Ok(home) = std::env::var("HOME") {
            dirs.push(PathBuf::from(home).join(".local/share/fonts"));
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Ok(windir) = std::env::var("WINDIR") {
            dirs.push(PathBuf::from(windir).join("Fonts"));
        } else {
            dirs.push("C:\\Windows\\Fonts".into());
        }
    }

    dirs
}

fn scan_font_dirs(dirs: Vec<PathBuf>) -> FontLookup {
    let mut index = FontLookup::new();

    let mut stack: Vec<PathBuf> = dirs;
    stack.reverse();
    while let Some(dir) = stack.pop() {
        let Ok(entries) = std::fs::read_dir(&dir) else {
            continue;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
                continue;
            }
            let is_collection = match path.extension().and_then(|e| e.to_str()) {
                Some("ttf" | "otf" | "TTF" | "OTF") => false,
                Some("ttc" | "TTC") => true,
                _ => continue,
            };
            let Ok(data) = std::fs::read(&path) else {
                continue;
            };
            let face_count = if is_collection {
                ttf_parser::fonts_in_collection(&data).unwrap_or(1)
            } else {
                1
            };
            for face_idx in 0..face_count {
                if let Some((family, bold, italic)) = read_font_style(&data, face_idx) {
                    index
                        .entry((family.to_lowercase(), bold, italic))
                        .or_insert((path.clone(), face_idx));
                }
            }
        }
    }
    index
}

/// Falls back to the regular variant if the requested bold/italic is not available.
fn find_font_file(
    index: &FontLookup,
    family: &str,
    bold: bool,
    italic: bool,
) -> Option<(PathBuf, u32)> {
    index
        .get(&(family.to_string(), bold, italic))
        .or_else(|| {
            if bold || italic {
                index.get(&(family.to_string(), false, false))
            } else {
                None
            }
        })
        .cloned()
}

/// `"Calibri;Arial"` style font lists name the preferred family first.
pub(crate) fn primary_font_name(name: &str) -> &str {
    name.split(';').next().unwrap_or(name).trim()
}
