//! Font registry for chart labels.
//!
//! Seat labels are usually Hangul, which the PDF base fonts cannot show, so a
//! TrueType/OpenType font is looked up once at startup and kept for the life
//! of the process. When no font is found, or the document rejects it, drawing
//! falls back to built-in Helvetica instead of failing.

use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use printpdf::lopdf::Document as LoDocument;
use printpdf::{BuiltinFont, IndirectFontRef, PdfDocumentReference};
use tracing::{debug, warn};

use crate::error::{Result, SeatingError};

/// Paths tried, in order, when no font is given explicitly
pub const FONT_CANDIDATES: &[&str] = &[
    "fonts/MaruBuri-Regular.ttf",
    "fonts/MaruBuri-Regular.otf",
    "MaruBuri-Regular.ttf",
];

static REGISTRY: OnceLock<FontRegistry> = OnceLock::new();

#[derive(Debug, Clone)]
struct FontSource {
    path: PathBuf,
    bytes: Vec<u8>,
}

/// A font added to one document.
#[derive(Debug, Clone)]
pub enum LabelFont {
    /// The registry's TrueType/OpenType font
    Embedded(IndirectFontRef),
    /// Built-in Helvetica; only WinAnsi characters can be drawn
    Builtin(IndirectFontRef),
}

impl LabelFont {
    pub fn font_ref(&self) -> &IndirectFontRef {
        match self {
            LabelFont::Embedded(font) | LabelFont::Builtin(font) => font,
        }
    }

    /// The part of `text` that will actually appear on the page, trimmed. The
    /// PDF writer silently drops characters the built-in font cannot encode.
    pub fn drawable<'a>(&self, text: &'a str) -> Cow<'a, str> {
        match self {
            LabelFont::Embedded(_) => Cow::Borrowed(text),
            LabelFont::Builtin(_) if text.chars().all(is_win_ansi) => Cow::Borrowed(text),
            LabelFont::Builtin(_) => {
                let kept: String = text.chars().filter(|&ch| is_win_ansi(ch)).collect();
                Cow::Owned(kept.trim().to_string())
            }
        }
    }
}

fn is_win_ansi(ch: char) -> bool {
    let mut buf = [0u8; 4];
    !LoDocument::encode_text(Some("WinAnsiEncoding"), ch.encode_utf8(&mut buf)).is_empty()
}

#[derive(Debug, Clone, Default)]
pub struct FontRegistry {
    label_font: Option<FontSource>,
}

impl FontRegistry {
    /// Reads the first font file that exists: `explicit` first, then
    /// [`FONT_CANDIDATES`].
    pub fn discover(explicit: Option<&Path>) -> Self {
        let candidates = explicit
            .map(Path::to_path_buf)
            .into_iter()
            .chain(FONT_CANDIDATES.iter().map(PathBuf::from));

        for path in candidates {
            match std::fs::read(&path) {
                Ok(bytes) => {
                    debug!(path = %path.display(), "label font found");
                    return Self::from_bytes(path, bytes);
                }
                Err(e) if explicit == Some(path.as_path()) => {
                    warn!(path = %path.display(), error = %e, "cannot read font, trying defaults");
                }
                Err(_) => {}
            }
        }
        warn!("no label font found; falling back to Helvetica");
        Self::default()
    }

    pub fn from_bytes(path: impl Into<PathBuf>, bytes: Vec<u8>) -> Self {
        Self {
            label_font: Some(FontSource {
                path: path.into(),
                bytes,
            }),
        }
    }

    /// Installs `registry` as the process-wide registry. The first call wins;
    /// later calls return the registry that is already installed.
    pub fn install(registry: FontRegistry) -> &'static FontRegistry {
        REGISTRY.get_or_init(|| registry)
    }

    /// The installed registry, or an empty one (Helvetica only) when nothing
    /// was installed.
    pub fn global() -> &'static FontRegistry {
        REGISTRY.get_or_init(FontRegistry::default)
    }

    pub fn label_font_path(&self) -> Option<&Path> {
        self.label_font.as_ref().map(|f| f.path.as_path())
    }

    pub fn has_label_font(&self) -> bool {
        self.label_font.is_some()
    }

    /// Adds the label font to `doc`, or Helvetica if there is none or it
    /// cannot be embedded.
    pub fn load_into(&self, doc: &PdfDocumentReference) -> Result<LabelFont> {
        if let Some(font) = &self.label_font {
            match doc.add_external_font(font.bytes.as_slice()) {
                Ok(font_ref) => return Ok(LabelFont::Embedded(font_ref)),
                Err(e) => {
                    warn!(path = %font.path.display(), error = %e, "font rejected; using Helvetica");
                }
            }
        }
        doc.add_builtin_font(BuiltinFont::Helvetica)
            .map(LabelFont::Builtin)
            .map_err(|e| SeatingError::Pdf(e.to_string()))
    }
}
