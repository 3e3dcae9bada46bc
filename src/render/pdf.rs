//! PDF export: replays draw commands onto A4 landscape pages.
//!
//! A document is rendered completely in memory and only then handed back, so
//! a drawing failure never leaves a half-written file behind.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use printpdf::path::PaintMode;
use printpdf::{
    Color, LineDashPattern, Mm, PdfDocument, PdfLayerReference, Rect as PdfRect, Rgb,
};
use tracing::{debug, info};

use crate::assign::{LayoutParameters, SeatMatrix};
use crate::error::{Result, SeatingError};
use crate::fonts::{FontRegistry, LabelFont};
use crate::geometry::{compute_geometry, PageSize, Viewpoint};
use crate::labels::ChartLabels;
use crate::palette::Swatch;
use crate::render::print::{render_print, text_width, DrawCommand};

const DOCUMENT_TITLE: &str = "Seating Chart";

const OUTLINE_THICKNESS: f32 = 1.0;
const DASH_LENGTH: i64 = 4;
const DASH_GAP: i64 = 3;

/// Which pages go into the exported document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ViewSelection {
    Instructor,
    Student,
    /// Instructor page followed by the student page
    #[default]
    Both,
}

impl ViewSelection {
    pub fn viewpoints(self) -> &'static [Viewpoint] {
        match self {
            ViewSelection::Instructor => &[Viewpoint::Instructor],
            ViewSelection::Student => &[Viewpoint::Student],
            ViewSelection::Both => &[Viewpoint::Instructor, Viewpoint::Student],
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            ViewSelection::Instructor => "instructor",
            ViewSelection::Student => "student",
            ViewSelection::Both => "both",
        }
    }
}

// ============================================================================
// Documents
// ============================================================================

/// One page, seen from the front of the room.
pub fn instructor_document(
    matrix: &SeatMatrix,
    params: &LayoutParameters,
    labels: &ChartLabels,
) -> Result<Vec<u8>> {
    render_document(matrix, params, labels, ViewSelection::Instructor)
}

/// One page, seen from the back of the room.
pub fn student_document(
    matrix: &SeatMatrix,
    params: &LayoutParameters,
    labels: &ChartLabels,
) -> Result<Vec<u8>> {
    render_document(matrix, params, labels, ViewSelection::Student)
}

/// Instructor and student pages back to back.
pub fn combined_document(
    matrix: &SeatMatrix,
    params: &LayoutParameters,
    labels: &ChartLabels,
) -> Result<Vec<u8>> {
    render_document(matrix, params, labels, ViewSelection::Both)
}

pub fn render_document(
    matrix: &SeatMatrix,
    params: &LayoutParameters,
    labels: &ChartLabels,
    selection: ViewSelection,
) -> Result<Vec<u8>> {
    let page = PageSize::A4_LANDSCAPE;
    let (doc, first_page, first_layer) = PdfDocument::new(
        DOCUMENT_TITLE,
        to_mm(page.width),
        to_mm(page.height),
        "Layer 1",
    );
    let font = FontRegistry::global().load_into(&doc)?;

    for (idx, viewpoint) in selection.viewpoints().iter().enumerate() {
        let layer = if idx == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_idx, layer_idx) =
                doc.add_page(to_mm(page.width), to_mm(page.height), "Layer 1");
            doc.get_page(page_idx).get_layer(layer_idx)
        };

        let geometry = compute_geometry(
            matrix,
            *viewpoint,
            page,
            params.seating_mode(),
            params.groups,
        );
        let commands = render_print(matrix, *viewpoint, &geometry, labels.title(*viewpoint), labels);
        debug!(?viewpoint, commands = commands.len(), "drawing page");
        draw_commands(&layer, &font, &commands);
    }

    let bytes = doc
        .save_to_bytes()
        .map_err(|e| SeatingError::Pdf(e.to_string()))?;
    info!(
        pages = selection.viewpoints().len(),
        bytes = bytes.len(),
        "document rendered"
    );
    Ok(bytes)
}

/// Writes `bytes` next to `path` first and renames into place; the temporary
/// file is removed if anything fails.
pub fn write_document(path: &Path, bytes: &[u8]) -> Result<()> {
    let tmp = temporary_path(path);
    let result = (|| -> std::io::Result<()> {
        let file = fs::File::create(&tmp)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(bytes)?;
        writer.flush()?;
        fs::rename(&tmp, path)
    })();

    if let Err(e) = result {
        fs::remove_file(&tmp).ok();
        return Err(SeatingError::Io(e));
    }
    Ok(())
}

fn temporary_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".part");
    path.with_file_name(name)
}

// ============================================================================
// Drawing
// ============================================================================

fn draw_commands(layer: &PdfLayerReference, font: &LabelFont, commands: &[DrawCommand]) {
    layer.set_outline_thickness(OUTLINE_THICKNESS);

    for command in commands {
        match command {
            DrawCommand::Rect {
                rect,
                fill,
                stroke,
                dashed,
            } => {
                layer.set_fill_color(pdf_color(*fill));
                layer.set_outline_color(pdf_color(*stroke));
                if *dashed {
                    layer.set_line_dash_pattern(LineDashPattern {
                        dash_1: Some(DASH_LENGTH),
                        gap_1: Some(DASH_GAP),
                        ..Default::default()
                    });
                }
                let shape = PdfRect::new(
                    to_mm(rect.x),
                    to_mm(rect.y),
                    to_mm(rect.right()),
                    to_mm(rect.top()),
                )
                .with_mode(PaintMode::FillStroke);
                layer.add_rect(shape);
                if *dashed {
                    layer.set_line_dash_pattern(LineDashPattern::default());
                }
            }
            DrawCommand::Text {
                text,
                center_x,
                baseline,
                size,
                color,
            } => {
                let text = font.drawable(text);
                if text.is_empty() {
                    continue;
                }
                let x = center_x - text_width(&text, *size) / 2.0;
                layer.set_fill_color(pdf_color(*color));
                layer.use_text(text.into_owned(), *size, to_mm(x), to_mm(*baseline), font.font_ref());
            }
        }
    }
}

fn pdf_color(swatch: Swatch) -> Color {
    let (r, g, b) = swatch.unit();
    Color::Rgb(Rgb::new(r, g, b, None))
}

/// Points to millimetres
fn to_mm(pt: f32) -> Mm {
    Mm(pt * 25.4 / 72.0)
}
