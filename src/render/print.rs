//! Printed chart as a list of draw commands.
//!
//! Building the commands is pure; [`crate::render::pdf`] replays them onto a
//! PDF page. Text positions are centers, the PDF side turns them into left
//! edges using [`text_width`].

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::assign::SeatMatrix;
use crate::geometry::{ordered_rows, PageGeometry, Rect, Viewpoint};
use crate::labels::ChartLabels;
use crate::palette::{self, Swatch};

/// Font sizes in points
const TITLE_FONT_SIZE: f32 = 26.0;
const LABEL_FONT_SIZE: f32 = 16.0;
const EMPTY_FONT_SIZE: f32 = 14.0;
const PODIUM_FONT_SIZE: f32 = 18.0;
const MIN_FONT_SIZE: f32 = 6.0;

/// Drop from a cell's vertical center to the text baseline
const LABEL_BASELINE_DROP: f32 = 5.0;
const PODIUM_BASELINE_DROP: f32 = 4.0;

/// Fraction of a cell's width that label text may use
const LABEL_WIDTH_RATIO: f32 = 0.9;

/// Marks a label cut short to fit its seat
const ELLIPSIS: &str = "..";

/// Average advance of one display column, as a fraction of the font size.
/// Wide (CJK) characters take two columns.
const COLUMN_ADVANCE: f32 = 0.5;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rect {
        rect: Rect,
        fill: Swatch,
        stroke: Swatch,
        dashed: bool,
    },
    Text {
        text: String,
        center_x: f32,
        baseline: f32,
        size: f32,
        color: Swatch,
    },
}

/// Estimated advance width of `text` at `size` points.
pub fn text_width(text: &str, size: f32) -> f32 {
    UnicodeWidthStr::width(text) as f32 * COLUMN_ADVANCE * size
}

/// Largest size up to `preferred` at which `text` fits in `max_width`,
/// but never below the minimum legible size.
fn fitted_size(text: &str, preferred: f32, max_width: f32) -> f32 {
    let width = text_width(text, preferred);
    if width <= max_width || width == 0.0 {
        return preferred;
    }
    (preferred * max_width / width).max(MIN_FONT_SIZE)
}

/// Fits `text` into `max_width`: shrinks it first, then cuts it from the end
/// if it still overflows at the minimum size.
fn fit_label(text: &str, preferred: f32, max_width: f32) -> (String, f32) {
    let size = fitted_size(text, preferred, max_width);
    if text_width(text, size) <= max_width {
        return (text.to_string(), size);
    }

    let column = COLUMN_ADVANCE * size;
    let budget = max_width - text_width(ELLIPSIS, size);
    let mut used = 0.0;
    let kept: String = text
        .chars()
        .take_while(|ch| {
            used += ch.width().unwrap_or(0) as f32 * column;
            used <= budget
        })
        .collect();
    (format!("{}{}", kept.trim_end(), ELLIPSIS), size)
}

/// Title, then every seat in drawing order, then the podium.
pub fn render_print(
    matrix: &SeatMatrix,
    viewpoint: Viewpoint,
    geometry: &PageGeometry,
    title: &str,
    labels: &ChartLabels,
) -> Vec<DrawCommand> {
    let mut commands = Vec::with_capacity(matrix.row_count() * matrix.column_count() * 2 + 3);

    commands.push(DrawCommand::Text {
        text: title.to_string(),
        center_x: geometry.page.width / 2.0,
        baseline: geometry.title_y,
        size: TITLE_FONT_SIZE,
        color: palette::BLACK,
    });

    for (drawn_row, row) in ordered_rows(matrix, viewpoint).into_iter().enumerate() {
        for (column, seat) in row.iter().enumerate() {
            let rect = geometry.seat_rect(drawn_row, column);
            let (fill, stroke, dashed, text, preferred) = match seat {
                Some(label) => (
                    label.swatch(),
                    label.swatch(),
                    false,
                    label.text.as_str(),
                    LABEL_FONT_SIZE,
                ),
                None => (
                    palette::EMPTY_FILL,
                    palette::EMPTY_STROKE,
                    true,
                    labels.empty_seat.as_str(),
                    EMPTY_FONT_SIZE,
                ),
            };
            commands.push(DrawCommand::Rect {
                rect,
                fill,
                stroke,
                dashed,
            });
            let (text, size) = fit_label(text, preferred, rect.width * LABEL_WIDTH_RATIO);
            commands.push(DrawCommand::Text {
                text,
                center_x: rect.center_x(),
                baseline: rect.center_y() - LABEL_BASELINE_DROP,
                size,
                color: palette::BLACK,
            });
        }
    }

    let podium = geometry.podium;
    commands.push(DrawCommand::Rect {
        rect: podium,
        fill: palette::PODIUM_FILL,
        stroke: palette::PODIUM_STROKE,
        dashed: false,
    });
    commands.push(DrawCommand::Text {
        text: labels.podium.clone(),
        center_x: podium.center_x(),
        baseline: podium.center_y() - PODIUM_BASELINE_DROP,
        size: PODIUM_FONT_SIZE,
        color: palette::PODIUM_STROKE,
    });

    commands
}
