//! Page geometry for printed seating charts.
//!
//! All values are PDF points with the origin at the bottom-left corner of the
//! page. One seat matrix is drawn two ways: the instructor page puts the front
//! row at the bottom with the podium below it, the student page puts the front
//! row at the top with the podium above it.

use tracing::debug;

use crate::assign::{SeatMatrix, SeatingMode};
use crate::roster::SeatLabel;

// ============================================================================
// Constants
// ============================================================================

/// Space kept above and below the seat block
const MARGIN_Y: f32 = 80.0;
/// Left plus right margin
const MARGIN_X_TOTAL: f32 = 80.0;
/// Band reserved for the title and podium
const HEADER_BAND: f32 = 80.0;

const COLUMN_GAP: f32 = 10.0;
const ROW_GAP: f32 = 18.0;
/// Extra space between desk groups in paired seating
const GROUP_GAP: f32 = 22.0;

/// Cell size used when there are no rows or columns to divide by
const FALLBACK_CELL: f32 = 40.0;

/// The student page drops the seat block to leave room for the podium
const STUDENT_DROP: f32 = 60.0;

const TITLE_OFFSET: f32 = 40.0;

pub const PODIUM_WIDTH: f32 = 130.0;
pub const PODIUM_HEIGHT: f32 = 48.0;
/// Space between the front row and the podium on the student page
const PODIUM_GAP: f32 = 20.0;

// ============================================================================
// Types
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Viewpoint {
    /// Seen from the front of the room: front row at the bottom
    Instructor,
    /// Seen from the back of the room: front row at the top
    Student,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

impl PageSize {
    pub const A4_LANDSCAPE: PageSize = PageSize {
        width: 841.89,
        height: 595.28,
    };
}

/// Axis-aligned rectangle anchored at its lower-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageGeometry {
    pub page: PageSize,
    pub cell_width: f32,
    pub cell_height: f32,
    pub column_gap: f32,
    pub row_gap: f32,
    /// Zero unless seating is paired
    pub group_gap: f32,
    pub start_x: f32,
    /// Bottom edge of the first drawn row
    pub start_y: f32,
    /// Baseline of the page title
    pub title_y: f32,
    pub podium: Rect,
    seating: SeatingMode,
}

impl PageGeometry {
    /// Rectangle of the seat at `column` in the `drawn_row`-th row from the
    /// top of the page.
    pub fn seat_rect(&self, drawn_row: usize, column: usize) -> Rect {
        let groups_before = match self.seating {
            SeatingMode::Single => 0,
            SeatingMode::Paired => column / 2,
        };
        let x = self.start_x
            + column as f32 * (self.cell_width + self.column_gap)
            + groups_before as f32 * self.group_gap;
        let y = self.start_y - drawn_row as f32 * (self.cell_height + self.row_gap);
        Rect {
            x,
            y,
            width: self.cell_width,
            height: self.cell_height,
        }
    }
}

// ============================================================================
// Computation
// ============================================================================

/// Rows in drawing order, top of the page first.
pub fn ordered_rows(matrix: &SeatMatrix, viewpoint: Viewpoint) -> Vec<&[Option<SeatLabel>]> {
    let rows = matrix.rows().iter().map(Vec::as_slice);
    match viewpoint {
        Viewpoint::Instructor => rows.rev().collect(),
        Viewpoint::Student => rows.collect(),
    }
}

pub fn compute_geometry(
    matrix: &SeatMatrix,
    viewpoint: Viewpoint,
    page: PageSize,
    seating: SeatingMode,
    groups: usize,
) -> PageGeometry {
    let rows = matrix.row_count();
    let columns = matrix.column_count();

    let group_gap = match seating {
        SeatingMode::Single => 0.0,
        SeatingMode::Paired => GROUP_GAP,
    };
    let total_row_gaps = rows.saturating_sub(1) as f32 * ROW_GAP;
    let total_column_gaps = columns.saturating_sub(1) as f32 * COLUMN_GAP;
    let total_group_gaps = groups.saturating_sub(1) as f32 * group_gap;

    let available_height = page.height - MARGIN_Y * 2.0 - HEADER_BAND;
    let cell_height = if rows > 0 {
        (available_height - total_row_gaps) / rows as f32
    } else {
        FALLBACK_CELL
    };

    let available_width = page.width - MARGIN_X_TOTAL;
    let cell_width = if columns > 0 {
        (available_width - total_column_gaps - total_group_gaps) / columns as f32
    } else {
        FALLBACK_CELL
    };

    let block_width = columns as f32 * cell_width + total_column_gaps + total_group_gaps;
    let start_x = (page.width - block_width) / 2.0;

    let start_y = match viewpoint {
        Viewpoint::Instructor => page.height - MARGIN_Y - cell_height,
        Viewpoint::Student => page.height - MARGIN_Y - cell_height - STUDENT_DROP,
    };

    let title_y = match viewpoint {
        Viewpoint::Instructor => page.height - TITLE_OFFSET,
        Viewpoint::Student => MARGIN_Y / 2.0,
    };

    let podium_y = match viewpoint {
        Viewpoint::Instructor => MARGIN_Y - PODIUM_HEIGHT,
        Viewpoint::Student => start_y + cell_height + PODIUM_GAP,
    };
    let podium = Rect {
        x: page.width / 2.0 - PODIUM_WIDTH / 2.0,
        y: podium_y,
        width: PODIUM_WIDTH,
        height: PODIUM_HEIGHT,
    };

    debug!(
        ?viewpoint,
        rows, columns, cell_width, cell_height, start_x, start_y, "page geometry"
    );

    PageGeometry {
        page,
        cell_width,
        cell_height,
        column_gap: COLUMN_GAP,
        row_gap: ROW_GAP,
        group_gap,
        start_x,
        start_y,
        title_y,
        podium,
        seating,
    }
}
