//! Seat assignment: turns a roster into a seat matrix.
//!
//! Both assigners are pure: the roster slice is never reordered, and every
//! call builds a fresh [`SeatMatrix`]. Neither assigner fails on oversubscribed
//! input; they drop the students that do not fit. Callers go through
//! [`generate`] (or call [`check_capacity`] first) so that never happens
//! silently.

use std::cmp::Ordering;

use clap::ValueEnum;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{Result, SeatingError};
use crate::roster::{normalize, RosterRecord, SeatLabel};

/// Smallest row or group count the layout accepts
pub const MIN_DIMENSION: usize = 2;
/// Largest row or group count the layout accepts
pub const MAX_DIMENSION: usize = 10;

// ============================================================================
// Layout Parameters
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SeatingMode {
    /// One student per desk
    #[default]
    Single,
    /// Two students share a desk group
    Paired,
}

impl SeatingMode {
    /// Physical columns for a given number of groups.
    pub fn columns(self, groups: usize) -> usize {
        match self {
            SeatingMode::Single => groups,
            SeatingMode::Paired => groups * 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    #[value(name = "asc", alias = "ascending")]
    Ascending,
    #[value(name = "desc", alias = "descending")]
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StartSide {
    #[default]
    Left,
    Right,
}

/// Which assigner builds the matrix, with the flags that only it reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Arrangement {
    Random { seating: SeatingMode },
    Ordered { sort: SortOrder, start: StartSide },
}

impl Arrangement {
    /// Ordered seating is always one student per desk.
    pub fn seating_mode(&self) -> SeatingMode {
        match self {
            Arrangement::Random { seating } => *seating,
            Arrangement::Ordered { .. } => SeatingMode::Single,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LayoutParameters {
    pub rows: usize,
    pub groups: usize,
    pub arrangement: Arrangement,
}

impl LayoutParameters {
    pub fn new(rows: usize, groups: usize, arrangement: Arrangement) -> Self {
        Self {
            rows,
            groups,
            arrangement,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let range = MIN_DIMENSION..=MAX_DIMENSION;
        if !range.contains(&self.rows) {
            return Err(SeatingError::InvalidParameter(format!(
                "row count {} is outside {}..={}",
                self.rows, MIN_DIMENSION, MAX_DIMENSION
            )));
        }
        if !range.contains(&self.groups) {
            return Err(SeatingError::InvalidParameter(format!(
                "group count {} is outside {}..={}",
                self.groups, MIN_DIMENSION, MAX_DIMENSION
            )));
        }
        Ok(())
    }

    pub fn seating_mode(&self) -> SeatingMode {
        self.arrangement.seating_mode()
    }

    pub fn columns(&self) -> usize {
        self.seating_mode().columns(self.groups)
    }

    pub fn capacity(&self) -> usize {
        self.rows * self.columns()
    }
}

// ============================================================================
// Seat Matrix
// ============================================================================

/// Rows of optional seats. Row 0 is the front row; every row has the same
/// number of columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatMatrix {
    rows: Vec<Vec<Option<SeatLabel>>>,
    #[serde(skip)]
    columns: usize,
}

impl SeatMatrix {
    pub fn empty(rows: usize, columns: usize) -> Self {
        Self {
            rows: vec![vec![None; columns]; rows],
            columns,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> &[Vec<Option<SeatLabel>>] {
        &self.rows
    }

    pub fn get(&self, row: usize, column: usize) -> Option<&SeatLabel> {
        self.rows.get(row)?.get(column)?.as_ref()
    }

    pub fn occupied(&self) -> usize {
        self.rows.iter().flatten().filter(|seat| seat.is_some()).count()
    }

    pub fn vacant(&self) -> usize {
        self.row_count() * self.columns - self.occupied()
    }

    /// Seats in row-major order, front row first, left to right.
    pub fn seats(&self) -> impl Iterator<Item = &Option<SeatLabel>> {
        self.rows.iter().flatten()
    }

    fn place(&mut self, row: usize, column: usize, label: SeatLabel) {
        self.rows[row][column] = Some(label);
    }
}

// ============================================================================
// Assignment
// ============================================================================

/// Fails with [`SeatingError::Capacity`] when the roster does not fit.
pub fn check_capacity(students: usize, params: &LayoutParameters) -> Result<()> {
    let seats = params.capacity();
    if students > seats {
        return Err(SeatingError::Capacity { students, seats });
    }
    Ok(())
}

/// Validates the parameters, checks capacity, then runs the selected assigner.
/// No matrix is built when any check fails.
pub fn generate<R: Rng + ?Sized>(
    roster: &[RosterRecord],
    params: &LayoutParameters,
    rng: &mut R,
) -> Result<SeatMatrix> {
    params.validate()?;
    check_capacity(roster.len(), params)?;

    let matrix = match params.arrangement {
        Arrangement::Random { seating } => {
            assign_random(roster, params.rows, params.groups, seating, rng)
        }
        Arrangement::Ordered { sort, start } => {
            assign_ordered(roster, params.rows, params.groups, sort, start)
        }
    };
    debug!(
        rows = matrix.row_count(),
        columns = matrix.column_count(),
        occupied = matrix.occupied(),
        "seat matrix built"
    );
    Ok(matrix)
}

/// Shuffles the roster and fills seats front row first, left to right.
/// In paired mode students are taken two at a time and each pair fills one
/// desk group; an odd last student leaves the partner seat empty.
pub fn assign_random<R: Rng + ?Sized>(
    roster: &[RosterRecord],
    rows: usize,
    groups: usize,
    mode: SeatingMode,
    rng: &mut R,
) -> SeatMatrix {
    let columns = mode.columns(groups);
    let mut students: Vec<&RosterRecord> = roster.iter().collect();
    students.shuffle(rng);
    truncate_to_capacity(&mut students, rows * columns);

    let mut matrix = SeatMatrix::empty(rows, columns);
    match mode {
        SeatingMode::Single => {
            for (idx, student) in students.iter().enumerate() {
                matrix.place(idx / columns, idx % columns, normalize(student));
            }
        }
        SeatingMode::Paired => {
            for (pair_idx, pair) in students.chunks(2).enumerate() {
                let row = pair_idx / groups;
                let first_column = (pair_idx % groups) * 2;
                for (offset, student) in pair.iter().enumerate() {
                    matrix.place(row, first_column + offset, normalize(student));
                }
            }
        }
    }
    matrix
}

/// Sorts by attendance number and fills one student per desk, front row
/// first. Every row runs in the same direction: from column 0 when starting
/// on the left, from the last column when starting on the right.
///
/// Ids that are not numbers go after all numeric ids in either sort order,
/// keeping their roster order.
pub fn assign_ordered(
    roster: &[RosterRecord],
    rows: usize,
    groups: usize,
    sort: SortOrder,
    start: StartSide,
) -> SeatMatrix {
    let columns = groups;
    let mut students: Vec<&RosterRecord> = roster.iter().collect();
    students.sort_by(|a, b| compare_ids(a, b, sort));
    truncate_to_capacity(&mut students, rows * columns);

    let mut matrix = SeatMatrix::empty(rows, columns);
    for (idx, student) in students.iter().enumerate() {
        let position = idx % columns;
        let column = match start {
            StartSide::Left => position,
            StartSide::Right => columns - 1 - position,
        };
        matrix.place(idx / columns, column, normalize(student));
    }
    matrix
}

fn compare_ids(a: &RosterRecord, b: &RosterRecord, sort: SortOrder) -> Ordering {
    match (a.numeric_id(), b.numeric_id()) {
        (Some(x), Some(y)) => match sort {
            SortOrder::Ascending => x.total_cmp(&y),
            SortOrder::Descending => y.total_cmp(&x),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn truncate_to_capacity(students: &mut Vec<&RosterRecord>, seats: usize) {
    if students.len() > seats {
        warn!(
            dropped = students.len() - seats,
            seats, "roster exceeds seat count; extra students were not seated"
        );
        students.truncate(seats);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::Gender;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn roster_with_ids(ids: &[&str]) -> Vec<RosterRecord> {
        ids.iter()
            .map(|id| RosterRecord::new(*id, format!("S{id}"), Gender::Unspecified))
            .collect()
    }

    fn numbered(count: usize) -> Vec<RosterRecord> {
        (1..=count)
            .map(|n| RosterRecord::new(n.to_string(), format!("S{n}"), Gender::Male))
            .collect()
    }

    fn ids_in_row(matrix: &SeatMatrix, row: usize) -> Vec<Option<String>> {
        matrix.rows()[row]
            .iter()
            .map(|seat| {
                seat.as_ref()
                    .map(|label| label.text.split(' ').next().unwrap_or_default().to_string())
            })
            .collect()
    }

    fn ids(values: &[Option<&str>]) -> Vec<Option<String>> {
        values.iter().map(|v| v.map(str::to_string)).collect()
    }

    #[test]
    fn full_roster_fills_every_single_seat() {
        let mut rng = StdRng::seed_from_u64(7);
        let matrix = assign_random(&numbered(24), 6, 4, SeatingMode::Single, &mut rng);
        assert_eq!(matrix.row_count(), 6);
        assert_eq!(matrix.column_count(), 4);
        assert_eq!(matrix.occupied(), 24);
        assert_eq!(matrix.vacant(), 0);
    }

    #[test]
    fn single_mode_leaves_trailing_seat_empty() {
        let mut rng = StdRng::seed_from_u64(11);
        let matrix = assign_random(&numbered(23), 6, 4, SeatingMode::Single, &mut rng);
        assert_eq!(matrix.occupied(), 23);
        assert!(matrix.get(5, 3).is_none());
        assert!(matrix.seats().take(23).all(Option::is_some));
    }

    #[test]
    fn paired_mode_doubles_columns_and_pairs_fill_groups() {
        let mut rng = StdRng::seed_from_u64(3);
        let matrix = assign_random(&numbered(7), 2, 3, SeatingMode::Paired, &mut rng);
        assert_eq!(matrix.column_count(), 6);
        assert_eq!(matrix.row_count(), 2);
        // Three full pairs across the front row, the odd student starts row 1
        assert!(matrix.rows()[0].iter().all(Option::is_some));
        assert!(matrix.get(1, 0).is_some());
        assert!(matrix.get(1, 1).is_none());
        assert_eq!(matrix.occupied(), 7);
    }

    #[test]
    fn random_with_empty_roster_is_all_vacant() {
        let mut rng = StdRng::seed_from_u64(0);
        let matrix = assign_random(&[], 3, 2, SeatingMode::Paired, &mut rng);
        assert_eq!(matrix.row_count(), 3);
        assert_eq!(matrix.column_count(), 4);
        assert_eq!(matrix.occupied(), 0);
    }

    #[test]
    fn random_truncates_oversubscribed_roster() {
        let mut rng = StdRng::seed_from_u64(5);
        let matrix = assign_random(&numbered(10), 2, 2, SeatingMode::Single, &mut rng);
        assert_eq!(matrix.occupied(), 4);
    }

    #[test]
    fn same_seed_gives_same_layout() {
        let roster = numbered(20);
        let a = assign_random(&roster, 5, 4, SeatingMode::Single, &mut StdRng::seed_from_u64(42));
        let b = assign_random(&roster, 5, 4, SeatingMode::Single, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn ordered_ascending_from_left() {
        let roster = roster_with_ids(&["5", "3", "8", "1", "9", "2", "7", "4", "6", "10"]);
        let matrix = assign_ordered(&roster, 3, 4, SortOrder::Ascending, StartSide::Left);
        assert_eq!(ids_in_row(&matrix, 0), ids(&[Some("1"), Some("2"), Some("3"), Some("4")]));
        assert_eq!(ids_in_row(&matrix, 1), ids(&[Some("5"), Some("6"), Some("7"), Some("8")]));
        assert_eq!(ids_in_row(&matrix, 2), ids(&[Some("9"), Some("10"), None, None]));
    }

    #[test]
    fn ordered_ascending_from_right() {
        let roster = roster_with_ids(&["5", "3", "8", "1", "9", "2", "7", "4", "6", "10"]);
        let matrix = assign_ordered(&roster, 3, 4, SortOrder::Ascending, StartSide::Right);
        assert_eq!(ids_in_row(&matrix, 0), ids(&[Some("4"), Some("3"), Some("2"), Some("1")]));
        assert_eq!(ids_in_row(&matrix, 1), ids(&[Some("8"), Some("7"), Some("6"), Some("5")]));
        assert_eq!(ids_in_row(&matrix, 2), ids(&[None, None, Some("10"), Some("9")]));
    }

    #[test]
    fn ordered_descending() {
        let roster = roster_with_ids(&["2", "4", "1", "3"]);
        let matrix = assign_ordered(&roster, 2, 2, SortOrder::Descending, StartSide::Left);
        assert_eq!(ids_in_row(&matrix, 0), ids(&[Some("4"), Some("3")]));
        assert_eq!(ids_in_row(&matrix, 1), ids(&[Some("2"), Some("1")]));
    }

    #[test]
    fn numeric_sort_is_not_lexicographic() {
        let roster = roster_with_ids(&["10", "9", "100", "2"]);
        let matrix = assign_ordered(&roster, 2, 2, SortOrder::Ascending, StartSide::Left);
        assert_eq!(ids_in_row(&matrix, 0), ids(&[Some("2"), Some("9")]));
        assert_eq!(ids_in_row(&matrix, 1), ids(&[Some("10"), Some("100")]));
    }

    #[test]
    fn non_numeric_ids_go_last_in_both_orders() {
        let roster = roster_with_ids(&["b", "2", "a", "1"]);
        let asc = assign_ordered(&roster, 2, 2, SortOrder::Ascending, StartSide::Left);
        assert_eq!(ids_in_row(&asc, 0), ids(&[Some("1"), Some("2")]));
        assert_eq!(ids_in_row(&asc, 1), ids(&[Some("b"), Some("a")]));

        let desc = assign_ordered(&roster, 2, 2, SortOrder::Descending, StartSide::Left);
        assert_eq!(ids_in_row(&desc, 0), ids(&[Some("2"), Some("1")]));
        assert_eq!(ids_in_row(&desc, 1), ids(&[Some("b"), Some("a")]));
    }

    #[test]
    fn equal_ids_keep_roster_order() {
        let roster = vec![
            RosterRecord::new("1", "first", Gender::Male),
            RosterRecord::new("1", "second", Gender::Male),
        ];
        let matrix = assign_ordered(&roster, 2, 2, SortOrder::Ascending, StartSide::Left);
        assert_eq!(matrix.get(0, 0).map(|l| l.text.as_str()), Some("1 first"));
        assert_eq!(matrix.get(0, 1).map(|l| l.text.as_str()), Some("1 second"));
    }

    #[test]
    fn ordered_assignment_leaves_roster_untouched() {
        let roster = roster_with_ids(&["3", "1", "2"]);
        let before = roster.clone();
        let _ = assign_ordered(&roster, 2, 2, SortOrder::Ascending, StartSide::Left);
        assert_eq!(roster, before);
    }

    #[test]
    fn capacity_is_checked_before_building() {
        let params = LayoutParameters::new(
            4,
            4,
            Arrangement::Random {
                seating: SeatingMode::Single,
            },
        );
        let err = generate(&numbered(30), &params, &mut StdRng::seed_from_u64(1)).unwrap_err();
        assert!(matches!(
            err,
            SeatingError::Capacity {
                students: 30,
                seats: 16
            }
        ));
    }

    #[test]
    fn paired_capacity_counts_both_seats() {
        let params = LayoutParameters::new(
            2,
            2,
            Arrangement::Random {
                seating: SeatingMode::Paired,
            },
        );
        assert_eq!(params.capacity(), 8);
        assert!(check_capacity(8, &params).is_ok());
        assert!(check_capacity(9, &params).is_err());
    }

    #[test]
    fn ordered_capacity_ignores_pairing() {
        let params = LayoutParameters::new(
            3,
            4,
            Arrangement::Ordered {
                sort: SortOrder::Ascending,
                start: StartSide::Left,
            },
        );
        assert_eq!(params.seating_mode(), SeatingMode::Single);
        assert_eq!(params.capacity(), 12);
    }

    #[test]
    fn out_of_range_dimensions_are_rejected() {
        let arrangement = Arrangement::Random {
            seating: SeatingMode::Single,
        };
        assert!(LayoutParameters::new(1, 4, arrangement).validate().is_err());
        assert!(LayoutParameters::new(6, 11, arrangement).validate().is_err());
        assert!(LayoutParameters::new(10, 2, arrangement).validate().is_ok());
    }
}
