//! Classroom seating charts.
//!
//! A roster goes through an assigner ([`assign::generate`]) to become a
//! [`assign::SeatMatrix`]; the matrix is then drawn for the screen
//! ([`render::screen`]) or laid out on paper from the instructor's or the
//! students' side of the room ([`geometry`], [`render::print`],
//! [`render::pdf`]).

pub mod assign;
pub mod error;
pub mod fonts;
pub mod geometry;
pub mod labels;
pub mod palette;
pub mod render;
pub mod roster;

pub use assign::{
    Arrangement, LayoutParameters, SeatMatrix, SeatingMode, SortOrder, StartSide,
};
pub use error::{Result, SeatingError};
pub use geometry::Viewpoint;
pub use roster::{Gender, RosterRecord, SeatLabel};
