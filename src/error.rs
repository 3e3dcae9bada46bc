use thiserror::Error;

#[derive(Error, Debug)]
pub enum SeatingError {
    #[error("Not enough seats: {students} students for {seats} seats")]
    Capacity { students: usize, seats: usize },
    #[error("Roster is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
    #[error("Invalid layout parameter: {0}")]
    InvalidParameter(String),
    #[error("Failed to read roster file: {0}")]
    Roster(String),
    #[error("Failed to create PDF: {0}")]
    Pdf(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SeatingError>;
