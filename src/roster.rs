//! Roster records and their seat labels.
//!
//! A roster is a JSON array of objects with an attendance number, a name and a
//! gender marker. The usual spreadsheet headers (`출석 번호`, `이름`, `성별`)
//! and plain English keys are both accepted.

use std::path::Path;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{Result, SeatingError};
use crate::palette::{self, Swatch};

// ============================================================================
// Column names
// ============================================================================

const ID_COLUMNS: &[&str] = &["출석 번호", "출석번호", "id", "number"];
const NAME_COLUMNS: &[&str] = &["이름", "name"];
const GENDER_COLUMNS: &[&str] = &["성별", "gender"];

/// Display names reported when a column is missing
const REQUIRED_COLUMNS: [(&str, &[&str]); 3] = [
    ("출석 번호 (id)", ID_COLUMNS),
    ("이름 (name)", NAME_COLUMNS),
    ("성별 (gender)", GENDER_COLUMNS),
];

// ============================================================================
// Data Structures
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Unspecified,
}

impl Gender {
    /// Matches the marker case-insensitively against the known synonyms.
    /// Anything unrecognised is `Unspecified`.
    pub fn parse(raw: &str) -> Self {
        let marker = raw.trim().to_lowercase();
        match marker.as_str() {
            "m" | "male" | "남" | "남자" => Gender::Male,
            "f" | "female" | "여" | "여자" => Gender::Female,
            _ => Gender::Unspecified,
        }
    }

    pub fn swatch(self) -> Swatch {
        match self {
            Gender::Male => palette::MALE,
            Gender::Female => palette::FEMALE,
            Gender::Unspecified => palette::UNSPECIFIED,
        }
    }
}

/// One uploaded roster row.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterRecord {
    pub id: String,
    pub name: String,
    pub gender: Gender,
}

impl RosterRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>, gender: Gender) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            gender,
        }
    }

    /// Numeric value of the attendance number, if it has one.
    pub fn numeric_id(&self) -> Option<f64> {
        self.id.trim().parse::<f64>().ok().filter(|n| !n.is_nan())
    }
}

/// What a seat shows: `"<id> <name>"` and the gender category driving its color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatLabel {
    pub text: String,
    pub category: Gender,
}

impl SeatLabel {
    pub fn swatch(&self) -> Swatch {
        self.category.swatch()
    }
}

pub fn normalize(record: &RosterRecord) -> SeatLabel {
    let text = format!("{} {}", record.id.trim(), record.name.trim())
        .trim()
        .to_string();
    SeatLabel {
        text,
        category: record.gender,
    }
}

// ============================================================================
// Loading
// ============================================================================

pub fn load_roster(path: &Path) -> Result<Vec<RosterRecord>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| SeatingError::Roster(format!("{}: {}", path.display(), e)))?;
    parse_roster(&content)
}

/// Parses a JSON roster. Every required column must appear in at least one
/// record; records missing a field individually get an empty value.
pub fn parse_roster(json: &str) -> Result<Vec<RosterRecord>> {
    let rows: Vec<Map<String, Value>> = serde_json::from_str(json)
        .map_err(|e| SeatingError::Roster(format!("Invalid JSON: {}", e)))?;

    if !rows.is_empty() {
        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|(_, aliases)| !rows.iter().any(|row| find_cell(row, aliases).is_some()))
            .map(|(label, _)| label.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(SeatingError::MissingColumns(missing));
        }
    }

    let records: Vec<RosterRecord> = rows
        .iter()
        .map(|row| {
            RosterRecord::new(
                cell_text(find_cell(row, ID_COLUMNS)),
                cell_text(find_cell(row, NAME_COLUMNS)),
                Gender::parse(&cell_text(find_cell(row, GENDER_COLUMNS))),
            )
        })
        .collect();

    debug!(students = records.len(), "roster parsed");
    Ok(records)
}

fn find_cell<'a>(row: &'a Map<String, Value>, aliases: &[&str]) -> Option<&'a Value> {
    row.iter()
        .find(|(key, _)| {
            let key = key.trim();
            aliases.iter().any(|alias| key.eq_ignore_ascii_case(alias))
        })
        .map(|(_, value)| value)
}

fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else {
                match n.as_f64() {
                    // Spreadsheet exports often store whole numbers as floats
                    Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 => {
                        format!("{}", f as i64)
                    }
                    _ => n.to_string(),
                }
            }
        }
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gender_synonyms_are_case_insensitive() {
        for raw in ["M", "m", "male", "MALE", "Male", "남", "남자", " m "] {
            assert_eq!(Gender::parse(raw), Gender::Male, "{raw:?}");
        }
        for raw in ["F", "f", "female", "FeMale", "여", "여자"] {
            assert_eq!(Gender::parse(raw), Gender::Female, "{raw:?}");
        }
        for raw in ["", "x", "unknown", "남성"] {
            assert_eq!(Gender::parse(raw), Gender::Unspecified, "{raw:?}");
        }
    }

    #[test]
    fn label_joins_id_and_name() {
        let label = normalize(&RosterRecord::new("7", "김민수", Gender::Male));
        assert_eq!(label.text, "7 김민수");
        assert_eq!(label.category, Gender::Male);
        assert_eq!(label.swatch(), palette::MALE);
    }

    #[test]
    fn label_trims_missing_parts() {
        assert_eq!(normalize(&RosterRecord::new("", "Lee", Gender::Female)).text, "Lee");
        assert_eq!(normalize(&RosterRecord::new("12", "", Gender::Female)).text, "12");
        assert_eq!(normalize(&RosterRecord::new("", "", Gender::Unspecified)).text, "");
    }

    #[test]
    fn parses_korean_headers_and_numbers() {
        let json = r#"[
            {"출석 번호": 1, "이름": "김하늘", "성별": "여"},
            {"출석 번호": 2.0, "이름": "박준", "성별": "남"},
            {"출석 번호": "3", "이름": "최윤", "성별": null}
        ]"#;
        let roster = parse_roster(json).unwrap();
        assert_eq!(roster.len(), 3);
        assert_eq!(roster[0], RosterRecord::new("1", "김하늘", Gender::Female));
        assert_eq!(roster[1].id, "2");
        assert_eq!(roster[2].gender, Gender::Unspecified);
    }

    #[test]
    fn parses_english_headers() {
        let json = r#"[{"ID": "A-1", "Name": "Kim", "Gender": "F"}]"#;
        let roster = parse_roster(json).unwrap();
        assert_eq!(roster[0], RosterRecord::new("A-1", "Kim", Gender::Female));
        assert_eq!(roster[0].numeric_id(), None);
    }

    #[test]
    fn record_missing_a_field_degrades_to_empty() {
        let json = r#"[
            {"id": 1, "name": "Kim", "gender": "M"},
            {"id": 2}
        ]"#;
        let roster = parse_roster(json).unwrap();
        assert_eq!(roster[1], RosterRecord::new("2", "", Gender::Unspecified));
    }

    #[test]
    fn missing_column_is_reported() {
        let json = r#"[{"id": 1, "name": "Kim"}]"#;
        match parse_roster(json) {
            Err(SeatingError::MissingColumns(cols)) => {
                assert_eq!(cols, vec!["성별 (gender)".to_string()]);
            }
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn empty_roster_is_valid() {
        assert!(parse_roster("[]").unwrap().is_empty());
    }

    #[test]
    fn invalid_json_is_a_roster_error() {
        assert!(matches!(parse_roster("{"), Err(SeatingError::Roster(_))));
    }

    #[test]
    fn numeric_id_parses_trimmed_numbers() {
        assert_eq!(RosterRecord::new(" 12 ", "", Gender::Male).numeric_id(), Some(12.0));
        assert_eq!(RosterRecord::new("3.5", "", Gender::Male).numeric_id(), Some(3.5));
        assert_eq!(RosterRecord::new("NaN", "", Gender::Male).numeric_id(), None);
        assert_eq!(RosterRecord::new("abc", "", Gender::Male).numeric_id(), None);
    }
}
