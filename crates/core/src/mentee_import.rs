//! Mentee roster spreadsheet import.
//!
//! Corporates upload an `.xlsx` roster per cohort. The first sheet's first
//! row is the header; starred columns are mandatory. Rows are validated one
//! by one and reported with their spreadsheet row number (header is row 1,
//! so the first data row is row 2).

use std::collections::HashMap;
use std::io::Cursor;
use std::sync::OnceLock;

use calamine::{Data, Reader, Xlsx};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const COL_FIRST_NAME: &str = "First Name*";
pub const COL_LAST_NAME: &str = "Last Name*";
pub const COL_EMAIL: &str = "Email*";
pub const COL_PHONE: &str = "Phone Number";
pub const COL_DESIGNATION: &str = "Designation";
pub const COL_DEPARTMENT: &str = "Department";

/// Columns that must be present in the header and non-empty in every row.
pub const REQUIRED_COLUMNS: &[&str] = &[COL_FIRST_NAME, COL_LAST_NAME, COL_EMAIL];

/// Spreadsheet row number of the first data row.
pub const FIRST_DATA_ROW: usize = 2;

/// One mentee as read from the roster.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenteeRow {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub designation: Option<String>,
    pub department: Option<String>,
}

/// A roster row together with its spreadsheet row number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRow {
    pub row: usize,
    pub mentee: MenteeRow,
}

/// Validation errors for one spreadsheet row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowError {
    pub row: usize,
    pub errors: Vec<String>,
}

/// Rows split into importable and rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RowValidation {
    pub valid: Vec<MenteeRow>,
    pub invalid: Vec<RowError>,
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static email regex"))
}

fn phone_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\+?[0-9]{7,15}$").expect("static phone regex"))
}

/// Read the first sheet of an `.xlsx` workbook into roster rows.
pub fn parse_workbook(bytes: &[u8]) -> Result<Vec<SheetRow>, CoreError> {
    let mut workbook: Xlsx<Cursor<&[u8]>> = Xlsx::new(Cursor::new(bytes)).map_err(|e| {
        CoreError::InvalidInput(format!("Uploaded file is not a readable .xlsx workbook: {e}"))
    })?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| CoreError::InvalidInput("Workbook contains no sheets".to_string()))?
        .map_err(|e| CoreError::InvalidInput(format!("Failed to read the first sheet: {e}")))?;

    let mut rows = range
        .rows()
        .map(|cells| cells.iter().map(cell_text).collect::<Vec<String>>());
    let header = rows
        .next()
        .ok_or_else(|| CoreError::InvalidInput("Sheet is empty".to_string()))?;
    let body: Vec<Vec<String>> = rows.collect();

    rows_from_cells(&header, &body)
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        // Phone numbers typed into Excel come back as floats.
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        other => other.to_string().trim().to_string(),
    }
}

/// Map raw cell text to roster rows using the header for column positions.
///
/// Fully blank rows are skipped but still consume a row number.
pub fn rows_from_cells(header: &[String], body: &[Vec<String>]) -> Result<Vec<SheetRow>, CoreError> {
    let positions: HashMap<&str, usize> = header
        .iter()
        .enumerate()
        .map(|(i, h)| (h.trim(), i))
        .collect();

    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|c| !positions.contains_key(c))
        .collect();
    if !missing.is_empty() {
        return Err(CoreError::InvalidInput(format!(
            "Roster is missing required column(s): {}",
            missing.join(", ")
        )));
    }

    let cell = |cells: &[String], column: &str| -> String {
        positions
            .get(column)
            .and_then(|&i| cells.get(i))
            .map(|v| v.trim().to_string())
            .unwrap_or_default()
    };
    let optional = |cells: &[String], column: &str| -> Option<String> {
        Some(cell(cells, column)).filter(|v| !v.is_empty())
    };

    Ok(body
        .iter()
        .enumerate()
        .filter(|(_, cells)| cells.iter().any(|c| !c.trim().is_empty()))
        .map(|(i, cells)| SheetRow {
            row: i + FIRST_DATA_ROW,
            mentee: MenteeRow {
                first_name: cell(cells, COL_FIRST_NAME),
                last_name: cell(cells, COL_LAST_NAME),
                email: cell(cells, COL_EMAIL).to_lowercase(),
                phone: optional(cells, COL_PHONE)
                    .map(|p| p.replace([' ', '-', '(', ')'], "")),
                designation: optional(cells, COL_DESIGNATION),
                department: optional(cells, COL_DEPARTMENT),
            },
        })
        .collect())
}

/// Field-level problems with a single mentee row. Empty means valid.
pub fn validate_row(mentee: &MenteeRow) -> Vec<String> {
    let mut errors = Vec::new();

    for (column, value) in [
        (COL_FIRST_NAME, &mentee.first_name),
        (COL_LAST_NAME, &mentee.last_name),
        (COL_EMAIL, &mentee.email),
    ] {
        if value.is_empty() {
            errors.push(format!("{column} is required"));
        }
    }

    if !mentee.email.is_empty() && !email_regex().is_match(&mentee.email) {
        errors.push(format!("{COL_EMAIL} '{}' is not a valid email", mentee.email));
    }
    if let Some(ref phone) = mentee.phone {
        if !phone_regex().is_match(phone) {
            errors.push(format!("{COL_PHONE} '{phone}' must be 7-15 digits"));
        }
    }

    errors
}

/// Validate every row, also rejecting emails repeated within the sheet.
pub fn validate_rows(rows: Vec<SheetRow>) -> RowValidation {
    let mut result = RowValidation::default();
    let mut first_seen: HashMap<String, usize> = HashMap::new();

    for SheetRow { row, mentee } in rows {
        let mut errors = validate_row(&mentee);
        if !mentee.email.is_empty() {
            if let Some(&earlier) = first_seen.get(&mentee.email) {
                errors.push(format!("{COL_EMAIL} duplicates row {earlier}"));
            } else {
                first_seen.insert(mentee.email.clone(), row);
            }
        }

        if errors.is_empty() {
            result.valid.push(mentee);
        } else {
            result.invalid.push(RowError { row, errors });
        }
    }

    result
}
