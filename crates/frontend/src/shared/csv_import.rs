//! Programs CSV import: file checks, parsing and column validation.
//!
//! ```text
//! program,platform,visibility,status,apex_domain
//! Acme Corp,HackerOne,public,active,acme.com
//! Beta Inc,Bugcrowd,private,active,beta.com
//! ```

use contracts::domain::a001_program::aggregate::{ProgramCsvRow, PROGRAM_CSV_COLUMNS};
use std::collections::HashMap;

/// Upload size limit in bytes.
pub const MAX_CSV_SIZE: u64 = 2 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CsvImportError {
    #[error("Only CSV files are allowed.")]
    NotCsv,
    #[error("File is too large (max {}MB).", .max / 1024 / 1024)]
    TooLarge { max: u64 },
    #[error("CSV parse error: {0}")]
    Parse(String),
    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
    #[error("CSV file contains no rows")]
    Empty,
}

/// Accepts a file when its MIME type or its extension says CSV.
pub fn check_file(name: &str, mime: &str, size: u64) -> Result<(), CsvImportError> {
    let is_csv = mime.to_ascii_lowercase().contains("csv")
        || name.to_ascii_lowercase().ends_with(".csv");
    if !is_csv {
        return Err(CsvImportError::NotCsv);
    }
    if size > MAX_CSV_SIZE {
        return Err(CsvImportError::TooLarge { max: MAX_CSV_SIZE });
    }
    Ok(())
}

/// Parses the file body. Blank lines are skipped and every value is trimmed;
/// extra columns are ignored.
pub fn parse_programs_csv(text: &str) -> Result<Vec<ProgramCsvRow>, CsvImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| CsvImportError::Parse(e.to_string()))?
        .clone();
    let positions: HashMap<&str, usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h, i))
        .collect();

    let missing: Vec<String> = PROGRAM_CSV_COLUMNS
        .iter()
        .filter(|col| !positions.contains_key(*col))
        .map(|col| col.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(CsvImportError::MissingColumns(missing));
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| CsvImportError::Parse(e.to_string()))?;
        if record.iter().all(|v| v.is_empty()) {
            continue;
        }
        let field = |name: &str| {
            positions
                .get(name)
                .and_then(|i| record.get(*i))
                .unwrap_or("")
                .trim()
                .to_string()
        };
        rows.push(ProgramCsvRow {
            program: field("program"),
            platform: field("platform"),
            visibility: field("visibility"),
            status: field("status"),
            apex_domain: field("apex_domain"),
        });
    }

    if rows.is_empty() {
        return Err(CsvImportError::Empty);
    }
    Ok(rows)
}
