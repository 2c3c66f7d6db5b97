//! Minimal CSV field splitting and column selection.
//!
//! Quotes toggle a quoted state and are dropped; commas outside quotes end
//! a field. Escaped quotes (`""`) are not recognized.

use std::fs::File;
use std::io::{BufRead, BufReader};

use camino::Utf8Path;

use crate::error::{AnalysisError, AnalysisOutcome};

/// Maximum characters kept per field.
pub const MAX_FIELD_LEN: usize = 255;

/// Maximum number of header columns and selected columns.
pub const MAX_COLUMNS: usize = 20;

const BOM: char = '\u{feff}';

/// Split a CSV line into at most `max_fields` fields.
///
/// Carriage returns and newlines are skipped. The last field is emitted
/// when it is non-empty or the line ends with a comma.
pub fn split_fields(line: &str, max_fields: usize) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;
    let mut in_quotes = false;

    for c in line.chars() {
        if fields.len() >= max_fields {
            return fields;
        }
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
                current_len = 0;
            }
            '\r' | '\n' => {}
            _ => {
                if current_len < MAX_FIELD_LEN {
                    current.push(c);
                    current_len += 1;
                }
            }
        }
    }

    let trailing_comma = line.trim_end_matches(['\r', '\n']).ends_with(',');
    if fields.len() < max_fields && (!current.is_empty() || (!fields.is_empty() && trailing_comma)) {
        fields.push(current);
    }
    fields
}

/// Remove a leading UTF-8 byte order mark.
pub fn strip_bom(line: &str) -> &str {
    line.strip_prefix(BOM).unwrap_or(line)
}

/// Column names from a header row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvHeader {
    /// Display names, 1-indexed by position.
    pub columns: Vec<String>,
}

impl CsvHeader {
    /// Parse a header line for display.
    ///
    /// The BOM is removed, leading spaces are trimmed and non-ASCII
    /// characters are shown as `?`.
    pub fn parse(line: &str) -> Self {
        let columns = split_fields(strip_bom(line), MAX_COLUMNS)
            .into_iter()
            .map(|field| {
                field
                    .trim_start_matches(' ')
                    .chars()
                    .map(|c| if c.is_ascii() { c } else { '?' })
                    .collect()
            })
            .collect();
        Self { columns }
    }

    /// Read and parse the first line of a file. An empty file has an
    /// empty header.
    pub fn read(path: &Utf8Path) -> AnalysisOutcome<Self> {
        let io_err = |source| AnalysisError::Io {
            path: path.to_owned(),
            source,
        };
        let mut reader = BufReader::new(File::open(path).map_err(io_err)?);
        let mut line = Vec::new();
        reader.read_until(b'\n', &mut line).map_err(io_err)?;
        let line = String::from_utf8_lossy(&line);
        Ok(Self::parse(line.trim_end_matches(['\r', '\n'])))
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// True when the header has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Parse a comma-separated, 1-indexed column list like `"1,3"`.
///
/// Entries that are not numbers or fall outside `1..=column_count` are
/// ignored, as are repeats. At most [`MAX_COLUMNS`] are kept. The result is
/// 0-indexed.
pub fn parse_column_selection(input: &str, column_count: usize) -> AnalysisOutcome<Vec<usize>> {
    let mut selected = Vec::new();
    for entry in input.split(',') {
        if selected.len() >= MAX_COLUMNS {
            break;
        }
        let Ok(column) = entry.trim().parse::<usize>() else {
            continue;
        };
        if (1..=column_count).contains(&column) && !selected.contains(&(column - 1)) {
            selected.push(column - 1);
        }
    }
    if selected.is_empty() {
        return Err(AnalysisError::NoColumns {
            available: column_count,
        });
    }
    Ok(selected)
}

/// Join the selected fields with single spaces, trimming leading spaces.
///
/// Columns missing from a short row are skipped.
pub fn join_columns(fields: &[String], columns: &[usize]) -> String {
    columns
        .iter()
        .filter_map(|&i| fields.get(i))
        .map(|f| f.trim_start_matches(' '))
        .collect::<Vec<_>>()
        .join(" ")
}
