//! Spreadsheet (.xlsx) extraction.
//!
//! Cells are read as their cached values, so formula cells yield the result
//! Excel last computed. Every non-empty row becomes one unit whose text is
//! the row's cell values joined with `" | "`.

use std::path::Path;

use calamine::{open_workbook, Data, Reader, SheetType, Xlsx};
use chrono::NaiveDateTime;

use super::{ExtractError, FormatExtractor};
use crate::models::{Extraction, ExtractionUnit, FileType, Location};

/// Separator placed between the cell values of a row.
pub const CELL_SEPARATOR: &str = " | ";

/// Extracts row text from every worksheet of .xlsx files.
#[derive(Debug, Default, Clone)]
pub struct XlsxExtractor;

impl XlsxExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FormatExtractor for XlsxExtractor {
    fn file_type(&self) -> FileType {
        FileType::Xlsx
    }

    fn extract(&self, path: &Path) -> Result<Extraction, ExtractError> {
        let mut workbook: Xlsx<_> = open_workbook(path)?;

        let sheet_names: Vec<String> = workbook
            .sheets_metadata()
            .iter()
            .filter(|sheet| sheet.typ == SheetType::WorkSheet)
            .map(|sheet| sheet.name.clone())
            .collect();

        let mut units = Vec::new();
        for name in sheet_names {
            let range = workbook.worksheet_range(&name)?;
            // Ranges start at the first used cell; row numbers are sheet rows
            let first_row = range.start().map(|(row, _)| row).unwrap_or(0);

            for (offset, row) in range.rows().enumerate() {
                let text = row_text(row);
                if text.trim().is_empty() {
                    continue;
                }
                units.push(ExtractionUnit::new(
                    Location::Sheet {
                        name: name.clone(),
                        row: first_row + offset as u32 + 1,
                    },
                    text,
                ));
            }
        }

        Ok(Extraction::from_units(units))
    }
}

/// Join the non-empty cells of a row.
fn row_text(row: &[Data]) -> String {
    row.iter()
        .filter_map(format_cell)
        .collect::<Vec<_>>()
        .join(CELL_SEPARATOR)
}

/// Text form of a cell value; `None` for empty cells.
fn format_cell(cell: &Data) -> Option<String> {
    let text = match cell {
        Data::Empty => return None,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => format_number(*f),
        Data::Bool(true) => "True".to_string(),
        Data::Bool(false) => "False".to_string(),
        Data::DateTime(dt) => match dt.as_datetime() {
            // Serials below one day carry only a time of day
            Some(datetime) if dt.as_f64() < 1.0 => datetime.format("%H:%M:%S").to_string(),
            Some(datetime) => format_datetime(datetime),
            None => format_number(dt.as_f64()),
        },
        Data::Error(e) => e.to_string(),
    };
    Some(text)
}

fn format_datetime(datetime: NaiveDateTime) -> String {
    datetime.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Spreadsheets store every number as a float; whole numbers print without
/// a fractional part.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}
