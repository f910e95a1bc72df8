use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use super::{OutputError, Row, HEADERS};
use crate::models::Record;

/// Longest string Excel accepts in a cell, in characters.
pub const XLSX_MAX_STRING_LEN: usize = 32_767;

/// Write records to a single-sheet workbook with a bold header row.
///
/// Slide and page numbers are written as numbers, absent values as blank
/// cells.
pub fn write_xlsx(path: &Path, records: &[Record]) -> Result<(), OutputError> {
    build_workbook(records)
        .and_then(|mut workbook| workbook.save(path))
        .map_err(|source| OutputError::Xlsx {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::debug!("Wrote {} rows to {}", records.len(), path.display());
    Ok(())
}

fn build_workbook(records: &[Record]) -> Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    let bold = Format::new().set_bold();

    for (col, header) in HEADERS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, &bold)?;
    }

    for (index, record) in records.iter().enumerate() {
        let row = index as u32 + 1;
        let cells = Row::from(record);

        write_text(sheet, row, 0, Some(cells.file_path))?;
        write_text(sheet, row, 1, Some(cells.file_name))?;
        write_text(sheet, row, 2, Some(cells.file_type.as_str()))?;
        match record.location.as_number() {
            Some(n) => {
                sheet.write_number(row, 3, f64::from(n))?;
            }
            None => write_text(sheet, row, 3, cells.location.as_deref())?,
        }
        write_text(sheet, row, 4, Some(cells.sentence))?;
        write_text(sheet, row, 5, cells.comments)?;
        write_text(sheet, row, 6, cells.metadata)?;
    }

    Ok(workbook)
}

/// Write a string cell; `None` and empty strings leave the cell blank.
fn write_text(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: Option<&str>,
) -> Result<(), XlsxError> {
    let Some(value) = value.filter(|v| !v.is_empty()) else {
        return Ok(());
    };

    if value.chars().count() > XLSX_MAX_STRING_LEN {
        tracing::warn!(
            "Truncating cell at row {}, column {} to {} characters",
            row + 1,
            HEADERS[col as usize],
            XLSX_MAX_STRING_LEN
        );
        let truncated: String = value.chars().take(XLSX_MAX_STRING_LEN).collect();
        sheet.write_string(row, col, truncated)?;
    } else {
        sheet.write_string(row, col, value)?;
    }
    Ok(())
}
