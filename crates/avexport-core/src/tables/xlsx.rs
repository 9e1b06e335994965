// File: crates/avexport-core/src/tables/xlsx.rs
// Summary: Table document as an XLSX workbook, one worksheet per table (more past the row limit).

use rust_xlsxwriter::{Format, Workbook, Worksheet};
use tracing::warn;

use super::{Table, TableDocument};
use crate::cell::Cell;
use crate::error::ExportResult;

const SHEET_NAME_MAX: usize = 31;
/// Worksheet row limit minus the header row.
const ROWS_PER_SHEET: usize = 1_048_575;

/// Sheet names are limited to 31 chars and may not contain `[]:*?/\`.
fn sheet_name(name: &str) -> String {
    name.chars()
        .map(|c| if "[]:*?/\\".contains(c) { '_' } else { c })
        .take(SHEET_NAME_MAX)
        .collect()
}

/// Row slices of `table`, one per worksheet. Continuation sheets are named
/// `<name> (2)`, `<name> (3)`, ... with the base shortened to fit the suffix.
fn sheet_chunks(table: &Table, rows_per_sheet: usize) -> Vec<(String, &[Vec<Cell>])> {
    table
        .rows()
        .chunks(rows_per_sheet.max(1))
        .enumerate()
        .map(|(i, rows)| {
            let name = if i == 0 {
                sheet_name(table.name())
            } else {
                let suffix = format!(" ({})", i + 1);
                let base: String = sheet_name(table.name()).chars().take(SHEET_NAME_MAX - suffix.len()).collect();
                format!("{}{suffix}", base.trim_end())
            };
            (name, rows)
        })
        .collect()
}

fn write_sheet(sheet: &mut Worksheet, columns: &[String], rows: &[Vec<Cell>], bold: &Format) -> ExportResult<()> {
    for (col, title) in columns.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, title, bold)?;
    }
    for (r, row) in rows.iter().enumerate() {
        let r = r as u32 + 1;
        for (col, cell) in row.iter().enumerate() {
            let col = col as u16;
            match cell {
                Cell::Empty => {}
                Cell::Integer(i) => {
                    sheet.write_number(r, col, *i as f64)?;
                }
                Cell::Real(_) => {
                    if let Some(v) = cell.real() {
                        sheet.write_number(r, col, v)?;
                    }
                }
                Cell::Text(s) => {
                    sheet.write_string(r, col, s)?;
                }
            }
        }
    }
    Ok(())
}

pub fn write_xlsx(doc: &TableDocument) -> ExportResult<Vec<u8>> {
    write_xlsx_with_limit(doc, ROWS_PER_SHEET)
}

fn write_xlsx_with_limit(doc: &TableDocument, rows_per_sheet: usize) -> ExportResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();
    for table in doc.tables() {
        let chunks = sheet_chunks(table, rows_per_sheet);
        if chunks.len() > 1 {
            warn!(
                table = table.name(),
                rows = table.rows().len(),
                sheets = chunks.len(),
                "table split over continuation sheets"
            );
        }
        for (name, rows) in chunks {
            let sheet = workbook.add_worksheet();
            sheet.set_name(name)?;
            write_sheet(sheet, table.columns(), rows, &bold)?;
        }
    }
    Ok(workbook.save_to_buffer()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cells;
    use crate::tables::Table;

    #[test]
    fn workbook_is_a_zip() {
        let mut t = Table::new("Crop: events", &["Frame", "Value"]);
        t.add_row(cells![1u32, 2.5]).unwrap();
        let mut doc = TableDocument::new();
        doc.push(t);
        let bytes = write_xlsx(&doc).unwrap();
        assert_eq!(&bytes[..2], b"PK");
        assert_eq!(sheet_name("Crop: events"), "Crop_ events");
    }

    fn numbered(name: &str, rows: usize) -> Table {
        let mut t = Table::new(name, &["Frame"]);
        for i in 0..rows {
            t.add_row(cells![i]).unwrap();
        }
        t
    }

    #[test]
    fn long_tables_continue_on_numbered_sheets() {
        let t = numbered("Container video frames and packets", 5);
        let chunks = sheet_chunks(&t, 2);
        let names: Vec<&str> = chunks.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(
            names,
            ["Container video frames and pack", "Container video frames and (2)", "Container video frames and (3)"]
        );
        assert!(names.iter().all(|n| n.chars().count() <= SHEET_NAME_MAX));
        let sizes: Vec<usize> = chunks.iter().map(|(_, rows)| rows.len()).collect();
        assert_eq!(sizes, [2, 2, 1]);

        let mut doc = TableDocument::new();
        doc.push(t);
        doc.push(numbered("GOP", 1));
        assert_eq!(&write_xlsx_with_limit(&doc, 2).unwrap()[..2], b"PK");
    }

    #[test]
    fn table_past_the_worksheet_row_limit_still_exports() {
        let t = numbered("Frames", ROWS_PER_SHEET + 1);
        assert_eq!(sheet_chunks(&t, ROWS_PER_SHEET).len(), 2);
        let mut doc = TableDocument::new();
        doc.push(t);
        assert_eq!(&write_xlsx(&doc).unwrap()[..2], b"PK");
    }
}
