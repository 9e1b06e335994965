// File: crates/avexport-core/src/tables/mod.rs
// Summary: Consolidated multi-table document shared by table-capable engines, and its writers.

mod json;
mod sqlite;
mod xlsx;
mod xml;

pub(crate) use xml::escape as escape_xml;

use crate::cell::Cell;
use crate::error::{ExportError, ExportResult};

pub use json::write_json;
pub use sqlite::write_sqlite;
pub use xlsx::write_xlsx;
pub use xml::write_xml;

#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    name: String,
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(name: impl Into<String>, columns: &[&str]) -> Self {
        Self { name: name.into(), columns: columns.iter().map(|c| c.to_string()).collect(), rows: Vec::new() }
    }

    pub fn add_row(&mut self, cells: Vec<Cell>) -> ExportResult<()> {
        if cells.len() != self.columns.len() {
            return Err(ExportError::RowWidthMismatch {
                document: self.name.clone(),
                expected: self.columns.len(),
                actual: cells.len(),
            });
        }
        self.rows.push(cells);
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Ordered named tables; empty tables are kept out of every written format.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TableDocument {
    tables: Vec<Table>,
}

impl TableDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a table, skipping it when it has no rows.
    pub fn push(&mut self, table: Table) {
        if !table.is_empty() {
            self.tables.push(table);
        }
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// Consolidated file formats, one file per export: `<base>.<ext>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TableFormat {
    Xlsx,
    Sqlite,
    Xml,
    Json,
}

impl TableFormat {
    pub fn extension(self) -> &'static str {
        match self {
            TableFormat::Xlsx => "xlsx",
            TableFormat::Sqlite => "sqlite",
            TableFormat::Xml => "xml",
            TableFormat::Json => "json",
        }
    }

    pub fn write(self, doc: &TableDocument) -> ExportResult<Vec<u8>> {
        match self {
            TableFormat::Xlsx => write_xlsx(doc),
            TableFormat::Sqlite => write_sqlite(doc),
            TableFormat::Xml => Ok(write_xml(doc).into_bytes()),
            TableFormat::Json => write_json(doc),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cells;

    #[test]
    fn empty_tables_are_dropped() {
        let mut doc = TableDocument::new();
        doc.push(Table::new("empty", &["a"]));
        let mut t = Table::new("full", &["a", "b"]);
        t.add_row(cells![1u32, "x"]).unwrap();
        doc.push(t);
        assert_eq!(doc.tables().len(), 1);
        assert!(doc.table("full").is_some());
    }

    #[test]
    fn row_width_is_checked() {
        let mut t = Table::new("t", &["a", "b"]);
        assert!(t.add_row(cells![1u32, 2u32, 3u32]).is_err());
    }
}
