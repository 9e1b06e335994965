// File: crates/avexport-core/src/tabular.rs
// Summary: Flat tabular documents in the TXT, CSV and CSV-FR dialects.

use csv::{QuoteStyle, WriterBuilder};

use crate::cell::Cell;
use crate::error::{ExportError, ExportResult};
use crate::format::NumberLocale;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TabularDialect {
    /// Tab separated, `.` decimal.
    Txt,
    /// `,` separated, `.` decimal.
    Csv,
    /// `;` separated, `,` decimal.
    CsvFr,
}

impl TabularDialect {
    pub const ALL: [TabularDialect; 3] = [TabularDialect::Txt, TabularDialect::Csv, TabularDialect::CsvFr];

    pub fn delimiter(self) -> u8 {
        match self {
            TabularDialect::Txt => b'\t',
            TabularDialect::Csv => b',',
            TabularDialect::CsvFr => b';',
        }
    }

    pub fn locale(self) -> NumberLocale {
        match self {
            TabularDialect::CsvFr => NumberLocale::French,
            _ => NumberLocale::English,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            TabularDialect::Txt => "txt",
            TabularDialect::Csv | TabularDialect::CsvFr => "csv",
        }
    }

    /// Name used on the command line and in single-export requests.
    pub fn selector(self) -> &'static str {
        match self {
            TabularDialect::Txt => "txt",
            TabularDialect::Csv => "csv",
            TabularDialect::CsvFr => "csvfr",
        }
    }

    pub fn from_selector(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.selector() == s)
    }
}

/// A header plus rows, formatted for one dialect as rows are appended.
#[derive(Clone, Debug, PartialEq)]
pub struct TabularDocument {
    name: String,
    dialect: TabularDialect,
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl TabularDocument {
    pub fn new(name: impl Into<String>, dialect: TabularDialect, header: &[&str]) -> Self {
        Self {
            name: name.into(),
            dialect,
            header: header.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, cells: Vec<Cell>) -> ExportResult<()> {
        if cells.len() != self.header.len() {
            return Err(ExportError::RowWidthMismatch {
                document: self.name.clone(),
                expected: self.header.len(),
                actual: cells.len(),
            });
        }
        let locale = self.dialect.locale();
        self.rows.push(cells.iter().map(|c| c.to_text(locale)).collect());
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dialect(&self) -> TabularDialect {
        self.dialect
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// `<base>_<name>.<ext>`
    pub fn file_name(&self, base: &str) -> String {
        format!("{base}_{}.{}", self.name, self.dialect.extension())
    }

    pub fn to_bytes(&self) -> ExportResult<Vec<u8>> {
        let quote = match self.dialect {
            TabularDialect::Txt => QuoteStyle::Never,
            _ => QuoteStyle::Necessary,
        };
        let mut w = WriterBuilder::new()
            .delimiter(self.dialect.delimiter())
            .quote_style(quote)
            .from_writer(Vec::new());
        w.write_record(&self.header)?;
        for row in &self.rows {
            w.write_record(row)?;
        }
        w.into_inner().map_err(|e| ExportError::Io(e.into_error()))
    }
}
