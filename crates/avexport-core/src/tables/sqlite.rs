// File: crates/avexport-core/src/tables/sqlite.rs
// Summary: Table document as an SQLite database, one SQL table per document table.

use rusqlite::types::Value as SqlValue;
use rusqlite::{params_from_iter, Connection};

use super::TableDocument;
use crate::cell::Cell;
use crate::error::ExportResult;
use crate::format::json_header;

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn sql_value(cell: &Cell) -> SqlValue {
    match cell {
        Cell::Empty => SqlValue::Null,
        Cell::Integer(i) => SqlValue::Integer(*i),
        Cell::Real(_) => cell.real().map_or(SqlValue::Null, SqlValue::Real),
        Cell::Text(s) => SqlValue::Text(s.clone()),
    }
}

/// Column affinity from the first non-empty cell of each column.
fn column_type(doc_rows: &[Vec<Cell>], index: usize) -> &'static str {
    let first = doc_rows.iter().map(|r| &r[index]).find(|c| !matches!(c, Cell::Empty));
    match first {
        Some(Cell::Integer(_)) => "INTEGER",
        Some(Cell::Real(_)) => "REAL",
        _ => "TEXT",
    }
}

fn fill(conn: &mut Connection, doc: &TableDocument) -> ExportResult<()> {
    let tx = conn.transaction()?;
    for table in doc.tables() {
        let name = quote_ident(&json_header(table.name()));
        let columns: Vec<String> = table
            .columns()
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{} {}", quote_ident(&json_header(c)), column_type(table.rows(), i)))
            .collect();
        tx.execute(&format!("CREATE TABLE {name} ({})", columns.join(", ")), [])?;

        let placeholders = vec!["?"; table.columns().len()].join(", ");
        let mut insert = tx.prepare(&format!("INSERT INTO {name} VALUES ({placeholders})"))?;
        for row in table.rows() {
            insert.execute(params_from_iter(row.iter().map(sql_value)))?;
        }
    }
    tx.commit()?;
    Ok(())
}

pub fn write_sqlite(doc: &TableDocument) -> ExportResult<Vec<u8>> {
    let scratch = tempfile::NamedTempFile::new()?;
    {
        let mut conn = Connection::open(scratch.path())?;
        fill(&mut conn, doc)?;
        conn.close().map_err(|(_, e)| e)?;
    }
    Ok(std::fs::read(scratch.path())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cells;
    use crate::tables::Table;

    #[test]
    fn database_reads_back() {
        let mut t = Table::new("Loudness", &["Time", "Momentary", "Label"]);
        t.add_row(cells![0.1, f64::NAN, "a"]).unwrap();
        t.add_row(cells![0.2, f64::NEG_INFINITY, "b"]).unwrap();
        let mut doc = TableDocument::new();
        doc.push(t);

        let bytes = write_sqlite(&doc).unwrap();
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), &bytes).unwrap();
        let conn = Connection::open(file.path()).unwrap();
        let nulls: i64 =
            conn.query_row("SELECT COUNT(*) FROM loudness WHERE momentary IS NULL", [], |r| r.get(0)).unwrap();
        assert_eq!(nulls, 1);
        let pinned: f64 = conn.query_row("SELECT momentary FROM loudness WHERE label = 'b'", [], |r| r.get(0)).unwrap();
        assert_eq!(pinned, -144.0);
    }
}
