// File: crates/avexport-core/src/tables/json.rs
// Summary: Table document as one JSON object of arrays of row objects keyed by normalised column names.

use serde_json::{Map, Number, Value};

use super::TableDocument;
use crate::cell::Cell;
use crate::error::ExportResult;
use crate::format::json_header;

pub(crate) fn cell_value(cell: &Cell) -> Value {
    match cell {
        Cell::Empty => Value::Null,
        Cell::Integer(i) => Value::from(*i),
        Cell::Real(_) => cell.real().and_then(Number::from_f64).map_or(Value::Null, Value::Number),
        Cell::Text(s) => Value::String(s.clone()),
    }
}

pub fn write_json(doc: &TableDocument) -> ExportResult<Vec<u8>> {
    let mut root = Map::new();
    for table in doc.tables() {
        let keys: Vec<String> = table.columns().iter().map(|c| json_header(c)).collect();
        let rows: Vec<Value> = table
            .rows()
            .iter()
            .map(|row| {
                let obj: Map<String, Value> = keys.iter().cloned().zip(row.iter().map(cell_value)).collect();
                Value::Object(obj)
            })
            .collect();
        root.insert(json_header(table.name()), Value::Array(rows));
    }
    Ok(serde_json::to_vec_pretty(&Value::Object(root))?)
}
