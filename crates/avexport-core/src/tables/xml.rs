// File: crates/avexport-core/src/tables/xml.rs
// Summary: Table document as a small XML tree; element names are normalised column names.

use std::fmt::Write as _;

use super::TableDocument;
use crate::format::{json_header, NumberLocale};

pub(crate) fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// XML names may not start with a digit.
fn element_name(label: &str) -> String {
    let key = json_header(label);
    match key.chars().next() {
        Some(c) if c.is_ascii_alphabetic() => key,
        _ => format!("_{key}"),
    }
}

pub fn write_xml(doc: &TableDocument) -> String {
    let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<export>\n");
    for table in doc.tables() {
        let names: Vec<String> = table.columns().iter().map(|c| element_name(c)).collect();
        let _ = writeln!(out, "  <table name=\"{}\">", escape(table.name()));
        for row in table.rows() {
            out.push_str("    <row>");
            for (name, cell) in names.iter().zip(row) {
                if cell.is_empty() {
                    let _ = write!(out, "<{name}/>");
                } else {
                    let _ = write!(out, "<{name}>{}</{name}>", escape(&cell.to_text(NumberLocale::English)));
                }
            }
            out.push_str("</row>\n");
        }
        out.push_str("  </table>\n");
    }
    out.push_str("</export>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cells;
    use crate::tables::Table;

    #[test]
    fn escapes_and_names() {
        let mut t = Table::new("tags", &["Key", "1st value"]);
        t.add_row(cells!["a<b", f64::NAN]).unwrap();
        let mut doc = TableDocument::new();
        doc.push(t);
        let xml = write_xml(&doc);
        assert!(xml.contains("<key>a&lt;b</key><_1st_value/>"));
    }
}
