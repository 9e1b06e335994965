// File: crates/avexport-core/src/report/mod.rs
// Summary: Report sections in fixed category order, rendered as a self-contained HTML page and as JSON.

mod dom;
mod entry;
mod page;

use serde_json::{json, Map, Value};

pub use dom::DomNode;
pub use entry::{ReportEntry, ReportEvent};
pub use page::render_html;

use crate::format::json_header;

/// Display order of report sections; sections are stable within a category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ReportCategory {
    Summary,
    Audio,
    Video,
    Container,
    About,
}

impl ReportCategory {
    pub const ALL: [ReportCategory; 5] = [
        ReportCategory::Summary,
        ReportCategory::Audio,
        ReportCategory::Video,
        ReportCategory::Container,
        ReportCategory::About,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ReportCategory::Summary => "Summary",
            ReportCategory::Audio => "Audio",
            ReportCategory::Video => "Video",
            ReportCategory::Container => "Container",
            ReportCategory::About => "About",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ReportSection {
    pub category: ReportCategory,
    pub title: String,
    pub entries: Vec<ReportEntry>,
}

impl ReportSection {
    pub fn new(category: ReportCategory, title: impl Into<String>) -> Self {
        Self { category, title: title.into(), entries: Vec::new() }
    }

    pub fn push(&mut self, entry: ReportEntry) {
        self.entries.push(entry);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(ReportEntry::is_empty)
    }

    pub fn to_dom(&self) -> DomNode {
        DomNode::element("div")
            .class("section-body")
            .children(self.entries.iter().filter(|e| e.is_rendered()).map(ReportEntry::to_dom))
    }

    pub fn to_json(&self) -> Value {
        json!({
            "category": json_header(self.category.title()),
            "title": self.title,
            "entries": Value::Object(entry::entries_to_json(&self.entries)),
        })
    }
}

/// Accumulates sections from every report-capable engine of one export.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReportDocument {
    pub title: String,
    sections: Vec<ReportSection>,
}

impl ReportDocument {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(), sections: Vec::new() }
    }

    /// Empty sections are discarded.
    pub fn push(&mut self, section: ReportSection) {
        if !section.is_empty() {
            self.sections.push(section);
        }
    }

    /// Sections in category order, engine order kept within a category.
    pub fn sections(&self) -> Vec<&ReportSection> {
        let mut out: Vec<&ReportSection> = self.sections.iter().collect();
        out.sort_by_key(|s| s.category);
        out
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn to_json(&self) -> Value {
        let mut root = Map::new();
        root.insert("title".into(), Value::String(self.title.clone()));
        root.insert("sections".into(), Value::Array(self.sections().into_iter().map(ReportSection::to_json).collect()));
        Value::Object(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(cat: ReportCategory, title: &str, value: &str) -> ReportSection {
        let mut s = ReportSection::new(cat, title);
        s.push(ReportEntry::key_value("k", value));
        s
    }

    #[test]
    fn sections_follow_category_order_and_drop_empty() {
        let mut doc = ReportDocument::new("clip");
        doc.push(section(ReportCategory::About, "about", "x"));
        doc.push(section(ReportCategory::Audio, "loudness", "x"));
        doc.push(section(ReportCategory::Video, "empty", ""));
        doc.push(section(ReportCategory::Summary, "summary", "x"));
        doc.push(section(ReportCategory::Audio, "phase", "x"));
        let titles: Vec<&str> = doc.sections().iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["summary", "loudness", "phase", "about"]);
    }

    #[test]
    fn json_lists_sections() {
        let mut doc = ReportDocument::new("clip");
        doc.push(section(ReportCategory::Container, "GOP", "12"));
        let v = doc.to_json();
        assert_eq!(v["sections"][0]["category"], "container");
        assert_eq!(v["sections"][0]["entries"]["k"], "12");
    }
}
