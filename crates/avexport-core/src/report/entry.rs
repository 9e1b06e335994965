// File: crates/avexport-core/src/report/entry.rs
// Summary: Report entry variants; each knows its emptiness, HTML tree and JSON fragment.

use std::rc::Rc;

use serde_json::{json, Map, Number, Value};

use super::dom::DomNode;
use crate::artifact::{GraphicArtifact, ImageArtifact};
use crate::format::{format_fixed, format_number, format_timecode, json_header, pin_infinite, NumberLocale, Unit};
use crate::stats::{StatValue, StatisticsUnitValueReportEntry};

/// A labelled time interval; an open `end` lasted to the end of the media.
#[derive(Clone, Debug, PartialEq)]
pub struct ReportEvent {
    pub start: f64,
    pub end: Option<f64>,
    pub label: String,
}

impl ReportEvent {
    pub fn new(start: f64, end: Option<f64>, label: impl Into<String>) -> Self {
        Self { start, end, label: label.into() }
    }

    pub fn duration(&self) -> Option<f64> {
        self.end.map(|e| e - self.start)
    }

    fn to_json(&self) -> Value {
        json!({
            "start": number(self.start),
            "end": self.end.map_or(Value::Null, number),
            "label": self.label,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ReportEntry {
    KeyValue { key: String, value: String },
    KeyValueList { key: String, values: Vec<String> },
    Numeric { key: String, value: f64, unit: Unit, formatted: String },
    Ratio { key: String, part: u64, whole: u64, formatted: String },
    Resolution { key: String, width: u32, height: u32 },
    Event { key: String, event: ReportEvent },
    /// `omitted` counts events dropped past the configured row limit.
    EventTable { key: String, events: Vec<ReportEvent>, omitted: usize },
    Statistics(StatisticsUnitValueReportEntry),
    Graphic(Rc<GraphicArtifact>),
    Image(Rc<ImageArtifact>),
    Subset { title: String, entries: Vec<ReportEntry> },
}

fn number(v: f64) -> Value {
    Number::from_f64(pin_infinite(v)).map_or(Value::Null, Value::Number)
}

impl ReportEntry {
    pub fn key_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        ReportEntry::KeyValue { key: key.into(), value: value.into() }
    }

    pub fn numeric(key: impl Into<String>, value: f64, unit: Unit, locale: NumberLocale) -> Self {
        let formatted = unit.with_value(&format_number(value, locale), value > 1.0);
        ReportEntry::Numeric { key: key.into(), value, unit, formatted }
    }

    pub fn ratio(key: impl Into<String>, part: u64, whole: u64, locale: NumberLocale) -> Self {
        let formatted = if whole == 0 {
            String::new()
        } else {
            let pct = part as f64 * 100.0 / whole as f64;
            format!("{part} / {whole} ({} %)", format_fixed(pct, 1, locale))
        };
        ReportEntry::Ratio { key: key.into(), part, whole, formatted }
    }

    pub fn key(&self) -> &str {
        match self {
            ReportEntry::KeyValue { key, .. }
            | ReportEntry::KeyValueList { key, .. }
            | ReportEntry::Numeric { key, .. }
            | ReportEntry::Ratio { key, .. }
            | ReportEntry::Resolution { key, .. }
            | ReportEntry::Event { key, .. }
            | ReportEntry::EventTable { key, .. } => key,
            ReportEntry::Statistics(s) => &s.key,
            ReportEntry::Graphic(g) | ReportEntry::Image(g) => &g.name,
            ReportEntry::Subset { title, .. } => title,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            ReportEntry::KeyValue { value, .. } => value.is_empty(),
            ReportEntry::KeyValueList { values, .. } => values.is_empty(),
            ReportEntry::Numeric { value, .. } => value.is_nan(),
            ReportEntry::Ratio { whole, .. } => *whole == 0,
            ReportEntry::Resolution { width, height, .. } => *width == 0 || *height == 0,
            ReportEntry::Event { event, .. } => event.start.is_nan(),
            ReportEntry::EventTable { events, .. } => events.is_empty(),
            ReportEntry::Statistics(s) => s.is_empty(),
            ReportEntry::Graphic(g) | ReportEntry::Image(g) => g.bytes.is_empty(),
            ReportEntry::Subset { entries, .. } => entries.iter().all(ReportEntry::is_empty),
        }
    }

    /// Whether the entry is drawn at all. Empty statistics still show as "no data".
    pub fn is_rendered(&self) -> bool {
        matches!(self, ReportEntry::Statistics(_)) || !self.is_empty()
    }

    pub fn to_dom(&self) -> DomNode {
        match self {
            ReportEntry::KeyValue { key, value } => key_value_row(key, DomNode::text(value)),
            ReportEntry::KeyValueList { key, values } => {
                let items = values.iter().map(|v| DomNode::with_text("li", v.clone()));
                key_value_row(key, DomNode::element("ul").children(items))
            }
            ReportEntry::Numeric { key, formatted, .. } | ReportEntry::Ratio { key, formatted, .. } => {
                key_value_row(key, DomNode::text(formatted))
            }
            ReportEntry::Resolution { key, width, height } => {
                key_value_row(key, DomNode::text(format!("{width} × {height}")))
            }
            ReportEntry::Event { key, event } => key_value_row(key, DomNode::text(describe_event(event))),
            ReportEntry::EventTable { key, events, omitted } => event_table(key, events, *omitted),
            ReportEntry::Statistics(s) => statistics(s),
            ReportEntry::Graphic(g) | ReportEntry::Image(g) => DomNode::element("figure")
                .child(
                    DomNode::element("img")
                        .attr("src", g.data_uri())
                        .attr("width", g.width.to_string())
                        .attr("height", g.height.to_string())
                        .attr("alt", g.name.clone()),
                )
                .child(DomNode::with_text("figcaption", g.name.clone())),
            ReportEntry::Subset { title, entries } => DomNode::element("div")
                .class("subset")
                .child(DomNode::with_text("h4", title.clone()))
                .children(entries.iter().filter(|e| e.is_rendered()).map(ReportEntry::to_dom)),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            ReportEntry::KeyValue { value, .. } => Value::String(value.clone()),
            ReportEntry::KeyValueList { values, .. } => json!(values),
            ReportEntry::Numeric { value, unit, .. } => json!({ "value": number(*value), "unit": unit.plural }),
            ReportEntry::Ratio { part, whole, .. } => json!({ "part": part, "whole": whole }),
            ReportEntry::Resolution { width, height, .. } => json!({ "width": width, "height": height }),
            ReportEntry::Event { event, .. } => event.to_json(),
            ReportEntry::EventTable { events, omitted, .. } => json!({
                "events": events.iter().map(ReportEvent::to_json).collect::<Vec<_>>(),
                "omitted": omitted,
            }),
            ReportEntry::Statistics(s) => match &s.values {
                None => Value::Null,
                Some(v) => json!({
                    "unit": s.unit.plural,
                    "count": v.count,
                    "min": number(v.min.value),
                    "max": number(v.max.value),
                    "median": number(v.median.value),
                    "average": number(v.average.value),
                }),
            },
            ReportEntry::Graphic(g) | ReportEntry::Image(g) => json!({
                "name": g.name,
                "width": g.width,
                "height": g.height,
                "content_type": g.content_type.mime(),
            }),
            ReportEntry::Subset { entries, .. } => Value::Object(entries_to_json(entries)),
        }
    }
}

/// Non-empty entries as one object keyed by normalised entry keys.
/// A key seen again gets a `_2`, `_3`, ... suffix so no entry is overwritten.
pub(crate) fn entries_to_json(entries: &[ReportEntry]) -> Map<String, Value> {
    let mut out = Map::new();
    for e in entries.iter().filter(|e| !e.is_empty()) {
        let base = json_header(e.key());
        let mut key = base.clone();
        let mut n = 1;
        while out.contains_key(&key) {
            n += 1;
            key = format!("{base}_{n}");
        }
        out.insert(key, e.to_json());
    }
    out
}

fn key_value_row(key: &str, value: DomNode) -> DomNode {
    DomNode::element("div")
        .class("entry")
        .child(DomNode::with_text("span", key).class("key"))
        .child(DomNode::element("span").class("value").child(value))
}

fn describe_event(event: &ReportEvent) -> String {
    match event.end {
        Some(end) => format!("{} – {} {}", format_timecode(event.start), format_timecode(end), event.label),
        None => format!("{} – end {}", format_timecode(event.start), event.label),
    }
}

fn event_table(key: &str, events: &[ReportEvent], omitted: usize) -> DomNode {
    let header = DomNode::element("tr").children(
        ["Start", "End", "Duration", "Event"].into_iter().map(|h| DomNode::with_text("th", h)),
    );
    let rows = events.iter().map(|e| {
        let duration = e.duration().map(|d| format!("{d:.3} s")).unwrap_or_default();
        DomNode::element("tr").children([
            DomNode::with_text("td", format_timecode(e.start)),
            DomNode::with_text("td", e.end.map(format_timecode).unwrap_or_default()),
            DomNode::with_text("td", duration),
            DomNode::with_text("td", e.label.clone()),
        ])
    });
    let mut node = DomNode::element("div")
        .class("events")
        .child(DomNode::with_text("h4", key))
        .child(DomNode::element("table").child(header).children(rows));
    if omitted > 0 {
        node = node.child(DomNode::with_text("p", format!("{omitted} more events not shown")).class("note"));
    }
    node
}

fn statistics(s: &StatisticsUnitValueReportEntry) -> DomNode {
    let Some(v) = &s.values else {
        return key_value_row(&s.key, DomNode::text("no data"));
    };
    let cell = |label: &'static str, sv: &StatValue| {
        DomNode::element("td")
            .child(DomNode::with_text("span", label).class("stat"))
            .child(DomNode::text(sv.display(s.unit)))
    };
    DomNode::element("div").class("entry").child(DomNode::with_text("span", s.key.clone()).class("key")).child(
        DomNode::element("table").class("stats").child(DomNode::element("tr").children([
            cell("min ", &v.min),
            cell("median ", &v.median),
            cell("average ", &v.average),
            cell("max ", &v.max),
        ])),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emptiness_per_variant() {
        assert!(ReportEntry::key_value("k", "").is_empty());
        assert!(ReportEntry::numeric("n", f64::NAN, Unit::NONE, NumberLocale::English).is_empty());
        assert!(ReportEntry::ratio("r", 0, 0, NumberLocale::English).is_empty());
        let subset = ReportEntry::Subset { title: "s".into(), entries: vec![ReportEntry::key_value("k", "")] };
        assert!(subset.is_empty());
        let stats = StatisticsUnitValueReportEntry::empty("st", Unit::FRAME);
        assert!(ReportEntry::Statistics(stats.clone()).is_empty());
        assert!(ReportEntry::Statistics(stats).is_rendered());
    }

    #[test]
    fn empty_statistics_render_no_data() {
        let e = ReportEntry::Statistics(StatisticsUnitValueReportEntry::empty("Momentary", Unit::LUFS));
        assert!(e.to_dom().to_html().contains("no data"));
        assert_eq!(e.to_json(), Value::Null);
    }

    #[test]
    fn colliding_keys_keep_every_entry() {
        let entries = vec![
            ReportEntry::numeric("Peak", -2.6, Unit::DBTP, NumberLocale::English),
            ReportEntry::key_value("Skipped", ""),
            ReportEntry::numeric("peak", -3.0, Unit::DBTP, NumberLocale::English),
            ReportEntry::key_value("Peak", "x"),
        ];
        let map = entries_to_json(&entries);
        assert_eq!(map.len(), 3);
        assert_eq!(map["peak"], json!({ "value": -2.6, "unit": "dBTP" }));
        assert_eq!(map["peak_2"], json!({ "value": -3.0, "unit": "dBTP" }));
        assert_eq!(map["peak_3"], json!("x"));
    }

    #[test]
    fn ratio_and_numeric_text() {
        let r = ReportEntry::ratio("Progressive", 1, 4, NumberLocale::French);
        assert!(r.to_dom().to_html().contains("1 / 4 (25,0 %)"));
        let n = ReportEntry::numeric("Integrated", f64::NEG_INFINITY, Unit::LUFS, NumberLocale::English);
        assert_eq!(n.to_json(), json!({ "value": -144.0, "unit": "LUFS" }));
    }

    #[test]
    fn subset_json_uses_normalised_keys() {
        let s = ReportEntry::Subset {
            title: "Stream #0".into(),
            entries: vec![ReportEntry::key_value("Codec name", "h264"), ReportEntry::key_value("Profile", "")],
        };
        assert_eq!(s.to_json(), json!({ "codec_name": "h264" }));
    }
}
