// File: crates/avexport-core/src/engines/range_events.rs
// Summary: Interval detectors (silence, black, freeze) as listings, tables and event reports.

use std::rc::Rc;

use super::{statistics, table, tabular_document};
use crate::artifact::GraphicArtifact;
use crate::cell::Cell;
use crate::config::ExportContext;
use crate::engine::{
    tabular_from_singles, RendererEngine, ReportRendererEngine, SingleTabularDocumentExporter, TableRendererEngine,
    TabularRendererEngine,
};
use crate::error::ExportResult;
use crate::format::Unit;
use crate::model::{AnalysisResult, FilterMetrics, TimeRangeEvent};
use crate::report::{ReportCategory, ReportEntry, ReportEvent, ReportSection};
use crate::tables::TableDocument;
use crate::tabular::{TabularDialect, TabularDocument};

const HEADER: [&str; 3] = ["Start (s)", "End (s)", "Duration (s)"];

/// One interval detector; instances differ only by their input stream and wording.
pub struct RangeEventEngine {
    name: &'static str,
    names: &'static [&'static str],
    title: &'static str,
    label: &'static str,
    category: ReportCategory,
    select: fn(&FilterMetrics) -> &[TimeRangeEvent],
}

impl RangeEventEngine {
    pub fn silence() -> Self {
        Self {
            name: "audio-silence-detect",
            names: &["audio-silence-detect"],
            title: "Silence",
            label: "silence",
            category: ReportCategory::Audio,
            select: |f| f.silencedetect.as_slice(),
        }
    }

    pub fn black() -> Self {
        Self {
            name: "video-black-detect",
            names: &["video-black-detect"],
            title: "Black frames",
            label: "black",
            category: ReportCategory::Video,
            select: |f| f.blackdetect.as_slice(),
        }
    }

    pub fn freeze() -> Self {
        Self {
            name: "video-freeze-detect",
            names: &["video-freeze-detect"],
            title: "Frozen frames",
            label: "freeze",
            category: ReportCategory::Video,
            select: |f| f.freezedetect.as_slice(),
        }
    }

    fn events<'a>(&self, result: &'a AnalysisResult) -> &'a [TimeRangeEvent] {
        result.filters.as_ref().map_or(&[], |f| (self.select)(f))
    }

    fn rows(&self, result: &AnalysisResult) -> Vec<Vec<Cell>> {
        self.events(result).iter().map(|e| crate::cells![e.start, e.end, e.duration()]).collect()
    }

    fn report_event(&self, e: &TimeRangeEvent) -> ReportEvent {
        ReportEvent::new(e.start, e.end, self.label)
    }
}

impl RendererEngine for RangeEventEngine {
    fn name(&self) -> &'static str {
        self.name
    }
    fn tabular(&self) -> Option<&dyn TabularRendererEngine> {
        Some(self)
    }
    fn single_tabular(&self) -> Option<&dyn SingleTabularDocumentExporter> {
        Some(self)
    }
    fn table(&self) -> Option<&dyn TableRendererEngine> {
        Some(self)
    }
    fn report(&self) -> Option<&dyn ReportRendererEngine> {
        Some(self)
    }
}

impl TabularRendererEngine for RangeEventEngine {
    fn to_tabular(
        &self,
        result: &AnalysisResult,
        dialect: TabularDialect,
        ctx: &ExportContext,
    ) -> ExportResult<Vec<TabularDocument>> {
        tabular_from_singles(self, result, dialect, ctx)
    }
}

impl SingleTabularDocumentExporter for RangeEventEngine {
    fn tabular_names(&self) -> &'static [&'static str] {
        self.names
    }

    fn to_single_tabular(
        &self,
        result: &AnalysisResult,
        _name: &str,
        dialect: TabularDialect,
        _ctx: &ExportContext,
    ) -> ExportResult<Option<TabularDocument>> {
        tabular_document(self.name, dialect, &HEADER, self.rows(result))
    }
}

impl TableRendererEngine for RangeEventEngine {
    fn add_tables(&self, result: &AnalysisResult, doc: &mut TableDocument, _ctx: &ExportContext) -> ExportResult<()> {
        doc.push(table(self.title, &HEADER, self.rows(result))?);
        Ok(())
    }
}

impl ReportRendererEngine for RangeEventEngine {
    fn to_report(
        &self,
        result: &AnalysisResult,
        _graphics: &[Rc<GraphicArtifact>],
        ctx: &ExportContext,
    ) -> ExportResult<Option<ReportSection>> {
        let events = self.events(result);
        if events.is_empty() {
            return Ok(None);
        }
        let locale = ctx.locale();
        let total: f64 = events.iter().map(TimeRangeEvent::duration).filter(|d| !d.is_nan()).sum();
        let longest = events
            .iter()
            .filter(|e| !e.duration().is_nan())
            .max_by(|a, b| a.duration().total_cmp(&b.duration()));

        let mut section = ReportSection::new(self.category, self.title);
        section.push(ReportEntry::numeric("Events", events.len() as f64, Unit::EVENT, locale));
        section.push(ReportEntry::numeric("Total duration", total, Unit::SECOND, locale));
        section.push(ReportEntry::Statistics(statistics(
            "Duration",
            Unit::SECOND,
            events.iter().map(TimeRangeEvent::duration),
            ctx,
        )));
        if let Some(e) = longest {
            section.push(ReportEntry::Event { key: "Longest".into(), event: self.report_event(e) });
        }
        let max_rows = ctx.config.event_table_max_rows;
        section.push(ReportEntry::EventTable {
            key: "Events".into(),
            events: events.iter().take(max_rows).map(|e| self.report_event(e)).collect(),
            omitted: events.len().saturating_sub(max_rows),
        });
        Ok(Some(section))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_ended_events_have_no_duration_cell() {
        let mut r = AnalysisResult::new("a.wav");
        r.filters = Some(FilterMetrics {
            silencedetect: vec![
                TimeRangeEvent::new(1.0, 2.5),
                TimeRangeEvent { start: 9.0, end: None, duration: None },
            ],
            ..FilterMetrics::default()
        });
        let engine = RangeEventEngine::silence();
        let doc = engine
            .to_single_tabular(&r, "audio-silence-detect", TabularDialect::Csv, &ExportContext::default())
            .unwrap()
            .unwrap();
        assert_eq!(doc.rows()[0], vec!["1", "2.5", "1.5"]);
        assert_eq!(doc.rows()[1], vec!["9", "", ""]);
    }

    #[test]
    fn report_caps_event_table() {
        let mut r = AnalysisResult::new("a.mkv");
        r.filters = Some(FilterMetrics {
            blackdetect: (0..5).map(|i| TimeRangeEvent::new(i as f64, i as f64 + 0.5)).collect(),
            ..FilterMetrics::default()
        });
        let mut ctx = ExportContext::default();
        ctx.config.event_table_max_rows = 2;
        let section = RangeEventEngine::black().to_report(&r, &[], &ctx).unwrap().unwrap();
        let table = section.entries.iter().find(|e| matches!(e, ReportEntry::EventTable { .. })).unwrap();
        match table {
            ReportEntry::EventTable { events, omitted, .. } => {
                assert_eq!(events.len(), 2);
                assert_eq!(*omitted, 3);
            }
            _ => unreachable!(),
        }
    }
}
