// File: crates/avexport-core/src/engines/idet.rs
// Summary: Interlace detection counts and the derived field-order verdict.

use std::rc::Rc;

use super::{table, tabular_document};
use crate::artifact::GraphicArtifact;
use crate::cell::Cell;
use crate::config::ExportContext;
use crate::engine::{
    tabular_from_singles, RendererEngine, ReportRendererEngine, SingleTabularDocumentExporter, TableRendererEngine,
    TabularRendererEngine,
};
use crate::error::ExportResult;
use crate::model::{AnalysisResult, IdetCounts, IdetSummary};
use crate::report::{ReportCategory, ReportEntry, ReportSection};
use crate::tables::TableDocument;
use crate::tabular::{TabularDialect, TabularDocument};

const NAME: &str = "video-idet";
const HEADER: [&str; 6] = ["Detection", "TFF", "BFF", "Progressive", "Undetermined", "Total"];
const REPEATED_HEADER: [&str; 3] = ["Neither", "Top", "Bottom"];

pub struct InterlaceEngine;

fn summary(result: &AnalysisResult) -> Option<&IdetSummary> {
    result.filters.as_ref().and_then(|f| f.idet.as_ref())
}

fn rows(result: &AnalysisResult) -> Vec<Vec<Cell>> {
    let Some(s) = summary(result) else {
        return Vec::new();
    };
    [("single", &s.single), ("multi", &s.multi)]
        .into_iter()
        .map(|(label, c)| crate::cells![label, c.tff, c.bff, c.progressive, c.undetermined, c.total()])
        .collect()
}

/// Field order by majority of the multi-frame detection.
pub fn field_order(counts: &IdetCounts) -> &'static str {
    let interlaced = counts.tff + counts.bff;
    if counts.total() == 0 || counts.undetermined > interlaced.max(counts.progressive) {
        "undetermined"
    } else if counts.progressive >= interlaced {
        "progressive"
    } else if counts.tff >= counts.bff {
        "interlaced, top field first"
    } else {
        "interlaced, bottom field first"
    }
}

impl RendererEngine for InterlaceEngine {
    fn name(&self) -> &'static str {
        NAME
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

impl TabularRendererEngine for InterlaceEngine {
    fn to_tabular(
        &self,
        result: &AnalysisResult,
        dialect: TabularDialect,
        ctx: &ExportContext,
    ) -> ExportResult<Vec<TabularDocument>> {
        tabular_from_singles(self, result, dialect, ctx)
    }
}

impl SingleTabularDocumentExporter for InterlaceEngine {
    fn tabular_names(&self) -> &'static [&'static str] {
        &[NAME]
    }

    fn to_single_tabular(
        &self,
        result: &AnalysisResult,
        _name: &str,
        dialect: TabularDialect,
        _ctx: &ExportContext,
    ) -> ExportResult<Option<TabularDocument>> {
        tabular_document(NAME, dialect, &HEADER, rows(result))
    }
}

impl TableRendererEngine for InterlaceEngine {
    fn add_tables(&self, result: &AnalysisResult, doc: &mut TableDocument, _ctx: &ExportContext) -> ExportResult<()> {
        doc.push(table("Interlace detection", &HEADER, rows(result))?);
        let repeated = summary(result)
            .map(|s| vec![crate::cells![s.repeated_neither, s.repeated_top, s.repeated_bottom]])
            .unwrap_or_default();
        doc.push(table("Repeated fields", &REPEATED_HEADER, repeated)?);
        Ok(())
    }
}

impl ReportRendererEngine for InterlaceEngine {
    fn to_report(
        &self,
        result: &AnalysisResult,
        _graphics: &[Rc<GraphicArtifact>],
        ctx: &ExportContext,
    ) -> ExportResult<Option<ReportSection>> {
        let Some(s) = summary(result) else {
            return Ok(None);
        };
        let locale = ctx.locale();
        let m = &s.multi;
        let mut section = ReportSection::new(ReportCategory::Video, "Interlace detection");
        section.push(ReportEntry::key_value("Field order", field_order(m)));
        section.push(ReportEntry::ratio("Progressive frames", m.progressive, m.total(), locale));
        section.push(ReportEntry::ratio("Top field first frames", m.tff, m.total(), locale));
        section.push(ReportEntry::ratio("Bottom field first frames", m.bff, m.total(), locale));
        section.push(ReportEntry::ratio("Undetermined frames", m.undetermined, m.total(), locale));
        let repeated_total = s.repeated_neither + s.repeated_top + s.repeated_bottom;
        section.push(ReportEntry::ratio("Repeated top fields", s.repeated_top, repeated_total, locale));
        section.push(ReportEntry::ratio("Repeated bottom fields", s.repeated_bottom, repeated_total, locale));
        Ok(Some(section))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verdicts() {
        let c = |tff, bff, progressive, undetermined| IdetCounts { tff, bff, progressive, undetermined };
        assert_eq!(field_order(&c(0, 0, 0, 0)), "undetermined");
        assert_eq!(field_order(&c(2, 1, 90, 7)), "progressive");
        assert_eq!(field_order(&c(80, 5, 10, 5)), "interlaced, top field first");
        assert_eq!(field_order(&c(5, 80, 10, 5)), "interlaced, bottom field first");
        assert_eq!(field_order(&c(5, 5, 5, 50)), "undetermined");
    }
}
