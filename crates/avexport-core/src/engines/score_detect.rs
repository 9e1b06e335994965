// File: crates/avexport-core/src/engines/score_detect.rs
// Summary: Per-frame score detectors (blockiness, blurriness) as listings, charts and statistics.

use std::rc::Rc;

use avexport_chart::{theme, Series, TimedDataGraphic};

use super::{statistics, table, tabular_document, time_axis};
use crate::artifact::GraphicArtifact;
use crate::cell::Cell;
use crate::config::ExportContext;
use crate::engine::{
    automatic_axis, find_graphic, render_graphic, tabular_from_singles, GraphicRendererEngine, RendererEngine,
    ReportRendererEngine, SingleGraphicExporter, SingleTabularDocumentExporter, TableRendererEngine,
    TabularRendererEngine,
};
use crate::error::ExportResult;
use crate::format::Unit;
use crate::model::{AnalysisResult, FilterMetrics, ScoreFrame};
use crate::report::{ReportCategory, ReportEntry, ReportSection};
use crate::tables::TableDocument;
use crate::tabular::{TabularDialect, TabularDocument};

/// One score detector; the two instances differ by input stream and wording.
pub struct ScoreEngine {
    name: &'static str,
    names: &'static [&'static str],
    title: &'static str,
    label: &'static str,
    header: [&'static str; 3],
    select: fn(&FilterMetrics) -> &[ScoreFrame],
}

impl ScoreEngine {
    pub fn block() -> Self {
        Self {
            name: "video-block-detect",
            names: &["video-block-detect"],
            title: "Blockiness",
            label: "Blockiness",
            header: ["Frame", "Time (s)", "Blockiness"],
            select: |f| f.blockdetect.as_slice(),
        }
    }

    pub fn blur() -> Self {
        Self {
            name: "video-blur-detect",
            names: &["video-blur-detect"],
            title: "Blurriness",
            label: "Blurriness",
            header: ["Frame", "Time (s)", "Blurriness"],
            select: |f| f.blurdetect.as_slice(),
        }
    }

    fn frames<'a>(&self, result: &'a AnalysisResult) -> &'a [ScoreFrame] {
        result.filters.as_ref().map_or(&[], |f| (self.select)(f))
    }

    fn rows(&self, result: &AnalysisResult) -> Vec<Vec<Cell>> {
        self.frames(result).iter().map(|f| crate::cells![f.frame, f.pts_time, f.value]).collect()
    }

    fn build_graphic(&self, result: &AnalysisResult) -> ExportResult<Option<TimedDataGraphic>> {
        let frames = self.frames(result);
        let values: Vec<f64> = frames.iter().map(|f| f.value).collect();
        let Some(axis) = automatic_axis(self.label, &values, 1.0)? else {
            return Ok(None);
        };
        let mut g = TimedDataGraphic::new(time_axis(frames, |f| f.pts_time), axis);
        g.add_series(Series::line(self.label, theme::series_color(0), values))?;
        Ok(Some(g))
    }
}

impl RendererEngine for ScoreEngine {
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
    fn graphic(&self) -> Option<&dyn GraphicRendererEngine> {
        Some(self)
    }
    fn single_graphic(&self) -> Option<&dyn SingleGraphicExporter> {
        Some(self)
    }
    fn report(&self) -> Option<&dyn ReportRendererEngine> {
        Some(self)
    }
}

impl TabularRendererEngine for ScoreEngine {
    fn to_tabular(
        &self,
        result: &AnalysisResult,
        dialect: TabularDialect,
        ctx: &ExportContext,
    ) -> ExportResult<Vec<TabularDocument>> {
        tabular_from_singles(self, result, dialect, ctx)
    }
}

impl SingleTabularDocumentExporter for ScoreEngine {
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
        tabular_document(self.name, dialect, &self.header, self.rows(result))
    }
}

impl TableRendererEngine for ScoreEngine {
    fn add_tables(&self, result: &AnalysisResult, doc: &mut TableDocument, _ctx: &ExportContext) -> ExportResult<()> {
        doc.push(table(self.title, &self.header, self.rows(result))?);
        Ok(())
    }
}

impl GraphicRendererEngine for ScoreEngine {
    fn to_graphics(&self, result: &AnalysisResult, ctx: &ExportContext) -> ExportResult<Vec<GraphicArtifact>> {
        match self.build_graphic(result)? {
            Some(g) => Ok(vec![render_graphic(self.name, &g, ctx)?]),
            None => Ok(Vec::new()),
        }
    }
}

impl SingleGraphicExporter for ScoreEngine {
    fn graphic_names(&self) -> &'static [&'static str] {
        self.names
    }

    fn to_single_graphic(
        &self,
        result: &AnalysisResult,
        name: &str,
        ctx: &ExportContext,
    ) -> ExportResult<Option<GraphicArtifact>> {
        if name != self.name {
            return Ok(None);
        }
        Ok(self.to_graphics(result, ctx)?.pop())
    }
}

impl ReportRendererEngine for ScoreEngine {
    fn to_report(
        &self,
        result: &AnalysisResult,
        graphics: &[Rc<GraphicArtifact>],
        ctx: &ExportContext,
    ) -> ExportResult<Option<ReportSection>> {
        let frames = self.frames(result);
        if frames.is_empty() {
            return Ok(None);
        }
        let mut section = ReportSection::new(ReportCategory::Video, self.title);
        section.push(ReportEntry::Statistics(statistics(self.label, Unit::NONE, frames.iter().map(|f| f.value), ctx)));
        if let Some(g) = find_graphic(graphics, self.name) {
            section.push(ReportEntry::Graphic(Rc::clone(g)));
        }
        Ok(Some(section))
    }
}
