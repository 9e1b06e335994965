// File: crates/avexport-core/src/engines/phase_meter.rs
// Summary: Stereo phase listing and chart; out-of-phase share in the report.

use std::rc::Rc;

use avexport_chart::{theme, RangeAxis, Series, TimedDataGraphic};

use super::{statistics, table, tabular_document, time_axis};
use crate::artifact::GraphicArtifact;
use crate::cell::Cell;
use crate::config::ExportContext;
use crate::engine::{
    find_graphic, render_prepared, render_prepared_one, tabular_from_singles, GraphicMaker, GraphicRendererEngine,
    PreparedGraphics, RendererEngine, ReportRendererEngine, SingleGraphicExporter, SingleTabularDocumentExporter,
    TableRendererEngine, TabularRendererEngine,
};
use crate::error::ExportResult;
use crate::format::Unit;
use crate::model::{AnalysisResult, PhaseFrame};
use crate::report::{ReportCategory, ReportEntry, ReportSection};
use crate::tables::TableDocument;
use crate::tabular::{TabularDialect, TabularDocument};

const NAME: &str = "audio-phase-meter";
const HEADER: [&str; 3] = ["Frame", "Time (s)", "Phase"];

pub struct PhaseMeterEngine;

fn frames(result: &AnalysisResult) -> &[PhaseFrame] {
    result.filters.as_ref().map_or(&[], |f| f.aphasemeter.as_slice())
}

fn rows(result: &AnalysisResult) -> Vec<Vec<Cell>> {
    frames(result).iter().map(|f| crate::cells![f.frame, f.pts_time, f.phase]).collect()
}

pub struct PreparedPhase {
    times: Rc<[f64]>,
    phase: Vec<f64>,
}

fn phase_graphic(p: &PreparedPhase, _ctx: &ExportContext) -> ExportResult<Option<TimedDataGraphic>> {
    // Phase correlation always spans -1..1.
    let mut g = TimedDataGraphic::new(p.times.clone(), RangeAxis::fixed("Phase", 0.0, 1, 1.0));
    g.add_series(Series::line("Phase", theme::series_color(0), p.phase.clone()))?;
    Ok(Some(g))
}

const MAKERS: &[GraphicMaker<PreparedPhase>] = &[GraphicMaker { name: NAME, make: phase_graphic }];

impl PreparedGraphics for PhaseMeterEngine {
    type Prepared = PreparedPhase;

    fn prepare(&self, result: &AnalysisResult, _ctx: &ExportContext) -> ExportResult<Option<PreparedPhase>> {
        let frames = frames(result);
        if frames.is_empty() {
            return Ok(None);
        }
        Ok(Some(PreparedPhase {
            times: time_axis(frames, |f| f.pts_time),
            phase: frames.iter().map(|f| f.phase).collect(),
        }))
    }

    fn makers(&self) -> &'static [GraphicMaker<PreparedPhase>] {
        MAKERS
    }
}

impl RendererEngine for PhaseMeterEngine {
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

impl TabularRendererEngine for PhaseMeterEngine {
    fn to_tabular(
        &self,
        result: &AnalysisResult,
        dialect: TabularDialect,
        ctx: &ExportContext,
    ) -> ExportResult<Vec<TabularDocument>> {
        tabular_from_singles(self, result, dialect, ctx)
    }
}

impl SingleTabularDocumentExporter for PhaseMeterEngine {
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

impl TableRendererEngine for PhaseMeterEngine {
    fn add_tables(&self, result: &AnalysisResult, doc: &mut TableDocument, _ctx: &ExportContext) -> ExportResult<()> {
        doc.push(table("Phase meter", &HEADER, rows(result))?);
        Ok(())
    }
}

impl GraphicRendererEngine for PhaseMeterEngine {
    fn to_graphics(&self, result: &AnalysisResult, ctx: &ExportContext) -> ExportResult<Vec<GraphicArtifact>> {
        render_prepared(self, result, ctx)
    }
}

impl SingleGraphicExporter for PhaseMeterEngine {
    fn graphic_names(&self) -> &'static [&'static str] {
        &[NAME]
    }

    fn to_single_graphic(
        &self,
        result: &AnalysisResult,
        name: &str,
        ctx: &ExportContext,
    ) -> ExportResult<Option<GraphicArtifact>> {
        render_prepared_one(self, result, name, ctx)
    }
}

impl ReportRendererEngine for PhaseMeterEngine {
    fn to_report(
        &self,
        result: &AnalysisResult,
        graphics: &[Rc<GraphicArtifact>],
        ctx: &ExportContext,
    ) -> ExportResult<Option<ReportSection>> {
        let frames = frames(result);
        if frames.is_empty() {
            return Ok(None);
        }
        let measured = frames.iter().filter(|f| !f.phase.is_nan()).count() as u64;
        let inverted = frames.iter().filter(|f| f.phase < 0.0).count() as u64;
        let mut section = ReportSection::new(ReportCategory::Audio, "Phase meter");
        section.push(ReportEntry::Statistics(statistics("Phase", Unit::NONE, frames.iter().map(|f| f.phase), ctx)));
        section.push(ReportEntry::ratio("Out of phase frames", inverted, measured, ctx.locale()));
        if let Some(g) = find_graphic(graphics, NAME) {
            section.push(ReportEntry::Graphic(Rc::clone(g)));
        }
        Ok(Some(section))
    }
}
