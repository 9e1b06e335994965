// File: crates/avexport-core/src/engines/siti.rs
// Summary: Spatial and temporal information listing and chart.

use std::rc::Rc;

use avexport_chart::{theme, Series, TimedDataGraphic};

use super::{statistics, table, tabular_document, time_axis};
use crate::artifact::GraphicArtifact;
use crate::cell::Cell;
use crate::config::ExportContext;
use crate::engine::{
    automatic_axis, find_graphic, render_prepared, render_prepared_one, tabular_from_singles, GraphicMaker,
    GraphicRendererEngine, PreparedGraphics, RendererEngine, ReportRendererEngine, SingleGraphicExporter,
    SingleTabularDocumentExporter, TableRendererEngine, TabularRendererEngine,
};
use crate::error::ExportResult;
use crate::format::Unit;
use crate::model::{AnalysisResult, SitiFrame};
use crate::report::{ReportCategory, ReportEntry, ReportSection};
use crate::tables::TableDocument;
use crate::tabular::{TabularDialect, TabularDocument};

const NAME: &str = "video-siti";
const HEADER: [&str; 4] = ["Frame", "Time (s)", "SI", "TI"];

pub struct SitiEngine;

fn frames(result: &AnalysisResult) -> &[SitiFrame] {
    result.filters.as_ref().map_or(&[], |f| f.siti.as_slice())
}

fn rows(result: &AnalysisResult) -> Vec<Vec<Cell>> {
    frames(result).iter().map(|f| crate::cells![f.frame, f.pts_time, f.si, f.ti]).collect()
}

pub struct PreparedSiti {
    times: Rc<[f64]>,
    si: Vec<f64>,
    ti: Vec<f64>,
}

fn siti_graphic(p: &PreparedSiti, _ctx: &ExportContext) -> ExportResult<Option<TimedDataGraphic>> {
    let both: Vec<f64> = p.si.iter().chain(&p.ti).copied().collect();
    let Some(axis) = automatic_axis("SI / TI", &both, 1.0)? else {
        return Ok(None);
    };
    let mut g = TimedDataGraphic::new(p.times.clone(), axis);
    g.add_series(Series::line("SI", theme::series_color(0), p.si.clone()))?;
    g.add_series(Series::line("TI", theme::series_color(1), p.ti.clone()))?;
    Ok(Some(g))
}

const MAKERS: &[GraphicMaker<PreparedSiti>] = &[GraphicMaker { name: NAME, make: siti_graphic }];

impl PreparedGraphics for SitiEngine {
    type Prepared = PreparedSiti;

    fn prepare(&self, result: &AnalysisResult, _ctx: &ExportContext) -> ExportResult<Option<PreparedSiti>> {
        let frames = frames(result);
        if frames.is_empty() {
            return Ok(None);
        }
        Ok(Some(PreparedSiti {
            times: time_axis(frames, |f| f.pts_time),
            si: frames.iter().map(|f| f.si).collect(),
            ti: frames.iter().map(|f| f.ti).collect(),
        }))
    }

    fn makers(&self) -> &'static [GraphicMaker<PreparedSiti>] {
        MAKERS
    }
}

impl RendererEngine for SitiEngine {
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

impl TabularRendererEngine for SitiEngine {
    fn to_tabular(
        &self,
        result: &AnalysisResult,
        dialect: TabularDialect,
        ctx: &ExportContext,
    ) -> ExportResult<Vec<TabularDocument>> {
        tabular_from_singles(self, result, dialect, ctx)
    }
}

impl SingleTabularDocumentExporter for SitiEngine {
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

impl TableRendererEngine for SitiEngine {
    fn add_tables(&self, result: &AnalysisResult, doc: &mut TableDocument, _ctx: &ExportContext) -> ExportResult<()> {
        doc.push(table("Spatial and temporal information", &HEADER, rows(result))?);
        Ok(())
    }
}

impl GraphicRendererEngine for SitiEngine {
    fn to_graphics(&self, result: &AnalysisResult, ctx: &ExportContext) -> ExportResult<Vec<GraphicArtifact>> {
        render_prepared(self, result, ctx)
    }
}

impl SingleGraphicExporter for SitiEngine {
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

impl ReportRendererEngine for SitiEngine {
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
        let mut section = ReportSection::new(ReportCategory::Video, "Spatial and temporal information");
        section.push(ReportEntry::Statistics(statistics(
            "Spatial information",
            Unit::NONE,
            frames.iter().map(|f| f.si),
            ctx,
        )));
        section.push(ReportEntry::Statistics(statistics(
            "Temporal information",
            Unit::NONE,
            frames.iter().map(|f| f.ti),
            ctx,
        )));
        if let Some(g) = find_graphic(graphics, NAME) {
            section.push(ReportEntry::Graphic(Rc::clone(g)));
        }
        Ok(Some(section))
    }
}
