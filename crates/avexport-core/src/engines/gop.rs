// File: crates/avexport-core/src/engines/gop.rs
// Summary: Group-of-pictures structure derived from the video frame listing.

use std::rc::Rc;

use avexport_chart::{theme, RangeAxis, ScaleKind, Series, TimedDataGraphic};

use super::{statistics, table, tabular_document};
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
use crate::model::AnalysisResult;
use crate::report::{ReportCategory, ReportEntry, ReportSection};
use crate::tables::TableDocument;
use crate::tabular::{TabularDialect, TabularDocument};

const NAME: &str = "container-gop";
const GOP_FRAMES: &str = "container-gop-frames";
const GOP_SIZES: &str = "container-gop-sizes";
const HEADER: [&str; 7] = ["GOP", "Start (s)", "Frames", "Size (bytes)", "I frames", "P frames", "B frames"];

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Gop {
    pub start: f64,
    pub frames: u64,
    pub size: u64,
    pub i_frames: u64,
    pub p_frames: u64,
    pub b_frames: u64,
}

/// Split the first video stream into GOPs; a key frame opens a new one.
/// Frames before the first key frame form a leading open GOP.
pub fn split_gops(result: &AnalysisResult) -> Vec<Gop> {
    let Some(container) = &result.container else {
        return Vec::new();
    };
    let stream = container.frames.iter().find(|f| f.is_video()).map(|f| f.stream_index);
    let mut gops: Vec<Gop> = Vec::new();
    for f in container.frames.iter().filter(|f| f.is_video() && Some(f.stream_index) == stream) {
        if f.key_frame || gops.is_empty() {
            gops.push(Gop { start: f.pts_time, ..Gop::default() });
        }
        if let Some(gop) = gops.last_mut() {
            gop.frames += 1;
            gop.size += f.pkt_size;
            match f.pict_type.as_deref() {
                Some("I") => gop.i_frames += 1,
                Some("P") => gop.p_frames += 1,
                Some("B") => gop.b_frames += 1,
                _ => {}
            }
        }
    }
    gops
}

fn rows(gops: &[Gop]) -> Vec<Vec<Cell>> {
    gops.iter()
        .enumerate()
        .map(|(i, g)| crate::cells![i, g.start, g.frames, g.size, g.i_frames, g.p_frames, g.b_frames])
        .collect()
}

pub struct GopEngine;

pub struct PreparedGops {
    starts: Rc<[f64]>,
    frames: Vec<f64>,
    sizes: Vec<f64>,
}

fn gop_frames_graphic(p: &PreparedGops, _ctx: &ExportContext) -> ExportResult<Option<TimedDataGraphic>> {
    let Some(axis) = automatic_axis("GOP length (frames)", &p.frames, 1.0)? else {
        return Ok(None);
    };
    let mut g = TimedDataGraphic::new(p.starts.clone(), axis);
    g.add_series(Series::histogram("Frames per GOP", theme::series_color(1), p.frames.clone()))?;
    Ok(Some(g))
}

fn gop_sizes_graphic(p: &PreparedGops, _ctx: &ExportContext) -> ExportResult<Option<TimedDataGraphic>> {
    let Some(max) = p.sizes.iter().copied().reduce(f64::max) else {
        return Ok(None);
    };
    let axis = RangeAxis::new("GOP size (bytes)", 1.0, max.max(10.0) * 2.0);
    let mut g = TimedDataGraphic::new(p.starts.clone(), axis).with_scale(ScaleKind::Log10);
    g.add_series(Series::histogram("GOP size", theme::series_color(2), p.sizes.clone()))?;
    Ok(Some(g))
}

const MAKERS: &[GraphicMaker<PreparedGops>] = &[
    GraphicMaker { name: GOP_FRAMES, make: gop_frames_graphic },
    GraphicMaker { name: GOP_SIZES, make: gop_sizes_graphic },
];

impl PreparedGraphics for GopEngine {
    type Prepared = PreparedGops;

    fn prepare(&self, result: &AnalysisResult, _ctx: &ExportContext) -> ExportResult<Option<PreparedGops>> {
        let gops = split_gops(result);
        if gops.is_empty() {
            return Ok(None);
        }
        Ok(Some(PreparedGops {
            starts: gops.iter().map(|g| g.start).collect(),
            frames: gops.iter().map(|g| g.frames as f64).collect(),
            sizes: gops.iter().map(|g| g.size as f64).collect(),
        }))
    }

    fn makers(&self) -> &'static [GraphicMaker<PreparedGops>] {
        MAKERS
    }
}

impl RendererEngine for GopEngine {
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

impl TabularRendererEngine for GopEngine {
    fn to_tabular(
        &self,
        result: &AnalysisResult,
        dialect: TabularDialect,
        ctx: &ExportContext,
    ) -> ExportResult<Vec<TabularDocument>> {
        tabular_from_singles(self, result, dialect, ctx)
    }
}

impl SingleTabularDocumentExporter for GopEngine {
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
        tabular_document(NAME, dialect, &HEADER, rows(&split_gops(result)))
    }
}

impl TableRendererEngine for GopEngine {
    fn add_tables(&self, result: &AnalysisResult, doc: &mut TableDocument, _ctx: &ExportContext) -> ExportResult<()> {
        doc.push(table("GOP structure", &HEADER, rows(&split_gops(result)))?);
        Ok(())
    }
}

impl GraphicRendererEngine for GopEngine {
    fn to_graphics(&self, result: &AnalysisResult, ctx: &ExportContext) -> ExportResult<Vec<GraphicArtifact>> {
        render_prepared(self, result, ctx)
    }
}

impl SingleGraphicExporter for GopEngine {
    fn graphic_names(&self) -> &'static [&'static str] {
        &[GOP_FRAMES, GOP_SIZES]
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

impl ReportRendererEngine for GopEngine {
    fn to_report(
        &self,
        result: &AnalysisResult,
        graphics: &[Rc<GraphicArtifact>],
        ctx: &ExportContext,
    ) -> ExportResult<Option<ReportSection>> {
        let gops = split_gops(result);
        if gops.is_empty() {
            return Ok(None);
        }
        let locale = ctx.locale();
        let mut section = ReportSection::new(ReportCategory::Container, "GOP structure");
        section.push(ReportEntry::numeric("GOPs", gops.len() as f64, Unit::NONE, locale));
        section.push(ReportEntry::Statistics(statistics(
            "GOP length",
            Unit::FRAME,
            gops.iter().map(|g| g.frames as f64),
            ctx,
        )));
        section.push(ReportEntry::Statistics(statistics(
            "GOP size",
            Unit::BYTE,
            gops.iter().map(|g| g.size as f64),
            ctx,
        )));
        let b_frames: u64 = gops.iter().map(|g| g.b_frames).sum();
        let frames: u64 = gops.iter().map(|g| g.frames).sum();
        section.push(ReportEntry::ratio("B frames", b_frames, frames, locale));
        for name in [GOP_FRAMES, GOP_SIZES] {
            if let Some(g) = find_graphic(graphics, name) {
                section.push(ReportEntry::Graphic(Rc::clone(g)));
            }
        }
        Ok(Some(section))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ContainerAnalysis, ContainerFrame, MediaType};

    fn frame(t: f64, key: bool, pict: &str, size: u64) -> ContainerFrame {
        ContainerFrame {
            media_type: MediaType::Video,
            stream_index: 0,
            pts_time: t,
            pkt_size: size,
            key_frame: key,
            pict_type: Some(pict.into()),
            nb_samples: None,
        }
    }

    #[test]
    fn key_frames_open_gops() {
        let mut r = AnalysisResult::new("a.mp4");
        r.container = Some(ContainerAnalysis {
            frames: vec![
                frame(0.0, false, "B", 5),
                frame(0.04, true, "I", 100),
                frame(0.08, false, "P", 20),
                frame(0.12, false, "B", 10),
                frame(0.16, true, "I", 90),
            ],
            packets: Vec::new(),
        });
        let gops = split_gops(&r);
        assert_eq!(gops.len(), 3);
        assert_eq!(gops[0].frames, 1);
        assert_eq!(gops[1], Gop { start: 0.04, frames: 3, size: 130, i_frames: 1, p_frames: 1, b_frames: 1 });
        assert_eq!(gops[2].start, 0.16);
    }
}
