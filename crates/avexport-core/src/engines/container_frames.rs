// File: crates/avexport-core/src/engines/container_frames.rs
// Summary: Container frame and packet listings, frame size chart and size statistics.

use std::rc::Rc;

use avexport_chart::{theme, RangeAxis, ScaleKind, Series, TimedDataGraphic};

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
use crate::model::{AnalysisResult, ContainerFrame};
use crate::report::{ReportCategory, ReportEntry, ReportSection};
use crate::tables::TableDocument;
use crate::tabular::{TabularDialect, TabularDocument};

const VIDEO_FRAMES: &str = "container-video-frames";
const AUDIO_FRAMES: &str = "container-audio-frames";
const FRAME_SIZES: &str = "container-video-frame-sizes";

const VIDEO_HEADER: [&str; 6] = ["Frame", "Stream", "Time (s)", "Size (bytes)", "Key frame", "Picture type"];
const AUDIO_HEADER: [&str; 6] = ["Frame", "Stream", "Time (s)", "Size (bytes)", "Key frame", "Samples"];
const PACKET_HEADER: [&str; 6] = ["Stream", "Time (s)", "Decode time (s)", "Duration (s)", "Size (bytes)", "Key"];

pub struct ContainerFramesEngine;

fn video_frames(result: &AnalysisResult) -> Vec<&ContainerFrame> {
    result.container.iter().flat_map(|c| c.frames.iter()).filter(|f| f.is_video()).collect()
}

fn audio_frames(result: &AnalysisResult) -> Vec<&ContainerFrame> {
    result.container.iter().flat_map(|c| c.frames.iter()).filter(|f| f.is_audio()).collect()
}

fn video_rows(result: &AnalysisResult) -> Vec<Vec<Cell>> {
    video_frames(result)
        .into_iter()
        .enumerate()
        .map(|(i, f)| {
            crate::cells![i, f.stream_index, f.pts_time, f.pkt_size, f.key_frame, f.pict_type.clone()]
        })
        .collect()
}

fn audio_rows(result: &AnalysisResult) -> Vec<Vec<Cell>> {
    audio_frames(result)
        .into_iter()
        .enumerate()
        .map(|(i, f)| crate::cells![i, f.stream_index, f.pts_time, f.pkt_size, f.key_frame, f.nb_samples])
        .collect()
}

fn packet_rows(result: &AnalysisResult) -> Vec<Vec<Cell>> {
    result
        .container
        .iter()
        .flat_map(|c| c.packets.iter())
        .map(|p| crate::cells![p.stream_index, p.pts_time, p.dts_time, p.duration_time, p.size, p.key])
        .collect()
}

pub struct FrameSizes {
    times: Rc<[f64]>,
    sizes: Vec<f64>,
}

fn frame_size_graphic(p: &FrameSizes, _ctx: &ExportContext) -> ExportResult<Option<TimedDataGraphic>> {
    let Some(max) = p.sizes.iter().copied().reduce(f64::max) else {
        return Ok(None);
    };
    // Log scale starts at one byte so empty frames sit on the floor.
    let axis = RangeAxis::new("Frame size (bytes)", 1.0, max.max(10.0) * 2.0);
    let mut g = TimedDataGraphic::new(p.times.clone(), axis).with_scale(ScaleKind::Log10);
    g.add_series(Series::histogram("Video frame size", theme::series_color(0), p.sizes.clone()))?;
    Ok(Some(g))
}

const MAKERS: &[GraphicMaker<FrameSizes>] = &[GraphicMaker { name: FRAME_SIZES, make: frame_size_graphic }];

impl PreparedGraphics for ContainerFramesEngine {
    type Prepared = FrameSizes;

    fn prepare(&self, result: &AnalysisResult, _ctx: &ExportContext) -> ExportResult<Option<FrameSizes>> {
        let frames = video_frames(result);
        if frames.is_empty() {
            return Ok(None);
        }
        Ok(Some(FrameSizes {
            times: time_axis(&frames, |f| f.pts_time),
            sizes: frames.iter().map(|f| f.pkt_size as f64).collect(),
        }))
    }

    fn makers(&self) -> &'static [GraphicMaker<FrameSizes>] {
        MAKERS
    }
}

impl RendererEngine for ContainerFramesEngine {
    fn name(&self) -> &'static str {
        "container-frames"
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

impl TabularRendererEngine for ContainerFramesEngine {
    fn to_tabular(
        &self,
        result: &AnalysisResult,
        dialect: TabularDialect,
        ctx: &ExportContext,
    ) -> ExportResult<Vec<TabularDocument>> {
        tabular_from_singles(self, result, dialect, ctx)
    }
}

impl SingleTabularDocumentExporter for ContainerFramesEngine {
    fn tabular_names(&self) -> &'static [&'static str] {
        &[VIDEO_FRAMES, AUDIO_FRAMES]
    }

    fn to_single_tabular(
        &self,
        result: &AnalysisResult,
        name: &str,
        dialect: TabularDialect,
        _ctx: &ExportContext,
    ) -> ExportResult<Option<TabularDocument>> {
        match name {
            VIDEO_FRAMES => tabular_document(name, dialect, &VIDEO_HEADER, video_rows(result)),
            AUDIO_FRAMES => tabular_document(name, dialect, &AUDIO_HEADER, audio_rows(result)),
            _ => Ok(None),
        }
    }
}

impl TableRendererEngine for ContainerFramesEngine {
    fn add_tables(&self, result: &AnalysisResult, doc: &mut TableDocument, _ctx: &ExportContext) -> ExportResult<()> {
        doc.push(table("Container video frames", &VIDEO_HEADER, video_rows(result))?);
        doc.push(table("Container audio frames", &AUDIO_HEADER, audio_rows(result))?);
        doc.push(table("Container packets", &PACKET_HEADER, packet_rows(result))?);
        Ok(())
    }
}

impl GraphicRendererEngine for ContainerFramesEngine {
    fn to_graphics(&self, result: &AnalysisResult, ctx: &ExportContext) -> ExportResult<Vec<GraphicArtifact>> {
        render_prepared(self, result, ctx)
    }
}

impl SingleGraphicExporter for ContainerFramesEngine {
    fn graphic_names(&self) -> &'static [&'static str] {
        &[FRAME_SIZES]
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

impl ReportRendererEngine for ContainerFramesEngine {
    fn to_report(
        &self,
        result: &AnalysisResult,
        graphics: &[Rc<GraphicArtifact>],
        ctx: &ExportContext,
    ) -> ExportResult<Option<ReportSection>> {
        let Some(container) = &result.container else {
            return Ok(None);
        };
        let locale = ctx.locale();
        let video = video_frames(result);
        let audio = audio_frames(result);
        let key_frames = video.iter().filter(|f| f.key_frame).count() as u64;

        let mut section = ReportSection::new(ReportCategory::Container, "Frames and packets");
        section.push(ReportEntry::numeric("Video frames", video.len() as f64, Unit::FRAME, locale));
        section.push(ReportEntry::numeric("Audio frames", audio.len() as f64, Unit::FRAME, locale));
        section.push(ReportEntry::numeric("Packets", container.packets.len() as f64, Unit::NONE, locale));
        section.push(ReportEntry::ratio("Key frames", key_frames, video.len() as u64, locale));
        if !video.is_empty() {
            section.push(ReportEntry::Statistics(statistics(
                "Video frame size",
                Unit::BYTE,
                video.iter().map(|f| f.pkt_size as f64),
                ctx,
            )));
        }
        if !audio.is_empty() {
            section.push(ReportEntry::Statistics(statistics(
                "Audio frame size",
                Unit::BYTE,
                audio.iter().map(|f| f.pkt_size as f64),
                ctx,
            )));
        }
        if let Some(g) = find_graphic(graphics, FRAME_SIZES) {
            section.push(ReportEntry::Graphic(Rc::clone(g)));
        }
        Ok(Some(section))
    }
}
