// File: crates/avexport-core/src/engines/crop_detect.rs
// Summary: Crop detection reduced to change events, with black-frame and full-frame wording.

use std::rc::Rc;

use super::{table, tabular_document};
use crate::artifact::GraphicArtifact;
use crate::cell::Cell;
use crate::config::ExportContext;
use crate::dedup::{ChangeEvent, CropEventKind, CropRect, RunLengthReducer};
use crate::engine::{
    tabular_from_singles, RendererEngine, ReportRendererEngine, SingleTabularDocumentExporter, TableRendererEngine,
    TabularRendererEngine,
};
use crate::error::ExportResult;
use crate::format::Unit;
use crate::model::AnalysisResult;
use crate::report::{ReportCategory, ReportEntry, ReportEvent, ReportSection};
use crate::tables::TableDocument;
use crate::tabular::{TabularDialect, TabularDocument};

const NAME: &str = "video-crop-detect";
const HEADER: [&str; 7] = ["Frame", "Time (s)", "Event", "X", "Y", "Width", "Height"];

pub struct CropDetectEngine;

/// Change events of the crop rectangle, leading full-frame run skipped.
pub fn crop_events(result: &AnalysisResult, max_events: usize) -> Vec<ChangeEvent<CropRect>> {
    let Some(filters) = &result.filters else {
        return Vec::new();
    };
    let mut reducer = RunLengthReducer::new().with_max_events(max_events);
    if let Some((w, h)) = result.video_resolution() {
        reducer = reducer.with_baseline(CropRect::full_frame(w, h));
    }
    reducer.reduce(filters.cropdetect.iter().map(|f| (f.frame, f.pts_time, CropRect::new(f.x, f.y, f.w, f.h))))
}

fn rows(result: &AnalysisResult, ctx: &ExportContext) -> Vec<Vec<Cell>> {
    let source = result.video_resolution();
    crop_events(result, ctx.config.crop_max_events)
        .into_iter()
        .map(|e| {
            let kind = CropEventKind::classify(e.value, source);
            let mut row = crate::cells![e.frame, e.pts_time, kind.label()];
            match kind {
                CropEventKind::Crop(r) => row.extend(crate::cells![r.x, r.y, r.w, r.h]),
                _ => row.extend([Cell::Empty, Cell::Empty, Cell::Empty, Cell::Empty]),
            }
            row
        })
        .collect()
}

impl RendererEngine for CropDetectEngine {
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

impl TabularRendererEngine for CropDetectEngine {
    fn to_tabular(
        &self,
        result: &AnalysisResult,
        dialect: TabularDialect,
        ctx: &ExportContext,
    ) -> ExportResult<Vec<TabularDocument>> {
        tabular_from_singles(self, result, dialect, ctx)
    }
}

impl SingleTabularDocumentExporter for CropDetectEngine {
    fn tabular_names(&self) -> &'static [&'static str] {
        &[NAME]
    }

    fn to_single_tabular(
        &self,
        result: &AnalysisResult,
        _name: &str,
        dialect: TabularDialect,
        ctx: &ExportContext,
    ) -> ExportResult<Option<TabularDocument>> {
        tabular_document(NAME, dialect, &HEADER, rows(result, ctx))
    }
}

impl TableRendererEngine for CropDetectEngine {
    fn add_tables(&self, result: &AnalysisResult, doc: &mut TableDocument, ctx: &ExportContext) -> ExportResult<()> {
        doc.push(table("Crop detection", &HEADER, rows(result, ctx))?);
        Ok(())
    }
}

impl ReportRendererEngine for CropDetectEngine {
    fn to_report(
        &self,
        result: &AnalysisResult,
        _graphics: &[Rc<GraphicArtifact>],
        ctx: &ExportContext,
    ) -> ExportResult<Option<ReportSection>> {
        let analysed = result.filters.as_ref().is_some_and(|f| !f.cropdetect.is_empty());
        if !analysed {
            return Ok(None);
        }
        let source = result.video_resolution();
        let events = crop_events(result, ctx.config.crop_max_events);
        let mut section = ReportSection::new(ReportCategory::Video, "Crop detection");
        section.push(ReportEntry::numeric("Crop changes", events.len() as f64, Unit::EVENT, ctx.locale()));
        if events.is_empty() {
            section.push(ReportEntry::key_value("Result", "full frame, no crop detected"));
        }
        let report_events: Vec<ReportEvent> = events
            .iter()
            .enumerate()
            .map(|(i, e)| {
                let end = events.get(i + 1).map(|next| next.pts_time);
                ReportEvent::new(e.pts_time, end, CropEventKind::classify(e.value, source).label())
            })
            .collect();
        let max_rows = ctx.config.event_table_max_rows;
        let omitted = report_events.len().saturating_sub(max_rows);
        section.push(ReportEntry::EventTable {
            key: "Crop events".into(),
            events: report_events.into_iter().take(max_rows).collect(),
            omitted,
        });
        Ok(Some(section))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CodecType, CropFrame, FilterMetrics, ProbeMetadata, ProbeStream};

    fn result_with(frames: Vec<CropFrame>) -> AnalysisResult {
        let mut video = ProbeStream::new(0, CodecType::Video);
        video.width = Some(640);
        video.height = Some(480);
        let mut r = AnalysisResult::new("a.mp4");
        r.probe = Some(ProbeMetadata { format_name: "mp4".into(), streams: vec![video], ..Default::default() });
        r.filters = Some(FilterMetrics { cropdetect: frames, ..FilterMetrics::default() });
        r
    }

    fn run(frames: &mut Vec<CropFrame>, rect: (i32, i32, i32, i32), n: usize) {
        for _ in 0..n {
            let frame = frames.len() as u64;
            frames.push(CropFrame { frame, pts_time: frame as f64 / 25.0, x: rect.0, y: rect.1, w: rect.2, h: rect.3 });
        }
    }

    #[test]
    fn crop_then_back_to_full_frame() {
        let mut frames = Vec::new();
        run(&mut frames, (0, 0, 640, 480), 50);
        run(&mut frames, (10, 10, 600, 440), 30);
        run(&mut frames, (10, 10, 600, 440), 20);
        run(&mut frames, (0, 0, 640, 480), 10);
        let r = result_with(frames);
        let events = crop_events(&r, usize::MAX);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].frame, 50);
        assert_eq!(events[0].value, CropRect::new(10, 10, 600, 440));

        let rows = rows(&r, &ExportContext::default());
        assert_eq!(rows[1][2], Cell::from("back to full frame (no crop)"));
        assert_eq!(rows[1][3], Cell::Empty);
    }

    #[test]
    fn black_frames_hide_raw_fields() {
        let mut frames = Vec::new();
        run(&mut frames, (0, 0, -640, -480), 3);
        let r = result_with(frames);
        let rows = rows(&r, &ExportContext::default());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][2], Cell::from("black frame"));
        assert!(rows[0][3..].iter().all(|c| *c == Cell::Empty));
    }
}
