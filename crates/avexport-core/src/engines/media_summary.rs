// File: crates/avexport-core/src/engines/media_summary.rs
// Summary: Media overview: container, first streams and programme loudness.

use std::rc::Rc;

use tracing::debug;

use super::{table, tabular_document, UNKNOWN};
use crate::artifact::GraphicArtifact;
use crate::cell::Cell;
use crate::config::ExportContext;
use crate::engine::{
    tabular_from_singles, RendererEngine, ReportRendererEngine, SingleTabularDocumentExporter, TableRendererEngine,
    TabularRendererEngine,
};
use crate::error::ExportResult;
use crate::format::{format_fixed, NumberLocale, Unit};
use crate::model::{AnalysisResult, CodecType, ProbeStream};
use crate::report::{ReportCategory, ReportEntry, ReportSection};
use crate::tables::TableDocument;
use crate::tabular::{TabularDialect, TabularDocument};

const NAME: &str = "media-summary";
const HEADER: [&str; 2] = ["Key", "Value"];

pub struct MediaSummaryEngine;

/// Frame rate rounded to three decimals; `(unknown)` when present but unparsable.
fn frame_rate_cell(stream: &ProbeStream) -> Cell {
    let Some(raw) = stream.avg_frame_rate.as_deref() else {
        return Cell::Empty;
    };
    match stream.frame_rate() {
        Some(fps) => Cell::Real((fps * 1000.0).round() / 1000.0),
        None => {
            debug!(value = raw, "unparsable frame rate");
            Cell::from(UNKNOWN)
        }
    }
}

fn frame_rate_text(stream: &ProbeStream, locale: NumberLocale) -> String {
    match frame_rate_cell(stream) {
        Cell::Real(fps) => format_fixed(fps, 3, locale),
        other => other.to_text(locale),
    }
}

fn aspect_ratio_text(stream: &ProbeStream) -> Option<String> {
    let raw = stream.display_aspect_ratio.as_deref()?;
    Some(match stream.aspect_ratio() {
        Some(_) => raw.to_string(),
        None => {
            debug!(value = raw, "unparsable display aspect ratio");
            UNKNOWN.to_string()
        }
    })
}

/// Key/value rows; absent fields are left out.
fn rows(result: &AnalysisResult) -> Vec<(&'static str, Cell)> {
    let mut rows: Vec<(&'static str, Cell)> = Vec::new();
    let Some(probe) = &result.probe else {
        return rows;
    };
    rows.push(("Source", Cell::from(result.source_name.as_str())));
    rows.push(("Format", Cell::from(probe.format_name.as_str())));
    if let Some(long) = &probe.format_long_name {
        rows.push(("Format name", Cell::from(long.as_str())));
    }
    rows.push(("Duration (s)", Cell::from(probe.duration)));
    rows.push(("Size (bytes)", Cell::from(probe.size)));
    rows.push(("Bit rate (bit/s)", Cell::from(probe.bit_rate)));
    rows.push(("Video streams", Cell::from(result.streams(CodecType::Video).count())));
    rows.push(("Audio streams", Cell::from(result.streams(CodecType::Audio).count())));

    if let Some(video) = result.first_video_stream() {
        rows.push(("Video codec", Cell::from(video.codec_name.clone())));
        if let Some((w, h)) = video.resolution() {
            rows.push(("Resolution", Cell::from(format!("{w}x{h}"))));
        }
        rows.push(("Frame rate (fps)", frame_rate_cell(video)));
        rows.push(("Display aspect ratio", Cell::from(aspect_ratio_text(video))));
    }
    if let Some(audio) = result.streams(CodecType::Audio).next() {
        rows.push(("Audio codec", Cell::from(audio.codec_name.clone())));
        rows.push(("Sample rate (Hz)", Cell::from(audio.sample_rate)));
        rows.push(("Channels", Cell::from(audio.channels)));
    }
    if let Some(l) = &result.loudness {
        rows.push(("Integrated loudness (LUFS)", Cell::from(l.integrated)));
        rows.push(("Loudness range (LU)", Cell::from(l.lra)));
        rows.push(("True peak (dBTP)", Cell::from(l.true_peak)));
    }
    rows.retain(|(_, c)| !c.is_empty());
    rows
}

fn cell_rows(result: &AnalysisResult) -> Vec<Vec<Cell>> {
    rows(result).into_iter().map(|(k, v)| vec![Cell::from(k), v]).collect()
}

impl RendererEngine for MediaSummaryEngine {
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

impl TabularRendererEngine for MediaSummaryEngine {
    fn to_tabular(
        &self,
        result: &AnalysisResult,
        dialect: TabularDialect,
        ctx: &ExportContext,
    ) -> ExportResult<Vec<TabularDocument>> {
        tabular_from_singles(self, result, dialect, ctx)
    }
}

impl SingleTabularDocumentExporter for MediaSummaryEngine {
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
        tabular_document(NAME, dialect, &HEADER, cell_rows(result))
    }
}

impl TableRendererEngine for MediaSummaryEngine {
    fn add_tables(&self, result: &AnalysisResult, doc: &mut TableDocument, _ctx: &ExportContext) -> ExportResult<()> {
        doc.push(table("Media summary", &HEADER, cell_rows(result))?);
        Ok(())
    }
}

impl ReportRendererEngine for MediaSummaryEngine {
    fn to_report(
        &self,
        result: &AnalysisResult,
        _graphics: &[Rc<GraphicArtifact>],
        ctx: &ExportContext,
    ) -> ExportResult<Option<ReportSection>> {
        let Some(probe) = &result.probe else {
            return Ok(None);
        };
        let locale = ctx.locale();
        let mut section = ReportSection::new(ReportCategory::Summary, "Media summary");
        section.push(ReportEntry::key_value("Source", result.source_name.clone()));
        section.push(ReportEntry::key_value(
            "Format",
            probe.format_long_name.clone().unwrap_or_else(|| probe.format_name.clone()),
        ));
        section.push(ReportEntry::numeric("Duration", probe.duration.unwrap_or(f64::NAN), Unit::SECOND, locale));
        section.push(ReportEntry::numeric("Size", probe.size.map_or(f64::NAN, |s| s as f64), Unit::BYTE, locale));
        section.push(ReportEntry::numeric(
            "Bit rate",
            probe.bit_rate.map_or(f64::NAN, |b| b as f64),
            Unit::BITS_PER_SECOND,
            locale,
        ));

        if let Some(video) = result.first_video_stream() {
            let (w, h) = video.resolution().unwrap_or((0, 0));
            section.push(ReportEntry::Resolution { key: "Resolution".into(), width: w, height: h });
            section.push(ReportEntry::key_value("Frame rate", frame_rate_text(video, locale)));
            section.push(ReportEntry::key_value("Display aspect ratio", aspect_ratio_text(video).unwrap_or_default()));
        }
        if let Some(l) = &result.loudness {
            section.push(ReportEntry::numeric("Integrated loudness", l.integrated, Unit::LUFS, locale));
            section.push(ReportEntry::numeric(
                "Deviation from target",
                l.integrated - ctx.config.loudness_target,
                Unit::LU,
                locale,
            ));
        }
        Ok(Some(section))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExportConfig;
    use crate::model::ProbeMetadata;

    fn sample() -> AnalysisResult {
        let mut video = ProbeStream::new(0, CodecType::Video);
        video.codec_name = Some("h264".into());
        video.width = Some(1920);
        video.height = Some(1080);
        video.avg_frame_rate = Some("not-a-rate".into());
        video.display_aspect_ratio = Some("16:9".into());
        let mut r = AnalysisResult::new("clip.mov");
        r.probe = Some(ProbeMetadata {
            format_name: "mov".into(),
            duration: Some(10.0),
            streams: vec![video],
            ..Default::default()
        });
        r
    }

    #[test]
    fn malformed_rate_is_unknown() {
        let rows = rows(&sample());
        let rate = rows.iter().find(|(k, _)| *k == "Frame rate (fps)").map(|(_, v)| v.clone());
        assert_eq!(rate, Some(Cell::from(UNKNOWN)));
        assert!(rows.iter().all(|(k, _)| *k != "Size (bytes)"));
    }

    #[test]
    fn frame_rate_follows_the_locale() {
        let mut r = sample();
        if let Some(probe) = r.probe.as_mut() {
            probe.streams[0].avg_frame_rate = Some("30000/1001".into());
        }
        let ctx = ExportContext::default();
        let doc = MediaSummaryEngine.to_single_tabular(&r, NAME, TabularDialect::CsvFr, &ctx).unwrap().unwrap();
        let text = String::from_utf8(doc.to_bytes().unwrap()).unwrap();
        assert!(text.contains("Frame rate (fps);29,97\n"), "{text}");
        let doc = MediaSummaryEngine.to_single_tabular(&r, NAME, TabularDialect::Csv, &ctx).unwrap().unwrap();
        let text = String::from_utf8(doc.to_bytes().unwrap()).unwrap();
        assert!(text.contains("Frame rate (fps),29.97\n"), "{text}");

        let french = ExportContext::new(ExportConfig { locale: NumberLocale::French, ..ExportConfig::default() });
        let section = MediaSummaryEngine.to_report(&r, &[], &french).unwrap().unwrap();
        assert!(section.entries.contains(&ReportEntry::key_value("Frame rate", "29,970")));
    }

    #[test]
    fn no_probe_no_output() {
        let ctx = ExportContext::default();
        let r = AnalysisResult::new("x.wav");
        assert!(MediaSummaryEngine.to_single_tabular(&r, NAME, TabularDialect::Csv, &ctx).unwrap().is_none());
        assert!(MediaSummaryEngine.to_report(&r, &[], &ctx).unwrap().is_none());
    }
}
