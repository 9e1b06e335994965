// File: crates/avexport-core/src/engines/streams.rs
// Summary: Per-stream metadata tables and report subsets, one engine per codec type.

use std::rc::Rc;

use super::{table, UNKNOWN};
use crate::artifact::GraphicArtifact;
use crate::cell::Cell;
use crate::config::ExportContext;
use crate::engine::{RendererEngine, ReportRendererEngine, TableRendererEngine};
use crate::error::ExportResult;
use crate::format::{format_fixed, Unit};
use crate::model::{AnalysisResult, CodecType, ProbeStream};
use crate::report::{ReportCategory, ReportEntry, ReportSection};
use crate::tables::TableDocument;

const VIDEO_HEADER: [&str; 9] =
    ["Index", "Codec", "Profile", "Width", "Height", "Display aspect ratio", "Pixel format", "Frame rate", "Bit rate"];
const AUDIO_HEADER: [&str; 7] = ["Index", "Codec", "Profile", "Sample rate", "Channels", "Channel layout", "Bit rate"];

pub struct StreamsEngine {
    kind: CodecType,
}

impl StreamsEngine {
    pub fn video() -> Self {
        Self { kind: CodecType::Video }
    }

    pub fn audio() -> Self {
        Self { kind: CodecType::Audio }
    }

    fn title(&self) -> &'static str {
        match self.kind {
            CodecType::Video => "Video streams",
            _ => "Audio streams",
        }
    }

    fn row(&self, s: &ProbeStream) -> Vec<Cell> {
        match self.kind {
            CodecType::Video => vec![
                s.index.into(),
                s.codec_name.clone().into(),
                s.profile.clone().into(),
                s.width.into(),
                s.height.into(),
                s.display_aspect_ratio.clone().into(),
                s.pix_fmt.clone().into(),
                s.frame_rate().into(),
                s.bit_rate.into(),
            ],
            _ => vec![
                s.index.into(),
                s.codec_name.clone().into(),
                s.profile.clone().into(),
                s.sample_rate.into(),
                s.channels.into(),
                s.channel_layout.clone().into(),
                s.bit_rate.into(),
            ],
        }
    }

    fn header(&self) -> &'static [&'static str] {
        match self.kind {
            CodecType::Video => &VIDEO_HEADER,
            _ => &AUDIO_HEADER,
        }
    }

    fn subset(&self, s: &ProbeStream, ctx: &ExportContext) -> ReportEntry {
        let locale = ctx.locale();
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        let mut entries = vec![
            ReportEntry::key_value("Codec", text(&s.codec_name)),
            ReportEntry::key_value("Profile", text(&s.profile)),
        ];
        match self.kind {
            CodecType::Video => {
                let (w, h) = s.resolution().unwrap_or((0, 0));
                entries.push(ReportEntry::Resolution { key: "Resolution".into(), width: w, height: h });
                let rate = match (&s.avg_frame_rate, s.frame_rate()) {
                    (_, Some(fps)) => format!("{} fps", format_fixed(fps, 3, locale)),
                    (Some(_), None) => UNKNOWN.to_string(),
                    (None, None) => String::new(),
                };
                entries.push(ReportEntry::key_value("Frame rate", rate));
                let dar = match (&s.display_aspect_ratio, s.aspect_ratio()) {
                    (Some(raw), Some(_)) => raw.clone(),
                    (Some(_), None) => UNKNOWN.to_string(),
                    (None, _) => String::new(),
                };
                entries.push(ReportEntry::key_value("Display aspect ratio", dar));
                entries.push(ReportEntry::key_value("Pixel format", text(&s.pix_fmt)));
            }
            _ => {
                let rate = s.sample_rate.map_or(f64::NAN, f64::from);
                entries.push(ReportEntry::numeric("Sample rate", rate, Unit::HERTZ, locale));
                let channels = s.channels.map_or(f64::NAN, f64::from);
                entries.push(ReportEntry::numeric("Channels", channels, Unit::NONE, locale));
                entries.push(ReportEntry::key_value("Channel layout", text(&s.channel_layout)));
            }
        }
        let bit_rate = s.bit_rate.map_or(f64::NAN, |b| b as f64);
        entries.push(ReportEntry::numeric("Bit rate", bit_rate, Unit::BITS_PER_SECOND, locale));
        ReportEntry::Subset { title: format!("Stream #{}", s.index), entries }
    }
}

impl RendererEngine for StreamsEngine {
    fn name(&self) -> &'static str {
        match self.kind {
            CodecType::Video => "video-streams",
            _ => "audio-streams",
        }
    }
    fn table(&self) -> Option<&dyn TableRendererEngine> {
        Some(self)
    }
    fn report(&self) -> Option<&dyn ReportRendererEngine> {
        Some(self)
    }
}

impl TableRendererEngine for StreamsEngine {
    fn add_tables(&self, result: &AnalysisResult, doc: &mut TableDocument, _ctx: &ExportContext) -> ExportResult<()> {
        let rows = result.streams(self.kind).map(|s| self.row(s)).collect();
        doc.push(table(self.title(), self.header(), rows)?);
        Ok(())
    }
}

impl ReportRendererEngine for StreamsEngine {
    fn to_report(
        &self,
        result: &AnalysisResult,
        _graphics: &[Rc<GraphicArtifact>],
        ctx: &ExportContext,
    ) -> ExportResult<Option<ReportSection>> {
        let category = match self.kind {
            CodecType::Video => ReportCategory::Video,
            _ => ReportCategory::Audio,
        };
        let mut section = ReportSection::new(category, self.title());
        for s in result.streams(self.kind) {
            section.push(self.subset(s, ctx));
        }
        Ok(Some(section))
    }
}
