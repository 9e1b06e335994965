// File: crates/avexport-core/src/model/mod.rs
// Summary: Immutable analysis result handed to every renderer engine; every section is optional.

mod container;
mod filters;
mod probe;
pub(crate) mod serde_num;

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ExportResult;

pub use container::{ContainerAnalysis, ContainerFrame, ContainerPacket, MediaType};
pub use filters::{
    AudioChannelStats, AudioStatsFrame, CropFrame, FilterMetrics, IdetCounts, IdetSummary, LoudnessEvent,
    LoudnessSummary, PhaseFrame, ScoreFrame, SitiFrame, TimeRangeEvent, Waveform, WaveformPoint,
};
pub use probe::{CodecType, ProbeMetadata, ProbeStream};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SnapshotImage {
    pub name: String,
    pub width: u32,
    pub height: u32,
    #[serde(with = "serde_num::base64_bytes")]
    pub jpeg: Vec<u8>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CommandLine {
    pub tool: String,
    pub line: String,
}

/// Everything measured for one media source. Absent sections were not measured.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub source_name: String,
    #[serde(default)]
    pub probe: Option<ProbeMetadata>,
    #[serde(default)]
    pub container: Option<ContainerAnalysis>,
    #[serde(default)]
    pub filters: Option<FilterMetrics>,
    #[serde(default)]
    pub loudness: Option<LoudnessSummary>,
    #[serde(default)]
    pub waveform: Option<Waveform>,
    #[serde(default)]
    pub snapshots: Vec<SnapshotImage>,
    #[serde(default)]
    pub command_lines: Vec<CommandLine>,
    #[serde(default)]
    pub versions: BTreeMap<String, String>,
}

impl AnalysisResult {
    pub fn new(source_name: impl Into<String>) -> Self {
        Self { source_name: source_name.into(), ..Self::default() }
    }

    pub fn from_json_str(json: &str) -> ExportResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: &Path) -> ExportResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// File stem of the source, used as the default artifact base name.
    pub fn base_name(&self) -> String {
        Path::new(&self.source_name)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "export".to_string())
    }

    pub fn streams(&self, kind: CodecType) -> impl Iterator<Item = &ProbeStream> {
        self.probe.iter().flat_map(|p| p.streams.iter()).filter(move |s| s.codec_type == kind)
    }

    pub fn first_video_stream(&self) -> Option<&ProbeStream> {
        self.streams(CodecType::Video).next()
    }

    /// Resolution of the first video stream, if known.
    pub fn video_resolution(&self) -> Option<(u32, u32)> {
        self.first_video_stream().and_then(ProbeStream::resolution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_document_parses() {
        let r = AnalysisResult::from_json_str(r#"{"source_name":"/media/clip.mov"}"#).unwrap();
        assert_eq!(r.base_name(), "clip");
        assert!(r.probe.is_none());
        assert!(r.filters.is_none());
    }

    #[test]
    fn filters_with_missing_streams_default_to_empty() {
        let json = r#"{"source_name":"a.mkv","filters":{"ebur128":[{"t":0.1,"momentary":"-inf","short_term":-30.5}]}}"#;
        let r = AnalysisResult::from_json_str(json).unwrap();
        let f = r.filters.unwrap();
        assert_eq!(f.ebur128.len(), 1);
        assert_eq!(f.ebur128[0].momentary, f64::NEG_INFINITY);
        assert!(f.ebur128[0].integrated.is_nan());
        assert!(f.siti.is_empty());
        assert!(f.idet.is_none());
    }

    #[test]
    fn snapshots_are_base64() {
        let json = r#"{"source_name":"a","snapshots":[{"name":"mid","width":2,"height":2,"jpeg":"/9j/"}]}"#;
        let r = AnalysisResult::from_json_str(json).unwrap();
        assert_eq!(r.snapshots[0].jpeg, vec![0xff, 0xd8, 0xff]);
    }
}
