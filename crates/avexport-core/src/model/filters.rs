// File: crates/avexport-core/src/model/filters.rs
// Summary: Per-filter metric streams (loudness, audio stats, phase, SI/TI, detectors, idet).

use serde::{Deserialize, Serialize};

use super::serde_num::{lenient_f64, nan};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterMetrics {
    pub ebur128: Vec<LoudnessEvent>,
    pub astats: Vec<AudioStatsFrame>,
    pub aphasemeter: Vec<PhaseFrame>,
    pub siti: Vec<SitiFrame>,
    pub blockdetect: Vec<ScoreFrame>,
    pub blurdetect: Vec<ScoreFrame>,
    pub cropdetect: Vec<CropFrame>,
    pub idet: Option<IdetSummary>,
    pub silencedetect: Vec<TimeRangeEvent>,
    pub blackdetect: Vec<TimeRangeEvent>,
    pub freezedetect: Vec<TimeRangeEvent>,
}

/// One ebur128 measurement window.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoudnessEvent {
    #[serde(deserialize_with = "lenient_f64")]
    pub t: f64,
    #[serde(default = "nan", deserialize_with = "lenient_f64")]
    pub momentary: f64,
    #[serde(default = "nan", deserialize_with = "lenient_f64")]
    pub short_term: f64,
    #[serde(default = "nan", deserialize_with = "lenient_f64")]
    pub integrated: f64,
    #[serde(default = "nan", deserialize_with = "lenient_f64")]
    pub lra: f64,
    #[serde(default = "nan", deserialize_with = "lenient_f64")]
    pub sample_peak: f64,
    #[serde(default = "nan", deserialize_with = "lenient_f64")]
    pub true_peak: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AudioStatsFrame {
    pub frame: u64,
    #[serde(deserialize_with = "lenient_f64")]
    pub pts_time: f64,
    #[serde(default)]
    pub channels: Vec<AudioChannelStats>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AudioChannelStats {
    #[serde(default = "nan", deserialize_with = "lenient_f64")]
    pub rms_level: f64,
    #[serde(default = "nan", deserialize_with = "lenient_f64")]
    pub peak_level: f64,
    #[serde(default = "nan", deserialize_with = "lenient_f64")]
    pub dc_offset: f64,
    #[serde(default = "nan", deserialize_with = "lenient_f64")]
    pub noise_floor: f64,
    #[serde(default = "nan", deserialize_with = "lenient_f64")]
    pub entropy: f64,
    #[serde(default = "nan", deserialize_with = "lenient_f64")]
    pub flat_factor: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PhaseFrame {
    pub frame: u64,
    #[serde(deserialize_with = "lenient_f64")]
    pub pts_time: f64,
    #[serde(default = "nan", deserialize_with = "lenient_f64")]
    pub phase: f64,
}

/// Spatial / temporal information of one frame.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SitiFrame {
    pub frame: u64,
    #[serde(deserialize_with = "lenient_f64")]
    pub pts_time: f64,
    #[serde(default = "nan", deserialize_with = "lenient_f64")]
    pub si: f64,
    #[serde(default = "nan", deserialize_with = "lenient_f64")]
    pub ti: f64,
}

/// A single per-frame score (blockiness, blurriness).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScoreFrame {
    pub frame: u64,
    #[serde(deserialize_with = "lenient_f64")]
    pub pts_time: f64,
    #[serde(default = "nan", deserialize_with = "lenient_f64")]
    pub value: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CropFrame {
    pub frame: u64,
    #[serde(deserialize_with = "lenient_f64")]
    pub pts_time: f64,
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdetCounts {
    pub tff: u64,
    pub bff: u64,
    pub progressive: u64,
    pub undetermined: u64,
}

impl IdetCounts {
    pub fn total(&self) -> u64 {
        self.tff + self.bff + self.progressive + self.undetermined
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IdetSummary {
    pub single: IdetCounts,
    pub multi: IdetCounts,
    pub repeated_top: u64,
    pub repeated_bottom: u64,
    pub repeated_neither: u64,
}

/// A detector interval. `end` is missing when the condition lasted until EOF.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TimeRangeEvent {
    #[serde(deserialize_with = "lenient_f64")]
    pub start: f64,
    #[serde(default)]
    pub end: Option<f64>,
    #[serde(default)]
    pub duration: Option<f64>,
}

impl TimeRangeEvent {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end: Some(end), duration: Some(end - start) }
    }

    /// Reported duration, or `end - start`, or NaN when open-ended.
    pub fn duration(&self) -> f64 {
        self.duration.or_else(|| self.end.map(|e| e - self.start)).unwrap_or(f64::NAN)
    }
}

/// Whole-programme loudness figures (ebur128 summary).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoudnessSummary {
    #[serde(default = "nan", deserialize_with = "lenient_f64")]
    pub integrated: f64,
    #[serde(default = "nan", deserialize_with = "lenient_f64")]
    pub integrated_threshold: f64,
    #[serde(default = "nan", deserialize_with = "lenient_f64")]
    pub lra: f64,
    #[serde(default = "nan", deserialize_with = "lenient_f64")]
    pub lra_threshold: f64,
    #[serde(default = "nan", deserialize_with = "lenient_f64")]
    pub lra_low: f64,
    #[serde(default = "nan", deserialize_with = "lenient_f64")]
    pub lra_high: f64,
    #[serde(default = "nan", deserialize_with = "lenient_f64")]
    pub true_peak: f64,
    #[serde(default = "nan", deserialize_with = "lenient_f64")]
    pub sample_peak: f64,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Waveform {
    #[serde(default)]
    pub sample_rate: Option<u32>,
    #[serde(default)]
    pub points: Vec<WaveformPoint>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WaveformPoint {
    #[serde(deserialize_with = "lenient_f64")]
    pub pts_time: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub min: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub max: f64,
    #[serde(default = "nan", deserialize_with = "lenient_f64")]
    pub rms: f64,
}
