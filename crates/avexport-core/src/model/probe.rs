// File: crates/avexport-core/src/model/probe.rs
// Summary: Container and stream metadata as reported by the probe tool.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ProbeMetadata {
    pub format_name: String,
    #[serde(default)]
    pub format_long_name: Option<String>,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub bit_rate: Option<u64>,
    #[serde(default)]
    pub streams: Vec<ProbeStream>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodecType {
    Video,
    Audio,
    Subtitle,
    Data,
    #[serde(other)]
    Other,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProbeStream {
    pub index: u32,
    pub codec_type: CodecType,
    #[serde(default)]
    pub codec_name: Option<String>,
    #[serde(default)]
    pub profile: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub display_aspect_ratio: Option<String>,
    #[serde(default)]
    pub pix_fmt: Option<String>,
    #[serde(default)]
    pub avg_frame_rate: Option<String>,
    #[serde(default)]
    pub sample_rate: Option<u32>,
    #[serde(default)]
    pub channels: Option<u32>,
    #[serde(default)]
    pub channel_layout: Option<String>,
    #[serde(default)]
    pub bit_rate: Option<u64>,
}

impl ProbeStream {
    pub fn new(index: u32, codec_type: CodecType) -> Self {
        Self {
            index,
            codec_type,
            codec_name: None,
            profile: None,
            width: None,
            height: None,
            display_aspect_ratio: None,
            pix_fmt: None,
            avg_frame_rate: None,
            sample_rate: None,
            channels: None,
            channel_layout: None,
            bit_rate: None,
        }
    }

    /// `(width, height)` when both are known and non-zero.
    pub fn resolution(&self) -> Option<(u32, u32)> {
        match (self.width, self.height) {
            (Some(w), Some(h)) if w > 0 && h > 0 => Some((w, h)),
            _ => None,
        }
    }

    /// Frame rate from a rational like `"30000/1001"`; `None` when malformed or `0/0`.
    pub fn frame_rate(&self) -> Option<f64> {
        self.avg_frame_rate.as_deref().and_then(parse_rational)
    }

    /// Aspect ratio from `"16:9"`; `None` when malformed.
    pub fn aspect_ratio(&self) -> Option<f64> {
        let dar = self.display_aspect_ratio.as_deref()?;
        let (n, d) = dar.split_once(':')?;
        ratio(n, d)
    }
}

pub(crate) fn parse_rational(s: &str) -> Option<f64> {
    match s.split_once('/') {
        Some((n, d)) => ratio(n, d),
        None => s.trim().parse::<f64>().ok().filter(|v| v.is_finite() && *v > 0.0),
    }
}

fn ratio(n: &str, d: &str) -> Option<f64> {
    let n: f64 = n.trim().parse().ok()?;
    let d: f64 = d.trim().parse().ok()?;
    if d == 0.0 || n <= 0.0 {
        return None;
    }
    Some(n / d)
}
