// File: crates/avexport-core/src/model/container.rs
// Summary: Per-frame and per-packet container listings.

use serde::{Deserialize, Serialize};

use super::serde_num::lenient_f64;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ContainerAnalysis {
    #[serde(default)]
    pub frames: Vec<ContainerFrame>,
    #[serde(default)]
    pub packets: Vec<ContainerPacket>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Video,
    Audio,
    #[serde(other)]
    Other,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ContainerFrame {
    pub media_type: MediaType,
    pub stream_index: u32,
    #[serde(deserialize_with = "lenient_f64")]
    pub pts_time: f64,
    pub pkt_size: u64,
    #[serde(default)]
    pub key_frame: bool,
    /// `I`, `P`, `B` or anything else the encoder reports; video only.
    #[serde(default)]
    pub pict_type: Option<String>,
    #[serde(default)]
    pub nb_samples: Option<u32>,
}

impl ContainerFrame {
    pub fn is_video(&self) -> bool {
        self.media_type == MediaType::Video
    }

    pub fn is_audio(&self) -> bool {
        self.media_type == MediaType::Audio
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ContainerPacket {
    pub stream_index: u32,
    #[serde(deserialize_with = "lenient_f64")]
    pub pts_time: f64,
    #[serde(default = "super::serde_num::nan", deserialize_with = "lenient_f64")]
    pub dts_time: f64,
    #[serde(default = "super::serde_num::nan", deserialize_with = "lenient_f64")]
    pub duration_time: f64,
    pub size: u64,
    #[serde(default)]
    pub key: bool,
}
