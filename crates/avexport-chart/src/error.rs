// File: crates/avexport-chart/src/error.rs
// Summary: Error type for axis construction, graphic assembly and rendering.

use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    /// An automatic range was asked for over a stream without any finite value.
    #[error("cannot build range axis '{label}' from an empty value stream")]
    EmptyRange { label: String },

    #[error("series '{series}' has {actual} values but the time axis has {expected}")]
    SeriesLengthMismatch {
        series: String,
        expected: usize,
        actual: usize,
    },

    #[error("failed to create a {width}x{height} raster surface")]
    Surface { width: i32, height: i32 },

    #[error("failed to read back rendered pixels")]
    ReadPixels,

    #[error("encode PNG failed: {0}")]
    Encode(#[from] image::ImageError),
}
