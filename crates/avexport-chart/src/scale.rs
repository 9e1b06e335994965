// File: crates/avexport-chart/src/scale.rs
// Summary: Time (X) and Value (Y) scale transforms from data space to plot pixels.

use crate::axis::{RangeAxis, ScaleKind};

/// Horizontal time scale mapping `[start, end]` seconds to `[left_px, right_px]`.
#[derive(Clone, Copy, Debug)]
pub struct TimeScale {
    pub left_px: f32,
    pub right_px: f32,
    pub start: f64,
    pub end: f64,
}

impl TimeScale {
    pub fn new(left_px: f32, right_px: f32, start: f64, end: f64) -> Self {
        Self { left_px, right_px, start, end }
    }
    #[inline]
    pub fn to_px(&self, t: f64) -> f32 {
        let span = (self.end - self.start).max(1e-12);
        self.left_px + ((t - self.start) / span) as f32 * (self.right_px - self.left_px)
    }
    #[inline]
    pub fn from_px(&self, px: f32) -> f64 {
        let w = (self.right_px - self.left_px).max(1.0);
        self.start + ((px - self.left_px) / w) as f64 * (self.end - self.start)
    }
}

/// Vertical value scale mapping data range to [top, bottom] pixels.
#[derive(Clone, Copy, Debug)]
pub struct ValueScale {
    pub top_px: f32,
    pub bottom_px: f32,
    pub vmin: f64,
    pub vmax: f64,
    pub log: bool,
    // cached log endpoints when log is true
    log_min: f64,
    log_max: f64,
}

impl ValueScale {
    pub fn for_axis(top_px: f32, bottom_px: f32, axis: &RangeAxis, kind: ScaleKind) -> Self {
        match kind {
            ScaleKind::Linear => Self::new_linear(top_px, bottom_px, axis.low, axis.high),
            ScaleKind::Log10 => Self::new_log10(top_px, bottom_px, axis.low, axis.high),
        }
    }
    pub fn new_linear(top_px: f32, bottom_px: f32, vmin: f64, vmax: f64) -> Self {
        let mut s = Self { top_px, bottom_px, vmin, vmax, log: false, log_min: 0.0, log_max: 0.0 };
        if (s.vmax - s.vmin).abs() < 1e-12 { s.vmax = s.vmin + 1.0; }
        s
    }
    pub fn new_log10(top_px: f32, bottom_px: f32, mut vmin: f64, mut vmax: f64) -> Self {
        // Ensure strictly positive range for log scale; a range starting at
        // zero (automatic axes) is drawn from 1.0.
        let floor = 1.0;
        vmin = if vmin < floor { floor.min(vmax.max(1e-12)) } else { vmin };
        vmax = if vmax <= vmin { vmin * 10.0 } else { vmax };
        let log_min = vmin.log10();
        let log_max = vmax.log10();
        Self { top_px, bottom_px, vmin, vmax, log: true, log_min, log_max }
    }
    #[inline]
    pub fn to_px(&self, y: f64) -> f32 {
        if self.log {
            let yy = y.max(self.vmin).log10();
            let span = (self.log_max - self.log_min).max(1e-12);
            self.bottom_px - ((yy - self.log_min) / span) as f32 * (self.bottom_px - self.top_px)
        } else {
            let span = (self.vmax - self.vmin).max(1e-12);
            self.bottom_px - ((y - self.vmin) / span) as f32 * (self.bottom_px - self.top_px)
        }
    }
    #[inline]
    pub fn from_px(&self, py: f32) -> f64 {
        if self.log {
            let span = (self.log_max - self.log_min).max(1e-12);
            let yy = self.log_min + ((self.bottom_px - py) / (self.bottom_px - self.top_px)) as f64 * span;
            10f64.powf(yy)
        } else {
            let span = (self.vmax - self.vmin).max(1e-12);
            self.vmin + ((self.bottom_px - py) / (self.bottom_px - self.top_px)) as f64 * span
        }
    }
    /// Pixel row of the histogram origin: zero when in range, else the bottom.
    pub fn origin_px(&self) -> f32 {
        if !self.log && self.vmin < 0.0 && self.vmax > 0.0 {
            self.to_px(0.0)
        } else {
            self.bottom_px
        }
    }
}
