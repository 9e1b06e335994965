// File: crates/avexport-chart/src/axis.rs
// Summary: Value range axis with its two construction policies (fixed anchor, automatic from values).

use crate::error::{ChartError, ChartResult};

/// How values are mapped to pixels. Presentation only: a log scale never
/// changes the bounds stored in a [`RangeAxis`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScaleKind {
    #[default]
    Linear,
    Log10,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RangeAxis {
    pub label: String,
    pub low: f64,
    pub high: f64,
}

impl RangeAxis {
    pub fn new(label: impl Into<String>, low: f64, high: f64) -> Self {
        Self { label: label.into(), low, high }
    }

    /// Range centred on `anchor`, `pad_count` steps of `step` on each side.
    ///
    /// Used for charts with a known reference value, e.g. a loudness target.
    pub fn fixed(label: impl Into<String>, anchor: f64, pad_count: u32, step: f64) -> Self {
        let pad = f64::from(pad_count) * step.abs();
        Self::new(label, anchor - pad, anchor + pad)
    }

    /// Range derived from the finite values of `values`, consumed once.
    ///
    /// `low = min(0, observed_min)`; `high` is the observed maximum plus a
    /// tenth of the span, never less than `min_pad`. A non-positive pad
    /// falls back to `1.0` so a constant series still gets headroom.
    pub fn automatic<I>(label: impl Into<String>, values: I, min_pad: f64) -> ChartResult<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let label = label.into();
        let mut observed_min = f64::INFINITY;
        let mut observed_max = f64::NEG_INFINITY;
        let mut any = false;
        for v in values.into_iter().filter(|v| v.is_finite()) {
            observed_min = observed_min.min(v);
            observed_max = observed_max.max(v);
            any = true;
        }
        if !any {
            return Err(ChartError::EmptyRange { label });
        }

        let low = observed_min.min(0.0);
        let span = observed_max - low;
        let mut pad = (span / 10.0).max(min_pad);
        if pad <= 0.0 || !pad.is_finite() {
            pad = 1.0;
        }
        Ok(Self::new(label, low, observed_max + pad))
    }

    pub fn span(&self) -> f64 {
        self.high - self.low
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.low && value <= self.high
    }
}
