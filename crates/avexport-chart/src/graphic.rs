// File: crates/avexport-chart/src/graphic.rs
// Summary: Timed data graphic; one shared time axis, one range axis, N aligned series.

use std::rc::Rc;

use crate::axis::{RangeAxis, ScaleKind};
use crate::chart::{render_png, RenderOptions};
use crate::error::{ChartError, ChartResult};
use crate::series::Series;

/// A chart whose X positions are timestamps (seconds).
///
/// The time axis is reference counted so several graphics derived from the
/// same event stream share it instead of recomputing it.
#[derive(Clone, Debug)]
pub struct TimedDataGraphic {
    time_axis: Rc<[f64]>,
    range_axis: RangeAxis,
    scale: ScaleKind,
    series: Vec<Series>,
}

impl TimedDataGraphic {
    pub fn new(time_axis: impl Into<Rc<[f64]>>, range_axis: RangeAxis) -> Self {
        Self { time_axis: time_axis.into(), range_axis, scale: ScaleKind::Linear, series: Vec::new() }
    }

    pub fn from_times<I: IntoIterator<Item = f64>>(times: I, range_axis: RangeAxis) -> Self {
        Self::new(times.into_iter().collect::<Rc<[f64]>>(), range_axis)
    }

    pub fn with_scale(mut self, scale: ScaleKind) -> Self {
        self.scale = scale;
        self
    }

    /// Second graphic on the same X positions with another value range, no series.
    pub fn with_range_axis(&self, range_axis: RangeAxis) -> Self {
        Self {
            time_axis: Rc::clone(&self.time_axis),
            range_axis,
            scale: self.scale,
            series: Vec::new(),
        }
    }

    pub fn add_series(&mut self, series: Series) -> ChartResult<()> {
        if series.len() != self.time_axis.len() {
            return Err(ChartError::SeriesLengthMismatch {
                series: series.name,
                expected: self.time_axis.len(),
                actual: series.values.len(),
            });
        }
        self.series.push(series);
        Ok(())
    }

    pub fn time_axis(&self) -> &[f64] {
        &self.time_axis
    }

    pub fn range_axis(&self) -> &RangeAxis {
        &self.range_axis
    }

    pub fn scale(&self) -> ScaleKind {
        self.scale
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    pub fn len(&self) -> usize {
        self.time_axis.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time_axis.is_empty() || self.series.is_empty()
    }

    pub fn shares_time_axis_with(&self, other: &TimedDataGraphic) -> bool {
        Rc::ptr_eq(&self.time_axis, &other.time_axis)
    }

    /// First and last timestamps, widened to a non-empty interval.
    pub fn time_bounds(&self) -> (f64, f64) {
        let first = self.time_axis.iter().copied().find(|t| t.is_finite()).unwrap_or(0.0);
        let last = self.time_axis.iter().rev().copied().find(|t| t.is_finite()).unwrap_or(first);
        if last - first > 1e-9 {
            (first, last)
        } else {
            (first, first + 1.0)
        }
    }

    pub fn render_png(&self, opts: &RenderOptions) -> ChartResult<Vec<u8>> {
        render_png(self, opts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skia_safe::Color;

    #[test]
    fn derived_graphic_shares_time_axis() {
        let g = TimedDataGraphic::from_times([0.0, 1.0, 2.0], RangeAxis::new("a", 0.0, 1.0));
        let other = g.with_range_axis(RangeAxis::new("b", -1.0, 1.0));
        assert!(g.shares_time_axis_with(&other));
        assert_eq!(other.range_axis().label, "b");
        assert!(other.series().is_empty());
    }

    #[test]
    fn mismatched_series_is_rejected() {
        let mut g = TimedDataGraphic::from_times([0.0, 1.0, 2.0], RangeAxis::new("a", 0.0, 1.0));
        let err = g.add_series(Series::line("s", Color::RED, vec![1.0])).unwrap_err();
        assert!(matches!(err, ChartError::SeriesLengthMismatch { expected: 3, actual: 1, .. }));
        g.add_series(Series::line("s", Color::RED, vec![1.0, 2.0, 3.0])).unwrap();
        assert_eq!(g.series().len(), 1);
    }

    #[test]
    fn time_bounds_never_collapse() {
        let g = TimedDataGraphic::from_times([5.0], RangeAxis::new("a", 0.0, 1.0));
        assert_eq!(g.time_bounds(), (5.0, 6.0));
    }
}
