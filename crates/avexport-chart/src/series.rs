// File: crates/avexport-chart/src/series.rs
// Summary: Named value series bound to a timed graphic (line or histogram), with color and stroke.

use skia_safe::Color;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeriesType {
    Line,
    Histogram, // bars from the range floor (or 0.0 when in range)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub width: f32,
    pub dashed: bool,
}

impl Stroke {
    pub const THIN: Stroke = Stroke { width: 1.0, dashed: false };
    pub const NORMAL: Stroke = Stroke { width: 2.0, dashed: false };
    pub const DASHED: Stroke = Stroke { width: 1.5, dashed: true };
}

impl Default for Stroke {
    fn default() -> Self {
        Self::NORMAL
    }
}

/// One named series. Values are aligned index-by-index with the owning
/// graphic's time axis; NaN marks a gap.
#[derive(Clone, Debug)]
pub struct Series {
    pub name: String,
    pub color: Color,
    pub stroke: Stroke,
    pub series_type: SeriesType,
    pub values: Vec<f64>,
}

impl Series {
    pub fn line(name: impl Into<String>, color: Color, values: Vec<f64>) -> Self {
        Self { name: name.into(), color, stroke: Stroke::default(), series_type: SeriesType::Line, values }
    }

    pub fn histogram(name: impl Into<String>, color: Color, values: Vec<f64>) -> Self {
        Self { name: name.into(), color, stroke: Stroke::THIN, series_type: SeriesType::Histogram, values }
    }

    pub fn with_stroke(mut self, stroke: Stroke) -> Self {
        self.stroke = stroke;
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Split into runs of finite `(x, y)` points; a non-finite sample ends a run.
    pub fn finite_runs(&self, times: &[f64]) -> Vec<Vec<(f64, f64)>> {
        self.runs(times, |v| v)
    }

    /// Like [`Series::finite_runs`], with infinite samples pinned to `[lo, hi]`
    /// instead of breaking the run.
    pub fn pinned_runs(&self, times: &[f64], lo: f64, hi: f64) -> Vec<Vec<(f64, f64)>> {
        self.runs(times, |v| if v.is_infinite() { crate::geometry::clamp(v, lo, hi) } else { v })
    }

    fn runs(&self, times: &[f64], pin: impl Fn(f64) -> f64) -> Vec<Vec<(f64, f64)>> {
        let mut runs = Vec::new();
        let mut current = Vec::new();
        for (&t, &v) in times.iter().zip(&self.values) {
            let v = pin(v);
            if v.is_finite() && t.is_finite() {
                current.push((t, v));
            } else if !current.is_empty() {
                runs.push(std::mem::take(&mut current));
            }
        }
        if !current.is_empty() {
            runs.push(current);
        }
        runs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finite_runs_break_on_nan() {
        let s = Series::line("s", Color::BLACK, vec![1.0, 2.0, f64::NAN, 3.0]);
        let runs = s.finite_runs(&[0.0, 1.0, 2.0, 3.0]);
        assert_eq!(runs, vec![vec![(0.0, 1.0), (1.0, 2.0)], vec![(3.0, 3.0)]]);
    }

    #[test]
    fn pinned_runs_keep_infinite_samples() {
        let s = Series::line("s", Color::BLACK, vec![1.0, f64::NEG_INFINITY, 3.0]);
        let runs = s.pinned_runs(&[0.0, 1.0, 2.0], -10.0, 10.0);
        assert_eq!(runs, vec![vec![(0.0, 1.0), (1.0, -10.0), (2.0, 3.0)]]);
    }
}
