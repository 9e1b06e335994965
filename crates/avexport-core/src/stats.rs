// File: crates/avexport-core/src/stats.rs
// Summary: Min/max/median/average over numeric streams, formatted for reports, with an empty sentinel.

use crate::format::{format_number, NumberLocale, Unit};

/// Raw summary of one finite-or-infinite stream; NaN samples are dropped beforehand.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    /// Element at sorted index `n / 2`, never interpolated.
    pub median: f64,
    pub average: f64,
}

/// Consume `values` once into a buffer, then derive all four figures from it.
pub fn summarize<I>(values: I) -> Option<Summary>
where
    I: IntoIterator<Item = f64>,
{
    let mut sorted: Vec<f64> = values.into_iter().filter(|v| !v.is_nan()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_unstable_by(f64::total_cmp);
    let count = sorted.len();
    let sum: f64 = sorted.iter().sum();
    let min = sorted[0];
    let max = sorted[count - 1];
    let average = if sum.is_nan() {
        // Only opposite infinities sum to NaN, so min is -inf and max is +inf.
        0.0
    } else {
        // Rounding can push a plain mean past the extremes.
        (sum / count as f64).clamp(min, max)
    };
    Some(Summary { count, min, max, median: sorted[count / 2], average })
}

#[derive(Clone, Debug, PartialEq)]
pub struct StatValue {
    pub value: f64,
    pub formatted: String,
    /// Whether the unit label takes its plural form.
    pub plural: bool,
}

impl StatValue {
    fn new(value: f64, locale: NumberLocale) -> Self {
        Self { value, formatted: format_number(value, locale), plural: value > 1.0 }
    }

    pub fn display(&self, unit: Unit) -> String {
        unit.with_value(&self.formatted, self.plural)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct StatValues {
    pub count: usize,
    pub min: StatValue,
    pub max: StatValue,
    pub median: StatValue,
    pub average: StatValue,
}

/// Precomputed statistics for one metric; `values == None` is the "no data" sentinel.
#[derive(Clone, Debug, PartialEq)]
pub struct StatisticsUnitValueReportEntry {
    pub key: String,
    pub unit: Unit,
    pub values: Option<StatValues>,
}

impl StatisticsUnitValueReportEntry {
    pub fn from_values<I>(key: impl Into<String>, unit: Unit, values: I, locale: NumberLocale) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let values = summarize(values).map(|s| StatValues {
            count: s.count,
            min: StatValue::new(s.min, locale),
            max: StatValue::new(s.max, locale),
            median: StatValue::new(s.median, locale),
            average: StatValue::new(s.average, locale),
        });
        Self { key: key.into(), unit, values }
    }

    pub fn empty(key: impl Into<String>, unit: Unit) -> Self {
        Self { key: key.into(), unit, values: None }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_none()
    }
}
