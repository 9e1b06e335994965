// File: crates/avexport-chart/src/grid.rs
// Summary: Grid/tick layout helpers and tick label formatting.

use chrono::TimeDelta;

pub fn linspace(start: f64, end: f64, steps: usize) -> Vec<f64> {
    if steps < 2 { return vec![start, end]; }
    let step = (end - start) / (steps as f64 - 1.0);
    (0..steps).map(|i| start + step * i as f64).collect()
}

/// `HH:MM:SS` for a time tick in seconds; negative values keep their sign.
pub fn format_time_tick(seconds: f64) -> String {
    if !seconds.is_finite() {
        return String::new();
    }
    let delta = TimeDelta::milliseconds((seconds.abs() * 1000.0).round() as i64);
    let sign = if seconds < 0.0 { "-" } else { "" };
    format!(
        "{sign}{:02}:{:02}:{:02}",
        delta.num_hours(),
        delta.num_minutes() % 60,
        delta.num_seconds() % 60
    )
}

/// Compact label for a value tick: integers without decimals, large values with a suffix.
pub fn format_value_tick(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1e9 {
        format!("{:.1}G", value / 1e9)
    } else if abs >= 1e6 {
        format!("{:.1}M", value / 1e6)
    } else if abs >= 1e4 {
        format!("{:.0}k", value / 1e3)
    } else if (value - value.round()).abs() < 1e-9 {
        format!("{:.0}", value)
    } else if abs >= 10.0 {
        format!("{:.1}", value)
    } else {
        format!("{:.2}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linspace_includes_both_ends() {
        assert_eq!(linspace(0.0, 10.0, 3), vec![0.0, 5.0, 10.0]);
    }

    #[test]
    fn time_ticks() {
        assert_eq!(format_time_tick(0.0), "00:00:00");
        assert_eq!(format_time_tick(3725.4), "01:02:05");
        assert_eq!(format_time_tick(-61.0), "-00:01:01");
    }

    #[test]
    fn value_ticks() {
        assert_eq!(format_value_tick(-23.0), "-23");
        assert_eq!(format_value_tick(12.34), "12.3");
        assert_eq!(format_value_tick(0.126), "0.13");
        assert_eq!(format_value_tick(2_500_000.0), "2.5M");
    }
}
