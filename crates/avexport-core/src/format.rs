// File: crates/avexport-core/src/format.rs
// Summary: Locale-aware number text, the non-finite placeholders, timecodes and JSON key normalisation.

use chrono::TimeDelta;
use serde::Deserialize;

/// Stand-in for `+inf` in every text and table output; `-inf` becomes its negation.
pub const INFINITY_PLACEHOLDER: f64 = 144.0;

const MAX_DECIMALS: usize = 4;
const SIGNIFICANT_DIGITS: usize = 4;
const MAX_SMALL_DECIMALS: usize = 15;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub enum NumberLocale {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "fr")]
    French,
}

impl NumberLocale {
    pub fn decimal_separator(self) -> char {
        match self {
            NumberLocale::English => '.',
            NumberLocale::French => ',',
        }
    }
}

/// Replace infinities with the ±144 placeholder; NaN passes through.
pub fn pin_infinite(value: f64) -> f64 {
    if value == f64::INFINITY {
        INFINITY_PLACEHOLDER
    } else if value == f64::NEG_INFINITY {
        -INFINITY_PLACEHOLDER
    } else {
        value
    }
}

/// Shortest text of `value`: four decimals, or four significant digits below 1 so
/// small measurements never collapse to `0`. NaN is the empty string.
pub fn format_number(value: f64, locale: NumberLocale) -> String {
    if value.is_nan() {
        return String::new();
    }
    let value = pin_infinite(value);
    let mut s = match decimals_for(value) {
        Some(decimals) => format!("{value:.decimals$}"),
        // Shortest round-trip text for magnitudes past the fixed-point range.
        None => format!("{value}"),
    };
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.').len();
        s.truncate(trimmed);
    }
    if s == "-0" {
        s = "0".to_string();
    }
    if locale == NumberLocale::French {
        s = s.replace('.', ",");
    }
    s
}

fn decimals_for(value: f64) -> Option<usize> {
    let magnitude = value.abs();
    if magnitude == 0.0 || magnitude >= 1.0 {
        return Some(MAX_DECIMALS);
    }
    let leading_zeros = (-magnitude.log10().floor()) as usize - 1;
    let decimals = MAX_DECIMALS.max(leading_zeros + SIGNIFICANT_DIGITS);
    (decimals <= MAX_SMALL_DECIMALS).then_some(decimals)
}

/// `value` rounded to `decimals`, keeping trailing zeros (report display).
pub fn format_fixed(value: f64, decimals: usize, locale: NumberLocale) -> String {
    if value.is_nan() {
        return String::new();
    }
    let s = format!("{:.*}", decimals, pin_infinite(value));
    match locale {
        NumberLocale::English => s,
        NumberLocale::French => s.replace('.', ","),
    }
}

/// `HH:MM:SS.mmm`; empty for NaN, clamped at zero.
pub fn format_timecode(seconds: f64) -> String {
    if !seconds.is_finite() {
        return String::new();
    }
    let millis = (seconds.max(0.0) * 1000.0).round() as i64;
    let d = TimeDelta::milliseconds(millis);
    format!(
        "{:02}:{:02}:{:02}.{:03}",
        d.num_hours(),
        d.num_minutes() % 60,
        d.num_seconds() % 60,
        d.num_milliseconds() % 1000
    )
}

/// Lower-case key with runs of non-alphanumerics folded to one `_`, no leading or trailing `_`.
pub fn json_header(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut pending = false;
    for c in label.chars() {
        if c.is_alphanumeric() {
            if pending && !out.is_empty() {
                out.push('_');
            }
            pending = false;
            out.extend(c.to_lowercase());
        } else {
            pending = true;
        }
    }
    out
}

/// A measurement unit with singular and plural labels ("frame"/"frames").
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Unit {
    pub singular: &'static str,
    pub plural: &'static str,
}

impl Unit {
    pub const NONE: Unit = Unit { singular: "", plural: "" };
    pub const SECOND: Unit = Unit { singular: "second", plural: "seconds" };
    pub const FRAME: Unit = Unit { singular: "frame", plural: "frames" };
    pub const BYTE: Unit = Unit { singular: "byte", plural: "bytes" };
    pub const LUFS: Unit = Unit { singular: "LUFS", plural: "LUFS" };
    pub const LU: Unit = Unit { singular: "LU", plural: "LU" };
    pub const DBFS: Unit = Unit { singular: "dBFS", plural: "dBFS" };
    pub const DBTP: Unit = Unit { singular: "dBTP", plural: "dBTP" };
    pub const FPS: Unit = Unit { singular: "fps", plural: "fps" };
    pub const BITS_PER_SECOND: Unit = Unit { singular: "bit/s", plural: "bit/s" };
    pub const HERTZ: Unit = Unit { singular: "Hz", plural: "Hz" };
    pub const EVENT: Unit = Unit { singular: "event", plural: "events" };

    pub fn label(&self, plural: bool) -> &'static str {
        if plural {
            self.plural
        } else {
            self.singular
        }
    }

    /// `"<number> <unit>"` or just the number for unitless values.
    pub fn with_value(&self, formatted: &str, plural: bool) -> String {
        let label = self.label(plural);
        if label.is_empty() || formatted.is_empty() {
            formatted.to_string()
        } else {
            format!("{formatted} {label}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_follow_locale() {
        assert_eq!(format_number(-24.4, NumberLocale::English), "-24.4");
        assert_eq!(format_number(-24.4, NumberLocale::French), "-24,4");
        assert_eq!(format_number(12.0, NumberLocale::French), "12");
        assert_eq!(format_number(0.1 + 0.2, NumberLocale::English), "0.3");
        assert_eq!(format_number(-0.00001, NumberLocale::English), "-0.00001");
    }

    #[test]
    fn small_values_keep_significant_digits() {
        assert_eq!(format_number(0.000042, NumberLocale::English), "0.000042");
        assert_eq!(format_number(-0.0002, NumberLocale::English), "-0.0002");
        assert_eq!(format_number(0.000042, NumberLocale::French), "0,000042");
        assert_eq!(format_number(0.123456, NumberLocale::English), "0.1235");
        assert_eq!(format_number(0.00012345678, NumberLocale::English), "0.0001235");
        assert_eq!(format_number(1.5e-20, NumberLocale::English), "0.000000000000000000015");
        assert_eq!(format_number(12.000042, NumberLocale::English), "12");
    }

    #[test]
    fn non_finite_placeholders() {
        assert_eq!(format_number(f64::NAN, NumberLocale::English), "");
        assert_eq!(format_number(f64::INFINITY, NumberLocale::English), "144");
        assert_eq!(format_number(f64::NEG_INFINITY, NumberLocale::French), "-144");
        assert_eq!(pin_infinite(f64::NEG_INFINITY), -144.0);
    }

    #[test]
    fn timecodes() {
        assert_eq!(format_timecode(0.0), "00:00:00.000");
        assert_eq!(format_timecode(3725.5), "01:02:05.500");
        assert_eq!(format_timecode(f64::NAN), "");
    }

    #[test]
    fn json_headers() {
        assert_eq!(json_header("Integrated loudness (LUFS)"), "integrated_loudness_lufs");
        assert_eq!(json_header("  --Frame #  "), "frame");
        assert_eq!(json_header("SI/TI"), "si_ti");
    }

    #[test]
    fn units_pluralise() {
        assert_eq!(Unit::FRAME.with_value("3", true), "3 frames");
        assert_eq!(Unit::FRAME.with_value("1", false), "1 frame");
        assert_eq!(Unit::NONE.with_value("0.5", false), "0.5");
    }
}
