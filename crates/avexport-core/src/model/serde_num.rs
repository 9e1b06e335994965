// File: crates/avexport-core/src/model/serde_num.rs
// Summary: Lenient numeric and base64 field codecs for the analysis result JSON.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Num(f64),
    Text(String),
}

fn parse_text(s: &str) -> Option<f64> {
    match s.trim() {
        "NaN" | "nan" => Some(f64::NAN),
        "Infinity" | "inf" | "+inf" => Some(f64::INFINITY),
        "-Infinity" | "-inf" => Some(f64::NEG_INFINITY),
        other => other.parse().ok(),
    }
}

/// Number, numeric string, `"NaN"`/`"Infinity"`/`"-Infinity"`, or `null` (read as NaN).
pub fn lenient_f64<'de, D>(de: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawNumber>::deserialize(de)? {
        None => Ok(f64::NAN),
        Some(RawNumber::Num(v)) => Ok(v),
        Some(RawNumber::Text(s)) => {
            parse_text(&s).ok_or_else(|| D::Error::custom(format!("not a number: `{s}`")))
        }
    }
}

pub fn nan() -> f64 {
    f64::NAN
}

pub mod base64_bytes {
    use super::*;

    pub fn serialize<S: Serializer>(bytes: &[u8], ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(de)?;
        STANDARD.decode(s.as_bytes()).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(deserialize_with = "lenient_f64")]
        v: f64,
    }

    fn read(json: &str) -> f64 {
        serde_json::from_str::<Probe>(json).map(|p| p.v).unwrap()
    }

    #[test]
    fn accepts_special_strings() {
        assert!(read(r#"{"v":"NaN"}"#).is_nan());
        assert_eq!(read(r#"{"v":"-inf"}"#), f64::NEG_INFINITY);
        assert_eq!(read(r#"{"v":"Infinity"}"#), f64::INFINITY);
        assert_eq!(read(r#"{"v":"-24.5"}"#), -24.5);
        assert_eq!(read(r#"{"v":3}"#), 3.0);
        assert!(read(r#"{"v":null}"#).is_nan());
    }

    #[test]
    fn rejects_garbage() {
        assert!(serde_json::from_str::<Probe>(r#"{"v":"abc"}"#).is_err());
    }
}
