//! Stored Value Module
//!
//! Values accepted by the keyed cache and their byte encoding on the wire.

use std::fmt;

use serde::Deserialize;

// == Stored Value ==
/// A value the cache can write to the key-value store.
///
/// Deserialization is untagged so JSON `"text"`, `42`, `4.2` and `[1, 2]` map
/// to text, integer, float and bytes respectively.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum StoredValue {
    Int(i64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
}

impl StoredValue {
    // == Encode ==
    /// Encodes the value the way Redis clients write it: UTF-8 text and
    /// decimal integers.
    ///
    /// Floats use Rust's `Debug` formatting, which always keeps a fractional
    /// part or exponent: `3.0`, `1e20`, `NaN`, `inf`, `-inf`. Every one of
    /// these parses back with `str::parse::<f64>`.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            StoredValue::Text(s) => s.as_bytes().to_vec(),
            StoredValue::Bytes(b) => b.clone(),
            StoredValue::Int(i) => i.to_string().into_bytes(),
            StoredValue::Float(f) => format!("{f:?}").into_bytes(),
        }
    }
}

impl fmt::Display for StoredValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoredValue::Text(s) => write!(f, "{s}"),
            StoredValue::Bytes(b) => write!(f, "{}", String::from_utf8_lossy(b)),
            StoredValue::Int(i) => write!(f, "{i}"),
            StoredValue::Float(x) => write!(f, "{x:?}"),
        }
    }
}

impl From<&str> for StoredValue {
    fn from(value: &str) -> Self {
        StoredValue::Text(value.to_string())
    }
}

impl From<String> for StoredValue {
    fn from(value: String) -> Self {
        StoredValue::Text(value)
    }
}

impl From<Vec<u8>> for StoredValue {
    fn from(value: Vec<u8>) -> Self {
        StoredValue::Bytes(value)
    }
}

impl From<&[u8]> for StoredValue {
    fn from(value: &[u8]) -> Self {
        StoredValue::Bytes(value.to_vec())
    }
}

impl From<i64> for StoredValue {
    fn from(value: i64) -> Self {
        StoredValue::Int(value)
    }
}

impl From<i32> for StoredValue {
    fn from(value: i32) -> Self {
        StoredValue::Int(i64::from(value))
    }
}

impl From<f64> for StoredValue {
    fn from(value: f64) -> Self {
        StoredValue::Float(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_text_and_bytes() {
        assert_eq!(StoredValue::from("foo").to_bytes(), b"foo".to_vec());
        assert_eq!(StoredValue::from(vec![0u8, 255]).to_bytes(), vec![0u8, 255]);
    }

    #[test]
    fn test_encode_numbers() {
        assert_eq!(StoredValue::from(42).to_bytes(), b"42".to_vec());
        assert_eq!(StoredValue::from(-7i64).to_bytes(), b"-7".to_vec());
        assert_eq!(StoredValue::from(3.0).to_bytes(), b"3.0".to_vec());
        assert_eq!(StoredValue::from(0.25).to_bytes(), b"0.25".to_vec());
    }

    #[test]
    fn test_deserialize_untagged() {
        let v: StoredValue = serde_json::from_str("12").unwrap();
        assert_eq!(v, StoredValue::Int(12));

        let v: StoredValue = serde_json::from_str("1.5").unwrap();
        assert_eq!(v, StoredValue::Float(1.5));

        let v: StoredValue = serde_json::from_str(r#""hello""#).unwrap();
        assert_eq!(v, StoredValue::Text("hello".to_string()));

        let v: StoredValue = serde_json::from_str("[104, 105]").unwrap();
        assert_eq!(v, StoredValue::Bytes(b"hi".to_vec()));
    }

    #[test]
    fn test_encode_float_edge_cases_parse_back() {
        for (value, text) in [
            (1e20, "1e20"),
            (f64::INFINITY, "inf"),
            (f64::NEG_INFINITY, "-inf"),
            (-0.5, "-0.5"),
        ] {
            let bytes = StoredValue::Float(value).to_bytes();
            assert_eq!(bytes, text.as_bytes());
            let parsed: f64 = std::str::from_utf8(&bytes).unwrap().parse().unwrap();
            assert_eq!(parsed, value);
        }

        let nan = StoredValue::Float(f64::NAN).to_bytes();
        assert_eq!(nan, b"NaN");
        assert!(std::str::from_utf8(&nan).unwrap().parse::<f64>().unwrap().is_nan());
    }

    #[test]
    fn test_display() {
        assert_eq!(StoredValue::from("abc").to_string(), "abc");
        assert_eq!(StoredValue::from(2.5).to_string(), "2.5");
    }
}
