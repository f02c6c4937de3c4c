//! Forgiving field readers for preset documents
//!
//! Preset files are hand-edited and written by older versions, so a field
//! holding the wrong JSON type reads as absent instead of failing the whole
//! document. Use with `#[serde(default, deserialize_with = "...")]`.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use textlab_core::coerce::parse_int;

/// Integers, floats (truncated) and numeric strings
pub(crate) fn int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|v| v.is_finite()).map(|v| v.trunc() as i64)),
        Value::String(s) => parse_int(&s),
        Value::Bool(b) => Some(b as i64),
        _ => None,
    })
}

/// Numbers and numeric strings
pub(crate) fn float<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite()))
}

/// Booleans, numbers (non-zero is true) and `"true"`/`"false"` strings
pub(crate) fn boolean<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Bool(b) => Some(b),
        Value::Number(n) => n.as_f64().map(|v| v != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    })
}

/// Strings; numbers are kept in their JSON spelling
pub(crate) fn string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Fields {
        #[serde(default, deserialize_with = "super::int")]
        int: Option<i64>,
        #[serde(default, deserialize_with = "super::float")]
        float: Option<f64>,
        #[serde(default, deserialize_with = "super::boolean")]
        flag: Option<bool>,
        #[serde(default, deserialize_with = "super::string")]
        name: Option<String>,
    }

    fn read(json: &str) -> Fields {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_well_typed() {
        let f = read(r#"{"int": 5, "float": 1.5, "flag": false, "name": "x"}"#);
        assert_eq!(f.int, Some(5));
        assert_eq!(f.float, Some(1.5));
        assert_eq!(f.flag, Some(false));
        assert_eq!(f.name.as_deref(), Some("x"));
    }

    #[test]
    fn test_coerced() {
        let f = read(r#"{"int": " 42 ", "float": "3", "flag": 1, "name": 7}"#);
        assert_eq!(f.int, Some(42));
        assert_eq!(f.float, Some(3.0));
        assert_eq!(f.flag, Some(true));
        assert_eq!(f.name.as_deref(), Some("7"));

        assert_eq!(read(r#"{"int": 9.9}"#).int, Some(9));
    }

    #[test]
    fn test_junk_reads_as_absent() {
        let f = read(r#"{"int": "abc", "float": [], "flag": "maybe", "name": null}"#);
        assert_eq!(f.int, None);
        assert_eq!(f.float, None);
        assert_eq!(f.flag, None);
        assert_eq!(f.name, None);
    }

    #[test]
    fn test_missing_fields() {
        let f = read("{}");
        assert!(f.int.is_none() && f.float.is_none() && f.flag.is_none() && f.name.is_none());
    }
}
