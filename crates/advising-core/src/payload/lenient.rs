//! Field deserializers for loosely typed sources.
//!
//! Use with `#[serde(default, deserialize_with = "...")]` so that an absent
//! field and a `null` both land on `None`.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Int(i64),
    Float(f64),
    Text(String),
    Flag(bool),
}

impl Scalar {
    fn into_f64(self) -> Option<f64> {
        match self {
            Self::Int(n) => Some(n as f64),
            Self::Float(n) => Some(n),
            Self::Text(s) => s.trim().parse::<f64>().ok(),
            Self::Flag(_) => None,
        }
        .filter(|n| n.is_finite())
    }

    fn into_i64(self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(n),
            Self::Float(n) if n.fract() == 0.0 && n.is_finite() => Some(n as i64),
            Self::Text(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        }
    }

    fn into_text(self) -> Option<String> {
        match self {
            Self::Int(n) => Some(n.to_string()),
            Self::Float(n) => Some(n.to_string()),
            Self::Text(s) => Some(s),
            Self::Flag(b) => Some(b.to_string()),
        }
    }
}

/// A number, a numeric string, or anything else as `None` (`"N/A"` included).
pub fn optional_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.and_then(Scalar::into_f64))
}

pub fn optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.and_then(Scalar::into_i64))
}

/// Text, with numbers rendered to their decimal form.
pub fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.and_then(Scalar::into_text))
}

/// An id the backend may send as an integer or a string.
pub fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Scalar::deserialize(deserializer)? {
        Scalar::Int(n) => Ok(n.to_string()),
        Scalar::Text(s) => Ok(s),
        Scalar::Float(n) if n.fract() == 0.0 => Ok((n as i64).to_string()),
        _ => Err(serde::de::Error::custom("expected an integer or string id")),
    }
}
