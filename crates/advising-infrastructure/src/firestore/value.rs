//! Conversion between Firestore typed values and plain JSON.
//!
//! Firestore wraps every field in a one-key object naming its type
//! (`{"stringValue": "x"}`, `{"integerValue": "3"}`). Records are decoded
//! from plain JSON, so documents are unwrapped at the client boundary.

use serde_json::{Map, Number, Value};

pub fn decode_fields(fields: &Map<String, Value>) -> Map<String, Value> {
    fields
        .iter()
        .map(|(name, typed)| (name.clone(), decode_value(typed)))
        .collect()
}

pub fn decode_value(typed: &Value) -> Value {
    let Some(object) = typed.as_object() else {
        return Value::Null;
    };
    let Some((kind, inner)) = object.iter().next() else {
        return Value::Null;
    };

    match kind.as_str() {
        "nullValue" => Value::Null,
        "booleanValue" => inner.as_bool().map_or(Value::Null, Value::Bool),
        // int64 travels as a decimal string
        "integerValue" => match inner {
            Value::String(s) => s
                .parse::<i64>()
                .map(|n| Value::Number(n.into()))
                .unwrap_or_else(|_| Value::String(s.clone())),
            Value::Number(n) => Value::Number(n.clone()),
            _ => Value::Null,
        },
        "doubleValue" => inner
            .as_f64()
            .and_then(Number::from_f64)
            .map_or(Value::Null, Value::Number),
        "stringValue" | "timestampValue" | "referenceValue" | "bytesValue" => inner.clone(),
        "geoPointValue" => inner.clone(),
        "arrayValue" => Value::Array(
            inner
                .get("values")
                .and_then(Value::as_array)
                .map(|values| values.iter().map(decode_value).collect())
                .unwrap_or_default(),
        ),
        "mapValue" => Value::Object(
            inner
                .get("fields")
                .and_then(Value::as_object)
                .map(decode_fields)
                .unwrap_or_default(),
        ),
        _ => Value::Null,
    }
}

/// Plain JSON to a typed value, for query filters.
pub fn encode_value(value: &Value) -> Value {
    let mut typed = Map::new();
    match value {
        Value::Null => {
            typed.insert("nullValue".into(), Value::Null);
        }
        Value::Bool(b) => {
            typed.insert("booleanValue".into(), Value::Bool(*b));
        }
        Value::Number(n) => match n.as_i64() {
            Some(i) => {
                typed.insert("integerValue".into(), Value::String(i.to_string()));
            }
            None => {
                typed.insert("doubleValue".into(), Value::Number(n.clone()));
            }
        },
        Value::String(s) => {
            typed.insert("stringValue".into(), Value::String(s.clone()));
        }
        Value::Array(items) => {
            let values: Vec<Value> = items.iter().map(encode_value).collect();
            let mut array = Map::new();
            array.insert("values".into(), Value::Array(values));
            typed.insert("arrayValue".into(), Value::Object(array));
        }
        Value::Object(fields) => {
            let encoded: Map<String, Value> = fields
                .iter()
                .map(|(k, v)| (k.clone(), encode_value(v)))
                .collect();
            let mut map = Map::new();
            map.insert("fields".into(), Value::Object(encoded));
            typed.insert("mapValue".into(), Value::Object(map));
        }
    }
    Value::Object(typed)
}
