//! Readers for loosely-typed JSON payloads.
//!
//! Scalar settings of the wrong type are logged and replaced by the caller's default instead of
//! failing the whole load. Structural mistakes (an edge entry that is not a pair) are errors that
//! name the offending position.

use serde_json::{Map, Value};

use crate::foundation::core::EdgeKey;
use crate::foundation::error::{TrailError, TrailResult};

pub(crate) type Object = Map<String, Value>;

pub(crate) fn f64_field(map: &Object, key: &str, default: f64) -> f64 {
    match map.get(key) {
        None | Some(Value::Null) => default,
        Some(Value::Number(n)) => n.as_f64().unwrap_or(default),
        Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or_else(|_| {
            tracing::warn!(key, value = %s, "non-numeric setting, using default");
            default
        }),
        Some(other) => {
            tracing::warn!(key, value = %other, "non-numeric setting, using default");
            default
        }
    }
}

pub(crate) fn i64_field(map: &Object, key: &str, default: i64) -> i64 {
    let v = f64_field(map, key, default as f64);
    if v.is_finite() {
        v.round() as i64
    } else {
        default
    }
}

pub(crate) fn u64_field(map: &Object, key: &str, default: u64) -> u64 {
    let v = f64_field(map, key, default as f64);
    if v.is_finite() && v >= 0.0 {
        v.round() as u64
    } else {
        tracing::warn!(key, value = v, "negative or non-finite setting, using default");
        default
    }
}

pub(crate) fn bool_field(map: &Object, key: &str, default: bool) -> bool {
    match map.get(key) {
        None | Some(Value::Null) => default,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map(|v| v != 0.0).unwrap_or(default),
        Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => true,
            "false" | "0" | "no" | "off" => false,
            _ => {
                tracing::warn!(key, value = %s, "non-boolean setting, using default");
                default
            }
        },
        Some(other) => {
            tracing::warn!(key, value = %other, "non-boolean setting, using default");
            default
        }
    }
}

/// Stringify an id-like JSON scalar. Strings and numbers qualify; `null` reads as empty.
fn id_text(value: &Value, ctx: &str) -> TrailResult<String> {
    match value {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(TrailError::validation(format!(
            "{ctx}: expected an id string, got {other}"
        ))),
    }
}

/// Read an array of ids. `null` or a missing value is an empty list.
pub(crate) fn id_list(value: Option<&Value>, ctx: &str) -> TrailResult<Vec<String>> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(i, v)| id_text(v, &format!("{ctx}[{i}]")))
            .collect(),
        Some(other) => Err(TrailError::validation(format!(
            "{ctx}: expected an array of ids, got {other}"
        ))),
    }
}

/// One edge entry: `[src, dst]`, `[src, dst, kind]` or `{"src", "dst", "kind"}`.
pub(crate) fn edge_entry(value: &Value, ctx: &str) -> TrailResult<(String, String, Option<String>)> {
    match value {
        Value::Array(items) if items.len() == 2 || items.len() == 3 => {
            let src = id_text(&items[0], ctx)?;
            let dst = id_text(&items[1], ctx)?;
            let kind = match items.get(2) {
                Some(k) => Some(id_text(k, ctx)?),
                None => None,
            };
            Ok((src, dst, kind))
        }
        Value::Object(map) => {
            let field = |key: &str| {
                map.get(key)
                    .map(|v| id_text(v, &format!("{ctx}.{key}")))
                    .transpose()
            };
            let (Some(src), Some(dst)) = (field("src")?, field("dst")?) else {
                return Err(TrailError::validation(format!(
                    "{ctx}: edge object needs both 'src' and 'dst'"
                )));
            };
            Ok((src, dst, field("kind")?))
        }
        other => Err(TrailError::validation(format!(
            "{ctx}: expected a [src, dst] pair, got {other}"
        ))),
    }
}

/// Read an array of edge entries as keys (kind is discarded).
pub(crate) fn edge_list(value: Option<&Value>, ctx: &str) -> TrailResult<Vec<EdgeKey>> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(i, v)| {
                edge_entry(v, &format!("{ctx}[{i}]")).map(|(src, dst, _)| EdgeKey { src, dst })
            })
            .collect(),
        Some(other) => Err(TrailError::validation(format!(
            "{ctx}: expected an array of edges, got {other}"
        ))),
    }
}
