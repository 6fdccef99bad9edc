// File: headers.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use reqwest::header::HeaderMap;
use serde_json::Value;
use std::collections::BTreeMap;

/// Lower-cased header name to a single string value.
pub type NormalizedHeaders = BTreeMap<String, String>;

/// Header collections as they reach the normalizer.
#[derive(Debug, Clone)]
pub enum RawHeaders {
    Map(HeaderMap),
    Flat(Vec<(String, String)>),
    Multi(Vec<(String, Vec<String>)>),
    Json(Value),
    Absent,
}

impl From<HeaderMap> for RawHeaders {
    fn from(map: HeaderMap) -> Self {
        RawHeaders::Map(map)
    }
}

impl From<&NormalizedHeaders> for RawHeaders {
    fn from(headers: &NormalizedHeaders) -> Self {
        RawHeaders::Flat(
            headers
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }
}

/// Canonicalizes any header representation. Never fails: anything that is
/// not a recognizable mapping yields an empty map. Repeated values are
/// joined with ", "; a later entry for the same name replaces an earlier one.
pub fn normalize_headers(raw: &RawHeaders) -> NormalizedHeaders {
    let mut headers = NormalizedHeaders::new();

    match raw {
        RawHeaders::Map(map) => {
            for name in map.keys() {
                let values: Vec<String> = map
                    .get_all(name)
                    .iter()
                    .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
                    .collect();
                headers.insert(name.as_str().to_lowercase(), values.join(", "));
            }
        }
        RawHeaders::Flat(pairs) => {
            for (name, value) in pairs {
                headers.insert(name.to_lowercase(), value.clone());
            }
        }
        RawHeaders::Multi(pairs) => {
            for (name, values) in pairs {
                headers.insert(name.to_lowercase(), values.join(", "));
            }
        }
        RawHeaders::Json(Value::Object(object)) => {
            for (name, value) in object {
                let value = match value {
                    Value::Array(items) => items
                        .iter()
                        .filter_map(scalar_to_string)
                        .collect::<Vec<_>>()
                        .join(", "),
                    other => scalar_to_string(other).unwrap_or_default(),
                };
                headers.insert(name.to_lowercase(), value);
            }
        }
        RawHeaders::Json(_) | RawHeaders::Absent => {}
    }

    headers
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(true) => Some("1".to_string()),
        Value::Bool(false) | Value::Null => Some(String::new()),
        Value::Array(_) | Value::Object(_) => None,
    }
}
