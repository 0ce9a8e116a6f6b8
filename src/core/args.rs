//! Typed data from loose command-line input.
//!
//! `key=value` arguments are read with a small heuristic: strict JSON first,
//! then a `[a,b]` list of strings, then a `{k:v,...}` map of strings, and
//! finally the raw string. Malformed fragments never fail the whole call.
use std::collections::BTreeMap;

use tracing::debug;

use crate::error::{Error, Result};
use crate::types::{DataContext, DynamicValue};

/// Convert `key=value` arguments into a data context.
///
/// Arguments without a `=`, with an empty key, or with an empty value are
/// skipped. Later keys overwrite earlier ones. Always returns `Ok`.
pub fn parse_args<I, S>(args: I) -> Result<DataContext>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut data = DataContext::new();

    for arg in args {
        let arg = arg.as_ref();
        let Some((key, value)) = arg.split_once('=') else {
            debug!("Skipping argument without '=': {:?}", arg);
            continue;
        };
        if key.is_empty() || value.is_empty() {
            debug!("Skipping incomplete argument: {:?}", arg);
            continue;
        }
        data.insert(key.to_string(), parse_value(value));
    }

    Ok(data)
}

/// Decode an inline JSON object, as given to `--data`.
pub fn parse_json(s: &str) -> Result<DataContext> {
    serde_json::from_str(s).map_err(Error::DataArg)
}

/// Type a single argument value.
pub fn parse_value(value: &str) -> DynamicValue {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(value) {
        return DynamicValue::from(json);
    }

    if let Some(inner) = value.strip_prefix('[').and_then(|v| v.strip_suffix(']')) {
        return DynamicValue::List(split_list(inner));
    }

    if let Some(inner) = value.strip_prefix('{').and_then(|v| v.strip_suffix('}')) {
        return DynamicValue::Map(split_map(inner));
    }

    DynamicValue::String(value.to_string())
}

/// The `key=value` value text that [`parse_value`] reads back as `value`.
///
/// Strings are written raw unless the raw text would be typed as something
/// else (`42`, `null`, `[a,b]`), in which case they are written as quoted JSON.
pub fn format_value(value: &DynamicValue) -> String {
    match value {
        DynamicValue::String(s) if parse_value(s) != *value => {
            serde_json::Value::String(s.clone()).to_string()
        }
        other => other.to_string(),
    }
}

fn split_list(inner: &str) -> Vec<DynamicValue> {
    if inner.trim().is_empty() {
        return Vec::new();
    }
    inner
        .split(',')
        .map(|item| DynamicValue::from(item.trim()))
        .collect()
}

fn split_map(inner: &str) -> BTreeMap<String, DynamicValue> {
    inner
        .split(',')
        .filter_map(|pair| pair.split_once(':'))
        .map(|(k, v)| (k.trim().to_string(), DynamicValue::from(v.trim())))
        .collect()
}
