use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::record::RecordKind;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("invalid document JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("document root must be a JSON object")]
    NotAnObject,
}

/// A decoded collection document.
#[derive(Debug, Clone)]
pub struct Document<R> {
    pub records: Vec<R>,
    pub last_updated: i64,
}

/// Render the collection document: records under the collection key plus a
/// `lastUpdated` epoch-milliseconds stamp.
pub fn encode_document<R: Serialize>(
    kind: RecordKind,
    records: &[R],
    last_updated: i64,
) -> Result<String, CodecError> {
    let mut root = Map::new();
    root.insert(
        kind.collection_key().to_string(),
        serde_json::to_value(records)?,
    );
    root.insert("lastUpdated".to_string(), Value::from(last_updated));
    to_document_string(&Value::Object(root))
}

/// Parse a collection document. A missing collection key decodes as an empty
/// collection; a missing `lastUpdated` defaults to zero.
pub fn decode_document<R: DeserializeOwned>(
    kind: RecordKind,
    text: &str,
) -> Result<Document<R>, CodecError> {
    let mut root: Value = serde_json::from_str(text)?;
    let Some(object) = root.as_object_mut() else {
        return Err(CodecError::NotAnObject);
    };
    let records = match object.remove(kind.collection_key()) {
        Some(array) => serde_json::from_value(array)?,
        None => Vec::new(),
    };
    let last_updated = object
        .get("lastUpdated")
        .and_then(Value::as_i64)
        .unwrap_or_default();
    Ok(Document { records, last_updated })
}

/// 2-space-indented JSON with one layout rule on top of the standard form:
/// an array whose elements are all scalars goes on a single line. The writer
/// walks the parsed tree, so brackets inside string values cannot affect the
/// layout, and every scalar is rendered through serde_json escaping.
pub fn to_document_string(value: &Value) -> Result<String, CodecError> {
    let mut out = String::new();
    write_value(&mut out, value, 0)?;
    Ok(out)
}

fn write_value(out: &mut String, value: &Value, indent: usize) -> Result<(), CodecError> {
    match value {
        Value::Object(map) => write_object(out, map, indent)?,
        Value::Array(items) => write_array(out, items, indent)?,
        Value::String(text) => out.push_str(&serde_json::to_string(text)?),
        Value::Number(number) => out.push_str(&number.to_string()),
        Value::Bool(flag) => out.push_str(if *flag { "true" } else { "false" }),
        Value::Null => out.push_str("null"),
    }
    Ok(())
}

fn write_object(
    out: &mut String,
    map: &Map<String, Value>,
    indent: usize,
) -> Result<(), CodecError> {
    if map.is_empty() {
        out.push_str("{}");
        return Ok(());
    }
    out.push_str("{\n");
    for (position, (key, value)) in map.iter().enumerate() {
        push_indent(out, indent + 1);
        out.push_str(&serde_json::to_string(key)?);
        out.push_str(": ");
        write_value(out, value, indent + 1)?;
        if position + 1 < map.len() {
            out.push(',');
        }
        out.push('\n');
    }
    push_indent(out, indent);
    out.push('}');
    Ok(())
}

fn write_array(out: &mut String, items: &[Value], indent: usize) -> Result<(), CodecError> {
    if items.is_empty() {
        out.push_str("[]");
        return Ok(());
    }
    if items.iter().all(is_scalar) {
        out.push('[');
        for (position, item) in items.iter().enumerate() {
            if position > 0 {
                out.push_str(", ");
            }
            write_value(out, item, indent)?;
        }
        out.push(']');
        return Ok(());
    }
    out.push_str("[\n");
    for (position, item) in items.iter().enumerate() {
        push_indent(out, indent + 1);
        write_value(out, item, indent + 1)?;
        if position + 1 < items.len() {
            out.push(',');
        }
        out.push('\n');
    }
    push_indent(out, indent);
    out.push(']');
    Ok(())
}

fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Object(_) | Value::Array(_))
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}
