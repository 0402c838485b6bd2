//! Built-in JSON to indented plain text flattener.
//!
//! Objects print as `key: value` lines, arrays as `- value` lines, and
//! nested containers open a new block two spaces deeper:
//!
//! ```text
//! {"a":1,"b":[true,null,{"c":"x"}]}
//!
//! a: 1
//! b:
//!   - true
//!   - null
//!   -
//!     c: x
//! ```
//!
//! (Container lines keep their trailing space after `:` and `-`.)
//! Keys keep document order: `serde_json` is built with `preserve_order`.

use async_trait::async_trait;
use serde_json::{Map, Number, Value};
use tokio::fs;

use super::traits::Handler;
use crate::converter::{ConversionJob, ConvertError, IoOp};

/// Flattens a parsed JSON document into indented text.
pub fn flatten_json(value: &Value) -> String {
    let mut out = String::new();
    match value {
        Value::Object(map) => write_object(&mut out, map, 0),
        Value::Array(items) => write_array(&mut out, items, 0),
        scalar => {
            out.push_str(&scalar_text(scalar));
            out.push('\n');
        }
    }
    out
}

fn write_object(out: &mut String, map: &Map<String, Value>, indent: usize) {
    for (key, value) in map {
        push_indent(out, indent);
        out.push_str(key);
        out.push_str(": ");
        write_entry(out, value, indent);
    }
}

fn write_array(out: &mut String, items: &[Value], indent: usize) {
    for value in items {
        push_indent(out, indent);
        out.push_str("- ");
        write_entry(out, value, indent);
    }
}

fn write_entry(out: &mut String, value: &Value, indent: usize) {
    match value {
        Value::Object(map) => {
            out.push('\n');
            write_object(out, map, indent + 2);
        }
        Value::Array(items) => {
            out.push('\n');
            write_array(out, items, indent + 2);
        }
        scalar => {
            out.push_str(&scalar_text(scalar));
            out.push('\n');
        }
    }
}

fn push_indent(out: &mut String, indent: usize) {
    out.extend(std::iter::repeat(' ').take(indent));
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_text(n),
        Value::Null => "null".to_string(),
        Value::Object(_) | Value::Array(_) => String::new(),
    }
}

/// Integers print exactly; floats print the shortest decimal that parses
/// back to the same `f64` (`1.0` prints as `1`).
fn number_text(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        i.to_string()
    } else if let Some(u) = n.as_u64() {
        u.to_string()
    } else if let Some(f) = n.as_f64() {
        f.to_string()
    } else {
        n.to_string()
    }
}

/// Handler serving JSON to TXT in-process.
#[derive(Debug, Clone, Default)]
pub struct JsonFlattener;

impl JsonFlattener {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Handler for JsonFlattener {
    fn name(&self) -> &str {
        "json-flatten"
    }

    async fn run(&self, job: &ConversionJob) -> Result<(), ConvertError> {
        let bytes = fs::read(&job.input_path)
            .await
            .map_err(|e| ConvertError::io(IoOp::Read, &job.input_path, e))?;
        let document: Value =
            serde_json::from_slice(&bytes).map_err(|e| ConvertError::Parse {
                path: job.input_path.clone(),
                source: e,
            })?;

        fs::write(&job.output_path, flatten_json(&document))
            .await
            .map_err(|e| ConvertError::io(IoOp::Write, &job.output_path, e))
    }
}
