//! Serializers for exported record lists

use serde_json::{Map, Value};

use super::ExportError;

/// Keys of a record in their stored order
pub fn header(record: &Map<String, Value>) -> Vec<String> {
    record.keys().cloned().collect()
}

fn csv_field(value: Option<&Value>) -> String {
    let text = match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    };
    // Only commas are guarded; embedded quotes and newlines pass through
    if text.contains(',') {
        format!("\"{}\"", text)
    } else {
        text
    }
}

/// CSV with the first record's keys as the header. Every record is
/// read with that same key list.
pub fn to_csv(records: &[Map<String, Value>]) -> String {
    let Some(first) = records.first() else {
        return String::new();
    };
    let keys = header(first);

    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(keys.join(","));
    for record in records {
        let row: Vec<String> = keys.iter().map(|k| csv_field(record.get(k))).collect();
        lines.push(row.join(","));
    }
    lines.join("\n")
}

/// Pretty printed JSON with a two space indent
pub fn to_json(records: &[Map<String, Value>]) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(records)?)
}
