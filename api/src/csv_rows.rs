//! Naive client-side CSV splitting for the JSON-rows upload strategy.
//!
//! Only what the webhook needs to consume rows without parsing the file
//! itself: newline-separated lines, comma-separated fields, no quoting or
//! escaping. Anything smarter belongs to the workflow.

use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedCsv {
    pub headers: Vec<String>,
    /// One object per non-blank data line, keyed by header name in header order.
    pub rows: Vec<Map<String, Value>>,
}

impl ParsedCsv {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Split `text` into a header row and positional data rows.
///
/// - line 0 is always the header line, even when blank
/// - blank (whitespace-only) data lines are skipped
/// - every header and value is trimmed, which also drops `\r` from CRLF files
/// - short rows are padded with `""`, surplus values are ignored
/// - a repeated header keeps its first position and the last value
pub fn parse(text: &str) -> ParsedCsv {
    let mut lines = text.split('\n');
    let headers: Vec<String> = lines
        .next()
        .unwrap_or_default()
        .split(',')
        .map(|header| header.trim().to_string())
        .collect();

    let rows = lines
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let values: Vec<&str> = line.split(',').map(str::trim).collect();
            let mut row = Map::new();
            for (index, header) in headers.iter().enumerate() {
                let value = values.get(index).copied().unwrap_or_default();
                row.insert(header.clone(), Value::String(value.to_string()));
            }
            row
        })
        .collect();

    ParsedCsv { headers, rows }
}
