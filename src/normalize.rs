//! Field normalization: coerce every joined field from text to a number by
//! stripping every character that is not a decimal digit or a decimal point,
//! then parsing the longest valid float prefix of the remainder.
//!
//! This applies uniformly, including to dates and free text: `2024-01-15`
//! degrades to `20240115.0` and `Plastic` to `0.0`. The lossiness is part of
//! the data contract; downstream consumers cannot tell "zero" from "missing".

use std::collections::HashMap;

use once_cell::sync::OnceCell;
use regex::Regex;

use crate::join::JoinedRecord;

pub type NormalizedRecord = HashMap<String, f64>;

/// Parse the longest valid float prefix of `s` (after leading whitespace),
/// like JS `parseFloat`. `"12 kg"` → 12.0, `"1.2.3"` → 1.2, `"abc"` → None.
/// No exponent support; the datasets never carry scientific notation.
pub fn parse_float_prefix(s: &str) -> Option<f64> {
    let trimmed = s.trim_start();
    let bytes = trimmed.as_bytes();

    let mut idx = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        idx = 1;
    }

    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    while idx < bytes.len() {
        match bytes[idx] {
            b'0'..=b'9' => {
                seen_digit = true;
                idx += 1;
                end = idx;
            }
            b'.' if !seen_dot => {
                seen_dot = true;
                idx += 1;
                if seen_digit {
                    end = idx;
                }
            }
            _ => break,
        }
    }

    if !seen_digit {
        return None;
    }
    trimmed[..end].parse().ok()
}

/// Strip everything outside `[0-9.]` and parse what remains.
/// A remainder with no parsable prefix (empty, or stray dots like `"."`)
/// collapses to 0.0: the explicit missing-data fallback, never an error.
pub fn numeric_value(raw: &str) -> f64 {
    static NON_NUMERIC: OnceCell<Regex> = OnceCell::new();
    let re = NON_NUMERIC.get_or_init(|| Regex::new(r"[^0-9.]").expect("strip regex"));
    let cleaned = re.replace_all(raw, "");
    parse_float_prefix(&cleaned).unwrap_or(0.0)
}

pub fn normalize_record(record: &JoinedRecord) -> NormalizedRecord {
    record
        .iter()
        .map(|(key, value)| (key.clone(), numeric_value(value)))
        .collect()
}

pub fn normalize_all(records: &[JoinedRecord]) -> Vec<NormalizedRecord> {
    records.iter().map(normalize_record).collect()
}
