//! Turns raw completion text into structured book recommendations.
//!
//! The model is asked for a JSON object, but free-text answers are common
//! enough that a line-oriented fallback is kept alongside the strict decode.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::models::BookRecommendation;

/// Leading numeric list marker, e.g. "1." in "1. Dune"
static LIST_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\d+\.").unwrap());

/// Parse raw completion text into an unbounded list of recommendations.
///
/// Tries a strict JSON decode first and accepts either an object with a
/// `recommendations` array or a top-level array. Any other decoded shape,
/// and any decode failure, falls back to the heuristic line parser over the
/// original raw text.
pub fn parse_recommendations(raw: &str) -> Vec<BookRecommendation> {
    match serde_json::from_str::<Value>(raw) {
        Ok(value) => match structured_records(&value) {
            Some(records) => records,
            None => {
                debug!("decoded JSON has an unrecognized shape, using line parser");
                parse_lines(raw)
            }
        },
        Err(err) => {
            debug!("structured decode failed ({}), using line parser", err);
            parse_lines(raw)
        }
    }
}

fn structured_records(value: &Value) -> Option<Vec<BookRecommendation>> {
    let entries = match value {
        Value::Object(map) => map.get("recommendations")?.as_array()?,
        Value::Array(entries) => entries,
        _ => return None,
    };

    Some(entries.iter().map(coerce_record).collect())
}

/// Build a record from a decoded JSON element, field by field. Missing or
/// non-string fields become empty strings rather than failing the decode.
fn coerce_record(value: &Value) -> BookRecommendation {
    BookRecommendation {
        title: string_field(value, "title"),
        author: string_field(value, "author"),
        reason: string_field(value, "reason"),
        genre: string_field(value, "genre"),
    }
}

fn string_field(value: &Value, field: &str) -> String {
    value
        .get(field)
        .and_then(Value::as_str)
        .unwrap_or("")
        .trim()
        .to_string()
}

/// Classified content of a single non-blank line.
enum LineLabel {
    Title(String),
    Author(String),
    Reason(String),
    Genre(String),
}

/// Classify one line of free text. Label checks are ordered: a line carrying
/// both `title:` and `author:` starts a new record.
fn classify_line(line: &str) -> Option<LineLabel> {
    let lower = line.to_ascii_lowercase();

    if lower.contains("title:") || LIST_MARKER.is_match(line) {
        return Some(LineLabel::Title(extract_title(line, &lower)));
    }
    if let Some(author) = label_value(line, &lower, "author:") {
        return Some(LineLabel::Author(author));
    }
    if let Some(reason) =
        label_value(line, &lower, "reason:").or_else(|| label_value(line, &lower, "why:"))
    {
        return Some(LineLabel::Reason(reason));
    }
    if let Some(genre) = label_value(line, &lower, "genre:") {
        return Some(LineLabel::Genre(genre));
    }

    None
}

/// Text following `label`, trimmed. The lowercased copy is ASCII-lowercased,
/// so byte offsets found in it are valid in the original line.
fn label_value(line: &str, lower: &str, label: &str) -> Option<String> {
    lower
        .find(label)
        .map(|pos| line[pos + label.len()..].trim().to_string())
}

fn extract_title(line: &str, lower: &str) -> String {
    if let Some(pos) = lower.find("title:") {
        return line[pos + "title:".len()..].trim().to_string();
    }
    LIST_MARKER.replace(line, "").trim().to_string()
}

/// Fold state for the line parser: finished records plus the record under
/// construction.
#[derive(Default)]
struct LineAccumulator {
    records: Vec<BookRecommendation>,
    current: BookRecommendation,
}

impl LineAccumulator {
    fn apply(mut self, label: LineLabel) -> Self {
        match label {
            LineLabel::Title(title) => {
                // A new title flushes the current record, but only once that
                // record has captured a title itself; otherwise the title is
                // overwritten in place.
                if !self.current.title.is_empty() {
                    self.records.push(std::mem::take(&mut self.current));
                }
                self.current.title = title;
            }
            LineLabel::Author(author) => self.current.author = author,
            LineLabel::Reason(reason) => self.current.reason = reason,
            LineLabel::Genre(genre) => self.current.genre = genre,
        }
        self
    }

    fn finish(mut self) -> Vec<BookRecommendation> {
        if !self.current.title.is_empty() {
            self.records.push(self.current);
        }
        self.records
    }
}

/// Heuristic fallback: fold every classified non-blank line into the
/// accumulator. Records that never captured a title are dropped.
fn parse_lines(raw: &str) -> Vec<BookRecommendation> {
    raw.lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(classify_line)
        .fold(LineAccumulator::default(), LineAccumulator::apply)
        .finish()
}
