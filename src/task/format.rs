//! CSV, line-text and JSON encodings of a task store

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;
use tracing::{trace, warn};

use super::error::FormatError;
use super::model::{Task, TaskId};
use super::store::TaskStore;

/// Minimum fields per CSV row or text line: id, description, status, priority
const RECORD_FIELDS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Csv,
    Text,
    Json,
}

impl Format {
    pub const ALL: [Format; 3] = [Self::Csv, Self::Text, Self::Json];

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Text => "txt",
            Self::Json => "json",
        }
    }

    /// File name used for exports
    pub fn default_file_name(&self) -> String {
        format!("tasks.{}", self.extension())
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Csv => "CSV",
            Self::Text => "Text",
            Self::Json => "JSON",
        }
    }

    pub fn encode(&self, store: &TaskStore) -> Result<String, FormatError> {
        match self {
            Self::Csv => encode_csv(store),
            Self::Text => Ok(encode_text(store)),
            Self::Json => encode_json(store),
        }
    }

    pub fn decode(&self, content: &str) -> Result<ImportReport, FormatError> {
        match self {
            Self::Csv => decode_csv(content),
            Self::Text => Ok(decode_text(content)),
            Self::Json => decode_json(content),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A record that could not be decoded and was left out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    /// 1-based row/line number, or the object key for JSON
    pub location: String,
    pub reason: String,
}

impl fmt::Display for SkippedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.reason)
    }
}

/// Result of decoding a document
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    /// Decoded tasks in document order
    pub tasks: Vec<(TaskId, Task)>,
    pub skipped: Vec<SkippedRecord>,
}

impl ImportReport {
    fn skip(&mut self, location: impl Into<String>, reason: impl Into<String>) {
        let record = SkippedRecord {
            location: location.into(),
            reason: reason.into(),
        };
        warn!("Skipping invalid record {}", record);
        self.skipped.push(record);
    }

    /// Merge decoded tasks into `store`, overwriting matching IDs
    pub fn apply(&self, store: &mut TaskStore) -> usize {
        for (id, task) in &self.tasks {
            store.upsert(*id, task.clone());
        }
        self.tasks.len()
    }
}

fn encode_csv(store: &TaskStore) -> Result<String, FormatError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    for (id, task) in store.list() {
        let id = id.to_string();
        writer.write_record([
            id.as_str(),
            task.description.as_str(),
            task.status.as_str(),
            task.priority.as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| FormatError::Csv(e.into_error().into()))?;
    Ok(String::from_utf8(bytes)?)
}

fn decode_csv(content: &str) -> Result<ImportReport, FormatError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut report = ImportReport::default();
    for (index, result) in reader.records().enumerate() {
        let record = result?;
        let row = index + 1;

        if record.len() < RECORD_FIELDS {
            trace!("Ignoring short CSV row {}", row);
            continue;
        }

        let Ok(id) = record[0].parse::<TaskId>() else {
            report.skip(
                format!("row {}", row),
                format!("invalid task ID '{}'", &record[0]),
            );
            continue;
        };

        report
            .tasks
            .push((id, Task::new(&record[1], &record[2], &record[3])));
    }

    Ok(report)
}

fn encode_text(store: &TaskStore) -> String {
    let mut output = String::new();
    for (id, task) in store.list() {
        output.push_str(&task.to_line(id));
        output.push('\n');
    }
    output
}

/// Parse lines of the form `ID: 1, Description: d, Status: s, Priority: p`.
///
/// Splits on `", "` and takes the piece after the first `": "` of each of
/// the first four parts, so values containing either separator are cut.
fn decode_text(content: &str) -> ImportReport {
    let mut report = ImportReport::default();

    for (index, line) in content.lines().enumerate() {
        let line_no = index + 1;
        let parts: Vec<&str> = line.trim().split(", ").collect();
        if parts.len() < RECORD_FIELDS {
            trace!("Ignoring short text line {}", line_no);
            continue;
        }

        let values: Option<Vec<&str>> = parts[..RECORD_FIELDS]
            .iter()
            .copied()
            .map(|part| part.split(": ").nth(1))
            .collect();
        let Some(values) = values else {
            report.skip(format!("line {}", line_no), "missing ': ' separator");
            continue;
        };

        let Ok(id) = values[0].parse::<TaskId>() else {
            report.skip(
                format!("line {}", line_no),
                format!("invalid task ID '{}'", values[0]),
            );
            continue;
        };

        report
            .tasks
            .push((id, Task::new(values[1], values[2], values[3])));
    }

    report
}

fn encode_json(store: &TaskStore) -> Result<String, FormatError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    store.serialize(&mut serializer)?;
    Ok(String::from_utf8(buf)?)
}

fn decode_json(content: &str) -> Result<ImportReport, FormatError> {
    // Ordered map so tasks keep document order
    let entries: IndexMap<String, serde_json::Value> =
        serde_json::from_str(content).map_err(|e| {
            if e.is_data() {
                FormatError::NotAnObject
            } else {
                FormatError::Json(e)
            }
        })?;

    let mut report = ImportReport::default();
    for (key, record) in entries {
        let Ok(id) = key.parse::<TaskId>() else {
            report.skip(format!("key '{}'", key), "task ID is not an integer");
            continue;
        };

        match serde_json::from_value::<Task>(record) {
            Ok(task) => report.tasks.push((id, task)),
            Err(e) => report.skip(format!("key '{}'", key), e.to_string()),
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_store() -> TaskStore {
        let mut store = TaskStore::new();
        store.add("Buy milk", "New", "Low").unwrap();
        store.add("Ship release", "In Progress", "High").unwrap();
        store.add("", "Complete", "Medium").unwrap();
        store
    }

    fn into_store(report: &ImportReport) -> TaskStore {
        let mut store = TaskStore::new();
        report.apply(&mut store);
        store
    }

    fn assert_same(a: &TaskStore, b: &TaskStore) {
        assert_eq!(a.list(), b.list());
    }

    #[test]
    fn test_csv_roundtrip() {
        let store = sample_store();
        let encoded = Format::Csv.encode(&store).unwrap();
        let report = Format::Csv.decode(&encoded).unwrap();
        assert!(report.skipped.is_empty());
        assert_same(&store, &into_store(&report));
    }

    #[test]
    fn test_csv_has_no_header() {
        let encoded = Format::Csv.encode(&sample_store()).unwrap();
        assert!(encoded.starts_with("1,Buy milk,New,Low\n"));
    }

    #[test]
    fn test_csv_quotes_embedded_commas() {
        let mut store = TaskStore::new();
        store.add("eggs, flour", "New", "Low").unwrap();
        let encoded = Format::Csv.encode(&store).unwrap();
        let report = Format::Csv.decode(&encoded).unwrap();
        assert_eq!(report.tasks[0].1.description, "eggs, flour");
    }

    #[test]
    fn test_csv_skips_short_and_invalid_rows() {
        let content = "1,a,New,Low\n2,b\nx,c,New,High\n\n4,d,Complete,Medium,extra\n";
        let report = Format::Csv.decode(content).unwrap();

        let ids: Vec<_> = report.tasks.iter().map(|(id, _)| id.get()).collect();
        assert_eq!(ids, vec![1, 4]);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].location, "row 3");
    }

    #[test]
    fn test_csv_accepts_ids_past_u32() {
        let report = Format::Csv.decode("4294967296,big,New,Low\n").unwrap();
        assert!(report.skipped.is_empty());
        assert_eq!(report.tasks[0].0, TaskId(4_294_967_296));
    }

    #[test]
    fn test_text_format_line() {
        let encoded = Format::Text.encode(&sample_store()).unwrap();
        let first = encoded.lines().next().unwrap();
        assert_eq!(first, "ID: 1, Description: Buy milk, Status: New, Priority: Low");
    }

    #[test]
    fn test_text_roundtrip() {
        let mut store = TaskStore::new();
        store.add("Buy milk", "New", "Low").unwrap();
        store.add("Ship release", "In Progress", "High").unwrap();
        let encoded = Format::Text.encode(&store).unwrap();
        let report = Format::Text.decode(&encoded).unwrap();
        assert_same(&store, &into_store(&report));
    }

    #[test]
    fn test_text_separator_in_description_shifts_fields() {
        let content = "ID: 1, Description: eggs, flour, Status: New, Priority: Low\n";
        let report = Format::Text.decode(content).unwrap();
        // "flour" has no ": " so the line is skipped
        assert!(report.tasks.is_empty());
        assert_eq!(report.skipped.len(), 1);
    }

    #[test]
    fn test_text_skips_malformed_lines() {
        let content = "\nnot a task\nID: abc, Description: x, Status: New, Priority: Low\nID: 2, Description: ok, Status: New, Priority: High\n";
        let report = Format::Text.decode(content).unwrap();
        assert_eq!(report.tasks.len(), 1);
        assert_eq!(report.tasks[0].0, TaskId(2));
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].location, "line 3");
    }

    #[test]
    fn test_json_roundtrip_and_indent() {
        let store = sample_store();
        let encoded = Format::Json.encode(&store).unwrap();
        assert!(encoded.contains("\n    \"1\": {\n        \"description\": \"Buy milk\""));

        let report = Format::Json.decode(&encoded).unwrap();
        assert_same(&store, &into_store(&report));
    }

    #[test]
    fn test_json_keeps_document_order() {
        let content = r#"{"10": {"description": "ten", "status": "New", "priority": "Low"},
                          "2": {"description": "two", "status": "New", "priority": "Low"}}"#;
        let report = Format::Json.decode(content).unwrap();
        let ids: Vec<_> = report.tasks.iter().map(|(id, _)| id.get()).collect();
        assert_eq!(ids, vec![10, 2]);
    }

    #[test]
    fn test_json_skips_bad_keys_and_records() {
        let content = r#"{"abc": {"description": "x"}, "3": 42, "4": {"description": "partial"}}"#;
        let report = Format::Json.decode(content).unwrap();
        assert_eq!(report.skipped.len(), 2);
        assert_eq!(report.tasks.len(), 1);
        assert_eq!(report.tasks[0].1, Task::new("partial", "", ""));
    }

    #[test]
    fn test_json_rejects_non_object() {
        assert!(matches!(
            Format::Json.decode("[1, 2]"),
            Err(FormatError::NotAnObject)
        ));
        assert!(matches!(
            Format::Json.decode("{ invalid json }"),
            Err(FormatError::Json(_))
        ));
    }

    #[test]
    fn test_default_file_names() {
        let names: Vec<_> = Format::ALL.iter().map(|f| f.default_file_name()).collect();
        assert_eq!(names, vec!["tasks.csv", "tasks.txt", "tasks.json"]);
    }
}
