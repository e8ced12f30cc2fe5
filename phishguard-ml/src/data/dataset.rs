//! In-memory tabular dataset model.

use crate::error::IngestError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::Write;
use std::path::Path;

/// Column name the document store assigns to its synthetic identifier.
pub const SOURCE_ID_COLUMN: &str = "_id";

/// Literal token some upstream loaders write instead of a real null.
const NAN_TOKEN: &str = "NaN";

/// An ordered set of named columns over rows of scalar values.
///
/// Every row holds a value (possibly `Null`) for every declared column. Steps
/// hand datasets to each other by value; none mutates its input in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl Dataset {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self { columns, rows }
    }

    pub fn empty() -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Build a dataset from key-value documents.
    ///
    /// Columns are the union of keys across all documents, in first-seen
    /// order; a document missing a column contributes `Null` for it. This
    /// tolerates loader/pipeline schema drift rather than rejecting it.
    pub fn from_documents(documents: Vec<serde_json::Map<String, Value>>) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for doc in &documents {
            for key in doc.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }
        let rows = documents
            .into_iter()
            .map(|mut doc| {
                columns
                    .iter()
                    .map(|col| doc.remove(col).unwrap_or(Value::Null))
                    .collect()
            })
            .collect();
        Self { columns, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Remove a column by name, if present, from the header and every row.
    pub fn drop_column(&mut self, name: &str) {
        if let Some(idx) = self.columns.iter().position(|c| c == name) {
            self.columns.remove(idx);
            for row in &mut self.rows {
                if idx < row.len() {
                    row.remove(idx);
                }
            }
        }
    }

    /// Canonicalize the literal string `"NaN"` in any cell to a proper null.
    ///
    /// The upstream loader serializes missing values as the string `"NaN"`;
    /// downstream consumers expect real nulls (empty CSV fields).
    pub fn normalize_nan_tokens(&mut self) {
        for row in &mut self.rows {
            for cell in row.iter_mut() {
                if matches!(cell, Value::String(s) if s == NAN_TOKEN) {
                    *cell = Value::Null;
                }
            }
        }
    }

    /// A new dataset containing the given rows, in the given order.
    pub fn select_rows(&self, indices: &[usize]) -> Self {
        Self {
            columns: self.columns.clone(),
            rows: indices.iter().map(|&i| self.rows[i].clone()).collect(),
        }
    }

    /// Write the dataset as UTF-8, comma-delimited CSV with a header row,
    /// overwriting any existing file. The parent directory is created first.
    pub fn write_csv(&self, path: &Path) -> Result<(), IngestError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| IngestError::filesystem(parent, e))?;
        }
        let file =
            std::fs::File::create(path).map_err(|e| IngestError::filesystem(path, e))?;
        let mut out = std::io::BufWriter::new(file);
        writeln_record(&mut out, self.columns.iter().map(|c| csv_escape(c)))
            .map_err(|e| IngestError::filesystem(path, e))?;
        for row in &self.rows {
            writeln_record(&mut out, row.iter().map(csv_field))
                .map_err(|e| IngestError::filesystem(path, e))?;
        }
        out.flush().map_err(|e| IngestError::filesystem(path, e))?;
        Ok(())
    }
}

fn writeln_record(
    out: &mut impl Write,
    fields: impl Iterator<Item = String>,
) -> std::io::Result<()> {
    let record: Vec<String> = fields.collect();
    writeln!(out, "{}", record.join(","))
}

/// Render a cell value as a CSV field. Nulls become empty fields; strings are
/// written bare (escaped as needed); other scalars use their JSON rendering.
fn csv_field(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => csv_escape(s),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => csv_escape(&other.to_string()),
    }
}

fn csv_escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn doc(pairs: &[(&str, Value)]) -> serde_json::Map<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_from_documents_unions_columns_in_order() {
        let ds = Dataset::from_documents(vec![
            doc(&[("url", json!("a.example")), ("label", json!(1))]),
            doc(&[("url", json!("b.example")), ("score", json!(0.5))]),
        ]);
        assert_eq!(ds.columns, vec!["url", "label", "score"]);
        assert_eq!(ds.rows[0], vec![json!("a.example"), json!(1), Value::Null]);
        assert_eq!(ds.rows[1], vec![json!("b.example"), Value::Null, json!(0.5)]);
    }

    #[test]
    fn test_drop_column_removes_header_and_cells() {
        let mut ds = Dataset::from_documents(vec![doc(&[
            ("_id", json!("abc123")),
            ("url", json!("a.example")),
            ("label", json!(0)),
        ])]);
        ds.drop_column(SOURCE_ID_COLUMN);
        assert_eq!(ds.columns, vec!["url", "label"]);
        assert_eq!(ds.rows[0].len(), 2);
    }

    #[test]
    fn test_drop_missing_column_is_noop() {
        let mut ds = Dataset::from_documents(vec![doc(&[("url", json!("a.example"))])]);
        ds.drop_column("nonexistent");
        assert_eq!(ds.columns, vec!["url"]);
    }

    #[test]
    fn test_normalize_nan_tokens() {
        let mut ds = Dataset::from_documents(vec![doc(&[
            ("url", json!("NaN")),
            ("label", json!(1)),
            ("note", json!("contains NaN inside")),
        ])]);
        ds.normalize_nan_tokens();
        assert_eq!(ds.rows[0][0], Value::Null);
        // Only the exact token is canonicalized.
        assert_eq!(ds.rows[0][2], json!("contains NaN inside"));
    }

    #[test]
    fn test_select_rows_preserves_columns() {
        let ds = Dataset::new(
            vec!["x".into()],
            vec![vec![json!(1)], vec![json!(2)], vec![json!(3)]],
        );
        let picked = ds.select_rows(&[2, 0]);
        assert_eq!(picked.columns, ds.columns);
        assert_eq!(picked.rows, vec![vec![json!(3)], vec![json!(1)]]);
    }

    #[test]
    fn test_write_csv_header_nulls_and_quoting() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("data.csv");
        let ds = Dataset::new(
            vec!["url".into(), "label".into()],
            vec![
                vec![json!("https://a.example/?q=1,2"), json!(1)],
                vec![Value::Null, json!(0)],
            ],
        );
        ds.write_csv(&path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "url,label");
        assert_eq!(lines[1], "\"https://a.example/?q=1,2\",1");
        assert_eq!(lines[2], ",0");
    }

    #[test]
    fn test_write_csv_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        std::fs::write(&path, "stale contents\nmore\nlines\n").unwrap();
        let ds = Dataset::new(vec!["a".into()], vec![vec![json!(1)]]);
        ds.write_csv(&path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "a\n1\n");
    }
}
