use serde::{Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// A single raw cell as it came out of the source file.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
}

impl CellValue {
    /// Build a cell from a text field, mapping blank strings to `Empty`
    pub fn from_text(text: &str) -> Self {
        if text.trim().is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(text.to_string())
        }
    }

    /// Returns true when the cell carries a non-empty value
    pub fn is_present(&self) -> bool {
        match self {
            CellValue::Empty => false,
            CellValue::Text(s) => !s.trim().is_empty(),
            CellValue::Number(n) => !n.is_nan(),
        }
    }

    /// String representation of a present cell, `None` for empty ones
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            CellValue::Empty => None,
            CellValue::Text(s) if s.trim().is_empty() => None,
            CellValue::Text(s) => Some(Cow::Borrowed(s.as_str())),
            CellValue::Number(n) if n.is_nan() => None,
            CellValue::Number(n) => Some(Cow::Owned(format_number(*n))),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_text() {
            Some(text) => f.write_str(&text),
            None => Ok(()),
        }
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            CellValue::Empty => serializer.serialize_none(),
            CellValue::Text(s) => serializer.serialize_str(s),
            CellValue::Number(n) if n.is_finite() => serializer.serialize_f64(*n),
            CellValue::Number(_) => serializer.serialize_none(),
        }
    }
}

/// Format a number without a trailing `.0` for whole values
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// One data row. Column names are shared by every record of the same file.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    columns: Arc<Vec<String>>,
    values: Vec<CellValue>,
}

impl Record {
    /// Create a record; missing trailing values are padded with `Empty`
    pub fn new(columns: Arc<Vec<String>>, mut values: Vec<CellValue>) -> Self {
        values.resize(columns.len(), CellValue::Empty);
        Self { columns, values }
    }

    /// Convenience constructor used by tests and small fixtures
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<CellValue>,
    {
        let (columns, values): (Vec<String>, Vec<CellValue>) = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .unzip();
        Self::new(Arc::new(columns), values)
    }

    /// Whether the column exists in this record's header, whatever its value
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    pub fn get(&self, name: &str) -> Option<&CellValue> {
        self.columns
            .iter()
            .position(|c| c == name)
            .map(|idx| &self.values[idx])
    }

    /// Present, non-empty value of the column
    pub fn text(&self, name: &str) -> Option<Cow<'_, str>> {
        self.get(name).and_then(CellValue::as_text)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Iterate columns in source order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::from_text(value)
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::from_text(&value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}
