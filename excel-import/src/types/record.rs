//! Ordered header-to-value mapping for one spreadsheet row

use serde::{Deserialize, Serialize};

use super::value::CellValue;

/// One spreadsheet row as an ordered header -> value mapping
///
/// Column order is preserved from the source sheet (or from the transform that
/// produced the record), so a set of records with the same headers can be
/// written back out as a consistent sheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    columns: Vec<(String, CellValue)>,
}

impl Record {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a record from header/value pairs, preserving their order
    pub fn from_pairs(columns: Vec<(String, CellValue)>) -> Self {
        Self { columns }
    }

    /// Get the value for a header, if present
    pub fn get(&self, header: &str) -> Option<&CellValue> {
        self.columns
            .iter()
            .find(|(h, _)| h == header)
            .map(|(_, v)| v)
    }

    /// Set the value for a header, appending a new column if absent
    pub fn insert(&mut self, header: impl Into<String>, value: CellValue) {
        let header = header.into();
        match self.columns.iter_mut().find(|(h, _)| *h == header) {
            Some((_, v)) => *v = value,
            None => self.columns.push((header, value)),
        }
    }

    /// Headers in column order
    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(h, _)| h.as_str())
    }

    /// Header/value pairs in column order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.columns.iter().map(|(h, v)| (h.as_str(), v))
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Check whether the record has no columns
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Check whether every value is empty (a blank sheet line)
    pub fn is_blank(&self) -> bool {
        self.columns.iter().all(|(_, v)| v.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_preserves_order() {
        let mut record = Record::new();
        record.insert("name", CellValue::from("Alice"));
        record.insert("email", CellValue::from("a@x.com"));
        record.insert("age", CellValue::Int(30));

        let headers: Vec<_> = record.headers().collect();
        assert_eq!(headers, vec!["name", "email", "age"]);
    }

    #[test]
    fn test_insert_replaces_existing() {
        let mut record = Record::new();
        record.insert("name", CellValue::from("Alice"));
        record.insert("name", CellValue::from("Bob"));

        assert_eq!(record.len(), 1);
        assert_eq!(record.get("name"), Some(&CellValue::from("Bob")));
    }

    #[test]
    fn test_is_blank() {
        let blank = Record::from_pairs(vec![
            ("a".to_string(), CellValue::Null),
            ("b".to_string(), CellValue::String("  ".to_string())),
        ]);
        assert!(blank.is_blank());

        let not_blank = Record::from_pairs(vec![
            ("a".to_string(), CellValue::Null),
            ("b".to_string(), CellValue::Int(0)),
        ]);
        assert!(!not_blank.is_blank());
    }
}
