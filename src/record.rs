use indexmap::IndexMap;
use indexmap::map::Iter;
use tracing::trace;

use crate::cell::TypedCellValue;
use crate::error::{RackError, RackResult};

/// One data row of the config table, keyed by column header.
///
/// Columns keep the left-to-right order of the header row.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigRecord {
    index: usize,
    columns: IndexMap<String, TypedCellValue>,
}

impl ConfigRecord {
    /// Position of the record in its table, 0-based.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn get(&self, column: &str) -> Option<&TypedCellValue> {
        self.columns.get(column)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, String, TypedCellValue> {
        self.columns.iter()
    }

    pub fn column_names(&self) -> impl DoubleEndedIterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }
}

impl<'a> IntoIterator for &'a ConfigRecord {
    type Item = (&'a String, &'a TypedCellValue);
    type IntoIter = Iter<'a, String, TypedCellValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}

/// Records of the config table in sheet order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigTable {
    headers: Vec<String>,
    records: Vec<ConfigRecord>,
}

impl ConfigTable {
    /// Builds the table from a header row and data rows.
    ///
    /// Rows shorter than the header are padded with blanks, extra cells are ignored.
    pub fn from_rows<R, I>(table_name: &str, headers: Vec<String>, rows: R) -> RackResult<Self>
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator<Item = TypedCellValue>,
    {
        for (i, header) in headers.iter().enumerate() {
            if headers[..i].contains(header) {
                return Err(RackError::DuplicateColumn {
                    table: table_name.to_string(),
                    column: header.clone(),
                });
            }
        }

        let records = rows
            .into_iter()
            .enumerate()
            .map(|(index, row)| {
                let mut values = row.into_iter();
                let columns = headers
                    .iter()
                    .map(|h| (h.clone(), values.next().unwrap_or(TypedCellValue::Blank)))
                    .collect();
                ConfigRecord { index, columns }
            })
            .collect();

        Ok(Self { headers, records })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn records(&self) -> &[ConfigRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn log_records(&self) {
        for record in &self.records {
            for (key, value) in record {
                trace!("key:{key} value:{value} type:{}", value.kind());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text(s: &str) -> TypedCellValue {
        TypedCellValue::Text(s.to_string())
    }

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn records_follow_header_order() {
        let table = ConfigTable::from_rows(
            "table_config",
            headers(&["type", "name", "note"]),
            vec![vec![text("SheetA"), text("Out1"), text("hello")]],
        )
        .unwrap();

        let record = &table.records()[0];
        assert_eq!(
            record.column_names().collect::<Vec<_>>(),
            vec!["type", "name", "note"]
        );
        assert_eq!(
            record.column_names().rev().collect::<Vec<_>>(),
            vec!["note", "name", "type"]
        );
        assert_eq!(record.get("name"), Some(&text("Out1")));
    }

    #[test]
    fn one_record_per_row_in_order() {
        let table = ConfigTable::from_rows(
            "table_config",
            headers(&["type", "name"]),
            vec![
                vec![text("A"), text("first")],
                vec![text("B"), text("second")],
                vec![text("A"), text("third")],
            ],
        )
        .unwrap();

        assert_eq!(table.len(), 3);
        let names: Vec<String> = table
            .records()
            .iter()
            .map(|r| r.get("name").unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["first", "second", "third"]);
        assert_eq!(table.records()[2].index(), 2);
    }

    #[test]
    fn short_rows_are_padded_with_blanks() {
        let table = ConfigTable::from_rows(
            "table_config",
            headers(&["type", "name", "note"]),
            vec![vec![text("A")]],
        )
        .unwrap();
        let record = &table.records()[0];
        assert_eq!(record.len(), 3);
        assert_eq!(record.get("note"), Some(&TypedCellValue::Blank));
    }

    #[test]
    fn duplicate_header_is_rejected() {
        let err = ConfigTable::from_rows(
            "table_config",
            headers(&["type", "name", "type"]),
            Vec::<Vec<TypedCellValue>>::new(),
        )
        .unwrap_err();
        assert!(matches!(err, RackError::DuplicateColumn { ref column, .. } if column == "type"));
    }
}
