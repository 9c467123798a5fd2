//! Result tables: ordered rows of one record kind.

use serde::{Deserialize, Serialize};

use crate::models::Record;

/// Paging metadata reported by the API alongside a result list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// Total number of matching items
    pub total: Option<u64>,

    /// Page this result came from
    pub current_page: Option<u32>,

    /// Number of pages available at the requested page size
    pub pages: Option<u32>,
}

/// One row per API result item, in the order the API returned them.
///
/// Serializes as a plain array of rows, each an object keyed by column name.
/// Paging metadata is not part of the serialized form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultTable<R> {
    rows: Vec<R>,

    #[serde(skip)]
    page_info: Option<PageInfo>,
}

impl<R> Default for ResultTable<R> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            page_info: None,
        }
    }
}

impl<R: Record> ResultTable<R> {
    /// Create a table from rows
    pub fn new(rows: Vec<R>) -> Self {
        Self {
            rows,
            page_info: None,
        }
    }

    /// Attach paging metadata
    pub fn with_page_info(mut self, info: PageInfo) -> Self {
        self.page_info = Some(info);
        self
    }

    /// Column names in extraction order
    pub fn columns(&self) -> &'static [&'static str] {
        R::COLUMNS
    }

    /// Whether the table has a column with this name
    pub fn has_column(&self, name: &str) -> bool {
        R::COLUMNS.contains(&name)
    }

    /// All values of one column, or `None` if there is no such column
    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        if !self.has_column(name) {
            return None;
        }
        Some(
            self.rows
                .iter()
                .map(|row| row.value(name).unwrap_or_default())
                .collect(),
        )
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn first(&self) -> Option<&R> {
        self.rows.first()
    }

    pub fn page_info(&self) -> Option<&PageInfo> {
        self.page_info.as_ref()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.rows.iter()
    }

    /// Append the rows of another table. Paging metadata of `other` is dropped.
    pub fn append(&mut self, other: ResultTable<R>) {
        self.rows.extend(other.rows);
    }

    /// Apply a transformation to every row
    pub fn map_rows(self, f: impl FnMut(R) -> R) -> Self {
        Self {
            rows: self.rows.into_iter().map(f).collect(),
            page_info: self.page_info,
        }
    }
}

impl<R: Record> FromIterator<R> for ResultTable<R> {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<R> IntoIterator for ResultTable<R> {
    type Item = R;
    type IntoIter = std::vec::IntoIter<R>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a, R> IntoIterator for &'a ResultTable<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContentRecord, SectionRecord};

    fn row(title: &str, section: &str) -> ContentRecord {
        ContentRecord {
            title: title.to_string(),
            section: section.to_string(),
            date: "2023-01-02T03:04:05Z".to_string(),
            kind: "article".to_string(),
        }
    }

    #[test]
    fn test_column_selection() {
        let table: ResultTable<ContentRecord> =
            vec![row("A", "Film"), row("B", "Sport")].into_iter().collect();

        assert_eq!(table.columns(), &["title", "section", "date", "type"]);
        assert_eq!(table.column("section").unwrap(), vec!["Film", "Sport"]);
        assert!(table.column("pillar").is_none());
    }

    #[test]
    fn test_append_keeps_order() {
        let mut table = ResultTable::new(vec![row("A", "Film")]);
        table.append(ResultTable::new(vec![row("B", "Film"), row("C", "Film")]));

        let titles: Vec<&str> = table.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_serializes_as_array_of_rows() {
        let table = ResultTable::new(vec![
            SectionRecord {
                section: "Football".to_string(),
            },
            SectionRecord {
                section: "Film".to_string(),
            },
        ])
        .with_page_info(PageInfo {
            total: Some(2),
            current_page: Some(1),
            pages: Some(1),
        });

        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{"section": "Football"}, {"section": "Film"}])
        );
    }

    #[test]
    fn test_content_rows_keyed_by_column_name() {
        let table = ResultTable::new(vec![row("A", "Film")]);
        let json = serde_json::to_value(&table).unwrap();

        let object = json[0].as_object().unwrap();
        let mut keys: Vec<&str> = object.keys().map(|k| k.as_str()).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["date", "section", "title", "type"]);
    }

    #[test]
    fn test_empty_table() {
        let table: ResultTable<SectionRecord> = ResultTable::default();
        assert!(table.is_empty());
        assert!(table.first().is_none());
        assert_eq!(table.column("section").unwrap(), Vec::<&str>::new());
    }
}
