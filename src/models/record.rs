//! Flat records extracted from API result items.
//!
//! Each endpoint has its own fixed projection. There is no shared base type;
//! the [`Record`] trait only describes the column layout so tables and charts
//! can treat them uniformly.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A flat row with a fixed, ordered set of named columns
pub trait Record: Clone + Serialize {
    /// Column names in extraction order
    const COLUMNS: &'static [&'static str];

    /// Value of a column, or `None` if the column does not exist
    fn value(&self, column: &str) -> Option<&str>;

    /// All values in column order
    fn values(&self) -> Vec<&str> {
        Self::COLUMNS
            .iter()
            .map(|c| self.value(c).unwrap_or_default())
            .collect()
    }
}

/// A content item: one search result or a single fetched item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRecord {
    pub title: String,
    pub section: String,
    /// Publication timestamp as sent by the API (`2022-12-15T06:00:14Z`)
    pub date: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl ContentRecord {
    /// Keep only the first `len` characters of the date (7 gives `YYYY-MM`)
    pub fn truncate_date(mut self, len: usize) -> Self {
        if let Some((idx, _)) = self.date.char_indices().nth(len) {
            self.date.truncate(idx);
        }
        self
    }
}

impl Record for ContentRecord {
    const COLUMNS: &'static [&'static str] = &["title", "section", "date", "type"];

    fn value(&self, column: &str) -> Option<&str> {
        match column {
            "title" => Some(&self.title),
            "section" => Some(&self.section),
            "date" => Some(&self.date),
            "type" => Some(&self.kind),
            _ => None,
        }
    }
}

impl fmt::Display for ContentRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Title: {}", self.title)?;
        writeln!(f, "Section: {}", self.section)?;
        writeln!(f, "Date: {}", self.date)?;
        write!(f, "Type: {}", self.kind)
    }
}

/// A search result including its pillar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PillarRecord {
    pub title: String,
    pub section: String,
    pub date: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub pillar: String,
}

impl Record for PillarRecord {
    const COLUMNS: &'static [&'static str] = &["title", "section", "date", "type", "pillar"];

    fn value(&self, column: &str) -> Option<&str> {
        match column {
            "title" => Some(&self.title),
            "section" => Some(&self.section),
            "date" => Some(&self.date),
            "type" => Some(&self.kind),
            "pillar" => Some(&self.pillar),
            _ => None,
        }
    }
}

/// A tag lookup result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRecord {
    pub tag: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Record for TagRecord {
    const COLUMNS: &'static [&'static str] = &["tag", "type"];

    fn value(&self, column: &str) -> Option<&str> {
        match column {
            "tag" => Some(&self.tag),
            "type" => Some(&self.kind),
            _ => None,
        }
    }
}

/// A section lookup result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionRecord {
    pub section: String,
}

impl Record for SectionRecord {
    const COLUMNS: &'static [&'static str] = &["section"];

    fn value(&self, column: &str) -> Option<&str> {
        (column == "section").then_some(self.section.as_str())
    }
}

/// An edition lookup result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditionRecord {
    pub edition: String,
}

impl Record for EditionRecord {
    const COLUMNS: &'static [&'static str] = &["edition"];

    fn value(&self, column: &str) -> Option<&str> {
        (column == "edition").then_some(self.edition.as_str())
    }
}

/// Title and canonical API URL of a search result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemLink {
    pub title: String,
    pub api_url: String,
}

impl Record for ItemLink {
    const COLUMNS: &'static [&'static str] = &["title", "api_url"];

    fn value(&self, column: &str) -> Option<&str> {
        match column {
            "title" => Some(&self.title),
            "api_url" => Some(&self.api_url),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ContentRecord {
        ContentRecord {
            title: "Best films of 2022 in the UK: No 7 – RRR".to_string(),
            section: "Film".to_string(),
            date: "2022-12-15T06:00:14Z".to_string(),
            kind: "article".to_string(),
        }
    }

    #[test]
    fn test_content_record_values_follow_columns() {
        let r = record();
        assert_eq!(
            r.values(),
            vec![
                "Best films of 2022 in the UK: No 7 – RRR",
                "Film",
                "2022-12-15T06:00:14Z",
                "article"
            ]
        );
        assert_eq!(r.value("pillar"), None);
    }

    #[test]
    fn test_truncate_date_to_month() {
        let r = record().truncate_date(7);
        assert_eq!(r.date, "2022-12");

        let short = ContentRecord {
            date: "2022".to_string(),
            ..record()
        }
        .truncate_date(7);
        assert_eq!(short.date, "2022");
    }

    #[test]
    fn test_display_message() {
        let text = record().to_string();
        assert_eq!(
            text,
            "Title: Best films of 2022 in the UK: No 7 – RRR\nSection: Film\nDate: 2022-12-15T06:00:14Z\nType: article"
        );
    }

    #[test]
    fn test_type_column_serializes_as_type() {
        let json = serde_json::to_value(TagRecord {
            tag: "Liverpool".to_string(),
            kind: "keyword".to_string(),
        })
        .unwrap();
        assert_eq!(json["type"], "keyword");
        assert_eq!(json["tag"], "Liverpool");
    }
}
