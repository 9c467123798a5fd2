//! Horizontal bar histogram over one categorical column.

use owo_colors::OwoColorize;

use super::ChartStyle;
use crate::client::ClientError;
use crate::models::{Record, ResultTable};
use crate::utils::{display_width, pad_to_width};

const BAR: char = '█';

/// Counts of each distinct value in a column, in first-seen order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    column: String,
    bins: Vec<(String, usize)>,
}

impl Histogram {
    /// Build from raw values
    pub fn from_values<'a>(
        column: impl Into<String>,
        values: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let mut bins: Vec<(String, usize)> = Vec::new();
        for value in values {
            match bins.iter_mut().find(|(label, _)| label == value) {
                Some((_, count)) => *count += 1,
                None => bins.push((value.to_string(), 1)),
            }
        }
        Self {
            column: column.into(),
            bins,
        }
    }

    /// Build from a table column
    pub fn from_column<R: Record>(
        table: &ResultTable<R>,
        column: &str,
    ) -> Result<Self, ClientError> {
        let values = table
            .column(column)
            .ok_or_else(|| ClientError::UnknownColumn(column.to_string()))?;
        Ok(Self::from_values(column, values))
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn bins(&self) -> &[(String, usize)] {
        &self.bins
    }

    /// Number of values counted
    pub fn total(&self) -> usize {
        self.bins.iter().map(|(_, c)| c).sum()
    }

    pub fn render(&self, style: &ChartStyle) -> String {
        let mut out = format!("{} ({} rows)\n", self.column, self.total());
        if self.bins.is_empty() {
            out.push_str("(no data)");
            return out;
        }

        let max_count = self.bins.iter().map(|(_, c)| *c).max().unwrap_or(1);
        let count_width = max_count.to_string().len();
        let label_width = self
            .bins
            .iter()
            .map(|(label, _)| display_width(label))
            .max()
            .unwrap_or(0)
            .clamp(1, (style.width / 3).max(1));

        // label, " │", bar, " ", count
        let bar_space = style
            .width
            .saturating_sub(label_width + 3 + count_width)
            .max(1);

        let lines: Vec<String> = self
            .bins
            .iter()
            .map(|(label, count)| {
                let len = ((count * bar_space) as f64 / max_count as f64).round() as usize;
                let bar: String = std::iter::repeat(BAR).take(len.max(1)).collect();
                let bar = if style.color {
                    bar.cyan().to_string()
                } else {
                    bar
                };
                format!("{} │{} {}", pad_to_width(label, label_width), bar, count)
            })
            .collect();

        out.push_str(&lines.join("\n"));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PillarRecord;

    fn row(pillar: &str) -> PillarRecord {
        PillarRecord {
            title: "t".to_string(),
            section: "s".to_string(),
            date: "2023-01-01T00:00:00Z".to_string(),
            kind: "article".to_string(),
            pillar: pillar.to_string(),
        }
    }

    #[test]
    fn test_counts_in_first_seen_order() {
        let hist = Histogram::from_values("pillar", ["News", "Sport", "News", "Arts", "News"]);
        assert_eq!(
            hist.bins(),
            &[
                ("News".to_string(), 3),
                ("Sport".to_string(), 1),
                ("Arts".to_string(), 1)
            ]
        );
        assert_eq!(hist.total(), 5);
    }

    #[test]
    fn test_from_column_rejects_unknown_column() {
        let table = ResultTable::new(vec![row("News")]);
        let err = Histogram::from_column(&table, "author").unwrap_err();
        assert!(matches!(err, ClientError::UnknownColumn(c) if c == "author"));
    }

    #[test]
    fn test_render_scales_bars() {
        let table = ResultTable::new(vec![row("News"), row("News"), row("Sport")]);
        let hist = Histogram::from_column(&table, "pillar").unwrap();
        let text = hist.render(&ChartStyle::plain(40));

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "pillar (3 rows)");
        assert!(lines[1].starts_with("News  │"));
        assert!(lines[1].ends_with(" 2"));
        assert!(lines[2].starts_with("Sport │"));

        let bars = |l: &str| l.chars().filter(|c| *c == BAR).count();
        // 40 columns minus "Sport │", " 2" leaves 31 for the longest bar
        assert_eq!(bars(lines[1]), 31);
        assert_eq!(bars(lines[2]), 16);
        assert!(lines.iter().all(|l| display_width(l) <= 40));
    }

    #[test]
    fn test_render_empty() {
        let hist = Histogram::from_values("type", Vec::<&str>::new());
        assert_eq!(hist.render(&ChartStyle::plain(40)), "type (0 rows)\n(no data)");
    }
}
