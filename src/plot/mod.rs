//! Text charts over result tables.
//!
//! Building a chart from a table ([`Histogram::from_column`],
//! [`Scatter::from_columns`]) never touches the network. [`search_hist`] and
//! [`search_scatter`] combine a search with rendering for the CLI and return
//! the fetched table so callers keep the data.

mod histogram;
mod scatter;

pub use histogram::Histogram;
pub use scatter::{Point, Scatter};

use std::io::Write;

use crate::client::{ClientError, GuardianClient};
use crate::models::{ContentRecord, PillarRecord, Record, ResultTable, SearchQuery};

/// Output settings for rendered charts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartStyle {
    /// Total width in terminal columns
    pub width: usize,

    /// Emit ANSI colours
    pub color: bool,
}

impl ChartStyle {
    /// Fixed width, no colour
    pub fn plain(width: usize) -> Self {
        Self {
            width,
            color: false,
        }
    }

    /// Current terminal width, coloured when stdout is a terminal
    pub fn terminal() -> Self {
        Self {
            width: crate::utils::terminal_width(),
            color: crate::utils::is_terminal(),
        }
    }
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self::plain(crate::utils::DEFAULT_WIDTH)
    }
}

fn ensure_column<R: Record>(column: &str) -> Result<(), ClientError> {
    if R::COLUMNS.contains(&column) {
        Ok(())
    } else {
        Err(ClientError::UnknownColumn(column.to_string()))
    }
}

/// Search (with pillars) and write a histogram of `column` to `out`.
///
/// The column is checked before any request is made.
pub async fn search_hist<W: Write>(
    client: &GuardianClient,
    column: &str,
    query: &SearchQuery,
    style: &ChartStyle,
    out: &mut W,
) -> Result<ResultTable<PillarRecord>, ClientError> {
    ensure_column::<PillarRecord>(column)?;

    let table = client.search_with_pillar(query).await?;
    let chart = Histogram::from_column(&table, column)?;
    writeln!(out, "{}", chart.render(style))?;
    Ok(table)
}

/// Search and write a scatterplot of `y` against `x`, one glyph per `hue`.
pub async fn search_scatter<W: Write>(
    client: &GuardianClient,
    x: &str,
    y: &str,
    hue: &str,
    query: &SearchQuery,
    style: &ChartStyle,
    out: &mut W,
) -> Result<ResultTable<ContentRecord>, ClientError> {
    for column in [x, y, hue] {
        ensure_column::<ContentRecord>(column)?;
    }

    let table = client.search(query).await?;
    let chart = Scatter::from_columns(&table, x, y, hue)?;
    writeln!(out, "{}", chart.render(style))?;
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_column() {
        assert!(ensure_column::<PillarRecord>("pillar").is_ok());
        assert!(ensure_column::<ContentRecord>("pillar").is_err());
    }

    #[tokio::test]
    async fn test_search_hist_checks_column_before_request() {
        // Nothing listens on port 9; an unknown column must fail first
        let client = GuardianClient::new("k")
            .unwrap()
            .with_base_url("http://127.0.0.1:9")
            .unwrap();
        let mut out = Vec::new();
        let err = search_hist(
            &client,
            "author",
            &SearchQuery::latest(),
            &ChartStyle::default(),
            &mut out,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ClientError::UnknownColumn(_)));
        assert!(out.is_empty());
    }
}
