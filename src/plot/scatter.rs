//! Character-grid scatterplot over three categorical columns.
//!
//! The x axis holds the distinct x values sorted ascending (ISO dates sort
//! chronologically), the y axis the distinct y values in first-seen order,
//! and each hue value gets its own glyph.

use owo_colors::{AnsiColors, OwoColorize};

use super::ChartStyle;
use crate::client::ClientError;
use crate::models::{Record, ResultTable};
use crate::utils::{display_width, pad_to_width};

const GLYPHS: &[char] = &['●', '▲', '■', '◆', '★', '✚', '○', '△'];

const PALETTE: &[AnsiColors] = &[
    AnsiColors::Cyan,
    AnsiColors::Magenta,
    AnsiColors::Yellow,
    AnsiColors::Green,
    AnsiColors::Blue,
    AnsiColors::Red,
];

/// Narrowest plotting area, whatever the requested width
const MIN_PLOT_WIDTH: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Point {
    pub x: String,
    pub y: String,
    pub hue: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scatter {
    x: String,
    y: String,
    hue: String,
    points: Vec<Point>,
}

impl Scatter {
    pub fn new(
        x: impl Into<String>,
        y: impl Into<String>,
        hue: impl Into<String>,
        points: Vec<Point>,
    ) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            hue: hue.into(),
            points,
        }
    }

    /// One point per table row
    pub fn from_columns<R: Record>(
        table: &ResultTable<R>,
        x: &str,
        y: &str,
        hue: &str,
    ) -> Result<Self, ClientError> {
        let column = |name: &str| {
            table
                .column(name)
                .ok_or_else(|| ClientError::UnknownColumn(name.to_string()))
        };
        let xs = column(x)?;
        let ys = column(y)?;
        let hues = column(hue)?;

        let points = xs
            .into_iter()
            .zip(ys)
            .zip(hues)
            .map(|((x, y), hue)| Point {
                x: x.to_string(),
                y: y.to_string(),
                hue: hue.to_string(),
            })
            .collect();

        Ok(Self::new(x, y, hue, points))
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Distinct x values, sorted
    pub fn x_categories(&self) -> Vec<&str> {
        let mut xs: Vec<&str> = self.points.iter().map(|p| p.x.as_str()).collect();
        xs.sort_unstable();
        xs.dedup();
        xs
    }

    /// Distinct y values, first-seen order
    pub fn y_categories(&self) -> Vec<&str> {
        first_seen(self.points.iter().map(|p| p.y.as_str()))
    }

    /// Distinct hue values, first-seen order
    pub fn hue_categories(&self) -> Vec<&str> {
        first_seen(self.points.iter().map(|p| p.hue.as_str()))
    }

    pub fn render(&self, style: &ChartStyle) -> String {
        let header = format!("{} vs {} by {} ({} points)", self.y, self.x, self.hue, self.points.len());
        if self.points.is_empty() {
            return format!("{}\n(no data)", header);
        }

        let xs = self.x_categories();
        let ys = self.y_categories();
        let hues = self.hue_categories();

        let label_width = ys
            .iter()
            .map(|y| display_width(y))
            .max()
            .unwrap_or(1)
            .clamp(1, (style.width / 3).max(1));
        let plot_width = style.width.saturating_sub(label_width + 2).max(MIN_PLOT_WIDTH);

        let column_of = |x: &str| -> usize {
            let idx = xs.binary_search(&x).unwrap_or(0);
            if xs.len() <= 1 {
                0
            } else {
                idx * (plot_width - 1) / (xs.len() - 1)
            }
        };

        let mut grid: Vec<Vec<Option<usize>>> = vec![vec![None; plot_width]; ys.len()];
        for point in &self.points {
            let row = ys.iter().position(|y| *y == point.y).unwrap_or(0);
            let hue = hues.iter().position(|h| *h == point.hue).unwrap_or(0);
            grid[row][column_of(&point.x)] = Some(hue);
        }

        let mut lines = vec![header];
        for (y, cells) in ys.iter().zip(&grid) {
            let cells: String = cells
                .iter()
                .map(|cell| match cell {
                    Some(hue) => glyph(*hue, style),
                    None => " ".to_string(),
                })
                .collect();
            lines.push(format!("{} │{}", pad_to_width(y, label_width), cells));
        }

        let indent = " ".repeat(label_width + 1);
        lines.push(format!("{}└{}", indent, "─".repeat(plot_width)));
        lines.push(format!("{} {}", indent, axis_labels(&xs, plot_width)));

        let legend: Vec<String> = hues
            .iter()
            .enumerate()
            .map(|(i, h)| format!("{} {}", glyph(i, style), h))
            .collect();
        lines.push(format!("{}: {}", self.hue, legend.join("  ")));

        lines.join("\n")
    }
}

fn first_seen<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen: Vec<&str> = Vec::new();
    for v in values {
        if !seen.contains(&v) {
            seen.push(v);
        }
    }
    seen
}

fn glyph(hue: usize, style: &ChartStyle) -> String {
    let g = GLYPHS[hue % GLYPHS.len()];
    if style.color {
        g.color(PALETTE[hue % PALETTE.len()]).to_string()
    } else {
        g.to_string()
    }
}

/// First x value at the left edge, last at the right edge
fn axis_labels(xs: &[&str], width: usize) -> String {
    match xs {
        [] => String::new(),
        [only] => pad_to_width(only, width).trim_end().to_string(),
        [first, .., last] => {
            let half = width / 2;
            let left = pad_to_width(first, half);
            let right = crate::utils::truncate_with_ellipsis(last, width - half);
            let gap = (width - half).saturating_sub(display_width(&right));
            format!("{}{}{}", left, " ".repeat(gap), right)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ContentRecord;

    fn row(date: &str, section: &str, kind: &str) -> ContentRecord {
        ContentRecord {
            title: "t".to_string(),
            section: section.to_string(),
            date: date.to_string(),
            kind: kind.to_string(),
        }
    }

    fn table() -> ResultTable<ContentRecord> {
        ResultTable::new(vec![
            row("2023-01-03", "Film", "article"),
            row("2023-01-01", "Sport", "liveblog"),
            row("2023-01-02", "Film", "article"),
        ])
    }

    #[test]
    fn test_categories() {
        let scatter = Scatter::from_columns(&table(), "date", "section", "type").unwrap();
        assert_eq!(scatter.points().len(), 3);
        assert_eq!(
            scatter.x_categories(),
            vec!["2023-01-01", "2023-01-02", "2023-01-03"]
        );
        assert_eq!(scatter.y_categories(), vec!["Film", "Sport"]);
        assert_eq!(scatter.hue_categories(), vec!["article", "liveblog"]);
    }

    #[test]
    fn test_unknown_column() {
        let err = Scatter::from_columns(&table(), "date", "pillar", "type").unwrap_err();
        assert!(matches!(err, ClientError::UnknownColumn(c) if c == "pillar"));
    }

    #[test]
    fn test_render_places_points() {
        let scatter = Scatter::from_columns(&table(), "date", "section", "type").unwrap();
        let text = scatter.render(&ChartStyle::plain(30));
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "section vs date by type (3 points)");
        // Label column is 5 wide ("Sport"), leaving 23 columns to plot
        let film: Vec<char> = lines[1].chars().collect();
        let sport: Vec<char> = lines[2].chars().collect();
        assert!(lines[1].starts_with("Film  │"));
        assert!(lines[2].starts_with("Sport │"));

        let plot_start = 7;
        // 2023-01-01 at the left edge, 2023-01-02 in the middle, 2023-01-03 at the right edge
        assert_eq!(sport[plot_start], '▲');
        assert_eq!(film[plot_start + 11], '●');
        assert_eq!(film[plot_start + 22], '●');

        assert!(lines[3].contains('└'));
        assert!(lines[4].contains("2023-01-01"));
        assert!(lines[4].trim_end().ends_with("2023-01-03"));
        assert_eq!(lines[5], "type: ● article  ▲ liveblog");
    }

    #[test]
    fn test_render_empty() {
        let empty: ResultTable<ContentRecord> = ResultTable::default();
        let scatter = Scatter::from_columns(&empty, "date", "section", "type").unwrap();
        assert_eq!(
            scatter.render(&ChartStyle::plain(30)),
            "section vs date by type (0 points)\n(no data)"
        );
    }
}
