//! Table rendering utilities for CLI outputs.

use crate::utils::formatting::strip_ansi;
use unicode_width::UnicodeWidthStr;

pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    fn widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(i, h)| {
                self.rows
                    .iter()
                    .filter_map(|r| r.get(i))
                    .map(|c| display_width(c))
                    .chain(std::iter::once(display_width(h)))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    /// Header, a `separator` rule, then one line per row. Columns are
    /// padded by display width, ignoring ANSI colors, so wide glyphs and
    /// colored cells still line up.
    pub fn render(&self, separator: char) -> String {
        let widths = self.widths();
        let mut out = String::new();

        push_line(&mut out, self.headers.iter().map(String::as_str), &widths);

        let total = widths.iter().sum::<usize>() + widths.len().saturating_sub(1);
        out.push_str(&separator.to_string().repeat(total));
        out.push('\n');

        for row in &self.rows {
            let cells = (0..widths.len()).map(|i| row.get(i).map_or("", String::as_str));
            push_line(&mut out, cells, &widths);
        }

        out
    }
}

fn display_width(s: &str) -> usize {
    strip_ansi(s).width()
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let mut line = String::new();
    for (cell, w) in cells.zip(widths) {
        line.push_str(cell);
        line.push_str(&" ".repeat(w.saturating_sub(display_width(cell)) + 1));
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_align_to_widest_cell() {
        let mut t = Table::new(["id", "name"]);
        t.add_row(vec!["1".into(), "Truck-100".into()]);
        t.add_row(vec!["12".into(), "T".into()]);
        let out = t.render('-');
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines[0], "id name");
        assert_eq!(lines[1], "------------");
        assert_eq!(lines[2], "1  Truck-100");
        assert_eq!(lines[3], "12 T");
    }

    #[test]
    fn colored_cells_do_not_widen_columns() {
        let mut t = Table::new(["state", "x"]);
        t.add_row(vec!["\x1b[32mon\x1b[0m".into(), "1".into()]);
        let out = strip_ansi(&t.render('-'));
        assert_eq!(out.lines().nth(2), Some("on    1"));
    }

    #[test]
    fn short_rows_are_padded() {
        let mut t = Table::new(["a", "b"]);
        t.add_row(vec!["x".into()]);
        assert_eq!(t.render('=').lines().nth(2), Some("x"));
    }
}
