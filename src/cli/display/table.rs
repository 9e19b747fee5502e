//! Table rendering for CLI output

use super::ColorTheme;
use crate::shared::row::{normalize, ProvideRowData, RowData};
use comfy_table::presets::{NOTHING, UTF8_FULL};
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use std::collections::HashMap;

/// Collects rows for a fixed set of columns and renders them as one table.
///
/// Columns are matched against row fields after normalization, so the
/// column `cluster_id` selects the field "Cluster ID". Columns no row
/// provides render as empty cells.
pub struct TableRenderer {
    columns: Vec<String>,
    no_headers: bool,
    no_color: bool,
    theme: ColorTheme,
    rows: Vec<Vec<String>>,
}

impl TableRenderer {
    /// Create a renderer for a comma separated column list
    pub fn new(columns: &str) -> Self {
        Self {
            columns: parse_columns(columns),
            no_headers: false,
            no_color: false,
            theme: ColorTheme::default(),
            rows: Vec::new(),
        }
    }

    pub fn no_headers(mut self, no_headers: bool) -> Self {
        self.no_headers = no_headers;
        self
    }

    pub fn no_color(mut self, no_color: bool) -> Self {
        self.no_color = no_color;
        self
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn write<T: ProvideRowData + ?Sized>(&mut self, item: &T) {
        self.write_row(item.provide_row_data());
    }

    /// Write `item` with `extra` fields layered on top of its own.
    pub fn write_with_fields<T: ProvideRowData + ?Sized>(&mut self, item: &T, extra: RowData) {
        let mut row = item.provide_row_data();
        row.extend(extra);
        self.write_row(row);
    }

    pub fn write_row(&mut self, row: RowData) {
        let fields: HashMap<String, String> =
            row.into_iter().map(|(k, v)| (normalize(&k), v)).collect();

        let cells = self
            .columns
            .iter()
            .map(|c| fields.get(c).cloned().unwrap_or_default())
            .collect();

        self.rows.push(cells);
    }

    /// Render every row written so far
    pub fn render(&self) -> String {
        let mut table = Table::new();

        if self.no_color {
            table.load_preset(NOTHING).force_no_tty();
        } else {
            table.load_preset(UTF8_FULL);
        }
        table.set_content_arrangement(ContentArrangement::Dynamic);

        if !self.no_headers {
            table.set_header(
                self.columns
                    .iter()
                    .map(|c| Cell::new(c.to_uppercase()).set_alignment(CellAlignment::Left)),
            );
        }

        for row in &self.rows {
            table.add_row(self.columns.iter().zip(row).map(|(column, value)| {
                let cell = Cell::new(value);
                match self.theme.column_color(column, value) {
                    Some(color) if !self.no_color => cell.fg(color),
                    _ => cell,
                }
            }));
        }

        let mut output = table.to_string();
        output.push('\n');
        output
    }
}

/// Split and normalize a comma separated column list, dropping empties.
pub fn parse_columns(columns: &str) -> Vec<String> {
    columns
        .split(',')
        .map(normalize)
        .filter(|c| !c.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Item;

    impl ProvideRowData for Item {
        fn provide_row_data(&self) -> RowData {
            RowData::from([
                ("ID".to_string(), "abc".to_string()),
                ("External ID".to_string(), "ext-1".to_string()),
                ("State".to_string(), "ready".to_string()),
            ])
        }
    }

    fn lines(output: &str) -> Vec<String> {
        output
            .lines()
            .map(|l| l.split_whitespace().collect::<Vec<_>>().join(" "))
            .filter(|l| !l.is_empty())
            .collect()
    }

    #[test]
    fn test_parse_columns_normalizes() {
        assert_eq!(
            parse_columns("ID, External-ID,, cluster state "),
            vec!["id", "external_id", "cluster_state"]
        );
    }

    #[test]
    fn test_render_selects_columns_in_order() {
        let mut table = TableRenderer::new("state, id, external_id, missing").no_color(true);
        table.write(&Item);

        let out = lines(&table.render());
        assert_eq!(out[0], "STATE ID EXTERNAL_ID MISSING");
        assert_eq!(out[1], "ready abc ext-1");
    }

    #[test]
    fn test_render_without_headers() {
        let mut table = TableRenderer::new("id")
            .no_headers(true)
            .no_color(true);
        table.write(&Item);

        assert_eq!(lines(&table.render()), vec!["abc"]);
    }

    #[test]
    fn test_write_with_fields_overrides() {
        let mut table = TableRenderer::new("id, team").no_color(true).no_headers(true);
        table.write_with_fields(
            &Item,
            RowData::from([
                ("Team".to_string(), "MT-SRE".to_string()),
                ("ID".to_string(), "override".to_string()),
            ]),
        );

        assert_eq!(lines(&table.render()), vec!["override MT-SRE"]);
    }
}
