//! Table output: plain-text grid and CSV

use std::io::Write;
use thiserror::Error;

use super::pager::{range_label, Pager};
use super::schema::{Align, TableSchema};
use super::CellValue;
use crate::api::PaginationMeta;

/// Row shown when there is nothing to display
pub const EMPTY_MESSAGE: &str = "No records found";

/// A table row, positionally aligned to the schema's columns
pub type Row = Vec<CellValue>;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Output is not valid UTF-8")]
    Utf8,
}

/// Where the table's paging comes from
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paging {
    /// Slice the full record set locally
    Client(Pager),
    /// Rows are already one server page; labels come from the server
    Server(PaginationMeta),
}

/// A schema bound to rows and a paging mode
#[derive(Debug, Clone, Copy)]
pub struct Table<'a> {
    schema: &'a TableSchema,
    rows: &'a [Row],
    paging: Paging,
}

impl<'a> Table<'a> {
    pub fn new(schema: &'a TableSchema, rows: &'a [Row], paging: Paging) -> Self {
        Self {
            schema,
            rows,
            paging,
        }
    }

    /// Rows on the current page
    pub fn visible_rows(&self) -> &'a [Row] {
        match self.paging {
            Paging::Client(pager) => pager.slice(self.rows),
            Paging::Server(_) => self.rows,
        }
    }

    /// `from–to of total`
    pub fn footer(&self) -> String {
        match self.paging {
            Paging::Client(pager) => pager.label(self.rows.len()),
            Paging::Server(meta) => {
                let offset = meta.current_page as u64 * meta.page_size as u64;
                range_label(offset, self.rows.len() as u64, meta.total_records)
            }
        }
    }

    /// Rendered cell text for every visible row
    fn rendered_rows(&self) -> Vec<Vec<String>> {
        self.visible_rows()
            .iter()
            .map(|row| {
                self.schema
                    .columns()
                    .iter()
                    .enumerate()
                    .map(|(i, column)| {
                        let value = row.get(i).unwrap_or(&CellValue::Empty);
                        column.render(value, row)
                    })
                    .collect()
            })
            .collect()
    }

    /// Plain-text grid with a footer line
    pub fn to_text(&self) -> String {
        let columns = self.schema.columns();
        let body = self.rendered_rows();

        let widths: Vec<usize> = columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                column.width.unwrap_or_else(|| {
                    body.iter()
                        .map(|cells| cells[i].chars().count())
                        .chain(std::iter::once(column.label.chars().count()))
                        .max()
                        .unwrap_or(0)
                })
            })
            .collect();

        let mut out = String::new();

        let header: Vec<String> = columns
            .iter()
            .zip(&widths)
            .map(|(column, &width)| pad(&column.label, width, Align::Left))
            .collect();
        out.push_str(header.join(" | ").trim_end());
        out.push('\n');

        let separator: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
        out.push_str(&separator.join("-+-"));
        out.push('\n');

        if body.is_empty() {
            let span = widths.iter().sum::<usize>() + widths.len().saturating_sub(1) * 3;
            out.push_str(pad(EMPTY_MESSAGE, span, Align::Center).trim_end());
            out.push('\n');
        } else {
            for cells in &body {
                let line: Vec<String> = columns
                    .iter()
                    .zip(&widths)
                    .zip(cells)
                    .map(|((column, &width), cell)| pad(cell, width, column.align))
                    .collect();
                out.push_str(line.join(" | ").trim_end());
                out.push('\n');
            }
        }

        out.push('\n');
        out.push_str(&self.footer());
        out.push('\n');
        out
    }

    /// Header plus visible rows as CSV (no placeholder row when empty)
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), RenderError> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(self.schema.labels())?;

        for row in self.visible_rows() {
            let record: Vec<String> = self
                .schema
                .columns()
                .iter()
                .enumerate()
                .map(|(i, column)| match row.get(i) {
                    Some(value) if column.kind == super::ColumnKind::Custom => {
                        column.render(value, row)
                    }
                    Some(value) => value.raw(),
                    None => String::new(),
                })
                .collect();
            csv.write_record(&record)?;
        }

        csv.flush()?;
        Ok(())
    }

    pub fn to_csv(&self) -> Result<String, RenderError> {
        let mut buf = Vec::new();
        self.write_csv(&mut buf)?;
        String::from_utf8(buf).map_err(|_| RenderError::Utf8)
    }
}

fn pad(text: &str, width: usize, align: Align) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    let fill = width - len;
    match align {
        Align::Left => format!("{}{}", text, " ".repeat(fill)),
        Align::Right => format!("{}{}", " ".repeat(fill), text),
        Align::Center => {
            let left = fill / 2;
            format!("{}{}{}", " ".repeat(left), text, " ".repeat(fill - left))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Column;

    fn schema() -> TableSchema {
        TableSchema::new(vec![
            Column::new("Name", "name"),
            Column::number("Level", "proficiency"),
        ])
    }

    fn rows(n: usize) -> Vec<Row> {
        (0..n)
            .map(|i| vec![CellValue::from(format!("skill-{}", i)), CellValue::from(i as i32)])
            .collect()
    }

    #[test]
    fn test_empty_renders_single_message_row() {
        let schema = schema();
        let table = Table::new(&schema, &[], Paging::Client(Pager::new()));
        let text = table.to_text();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[2].contains(EMPTY_MESSAGE));
        assert_eq!(text.matches(EMPTY_MESSAGE).count(), 1);
        assert_eq!(lines[4], "0–0 of 0");
    }

    #[test]
    fn test_client_paging_slices() {
        let schema = schema();
        let data = rows(12);
        let mut pager = Pager::new();
        pager.set_page(2, data.len());

        let table = Table::new(&schema, &data, Paging::Client(pager));
        assert_eq!(table.visible_rows().len(), 2);
        assert_eq!(table.footer(), "11–12 of 12");
    }

    #[test]
    fn test_server_paging_is_display_only() {
        let schema = schema();
        let data = rows(10);
        let meta = PaginationMeta {
            current_page: 2,
            page_size: 10,
            total_pages: 5,
            total_records: 42,
        };

        let table = Table::new(&schema, &data, Paging::Server(meta));
        assert_eq!(table.visible_rows().len(), 10);
        assert_eq!(table.footer(), "21–30 of 42");
    }

    #[test]
    fn test_text_alignment() {
        let schema = schema();
        let data = vec![vec![CellValue::from("Rust"), CellValue::from(95)]];
        let text = Table::new(&schema, &data, Paging::Client(Pager::new())).to_text();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Name | Level");
        assert_eq!(lines[1], "-----+------");
        assert_eq!(lines[2], "Rust |    95");
    }

    #[test]
    fn test_custom_component_applied() {
        let schema = TableSchema::new(vec![
            Column::new("Name", "name"),
            Column::custom("Stars", "rating", |value, _| match value {
                CellValue::Number(n) => "*".repeat(*n as usize),
                _ => String::new(),
            }),
        ]);
        let data = vec![vec![CellValue::from("Grace"), CellValue::from(3)]];
        let table = Table::new(&schema, &data, Paging::Client(Pager::new()));

        assert!(table.to_text().contains("***"));
        assert_eq!(table.to_csv().unwrap(), "Name,Stars\nGrace,***\n");
    }

    #[test]
    fn test_csv_output() {
        let schema = schema();
        let data = vec![
            vec![CellValue::from("Rust, async"), CellValue::from(90)],
            vec![CellValue::from("Go"), CellValue::Empty],
        ];
        let csv = Table::new(&schema, &data, Paging::Client(Pager::new()))
            .to_csv()
            .unwrap();

        assert_eq!(csv, "Name,Level\n\"Rust, async\",90\nGo,\n");
    }
}
