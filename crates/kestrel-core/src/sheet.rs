use crate::{Error, Result};
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;

/// An exported filing-metadata table: one header row plus data rows, all
/// cells rendered as strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ExportTable {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    /// Load the first worksheet of an exported workbook.
    ///
    /// The portal prepends a fixed preamble; `skip_rows` leading rows are
    /// discarded, the next row is taken as the header, and everything after
    /// it as data. Short rows are padded to header width.
    pub fn from_workbook(path: &Path, skip_rows: usize) -> Result<Self> {
        tracing::debug!("Reading export workbook from: {}", path.display());

        let mut workbook = open_workbook_auto(path)?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or(Error::EmptyWorkbook)??;

        let mut rows = range.rows().skip(skip_rows);
        let columns: Vec<String> = rows
            .next()
            .ok_or(Error::EmptyWorkbook)?
            .iter()
            .map(|cell| render_cell(cell).trim().to_string())
            .collect();

        let width = columns.len();
        let rows: Vec<Vec<String>> = rows
            .map(|row| {
                let mut cells: Vec<String> = row.iter().map(render_cell).collect();
                cells.resize(width, String::new());
                cells
            })
            .collect();

        tracing::info!(
            "Loaded export with {} columns and {} rows from {}",
            width,
            rows.len(),
            path.display()
        );

        Ok(Self { columns, rows })
    }

    /// Index of a named column, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Remove a column by name. Returns false (and leaves the table
    /// untouched) when the column does not exist.
    pub fn drop_column(&mut self, name: &str) -> bool {
        let Some(index) = self.column_index(name) else {
            return false;
        };

        self.columns.remove(index);
        for row in &mut self.rows {
            row.remove(index);
        }
        true
    }

    /// Keep only rows where any cell contains `marker`, case-insensitively.
    pub fn retain_rows_containing(&mut self, marker: &str) {
        let marker = marker.to_lowercase();
        self.rows
            .retain(|row| row.iter().any(|cell| cell.to_lowercase().contains(&marker)));
    }
}

fn render_cell(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(d) if d.time() == chrono::NaiveTime::MIN => {
                d.date().format("%Y-%m-%d").to_string()
            }
            Some(d) => d.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => dt.as_f64().to_string(),
        },
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("#{e:?}"),
    }
}
