use crate::dates::normalize_date;
use crate::sheet::ExportTable;
use crate::{Error, Result};

/// Marker that identifies the filings this pipeline collects.
pub const REPORT_MARKER: &str = "Annual Report";

/// Column dropped from the export before reconciliation, when present.
pub const ABSTRACT_COLUMN: &str = "Abstract";

/// Date columns normalized to `DD/MM/YYYY` in the output.
pub const DATE_COLUMNS: &[&str] = &["Filing Date", "Event Date"];

/// Constant appended to every output row.
pub const OUTPUT_COUNTRY: &str = "Malaysia";

/// Placeholder for the document path until the files themselves are staged.
pub const PATH_PLACEHOLDER: &str = " ";

/// Leading preamble rows in the portal's export, before the header row.
pub const EXPORT_PREAMBLE_ROWS: usize = 14;

/// Merge extracted version ids into the filtered export rows.
///
/// The join is purely positional: row `i` gets `version_ids[i]`. The only
/// cross-check is strict count equality; a mismatch signals drift between
/// the listing UI and the export and fails the whole company.
pub fn reconcile(mut table: ExportTable, version_ids: &[String]) -> Result<ExportTable> {
    if table.rows.len() != version_ids.len() {
        return Err(Error::CountMismatch {
            rows: table.rows.len(),
            version_ids: version_ids.len(),
        });
    }

    for column in DATE_COLUMNS {
        let index = table
            .column_index(column)
            .ok_or_else(|| Error::MissingColumn((*column).to_string()))?;
        for row in &mut table.rows {
            row[index] = normalize_date(&row[index])?;
        }
    }

    table.columns.push("Version_ID".to_string());
    table.columns.push("Path".to_string());
    table.columns.push("Country".to_string());
    for (row, version_id) in table.rows.iter_mut().zip(version_ids) {
        row.push(version_id.clone());
        row.push(PATH_PLACEHOLDER.to_string());
        row.push(OUTPUT_COUNTRY.to_string());
    }

    tracing::info!("Reconciled {} rows against extracted version ids", version_ids.len());

    Ok(table)
}
