use crate::sheet::ExportTable;
use crate::Result;
use std::path::{Path, PathBuf};

/// Output file path for one company: `<download_dir>/<company_id>.csv`.
pub fn output_path(download_dir: &Path, company_id: &str) -> PathBuf {
    download_dir.join(format!("{company_id}.csv"))
}

/// Write the reconciled table as CSV, overwriting any previous run's file.
pub fn write_csv(table: &ExportTable, path: &Path) -> Result<()> {
    tracing::debug!("Writing output CSV to: {}", path.display());

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(&table.columns)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }
    writer.flush()?;

    tracing::info!(
        "Wrote {} rows to {}",
        table.rows.len(),
        path.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconcile::{reconcile, OUTPUT_COUNTRY, PATH_PLACEHOLDER, REPORT_MARKER};

    #[test]
    fn test_output_path_uses_company_id() {
        let path = output_path(Path::new("/tmp/downloads"), "4156490");
        assert_eq!(path, PathBuf::from("/tmp/downloads/4156490.csv"));
    }

    #[test]
    fn test_write_and_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = output_path(dir.path(), "4156490");

        let table = ExportTable::new(
            vec!["A".to_string(), "B".to_string()],
            vec![vec!["1".to_string(), "2".to_string()]],
        );

        write_csv(&table, &path).unwrap();
        let first = std::fs::read_to_string(&path).unwrap();
        assert_eq!(first, "A,B\n1,2\n");

        // A rerun replaces the file rather than appending.
        write_csv(&table, &path).unwrap();
        let second = std::fs::read_to_string(&path).unwrap();
        assert_eq!(first, second);
    }

    /// Full transform: a five-row export with three report rows and three
    /// extracted ids produces exactly three output rows.
    #[test]
    fn test_filter_reconcile_write_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let path = output_path(dir.path(), "4156490");

        let mut table = ExportTable::new(
            vec![
                "Filing Date".to_string(),
                "Event Date".to_string(),
                "Abstract".to_string(),
                "Document Type".to_string(),
            ],
            vec![
                vec![
                    "2024-03-15".to_string(),
                    "2023-12-31".to_string(),
                    "a".to_string(),
                    "Annual Report".to_string(),
                ],
                vec![
                    "2024-04-02".to_string(),
                    "2024-03-31".to_string(),
                    "b".to_string(),
                    "Quarterly Report".to_string(),
                ],
                vec![
                    "2023-03-20".to_string(),
                    "2022-12-31".to_string(),
                    "c".to_string(),
                    "annual report (restated)".to_string(),
                ],
                vec![
                    "2023-05-11".to_string(),
                    "2023-03-31".to_string(),
                    "d".to_string(),
                    "Prospectus".to_string(),
                ],
                vec![
                    "2022-03-18".to_string(),
                    "2021-12-31".to_string(),
                    "e".to_string(),
                    "ANNUAL REPORT".to_string(),
                ],
            ],
        );

        table.drop_column("Abstract");
        table.retain_rows_containing(REPORT_MARKER);
        let table = reconcile(
            table,
            &["V1".to_string(), "V2".to_string(), "V3".to_string()],
        )
        .unwrap();
        write_csv(&table, &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = written.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[0],
            "Filing Date,Event Date,Document Type,Version_ID,Path,Country"
        );
        assert_eq!(
            lines[1],
            format!("15/03/2024,31/12/2023,Annual Report,V1,{PATH_PLACEHOLDER},{OUTPUT_COUNTRY}")
        );
        assert!(lines[2].contains(",V2,"));
        assert!(lines[3].contains(",V3,"));
        assert!(!written.contains("Abstract"));
        assert!(!written.contains("Prospectus"));
    }
}
