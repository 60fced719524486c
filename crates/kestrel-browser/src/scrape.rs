use crate::download::wait_for_latest_spreadsheet;
use crate::export::trigger_export;
use crate::listing::{collect_all_version_ids, PortalListing};
use crate::{Error, Result};
use chromiumoxide::Page;
use kestrel_core::output::{output_path, write_csv};
use kestrel_core::reconcile::{
    reconcile, ABSTRACT_COLUMN, EXPORT_PREAMBLE_ROWS, REPORT_MARKER,
};
use kestrel_core::sheet::ExportTable;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CLIENT_URL: &str = "https://www.capitaliq.spglobal.com/web/client?auth=inherit";

/// Allow the listing grid to render after navigation.
const PAGE_SETTLE: Duration = Duration::from_secs(3);

const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(60);

/// What one completed company scrape produced.
#[derive(Debug)]
pub struct ScrapeSummary {
    pub company_id: String,
    pub version_ids: usize,
    pub rows_written: usize,
    pub output: PathBuf,
}

/// Filings listing route for one company.
fn listing_url(company_id: &str) -> Result<String> {
    let mut url = url::Url::parse(CLIENT_URL).map_err(|e| Error::Browser(e.to_string()))?;
    url.set_fragment(Some(&format!("company/documents?id={company_id}")));
    Ok(url.to_string())
}

/// Scrape one company end to end on an authenticated session.
///
/// Collects version ids across the listing pages, triggers the export,
/// waits for the workbook, filters and reconciles it, and writes
/// `<company_id>.csv` into the download directory. Any failure along the
/// way is this company's failure; nothing partial is written.
pub async fn scrape_company(
    page: &Page,
    download_dir: &Path,
    company_id: &str,
) -> Result<ScrapeSummary> {
    tracing::info!("Navigating to filings listing for company {company_id}");
    page.goto(listing_url(company_id)?.as_str()).await?;
    tokio::time::sleep(PAGE_SETTLE).await;

    let mut listing = PortalListing::new(page);
    let version_ids = collect_all_version_ids(&mut listing).await;

    if let Err(e) = trigger_export(page).await {
        // The export may still have fired; the download wait below is the
        // authoritative check.
        tracing::warn!("Export trigger failed: {e}");
    }

    let workbook = wait_for_latest_spreadsheet(download_dir, DOWNLOAD_TIMEOUT).await?;

    let mut table = ExportTable::from_workbook(&workbook, EXPORT_PREAMBLE_ROWS)?;
    if !table.drop_column(ABSTRACT_COLUMN) {
        tracing::debug!("'{ABSTRACT_COLUMN}' column not present, skipping removal");
    }
    table.retain_rows_containing(REPORT_MARKER);

    let table = reconcile(table, &version_ids)?;

    let output = output_path(download_dir, company_id);
    write_csv(&table, &output)?;

    Ok(ScrapeSummary {
        company_id: company_id.to_string(),
        version_ids: version_ids.len(),
        rows_written: table.rows.len(),
        output,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_url_carries_company_id_in_fragment() {
        let url = listing_url("4156490").unwrap();
        assert_eq!(
            url,
            "https://www.capitaliq.spglobal.com/web/client?auth=inherit#company/documents?id=4156490"
        );
    }
}
