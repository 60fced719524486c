use crate::wait::{wait_for_element, wait_for_elements};
use crate::Result;
use async_trait::async_trait;
use chromiumoxide::Page;
use kestrel_core::token;
use std::time::Duration;

/// Document-viewer links carrying version ids.
const DOC_LINK_SELECTOR: &str = "a[href*='docviewer?mid=']";

/// The grid's next-page control and the span carrying its enabled state.
const NEXT_CONTROL_SELECTOR: &str = "div[id*='_grid_table_next_page']";
const NEXT_STATE_SELECTOR: &str = "div[id*='_grid_table_next_page'] > span";

/// Class marker the grid puts on the next-page control on the last page.
const DISABLED_MARKER: &str = "ui-state-disabled";

/// Safety bound on the pagination loop. The grid's disabled marker is the
/// native terminator; this guards against a portal that never sets it.
/// Unreachable for well-formed grids.
pub const MAX_LISTING_PAGES: usize = 500;

const PAGE_WAIT: Duration = Duration::from_secs(10);

/// Outcome of a next-page attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAdvance {
    Advanced,
    LastPage,
}

/// One page at a time over the document-listing grid.
#[async_trait]
pub trait ListingPages {
    /// Wait for and return the current page's document-viewer link hrefs.
    async fn document_hrefs(&mut self) -> Result<Vec<String>>;

    /// Inspect the next-page control; click through when enabled.
    async fn advance(&mut self) -> Result<PageAdvance>;
}

/// The next-page control is enabled when its state span carries no
/// disabled marker.
pub fn next_page_enabled(class_attr: Option<&str>) -> bool {
    !class_attr.is_some_and(|classes| classes.contains(DISABLED_MARKER))
}

/// Walk every listing page and collect version ids in grid order.
///
/// Duplicates are preserved. Pagination stops at the grid's disabled
/// marker, on any wait timeout (the ids collected so far are kept; the
/// downstream count gate decides whether they suffice), or at the safety
/// bound.
pub async fn collect_all_version_ids<P: ListingPages + Send>(pager: &mut P) -> Vec<String> {
    let mut all_ids = Vec::new();
    let mut page_number = 0;

    loop {
        page_number += 1;
        if page_number > MAX_LISTING_PAGES {
            tracing::warn!(
                "Stopping pagination at the {MAX_LISTING_PAGES}-page safety bound; \
                 the grid never reported a last page"
            );
            break;
        }

        let hrefs = match pager.document_hrefs().await {
            Ok(hrefs) => hrefs,
            Err(e) => {
                tracing::warn!("Stopping extraction on page {page_number}: {e}");
                break;
            }
        };

        let ids = token::collect_version_ids(&hrefs);
        tracing::debug!("Page {page_number}: extracted {} version ids", ids.len());
        all_ids.extend(ids);

        match pager.advance().await {
            Ok(PageAdvance::Advanced) => {}
            Ok(PageAdvance::LastPage) => break,
            Err(e) => {
                tracing::warn!("Stopping pagination on page {page_number}: {e}");
                break;
            }
        }
    }

    tracing::info!("Total version ids extracted: {}", all_ids.len());
    all_ids
}

/// Live implementation over the portal grid.
pub struct PortalListing<'a> {
    page: &'a Page,
}

impl<'a> PortalListing<'a> {
    pub fn new(page: &'a Page) -> Self {
        Self { page }
    }
}

#[async_trait]
impl ListingPages for PortalListing<'_> {
    async fn document_hrefs(&mut self) -> Result<Vec<String>> {
        let elements = wait_for_elements(self.page, DOC_LINK_SELECTOR, PAGE_WAIT).await?;

        let mut hrefs = Vec::with_capacity(elements.len());
        for element in elements {
            if let Some(href) = element.attribute("href").await? {
                hrefs.push(href);
            }
        }
        Ok(hrefs)
    }

    async fn advance(&mut self) -> Result<PageAdvance> {
        let state = self.page.find_element(NEXT_STATE_SELECTOR).await?;
        let class_attr = state.attribute("class").await?;
        if !next_page_enabled(class_attr.as_deref()) {
            return Ok(PageAdvance::LastPage);
        }

        let control = wait_for_element(self.page, NEXT_CONTROL_SELECTOR, PAGE_WAIT).await?;
        control.click().await?;

        // Let the grid render the next page's links before extraction.
        wait_for_elements(self.page, DOC_LINK_SELECTOR, PAGE_WAIT).await?;
        Ok(PageAdvance::Advanced)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    struct FixturePager {
        pages: Vec<Vec<String>>,
        current: usize,
        extraction_passes: usize,
        fail_advance_after: Option<usize>,
    }

    impl FixturePager {
        fn new(pages: Vec<Vec<&str>>) -> Self {
            Self {
                pages: pages
                    .into_iter()
                    .map(|p| p.into_iter().map(String::from).collect())
                    .collect(),
                current: 0,
                extraction_passes: 0,
                fail_advance_after: None,
            }
        }
    }

    #[async_trait]
    impl ListingPages for FixturePager {
        async fn document_hrefs(&mut self) -> Result<Vec<String>> {
            self.extraction_passes += 1;
            Ok(self.pages[self.current].clone())
        }

        async fn advance(&mut self) -> Result<PageAdvance> {
            if self.fail_advance_after == Some(self.current + 1) {
                return Err(Error::WaitTimeout(NEXT_CONTROL_SELECTOR.to_string()));
            }
            if self.current + 1 >= self.pages.len() {
                return Ok(PageAdvance::LastPage);
            }
            self.current += 1;
            Ok(PageAdvance::Advanced)
        }
    }

    #[test]
    fn test_next_page_enabled_without_marker() {
        assert!(next_page_enabled(Some("ui-state-default")));
        assert!(next_page_enabled(None));
    }

    #[test]
    fn test_next_page_disabled_with_marker() {
        assert!(!next_page_enabled(Some("ui-state-default ui-state-disabled")));
    }

    #[tokio::test]
    async fn test_three_pages_mean_three_extraction_passes() {
        let mut pager = FixturePager::new(vec![
            vec!["https://p/docviewer?mid=A"],
            vec!["https://p/docviewer?mid=B"],
            vec!["https://p/docviewer?mid=C&x=1"],
        ]);

        let ids = collect_all_version_ids(&mut pager).await;

        assert_eq!(pager.extraction_passes, 3);
        assert_eq!(ids, vec!["A", "B", "C"]);
    }

    #[tokio::test]
    async fn test_advance_timeout_keeps_collected_ids() {
        let mut pager = FixturePager::new(vec![
            vec!["https://p/docviewer?mid=A", "https://p/docviewer?mid=B"],
            vec!["https://p/docviewer?mid=C"],
        ]);
        pager.fail_advance_after = Some(1);

        let ids = collect_all_version_ids(&mut pager).await;

        assert_eq!(pager.extraction_passes, 1);
        assert_eq!(ids, vec!["A", "B"]);
    }

    #[tokio::test]
    async fn test_links_without_ids_are_skipped_not_fatal() {
        let mut pager = FixturePager::new(vec![vec![
            "https://p/docviewer?mid=A",
            "https://p/viewer?other=1",
            "https://p/docviewer?mid=B",
        ]]);

        let ids = collect_all_version_ids(&mut pager).await;
        assert_eq!(ids, vec!["A", "B"]);
    }
}
