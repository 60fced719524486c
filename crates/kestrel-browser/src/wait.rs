use crate::{Error, Result};
use chromiumoxide::{Element, Page};
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Poll for a single element until present or the deadline passes.
pub(crate) async fn wait_for_element(
    page: &Page,
    selector: &str,
    timeout: Duration,
) -> Result<Element> {
    let deadline = std::time::Instant::now() + timeout;
    loop {
        if let Ok(element) = page.find_element(selector).await {
            return Ok(element);
        }
        if std::time::Instant::now() >= deadline {
            return Err(Error::WaitTimeout(selector.to_string()));
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }
}

/// Poll for a non-empty set of matching elements until present or the
/// deadline passes.
pub(crate) async fn wait_for_elements(
    page: &Page,
    selector: &str,
    timeout: Duration,
) -> Result<Vec<Element>> {
    let deadline = std::time::Instant::now() + timeout;
    loop {
        if let Ok(elements) = page.find_elements(selector).await {
            if !elements.is_empty() {
                return Ok(elements);
            }
        }
        if std::time::Instant::now() >= deadline {
            return Err(Error::WaitTimeout(selector.to_string()));
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }
}
