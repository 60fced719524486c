use crate::wait::wait_for_element;
use crate::Result;
use chromiumoxide::Page;
use std::time::Duration;

/// Toolbar dropdown that holds the export action, and the action itself.
const DROPDOWN_TOGGLE_SELECTOR: &str = "a.dropdown-toggle[data-id='3233133301']";
const EXPORT_BUTTON_SELECTOR: &str = "a.hui-toolbutton[data-id='32']";

const EXPORT_WAIT: Duration = Duration::from_secs(20);

/// Trigger the portal's spreadsheet export.
///
/// Both clicks are dispatched from JS: the toolbar sits under an overlay
/// that intercepts native clicks even after scrolling into view.
pub async fn trigger_export(page: &Page) -> Result<()> {
    let toggle = wait_for_element(page, DROPDOWN_TOGGLE_SELECTOR, EXPORT_WAIT).await?;
    toggle.scroll_into_view().await?;
    // Let the toolbar settle after the scroll.
    tokio::time::sleep(Duration::from_secs(1)).await;
    toggle
        .call_js_fn("function() { this.click(); }", false)
        .await?;

    let export_button = wait_for_element(page, EXPORT_BUTTON_SELECTOR, EXPORT_WAIT).await?;
    export_button
        .call_js_fn("function() { this.click(); }", false)
        .await?;

    tracing::info!("Export triggered");
    Ok(())
}
