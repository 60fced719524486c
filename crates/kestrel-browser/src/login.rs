use crate::wait::wait_for_element;
use crate::{Error, Result};
use chromiumoxide::Page;
use kestrel_core::config::Account;
use std::time::Duration;

const LOGIN_URL: &str = "https://www.capitaliq.spglobal.com/web/login?ignoreIDMContext=1#/";

const USERNAME_SELECTOR: &str = "#input28";
const USERNAME_FALLBACK_SELECTOR: &str = "input[name='username']";
const NEXT_BUTTON_SELECTOR: &str = "input[type='submit'][value='Next']";
const PASSWORD_SELECTOR: &str = "input[type='password']";

/// Per-element wait during the login flow.
const LOGIN_WAIT: Duration = Duration::from_secs(20);

/// Authenticate the page's session for one account.
///
/// The portal's flow is username → Next → password → Enter; each element is
/// awaited with a bounded wait, and the whole flow fails if the page never
/// leaves the login route.
pub async fn login(page: &Page, account: &Account) -> Result<()> {
    tracing::info!("Logging in for user: {}", account.username);

    page.goto(LOGIN_URL).await?;

    let username_field = match wait_for_element(page, USERNAME_SELECTOR, LOGIN_WAIT).await {
        Ok(element) => element,
        Err(Error::WaitTimeout(_)) => {
            tracing::debug!("Username field id not found, trying name selector");
            wait_for_element(page, USERNAME_FALLBACK_SELECTOR, LOGIN_WAIT).await?
        }
        Err(e) => return Err(e),
    };
    username_field.click().await?;
    username_field.type_str(&account.username).await?;

    let next_button = wait_for_element(page, NEXT_BUTTON_SELECTOR, LOGIN_WAIT).await?;
    next_button.click().await?;

    let password_field = wait_for_element(page, PASSWORD_SELECTOR, LOGIN_WAIT).await?;
    password_field.click().await?;
    password_field.type_str(&account.password).await?;
    password_field.press_key("Enter").await?;

    wait_until_logged_in(page, LOGIN_WAIT).await?;

    tracing::info!("Login successful for user: {}", account.username);
    Ok(())
}

/// Poll until the page has navigated off the login route.
async fn wait_until_logged_in(page: &Page, timeout: Duration) -> Result<()> {
    let deadline = std::time::Instant::now() + timeout;
    loop {
        let url = page.url().await?.unwrap_or_default();
        if !url.is_empty() && !url.contains("/web/login") {
            return Ok(());
        }
        if std::time::Instant::now() >= deadline {
            return Err(Error::Login(format!(
                "still on the login page after {:?} (url={url})",
                timeout
            )));
        }
        tokio::time::sleep(Duration::from_millis(500)).await;
    }
}
