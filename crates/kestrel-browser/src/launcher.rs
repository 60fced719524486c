use crate::{Error, Result};
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::browser::{
    SetDownloadBehaviorBehavior, SetDownloadBehaviorParams,
};
use chromiumoxide::Page;
use futures::StreamExt;
use std::path::{Path, PathBuf};

/// How a portal session's browser is launched.
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    /// Directory exported workbooks are routed into, without prompts.
    pub download_dir: PathBuf,
    pub headless: bool,
    /// Explicit Chrome binary; discovered when absent.
    pub chrome_path: Option<PathBuf>,
}

/// One authenticated browser session against the portal.
///
/// Owns the Chrome process, the CDP event-drain task, and a single page.
/// Always release with [`PortalSession::shutdown`], regardless of outcome.
pub struct PortalSession {
    browser: Browser,
    handler_task: tokio::task::JoinHandle<()>,
    page: Page,
}

impl PortalSession {
    /// Launch Chrome with downloads routed into the configured directory.
    pub async fn launch(options: &LaunchOptions) -> Result<Self> {
        let chrome_path = find_chrome(options.chrome_path.as_deref())?;
        tracing::debug!("Using Chrome at: {}", chrome_path.display());

        std::fs::create_dir_all(&options.download_dir)?;

        let mut builder = BrowserConfig::builder()
            .chrome_executable(chrome_path)
            .viewport(None)
            .arg("--disable-blink-features=AutomationControlled")
            .arg("--no-first-run")
            .arg("--no-default-browser-check");
        if !options.headless {
            builder = builder.with_head();
        }
        let config = builder.build().map_err(Error::Browser)?;

        let (browser, mut handler) = Browser::launch(config).await?;
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("CDP handler event error (continuing): {}", e);
                }
            }
        });

        let page = browser.new_page("about:blank").await?;

        // Route downloads to the designated directory so the export never
        // raises an interactive prompt.
        page.execute(
            SetDownloadBehaviorParams::builder()
                .behavior(SetDownloadBehaviorBehavior::Allow)
                .download_path(options.download_dir.display().to_string())
                .build()
                .map_err(Error::Browser)?,
        )
        .await?;

        tracing::info!(
            "Browser session ready, downloads routed to {}",
            options.download_dir.display()
        );

        Ok(Self {
            browser,
            handler_task,
            page,
        })
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Close the browser and stop the CDP drain task.
    pub async fn shutdown(mut self) {
        if let Err(e) = self.browser.close().await {
            tracing::warn!("Failed to close browser cleanly: {}", e);
        }
        let _ = self.browser.wait().await;
        self.handler_task.abort();
        tracing::debug!("Browser session shut down");
    }
}

/// Locate a Chrome/Chromium binary: explicit path first, then `PATH`,
/// then platform install locations.
fn find_chrome(custom: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = custom {
        if path.exists() {
            return Ok(path.to_path_buf());
        }
        return Err(Error::Browser(format!(
            "Chrome not found at: {}",
            path.display()
        )));
    }

    for name in ["google-chrome", "google-chrome-stable", "chromium", "chromium-browser"] {
        if let Ok(path) = which::which(name) {
            return Ok(path);
        }
    }

    for candidate in default_chrome_paths() {
        if candidate.exists() {
            return Ok(candidate);
        }
    }

    Err(Error::Browser(
        "Chrome/Chromium not found. Install Chrome or pass --chrome-path.".to_string(),
    ))
}

fn default_chrome_paths() -> Vec<PathBuf> {
    #[cfg(target_os = "macos")]
    return vec![
        PathBuf::from("/Applications/Google Chrome.app/Contents/MacOS/Google Chrome"),
        PathBuf::from("/Applications/Chromium.app/Contents/MacOS/Chromium"),
    ];

    #[cfg(target_os = "linux")]
    return vec![
        PathBuf::from("/usr/bin/google-chrome"),
        PathBuf::from("/usr/bin/google-chrome-stable"),
        PathBuf::from("/usr/bin/chromium"),
        PathBuf::from("/usr/bin/chromium-browser"),
        PathBuf::from("/snap/bin/chromium"),
    ];

    #[cfg(target_os = "windows")]
    return vec![
        PathBuf::from(r"C:\Program Files\Google\Chrome\Application\chrome.exe"),
        PathBuf::from(r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe"),
    ];

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    return vec![];
}
