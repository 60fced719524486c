pub mod download;
mod error;
pub mod export;
pub mod launcher;
pub mod listing;
pub mod login;
pub mod scrape;
mod wait;

pub use error::{Error, Result};
pub use launcher::{LaunchOptions, PortalSession};
pub use scrape::{scrape_company, ScrapeSummary};
