/// Query-parameter marker that carries the version id in document-viewer
/// links.
const VERSION_ID_MARKER: &str = "mid=";

/// Parse the version id out of a document-viewer href.
///
/// The id is the substring following `mid=`, truncated at the next `&`.
/// Returns `None` when the href carries no marker.
pub fn parse_version_id(href: &str) -> Option<String> {
    let (_, rest) = href.split_once(VERSION_ID_MARKER)?;
    let id = rest.split('&').next().unwrap_or(rest);
    Some(id.to_string())
}

/// Extract version ids from a page's worth of hrefs, preserving order and
/// duplicates. Links without an id are logged and skipped; they never abort
/// the page.
pub fn collect_version_ids<I, S>(hrefs: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut ids = Vec::new();
    for href in hrefs {
        match parse_version_id(href.as_ref()) {
            Some(id) => ids.push(id),
            None => tracing::warn!("No version id found in link: {}", href.as_ref()),
        }
    }
    ids
}
