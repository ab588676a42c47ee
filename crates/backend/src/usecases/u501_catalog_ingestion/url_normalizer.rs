//! Rewrites cloud-drive share links into direct-download links.

use once_cell::sync::Lazy;
use regex::Regex;

const GOOGLE_DRIVE_HOST: &str = "drive.google.com";
const ONEDRIVE_HOSTS: [&str; 2] = ["1drv.ms", "onedrive.live.com"];

static DRIVE_PATH_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/d/([A-Za-z0-9_-]+)").expect("valid drive path regex"));
static DRIVE_QUERY_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"id=([A-Za-z0-9_-]+)").expect("valid drive query regex"));

/// Turns a share link into a URL that returns the file bytes.
///
/// - Google Drive: `/d/<id>` or `id=<id>` becomes `uc?export=download&id=<id>`
/// - OneDrive: `download=1` is appended unless already present
/// - anything else is returned as is
pub fn normalize(url: &str) -> String {
    if url.contains(GOOGLE_DRIVE_HOST) {
        if let Some(id) = drive_file_id(url) {
            return format!("https://{}/uc?export=download&id={}", GOOGLE_DRIVE_HOST, id);
        }
    }

    if ONEDRIVE_HOSTS.iter().any(|host| url.contains(host)) {
        if url.contains("download=1") {
            return url.to_string();
        }
        let joiner = if url.contains('?') { '&' } else { '?' };
        return format!("{}{}download=1", url, joiner);
    }

    url.to_string()
}

fn drive_file_id(url: &str) -> Option<&str> {
    DRIVE_PATH_ID_RE
        .captures(url)
        .or_else(|| DRIVE_QUERY_ID_RE.captures(url))
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}
