//! One-shot dataset download (native only, `api` feature).

use crate::load::{parse_bytes, LoadedRecords, SourceFormat};
use anyhow::{bail, Context, Result};
use reqwest::{Client, StatusCode};

/// Path part of a URL, without query string or fragment.
fn url_path(url: &str) -> &str {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    &url[..end]
}

/// Download and parse a dataset from `url`.
///
/// The format is taken from the URL's extension and defaults to CSV. The
/// request is made exactly once; any transport, status or decoding failure
/// is returned as a single error so the caller can leave its store unset.
pub async fn fetch_records(client: &Client, url: &str) -> Result<LoadedRecords> {
    let format = SourceFormat::from_name(url_path(url)).unwrap_or(SourceFormat::Csv);
    log::info!("[EVP] fetch: Requesting {} as {:?}", url, format);

    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("Request failed for {url}"))?;
    if response.status() != StatusCode::OK {
        bail!("Bad response status for {}: {}", url, response.status());
    }
    let body = response
        .bytes()
        .await
        .with_context(|| format!("Failed to read response body for {url}"))?;
    if body.is_empty() {
        bail!("Empty response for {}", url);
    }

    parse_bytes(&body, format).with_context(|| format!("decoding dataset from {url}"))
}
