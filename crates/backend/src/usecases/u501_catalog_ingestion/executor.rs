use contracts::domain::a001_product::ProductRecord;

use super::error::IngestionError;
use super::row_extractor::{cell, extract_rows, Row};
use super::source_client::CatalogSource;
use super::url_normalizer::normalize;
use crate::shared::config::CatalogConfig;

/// Loads the product list from the configured spreadsheet.
///
/// An empty source URL means no catalog is published: the result is an empty
/// list and nothing is fetched.
pub async fn fetch_catalog(
    config: &CatalogConfig,
    source: &dyn CatalogSource,
) -> Result<Vec<ProductRecord>, IngestionError> {
    let source_url = config.source_url.trim();
    if source_url.is_empty() {
        tracing::warn!("Catalog source URL is not configured, serving an empty catalog");
        return Ok(Vec::new());
    }

    let url = normalize(source_url);
    if url != source_url {
        tracing::debug!("Share link rewritten to {}", url);
    }

    let payload = source.fetch(&url).await?;
    let rows = extract_rows(
        &payload.body,
        &payload.content_type,
        &url,
        &config.sheet_name,
        config.has_header,
    )?;

    let records: Vec<ProductRecord> = rows
        .iter()
        .filter_map(|row| build_record(row, config.product_col, config.price_col))
        .collect();

    tracing::info!(
        "Catalog parsed: {} products, {} rows skipped",
        records.len(),
        rows.len() - records.len()
    );

    Ok(records)
}

/// Product for a row, or `None` when the name is blank or the price unreadable.
pub fn build_record(row: &Row, product_col: usize, price_col: usize) -> Option<ProductRecord> {
    let price = cell(row, price_col).price()?;
    ProductRecord::new(&cell(row, product_col).as_text(), price)
}
