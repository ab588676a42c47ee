use async_trait::async_trait;
use std::time::Duration;

use super::error::IngestionError;

/// Raw response of the catalog source
#[derive(Debug, Clone)]
pub struct FetchedPayload {
    /// Declared `Content-Type`, lowercased; empty when the server sent none
    pub content_type: String,
    pub body: Vec<u8>,
}

/// Where catalog bytes come from. The HTTP implementation is used in
/// production, tests plug in their own.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedPayload, IngestionError>;
}

/// HTTP client for spreadsheet exports (Google Drive, OneDrive, plain links)
pub struct HttpCatalogSource {
    client: reqwest::Client,
}

impl HttpCatalogSource {
    pub fn new(timeout: Duration) -> Result<Self, IngestionError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch(&self, url: &str) -> Result<FetchedPayload, IngestionError> {
        tracing::info!("Fetching catalog from {}", url);

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let preview: String = body.chars().take(300).collect();
            tracing::error!(
                "Catalog source request failed with status {}: {}",
                status,
                preview
            );
            return Err(IngestionError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let body = response.bytes().await?.to_vec();
        tracing::info!(
            "Catalog source responded: status={}, content_type='{}', bytes={}",
            status,
            content_type,
            body.len()
        );

        Ok(FetchedPayload { content_type, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fetch_returns_body_and_content_type() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/prices"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("Content-Type", "Text/CSV; charset=utf-8")
                    .set_body_bytes(b"Honey,240\n".to_vec()),
            )
            .mount(&server)
            .await;

        let source = HttpCatalogSource::new(Duration::from_secs(5)).unwrap();
        let payload = source
            .fetch(&format!("{}/prices", server.uri()))
            .await
            .unwrap();

        assert_eq!(payload.content_type, "text/csv; charset=utf-8");
        assert_eq!(payload.body, b"Honey,240\n");
    }

    #[tokio::test]
    async fn test_fetch_maps_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403).set_body_string("denied"))
            .mount(&server)
            .await;

        let source = HttpCatalogSource::new(Duration::from_secs(5)).unwrap();
        let err = source
            .fetch(&format!("{}/prices", server.uri()))
            .await
            .unwrap_err();

        assert!(matches!(err, IngestionError::HttpStatus { status: 403, .. }));
        assert!(err.is_fetch_error());
    }

    #[tokio::test]
    async fn test_fetch_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let source = HttpCatalogSource::new(Duration::from_millis(200)).unwrap();
        let err = source.fetch(&server.uri()).await.unwrap_err();

        assert!(matches!(err, IngestionError::Fetch(_)));
    }
}
