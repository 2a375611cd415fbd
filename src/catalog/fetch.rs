//! One-shot catalog fetch.
//!
//! The catalog is loaded at most once per session. A failed or malformed
//! fetch surfaces as "no catalog"; the view-state machinery is never
//! constructed without a validated `PassportData`.

use crate::catalog::{CatalogDocument, PassportData};
use crate::{PassportError, Result};
use async_trait::async_trait;
use once_cell::sync::Lazy;

static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(reqwest::Client::new);

/// Boundary for catalog loading, so the app shell and tests can swap the
/// transport.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn load(&self) -> Result<PassportData>;
}

/// Loads the catalog document from an HTTP endpoint.
pub struct HttpCatalogSource {
    url: String,
}

impl HttpCatalogSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn load(&self) -> Result<PassportData> {
        #[cfg(feature = "debug")]
        log::info!("Fetching passport catalog from {}", self.url);

        let response = HTTP_CLIENT
            .get(&self.url)
            .send()
            .await
            .map_err(PassportError::Network)?;

        if !response.status().is_success() {
            return Err(Box::new(PassportError::Catalog(format!(
                "catalog endpoint returned {}",
                response.status()
            ))));
        }

        let document: CatalogDocument = response.json().await.map_err(PassportError::Network)?;

        #[cfg(feature = "debug")]
        log::info!(
            "Loaded passport '{}' with {} events",
            document.passport.name,
            document.passport.events.len()
        );

        Ok(document.passport)
    }
}

/// Serves a catalog from an in-memory JSON document. Used by the bundled
/// demo data and by tests.
pub struct StaticCatalogSource {
    raw: String,
}

impl StaticCatalogSource {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }
}

#[async_trait]
impl CatalogSource for StaticCatalogSource {
    async fn load(&self) -> Result<PassportData> {
        PassportData::from_json(&self.raw)
    }
}
