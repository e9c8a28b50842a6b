//! Schema Provisioner
//!
//! Guarantees a TISS XSD file exists on disk before validation runs. The
//! official schema is fetched once; any failure falls back to the minimal
//! schema in [`crate::fallback_schema`]. An existing file is never touched.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::config::TissConfig;
use crate::error::TissError;
use crate::fallback_schema::FALLBACK_XSD;

const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";

/// Where the schema file on disk came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaOrigin {
    /// Already present before provisioning ran
    Existing,
    /// Fetched from the official URL
    Downloaded,
    /// Written from the built-in fallback
    Synthesized,
}

/// Why the official schema could not be used
#[derive(Debug, thiserror::Error)]
enum FetchFailure {
    #[error("no official schema URL configured")]
    Disabled,
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("server answered with status {0}")]
    Status(reqwest::StatusCode),
    #[error("response is not an XML schema document")]
    NotASchema,
}

/// Ensures the schema file exists, downloading or synthesizing it once
pub struct SchemaProvisioner {
    config: TissConfig,
    guard: Mutex<()>,
}

impl SchemaProvisioner {
    pub fn new(config: TissConfig) -> Self {
        Self {
            config,
            guard: Mutex::new(()),
        }
    }

    pub fn schema_path(&self) -> PathBuf {
        self.config.schema_path()
    }

    pub fn schema_exists(&self) -> bool {
        self.schema_path().is_file()
    }

    /// Makes sure the schema file exists.
    ///
    /// Concurrent callers are serialized, so at most one download or write
    /// happens per provisioner. Network problems are absorbed by the
    /// fallback; only filesystem failures are returned.
    pub async fn ensure_schema(&self) -> Result<SchemaOrigin, TissError> {
        let _lock = self.guard.lock().await;
        let path = self.schema_path();

        if tokio::fs::try_exists(&path).await.unwrap_or(false) {
            debug!(path = %path.display(), "TISS schema already present");
            return Ok(SchemaOrigin::Existing);
        }

        tokio::fs::create_dir_all(&self.config.schema_dir)
            .await
            .map_err(|source| TissError::Provisioning {
                path: self.config.schema_dir.clone(),
                source,
            })?;

        match self.fetch_official().await {
            Ok(body) => {
                write_schema(&path, &body).await?;
                info!(
                    path = %path.display(),
                    bytes = body.len(),
                    "Official TISS schema downloaded"
                );
                Ok(SchemaOrigin::Downloaded)
            }
            Err(failure) => {
                warn!(
                    url = self.config.official_schema_url.as_deref().unwrap_or("-"),
                    error = %failure,
                    "Could not fetch official TISS schema, using built-in fallback"
                );
                write_schema(&path, FALLBACK_XSD).await?;
                info!(path = %path.display(), "Fallback TISS schema written");
                Ok(SchemaOrigin::Synthesized)
            }
        }
    }

    async fn fetch_official(&self) -> Result<String, FetchFailure> {
        let url = self
            .config
            .official_schema_url
            .as_deref()
            .ok_or(FetchFailure::Disabled)?;

        info!(url, "Downloading official TISS schema");
        let client = reqwest::Client::builder()
            .timeout(self.config.fetch_timeout())
            .build()?;
        let response = client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(FetchFailure::Status(response.status()));
        }

        let body = response.text().await?;
        if !looks_like_schema(&body) {
            return Err(FetchFailure::NotASchema);
        }
        Ok(body)
    }
}

async fn write_schema(path: &Path, contents: &str) -> Result<(), TissError> {
    tokio::fs::write(path, contents)
        .await
        .map_err(|source| TissError::Provisioning {
            path: path.to_path_buf(),
            source,
        })
}

/// True when `body` parses and its root is `xs:schema`
fn looks_like_schema(body: &str) -> bool {
    roxmltree::Document::parse(body)
        .map(|doc| {
            let root = doc.root_element();
            root.tag_name().name() == "schema" && root.tag_name().namespace() == Some(XSD_NAMESPACE)
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_looks_like_schema() {
        assert!(looks_like_schema(FALLBACK_XSD));
    }

    #[test]
    fn test_html_page_is_not_a_schema() {
        assert!(!looks_like_schema("<html><body>Portal ANS</body></html>"));
        assert!(!looks_like_schema("not xml at all"));
    }
}
