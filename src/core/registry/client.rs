// ─── Registry client ───
// Hash and project lookups against the Modrinth v2 REST API.

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{debug, warn};

use super::model::{ProjectMetadata, VersionMetadata};
use crate::core::error::{SorterError, SorterResult};
use crate::core::hash::HashAlgorithm;

pub const MODRINTH_API_BASE: &str = "https://api.modrinth.com/v2";

/// Metadata lookups used by the sorting pipeline.
///
/// Both operations are best-effort: `None` covers the registry not
/// knowing the input as well as any transport failure. A failed lookup
/// never aborts a run; it only leaves a file less classified.
#[async_trait]
pub trait Registry: Send + Sync {
    /// Resolve a file digest to its version record, if the registry
    /// knows the hash.
    async fn lookup_by_hash(
        &self,
        hash: &str,
        algorithm: HashAlgorithm,
    ) -> Option<VersionMetadata>;

    /// Fetch the project record behind a version, if it exists.
    async fn lookup_project(&self, project_id: &str) -> Option<ProjectMetadata>;
}

/// `Registry` implementation over Modrinth's public API.
pub struct ModrinthClient {
    client: reqwest::Client,
    base_url: String,
}

impl ModrinthClient {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: MODRINTH_API_BASE.to_string(),
        }
    }

    /// Point the client at a different API root (mirrors, test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Raw version fetch. `Ok(None)` is the registry's 404 ("hash not
    /// known"); every other failure is an `Err`, so callers can tell
    /// not-found apart from a lookup that went wrong.
    async fn fetch_version(
        &self,
        hash: &str,
        algorithm: HashAlgorithm,
    ) -> SorterResult<Option<VersionMetadata>> {
        let url = format!(
            "{}/version_file/{}?algorithm={}",
            self.base_url,
            hash,
            algorithm.as_str()
        );
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(SorterError::LookupFailed {
                url,
                status: status.as_u16(),
            });
        }

        Ok(Some(response.json::<VersionMetadata>().await?))
    }

    async fn fetch_project(&self, project_id: &str) -> SorterResult<Option<ProjectMetadata>> {
        let url = format!("{}/project/{}", self.base_url, project_id);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(SorterError::LookupFailed {
                url,
                status: status.as_u16(),
            });
        }

        Ok(Some(response.json::<ProjectMetadata>().await?))
    }
}

#[async_trait]
impl Registry for ModrinthClient {
    async fn lookup_by_hash(
        &self,
        hash: &str,
        algorithm: HashAlgorithm,
    ) -> Option<VersionMetadata> {
        match self.fetch_version(hash, algorithm).await {
            Ok(Some(version)) => Some(version),
            Ok(None) => {
                debug!("No {} match for {}", algorithm, hash);
                None
            }
            Err(e) => {
                // Broken lookup, not a miss: logged apart from the 404
                // case, then treated as absent.
                warn!("{} lookup failed: {}", algorithm, e);
                None
            }
        }
    }

    async fn lookup_project(&self, project_id: &str) -> Option<ProjectMetadata> {
        match self.fetch_project(project_id).await {
            Ok(Some(project)) => Some(project),
            Ok(None) => {
                debug!("Project {} not found", project_id);
                None
            }
            Err(e) => {
                warn!("Project lookup failed for {}: {}", project_id, e);
                None
            }
        }
    }
}
