//! Reads plan files from raw.githubusercontent.com

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use crate::GitHubConfig;
use crate::error::{PlannerError, Result};
use crate::folder::FolderFileInfo;
use crate::planner::WorkshopFileReader;
use crate::workshop::WorkshopsRoot;

pub const DEFAULT_RAW_BASE_URL: &str = "https://raw.githubusercontent.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct GitHubFileReader {
    client: reqwest::Client,
    base_url: String,
    owner: String,
    repo: String,
}

impl GitHubFileReader {
    pub fn new(config: &GitHubConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| PlannerError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config
                .raw_base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_RAW_BASE_URL.to_string()),
            owner: config.owner.clone(),
            repo: config.repo.clone(),
        })
    }

    /// URL of `folder_info` at `reference`, e.g.
    /// `https://raw.githubusercontent.com/owner/repo/<sha>/2020-07-17/PLAN.yml`
    pub fn file_url(&self, folder_info: &FolderFileInfo, reference: &str) -> String {
        format!(
            "{}/{}/{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            self.owner,
            self.repo,
            reference,
            folder_info.full_folder
        )
    }
}

#[async_trait]
impl WorkshopFileReader for GitHubFileReader {
    async fn fetch_workshop_data(
        &self,
        folder_info: &FolderFileInfo,
        reference: &str,
    ) -> Result<WorkshopsRoot> {
        let url = self.file_url(folder_info, reference);
        let failed = |message: String| PlannerError::LookupFailed {
            path: folder_info.full_folder.clone(),
            message,
        };

        debug!("Fetching {}", url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| failed(e.to_string()))?;
        let body = response.text().await.map_err(|e| failed(e.to_string()))?;

        WorkshopsRoot::from_yaml(&body).map_err(|e| failed(format!("Invalid plan file: {}", e)))
    }
}
