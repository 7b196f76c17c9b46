use std::{fs, path::Path};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use ureq::{
    http::header::{ACCEPT, AUTHORIZATION},
    Agent,
};
use url::Url;

use crate::{
    error::{DownloadError, Result},
    http_client::ClientConfig,
    traits::{Asset, Release},
};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GithubRelease {
    pub tag_name: String,
    #[serde(default)]
    pub draft: bool,
    #[serde(default)]
    pub prerelease: bool,
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub assets: Vec<GithubAsset>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GithubAsset {
    pub name: String,
    pub size: u64,
    pub browser_download_url: String,
    pub label: Option<String>,
}

/// Parses a saved GitHub release listing (the JSON array returned by
/// `GET /repos/{owner}/{repo}/releases`).
pub fn parse_releases(bytes: &[u8]) -> Result<Vec<GithubRelease>> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Reads and parses a release listing saved at `path`.
pub fn read_releases(path: &Path) -> Result<Vec<GithubRelease>> {
    let bytes = fs::read(path).map_err(|source| DownloadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_releases(&bytes)
}

/// Blocking client for the GitHub releases API.
///
/// Every call performs exactly one request. Failures are returned to the
/// caller as-is; there is no retry and no fallback host.
#[derive(Clone)]
pub struct GithubClient {
    agent: Agent,
    api_url: String,
    token: Option<String>,
}

impl std::fmt::Debug for GithubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GithubClient")
            .field("api_url", &self.api_url)
            .field("authenticated", &self.token.is_some())
            .finish()
    }
}

impl GithubClient {
    pub fn new(api_url: impl Into<String>, token: Option<String>, config: &ClientConfig) -> Self {
        Self {
            agent: config.build(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token,
        }
    }

    /// Builds the listing URL for `project` (`owner/repo`).
    pub fn releases_url(&self, project: &str, per_page: u8) -> Result<Url> {
        let raw = format!("{}/repos/{}/releases", self.api_url, project);
        let mut url = Url::parse(&raw).map_err(|source| {
            DownloadError::InvalidUrl {
                url: raw.clone(),
                source,
            }
        })?;
        url.query_pairs_mut()
            .append_pair("per_page", &per_page.to_string());
        Ok(url)
    }

    /// Fetches the newest `per_page` releases of `project`, drafts included.
    pub fn fetch_releases(&self, project: &str, per_page: u8) -> Result<Vec<GithubRelease>> {
        let url = self.releases_url(project, per_page)?;
        debug!("Fetching releases from {}", url);

        let mut req = self
            .agent
            .get(url.as_str())
            .header(ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28");

        if let Some(token) = &self.token {
            req = req.header(AUTHORIZATION, &format!("Bearer {}", token));
        }

        let mut resp = req.call()?;
        let status = resp.status();

        if !status.is_success() {
            return Err(DownloadError::HttpError {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let releases: Vec<GithubRelease> = resp
            .body_mut()
            .read_json()
            .map_err(|_| DownloadError::InvalidResponse)?;

        debug!("Fetched {} releases for {}", releases.len(), project);
        Ok(releases)
    }
}

impl Release for GithubRelease {
    type Asset = GithubAsset;

    fn tag(&self) -> &str {
        &self.tag_name
    }

    fn is_draft(&self) -> bool {
        self.draft
    }

    fn is_prerelease(&self) -> bool {
        self.prerelease
    }

    fn published_at(&self) -> Option<DateTime<Utc>> {
        self.published_at
    }

    fn assets(&self) -> &[Self::Asset] {
        &self.assets
    }
}

impl Asset for GithubAsset {
    fn name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> u64 {
        self.size
    }

    fn url(&self) -> &str {
        &self.browser_download_url
    }

    fn label(&self) -> Option<&str> {
        self.label.as_deref().filter(|l| !l.is_empty())
    }
}
