//! Thin GitHub REST client for the license and pull-request subcommands.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::repo::RepoId;

const API_ROOT: &str = "https://api.github.com";
/// Asks the license endpoint for the raw license text instead of metadata.
const RAW_LICENSE_ACCEPT: &str = "application/vnd.github.VERSION.raw";

pub struct GithubClient {
    http: Client,
    token: String,
    user_agent: String,
}

/// A pull request, reduced to the fields validation needs.
#[derive(Debug, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    #[serde(default)]
    pub labels: Vec<Label>,
}

#[derive(Debug, Deserialize)]
pub struct Label {
    pub name: String,
}

impl PullRequest {
    pub fn label_names(&self) -> Vec<String> {
        self.labels.iter().map(|l| l.name.clone()).collect()
    }
}

/// Result of asking GitHub for a repository's license.
pub enum LicenseFetch {
    /// HTTP 200; the raw license text.
    Found(String),
    /// Any other status. The repository has no discoverable license.
    Missing(StatusCode),
}

impl GithubClient {
    pub fn new(token: String, user_agent: String) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            http,
            token,
            user_agent,
        })
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        self.http
            .get(url)
            .header("User-Agent", &self.user_agent)
            .header("Authorization", format!("token {}", self.token))
    }

    /// Fetch the raw license text for a repository. Only HTTP 200 counts as
    /// found; every other status is reported as missing, not as an error.
    pub async fn fetch_raw_license(&self, repo: &RepoId) -> Result<LicenseFetch> {
        let url = format!("{API_ROOT}/repos/{}/{}/license", repo.owner, repo.name);
        let response = self
            .get(&url)
            .header("Accept", RAW_LICENSE_ACCEPT)
            .send()
            .await
            .with_context(|| format!("license request for {} failed", repo.slug()))?;

        if response.status() == StatusCode::OK {
            Ok(LicenseFetch::Found(response.text().await?))
        } else {
            Ok(LicenseFetch::Missing(response.status()))
        }
    }

    /// Look up a pull request directly by number.
    pub async fn pull_request(&self, org: &str, repo: &str, number: u64) -> Result<PullRequest> {
        let url = format!("{API_ROOT}/repos/{org}/{repo}/pulls/{number}");
        let pr = self
            .get(&url)
            .send()
            .await?
            .error_for_status()
            .with_context(|| format!("failed to look up PR #{number}"))?
            .json()
            .await?;
        Ok(pr)
    }

    /// Find the open pull request proposing `branch` against `base`, if any.
    pub async fn pull_request_for_branch(
        &self,
        org: &str,
        repo: &str,
        base: &str,
        branch: &str,
    ) -> Result<Option<PullRequest>> {
        let url = format!("{API_ROOT}/repos/{org}/{repo}/pulls");
        let prs: Vec<PullRequest> = self
            .get(&url)
            .query(&[("base", base), ("head", &format!("{org}:{branch}"))])
            .send()
            .await?
            .error_for_status()
            .with_context(|| format!("failed to search PRs for branch {branch}"))?
            .json()
            .await?;
        Ok(prs.into_iter().next())
    }
}
