//! GitHub git-ref API client.
//!
//! Everything the rest of the crate needs from GitHub goes through the
//! [`RefStore`] trait: look a ref up, create a ref, move a ref. The real
//! implementation talks to the REST v3 git database endpoints over `ureq`;
//! tests substitute an in-memory store.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::types::{CommitSha, RepoKey};

/// Default GitHub REST endpoint. Overridable for GitHub Enterprise.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors returned by ref-store operations.
///
/// `NotFound` is the only variant resolution is allowed to swallow; it is
/// derived from the HTTP status code alone, never from message text, so a
/// real outage cannot masquerade as a missing ref.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The queried ref does not exist (HTTP 404).
    #[error("ref not found")]
    NotFound,
    /// GitHub answered with a non-404 error status.
    #[error("GitHub returned HTTP {code}: {message}")]
    Status { code: u16, message: String },
    /// The request never completed (DNS, TLS, connection reset, ...).
    #[error("transport error talking to GitHub: {0}")]
    Transport(String),
    /// A 2xx response carried a body we could not decode.
    #[error("failed to decode GitHub response: {0}")]
    Decode(#[from] std::io::Error),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound)
    }
}

/// A ref as returned by `GET /repos/{owner}/{repo}/git/ref/{ref}`.
#[derive(Debug, Clone, Deserialize)]
pub struct RefObject {
    /// Fully-qualified name, e.g. `refs/heads/main`.
    #[serde(rename = "ref")]
    pub name: String,
    pub object: GitObject,
}

/// The object a ref points at.
#[derive(Debug, Clone, Deserialize)]
pub struct GitObject {
    pub sha: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Shape of GitHub's JSON error bodies.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// The three ref operations this tool consumes from the host.
///
/// `r` is always a path relative to `refs/` for lookups and updates
/// (`heads/main`, `tags/v1`) and a fully-qualified `refs/tags/<name>` for
/// creation, matching the asymmetry of GitHub's API.
pub trait RefStore {
    fn get_ref(&self, r: &str) -> Result<RefObject, ApiError>;
    fn create_ref(&self, r: &str, sha: &CommitSha) -> Result<(), ApiError>;
    fn update_ref(&self, r: &str, sha: &CommitSha) -> Result<(), ApiError>;
}

/// [`RefStore`] backed by the GitHub REST API.
pub struct GitHubClient {
    agent: ureq::Agent,
    base: String,
    repo: RepoKey,
    token: String,
}

impl GitHubClient {
    pub fn new(repo: RepoKey, token: String, api_url: &str) -> Self {
        let agent = ureq::builder().timeout(REQUEST_TIMEOUT).build();
        Self {
            agent,
            base: api_url.trim_end_matches('/').to_string(),
            repo,
            token,
        }
    }

    fn url(&self, tail: &str) -> String {
        format!(
            "{}/repos/{}/{}/git/{}",
            self.base, self.repo.owner, self.repo.repo, tail
        )
    }

    fn prepare(&self, method: &str, url: &str) -> ureq::Request {
        let request = self
            .agent
            .request(method, url)
            .set("Accept", "application/vnd.github+json")
            .set("User-Agent", "retag");
        if self.token.is_empty() {
            // GitHub rejects an empty Bearer header; unauthenticated
            // reads of public repos need no Authorization at all.
            request
        } else {
            request.set("Authorization", &format!("Bearer {}", self.token))
        }
    }
}

impl RefStore for GitHubClient {
    fn get_ref(&self, r: &str) -> Result<RefObject, ApiError> {
        let url = self.url(&format!("ref/{}", r));
        log::debug!("GET {}", url);
        let response = self.prepare("GET", &url).call().map_err(map_ureq_error)?;
        Ok(response.into_json::<RefObject>()?)
    }

    fn create_ref(&self, r: &str, sha: &CommitSha) -> Result<(), ApiError> {
        let url = self.url("refs");
        log::debug!("POST {} ({} -> {})", url, r, sha);
        self.prepare("POST", &url)
            .send_json(serde_json::json!({ "ref": r, "sha": sha.as_str() }))
            .map_err(map_ureq_error)?;
        Ok(())
    }

    fn update_ref(&self, r: &str, sha: &CommitSha) -> Result<(), ApiError> {
        let url = self.url(&format!("refs/{}", r));
        log::debug!("PATCH {} (-> {})", url, sha);
        // force: a floating tag moves backwards as well as forwards, and
        // GitHub rejects non-fast-forward updates without it.
        self.prepare("PATCH", &url)
            .send_json(serde_json::json!({ "sha": sha.as_str(), "force": true }))
            .map_err(map_ureq_error)?;
        Ok(())
    }
}

/// Collapse `ureq`'s error type into [`ApiError`].
///
/// 404 is the structural "no such ref" signal. For every other status the
/// body's `message` field is surfaced when it parses, since GitHub's status
/// lines alone ("Unprocessable Entity") make for poor failure reports.
fn map_ureq_error(err: ureq::Error) -> ApiError {
    match err {
        ureq::Error::Status(404, _) => ApiError::NotFound,
        ureq::Error::Status(code, response) => {
            let fallback = response.status_text().to_string();
            let message = response
                .into_json::<ErrorBody>()
                .map(|body| body.message)
                .unwrap_or(fallback);
            ApiError::Status { code, message }
        }
        ureq::Error::Transport(e) => ApiError::Transport(e.to_string()),
    }
}
