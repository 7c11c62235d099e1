//! Input resolution.
//!
//! Every input can come from a CLI flag or, failing that, from the
//! environment the CI runner provides (`INPUT_*` for action inputs,
//! `GITHUB_*` for runner context). All of it is resolved and validated
//! here, before any network traffic, so a missing credential never gets
//! as far as a half-done tag operation.

use thiserror::Error;

use crate::github::DEFAULT_API_URL;
use crate::types::{ParseError, RepoKey, TagName};

/// Raw optional inputs as collected from the command line.
#[derive(Debug, Default)]
pub struct Inputs {
    pub tag: Option<String>,
    pub reference: Option<String>,
    pub repo: Option<String>,
    pub token: Option<String>,
    pub api_url: Option<String>,
}

/// Fully resolved, validated configuration.
#[derive(Debug)]
pub struct Config {
    pub repo: RepoKey,
    pub tag: TagName,
    /// The ref to resolve; may be a SHA, a short name, or a qualified path.
    pub reference: String,
    pub token: String,
    pub api_url: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing tag name (pass --tag or set INPUT_TAG_NAME)")]
    MissingTag,
    #[error("missing ref (pass --ref or set INPUT_REF / GITHUB_SHA)")]
    MissingRef,
    #[error("missing token (pass --token or set GITHUB_TOKEN)")]
    MissingToken,
    #[error("missing repository (pass --repo or set GITHUB_REPOSITORY)")]
    MissingRepo,
    #[error("invalid tag name '{value}': {source}")]
    InvalidTag {
        value: String,
        #[source]
        source: ParseError,
    },
    #[error("invalid repository '{value}': {source}")]
    InvalidRepo {
        value: String,
        #[source]
        source: ParseError,
    },
}

/// CI runners export unset action inputs as empty strings, so blank means
/// absent everywhere.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl Config {
    /// Resolve against the process environment.
    pub fn from_env(inputs: Inputs) -> Result<Self, ConfigError> {
        Self::resolve(inputs, &|name| std::env::var(name).ok())
    }

    /// Resolve with an injectable environment lookup.
    pub fn resolve(
        inputs: Inputs,
        env: &dyn Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let tag_raw = non_empty(inputs.tag)
            .or_else(|| non_empty(env("INPUT_TAG_NAME")))
            .ok_or(ConfigError::MissingTag)?;
        let tag = tag_raw
            .parse::<TagName>()
            .map_err(|source| ConfigError::InvalidTag {
                value: tag_raw.clone(),
                source,
            })?;

        let reference = non_empty(inputs.reference)
            .or_else(|| non_empty(env("INPUT_REF")))
            .or_else(|| non_empty(env("GITHUB_SHA")))
            .ok_or(ConfigError::MissingRef)?;

        let token = non_empty(inputs.token)
            .or_else(|| non_empty(env("GITHUB_TOKEN")))
            .ok_or(ConfigError::MissingToken)?;

        let repo_raw = non_empty(inputs.repo)
            .or_else(|| non_empty(env("GITHUB_REPOSITORY")))
            .ok_or(ConfigError::MissingRepo)?;
        let repo = repo_raw
            .parse::<RepoKey>()
            .map_err(|source| ConfigError::InvalidRepo {
                value: repo_raw.clone(),
                source,
            })?;

        let api_url = non_empty(inputs.api_url)
            .or_else(|| non_empty(env("GITHUB_API_URL")))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Ok(Config {
            repo,
            tag,
            reference,
            token,
            api_url,
        })
    }
}
