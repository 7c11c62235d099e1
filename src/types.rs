//! Validated domain types shared across the crate.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error type for parsing failures
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("value cannot be empty")]
    Empty,
    #[error("invalid character in value: {0}")]
    InvalidCharacter(char),
    #[error("value cannot start with '{0}'")]
    InvalidStart(char),
    #[error("value cannot end with '{0}'")]
    InvalidEnd(char),
    #[error("value cannot contain '{0}'")]
    InvalidSequence(&'static str),
    #[error("missing separator '/' in repository (expected owner/name)")]
    MissingSeparator,
    #[error("invalid owner: {0}")]
    InvalidOwner(#[source] Box<ParseError>),
    #[error("invalid repo: {0}")]
    InvalidRepo(#[source] Box<ParseError>),
    #[error("expected a 40-character hex commit SHA, got {0} characters")]
    BadShaLength(usize),
}

/// A GitHub owner (user or organization)
///
/// Non-empty, alphanumeric and hyphens only, no leading or trailing hyphen.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Owner(String);

impl Owner {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Owner {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ParseError::Empty);
        }
        if s.starts_with('-') {
            return Err(ParseError::InvalidStart('-'));
        }
        if s.ends_with('-') {
            return Err(ParseError::InvalidEnd('-'));
        }
        for c in s.chars() {
            if !c.is_ascii_alphanumeric() && c != '-' {
                return Err(ParseError::InvalidCharacter(c));
            }
        }
        Ok(Owner(s.to_string()))
    }
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A GitHub repository name
///
/// Non-empty, alphanumeric plus hyphens, underscores and dots, no leading dot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Repo(String);

impl Repo {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Repo {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ParseError::Empty);
        }
        if s.starts_with('.') {
            return Err(ParseError::InvalidStart('.'));
        }
        for c in s.chars() {
            if !c.is_ascii_alphanumeric() && c != '-' && c != '_' && c != '.' {
                return Err(ParseError::InvalidCharacter(c));
            }
        }
        Ok(Repo(s.to_string()))
    }
}

impl fmt::Display for Repo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies a specific GitHub repository (owner + repo)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoKey {
    pub owner: Owner,
    pub repo: Repo,
}

impl FromStr for RepoKey {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (owner_str, repo_str) = s.split_once('/').ok_or(ParseError::MissingSeparator)?;

        let owner = owner_str
            .parse::<Owner>()
            .map_err(|e| ParseError::InvalidOwner(Box::new(e)))?;
        let repo = repo_str
            .parse::<Repo>()
            .map_err(|e| ParseError::InvalidRepo(Box::new(e)))?;

        Ok(RepoKey { owner, repo })
    }
}

impl fmt::Display for RepoKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// A full 40-character hexadecimal commit SHA.
///
/// Anything shorter (abbreviated SHAs included) has to go through ref
/// resolution instead; only the full form identifies a commit without
/// asking the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommitSha(String);

impl CommitSha {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether `s` would parse as a full commit SHA.
    pub fn is_full_sha(s: &str) -> bool {
        s.len() == 40 && s.chars().all(|c| c.is_ascii_hexdigit())
    }
}

impl FromStr for CommitSha {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 40 {
            return Err(ParseError::BadShaLength(s.len()));
        }
        for c in s.chars() {
            if !c.is_ascii_hexdigit() {
                return Err(ParseError::InvalidCharacter(c));
            }
        }
        Ok(CommitSha(s.to_string()))
    }
}

impl fmt::Display for CommitSha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A lightweight tag name (the part after `refs/tags/`).
///
/// Validation follows the subset of git ref-name rules that matter when the
/// name is spliced into an API path: non-empty, no `..`, no leading `-` or
/// `.`, no `refs/` prefix, no spaces or control characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TagName(String);

impl TagName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for TagName {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ParseError::Empty);
        }
        if s.starts_with('-') {
            return Err(ParseError::InvalidStart('-'));
        }
        if s.starts_with('.') {
            return Err(ParseError::InvalidStart('.'));
        }
        if s.contains("..") {
            return Err(ParseError::InvalidSequence(".."));
        }
        if s.starts_with("refs/") {
            return Err(ParseError::InvalidSequence("refs/"));
        }
        for c in s.chars() {
            if c == ' ' || c.is_control() {
                return Err(ParseError::InvalidCharacter(c));
            }
        }
        Ok(TagName(s.to_string()))
    }
}

impl fmt::Display for TagName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod repo_key_tests {
        use super::*;

        #[test]
        fn valid_repo_key() {
            let key: RepoKey = "octocat/hello-world".parse().unwrap();
            assert_eq!(key.owner.as_str(), "octocat");
            assert_eq!(key.repo.as_str(), "hello-world");
        }

        #[test]
        fn valid_repo_key_complex() {
            let key: RepoKey = "my-org/my_repo.v2".parse().unwrap();
            assert_eq!(key.owner.as_str(), "my-org");
            assert_eq!(key.repo.as_str(), "my_repo.v2");
        }

        #[test]
        fn invalid_repo_key_no_slash() {
            let result = "octocat".parse::<RepoKey>();
            assert_eq!(result, Err(ParseError::MissingSeparator));
        }

        #[test]
        fn invalid_repo_key_empty_owner() {
            let result = "/repo".parse::<RepoKey>();
            assert!(matches!(result, Err(ParseError::InvalidOwner(_))));
        }

        #[test]
        fn invalid_repo_key_bad_owner() {
            let result = "-owner/repo".parse::<RepoKey>();
            assert!(matches!(result, Err(ParseError::InvalidOwner(_))));
        }

        #[test]
        fn invalid_repo_key_bad_repo() {
            let result = "owner/.repo".parse::<RepoKey>();
            assert!(matches!(result, Err(ParseError::InvalidRepo(_))));
        }

        #[test]
        fn invalid_owner_underscore() {
            let result = "my_org".parse::<Owner>();
            assert_eq!(result, Err(ParseError::InvalidCharacter('_')));
        }

        #[test]
        fn repo_key_display() {
            let key: RepoKey = "octocat/hello-world".parse().unwrap();
            assert_eq!(format!("{}", key), "octocat/hello-world");
        }
    }

    mod commit_sha_tests {
        use super::*;

        const SHA: &str = "a1b2c3d4e5f6a1b2c3d4e5f6a1b2c3d4e5f6a1b2";

        #[test]
        fn valid_full_sha() {
            let sha: CommitSha = SHA.parse().unwrap();
            assert_eq!(sha.as_str(), SHA);
        }

        #[test]
        fn uppercase_hex_is_accepted() {
            let upper = SHA.to_ascii_uppercase();
            assert!(upper.parse::<CommitSha>().is_ok());
        }

        #[test]
        fn short_sha_is_rejected() {
            let result = "a1b2c3d".parse::<CommitSha>();
            assert_eq!(result, Err(ParseError::BadShaLength(7)));
        }

        #[test]
        fn non_hex_is_rejected() {
            let mut s = SHA.to_string();
            s.replace_range(0..1, "g");
            assert_eq!(s.parse::<CommitSha>(), Err(ParseError::InvalidCharacter('g')));
        }

        #[test]
        fn is_full_sha_matches_from_str() {
            assert!(CommitSha::is_full_sha(SHA));
            assert!(!CommitSha::is_full_sha("main"));
            assert!(!CommitSha::is_full_sha(&SHA[..39]));
            // 40 chars but not hex
            assert!(!CommitSha::is_full_sha(&"z".repeat(40)));
        }
    }

    mod tag_name_tests {
        use super::*;

        #[test]
        fn valid_tag_names() {
            assert!("latest".parse::<TagName>().is_ok());
            assert!("v1".parse::<TagName>().is_ok());
            assert!("v1.0.0".parse::<TagName>().is_ok());
            assert!("release/stable".parse::<TagName>().is_ok());
        }

        #[test]
        fn empty_tag_is_rejected() {
            assert_eq!("".parse::<TagName>(), Err(ParseError::Empty));
        }

        #[test]
        fn leading_dash_is_rejected() {
            assert_eq!("-v1".parse::<TagName>(), Err(ParseError::InvalidStart('-')));
        }

        #[test]
        fn dotdot_is_rejected() {
            assert_eq!(
                "v1..2".parse::<TagName>(),
                Err(ParseError::InvalidSequence(".."))
            );
        }

        #[test]
        fn refs_prefix_is_rejected() {
            assert_eq!(
                "refs/tags/latest".parse::<TagName>(),
                Err(ParseError::InvalidSequence("refs/"))
            );
        }

        #[test]
        fn control_chars_are_rejected() {
            assert_eq!(
                "v1\n".parse::<TagName>(),
                Err(ParseError::InvalidCharacter('\n'))
            );
        }
    }
}
