//! Resolution of a user-supplied ref to a commit SHA.
//!
//! The input is ambiguous: it may be a full SHA, a fully-qualified ref
//! path, a branch short name, or a tag short name. Disambiguation probes a
//! fixed, ordered list of namespaces and stops at the first hit, so the
//! same input against the same repository state always resolves the same
//! way:
//!
//! 1. a full 40-hex SHA is returned as-is, no lookup;
//! 2. the ref taken literally (covers `heads/x`, `tags/x`, `pull/7/head`);
//! 3. `heads/<ref>`;
//! 4. `tags/<ref>`.
//!
//! A branch and a tag sharing a name therefore resolve to the branch.

use thiserror::Error;

use crate::github::{ApiError, RefStore};
use crate::types::{CommitSha, ParseError};

#[derive(Debug, Error)]
pub enum ResolveError {
    /// Every namespace was probed and none had the ref.
    #[error("no ref, branch, or tag named '{0}' was found")]
    RefNotFound(String),
    /// A probe failed with something other than "not found".
    #[error(transparent)]
    Api(#[from] ApiError),
    /// The host answered with a SHA that does not parse.
    #[error("host returned a malformed sha for '{reference}': {source}")]
    MalformedSha {
        reference: String,
        #[source]
        source: ParseError,
    },
}

/// The lookup paths tried for a short ref, in priority order.
fn candidates(input: &str) -> [String; 3] {
    [
        input.to_string(),
        format!("heads/{}", input),
        format!("tags/{}", input),
    ]
}

/// Resolve `input` to a commit SHA against `store`.
///
/// A "not found" from one namespace falls through to the next; any other
/// failure aborts immediately and surfaces unchanged. Never swallows a
/// transport or permission error as a miss.
pub fn resolve(store: &dyn RefStore, input: &str) -> Result<CommitSha, ResolveError> {
    if let Ok(sha) = input.parse::<CommitSha>() {
        log::info!("'{}' is already a full commit sha, skipping lookup", input);
        return Ok(sha);
    }

    for candidate in candidates(input) {
        log::info!("looking up '{}'", candidate);
        match store.get_ref(&candidate) {
            Ok(found) => {
                let sha = found
                    .object
                    .sha
                    .parse::<CommitSha>()
                    .map_err(|source| ResolveError::MalformedSha {
                        reference: candidate,
                        source,
                    })?;
                log::info!("resolved '{}' via {} to {}", input, found.name, sha);
                return Ok(sha);
            }
            Err(e) if e.is_not_found() => {
                log::info!("no ref at '{}'", candidate);
            }
            Err(e) => return Err(e.into()),
        }
    }

    Err(ResolveError::RefNotFound(input.to_string()))
}
