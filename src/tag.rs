//! The tag upsert: create the tag if it is absent, move it if it exists.
//!
//! GitHub's ref API has no atomic upsert; create and update are distinct
//! calls distinguished by prior existence, so this is a check-then-act
//! sequence. A concurrent writer can change the tag between the existence
//! check and the update; whoever completes the update last wins. That
//! window is accepted, not worked around.

use crate::github::{ApiError, RefStore};
use crate::types::{CommitSha, TagName};

/// How the upsert left the tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagUpsert {
    /// The tag did not exist and was created.
    Created,
    /// The tag existed and was repointed.
    Moved,
}

/// Point `tag` at `sha`, creating or moving it as needed.
///
/// If the existence check fails with anything other than "not found",
/// neither a create nor an update is attempted.
pub fn upsert(store: &dyn RefStore, tag: &TagName, sha: &CommitSha) -> Result<TagUpsert, ApiError> {
    let tag_ref = format!("tags/{}", tag);

    match store.get_ref(&tag_ref) {
        Ok(existing) => {
            log::info!(
                "tag '{}' exists at {}, moving to {}",
                tag,
                existing.object.sha,
                sha
            );
            store.update_ref(&tag_ref, sha)?;
            Ok(TagUpsert::Moved)
        }
        Err(e) if e.is_not_found() => {
            log::info!("tag '{}' does not exist, creating at {}", tag, sha);
            store.create_ref(&format!("refs/tags/{}", tag), sha)?;
            Ok(TagUpsert::Created)
        }
        Err(e) => Err(e),
    }
}
