mod info;
mod layout;
mod model;

use std::path::{Path, PathBuf};

pub use info::{METADATA_FILE, SUMMARY_FILE, prepare_clip_dir, summary_text};
pub use layout::{directory_names, sanitize_title};
pub use model::*;

use crate::error::CatalogError;

/// Location of a user's listing under the archive root.
pub fn catalog_path(root: &Path, user: &str) -> PathBuf {
    root.join(format!("{}.json", user))
}

/// Reads a listing file and returns the clips worth archiving, in listing
/// order, with their titles trimmed.
pub async fn load_catalog(path: &Path) -> Result<Vec<ClipRecord>, CatalogError> {
    let data = tokio::fs::read(path)
        .await
        .map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    let clips: Vec<ClipRecord> =
        serde_json::from_slice(&data).map_err(|source| CatalogError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(without_reposts(clips))
}

pub fn without_reposts(clips: Vec<ClipRecord>) -> Vec<ClipRecord> {
    clips
        .into_iter()
        .filter(|clip| !clip.is_repost())
        .map(|mut clip| {
            clip.title = clip.title.trim().to_string();
            clip
        })
        .collect()
}
