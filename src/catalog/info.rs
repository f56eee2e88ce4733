//! The two metadata files written next to a clip's media.

use std::fmt::Write;
use std::path::Path;

use tokio::fs;

use super::ClipRecord;
use crate::error::CatalogError;

pub const METADATA_FILE: &str = "metadata.json";
pub const SUMMARY_FILE: &str = "info.txt";

/// Human-readable summary, one labelled line per field.
pub fn summary_text(clip: &ClipRecord) -> String {
    let mut out = String::new();
    // writing into a String cannot fail
    let _ = writeln!(out, "Title: {}", clip.title);
    let _ = writeln!(out, "Created At: {}", clip.created_at);
    let _ = writeln!(out, "Duration: {:.2}", clip.duration);
    let _ = writeln!(out, "Views: {}", clip.views_count);
    let _ = writeln!(out, "Recoubs: {}", clip.recoubs_count);
    let _ = writeln!(out, "Source: {}", clip.external_download);
    let _ = writeln!(out, "Tags: {}", clip.tag_titles().collect::<Vec<_>>().join(", "));
    out
}

/// Creates `dir` if needed and (over)writes both metadata files in it.
///
/// Safe to call again on an existing directory; the files end up with the
/// same content as after a single call.
pub async fn prepare_clip_dir(dir: &Path, clip: &ClipRecord) -> Result<(), CatalogError> {
    fs::create_dir_all(dir)
        .await
        .map_err(|source| CatalogError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;

    let metadata_path = dir.join(METADATA_FILE);
    let mut metadata =
        serde_json::to_vec_pretty(clip).map_err(|source| CatalogError::EncodeMetadata {
            path: metadata_path.clone(),
            source,
        })?;
    metadata.push(b'\n');
    write_file(&metadata_path, &metadata).await?;

    write_file(&dir.join(SUMMARY_FILE), summary_text(clip).as_bytes()).await
}

async fn write_file(path: &Path, contents: &[u8]) -> Result<(), CatalogError> {
    fs::write(path, contents)
        .await
        .map_err(|source| CatalogError::WriteMetadata {
            path: path.to_path_buf(),
            source,
        })
}
