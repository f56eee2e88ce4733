//! Mapping clips onto their output directories.

use std::collections::HashSet;

use super::ClipRecord;

const NAME_MAX: usize = 255;

/// Makes a trimmed clip title usable as a single path component.
///
/// Path separators, NUL and control characters become `_`; surrounding
/// whitespace and dots are dropped. Returns an empty string when nothing
/// usable is left.
pub fn sanitize_title(title: &str) -> String {
    let replaced: String = title
        .chars()
        .map(|c| {
            if c == '/' || c == '\\' || c == '\0' || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();

    let trimmed = replaced.trim_matches(|c: char| c.is_whitespace() || c == '.');
    // leave room for the ".mp4" suffix of the renamed share file
    truncate(trimmed, NAME_MAX - 4).to_string()
}

fn truncate(name: &str, limit: usize) -> &str {
    if name.len() <= limit {
        return name;
    }
    let mut take = limit;
    while !name.is_char_boundary(take) {
        take -= 1;
    }
    &name[..take]
}

/// Picks a distinct directory name for every clip, in catalog order.
///
/// Clips sharing a sanitized title get ` (<id>)` appended after the first
/// occurrence, then ` (<id>-2)`, ` (<id>-3)`... while that is still taken; a
/// title with nothing usable falls back to the id. The base is shortened so
/// the suffixed name stays within `NAME_MAX`.
pub fn directory_names(clips: &[ClipRecord]) -> Vec<String> {
    let mut used = HashSet::new();
    clips
        .iter()
        .map(|clip| {
            let mut base = sanitize_title(&clip.title);
            if base.is_empty() {
                base = clip.id.to_string();
            }

            let mut name = base.clone();
            let mut attempt = 1;
            while used.contains(&name) {
                let suffix = if attempt == 1 {
                    format!(" ({})", clip.id)
                } else {
                    format!(" ({}-{})", clip.id, attempt)
                };
                name = format!("{}{}", truncate(&base, NAME_MAX - suffix.len()), suffix);
                attempt += 1;
            }
            used.insert(name.clone());
            name
        })
        .collect()
}
