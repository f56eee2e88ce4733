use std::path::PathBuf;

use crate::catalog::{ClipRecord, VersionTemplate, directory_names, sanitize_title};
use crate::downloader::{GroupKind, filename_from_url};

/// One file to fetch. `file_name` is `None` when the listing has no usable
/// URL for the rendition.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedAsset {
    pub label: String,
    pub url: String,
    pub file_name: Option<String>,
}

impl PlannedAsset {
    fn from_url(label: impl Into<String>, url: &str) -> Self {
        Self {
            label: label.into(),
            url: url.to_string(),
            file_name: filename_from_url(url),
        }
    }

    fn renamed(label: impl Into<String>, url: &str, file_name: String) -> Self {
        Self {
            label: label.into(),
            url: url.to_string(),
            file_name: (!url.is_empty()).then_some(file_name),
        }
    }
}

/// An ordered set of assets fetched one after another.
#[derive(Debug, Clone)]
pub struct AssetGroup {
    pub kind: GroupKind,
    pub assets: Vec<PlannedAsset>,
}

/// Everything needed to download one clip.
#[derive(Debug, Clone)]
pub struct ClipJob {
    pub id: u64,
    pub title: String,
    pub dir: PathBuf,
    pub groups: Vec<AssetGroup>,
}

pub struct Planer {
    root: PathBuf,
}

impl Planer {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Planer { root: root.into() }
    }

    /// One job per clip, in catalog order.
    pub fn plan(&self, clips: &[ClipRecord]) -> Vec<ClipJob> {
        clips
            .iter()
            .zip(directory_names(clips))
            .map(|(clip, dir_name)| ClipJob {
                id: clip.id,
                title: clip.title.clone(),
                dir: self.root.join(dir_name),
                groups: plan_groups(clip),
            })
            .collect()
    }
}

pub fn plan_groups(clip: &ClipRecord) -> Vec<AssetGroup> {
    vec![
        file_group(clip),
        template_group(GroupKind::Image, &clip.image_versions),
        template_group(GroupKind::Frame, &clip.first_frame_versions),
    ]
}

// Video medium -> high -> higher, audio high -> medium, then the share file
// twice: under its own name and as "<title>.mp4".
fn file_group(clip: &ClipRecord) -> AssetGroup {
    let html5 = &clip.file_versions.html5;
    let share = clip.file_versions.share.default_url();

    let mut stem = sanitize_title(&clip.title);
    if stem.is_empty() {
        stem = clip.id.to_string();
    }

    AssetGroup {
        kind: GroupKind::File,
        assets: vec![
            PlannedAsset::from_url("medium video", &html5.video.med.url),
            PlannedAsset::from_url("high video", &html5.video.high.url),
            PlannedAsset::from_url("higher video", &html5.video.higher.url),
            PlannedAsset::from_url("high audio", &html5.audio.high.url),
            PlannedAsset::from_url("medium audio", &html5.audio.med.url),
            PlannedAsset::from_url("share", share),
            PlannedAsset::renamed("renamed share", share, format!("{}.mp4", stem)),
        ],
    }
}

fn template_group(kind: GroupKind, versions: &VersionTemplate) -> AssetGroup {
    let assets = if versions.template.is_empty() {
        Vec::new()
    } else {
        versions
            .versions
            .iter()
            .map(|version| {
                PlannedAsset::from_url(format!("{} {}", kind, version), &versions.url_for(version))
            })
            .collect()
    };
    AssetGroup { kind, assets }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn clip() -> ClipRecord {
        serde_json::from_value(json!({
            "id": 9,
            "title": "Cat",
            "created_at": "2016-03-01T12:30:00Z",
            "type": "Coub::Simple",
            "file_versions": {
                "html5": {
                    "video": {
                        "med": {"url": "https://cdn.example/v/med.mp4"},
                        "high": {"url": "https://cdn.example/v/high.mp4"},
                        "higher": {"url": ""}
                    },
                    "audio": {
                        "high": {"url": "https://cdn.example/a/high.mp3"},
                        "med": {"url": "https://cdn.example/a/med.mp3"}
                    }
                },
                "share": {"default": "https://cdn.example/path/seg.mp4"}
            },
            "image_versions": {
                "template": "https://img.example/%{version}/x.jpg",
                "versions": ["000", "100"]
            },
            "first_frame_versions": {
                "template": "https://img.example/frames/%{version}_ff.jpg",
                "versions": ["small", "big"]
            }
        }))
        .unwrap()
    }

    fn names(group: &AssetGroup) -> Vec<Option<&str>> {
        group.assets.iter().map(|a| a.file_name.as_deref()).collect()
    }

    #[test]
    fn test_file_group_order_and_names() {
        let groups = plan_groups(&clip());
        let file = &groups[0];
        assert_eq!(file.kind, GroupKind::File);

        let labels: Vec<_> = file.assets.iter().map(|a| a.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "medium video",
                "high video",
                "higher video",
                "high audio",
                "medium audio",
                "share",
                "renamed share",
            ]
        );
        assert_eq!(
            names(file),
            vec![
                Some("med.mp4"),
                Some("high.mp4"),
                None,
                Some("high.mp3"),
                Some("med.mp3"),
                Some("seg.mp4"),
                Some("Cat.mp4"),
            ]
        );
        assert_eq!(file.assets[5].url, file.assets[6].url);
    }

    #[test]
    fn test_image_versions_substituted_in_order() {
        let groups = plan_groups(&clip());
        let image = &groups[1];
        assert_eq!(image.kind, GroupKind::Image);
        let urls: Vec<_> = image.assets.iter().map(|a| a.url.as_str()).collect();
        assert_eq!(
            urls,
            vec!["https://img.example/000/x.jpg", "https://img.example/100/x.jpg"]
        );

        let frame = &groups[2];
        assert_eq!(frame.kind, GroupKind::Frame);
        assert_eq!(names(frame), vec![Some("small_ff.jpg"), Some("big_ff.jpg")]);
    }

    #[test]
    fn test_missing_share_skips_both_share_entries() {
        let mut clip = clip();
        clip.file_versions.share.default = None;
        let groups = plan_groups(&clip);
        assert_eq!(groups[0].assets[5].file_name, None);
        assert_eq!(groups[0].assets[6].file_name, None);
    }

    #[test]
    fn test_empty_template_plans_nothing() {
        let mut clip = clip();
        clip.image_versions.template.clear();
        assert!(plan_groups(&clip)[1].assets.is_empty());
    }

    #[test]
    fn test_plan_assigns_directories_under_root() {
        let mut twin = clip();
        twin.id = 10;
        let jobs = Planer::new("/archive").plan(&[clip(), twin]);
        assert_eq!(jobs[0].dir, PathBuf::from("/archive/Cat"));
        assert_eq!(jobs[1].dir, PathBuf::from("/archive/Cat (10)"));
        assert_eq!(jobs[0].groups.len(), 3);
    }
}
