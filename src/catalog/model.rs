use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Type discriminator of a clip that only references someone else's clip.
pub const REPOST_TYPE: &str = "Coub::Recoub";

/// Placeholder substituted in image and frame URL templates.
pub const VERSION_PLACEHOLDER: &str = "%{version}";

/// One clip as it appears in the user's catalog listing.
///
/// Fields the archiver does not look at are kept in `extra`, so writing the
/// record back out produces the full listing entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClipRecord {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    pub created_at: Timestamp,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub views_count: u64,
    #[serde(default)]
    pub recoubs_count: u64,
    #[serde(default)]
    pub external_download: ExternalDownload,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub file_versions: FileVersions,
    #[serde(default)]
    pub image_versions: VersionTemplate,
    #[serde(default)]
    pub first_frame_versions: VersionTemplate,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ClipRecord {
    pub fn is_repost(&self) -> bool {
        self.kind == REPOST_TYPE
    }

    pub fn tag_titles(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(|tag| tag.title.as_str())
    }
}

/// Either a plain flag or the description of the external source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExternalDownload {
    Flag(bool),
    Source {
        #[serde(rename = "type", default)]
        service: String,
        url: String,
    },
}

impl Default for ExternalDownload {
    fn default() -> Self {
        ExternalDownload::Flag(false)
    }
}

impl fmt::Display for ExternalDownload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExternalDownload::Flag(flag) => write!(f, "{}", flag),
            ExternalDownload::Source { url, .. } => write!(f, "{}", url),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Tag {
    pub title: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileVersions {
    #[serde(default)]
    pub html5: Html5Versions,
    #[serde(default)]
    pub share: ShareVersions,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Html5Versions {
    #[serde(default)]
    pub video: VideoRenditions,
    #[serde(default)]
    pub audio: AudioRenditions,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoRenditions {
    #[serde(default)]
    pub higher: Rendition,
    #[serde(default)]
    pub high: Rendition,
    #[serde(default)]
    pub med: Rendition,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AudioRenditions {
    #[serde(default)]
    pub high: Rendition,
    #[serde(default)]
    pub med: Rendition,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Rendition {
    #[serde(default)]
    pub url: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShareVersions {
    /// `null` in the listing when no share rendition was produced.
    #[serde(default)]
    pub default: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ShareVersions {
    /// The share URL, empty when there is none.
    pub fn default_url(&self) -> &str {
        self.default.as_deref().unwrap_or_default()
    }
}

/// An image set addressed by a URL template and its version identifiers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VersionTemplate {
    #[serde(default)]
    pub template: String,
    #[serde(default)]
    pub versions: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl VersionTemplate {
    /// Substitutes every placeholder occurrence with `version`.
    pub fn url_for(&self, version: &str) -> String {
        self.template.replace(VERSION_PLACEHOLDER, version)
    }
}

/// A listing timestamp. Written back exactly as it was read.
#[derive(Debug, Clone, PartialEq)]
pub struct Timestamp {
    raw: String,
    parsed: DateTime<FixedOffset>,
}

impl Timestamp {
    fn parse(raw: &str) -> Result<Self, chrono::ParseError> {
        Ok(Self {
            raw: raw.to_string(),
            parsed: DateTime::parse_from_rfc3339(raw)?,
        })
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.parsed)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Timestamp::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "id": 42,
        "title": "  Cat  ",
        "created_at": "2016-03-01T12:30:00Z",
        "type": "Coub::Simple",
        "duration": 12.345,
        "views_count": 10,
        "recoubs_count": 2,
        "external_download": false,
        "tags": [{"id": 1, "title": "funny"}, {"id": 2, "title": "cat"}],
        "file_versions": {
            "html5": {
                "video": {"med": {"url": "https://cdn.example/v/med.mp4", "size": 100}},
                "audio": {"high": {"url": "https://cdn.example/a/high.mp3"}}
            },
            "mobile": {"video": "https://cdn.example/m.mp4"},
            "share": {"default": null}
        },
        "image_versions": {"template": "https://img.example/%{version}/x.jpg", "versions": ["000", "100"]},
        "permalink": "abc123"
    }"#;

    #[test]
    fn test_parse_listing_entry() {
        let clip: ClipRecord = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(clip.id, 42);
        assert!(!clip.is_repost());
        assert_eq!(clip.tag_titles().collect::<Vec<_>>(), vec!["funny", "cat"]);
        assert_eq!(
            clip.file_versions.html5.video.med.url,
            "https://cdn.example/v/med.mp4"
        );
        assert!(clip.file_versions.html5.video.higher.url.is_empty());
        assert_eq!(clip.file_versions.share.default_url(), "");
        assert!(clip.first_frame_versions.versions.is_empty());
        assert_eq!(clip.external_download, ExternalDownload::Flag(false));
    }

    #[test]
    fn test_unknown_fields_survive_serialization() {
        let clip: ClipRecord = serde_json::from_str(SAMPLE).unwrap();
        let dumped = serde_json::to_value(&clip).unwrap();
        assert_eq!(dumped["permalink"], "abc123");
        assert_eq!(dumped["file_versions"]["mobile"]["video"], "https://cdn.example/m.mp4");
        assert_eq!(dumped["file_versions"]["html5"]["video"]["med"]["size"], 100);
        assert_eq!(dumped["tags"][1]["id"], 2);
    }

    #[test]
    fn test_nested_fields_survive_serialization() {
        let mut listing: Value = serde_json::from_str(SAMPLE).unwrap();
        listing["file_versions"]["html5"]["audio"]["sample_duration"] = 5.0.into();
        listing["file_versions"]["html5"]["video"]["codec"] = "h264".into();
        listing["file_versions"]["html5"]["chunks"] = true.into();
        listing["file_versions"]["share"]["extra_share"] = "x".into();
        listing["image_versions"]["note"] = "n".into();

        let clip: ClipRecord = serde_json::from_value(listing).unwrap();
        let dumped = serde_json::to_value(&clip).unwrap();
        let files = &dumped["file_versions"];
        assert_eq!(files["html5"]["audio"]["sample_duration"], 5.0);
        assert_eq!(files["html5"]["video"]["codec"], "h264");
        assert_eq!(files["html5"]["chunks"], true);
        assert_eq!(files["share"]["extra_share"], "x");
        assert_eq!(dumped["image_versions"]["note"], "n");
    }

    #[test]
    fn test_null_share_written_back_as_null() {
        let clip: ClipRecord = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(clip.file_versions.share.default, None);
        let dumped = serde_json::to_value(&clip).unwrap();
        assert!(dumped["file_versions"]["share"]["default"].is_null());
    }

    #[test]
    fn test_created_at_written_back_verbatim() {
        let clip: ClipRecord = serde_json::from_str(SAMPLE).unwrap();
        let dumped = serde_json::to_value(&clip).unwrap();
        assert_eq!(dumped["created_at"], "2016-03-01T12:30:00Z");
        assert_eq!(clip.created_at.to_string(), "2016-03-01 12:30:00 +00:00");
    }

    #[test]
    fn test_invalid_created_at_is_rejected() {
        let listing = SAMPLE.replace("2016-03-01T12:30:00Z", "yesterday");
        assert!(serde_json::from_str::<ClipRecord>(&listing).is_err());
    }

    #[test]
    fn test_external_source_object() {
        let source: ExternalDownload =
            serde_json::from_str(r#"{"type": "Youtube", "url": "https://youtu.be/x"}"#).unwrap();
        assert_eq!(source.to_string(), "https://youtu.be/x");
        assert_eq!(ExternalDownload::Flag(true).to_string(), "true");
    }

    #[test]
    fn test_template_replaces_every_placeholder() {
        let template = VersionTemplate {
            template: "https://img.example/%{version}/x_%{version}.jpg".to_string(),
            versions: vec![],
            extra: Map::new(),
        };
        assert_eq!(template.url_for("big"), "https://img.example/big/x_big.jpg");
    }
}
