//! The content item model.
//!
//! A [`ContentItem`] is the single logical unit the dual-store coordinator
//! persists: a common envelope plus a type-specific payload. The payload is
//! a closed tagged union, so an unknown content type cannot be constructed —
//! it fails at deserialization, before any store is touched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The closed set of content types the pipeline produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    /// A scenario derived from a story.
    Scenario,
    /// A generation prompt derived from a scenario.
    Prompt,
    /// A rendered video asset.
    Video,
    /// A raw narrative story.
    Story,
}

impl ContentType {
    /// All content types, in pipeline order.
    pub const ALL: [Self; 4] = [Self::Scenario, Self::Prompt, Self::Video, Self::Story];

    /// The type tag as it appears on the wire.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scenario => "scenario",
            Self::Prompt => "prompt",
            Self::Video => "video",
            Self::Story => "story",
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Processing state of a video asset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VideoStatus {
    /// Queued, not yet sent to the provider.
    #[default]
    Pending,
    /// The provider is rendering.
    Processing,
    /// Rendered and available at `media_url`.
    Ready,
    /// The provider reported a failure.
    Failed,
}

/// Payload for a `scenario` item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioPayload {
    /// Scenario title. Required.
    pub title: String,
    /// The story text the scenario was derived from. Required.
    pub story: String,
    /// Optional genre label.
    #[serde(default)]
    pub genre: Option<String>,
    /// Optional structural beats (scene/act outline).
    #[serde(default)]
    pub beats: Vec<String>,
}

/// Payload for a `prompt` item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptPayload {
    /// The prompt template text. Required.
    pub template: String,
    /// Keywords derived from the scenario.
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Optional rendering style hint.
    #[serde(default)]
    pub style: Option<String>,
}

/// Payload for a `video` item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoPayload {
    /// The rendering provider name. Required.
    pub provider: String,
    /// Reference to the rendered media. Required.
    pub media_url: String,
    /// Duration in seconds, when known.
    #[serde(default)]
    pub duration_seconds: Option<u32>,
    /// Processing state, defaults to pending.
    #[serde(default)]
    pub status: VideoStatus,
}

/// Payload for a `story` item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryPayload {
    /// The narrative text. Required.
    pub text: String,
    /// Optional working title.
    #[serde(default)]
    pub title: Option<String>,
}

/// Type-specific payload variants, tagged by content type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPayload {
    /// Scenario payload.
    Scenario(ScenarioPayload),
    /// Prompt payload.
    Prompt(PromptPayload),
    /// Video payload.
    Video(VideoPayload),
    /// Story payload.
    Story(StoryPayload),
}

impl ContentPayload {
    /// The type tag of this payload.
    #[must_use]
    pub fn content_type(&self) -> ContentType {
        match self {
            Self::Scenario(_) => ContentType::Scenario,
            Self::Prompt(_) => ContentType::Prompt,
            Self::Video(_) => ContentType::Video,
            Self::Story(_) => ContentType::Story,
        }
    }
}

/// A single logical content item, constructed by the caller immediately
/// before persistence. Each persistence call is self-contained; the
/// coordinator holds no long-lived item state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    /// Caller-supplied item identifier; the primary store upserts on it.
    pub id: String,
    /// The owning project.
    pub project_id: Uuid,
    /// Source label (which pipeline stage produced the item).
    pub source: String,
    /// Creation timestamp, stamped by the caller.
    pub created_at: DateTime<Utc>,
    /// The owning user.
    pub user_id: Uuid,
    /// Type-specific payload.
    #[serde(flatten)]
    pub payload: ContentPayload,
}

impl ContentItem {
    /// The item's declared content type.
    #[must_use]
    pub fn content_type(&self) -> ContentType {
        self.payload.content_type()
    }
}

/// Reference to the authenticated user performing a write. Session
/// resolution happens upstream; the coordinator only records the id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    /// The user's identifier.
    pub id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_item() -> ContentItem {
        ContentItem {
            id: "s1".to_owned(),
            project_id: Uuid::new_v4(),
            source: "wizard".to_owned(),
            created_at: Utc::now(),
            user_id: Uuid::new_v4(),
            payload: ContentPayload::Scenario(ScenarioPayload {
                title: "T".to_owned(),
                story: "Once upon a time".to_owned(),
                genre: None,
                beats: vec![],
            }),
        }
    }

    #[test]
    fn test_content_type_follows_payload_variant() {
        assert_eq!(scenario_item().content_type(), ContentType::Scenario);
    }

    #[test]
    fn test_item_serializes_with_flat_type_tag() {
        let json = serde_json::to_value(scenario_item()).unwrap();

        assert_eq!(json["type"], "scenario");
        assert_eq!(json["id"], "s1");
        assert_eq!(json["title"], "T");
    }

    #[test]
    fn test_unknown_type_tag_fails_to_deserialize() {
        let json = serde_json::json!({
            "id": "x1",
            "project_id": Uuid::new_v4(),
            "source": "wizard",
            "created_at": Utc::now(),
            "user_id": Uuid::new_v4(),
            "type": "podcast",
            "title": "nope"
        });

        let result: Result<ContentItem, _> = serde_json::from_value(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_video_status_defaults_to_pending() {
        let json = serde_json::json!({
            "id": "v1",
            "project_id": Uuid::new_v4(),
            "source": "render".to_owned(),
            "created_at": Utc::now(),
            "user_id": Uuid::new_v4(),
            "type": "video",
            "provider": "lumen",
            "media_url": "https://cdn.example/v1.mp4"
        });

        let item: ContentItem = serde_json::from_value(json).unwrap();
        match item.payload {
            ContentPayload::Video(v) => assert_eq!(v.status, VideoStatus::Pending),
            other => panic!("expected video payload, got {other:?}"),
        }
    }
}
