//! Content item fixtures with every required field present.

use chrono::{TimeZone, Utc};
use plotline_core::item::{
    ContentItem, ContentPayload, PromptPayload, ScenarioPayload, StoryPayload, VideoPayload,
    VideoStatus,
};
use uuid::Uuid;

fn envelope(id: &str, payload: ContentPayload) -> ContentItem {
    ContentItem {
        id: id.to_owned(),
        project_id: Uuid::new_v4(),
        source: "wizard".to_owned(),
        created_at: Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
        user_id: Uuid::new_v4(),
        payload,
    }
}

/// A valid scenario item.
#[must_use]
pub fn scenario_item(id: &str) -> ContentItem {
    envelope(
        id,
        ContentPayload::Scenario(ScenarioPayload {
            title: "The Lighthouse".to_owned(),
            story: "A keeper discovers the lamp has been lit from the inside.".to_owned(),
            genre: Some("mystery".to_owned()),
            beats: vec!["arrival".to_owned(), "discovery".to_owned()],
        }),
    )
}

/// A valid prompt item.
#[must_use]
pub fn prompt_item(id: &str) -> ContentItem {
    envelope(
        id,
        ContentPayload::Prompt(PromptPayload {
            template: "Wide shot of {subject} at dusk, {style}".to_owned(),
            keywords: vec!["lighthouse".to_owned(), "dusk".to_owned()],
            style: Some("cinematic".to_owned()),
        }),
    )
}

/// A valid video item.
#[must_use]
pub fn video_item(id: &str) -> ContentItem {
    envelope(
        id,
        ContentPayload::Video(VideoPayload {
            provider: "lumen".to_owned(),
            media_url: "https://cdn.example/renders/v1.mp4".to_owned(),
            duration_seconds: Some(42),
            status: VideoStatus::Ready,
        }),
    )
}

/// A valid story item.
#[must_use]
pub fn story_item(id: &str) -> ContentItem {
    envelope(
        id,
        ContentPayload::Story(StoryPayload {
            text: "Once, a keeper rowed out to a lighthouse that was already lit.".to_owned(),
            title: Some("The Lighthouse".to_owned()),
        }),
    )
}
