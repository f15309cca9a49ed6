//! Content type routing, validation, and per-type record transforms.
//!
//! Routing is a fixed mapping from content type to the secondary-store
//! destination and the set of required payload fields. All functions here
//! are pure; nothing touches a store.

use plotline_core::item::{ContentItem, ContentPayload, ContentType};

/// Destination and required fields for one content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    /// The secondary-store table this type is written to.
    pub destination: &'static str,
    /// Payload fields that must be present and non-blank.
    pub required_fields: &'static [&'static str],
}

/// A required field that was absent or blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingField {
    /// The payload field name.
    pub field: &'static str,
}

/// Returns the route for a content type. The mapping is closed over the
/// four known types, so there is no unknown-type failure path at runtime.
#[must_use]
pub fn route(content_type: ContentType) -> Route {
    match content_type {
        ContentType::Scenario => Route {
            destination: "scenario-table",
            required_fields: &["title", "story"],
        },
        ContentType::Prompt => Route {
            destination: "prompt-table",
            required_fields: &["template"],
        },
        ContentType::Video => Route {
            destination: "video-asset-table",
            required_fields: &["provider", "media_url"],
        },
        ContentType::Story => Route {
            destination: "story-table",
            required_fields: &["text"],
        },
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Inspects the item's payload against its type's required fields and
/// returns every missing one. Whitespace-only text counts as missing.
#[must_use]
pub fn validate(item: &ContentItem) -> Vec<MissingField> {
    let mut missing = Vec::new();
    let mut check = |field: &'static str, value: &str| {
        if is_blank(value) {
            missing.push(MissingField { field });
        }
    };

    match &item.payload {
        ContentPayload::Scenario(scenario) => {
            check("title", &scenario.title);
            check("story", &scenario.story);
        }
        ContentPayload::Prompt(prompt) => {
            check("template", &prompt.template);
        }
        ContentPayload::Video(video) => {
            check("provider", &video.provider);
            check("media_url", &video.media_url);
        }
        ContentPayload::Story(story) => {
            check("text", &story.text);
        }
    }

    missing
}

/// Transforms the item into the routed destination's expected record shape:
/// field renaming, defaulting, and coercion per content type. The envelope
/// is denormalized into every record so the secondary store can answer
/// per-user and per-project queries on its own.
#[must_use]
pub fn to_record(item: &ContentItem) -> serde_json::Value {
    let envelope = |key: &str| {
        serde_json::json!({
            key: item.id,
            "project_id": item.project_id,
            "owner_id": item.user_id,
            "source": item.source,
            "created_at": item.created_at,
        })
    };

    match &item.payload {
        ContentPayload::Scenario(scenario) => {
            let mut record = envelope("scenario_id");
            record["title"] = scenario.title.clone().into();
            record["story_text"] = scenario.story.clone().into();
            record["genre"] = scenario
                .genre
                .clone()
                .unwrap_or_else(|| "unspecified".to_owned())
                .into();
            record["beats"] = scenario.beats.clone().into();
            record
        }
        ContentPayload::Prompt(prompt) => {
            let mut record = envelope("prompt_id");
            record["template_text"] = prompt.template.clone().into();
            // The prompt table stores keywords as one searchable string.
            record["keywords"] = prompt.keywords.join(", ").into();
            record["style"] = prompt
                .style
                .clone()
                .unwrap_or_else(|| "default".to_owned())
                .into();
            record
        }
        ContentPayload::Video(video) => {
            let mut record = envelope("video_id");
            record["provider"] = video.provider.clone().into();
            record["media_url"] = video.media_url.clone().into();
            record["duration_seconds"] = i64::from(video.duration_seconds.unwrap_or(0)).into();
            record["status"] = serde_json::to_value(video.status)
                .expect("VideoStatus serialization is infallible");
            record
        }
        ContentPayload::Story(story) => {
            let mut record = envelope("story_id");
            record["narrative_text"] = story.text.clone().into();
            record["title"] = story.title.clone().unwrap_or_default().into();
            record
        }
    }
}
