//! Shared test mocks and fixtures for the Plotline content pipeline.

mod items;
mod primary;
mod secondary;

pub use items::{prompt_item, scenario_item, story_item, video_item};
pub use primary::MemoryPrimaryStore;
pub use secondary::MemoryContentRepository;
