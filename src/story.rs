//! Story model and the collection state machine.
//!
//! Every mutation of the story list flows through [`StoriesState::reduce`],
//! a pure transition function over [`StoriesAction`]. The UI never touches
//! the list directly.

use chrono::{DateTime, Utc};

/// A single Hacker News story.
///
/// Identity is `object_id`; no other field is assumed unique. The wire
/// representation is validated in [`crate::client`] before a `Story` is
/// ever constructed, so fields here are plain values, not options.
#[derive(Debug, Clone, PartialEq)]
pub struct Story {
    pub object_id: String,
    pub title: String,
    pub url: String,
    pub author: String,
    pub num_comments: u64,
    pub points: i64,
    pub created_at: Option<DateTime<Utc>>,
}

/// Actions accepted by the story collection reducer.
///
/// The enum is closed, so an unknown transition is unrepresentable; the
/// reducer match is exhaustive and checked by the compiler.
#[derive(Debug, Clone)]
pub enum StoriesAction {
    /// A search was submitted; a request is in flight.
    FetchInit,
    /// The request completed with the full result list.
    FetchSuccess(Vec<Story>),
    /// The request failed; previous results stay visible.
    FetchFailure,
    /// Remove one story. The whole record rides along, but only the
    /// identity is used.
    RemoveStory(Story),
    /// Reset to an empty idle list (empty search term submitted).
    Clear,
}

/// Reducer state: the visible story list plus the loading and error flags.
///
/// The flags are never both set once a transition settles, and `data` is
/// replaced wholesale on success, never merged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoriesState {
    pub data: Vec<Story>,
    pub is_loading: bool,
    pub is_error: bool,
}

impl StoriesState {
    /// Pure transition function: consumes the current state and an action,
    /// returns the next state.
    pub fn reduce(self, action: StoriesAction) -> Self {
        match action {
            StoriesAction::FetchInit => Self {
                is_loading: true,
                is_error: false,
                ..self
            },
            StoriesAction::FetchSuccess(data) => Self {
                data,
                is_loading: false,
                is_error: false,
            },
            StoriesAction::FetchFailure => Self {
                is_loading: false,
                is_error: true,
                ..self
            },
            StoriesAction::RemoveStory(story) => Self {
                // Retain everything with a different id; duplicates of the
                // removed id all go.
                data: self
                    .data
                    .into_iter()
                    .filter(|s| s.object_id != story.object_id)
                    .collect(),
                ..self
            },
            StoriesAction::Clear => Self::default(),
        }
    }
}
