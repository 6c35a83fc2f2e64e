//! Intents accepted by the [`QueryController`](super::QueryController).

use crate::gateway::FetchError;
use crate::model::{Movie, UrlParams};

/// Everything that can happen to the search view.
///
/// The first group comes from the user or the embedding environment. `DebounceSettled` and
/// `FetchSettled` are posted back by the controller's own timer and fetch tasks.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryIntent {
    /// The search box now holds this text.
    Input(String),
    /// Move by `delta` pages (`1` for next, `-1` for previous).
    ChangePage(i64),
    /// The environment already moved the URL to these parameters.
    UrlChanged(UrlParams),
    Back,
    Forward,
    /// Navigate to a URL, adding a history entry.
    Open(String),

    DebounceSettled {
        generation: u64,
    },
    FetchSettled {
        token: u64,
        outcome: Result<Vec<Movie>, FetchError>,
    },
}
