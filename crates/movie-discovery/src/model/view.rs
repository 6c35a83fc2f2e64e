use crate::model::{Movie, PageNumber};

/// What the results area shows. Exactly one of these at a time, so an error never sits on
/// top of a stale list.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ViewStatus {
    #[default]
    Idle,
    Loading,
    Loaded(Vec<Movie>),
    Failed(String),
}

impl ViewStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewStatus::Loading)
    }

    /// Movies on screen; empty unless the last applied fetch succeeded.
    pub fn movies(&self) -> &[Movie] {
        match self {
            ViewStatus::Loaded(movies) => movies,
            _ => &[],
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ViewStatus::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Read-only projection of the query controller, published after every intent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewSnapshot {
    /// Literal contents of the search box.
    pub search: String,
    /// Search text that last settled and drives fetches.
    pub query: String,
    pub page: PageNumber,
    /// The view's URL query string, without the leading `?`.
    pub url: String,
    pub status: ViewStatus,
    pub debounce_pending: bool,
    pub fetches_issued: u64,
}
