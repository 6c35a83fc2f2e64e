use serde::Deserialize;

/// Base address for poster images at the width the cards use.
pub const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500/";

/// A movie record as returned by the metadata API's `results` array.
///
/// Only `id` is required; every other field tolerates absence or `null` so that one sparse
/// record does not fail a whole page.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Movie {
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub original_language: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub overview: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Movie {
    /// Creates a movie with only the required fields set.
    pub fn new(id: u64, title: impl Into<String>, original_language: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            original_language: original_language.into(),
            poster_path: None,
            release_date: None,
            vote_average: None,
            overview: None,
        }
    }

    /// Year part of `release_date` (the text before the first `-`).
    pub fn release_year(&self) -> Option<&str> {
        self.release_date
            .as_deref()
            .and_then(|date| date.split('-').next())
            .filter(|year| !year.is_empty())
    }

    /// Average vote with one decimal, or `"0"` when there is no (or a zero) average.
    pub fn rating_label(&self) -> String {
        match self.vote_average {
            Some(average) if average != 0.0 => format!("{average:.1}"),
            _ => "0".to_string(),
        }
    }

    /// Full poster address, when the record has a poster.
    pub fn poster_url(&self) -> Option<String> {
        self.poster_path
            .as_deref()
            .filter(|path| !path.is_empty())
            .map(|path| format!("{POSTER_BASE_URL}{}", path.trim_start_matches('/')))
    }
}
