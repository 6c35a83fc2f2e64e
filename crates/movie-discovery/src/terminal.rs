//! Line-oriented front end: parse what the user typed and render snapshots as text.

use crate::model::{Movie, ViewSnapshot, ViewStatus};
use std::fmt::Write;

/// One line of terminal input.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Plain text replaces the search box contents.
    Type(String),
    Next,
    Prev,
    Back,
    Forward,
    Open(String),
    Quit,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim_end_matches(|c: char| c == '\r' || c == '\n');
        let Some(command) = line.strip_prefix(':') else {
            return Command::Type(line.to_string());
        };

        let (name, arg) = command
            .split_once(char::is_whitespace)
            .map(|(name, arg)| (name, arg.trim()))
            .unwrap_or((command, ""));

        match name {
            "next" | "n" => Command::Next,
            "prev" | "p" => Command::Prev,
            "back" | "b" => Command::Back,
            "forward" | "f" => Command::Forward,
            "open" | "o" => Command::Open(arg.to_string()),
            "quit" | "q" => Command::Quit,
            _ => Command::Unknown(line.to_string()),
        }
    }
}

pub const HELP: &str =
    "type to search | :next :prev | :back :forward | :open <url> | :quit";

/// Renders a snapshot as a block of text.
pub fn render(snapshot: &ViewSnapshot) -> String {
    let mut out = String::new();
    let pending = if snapshot.debounce_pending { " (typing)" } else { "" };
    let _ = writeln!(out, "search: {:?}{pending}", snapshot.search);
    let _ = writeln!(out, "url: ?{}  page {}", snapshot.url, snapshot.page);

    match &snapshot.status {
        ViewStatus::Idle => {}
        ViewStatus::Loading => out.push_str("Loading...\n"),
        ViewStatus::Failed(message) => {
            let _ = writeln!(out, "{message}");
        }
        ViewStatus::Loaded(movies) if movies.is_empty() => out.push_str("No movies found.\n"),
        ViewStatus::Loaded(movies) => {
            for movie in movies {
                out.push_str(&card(movie));
            }
        }
    }
    out
}

fn card(movie: &Movie) -> String {
    let mut line = format!("  {}", movie.title);
    if let Some(year) = movie.release_year() {
        let _ = write!(line, " ({year})");
    }
    let _ = write!(line, "  * {}", movie.rating_label());
    if !movie.original_language.is_empty() {
        let _ = write!(line, "  [{}]", movie.original_language);
    }
    if let Some(poster) = movie.poster_url() {
        let _ = write!(line, "\n    {poster}");
    }
    line.push('\n');
    line
}
