//! Shareable view location: the `query` and `page` URL parameters.
//!
//! Two encodings meet here. Endpoint paths interpolate the search text with
//! [`encode_uri_component`] (space becomes `%20`). The view's own URL is written the way
//! `URLSearchParams` writes it, as `application/x-www-form-urlencoded` (space becomes `+`).

use std::fmt;

/// Percent-encode every byte outside `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
pub fn encode_uri_component(input: &str) -> String {
    encode_with(input, false, |b| {
        b.is_ascii_alphanumeric()
            || matches!(b, b'-' | b'_' | b'.' | b'!' | b'~' | b'*' | b'\'' | b'(' | b')')
    })
}

/// Form-encode a parameter name or value (`URLSearchParams` serialization).
pub fn form_encode(input: &str) -> String {
    encode_with(input, true, |b| {
        b.is_ascii_alphanumeric() || matches!(b, b'*' | b'-' | b'.' | b'_')
    })
}

fn encode_with(input: &str, space_as_plus: bool, keep: impl Fn(u8) -> bool) -> String {
    let mut out = String::with_capacity(input.len());
    for &byte in input.as_bytes() {
        if keep(byte) {
            out.push(byte as char);
        } else if byte == b' ' && space_as_plus {
            out.push('+');
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}

/// Decode a form-encoded component. Malformed escapes are kept as literal text and invalid
/// UTF-8 is replaced, so parsing a hand-edited URL never fails.
pub fn form_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' => match (bytes.get(i + 1).and_then(hex), bytes.get(i + 2).and_then(hex)) {
                (Some(high), Some(low)) => {
                    out.push(high << 4 | low);
                    i += 3;
                }
                _ => {
                    out.push(b'%');
                    i += 1;
                }
            },
            other => {
                out.push(other);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex(byte: &u8) -> Option<u8> {
    (*byte as char).to_digit(16).map(|digit| digit as u8)
}

/// A page index that is never below 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageNumber(u32);

impl PageNumber {
    pub const FIRST: PageNumber = PageNumber(1);

    /// Builds a page number, clamping 0 up to 1.
    pub fn new(page: u32) -> Self {
        Self(page.max(1))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Moves by `delta` pages without going below the first page.
    pub fn offset(self, delta: i64) -> Self {
        let moved = i64::from(self.0).saturating_add(delta);
        Self(moved.clamp(1, i64::from(u32::MAX)) as u32)
    }

    /// Reads a `page` parameter. Absent, unparsable or zero values mean page 1.
    pub fn parse(raw: &str) -> Self {
        raw.trim().parse::<u32>().map(Self::new).unwrap_or(Self::FIRST)
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

impl From<u32> for PageNumber {
    fn from(page: u32) -> Self {
        Self::new(page)
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The externally visible `{query, page}` pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct UrlParams {
    pub query: String,
    pub page: PageNumber,
}

impl UrlParams {
    pub fn new(query: impl Into<String>, page: u32) -> Self {
        Self {
            query: query.into(),
            page: PageNumber::new(page),
        }
    }

    /// Parses a full URL, a `?`-prefixed search string or a bare query string.
    ///
    /// Only the first `query` and `page` parameters count; anything else is ignored.
    pub fn parse(input: &str) -> Self {
        let without_fragment = input.split('#').next().unwrap_or_default();
        let search = match without_fragment.split_once('?') {
            Some((_, search)) => search,
            None if without_fragment.contains("://") || without_fragment.starts_with('/') => "",
            None => without_fragment,
        };

        let mut query = None;
        let mut page = None;
        for pair in search.split('&').filter(|pair| !pair.is_empty()) {
            let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
            match form_decode(name).as_str() {
                "query" if query.is_none() => query = Some(form_decode(value)),
                "page" if page.is_none() => page = Some(PageNumber::parse(&form_decode(value))),
                _ => {}
            }
        }

        Self {
            query: query.unwrap_or_default(),
            page: page.unwrap_or_default(),
        }
    }

    /// Serializes without the leading `?`; an empty query is omitted.
    pub fn to_query_string(&self) -> String {
        if self.query.is_empty() {
            format!("page={}", self.page)
        } else {
            format!("query={}&page={}", form_encode(&self.query), self.page)
        }
    }
}

impl fmt::Display for UrlParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "?{}", self.to_query_string())
    }
}
