//! In-memory browser history.
//!
//! Entries are the view's URL parameters. The controller writes with [`MemoryHistory::push`]
//! and [`MemoryHistory::replace`]; test builds record both in `writes()`. The browser
//! side moves with [`back`](MemoryHistory::back), [`forward`](MemoryHistory::forward),
//! [`open`](MemoryHistory::open) and [`observe`](MemoryHistory::observe), which are not
//! controller writes.

use crate::model::UrlParams;

#[cfg(test)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlWrite {
    Push,
    Replace,
}

#[derive(Debug, Clone)]
pub struct MemoryHistory {
    entries: Vec<UrlParams>,
    cursor: usize,
    #[cfg(test)]
    writes: Vec<(UrlWrite, UrlParams)>,
}

impl MemoryHistory {
    pub fn new(initial: UrlParams) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
            #[cfg(test)]
            writes: Vec::new(),
        }
    }

    pub fn current(&self) -> &UrlParams {
        &self.entries[self.cursor]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the current entry.
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Controller writes so far, oldest first.
    #[cfg(test)]
    pub fn writes(&self) -> &[(UrlWrite, UrlParams)] {
        &self.writes
    }

    /// Adds an entry after the current one, dropping any forward entries.
    pub fn push(&mut self, params: UrlParams) {
        #[cfg(test)]
        self.writes.push((UrlWrite::Push, params.clone()));
        self.append(params);
    }

    /// Overwrites the current entry.
    pub fn replace(&mut self, params: UrlParams) {
        #[cfg(test)]
        self.writes.push((UrlWrite::Replace, params.clone()));
        self.entries[self.cursor] = params;
    }

    pub fn back(&mut self) -> Option<&UrlParams> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(self.current())
    }

    pub fn forward(&mut self) -> Option<&UrlParams> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(self.current())
    }

    /// Browser navigation to a new location.
    pub fn open(&mut self, params: UrlParams) -> &UrlParams {
        self.append(params);
        self.current()
    }

    /// The environment changed the current location itself.
    pub fn observe(&mut self, params: UrlParams) {
        self.entries[self.cursor] = params;
    }

    fn append(&mut self, params: UrlParams) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(params);
        self.cursor = self.entries.len() - 1;
    }
}
