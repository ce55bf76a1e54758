//! Transcript-related types.

use std::slice;

use serde::Serialize;
use veracity_model::Verdict;

/// Who produced an [`Entry`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Text the user submitted.
    User,
    /// An answer from the verification side, successful or not.
    Assistant,
}

/// What an [`Entry`] says.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Content {
    /// Plain text. Every user entry, and assistant entries that report a
    /// failure.
    Text(String),
    /// A verdict returned by the verification service.
    Verdict(Verdict),
}

/// A single exchange in the transcript.
///
/// Entries can't be changed after construction, there are only accessors.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Entry {
    role: Role,
    content: Content,
}

impl Entry {
    /// Creates a user entry.
    #[inline]
    pub fn user<S: Into<String>>(text: S) -> Self {
        Self {
            role: Role::User,
            content: Content::Text(text.into()),
        }
    }

    /// Creates an assistant entry carrying a verdict.
    #[inline]
    pub fn verdict(verdict: Verdict) -> Self {
        Self {
            role: Role::Assistant,
            content: Content::Verdict(verdict),
        }
    }

    /// Creates an assistant entry with plain text.
    #[inline]
    pub fn assistant_text<S: Into<String>>(text: S) -> Self {
        Self {
            role: Role::Assistant,
            content: Content::Text(text.into()),
        }
    }

    /// Returns the role of this entry.
    #[inline]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns the content of this entry.
    #[inline]
    pub fn content(&self) -> &Content {
        &self.content
    }

    /// Returns the text if this is a plain text entry.
    #[inline]
    pub fn text(&self) -> Option<&str> {
        match &self.content {
            Content::Text(text) => Some(text),
            Content::Verdict(_) => None,
        }
    }

    /// Returns the verdict if this entry carries one.
    #[inline]
    pub fn as_verdict(&self) -> Option<&Verdict> {
        match &self.content {
            Content::Verdict(verdict) => Some(verdict),
            Content::Text(_) => None,
        }
    }
}

/// An append-only log of entries, in insertion order.
///
/// There is no way to remove or edit an entry. Growth is unbounded: a
/// session keeps every exchange until it is dropped.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Transcript {
    entries: Vec<Entry>,
}

impl Transcript {
    /// Adds an entry to the end.
    #[inline]
    pub fn append(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    /// Returns every entry, oldest first.
    #[inline]
    pub fn all(&self) -> &[Entry] {
        &self.entries
    }

    /// Returns the newest entry.
    #[inline]
    pub fn last(&self) -> Option<&Entry> {
        self.entries.last()
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been appended yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the entries, oldest first.
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, Entry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a Entry;
    type IntoIter = slice::Iter<'a, Entry>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
