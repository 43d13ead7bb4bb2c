//! Match result shapes
//!
//! Both operations return an ordered group map. `match` stores one
//! [`Capture`] per group, `matchAll` stores one sequence per group with an
//! entry for every occurrence. Named groups are listed right before their
//! numeric index.

use std::fmt;
use std::ops::Range;

use bytes::Bytes;

/// Identifier of a capture group
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GroupKey {
    Index(usize),
    Name(String),
}

impl From<usize> for GroupKey {
    fn from(index: usize) -> Self {
        GroupKey::Index(index)
    }
}

impl From<&str> for GroupKey {
    fn from(name: &str) -> Self {
        GroupKey::Name(name.to_owned())
    }
}

impl From<String> for GroupKey {
    fn from(name: String) -> Self {
        GroupKey::Name(name)
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::Index(index) => write!(f, "{index}"),
            GroupKey::Name(name) => f.write_str(name),
        }
    }
}

/// Value of one group in one occurrence
///
/// `text` is `None` only for an unmatched group reported as null. `offset` is
/// only filled when offsets were requested and the group took part in the match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture {
    text: Option<Bytes>,
    offset: Option<usize>,
}

impl Capture {
    /// Owned copy of `subject[span]`; the rest of the subject is not retained
    pub(crate) fn matched(subject: &[u8], span: Range<usize>, with_offset: bool) -> Self {
        let offset = with_offset.then_some(span.start);
        Self {
            text: Some(Bytes::copy_from_slice(&subject[span])),
            offset,
        }
    }

    pub(crate) fn unmatched(as_null: bool) -> Self {
        Self {
            text: (!as_null).then(Bytes::new),
            offset: None,
        }
    }

    /// Matched bytes, `None` for a null group
    #[must_use]
    pub fn text(&self) -> Option<&Bytes> {
        self.text.as_ref()
    }

    /// Matched bytes, empty for a null group
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_deref().unwrap_or_default()
    }

    /// Matched text if it is valid UTF-8
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        self.text
            .as_deref()
            .and_then(|bytes| simdutf8::basic::from_utf8(bytes).ok())
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        self.text.is_none()
    }

    /// Byte offset of the capture in the subject
    #[must_use]
    pub fn offset(&self) -> Option<usize> {
        self.offset
    }
}

impl PartialEq<&str> for Capture {
    fn eq(&self, other: &&str) -> bool {
        self.text.as_deref() == Some(other.as_bytes())
    }
}

/// Ordered mapping from group identifier to value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Groups<V> {
    entries: Vec<(GroupKey, V)>,
}

/// Result of a single-match call
pub type MatchResult = Groups<Capture>;

/// Result of an all-matches call
pub type MatchAllResult = Groups<Vec<Capture>>;

impl<V> Default for Groups<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<V> Groups<V> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn insert(&mut self, key: GroupKey, value: V) {
        self.entries.push((key, value));
    }

    pub fn get(&self, key: &GroupKey) -> Option<&V> {
        self.entries
            .iter()
            .find(|(candidate, _)| candidate == key)
            .map(|(_, value)| value)
    }

    pub fn index(&self, index: usize) -> Option<&V> {
        self.get(&GroupKey::Index(index))
    }

    pub fn name(&self, name: &str) -> Option<&V> {
        self.entries.iter().find_map(|(key, value)| match key {
            GroupKey::Name(candidate) if candidate == name => Some(value),
            _ => None,
        })
    }

    /// Number of entries, named and numeric
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &GroupKey> {
        self.entries.iter().map(|(key, _)| key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&GroupKey, &V)> {
        self.entries.iter().map(|(key, value)| (key, value))
    }
}

impl<V> IntoIterator for Groups<V> {
    type Item = (GroupKey, V);
    type IntoIter = std::vec::IntoIter<(GroupKey, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Groups<Capture> {
    /// Whether group 0 is present, i.e. the pattern matched
    #[must_use]
    pub fn is_match(&self) -> bool {
        self.index(0).is_some()
    }
}

impl Groups<Vec<Capture>> {
    /// Number of occurrences found
    #[must_use]
    pub fn occurrences(&self) -> usize {
        self.index(0).map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_index_and_name() {
        let subject: &[u8] = b"key=value";
        let mut groups = MatchResult::new();
        groups.insert(GroupKey::Index(0), Capture::matched(subject, 0..9, false));
        groups.insert(GroupKey::from("key"), Capture::matched(subject, 0..3, false));
        groups.insert(GroupKey::Index(1), Capture::matched(subject, 0..3, true));

        assert!(groups.is_match());
        assert_eq!(groups.len(), 3);
        assert_eq!(groups.index(0).and_then(Capture::as_str), Some("key=value"));
        assert_eq!(groups.name("key").and_then(Capture::as_str), Some("key"));
        assert_eq!(groups.index(1).and_then(Capture::offset), Some(0));
        assert!(groups.name("value").is_none());
        let keys: Vec<String> = groups.keys().map(ToString::to_string).collect();
        assert_eq!(keys, ["0", "key", "1"]);
    }

    #[test]
    fn unmatched_groups_are_empty_or_null() {
        let empty = Capture::unmatched(false);
        assert!(!empty.is_null());
        assert_eq!(empty.as_bytes(), b"");
        assert_eq!(empty, "");

        let null = Capture::unmatched(true);
        assert!(null.is_null());
        assert_eq!(null.as_str(), None);
        assert_eq!(null.offset(), None);
    }

    #[test]
    fn empty_results() {
        assert!(!MatchResult::new().is_match());
        assert_eq!(MatchAllResult::new().occurrences(), 0);
    }
}
