//! Key paths: `/`-separated addresses into the document tree.
//!
//! Segments follow the Realtime Database key rules: non-empty, no
//! `.`, `$`, `#`, `[`, `]`, `/` and no ASCII control characters.

use std::fmt;
use crate::error::StoreError;

/// A validated, possibly empty (root) path into the document tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct KeyPath {
    segments: Vec<String>,
}

const FORBIDDEN: &[char] = &['.', '$', '#', '[', ']', '/'];

fn check_segment(segment: &str) -> Result<(), StoreError> {
    if segment.is_empty() {
        return Err(StoreError::InvalidPath("empty path segment".into()));
    }
    if let Some(bad) = segment
        .chars()
        .find(|c| FORBIDDEN.contains(c) || c.is_ascii_control())
    {
        return Err(StoreError::InvalidPath(format!(
            "segment {segment:?} contains forbidden character {bad:?}"
        )));
    }
    Ok(())
}

impl KeyPath {
    /// The root of the tree.
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse `a/b/c`. Leading and trailing slashes are ignored.
    pub fn parse(raw: &str) -> Result<Self, StoreError> {
        let trimmed = raw.trim_matches('/');
        if trimmed.is_empty() {
            return Ok(Self::root());
        }
        let mut path = Self::root();
        for segment in trimmed.split('/') {
            path = path.child(segment)?;
        }
        Ok(path)
    }

    /// Append one segment.
    pub fn child(&self, segment: &str) -> Result<Self, StoreError> {
        check_segment(segment)?;
        let mut segments = self.segments.clone();
        segments.push(segment.to_string());
        Ok(Self { segments })
    }

    /// Append every segment of `other`.
    pub fn join(&self, other: &KeyPath) -> Self {
        let mut segments = self.segments.clone();
        segments.extend(other.segments.iter().cloned());
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// The final segment, if any.
    pub fn key(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    pub fn parent(&self) -> Option<Self> {
        if self.segments.is_empty() {
            return None;
        }
        Some(Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// Whether `self` equals `other` or lies beneath it.
    pub fn starts_with(&self, other: &KeyPath) -> bool {
        self.segments.starts_with(&other.segments)
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display() {
        let path = KeyPath::parse("/users/u1/goals/").unwrap();
        assert_eq!(path.segments().len(), 3);
        assert_eq!(path.to_string(), "users/u1/goals");
        assert_eq!(path.key(), Some("goals"));
    }

    #[test]
    fn root_is_empty() {
        let root = KeyPath::parse("").unwrap();
        assert!(root.is_root());
        assert_eq!(root.to_string(), "");
        assert!(root.parent().is_none());
    }

    #[test]
    fn forbidden_characters_rejected() {
        let base = KeyPath::parse("users").unwrap();
        assert!(base.child("a.b").is_err());
        assert!(base.child("a$b").is_err());
        assert!(base.child("").is_err());
        assert!(base.child("line\nbreak").is_err());
        assert!(KeyPath::parse("users//goals").is_err());
    }

    #[test]
    fn prefix_relations() {
        let goals = KeyPath::parse("users/u1/goals").unwrap();
        let goal = goals.child("g1").unwrap();
        assert!(goal.starts_with(&goals));
        assert!(!goals.starts_with(&goal));
        assert_eq!(goal.parent().unwrap(), goals);
    }
}
