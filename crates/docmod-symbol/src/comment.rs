//! Parsed documentation comments
//!
//! A [`Comment`] is free text plus an ordered list of [`CommentTag`]s. Tag
//! names may repeat; lookups and removals act on the first occurrence.

use serde::{Deserialize, Serialize};

/// Block tag inside a comment, e.g. `@module Utils`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentTag {
    /// Tag name without the leading `@`
    pub tag_name: String,

    /// Raw tag text, untrimmed
    pub text: String,
}

impl CommentTag {
    /// Create a tag
    #[inline]
    #[must_use]
    pub fn new(tag_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            text: text.into(),
        }
    }
}

/// Documentation comment attached to a symbol or signature
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Comment {
    /// Summary paragraph
    pub short_text: String,

    /// Remaining description
    pub text: String,

    /// Block tags in source order
    pub tags: Vec<CommentTag>,
}

impl Comment {
    /// Comment with a summary and nothing else
    #[inline]
    #[must_use]
    pub fn new(short_text: impl Into<String>) -> Self {
        Self {
            short_text: short_text.into(),
            ..Self::default()
        }
    }

    /// Set the long description
    #[inline]
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Append a tag
    #[inline]
    #[must_use]
    pub fn with_tag(mut self, tag_name: impl Into<String>, text: impl Into<String>) -> Self {
        self.tags.push(CommentTag::new(tag_name, text));
        self
    }

    /// First tag named `name`
    #[must_use]
    pub fn tag(&self, name: &str) -> Option<&CommentTag> {
        self.tags.iter().find(|t| t.tag_name == name)
    }

    /// Whether a tag named `name` is present
    #[inline]
    #[must_use]
    pub fn has_tag(&self, name: &str) -> bool {
        self.tag(name).is_some()
    }

    /// Remove the first tag named `name`, returning it
    pub fn remove_tag(&mut self, name: &str) -> Option<CommentTag> {
        let pos = self.tags.iter().position(|t| t.tag_name == name)?;
        Some(self.tags.remove(pos))
    }

    /// True if the comment carries descriptive text (tags alone do not count)
    #[must_use]
    pub fn has_description(&self) -> bool {
        !self.short_text.trim().is_empty() || !self.text.trim().is_empty()
    }
}
