//! Font styles and the deduplicating style cache.
//!
//! This module provides the types describing how a run of text is drawn:
//!
//! - [`FontAttributes`]: bitflags for bold and italic
//! - [`Style`]: immutable `{family, size, attributes}` value
//! - [`StyleEdit`]: builder producing a new [`Style`] from an existing one
//! - [`StyleCache`]: structural deduplication so identical styles share one
//!   handle (and therefore one backend font object)
//!
//! Styles are never mutated. Editing goes through [`Style::edit`], which
//! yields a new value to be interned into the cache.
//!
//! # Examples
//!
//! ```
//! use reflow::{Style, StyleCache};
//!
//! let mut cache = StyleCache::new();
//! let body = cache.intern(Style::new("courier new", 17));
//! let emphasis = cache.intern(body.edit().size(20).italic(true).build());
//!
//! // The original is untouched and duplicates share a handle.
//! assert_eq!(body.size, 17);
//! assert!(!body.is_italic());
//! assert!(emphasis.is_italic());
//! let again = cache.intern(Style::new("courier new", 17));
//! assert!(std::sync::Arc::ptr_eq(&body, &again));
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use bitflags::bitflags;

bitflags! {
    /// Font rendering attributes.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
    pub struct FontAttributes: u8 {
        /// Bold weight.
        const BOLD   = 0x01;
        /// Italic slant.
        const ITALIC = 0x02;
    }
}

/// Immutable font style: family, point size, and attributes.
///
/// Equality and hashing are structural, which is what [`StyleCache`] keys on.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Style {
    /// Font family name, as understood by the rendering backend.
    pub family: String,
    /// Point size in backend units.
    pub size: u16,
    /// Bold/italic attributes.
    pub attributes: FontAttributes,
}

impl Style {
    /// Create a regular (non-bold, non-italic) style.
    #[must_use]
    pub fn new(family: impl Into<String>, size: u16) -> Self {
        Self {
            family: family.into(),
            size,
            attributes: FontAttributes::empty(),
        }
    }

    /// Return a copy with bold set.
    #[must_use]
    pub fn with_bold(mut self) -> Self {
        self.attributes |= FontAttributes::BOLD;
        self
    }

    /// Return a copy with italic set.
    #[must_use]
    pub fn with_italic(mut self) -> Self {
        self.attributes |= FontAttributes::ITALIC;
        self
    }

    /// Whether the bold attribute is set.
    #[must_use]
    pub fn is_bold(&self) -> bool {
        self.attributes.contains(FontAttributes::BOLD)
    }

    /// Whether the italic attribute is set.
    #[must_use]
    pub fn is_italic(&self) -> bool {
        self.attributes.contains(FontAttributes::ITALIC)
    }

    /// Start an edit based on this style. The original is left untouched.
    #[must_use]
    pub fn edit(&self) -> StyleEdit {
        StyleEdit {
            style: self.clone(),
        }
    }
}

/// Builder for deriving a new [`Style`] from an existing one.
#[derive(Clone, Debug)]
pub struct StyleEdit {
    style: Style,
}

impl StyleEdit {
    /// Replace the font family.
    #[must_use]
    pub fn family(mut self, family: impl Into<String>) -> Self {
        self.style.family = family.into();
        self
    }

    /// Replace the point size.
    #[must_use]
    pub fn size(mut self, size: u16) -> Self {
        self.style.size = size;
        self
    }

    /// Set or clear bold.
    #[must_use]
    pub fn bold(mut self, bold: bool) -> Self {
        self.style.attributes.set(FontAttributes::BOLD, bold);
        self
    }

    /// Set or clear italic.
    #[must_use]
    pub fn italic(mut self, italic: bool) -> Self {
        self.style.attributes.set(FontAttributes::ITALIC, italic);
        self
    }

    /// Finish the edit.
    #[must_use]
    pub fn build(self) -> Style {
        self.style
    }
}

/// Structural-key style cache.
///
/// Interning returns a shared `Arc<Style>` handle; structurally identical
/// styles always yield the same handle, so a rendering backend keyed on
/// handle identity creates one font object per distinct style. Entries live
/// for the cache's lifetime (typically the process).
#[derive(Debug, Default)]
pub struct StyleCache {
    entries: HashMap<Style, Arc<Style>>,
}

impl StyleCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the shared handle for `style`, inserting it if new.
    pub fn intern(&mut self, style: Style) -> Arc<Style> {
        if let Some(handle) = self.entries.get(&style) {
            return Arc::clone(handle);
        }
        let handle = Arc::new(style.clone());
        self.entries.insert(style, Arc::clone(&handle));
        handle
    }

    /// Number of distinct styles interned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
