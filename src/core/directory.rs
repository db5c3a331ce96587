//! # Directory Model
//!
//! An ordered snapshot of the working directory plus the pagination maths
//! derived from it. The listing is rebuilt every frame and owned by that
//! frame's render pass; nothing here is cached between frames.
//!
//! ```text
//! read_dir(".") ──► names ──► reject (too long / not UTF-8) ──► sort ──► cap
//!                                                                      │
//!                                        DirectoryListing ◄────────────┘
//! ```

use std::fmt;
use std::fs;
use std::path::Path;

use log::debug;
use thiserror::Error;

/// Longest entry name accepted, in bytes.
pub const MAX_NAME_BYTES: usize = 255;

/// Default cap on the number of entries kept in one listing.
pub const DEFAULT_MAX_ENTRIES: usize = 1024;

/// Terminal rows not available to list entries (borders, status bar, divider).
pub const RESERVED_ROWS: u16 = 6;

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("cannot read directory {path}: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Why a directory entry was left out of the listing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryRejection {
    #[error("name is {len} bytes long, limit is {MAX_NAME_BYTES}")]
    NameTooLong { len: usize },
    #[error("name is not valid UTF-8")]
    NotUtf8,
}

/// A directory entry name, guaranteed to fit within [`MAX_NAME_BYTES`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryName(String);

impl EntryName {
    pub fn new(name: impl Into<String>) -> Result<Self, EntryRejection> {
        let name = name.into();
        if name.len() > MAX_NAME_BYTES {
            return Err(EntryRejection::NameTooLong { len: name.len() });
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn is_dot_entry(&self) -> bool {
        self.0 == "." || self.0 == ".."
    }
}

impl fmt::Display for EntryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Entries of one directory in lexical order, `.` and `..` excluded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryListing {
    entries: Vec<EntryName>,
    rejected: usize,
    truncated: bool,
}

impl DirectoryListing {
    /// Builds a listing from plain names, applying the same rules as
    /// [`read_listing`].
    pub fn from_names<I, S>(names: I, max_entries: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::collect(names.into_iter().map(|name| Ok(name.into())), max_entries)
    }

    fn collect<I>(names: I, max_entries: usize) -> Self
    where
        I: IntoIterator<Item = Result<String, EntryRejection>>,
    {
        let mut entries = Vec::new();
        let mut rejected = 0;
        for name in names {
            match name.and_then(EntryName::new) {
                Ok(entry) if entry.is_dot_entry() => {}
                Ok(entry) => entries.push(entry),
                Err(reason) => {
                    debug!("Skipping directory entry: {reason}");
                    rejected += 1;
                }
            }
        }

        // Sort before capping so the kept subset is the same on every frame.
        entries.sort();
        let truncated = entries.len() > max_entries;
        if truncated {
            debug!(
                "Directory has {} entries, keeping the first {max_entries}",
                entries.len()
            );
            entries.truncate(max_entries);
        }

        Self {
            entries,
            rejected,
            truncated,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&EntryName> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[EntryName] {
        &self.entries
    }

    /// Number of entries left out because their names were rejected.
    pub fn rejected(&self) -> usize {
        self.rejected
    }

    /// Whether entries were dropped to respect the entry cap.
    pub fn truncated(&self) -> bool {
        self.truncated
    }

    pub fn health(&self) -> ListingHealth {
        ListingHealth {
            rejected: self.rejected,
            truncated: self.truncated,
        }
    }

    /// Entries visible on a 1-indexed page. Pages past the end are empty.
    pub fn page(&self, page: usize, page_size: usize) -> &[EntryName] {
        let start = page
            .saturating_sub(1)
            .saturating_mul(page_size)
            .min(self.entries.len());
        let end = start.saturating_add(page_size).min(self.entries.len());
        &self.entries[start..end]
    }
}

/// What a listing had to leave out. The listing is rebuilt every frame, so
/// callers compare this against the previous frame and only report changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListingHealth {
    pub rejected: usize,
    pub truncated: bool,
}

impl ListingHealth {
    pub fn is_degraded(self) -> bool {
        self.rejected > 0 || self.truncated
    }
}

/// Enumerates `dir`, keeping at most `max_entries` names.
pub fn read_listing(dir: &Path, max_entries: usize) -> Result<DirectoryListing, DirectoryError> {
    let reader = fs::read_dir(dir).map_err(|source| DirectoryError::Unreadable {
        path: dir.display().to_string(),
        source,
    })?;

    let names = reader.filter_map(|res| match res {
        Ok(entry) => Some(
            entry
                .file_name()
                .into_string()
                .map_err(|_| EntryRejection::NotUtf8),
        ),
        Err(err) => {
            debug!("Skipping unreadable entry in {}: {err}", dir.display());
            None
        }
    });

    let listing = DirectoryListing::collect(names, max_entries);
    debug!(
        "Listed {} entries in {} ({} rejected)",
        listing.len(),
        dir.display(),
        listing.rejected()
    );
    Ok(listing)
}

/// Entries per page for a terminal with `rows` rows (never below 1).
pub fn page_size(rows: u16) -> usize {
    usize::from(rows.saturating_sub(RESERVED_ROWS).max(1))
}

/// Number of pages for `total_entries` entries.
///
/// Always `total_entries / page_size + 1`, so an exact multiple of the page
/// size gets a trailing empty page.
pub fn page_count(total_entries: usize, page_size: usize) -> usize {
    total_entries / page_size.max(1) + 1
}
