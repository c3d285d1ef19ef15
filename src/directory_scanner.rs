// SPDX-License-Identifier: MPL-2.0
//! Directory scanner: lists the images of one folder, applies the active
//! name filter and sorts them in natural order (`img2` before `img10`).

use crate::application::port::DirectoryLister;
use crate::error::Result;
use crate::infrastructure::FsLister;
use crate::media;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

/// One listed image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageEntry {
    pub path: PathBuf,
    pub basename: String,
}

impl ImageEntry {
    fn from_path(path: PathBuf) -> Option<Self> {
        let basename = path.file_name()?.to_str()?.to_owned();
        Some(Self { path, basename })
    }

    /// File name without its last extension.
    #[must_use]
    pub fn stem(&self) -> &str {
        Path::new(&self.basename)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.basename)
    }
}

/// Which files of a folder are browsable.
///
/// Include and exclude substring lists are variants of one enum, so only
/// one of them can be active at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NameFilter {
    #[default]
    None,
    /// Keep files whose stem contains at least one of the substrings.
    Include(Vec<String>),
    /// Drop files whose stem contains any of the substrings.
    Exclude(Vec<String>),
    /// Drop files whose full name (with extension) is in the set.
    ExactExclude(HashSet<String>),
}

impl NameFilter {
    /// Builds an include filter; an empty or missing list means no filter.
    #[must_use]
    pub fn include(names: Option<Vec<String>>) -> Self {
        match names {
            Some(names) if !names.is_empty() => NameFilter::Include(names),
            _ => NameFilter::None,
        }
    }

    /// Builds an exclude filter; an empty or missing list means no filter.
    #[must_use]
    pub fn exclude(names: Option<Vec<String>>) -> Self {
        match names {
            Some(names) if !names.is_empty() => NameFilter::Exclude(names),
            _ => NameFilter::None,
        }
    }

    #[must_use]
    pub fn include_names(&self) -> Option<&[String]> {
        match self {
            NameFilter::Include(names) => Some(names),
            _ => None,
        }
    }

    #[must_use]
    pub fn exclude_names(&self) -> Option<&[String]> {
        match self {
            NameFilter::Exclude(names) => Some(names),
            _ => None,
        }
    }

    /// True when `entry` survives the filter.
    #[must_use]
    pub fn accepts(&self, entry: &ImageEntry) -> bool {
        match self {
            NameFilter::None => true,
            NameFilter::ExactExclude(names) => !names.contains(&entry.basename),
            NameFilter::Include(names) => {
                let stem = entry.stem();
                names.iter().any(|name| stem.contains(name.as_str()))
            }
            NameFilter::Exclude(names) => {
                let stem = entry.stem();
                !names.iter().any(|name| stem.contains(name.as_str()))
            }
        }
    }
}

impl fmt::Display for NameFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameFilter::None => write!(f, "none"),
            NameFilter::Include(names) => write!(f, "include [{}]", names.join(", ")),
            NameFilter::Exclude(names) => write!(f, "exclude [{}]", names.join(", ")),
            NameFilter::ExactExclude(names) => {
                let mut sorted: Vec<&str> = names.iter().map(String::as_str).collect();
                sorted.sort_unstable();
                write!(f, "exact-exclude [{}]", sorted.join(", "))
            }
        }
    }
}

/// Natural ordering: digit runs compare numerically, text runs
/// case-insensitively, and the raw strings break remaining ties so the
/// order is total.
#[must_use]
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    natord::compare_ignore_case(a, b).then_with(|| a.cmp(b))
}

/// Lists the browsable images of `folder` through `lister`.
///
/// # Errors
///
/// [`Error::NotFound`](crate::error::Error::NotFound) when the folder does
/// not exist. An existing folder without images yields an empty vector.
pub fn list_images(
    lister: &dyn DirectoryLister,
    folder: &Path,
    filter: &NameFilter,
) -> Result<Vec<ImageEntry>> {
    let mut entries: Vec<ImageEntry> = lister
        .list_dir(folder)?
        .into_iter()
        .filter(|path| media::is_supported_image(path))
        .filter_map(ImageEntry::from_path)
        .filter(|entry| filter.accepts(entry))
        .collect();

    entries.sort_by(|a, b| natural_cmp(&a.basename, &b.basename));
    log::debug!(
        "listed {} images in {} (filter: {filter})",
        entries.len(),
        folder.display()
    );
    Ok(entries)
}

/// [`list_images`] against the real filesystem.
pub fn scan_folder(folder: &Path, filter: &NameFilter) -> Result<Vec<ImageEntry>> {
    list_images(&FsLister, folder, filter)
}
