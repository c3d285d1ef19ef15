// SPDX-License-Identifier: MPL-2.0
//! Image loading and directory listing ports.
//!
//! The browse model never touches the filesystem directly: listing goes through
//! [`DirectoryLister`] and decoding through [`ImageLoader`]. The filesystem
//! adapters live in [`crate::infrastructure`]; tests substitute in-memory ones.

use crate::error::Result;
use crate::media::ImageData;
use std::path::{Path, PathBuf};

/// Port for decoding image files.
///
/// # Example
///
/// ```ignore
/// use handy_lens::application::port::ImageLoader;
/// use std::path::Path;
///
/// fn describe(loader: &impl ImageLoader, path: &Path) {
///     match loader.load(path) {
///         Ok(image) => println!("{}x{}", image.width, image.height),
///         Err(e) => log::warn!("failed to load: {e}"),
///     }
/// }
/// ```
pub trait ImageLoader: Send + Sync {
    /// Decodes the file at `path`.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`](crate::error::Error::NotFound) when the file
    /// vanished, [`Error::Decode`](crate::error::Error::Decode) or
    /// [`Error::UnsupportedFormat`](crate::error::Error::UnsupportedFormat)
    /// when it cannot be decoded.
    fn load(&self, path: &Path) -> Result<ImageData>;
}

/// Port for enumerating folder contents.
pub trait DirectoryLister: Send + Sync {
    /// Returns the regular files directly inside `folder`, in any order.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`](crate::error::Error::NotFound) when `folder`
    /// does not exist.
    fn list_dir(&self, folder: &Path) -> Result<Vec<PathBuf>>;

    /// True when `path` names an existing directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Size in bytes of the file at `path`, if known.
    fn file_size(&self, path: &Path) -> Option<u64>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::collections::BTreeMap;

    struct MapLister(BTreeMap<PathBuf, Vec<PathBuf>>);

    impl DirectoryLister for MapLister {
        fn list_dir(&self, folder: &Path) -> Result<Vec<PathBuf>> {
            self.0
                .get(folder)
                .cloned()
                .ok_or_else(|| Error::NotFound(folder.to_path_buf()))
        }

        fn is_dir(&self, path: &Path) -> bool {
            self.0.contains_key(path)
        }

        fn file_size(&self, _path: &Path) -> Option<u64> {
            None
        }
    }

    #[test]
    fn lister_is_object_safe() {
        let mut map = BTreeMap::new();
        map.insert(PathBuf::from("/d"), vec![PathBuf::from("/d/a.png")]);
        let lister: Box<dyn DirectoryLister> = Box::new(MapLister(map));

        assert!(lister.is_dir(Path::new("/d")));
        assert_eq!(lister.list_dir(Path::new("/d")).expect("list").len(), 1);
        assert!(lister.list_dir(Path::new("/x")).is_err());
    }
}
