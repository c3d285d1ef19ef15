// SPDX-License-Identifier: MPL-2.0
//! Filesystem adapters for the media ports.

use crate::application::port::{DirectoryLister, ImageLoader};
use crate::error::{Error, Result};
use crate::media::{self, ImageData};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Decodes images from disk with the `image` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsImageLoader;

impl ImageLoader for FsImageLoader {
    fn load(&self, path: &Path) -> Result<ImageData> {
        media::load_image(path)
    }
}

/// Lists folders with `std::fs::read_dir`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsLister;

impl DirectoryLister for FsLister {
    fn list_dir(&self, folder: &Path) -> Result<Vec<PathBuf>> {
        let entries = fs::read_dir(folder).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => Error::NotFound(folder.to_path_buf()),
            _ => Error::from(err),
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.is_file() {
                files.push(path);
            }
        }
        Ok(files)
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn file_size(&self, path: &Path) -> Option<u64> {
        fs::metadata(path).ok().map(|meta| meta.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::create_test_image;
    use tempfile::tempdir;

    #[test]
    fn list_dir_skips_subdirectories() {
        let temp_dir = tempdir().expect("temp dir");
        create_test_image(temp_dir.path(), "a.png", 2, 2);
        fs::create_dir(temp_dir.path().join("nested.png")).expect("mkdir");

        let files = FsLister.list_dir(temp_dir.path()).expect("list");
        assert_eq!(files, vec![temp_dir.path().join("a.png")]);
    }

    #[test]
    fn list_missing_dir_is_not_found() {
        let temp_dir = tempdir().expect("temp dir");
        let missing = temp_dir.path().join("missing");
        let err = FsLister.list_dir(&missing).expect_err("missing dir");
        assert_eq!(err, Error::NotFound(missing));
    }

    #[test]
    fn file_size_reports_bytes() {
        let temp_dir = tempdir().expect("temp dir");
        let path = temp_dir.path().join("blob.bin");
        fs::write(&path, [0u8; 10]).expect("write");
        assert_eq!(FsLister.file_size(&path), Some(10));
        assert_eq!(FsLister.file_size(&temp_dir.path().join("none")), None);
    }

    #[test]
    fn loader_decodes_png() {
        let temp_dir = tempdir().expect("temp dir");
        let path = create_test_image(temp_dir.path(), "a.png", 3, 5);
        let image = FsImageLoader.load(&path).expect("decode");
        assert_eq!((image.width, image.height), (3, 5));
    }
}
