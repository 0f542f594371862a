//! Image references
//!
//! An image option names a file either absolutely or relative to the user
//! data dir. Only files whose content sniffs as a known image format resolve.

use std::fs::File;
use std::io::Read;
use std::path::{Component, Path, PathBuf};

use image::ImageFormat;

/// A resolved, readable image file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    pub path: PathBuf,
    pub format: ImageFormat,
}

/// Bytes read to sniff the format.
const HEADER_LEN: usize = 32;

impl ImageRef {
    /// Resolve `file` against `user_data_dir` and sniff its format.
    pub fn resolve(file: &str, user_data_dir: &Path) -> Option<Self> {
        let file = file.trim();
        if file.is_empty() {
            return None;
        }

        let path = normalize(&user_data_dir.join(file));
        if !path.is_file() {
            return None;
        }

        let mut header = [0u8; HEADER_LEN];
        let read = File::open(&path).ok()?.read(&mut header).ok()?;
        let format = image::guess_format(&header[..read]).ok()?;

        Some(Self { path, format })
    }

    /// Lowercase extension commonly used for this format.
    pub fn format_name(&self) -> &'static str {
        self.format.extensions_str().first().copied().unwrap_or("unknown")
    }
}

/// Lexically resolve `.` and `..` without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

    #[test]
    fn test_relative_to_user_data_dir() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("back.png"), PNG_MAGIC).unwrap();

        let image = ImageRef::resolve("back.png", dir.path()).unwrap();
        assert_eq!(image.format, ImageFormat::Png);
        assert_eq!(image.path, dir.path().join("back.png"));
        assert_eq!(image.format_name(), "png");
    }

    #[test]
    fn test_absolute_path() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("abs.png");
        fs::write(&file, PNG_MAGIC).unwrap();

        let elsewhere = TempDir::new().unwrap();
        let image = ImageRef::resolve(file.to_str().unwrap(), elsewhere.path()).unwrap();
        assert_eq!(image.path, file);
    }

    #[test]
    fn test_dot_segments_normalized() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("images")).unwrap();
        fs::write(dir.path().join("back.png"), PNG_MAGIC).unwrap();

        let image = ImageRef::resolve("./images/../back.png", dir.path()).unwrap();
        assert_eq!(image.path, dir.path().join("back.png"));
    }

    #[test]
    fn test_non_image_is_absent() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("fake.png"), "not an image").unwrap();
        assert!(ImageRef::resolve("fake.png", dir.path()).is_none());
    }

    #[test]
    fn test_missing_and_directory_are_absent() {
        let dir = TempDir::new().unwrap();
        assert!(ImageRef::resolve("missing.png", dir.path()).is_none());
        assert!(ImageRef::resolve(".", dir.path()).is_none());
        assert!(ImageRef::resolve("", dir.path()).is_none());
    }
}
