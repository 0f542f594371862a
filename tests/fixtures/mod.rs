//! Shared fixtures for integration tests
//!
//! `shared/` plays the role of the installed shared data dir. Each test gets
//! a fresh user data dir seeded from `user/`, so it can add `build/`
//! overrides or images without touching the checked-in files.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rime_switcher::{ConfigStore, FileDocumentStore, Settings};
use tempfile::TempDir;

/// Path to the shared data fixture
pub fn shared_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/shared")
}

/// Path to the user data seed
pub fn user_seed_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/user")
}

/// A temporary user data dir plus the shared fixture dir.
pub struct Fixture {
    pub user: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        let user = TempDir::new().expect("create user data dir");
        for entry in fs::read_dir(user_seed_dir()).expect("read user seed") {
            let entry = entry.expect("user seed entry");
            fs::copy(entry.path(), user.path().join(entry.file_name())).expect("copy user seed");
        }
        Self { user }
    }

    pub fn settings(&self) -> Settings {
        Settings::with_dirs(self.user.path(), shared_dir())
    }

    /// A closed store over the fixture dirs.
    pub fn store(&self) -> ConfigStore {
        let documents = FileDocumentStore::new(self.user.path(), shared_dir());
        ConfigStore::new(Arc::new(documents), self.settings())
    }

    /// Write a file under the user data dir, creating parents.
    pub fn write_user(&self, relative: &str, contents: impl AsRef<[u8]>) -> PathBuf {
        let path = self.user.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent");
        }
        fs::write(&path, contents).expect("write user file");
        path
    }
}

/// Minimal PNG header, enough for format sniffing.
pub const PNG_HEADER: &[u8] = &[
    0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d, b'I', b'H', b'D', b'R',
];
