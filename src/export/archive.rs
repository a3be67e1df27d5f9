//! Zip archive assembly.
//!
//! Entries are kept in insertion order and written with a fixed timestamp
//! and fixed permissions, so the same entries always serialize to the same
//! bytes. Directory entries are emitted before the first file they contain.

use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipArchive, ZipWriter};

use crate::error::{AssetError, Result};
use crate::render::RasterArtifact;
use crate::types::Platform;

const FILE_MODE: u32 = 0o644;
const DIR_MODE: u32 = 0o755;

#[derive(Debug, Clone)]
enum Entry {
    Directory(String),
    File { path: String, bytes: Vec<u8> },
}

impl Entry {
    fn path(&self) -> &str {
        match self {
            Entry::Directory(path) => path,
            Entry::File { path, .. } => path,
        }
    }
}

/// Collects files and folders for one archive.
#[derive(Debug, Clone)]
pub struct ArchiveBuilder {
    name: String,
    entries: Vec<Entry>,
}

impl ArchiveBuilder {
    /// Start an empty archive that will be called `name` (e.g. `app-icons.zip`).
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    /// Start an archive with the `ios/` and `android/` top-level folders.
    pub fn with_platform_folders(name: impl Into<String>) -> Self {
        let mut builder = Self::new(name);
        builder.add_directory(Platform::Ios.dir());
        builder.add_directory(Platform::Android.dir());
        builder
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a folder (and any missing parents). Adding it twice is a no-op.
    pub fn add_directory(&mut self, path: &str) {
        let trimmed = path.trim_matches('/');
        if trimmed.is_empty() {
            return;
        }

        let mut prefix = String::new();
        for segment in trimmed.split('/') {
            prefix.push_str(segment);
            prefix.push('/');
            if !self.contains(&prefix) {
                self.entries.push(Entry::Directory(prefix.clone()));
            }
        }
    }

    /// Add a file. Parent folders are created first; an existing file at the
    /// same path has its bytes replaced in place.
    pub fn add_file(&mut self, path: &str, bytes: Vec<u8>) {
        let path = path.trim_start_matches('/').to_string();
        if let Some((parent, _)) = path.rsplit_once('/') {
            self.add_directory(parent);
        }

        for entry in &mut self.entries {
            if let Entry::File { path: existing, bytes: old } = entry {
                if *existing == path {
                    *old = bytes;
                    return;
                }
            }
        }

        self.entries.push(Entry::File { path, bytes });
    }

    /// Add a rendered artifact under its own path.
    pub fn add_artifact(&mut self, artifact: RasterArtifact) {
        self.add_file(&artifact.path, artifact.png);
    }

    pub fn add_artifacts(&mut self, artifacts: impl IntoIterator<Item = RasterArtifact>) {
        for artifact in artifacts {
            self.add_artifact(artifact);
        }
    }

    /// Nest a finished archive as a file named after it.
    pub fn add_archive(&mut self, archive: Archive) {
        self.add_file(&archive.name, archive.bytes);
    }

    fn contains(&self, path: &str) -> bool {
        self.entries.iter().any(|e| e.path() == path)
    }

    /// Number of file entries (directories excluded).
    pub fn file_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e, Entry::File { .. }))
            .count()
    }

    /// All entry paths in write order; directories end in `/`.
    pub fn paths(&self) -> Vec<&str> {
        self.entries.iter().map(Entry::path).collect()
    }

    /// Serialize to zip bytes.
    pub fn finish(self) -> Result<Archive> {
        let name = self.name;
        let failed = |message: String| AssetError::Archive {
            name: name.clone(),
            message,
        };

        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

        for entry in &self.entries {
            match entry {
                Entry::Directory(path) => {
                    writer
                        .add_directory(path.as_str(), entry_options(DIR_MODE))
                        .map_err(|e| failed(format!("{}: {}", path, e)))?;
                }
                Entry::File { path, bytes } => {
                    writer
                        .start_file(path.as_str(), entry_options(FILE_MODE))
                        .map_err(|e| failed(format!("{}: {}", path, e)))?;
                    writer
                        .write_all(bytes)
                        .map_err(|e| failed(format!("{}: {}", path, e)))?;
                }
            }
        }

        let bytes = writer
            .finish()
            .map_err(|e| failed(e.to_string()))?
            .into_inner();

        info!(archive = %name, entries = self.entries.len(), bytes = bytes.len(), "Built archive");

        Ok(Archive { name, bytes })
    }
}

/// Deflate, 1980-01-01 00:00:00, fixed mode.
fn entry_options(mode: u32) -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default())
        .unix_permissions(mode)
}

/// A serialized zip archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Archive {
    /// File name, e.g. `store-graphics.zip`.
    pub name: String,
    pub bytes: Vec<u8>,
}

impl Archive {
    /// Entry names in archive order, directories included.
    pub fn entry_names(&self) -> Result<Vec<String>> {
        let zip = self.open()?;
        Ok((0..zip.len())
            .filter_map(|i| zip.name_for_index(i).map(str::to_string))
            .collect())
    }

    /// Read one file out of the archive.
    pub fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let mut zip = self.open()?;
        let mut file = zip.by_name(path).map_err(|e| AssetError::Archive {
            name: self.name.clone(),
            message: format!("{}: {}", path, e),
        })?;

        let mut bytes = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut bytes)?;
        Ok(bytes)
    }

    /// Write the archive into `dir` under its own name.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir).map_err(|e| AssetError::Io {
            path: dir.to_path_buf(),
            message: format!("Failed to create output directory: {}", e),
        })?;

        let path = dir.join(&self.name);
        std::fs::write(&path, &self.bytes).map_err(|e| AssetError::Io {
            path: path.clone(),
            message: format!("Failed to write archive: {}", e),
        })?;

        debug!(path = %path.display(), bytes = self.bytes.len(), "Wrote archive");
        Ok(path)
    }

    fn open(&self) -> Result<ZipArchive<Cursor<&[u8]>>> {
        ZipArchive::new(Cursor::new(self.bytes.as_slice())).map_err(|e| AssetError::Archive {
            name: self.name.clone(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_directories_precede_files() {
        let mut builder = ArchiveBuilder::with_platform_folders("store-graphics.zip");
        builder.add_file("ios/ios-pro/screenshot-1.png", vec![1]);
        builder.add_file("android/android-mobile/screenshot-1.png", vec![2]);

        let archive = builder.finish().unwrap();
        insta::assert_debug_snapshot!(archive.entry_names().unwrap(), @r###"
        [
            "ios/",
            "android/",
            "ios/ios-pro/",
            "ios/ios-pro/screenshot-1.png",
            "android/android-mobile/",
            "android/android-mobile/screenshot-1.png",
        ]
        "###);
    }

    #[test]
    fn test_empty_platform_folders_are_kept() {
        let archive = ArchiveBuilder::with_platform_folders("x.zip").finish().unwrap();
        assert_eq!(archive.entry_names().unwrap(), vec!["ios/", "android/"]);
    }

    #[test]
    fn test_readding_replaces_in_place() {
        let mut builder = ArchiveBuilder::new("x.zip");
        builder.add_file("a.png", vec![1]);
        builder.add_file("b.png", vec![2]);
        builder.add_file("a.png", vec![3]);

        assert_eq!(builder.file_count(), 2);
        assert_eq!(builder.paths(), vec!["a.png", "b.png"]);

        let archive = builder.finish().unwrap();
        assert_eq!(archive.read_file("a.png").unwrap(), vec![3]);
    }

    #[test]
    fn test_serialization_is_deterministic() {
        let build = || {
            let mut builder = ArchiveBuilder::with_platform_folders("x.zip");
            builder.add_file("ios/icon_16x16.png", vec![7; 300]);
            builder.add_file("android/icon_512x512.png", vec![9; 300]);
            builder.finish().unwrap()
        };

        assert_eq!(build().bytes, build().bytes);
    }

    #[test]
    fn test_nested_archive_round_trip() {
        let mut inner = ArchiveBuilder::new("app-icons.zip");
        inner.add_file("ios/icon_16x16.png", vec![1, 2, 3]);
        let inner = inner.finish().unwrap();

        let mut outer = ArchiveBuilder::new("all-assets.zip");
        outer.add_archive(inner.clone());
        let outer = outer.finish().unwrap();

        assert_eq!(outer.entry_names().unwrap(), vec!["app-icons.zip"]);
        assert_eq!(outer.read_file("app-icons.zip").unwrap(), inner.bytes);
    }

    #[test]
    fn test_missing_entry_is_an_archive_error() {
        let archive = ArchiveBuilder::new("x.zip").finish().unwrap();
        let err = archive.read_file("nope.png").unwrap_err();
        assert!(matches!(err, AssetError::Archive { .. }));
    }

    #[test]
    fn test_write_to_dir() {
        let dir = tempfile::tempdir().unwrap();
        let archive = ArchiveBuilder::new("x.zip").finish().unwrap();

        let path = archive.write_to(&dir.path().join("dist")).unwrap();

        assert_eq!(path, dir.path().join("dist/x.zip"));
        assert_eq!(std::fs::read(&path).unwrap(), archive.bytes);
    }
}
