// mediafile/src/file/generic.rs
use crate::utils::{is_regular_file, modification_time};
use chrono::{DateTime, Local, SecondsFormat};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
struct FileInfo {
    path: PathBuf,
    name: String,
    extension: String,
    modified: DateTime<Local>,
}

/// Any regular file on disk. Either every field is known or none is: a path
/// that does not name an existing regular file yields an invalid handle, not
/// an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenericFile {
    info: Option<FileInfo>,
}

impl GenericFile {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            info: FileInfo::resolve(path.as_ref()),
        }
    }

    pub fn from_optional<P: AsRef<Path>>(path: Option<P>) -> Self {
        path.map(Self::new).unwrap_or_default()
    }

    pub fn is_valid(&self) -> bool {
        self.info.is_some()
    }

    pub fn is_invalid(&self) -> bool {
        self.info.is_none()
    }

    pub fn path(&self) -> Option<&Path> {
        self.info.as_ref().map(|i| i.path.as_path())
    }

    pub fn name(&self) -> Option<&str> {
        self.info.as_ref().map(|i| i.name.as_str())
    }

    /// Suffix without the dot, as written on disk. Empty for a valid file
    /// that has no suffix.
    pub fn extension(&self) -> Option<&str> {
        self.info.as_ref().map(|i| i.extension.as_str())
    }

    pub fn modification_date(&self) -> Option<DateTime<Local>> {
        self.info.as_ref().map(|i| i.modified)
    }

    /// RFC 3339 timestamp of the modification date, `None` when invalid.
    pub fn modification_date_iso(&self) -> Option<String> {
        self.modification_date()
            .map(|d| d.to_rfc3339_opts(SecondsFormat::Micros, false))
    }

    pub fn clear(&mut self) {
        self.info = None;
    }
}

impl FileInfo {
    fn resolve(path: &Path) -> Option<Self> {
        if !is_regular_file(path) {
            log::debug!("Not a regular file: {}", path.display());
            return None;
        }

        let metadata = match std::fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(e) => {
                log::debug!("Failed to stat {}: {}", path.display(), e);
                return None;
            }
        };

        let name = path.file_name()?.to_string_lossy().into_owned();
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned())
            .unwrap_or_default();

        Some(Self {
            path: path.to_path_buf(),
            name,
            extension,
            modified: modification_time(&metadata)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_path_is_invalid() {
        let file = GenericFile::new("/no/such/file.txt");
        assert!(file.is_invalid());
        assert!(file.path().is_none());
        assert!(file.name().is_none());
        assert!(file.extension().is_none());
        assert!(file.modification_date().is_none());
        assert!(file.modification_date_iso().is_none());
    }

    #[test]
    fn empty_and_absent_paths_are_invalid() {
        assert!(GenericFile::new("").is_invalid());
        assert!(GenericFile::from_optional(None::<&str>).is_invalid());
    }

    #[test]
    fn existing_file_resolves_all_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Notes.TXT");
        std::fs::write(&path, b"hello").unwrap();

        let file = GenericFile::new(&path);
        assert!(file.is_valid());
        assert_eq!(file.path(), Some(path.as_path()));
        assert_eq!(file.name(), Some("Notes.TXT"));
        assert_eq!(file.extension(), Some("TXT"));
        assert!(file.modification_date().is_some());

        let iso = file.modification_date_iso().unwrap();
        assert!(DateTime::parse_from_rfc3339(&iso).is_ok());
    }

    #[test]
    fn file_without_suffix_has_empty_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("README");
        std::fs::write(&path, b"").unwrap();

        assert_eq!(GenericFile::new(&path).extension(), Some(""));
    }

    #[test]
    fn directories_are_invalid() {
        let dir = tempfile::tempdir().unwrap();
        assert!(GenericFile::new(dir.path()).is_invalid());
    }

    #[test]
    fn clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        std::fs::write(&path, b"a").unwrap();

        let mut file = GenericFile::new(&path);
        file.clear();
        assert_eq!(file, GenericFile::default());
        file.clear();
        assert!(file.is_invalid());
    }
}
