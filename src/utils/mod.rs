// mediafile/src/utils/mod.rs
use crate::core::Result;
use chrono::{DateTime, Local};
use filetime::FileTime;
use std::fs::Metadata;
use std::path::Path;

/// True for an existing regular file (symlinks are followed). The empty path
/// is never a file.
pub fn is_regular_file(path: &Path) -> bool {
    !path.as_os_str().is_empty() && path.is_file()
}

pub fn modification_time(metadata: &Metadata) -> Option<DateTime<Local>> {
    metadata.modified().ok().map(DateTime::<Local>::from)
}

/// Byte-for-byte copy that keeps the source's access and modification times.
pub fn copy_preserving_times(source: &Path, destination: &Path) -> Result<u64> {
    let bytes = std::fs::copy(source, destination)?;
    preserve_times(source, destination)?;
    log::debug!(
        "Copied {} bytes from {} to {}",
        bytes,
        source.display(),
        destination.display()
    );
    Ok(bytes)
}

/// Gives `destination` the permissions plus access and modification times
/// of `source`.
pub fn preserve_times(source: &Path, destination: &Path) -> Result<()> {
    let metadata = std::fs::metadata(source)?;
    std::fs::set_permissions(destination, metadata.permissions())?;
    let accessed = FileTime::from_last_access_time(&metadata);
    let modified = FileTime::from_last_modification_time(&metadata);
    filetime::set_file_times(destination, accessed, modified)?;
    Ok(())
}

/// Whether both paths name the same file on disk (same device and inode, so
/// hard links and symlinks count). A path that does not exist yet is never
/// the same file.
pub fn is_same_file(a: &Path, b: &Path) -> bool {
    same_file::is_same_file(a, b).unwrap_or(false)
}

pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let base = 1024_f64;
    let bytes_f64 = bytes as f64;
    let exponent = ((bytes_f64.log10() / base.log10()).floor() as usize).min(UNITS.len() - 1);
    let size = bytes_f64 / base.powi(exponent as i32);

    format!("{:.2} {}", size, UNITS[exponent])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, SystemTime};

    #[test]
    fn empty_path_is_not_a_file() {
        assert!(!is_regular_file(Path::new("")));
        assert!(!is_regular_file(Path::new("/definitely/not/here.jpg")));
    }

    #[test]
    fn directory_is_not_a_regular_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!is_regular_file(dir.path()));
    }

    #[test]
    fn copy_keeps_modification_time() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("a.jpg");
        let destination = dir.path().join("b.jpg");
        std::fs::write(&source, b"payload").unwrap();

        let past = FileTime::from_system_time(SystemTime::now() - Duration::from_secs(86_400 * 30));
        filetime::set_file_mtime(&source, past).unwrap();

        assert_eq!(copy_preserving_times(&source, &destination).unwrap(), 7);
        let copied = std::fs::metadata(&destination).unwrap();
        assert_eq!(FileTime::from_last_modification_time(&copied), past);
        assert_eq!(std::fs::read(&destination).unwrap(), b"payload");
    }

    #[test]
    fn same_file_detection() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("a.jpg");
        std::fs::write(&source, b"x").unwrap();

        let dotted = dir.path().join(".").join("a.jpg");
        assert!(is_same_file(&source, &dotted));
        assert!(!is_same_file(&source, &dir.path().join("missing.jpg")));
    }

    #[test]
    fn hard_link_is_the_same_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("a.jpg");
        let linked = dir.path().join("b.jpg");
        std::fs::write(&source, b"x").unwrap();
        std::fs::hard_link(&source, &linked).unwrap();

        assert!(is_same_file(&source, &linked));
    }

    #[test]
    fn formats_sizes() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(1536), "1.50 KB");
    }
}
