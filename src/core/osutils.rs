//! Filesystem primitives behind a narrow capability interface.
//!
//! Actions depend on `OsUtils` rather than touching `std::fs` directly, so
//! tests can substitute deterministic doubles for every filesystem effect.

use std::fs::File;
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use tar::Archive;

use crate::error::{Error, Result};

/// Path composition, text reading, and tarball extraction.
pub trait OsUtils: Send + Sync {
    fn joinpath(&self, base: &Path, name: &str) -> PathBuf;

    /// Absolute form of `path`, resolved against the current directory.
    fn abspath(&self, path: &Path) -> Result<PathBuf>;

    /// The directory containing `path` (empty path when there is none).
    fn dirname(&self, path: &Path) -> PathBuf;

    fn read_text(&self, path: &Path) -> Result<String>;

    /// Unpack a gzipped tarball into `dest`.
    fn extract_tarball(&self, archive: &Path, dest: &Path) -> Result<()>;
}

/// `OsUtils` over the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdOsUtils;

impl StdOsUtils {
    pub fn new() -> Self {
        Self
    }
}

impl OsUtils for StdOsUtils {
    fn joinpath(&self, base: &Path, name: &str) -> PathBuf {
        base.join(name)
    }

    fn abspath(&self, path: &Path) -> Result<PathBuf> {
        std::path::absolute(path).map_err(|e| {
            Error::internal_io(
                format!("Failed to resolve {}: {}", path.display(), e),
                Some("abspath".to_string()),
            )
        })
    }

    fn dirname(&self, path: &Path) -> PathBuf {
        path.parent().unwrap_or_else(|| Path::new("")).to_path_buf()
    }

    fn read_text(&self, path: &Path) -> Result<String> {
        std::fs::read_to_string(path).map_err(|e| {
            Error::internal_io(
                format!("Failed to read {}: {}", path.display(), e),
                Some("read text".to_string()),
            )
        })
    }

    fn extract_tarball(&self, archive: &Path, dest: &Path) -> Result<()> {
        let file = File::open(archive).map_err(|e| {
            Error::internal_io(
                format!("Failed to open {}: {}", archive.display(), e),
                Some("extract tarball".to_string()),
            )
        })?;

        Archive::new(GzDecoder::new(file))
            .unpack(dest)
            .map_err(|e| {
                Error::internal_io(
                    format!("Failed to extract {}: {}", archive.display(), e),
                    Some("extract tarball".to_string()),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    /// Build a small gzipped tarball containing `package/<name>` entries.
    fn write_tarball(path: &Path, files: &[(&str, &str)]) {
        let gz = flate2::write::GzEncoder::new(
            File::create(path).unwrap(),
            flate2::Compression::default(),
        );
        let mut builder = tar::Builder::new(gz);
        for (name, content) in files {
            let mut header = tar::Header::new_gnu();
            header.set_size(content.len() as u64);
            header.set_mode(0o644);
            header.set_cksum();
            builder
                .append_data(&mut header, name, content.as_bytes())
                .unwrap();
        }
        builder.into_inner().unwrap().finish().unwrap();
    }

    #[test]
    fn joinpath_composes() {
        let utils = StdOsUtils::new();
        let joined = utils.joinpath(Path::new("/scratch"), "package-1.0.0.tgz");
        assert_eq!(joined, PathBuf::from("/scratch/package-1.0.0.tgz"));
    }

    #[test]
    fn dirname_returns_parent() {
        let utils = StdOsUtils::new();
        assert_eq!(
            utils.dirname(Path::new("/proj/package.json")),
            PathBuf::from("/proj")
        );
    }

    #[test]
    fn abspath_resolves_relative_paths() {
        let utils = StdOsUtils::new();
        let abs = utils.abspath(Path::new("some/relative")).unwrap();
        assert!(abs.is_absolute());
    }

    #[test]
    fn read_text_returns_contents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("package.json");
        let mut f = File::create(&path).unwrap();
        write!(f, "{{\"name\": \"demo\"}}").unwrap();

        let utils = StdOsUtils::new();
        assert_eq!(utils.read_text(&path).unwrap(), "{\"name\": \"demo\"}");
    }

    #[test]
    fn read_text_error_names_the_path() {
        let utils = StdOsUtils::new();
        let err = utils.read_text(Path::new("/nonexistent/package.json")).unwrap_err();
        assert!(err.message.contains("/nonexistent/package.json"));
    }

    #[test]
    fn extract_tarball_unpacks_file_tree() {
        let dir = tempdir().unwrap();
        let archive = dir.path().join("package-0.1.0.tgz");
        write_tarball(
            &archive,
            &[
                ("package/package.json", "{\"name\": \"demo\"}"),
                ("package/index.js", "module.exports = 1;\n"),
            ],
        );

        let dest = dir.path().join("artifacts");
        std::fs::create_dir(&dest).unwrap();

        let utils = StdOsUtils::new();
        utils.extract_tarball(&archive, &dest).unwrap();

        assert!(dest.join("package/package.json").is_file());
        let index = std::fs::read_to_string(dest.join("package/index.js")).unwrap();
        assert_eq!(index, "module.exports = 1;\n");
    }

    #[test]
    fn extract_tarball_fails_on_corrupt_archive() {
        let dir = tempdir().unwrap();
        let archive = dir.path().join("broken.tgz");
        std::fs::write(&archive, b"this is not a tarball").unwrap();

        let utils = StdOsUtils::new();
        let err = utils.extract_tarball(&archive, dir.path()).unwrap_err();
        assert!(err.message.contains("broken.tgz"));
    }
}
