//! File system utility functions
//!
//! Provides the local side of downloads with proper error handling.

use crate::error::{DavError, Result};
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Utility struct for file system operations
#[derive(Debug)]
pub struct FileSystemUtils;

impl FileSystemUtils {
    /// Create a new file system utilities instance
    pub const fn new() -> Self {
        Self
    }

    /// Create a directory for a remote collection with mode 0755
    ///
    /// An existing directory is reused.
    #[instrument(skip(self))]
    pub fn create_collection_dir<P: AsRef<Path> + std::fmt::Debug>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        debug!("Creating directory: {}", path.display());

        let mut builder = fs::DirBuilder::new();
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(0o755);
        }

        match builder.create(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists && path.is_dir() => {
                debug!("Directory already exists: {}", path.display());
                Ok(())
            }
            Err(e) => Err(DavError::file_system("create directory", path, e)),
        }
    }

    /// Create directories recursively
    #[instrument(skip(self))]
    pub fn create_dir_all<P: AsRef<Path> + std::fmt::Debug>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        debug!("Creating directory tree: {}", path.display());
        fs::create_dir_all(path).map_err(|e| DavError::file_system("create directory", path, e))
    }

    /// Stream `reader` into a newly created file at `path`
    ///
    /// Returns the number of bytes written. A file whose copy fails is
    /// removed so no truncated download is left behind.
    #[instrument(skip(self, reader))]
    pub fn write_stream<P: AsRef<Path> + std::fmt::Debug>(
        &self,
        path: P,
        reader: &mut dyn Read,
    ) -> Result<u64> {
        let path = path.as_ref();
        debug!("Writing file: {}", path.display());

        let mut file =
            File::create(path).map_err(|e| DavError::file_system("create file", path, e))?;

        let copied = io::copy(reader, &mut file).and_then(|n| file.flush().map(|()| n));
        match copied {
            Ok(bytes) => {
                debug!("Wrote {} bytes", bytes);
                Ok(bytes)
            }
            Err(e) => {
                drop(file);
                if let Err(cleanup) = self.remove_file_if_exists(path) {
                    debug!("Could not remove partial file {}: {}", path.display(), cleanup);
                }
                Err(DavError::file_system("write file", path, e))
            }
        }
    }

    /// Remove a file if it exists
    #[instrument(skip(self))]
    pub fn remove_file_if_exists<P: AsRef<Path> + std::fmt::Debug>(
        &self,
        path: P,
    ) -> io::Result<bool> {
        let path = path.as_ref();

        match fs::remove_file(path) {
            Ok(()) => {
                debug!("Removed file: {}", path.display());
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("File does not exist: {}", path.display());
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// Join a server-derived name onto `dir`, refusing anything that is not
    /// a single plain path component
    pub fn child_path(&self, dir: &Path, name: &str) -> Result<PathBuf> {
        if is_safe_component(name) {
            Ok(dir.join(name))
        } else {
            Err(DavError::validation(format!("unsafe local name: {name:?}")))
        }
    }
}

impl Default for FileSystemUtils {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether `name` can be used as one local path component
pub fn is_safe_component(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
}
