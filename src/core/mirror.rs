//! Recursive download of a collection tree
//!
//! Walks collections depth-first, creating one local directory per remote
//! collection and streaming every file into the directory of its parent.

use crate::{
    core::{
        client::RemoteSource,
        resolver::{self, Entry, NameFallback},
    },
    error::Result,
    utils::fs::FileSystemUtils,
};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Totals for one recursive download
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MirrorSummary {
    /// Local directories created or reused
    pub directories: usize,
    /// Files downloaded
    pub files: usize,
    /// Bytes written across all files
    pub bytes: u64,
    /// Entries that failed and were skipped
    pub skipped: usize,
}

/// Mirrors a remote collection into a local directory
pub struct Mirror<'a, S: RemoteSource + ?Sized> {
    source: &'a S,
    fs_utils: FileSystemUtils,
}

impl<'a, S: RemoteSource + ?Sized> Mirror<'a, S> {
    /// Create a new mirror over `source`
    pub const fn new(source: &'a S) -> Self {
        Self {
            source,
            fs_utils: FileSystemUtils::new(),
        }
    }

    /// Mirror the collection at `url` into `dest`
    ///
    /// Failure to list the root collection is returned before anything is
    /// written. Failures below the root are logged and the entry skipped.
    #[instrument(skip_all, fields(url = %url, dest = %dest.display()))]
    pub fn run(&self, url: &Url, dest: &Path) -> Result<MirrorSummary> {
        let entries = self.children(url)?;

        self.fs_utils.create_dir_all(dest)?;

        let mut summary = MirrorSummary::default();
        let mut visited = HashSet::from([resolver::normalized_path(url)]);
        self.mirror_entries(&entries, dest, &mut visited, &mut summary);

        info!(
            "Mirror complete: {} directories, {} files ({} bytes), {} skipped",
            summary.directories, summary.files, summary.bytes, summary.skipped
        );
        Ok(summary)
    }

    fn children(&self, url: &Url) -> Result<Vec<Entry>> {
        let multistatus = self.source.list(url)?;
        Ok(resolver::children(url, &multistatus, NameFallback::Basename))
    }

    fn mirror_entries(
        &self,
        entries: &[Entry],
        dest: &Path,
        visited: &mut HashSet<String>,
        summary: &mut MirrorSummary,
    ) {
        for entry in entries {
            if entry.is_collection {
                self.mirror_collection(entry, dest, visited, summary);
            } else {
                self.download_file(entry, dest, summary);
            }
        }
    }

    fn mirror_collection(
        &self,
        entry: &Entry,
        dest: &Path,
        visited: &mut HashSet<String>,
        summary: &mut MirrorSummary,
    ) {
        if !visited.insert(resolver::normalized_path(&entry.url)) {
            debug!("Collection {} already mirrored, skipping", entry.url);
            return;
        }

        let dir = match self.fs_utils.child_path(dest, &entry.name) {
            Ok(dir) => dir,
            Err(e) => {
                warn!("Skipping collection {}: {}", entry.href, e);
                summary.skipped += 1;
                return;
            }
        };

        info!("Create and enter directory: {}", dir.display());
        if let Err(e) = self.fs_utils.create_collection_dir(&dir) {
            warn!("Error creating directory: {}", e);
            summary.skipped += 1;
            return;
        }
        summary.directories += 1;

        match self.children(&entry.url) {
            Ok(children) => self.mirror_entries(&children, &dir, visited, summary),
            Err(e) => {
                warn!("Error listing collection {}: {}", entry.url, e);
                summary.skipped += 1;
            }
        }
    }

    fn download_file(&self, entry: &Entry, dest: &Path, summary: &mut MirrorSummary) {
        let path = match self.fs_utils.child_path(dest, &entry.name) {
            Ok(path) => path,
            Err(e) => {
                warn!("Skipping file {}: {}", entry.href, e);
                summary.skipped += 1;
                return;
            }
        };

        info!("Downloading file: {}", path.display());
        let mut body = match self.source.open(&entry.url) {
            Ok(body) => body,
            Err(e) => {
                warn!("Error downloading file {}: {}", entry.url, e);
                summary.skipped += 1;
                return;
            }
        };

        match self.fs_utils.write_stream(&path, &mut *body) {
            Ok(bytes) => {
                summary.files += 1;
                summary.bytes += bytes;
            }
            Err(e) => {
                warn!("Error saving file: {}", e);
                summary.skipped += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::{FakeRemote, multistatus_xml};
    use crate::error::DavError;
    use std::fs;
    use tempfile::TempDir;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    fn nested_remote() -> FakeRemote {
        FakeRemote::new()
            .collection(
                "http://h/a/",
                &multistatus_xml(&[
                    ("/a/", "a", true),
                    ("/a/readme.txt", "", false),
                    ("/a/docs/", "docs", true),
                ]),
            )
            .collection(
                "http://h/a/docs/",
                &multistatus_xml(&[
                    ("/a/docs/", "docs", true),
                    ("/a/docs/guide.md", "guide.md", false),
                    ("/a/docs/img/", "", true),
                ]),
            )
            .collection(
                "http://h/a/docs/img/",
                &multistatus_xml(&[
                    ("/a/docs/img/", "", true),
                    ("/a/docs/img/logo.png", "", false),
                ]),
            )
            .file("http://h/a/readme.txt", b"hello")
            .file("http://h/a/docs/guide.md", b"# guide")
            .file("http://h/a/docs/img/logo.png", b"PNG")
    }

    #[test]
    fn test_mirrors_nested_tree() {
        let temp_dir = TempDir::new().unwrap();
        let remote = nested_remote();

        let summary = Mirror::new(&remote).run(&url("http://h/a/"), temp_dir.path()).unwrap();

        let root = temp_dir.path();
        assert_eq!(fs::read_to_string(root.join("readme.txt")).unwrap(), "hello");
        assert_eq!(fs::read_to_string(root.join("docs/guide.md")).unwrap(), "# guide");
        assert_eq!(fs::read(root.join("docs/img/logo.png")).unwrap(), b"PNG");
        assert_eq!(
            summary,
            MirrorSummary {
                directories: 2,
                files: 3,
                bytes: 15,
                skipped: 0
            }
        );
    }

    #[test]
    fn test_collections_are_listed_and_files_are_opened() {
        let temp_dir = TempDir::new().unwrap();
        let remote = nested_remote();

        Mirror::new(&remote).run(&url("http://h/a/"), temp_dir.path()).unwrap();

        assert_eq!(
            *remote.listed.borrow(),
            ["http://h/a/", "http://h/a/docs/", "http://h/a/docs/img/"]
        );
        assert_eq!(
            *remote.opened.borrow(),
            [
                "http://h/a/readme.txt",
                "http://h/a/docs/guide.md",
                "http://h/a/docs/img/logo.png"
            ]
        );
        assert!(temp_dir.path().join("readme.txt").is_file());
        assert!(temp_dir.path().join("docs").is_dir());
    }

    #[test]
    fn test_root_status_error_leaves_disk_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let dest = temp_dir.path().join("out");
        let remote = FakeRemote::new().collection_status("http://h/a/", 404);

        let err = Mirror::new(&remote).run(&url("http://h/a/"), &dest).unwrap_err();
        assert_eq!(err.to_string(), "unexpected status code: 404");
        assert!(!dest.exists());
    }

    #[test]
    fn test_root_malformed_xml_leaves_disk_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let dest = temp_dir.path().join("out");
        let remote = FakeRemote::new().collection(
            "http://h/a/",
            "<D:multistatus xmlns:D=\"DAV:\"><D:response><D:href>/a/x</D:response>",
        );

        let err = Mirror::new(&remote).run(&url("http://h/a/"), &dest).unwrap_err();
        assert!(matches!(err, DavError::XmlDecode { .. }));
        assert!(!dest.exists());
    }

    #[test]
    fn test_failing_children_do_not_stop_siblings() {
        let temp_dir = TempDir::new().unwrap();
        let remote = FakeRemote::new()
            .collection(
                "http://h/a/",
                &multistatus_xml(&[
                    ("/a/", "", true),
                    ("/a/missing.txt", "", false),
                    ("/a/locked/", "", true),
                    ("/a/ok.txt", "", false),
                ]),
            )
            .collection_status("http://h/a/locked/", 403)
            .file_status("http://h/a/missing.txt", 404)
            .file("http://h/a/ok.txt", b"ok");

        let summary = Mirror::new(&remote).run(&url("http://h/a/"), temp_dir.path()).unwrap();

        assert!(!temp_dir.path().join("missing.txt").exists());
        assert!(temp_dir.path().join("locked").is_dir());
        assert_eq!(fs::read_to_string(temp_dir.path().join("ok.txt")).unwrap(), "ok");
        assert_eq!(summary.files, 1);
        assert_eq!(summary.skipped, 2);
    }

    #[test]
    fn test_unsafe_names_are_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let dest = temp_dir.path().join("out");
        let remote = FakeRemote::new()
            .collection(
                "http://h/a/",
                &multistatus_xml(&[
                    ("/a/", "", true),
                    ("/a/evil.txt", "../evil.txt", false),
                    ("/a/up/", "..", true),
                    ("/a/fine.txt", "", false),
                ]),
            )
            .file("http://h/a/evil.txt", b"x")
            .file("http://h/a/fine.txt", b"y");

        let summary = Mirror::new(&remote).run(&url("http://h/a/"), &dest).unwrap();

        assert!(!temp_dir.path().join("evil.txt").exists());
        assert!(dest.join("fine.txt").is_file());
        assert_eq!(summary.skipped, 2);
        assert_eq!(*remote.opened.borrow(), ["http://h/a/fine.txt"]);
    }

    #[test]
    fn test_collection_echoing_parent_is_not_revisited() {
        let temp_dir = TempDir::new().unwrap();
        let remote = FakeRemote::new()
            .collection(
                "http://h/a/",
                &multistatus_xml(&[("/a/", "", true), ("/a/b/", "", true)]),
            )
            .collection(
                "http://h/a/b/",
                &multistatus_xml(&[("/a/b/", "", true), ("/a/", "loop", true)]),
            );

        let summary = Mirror::new(&remote).run(&url("http://h/a/"), temp_dir.path()).unwrap();

        assert_eq!(summary.directories, 1);
        assert_eq!(remote.listed.borrow().len(), 2);
        assert!(!temp_dir.path().join("b/loop").exists());
    }

    #[test]
    fn test_encoded_and_plain_collection_paths_mirrored_once() {
        let temp_dir = TempDir::new().unwrap();
        let remote = FakeRemote::new()
            .collection(
                "http://h/a/",
                &multistatus_xml(&[
                    ("/a/", "", true),
                    ("/a/%7Es/", "encoded", true),
                    ("/a/~s/", "plain", true),
                ]),
            )
            .collection(
                "http://h/a/%7Es/",
                &multistatus_xml(&[("/a/%7Es/", "", true)]),
            );

        let summary = Mirror::new(&remote).run(&url("http://h/a/"), temp_dir.path()).unwrap();

        assert_eq!(summary.directories, 1);
        assert!(temp_dir.path().join("encoded").is_dir());
        assert!(!temp_dir.path().join("plain").exists());
        assert_eq!(*remote.listed.borrow(), ["http://h/a/", "http://h/a/%7Es/"]);
    }
}
