//! Single-file download

use crate::{
    core::{client::RemoteSource, resolver},
    error::{DavError, Result},
    utils::fs::FileSystemUtils,
};
use std::path::{Path, PathBuf};
use tracing::{info, instrument};
use url::Url;

/// Local file name for `url`: its last path segment, percent-decoded
pub fn file_name(url: &Url) -> Result<String> {
    let ends_in_segment = url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .is_some_and(|last| !last.is_empty());

    if !ends_in_segment {
        return Err(DavError::validation(format!(
            "cannot derive a file name from {url}"
        )));
    }
    Ok(resolver::basename(url))
}

/// Download the file at `url` into `dest_dir`
///
/// Any failure aborts the download. The local file is created only after
/// the server answered 200.
#[instrument(skip_all, fields(url = %url))]
pub fn download<S: RemoteSource + ?Sized>(
    source: &S,
    url: &Url,
    dest_dir: &Path,
) -> Result<PathBuf> {
    let fs_utils = FileSystemUtils::new();
    let path = fs_utils.child_path(dest_dir, &file_name(url)?)?;

    let mut body = source.open(url)?;
    let bytes = fs_utils.write_stream(&path, &mut *body)?;

    info!("Downloaded {} ({} bytes)", path.display(), bytes);
    Ok(path)
}
