//! Artifact download and bundle unpacking.

use std::fs;
use std::path::Path;

use bzip2::read::BzDecoder;
use tracing::{debug, info};

use crate::error::SttError;

/// Download `url` to `dest` unless the file is already there.
///
/// Returns `true` when a download happened. The body is streamed to a
/// `.part` file and renamed into place, so an interrupted download is never
/// mistaken for a complete artifact on the next run.
pub fn fetch_if_missing(url: &str, dest: &Path) -> Result<bool, SttError> {
    if dest.is_file() {
        debug!("{} already present, skipping download", dest.display());
        return Ok(false);
    }

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }

    info!("downloading {}", url);
    let mut response = reqwest::blocking::get(url)
        .and_then(|response| response.error_for_status())
        .map_err(|source| SttError::Download { url: url.to_string(), source })?;

    let file_name = dest.file_name().map(|name| name.to_string_lossy().to_string()).unwrap_or_default();
    let partial = dest.with_file_name(format!("{file_name}.part"));

    let mut file = fs::File::create(&partial)?;
    response.copy_to(&mut file).map_err(|source| SttError::Download { url: url.to_string(), source })?;
    fs::rename(&partial, dest)?;

    info!("saved {}", dest.display());
    Ok(true)
}

/// Whether `url` points at a compressed model bundle rather than a single
/// artifact.
pub fn is_bundle(url: &str) -> bool {
    url.ends_with(".tar.bz2")
}

/// Download a `.tar.bz2` model bundle and unpack it into `target_dir`.
pub fn fetch_bundle(url: &str, target_dir: &Path) -> Result<(), SttError> {
    fs::create_dir_all(target_dir)?;

    info!("downloading bundle {}", url);
    let response = reqwest::blocking::get(url)
        .and_then(|response| response.error_for_status())
        .map_err(|source| SttError::Download { url: url.to_string(), source })?;

    let mut archive = tar::Archive::new(BzDecoder::new(response));
    archive.unpack(target_dir)?;

    info!("unpacked bundle into {}", target_dir.display());
    Ok(())
}
