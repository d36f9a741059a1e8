//! Downloads the profile pictures listed in an exported contact directory.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ChatGraphError, ChatGraphResult};

use super::{DirectoryEntry, PictureStatus};

const DEFAULT_EXTENSION: &str = "jpg";

/// Fetches the bytes behind a picture URL, with the response content type.
pub trait PictureFetcher {
    fn fetch(&self, url: &str) -> ChatGraphResult<(Vec<u8>, Option<String>)>;
}

pub struct HttpFetcher {
    agent: ureq::Agent,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
        }
    }
}

impl PictureFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> ChatGraphResult<(Vec<u8>, Option<String>)> {
        let response = self
            .agent
            .get(url)
            .call()
            .map_err(|e| ChatGraphError::Bridge(format!("GET {}: {}", url, e)))?;
        let content_type = response.header("content-type").map(str::to_string);
        let mut bytes = Vec::new();
        response.into_reader().read_to_end(&mut bytes)?;
        Ok((bytes, content_type))
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DownloadStats {
    pub downloaded: usize,
    /// Already present in the image folder and not renewed.
    pub skipped: usize,
    /// Entries without an available picture URL.
    pub without_picture: usize,
    pub failed: usize,
}

/// Reads the `contacts.json` written by [`super::write_contact_directory`].
pub fn read_contacts(path: &Path) -> ChatGraphResult<BTreeMap<String, DirectoryEntry>> {
    let json_str = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json_str)?)
}

/// Saves every available picture as `<images_dir>/<id>.<ext>`.
pub fn download_pictures(
    contacts: &BTreeMap<String, DirectoryEntry>,
    images_dir: &Path,
    renew: bool,
) -> ChatGraphResult<DownloadStats> {
    let fetcher = HttpFetcher::new(Duration::from_secs(30));
    download_pictures_with(contacts, images_dir, renew, &fetcher)
}

/// Like [`download_pictures`] with a caller-supplied fetcher. Ids that already
/// have a file in `images_dir` are skipped unless `renew` is set.
pub fn download_pictures_with(
    contacts: &BTreeMap<String, DirectoryEntry>,
    images_dir: &Path,
    renew: bool,
    fetcher: &dyn PictureFetcher,
) -> ChatGraphResult<DownloadStats> {
    fs::create_dir_all(images_dir)?;
    let present = if renew {
        HashSet::new()
    } else {
        downloaded_ids(images_dir)?
    };

    let mut stats = DownloadStats::default();
    for (id, entry) in contacts {
        if present.contains(id) {
            stats.skipped += 1;
            continue;
        }
        let PictureStatus::Available { url } = &entry.profile_pic else {
            stats.without_picture += 1;
            continue;
        };

        match fetcher.fetch(url) {
            Ok((bytes, content_type)) => {
                let path = picture_path(images_dir, id, content_type.as_deref());
                fs::write(&path, bytes)?;
                stats.downloaded += 1;
            }
            Err(e) => {
                tracing::warn!(contact = %id, error = %e, "profile picture download failed");
                stats.failed += 1;
            }
        }
    }

    tracing::info!(
        downloaded = stats.downloaded,
        skipped = stats.skipped,
        without_picture = stats.without_picture,
        failed = stats.failed,
        "downloaded profile pictures"
    );
    Ok(stats)
}

/// Ids with a file in `dir`: each file name minus its last extension.
fn downloaded_ids(dir: &Path) -> ChatGraphResult<HashSet<String>> {
    let mut ids = HashSet::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            ids.insert(stem.to_string());
        }
    }
    Ok(ids)
}

fn picture_path(dir: &Path, id: &str, content_type: Option<&str>) -> PathBuf {
    dir.join(format!("{}.{}", id, extension_for(content_type)))
}

fn extension_for(content_type: Option<&str>) -> &'static str {
    let mime = content_type
        .and_then(|c| c.split(';').next())
        .map(|c| c.trim().to_ascii_lowercase());
    match mime.as_deref() {
        Some("image/png") => "png",
        Some("image/gif") => "gif",
        Some("image/webp") => "webp",
        Some("image/bmp") => "bmp",
        _ => DEFAULT_EXTENSION,
    }
}
