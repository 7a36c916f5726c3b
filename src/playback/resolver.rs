use log::debug;

use crate::catalog::{AudioFileDescriptor, clean_path, encode_component, file_name_from_path};
use crate::source::MediaSource;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("no playable address found for `{track}`")]
    NotFound { track: String },
}

/// Addresses worth trying for `track`, most likely first, without duplicates.
///
/// Names may already be percent-encoded, carry literal spaces, or differ
/// between the descriptor file and the files on disk, so several spellings
/// of the same location are tried.
pub fn candidate_urls(track: &AudioFileDescriptor, folder_path: &str) -> Vec<String> {
    let folder = clean_path(folder_path);
    let file_name = file_name_from_path(&track.name);
    let path = clean_path(&track.path);

    let options = [
        format!("{folder}/{}", encode_component(file_name)),
        clean_path(&track.url),
        path.clone(),
        path.replace(' ', "%20"),
        path.replace("%20", " "),
    ];

    let mut unique: Vec<String> = Vec::with_capacity(options.len());
    for url in options {
        if !unique.contains(&url) {
            unique.push(url);
        }
    }
    unique
}

/// Probe the candidates of `track` in order and return the first that
/// exists. Later candidates are not probed once one succeeds.
pub async fn resolve_playable_url<S: MediaSource>(
    source: &S,
    track: &AudioFileDescriptor,
    folder_path: &str,
) -> Result<String, ResolveError> {
    for url in candidate_urls(track, folder_path) {
        match source.exists(&url).await {
            Ok(true) => {
                debug!("Found valid URL: {url}");
                return Ok(url);
            }
            Ok(false) => debug!("URL failed: {url}"),
            Err(e) => debug!("URL error: {url} - {e}"),
        }
    }

    Err(ResolveError::NotFound {
        track: track.name.clone(),
    })
}

/// The unencoded `folder/filename` guess used when every candidate failed.
pub fn last_resort_url(track: &AudioFileDescriptor, folder_path: &str) -> String {
    format!(
        "{}/{}",
        clean_path(folder_path),
        file_name_from_path(&track.name)
    )
}
