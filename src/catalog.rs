//! Catalog discovery.
//!
//! Turns the configured folders into resolved [`FolderEntry`] values: cover
//! image, ordered audio files and a short description per folder. Loading
//! never fails as a whole; a folder that cannot be read shows up empty.

mod cover;
mod model;
mod paths;
mod scan;

pub use cover::{find_cover_image, placeholder_image};
pub use model::{AudioFileDescriptor, FolderDescriptor, FolderEntry, describe};
pub use paths::{
    AUDIO_EXTENSIONS, clean_path, encode_component, file_name_from_path, has_audio_extension,
    strip_audio_extension,
};
pub use scan::{FallbackTable, scan_folder};

use log::{info, warn};

use crate::config::CatalogSettings;
use crate::source::{MediaSource, SourceError};

/// Resolve every folder of the catalog, in order.
pub async fn load_catalog<S: MediaSource>(source: &S, settings: &CatalogSettings) -> Vec<FolderEntry> {
    let folders = folder_descriptors(source, settings).await;
    let fallback = FallbackTable::from_settings(&settings.folders);

    let mut entries = Vec::with_capacity(folders.len());
    for folder in folders {
        match resolve_folder(source, &folder, settings, &fallback).await {
            Ok(entry) => {
                info!(
                    "Loaded folder {} with {} audio files",
                    entry.name(),
                    entry.song_count()
                );
                entries.push(entry);
            }
            Err(e) => {
                warn!("Error loading folder {}: {e}", folder.name);
                let image = placeholder_image(&settings.placeholder_image, &folder.name);
                entries.push(FolderEntry::unavailable(folder, image));
            }
        }
    }
    entries
}

async fn resolve_folder<S: MediaSource>(
    source: &S,
    folder: &FolderDescriptor,
    settings: &CatalogSettings,
    fallback: &FallbackTable,
) -> Result<FolderEntry, SourceError> {
    let image = find_cover_image(source, &folder.path, settings).await?;
    let audio_files = scan_folder(source, &folder.path, settings, fallback).await?;
    Ok(FolderEntry::new(folder.clone(), audio_files, image))
}

/// The configured folders, or the folders found under `songs_root` when none
/// are configured.
pub async fn folder_descriptors<S: MediaSource>(
    source: &S,
    settings: &CatalogSettings,
) -> Vec<FolderDescriptor> {
    if !settings.folders.is_empty() {
        return settings
            .folders
            .iter()
            .map(|f| FolderDescriptor::new(&f.name, &f.path))
            .collect();
    }
    discover_folders(source, &settings.songs_root).await
}

/// Immediate subfolders of `songs_root`, named after their directory.
pub async fn discover_folders<S: MediaSource>(source: &S, songs_root: &str) -> Vec<FolderDescriptor> {
    let root = clean_path(songs_root);
    match source.list_dirs(&root).await {
        Ok(paths) => paths
            .iter()
            .map(|p| FolderDescriptor::new(file_name_from_path(p), p))
            .collect(),
        Err(e) => {
            warn!("Could not list folders under {root}: {e}");
            Vec::new()
        }
    }
}
