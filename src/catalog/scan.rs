use std::collections::HashMap;

use log::debug;

use crate::config::{CatalogSettings, FolderSettings};
use crate::source::{MediaSource, SourceError};

use super::model::AudioFileDescriptor;
use super::paths::{clean_path, file_name_from_path, has_audio_extension};

/// Known file names per folder, keyed by the folder's bare name.
#[derive(Debug, Clone, Default)]
pub struct FallbackTable {
    rows: HashMap<String, Vec<String>>,
}

impl FallbackTable {
    pub fn from_settings(folders: &[FolderSettings]) -> Self {
        let rows = folders
            .iter()
            .map(|f| {
                let path = clean_path(&f.path);
                (file_name_from_path(&path).to_string(), f.files.clone())
            })
            .collect();
        Self { rows }
    }

    pub fn files_for(&self, folder_name: &str) -> &[String] {
        self.rows.get(folder_name).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Pull the song list out of a descriptor file body.
///
/// Returns `None` unless the body is a JSON object with a `songs` array.
/// Entries that are not non-blank strings are skipped.
fn songs_from_metadata(body: &[u8]) -> Option<Vec<String>> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    let songs = value.get("songs")?.as_array()?;
    Some(
        songs
            .iter()
            .filter_map(serde_json::Value::as_str)
            .map(str::trim)
            .map(file_name_from_path)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect(),
    )
}

/// List the audio files of `folder_path`.
///
/// A usable descriptor file wins; otherwise the fallback table is consulted.
/// Only errors about the folder being unaddressable are returned.
pub async fn scan_folder<S: MediaSource>(
    source: &S,
    folder_path: &str,
    settings: &CatalogSettings,
    fallback: &FallbackTable,
) -> Result<Vec<AudioFileDescriptor>, SourceError> {
    let metadata_target = format!("{folder_path}/{}", settings.metadata_file);
    match source.fetch(&metadata_target).await {
        Ok(Some(body)) => match songs_from_metadata(&body) {
            Some(names) => {
                debug!("{metadata_target} lists {} songs", names.len());
                return Ok(names
                    .iter()
                    .map(|name| AudioFileDescriptor::new(folder_path, name))
                    .collect());
            }
            None => debug!("{metadata_target} has no usable song list"),
        },
        Ok(None) => debug!("No {metadata_target}"),
        Err(e) if e.is_addressing() => return Err(e),
        Err(e) => debug!("Could not read {metadata_target}: {e}"),
    }

    let folder_name = file_name_from_path(folder_path);
    let files: Vec<AudioFileDescriptor> = fallback
        .files_for(folder_name)
        .iter()
        .map(|file| {
            let mut name = file.clone();
            if !has_audio_extension(&name, &settings.extensions) {
                name.push_str(".mp3");
            }
            AudioFileDescriptor::new(folder_path, &name)
        })
        .collect();

    debug!("Found {} audio files in {folder_path}", files.len());
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn songs_from_metadata_keeps_order_and_bare_names() {
        let body = br#"{"songs": ["b.mp3", "nested/dir/a.mp3", "  c.ogg  ", 7, "", "C:\\music\\d.wav"]}"#;
        assert_eq!(
            songs_from_metadata(body).unwrap(),
            vec!["b.mp3", "a.mp3", "c.ogg", "d.wav"]
        );
    }

    #[test]
    fn songs_from_metadata_rejects_unusable_bodies() {
        assert!(songs_from_metadata(b"not json").is_none());
        assert!(songs_from_metadata(br#"["a.mp3"]"#).is_none());
        assert!(songs_from_metadata(br#"{"songs": "a.mp3"}"#).is_none());
        assert!(songs_from_metadata(br#"{"tracks": ["a.mp3"]}"#).is_none());
        assert_eq!(songs_from_metadata(br#"{"songs": []}"#), Some(Vec::new()));
    }

    #[test]
    fn fallback_table_is_keyed_by_bare_folder_name() {
        let table = FallbackTable::from_settings(&[FolderSettings::new(
            "Display Name",
            "/songs//Folder2/",
            &["x.mp3"],
        )]);
        assert_eq!(table.files_for("Folder2"), &["x.mp3".to_string()]);
        assert!(table.files_for("Display Name").is_empty());
    }
}
