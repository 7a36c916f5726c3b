use serde::Serialize;

use super::paths::{clean_path, encode_component, file_name_from_path};

/// A folder as configured: display label plus normalized location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FolderDescriptor {
    pub name: String,
    pub path: String,
}

impl FolderDescriptor {
    pub fn new(name: &str, path: &str) -> Self {
        Self {
            name: name.to_string(),
            path: clean_path(path),
        }
    }
}

/// One audio file of a folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AudioFileDescriptor {
    /// Bare file name, never contains a separator.
    pub name: String,
    /// Folder path joined with `name`, unencoded.
    pub path: String,
    /// Folder path joined with the percent-encoded `name`.
    pub url: String,
}

impl AudioFileDescriptor {
    /// Describe `name` inside `folder_path`. Directory components in `name`
    /// are dropped.
    pub fn new(folder_path: &str, name: &str) -> Self {
        let name = file_name_from_path(name);
        Self {
            name: name.to_string(),
            path: format!("{folder_path}/{name}"),
            url: format!("{folder_path}/{}", encode_component(name)),
        }
    }
}

/// Human-readable track count.
pub fn describe(track_count: usize) -> String {
    match track_count {
        0 => "Empty folder".to_string(),
        1 => "1 track".to_string(),
        n => format!("{n} tracks"),
    }
}

/// A resolved catalog folder.
///
/// `songs` and `song_count` are derived from `audio_files` when the entry is
/// built and cannot drift from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderEntry {
    name: String,
    path: String,
    songs: Vec<String>,
    audio_files: Vec<AudioFileDescriptor>,
    description: String,
    image: String,
    song_count: usize,
}

impl FolderEntry {
    pub fn new(folder: FolderDescriptor, audio_files: Vec<AudioFileDescriptor>, image: String) -> Self {
        let description = describe(audio_files.len());
        Self::build(folder, audio_files, description, image)
    }

    /// Stand-in for a folder that could not be read at all.
    pub fn unavailable(folder: FolderDescriptor, image: String) -> Self {
        Self::build(folder, Vec::new(), "No tracks found".to_string(), image)
    }

    fn build(
        folder: FolderDescriptor,
        audio_files: Vec<AudioFileDescriptor>,
        description: String,
        image: String,
    ) -> Self {
        Self {
            name: folder.name,
            path: folder.path,
            songs: audio_files.iter().map(|f| f.name.clone()).collect(),
            song_count: audio_files.len(),
            audio_files,
            description,
            image,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn songs(&self) -> &[String] {
        &self.songs
    }

    pub fn audio_files(&self) -> &[AudioFileDescriptor] {
        &self.audio_files
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn song_count(&self) -> usize {
        self.song_count
    }
}
