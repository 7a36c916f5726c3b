use serde::{Deserialize, Serialize};

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/tunedeck/config.toml` or `~/.config/tunedeck/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `TUNEDECK__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub catalog: CatalogSettings,
    pub playback: PlaybackSettings,
    pub ui: UiSettings,
    pub controls: ControlsSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// Directory (relative to the library location) that holds one subfolder per album.
    pub songs_root: String,
    /// Name of the per-folder descriptor file listing authoritative track names.
    pub metadata_file: String,
    /// File extensions recognized as audio, with their leading dot.
    pub extensions: Vec<String>,
    /// Conventional cover image names, probed in order.
    pub cover_names: Vec<String>,
    /// Base URL of the image used when a folder has no cover.
    /// The folder name is appended as `?text=<name>`.
    pub placeholder_image: String,
    /// Folders to show, in order. When empty, folders are discovered under
    /// `songs_root` if the location can be listed.
    pub folders: Vec<FolderSettings>,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            songs_root: "songs".to_string(),
            metadata_file: "metadata.json".to_string(),
            extensions: [".mp3", ".MP3", ".wav", ".m4a", ".ogg", ".flac", ".m4b", ".aac"]
                .into_iter()
                .map(String::from)
                .collect(),
            cover_names: [
                "cover.jpg",
                "cover.png",
                "folder.jpg",
                "album.jpg",
                "thumbnail.jpg",
                "cover.jpeg",
                "folder.jpeg",
                "album.png",
                "thumb.jpg",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            placeholder_image: "https://via.placeholder.com/300/1db954/000000".to_string(),
            folders: vec![
                FolderSettings::new(
                    "Folder1",
                    "songs/Folder1",
                    &[
                        "khan sir motivation speech broken he...",
                        "Time importance Khan sir motivation s...",
                    ],
                ),
                FolderSettings::new(
                    "Folder2",
                    "songs/Folder2",
                    &[
                        "Ka Leke Shiv ke Manayi Ho.mp3",
                        "Vrindavan Jana to Jarur Hai.mp3",
                        "RJHG1 NR Raghunandan Shri Ram...",
                    ],
                ),
                FolderSettings::new(
                    "folder3",
                    "songs/folder3",
                    &["Convert Spotify Music to MP3 Files.mp3"],
                ),
            ],
        }
    }
}

/// One configured folder plus its fallback file list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct FolderSettings {
    /// Display label, unique per catalog.
    pub name: String,
    /// Location of the folder relative to the library root.
    pub path: String,
    /// Known file names used when the folder has no descriptor file.
    pub files: Vec<String>,
}

impl FolderSettings {
    pub fn new(name: &str, path: &str, files: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            path: path.to_string(),
            files: files.iter().map(|f| f.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Start playing as soon as a track is loaded.
    pub autoplay: bool,
    /// Delay before skipping to the next track after a playback error (milliseconds).
    pub error_advance_ms: u64,
    /// Initial output volume, `0.0..=1.0`.
    pub volume: f32,
    /// Accept the bare `folder/filename` guess without probing it when every
    /// candidate address failed.
    pub unverified_fallback: bool,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            autoplay: true,
            error_advance_ms: 2000,
            volume: 0.8,
            unverified_fallback: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// How long a notification stays on screen (milliseconds).
    pub toast_ms: u64,
    /// Separator between track name and artist in the status line.
    pub now_playing_separator: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ tunedeck ~ ".to_string(),
            toast_ms: 3000,
            now_playing_separator: " - ".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Fraction of the track to skip when pressing `H` / `L`.
    pub seek_step: f64,
    /// Volume change when pressing `-` / `+`.
    pub volume_step: f32,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            seek_step: 0.05,
            volume_step: 0.05,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LogSettings {
    /// `off`, `error`, `warn`, `info`, `debug` or `trace`. Logs go to stderr.
    pub level: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "off".to_string(),
        }
    }
}
