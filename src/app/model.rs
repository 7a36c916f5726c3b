//! Application model types: `App` and `Focus`.
//!
//! Playback state is owned by the player; the `App` only tracks what the
//! user is looking at.

use crate::catalog::{AudioFileDescriptor, FolderEntry};

/// Which list receives cursor movement.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Folders,
    Tracks,
}

/// The browsing model.
pub struct App {
    pub folders: Vec<FolderEntry>,
    /// Cursor in the folder list.
    pub selected_folder: usize,
    /// Folder whose tracks are shown.
    pub open_folder: Option<usize>,
    /// Cursor in the track list of the open folder.
    pub selected_track: usize,
    pub focus: Focus,
    /// Where the catalog was loaded from, for the status line.
    pub location: String,
}

impl App {
    /// Create a new `App` over `folders`, with the first folder open.
    pub fn new(folders: Vec<FolderEntry>, location: String) -> Self {
        let open_folder = if folders.is_empty() { None } else { Some(0) };
        Self {
            folders,
            selected_folder: 0,
            open_folder,
            selected_track: 0,
            focus: Focus::Folders,
            location,
        }
    }

    /// Swap in a freshly loaded catalog, keeping the open folder and the
    /// cursor on the same folder names when they still exist.
    pub fn replace_folders(&mut self, folders: Vec<FolderEntry>) {
        let selected_name = self.folders.get(self.selected_folder).map(|f| f.name().to_string());
        let open_name = self.current_folder().map(|f| f.name().to_string());

        self.folders = folders;
        self.selected_folder = selected_name
            .and_then(|n| self.position_of(&n))
            .unwrap_or(0);
        self.open_folder = match open_name.and_then(|n| self.position_of(&n)) {
            Some(i) => Some(i),
            None if self.folders.is_empty() => None,
            None => Some(self.selected_folder),
        };

        let len = self.visible_tracks().len();
        if self.selected_track >= len {
            self.selected_track = 0;
        }
    }

    fn position_of(&self, name: &str) -> Option<usize> {
        self.folders.iter().position(|f| f.name() == name)
    }

    /// Open the folder under the cursor and move focus to its tracks.
    pub fn open_selected_folder(&mut self) {
        if self.selected_folder >= self.folders.len() {
            return;
        }
        if self.open_folder != Some(self.selected_folder) {
            self.selected_track = 0;
        }
        self.open_folder = Some(self.selected_folder);
        self.focus = Focus::Tracks;
    }

    /// The folder whose tracks are shown.
    pub fn current_folder(&self) -> Option<&FolderEntry> {
        self.open_folder.and_then(|i| self.folders.get(i))
    }

    pub fn visible_tracks(&self) -> &[AudioFileDescriptor] {
        self.current_folder()
            .map(|f| f.audio_files())
            .unwrap_or(&[])
    }

    pub fn has_tracks(&self) -> bool {
        !self.visible_tracks().is_empty()
    }

    /// Put the track cursor on `name` if the open folder holds it.
    pub fn select_track_named(&mut self, name: &str) {
        if let Some(i) = self.visible_tracks().iter().position(|t| t.name == name) {
            self.selected_track = i;
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Folders => Focus::Tracks,
            Focus::Tracks => Focus::Folders,
        };
    }

    /// Move the cursor of the focused list down, wrapping to the top.
    pub fn next(&mut self) {
        match self.focus {
            Focus::Folders => {
                self.selected_folder = wrap_next(self.selected_folder, self.folders.len());
            }
            Focus::Tracks => {
                let len = self.visible_tracks().len();
                self.selected_track = wrap_next(self.selected_track, len);
            }
        }
    }

    /// Move the cursor of the focused list up, wrapping to the bottom.
    pub fn prev(&mut self) {
        match self.focus {
            Focus::Folders => {
                self.selected_folder = wrap_prev(self.selected_folder, self.folders.len());
            }
            Focus::Tracks => {
                let len = self.visible_tracks().len();
                self.selected_track = wrap_prev(self.selected_track, len);
            }
        }
    }
}

fn wrap_next(current: usize, len: usize) -> usize {
    if len == 0 { 0 } else { (current + 1) % len }
}

fn wrap_prev(current: usize, len: usize) -> usize {
    match len {
        0 => 0,
        _ if current == 0 || current >= len => len - 1,
        _ => current - 1,
    }
}
