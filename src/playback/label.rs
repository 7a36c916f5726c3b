use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;

use crate::catalog::{AUDIO_EXTENSIONS, file_name_from_path, strip_audio_extension};

pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// `Title - Artist`, `Title ft. Artist`, `Title (Artist)`, tried in order.
static NAME_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [r"(.+)\s-\s(.+)", r"(.+)\sft\.\s(.+)", r"(.+)\s\((.+)\)"]
        .into_iter()
        .filter_map(|p| Regex::new(p).ok())
        .collect()
});

/// Display name and artist guessed from a file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackLabel {
    pub clean_name: String,
    pub artist: String,
}

pub fn track_label(file_name: &str) -> TrackLabel {
    let bare = file_name_from_path(file_name);
    let stem = strip_audio_extension(bare, &AUDIO_EXTENSIONS).trim();

    for pattern in NAME_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(stem) {
            let artist = caps[2].trim();
            return TrackLabel {
                clean_name: caps[1].trim().to_string(),
                artist: if artist.is_empty() {
                    UNKNOWN_ARTIST.to_string()
                } else {
                    artist.to_string()
                },
            };
        }
    }

    TrackLabel {
        clean_name: stem.to_string(),
        artist: UNKNOWN_ARTIST.to_string(),
    }
}

/// Format a position as `MM:SS`; unknown positions read `00:00`.
pub fn format_time(d: Option<Duration>) -> String {
    let secs = d.map(|d| d.as_secs()).unwrap_or(0);
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(name: &str) -> (String, String) {
        let l = track_label(name);
        (l.clean_name, l.artist)
    }

    #[test]
    fn dash_separates_title_and_artist() {
        assert_eq!(
            label("Shape of You - Ed Sheeran.mp3"),
            ("Shape of You".to_string(), "Ed Sheeran".to_string())
        );
        // the title group is greedy, so the last dash splits
        assert_eq!(
            label("A - B - C.mp3"),
            ("A - B".to_string(), "C".to_string())
        );
    }

    #[test]
    fn featuring_and_parentheses_are_recognized() {
        assert_eq!(
            label("Song ft. Someone.MP3"),
            ("Song".to_string(), "Someone".to_string())
        );
        assert_eq!(
            label("Song (Live Band).flac"),
            ("Song".to_string(), "Live Band".to_string())
        );
    }

    #[test]
    fn plain_names_get_an_unknown_artist() {
        assert_eq!(
            label("songs/Folder2/Ka Leke Shiv ke Manayi Ho.mp3"),
            (
                "Ka Leke Shiv ke Manayi Ho".to_string(),
                UNKNOWN_ARTIST.to_string()
            )
        );
        assert_eq!(
            label("Track-01.wav"),
            ("Track-01".to_string(), UNKNOWN_ARTIST.to_string())
        );
    }

    #[test]
    fn format_time_pads_minutes_and_seconds() {
        assert_eq!(format_time(None), "00:00");
        assert_eq!(format_time(Some(Duration::from_secs(5))), "00:05");
        assert_eq!(format_time(Some(Duration::from_millis(125_900))), "02:05");
        assert_eq!(format_time(Some(Duration::from_secs(6000))), "100:00");
    }
}
