use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Audio extensions recognized out of the box.
pub const AUDIO_EXTENSIONS: [&str; 8] = [
    ".mp3", ".MP3", ".wav", ".m4a", ".ogg", ".flac", ".m4b", ".aac",
];

/// Characters left alone when encoding a single path component.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Normalize a folder path: forward slashes only, no repeated separators,
/// no leading or trailing separator.
pub fn clean_path(path: &str) -> String {
    let mut collapsed = String::with_capacity(path.len());
    for ch in path.chars().map(|c| if c == '\\' { '/' } else { c }) {
        if ch == '/' && collapsed.ends_with('/') {
            continue;
        }
        collapsed.push(ch);
    }

    let trimmed = collapsed.strip_prefix('/').unwrap_or(&collapsed);
    let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);
    trimmed.to_string()
}

/// The last component of a slash- or backslash-separated path.
pub fn file_name_from_path(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// Percent-encode one path component.
pub fn encode_component(component: &str) -> String {
    utf8_percent_encode(component, COMPONENT).to_string()
}

pub fn has_audio_extension<E: AsRef<str>>(name: &str, extensions: &[E]) -> bool {
    let lower = name.to_lowercase();
    extensions
        .iter()
        .any(|ext| lower.ends_with(&ext.as_ref().to_lowercase()))
}

/// `name` without a recognized audio extension.
pub fn strip_audio_extension<'a, E: AsRef<str>>(name: &'a str, extensions: &[E]) -> &'a str {
    for ext in extensions {
        let ext = ext.as_ref();
        if ext.is_empty() || name.len() < ext.len() {
            continue;
        }
        let cut = name.len() - ext.len();
        if name.is_char_boundary(cut) && name[cut..].eq_ignore_ascii_case(ext) {
            return &name[..cut];
        }
    }
    name
}
