use std::fs;

use tempfile::tempdir;

use super::*;

#[tokio::test]
async fn dir_source_decodes_escapes_like_a_web_server() {
    let dir = tempdir().unwrap();
    let folder = dir.path().join("songs").join("Folder2");
    fs::create_dir_all(&folder).unwrap();
    fs::write(folder.join("Ka Leke.mp3"), b"not real").unwrap();

    let source = DirSource::new(dir.path()).unwrap();
    assert!(source.exists("songs/Folder2/Ka Leke.mp3").await.unwrap());
    assert!(source.exists("songs/Folder2/Ka%20Leke.mp3").await.unwrap());
    assert!(!source.exists("songs/Folder2/Ka%2520Leke.mp3").await.unwrap());
    // Directories are not playable files.
    assert!(!source.exists("songs/Folder2").await.unwrap());
}

#[tokio::test]
async fn dir_source_fetch_reports_missing_files_as_none() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("metadata.json"), br#"{"songs":[]}"#).unwrap();

    let source = DirSource::new(dir.path()).unwrap();
    assert_eq!(
        source.fetch("metadata.json").await.unwrap().as_deref(),
        Some(&br#"{"songs":[]}"#[..])
    );
    assert!(source.fetch("missing.json").await.unwrap().is_none());
}

#[tokio::test]
async fn dir_source_rejects_parent_segments() {
    let dir = tempdir().unwrap();
    let source = DirSource::new(dir.path()).unwrap();

    let err = source.exists("songs/../../etc/passwd").await.unwrap_err();
    assert!(err.is_addressing());
    let err = source.fetch("songs/%2E%2E/secret").await.unwrap_err();
    assert!(err.is_addressing());
}

#[tokio::test]
async fn dir_source_lists_visible_subfolders_sorted() {
    let dir = tempdir().unwrap();
    let songs = dir.path().join("songs");
    fs::create_dir_all(songs.join("b-side")).unwrap();
    fs::create_dir_all(songs.join("A Side").join("nested")).unwrap();
    fs::create_dir_all(songs.join(".cache")).unwrap();
    fs::write(songs.join("loose.mp3"), b"not real").unwrap();

    let source = DirSource::new(dir.path()).unwrap();
    let dirs = source.list_dirs("songs").await.unwrap();
    assert_eq!(dirs, vec!["songs/A Side".to_string(), "songs/b-side".to_string()]);

    assert!(source.list_dirs("nowhere").await.unwrap().is_empty());
}

#[test]
fn dir_source_requires_an_existing_directory() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing");
    assert!(matches!(
        DirSource::new(&missing),
        Err(SourceError::InvalidLocation(_))
    ));
}

#[test]
fn http_source_resolves_targets_below_the_base() {
    let source = HttpSource::new("https://example.org/player").unwrap();
    assert_eq!(source.base().as_str(), "https://example.org/player/");

    let url = source.url_for("songs/Folder2/Ka Leke.mp3").unwrap();
    assert_eq!(url.as_str(), "https://example.org/player/songs/Folder2/Ka%20Leke.mp3");

    let url = source.url_for("songs/Folder2/Ka%20Leke.mp3").unwrap();
    assert_eq!(url.as_str(), "https://example.org/player/songs/Folder2/Ka%20Leke.mp3");
}

#[test]
fn library_open_picks_the_source_from_the_location() {
    let dir = tempdir().unwrap();
    assert!(matches!(
        Library::open(dir.path().to_str().unwrap()),
        Ok(Library::Dir(_))
    ));
    assert!(matches!(
        Library::open("http://localhost:8000"),
        Ok(Library::Http(_))
    ));
    assert!(Library::open("mailto:someone@example.org").is_err());
}
