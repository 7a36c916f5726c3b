use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_tunedeck_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("TUNEDECK_CONFIG_PATH", "/tmp/tunedeck-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/tunedeck-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("tunedeck")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("tunedeck")
            .join("config.toml")
    );
}

#[test]
fn defaults_carry_the_stock_folders_and_validate() {
    let s = Settings::default();
    let names: Vec<&str> = s.catalog.folders.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["Folder1", "Folder2", "folder3"]);
    assert_eq!(s.catalog.folders[1].path, "songs/Folder2");
    assert_eq!(s.catalog.metadata_file, "metadata.json");
    assert_eq!(s.catalog.cover_names[0], "cover.jpg");
    assert_eq!(s.catalog.extensions.len(), 8);
    assert_eq!(s.playback.error_advance_ms, 2000);
    assert_eq!(s.ui.toast_ms, 3000);
    assert!(s.validate().is_ok());
}

#[test]
fn validate_rejects_out_of_range_values() {
    let mut s = Settings::default();
    s.playback.volume = 1.5;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.controls.seek_step = 0.0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.log.level = "loud".to_string();
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.catalog.folders.push(FolderSettings::new("Folder1", "songs/Other", &[]));
    assert!(s.validate().is_err());
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[catalog]
songs_root = "music"
cover_names = ["front.jpg"]

[[catalog.folders]]
name = "Road Trip"
path = "music/Road Trip"
files = ["Shape of You - Ed Sheeran"]

[playback]
autoplay = false
error_advance_ms = 500
volume = 0.25
unverified_fallback = true

[ui]
header_text = "hello"
toast_ms = 1200

[controls]
seek_step = 0.1

[log]
level = "debug"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("TUNEDECK_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("TUNEDECK__PLAYBACK__ERROR_ADVANCE_MS");

    let s = Settings::load().unwrap();
    assert_eq!(s.catalog.songs_root, "music");
    assert_eq!(s.catalog.cover_names, vec!["front.jpg".to_string()]);
    assert_eq!(s.catalog.metadata_file, "metadata.json");
    assert_eq!(
        s.catalog.folders,
        vec![FolderSettings::new(
            "Road Trip",
            "music/Road Trip",
            &["Shape of You - Ed Sheeran"]
        )]
    );
    assert!(!s.playback.autoplay);
    assert_eq!(s.playback.error_advance_ms, 500);
    assert_eq!(s.playback.volume, 0.25);
    assert!(s.playback.unverified_fallback);
    assert_eq!(s.ui.header_text, "hello");
    assert_eq!(s.ui.toast_ms, 1200);
    assert_eq!(s.controls.seek_step, 0.1);
    assert_eq!(s.log_level(), Some(log::LevelFilter::Debug));
    assert!(s.validate().is_ok());
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[playback]
error_advance_ms = 2500
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("TUNEDECK_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("TUNEDECK__PLAYBACK__ERROR_ADVANCE_MS", "100");

    let s = Settings::load().unwrap();
    assert_eq!(s.playback.error_advance_ms, 100);
}

#[test]
fn default_settings_survive_a_toml_round_trip() {
    let text = toml::to_string_pretty(&Settings::default()).unwrap();
    assert!(text.contains("[[catalog.folders]]"));
    let back: Settings = toml::from_str(&text).unwrap();
    assert_eq!(back.catalog.folders, Settings::default().catalog.folders);
}
