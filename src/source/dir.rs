use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::debug;
use percent_encoding::percent_decode_str;
use walkdir::WalkDir;

use super::{MediaSource, SourceError};

/// A library laid out on the local filesystem.
pub struct DirSource {
    root: PathBuf,
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, SourceError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(SourceError::InvalidLocation(root.display().to_string()));
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a target onto a path below the root, decoding escapes the way a
    /// web server decodes a request path. Parent segments are rejected.
    pub fn path_for(&self, target: &str) -> Result<PathBuf, SourceError> {
        let decoded = percent_decode_str(target)
            .decode_utf8()
            .map_err(|_| SourceError::InvalidTarget(target.to_string()))?;

        let mut path = self.root.clone();
        for segment in decoded.split('/') {
            match segment {
                "" | "." => continue,
                ".." => return Err(SourceError::InvalidTarget(target.to_string())),
                s => path.push(s),
            }
        }
        Ok(path)
    }
}

impl MediaSource for DirSource {
    async fn exists(&self, target: &str) -> Result<bool, SourceError> {
        let path = self.path_for(target)?;
        match tokio::fs::metadata(&path).await {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn fetch(&self, target: &str) -> Result<Option<Vec<u8>>, SourceError> {
        let path = self.path_for(target)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn list_dirs(&self, prefix: &str) -> Result<Vec<String>, SourceError> {
        let base = self.path_for(prefix)?;
        let prefix = prefix.trim_matches('/');

        let dirs: Vec<String> = WalkDir::new(&base)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_dir() && !is_hidden(e.path()))
            .filter_map(|e| e.file_name().to_str().map(str::to_string))
            .map(|name| {
                if prefix.is_empty() {
                    name
                } else {
                    format!("{prefix}/{name}")
                }
            })
            .collect();

        debug!("Found {} folders under {}", dirs.len(), base.display());
        Ok(dirs)
    }
}
