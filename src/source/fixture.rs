//! In-memory library used by tests. Records every probe in order.

use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};

use percent_encoding::percent_decode_str;

use super::{MediaSource, SourceError};

#[derive(Default)]
pub(crate) struct FixtureSource {
    files: HashMap<String, Vec<u8>>,
    dirs: BTreeSet<String>,
    unfetchable: BTreeSet<String>,
    unaddressable: Vec<String>,
    offline: Vec<String>,
    exact: bool,
    probes: RefCell<Vec<String>>,
    fetches: RefCell<Vec<String>>,
}

impl FixtureSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Match targets byte for byte instead of decoding escapes first.
    pub fn exact(mut self) -> Self {
        self.exact = true;
        self
    }

    pub fn with_file(mut self, target: &str, body: &[u8]) -> Self {
        let key = self.key(target);
        self.files.insert(key, body.to_vec());
        self
    }

    /// `target` answers probes but its body cannot be retrieved.
    pub fn with_unfetchable(mut self, target: &str) -> Self {
        let key = self.key(target);
        self.unfetchable.insert(key);
        self
    }

    pub fn with_dir(mut self, target: &str) -> Self {
        self.dirs.insert(target.to_string());
        self
    }

    /// Targets under `prefix` fail as malformed.
    pub fn with_unaddressable(mut self, prefix: &str) -> Self {
        self.unaddressable.push(prefix.to_string());
        self
    }

    /// Targets under `prefix` fail with a transport error.
    pub fn with_offline(mut self, prefix: &str) -> Self {
        self.offline.push(prefix.to_string());
        self
    }

    pub fn probes(&self) -> Vec<String> {
        self.probes.borrow().clone()
    }

    pub fn fetches(&self) -> Vec<String> {
        self.fetches.borrow().clone()
    }

    fn key(&self, target: &str) -> String {
        if self.exact {
            target.to_string()
        } else {
            percent_decode_str(target).decode_utf8_lossy().into_owned()
        }
    }

    fn check(&self, target: &str) -> Result<String, SourceError> {
        if self.unaddressable.iter().any(|p| target.starts_with(p.as_str())) {
            return Err(SourceError::InvalidTarget(target.to_string()));
        }
        if self.offline.iter().any(|p| target.starts_with(p.as_str())) {
            return Err(SourceError::Io(std::io::Error::other("connection reset")));
        }
        Ok(self.key(target))
    }
}

impl MediaSource for FixtureSource {
    async fn exists(&self, target: &str) -> Result<bool, SourceError> {
        self.probes.borrow_mut().push(target.to_string());
        let key = self.check(target)?;
        Ok(self.files.contains_key(&key) || self.unfetchable.contains(&key))
    }

    async fn fetch(&self, target: &str) -> Result<Option<Vec<u8>>, SourceError> {
        self.fetches.borrow_mut().push(target.to_string());
        let key = self.check(target)?;
        Ok(self.files.get(&key).cloned())
    }

    async fn list_dirs(&self, prefix: &str) -> Result<Vec<String>, SourceError> {
        let prefix = format!("{}/", prefix.trim_matches('/'));
        Ok(self
            .dirs
            .iter()
            .filter(|d| d.starts_with(&prefix) && !d[prefix.len()..].contains('/'))
            .cloned()
            .collect())
    }
}
