use log::debug;
use reqwest::{Client, Url};

use super::{MediaSource, SourceError};

/// A library published by a web server, e.g. `https://example.org/player/`.
pub struct HttpSource {
    client: Client,
    base: Url,
}

impl HttpSource {
    pub fn new(location: &str) -> Result<Self, SourceError> {
        let mut base =
            Url::parse(location).map_err(|_| SourceError::InvalidLocation(location.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(SourceError::InvalidLocation(location.to_string()));
        }
        // Relative targets resolve below the base only when it ends with a slash.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let client = Client::builder().build()?;
        Ok(Self { client, base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Resolve `target` against the base. Literal spaces are encoded by the
    /// URL parser, existing escapes are kept as they are.
    pub fn url_for(&self, target: &str) -> Result<Url, SourceError> {
        self.base
            .join(target)
            .map_err(|_| SourceError::InvalidTarget(target.to_string()))
    }
}

impl MediaSource for HttpSource {
    async fn exists(&self, target: &str) -> Result<bool, SourceError> {
        let url = self.url_for(target)?;
        let response = self.client.head(url).send().await?;
        debug!("HEAD {target} -> {}", response.status());
        Ok(response.status().is_success())
    }

    async fn fetch(&self, target: &str) -> Result<Option<Vec<u8>>, SourceError> {
        let url = self.url_for(target)?;
        let response = self.client.get(url).send().await?;
        debug!("GET {target} -> {}", response.status());
        if !response.status().is_success() {
            return Ok(None);
        }
        Ok(Some(response.bytes().await?.to_vec()))
    }

    async fn list_dirs(&self, _prefix: &str) -> Result<Vec<String>, SourceError> {
        Ok(Vec::new())
    }
}
