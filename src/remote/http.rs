//! HTTP object store.
//!
//! Objects live at `<base_url>/<path>` and are read with `GET`, probed with
//! `HEAD` and written with `PUT`. This fits S3-compatible gateways, WebDAV
//! servers and simple blob services; an optional bearer token is sent with
//! every request.

use reqwest::{Client, StatusCode, header};
use url::Url;

use super::store::ObjectStore;
use crate::error::{Error, Result};

/// Objects served over plain HTTP.
#[derive(Debug, Clone)]
pub struct HttpStore {
    client: Client,
    base: Url,
    token: Option<String>,
}

impl HttpStore {
    /// Create a store for `base_url`.
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self> {
        let mut base = Url::parse(base_url)
            .map_err(|e| Error::config(format!("Invalid sync.url '{base_url}': {e}")))?;

        if !matches!(base.scheme(), "http" | "https") {
            return Err(Error::config(format!("sync.url must be http or https, got '{base_url}'")));
        }

        // Url::join replaces the last segment unless the base ends with '/'.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let client = Client::builder()
            .user_agent(concat!("transync/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::other(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, base, token })
    }

    fn url(&self, path: &str) -> Result<Url> {
        self.base.join(path.trim_start_matches('/')).map_err(|e| Error::remote(path, e))
    }

    fn request(&self, method: reqwest::Method, url: Url) -> reqwest::RequestBuilder {
        let builder = self.client.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

impl ObjectStore for HttpStore {
    async fn exists(&self, path: &str) -> Result<bool> {
        let url = self.url(path)?;
        let response = self
            .request(reqwest::Method::HEAD, url)
            .send()
            .await
            .map_err(|e| Error::remote(path, e))?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(false),
            status if status.is_success() => Ok(true),
            status => Err(Error::remote(path, format!("HEAD returned {status}"))),
        }
    }

    async fn get(&self, path: &str) -> Result<Option<Vec<u8>>> {
        let url = self.url(path)?;
        let response = self
            .request(reqwest::Method::GET, url)
            .send()
            .await
            .map_err(|e| Error::remote(path, e))?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let bytes = response.bytes().await.map_err(|e| Error::remote(path, e))?;
                Ok(Some(bytes.to_vec()))
            },
            status => Err(Error::remote(path, format!("GET returned {status}"))),
        }
    }

    async fn put(&self, path: &str, bytes: Vec<u8>) -> Result<()> {
        let url = self.url(path)?;
        let response = self
            .request(reqwest::Method::PUT, url)
            .header(header::CONTENT_TYPE, "application/json")
            .body(bytes)
            .send()
            .await
            .map_err(|e| Error::remote(path, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::remote(path, format!("PUT returned {status}")));
        }

        tracing::debug!(object = path, %status, "stored object");
        Ok(())
    }

    fn describe(&self, path: &str) -> String {
        self.url(path).map_or_else(|_| path.to_string(), |u| u.to_string())
    }
}
