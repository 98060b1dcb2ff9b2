//! Locating and reading properties payloads for `installConfig`.
//!
//! A source is an `http`/`https`/`file` URL or a plain filesystem path. The
//! whole payload is read and parsed before anything touches the store.

use crate::properties::parse_properties;
use crate::record::Properties;
use cm_core::error::{CmError, Result};
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Where a payload comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadSource {
    Http(Url),
    File { path: PathBuf, naming_path: String },
}

/// A fully read payload and the path that names its configuration.
#[derive(Debug, Clone)]
pub struct Payload {
    pub naming_path: String,
    pub properties: Properties,
}

impl PayloadSource {
    pub fn parse(source: &str) -> Result<Self> {
        match Url::parse(source) {
            Ok(url) => match url.scheme() {
                "http" | "https" => Ok(PayloadSource::Http(url)),
                "file" => {
                    let path = url.to_file_path().map_err(|_| {
                        CmError::payload_fetch(source, "file URL does not name a local path")
                    })?;
                    Ok(PayloadSource::File {
                        path,
                        naming_path: url.path().to_string(),
                    })
                }
                // Windows drive letters parse as one-letter schemes.
                scheme if scheme.len() == 1 => Ok(Self::plain_path(source)),
                scheme => Err(CmError::payload_fetch(
                    source,
                    format!("unsupported URL scheme '{scheme}'"),
                )),
            },
            Err(_) => Ok(Self::plain_path(source)),
        }
    }

    fn plain_path(source: &str) -> Self {
        PayloadSource::File {
            path: PathBuf::from(source),
            naming_path: source.replace('\\', "/"),
        }
    }

    /// The path whose last segment names the configuration.
    pub fn naming_path(&self) -> &str {
        match self {
            PayloadSource::Http(url) => url.path(),
            PayloadSource::File { naming_path, .. } => naming_path,
        }
    }

    fn describe(&self) -> String {
        match self {
            PayloadSource::Http(url) => url.to_string(),
            PayloadSource::File { path, .. } => path.display().to_string(),
        }
    }

    /// Read the whole payload as text. The underlying file or response is
    /// released before this returns, whether or not reading succeeded.
    pub fn read_text(&self, timeout: Duration) -> Result<String> {
        match self {
            PayloadSource::Http(url) => {
                debug!(url = %url, "fetching payload");
                let client = reqwest::blocking::Client::builder()
                    .timeout(timeout)
                    .build()
                    .map_err(|e| CmError::payload_fetch(self.describe(), e))?;
                let response = client
                    .get(url.clone())
                    .send()
                    .and_then(|r| r.error_for_status())
                    .map_err(|e| CmError::payload_fetch(self.describe(), e))?;
                response
                    .text()
                    .map_err(|e| CmError::payload_fetch(self.describe(), e))
            }
            PayloadSource::File { path, .. } => {
                debug!(path = %path.display(), "reading payload");
                let mut file =
                    File::open(path).map_err(|e| CmError::payload_fetch(self.describe(), e))?;
                let mut text = String::new();
                file.read_to_string(&mut text)
                    .map_err(|e| CmError::payload_fetch(self.describe(), e))?;
                Ok(text)
            }
        }
    }

    pub fn fetch(&self, timeout: Duration) -> Result<Payload> {
        let text = self.read_text(timeout)?;
        let properties = parse_properties(&text)
            .map_err(|e| CmError::payload_fetch(self.describe(), e))?;
        info!(source = %self.describe(), entries = properties.len(), "payload read");
        Ok(Payload {
            naming_path: self.naming_path().to_string(),
            properties,
        })
    }
}
