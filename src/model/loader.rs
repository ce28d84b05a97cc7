//! Reading a catalog document from disk or over HTTP.

use std::fmt;
use std::path::{Path, PathBuf};

use super::Catalog;

/// Errors produced while loading a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to fetch catalog {url}: {message}")]
    Fetch { url: String, message: String },
    #[error("invalid catalog document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Where the catalog document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    Path(PathBuf),
    Url(String),
}

impl CatalogSource {
    /// Classify a location string. `http://` and `https://` prefixes are URLs,
    /// everything else is a filesystem path.
    pub fn parse(location: &str) -> Self {
        let lower = location.trim_start().to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            CatalogSource::Url(location.trim().to_string())
        } else {
            CatalogSource::Path(PathBuf::from(location))
        }
    }
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogSource::Path(path) => write!(f, "{}", path.display()),
            CatalogSource::Url(url) => write!(f, "{url}"),
        }
    }
}

/// Load and flatten the catalog from `source`.
pub fn load_catalog(source: &CatalogSource) -> Result<Catalog, CatalogError> {
    let json = match source {
        CatalogSource::Path(path) => read_file(path)?,
        CatalogSource::Url(url) => fetch_url(url)?,
    };

    let catalog = Catalog::from_json_str(&json)?;
    tracing::info!(
        "Loaded {} snippets in {} categories from {} ({} skipped)",
        catalog.len(),
        catalog.categories().len(),
        source,
        catalog.skipped().len()
    );
    Ok(catalog)
}

fn read_file(path: &Path) -> Result<String, CatalogError> {
    std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(feature = "runtime")]
fn fetch_url(url: &str) -> Result<String, CatalogError> {
    let fetch_error = |e: ureq::Error| CatalogError::Fetch {
        url: url.to_string(),
        message: e.to_string(),
    };

    tracing::debug!("Fetching catalog from {}", url);
    let mut response = ureq::get(url).call().map_err(fetch_error)?;
    response.body_mut().read_to_string().map_err(fetch_error)
}

#[cfg(not(feature = "runtime"))]
fn fetch_url(url: &str) -> Result<String, CatalogError> {
    Err(CatalogError::Fetch {
        url: url.to_string(),
        message: "HTTP support requires the `runtime` feature".to_string(),
    })
}
