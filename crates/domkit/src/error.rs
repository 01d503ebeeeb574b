//! Facade errors

use std::path::PathBuf;

use domkit_dom::DomError;
use domkit_html::ParseError;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid configuration: {0}")]
    Toml(#[from] toml::de::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Dom(#[from] DomError),
    #[error("No element matches {0:?}")]
    NoMatch(String),
}
