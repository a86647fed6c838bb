// src/error.rs
use thiserror::Error;

/// Failure talking to the dictionary source. Every variant is transient from
/// the resolver's point of view.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("dictionary server returned HTTP {status}")]
    Server { status: u16 },

    #[error("dictionary API error {code}: {info}")]
    Api { code: String, info: String },

    #[error("undecodable dictionary response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// The only way resolution can fail. Everything else is absorbed into an
/// `Unknown` classification.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Network Error: {0}")]
    Network(#[from] SourceError),
}

impl ResolveError {
    /// The sentinel shown to users in place of an origin.
    pub fn label(&self) -> &'static str {
        "Network Error"
    }
}

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("cache file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("cache snapshot could not be encoded: {0}")]
    Encode(#[from] bincode::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },

    #[error("could not build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}
