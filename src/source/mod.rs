// src/source/mod.rs
//! The dictionary the resolver consults. `WiktionaryClient` is the HTTP
//! implementation; tests substitute a scripted one.
pub mod markup;
pub mod wiktionary;

use crate::error::SourceError;
use async_trait::async_trait;
use serde::Deserialize;

pub use wiktionary::WiktionaryClient;

/// Outcome of a page query that reached the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    Found(T),
    /// The page does not exist or the title is invalid.
    Missing,
}

impl<T> Lookup<T> {
    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::Missing => None,
        }
    }
}

/// One entry of a page's table of contents.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Section {
    #[serde(default)]
    pub index: String,
    /// Heading text, e.g. `"Etymology 1"`.
    #[serde(default)]
    pub line: String,
}

impl Section {
    pub fn is_etymology(&self) -> bool {
        self.line.starts_with("Etymology")
    }
}

#[async_trait]
pub trait DictionarySource: Send + Sync {
    /// Table of contents for `title`.
    async fn sections(&self, title: &str) -> Result<Lookup<Vec<Section>>, SourceError>;

    /// Rendered HTML of the whole page.
    async fn page_html(&self, title: &str) -> Result<Lookup<String>, SourceError>;

    /// Rendered HTML of one section, addressed by its `index`.
    async fn section_html(&self, title: &str, index: &str) -> Result<Lookup<String>, SourceError>;
}
