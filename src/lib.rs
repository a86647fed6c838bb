// src/lib.rs

pub mod cache;
pub mod config;
pub mod core;
pub mod error;
pub mod persistence;
pub mod render;
pub mod source;

pub use crate::cache::OriginCache;
pub use crate::config::EngineConfig;
pub use crate::core::engine::EtymologyEngine;
pub use crate::core::types::{
    BatchOutcome, Compound, CompoundPart, OriginLabel, OriginStat, ProcessedWord, Resolution,
};
pub use crate::source::{DictionarySource, Lookup, Section, WiktionaryClient};
