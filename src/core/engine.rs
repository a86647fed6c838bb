use crate::cache::OriginCache;
use crate::config::EngineConfig;
use crate::core::resolver::Resolver;
use crate::core::stats;
use crate::core::tokenizer::tokenize;
use crate::core::types::{BatchOutcome, OriginLabel, OriginStat, ProcessedWord, Resolution, Token};
use crate::error::{ConfigError, PersistenceError, ResolveError};
use crate::source::{DictionarySource, WiktionaryClient};
use chrono::{Local, NaiveDate};
use futures::future::join_all;
use std::sync::Arc;
use tracing::{info, warn};

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

// The public surface a UI consumes: text in, classified words and chart data out.
pub struct EtymologyEngine<S> {
    resolver: Resolver<S>,
    clock: fn() -> NaiveDate,
}

impl EtymologyEngine<WiktionaryClient> {
    /// Wiktionary-backed engine with the cache loaded from `config.cache_path`.
    pub fn from_config(config: &EngineConfig) -> Result<Self, ConfigError> {
        let source = WiktionaryClient::new(config)?;
        let cache = match &config.cache_path {
            Some(path) => OriginCache::load(path, local_today()),
            None => OriginCache::in_memory(),
        };
        Ok(Self::new(Arc::new(source), Arc::new(cache)))
    }
}

impl<S: DictionarySource> EtymologyEngine<S> {
    pub fn new(source: Arc<S>, cache: Arc<OriginCache>) -> Self {
        Self {
            resolver: Resolver::new(source, cache),
            clock: local_today,
        }
    }

    /// Replaces the source of "today" used for cache rollover.
    pub fn with_clock(mut self, clock: fn() -> NaiveDate) -> Self {
        self.clock = clock;
        self
    }

    pub fn resolver(&self) -> &Resolver<S> {
        &self.resolver
    }

    pub fn cache(&self) -> &OriginCache {
        self.resolver.cache()
    }

    /// Resolves every token of `text` concurrently. A network failure on any
    /// token discards the whole batch.
    pub async fn process_text(&self, text: &str) -> BatchOutcome {
        if text.trim().is_empty() {
            return BatchOutcome::default();
        }
        self.cache().rollover_if_stale((self.clock)());

        let tokens = tokenize(text);
        let outcomes = join_all(tokens.iter().map(|token| self.resolve_token(token))).await;

        let mut results = Vec::with_capacity(tokens.len());
        let mut failures = 0usize;
        for (token, outcome) in tokens.into_iter().zip(outcomes) {
            match outcome {
                Ok(resolution) => results.push(ProcessedWord { word: token.surface, resolution }),
                Err(e) => {
                    failures += 1;
                    warn!(word = %token.clean, error = %e, "could not resolve word");
                }
            }
        }

        self.persist_cache();

        if failures > 0 {
            warn!(
                failures,
                "{} words could not be processed due to connectivity problems with the dictionary",
                failures
            );
            return BatchOutcome { results: Vec::new(), has_network_error: true };
        }

        info!(words = results.len(), "batch resolved");
        BatchOutcome { results, has_network_error: false }
    }

    async fn resolve_token(&self, token: &Token) -> Result<Resolution, ResolveError> {
        if token.clean.is_empty() {
            return Ok(Resolution::unknown());
        }
        let mut resolution = self.resolver.resolve_origin(&token.clean).await?;
        if let Resolution::Compound(compound) = &mut resolution {
            compound.merge_unknown_parts();
        }
        Ok(resolution)
    }

    pub fn calculate_origin_stats(&self, results: &[ProcessedWord]) -> Vec<OriginStat> {
        stats::calculate_origin_stats(results)
    }

    pub fn get_active_languages(&self, results: &[ProcessedWord]) -> Vec<OriginLabel> {
        stats::get_active_languages(results)
    }

    pub fn save_cache(&self) -> Result<(), PersistenceError> {
        self.cache().save()
    }

    pub fn clear_cache(&self) -> Result<(), PersistenceError> {
        self.cache().clear();
        self.cache().save()
    }

    fn persist_cache(&self) {
        if let Err(e) = self.save_cache() {
            warn!(error = %e, "failed to save origin cache");
        }
    }
}
