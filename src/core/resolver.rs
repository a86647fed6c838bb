// src/core/resolver.rs
use crate::cache::OriginCache;
use crate::core::patterns::{
    affix_origin, classify_etymology_text, is_bound_affix, language_code_hint,
    morphological_candidates,
};
use crate::core::tokenizer::clean_word;
use crate::core::types::{Compound, CompoundPart, OriginLabel, Resolution};
use crate::error::ResolveError;
use crate::source::{markup, DictionarySource, Lookup};
use futures::future::BoxFuture;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Deepest recursion level that still consults the dictionary. The top-level
/// call is depth 0, so at most three levels are ever active.
pub const MAX_DEPTH: u8 = 2;

/// Turns a word into an origin classification by walking the dictionary.
///
/// Strategies, first signal wins:
/// 1. suffix stripping (top-level words only)
/// 2. etymology section lookup, or inflection-of chasing when there is none
/// 3. language indicators in the etymology text
/// 4. `X + Y` compound decomposition
/// 5. "see also" cross-reference
/// 6. bare language codes
pub struct Resolver<S> {
    source: Arc<S>,
    cache: Arc<OriginCache>,
}

impl<S: DictionarySource> Resolver<S> {
    pub fn new(source: Arc<S>, cache: Arc<OriginCache>) -> Self {
        Self { source, cache }
    }

    pub fn cache(&self) -> &Arc<OriginCache> {
        &self.cache
    }

    pub fn source(&self) -> &Arc<S> {
        &self.source
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn resolve_origin(&self, word: &str) -> Result<Resolution, ResolveError> {
        self.resolve(word, 0).await
    }

    fn resolve<'a>(&'a self, word: &'a str, depth: u8) -> BoxFuture<'a, Result<Resolution, ResolveError>> {
        Box::pin(async move {
            if depth > MAX_DEPTH || word.trim().is_empty() {
                return Ok(Resolution::unknown());
            }
            if let Some(hit) = self.cache.get(word) {
                debug!(word, depth, "cache hit");
                return Ok(hit);
            }

            if depth == 0 {
                if let Some(resolution) = self.reduce_morphology(word, depth).await? {
                    self.cache.set(word, resolution.clone());
                    return Ok(resolution);
                }
            }

            let resolution = self.consult_dictionary(word, depth).await?;
            self.cache.set(word, resolution.clone());
            Ok(resolution)
        })
    }

    async fn reduce_morphology(&self, word: &str, depth: u8) -> Result<Option<Resolution>, ResolveError> {
        for stem in morphological_candidates(word) {
            let resolution = self.resolve(&stem, depth + 1).await?;
            if !resolution.is_unknown() {
                debug!(word, %stem, "resolved through stem");
                return Ok(Some(resolution));
            }
        }
        Ok(None)
    }

    async fn consult_dictionary(&self, word: &str, depth: u8) -> Result<Resolution, ResolveError> {
        let title = word.to_lowercase();

        let Lookup::Found(sections) = self.source.sections(&title).await? else {
            debug!(%title, "no such page");
            return Ok(Resolution::unknown());
        };
        let Some(etymology) = sections.iter().find(|section| section.is_etymology()) else {
            return self.follow_inflection(&title, depth).await;
        };

        let Lookup::Found(html) = self.source.section_html(&title, &etymology.index).await? else {
            return Ok(Resolution::unknown());
        };
        let text = markup::to_plain_text(&html);

        if let Some(origin) = classify_etymology_text(&text) {
            debug!(%title, %origin, "etymology text matched");
            return Ok(Resolution::simple(origin));
        }

        if let Some((first, second)) = markup::find_compound(&html, &text) {
            debug!(%title, %first, %second, "decomposing compound");
            return self.decompose(word, &first, &second, depth).await;
        }

        if let Some(target) = markup::find_see_also(&html) {
            if target != title && !is_bound_affix(&target) {
                debug!(%title, %target, "following see-also");
                return self.resolve(&target, depth + 1).await;
            }
        }

        Ok(language_code_hint(&text).map_or_else(Resolution::unknown, Resolution::simple))
    }

    /// Pages without an etymology are often "plural of X" stubs; resolve X instead.
    async fn follow_inflection(&self, title: &str, depth: u8) -> Result<Resolution, ResolveError> {
        let Lookup::Found(html) = self.source.page_html(title).await? else {
            return Ok(Resolution::unknown());
        };
        let base = markup::english_section(&html)
            .and_then(markup::find_inflection_target)
            .or_else(|| markup::find_inflection_target_plain(&markup::to_plain_text(&html)));

        match base {
            Some(base) => {
                debug!(%title, %base, "following inflection");
                self.resolve(&base, depth + 1).await
            }
            None => Ok(Resolution::unknown()),
        }
    }

    async fn decompose(
        &self,
        word: &str,
        first: &str,
        second: &str,
        depth: u8,
    ) -> Result<Resolution, ResolveError> {
        let first_origin = self.part_origin(first, depth + 1).await?;

        let second_origin = if is_bound_affix(second) {
            let origin = self.part_origin(second, depth + 1).await?;
            if origin.is_unknown() {
                affix_origin(second).unwrap_or(OriginLabel::Unknown)
            } else {
                origin
            }
        } else {
            self.part_origin(&clean_word(second), depth + 1).await?
        };

        let second_text = second.strip_prefix('-').unwrap_or(second);
        let second_text = second_text.strip_suffix('-').unwrap_or(second_text);

        Ok(Resolution::Compound(Compound {
            parts: [
                CompoundPart { text: first.to_string(), origin: first_origin },
                CompoundPart { text: second_text.to_string(), origin: second_origin },
            ],
            original_word: word.to_string(),
        }))
    }

    /// A compound part carries one label; a part that is itself a compound
    /// contributes its first known origin.
    async fn part_origin(&self, part: &str, depth: u8) -> Result<OriginLabel, ResolveError> {
        let resolution = self.resolve(part, depth).await?;
        Ok(match resolution {
            Resolution::Simple { origin } => origin,
            Resolution::Compound(compound) => compound
                .parts
                .iter()
                .map(|p| p.origin)
                .find(|origin| !origin.is_unknown())
                .unwrap_or(OriginLabel::Unknown),
        })
    }
}
