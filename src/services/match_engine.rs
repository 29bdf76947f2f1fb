//! Layered matching pipeline.
//!
//! Stage order is fixed: keyword, category filter, semantic similarity,
//! generative fallback. The first stage to produce a reply wins, with one
//! deliberate exception: a triggered `/filter` query replaces an earlier
//! keyword hit when `category_overrides_keyword` is set (the default).
//! Every failure mode inside a stage degrades to a lower-confidence reply
//! instead of an error.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::models::{BotEntry, Catalog, MatchResult, MatchingConfig, SearchQuery};
use crate::domain::ports::{EmbeddingProvider, ReplyGenerator};

pub struct MatchEngine {
    embedder: Arc<dyn EmbeddingProvider>,
    generator: Arc<dyn ReplyGenerator>,
    config: MatchingConfig,
}

impl MatchEngine {
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        generator: Arc<dyn ReplyGenerator>,
        config: MatchingConfig,
    ) -> Self {
        Self { embedder, generator, config }
    }

    /// Run the pipeline for one query against one catalog snapshot.
    ///
    /// `cached` is the persisted embedding mapping for this snapshot; a
    /// missing or misaligned vector is recomputed on demand rather than
    /// trusted or rejected wholesale.
    pub async fn resolve(
        &self,
        query: &SearchQuery,
        catalog: &Catalog,
        cached: &BTreeMap<usize, Vec<f32>>,
    ) -> MatchResult {
        if catalog.is_empty() {
            return MatchResult::no_data();
        }

        // An empty needle is a substring of everything; route it straight
        // to the generative stage instead of "matching" the first entry.
        if query.is_empty() {
            return self.generative_stage(query).await;
        }

        let keyword_hit = self.keyword_stage(query, catalog);

        if let Some(category) = query.filter_category() {
            if self.config.category_overrides_keyword {
                if keyword_hit.is_some() {
                    debug!(category, "category filter overrides keyword hit");
                }
                return self.category_stage(category, catalog);
            }
            if keyword_hit.is_none() {
                return self.category_stage(category, catalog);
            }
        }

        if let Some(result) = keyword_hit {
            return result;
        }

        if let Some(result) = self.semantic_stage(query, catalog, cached).await {
            return result;
        }

        self.generative_stage(query).await
    }

    /// First entry, in catalog order, whose lowercased name or description
    /// contains the normalized query.
    fn keyword_stage(&self, query: &SearchQuery, catalog: &Catalog) -> Option<MatchResult> {
        catalog
            .iter()
            .find(|entry| entry.matches_keyword(query.normalized()))
            .map(|entry| MatchResult::keyword(entry.clone()))
    }

    /// Every entry whose category equals the requested one, case-insensitively.
    fn category_stage(&self, category: &str, catalog: &Catalog) -> MatchResult {
        let matches: Vec<BotEntry> =
            catalog.iter().filter(|entry| entry.matches_category(category)).cloned().collect();
        MatchResult::category_listing(category, &matches)
    }

    /// Highest-cosine entry, ties broken by lowest index, accepted only
    /// above the threshold (strict inequality).
    async fn semantic_stage(
        &self,
        query: &SearchQuery,
        catalog: &Catalog,
        cached: &BTreeMap<usize, Vec<f32>>,
    ) -> Option<MatchResult> {
        let query_vector = self.embedder.embed(query.normalized()).await;

        let mut best: Option<(usize, f32)> = None;
        for (index, entry) in catalog.iter().enumerate() {
            let similarity = match cached.get(&index) {
                Some(vector) if vector.len() == query_vector.len() => {
                    cosine_similarity(&query_vector, vector)
                }
                _ => {
                    debug!(index, "cached embedding missing or misaligned, embedding on demand");
                    let vector = self.embedder.embed(&entry.description).await;
                    cosine_similarity(&query_vector, &vector)
                }
            };

            match best {
                Some((_, top)) if similarity <= top => {}
                _ => best = Some((index, similarity)),
            }
        }

        let (index, similarity) = best?;
        if similarity > self.config.similarity_threshold {
            let entry = catalog.get(index)?.clone();
            Some(MatchResult::semantic(entry, similarity))
        } else {
            debug!(
                best_index = index,
                similarity,
                threshold = self.config.similarity_threshold,
                "no semantic match above threshold"
            );
            None
        }
    }

    /// Send the raw query to the generator; a failure becomes a literal
    /// error reply, never an error to the caller.
    async fn generative_stage(&self, query: &SearchQuery) -> MatchResult {
        match self.generator.generate(query.raw()).await {
            Ok(text) => MatchResult::generative(text),
            Err(error) => {
                warn!(generator = self.generator.name(), %error, "generative fallback failed");
                MatchResult::generation_failed(&error.to_string())
            }
        }
    }
}

/// Cosine similarity between two vectors: dot / (|a| * |b|).
///
/// Returns 0.0 on length mismatch or when either magnitude is zero, so a
/// degraded zero-vector query scores 0.0 everywhere and escalates to the
/// generative stage via the threshold.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let mag_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let mag_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if mag_a == 0.0 || mag_b == 0.0 {
        return 0.0;
    }

    dot / (mag_a * mag_b)
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn vector_strategy() -> impl Strategy<Value = Vec<f32>> {
        prop::collection::vec(-1000.0f32..1000.0, 1..64)
    }

    proptest! {
        #[test]
        fn proptest_cosine_within_bounds(a in vector_strategy(), b in vector_strategy()) {
            let similarity = cosine_similarity(&a, &b);
            prop_assert!(similarity >= -1.0001 && similarity <= 1.0001,
                "cosine out of range: {}", similarity);
            prop_assert!(similarity.is_finite());
        }

        #[test]
        fn proptest_cosine_symmetry(a in vector_strategy(), b in vector_strategy()) {
            prop_assert_eq!(cosine_similarity(&a, &b), cosine_similarity(&b, &a));
        }

        #[test]
        fn proptest_cosine_identity(a in vector_strategy()) {
            let magnitude: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
            prop_assume!(magnitude > 1e-3);
            let similarity = cosine_similarity(&a, &a);
            prop_assert!((similarity - 1.0).abs() < 1e-3,
                "self-similarity should be 1.0, got {}", similarity);
        }

        #[test]
        fn proptest_length_mismatch_is_zero(a in vector_strategy(), b in vector_strategy()) {
            prop_assume!(a.len() != b.len());
            prop_assert_eq!(cosine_similarity(&a, &b), 0.0);
        }

        #[test]
        fn proptest_zero_vector_is_zero(a in vector_strategy()) {
            let zeros = vec![0.0f32; a.len()];
            prop_assert_eq!(cosine_similarity(&a, &zeros), 0.0);
        }
    }
}
