use crate::weights::RelevanceWeights;
use folio_types::Photo;

/// Scores and orders photos against a heading context.
///
/// Ranking has no failure paths: missing descriptions and tags simply
/// contribute nothing.
#[derive(Debug, Clone, Default)]
pub struct Ranker {
    weights: RelevanceWeights,
}

impl Ranker {
    pub fn new(weights: RelevanceWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &RelevanceWeights {
        &self.weights
    }

    /// Splits a heading into lowercase scoring tokens.
    pub fn tokenize(&self, heading_context: &str) -> Vec<String> {
        heading_context
            .to_lowercase()
            .split_whitespace()
            .filter(|t| t.chars().count() >= self.weights.min_token_len)
            .filter(|t| !self.weights.is_stop_word(t))
            .map(str::to_string)
            .collect()
    }

    /// Computes the relevance of `photo` for `heading_context`.
    ///
    /// An empty or whitespace-only heading scores every photo as 1.
    pub fn score(&self, photo: &Photo, heading_context: &str) -> u32 {
        if heading_context.trim().is_empty() {
            return 1;
        }

        let w = &self.weights;
        let heading = heading_context.to_lowercase();
        let tokens = self.tokenize(heading_context);
        let name = photo.display_name.to_lowercase();
        let description = photo.description_or_empty().to_lowercase();

        let mut score: u32 = 0;
        for token in &tokens {
            if name.contains(token.as_str()) {
                score = score.saturating_add(w.name_match);
            }
            if description.contains(token.as_str()) {
                score = score.saturating_add(w.description_match);
            }
        }

        for tag in &photo.tags {
            let tag = tag.trim().to_lowercase();
            // Every heading contains the empty string, so a blank tag would
            // earn the exact-tag weight on any heading. Blank tags score nothing.
            if tag.is_empty() {
                continue;
            }
            if heading.contains(&tag) {
                score = score.saturating_add(w.exact_tag);
            }
            for token in &tokens {
                if tag.contains(token.as_str()) || token.contains(&tag) {
                    score = score.saturating_add(w.partial_tag);
                }
            }
        }

        score
    }

    /// Filters `photos` by `query` and, with a heading, sorts by relevance.
    ///
    /// The sort is stable so ties keep their incoming order. Without a
    /// heading the incoming order is kept and no relevance is annotated.
    pub fn rank_and_filter(
        &self,
        photos: &[Photo],
        query: &str,
        heading_context: &str,
    ) -> Vec<Photo> {
        // Case-insensitive but otherwise literal, surrounding spaces included
        let needle = query.to_lowercase();
        let mut matched: Vec<Photo> = photos
            .iter()
            .filter(|p| matches_query(p, &needle))
            .cloned()
            .collect();

        if heading_context.trim().is_empty() {
            for photo in &mut matched {
                photo.computed_relevance = None;
            }
            return matched;
        }

        for photo in &mut matched {
            photo.computed_relevance = Some(self.score(photo, heading_context));
        }
        matched.sort_by(|a, b| b.computed_relevance.cmp(&a.computed_relevance));
        log::debug!(
            "Ranked {} of {} photos for heading '{}'",
            matched.len(),
            photos.len(),
            heading_context
        );
        matched
    }
}

/// Case-insensitive substring match over id, name, description and tags.
/// `needle` must already be lowercased; an empty needle matches everything.
fn matches_query(photo: &Photo, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    photo.id.as_str().to_lowercase().contains(needle)
        || photo.display_name.to_lowercase().contains(needle)
        || photo.description_or_empty().to_lowercase().contains(needle)
        || photo.tags.iter().any(|t| t.to_lowercase().contains(needle))
}
