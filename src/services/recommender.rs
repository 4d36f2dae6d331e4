use rand::{seq::SliceRandom, Rng};

use crate::models::{GameRecord, Library, RecommendationFilter};

/// Picks random games out of one loaded library
///
/// The library is fixed at construction. Reloading means building a new
/// recommender and swapping it in.
#[derive(Debug, Clone, Default)]
pub struct Recommender {
    library: Library,
}

impl Recommender {
    pub fn new(library: Library) -> Self {
        Self { library }
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn len(&self) -> usize {
        self.library.len()
    }

    pub fn is_empty(&self) -> bool {
        self.library.is_empty()
    }

    /// Every game that satisfies all of the filter's predicates
    pub fn candidates(&self, filter: &RecommendationFilter) -> Vec<&GameRecord> {
        let genre = filter.genre.as_deref().map(str::to_lowercase);
        let tag = filter.tag.as_deref().map(str::to_lowercase);

        self.library
            .iter()
            .filter(|game| !filter.unplayed_only || game.is_unplayed())
            .filter(|game| genre.as_deref().map_or(true, |g| contains_ignore_case(&game.genre, g)))
            .filter(|game| tag.as_deref().map_or(true, |t| contains_ignore_case(&game.tags, t)))
            .filter(|game| filter.min_length.map_or(true, |min| game.average_playtime >= min))
            .filter(|game| filter.max_length.map_or(true, |max| game.average_playtime <= max))
            .collect()
    }

    /// Picks a uniformly random match, or `None` when nothing qualifies
    pub fn recommend(&self, filter: &RecommendationFilter) -> Option<&GameRecord> {
        self.recommend_with(filter, &mut rand::thread_rng())
    }

    /// Same as [`Recommender::recommend`] with a caller-supplied random source
    pub fn recommend_with<R: Rng + ?Sized>(
        &self,
        filter: &RecommendationFilter,
        rng: &mut R,
    ) -> Option<&GameRecord> {
        if self.library.is_empty() {
            return None;
        }

        let candidates = self.candidates(filter);
        tracing::debug!(
            candidates = candidates.len(),
            library = self.library.len(),
            "Filtered library"
        );

        candidates.choose(rng).copied()
    }

    /// Any game from the library
    pub fn recommend_random(&self) -> Option<&GameRecord> {
        self.recommend(&RecommendationFilter::new())
    }

    /// Any game with no logged playtime
    pub fn recommend_unplayed(&self) -> Option<&GameRecord> {
        self.recommend(&RecommendationFilter::new().unplayed_only(true))
    }
}

/// `needle` must already be lowercase
fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}
