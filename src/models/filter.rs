use serde::{Deserialize, Serialize};

/// Upper bound of a short game, lower bound of a medium one (minutes)
pub const SHORT_MAX_MINUTES: f64 = 300.0;
/// Upper bound of a medium game, lower bound of a long one (minutes)
pub const LONG_MIN_MINUTES: f64 = 1200.0;

/// Named play-length range over `Average_Playtime`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LengthBucket {
    /// At most 5 hours
    Short,
    /// 5 to 20 hours
    Medium,
    /// 20 hours or more
    Long,
}

impl LengthBucket {
    /// Inclusive `(min, max)` bounds in minutes
    pub fn bounds(self) -> (Option<f64>, Option<f64>) {
        match self {
            LengthBucket::Short => (None, Some(SHORT_MAX_MINUTES)),
            LengthBucket::Medium => (Some(SHORT_MAX_MINUTES), Some(LONG_MIN_MINUTES)),
            LengthBucket::Long => (Some(LONG_MIN_MINUTES), None),
        }
    }
}

/// Conjunction of predicates applied by the recommender
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecommendationFilter {
    pub genre: Option<String>,
    pub tag: Option<String>,
    pub unplayed_only: bool,
    pub min_length: Option<f64>,
    pub max_length: Option<f64>,
}

impl RecommendationFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = non_blank(genre.into());
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = non_blank(tag.into());
        self
    }

    pub fn unplayed_only(mut self, unplayed_only: bool) -> Self {
        self.unplayed_only = unplayed_only;
        self
    }

    pub fn min_length(mut self, minutes: f64) -> Self {
        self.min_length = Some(minutes);
        self
    }

    pub fn max_length(mut self, minutes: f64) -> Self {
        self.max_length = Some(minutes);
        self
    }

    /// Replaces both length bounds with the bucket's range
    pub fn length(mut self, bucket: Option<LengthBucket>) -> Self {
        let (min, max) = bucket.map(LengthBucket::bounds).unwrap_or((None, None));
        self.min_length = min;
        self.max_length = max;
        self
    }
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_bounds() {
        assert_eq!(LengthBucket::Short.bounds(), (None, Some(300.0)));
        assert_eq!(LengthBucket::Medium.bounds(), (Some(300.0), Some(1200.0)));
        assert_eq!(LengthBucket::Long.bounds(), (Some(1200.0), None));
    }

    #[test]
    fn test_bucket_serde_lowercase() {
        let bucket: LengthBucket = serde_json::from_str("\"medium\"").unwrap();
        assert_eq!(bucket, LengthBucket::Medium);
        assert_eq!(serde_json::to_string(&LengthBucket::Long).unwrap(), "\"long\"");
        assert!(serde_json::from_str::<LengthBucket>("\"Short\"").is_err());
    }

    #[test]
    fn test_filter_length_sets_both_bounds() {
        let filter = RecommendationFilter::new()
            .min_length(10.0)
            .max_length(20.0)
            .length(Some(LengthBucket::Long));
        assert_eq!(filter.min_length, Some(1200.0));
        assert_eq!(filter.max_length, None);

        let cleared = filter.length(None);
        assert_eq!(cleared.min_length, None);
        assert_eq!(cleared.max_length, None);
    }

    #[test]
    fn test_blank_genre_and_tag_are_ignored() {
        let filter = RecommendationFilter::new().genre("   ").tag("");
        assert_eq!(filter.genre, None);
        assert_eq!(filter.tag, None);

        let filter = RecommendationFilter::new().genre("RPG");
        assert_eq!(filter.genre.as_deref(), Some("RPG"));
    }
}
