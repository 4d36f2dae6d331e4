mod filter;
mod game;

pub use filter::{LengthBucket, RecommendationFilter, LONG_MIN_MINUTES, SHORT_MAX_MINUTES};
pub use game::{GameRecord, Library, UNKNOWN};
