use serde::{Deserialize, Serialize};

/// Placeholder for genre and tag data the source did not carry
pub const UNKNOWN: &str = "Unknown";

/// One game in a normalized library
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameRecord {
    #[serde(rename = "AppID")]
    pub app_id: i64,
    #[serde(rename = "Name")]
    pub name: String,
    /// Minutes the user has logged
    #[serde(rename = "Playtime_Forever")]
    pub playtime_forever: f64,
    #[serde(rename = "Genre")]
    pub genre: String,
    #[serde(rename = "Tags")]
    pub tags: String,
    /// Estimated minutes to beat
    #[serde(rename = "Average_Playtime")]
    pub average_playtime: f64,
}

impl GameRecord {
    /// Creates a record with unknown genre, tags and length
    pub fn new(app_id: i64, name: impl Into<String>, playtime_forever: f64) -> Self {
        Self {
            app_id,
            name: name.into(),
            playtime_forever,
            genre: UNKNOWN.to_string(),
            tags: UNKNOWN.to_string(),
            average_playtime: 0.0,
        }
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = genre.into();
        self
    }

    pub fn with_tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = tags.into();
        self
    }

    pub fn with_average_playtime(mut self, minutes: f64) -> Self {
        self.average_playtime = minutes;
        self
    }

    /// True if the user has never launched the game
    pub fn is_unplayed(&self) -> bool {
        self.playtime_forever == 0.0
    }
}

/// An immutable set of games produced by one load
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Library {
    games: Vec<GameRecord>,
}

impl Library {
    pub fn new(games: Vec<GameRecord>) -> Self {
        Self { games }
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn games(&self) -> &[GameRecord] {
        &self.games
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GameRecord> {
        self.games.iter()
    }
}

impl From<Vec<GameRecord>> for Library {
    fn from(games: Vec<GameRecord>) -> Self {
        Self::new(games)
    }
}

impl<'a> IntoIterator for &'a Library {
    type Item = &'a GameRecord;
    type IntoIter = std::slice::Iter<'a, GameRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
