//! Command-line front end.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::models::{GameRecord, LengthBucket, RecommendationFilter};

pub const NO_MATCH_MESSAGE: &str = "No suitable game found matching your criteria.";

/// Recommendation mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Mode {
    #[default]
    Random,
    Unplayed,
}

/// GameButler: your personal game recommender.
#[derive(Parser, Debug)]
#[command(name = "gamebutler")]
#[command(version)]
pub struct Args {
    /// Path to your library CSV file
    #[arg(long, value_name = "PATH", default_value = "data/sample_library.csv")]
    pub csv: PathBuf,

    /// Recommendation mode
    #[arg(long, value_enum, default_value_t = Mode::Random)]
    pub mode: Mode,

    /// Filter by genre (e.g. "Action")
    #[arg(long)]
    pub genre: Option<String>,

    /// Filter by tag (e.g. "Sci-Fi")
    #[arg(long)]
    pub tag: Option<String>,

    /// Filter by game length (short: up to 5h, medium: 5-20h, long: 20h+)
    #[arg(long, value_enum)]
    pub length: Option<LengthBucket>,

    /// Only recommend unplayed games
    #[arg(long)]
    pub unplayed: bool,

    /// Print every matching game instead of picking one
    #[arg(long)]
    pub list: bool,
}

impl Args {
    pub fn unplayed_only(&self) -> bool {
        self.unplayed || self.mode == Mode::Unplayed
    }

    pub fn filter(&self) -> RecommendationFilter {
        let mut filter = RecommendationFilter::new()
            .unplayed_only(self.unplayed_only())
            .length(self.length);
        if let Some(genre) = &self.genre {
            filter = filter.genre(genre.clone());
        }
        if let Some(tag) = &self.tag {
            filter = filter.tag(tag.clone());
        }
        filter
    }
}

/// Boxed summary printed for a recommendation
pub fn render_recommendation(game: &GameRecord) -> String {
    let rule = "=".repeat(40);
    format!(
        "\n{rule}\nGameButler Recommends:\n{rule}\n\
         Title:    {}\n\
         Genre:    {}\n\
         Tags:     {}\n\
         Est. Len: {} mins\n\
         Playtime: {} minutes\n\
         {rule}\n",
        game.name, game.genre, game.tags, game.average_playtime, game.playtime_forever,
    )
}

/// One line per game for `--list`
pub fn render_listing(games: &[&GameRecord]) -> String {
    games
        .iter()
        .map(|g| {
            format!(
                "{:>8}  {}  [{} | {}]  {} mins",
                g.app_id, g.name, g.genre, g.tags, g.average_playtime
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
