use std::{fs::File, io::Read, path::Path};

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::{
    error::LoadError,
    models::{GameRecord, Library, UNKNOWN},
};

const APP_ID: &str = "AppID";
const NAME: &str = "Name";
const PLAYTIME_FOREVER: &str = "Playtime_Forever";
const GENRE: &str = "Genre";
const TAGS: &str = "Tags";
const AVERAGE_PLAYTIME: &str = "Average_Playtime";

const EXPORT_NAME: &str = "game";
const EXPORT_ID: &str = "id";
const EXPORT_HOURS: &str = "hours";

const MINUTES_PER_HOUR: f64 = 60.0;

// `i64::MAX as f64` rounds up to 2^63, which is already out of range
const I64_MIN_F64: f64 = i64::MIN as f64;
const I64_MAX_EXCLUSIVE_F64: f64 = i64::MAX as f64;

/// Column layout of a library file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schema {
    /// Canonical column names, playtime in minutes
    Internal,
    /// Library export with `game`/`id`/`hours` columns, playtime in hours
    External,
}

/// Classifies a header row by the columns it carries
pub fn detect_schema<S: AsRef<str>>(headers: &[S]) -> Schema {
    let has = |name: &str| headers.iter().any(|h| h.as_ref() == name);

    if has(EXPORT_NAME) && has(EXPORT_ID) {
        Schema::External
    } else {
        Schema::Internal
    }
}

/// Loads and normalizes a library file from disk
pub fn load(path: impl AsRef<Path>) -> Result<Library, LoadError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }

    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => LoadError::NotFound(path.to_path_buf()),
        _ => LoadError::MalformedInput(format!("failed to read '{}': {}", path.display(), e)),
    })?;

    let library = load_reader(file)?;
    tracing::info!(
        path = %path.display(),
        games_count = library.len(),
        "Loaded game library"
    );
    Ok(library)
}

/// Loads and normalizes a library from any CSV byte source
pub fn load_reader<R: Read>(reader: R) -> Result<Library, LoadError> {
    let mut csv = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv.headers()?.iter().map(str::to_string).collect();
    let schema = detect_schema(headers.as_slice());
    tracing::debug!(?schema, columns = ?headers, "Detected library schema");

    let columns = Columns::resolve(schema, &headers)?;

    let mut games = Vec::new();
    for (index, row) in csv.records().enumerate() {
        let row = row?;
        games.push(columns.normalize(&row, index + 1)?);
    }

    Ok(Library::new(games))
}

/// Positions of the canonical fields within a header row
#[derive(Debug)]
struct Columns {
    app_id: usize,
    name: usize,
    playtime: Option<usize>,
    genre: Option<usize>,
    tags: Option<usize>,
    average_playtime: Option<usize>,
    /// Multiplier that brings the playtime column to minutes
    playtime_scale: f64,
}

impl Columns {
    fn resolve(schema: Schema, headers: &[String]) -> Result<Self, LoadError> {
        let find = |name: &str| headers.iter().position(|h| h == name);

        let (app_id, name, playtime, playtime_scale) = match schema {
            Schema::Internal => (find(APP_ID), find(NAME), find(PLAYTIME_FOREVER), 1.0),
            Schema::External => (
                find(EXPORT_ID),
                find(EXPORT_NAME),
                find(EXPORT_HOURS),
                MINUTES_PER_HOUR,
            ),
        };

        let app_id = app_id.ok_or_else(|| missing_column(APP_ID))?;
        let name = name.ok_or_else(|| missing_column(NAME))?;

        Ok(Self {
            app_id,
            name,
            playtime,
            genre: find(GENRE),
            tags: find(TAGS),
            average_playtime: find(AVERAGE_PLAYTIME),
            playtime_scale,
        })
    }

    fn normalize(&self, row: &StringRecord, row_number: usize) -> Result<GameRecord, LoadError> {
        let cell = |index: Option<usize>| index.and_then(|i| row.get(i)).filter(|v| !v.is_empty());

        let app_id = cell(Some(self.app_id))
            .and_then(parse_app_id)
            .ok_or_else(|| {
                LoadError::MalformedInput(format!(
                    "row {} has a missing or non-numeric {}",
                    row_number, APP_ID
                ))
            })?;

        Ok(GameRecord {
            app_id,
            name: cell(Some(self.name)).unwrap_or_default().to_string(),
            playtime_forever: parse_number(cell(self.playtime)) * self.playtime_scale,
            genre: cell(self.genre).unwrap_or(UNKNOWN).to_string(),
            tags: cell(self.tags).unwrap_or(UNKNOWN).to_string(),
            average_playtime: parse_estimate(cell(self.average_playtime)),
        })
    }
}

fn missing_column(name: &str) -> LoadError {
    LoadError::MalformedInput(format!("missing required column '{}'", name))
}

fn parse_app_id(value: &str) -> Option<i64> {
    value.parse::<i64>().ok().or_else(|| {
        value
            .parse::<f64>()
            .ok()
            .filter(|v| v.fract() == 0.0 && (I64_MIN_F64..I64_MAX_EXCLUSIVE_F64).contains(v))
            .map(|v| v as i64)
    })
}

/// Numeric coercion where anything unusable becomes zero
fn parse_number(value: Option<&str>) -> f64 {
    value
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Estimated length, where a negative estimate means no estimate
fn parse_estimate(value: Option<&str>) -> f64 {
    parse_number(value).max(0.0)
}
