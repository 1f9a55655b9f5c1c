use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::{error, info};
use serde::Deserialize;

use crate::error::DatasetError;

const REQUIRED_COLUMNS: [&str; 3] = ["artist_name", "track_name", "tempo"];

/// One row of the dataset. Only the three core fields drive matching; the
/// optional ones are carried when the source has them.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub artist_name: String,
    pub track_name: String,
    pub tempo: f64,
    pub track_id: Option<String>,
    pub genre: Option<String>,
    pub year: Option<u16>,
    pub popularity: Option<u8>,
}

impl Track {
    pub fn new(artist_name: impl Into<String>, track_name: impl Into<String>, tempo: f64) -> Self {
        Self {
            artist_name: artist_name.into(),
            track_name: track_name.into(),
            tempo,
            track_id: None,
            genre: None,
            year: None,
            popularity: None,
        }
    }
}

// Raw CSV row; tempo is parsed by hand so an empty cell can become NaN.
#[derive(Debug, Deserialize)]
struct TrackRow {
    artist_name: String,
    track_name: String,
    tempo: String,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    track_id: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    genre: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    year: Option<u16>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    popularity: Option<u8>,
}

impl TrackRow {
    fn into_track(self, row: usize) -> Result<Track, DatasetError> {
        let raw = self.tempo.trim();
        let tempo = if raw.is_empty() {
            f64::NAN
        } else {
            raw.parse::<f64>().map_err(|_| DatasetError::InvalidTempo {
                row,
                value: self.tempo.clone(),
            })?
        };

        Ok(Track {
            artist_name: self.artist_name,
            track_name: self.track_name,
            tempo,
            track_id: self.track_id,
            genre: self.genre,
            year: self.year,
            popularity: self.popularity,
        })
    }
}

/// The in-memory track table. Built once and never mutated; a failed load is
/// kept as an explicit state so callers can tell it apart from an empty table.
#[derive(Debug, Clone)]
pub enum Library {
    Loaded(Vec<Track>),
    Unavailable { reason: String },
}

impl Library {
    /// Load the table from a CSV file. Never fails: any error yields
    /// `Library::Unavailable` and is logged.
    pub fn load(path: &Path) -> Self {
        match read_tracks(path) {
            Ok(tracks) => {
                info!("Dataset loaded successfully: {} tracks from {}", tracks.len(), path.display());
                Library::Loaded(tracks)
            }
            Err(e) => {
                error!("Error loading dataset {}: {}", path.display(), e);
                Library::Unavailable { reason: e.to_string() }
            }
        }
    }

    pub fn from_tracks(tracks: Vec<Track>) -> Self {
        Library::Loaded(tracks)
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Library::Unavailable { reason: reason.into() }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Library::Loaded(_))
    }

    pub fn tracks(&self) -> Option<&[Track]> {
        match self {
            Library::Loaded(tracks) => Some(tracks),
            Library::Unavailable { .. } => None,
        }
    }

    pub fn len(&self) -> usize {
        self.tracks().map_or(0, |tracks| tracks.len())
    }

    /// True only for a loaded table with no rows; an unavailable table is
    /// not "empty".
    pub fn is_empty(&self) -> bool {
        matches!(self, Library::Loaded(tracks) if tracks.is_empty())
    }
}

/// Read every track from a CSV file, or nothing at all.
pub fn read_tracks(path: &Path) -> Result<Vec<Track>, DatasetError> {
    let file = File::open(path).map_err(|source| DatasetError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    read_tracks_from(file)
}

pub fn read_tracks_from<R: Read>(reader: R) -> Result<Vec<Track>, DatasetError> {
    let mut reader = csv::Reader::from_reader(reader);

    let headers = reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|header| header == column) {
            return Err(DatasetError::MissingColumn(column));
        }
    }

    let mut tracks = Vec::new();
    for (index, row) in reader.deserialize::<TrackRow>().enumerate() {
        // Row numbers count the header line, matching what a spreadsheet shows.
        tracks.push(row?.into_track(index + 2)?);
    }
    Ok(tracks)
}
