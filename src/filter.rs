use log::{debug, info};
use serde::Serialize;

use crate::classifier::BpmRange;
use crate::library::{Library, Track};

/// The fields a recommendation exposes; everything else on a track is dropped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SongSummary {
    pub artist_name: String,
    pub track_name: String,
    pub tempo: f64,
}

impl From<&Track> for SongSummary {
    fn from(track: &Track) -> Self {
        Self {
            artist_name: track.artist_name.clone(),
            track_name: track.track_name.clone(),
            tempo: track.tempo,
        }
    }
}

/// Outcome of a tempo query. "No dataset" and "no matches" are different
/// answers and must not collapse into an empty list.
#[derive(Debug, Clone, PartialEq)]
pub enum TempoMatch {
    Unavailable,
    Empty,
    Found(Vec<SongSummary>),
}

impl TempoMatch {
    /// Songs for a successful query, `None` when the dataset is unavailable.
    pub fn into_songs(self) -> Option<Vec<SongSummary>> {
        match self {
            TempoMatch::Unavailable => None,
            TempoMatch::Empty => Some(Vec::new()),
            TempoMatch::Found(songs) => Some(songs),
        }
    }
}

/// Select every track with `min <= tempo <= max`, in table order.
///
/// The range is not validated: an inverted range matches nothing. Tracks
/// with a NaN tempo never match.
pub fn filter_by_tempo(library: &Library, range: BpmRange) -> TempoMatch {
    let Some(tracks) = library.tracks() else {
        return TempoMatch::Unavailable;
    };

    debug!("Filtering songs with BPM between {} and {}", range.min, range.max);
    let songs: Vec<SongSummary> = tracks
        .iter()
        .filter(|track| range.contains(track.tempo))
        .map(SongSummary::from)
        .collect();

    if songs.is_empty() {
        info!("No songs found in BPM range {}", range);
        TempoMatch::Empty
    } else {
        info!("Found {} songs in BPM range {}", songs.len(), range);
        TempoMatch::Found(songs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample_library() -> Library {
        let mut with_extras = Track::new("Daft Punk", "Around the World", 121.0);
        with_extras.genre = Some("french house".to_string());
        with_extras.year = Some(1997);

        Library::from_tracks(vec![
            Track::new("A", "T", 100.0),
            Track::new("Low", "Slow", 79.9),
            Track::new("Edge", "Lower", 80.0),
            Track::new("Edge", "Upper", 120.0),
            with_extras,
            Track::new("Unknown", "No Tempo", f64::NAN),
        ])
    }

    #[test]
    fn bounds_are_inclusive() {
        let result = filter_by_tempo(&sample_library(), BpmRange::new(80.0, 120.0));
        let names: Vec<String> = match result {
            TempoMatch::Found(songs) => songs.into_iter().map(|s| s.track_name).collect(),
            other => panic!("expected matches, got {:?}", other),
        };
        assert_eq!(names, vec!["T", "Lower", "Upper"]);
    }

    #[test]
    fn projects_three_fields() {
        let result = filter_by_tempo(&sample_library(), BpmRange::new(121.0, 121.0));
        let songs = result.into_songs().unwrap();
        assert_eq!(songs.len(), 1);

        let json = serde_json::to_value(&songs[0]).unwrap();
        let object = json.as_object().unwrap();
        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["artist_name", "tempo", "track_name"]);
        assert_eq!(json["artist_name"], "Daft Punk");
    }

    #[test]
    fn no_match_is_empty_not_unavailable() {
        let result = filter_by_tempo(&sample_library(), BpmRange::new(1000.0, 1001.0));
        assert_eq!(result, TempoMatch::Empty);
        assert_eq!(result.into_songs(), Some(Vec::new()));
    }

    #[test]
    fn inverted_range_is_empty() {
        let result = filter_by_tempo(&sample_library(), BpmRange::new(120.0, 80.0));
        assert_eq!(result, TempoMatch::Empty);
    }

    #[test]
    fn unavailable_table_never_reports_an_empty_list() {
        let library = Library::unavailable("file not found");
        for range in [BpmRange::new(0.0, 1000.0), BpmRange::new(1000.0, 1001.0)] {
            let result = filter_by_tempo(&library, range);
            assert_eq!(result, TempoMatch::Unavailable);
            assert_eq!(result.into_songs(), None);
        }
    }

    #[test]
    fn empty_table_yields_empty() {
        let library = Library::from_tracks(Vec::new());
        assert_eq!(filter_by_tempo(&library, BpmRange::new(0.0, 300.0)), TempoMatch::Empty);
    }

    #[test]
    fn repeated_queries_are_identical() {
        let library = sample_library();
        let range = BpmRange::new(50.0, 150.0);
        assert_eq!(filter_by_tempo(&library, range), filter_by_tempo(&library, range));
    }

    proptest! {
        #[test]
        fn prop_results_lie_within_range(
            tempos in proptest::collection::vec(0.0..250.0f64, 0..200),
            a in 0.0..250.0f64,
            b in 0.0..250.0f64,
        ) {
            let library = Library::from_tracks(
                tempos.iter().enumerate()
                    .map(|(i, &tempo)| Track::new("artist", format!("track {}", i), tempo))
                    .collect(),
            );
            let range = BpmRange::new(a.min(b), a.max(b));

            let songs = filter_by_tempo(&library, range).into_songs().unwrap();
            for song in &songs {
                prop_assert!(range.min <= song.tempo && song.tempo <= range.max);
            }
            let expected = tempos.iter().filter(|&&t| range.min <= t && t <= range.max).count();
            prop_assert_eq!(songs.len(), expected);
        }
    }
}
