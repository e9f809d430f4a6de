use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored movie record. The `id` is assigned once at creation and never
/// changes afterwards; every other field can be rewritten by a patch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub id: String,
    pub title: String,
    pub year: i32,
    pub director: String,
    pub duration: i32,
    pub rate: f64,
    pub poster: String,
    pub genre: Vec<Genre>,
}

/// The closed set of genres a movie may carry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Genre {
    Action,
    Adventure,
    Crime,
    Comedy,
    Drama,
    Fantasy,
    Horror,
    Thriller,
    #[serde(rename = "Sci-Fi")]
    SciFi,
}

impl Genre {
    pub const ALL: [Self; 9] = [
        Self::Action,
        Self::Adventure,
        Self::Crime,
        Self::Comedy,
        Self::Drama,
        Self::Fantasy,
        Self::Horror,
        Self::Thriller,
        Self::SciFi,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Action => "Action",
            Self::Adventure => "Adventure",
            Self::Crime => "Crime",
            Self::Comedy => "Comedy",
            Self::Drama => "Drama",
            Self::Fantasy => "Fantasy",
            Self::Horror => "Horror",
            Self::Thriller => "Thriller",
            Self::SciFi => "Sci-Fi",
        }
    }

    /// Exact lookup against the canonical genre names. Used by validation,
    /// where `"drama"` is not a valid submission.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|g| g.as_str() == name)
    }

    /// ASCII case-insensitive comparison for query filtering. ASCII folding
    /// keeps the match locale-independent.
    #[must_use]
    pub fn matches(self, name: &str) -> bool {
        self.as_str().eq_ignore_ascii_case(name)
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully validated creation payload. Defaults are already applied; the
/// record only lacks an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMovie {
    pub title: String,
    pub year: i32,
    pub director: String,
    pub duration: i32,
    pub rate: f64,
    pub poster: String,
    pub genre: Vec<Genre>,
}

impl NewMovie {
    #[must_use]
    pub fn into_movie(self, id: Uuid) -> Movie {
        Movie {
            id: id.to_string(),
            title: self.title,
            year: self.year,
            director: self.director,
            duration: self.duration,
            rate: self.rate,
            poster: self.poster,
            genre: self.genre,
        }
    }
}

/// A validated partial payload: only the fields present in the request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MoviePatch {
    pub title: Option<String>,
    pub year: Option<i32>,
    pub director: Option<String>,
    pub duration: Option<i32>,
    pub rate: Option<f64>,
    pub poster: Option<String>,
    pub genre: Option<Vec<Genre>>,
}

impl MoviePatch {
    /// Shallow merge: fields present in the patch replace the movie's
    /// values, absent fields keep their prior value. The id is untouched.
    pub fn apply_to(&self, movie: &mut Movie) {
        if let Some(title) = &self.title {
            movie.title = title.clone();
        }
        if let Some(year) = self.year {
            movie.year = year;
        }
        if let Some(director) = &self.director {
            movie.director = director.clone();
        }
        if let Some(duration) = self.duration {
            movie.duration = duration;
        }
        if let Some(rate) = self.rate {
            movie.rate = rate;
        }
        if let Some(poster) = &self.poster {
            movie.poster = poster.clone();
        }
        if let Some(genre) = &self.genre {
            movie.genre = genre.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_movie() -> Movie {
        Movie {
            id: "test-id".to_string(),
            title: "Blade Runner".to_string(),
            year: 1982,
            director: "Ridley Scott".to_string(),
            duration: 117,
            rate: 8.1,
            poster: "https://posters.example/blade-runner.jpg".to_string(),
            genre: vec![Genre::SciFi, Genre::Thriller],
        }
    }

    #[test]
    fn test_genre_name_round_trip() {
        for genre in Genre::ALL {
            assert_eq!(Genre::from_name(genre.as_str()), Some(genre));
        }
        assert_eq!(Genre::from_name("Romance"), None);
        // Validation lookup is exact, not case-folded
        assert_eq!(Genre::from_name("drama"), None);
    }

    #[test]
    fn test_genre_serde_rename() {
        let json = serde_json::to_string(&Genre::SciFi).unwrap();
        assert_eq!(json, "\"Sci-Fi\"");
        let back: Genre = serde_json::from_str("\"Sci-Fi\"").unwrap();
        assert_eq!(back, Genre::SciFi);
    }

    #[test]
    fn test_genre_filter_match_is_case_insensitive() {
        assert!(Genre::Drama.matches("drama"));
        assert!(Genre::Drama.matches("DRAMA"));
        assert!(Genre::SciFi.matches("sci-fi"));
        assert!(!Genre::Drama.matches("dram"));
    }

    #[test]
    fn test_patch_merges_only_present_fields() {
        let mut movie = sample_movie();
        let patch = MoviePatch {
            year: Some(1999),
            ..MoviePatch::default()
        };

        patch.apply_to(&mut movie);

        assert_eq!(movie.year, 1999);
        assert_eq!(movie.title, "Blade Runner");
        assert_eq!(movie.genre, vec![Genre::SciFi, Genre::Thriller]);
        assert_eq!(movie.id, "test-id");
    }

    #[test]
    fn test_empty_patch_is_identity() {
        let mut movie = sample_movie();
        MoviePatch::default().apply_to(&mut movie);
        assert_eq!(movie, sample_movie());
    }
}
