//! In-memory movie collection.
//!
//! The store exclusively owns the record list; handlers only go through the
//! operations below and never hold references across requests. The axum
//! runtime is multi-threaded, so the list sits behind a read-write lock:
//! reads clone snapshots out, every mutation takes the write guard exactly
//! once.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::models::Movie;

mod seed;

/// Optional criteria for listing movies. Both filters AND-compose.
#[derive(Debug, Clone, Default)]
pub struct MovieFilter {
    /// Case-insensitive exact match against any of a record's genres.
    pub genre: Option<String>,

    /// Keeps records with `rate >= min_rate`.
    pub min_rate: Option<f64>,
}

impl MovieFilter {
    fn accepts(&self, movie: &Movie) -> bool {
        if let Some(genre) = &self.genre
            && !movie.genre.iter().any(|g| g.matches(genre))
        {
            return false;
        }
        if let Some(min_rate) = self.min_rate
            && movie.rate < min_rate
        {
            return false;
        }
        true
    }
}

#[derive(Clone)]
pub struct MovieStore {
    movies: Arc<RwLock<Vec<Movie>>>,
}

impl MovieStore {
    #[must_use]
    pub fn new(movies: Vec<Movie>) -> Self {
        Self {
            movies: Arc::new(RwLock::new(movies)),
        }
    }

    /// Builds a store holding the embedded seed dataset. The seeds are the
    /// only persistence; mutations are lost on restart.
    pub fn seeded() -> anyhow::Result<Self> {
        Ok(Self::new(seed::load()?))
    }

    pub async fn find_all(&self, filter: &MovieFilter) -> Vec<Movie> {
        let movies = self.movies.read().await;
        movies
            .iter()
            .filter(|m| filter.accepts(m))
            .cloned()
            .collect()
    }

    pub async fn find_by_id(&self, id: &str) -> Option<Movie> {
        let movies = self.movies.read().await;
        movies.iter().find(|m| m.id == id).cloned()
    }

    /// Appends to the end of the collection. The caller supplies a record
    /// that already carries a freshly generated id.
    pub async fn insert(&self, movie: Movie) -> Movie {
        let mut movies = self.movies.write().await;
        movies.push(movie.clone());
        movie
    }

    /// Overwrites the record with the matching id in place, preserving
    /// collection order. Returns `None` when the id is unknown.
    pub async fn replace(&self, id: &str, movie: Movie) -> Option<Movie> {
        let mut movies = self.movies.write().await;
        let slot = movies.iter_mut().find(|m| m.id == id)?;
        *slot = movie.clone();
        Some(movie)
    }

    /// Removes the record permanently. Returns `false` when the id is
    /// unknown.
    pub async fn remove(&self, id: &str) -> bool {
        let mut movies = self.movies.write().await;
        let before = movies.len();
        movies.retain(|m| m.id != id);
        movies.len() < before
    }

    pub async fn len(&self) -> usize {
        self.movies.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.movies.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Genre;

    fn movie(id: &str, title: &str, rate: f64, genre: Vec<Genre>) -> Movie {
        Movie {
            id: id.to_string(),
            title: title.to_string(),
            year: 2000,
            director: "Someone".to_string(),
            duration: 120,
            rate,
            poster: "https://posters.example/x.jpg".to_string(),
            genre,
        }
    }

    fn test_store() -> MovieStore {
        MovieStore::new(vec![
            movie("1", "A", 9.0, vec![Genre::Drama]),
            movie("2", "B", 7.0, vec![Genre::Drama, Genre::Crime]),
            movie("3", "C", 8.5, vec![Genre::SciFi]),
        ])
    }

    #[tokio::test]
    async fn test_find_all_without_filter_returns_everything_in_order() {
        let store = test_store();
        let all = store.find_all(&MovieFilter::default()).await;
        let ids: Vec<&str> = all.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[tokio::test]
    async fn test_filters_compose_with_and() {
        let store = test_store();

        let filter = MovieFilter {
            genre: Some("drama".to_string()),
            min_rate: Some(8.0),
        };
        let hits = store.find_all(&filter).await;
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "1");
    }

    #[tokio::test]
    async fn test_genre_filter_is_case_insensitive() {
        let store = test_store();

        let filter = MovieFilter {
            genre: Some("SCI-FI".to_string()),
            min_rate: None,
        };
        let hits = store.find_all(&filter).await;
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "3");
    }

    #[tokio::test]
    async fn test_insert_appends_to_the_end() {
        let store = test_store();
        store.insert(movie("4", "D", 5.0, vec![Genre::Comedy])).await;

        let all = store.find_all(&MovieFilter::default()).await;
        assert_eq!(all.last().map(|m| m.id.as_str()), Some("4"));
        assert_eq!(store.len().await, 4);
    }

    #[tokio::test]
    async fn test_replace_preserves_order() {
        let store = test_store();
        let replacement = movie("2", "B2", 6.5, vec![Genre::Crime]);

        let replaced = store.replace("2", replacement).await;
        assert_eq!(replaced.map(|m| m.title), Some("B2".to_string()));

        let ids: Vec<String> = store
            .find_all(&MovieFilter::default())
            .await
            .into_iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[tokio::test]
    async fn test_replace_unknown_id_is_none() {
        let store = test_store();
        let result = store
            .replace("nope", movie("nope", "X", 1.0, vec![Genre::Drama]))
            .await;
        assert!(result.is_none());
        assert_eq!(store.len().await, 3);
    }

    #[tokio::test]
    async fn test_remove_is_permanent() {
        let store = test_store();
        assert!(store.remove("2").await);
        assert!(!store.remove("2").await);
        assert!(store.find_by_id("2").await.is_none());
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_seeded_store_parses_embedded_dataset() {
        let store = MovieStore::seeded().expect("seed dataset must parse");
        assert!(!store.is_empty().await);
    }
}
