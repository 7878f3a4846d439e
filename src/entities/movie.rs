// 🎬 Movie Entity - Primary record of the catalog
//
// A movie owns the forward side of its relationships: the director it points
// at and the actors in its cast. Both are stored as ids and are only written
// by the association manager, which keeps the mirrored back-references on
// Director / Actor in sync.

use crate::registry::{ids_match, push_unique_id, Identified};
use serde::Serialize;
use std::hash::{Hash, Hasher};

// ============================================================================
// GENRE
// ============================================================================

/// Genre value object. Two genres are equal when their names match,
/// ignoring case ("Drama" == "drama").
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct Genre {
    name: String,
}

impl Genre {
    pub fn new(name: impl Into<String>) -> Self {
        Genre {
            name: name.into().trim().to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for Genre {
    fn eq(&self, other: &Self) -> bool {
        ids_match(&self.name, &other.name)
    }
}

impl Eq for Genre {}

impl Hash for Genre {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.to_lowercase().hash(state);
    }
}

impl From<&str> for Genre {
    fn from(name: &str) -> Self {
        Genre::new(name)
    }
}

// ============================================================================
// MOVIE UPDATE
// ============================================================================

/// Partial update of a movie's core values. `None` leaves the field as is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovieUpdate {
    pub title: Option<String>,
    pub year: Option<i32>,
    pub duration_minutes: Option<u32>,
    pub rating: Option<String>,
    pub synopsis: Option<String>,
}

impl MovieUpdate {
    pub fn is_empty(&self) -> bool {
        self == &MovieUpdate::default()
    }
}

// ============================================================================
// MOVIE ENTITY
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct Movie {
    id: String,

    pub title: String,

    /// Release year
    pub year: i32,

    pub duration_minutes: u32,

    /// Rating / classification label (e.g. "PG-13")
    pub rating: String,

    pub synopsis: Option<String>,

    genres: Vec<Genre>,

    /// Actor ids, mirrored by `Actor::filmography`
    cast: Vec<String>,

    /// Director id, mirrored by `Director::movies_directed`
    director: Option<String>,

    /// Stamp set by the catalog when the movie is registered. Tells apart
    /// two movies that held the same id at different times.
    #[serde(skip)]
    registration: u64,
}

impl Movie {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        year: i32,
        duration_minutes: u32,
        rating: impl Into<String>,
    ) -> Self {
        Movie {
            id: id.into(),
            title: title.into(),
            year,
            duration_minutes,
            rating: rating.into(),
            synopsis: None,
            genres: Vec::new(),
            cast: Vec::new(),
            director: None,
            registration: 0,
        }
    }

    /// Builder: attach synopsis
    pub fn with_synopsis(mut self, synopsis: impl Into<String>) -> Self {
        self.synopsis = Some(synopsis.into());
        self
    }

    /// Builder: add genres (duplicates by name are dropped)
    pub fn with_genres<I, G>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = G>,
        G: Into<Genre>,
    {
        self.add_genres(genres);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn genres(&self) -> &[Genre] {
        &self.genres
    }

    pub fn has_genre(&self, name: &str) -> bool {
        self.genres.iter().any(|g| ids_match(g.name(), name))
    }

    /// Add one genre; `false` if an equal genre is already present or the
    /// name is blank
    pub fn add_genre(&mut self, genre: impl Into<Genre>) -> bool {
        let genre = genre.into();
        if genre.name().is_empty() || self.genres.contains(&genre) {
            return false;
        }
        self.genres.push(genre);
        true
    }

    /// Add several genres, returns how many were new
    pub fn add_genres<I, G>(&mut self, genres: I) -> usize
    where
        I: IntoIterator<Item = G>,
        G: Into<Genre>,
    {
        let mut added = 0;
        for genre in genres {
            if self.add_genre(genre) {
                added += 1;
            }
        }
        added
    }

    /// Replace the whole genre set
    pub fn replace_genres<I, G>(&mut self, genres: I)
    where
        I: IntoIterator<Item = G>,
        G: Into<Genre>,
    {
        self.genres.clear();
        self.add_genres(genres);
    }

    pub fn remove_genre(&mut self, name: &str) -> bool {
        match self.genres.iter().position(|g| ids_match(g.name(), name)) {
            Some(index) => {
                self.genres.remove(index);
                true
            }
            None => false,
        }
    }

    /// Actor ids in the order they joined the cast
    pub fn cast(&self) -> &[String] {
        &self.cast
    }

    pub fn has_cast_member(&self, actor_id: &str) -> bool {
        self.cast.iter().any(|id| ids_match(id, actor_id))
    }

    pub fn director_id(&self) -> Option<&str> {
        self.director.as_deref()
    }

    /// Apply a partial update; returns whether anything was provided
    pub fn apply_update(&mut self, update: MovieUpdate) -> bool {
        if update.is_empty() {
            return false;
        }
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(year) = update.year {
            self.year = year;
        }
        if let Some(duration) = update.duration_minutes {
            self.duration_minutes = duration;
        }
        if let Some(rating) = update.rating {
            self.rating = rating;
        }
        if let Some(synopsis) = update.synopsis {
            self.synopsis = Some(synopsis);
        }
        true
    }

    // Relationship hooks, called only from `associations`

    pub(crate) fn set_director(&mut self, director_id: &str) -> Option<String> {
        self.director.replace(director_id.to_string())
    }

    pub(crate) fn add_cast_member(&mut self, actor_id: &str) -> bool {
        push_unique_id(&mut self.cast, actor_id)
    }

    pub(crate) fn registration(&self) -> u64 {
        self.registration
    }

    pub(crate) fn stamp_registration(&mut self, registration: u64) {
        self.registration = registration;
    }
}

impl Identified for Movie {
    fn id(&self) -> &str {
        &self.id
    }
}

// ============================================================================
// TESTS
// ============================================================================
