// 🎥 Director Entity
//
// `movies_directed` is a derived index: the mirror of `Movie::director`.
// Only the association manager appends to it.

use crate::registry::{ids_match, push_unique_id, Identified};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Director {
    id: String,

    pub name: String,

    /// Movie ids, in link order
    movies_directed: Vec<String>,
}

impl Director {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Director {
            id: id.into(),
            name: name.into(),
            movies_directed: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Movie ids this director was linked to. May contain ids of movies
    /// that were deleted or re-linked to another director since.
    pub fn movies_directed(&self) -> &[String] {
        &self.movies_directed
    }

    pub fn directed(&self, movie_id: &str) -> bool {
        self.movies_directed.iter().any(|id| ids_match(id, movie_id))
    }

    pub(crate) fn record_movie(&mut self, movie_id: &str) -> bool {
        push_unique_id(&mut self.movies_directed, movie_id)
    }
}

impl Identified for Director {
    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_director_creation() {
        let director = Director::new("D1", "Villeneuve");
        assert_eq!(director.id(), "D1");
        assert_eq!(director.name, "Villeneuve");
        assert!(director.movies_directed().is_empty());
    }

    #[test]
    fn test_record_movie_dedupes() {
        let mut director = Director::new("D1", "Villeneuve");
        assert!(director.record_movie("M1"));
        assert!(!director.record_movie("m1"));
        assert!(director.directed("M1"));
        assert!(!director.directed("M2"));
        assert_eq!(director.movies_directed(), &["M1".to_string()]);
    }
}
