// 🎭 Actor Entity
//
// `filmography` mirrors `Movie::cast` and is written only by the
// association manager.

use crate::registry::{ids_match, push_unique_id, Identified};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Actor {
    id: String,

    pub name: String,

    filmography: Vec<String>,
}

impl Actor {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Actor {
            id: id.into(),
            name: name.into(),
            filmography: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Movie ids this actor appears in, in link order
    pub fn filmography(&self) -> &[String] {
        &self.filmography
    }

    pub fn appears_in(&self, movie_id: &str) -> bool {
        self.filmography.iter().any(|id| ids_match(id, movie_id))
    }

    pub(crate) fn add_to_filmography(&mut self, movie_id: &str) -> bool {
        push_unique_id(&mut self.filmography, movie_id)
    }
}

impl Identified for Actor {
    fn id(&self) -> &str {
        &self.id
    }
}
