// 🔗 Association Manager - Bidirectional links between catalog entities
//
// movie → director   (director.movies_directed mirrors it)
// movie ↔ actor      (movie.cast / actor.filmography)
//
// This is the only code path that writes those fields. Each link call
// resolves both ends before touching either, so a failed precondition leaves
// no half-written relationship behind.

use crate::entities::{Actor, Director, Movie};
use crate::error::{CatalogError, CatalogResult};
use crate::registry::{ids_match, Registry};
use tracing::{debug, warn};

/// Borrowed view over the registries whose entities reference each other
#[derive(Debug)]
pub struct AssociationManager<'a> {
    movies: &'a mut Registry<Movie>,
    directors: &'a mut Registry<Director>,
    actors: &'a mut Registry<Actor>,
}

impl<'a> AssociationManager<'a> {
    pub fn new(
        movies: &'a mut Registry<Movie>,
        directors: &'a mut Registry<Director>,
        actors: &'a mut Registry<Actor>,
    ) -> Self {
        AssociationManager {
            movies,
            directors,
            actors,
        }
    }

    // ========================================================================
    // MOVIE → DIRECTOR
    // ========================================================================

    /// Point `movie_id` at `director_id` and record the movie on the director
    ///
    /// Idempotent. Re-linking to a different director overwrites the forward
    /// reference; the previous director keeps the movie in its list.
    pub fn try_link_director(&mut self, movie_id: &str, director_id: &str) -> CatalogResult<()> {
        let director = self
            .directors
            .find_by_id_mut(director_id)
            .ok_or_else(|| CatalogError::not_found("director", director_id))?;
        let movie = self
            .movies
            .find_by_id_mut(movie_id)
            .ok_or_else(|| CatalogError::not_found("movie", movie_id))?;

        let previous = movie.set_director(director.id());
        director.record_movie(movie.id());

        match previous {
            Some(old) if !ids_match(&old, director.id()) => {
                warn!(
                    movie = %movie.id(),
                    previous_director = %old,
                    director = %director.id(),
                    "movie re-linked; previous director still lists it"
                );
            }
            _ => debug!(movie = %movie.id(), director = %director.id(), "director linked"),
        }
        Ok(())
    }

    pub fn link_director(&mut self, movie_id: &str, director_id: &str) -> bool {
        match self.try_link_director(movie_id, director_id) {
            Ok(()) => true,
            Err(err) => {
                debug!(reason = %err, "director link rejected");
                false
            }
        }
    }

    // ========================================================================
    // MOVIE ↔ ACTOR
    // ========================================================================

    /// Add the actor to the movie's cast and the movie to the actor's
    /// filmography. Both sides or neither.
    pub fn try_link_actor(&mut self, actor_id: &str, movie_id: &str) -> CatalogResult<()> {
        let actor = self
            .actors
            .find_by_id_mut(actor_id)
            .ok_or_else(|| CatalogError::not_found("actor", actor_id))?;
        let movie = self
            .movies
            .find_by_id_mut(movie_id)
            .ok_or_else(|| CatalogError::not_found("movie", movie_id))?;

        let joined_cast = movie.add_cast_member(actor.id());
        let joined_filmography = actor.add_to_filmography(movie.id());
        if joined_cast != joined_filmography {
            // filmography still held the id of a deleted movie
            debug!(
                actor = %actor.id(),
                movie = %movie.id(),
                "filmography entry reused for re-registered movie"
            );
        }

        debug!(
            actor = %actor.id(),
            movie = %movie.id(),
            new = joined_cast,
            "actor linked"
        );
        Ok(())
    }

    pub fn link_actor(&mut self, actor_id: &str, movie_id: &str) -> bool {
        match self.try_link_actor(actor_id, movie_id) {
            Ok(()) => true,
            Err(err) => {
                debug!(reason = %err, "actor link rejected");
                false
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
