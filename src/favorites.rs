// ⭐ Favorites Tracker - Per-user favorite movies
//
// Favorites are stored as movie ids on the user, deduplicated by id, each
// with the registration stamp of the movie it was added for.
// Adding requires the movie to be registered; removing does not, so a
// favorite left dangling by a movie deletion can still be cleared.
//
// The read helpers at the bottom take shared borrows so the catalog can
// answer favorite queries without opening a tracker.

use crate::entities::{Movie, User};
use crate::error::{CatalogError, CatalogResult};
use crate::registry::Registry;
use tracing::debug;

#[derive(Debug)]
pub struct FavoritesTracker<'a> {
    users: &'a mut Registry<User>,
    movies: &'a Registry<Movie>,
}

impl<'a> FavoritesTracker<'a> {
    pub fn new(users: &'a mut Registry<User>, movies: &'a Registry<Movie>) -> Self {
        FavoritesTracker { users, movies }
    }

    pub fn try_add_favorite(&mut self, user_id: &str, movie_id: &str) -> CatalogResult<()> {
        let movie = self
            .movies
            .find_by_id(movie_id)
            .ok_or_else(|| CatalogError::not_found("movie", movie_id))?;
        let user = self
            .users
            .find_by_id_mut(user_id)
            .ok_or_else(|| CatalogError::not_found("user", user_id))?;

        if !user.add_favorite(movie.id(), movie.registration()) {
            return Err(CatalogError::AlreadyLinked {
                kind: "favorite",
                id: movie.id().to_string(),
            });
        }
        debug!(user = %user.id(), movie = %movie.id(), "favorite added");
        Ok(())
    }

    /// `false` if the user or movie is unknown, or the movie is already a
    /// favorite
    pub fn add_favorite(&mut self, user_id: &str, movie_id: &str) -> bool {
        match self.try_add_favorite(user_id, movie_id) {
            Ok(()) => true,
            Err(err) => {
                debug!(reason = %err, "favorite rejected");
                false
            }
        }
    }

    pub fn try_remove_favorite(&mut self, user_id: &str, movie_id: &str) -> CatalogResult<()> {
        let user = self
            .users
            .find_by_id_mut(user_id)
            .ok_or_else(|| CatalogError::not_found("user", user_id))?;

        if !user.remove_favorite(movie_id) {
            return Err(CatalogError::not_found("favorite", movie_id));
        }
        debug!(user = %user.id(), movie = %movie_id, "favorite removed");
        Ok(())
    }

    pub fn remove_favorite(&mut self, user_id: &str, movie_id: &str) -> bool {
        self.try_remove_favorite(user_id, movie_id).is_ok()
    }

    /// Snapshot of the user's favorite movie ids; empty for unknown users
    pub fn list_favorites(&self, user_id: &str) -> Vec<String> {
        favorite_ids(self.users, user_id)
    }

    pub fn is_favorite(&self, user_id: &str, movie_id: &str) -> bool {
        has_favorite(self.users, user_id, movie_id)
    }

    pub fn favorite_movies(&self, user_id: &str) -> Vec<&Movie> {
        live_favorites(self.users, self.movies, user_id)
    }

    /// Drop every favorite of the user, returns how many were removed
    pub fn clear_favorites(&mut self, user_id: &str) -> usize {
        match self.users.find_by_id_mut(user_id) {
            Some(user) => {
                let removed = user.clear_favorites();
                debug!(user = %user.id(), removed, "favorites cleared");
                removed
            }
            None => 0,
        }
    }
}

// ============================================================================
// READ HELPERS
// ============================================================================

pub(crate) fn favorite_ids(users: &Registry<User>, user_id: &str) -> Vec<String> {
    users
        .find_by_id(user_id)
        .map(|user| user.favorites().map(str::to_string).collect())
        .unwrap_or_default()
}

pub(crate) fn has_favorite(users: &Registry<User>, user_id: &str, movie_id: &str) -> bool {
    users
        .find_by_id(user_id)
        .is_some_and(|user| user.is_favorite(movie_id))
}

/// Favorites that still point at the movie they were added for. A favorite
/// whose movie was deleted stays listed by id but never resolves, even if
/// another movie is registered under the same id later.
pub(crate) fn live_favorites<'r>(
    users: &'r Registry<User>,
    movies: &'r Registry<Movie>,
    user_id: &str,
) -> Vec<&'r Movie> {
    let Some(user) = users.find_by_id(user_id) else {
        return Vec::new();
    };
    let live: Vec<&Movie> = user
        .favorites()
        .filter_map(|movie_id| movies.find_by_id(movie_id))
        .filter(|movie| user.favorite_registration(movie.id()) == Some(movie.registration()))
        .collect();
    if live.len() < user.favorite_count() {
        debug!(
            user = %user.id(),
            stale = user.favorite_count() - live.len(),
            "skipped favorites of removed movies"
        );
    }
    live
}
