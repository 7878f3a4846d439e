// 📚 Catalog - Composition root
//
// Owns every registry for the lifetime of the process and exposes the whole
// catalog as one API surface. Relationship writes are routed through
// AssociationManager and FavoritesTracker; nothing here touches the
// mirrored fields directly.
//
// Deleting a movie does not cascade: directors, actors and users keep the
// movie's id in their back-reference lists. The `*_of` / `*_by` queries
// resolve only ids that are still registered and whose entity links back,
// so a movie registered later under a deleted id does not inherit the old
// links.

use crate::associations::AssociationManager;
use crate::config::CatalogConfig;
use crate::entities::{
    AccountRegistry, AccountView, Actor, Administrator, Director, Genre, Movie, MovieUpdate, User,
};
use crate::favorites::{self, FavoritesTracker};
use crate::registry::{ids_match, Identified, Registry};
use serde::Serialize;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct Catalog {
    config: CatalogConfig,
    movies: Registry<Movie>,
    directors: Registry<Director>,
    actors: Registry<Actor>,
    accounts: AccountRegistry,

    /// Stamp handed to the next registered movie
    next_registration: u64,
}

impl Catalog {
    pub fn new(config: CatalogConfig) -> Self {
        let movies = match config.movie_capacity {
            Some(capacity) => Registry::with_capacity_limit("movie", capacity),
            None => Registry::new("movie"),
        };
        info!(movie_capacity = ?config.movie_capacity, "catalog initialized");

        Catalog {
            config,
            movies,
            directors: Registry::new("director"),
            actors: Registry::new("actor"),
            accounts: AccountRegistry::new(),
            next_registration: 1,
        }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    // ========================================================================
    // MOVIES
    // ========================================================================

    pub fn register_movie(&mut self, mut movie: Movie) -> bool {
        movie.stamp_registration(self.next_registration);
        let registered = self.movies.register(movie);
        if registered {
            self.next_registration += 1;
        }
        registered
    }

    pub fn find_movie_by_id(&self, id: &str) -> Option<&Movie> {
        self.movies.find_by_id(id)
    }

    pub fn list_movies(&self) -> impl Iterator<Item = &Movie> + '_ {
        self.movies.list()
    }

    /// Remove the movie from the catalog. Back-references elsewhere are
    /// left untouched.
    pub fn delete_movie(&mut self, id: &str) -> bool {
        match self.movies.take(id) {
            Some(movie) => {
                info!(movie = %movie.id(), title = %movie.title, "movie deleted");
                true
            }
            None => false,
        }
    }

    /// `true` whenever the movie exists, even if the update changes nothing
    pub fn update_movie(&mut self, id: &str, update: MovieUpdate) -> bool {
        match self.movies.find_by_id_mut(id) {
            Some(movie) => {
                movie.apply_update(update);
                true
            }
            None => false,
        }
    }

    /// Add genres to a movie; `false` if the movie is unknown or every genre
    /// was already present
    pub fn add_genres<I, G>(&mut self, movie_id: &str, genres: I) -> bool
    where
        I: IntoIterator<Item = G>,
        G: Into<Genre>,
    {
        self.movies
            .find_by_id_mut(movie_id)
            .is_some_and(|movie| movie.add_genres(genres) > 0)
    }

    pub fn replace_genres<I, G>(&mut self, movie_id: &str, genres: I) -> bool
    where
        I: IntoIterator<Item = G>,
        G: Into<Genre>,
    {
        match self.movies.find_by_id_mut(movie_id) {
            Some(movie) => {
                movie.replace_genres(genres);
                true
            }
            None => false,
        }
    }

    pub fn remove_genre(&mut self, movie_id: &str, name: &str) -> bool {
        self.movies
            .find_by_id_mut(movie_id)
            .is_some_and(|movie| movie.remove_genre(name))
    }

    // ========================================================================
    // DIRECTORS & ACTORS
    // ========================================================================

    pub fn register_director(&mut self, id: &str, name: &str) -> bool {
        self.directors.register(Director::new(id, name))
    }

    pub fn find_director_by_id(&self, id: &str) -> Option<&Director> {
        self.directors.find_by_id(id)
    }

    pub fn list_directors(&self) -> impl Iterator<Item = &Director> + '_ {
        self.directors.list()
    }

    pub fn register_actor(&mut self, id: &str, name: &str) -> bool {
        self.actors.register(Actor::new(id, name))
    }

    pub fn find_actor_by_id(&self, id: &str) -> Option<&Actor> {
        self.actors.find_by_id(id)
    }

    pub fn list_actors(&self) -> impl Iterator<Item = &Actor> + '_ {
        self.actors.list()
    }

    // ========================================================================
    // ACCOUNTS
    // ========================================================================

    pub fn register_user(&mut self, id: &str, username: &str, email: &str) -> bool {
        self.accounts.register_user(User::new(id, username, email))
    }

    /// Register an administrator holding the configured default privileges
    pub fn register_admin(&mut self, id: &str, username: &str, email: &str) -> bool {
        let admin = Administrator::new(id, username, email)
            .with_privileges(&self.config.default_admin_privileges);
        self.accounts.register_admin(admin)
    }

    pub fn find_user_by_id(&self, id: &str) -> Option<&User> {
        self.accounts.find_user_by_id(id)
    }

    pub fn find_admin_by_id(&self, id: &str) -> Option<&Administrator> {
        self.accounts.find_admin_by_id(id)
    }

    pub fn list_users(&self) -> impl Iterator<Item = &User> + '_ {
        self.accounts.users().list()
    }

    pub fn list_admins(&self) -> impl Iterator<Item = &Administrator> + '_ {
        self.accounts.admins().list()
    }

    pub fn all_accounts(&self) -> impl Iterator<Item = AccountView<'_>> + '_ {
        self.accounts.all_accounts()
    }

    pub fn accounts(&self) -> &AccountRegistry {
        &self.accounts
    }

    pub fn grant_privilege(&mut self, admin_id: &str, privilege: &str) -> bool {
        self.accounts
            .find_admin_by_id_mut(admin_id)
            .is_some_and(|admin| admin.grant_privilege(privilege))
    }

    pub fn revoke_privilege(&mut self, admin_id: &str, privilege: &str) -> bool {
        self.accounts
            .find_admin_by_id_mut(admin_id)
            .is_some_and(|admin| admin.revoke_privilege(privilege))
    }

    // ========================================================================
    // ASSOCIATIONS
    // ========================================================================

    pub fn associations(&mut self) -> AssociationManager<'_> {
        AssociationManager::new(&mut self.movies, &mut self.directors, &mut self.actors)
    }

    pub fn link_director(&mut self, movie_id: &str, director_id: &str) -> bool {
        self.associations().link_director(movie_id, director_id)
    }

    pub fn link_actor(&mut self, actor_id: &str, movie_id: &str) -> bool {
        self.associations().link_actor(actor_id, movie_id)
    }

    pub fn director_of(&self, movie_id: &str) -> Option<&Director> {
        let movie = self.movies.find_by_id(movie_id)?;
        self.directors
            .find_by_id(movie.director_id()?)
            .filter(|director| director.directed(movie.id()))
    }

    pub fn cast_of(&self, movie_id: &str) -> Vec<&Actor> {
        self.movies
            .find_by_id(movie_id)
            .map(|movie| {
                resolve(&self.actors, movie.cast(), |actor| actor.appears_in(movie.id()))
            })
            .unwrap_or_default()
    }

    pub fn filmography_of(&self, actor_id: &str) -> Vec<&Movie> {
        self.actors
            .find_by_id(actor_id)
            .map(|actor| {
                resolve(&self.movies, actor.filmography(), |movie| {
                    movie.has_cast_member(actor.id())
                })
            })
            .unwrap_or_default()
    }

    pub fn movies_directed_by(&self, director_id: &str) -> Vec<&Movie> {
        self.directors
            .find_by_id(director_id)
            .map(|director| {
                resolve(&self.movies, director.movies_directed(), |movie| {
                    movie
                        .director_id()
                        .is_some_and(|id| ids_match(id, director.id()))
                })
            })
            .unwrap_or_default()
    }

    // ========================================================================
    // FAVORITES
    // ========================================================================

    pub fn favorites(&mut self) -> FavoritesTracker<'_> {
        FavoritesTracker::new(self.accounts.users_mut(), &self.movies)
    }

    pub fn add_favorite(&mut self, user_id: &str, movie_id: &str) -> bool {
        self.favorites().add_favorite(user_id, movie_id)
    }

    pub fn remove_favorite(&mut self, user_id: &str, movie_id: &str) -> bool {
        self.favorites().remove_favorite(user_id, movie_id)
    }

    pub fn clear_favorites(&mut self, user_id: &str) -> usize {
        self.favorites().clear_favorites(user_id)
    }

    /// Favorite movie ids of the user, including ids of deleted movies
    pub fn list_favorites(&self, user_id: &str) -> Vec<String> {
        favorites::favorite_ids(self.accounts.users(), user_id)
    }

    pub fn is_favorite(&self, user_id: &str, movie_id: &str) -> bool {
        favorites::has_favorite(self.accounts.users(), user_id, movie_id)
    }

    /// Favorite movies that are still registered
    pub fn favorite_movies(&self, user_id: &str) -> Vec<&Movie> {
        favorites::live_favorites(self.accounts.users(), &self.movies, user_id)
    }

    // ========================================================================
    // SUMMARY
    // ========================================================================

    pub fn summary(&self) -> CatalogSummary {
        CatalogSummary {
            movies: self.movies.len(),
            directors: self.directors.len(),
            actors: self.actors.len(),
            users: self.accounts.users().len(),
            admins: self.accounts.admins().len(),
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(CatalogConfig::default())
    }
}

/// Entity counts per registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CatalogSummary {
    pub movies: usize,
    pub directors: usize,
    pub actors: usize,
    pub users: usize,
    pub admins: usize,
}

/// Look up `ids`, keeping only entities that still link back
fn resolve<'r, E, F>(registry: &'r Registry<E>, ids: &[String], links_back: F) -> Vec<&'r E>
where
    E: Identified,
    F: Fn(&E) -> bool,
{
    let resolved: Vec<&E> = ids
        .iter()
        .filter_map(|id| registry.find_by_id(id))
        .filter(|entity| links_back(*entity))
        .collect();
    if resolved.len() < ids.len() {
        debug!(
            kind = registry.kind(),
            dangling = ids.len() - resolved.len(),
            "skipped ids of removed or replaced entities"
        );
    }
    resolved
}

// ============================================================================
// TESTS
// ============================================================================
