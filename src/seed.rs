// 🌱 Seed Import - Populate a catalog from a JSON document
//
// Input only: the document is applied through the public Catalog API, so
// every uniqueness and association rule applies exactly as it would for
// interactive callers. Rejected entries are counted and logged, never fatal.

use crate::catalog::Catalog;
use crate::entities::Movie;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{info, warn};

// ============================================================================
// DOCUMENT
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SeedDocument {
    pub directors: Vec<PersonSeed>,
    pub actors: Vec<PersonSeed>,
    pub movies: Vec<MovieSeed>,
    pub users: Vec<AccountSeed>,
    pub admins: Vec<AccountSeed>,
    pub favorites: Vec<FavoriteSeed>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PersonSeed {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MovieSeed {
    pub id: String,
    pub title: String,
    pub year: i32,
    pub duration_minutes: u32,
    pub rating: String,
    #[serde(default)]
    pub synopsis: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    /// Director id to link once the movie is registered
    #[serde(default)]
    pub director: Option<String>,
    /// Actor ids to link once the movie is registered
    #[serde(default)]
    pub cast: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AccountSeed {
    pub id: String,
    pub username: String,
    pub email: String,
    /// Only meaningful for administrators
    #[serde(default)]
    pub privileges: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FavoriteSeed {
    pub user: String,
    pub movie: String,
}

// ============================================================================
// REPORT
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub applied: usize,
    pub rejected: usize,
}

impl SeedReport {
    fn record(&mut self, ok: bool, kind: &str, id: &str) {
        if ok {
            self.applied += 1;
        } else {
            self.rejected += 1;
            warn!(kind, id, "seed entry rejected");
        }
    }

    pub fn total(&self) -> usize {
        self.applied + self.rejected
    }
}

// ============================================================================
// LOADING & APPLYING
// ============================================================================

impl SeedDocument {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Invalid seed document")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read seed file {}", path.display()))?;
        Self::from_json_str(&raw).with_context(|| format!("In seed file {}", path.display()))
    }

    /// Apply every entry in dependency order: people, movies (with their
    /// links), accounts, favorites
    pub fn apply(&self, catalog: &mut Catalog) -> SeedReport {
        let mut report = SeedReport::default();

        for director in &self.directors {
            let ok = catalog.register_director(&director.id, &director.name);
            report.record(ok, "director", &director.id);
        }
        for actor in &self.actors {
            let ok = catalog.register_actor(&actor.id, &actor.name);
            report.record(ok, "actor", &actor.id);
        }

        for seed in &self.movies {
            let mut movie = Movie::new(
                seed.id.as_str(),
                seed.title.as_str(),
                seed.year,
                seed.duration_minutes,
                seed.rating.as_str(),
            )
            .with_genres(seed.genres.iter().map(String::as_str));
            movie.synopsis = seed.synopsis.clone();

            let registered = catalog.register_movie(movie);
            report.record(registered, "movie", &seed.id);
            if !registered {
                continue;
            }

            if let Some(director_id) = &seed.director {
                let ok = catalog.link_director(&seed.id, director_id);
                report.record(ok, "director link", director_id);
            }
            for actor_id in &seed.cast {
                let ok = catalog.link_actor(actor_id, &seed.id);
                report.record(ok, "cast link", actor_id);
            }
        }

        for user in &self.users {
            let ok = catalog.register_user(&user.id, &user.username, &user.email);
            report.record(ok, "user", &user.id);
        }
        for admin in &self.admins {
            let ok = catalog.register_admin(&admin.id, &admin.username, &admin.email);
            report.record(ok, "administrator", &admin.id);
            if ok {
                for privilege in &admin.privileges {
                    catalog.grant_privilege(&admin.id, privilege);
                }
            }
        }

        for favorite in &self.favorites {
            let ok = catalog.add_favorite(&favorite.user, &favorite.movie);
            report.record(ok, "favorite", &favorite.movie);
        }

        info!(
            applied = report.applied,
            rejected = report.rejected,
            "seed document applied"
        );
        report
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: &str = r#"{
        "directors": [{ "id": "D1", "name": "Villeneuve" }],
        "actors": [
            { "id": "A1", "name": "Zendaya" },
            { "id": "A2", "name": "Timothée Chalamet" }
        ],
        "movies": [
            {
                "id": "M1", "title": "Dune", "year": 2021, "duration_minutes": 155,
                "rating": "PG-13", "genres": ["Sci-Fi", "sci-fi", "Adventure"],
                "synopsis": "A noble family becomes embroiled in a war.",
                "director": "D1", "cast": ["A1", "A2", "A9"]
            },
            { "id": "m1", "title": "Duplicate", "year": 2000, "duration_minutes": 90, "rating": "R" }
        ],
        "users": [{ "id": "U1", "username": "ana", "email": "ana@example.com" }],
        "admins": [{
            "id": "AD1", "username": "root", "email": "root@example.com",
            "privileges": ["catalog:write"]
        }],
        "favorites": [{ "user": "U1", "movie": "M1" }, { "user": "U1", "movie": "M1" }]
    }"#;

    #[test]
    fn test_apply_seed_document() {
        let document = SeedDocument::from_json_str(SEED).unwrap();
        let mut catalog = Catalog::default();
        let report = document.apply(&mut catalog);

        // rejected: duplicate movie, unknown actor A9, duplicate favorite
        assert_eq!(report.rejected, 3);
        assert_eq!(report.applied, 10);
        assert_eq!(report.total(), 13);

        let dune = catalog.find_movie_by_id("M1").unwrap();
        assert_eq!(dune.title, "Dune");
        assert_eq!(dune.genres().len(), 2);
        assert_eq!(dune.director_id(), Some("D1"));
        assert_eq!(dune.cast().len(), 2);
        assert!(dune.synopsis.is_some());

        assert!(catalog.find_admin_by_id("AD1").unwrap().has_privilege("catalog:write"));
        assert_eq!(catalog.list_favorites("U1"), vec!["M1".to_string()]);
    }

    #[test]
    fn test_empty_document() {
        let document = SeedDocument::from_json_str("{}").unwrap();
        let mut catalog = Catalog::default();
        assert_eq!(document.apply(&mut catalog), SeedReport::default());
    }

    #[test]
    fn test_malformed_document() {
        let err = SeedDocument::from_json_str(r#"{ "movies": [{ "id": "M1" }] }"#).unwrap_err();
        assert!(err.to_string().contains("Invalid seed document"));
    }
}
