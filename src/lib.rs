// Movie Catalog - Core Library
// In-memory registries for movies, directors, actors and accounts, plus the
// association logic that keeps their cross-references consistent.

pub mod error;
pub mod registry;
pub mod entities;
pub mod associations;
pub mod favorites;
pub mod catalog;
pub mod config;
pub mod seed;

// Re-export commonly used types
pub use error::{CatalogError, CatalogResult};
pub use registry::{ids_match, Identified, Registry};
pub use entities::{
    Account, AccountKind, AccountRegistry, AccountView,
    Actor, Administrator, Director, Genre, Movie, MovieUpdate, User,
};
pub use associations::AssociationManager;
pub use favorites::FavoritesTracker;
pub use catalog::{Catalog, CatalogSummary};
pub use config::CatalogConfig;
pub use seed::{SeedDocument, SeedReport};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
