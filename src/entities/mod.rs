// Entity Models
//
// Each entity has a case-insensitive string id. Relationship fields (cast,
// filmography, movies directed, favorites) are ids, private to the entity,
// and written only through the association manager / favorites tracker.

pub mod movie;
pub mod director;
pub mod actor;
pub mod account;

pub use movie::{Genre, Movie, MovieUpdate};
pub use director::Director;
pub use actor::Actor;
pub use account::{Account, AccountKind, AccountRegistry, AccountView, Administrator, User};
