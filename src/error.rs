// ⚠️ Catalog Errors
//
// Every rejection the catalog can produce is an expected outcome. The boolean
// API collapses these into `false`; the `try_*` API keeps the reason.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The entity or argument carried an empty id
    #[error("{kind} id must not be empty")]
    InvalidId { kind: &'static str },

    /// Another entity of the same kind already uses this id (case-insensitive)
    #[error("{kind} '{id}' is already registered")]
    DuplicateId { kind: &'static str, id: String },

    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },

    /// The registry reached its configured size limit
    #[error("{kind} registry is full (capacity {capacity})")]
    CapacityExceeded { kind: &'static str, capacity: usize },

    /// The relationship already exists (e.g. movie already favorited)
    #[error("{kind} '{id}' is already linked")]
    AlreadyLinked { kind: &'static str, id: String },
}

impl CatalogError {
    pub fn not_found(kind: &'static str, id: &str) -> Self {
        CatalogError::NotFound {
            kind,
            id: id.to_string(),
        }
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CatalogError::DuplicateId {
            kind: "movie",
            id: "M1".to_string(),
        };
        assert_eq!(err.to_string(), "movie 'M1' is already registered");

        let err = CatalogError::CapacityExceeded {
            kind: "movie",
            capacity: 3,
        };
        assert_eq!(err.to_string(), "movie registry is full (capacity 3)");

        assert_eq!(
            CatalogError::not_found("actor", "A9").to_string(),
            "actor 'A9' not found"
        );
    }
}
