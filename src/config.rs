// ⚙️ Catalog Configuration
//
// Optional JSON file plus environment overrides. Every field has a default,
// so an empty object (or no file at all) yields an unbounded catalog.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable overriding `movie_capacity`
pub const ENV_MOVIE_CAPACITY: &str = "MOVIE_CATALOG_MOVIE_CAPACITY";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    /// Maximum number of movies held at once; `None` = unbounded
    pub movie_capacity: Option<usize>,

    /// Privileges granted to every newly registered administrator
    pub default_admin_privileges: Vec<String>,
}

impl CatalogConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Invalid catalog configuration")
    }

    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_json_str(&raw).with_context(|| format!("In config file {}", path.display()))
    }

    /// Apply overrides from the process environment
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    fn with_overrides_from<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_MOVIE_CAPACITY) {
            let raw = raw.trim();
            self.movie_capacity = if raw.is_empty() || raw.eq_ignore_ascii_case("none") {
                None
            } else {
                Some(
                    raw.parse::<usize>()
                        .with_context(|| format!("{ENV_MOVIE_CAPACITY} must be a number, got '{raw}'"))?,
                )
            };
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_from_empty_object() {
        let config = CatalogConfig::from_json_str("{}").unwrap();
        assert_eq!(config, CatalogConfig::default());
        assert!(config.movie_capacity.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let config = CatalogConfig::from_json_str(
            r#"{ "movie_capacity": 50, "default_admin_privileges": ["catalog:write"] }"#,
        )
        .unwrap();
        assert_eq!(config.movie_capacity, Some(50));
        assert_eq!(config.default_admin_privileges, vec!["catalog:write"]);
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(CatalogConfig::from_json_str(r#"{ "capacity": 3 }"#).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "movie_capacity": 2 }}"#).unwrap();

        let config = CatalogConfig::load(file.path()).unwrap();
        assert_eq!(config.movie_capacity, Some(2));
    }

    #[test]
    fn test_load_missing_file_reports_path() {
        let err = CatalogConfig::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }

    #[test]
    fn test_env_overrides() {
        let config = CatalogConfig::default()
            .with_overrides_from(|_| Some("7".to_string()))
            .unwrap();
        assert_eq!(config.movie_capacity, Some(7));

        let config = CatalogConfig {
            movie_capacity: Some(7),
            ..Default::default()
        }
        .with_overrides_from(|_| Some("none".to_string()))
        .unwrap();
        assert!(config.movie_capacity.is_none());

        let untouched = CatalogConfig::default().with_overrides_from(|_| None).unwrap();
        assert_eq!(untouched, CatalogConfig::default());

        assert!(CatalogConfig::default()
            .with_overrides_from(|_| Some("lots".to_string()))
            .is_err());
    }
}
