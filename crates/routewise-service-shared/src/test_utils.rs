//! Test utilities for service handler testing.
//!
//! Provides a temporary database seeded with a small UAE network:
//! Dubai, AbuDhabi and Sharjah connected by three links, plus an isolated
//! Fujairah.

use std::path::{Path, PathBuf};

use routewise_lib::{NewLink, Store};
use tempfile::TempDir;

use crate::state::AppState;

/// Known location names in the seeded database.
pub mod fixture_locations {
    pub const DUBAI: &str = "Dubai";
    pub const ABU_DHABI: &str = "AbuDhabi";
    pub const SHARJAH: &str = "Sharjah";
    /// Has no links.
    pub const FUJAIRAH: &str = "Fujairah";
}

/// Seeded database that is removed when dropped.
pub struct SeededDatabase {
    _temp_dir: TempDir,
    path: PathBuf,
}

impl SeededDatabase {
    /// Create and seed a new database in a fresh temp directory.
    ///
    /// # Panics
    ///
    /// Panics if the temp directory or database cannot be created.
    pub fn new() -> Self {
        use fixture_locations::*;

        let temp_dir = TempDir::new().expect("create temp dir");
        let path = temp_dir.path().join("routewise.db");
        let store = Store::create(&path).expect("create store");

        for name in [DUBAI, ABU_DHABI, SHARJAH, FUJAIRAH] {
            store.add_location(name).expect("seed location");
        }
        for (from, to, distance, mode) in [
            (DUBAI, ABU_DHABI, 140.0, "CAR"),
            (DUBAI, SHARJAH, 30.0, "CAR"),
            (SHARJAH, ABU_DHABI, 160.0, "BUS"),
        ] {
            store
                .persist_link(&NewLink {
                    from_city: from.to_string(),
                    to_city: to.to_string(),
                    distance,
                    mode: mode.to_string(),
                })
                .expect("seed link");
        }

        Self {
            _temp_dir: temp_dir,
            path,
        }
    }

    /// Path to the seeded database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Application state pointing at this database.
    pub fn state(&self) -> AppState {
        AppState::from_path(&self.path)
    }
}

impl Default for SeededDatabase {
    fn default() -> Self {
        Self::new()
    }
}

/// Generate a unique request ID for testing.
pub fn test_request_id() -> String {
    format!("test-{}", uuid::Uuid::now_v7())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_database_exists() {
        let db = SeededDatabase::new();
        assert!(db.path().exists(), "seeded database not found at {:?}", db.path());
    }

    #[test]
    fn test_seeded_database_contains_fixture_locations() {
        let db = SeededDatabase::new();
        let mut store = Store::open(db.path()).unwrap();
        let network = store.load_network().unwrap();

        assert!(network
            .location_id_by_name(fixture_locations::DUBAI)
            .is_some());
        assert!(network
            .location_id_by_name(fixture_locations::FUJAIRAH)
            .is_some());
        assert_eq!(network.links.len(), 3);
    }

    #[test]
    fn test_request_id_unique() {
        let id1 = test_request_id();
        let id2 = test_request_id();
        assert_ne!(id1, id2);
    }
}
