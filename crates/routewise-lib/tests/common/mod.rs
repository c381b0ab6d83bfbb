//! Common test utilities and fixture helpers.
//!
//! Provides the small UAE network used across integration tests, both as an
//! in-memory [`Network`] and as a seeded SQLite database in a temp directory.

use std::path::PathBuf;

use routewise_lib::{Link, Location, LocationId, Network, NewLink, Store, TransportMode};
use tempfile::TempDir;

pub const DUBAI: &str = "Dubai";
pub const ABU_DHABI: &str = "AbuDhabi";
pub const SHARJAH: &str = "Sharjah";
#[allow(dead_code)]
pub const FUJAIRAH: &str = "Fujairah";

#[allow(dead_code)]
pub fn location(id: LocationId, name: &str) -> Location {
    Location {
        id,
        name: name.to_string(),
    }
}

#[allow(dead_code)]
pub fn link(id: i64, from: LocationId, to: LocationId, distance: f64, mode: TransportMode) -> Link {
    Link {
        id,
        from,
        to,
        distance,
        mode,
    }
}

/// Dubai (1), AbuDhabi (2), Sharjah (3), plus an unconnected Fujairah (4).
#[allow(dead_code)]
pub fn uae_network() -> Network {
    Network::new(
        vec![
            location(1, DUBAI),
            location(2, ABU_DHABI),
            location(3, SHARJAH),
            location(4, FUJAIRAH),
        ],
        vec![
            link(1, 1, 2, 140.0, TransportMode::Car),
            link(2, 1, 3, 30.0, TransportMode::Car),
            link(3, 3, 2, 160.0, TransportMode::Bus),
        ],
    )
}

/// Temporary database seeded with the UAE network.
#[allow(dead_code)]
pub struct SeededDatabase {
    _temp_dir: TempDir,
    pub path: PathBuf,
}

#[allow(dead_code)]
impl SeededDatabase {
    pub fn new() -> Self {
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

    pub fn open(&self) -> Store {
        Store::open(&self.path).expect("open seeded store")
    }
}
