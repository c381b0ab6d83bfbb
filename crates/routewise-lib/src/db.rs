use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::mode::{time_of, TransportMode};
use crate::network::{is_valid_link_distance, Link, LinkId, Location, LocationId, Network};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS cities (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);
CREATE TABLE IF NOT EXISTS routes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    from_city_id INTEGER NOT NULL,
    to_city_id INTEGER NOT NULL,
    distance REAL NOT NULL,
    mode TEXT NOT NULL,
    time_minutes REAL NOT NULL,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);
";

/// A stored link joined with its endpoint names, as listed to users.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkRecord {
    #[serde(flatten)]
    pub link: Link,
    pub from_city: String,
    pub to_city: String,
    /// Travel time recorded when the link was persisted.
    pub time_minutes: f64,
    pub created_at: Option<String>,
}

/// Input for persisting a new link between two named locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLink {
    pub from_city: String,
    pub to_city: String,
    pub distance: f64,
    pub mode: String,
}

/// SQLite-backed store of locations and links.
pub struct Store {
    connection: Connection,
}

impl Store {
    /// Open an existing database file.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::DatabaseNotFound {
                path: path.to_path_buf(),
            });
        }
        let connection = Connection::open(path)?;
        debug!(path = %path.display(), "opened store");
        Ok(Self { connection })
    }

    /// Open or create a database file, creating tables when absent.
    pub fn create(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let store = Self {
            connection: Connection::open(path)?,
        };
        store.ensure_tables()?;
        debug!(path = %path.display(), "initialized store");
        Ok(store)
    }

    /// Create an empty in-memory store.
    pub fn in_memory() -> Result<Self> {
        let store = Self {
            connection: Connection::open_in_memory()?,
        };
        store.ensure_tables()?;
        Ok(store)
    }

    fn ensure_tables(&self) -> Result<()> {
        self.connection.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Insert a location, returning its new identifier.
    pub fn add_location(&self, name: &str) -> Result<LocationId> {
        self.connection
            .execute("INSERT INTO cities (name) VALUES (?1)", [name])?;
        Ok(self.connection.last_insert_rowid())
    }

    /// All locations ordered by name.
    pub fn fetch_locations(&self) -> Result<Vec<Location>> {
        fetch_locations(&self.connection)
    }

    /// All links ordered by id.
    pub fn fetch_links(&self) -> Result<Vec<Link>> {
        fetch_links(&self.connection)
    }

    /// All links with endpoint names, newest first.
    pub fn fetch_links_with_names(&self) -> Result<Vec<LinkRecord>> {
        let mut stmt = self.connection.prepare(
            "SELECT r.id, r.from_city_id, r.to_city_id, r.distance, r.mode, r.time_minutes,
                    r.created_at, c1.name, c2.name
             FROM routes r
             JOIN cities c1 ON r.from_city_id = c1.id
             JOIN cities c2 ON r.to_city_id = c2.id
             ORDER BY r.created_at DESC, r.id DESC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(LinkRecord {
                link: row_to_link(row)?,
                time_minutes: row.get(5)?,
                created_at: row.get(6)?,
                from_city: row.get(7)?,
                to_city: row.get(8)?,
            })
        })?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    /// Read both tables inside one transaction so the snapshot is consistent.
    pub fn load_network(&mut self) -> Result<Network> {
        let tx = self.connection.transaction()?;
        let locations = fetch_locations(&tx)?;
        let links = fetch_links(&tx)?;
        tx.commit()?;

        let unknown_modes = links.iter().filter(|link| !link.mode.is_known()).count();
        if unknown_modes > 0 {
            warn!(
                unknown_modes,
                "links with unsupported modes are priced as CAR"
            );
        }

        debug!(
            locations = locations.len(),
            links = links.len(),
            "loaded network snapshot"
        );
        Ok(Network::new(locations, links))
    }

    /// Validate and persist a new link between two named locations.
    ///
    /// The stored travel time is derived from the distance and mode.
    pub fn persist_link(&self, new_link: &NewLink) -> Result<Link> {
        if !is_valid_link_distance(new_link.distance) {
            return Err(Error::InvalidDistance {
                distance: new_link.distance,
            });
        }
        let mode: TransportMode = new_link.mode.parse()?;

        let from = self.location_id(&new_link.from_city)?;
        let to = self.location_id(&new_link.to_city)?;
        let time_minutes = time_of(new_link.distance, &mode);

        self.connection.execute(
            "INSERT INTO routes (from_city_id, to_city_id, distance, mode, time_minutes)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![from, to, new_link.distance, mode.as_str(), time_minutes],
        )?;
        let id: LinkId = self.connection.last_insert_rowid();
        debug!(id, from, to, mode = %mode, "persisted link");

        Ok(Link {
            id,
            from,
            to,
            distance: new_link.distance,
            mode,
        })
    }

    fn location_id(&self, name: &str) -> Result<LocationId> {
        let id = self
            .connection
            .query_row("SELECT id FROM cities WHERE name = ?1", [name], |row| {
                row.get(0)
            })
            .optional()?;

        match id {
            Some(id) => Ok(id),
            None => {
                let network = Network::new(self.fetch_locations()?, Vec::new());
                Err(Error::UnknownLocation {
                    name: name.to_string(),
                    suggestions: network.fuzzy_location_matches(name, 3),
                })
            }
        }
    }
}

fn fetch_locations(connection: &Connection) -> Result<Vec<Location>> {
    let mut stmt = connection.prepare("SELECT id, name FROM cities ORDER BY name, id")?;
    let rows = stmt.query_map([], |row| {
        Ok(Location {
            id: row.get(0)?,
            name: row.get(1)?,
        })
    })?;

    let mut locations = Vec::new();
    for row in rows {
        locations.push(row?);
    }
    Ok(locations)
}

fn fetch_links(connection: &Connection) -> Result<Vec<Link>> {
    let mut stmt = connection
        .prepare("SELECT id, from_city_id, to_city_id, distance, mode FROM routes ORDER BY id")?;
    let rows = stmt.query_map([], row_to_link)?;

    let mut links = Vec::new();
    for row in rows {
        links.push(row?);
    }
    Ok(links)
}

fn row_to_link(row: &Row<'_>) -> rusqlite::Result<Link> {
    let mode: String = row.get(4)?;
    Ok(Link {
        id: row.get(0)?,
        from: row.get(1)?,
        to: row.get(2)?,
        distance: row.get(3)?,
        mode: TransportMode::from(mode),
    })
}
