//! Handlers that inspect or edit the stored travel network.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use routewise_cli::messages::explain;
use routewise_cli::output::{
    format_link_added_text, format_links_text, format_locations_text, OutputFormat,
};
use routewise_lib::{resolve_database_path, LinkRecord, Location, NewLink, Store};

use super::open_store;

/// Arguments for the add-link command.
#[derive(Debug, Clone)]
pub struct AddLinkArgs {
    pub from: String,
    pub to: String,
    pub distance: f64,
    pub mode: String,
}

#[derive(Debug, Serialize)]
struct DatabaseInfo {
    database: String,
    locations: usize,
    links: usize,
}

/// Handle `init`: create the database and its tables if absent.
pub fn handle_init(target: Option<&Path>, format: OutputFormat) -> Result<()> {
    let path = resolve_database_path(target).context("failed to resolve the database path")?;
    let store = Store::create(&path)
        .with_context(|| format!("failed to initialize database at {}", path.display()))?;
    let info = DatabaseInfo {
        database: path.display().to_string(),
        locations: store.fetch_locations()?.len(),
        links: store.fetch_links()?.len(),
    };
    info!(path = %path.display(), "database ready");

    format.emit(&info, |info| {
        format!(
            "Database ready at {} ({} locations, {} links)\n",
            info.database, info.locations, info.links
        )
    })
}

/// Handle `cities`: list locations ordered by name.
pub fn handle_cities(target: Option<&Path>, format: OutputFormat) -> Result<()> {
    let store = open_store(target)?;
    let locations = store.fetch_locations().context("failed to read locations")?;
    format.emit(locations.as_slice(), format_locations_text)
}

/// Handle `add-city`.
pub fn handle_add_city(target: Option<&Path>, format: OutputFormat, name: &str) -> Result<()> {
    let name = name.trim();
    if name.is_empty() {
        return Err(anyhow::anyhow!("location name must not be empty"));
    }
    let store = open_store(target)?;
    let id = store
        .add_location(name)
        .with_context(|| format!("failed to add location '{}'; names must be unique", name))?;

    let location = Location {
        id,
        name: name.to_string(),
    };
    format.emit(&location, |location| {
        format!("Added location {} (id {})\n", location.name, location.id)
    })
}

/// Handle `links`: list stored links, newest first.
pub fn handle_links(target: Option<&Path>, format: OutputFormat) -> Result<()> {
    let store = open_store(target)?;
    let records = store
        .fetch_links_with_names()
        .context("failed to read links")?;
    format.emit(records.as_slice(), format_links_text)
}

/// Handle `add-link`: validate and persist a new link.
pub fn handle_add_link(target: Option<&Path>, format: OutputFormat, args: &AddLinkArgs) -> Result<()> {
    let store = open_store(target)?;
    let link = store
        .persist_link(&NewLink {
            from_city: args.from.clone(),
            to_city: args.to.clone(),
            distance: args.distance,
            mode: args.mode.clone(),
        })
        .map_err(explain)?;

    let record = LinkRecord {
        time_minutes: link.time_minutes(),
        link,
        from_city: args.from.clone(),
        to_city: args.to.clone(),
        created_at: None,
    };
    format.emit(&record, format_link_added_text)
}
