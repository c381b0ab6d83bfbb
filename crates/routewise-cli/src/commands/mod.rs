// Subcommand handlers. main.rs parses arguments and dispatches here.

use std::path::Path;

use anyhow::{Context, Result};

use routewise_lib::{resolve_database_path, Store};

use routewise_cli::messages::explain;

pub mod network;
pub mod route;

/// Open the existing store at the resolved database path.
pub(crate) fn open_store(target: Option<&Path>) -> Result<Store> {
    let path = resolve_database_path(target).context("failed to resolve the database path")?;
    Store::open(&path).map_err(explain)
}
