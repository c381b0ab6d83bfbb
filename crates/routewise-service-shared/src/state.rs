//! Application state for HTTP services.
//!
//! The state only records where the database lives. Every request opens its
//! own store connection on a blocking thread and reads a fresh snapshot, so
//! links added through the API are visible to the next route request.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use routewise_lib::{Error as LibError, Network, Store};

/// Error during application state initialization.
#[derive(Debug)]
pub enum AppStateError {
    /// Database file not found.
    DatabaseNotFound(String),

    /// The database exists but could not be opened or read.
    StoreOpen(LibError),
}

impl std::fmt::Display for AppStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseNotFound(path) => write!(f, "database not found: {}", path),
            Self::StoreOpen(e) => write!(f, "failed to open store: {}", e),
        }
    }
}

impl std::error::Error for AppStateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::StoreOpen(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LibError> for AppStateError {
    fn from(err: LibError) -> Self {
        match err {
            LibError::DatabaseNotFound { path } => {
                Self::DatabaseNotFound(path.display().to_string())
            }
            other => Self::StoreOpen(other),
        }
    }
}

/// Shared application state for all axum handlers.
///
/// This struct is cheaply cloneable (using `Arc` internally) and should be
/// shared via axum's `State` extractor.
///
/// # Example
///
/// ```ignore
/// use axum::{Router, routing::get, extract::State};
/// use routewise_service_shared::AppState;
///
/// async fn handler(State(state): State<AppState>) {
///     let network = state.load_network().await;
///     // ... use network
/// }
///
/// let state = AppState::load("path/to/routewise.db").unwrap();
/// let app = Router::new()
///     .route("/api/cities", get(handler))
///     .with_state(state);
/// ```
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    db_path: PathBuf,
}

impl AppState {
    /// Validate that the database can be opened and build the state.
    pub fn load(db_path: impl AsRef<Path>) -> Result<Self, AppStateError> {
        let db_path = db_path.as_ref();

        tracing::info!(path = %db_path.display(), "opening store");
        let store = Store::open(db_path)?;
        let locations = store.fetch_locations()?.len();
        tracing::info!(locations, "store opened successfully");

        Ok(Self::from_path(db_path))
    }

    /// Build state for a database path without touching the filesystem.
    ///
    /// A missing database surfaces per request as 503 Service Unavailable.
    pub fn from_path(db_path: impl Into<PathBuf>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                db_path: db_path.into(),
            }),
        }
    }

    /// Location of the database file.
    pub fn db_path(&self) -> &Path {
        &self.inner.db_path
    }

    /// Run `task` against a freshly opened store on the blocking thread pool.
    pub async fn with_store<T, F>(&self, task: F) -> routewise_lib::Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Store) -> routewise_lib::Result<T> + Send + 'static,
    {
        let db_path = self.inner.db_path.clone();
        tokio::task::spawn_blocking(move || {
            let mut store = Store::open(&db_path)?;
            task(&mut store)
        })
        .await
        .map_err(|e| LibError::Io(std::io::Error::other(e)))?
    }

    /// Read a consistent network snapshot for one request.
    pub async fn load_network(&self) -> routewise_lib::Result<Network> {
        self.with_store(|store| store.load_network()).await
    }

    /// Number of stored locations, used by the readiness probe.
    pub async fn location_count(&self) -> routewise_lib::Result<usize> {
        self.with_store(|store| Ok(store.fetch_locations()?.len()))
            .await
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("db_path", &self.inner.db_path)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::SeededDatabase;

    #[test]
    fn test_app_state_clone_shares_path() {
        let state1 = AppState::from_path("/tmp/routewise.db");
        let state2 = state1.clone();
        assert_eq!(state1.db_path(), state2.db_path());
    }

    #[test]
    fn test_app_state_debug() {
        let state = AppState::from_path("/tmp/routewise.db");
        let debug = format!("{:?}", state);

        assert!(debug.contains("AppState"));
        assert!(debug.contains("db_path"));
    }

    #[test]
    fn test_app_state_error_display() {
        let err = AppStateError::DatabaseNotFound("/path/to/db".to_string());
        assert!(err.to_string().contains("/path/to/db"));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_app_state_load_nonexistent() {
        let result = AppState::load("/nonexistent/path/to/routewise.db");

        match result {
            Err(AppStateError::DatabaseNotFound(path)) => {
                assert!(path.contains("nonexistent"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_app_state_reads_snapshot() {
        let db = SeededDatabase::new();
        let state = AppState::load(db.path()).unwrap();

        let network = state.load_network().await.unwrap();
        assert_eq!(network.locations.len(), 4);
        assert_eq!(state.location_count().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_missing_database_surfaces_per_request() {
        let state = AppState::from_path("/nonexistent/routewise.db");
        let err = state.load_network().await.unwrap_err();
        assert!(matches!(err, LibError::DatabaseNotFound { .. }));
    }
}
