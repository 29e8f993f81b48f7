//! Database connection management
//!
//! Provides utilities for opening SQLite connections and the [`Database`]
//! facade that ties a connection to its identifier translator and remote
//! fetcher.

use crate::config::StoreConfig;
use crate::errors::{from_rusqlite, Result};
use crate::http::HttpFetcher;
use crate::proxy::Loaded;
use crate::{reader, schema, writer};
use rowmap_core::fetch::RemoteFetcher;
use rowmap_core::logging_facility;
use rowmap_core::model::Entity;
use rowmap_core::naming::{IdentifierTranslator, SnakeCase};
use rusqlite::Connection;
use std::path::Path;
use std::sync::Arc;

/// Open a SQLite database at the given path
pub fn open<P: AsRef<Path>>(path: P) -> Result<Connection> {
    Connection::open(path).map_err(from_rusqlite)
}

/// Open an in-memory SQLite database
pub fn open_in_memory() -> Result<Connection> {
    Connection::open_in_memory().map_err(from_rusqlite)
}

/// Apply connection pragmas from the configuration
pub fn configure(conn: &Connection, config: &StoreConfig) -> Result<()> {
    conn.pragma_update(None, "foreign_keys", config.foreign_keys)
        .map_err(from_rusqlite)?;

    // In-memory databases cannot use WAL
    if config.wal && config.path.is_some() {
        let mode: String = conn
            .pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))
            .map_err(from_rusqlite)?;
        tracing::debug!(journal_mode = mode.as_str(), "journal mode set");
    }

    Ok(())
}

/// A connection plus the collaborators every mapping operation needs
///
/// All operations run synchronously on the single owned connection.
pub struct Database {
    conn: Connection,
    translator: Box<dyn IdentifierTranslator>,
    fetcher: Arc<dyn RemoteFetcher>,
}

impl Database {
    /// Open a database as described by `config`
    ///
    /// A `log_profile` only takes effect if no global tracing subscriber is
    /// installed yet.
    ///
    /// # Errors
    ///
    /// Returns a `Persistence` error if the connection cannot be opened or
    /// configured.
    pub fn open(config: &StoreConfig) -> Result<Self> {
        if let Some(profile) = config.log_profile {
            if !logging_facility::init(profile) {
                tracing::debug!(?profile, "keeping existing tracing subscriber");
            }
        }

        let conn = match &config.path {
            Some(path) => open(path)?,
            None => open_in_memory()?,
        };
        configure(&conn, config)?;

        Ok(Self::from_connection(conn).with_translator(config.naming.translator()))
    }

    /// Open a file database with default settings
    ///
    /// # Errors
    ///
    /// Returns a `Persistence` error if the file cannot be opened.
    pub fn open_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open(&StoreConfig::at_path(path.as_ref()))
    }

    /// Open an in-memory database with default settings
    ///
    /// # Errors
    ///
    /// Returns a `Persistence` error if SQLite cannot allocate the database.
    pub fn open_in_memory() -> Result<Self> {
        Self::open(&StoreConfig::in_memory())
    }

    /// Wrap an existing connection, using snake_case columns and HTTP fetching
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn,
            translator: Box::new(SnakeCase),
            fetcher: Arc::new(HttpFetcher::new()),
        }
    }

    pub fn with_translator(mut self, translator: Box<dyn IdentifierTranslator>) -> Self {
        self.translator = translator;
        self
    }

    pub fn with_fetcher(mut self, fetcher: Arc<dyn RemoteFetcher>) -> Self {
        self.fetcher = fetcher;
        self
    }

    /// See [`schema::create_table`]
    ///
    /// # Errors
    ///
    /// Configuration errors for invalid metadata, `Schema` for store failures.
    pub fn create_table<T: Entity>(&self) -> Result<()> {
        schema::create_table::<T>(&self.conn, self.translator.as_ref())
    }

    /// See [`schema::drop_table`]
    ///
    /// # Errors
    ///
    /// `Schema` for store failures.
    pub fn drop_table<T: Entity>(&self) -> Result<()> {
        schema::drop_table::<T>(&self.conn)
    }

    /// See [`schema::table_exists`]
    ///
    /// # Errors
    ///
    /// `Schema` if the catalog cannot be queried.
    pub fn table_exists<T: Entity>(&self) -> Result<bool> {
        schema::table_exists::<T>(&self.conn)
    }

    /// See [`writer::insert_row`]
    ///
    /// # Errors
    ///
    /// Configuration errors for invalid metadata or values, `Insert` for
    /// store failures.
    pub fn insert_row<T: Entity>(&self, instance: &T) -> Result<usize> {
        writer::insert_row(&self.conn, self.translator.as_ref(), instance)
    }

    /// See [`reader::load_row`]
    ///
    /// # Errors
    ///
    /// Configuration errors, `NotFound` when no row matches, `Query` for
    /// store failures.
    pub fn load_row<T: Entity>(&self, template: &T) -> Result<Loaded<T>> {
        reader::load_row(&self.conn, self.translator.as_ref(), &self.fetcher, template)
    }

    /// The underlying connection, for statements outside the mapper
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Close the connection, reporting any error SQLite raises
    ///
    /// # Errors
    ///
    /// Returns a `Persistence` error if SQLite refuses to close.
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| from_rusqlite(e))
    }
}
