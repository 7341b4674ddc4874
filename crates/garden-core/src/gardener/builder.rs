//! Builder for creating and configuring Gardener instances.

use std::path::{Path, PathBuf};

use jiff::civil::Date;
use log::debug;
use tokio::task;

use super::Gardener;
use crate::{
    catalog::GrowthCatalog,
    db::Database,
    error::{GardenError, Result},
};

/// Grower used when none is configured.
pub const DEFAULT_USER: &str = "default";

/// Builder for creating and configuring Gardener instances.
#[derive(Debug, Clone, Default)]
pub struct GardenerBuilder {
    database_path: Option<PathBuf>,
    catalog_path: Option<PathBuf>,
    catalog: Option<GrowthCatalog>,
    user: Option<String>,
    today: Option<Date>,
}

impl GardenerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/garden/garden.db` or `~/.local/share/garden/garden.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Sets the growth catalog file.
    ///
    /// If not specified, `$XDG_CONFIG_HOME/garden/growth.json` is read when it
    /// exists and an empty catalog is used otherwise. An explicitly given
    /// file must exist.
    pub fn with_catalog_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.catalog_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Uses an in-memory catalog instead of reading one from disk.
    pub fn with_catalog(mut self, catalog: GrowthCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Sets the grower whose gardens are managed.
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    /// Pins "today" for every pass instead of reading the clock.
    pub fn with_today(mut self, today: Option<Date>) -> Self {
        self.today = today;
        self
    }

    /// Builds the configured gardener instance.
    ///
    /// # Errors
    ///
    /// Returns `GardenError::FileSystem` if the database or catalog path is
    /// unusable, `GardenError::Serialization` if the catalog is malformed and
    /// `GardenError::Database` if database initialization fails.
    pub async fn build(self) -> Result<Gardener> {
        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| GardenError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let catalog = match (self.catalog, self.catalog_path) {
            (Some(catalog), _) => catalog,
            (None, Some(path)) => GrowthCatalog::load(&path)?,
            (None, None) => Self::default_catalog()?,
        };
        debug!("growth catalog has {} plant types", catalog.len());

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || {
            let _db = Database::new(&db_path_clone)?;
            Ok::<(), GardenError>(())
        })
        .await
        .map_err(GardenError::join)??;

        let user = self.user.unwrap_or_else(|| DEFAULT_USER.to_string());
        Ok(Gardener::new(db_path, catalog, user, self.today))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("garden")
            .place_data_file("garden.db")
            .map_err(|e| GardenError::XdgDirectory(e.to_string()))
    }

    /// Loads the default catalog file if the grower has one.
    fn default_catalog() -> Result<GrowthCatalog> {
        match xdg::BaseDirectories::with_prefix("garden").find_config_file("growth.json") {
            Some(path) => GrowthCatalog::load(path),
            None => Ok(GrowthCatalog::new()),
        }
    }
}
