//! Favorites
//!
//! The in-memory list is the source of truth for the session. Persistence is
//! best effort: store failures are logged and never reach the caller.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::{debug, warn};

use crate::products::ProductId;

/// Storage key favorites are persisted under.
pub const FAVORITES_KEY: &str = "gryadka_favorites";

/// Favorites persistence errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing file could not be read or written.
    #[error("favorites storage unavailable: {0}")]
    Io(#[from] io::Error),

    /// The stored value is not a JSON list of product ids.
    #[error("stored favorites are malformed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Key-value persistence for the favorites list.
pub trait FavoritesStore {
    /// Read the persisted list.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the list cannot be read or decoded.
    fn load(&self) -> Result<Vec<ProductId>, StoreError>;

    /// Replace the persisted list.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the list cannot be written.
    fn save(&mut self, ids: &[ProductId]) -> Result<(), StoreError>;
}

/// Session-only store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    ids: Vec<ProductId>,
}

impl FavoritesStore for MemoryStore {
    fn load(&self) -> Result<Vec<ProductId>, StoreError> {
        Ok(self.ids.clone())
    }

    fn save(&mut self, ids: &[ProductId]) -> Result<(), StoreError> {
        self.ids = ids.to_vec();
        Ok(())
    }
}

/// Store keeping the list as a JSON array in `<dir>/gryadka_favorites.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Store favorites inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{FAVORITES_KEY}.json")),
        }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FavoritesStore for FileStore {
    fn load(&self) -> Result<Vec<ProductId>, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(error) => return Err(error.into()),
        };

        Ok(serde_json::from_str(&contents)?)
    }

    fn save(&mut self, ids: &[ProductId]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&self.path, serde_json::to_string(ids)?)?;

        Ok(())
    }
}

/// Favorite products, in the order they were added.
#[derive(Debug)]
pub struct FavoritesLedger<S: FavoritesStore = MemoryStore> {
    ids: Vec<ProductId>,
    store: S,
}

impl<S: FavoritesStore> FavoritesLedger<S> {
    /// Restore favorites from `store`, starting empty if it cannot be read.
    pub fn load(store: S) -> Self {
        let ids = store.load().unwrap_or_else(|error| {
            warn!(%error, "failed to load favorites, starting with an empty list");
            Vec::new()
        });

        Self { ids, store }
    }

    /// Flip membership of `id`. Returns whether it is a favorite afterwards.
    pub fn toggle(&mut self, id: ProductId) -> bool {
        let now_favorite = if let Some(index) = self.ids.iter().position(|fav| *fav == id) {
            self.ids.remove(index);
            false
        } else {
            self.ids.push(id);
            true
        };

        if let Err(error) = self.persist() {
            warn!(%error, product = %id, "failed to persist favorites, keeping them for this session only");
        }

        now_favorite
    }

    /// Check if `id` is a favorite.
    pub fn contains(&self, id: ProductId) -> bool {
        self.ids.contains(&id)
    }

    /// Favorites in the order they were added.
    pub fn ids(&self) -> &[ProductId] {
        &self.ids
    }

    /// Number of favorites.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Check if there are no favorites.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        self.store.save(&self.ids)?;

        debug!(count = self.ids.len(), "favorites persisted");

        Ok(())
    }
}
