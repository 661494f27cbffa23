//! Technology catalog repository.

use tokio::sync::Mutex;

use super::require_title;
use crate::errors::AppError;
use crate::models::{default_technologies, Technology, TechnologyDocument, TECHNOLOGIES_KEY};
use crate::storage::{KeyValueStore, Storage};

pub struct TechnologyRepository<S> {
    storage: Storage<S>,
    write_lock: Mutex<()>,
}

impl<S: KeyValueStore> TechnologyRepository<S> {
    pub fn new(storage: Storage<S>) -> Self {
        Self {
            storage,
            write_lock: Mutex::new(()),
        }
    }

    pub async fn list(&self) -> Vec<Technology> {
        self.load().await.technologies
    }

    /// Replace a technology group, skills included.
    pub async fn update(&self, technology: Technology) -> Result<Technology, AppError> {
        require_title("Technology", &technology.title)?;

        let _guard = self.write_lock.lock().await;
        let mut document = self.load_for_update().await?;

        let slot = document
            .technologies
            .iter_mut()
            .find(|t| t.id == technology.id)
            .ok_or_else(|| {
                AppError::NotFound(format!("Technology {} not found", technology.id))
            })?;
        *slot = technology.clone();

        self.storage.write(TECHNOLOGIES_KEY, &document).await?;

        tracing::info!("Updated technology {}", technology.id);
        Ok(technology)
    }

    /// Write the default catalog if none is stored. Returns whether anything was written.
    pub async fn seed_defaults(&self) -> Result<bool, AppError> {
        let _guard = self.write_lock.lock().await;
        if !self.load_for_update().await?.technologies.is_empty() {
            return Ok(false);
        }

        let document = TechnologyDocument {
            technologies: default_technologies(),
        };
        self.storage.write(TECHNOLOGIES_KEY, &document).await?;

        tracing::info!("Seeded {} default technologies", document.technologies.len());
        Ok(true)
    }

    async fn load(&self) -> TechnologyDocument {
        self.storage.read(TECHNOLOGIES_KEY).await
    }

    async fn load_for_update(&self) -> Result<TechnologyDocument, AppError> {
        self.storage.read_for_update(TECHNOLOGIES_KEY).await
    }
}
