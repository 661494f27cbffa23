//! Storage adapter for JSON documents.
//!
//! Each document lives under one fixed key of a [`KeyValueStore`]. Plain reads never fail: an
//! absent, unreadable or unparsable document degrades to its empty default. Reads that precede a
//! write surface backend failures instead. Writes replace the whole document and surface any
//! failure.

#[cfg(test)]
mod memory;
mod sqlite;

#[cfg(test)]
pub use memory::*;
pub use sqlite::*;

use std::future::Future;
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};

use crate::errors::AppError;

/// A persistent string key-value store.
pub trait KeyValueStore: Send + Sync + 'static {
    /// Fetch the raw value stored under `key`.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, AppError>> + Send;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> impl Future<Output = Result<(), AppError>> + Send;
}

/// Typed JSON document access on top of a [`KeyValueStore`].
pub struct Storage<S> {
    store: Arc<S>,
}

impl<S> Clone for Storage<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: KeyValueStore> Storage<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    #[cfg(test)]
    pub fn backend(&self) -> &S {
        &self.store
    }

    /// Read the document under `key`, or its default if it is missing or corrupt.
    ///
    /// Backend failures also degrade to the default. Never feed the result into a write; use
    /// [`Storage::read_for_update`] for read-modify-write cycles.
    pub async fn read<T>(&self, key: &str) -> T
    where
        T: DeserializeOwned + Default,
    {
        match self.read_for_update(key).await {
            Ok(document) => document,
            Err(e) => {
                tracing::warn!("Failed to read {}, using empty document: {}", key, e);
                T::default()
            }
        }
    }

    /// Read the document under `key` as the base of a write.
    ///
    /// Missing and corrupt documents still read as the default, but a backend failure is
    /// returned so the caller never overwrites a document it could not see.
    pub async fn read_for_update<T>(&self, key: &str) -> Result<T, AppError>
    where
        T: DeserializeOwned + Default,
    {
        let Some(raw) = self.store.get(key).await? else {
            return Ok(T::default());
        };

        match serde_json::from_str(&raw) {
            Ok(document) => Ok(document),
            Err(e) => {
                tracing::warn!("Corrupt document under {}, using empty document: {}", key, e);
                Ok(T::default())
            }
        }
    }

    /// Serialize and persist `document` under `key`.
    pub async fn write<T>(&self, key: &str, document: &T) -> Result<(), AppError>
    where
        T: Serialize,
    {
        let raw = serde_json::to_string(document)?;
        self.store.set(key, &raw).await.map_err(|e| {
            tracing::error!("Failed to write {}: {}", key, e);
            e
        })
    }
}
