//! In-memory fallback document store.
//!
//! The core must keep functioning when no persistence backend is wired
//! in or the configured one is unreachable; this store is the local
//! fallback the service degrades to in that case.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use uuid::Uuid;

use atelier_core::collaborators::DocumentStore;
use atelier_core::error::StoreError;
use atelier_core::fiche::Fiche;

/// Map-backed store; cheap to clone handles are not needed, the service
/// owns it for the lifetime of the session.
#[derive(Debug, Default)]
pub struct MemoryStore {
    fiches: Mutex<HashMap<Uuid, Fiche>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.fiches.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.fiches.lock().is_empty()
    }

    /// All stored fiches, most recently updated first.
    pub fn all(&self) -> Vec<Fiche> {
        let mut fiches: Vec<Fiche> = self.fiches.lock().values().cloned().collect();
        fiches.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        fiches
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn load(&self, id: Uuid) -> Result<Fiche, StoreError> {
        self.fiches
            .lock()
            .get(&id)
            .cloned()
            .ok_or(StoreError::Missing { id })
    }

    async fn save(&self, fiche: &Fiche) -> Result<(), StoreError> {
        self.fiches.lock().insert(fiche.id, fiche.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        self.fiches
            .lock()
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::Missing { id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_core::fiche::{GarmentSize, Phone};

    #[tokio::test]
    async fn save_load_delete_roundtrip() {
        let store = MemoryStore::new();
        let fiche = Fiche::new(
            "Iris",
            Phone::new("+49", "15112345678").unwrap(),
            GarmentSize::Xl,
        );

        store.save(&fiche).await.unwrap();
        assert_eq!(store.len(), 1);
        let loaded = store.load(fiche.id).await.unwrap();
        assert_eq!(loaded, fiche);

        store.delete(fiche.id).await.unwrap();
        assert!(store.is_empty());
        assert!(matches!(
            store.load(fiche.id).await,
            Err(StoreError::Missing { .. })
        ));
    }
}
