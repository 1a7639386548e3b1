//! Abstract contracts for the injected collaborators.
//!
//! The core never chooses a persistence backend, a blob host, a
//! spreadsheet service or a messaging transport; it consumes these traits
//! and the application wires concrete implementations in. Every call is a
//! fire-once asynchronous operation with no cancellation support;
//! re-entrancy guarding is a caller responsibility.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::StoreError;
use crate::fiche::Fiche;

/// Persistent fiche storage.
///
/// May be unavailable at runtime; callers degrade to the in-memory
/// fallback store rather than failing the user action.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn load(&self, id: Uuid) -> Result<Fiche, StoreError>;
    async fn save(&self, fiche: &Fiche) -> Result<(), StoreError>;
    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;
}

/// Binary asset host for uploaded logo images.
///
/// `Ok(None)` and `Err` both mean "no remote reference": the caller keeps
/// the raw bytes as the payload reference instead of failing the upload.
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn upload(&self, bytes: &[u8], key: &str) -> anyhow::Result<Option<String>>;
}

/// Flat-row export sink (one row per fiche, fixed column order).
///
/// Fire-and-forget: no delivery confirmation is available to the caller.
#[async_trait]
pub trait TabularSink: Send + Sync {
    async fn submit(&self, headers: &[&str], values: &[String]) -> anyhow::Result<()>;
}

/// Turns rendered SVG pages into one paginated document.
#[async_trait]
pub trait Rasterizer: Send + Sync {
    async fn render_document(&self, pages: &[String]) -> anyhow::Result<Vec<u8>>;
}

/// Outbound messaging channel (deep link opener).
#[async_trait]
pub trait NotificationChannel: Send + Sync {
    async fn open(&self, phone_e164: &str, message: &str) -> anyhow::Result<()>;
}
