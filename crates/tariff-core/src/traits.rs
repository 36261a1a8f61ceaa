//! Collaborator trait for the remote tariff store
//!
//! Transport and persistence live behind this boundary. Implementations do
//! no client-side retrying; a failed call surfaces as-is and the caller's
//! draft stays untouched.

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::{ServerInfo, TariffRecord};
use crate::payload::TariffPayload;

/// Remote tariff store reachable via fetch/list/create/update.
#[async_trait]
pub trait TariffStore: Send + Sync {
    /// Read-only server catalog lookup; no side effects.
    async fn available_servers(&self) -> Result<Vec<ServerInfo>, AppError>;

    /// Fetch the full persisted shape of one tariff.
    async fn fetch_tariff(&self, id: i64) -> Result<TariffRecord, AppError>;

    /// List all tariffs.
    async fn list_tariffs(&self) -> Result<Vec<TariffRecord>, AppError>;

    /// Create a new tariff from a normalized payload.
    async fn create_tariff(&self, payload: &TariffPayload) -> Result<TariffRecord, AppError>;

    /// Update an existing tariff; same payload shape as create.
    async fn update_tariff(
        &self,
        id: i64,
        payload: &TariffPayload,
    ) -> Result<TariffRecord, AppError>;
}
