//! Server catalog entry
//!
//! Read-only reference data fetched from the store. Selection state on the
//! draft is independent of catalog freshness: a squad that disappears from
//! the catalog stays selected (the server may only be temporarily down).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One selectable server from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerInfo {
    pub id: i64,
    pub squad_uuid: Uuid,
    pub display_name: String,
    pub country_code: Option<String>,
}
