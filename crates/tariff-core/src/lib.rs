//! Tariff Admin Core Library
//!
//! This crate provides the foundational types for the tariff configuration
//! engine. It includes:
//!
//! - Domain models (TariffDraft, PeriodPriceList, feature blocks, etc.)
//! - The pure validation engine producing per-field verdicts
//! - Payload normalization for the create/update wire shape
//! - The abstract store collaborator trait
//! - Unified error handling and application configuration

pub mod config;
pub mod error;
pub mod models;
pub mod payload;
pub mod traits;
pub mod validation;

pub use config::AppConfig;
pub use error::AppError;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;
