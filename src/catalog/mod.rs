//! Catalog module - authenticates to the catalog service and fetches track data.
//!
//! # Architecture
//!
//! This module follows a clean separation between:
//! - **Domain models** (`domain.rs`) - Internal types that represent our data
//! - **API DTOs** (`dto.rs`) - Exact API response shapes
//! - **Adapter** (`adapter.rs`) - Converts DTOs to domain models
//! - **Client** (`client.rs`) - Authenticated HTTP client
//!
//! This decoupling means:
//! 1. API changes don't ripple through our codebase
//! 2. We can test API contracts independently
//! 3. De-duplication of overlapping response fields happens in exactly one place

pub mod domain;

mod adapter;
mod client;
mod dto;

pub use client::CatalogClient;
pub use domain::{
    AccessToken, AnalysisSummary, CatalogError, FeatureSet, TrackMetadata, TrackRecord,
    TrackSummary,
};
