//! Shared types and HTTP API for the Keywarden console.

use axum::{extract::State, http::StatusCode, response::Json, routing::get, Router};
use keywarden_license::{LicenseManager, LicenseRecord};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Read-only view of the license record served over HTTP.
///
/// The raw key never leaves the process; only the masked rendering is
/// exposed.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LicenseView {
    pub status: String,
    pub masked_key: Option<String>,
    pub last_checked_at: Option<String>,
}

impl LicenseView {
    /// Projects a record into its display form.
    pub fn from_record(record: &LicenseRecord) -> Self {
        Self {
            status: record.status.to_string(),
            masked_key: record.masked_key(),
            last_checked_at: record.last_checked_at.map(|t| t.to_rfc3339()),
        }
    }
}

async fn license_handler(
    State(manager): State<Arc<LicenseManager>>,
) -> Result<Json<LicenseView>, StatusCode> {
    let record = manager
        .query_state()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok(Json(LicenseView::from_record(&record)))
}

/// Build the HTTP API router over the given manager.
pub fn build_router(manager: Arc<LicenseManager>) -> Router {
    Router::new()
        .route("/api/v1/license", get(license_handler))
        .with_state(manager)
}
