//! HTTP handlers for the REST API.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::{error, warn};

use super::dto::{HealthResponse, SiteListResponse, SiteStatus, SitesQuery};
use super::AppState;
use crate::utils::time::{localized_now, parse_instant};

/// GET /health
///
/// Reports whether the service is up and how fresh its snapshot is.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    match state.directory.snapshot().await {
        Ok(snapshot) => {
            let status = if snapshot.stale { "stale" } else { "ok" };
            Json(HealthResponse {
                status: status.to_string(),
                site_count: snapshot.sites.len(),
                last_refresh: snapshot.fetched_at,
                stale: snapshot.stale,
            })
        }
        Err(e) => Json(HealthResponse {
            status: format!("error: {}", e),
            site_count: 0,
            last_refresh: None,
            stale: true,
        }),
    }
}

/// GET /sites
///
/// Lists every site with its schedule fields and whether it is open at the
/// evaluation instant. The optional `at` query parameter overrides the
/// instant; absent or unparseable values fall back to the current time in
/// the configured timezone.
pub async fn sites_handler(
    State(state): State<AppState>,
    Query(query): Query<SitesQuery>,
) -> Result<Json<SiteListResponse>, (StatusCode, String)> {
    let at = match query.at.as_deref() {
        Some(raw) => parse_instant(raw, &state.timezone).unwrap_or_else(|| {
            warn!("Ignoring unparseable at parameter: {}", raw);
            localized_now(&state.timezone)
        }),
        None => localized_now(&state.timezone),
    };

    let snapshot = state.directory.snapshot().await.map_err(|e| {
        error!("Failed to read site directory: {}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Site directory unavailable".to_string(),
        )
    })?;

    let sites: Vec<SiteStatus> = snapshot
        .sites
        .iter()
        .map(|site| SiteStatus::from_site(site, at))
        .collect();
    let total = sites.len();

    Ok(Json(SiteListResponse {
        sites,
        total,
        evaluated_at: at,
    }))
}
