//! Cache API Handlers
//!
//! HTTP endpoints exposing the group read path to the network. These
//! translate requests into [`Group::get`](crate::group::Group::get) calls and
//! map outcomes onto status codes: 404 for an unknown group, 500 for a failed
//! load, 200 with `application/octet-stream` on success. A peer path missing
//! its key segment is a 400.

use axum::Json;
use axum::extract::Path;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

use crate::group::{get_group, group_names};

use super::protocol::{GroupStats, PeerResponse, StatsResponse};

/// Peer-to-peer read: `GET {base}/{group}/{key}`.
///
/// The body is the bincode envelope the [`HttpClient`](super::client::HttpClient)
/// on the other side decodes.
pub async fn handle_peer_get(Path((group_name, key)): Path<(String, String)>) -> Response {
    let Some(group) = get_group(&group_name) else {
        tracing::warn!("Peer request for unknown group {}", group_name);
        return (StatusCode::NOT_FOUND, "group not found").into_response();
    };

    match group.get(&key).await {
        Ok(view) => {
            let envelope = PeerResponse {
                value: view.to_vec(),
            };
            match bincode::serialize(&envelope) {
                Ok(body) => (
                    [(header::CONTENT_TYPE, "application/octet-stream")],
                    body,
                )
                    .into_response(),
                Err(e) => {
                    tracing::error!("Failed to encode response for {}/{}: {}", group_name, key, e);
                    (StatusCode::INTERNAL_SERVER_ERROR, "encoding failed").into_response()
                }
            }
        }
        Err(e) => {
            tracing::error!("Load for {}/{} failed: {}", group_name, key, e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

/// Peer path without a key segment. Malformed by contract.
pub async fn handle_peer_get_missing_key(Path(group_name): Path<String>) -> Response {
    tracing::warn!("Malformed peer request for group {} (no key)", group_name);
    (StatusCode::BAD_REQUEST, "expected {group}/{key}").into_response()
}

/// Client-facing read: `GET /api/{group}/{key}`.
///
/// Same status contract as the peer route, but the body is the raw value
/// bytes, which is what a curl against the node expects.
pub async fn handle_api_get(Path((group_name, key)): Path<(String, String)>) -> Response {
    let Some(group) = get_group(&group_name) else {
        return (StatusCode::NOT_FOUND, "group not found").into_response();
    };

    match group.get(&key).await {
        Ok(view) => (
            [(header::CONTENT_TYPE, "application/octet-stream")],
            view.to_vec(),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Load for {}/{} failed: {}", group_name, key, e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

/// Per-group counters: `GET /health/stats`.
pub async fn handle_stats() -> Json<StatsResponse> {
    let groups = group_names()
        .into_iter()
        .filter_map(|name| {
            get_group(&name).map(|group| GroupStats {
                group: name,
                entries: group.entry_count(),
                used_bytes: group.used_bytes(),
            })
        })
        .collect();

    Json(StatsResponse { groups })
}
