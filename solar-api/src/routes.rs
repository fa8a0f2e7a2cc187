//! HTTP route handlers for the asset API.

use axum::Router;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::get;
use serde::Deserialize;
use tracing::info;

use solar::core::summary::{AssetSummary, summarize};
use solar::core::types::{Asset, AssetDraft, AssetPatch};
use solar::core::validation::{ensure_valid_draft, ensure_valid_patch};
use solar::core::view::{
    AssetListing, DEFAULT_PAGE_SIZE, FilterState, PageState, SortDirection, SortField, SortState,
    StatusFilter, compute_visible_page,
};

use crate::error::ApiError;
use crate::state::{AppState, ChangeEvent};

/// Build the API router.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/assets", get(list_assets).post(create_asset))
        .route(
            "/assets/{id}",
            get(get_asset).patch(update_asset).delete(delete_asset),
        )
        .route("/summary", get(get_summary))
}

async fn health() -> &'static str {
    "ok"
}

/// Table view state carried in the query string.
#[derive(Debug, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ListQuery {
    status: StatusFilter,
    search: String,
    sort: SortField,
    direction: SortDirection,
    page: usize,
    page_size: usize,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            status: StatusFilter::All,
            search: String::new(),
            sort: SortField::Id,
            direction: SortDirection::Asc,
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// GET /api/assets - one page of the filtered, sorted collection.
async fn list_assets(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<AssetListing>, ApiError> {
    let Query(query) = query?;
    let assets = state.store.list().await?;
    let filter = FilterState {
        status: query.status,
        search: query.search,
    };
    let sort = SortState {
        field: query.sort,
        direction: query.direction,
    };
    let page = PageState {
        index: query.page,
        size: query.page_size,
    };
    let visible = compute_visible_page(&assets, &filter, &sort, &page);
    Ok(Json(AssetListing::new(visible, &page, assets.len())))
}

/// GET /api/assets/{id}
async fn get_asset(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Asset>, ApiError> {
    Ok(Json(state.store.get(&id).await?))
}

/// POST /api/assets - validate, then create.
async fn create_asset(
    State(state): State<AppState>,
    draft: Result<Json<AssetDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Asset>), ApiError> {
    let Json(draft) = draft?;
    ensure_valid_draft(&draft)?;
    let asset = state.store.create(draft).await?;
    info!(id = %asset.id, "asset created");
    state.notify(ChangeEvent::AssetCreated {
        id: asset.id.clone(),
    });
    Ok((StatusCode::CREATED, Json(asset)))
}

/// PATCH /api/assets/{id} - validate supplied fields, then merge.
async fn update_asset(
    State(state): State<AppState>,
    Path(id): Path<String>,
    patch: Result<Json<AssetPatch>, JsonRejection>,
) -> Result<Json<Asset>, ApiError> {
    let Json(patch) = patch?;
    ensure_valid_patch(&patch)?;
    let asset = state.store.update(&id, patch).await?;
    info!(id = %asset.id, "asset updated");
    state.notify(ChangeEvent::AssetUpdated {
        id: asset.id.clone(),
    });
    Ok(Json(asset))
}

/// DELETE /api/assets/{id}
async fn delete_asset(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.store.delete(&id).await?;
    info!(id = %id, "asset deleted");
    state.notify(ChangeEvent::AssetDeleted { id });
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/summary - dashboard statistics.
async fn get_summary(State(state): State<AppState>) -> Result<Json<AssetSummary>, ApiError> {
    let assets = state.store.list().await?;
    Ok(Json(summarize(&assets)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use solar::io::config::StoreConfig;
    use solar::io::store::AssetStore;
    use solar::test_support::{instant_store, mixed_assets};

    /// Bind to port 0 and return the base URL.
    async fn start_server(state: AppState) -> String {
        let app = Router::new().nest("/api", api_router()).with_state(state);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve");
        });
        format!("http://{addr}/api")
    }

    fn draft_body() -> Value {
        json!({
            "name": "Ridge Line",
            "capacity": 1500,
            "location": "Utah Desert Farm",
            "status": "active",
            "installDate": "2024-04-01",
            "efficiency": 88,
            "lastMaintenance": "2024-06-01"
        })
    }

    #[tokio::test]
    async fn health_check() {
        let base = start_server(AppState::new(instant_store(mixed_assets()))).await;
        let body = reqwest::get(format!("{base}/health"))
            .await
            .expect("request")
            .text()
            .await
            .expect("body");
        assert_eq!(body, "ok");
    }

    #[tokio::test]
    async fn list_applies_query_view_state() {
        let base = start_server(AppState::new(instant_store(mixed_assets()))).await;

        let resp = reqwest::get(format!(
            "{base}/assets?status=maintenance&sort=capacity&direction=desc&pageSize=10"
        ))
        .await
        .expect("request");
        assert_eq!(resp.status(), 200);

        let body: Value = resp.json().await.expect("json");
        assert_eq!(body["total"], 3);
        assert_eq!(body["matchedCount"], 1);
        assert_eq!(body["pageSize"], 10);
        assert_eq!(body["items"][0]["id"], "SA-0002");
    }

    #[tokio::test]
    async fn create_update_delete_round() {
        let state = AppState::new(instant_store(mixed_assets()));
        let mut events = state.event_tx.subscribe();
        let base = start_server(state).await;
        let client = reqwest::Client::new();

        let resp = client
            .post(format!("{base}/assets"))
            .json(&draft_body())
            .send()
            .await
            .expect("create");
        assert_eq!(resp.status(), 201);
        let created: Value = resp.json().await.expect("json");
        assert_eq!(created["id"], "SA-0004");
        assert_eq!(
            events.recv().await.expect("event"),
            ChangeEvent::AssetCreated {
                id: "SA-0004".to_string()
            }
        );

        let resp = client
            .patch(format!("{base}/assets/SA-0004"))
            .json(&json!({ "id": "ignored", "status": "maintenance" }))
            .send()
            .await
            .expect("update");
        assert_eq!(resp.status(), 200);
        let updated: Value = resp.json().await.expect("json");
        assert_eq!(updated["id"], "SA-0004");
        assert_eq!(updated["status"], "maintenance");
        assert_eq!(updated["name"], "Ridge Line");

        let resp = client
            .delete(format!("{base}/assets/SA-0004"))
            .send()
            .await
            .expect("delete");
        assert_eq!(resp.status(), 204);

        let resp = client
            .get(format!("{base}/assets/SA-0004"))
            .send()
            .await
            .expect("get");
        assert_eq!(resp.status(), 404);
        let body: Value = resp.json().await.expect("json");
        assert_eq!(body["error"], "Asset with id SA-0004 not found");
    }

    #[tokio::test]
    async fn invalid_draft_is_rejected_before_store() {
        let state = AppState::new(instant_store(mixed_assets()));
        let store = state.store.clone();
        let base = start_server(state).await;
        let mut body = draft_body();
        body["capacity"] = json!(0);
        body["name"] = json!("");

        let resp = reqwest::Client::new()
            .post(format!("{base}/assets"))
            .json(&body)
            .send()
            .await
            .expect("create");

        assert_eq!(resp.status(), 422);
        let body: Value = resp.json().await.expect("json");
        let fields: Vec<&str> = body["fields"]
            .as_array()
            .expect("fields")
            .iter()
            .filter_map(|field| field["field"].as_str())
            .collect();
        assert_eq!(fields, vec!["name", "capacity"]);
        assert_eq!(store.count().await, 3);
    }

    #[tokio::test]
    async fn malformed_requests_get_json_errors() {
        let state = AppState::new(instant_store(mixed_assets()));
        let store = state.store.clone();
        let base = start_server(state).await;
        let client = reqwest::Client::new();

        let mut missing_name = draft_body();
        missing_name
            .as_object_mut()
            .expect("object")
            .remove("name");
        let resp = client
            .post(format!("{base}/assets"))
            .json(&missing_name)
            .send()
            .await
            .expect("create");
        assert_eq!(resp.status(), 422);
        let body: Value = resp.json().await.expect("json error body");
        assert!(body["error"].as_str().expect("error").contains("name"));

        let resp = client
            .get(format!("{base}/assets?status=bogus"))
            .send()
            .await
            .expect("list");
        assert_eq!(resp.status(), 400);
        let body: Value = resp.json().await.expect("json error body");
        assert!(body["error"].is_string());

        let resp = client
            .patch(format!("{base}/assets/SA-0001"))
            .json(&json!({}))
            .send()
            .await
            .expect("update");
        assert_eq!(resp.status(), 422);
        let body: Value = resp.json().await.expect("json error body");
        assert_eq!(body["fields"][0]["field"], "patch");

        assert_eq!(store.count().await, 3);
        assert_eq!(store.get("SA-0001").await.expect("kept"), mixed_assets()[0]);
    }

    #[tokio::test]
    async fn simulated_outage_maps_to_service_unavailable() {
        let config = StoreConfig {
            failure_rate: 1.0,
            ..StoreConfig::instant()
        };
        let base = start_server(AppState::new(AssetStore::new(&config, mixed_assets()))).await;

        let resp = reqwest::get(format!("{base}/summary"))
            .await
            .expect("request");

        assert_eq!(resp.status(), 503);
        let body: Value = resp.json().await.expect("json");
        assert_eq!(body["retryable"], true);
    }
}
