use crate::core::inventory::Inventory;
use crate::domain::model::{NewItem, State as InventoryState};
use crate::utils::error::{ErrorCategory, InventoryError};
use axum::body::Bytes;
use axum::extract::{Request, State};
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_HEADERS,
    ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
};
use axum::http::{HeaderValue, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

pub const STATE_PATH: &str = "/state";
pub const ADD_PATH: &str = "/add";
pub const REMOVE_PATH: &str = "/remove";
pub const MOVE_PATH: &str = "/move";
pub const LIST_PATH: &str = "/list";
pub const STATIC_PREFIX: &str = "/static";

const CORS_ALLOW_HEADERS: &str = "Content-Type, Content-Length, Accept-Encoding, X-CSRF-Token, Authorization, accept, origin, Cache-Control, X-Requested-With";
const CORS_ALLOW_METHODS: &str = "POST, GET, OPTIONS, PUT, DELETE";

#[derive(Clone)]
pub struct AppState {
    pub inventory: Arc<Inventory>,
}

impl AppState {
    pub fn new(inventory: Inventory) -> Self {
        Self {
            inventory: Arc::new(inventory),
        }
    }
}

/// JSON error body: `{"error": "...", "kind": "FreezerNotFound"}`.
#[derive(Debug)]
pub struct ApiError(pub InventoryError);

impl From<InventoryError> for ApiError {
    fn from(value: InventoryError) -> Self {
        Self(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Callers tell failures apart by `kind`; the status is always 500.
        match self.0.category() {
            ErrorCategory::Request | ErrorCategory::Inventory => {
                tracing::warn!("{}", self.0)
            }
            ErrorCategory::Storage | ErrorCategory::Configuration | ErrorCategory::System => {
                tracing::error!("❌ {} ({})", self.0, self.0.recovery_suggestion())
            }
        }

        let body = Json(serde_json::json!({
            "error": self.0.to_string(),
            "kind": self.0.kind(),
        }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

// Field names match case-insensitively in the web UI's encoder, so accept
// the common spellings too.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AddRequest {
    #[serde(rename = "Name", alias = "name")]
    pub name: String,
    #[serde(rename = "Date", alias = "date")]
    pub date: String,
    #[serde(rename = "Freezer", alias = "freezer")]
    pub freezer: String,
    #[serde(rename = "Containers", alias = "containers")]
    pub containers: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RemoveRequest {
    #[serde(rename = "Container", alias = "container")]
    pub container: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MoveRequest {
    #[serde(rename = "Container", alias = "container")]
    pub container: String,
    #[serde(rename = "NewFreezer", alias = "newFreezer", alias = "new_freezer")]
    pub new_freezer: String,
}

/// Inventory API routes, with CORS headers and preflight answers.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route(STATE_PATH, get(get_state).options(preflight))
        .route(ADD_PATH, post(add_item).options(preflight))
        .route(REMOVE_PATH, post(remove_container).options(preflight))
        .route(MOVE_PATH, post(move_container).options(preflight))
        .layer(middleware::from_fn(cors))
}

/// Static UI bundle with single-page-app fallback to `index.html`.
pub fn ui_service(dir: &Path) -> ServeDir<ServeFile> {
    ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html")))
}

/// Full application router. The UI is only mounted when a directory is given.
pub fn router(state: AppState, ui_dir: Option<&Path>) -> Router {
    let mut app = Router::new()
        .merge(api_routes())
        .route(LIST_PATH, get(list));

    if let Some(dir) = ui_dir {
        let ui = ui_service(dir);
        app = app.nest_service(STATIC_PREFIX, ui.clone()).fallback_service(ui);
    }

    app.layer(TraceLayer::new_for_http()).with_state(state)
}

async fn cors(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        ACCESS_CONTROL_ALLOW_CREDENTIALS,
        HeaderValue::from_static("true"),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(CORS_ALLOW_HEADERS),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(CORS_ALLOW_METHODS),
    );
    response
}

async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn list() -> &'static str {
    "Ok"
}

// Bodies are decoded from raw bytes so clients that omit Content-Type still work.
fn decode<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError(InventoryError::BodyDecodeError(e)))
}

async fn get_state(State(st): State<AppState>) -> Result<Json<InventoryState>, ApiError> {
    Ok(Json(st.inventory.snapshot().await?))
}

async fn add_item(
    State(st): State<AppState>,
    body: Bytes,
) -> Result<Json<InventoryState>, ApiError> {
    let req: AddRequest = decode(&body)?;
    let item = NewItem {
        name: req.name,
        date: req.date,
        containers: req.containers.unwrap_or_default(),
    };
    Ok(Json(st.inventory.add_item(&req.freezer, item).await?))
}

async fn remove_container(
    State(st): State<AppState>,
    body: Bytes,
) -> Result<Json<InventoryState>, ApiError> {
    let req: RemoveRequest = decode(&body)?;
    Ok(Json(st.inventory.remove_container(&req.container).await?))
}

async fn move_container(
    State(st): State<AppState>,
    body: Bytes,
) -> Result<Json<InventoryState>, ApiError> {
    let req: MoveRequest = decode(&body)?;
    Ok(Json(
        st.inventory
            .move_container(&req.container, &req.new_freezer)
            .await?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_field_spellings() {
        let add: AddRequest = serde_json::from_str(
            r#"{"name": "Pie", "Date": "2021", "freezer": "A", "Containers": null}"#,
        )
        .unwrap();
        assert_eq!(add.name, "Pie");
        assert_eq!(add.date, "2021");
        assert_eq!(add.freezer, "A");
        assert!(add.containers.is_none());

        let mv: MoveRequest =
            serde_json::from_str(r#"{"Container": "c1", "newFreezer": "B"}"#).unwrap();
        assert_eq!(mv.container, "c1");
        assert_eq!(mv.new_freezer, "B");

        let rm: RemoveRequest = serde_json::from_str("{}").unwrap();
        assert!(rm.container.is_empty());
    }

    #[test]
    fn test_every_error_is_a_server_error() {
        let not_found = ApiError(InventoryError::FreezerNotFound {
            freezer: "X".to_string(),
        })
        .into_response();
        assert_eq!(not_found.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bad_body = decode::<RemoveRequest>(&Bytes::from_static(b"not json")).unwrap_err();
        assert_eq!(
            bad_body.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
