//! Drives the real HTTP client against a local stub of the site API

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use lingye_site_lib::api::{ApiClient, Backend, ProductQuery};
use lingye_site_lib::catalog::{CatalogService, TemplateRegistry};
use lingye_site_lib::core::{Error, I18nConfig};
use lingye_site_lib::i18n::{MemoryLanguageStore, TranslationService};
use serde_json::json;
use tokio::task::JoinHandle;

#[derive(Clone, Default)]
struct StubState {
    queries: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

struct StubServer {
    base_url: String,
    join: JoinHandle<()>,
    state: StubState,
}

impl StubServer {
    fn queries(&self) -> Vec<HashMap<String, String>> {
        self.state
            .queries
            .lock()
            .map_or_else(|_| Vec::new(), |entries| entries.clone())
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.join.abort();
    }
}

async fn spawn_stub() -> StubServer {
    let state = StubState::default();
    let app = Router::new()
        .route("/api/translations/frontend_content/", get(translations))
        .route("/api/translations/translate_frontend/", get(translate))
        .route("/api/products/", get(products))
        .route("/api/products/{id}/", get(product))
        .route("/api/categories/", get(categories))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    let join = tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    StubServer {
        base_url,
        join,
        state,
    }
}

fn record(state: &StubState, query: &HashMap<String, String>) {
    if let Ok(mut guard) = state.queries.lock() {
        guard.push(query.clone());
    }
}

async fn translations(
    State(state): State<StubState>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    record(&state, &query);
    match query.get("lang").map(String::as_str) {
        Some("en") => Json(json!({"content": {"nav.home": "Home"}})).into_response(),
        Some("es") => Json(json!({"nav.home": "Inicio"})).into_response(),
        Some("pt") => (StatusCode::OK, "<html>not json</html>").into_response(),
        _ => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

async fn translate(Query(query): Query<HashMap<String, String>>) -> Response {
    match (query.get("key").map(String::as_str), query.get("lang").map(String::as_str)) {
        (Some("nav.home"), Some("zh")) => {
            Json(json!({"translated_text": "\u{9996}\u{9875}"})).into_response()
        }
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn products(
    State(state): State<StubState>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    record(&state, &query);
    Json(json!({
        "count": 1,
        "results": [
            {"id": 1, "category": {"id": 3, "slug": "t-slot-aluminum-profiles"}, "range_param": ""}
        ]
    }))
    .into_response()
}

async fn product(Path(id): Path<i64>) -> Response {
    if id == 1 {
        Json(json!({"id": 1, "category": {"id": 3, "slug": "t-slot-aluminum-profiles"}})).into_response()
    } else {
        (StatusCode::NOT_FOUND, Json(json!({"detail": "Not found."}))).into_response()
    }
}

async fn categories(
    State(state): State<StubState>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    record(&state, &query);
    Json(json!([{"id": 3, "name": "Industrial", "slug": "t-slot-aluminum-profiles"}])).into_response()
}

#[tokio::test]
async fn test_fetch_translations_and_status_errors() {
    let stub = spawn_stub().await;
    let client = ApiClient::new(&stub.base_url);

    let body = client.fetch_translations("en").await.unwrap();
    assert_eq!(body["content"]["nav.home"], json!("Home"));

    let err = client.fetch_translations("zh").await.unwrap_err();
    assert!(matches!(err, Error::Status(500)));

    let err = client.fetch_translations("pt").await.unwrap_err();
    assert!(matches!(err, Error::Http(_)));
}

#[tokio::test]
async fn test_translation_service_over_http() {
    let stub = spawn_stub().await;
    let backend: Arc<dyn Backend> = Arc::new(ApiClient::new(&stub.base_url));
    let service = TranslationService::new(
        I18nConfig::default(),
        backend,
        Box::new(MemoryLanguageStore::new("language")),
    );

    service.load_translations("es").await;
    assert_eq!(service.t("nav.home"), "Inicio");

    // Malformed body degrades to an empty mapping, language unchanged
    let map = service.load_translations("pt").await;
    assert!(map.is_empty());
    assert_eq!(service.current_language(), "es");
    assert_eq!(service.t("nav.home"), "nav.home");

    assert_eq!(service.translate_text("nav.home", "zh").await, "\u{9996}\u{9875}");
    assert_eq!(service.translate_text("nav.about", "zh").await, "nav.about");
}

#[tokio::test]
async fn test_catalog_over_http() {
    let stub = spawn_stub().await;
    let backend: Arc<dyn Backend> = Arc::new(ApiClient::new(&stub.base_url));
    let catalog = CatalogService::new(backend, TemplateRegistry::builtin(), &stub.base_url);

    let products = catalog.products("zh", &ProductQuery::featured()).await;
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].range_param, "OEM factory supply aluminium profiles");
    assert_eq!(
        products[0].factory_images[0].image,
        format!("{}/images/factory/factory-scene.jpg", stub.base_url)
    );

    let categories = catalog.categories("zh").await;
    assert_eq!(categories.len(), 1);

    let detail = catalog.product_detail(1, "zh").await.unwrap();
    assert_eq!(detail.product.specification_items.len(), 19);
    assert!(detail.related.is_empty());

    assert!(catalog.product_detail(2, "zh").await.is_none());

    let queries = stub.queries();
    assert_eq!(queries[0].get("is_featured").map(String::as_str), Some("true"));
    assert_eq!(queries[0].get("lang").map(String::as_str), Some("zh"));
    assert_eq!(
        queries[1].get("include_subcategories").map(String::as_str),
        Some("true")
    );
    assert_eq!(queries[2].get("category").map(String::as_str), Some("3"));
    assert_eq!(queries[2].get("limit").map(String::as_str), Some("4"));
}
