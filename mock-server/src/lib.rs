//! In-memory stand-in for a subset of the discovery service.
//!
//! Covers environments, collections, document ingestion (multipart), a
//! substring query and training-data deletion. Every route requires the
//! `version` query parameter, and errors come back as `{"code", "error"}`
//! JSON the way the real service reports them.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Multipart, Path, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};
use uuid::Uuid;

const CREATED: &str = "2018-03-05T10:00:00.000Z";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Environment {
    pub environment_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created: String,
    pub updated: String,
    pub status: String,
    pub read_only: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DocumentCounts {
    pub available: i64,
    pub processing: i64,
    pub failed: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Collection {
    pub collection_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configuration_id: Option<String>,
    pub language: String,
    pub status: String,
    pub created: String,
    pub updated: String,
    pub document_counts: DocumentCounts,
}

#[derive(Clone, Debug)]
pub struct StoredDocument {
    pub document_id: String,
    pub environment_id: String,
    pub collection_id: String,
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub content: Vec<u8>,
    pub metadata: Option<Value>,
}

impl StoredDocument {
    fn belongs_to(&self, environment_id: &str, collection_id: &str) -> bool {
        self.environment_id == environment_id && self.collection_id == collection_id
    }
}

#[derive(Deserialize)]
pub struct CreateEnvironment {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateEnvironment {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateCollection {
    pub name: String,
    pub description: Option<String>,
    pub configuration_id: Option<String>,
    pub language: Option<String>,
}

#[derive(Deserialize)]
pub struct QueryRequest {
    pub query: Option<String>,
    pub natural_language_query: Option<String>,
    pub count: Option<usize>,
}

#[derive(Default)]
pub struct Store {
    environments: HashMap<String, Environment>,
    collections: HashMap<(String, String), Collection>,
    documents: HashMap<String, StoredDocument>,
}

impl Store {
    /// Documents of one collection whose text contains `needle`, case-insensitively.
    fn search(&self, environment_id: &str, collection_id: &str, needle: &str) -> Vec<&StoredDocument> {
        let needle = needle.to_lowercase();
        let mut matches: Vec<&StoredDocument> = self
            .documents
            .values()
            .filter(|doc| doc.belongs_to(environment_id, collection_id))
            .filter(|doc| String::from_utf8_lossy(&doc.content).to_lowercase().contains(&needle))
            .collect();
        matches.sort_by(|a, b| a.document_id.cmp(&b.document_id));
        matches
    }
}

pub type Db = Arc<RwLock<Store>>;

/// Error response in the service's JSON shape.
pub struct ApiError(StatusCode, String);

impl ApiError {
    fn not_found(what: &str, id: &str) -> Self {
        ApiError(StatusCode::NOT_FOUND, format!("{what} {id} not found"))
    }

    fn bad_request(msg: impl Into<String>) -> Self {
        ApiError(StatusCode::BAD_REQUEST, msg.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({"code": self.0.as_u16(), "error": self.1});
        (self.0, Json(body)).into_response()
    }
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/v1/environments", get(list_environments).post(create_environment))
        .route(
            "/v1/environments/{environment_id}",
            get(get_environment).put(update_environment).delete(delete_environment),
        )
        .route(
            "/v1/environments/{environment_id}/collections",
            get(list_collections).post(create_collection),
        )
        .route(
            "/v1/environments/{environment_id}/collections/{collection_id}",
            get(get_collection).delete(delete_collection),
        )
        .route(
            "/v1/environments/{environment_id}/collections/{collection_id}/documents",
            post(add_document),
        )
        .route(
            "/v1/environments/{environment_id}/collections/{collection_id}/documents/{document_id}",
            get(get_document_status).delete(delete_document),
        )
        .route(
            "/v1/environments/{environment_id}/collections/{collection_id}/query",
            post(query_collection),
        )
        .route(
            "/v1/environments/{environment_id}/collections/{collection_id}/training_data",
            delete(delete_all_training_data),
        )
        .layer(middleware::from_fn(require_version))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock discovery service listening");
    }
    axum::serve(listener, app()).await
}

async fn require_version(request: Request, next: Next) -> Response {
    let has_version = request
        .uri()
        .query()
        .map(|q| q.split('&').any(|pair| pair.starts_with("version=") && pair.len() > 8))
        .unwrap_or(false);
    if !has_version {
        return ApiError::bad_request("Missing required query parameter 'version'").into_response();
    }
    debug!(method = %request.method(), uri = %request.uri(), "request");
    next.run(request).await
}

async fn list_environments(State(db): State<Db>) -> Json<Value> {
    let store = db.read().await;
    let mut environments: Vec<&Environment> = store.environments.values().collect();
    environments.sort_by(|a, b| a.name.cmp(&b.name));
    Json(json!({ "environments": environments }))
}

async fn create_environment(
    State(db): State<Db>,
    Json(input): Json<CreateEnvironment>,
) -> Result<(StatusCode, Json<Environment>), ApiError> {
    if input.name.trim().is_empty() {
        return Err(ApiError::bad_request("name must not be empty"));
    }
    let env = Environment {
        environment_id: Uuid::new_v4().to_string(),
        name: input.name,
        description: input.description,
        created: CREATED.to_string(),
        updated: CREATED.to_string(),
        status: "active".to_string(),
        read_only: false,
    };
    db.write().await.environments.insert(env.environment_id.clone(), env.clone());
    Ok((StatusCode::CREATED, Json(env)))
}

async fn get_environment(
    State(db): State<Db>,
    Path(environment_id): Path<String>,
) -> Result<Json<Environment>, ApiError> {
    let store = db.read().await;
    store
        .environments
        .get(&environment_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Environment", &environment_id))
}

async fn update_environment(
    State(db): State<Db>,
    Path(environment_id): Path<String>,
    Json(input): Json<UpdateEnvironment>,
) -> Result<Json<Environment>, ApiError> {
    let mut store = db.write().await;
    let env = store
        .environments
        .get_mut(&environment_id)
        .ok_or_else(|| ApiError::not_found("Environment", &environment_id))?;
    if let Some(name) = input.name {
        env.name = name;
    }
    if let Some(description) = input.description {
        env.description = Some(description);
    }
    Ok(Json(env.clone()))
}

async fn delete_environment(
    State(db): State<Db>,
    Path(environment_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let mut store = db.write().await;
    store
        .environments
        .remove(&environment_id)
        .ok_or_else(|| ApiError::not_found("Environment", &environment_id))?;
    store.collections.retain(|(env, _), _| env != &environment_id);
    store.documents.retain(|_, doc| doc.environment_id != environment_id);
    Ok(Json(json!({"environment_id": environment_id, "status": "deleted"})))
}

fn ensure_environment(store: &Store, environment_id: &str) -> Result<(), ApiError> {
    if store.environments.contains_key(environment_id) {
        Ok(())
    } else {
        Err(ApiError::not_found("Environment", environment_id))
    }
}

async fn list_collections(
    State(db): State<Db>,
    Path(environment_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let store = db.read().await;
    ensure_environment(&store, &environment_id)?;
    let mut collections: Vec<&Collection> = store
        .collections
        .iter()
        .filter(|((env, _), _)| env == &environment_id)
        .map(|(_, c)| c)
        .collect();
    collections.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(Json(json!({ "collections": collections })))
}

async fn create_collection(
    State(db): State<Db>,
    Path(environment_id): Path<String>,
    Json(input): Json<CreateCollection>,
) -> Result<(StatusCode, Json<Collection>), ApiError> {
    let mut store = db.write().await;
    ensure_environment(&store, &environment_id)?;
    let collection = Collection {
        collection_id: Uuid::new_v4().to_string(),
        name: input.name,
        description: input.description,
        configuration_id: input.configuration_id,
        language: input.language.unwrap_or_else(|| "en".to_string()),
        status: "active".to_string(),
        created: CREATED.to_string(),
        updated: CREATED.to_string(),
        document_counts: DocumentCounts { available: 0, processing: 0, failed: 0 },
    };
    store
        .collections
        .insert((environment_id, collection.collection_id.clone()), collection.clone());
    Ok((StatusCode::CREATED, Json(collection)))
}

async fn get_collection(
    State(db): State<Db>,
    Path((environment_id, collection_id)): Path<(String, String)>,
) -> Result<Json<Collection>, ApiError> {
    let store = db.read().await;
    store
        .collections
        .get(&(environment_id, collection_id.clone()))
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Collection", &collection_id))
}

async fn delete_collection(
    State(db): State<Db>,
    Path((environment_id, collection_id)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
    let mut store = db.write().await;
    store
        .collections
        .remove(&(environment_id.clone(), collection_id.clone()))
        .ok_or_else(|| ApiError::not_found("Collection", &collection_id))?;
    store.documents.retain(|_, doc| !doc.belongs_to(&environment_id, &collection_id));
    Ok(Json(json!({"collection_id": collection_id, "status": "deleted"})))
}

async fn add_document(
    State(db): State<Db>,
    Path((environment_id, collection_id)): Path<(String, String)>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let mut file: Option<(Option<String>, Option<String>, Vec<u8>)> = None;
    let mut metadata: Option<Value> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        let filename = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(format!("unreadable part '{name}': {e}")))?;
        match name.as_str() {
            "file" => file = Some((filename, content_type, data.to_vec())),
            "metadata" => {
                let value = serde_json::from_slice(&data)
                    .map_err(|e| ApiError::bad_request(format!("metadata is not JSON: {e}")))?;
                metadata = Some(value);
            }
            other => return Err(ApiError::bad_request(format!("unexpected part '{other}'"))),
        }
    }

    if file.is_none() && metadata.is_none() {
        return Err(ApiError::bad_request("a file or metadata part is required"));
    }

    let mut store = db.write().await;
    let collection = store
        .collections
        .get_mut(&(environment_id.clone(), collection_id.clone()))
        .ok_or_else(|| ApiError::not_found("Collection", &collection_id))?;
    collection.document_counts.available += 1;

    let (filename, content_type, content) = file.unwrap_or_default();
    let document = StoredDocument {
        document_id: Uuid::new_v4().to_string(),
        environment_id,
        collection_id,
        filename,
        content_type,
        content,
        metadata,
    };
    let document_id = document.document_id.clone();
    store.documents.insert(document_id.clone(), document);
    Ok((
        StatusCode::ACCEPTED,
        Json(json!({"document_id": document_id, "status": "processing"})),
    ))
}

async fn get_document_status(
    State(db): State<Db>,
    Path((environment_id, collection_id, document_id)): Path<(String, String, String)>,
) -> Result<Json<Value>, ApiError> {
    let store = db.read().await;
    let doc = store
        .documents
        .get(&document_id)
        .filter(|doc| doc.belongs_to(&environment_id, &collection_id))
        .ok_or_else(|| ApiError::not_found("Document", &document_id))?;
    Ok(Json(json!({
        "document_id": doc.document_id,
        "status": "available",
        "status_description": format!("{} bytes", doc.content.len()),
        "filename": doc.filename,
        "file_type": doc.content_type,
        "notices": [],
    })))
}

async fn delete_document(
    State(db): State<Db>,
    Path((environment_id, collection_id, document_id)): Path<(String, String, String)>,
) -> Result<Json<Value>, ApiError> {
    let mut store = db.write().await;
    let owned = store
        .documents
        .get(&document_id)
        .is_some_and(|doc| doc.belongs_to(&environment_id, &collection_id));
    if !owned {
        return Err(ApiError::not_found("Document", &document_id));
    }
    store.documents.remove(&document_id);
    if let Some(collection) = store.collections.get_mut(&(environment_id, collection_id)) {
        collection.document_counts.available -= 1;
    }
    Ok(Json(json!({"document_id": document_id, "status": "deleted"})))
}

async fn query_collection(
    State(db): State<Db>,
    Path((environment_id, collection_id)): Path<(String, String)>,
    Json(input): Json<QueryRequest>,
) -> Result<Json<Value>, ApiError> {
    let store = db.read().await;
    if !store.collections.contains_key(&(environment_id.clone(), collection_id.clone())) {
        return Err(ApiError::not_found("Collection", &collection_id));
    }
    let needle = input.natural_language_query.or(input.query).unwrap_or_default();

    let matches = store.search(&environment_id, &collection_id, &needle);
    let matching_results = matches.len();

    let results: Vec<Value> = matches
        .into_iter()
        .take(input.count.unwrap_or(10))
        .map(|doc| {
            json!({
                "id": doc.document_id,
                "collection_id": doc.collection_id,
                "metadata": doc.metadata,
                "result_metadata": {"score": 1.0},
                "extracted_metadata": {"filename": doc.filename},
                "text": String::from_utf8_lossy(&doc.content),
            })
        })
        .collect();

    Ok(Json(json!({
        "matching_results": matching_results,
        "results": results,
        "session_token": Uuid::new_v4().simple().to_string(),
        "retrieval_details": {"document_retrieval_strategy": "untrained"},
    })))
}

async fn delete_all_training_data(
    State(db): State<Db>,
    Path((environment_id, collection_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    let store = db.read().await;
    if store.collections.contains_key(&(environment_id, collection_id.clone())) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found("Collection", &collection_id))
    }
}
