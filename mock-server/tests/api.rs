use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Collection, Environment};
use serde_json::Value;
use tower::ServiceExt;

const V: &str = "version=2018-03-05";

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn empty(method: &str, uri: &str) -> Request<String> {
    Request::builder().method(method).uri(uri).body(String::new()).unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn multipart_request(uri: &str, parts: &[(&str, Option<&str>, &str)]) -> Request<String> {
    let boundary = "test-boundary";
    let mut body = String::new();
    for (name, filename, content) in parts {
        body.push_str(&format!("--{boundary}\r\n"));
        match filename {
            Some(f) => body.push_str(&format!(
                "Content-Disposition: form-data; name=\"{name}\"; filename=\"{f}\"\r\n"
            )),
            None => body.push_str(&format!("Content-Disposition: form-data; name=\"{name}\"\r\n")),
        }
        body.push_str(&format!("\r\n{content}\r\n"));
    }
    body.push_str(&format!("--{boundary}--\r\n"));
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(http::header::CONTENT_TYPE, format!("multipart/form-data; boundary={boundary}"))
        .body(body)
        .unwrap()
}

async fn create_environment(app: &axum::Router, name: &str) -> Environment {
    let resp = app
        .clone()
        .oneshot(json_request("POST", &format!("/v1/environments?{V}"), &format!(r#"{{"name":"{name}"}}"#)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    body_json(resp).await
}

async fn create_collection(app: &axum::Router, env_id: &str) -> Collection {
    let resp = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/v1/environments/{env_id}/collections?{V}"),
            r#"{"name":"docs"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    body_json(resp).await
}

// --- version ---

#[tokio::test]
async fn missing_version_returns_400_json() {
    let resp = app().oneshot(empty("GET", "/v1/environments")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = body_json(resp).await;
    assert_eq!(body["code"], 400);
    assert!(body["error"].as_str().unwrap().contains("version"));
}

#[tokio::test]
async fn empty_version_is_rejected() {
    let resp = app().oneshot(empty("GET", "/v1/environments?version=")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- environments ---

#[tokio::test]
async fn list_environments_empty() {
    let resp = app().oneshot(empty("GET", &format!("/v1/environments?{V}"))).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    assert_eq!(body["environments"], serde_json::json!([]));
}

#[tokio::test]
async fn environment_lifecycle() {
    let app = app();
    let env = create_environment(&app, "my env").await;
    assert_eq!(env.name, "my env");
    assert_eq!(env.status, "active");

    let uri = format!("/v1/environments/{}?{V}", env.environment_id);
    let resp = app.clone().oneshot(empty("GET", &uri)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Environment = body_json(resp).await;
    assert_eq!(fetched.environment_id, env.environment_id);

    let resp = app
        .clone()
        .oneshot(json_request("PUT", &uri, r#"{"description":"updated"}"#))
        .await
        .unwrap();
    let updated: Environment = body_json(resp).await;
    assert_eq!(updated.name, "my env");
    assert_eq!(updated.description.as_deref(), Some("updated"));

    let resp = app.clone().oneshot(empty("DELETE", &uri)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    assert_eq!(body["status"], "deleted");

    let resp = app.oneshot(empty("GET", &uri)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = body_json(resp).await;
    assert_eq!(body["code"], 404);
}

#[tokio::test]
async fn create_environment_without_name_is_rejected() {
    let resp = app()
        .oneshot(json_request("POST", &format!("/v1/environments?{V}"), r#"{"description":"x"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- collections and documents ---

#[tokio::test]
async fn collection_in_unknown_environment_is_404() {
    let resp = app()
        .oneshot(json_request("POST", &format!("/v1/environments/nope/collections?{V}"), r#"{"name":"c"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn document_ingest_status_and_query() {
    let app = app();
    let env = create_environment(&app, "e").await;
    let coll = create_collection(&app, &env.environment_id).await;
    assert_eq!(coll.language, "en");
    let base = format!("/v1/environments/{}/collections/{}", env.environment_id, coll.collection_id);

    let resp = app
        .clone()
        .oneshot(multipart_request(
            &format!("{base}/documents?{V}"),
            &[("file", Some("a.txt"), "hello world"), ("metadata", None, r#"{"k":"v"}"#)],
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::ACCEPTED);
    let accepted: Value = body_json(resp).await;
    let doc_id = accepted["document_id"].as_str().unwrap().to_string();

    let resp = app
        .clone()
        .oneshot(empty("GET", &format!("{base}/documents/{doc_id}?{V}")))
        .await
        .unwrap();
    let status: Value = body_json(resp).await;
    assert_eq!(status["status_description"], "11 bytes");
    assert_eq!(status["filename"], "a.txt");

    let resp = app
        .clone()
        .oneshot(json_request("POST", &format!("{base}/query?{V}"), r#"{"natural_language_query":"HELLO"}"#))
        .await
        .unwrap();
    let results: Value = body_json(resp).await;
    assert_eq!(results["matching_results"], 1);
    assert_eq!(results["results"][0]["id"], doc_id.as_str());
    assert_eq!(results["results"][0]["metadata"]["k"], "v");

    let resp = app
        .clone()
        .oneshot(empty("DELETE", &format!("{base}/documents/{doc_id}?{V}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app
        .oneshot(json_request("POST", &format!("{base}/query?{V}"), r#"{"query":"hello"}"#))
        .await
        .unwrap();
    let results: Value = body_json(resp).await;
    assert_eq!(results["matching_results"], 0);
}

#[tokio::test]
async fn empty_multipart_is_rejected() {
    let app = app();
    let env = create_environment(&app, "e").await;
    let coll = create_collection(&app, &env.environment_id).await;
    let uri = format!(
        "/v1/environments/{}/collections/{}/documents?{V}",
        env.environment_id, coll.collection_id
    );
    let resp = app.oneshot(multipart_request(&uri, &[])).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_training_data_has_no_body() {
    let app = app();
    let env = create_environment(&app, "e").await;
    let coll = create_collection(&app, &env.environment_id).await;
    let uri = format!(
        "/v1/environments/{}/collections/{}/training_data?{V}",
        env.environment_id, coll.collection_id
    );
    let resp = app.oneshot(empty("DELETE", &uri)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());
}
