use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use petfinder_api::{build_router, AppState};
use petfinder_infrastructure::Backends;
use petfinder_shared::config::AppConfig;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

const SECRET: &str = "router-test-secret";

fn app() -> Router {
    let config = AppConfig::from_overrides(&[
        ("database.backend", "memory"),
        ("storage.backend", "memory"),
        ("auth.jwt_secret", SECRET),
        ("app.base_url", "https://petfinder.example"),
    ])
    .unwrap();
    let backends = Backends::in_memory(&config.storage.public_base_url);
    build_router(AppState::new(config, &backends), None)
}

fn bearer(owner: Uuid) -> String {
    let claims = json!({
        "sub": owner.to_string(),
        "aud": "authenticated",
        "exp": chrono::Utc::now().timestamp() + 3600,
    });
    let token = encode(&Header::new(Algorithm::HS256), &claims, &EncodingKey::from_secret(SECRET.as_bytes())).unwrap();
    format!("Bearer {}", token)
}

fn request(method: Method, uri: &str, owner: Option<Uuid>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(owner) = owner {
        builder = builder.header(header::AUTHORIZATION, bearer(owner));
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn test_health_is_public() {
    let (status, body) = send(&app(), request(Method::GET, "/health", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_pets_require_token() {
    let app = app();
    let (status, body) = send(&app, request(Method::GET, "/api/v1/pets", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");

    let forged = Request::builder()
        .uri("/api/v1/pets")
        .header(header::AUTHORIZATION, "Bearer not-a-jwt")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, forged).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_list_generate_delete() {
    let app = app();
    let owner = Uuid::new_v4();

    let (status, body) = send(
        &app,
        request(
            Method::POST,
            "/api/v1/pets",
            Some(owner),
            Some(json!({ "name": "Max", "species": "Dog", "breed": "Lab" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert!(body["data"]["qr_code_url"].is_null());
    let pet_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        request(Method::POST, &format!("/api/v1/pets/{}/qr", pet_id), Some(owner), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let url = body["data"]["qr_code_url"].as_str().unwrap();
    assert!(url.ends_with(&format!("/qr-codes/{}/{}.png", owner, pet_id)));

    let (status, body) = send(&app, request(Method::GET, "/api/v1/pets", Some(owner), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, body) = send(&app, request(Method::GET, &format!("/scan/{}", pet_id), None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Max");
    assert!(body["data"].get("owner_id").is_none());

    let (status, _) = send(
        &app,
        request(Method::DELETE, &format!("/api/v1/pets/{}", pet_id), Some(owner), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        request(Method::GET, &format!("/api/v1/pets/{}", pet_id), Some(owner), None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_other_owners_pet_is_not_found() {
    let app = app();
    let owner = Uuid::new_v4();
    let (_, body) = send(
        &app,
        request(
            Method::POST,
            "/api/v1/pets",
            Some(owner),
            Some(json!({ "name": "Luna", "species": "Cat", "breed": "Siamese" })),
        ),
    )
    .await;
    let pet_id = body["data"]["id"].as_str().unwrap().to_string();

    let stranger = Some(Uuid::new_v4());
    let (status, _) = send(&app, request(Method::GET, &format!("/api/v1/pets/{}", pet_id), stranger, None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        request(
            Method::PATCH,
            &format!("/api/v1/pets/{}", pet_id),
            stranger,
            Some(json!({ "name": "Mine" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_validation_and_malformed_ids() {
    let app = app();
    let owner = Some(Uuid::new_v4());

    let (status, body) = send(
        &app,
        request(Method::POST, "/api/v1/pets", owner, Some(json!({ "name": "", "species": "Dog", "breed": "Lab" }))),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let (status, body) = send(&app, request(Method::GET, "/api/v1/pets/not-a-uuid", owner, None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_qr_download_headers() {
    let app = app();
    let owner = Uuid::new_v4();
    let (_, body) = send(
        &app,
        request(
            Method::POST,
            "/api/v1/pets",
            Some(owner),
            Some(json!({ "name": "Mr Whiskers", "species": "Cat", "breed": "Tabby" })),
        ),
    )
    .await;
    let pet_id = body["data"]["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(request(Method::GET, &format!("/api/v1/pets/{}/qr.png", pet_id), Some(owner), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"Mr-Whiskers-qr-code.png\""
    );
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..4], b"\x89PNG");
}

#[tokio::test]
async fn test_local_storage_is_served() {
    use petfinder_infrastructure::{InMemoryPetRepository, LocalObjectStore};
    use std::sync::Arc;

    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig::from_overrides(&[
        ("database.backend", "memory"),
        ("storage.backend", "local"),
        ("auth.jwt_secret", SECRET),
    ])
    .unwrap();
    let mut backends = Backends::new(
        Arc::new(InMemoryPetRepository::new()),
        Arc::new(LocalObjectStore::new(dir.path(), config.storage.public_base_url.clone())),
    );
    backends.local_root = Some(dir.path().to_path_buf());
    let app = build_router(AppState::new(config, &backends), backends.local_root.clone());

    let owner = Uuid::new_v4();
    let (_, body) = send(
        &app,
        request(
            Method::POST,
            "/api/v1/pets",
            Some(owner),
            Some(json!({ "name": "Max", "species": "Dog", "breed": "Lab" })),
        ),
    )
    .await;
    let pet_id = body["data"]["id"].as_str().unwrap().to_string();
    send(&app, request(Method::POST, &format!("/api/v1/pets/{}/qr", pet_id), Some(owner), None)).await;

    let response = app
        .clone()
        .oneshot(request(Method::GET, &format!("/storage/qr-codes/{}/{}.png", owner, pet_id), None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_blank_description_update_is_cleared() {
    let app = app();
    let owner = Some(Uuid::new_v4());
    let (_, body) = send(
        &app,
        request(
            Method::POST,
            "/api/v1/pets",
            owner,
            Some(json!({ "name": "Max", "species": "Dog", "breed": "Lab", "description": "Brown collar" })),
        ),
    )
    .await;
    let pet_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        request(Method::PATCH, &format!("/api/v1/pets/{}", pet_id), owner, Some(json!({ "description": "   " }))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["description"].is_null());

    let (_, body) = send(&app, request(Method::GET, &format!("/scan/{}", pet_id), None, None)).await;
    assert!(body["data"]["description"].is_null());
}
