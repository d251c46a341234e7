use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::Response,
    Router,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;
use truthlens::{
    models::{
        Artifact, LabelEncoder, PassiveAggressive, PassiveAggressiveConfig, TfIdfConfig,
        TfIdfVectorizer,
    },
    pipelines::text_classification::ModelBundle,
    service::{router, AppContext},
};

fn bundle() -> ModelBundle {
    let corpus = [
        "senate pass budget bill",
        "central bank hold interest rate",
        "shock secret miracle cure",
        "alien secretly control government shock",
    ];

    let labels = LabelEncoder::fit(["REAL", "FAKE"]).unwrap();
    let targets = labels.encode_all(["REAL", "REAL", "FAKE", "FAKE"]).unwrap();

    let vectorizer = TfIdfVectorizer::fit(TfIdfConfig::new(), &corpus).unwrap();
    let vectors = vectorizer.transform_all(&corpus);
    let classifier = PassiveAggressive::fit(
        PassiveAggressiveConfig::new(),
        vectorizer.vocabulary_size(),
        &vectors,
        &targets,
    )
    .unwrap();

    ModelBundle::new(vectorizer, classifier, labels).unwrap()
}

fn ready_app() -> Router {
    router(Arc::new(AppContext::ready(bundle())))
}

fn not_ready_app() -> Router {
    router(Arc::new(AppContext::not_ready()))
}

async fn json_body(resp: Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn analyze_request(body: impl Into<Body>) -> Request<Body> {
    Request::post("/analyze")
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_health_not_ready() {
    let resp = not_ready_app().oneshot(get("/health")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        json_body(resp).await,
        json!({"status": "healthy", "models_loaded": false})
    );
}

#[tokio::test]
async fn test_health_ready() {
    let resp = ready_app().oneshot(get("/health")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        json_body(resp).await,
        json!({"status": "healthy", "models_loaded": true})
    );
}

#[tokio::test]
async fn test_analyze_without_text_is_rejected_in_any_state() {
    for app in [ready_app(), not_ready_app()] {
        for body in [json!({"text": ""}), json!({"text": "   "}), json!({})] {
            let resp = app
                .clone()
                .oneshot(analyze_request(body.to_string()))
                .await
                .unwrap();

            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
            assert_eq!(json_body(resp).await, json!({"error": "No text provided"}));
        }
    }
}

#[tokio::test]
async fn test_analyze_when_not_ready() {
    let resp = not_ready_app()
        .oneshot(analyze_request(
            json!({"text": "Senate passes budget"}).to_string(),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_body(resp).await, json!({"error": "Models not loaded"}));
}

#[tokio::test]
async fn test_analyze() {
    let resp = ready_app()
        .oneshot(analyze_request(
            json!({"text": "SHOCK!! Aliens secretly control the government: http://fake.example"})
                .to_string(),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);

    let body = json_body(resp).await;
    assert_eq!(body["label"], "FAKE");
    assert_eq!(body["cleaned_text"], "shock alien secretly control government");

    let confidence = body["confidence"].as_f64().unwrap();
    assert!((0.5..1.0).contains(&confidence));
}

#[tokio::test]
async fn test_analyze_malformed_body() {
    for body in ["not json", r#"{"text": 42}"#] {
        let resp = ready_app().oneshot(analyze_request(body)).await.unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(json_body(resp).await["error"].is_string());
    }
}

#[tokio::test]
async fn test_index() {
    let resp = not_ready_app().oneshot(get("/")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        json_body(resp).await,
        json!({
            "message": "TruthLens API",
            "version": env!("CARGO_PKG_VERSION"),
            "endpoints": {
                "/analyze": "POST - Analyze news text",
                "/health": "GET - Health check"
            }
        })
    );
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let req = Request::get("/health")
        .header("origin", "http://localhost:3000")
        .body(Body::empty())
        .unwrap();

    let resp = ready_app().oneshot(req).await.unwrap();

    assert_eq!(
        resp.headers()
            .get("access-control-allow-origin")
            .and_then(|value| value.to_str().ok()),
        Some("*")
    );
}

#[tokio::test]
async fn test_loads_saved_artifacts() {
    let dir = TempDir::new().unwrap();
    bundle().save(dir.path()).unwrap();

    let app = router(Arc::new(AppContext::load(dir.path())));
    let resp = app.oneshot(get("/health")).await.unwrap();

    assert_eq!(json_body(resp).await["models_loaded"], true);
}

#[tokio::test]
async fn test_analyze_oversized_body() {
    let text = "budget ".repeat(400_000);
    let body = json!({ "text": text }).to_string();

    let resp = ready_app().oneshot(analyze_request(body)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert!(json_body(resp).await["error"].is_string());
}

#[tokio::test]
async fn test_corrupt_vectorizer_leaves_service_not_ready() {
    let dir = TempDir::new().unwrap();
    bundle().save(dir.path()).unwrap();

    let path = TfIdfVectorizer::path(dir.path());
    let mut tfidf: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    tfidf["idf"] = json!([]);
    std::fs::write(&path, tfidf.to_string()).unwrap();

    let app = router(Arc::new(AppContext::load(dir.path())));

    let resp = app.clone().oneshot(get("/health")).await.unwrap();
    assert_eq!(json_body(resp).await["models_loaded"], false);

    let resp = app
        .oneshot(analyze_request(json!({"text": "Senate budget"}).to_string()))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_body(resp).await, json!({"error": "Models not loaded"}));
}
