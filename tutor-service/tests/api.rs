use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::util::ServiceExt;
use tutor_service::config::{AppSettings, ServerSettings, Settings, TutorSettings};
use tutor_service::services::metrics::init_metrics;
use tutor_service::services::TutorPipeline;
use tutor_service::startup::build_router;
use tutor_service::AppState;

fn test_settings() -> Settings {
    Settings {
        app: AppSettings {
            static_dir: concat!(env!("CARGO_MANIFEST_DIR"), "/static").into(),
            ..AppSettings::default()
        },
        tutor: TutorSettings::without_delays(),
        ..Settings::default()
    }
}

fn test_app() -> Router {
    let settings = test_settings();
    let pipeline = TutorPipeline::mock(&settings.tutor);
    build_router(AppState::new(settings, pipeline, init_metrics()))
}

fn form_request(body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/ask")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn ask_returns_explanation_and_quiz() {
    let (status, body) = send(test_app(), form_request("query=What+is+torque%3F")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["explanation"]
        .as_str()
        .unwrap()
        .contains("What is torque?"));
    assert_eq!(
        body["quiz"]["question"],
        "Which of these is the most critical first step in this concept?"
    );

    let options = body["quiz"]["options"].as_array().unwrap();
    assert_eq!(options.len(), 3);
    assert_eq!(body["quiz"]["answer"], "Core Principle A");
    assert!(options.contains(&body["quiz"]["answer"]));
}

#[tokio::test]
async fn ask_without_query_field_is_rejected() {
    let (status, body) = send(test_app(), form_request("")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "No query provided" }));
}

#[tokio::test]
async fn ask_with_blank_query_is_rejected() {
    for blank in ["query=", "query=+", "query=%09%0A++"] {
        let (status, body) = send(test_app(), form_request(blank)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "input {blank:?}");
        assert_eq!(body, json!({ "error": "No query provided" }));
    }
}

#[tokio::test]
async fn ask_without_form_body_is_rejected() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/ask")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(test_app(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "No query provided" }));
}

#[tokio::test]
async fn same_query_yields_identical_answers() {
    let app = test_app();

    let (_, first) = send(app.clone(), form_request("query=Define+entropy")).await;
    let (_, second) = send(app, form_request("query=Define+entropy")).await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn multipart_with_image_matches_urlencoded_answer() {
    let body = "--XBOUNDARY\r\n\
                Content-Disposition: form-data; name=\"query\"\r\n\r\n\
                What is torque?\r\n\
                --XBOUNDARY\r\n\
                Content-Disposition: form-data; name=\"image\"; filename=\"lever.jpg\"\r\n\
                Content-Type: image/jpeg\r\n\r\n\
                JPEGBYTES\r\n\
                --XBOUNDARY--\r\n";
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/ask")
        .header(header::CONTENT_TYPE, "multipart/form-data; boundary=XBOUNDARY")
        .body(Body::from(body))
        .unwrap();

    let app = test_app();
    let (status, multipart_body) = send(app.clone(), request).await;
    let (_, form_body) = send(app, form_request("query=What+is+torque%3F")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(multipart_body, form_body);
}

fn multipart_request(boundary: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/ask")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(body))
        .unwrap()
}

fn multipart_with_image(query: &str, image: &[u8]) -> Vec<u8> {
    let mut body = format!(
        "--XBOUNDARY\r\n\
         Content-Disposition: form-data; name=\"query\"\r\n\r\n\
         {}\r\n\
         --XBOUNDARY\r\n\
         Content-Disposition: form-data; name=\"image\"; filename=\"photo.jpg\"\r\n\
         Content-Type: image/jpeg\r\n\r\n",
        query
    )
    .into_bytes();
    body.extend_from_slice(image);
    body.extend_from_slice(b"\r\n--XBOUNDARY--\r\n");
    body
}

#[tokio::test]
async fn phone_sized_image_is_accepted() {
    let image = vec![0xAB; 3 * 1024 * 1024];
    let request = multipart_request("XBOUNDARY", multipart_with_image("What is torque?", &image));

    let (status, body) = send(test_app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["explanation"]
        .as_str()
        .unwrap()
        .contains("**'What is torque?'**"));
}

#[tokio::test]
async fn long_urlencoded_query_is_accepted() {
    let query = "a".repeat(3 * 1024 * 1024);

    let (status, body) = send(test_app(), form_request(&format!("query={}", query))).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["explanation"].as_str().unwrap().contains(&query));
}

#[tokio::test]
async fn body_over_configured_limit_is_rejected() {
    let settings = Settings {
        server: ServerSettings {
            max_request_bytes: 1024,
            ..ServerSettings::default()
        },
        ..test_settings()
    };
    let pipeline = TutorPipeline::mock(&settings.tutor);
    let app = build_router(AppState::new(settings, pipeline, init_metrics()));
    let image = vec![0xAB; 4096];

    let (status, body) = send(
        app,
        multipart_request("XBOUNDARY", multipart_with_image("What is torque?", &image)),
    )
    .await;

    assert!(status.is_client_error());
    assert!(body.get("explanation").is_none());
}

#[tokio::test]
async fn index_renders_chat_interface() {
    let response = test_app().oneshot(get_request("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("text/html"));

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains(r#"id="chat-app""#));
    assert!(html.contains(r#"id="chat-window""#));
    assert!(html.contains(r#"id="chat-form""#));
    assert!(html.contains("Ask about Rotational Motion, P-Block Elements..."));
}

#[tokio::test]
async fn static_assets_are_served() {
    let response = test_app()
        .oneshot(get_request("/static/script.js"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn health_reports_service_name() {
    let (status, body) = send(test_app(), get_request("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "tutor-service");
}

#[tokio::test]
async fn unknown_route_returns_json_404() {
    let (status, body) = send(test_app(), get_request("/api/unknown")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Route not found" }));
}

#[tokio::test]
async fn ask_only_accepts_post() {
    let response = test_app().oneshot(get_request("/api/ask")).await.unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn responses_carry_request_id() {
    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "req-42")
        .body(Body::empty())
        .unwrap();

    let response = test_app().oneshot(request).await.unwrap();

    assert_eq!(response.headers()["x-request-id"], "req-42");
}

#[tokio::test]
async fn metrics_expose_pipeline_counters() {
    let app = test_app();
    let (status, _) = send(app.clone(), form_request("query=Ohm%27s+law")).await;
    assert_eq!(status, StatusCode::OK);

    let response = app.oneshot(get_request("/metrics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.contains("tutor_questions_total"));
}
