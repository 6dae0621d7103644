// Contract tests for the HTTP routes, run against the in-memory store.
use actix_web::{App, test, web};
use jobkeeper::api::{Envelope, configure_routes};
use jobkeeper::{JobRepository, MemoryStore};
use std::sync::Arc;

macro_rules! app {
    () => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(JobRepository::new(Arc::new(MemoryStore::new()))))
                .configure(configure_routes),
        )
        .await
    };
}

macro_rules! post {
    ($app:expr, $uri:expr, $form:expr) => {{
        let req = test::TestRequest::post()
            .uri($uri)
            .set_form($form)
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), 200);
        let envelope: Envelope = test::read_body_json(resp).await;
        envelope
    }};
}

macro_rules! get {
    ($app:expr, $uri:expr) => {{
        let req = test::TestRequest::get().uri($uri).to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), 200);
        let envelope: Envelope = test::read_body_json(resp).await;
        envelope
    }};
}

#[actix_web::test]
async fn test_welcome() {
    let app = app!();
    let envelope = get!(app, "/");
    assert!(envelope.success);
    assert!(envelope.response.is_some());
    assert_eq!(envelope.error_message, None);
    assert!(envelope.data.is_empty());
}

#[actix_web::test]
async fn test_hits_count_up() {
    let app = app!();
    assert_eq!(get!(app, "/hits").data["hits"], 1);
    assert_eq!(get!(app, "/hits").data["hits"], 2);
}

#[actix_web::test]
async fn test_job_lifecycle_scenario() {
    let app = app!();

    let created = post!(app, "/create", &[("name", "backup")]);
    assert!(created.success);
    assert_eq!(created.data["id"], 1);
    assert_eq!(created.data["name"], "backup");
    assert_eq!(created.data["status"], "RUNNING");
    assert_eq!(created.data["created"], created.data["last_updated"]);

    let paused = post!(app, "/pause", &[("id", "1")]);
    assert!(paused.success);
    assert_eq!(paused.data["status"], "PAUSED");

    let again = post!(app, "/pause", &[("id", "1")]);
    assert!(!again.success);
    assert_eq!(again.response, None);
    assert_eq!(
        again.error_message.as_deref(),
        Some("Only RUNNING jobs can be paused. This job is PAUSED.")
    );

    let stopped = post!(app, "/stop", &[("id", "1")]);
    assert!(stopped.success);
    assert_eq!(stopped.data["status"], "STOPPED");

    let resumed = post!(app, "/resume", &[("id", "1")]);
    assert!(!resumed.success);
    assert_eq!(
        resumed.error_message.as_deref(),
        Some("Only PAUSED jobs can be resumed. This job is STOPPED.")
    );

    let stored = get!(app, "/jobs/id/1");
    assert!(stored.success);
    assert_eq!(stored.data["status"], "STOPPED");
}

#[actix_web::test]
async fn test_resume_after_pause() {
    let app = app!();
    post!(app, "/create", &[("name", "sync")]);
    post!(app, "/pause", &[("id", "1")]);

    let resumed = post!(app, "/resume", &[("id", "1")]);
    assert!(resumed.success);
    assert_eq!(resumed.data["status"], "RUNNING");
}

#[actix_web::test]
async fn test_create_requires_exactly_name() {
    let app = app!();

    let superset = post!(app, "/create", &[("name", "backup"), ("id", "1")]);
    assert!(!superset.success);
    assert_eq!(
        superset.error_message.as_deref(),
        Some("This endpoint requires exactly these parameters: name")
    );

    let missing = post!(app, "/create", &[("title", "backup")]);
    assert!(!missing.success);

    let empty = post!(app, "/create", &[("name", "  ")]);
    assert!(!empty.success);

    assert!(get!(app, "/jobs").data.is_empty());
}

#[actix_web::test]
async fn test_create_without_body_is_parameter_mismatch() {
    let app = app!();
    let req = test::TestRequest::post().uri("/create").to_request();
    let envelope: Envelope = test::call_and_read_body_json(&app, req).await;
    assert!(!envelope.success);
    assert_eq!(
        envelope.error_message.as_deref(),
        Some("This endpoint requires exactly these parameters: name")
    );
}

#[actix_web::test]
async fn test_transition_on_unknown_job() {
    let app = app!();
    let envelope = post!(app, "/stop", &[("id", "42")]);
    assert!(!envelope.success);
    assert_eq!(
        envelope.error_message.as_deref(),
        Some("Job with id 42 not found.")
    );
}

#[actix_web::test]
async fn test_listing_and_filters() {
    let app = app!();
    for name in ["a", "b", "c"] {
        post!(app, "/create", &[("name", name)]);
    }
    post!(app, "/pause", &[("id", "2")]);
    post!(app, "/stop", &[("id", "3")]);

    let all = get!(app, "/jobs");
    assert!(all.success);
    assert_eq!(all.data.len(), 3);
    assert_eq!(all.data["2"]["name"], "b");

    let running = get!(app, "/jobs/status/RUNNING");
    assert_eq!(running.data.keys().collect::<Vec<_>>(), vec!["1"]);
    let paused = get!(app, "/jobs/status/PAUSED");
    assert_eq!(paused.data.keys().collect::<Vec<_>>(), vec!["2"]);
    let stopped = get!(app, "/jobs/status/STOPPED");
    assert_eq!(stopped.data.keys().collect::<Vec<_>>(), vec!["3"]);
}

#[actix_web::test]
async fn test_invalid_filters() {
    let app = app!();
    post!(app, "/create", &[("name", "a")]);

    let bad_status = get!(app, "/jobs/status/INVALID");
    assert!(!bad_status.success);
    assert_eq!(
        bad_status.error_message.as_deref(),
        Some("Invalid status filter: INVALID. Must be one of RUNNING, PAUSED, STOPPED.")
    );

    let bad_type = get!(app, "/jobs/bogus/x");
    assert!(!bad_type.success);
    assert_eq!(
        bad_type.error_message.as_deref(),
        Some("Invalid filter type: bogus. Must be one of id, status.")
    );

    let missing = get!(app, "/jobs/id/7");
    assert!(!missing.success);
    assert_eq!(
        missing.error_message.as_deref(),
        Some("Job with id 7 not found.")
    );
}

#[actix_web::test]
async fn test_oversized_body_is_reported_as_too_large() {
    let app = app!();
    let name = "x".repeat(20_000);

    let envelope = post!(app, "/create", &[("name", name.as_str())]);
    assert!(!envelope.success);
    let message = envelope.error_message.unwrap_or_default();
    assert!(message.starts_with("Request body too large"), "{}", message);

    let envelope = post!(app, "/pause", &[("id", name.as_str())]);
    assert!(!envelope.success);
    assert!(
        envelope
            .error_message
            .unwrap_or_default()
            .starts_with("Request body too large")
    );

    assert!(get!(app, "/jobs").data.is_empty());
}

#[actix_web::test]
async fn test_health_reports_store() {
    let app = app!();
    let envelope = get!(app, "/health");
    assert!(envelope.success);
    assert_eq!(envelope.data["store"], "ok");
}
