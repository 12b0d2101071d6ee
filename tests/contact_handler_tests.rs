use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use site_gateway::{
    AppConfig, AppState, MockMailer, StaticContentRepository, create_router,
};
use std::sync::Arc;
use tower::util::ServiceExt;

// --- Helper Functions ---

fn create_app(mailer: MockMailer) -> Router {
    let state = AppState::build(
        AppConfig::default(),
        Arc::new(StaticContentRepository::bundled().unwrap()),
        Arc::new(mailer),
    )
    .unwrap();
    create_router(state)
}

fn contact_payload(email: &str) -> Value {
    json!({
        "name": "Jane Kim",
        "email": email,
        "company": "Acme Labs",
        "inquiryType": "market-entry",
        "message": "We are planning a Korean launch next quarter."
    })
}

async fn post_contact(app: &Router, payload: &Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/contact")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

// --- Tests ---

#[tokio::test]
async fn test_contact_success_sends_notification() {
    let mailer = MockMailer::new();
    let app = create_app(mailer.clone());

    let (status, body) = post_contact(&app, &contact_payload("Jane@Example.com")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    // No locale on the form: the reply is in the default (Korean) copy.
    assert!(body["message"].as_str().unwrap().contains("감사합니다"));

    let sent = mailer.sent();
    assert_eq!(sent.len(), 1);
    let email = &sent[0];
    assert_eq!(email.to, vec!["contact@localhost".to_string()]);
    assert_eq!(email.reply_to.as_deref(), Some("jane@example.com"));
    assert!(email.subject.ends_with("Jane Kim"));
    assert!(email.text.contains("Company: Acme Labs"));
    assert!(email.text.contains("Phone: -"));
    assert!(email.text.contains("Korean launch"));
}

#[tokio::test]
async fn test_contact_reply_follows_form_locale() {
    let app = create_app(MockMailer::new());
    let mut payload = contact_payload("jane@example.com");
    payload["locale"] = json!("en");

    let (status, body) = post_contact(&app, &payload).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].as_str().unwrap().starts_with("Thank you"));
}

#[tokio::test]
async fn test_contact_validation_error() {
    let mailer = MockMailer::new();
    let app = create_app(mailer.clone());
    let mut payload = contact_payload("not-an-email");
    payload["message"] = json!("short");

    let (status, body) = post_contact(&app, &payload).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["message"], "email is invalid");
    assert!(mailer.sent().is_empty());
}

#[tokio::test]
async fn test_contact_rate_limited_per_sender() {
    let mailer = MockMailer::new();
    let app = create_app(mailer.clone());

    for _ in 0..3 {
        let (status, _) = post_contact(&app, &contact_payload("jane@example.com")).await;
        assert_eq!(status, StatusCode::OK);
    }

    // Same sender, different case.
    let (status, body) = post_contact(&app, &contact_payload("JANE@example.com")).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["error"]["code"], "RATE_LIMITED");

    // Another sender has its own budget.
    let (status, _) = post_contact(&app, &contact_payload("john@example.com")).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(mailer.sent().len(), 4);
}

#[tokio::test]
async fn test_invalid_submissions_do_not_consume_budget() {
    let app = create_app(MockMailer::new());
    let mut invalid = contact_payload("jane@example.com");
    invalid["name"] = json!("");

    for _ in 0..5 {
        let (status, _) = post_contact(&app, &invalid).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    let (status, _) = post_contact(&app, &contact_payload("jane@example.com")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_contact_mail_failure_is_bad_gateway() {
    let app = create_app(MockMailer::new_failing());

    let (status, body) = post_contact(&app, &contact_payload("jane@example.com")).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"]["code"], "MAIL_DELIVERY_FAILED");
    // Provider details stay out of the response.
    assert_eq!(body["error"]["message"], "failed to deliver message");
}
