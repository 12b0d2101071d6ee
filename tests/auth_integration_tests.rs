use axum::{
    extract::FromRequestParts,
    http::{Method, Request, Uri, header, request::Parts},
};
use jsonwebtoken::{EncodingKey, Header, encode};
use site_gateway::{
    AppState, MockMailer, StaticContentRepository,
    auth::{AuthUser, Claims, Role, StaffUser},
    config::{AppConfig, Env},
    error::ApiError,
};
use std::{sync::Arc, time::SystemTime};
use uuid::Uuid;

// --- Helper Functions ---

const TEST_JWT_SECRET: &str = "test-secret-value-1234567890";
const TEST_USER_ID: Uuid = Uuid::from_u128(1);

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap()
        .as_secs()
}

fn create_token_signed(user_id: Uuid, role: Role, exp: u64, secret: &str) -> String {
    let claims = Claims {
        sub: user_id,
        role,
        iat: now_secs() as usize,
        exp: exp as usize,
    };
    let key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::default(), &claims, &key).unwrap()
}

fn create_token(user_id: Uuid, role: Role, exp_offset: u64) -> String {
    create_token_signed(user_id, role, now_secs() + exp_offset, TEST_JWT_SECRET)
}

fn create_app_state(env: Env) -> AppState {
    let config = AppConfig {
        env,
        jwt_secret: TEST_JWT_SECRET.to_string(),
        ..AppConfig::default()
    };
    AppState::build(
        config,
        Arc::new(StaticContentRepository::bundled().unwrap()),
        Arc::new(MockMailer::new()),
    )
    .unwrap()
}

/// Helper to get the mutable Parts struct from a generated Request
fn get_request_parts(method: Method, uri: Uri) -> Parts {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(axum::body::Body::empty())
        .unwrap();
    let (parts, _) = request.into_parts();
    parts
}

fn with_bearer(parts: &mut Parts, token: &str) {
    parts.headers.insert(
        header::AUTHORIZATION,
        header::HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
    );
}

fn with_bypass(parts: &mut Parts, id: Uuid, role: &str) {
    parts.headers.insert(
        header::HeaderName::from_static("x-user-id"),
        header::HeaderValue::from_str(&id.to_string()).unwrap(),
    );
    parts.headers.insert(
        header::HeaderName::from_static("x-user-role"),
        header::HeaderValue::from_str(role).unwrap(),
    );
}

// --- Tests ---

#[tokio::test]
async fn test_auth_success_with_valid_jwt() {
    let app_state = create_app_state(Env::Production);
    let token = create_token(TEST_USER_ID, Role::Editor, 3600);

    let mut parts = get_request_parts(Method::GET, "/".parse().unwrap());
    with_bearer(&mut parts, &token);

    let user = AuthUser::from_request_parts(&mut parts, &app_state)
        .await
        .unwrap();
    assert_eq!(user.id, TEST_USER_ID);
    assert_eq!(user.role, Role::Editor);
}

#[tokio::test]
async fn test_auth_failure_with_missing_header() {
    let app_state = create_app_state(Env::Production);
    let mut parts = get_request_parts(Method::GET, "/".parse().unwrap());

    let auth_user = AuthUser::from_request_parts(&mut parts, &app_state).await;

    assert!(matches!(auth_user, Err(ApiError::Unauthorized)));
}

#[tokio::test]
async fn test_auth_failure_with_expired_jwt() {
    let app_state = create_app_state(Env::Production);
    // Well past the default validation leeway.
    let token = create_token_signed(TEST_USER_ID, Role::Admin, now_secs() - 600, TEST_JWT_SECRET);

    let mut parts = get_request_parts(Method::GET, "/".parse().unwrap());
    with_bearer(&mut parts, &token);

    let auth_user = AuthUser::from_request_parts(&mut parts, &app_state).await;
    assert!(matches!(auth_user, Err(ApiError::Unauthorized)));
}

#[tokio::test]
async fn test_auth_failure_with_foreign_signature() {
    let app_state = create_app_state(Env::Production);
    let token = create_token_signed(
        TEST_USER_ID,
        Role::Admin,
        now_secs() + 3600,
        "some-other-secret",
    );

    let mut parts = get_request_parts(Method::GET, "/".parse().unwrap());
    with_bearer(&mut parts, &token);

    let auth_user = AuthUser::from_request_parts(&mut parts, &app_state).await;
    assert!(matches!(auth_user, Err(ApiError::Unauthorized)));
}

#[tokio::test]
async fn test_local_bypass_success() {
    let app_state = create_app_state(Env::Local);
    let mock_user_id = Uuid::new_v4();

    let mut parts = get_request_parts(Method::GET, "/".parse().unwrap());
    with_bypass(&mut parts, mock_user_id, "admin");

    let user = AuthUser::from_request_parts(&mut parts, &app_state)
        .await
        .unwrap();
    assert_eq!(user.id, mock_user_id);
    assert_eq!(user.role, Role::Admin);
}

#[tokio::test]
async fn test_local_bypass_disabled_in_prod() {
    let app_state = create_app_state(Env::Production);

    let mut parts = get_request_parts(Method::GET, "/".parse().unwrap());
    with_bypass(&mut parts, Uuid::new_v4(), "admin");

    let auth_user = AuthUser::from_request_parts(&mut parts, &app_state).await;
    assert!(matches!(auth_user, Err(ApiError::Unauthorized)));
}

#[tokio::test]
async fn test_local_bypass_with_unknown_role_falls_back_to_jwt() {
    let app_state = create_app_state(Env::Local);

    let mut parts = get_request_parts(Method::GET, "/".parse().unwrap());
    with_bypass(&mut parts, Uuid::new_v4(), "superuser");

    let auth_user = AuthUser::from_request_parts(&mut parts, &app_state).await;
    assert!(matches!(auth_user, Err(ApiError::Unauthorized)));
}

#[tokio::test]
async fn test_staff_extractor_rejects_plain_user() {
    let app_state = create_app_state(Env::Production);
    let token = create_token(TEST_USER_ID, Role::User, 3600);

    let mut parts = get_request_parts(Method::GET, "/api/admin/stats".parse().unwrap());
    with_bearer(&mut parts, &token);

    let staff = StaffUser::from_request_parts(&mut parts, &app_state).await;
    assert!(matches!(staff, Err(ApiError::Forbidden)));
}

#[tokio::test]
async fn test_staff_extractor_accepts_editor_and_admin() {
    let app_state = create_app_state(Env::Production);

    for role in [Role::Editor, Role::Admin] {
        let token = create_token(TEST_USER_ID, role, 3600);
        let mut parts = get_request_parts(Method::GET, "/api/admin/stats".parse().unwrap());
        with_bearer(&mut parts, &token);

        let StaffUser(user) = StaffUser::from_request_parts(&mut parts, &app_state)
            .await
            .unwrap();
        assert_eq!(user.role, role);
    }
}

#[test]
fn test_role_parsing() {
    assert_eq!("ADMIN".parse::<Role>().unwrap(), Role::Admin);
    assert_eq!(" editor ".parse::<Role>().unwrap(), Role::Editor);
    assert!("student".parse::<Role>().is_err());
    assert!(Role::Editor.is_staff());
    assert!(!Role::User.is_staff());
}
