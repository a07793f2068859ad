//! End-to-end access-control tests — start ephemeral PG, build the router,
//! and drive the full register/login/mutate flows over HTTP.

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use adboards_api::config::ApiConfig;
use adboards_api::{AppState, migrate, router};
use adboards_core::auth::jwt::TokenConfig;
use adboards_core::db::EphemeralDb;
use adboards_core::files::PhotoStore;
use adboards_core::mail::{LogMailer, MailError, Mailer};

/// Captures outbound mail so tests can read reset tokens.
#[derive(Default)]
struct CapturingMailer {
    messages: Mutex<Vec<(String, String, String)>>,
}

#[async_trait::async_trait]
impl Mailer for CapturingMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError> {
        self.messages
            .lock()
            .expect("mailer lock")
            .push((to.into(), subject.into(), body.into()));
        Ok(())
    }
}

struct TestApp {
    db: EphemeralDb,
    pool: sqlx::PgPool,
    app: Router,
    _photo_dir: tempfile::TempDir,
}

async fn spawn_app(mailer: Arc<dyn Mailer>) -> TestApp {
    let mut db = EphemeralDb::new().await.expect("EphemeralDb::new");
    db.setup().await.expect("db setup");
    db.start().await.expect("db start");

    let pool = sqlx::PgPool::connect(&db.connection_url())
        .await
        .expect("connect to ephemeral PG");
    migrate(&pool).await.expect("migrations");

    let photo_dir = tempfile::tempdir().expect("photo tempdir");
    let photos = PhotoStore::new(photo_dir.path());
    photos.init().await.expect("photo store init");

    let config = ApiConfig {
        bind_addr: "127.0.0.1:0".into(),
        database_url: db.connection_url(),
        token: TokenConfig {
            secret: "test-secret".into(),
            issuer: "adboards".into(),
            audience: "adboards-clients".into(),
        },
        photo_dir: photo_dir.path().to_path_buf(),
        public_base_url: "http://localhost:0".into(),
    };

    let state = AppState {
        pool: pool.clone(),
        config,
        photos,
        mailer,
    };

    TestApp {
        db,
        pool,
        app: router(state),
        _photo_dir: photo_dir,
    }
}

/// Send a request, returning status and parsed JSON body (Null when the
/// body is not JSON).
async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&json).expect("serialize body")))
            .expect("build request"),
        None => builder.body(Body::empty()).expect("build request"),
    };

    let response = app.clone().oneshot(request).await.expect("request");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

async fn register(app: &Router, login: &str) {
    let (status, _) = send(
        app,
        "POST",
        "/api/auth/register",
        None,
        Some(serde_json::json!({
            "login": login,
            "password": "hunter2hunter2",
            "name": login,
            "city": "Riga",
            "email": format!("{login}@example.com"),
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "register {login}");
}

async fn login(app: &Router, login: &str) -> String {
    let (status, json) = send(
        app,
        "POST",
        "/api/auth/login",
        None,
        Some(serde_json::json!({"login": login, "password": "hunter2hunter2"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login {login}");
    json["token"].as_str().expect("token in response").to_string()
}

async fn create_ad(app: &Router, token: &str) -> i64 {
    let (status, json) = send(
        app,
        "POST",
        "/api/ads",
        Some(token),
        Some(serde_json::json!({
            "price": 100,
            "name": "Bicycle",
            "description": "Lightly used",
            "city": "Riga",
            "category_id": 1,
            "ad_type_id": 1,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "create ad");
    json["id"].as_i64().expect("ad id")
}

async fn promote_to_admin(pool: &sqlx::PgPool, login: &str) {
    sqlx::query("UPDATE people SET role = 'Admin' WHERE login = $1")
        .bind(login)
        .execute(pool)
        .await
        .expect("promote to admin");
}

#[tokio::test]
async fn ownership_gate_and_admin_override() {
    let mut t = spawn_app(Arc::new(LogMailer)).await;

    register(&t.app, "alice").await;
    register(&t.app, "bob").await;
    let alice = login(&t.app, "alice").await;
    let bob = login(&t.app, "bob").await;

    let ad_id = create_ad(&t.app, &alice).await;
    let ad_uri = format!("/api/ads/{ad_id}");

    // A stranger with Normal role can neither update nor delete.
    let (status, _) = send(
        &t.app,
        "PUT",
        &ad_uri,
        Some(&bob),
        Some(serde_json::json!({"price": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&t.app, "DELETE", &ad_uri, Some(&bob), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // The ad is untouched and still publicly retrievable.
    let (status, json) = send(&t.app, "GET", &ad_uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["price"], 100);

    // Promoting bob does not change his outstanding token: the role claim
    // is fixed at issuance.
    promote_to_admin(&t.pool, "bob").await;
    let (status, _) = send(&t.app, "DELETE", &ad_uri, Some(&bob), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // After a fresh login the admin role is in the claims. Admins still may
    // not edit someone else's ad — the override covers deletion only.
    let bob = login(&t.app, "bob").await;
    let (status, _) = send(
        &t.app,
        "PUT",
        &ad_uri,
        Some(&bob),
        Some(serde_json::json!({"price": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&t.app, "DELETE", &ad_uri, Some(&bob), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&t.app, "GET", &ad_uri, None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    t.db.stop().await.expect("db stop");
}

#[tokio::test]
async fn owner_updates_pass_the_gate() {
    let mut t = spawn_app(Arc::new(LogMailer)).await;

    register(&t.app, "carol").await;
    let carol = login(&t.app, "carol").await;
    let ad_id = create_ad(&t.app, &carol).await;

    let (status, json) = send(
        &t.app,
        "PUT",
        &format!("/api/ads/{ad_id}"),
        Some(&carol),
        Some(serde_json::json!({"price": 250})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["price"], 250);
    // Absent fields keep their stored values.
    assert_eq!(json["name"], "Bicycle");

    t.db.stop().await.expect("db stop");
}

#[tokio::test]
async fn duplicate_favorite_is_rejected() {
    let mut t = spawn_app(Arc::new(LogMailer)).await;

    register(&t.app, "dave").await;
    let dave = login(&t.app, "dave").await;
    let ad_id = create_ad(&t.app, &dave).await;
    let fav_uri = format!("/api/favorites/{ad_id}");

    let (status, _) = send(&t.app, "POST", &fav_uri, Some(&dave), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&t.app, "POST", &fav_uri, Some(&dave), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM favorites")
        .fetch_one(&t.pool)
        .await
        .expect("count favorites");
    assert_eq!(count, 1);

    // The single-ad lookup reflects the favorite for its owner.
    let (status, json) = send(&t.app, "GET", &format!("/api/ads/{ad_id}"), Some(&dave), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["is_favorite"], true);

    let (status, _) = send(&t.app, "DELETE", &fav_uri, Some(&dave), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&t.app, "DELETE", &fav_uri, Some(&dave), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    t.db.stop().await.expect("db stop");
}

#[tokio::test]
async fn admin_routes_require_admin_role() {
    let mut t = spawn_app(Arc::new(LogMailer)).await;

    register(&t.app, "erin").await;
    let erin = login(&t.app, "erin").await;

    // No token: authentication required.
    let (status, _) = send(&t.app, "GET", "/api/people", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Normal role: forbidden, not unauthorized.
    let (status, _) = send(&t.app, "GET", "/api/people", Some(&erin), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    promote_to_admin(&t.pool, "erin").await;
    let erin = login(&t.app, "erin").await;
    let (status, json) = send(&t.app, "GET", "/api/people", Some(&erin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().map(|a| a.len()), Some(1));

    let (status, json) = send(&t.app, "GET", "/api/people/count", Some(&erin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, serde_json::json!(1));

    t.db.stop().await.expect("db stop");
}

#[tokio::test]
async fn registration_and_login_validation() {
    let mut t = spawn_app(Arc::new(LogMailer)).await;

    register(&t.app, "frank").await;

    // Duplicate login surfaces as a store-level conflict.
    let (status, _) = send(
        &t.app,
        "POST",
        "/api/auth/register",
        None,
        Some(serde_json::json!({
            "login": "frank",
            "password": "hunter2hunter2",
            "name": "Frank II",
            "city": "Riga",
            "email": "frank2@example.com",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Wrong password and unknown login both read as a bad request.
    let (status, _) = send(
        &t.app,
        "POST",
        "/api/auth/login",
        None,
        Some(serde_json::json!({"login": "frank", "password": "wrong-password"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &t.app,
        "POST",
        "/api/auth/login",
        None,
        Some(serde_json::json!({"login": "nobody", "password": "hunter2hunter2"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    t.db.stop().await.expect("db stop");
}

#[tokio::test]
async fn password_reset_flow() {
    let mailer = Arc::new(CapturingMailer::default());
    let mut t = spawn_app(mailer.clone()).await;

    register(&t.app, "grace").await;

    let (status, _) = send(
        &t.app,
        "POST",
        "/api/auth/recover",
        None,
        Some(serde_json::json!({"login": "grace"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Unknown logins get the same success-shaped response and no mail.
    let (status, _) = send(
        &t.app,
        "POST",
        "/api/auth/recover",
        None,
        Some(serde_json::json!({"login": "nobody"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let token = {
        let messages = mailer.messages.lock().expect("mailer lock");
        assert_eq!(messages.len(), 1);
        let (to, _, body) = &messages[0];
        assert_eq!(to, "grace@example.com");
        let marker = "token=";
        let start = body.find(marker).expect("token in mail body") + marker.len();
        body[start..start + 64].to_string()
    };

    let (status, _) = send(
        &t.app,
        "POST",
        "/api/auth/reset-password",
        None,
        Some(serde_json::json!({"token": token, "password": "a-new-password"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // The token is single-use.
    let (status, _) = send(
        &t.app,
        "POST",
        "/api/auth/reset-password",
        None,
        Some(serde_json::json!({"token": token, "password": "another-password"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Old password is gone; the new one logs in.
    let (status, _) = send(
        &t.app,
        "POST",
        "/api/auth/login",
        None,
        Some(serde_json::json!({"login": "grace", "password": "hunter2hunter2"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, json) = send(
        &t.app,
        "POST",
        "/api/auth/login",
        None,
        Some(serde_json::json!({"login": "grace", "password": "a-new-password"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["token"].is_string());

    t.db.stop().await.expect("db stop");
}
