//! # adboards_api
//!
//! HTTP API library for AdBoards.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get, post, put};
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};

use adboards_core::files::PhotoStore;
use adboards_core::mail::Mailer;

use crate::config::ApiConfig;
use crate::handlers::{ads, auth, complaints, favorites, people};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool.
    pub pool: PgPool,
    /// API configuration.
    pub config: ApiConfig,
    /// Stored-photo collaborator.
    pub photos: PhotoStore,
    /// Outbound mail collaborator.
    pub mailer: Arc<dyn Mailer>,
}

/// Run embedded database migrations.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    adboards_core::migrate::migrate(pool).await
}

/// Builds the Axum router with all routes and shared state.
///
/// The auth middleware resolves claims for every request; each handler
/// declares its policy through the extractor it takes (anonymous routes
/// take none, authenticated routes take `CurrentPerson`, admin routes
/// `AdminPerson`).
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Anonymous
        .route("/api/auth/login", post(auth::login_handler))
        .route("/api/auth/register", post(auth::register_handler))
        .route("/api/auth/recover", post(auth::recover_handler))
        .route("/api/auth/reset-password", post(auth::reset_password_handler))
        .route(
            "/api/ads",
            get(ads::list_ads_handler).post(ads::create_ad_handler),
        )
        .route(
            "/api/ads/{id}",
            get(ads::get_ad_handler)
                .put(ads::update_ad_handler)
                .delete(ads::delete_ad_handler),
        )
        .route("/api/ads/{id}/photo", put(ads::update_ad_photo_handler))
        .route(
            "/api/ads/{id}/complaints",
            post(complaints::file_complaint_handler)
                .get(complaints::list_ad_complaints_handler),
        )
        // Authenticated
        .route(
            "/api/me",
            get(people::get_me_handler).put(people::update_me_handler),
        )
        .route("/api/me/photo", put(people::update_my_photo_handler))
        .route("/api/me/ads", get(ads::my_ads_handler))
        .route("/api/me/favorites", get(ads::favorite_ads_handler))
        .route(
            "/api/favorites/{ad_id}",
            get(favorites::is_favorite_handler)
                .post(favorites::add_favorite_handler)
                .delete(favorites::remove_favorite_handler),
        )
        // Admin
        .route("/api/people", get(people::list_people_handler))
        .route("/api/people/count", get(people::count_people_handler))
        .route("/api/people/{login}", delete(people::delete_person_handler))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::extract_claims,
        ))
        .layer(cors)
        .with_state(state)
}
