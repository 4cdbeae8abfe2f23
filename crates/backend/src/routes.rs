use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{handlers, system};

/// All backend routes.
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // SYSTEM AUTH ROUTES (PUBLIC)
        // ========================================
        .route(
            "/api/system/auth/signin",
            post(system::handlers::auth::signin),
        )
        .route(
            "/api/system/auth/signup",
            post(system::handlers::auth::signup),
        )
        .route(
            "/api/system/auth/refresh",
            post(system::handlers::auth::refresh),
        )
        .route(
            "/api/system/auth/signout",
            post(system::handlers::auth::signout),
        )
        // System auth routes (protected)
        .route(
            "/api/system/auth/session",
            get(system::handlers::auth::session)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        // ========================================
        // TABLE API (PROTECTED)
        // ========================================
        .route(
            "/api/tables/:table",
            get(handlers::tables::list)
                .post(handlers::tables::insert)
                .patch(handlers::tables::update)
                .delete(handlers::tables::delete)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        .route(
            "/api/tables/:table/count",
            get(handlers::tables::count)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
}
