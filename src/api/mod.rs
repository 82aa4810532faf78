use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use crate::auth::require_admin;
use crate::csrf::csrf_protection;
use crate::errors::AppError;
use crate::AppState;

pub mod admin_handlers;
pub mod auth_handlers;
pub mod handlers;

/// Build the JSON API router.
/// All routes are relative; the caller mounts this under `/api`.
pub fn api_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    let admin = Router::new()
        .route(
            "/services",
            get(admin_handlers::list_services).post(admin_handlers::create_service),
        )
        .route(
            "/services/:id",
            put(admin_handlers::update_service).delete(admin_handlers::delete_service),
        )
        .route(
            "/projects",
            get(admin_handlers::list_projects).post(admin_handlers::create_project),
        )
        .route(
            "/projects/:id",
            put(admin_handlers::update_project).delete(admin_handlers::delete_project),
        )
        .route(
            "/team",
            get(admin_handlers::list_team_members).post(admin_handlers::create_team_member),
        )
        .route(
            "/team/:id",
            put(admin_handlers::update_team_member).delete(admin_handlers::delete_team_member),
        )
        .route(
            "/blog",
            get(admin_handlers::list_articles).post(admin_handlers::create_article),
        )
        .route(
            "/blog/:id",
            get(admin_handlers::get_article)
                .put(admin_handlers::update_article)
                .delete(admin_handlers::delete_article),
        )
        .route("/inquiries", get(admin_handlers::list_inquiries))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    Router::new()
        .route("/csrf-token", get(handlers::csrf_token))
        .route("/services", get(handlers::list_services))
        .route("/services/:slug", get(handlers::get_service))
        .route("/projects", get(handlers::list_projects))
        .route("/projects/:id", get(handlers::get_project))
        .route("/team-members", get(handlers::list_team_members))
        .route("/testimonials", get(handlers::list_testimonials))
        .route("/blog", get(handlers::list_articles))
        .route("/blog/categories", get(handlers::blog_categories))
        .route("/blog/tags", get(handlers::blog_tags))
        .route("/blog/popular", get(handlers::popular_articles))
        .route("/blog/:slug", get(handlers::get_article))
        .route("/contact", post(handlers::submit_contact))
        .route(
            "/maatschappelijke-statistics",
            get(handlers::maatschappelijke_statistics),
        )
        .route("/auth/login", post(auth_handlers::login))
        .route("/auth/logout", post(auth_handlers::logout))
        .route("/auth/session", get(auth_handlers::session))
        .nest("/admin", admin)
        // CSRF runs before the admin guard on mutating admin routes.
        .route_layer(middleware::from_fn_with_state(state, csrf_protection))
        .fallback(fallback_404)
}

async fn fallback_404() -> AppError {
    AppError::NotFound("Not found")
}
