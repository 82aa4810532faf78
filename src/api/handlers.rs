//! Public JSON endpoints.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Path, Query, State},
    http::{header, HeaderMap, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::errors::AppError;
use crate::middleware::rate_limit::{client_identifier, RateLimitRule};
use crate::models::blog::{
    BlogArticle, BlogQuery, CategoryCount, PageRequest, Pagination, PopularQuery,
};
use crate::models::inquiry::{ContactRequest, NewInquiry};
use crate::models::project::Project;
use crate::models::service::Service;
use crate::models::team::TeamMember;
use crate::models::testimonial::Testimonial;
use crate::AppState;

const BLOG_CACHE_CONTROL: &str = "public, s-maxage=120, stale-while-revalidate=240";

// ── Response DTOs ────────────────────────────────────────────

#[derive(Serialize)]
pub struct CsrfTokenResponse {
    pub token: String,
}

#[derive(Serialize)]
pub struct BlogListResponse {
    pub data: Vec<BlogArticle>,
    pub success: bool,
    pub pagination: Pagination,
}

#[derive(Serialize)]
pub struct BlogArticleResponse {
    pub article: BlogArticle,
    pub success: bool,
}

#[derive(Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<CategoryCount>,
    pub success: bool,
}

#[derive(Serialize)]
pub struct TagsResponse {
    pub tags: Vec<String>,
    pub success: bool,
}

#[derive(Serialize)]
pub struct PopularResponse {
    pub articles: Vec<BlogArticle>,
    pub success: bool,
}

// ── CSRF ─────────────────────────────────────────────────────

pub async fn csrf_token(State(state): State<Arc<AppState>>) -> Json<CsrfTokenResponse> {
    Json(CsrfTokenResponse {
        token: state.csrf.issue(),
    })
}

// ── Services ─────────────────────────────────────────────────

pub async fn list_services(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Service>>, AppError> {
    let services = state
        .store
        .active_services()
        .await
        .map_err(|e| AppError::storage("Failed to fetch services", e))?;
    Ok(Json(services))
}

pub async fn get_service(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<Service>, AppError> {
    state
        .store
        .active_service_by_slug(&slug)
        .await
        .map_err(|e| AppError::storage("Failed to fetch service", e))?
        .map(Json)
        .ok_or(AppError::NotFound("Service not found"))
}

// ── Projects & team ──────────────────────────────────────────

pub async fn list_projects(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Project>>, AppError> {
    let projects = state
        .store
        .active_projects()
        .await
        .map_err(|e| AppError::storage("Failed to fetch projects", e))?;
    Ok(Json(projects))
}

pub async fn get_project(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Project>, AppError> {
    // A malformed id cannot name a project.
    let Ok(id) = Uuid::parse_str(&id) else {
        return Err(AppError::NotFound("Project not found"));
    };

    state
        .store
        .active_project(id)
        .await
        .map_err(|e| AppError::storage("Failed to fetch project", e))?
        .map(Json)
        .ok_or(AppError::NotFound("Project not found"))
}

pub async fn list_team_members(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TeamMember>>, AppError> {
    let members = state
        .store
        .active_team_members()
        .await
        .map_err(|e| AppError::storage("Failed to fetch team members", e))?;
    Ok(Json(
        members.into_iter().map(TeamMember::into_public).collect(),
    ))
}

// ── Blog ─────────────────────────────────────────────────────

pub async fn list_articles(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    query: Result<Query<BlogQuery>, QueryRejection>,
) -> Result<Response, AppError> {
    state
        .limiter
        .enforce(&client_identifier(&headers), RateLimitRule::BLOG_READ)?;

    // Each paging field falls back to its own default.
    let page = PageRequest::from(query.map(|Query(q)| q).unwrap_or_default());

    let (data, total) = state
        .store
        .published_articles(page)
        .await
        .map_err(|e| AppError::storage("Failed to fetch blog articles", e))?;

    let mut resp = Json(BlogListResponse {
        data,
        success: true,
        pagination: Pagination::new(page, total),
    })
    .into_response();
    resp.headers_mut().insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static(BLOG_CACHE_CONTROL),
    );
    Ok(resp)
}

pub async fn get_article(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(slug): Path<String>,
) -> Result<Json<BlogArticleResponse>, AppError> {
    state
        .limiter
        .enforce(&client_identifier(&headers), RateLimitRule::BLOG_READ)?;

    let article = state
        .store
        .record_article_view(&slug)
        .await
        .map_err(|e| AppError::storage("Failed to fetch blog article", e))?
        .ok_or(AppError::NotFound("Article not found"))?;

    Ok(Json(BlogArticleResponse {
        article,
        success: true,
    }))
}

pub async fn blog_categories(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<CategoriesResponse>, AppError> {
    state
        .limiter
        .enforce(&client_identifier(&headers), RateLimitRule::BLOG_READ)?;

    let categories = state
        .store
        .blog_categories()
        .await
        .map_err(|e| AppError::storage("Failed to fetch categories", e))?;
    Ok(Json(CategoriesResponse {
        categories,
        success: true,
    }))
}

pub async fn blog_tags(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<TagsResponse>, AppError> {
    state
        .limiter
        .enforce(&client_identifier(&headers), RateLimitRule::BLOG_READ)?;

    let tags = state
        .store
        .blog_tags()
        .await
        .map_err(|e| AppError::storage("Failed to fetch tags", e))?;
    Ok(Json(TagsResponse {
        tags,
        success: true,
    }))
}

pub async fn popular_articles(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    query: Result<Query<PopularQuery>, QueryRejection>,
) -> Result<Json<PopularResponse>, AppError> {
    state
        .limiter
        .enforce(&client_identifier(&headers), RateLimitRule::BLOG_READ)?;

    let limit = query.map(|Query(q)| q).unwrap_or_default().limit();
    let articles = state
        .store
        .popular_articles(limit)
        .await
        .map_err(|e| AppError::storage("Failed to fetch popular articles", e))?;
    Ok(Json(PopularResponse {
        articles,
        success: true,
    }))
}

// ── Testimonials ─────────────────────────────────────────────

pub async fn list_testimonials(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Testimonial>>, AppError> {
    let testimonials = state
        .store
        .active_testimonials()
        .await
        .map_err(|e| AppError::storage("Failed to fetch testimonials", e))?;
    Ok(Json(testimonials))
}

// ── Contact ──────────────────────────────────────────────────

pub async fn submit_contact(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Result<Json<ContactRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    state
        .limiter
        .enforce(&client_identifier(&headers), RateLimitRule::CONTACT)?;

    let Ok(Json(body)) = body else {
        return Err(AppError::BadRequest("Missing required fields".into()));
    };

    let inquiry = NewInquiry::try_from(body).map_err(|msg| AppError::BadRequest(msg.into()))?;

    let id = state
        .store
        .insert_inquiry(&inquiry)
        .await
        .map_err(|e| AppError::storage("Failed to submit contact form", e))?;

    tracing::info!(inquiry_id = %id, "contact inquiry received");

    Ok(Json(json!({
        "success": true,
        "message": "Thank you for your message! We will contact you soon.",
        "data": { "id": id },
    })))
}

// ── Statistics ───────────────────────────────────────────────

/// Placeholder for the social-impact statistics feed.
pub async fn maatschappelijke_statistics() -> Result<Json<Value>, AppError> {
    Err(AppError::NotImplemented)
}
