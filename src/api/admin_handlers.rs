//! Back-office endpoints. Everything here sits behind `require_admin`.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::AdminUser;
use crate::errors::AppError;
use crate::models::blog::{ArticleUpdate, BlogArticle, NewArticle};
use crate::models::inquiry::Inquiry;
use crate::models::project::{NewProject, Project, ProjectUpdate};
use crate::models::service::{NewService, Service, ServiceUpdate};
use crate::models::team::{NewTeamMember, TeamMember, TeamMemberUpdate};
use crate::AppState;

/// `{data, success: true}` envelope used by the project and blog endpoints.
#[derive(Serialize)]
pub struct DataResponse<T> {
    pub data: T,
    pub success: bool,
}

impl<T> DataResponse<T> {
    fn ok(data: T) -> Json<Self> {
        Json(Self {
            data,
            success: true,
        })
    }
}

#[derive(Serialize)]
pub struct ArticleResponse {
    pub article: BlogArticle,
    pub success: bool,
}

/// A malformed id cannot name a row, so it reads as not found.
fn parse_id(id: &str, not_found: &'static str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id).map_err(|_| AppError::NotFound(not_found))
}

fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    body.map(|Json(b)| b)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

pub async fn list_services(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Service>>, AppError> {
    let services = state
        .store
        .all_services()
        .await
        .map_err(|e| AppError::storage("Failed to fetch services", e))?;
    Ok(Json(services))
}

pub async fn create_service(
    State(state): State<Arc<AppState>>,
    Extension(AdminUser(admin)): Extension<AdminUser>,
    body: Result<Json<NewService>, JsonRejection>,
) -> Result<(StatusCode, Json<Service>), AppError> {
    let new = json_body(body)?;
    new.validate().map_err(AppError::BadRequest)?;

    let svc = state
        .store
        .create_service(&new)
        .await
        .map_err(|e| AppError::storage("Failed to create service", e))?;

    tracing::info!(service_id = %svc.id, admin = %admin.email, "service created");
    Ok((StatusCode::CREATED, Json(svc)))
}

pub async fn update_service(
    State(state): State<Arc<AppState>>,
    Extension(AdminUser(admin)): Extension<AdminUser>,
    Path(id): Path<String>,
    body: Result<Json<ServiceUpdate>, JsonRejection>,
) -> Result<Json<Service>, AppError> {
    let id = parse_id(&id, "Service not found")?;
    let update = json_body(body)?;
    update.validate().map_err(AppError::BadRequest)?;

    let svc = state
        .store
        .update_service(id, &update)
        .await
        .map_err(|e| AppError::storage("Failed to update service", e))?
        .ok_or(AppError::NotFound("Service not found"))?;

    tracing::info!(service_id = %svc.id, admin = %admin.email, "service updated");
    Ok(Json(svc))
}

pub async fn delete_service(
    State(state): State<Arc<AppState>>,
    Extension(AdminUser(admin)): Extension<AdminUser>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let id = parse_id(&id, "Service not found")?;

    let deleted = state
        .store
        .delete_service(id)
        .await
        .map_err(|e| AppError::storage("Failed to delete service", e))?;
    if !deleted {
        return Err(AppError::NotFound("Service not found"));
    }

    tracing::info!(service_id = %id, admin = %admin.email, "service deleted");
    Ok(Json(json!({ "success": true })))
}

// ── Projects ─────────────────────────────────────────────────

pub async fn list_projects(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DataResponse<Vec<Project>>>, AppError> {
    let projects = state
        .store
        .all_projects()
        .await
        .map_err(|e| AppError::storage("Failed to fetch projects", e))?;
    Ok(DataResponse::ok(projects))
}

pub async fn create_project(
    State(state): State<Arc<AppState>>,
    Extension(AdminUser(admin)): Extension<AdminUser>,
    body: Result<Json<NewProject>, JsonRejection>,
) -> Result<(StatusCode, Json<DataResponse<Project>>), AppError> {
    let mut new = json_body(body)?;
    new.validate().map_err(AppError::BadRequest)?;
    new.normalize();

    let project = state
        .store
        .create_project(&new)
        .await
        .map_err(|e| AppError::storage("Failed to create project", e))?;

    tracing::info!(project_id = %project.id, admin = %admin.email, "project created");
    Ok((StatusCode::CREATED, DataResponse::ok(project)))
}

pub async fn update_project(
    State(state): State<Arc<AppState>>,
    Extension(AdminUser(admin)): Extension<AdminUser>,
    Path(id): Path<String>,
    body: Result<Json<ProjectUpdate>, JsonRejection>,
) -> Result<Json<DataResponse<Project>>, AppError> {
    let id = parse_id(&id, "Project not found")?;
    let mut update = json_body(body)?;
    update.validate().map_err(AppError::BadRequest)?;
    update.normalize();

    let project = state
        .store
        .update_project(id, &update)
        .await
        .map_err(|e| AppError::storage("Failed to update project", e))?
        .ok_or(AppError::NotFound("Project not found"))?;

    tracing::info!(project_id = %project.id, admin = %admin.email, "project updated");
    Ok(DataResponse::ok(project))
}

pub async fn delete_project(
    State(state): State<Arc<AppState>>,
    Extension(AdminUser(admin)): Extension<AdminUser>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let id = parse_id(&id, "Project not found")?;

    let deleted = state
        .store
        .delete_project(id)
        .await
        .map_err(|e| AppError::storage("Failed to delete project", e))?;
    if !deleted {
        return Err(AppError::NotFound("Project not found"));
    }

    tracing::info!(project_id = %id, admin = %admin.email, "project deleted");
    Ok(Json(json!({ "success": true })))
}

// ── Team ─────────────────────────────────────────────────────

pub async fn list_team_members(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TeamMember>>, AppError> {
    let members = state
        .store
        .all_team_members()
        .await
        .map_err(|e| AppError::storage("Failed to fetch team members", e))?;
    Ok(Json(members))
}

pub async fn create_team_member(
    State(state): State<Arc<AppState>>,
    Extension(AdminUser(admin)): Extension<AdminUser>,
    body: Result<Json<NewTeamMember>, JsonRejection>,
) -> Result<(StatusCode, Json<TeamMember>), AppError> {
    let new = json_body(body)?;
    new.validate().map_err(AppError::BadRequest)?;

    let member = state
        .store
        .create_team_member(&new)
        .await
        .map_err(|e| AppError::storage("Failed to create team member", e))?;

    tracing::info!(member_id = %member.id, admin = %admin.email, "team member created");
    Ok((StatusCode::CREATED, Json(member)))
}

pub async fn update_team_member(
    State(state): State<Arc<AppState>>,
    Extension(AdminUser(admin)): Extension<AdminUser>,
    Path(id): Path<String>,
    body: Result<Json<TeamMemberUpdate>, JsonRejection>,
) -> Result<Json<TeamMember>, AppError> {
    let id = parse_id(&id, "Team member not found")?;
    let update = json_body(body)?;
    update.validate().map_err(AppError::BadRequest)?;

    let member = state
        .store
        .update_team_member(id, &update)
        .await
        .map_err(|e| AppError::storage("Failed to update team member", e))?
        .ok_or(AppError::NotFound("Team member not found"))?;

    tracing::info!(member_id = %member.id, admin = %admin.email, "team member updated");
    Ok(Json(member))
}

pub async fn delete_team_member(
    State(state): State<Arc<AppState>>,
    Extension(AdminUser(admin)): Extension<AdminUser>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let id = parse_id(&id, "Team member not found")?;

    let deleted = state
        .store
        .delete_team_member(id)
        .await
        .map_err(|e| AppError::storage("Failed to delete team member", e))?;
    if !deleted {
        return Err(AppError::NotFound("Team member not found"));
    }

    tracing::info!(member_id = %id, admin = %admin.email, "team member deleted");
    Ok(Json(json!({ "success": true })))
}

// ── Blog ─────────────────────────────────────────────────────

pub async fn list_articles(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DataResponse<Vec<BlogArticle>>>, AppError> {
    let articles = state
        .store
        .all_articles()
        .await
        .map_err(|e| AppError::storage("Failed to fetch blog articles", e))?;
    Ok(DataResponse::ok(articles))
}

pub async fn get_article(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ArticleResponse>, AppError> {
    let id = parse_id(&id, "Article not found")?;

    let article = state
        .store
        .article_by_id(id)
        .await
        .map_err(|e| AppError::storage("Failed to fetch blog article", e))?
        .ok_or(AppError::NotFound("Article not found"))?;

    Ok(Json(ArticleResponse {
        article,
        success: true,
    }))
}

pub async fn create_article(
    State(state): State<Arc<AppState>>,
    Extension(AdminUser(admin)): Extension<AdminUser>,
    body: Result<Json<NewArticle>, JsonRejection>,
) -> Result<(StatusCode, Json<DataResponse<BlogArticle>>), AppError> {
    let new = json_body(body)?;
    new.validate().map_err(AppError::BadRequest)?;

    let article = state
        .store
        .create_article(&new)
        .await
        .map_err(|e| AppError::storage("Failed to create blog article", e))?;

    tracing::info!(article_id = %article.id, admin = %admin.email, "blog article created");
    Ok((StatusCode::CREATED, DataResponse::ok(article)))
}

pub async fn update_article(
    State(state): State<Arc<AppState>>,
    Extension(AdminUser(admin)): Extension<AdminUser>,
    Path(id): Path<String>,
    body: Result<Json<ArticleUpdate>, JsonRejection>,
) -> Result<Json<DataResponse<BlogArticle>>, AppError> {
    let id = parse_id(&id, "Article not found")?;
    let update = json_body(body)?;
    update.validate().map_err(AppError::BadRequest)?;

    let article = state
        .store
        .update_article(id, &update)
        .await
        .map_err(|e| AppError::storage("Failed to update blog article", e))?
        .ok_or(AppError::NotFound("Article not found"))?;

    tracing::info!(article_id = %article.id, admin = %admin.email, "blog article updated");
    Ok(DataResponse::ok(article))
}

pub async fn delete_article(
    State(state): State<Arc<AppState>>,
    Extension(AdminUser(admin)): Extension<AdminUser>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let id = parse_id(&id, "Article not found")?;

    let deleted = state
        .store
        .delete_article(id)
        .await
        .map_err(|e| AppError::storage("Failed to delete blog article", e))?;
    if !deleted {
        return Err(AppError::NotFound("Article not found"));
    }

    tracing::info!(article_id = %id, admin = %admin.email, "blog article deleted");
    Ok(Json(json!({ "success": true, "message": "Deleted successfully" })))
}

// ── Inquiries ────────────────────────────────────────────────

pub async fn list_inquiries(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    let inquiries: Vec<Inquiry> = state
        .store
        .list_inquiries()
        .await
        .map_err(|e| AppError::storage("Failed to fetch inquiries", e))?;
    Ok(Json(json!({ "data": inquiries, "success": true })))
}
