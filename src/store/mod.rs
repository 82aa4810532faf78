pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::blog::{ArticleUpdate, BlogArticle, CategoryCount, NewArticle, PageRequest};
use crate::models::inquiry::{Inquiry, NewInquiry};
use crate::models::project::{NewProject, Project, ProjectUpdate};
use crate::models::service::{NewService, Service, ServiceUpdate};
use crate::models::team::{NewTeamMember, TeamMember, TeamMemberUpdate};
use crate::models::testimonial::Testimonial;
use crate::models::user::{NewUser, User};

/// Persistence seam between handlers and the database.
/// Implementations: PgStore (PostgreSQL via sqlx), MemoryStore (tests, previews).
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Cheap round-trip used by `/readyz`.
    async fn ping(&self) -> anyhow::Result<()>;

    // -- Services --

    async fn active_services(&self) -> anyhow::Result<Vec<Service>>;
    /// Matches either localized slug among active services.
    async fn active_service_by_slug(&self, slug: &str) -> anyhow::Result<Option<Service>>;
    async fn all_services(&self) -> anyhow::Result<Vec<Service>>;
    async fn create_service(&self, svc: &NewService) -> anyhow::Result<Service>;
    async fn update_service(
        &self,
        id: Uuid,
        update: &ServiceUpdate,
    ) -> anyhow::Result<Option<Service>>;
    async fn delete_service(&self, id: Uuid) -> anyhow::Result<bool>;

    // -- Projects --

    async fn active_projects(&self) -> anyhow::Result<Vec<Project>>;
    async fn active_project(&self, id: Uuid) -> anyhow::Result<Option<Project>>;
    /// Every project, newest first.
    async fn all_projects(&self) -> anyhow::Result<Vec<Project>>;
    async fn create_project(&self, project: &NewProject) -> anyhow::Result<Project>;
    async fn update_project(
        &self,
        id: Uuid,
        update: &ProjectUpdate,
    ) -> anyhow::Result<Option<Project>>;
    async fn delete_project(&self, id: Uuid) -> anyhow::Result<bool>;

    // -- Team --

    async fn active_team_members(&self) -> anyhow::Result<Vec<TeamMember>>;
    async fn all_team_members(&self) -> anyhow::Result<Vec<TeamMember>>;
    async fn create_team_member(&self, member: &NewTeamMember) -> anyhow::Result<TeamMember>;
    async fn update_team_member(
        &self,
        id: Uuid,
        update: &TeamMemberUpdate,
    ) -> anyhow::Result<Option<TeamMember>>;
    async fn delete_team_member(&self, id: Uuid) -> anyhow::Result<bool>;

    // -- Testimonials --

    async fn active_testimonials(&self) -> anyhow::Result<Vec<Testimonial>>;

    // -- Blog --

    /// One page of published articles, newest first, plus the published total.
    async fn published_articles(
        &self,
        page: PageRequest,
    ) -> anyhow::Result<(Vec<BlogArticle>, i64)>;
    /// Finds a published article by either slug and bumps its view count.
    async fn record_article_view(&self, slug: &str) -> anyhow::Result<Option<BlogArticle>>;
    /// Dutch categories of published articles with counts, largest first.
    async fn blog_categories(&self) -> anyhow::Result<Vec<CategoryCount>>;
    /// Distinct non-empty tags of published articles in both languages, sorted.
    async fn blog_tags(&self) -> anyhow::Result<Vec<String>>;
    /// Published articles by view count, then publication date.
    async fn popular_articles(&self, limit: i64) -> anyhow::Result<Vec<BlogArticle>>;
    /// Drafts included, newest first.
    async fn all_articles(&self) -> anyhow::Result<Vec<BlogArticle>>;
    async fn article_by_id(&self, id: Uuid) -> anyhow::Result<Option<BlogArticle>>;
    async fn create_article(&self, article: &NewArticle) -> anyhow::Result<BlogArticle>;
    async fn update_article(
        &self,
        id: Uuid,
        update: &ArticleUpdate,
    ) -> anyhow::Result<Option<BlogArticle>>;
    async fn delete_article(&self, id: Uuid) -> anyhow::Result<bool>;

    // -- Contact inquiries --

    async fn insert_inquiry(&self, inquiry: &NewInquiry) -> anyhow::Result<Uuid>;
    async fn list_inquiries(&self) -> anyhow::Result<Vec<Inquiry>>;

    // -- Users --

    /// Case-insensitive lookup.
    async fn user_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
    async fn user_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>>;
    async fn create_user(&self, user: &NewUser) -> anyhow::Result<User>;
}
