use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use super::ContentStore;
use crate::models::blog::{ArticleUpdate, BlogArticle, CategoryCount, NewArticle, PageRequest};
use crate::models::inquiry::{Inquiry, NewInquiry};
use crate::models::project::{NewProject, Project, ProjectUpdate};
use crate::models::service::{NewService, Service, ServiceUpdate};
use crate::models::team::{NewTeamMember, TeamMember, TeamMemberUpdate};
use crate::models::testimonial::Testimonial;
use crate::models::user::{NewUser, User};

const SERVICE_COLUMNS: &str = "id, title_nl, title_en, description_nl, description_en, icon, image, slug_nl, slug_en, sort_order, is_active, created_at, updated_at";

const PROJECT_COLUMNS: &str = "id, title_nl, title_en, description_nl, description_en, category_nl, category_en, location, year, image, gallery, featured_image, status, is_active, created_at, updated_at";

const TEAM_COLUMNS: &str = "id, name_nl, name_en, title_nl, title_en, bio_nl, bio_en, email, phone, linkedin_url, image, department, specialties, experience_years, show_in_homepage, show_contact_info, show_bio, sort_order, is_active, is_featured, created_at, updated_at";

const ARTICLE_COLUMNS: &str = "id, title_nl, title_en, excerpt_nl, excerpt_en, content_nl, content_en, category_nl, category_en, meta_description_nl, meta_description_en, image, image_alt, slug_nl, slug_en, tags_nl, tags_en, is_featured, is_published, published_at, reading_time, view_count, created_at, updated_at";

const TESTIMONIAL_COLUMNS: &str = "id, customer_name, customer_title, customer_image, testimonial_nl, testimonial_en, rating, project_type, location, featured, sort_order, is_active, created_at, updated_at";

const INQUIRY_COLUMNS: &str = "id, first_name, last_name, email, phone, company, project_type, message, status, created_at, updated_at";

const USER_COLUMNS: &str =
    "id, email, password_hash, first_name, last_name, role, is_active, created_at, updated_at";

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }

    /// Run pending migrations from the migrations/ directory.
    pub async fn migrate(&self) -> anyhow::Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl ContentStore for PgStore {
    async fn ping(&self) -> anyhow::Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    // -- Services --

    async fn active_services(&self) -> anyhow::Result<Vec<Service>> {
        let rows = sqlx::query_as::<_, Service>(&format!(
            "SELECT {SERVICE_COLUMNS} FROM services WHERE is_active = true ORDER BY sort_order ASC, created_at ASC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn active_service_by_slug(&self, slug: &str) -> anyhow::Result<Option<Service>> {
        let row = sqlx::query_as::<_, Service>(&format!(
            "SELECT {SERVICE_COLUMNS} FROM services WHERE is_active = true AND (slug_nl = $1 OR slug_en = $1) LIMIT 1"
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn all_services(&self) -> anyhow::Result<Vec<Service>> {
        let rows = sqlx::query_as::<_, Service>(&format!(
            "SELECT {SERVICE_COLUMNS} FROM services ORDER BY sort_order ASC, created_at ASC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn create_service(&self, svc: &NewService) -> anyhow::Result<Service> {
        let row = sqlx::query_as::<_, Service>(&format!(
            r#"INSERT INTO services (title_nl, title_en, description_nl, description_en, icon, image, slug_nl, slug_en, sort_order, is_active)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
               RETURNING {SERVICE_COLUMNS}"#
        ))
        .bind(&svc.title_nl)
        .bind(&svc.title_en)
        .bind(&svc.description_nl)
        .bind(&svc.description_en)
        .bind(&svc.icon)
        .bind(&svc.image)
        .bind(&svc.slug_nl)
        .bind(&svc.slug_en)
        .bind(svc.sort_order)
        .bind(svc.is_active)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update_service(
        &self,
        id: Uuid,
        update: &ServiceUpdate,
    ) -> anyhow::Result<Option<Service>> {
        let row = sqlx::query_as::<_, Service>(&format!(
            r#"UPDATE services SET
                   title_nl = COALESCE($2, title_nl),
                   title_en = COALESCE($3, title_en),
                   description_nl = COALESCE($4, description_nl),
                   description_en = COALESCE($5, description_en),
                   icon = COALESCE($6, icon),
                   image = COALESCE($7, image),
                   slug_nl = COALESCE($8, slug_nl),
                   slug_en = COALESCE($9, slug_en),
                   sort_order = COALESCE($10, sort_order),
                   is_active = COALESCE($11, is_active),
                   updated_at = NOW()
               WHERE id = $1
               RETURNING {SERVICE_COLUMNS}"#
        ))
        .bind(id)
        .bind(&update.title_nl)
        .bind(&update.title_en)
        .bind(&update.description_nl)
        .bind(&update.description_en)
        .bind(&update.icon)
        .bind(&update.image)
        .bind(&update.slug_nl)
        .bind(&update.slug_en)
        .bind(update.sort_order)
        .bind(update.is_active)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn delete_service(&self, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM services WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -- Projects --

    async fn active_projects(&self) -> anyhow::Result<Vec<Project>> {
        let rows = sqlx::query_as::<_, Project>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE is_active = true ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn active_project(&self, id: Uuid) -> anyhow::Result<Option<Project>> {
        let row = sqlx::query_as::<_, Project>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1 AND is_active = true"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn all_projects(&self) -> anyhow::Result<Vec<Project>> {
        let rows = sqlx::query_as::<_, Project>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn create_project(&self, project: &NewProject) -> anyhow::Result<Project> {
        let row = sqlx::query_as::<_, Project>(&format!(
            r#"INSERT INTO projects (title_nl, title_en, description_nl, description_en, category_nl, category_en, location, year, image, gallery, featured_image, status, is_active)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
               RETURNING {PROJECT_COLUMNS}"#
        ))
        .bind(&project.title_nl)
        .bind(&project.title_en)
        .bind(&project.description_nl)
        .bind(&project.description_en)
        .bind(&project.category_nl)
        .bind(&project.category_en)
        .bind(&project.location)
        .bind(&project.year)
        .bind(&project.image)
        .bind(&project.gallery)
        .bind(&project.featured_image)
        .bind(&project.status)
        .bind(project.is_active)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update_project(
        &self,
        id: Uuid,
        update: &ProjectUpdate,
    ) -> anyhow::Result<Option<Project>> {
        let row = sqlx::query_as::<_, Project>(&format!(
            r#"UPDATE projects SET
                   title_nl = COALESCE($2, title_nl),
                   title_en = COALESCE($3, title_en),
                   description_nl = COALESCE($4, description_nl),
                   description_en = COALESCE($5, description_en),
                   category_nl = COALESCE($6, category_nl),
                   category_en = COALESCE($7, category_en),
                   location = COALESCE($8, location),
                   year = COALESCE($9, year),
                   image = COALESCE($10, image),
                   gallery = COALESCE($11, gallery),
                   featured_image = COALESCE($12, featured_image),
                   status = COALESCE($13, status),
                   is_active = COALESCE($14, is_active),
                   updated_at = NOW()
               WHERE id = $1
               RETURNING {PROJECT_COLUMNS}"#
        ))
        .bind(id)
        .bind(&update.title_nl)
        .bind(&update.title_en)
        .bind(&update.description_nl)
        .bind(&update.description_en)
        .bind(&update.category_nl)
        .bind(&update.category_en)
        .bind(&update.location)
        .bind(&update.year)
        .bind(&update.image)
        .bind(&update.gallery)
        .bind(&update.featured_image)
        .bind(&update.status)
        .bind(update.is_active)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn delete_project(&self, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -- Team --

    async fn active_team_members(&self) -> anyhow::Result<Vec<TeamMember>> {
        let rows = sqlx::query_as::<_, TeamMember>(&format!(
            "SELECT {TEAM_COLUMNS} FROM team_members WHERE is_active = true ORDER BY sort_order ASC, created_at ASC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn all_team_members(&self) -> anyhow::Result<Vec<TeamMember>> {
        let rows = sqlx::query_as::<_, TeamMember>(&format!(
            "SELECT {TEAM_COLUMNS} FROM team_members ORDER BY sort_order ASC, created_at ASC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn create_team_member(&self, member: &NewTeamMember) -> anyhow::Result<TeamMember> {
        let row = sqlx::query_as::<_, TeamMember>(&format!(
            r#"INSERT INTO team_members (name_nl, name_en, title_nl, title_en, bio_nl, bio_en, email, phone, linkedin_url, image, department, specialties, experience_years, show_in_homepage, show_contact_info, show_bio, sort_order, is_active, is_featured)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19)
               RETURNING {TEAM_COLUMNS}"#
        ))
        .bind(&member.name_nl)
        .bind(&member.name_en)
        .bind(&member.title_nl)
        .bind(&member.title_en)
        .bind(&member.bio_nl)
        .bind(&member.bio_en)
        .bind(&member.email)
        .bind(&member.phone)
        .bind(&member.linkedin_url)
        .bind(&member.image)
        .bind(&member.department)
        .bind(&member.specialties)
        .bind(member.experience_years)
        .bind(member.show_in_homepage)
        .bind(member.show_contact_info)
        .bind(member.show_bio)
        .bind(member.sort_order)
        .bind(member.is_active)
        .bind(member.is_featured)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update_team_member(
        &self,
        id: Uuid,
        update: &TeamMemberUpdate,
    ) -> anyhow::Result<Option<TeamMember>> {
        let row = sqlx::query_as::<_, TeamMember>(&format!(
            r#"UPDATE team_members SET
                   name_nl = COALESCE($2, name_nl),
                   name_en = COALESCE($3, name_en),
                   title_nl = COALESCE($4, title_nl),
                   title_en = COALESCE($5, title_en),
                   bio_nl = COALESCE($6, bio_nl),
                   bio_en = COALESCE($7, bio_en),
                   email = COALESCE($8, email),
                   phone = COALESCE($9, phone),
                   linkedin_url = COALESCE($10, linkedin_url),
                   image = COALESCE($11, image),
                   department = COALESCE($12, department),
                   specialties = COALESCE($13, specialties),
                   experience_years = COALESCE($14, experience_years),
                   show_in_homepage = COALESCE($15, show_in_homepage),
                   show_contact_info = COALESCE($16, show_contact_info),
                   show_bio = COALESCE($17, show_bio),
                   sort_order = COALESCE($18, sort_order),
                   is_active = COALESCE($19, is_active),
                   is_featured = COALESCE($20, is_featured),
                   updated_at = NOW()
               WHERE id = $1
               RETURNING {TEAM_COLUMNS}"#
        ))
        .bind(id)
        .bind(&update.name_nl)
        .bind(&update.name_en)
        .bind(&update.title_nl)
        .bind(&update.title_en)
        .bind(&update.bio_nl)
        .bind(&update.bio_en)
        .bind(&update.email)
        .bind(&update.phone)
        .bind(&update.linkedin_url)
        .bind(&update.image)
        .bind(&update.department)
        .bind(&update.specialties)
        .bind(update.experience_years)
        .bind(update.show_in_homepage)
        .bind(update.show_contact_info)
        .bind(update.show_bio)
        .bind(update.sort_order)
        .bind(update.is_active)
        .bind(update.is_featured)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn delete_team_member(&self, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM team_members WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -- Testimonials --

    async fn active_testimonials(&self) -> anyhow::Result<Vec<Testimonial>> {
        let rows = sqlx::query_as::<_, Testimonial>(&format!(
            "SELECT {TESTIMONIAL_COLUMNS} FROM testimonials WHERE is_active = true ORDER BY sort_order ASC, created_at ASC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    // -- Blog --

    async fn published_articles(
        &self,
        page: PageRequest,
    ) -> anyhow::Result<(Vec<BlogArticle>, i64)> {
        let rows = sqlx::query_as::<_, BlogArticle>(&format!(
            "SELECT {ARTICLE_COLUMNS} FROM blog_articles WHERE is_published = true ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        ))
        .bind(page.limit)
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*)::bigint FROM blog_articles WHERE is_published = true",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok((rows, total))
    }

    async fn record_article_view(&self, slug: &str) -> anyhow::Result<Option<BlogArticle>> {
        let row = sqlx::query_as::<_, BlogArticle>(&format!(
            r#"UPDATE blog_articles SET view_count = view_count + 1
               WHERE id = (
                   SELECT id FROM blog_articles
                   WHERE is_published = true AND (slug_nl = $1 OR slug_en = $1)
                   LIMIT 1
               )
               RETURNING {ARTICLE_COLUMNS}"#
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn blog_categories(&self) -> anyhow::Result<Vec<CategoryCount>> {
        let rows = sqlx::query_as::<_, CategoryCount>(
            r#"SELECT category_nl AS category, COUNT(*)::bigint AS count
               FROM blog_articles
               WHERE is_published = true AND category_nl IS NOT NULL AND category_nl <> ''
               GROUP BY category_nl
               ORDER BY count DESC, category_nl ASC"#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn blog_tags(&self) -> anyhow::Result<Vec<String>> {
        let rows = sqlx::query_scalar::<_, String>(
            r#"SELECT DISTINCT tag
               FROM blog_articles, unnest(tags_nl || tags_en) AS tag
               WHERE is_published = true AND tag <> ''
               ORDER BY tag COLLATE "C""#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn popular_articles(&self, limit: i64) -> anyhow::Result<Vec<BlogArticle>> {
        let rows = sqlx::query_as::<_, BlogArticle>(&format!(
            "SELECT {ARTICLE_COLUMNS} FROM blog_articles WHERE is_published = true ORDER BY view_count DESC, published_at DESC NULLS LAST LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn all_articles(&self) -> anyhow::Result<Vec<BlogArticle>> {
        let rows = sqlx::query_as::<_, BlogArticle>(&format!(
            "SELECT {ARTICLE_COLUMNS} FROM blog_articles ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn article_by_id(&self, id: Uuid) -> anyhow::Result<Option<BlogArticle>> {
        let row = sqlx::query_as::<_, BlogArticle>(&format!(
            "SELECT {ARTICLE_COLUMNS} FROM blog_articles WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn create_article(&self, article: &NewArticle) -> anyhow::Result<BlogArticle> {
        let row = sqlx::query_as::<_, BlogArticle>(&format!(
            r#"INSERT INTO blog_articles (title_nl, title_en, excerpt_nl, excerpt_en, content_nl, content_en, category_nl, category_en, meta_description_nl, meta_description_en, image, image_alt, slug_nl, slug_en, tags_nl, tags_en, is_featured, is_published, published_at, reading_time)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19, $20)
               RETURNING {ARTICLE_COLUMNS}"#
        ))
        .bind(&article.title_nl)
        .bind(&article.title_en)
        .bind(&article.excerpt_nl)
        .bind(&article.excerpt_en)
        .bind(&article.content_nl)
        .bind(&article.content_en)
        .bind(&article.category_nl)
        .bind(&article.category_en)
        .bind(&article.meta_description_nl)
        .bind(&article.meta_description_en)
        .bind(&article.image)
        .bind(&article.image_alt)
        .bind(&article.slug_nl)
        .bind(&article.slug_en)
        .bind(&article.tags_nl)
        .bind(&article.tags_en)
        .bind(article.is_featured)
        .bind(article.is_published)
        .bind(article.published_at)
        .bind(article.reading_time)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update_article(
        &self,
        id: Uuid,
        update: &ArticleUpdate,
    ) -> anyhow::Result<Option<BlogArticle>> {
        let row = sqlx::query_as::<_, BlogArticle>(&format!(
            r#"UPDATE blog_articles SET
                   title_nl = COALESCE($2, title_nl),
                   title_en = COALESCE($3, title_en),
                   excerpt_nl = COALESCE($4, excerpt_nl),
                   excerpt_en = COALESCE($5, excerpt_en),
                   content_nl = COALESCE($6, content_nl),
                   content_en = COALESCE($7, content_en),
                   category_nl = COALESCE($8, category_nl),
                   category_en = COALESCE($9, category_en),
                   meta_description_nl = COALESCE($10, meta_description_nl),
                   meta_description_en = COALESCE($11, meta_description_en),
                   image = COALESCE($12, image),
                   image_alt = COALESCE($13, image_alt),
                   slug_nl = COALESCE($14, slug_nl),
                   slug_en = COALESCE($15, slug_en),
                   tags_nl = COALESCE($16, tags_nl),
                   tags_en = COALESCE($17, tags_en),
                   is_featured = COALESCE($18, is_featured),
                   is_published = COALESCE($19, is_published),
                   published_at = COALESCE($20, published_at),
                   reading_time = COALESCE($21, reading_time),
                   updated_at = NOW()
               WHERE id = $1
               RETURNING {ARTICLE_COLUMNS}"#
        ))
        .bind(id)
        .bind(&update.title_nl)
        .bind(&update.title_en)
        .bind(&update.excerpt_nl)
        .bind(&update.excerpt_en)
        .bind(&update.content_nl)
        .bind(&update.content_en)
        .bind(&update.category_nl)
        .bind(&update.category_en)
        .bind(&update.meta_description_nl)
        .bind(&update.meta_description_en)
        .bind(&update.image)
        .bind(&update.image_alt)
        .bind(&update.slug_nl)
        .bind(&update.slug_en)
        .bind(&update.tags_nl)
        .bind(&update.tags_en)
        .bind(update.is_featured)
        .bind(update.is_published)
        .bind(update.published_at)
        .bind(update.reading_time)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn delete_article(&self, id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM blog_articles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -- Contact inquiries --

    async fn insert_inquiry(&self, inquiry: &NewInquiry) -> anyhow::Result<Uuid> {
        let id = sqlx::query_scalar::<_, Uuid>(
            r#"INSERT INTO contact_inquiries (first_name, last_name, email, phone, company, project_type, message)
               VALUES ($1, $2, $3, $4, $5, $6, $7)
               RETURNING id"#,
        )
        .bind(&inquiry.first_name)
        .bind(&inquiry.last_name)
        .bind(&inquiry.email)
        .bind(&inquiry.phone)
        .bind(&inquiry.company)
        .bind(&inquiry.project_type)
        .bind(&inquiry.message)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn list_inquiries(&self) -> anyhow::Result<Vec<Inquiry>> {
        let rows = sqlx::query_as::<_, Inquiry>(&format!(
            "SELECT {INQUIRY_COLUMNS} FROM contact_inquiries ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    // -- Users --

    async fn user_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let row = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE lower(email) = lower($1) LIMIT 1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn user_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let row = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn create_user(&self, user: &NewUser) -> anyhow::Result<User> {
        let row = sqlx::query_as::<_, User>(&format!(
            r#"INSERT INTO users (email, password_hash, first_name, last_name, role)
               VALUES (lower($1), $2, $3, $4, $5)
               RETURNING {USER_COLUMNS}"#
        ))
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.role)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }
}
