//! In-memory `ContentStore` for tests and local previews without PostgreSQL.

use std::cmp::Reverse;
use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::ContentStore;
use crate::models::blog::{ArticleUpdate, BlogArticle, CategoryCount, NewArticle, PageRequest};
use crate::models::inquiry::{Inquiry, NewInquiry};
use crate::models::project::{NewProject, Project, ProjectUpdate};
use crate::models::service::{NewService, Service, ServiceUpdate};
use crate::models::team::{NewTeamMember, TeamMember, TeamMemberUpdate};
use crate::models::testimonial::Testimonial;
use crate::models::user::{NewUser, User};

#[derive(Default)]
struct Tables {
    services: Vec<Service>,
    projects: Vec<Project>,
    team: Vec<TeamMember>,
    articles: Vec<BlogArticle>,
    testimonials: Vec<Testimonial>,
    inquiries: Vec<Inquiry>,
    users: Vec<User>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    failing: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail, as if the database went away.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> anyhow::Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            anyhow::bail!("connection refused (os error 111)");
        }
        Ok(())
    }

    pub async fn insert_service(&self, svc: Service) {
        self.tables.write().await.services.push(svc);
    }

    pub async fn insert_project(&self, project: Project) {
        self.tables.write().await.projects.push(project);
    }

    pub async fn insert_team_member(&self, member: TeamMember) {
        self.tables.write().await.team.push(member);
    }

    pub async fn insert_article(&self, article: BlogArticle) {
        self.tables.write().await.articles.push(article);
    }

    pub async fn insert_testimonial(&self, testimonial: Testimonial) {
        self.tables.write().await.testimonials.push(testimonial);
    }

    pub async fn inquiries(&self) -> Vec<Inquiry> {
        self.tables.read().await.inquiries.clone()
    }

    pub async fn set_user_active(&self, id: Uuid, active: bool) {
        if let Some(user) = self.tables.write().await.users.iter_mut().find(|u| u.id == id) {
            user.is_active = active;
        }
    }

    pub async fn articles(&self) -> Vec<BlogArticle> {
        self.tables.read().await.articles.clone()
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn ping(&self) -> anyhow::Result<()> {
        self.check()
    }

    async fn active_services(&self) -> anyhow::Result<Vec<Service>> {
        self.check()?;
        let mut rows: Vec<Service> = self
            .tables
            .read()
            .await
            .services
            .iter()
            .filter(|s| s.is_active)
            .cloned()
            .collect();
        rows.sort_by(|a, b| (a.sort_order, a.created_at).cmp(&(b.sort_order, b.created_at)));
        Ok(rows)
    }

    async fn active_service_by_slug(&self, slug: &str) -> anyhow::Result<Option<Service>> {
        self.check()?;
        Ok(self
            .tables
            .read()
            .await
            .services
            .iter()
            .find(|s| s.is_active && s.matches_slug(slug))
            .cloned())
    }

    async fn all_services(&self) -> anyhow::Result<Vec<Service>> {
        self.check()?;
        let mut rows = self.tables.read().await.services.clone();
        rows.sort_by(|a, b| (a.sort_order, a.created_at).cmp(&(b.sort_order, b.created_at)));
        Ok(rows)
    }

    async fn create_service(&self, svc: &NewService) -> anyhow::Result<Service> {
        self.check()?;
        let now = Utc::now();
        let row = Service {
            id: Uuid::new_v4(),
            title_nl: svc.title_nl.clone(),
            title_en: svc.title_en.clone(),
            description_nl: svc.description_nl.clone(),
            description_en: svc.description_en.clone(),
            icon: svc.icon.clone(),
            image: svc.image.clone(),
            slug_nl: svc.slug_nl.clone(),
            slug_en: svc.slug_en.clone(),
            sort_order: svc.sort_order,
            is_active: svc.is_active,
            created_at: now,
            updated_at: now,
        };
        self.tables.write().await.services.push(row.clone());
        Ok(row)
    }

    async fn update_service(
        &self,
        id: Uuid,
        update: &ServiceUpdate,
    ) -> anyhow::Result<Option<Service>> {
        self.check()?;
        let mut tables = self.tables.write().await;
        let Some(svc) = tables.services.iter_mut().find(|s| s.id == id) else {
            return Ok(None);
        };
        update.apply_to(svc);
        svc.updated_at = Utc::now();
        Ok(Some(svc.clone()))
    }

    async fn delete_service(&self, id: Uuid) -> anyhow::Result<bool> {
        self.check()?;
        let mut tables = self.tables.write().await;
        let before = tables.services.len();
        tables.services.retain(|s| s.id != id);
        Ok(tables.services.len() < before)
    }

    async fn active_projects(&self) -> anyhow::Result<Vec<Project>> {
        self.check()?;
        let mut rows: Vec<Project> = self
            .tables
            .read()
            .await
            .projects
            .iter()
            .filter(|p| p.is_active)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn active_project(&self, id: Uuid) -> anyhow::Result<Option<Project>> {
        self.check()?;
        Ok(self
            .tables
            .read()
            .await
            .projects
            .iter()
            .find(|p| p.id == id && p.is_active)
            .cloned())
    }

    async fn all_projects(&self) -> anyhow::Result<Vec<Project>> {
        self.check()?;
        let mut rows = self.tables.read().await.projects.clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn create_project(&self, project: &NewProject) -> anyhow::Result<Project> {
        self.check()?;
        let now = Utc::now();
        let row = Project {
            id: Uuid::new_v4(),
            title_nl: project.title_nl.clone(),
            title_en: project.title_en.clone(),
            description_nl: project.description_nl.clone(),
            description_en: project.description_en.clone(),
            category_nl: project.category_nl.clone(),
            category_en: project.category_en.clone(),
            location: project.location.clone(),
            year: project.year.clone(),
            image: project.image.clone(),
            gallery: project.gallery.clone(),
            featured_image: project.featured_image.clone(),
            status: project.status.clone(),
            is_active: project.is_active,
            created_at: now,
            updated_at: now,
        };
        self.tables.write().await.projects.push(row.clone());
        Ok(row)
    }

    async fn update_project(
        &self,
        id: Uuid,
        update: &ProjectUpdate,
    ) -> anyhow::Result<Option<Project>> {
        self.check()?;
        let mut tables = self.tables.write().await;
        let Some(project) = tables.projects.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        update.apply_to(project);
        project.updated_at = Utc::now();
        Ok(Some(project.clone()))
    }

    async fn delete_project(&self, id: Uuid) -> anyhow::Result<bool> {
        self.check()?;
        let mut tables = self.tables.write().await;
        let before = tables.projects.len();
        tables.projects.retain(|p| p.id != id);
        Ok(tables.projects.len() < before)
    }

    async fn active_team_members(&self) -> anyhow::Result<Vec<TeamMember>> {
        self.check()?;
        let mut rows: Vec<TeamMember> = self
            .tables
            .read()
            .await
            .team
            .iter()
            .filter(|m| m.is_active)
            .cloned()
            .collect();
        rows.sort_by(|a, b| (a.sort_order, a.created_at).cmp(&(b.sort_order, b.created_at)));
        Ok(rows)
    }

    async fn all_team_members(&self) -> anyhow::Result<Vec<TeamMember>> {
        self.check()?;
        let mut rows = self.tables.read().await.team.clone();
        rows.sort_by(|a, b| (a.sort_order, a.created_at).cmp(&(b.sort_order, b.created_at)));
        Ok(rows)
    }

    async fn create_team_member(&self, member: &NewTeamMember) -> anyhow::Result<TeamMember> {
        self.check()?;
        let now = Utc::now();
        let row = TeamMember {
            id: Uuid::new_v4(),
            name_nl: member.name_nl.clone(),
            name_en: member.name_en.clone(),
            title_nl: member.title_nl.clone(),
            title_en: member.title_en.clone(),
            bio_nl: member.bio_nl.clone(),
            bio_en: member.bio_en.clone(),
            email: member.email.clone(),
            phone: member.phone.clone(),
            linkedin_url: member.linkedin_url.clone(),
            image: member.image.clone(),
            department: member.department.clone(),
            specialties: member.specialties.clone(),
            experience_years: member.experience_years,
            show_in_homepage: member.show_in_homepage,
            show_contact_info: member.show_contact_info,
            show_bio: member.show_bio,
            sort_order: member.sort_order,
            is_active: member.is_active,
            is_featured: member.is_featured,
            created_at: now,
            updated_at: now,
        };
        self.tables.write().await.team.push(row.clone());
        Ok(row)
    }

    async fn update_team_member(
        &self,
        id: Uuid,
        update: &TeamMemberUpdate,
    ) -> anyhow::Result<Option<TeamMember>> {
        self.check()?;
        let mut tables = self.tables.write().await;
        let Some(member) = tables.team.iter_mut().find(|m| m.id == id) else {
            return Ok(None);
        };
        update.apply_to(member);
        member.updated_at = Utc::now();
        Ok(Some(member.clone()))
    }

    async fn delete_team_member(&self, id: Uuid) -> anyhow::Result<bool> {
        self.check()?;
        let mut tables = self.tables.write().await;
        let before = tables.team.len();
        tables.team.retain(|m| m.id != id);
        Ok(tables.team.len() < before)
    }

    async fn active_testimonials(&self) -> anyhow::Result<Vec<Testimonial>> {
        self.check()?;
        let mut rows: Vec<Testimonial> = self
            .tables
            .read()
            .await
            .testimonials
            .iter()
            .filter(|t| t.is_active)
            .cloned()
            .collect();
        rows.sort_by(|a, b| (a.sort_order, a.created_at).cmp(&(b.sort_order, b.created_at)));
        Ok(rows)
    }

    async fn published_articles(
        &self,
        page: PageRequest,
    ) -> anyhow::Result<(Vec<BlogArticle>, i64)> {
        self.check()?;
        let mut published: Vec<BlogArticle> = self
            .tables
            .read()
            .await
            .articles
            .iter()
            .filter(|a| a.is_published)
            .cloned()
            .collect();
        published.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let total = published.len() as i64;
        let rows = published
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit as usize)
            .collect();
        Ok((rows, total))
    }

    async fn record_article_view(&self, slug: &str) -> anyhow::Result<Option<BlogArticle>> {
        self.check()?;
        let mut tables = self.tables.write().await;
        let Some(article) = tables
            .articles
            .iter_mut()
            .find(|a| a.is_published && a.matches_slug(slug))
        else {
            return Ok(None);
        };
        article.view_count += 1;
        Ok(Some(article.clone()))
    }

    async fn blog_categories(&self) -> anyhow::Result<Vec<CategoryCount>> {
        self.check()?;
        let mut counts: HashMap<String, i64> = HashMap::new();
        for article in self.tables.read().await.articles.iter() {
            match &article.category_nl {
                Some(c) if article.is_published && !c.is_empty() => {
                    *counts.entry(c.clone()).or_default() += 1;
                }
                _ => {}
            }
        }
        let mut rows: Vec<CategoryCount> = counts
            .into_iter()
            .map(|(category, count)| CategoryCount { category, count })
            .collect();
        rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.category.cmp(&b.category)));
        Ok(rows)
    }

    async fn blog_tags(&self) -> anyhow::Result<Vec<String>> {
        self.check()?;
        let tables = self.tables.read().await;
        let tags: BTreeSet<String> = tables
            .articles
            .iter()
            .filter(|a| a.is_published)
            .flat_map(|a| a.tags_nl.iter().chain(a.tags_en.iter()))
            .filter(|t| !t.is_empty())
            .cloned()
            .collect();
        Ok(tags.into_iter().collect())
    }

    async fn popular_articles(&self, limit: i64) -> anyhow::Result<Vec<BlogArticle>> {
        self.check()?;
        let mut rows: Vec<BlogArticle> = self
            .tables
            .read()
            .await
            .articles
            .iter()
            .filter(|a| a.is_published)
            .cloned()
            .collect();
        // Undated rows go after dated ones with the same view count.
        rows.sort_by_key(|a| {
            (
                Reverse(a.view_count),
                a.published_at.is_none(),
                Reverse(a.published_at),
            )
        });
        rows.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(rows)
    }

    async fn all_articles(&self) -> anyhow::Result<Vec<BlogArticle>> {
        self.check()?;
        let mut rows = self.tables.read().await.articles.clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn article_by_id(&self, id: Uuid) -> anyhow::Result<Option<BlogArticle>> {
        self.check()?;
        Ok(self
            .tables
            .read()
            .await
            .articles
            .iter()
            .find(|a| a.id == id)
            .cloned())
    }

    async fn create_article(&self, article: &NewArticle) -> anyhow::Result<BlogArticle> {
        self.check()?;
        let mut tables = self.tables.write().await;
        if tables
            .articles
            .iter()
            .any(|a| a.slug_nl == article.slug_nl || a.slug_en == article.slug_en)
        {
            anyhow::bail!("duplicate key value violates unique constraint on blog slug");
        }
        let now = Utc::now();
        let row = BlogArticle {
            id: Uuid::new_v4(),
            title_nl: article.title_nl.clone(),
            title_en: article.title_en.clone(),
            excerpt_nl: article.excerpt_nl.clone(),
            excerpt_en: article.excerpt_en.clone(),
            content_nl: article.content_nl.clone(),
            content_en: article.content_en.clone(),
            category_nl: article.category_nl.clone(),
            category_en: article.category_en.clone(),
            meta_description_nl: article.meta_description_nl.clone(),
            meta_description_en: article.meta_description_en.clone(),
            image: article.image.clone(),
            image_alt: article.image_alt.clone(),
            slug_nl: article.slug_nl.clone(),
            slug_en: article.slug_en.clone(),
            tags_nl: article.tags_nl.clone(),
            tags_en: article.tags_en.clone(),
            is_featured: article.is_featured,
            is_published: article.is_published,
            published_at: article.published_at,
            reading_time: article.reading_time,
            view_count: 0,
            created_at: now,
            updated_at: now,
        };
        tables.articles.push(row.clone());
        Ok(row)
    }

    async fn update_article(
        &self,
        id: Uuid,
        update: &ArticleUpdate,
    ) -> anyhow::Result<Option<BlogArticle>> {
        self.check()?;
        let mut tables = self.tables.write().await;
        let Some(article) = tables.articles.iter_mut().find(|a| a.id == id) else {
            return Ok(None);
        };
        update.apply_to(article);
        article.updated_at = Utc::now();
        Ok(Some(article.clone()))
    }

    async fn delete_article(&self, id: Uuid) -> anyhow::Result<bool> {
        self.check()?;
        let mut tables = self.tables.write().await;
        let before = tables.articles.len();
        tables.articles.retain(|a| a.id != id);
        Ok(tables.articles.len() < before)
    }

    async fn insert_inquiry(&self, inquiry: &NewInquiry) -> anyhow::Result<Uuid> {
        self.check()?;
        let now = Utc::now();
        let id = Uuid::new_v4();
        self.tables.write().await.inquiries.push(Inquiry {
            id,
            first_name: inquiry.first_name.clone(),
            last_name: inquiry.last_name.clone(),
            email: inquiry.email.clone(),
            phone: inquiry.phone.clone(),
            company: inquiry.company.clone(),
            project_type: inquiry.project_type.clone(),
            message: inquiry.message.clone(),
            status: "new".into(),
            created_at: now,
            updated_at: now,
        });
        Ok(id)
    }

    async fn list_inquiries(&self) -> anyhow::Result<Vec<Inquiry>> {
        self.check()?;
        let mut rows = self.tables.read().await.inquiries.clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn user_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        self.check()?;
        Ok(self
            .tables
            .read()
            .await
            .users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn user_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        self.check()?;
        Ok(self
            .tables
            .read()
            .await
            .users
            .iter()
            .find(|u| u.id == id)
            .cloned())
    }

    async fn create_user(&self, user: &NewUser) -> anyhow::Result<User> {
        self.check()?;
        let mut tables = self.tables.write().await;
        if tables
            .users
            .iter()
            .any(|u| u.email.eq_ignore_ascii_case(&user.email))
        {
            anyhow::bail!("user {} already exists", user.email);
        }
        let now = Utc::now();
        let row = User {
            id: Uuid::new_v4(),
            email: user.email.to_lowercase(),
            password_hash: user.password_hash.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            role: user.role.clone(),
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        tables.users.push(row.clone());
        Ok(row)
    }
}
