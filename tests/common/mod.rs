//! Shared helpers for driving the full router in-process.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use chrono::{Duration, Utc};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use bouwsite::auth::password::hash_password;
use bouwsite::auth::SESSION_COOKIE;
use bouwsite::config::Config;
use bouwsite::models::blog::BlogArticle;
use bouwsite::models::project::Project;
use bouwsite::models::service::Service;
use bouwsite::models::team::TeamMember;
use bouwsite::models::testimonial::Testimonial;
use bouwsite::models::user::{NewUser, User};
use bouwsite::store::memory::MemoryStore;
use bouwsite::store::ContentStore;
use bouwsite::{build_app, AppState};

pub struct TestApp {
    pub router: Router,
    pub state: Arc<AppState>,
    pub store: Arc<MemoryStore>,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let state = Arc::new(AppState::new(store.clone(), Config::for_tests()));
        Self {
            router: build_app(state.clone()),
            state,
            store,
        }
    }

    pub async fn send(&self, req: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(req).await.unwrap()
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    pub async fn get_with_cookie(&self, uri: &str, cookie: &str) -> Response<Body> {
        self.send(
            Request::get(uri)
                .header("cookie", cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    /// A JSON request carrying a fresh CSRF token.
    pub fn json_request(&self, method: &str, uri: &str, body: &Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .header("x-csrf-token", self.state.csrf.issue())
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    pub async fn seed_user(&self, email: &str, password: &str, role: &str) -> User {
        self.store
            .create_user(&NewUser {
                email: email.into(),
                password_hash: hash_password(password).await.unwrap(),
                first_name: Some("Sanne".into()),
                last_name: Some("de Vries".into()),
                role: role.into(),
            })
            .await
            .unwrap()
    }

    /// A user row without a usable password, for tests that only need a session.
    pub async fn seed_user_without_password(&self, email: &str, role: &str) -> User {
        self.store
            .create_user(&NewUser {
                email: email.into(),
                password_hash: "!".into(),
                first_name: None,
                last_name: None,
                role: role.into(),
            })
            .await
            .unwrap()
    }

    pub fn session_cookie(&self, user: &User) -> String {
        format!("{}={}", SESSION_COOKIE, self.state.sessions.issue(user).unwrap())
    }
}

pub async fn body_json(resp: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(resp: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn service(title: &str, slug_nl: &str, slug_en: &str, order: i32, active: bool) -> Service {
    let now = Utc::now();
    Service {
        id: Uuid::new_v4(),
        title_nl: title.into(),
        title_en: title.into(),
        description_nl: format!("{title} (nl)"),
        description_en: format!("{title} (en)"),
        icon: None,
        image: None,
        slug_nl: Some(slug_nl.into()),
        slug_en: Some(slug_en.into()),
        sort_order: order,
        is_active: active,
        created_at: now,
        updated_at: now,
    }
}

pub fn article(slug: &str, published: bool, age_days: i64) -> BlogArticle {
    let created = Utc::now() - Duration::days(age_days);
    BlogArticle {
        id: Uuid::new_v4(),
        title_nl: slug.into(),
        title_en: slug.into(),
        excerpt_nl: None,
        excerpt_en: None,
        content_nl: "inhoud".into(),
        content_en: "content".into(),
        category_nl: None,
        category_en: None,
        meta_description_nl: None,
        meta_description_en: None,
        image: None,
        image_alt: None,
        slug_nl: slug.into(),
        slug_en: format!("{slug}-en"),
        tags_nl: vec![],
        tags_en: vec![],
        is_featured: false,
        is_published: published,
        published_at: published.then_some(created),
        reading_time: Some(4),
        view_count: 0,
        created_at: created,
        updated_at: created,
    }
}

pub fn project(title: &str, active: bool, age_days: i64) -> Project {
    let created = Utc::now() - Duration::days(age_days);
    Project {
        id: Uuid::new_v4(),
        title_nl: title.into(),
        title_en: title.into(),
        description_nl: "beschrijving".into(),
        description_en: "description".into(),
        category_nl: "woningbouw".into(),
        category_en: "residential".into(),
        location: Some("Amsterdam".into()),
        year: Some("2023".into()),
        image: None,
        gallery: None,
        featured_image: None,
        status: "completed".into(),
        is_active: active,
        created_at: created,
        updated_at: created,
    }
}

pub fn team_member(name: &str, order: i32, show_contact_info: bool) -> TeamMember {
    let now = Utc::now();
    TeamMember {
        id: Uuid::new_v4(),
        name_nl: name.into(),
        name_en: name.into(),
        title_nl: "Constructeur".into(),
        title_en: "Structural engineer".into(),
        bio_nl: None,
        bio_en: None,
        email: Some(format!("{}@example.nl", name.to_lowercase())),
        phone: Some("+31 20 000 0000".into()),
        linkedin_url: None,
        image: None,
        department: None,
        specialties: vec![],
        experience_years: None,
        show_in_homepage: false,
        show_contact_info,
        show_bio: false,
        sort_order: order,
        is_active: true,
        is_featured: false,
        created_at: now,
        updated_at: now,
    }
}

pub fn testimonial(customer: &str, order: i32, active: bool) -> Testimonial {
    let now = Utc::now();
    Testimonial {
        id: Uuid::new_v4(),
        customer_name: customer.into(),
        customer_title: None,
        customer_image: None,
        testimonial_nl: "Vakkundig en op tijd.".into(),
        testimonial_en: "Skilled and on time.".into(),
        rating: 5,
        project_type: Some("renovatie".into()),
        location: Some("Amsterdam".into()),
        featured: false,
        sort_order: order,
        is_active: active,
        created_at: now,
        updated_at: now,
    }
}
