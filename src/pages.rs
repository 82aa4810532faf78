//! Server-rendered page shells.
//!
//! Each page route returns a minimal HTML document carrying the route's
//! metadata and a mount point naming the front-end component to hydrate.
//! Dynamic path segments are passed through as `data-*` attributes.

use std::sync::Arc;

use axum::{
    extract::RawPathParams,
    http::{header, HeaderValue, StatusCode},
    middleware,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::auth::admin_page_gate;
use crate::AppState;

const SITE_NAME: &str = "BouwMeesters Amsterdam";

#[derive(Debug, Clone, Copy)]
pub struct PageDef {
    pub path: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub component: &'static str,
}

const fn page(
    path: &'static str,
    title: &'static str,
    description: &'static str,
    component: &'static str,
) -> PageDef {
    PageDef {
        path,
        title,
        description,
        component,
    }
}

pub static PUBLIC_PAGES: &[PageDef] = &[
    page(
        "/",
        "BouwMeesters Amsterdam - Professionele Bouwoplossingen",
        "BouwMeesters Amsterdam BV biedt professionele bouwdiensten in Amsterdam. Specialisten in nieuwbouw, renovatie, verbouwing en duurzaam bouwen. Vraag vrijblijvend offerte aan.",
        "HomePage",
    ),
    page("/about-us", "About Us - BouwMeesters Amsterdam", "About Us - BouwMeesters Amsterdam page", "AboutUsPage"),
    page("/blog", "Blog - BouwMeesters Amsterdam", "Blog - BouwMeesters Amsterdam page", "BlogPage"),
    page("/blog/:slug", "Blog Article - BouwMeesters Amsterdam", "Blog Article - BouwMeesters Amsterdam page", "BlogArticlePage"),
    page("/projects", "Projects - BouwMeesters Amsterdam", "Projects - BouwMeesters Amsterdam page", "ProjectsPage"),
    page("/projects/:id", "Project - BouwMeesters Amsterdam", "Project - BouwMeesters Amsterdam page", "ProjectPage"),
    page("/services", "Services - BouwMeesters Amsterdam", "Services - BouwMeesters Amsterdam page", "ServicesPage"),
    page("/services/:slug", "Service - BouwMeesters Amsterdam", "Service - BouwMeesters Amsterdam page", "ServicePage"),
    page("/team", "Team - BouwMeesters Amsterdam", "Team - BouwMeesters Amsterdam page", "TeamPage"),
    page("/maatschappelijke", "Maatschappelijke - BouwMeesters Amsterdam", "Maatschappelijke - BouwMeesters Amsterdam page", "MaatschappelijkePage"),
    page("/maatschappelijke/:id", "Maatschappelijke Detail - BouwMeesters Amsterdam", "Maatschappelijke Detail - BouwMeesters Amsterdam page", "MaatschappelijkeDetailPage"),
    page("/legal/:slug", "Legal Page - BouwMeesters Amsterdam", "Legal Page - BouwMeesters Amsterdam page", "LegalPagePage"),
    page("/not-found", NOT_FOUND.title, NOT_FOUND.description, NOT_FOUND.component),
    page("/login", "Login - BouwMeesters Amsterdam", "Login - BouwMeesters Amsterdam page", "LoginPage"),
];

const NOT_FOUND: PageDef = PageDef {
    path: "/not-found",
    title: "Not Found - BouwMeesters Amsterdam",
    description: "Not Found - BouwMeesters Amsterdam page",
    component: "NotFoundPage",
};

/// What an admin page renders inside the layout.
#[derive(Debug, Clone, Copy)]
pub enum AdminContent {
    /// Section cards linking to each admin area.
    Overview,
    /// Mounts a front-end editor component.
    Component(&'static str),
    /// Heading plus "Admin page for <section>".
    Placeholder { heading: &'static str, section: &'static str },
}

#[derive(Debug, Clone, Copy)]
pub struct AdminPageDef {
    pub path: &'static str,
    pub content: AdminContent,
}

pub static ADMIN_PAGES: &[AdminPageDef] = &[
    AdminPageDef { path: "/admin", content: AdminContent::Overview },
    AdminPageDef {
        path: "/admin/dashboard",
        content: AdminContent::Placeholder { heading: "Dashboard", section: "dashboard" },
    },
    AdminPageDef {
        path: "/admin/emails",
        content: AdminContent::Placeholder { heading: "Emails", section: "emails" },
    },
    AdminPageDef {
        path: "/admin/projects",
        content: AdminContent::Placeholder { heading: "Projects", section: "projects" },
    },
    AdminPageDef {
        path: "/admin/services",
        content: AdminContent::Placeholder { heading: "Services", section: "services" },
    },
    AdminPageDef {
        path: "/admin/team",
        content: AdminContent::Placeholder { heading: "Team", section: "team" },
    },
    AdminPageDef {
        path: "/admin/content/blog",
        content: AdminContent::Placeholder { heading: "Blog", section: "blog" },
    },
    AdminPageDef {
        path: "/admin/settings/theme",
        content: AdminContent::Component("ThemeSettingsEditor"),
    },
];

/// Navigation entries shown in the admin layout, in display order.
const ADMIN_NAV: &[(&str, &str)] = &[
    ("Dashboard", "/admin/dashboard"),
    ("Services", "/admin/services"),
    ("Projects", "/admin/projects"),
    ("Blog", "/admin/content/blog"),
    ("Team", "/admin/team"),
    ("Emails", "/admin/emails"),
    ("Theme", "/admin/settings/theme"),
];

/// Page routes plus the not-found fallback, with the admin gate in front.
pub fn page_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    let mut router = Router::new();

    for def in PUBLIC_PAGES {
        router = router.route(
            def.path,
            get(move |params: RawPathParams| async move { render_public(def, params.iter()) }),
        );
    }

    for def in ADMIN_PAGES {
        router = router.route(def.path, get(move || async move { render_admin(def) }));
    }

    router
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(state, admin_page_gate))
}

async fn not_found() -> Response {
    let mut resp = render_public(&NOT_FOUND, std::iter::empty());
    *resp.status_mut() = StatusCode::NOT_FOUND;
    resp
}

fn render_public<'a, P>(def: &PageDef, params: P) -> Response
where
    P: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut attrs = String::new();
    for (key, value) in params {
        attrs.push_str(&format!(
            " data-{}=\"{}\"",
            encode_double_quoted_attribute(key),
            encode_double_quoted_attribute(value)
        ));
    }

    let body = format!(
        r#"<div id="root" data-component="{}"{}></div>"#,
        encode_double_quoted_attribute(def.component),
        attrs
    );
    document(def.title, def.description, &body)
}

fn render_admin(def: &AdminPageDef) -> Response {
    let content = match def.content {
        AdminContent::Overview => {
            let mut cards = String::from(r#"<h1>Admin Dashboard</h1><div class="admin-sections">"#);
            for (label, href) in ADMIN_NAV {
                cards.push_str(&format!(
                    r#"<a class="admin-card" href="{}">{}</a>"#,
                    encode_double_quoted_attribute(href),
                    encode_text(label)
                ));
            }
            cards.push_str("</div>");
            cards
        }
        AdminContent::Component(component) => format!(
            r#"<div id="root" data-component="{}"></div>"#,
            encode_double_quoted_attribute(component)
        ),
        AdminContent::Placeholder { heading, section } => format!(
            "<h1>{}</h1><p>Admin page for {}</p>",
            encode_text(heading),
            encode_text(section)
        ),
    };

    let mut nav = String::from(r#"<nav class="admin-nav"><ul>"#);
    for (label, href) in ADMIN_NAV {
        let current = if *href == def.path { r#" aria-current="page""# } else { "" };
        nav.push_str(&format!(
            r#"<li><a href="{}"{}>{}</a></li>"#,
            encode_double_quoted_attribute(href),
            current,
            encode_text(label)
        ));
    }
    nav.push_str("</ul></nav>");

    let body = format!(
        r#"<div class="admin-layout">{}<main class="admin-content">{}</main></div>"#,
        nav, content
    );
    let title = format!("Admin - {}", SITE_NAME);
    document(&title, "Admin", &body)
}

fn document(title: &str, description: &str, body: &str) -> Response {
    let html = format!(
        concat!(
            "<!DOCTYPE html>\n",
            "<html lang=\"nl\">\n",
            "<head>\n",
            "<meta charset=\"utf-8\">\n",
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n",
            "<title>{}</title>\n",
            "<meta name=\"description\" content=\"{}\">\n",
            "</head>\n",
            "<body>\n{}\n</body>\n",
            "</html>\n"
        ),
        encode_text(title),
        encode_double_quoted_attribute(description),
        body
    );

    let mut resp = Html(html).into_response();
    resp.headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    resp
}
