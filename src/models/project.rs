use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use super::{default_true, reject_blank, require_text};

/// A portfolio project shown on `/projects`.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub title_nl: String,
    pub title_en: String,
    pub description_nl: String,
    pub description_en: String,
    /// residential, commercial, infrastructure
    pub category_nl: String,
    pub category_en: String,
    pub location: Option<String>,
    pub year: Option<String>,
    pub image: Option<String>,
    /// Array of `{url, caption}` objects as stored.
    pub gallery: Option<Value>,
    pub featured_image: Option<String>,
    /// completed, in-progress, planned
    pub status: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

const STATUSES: [&str; 3] = ["completed", "in-progress", "planned"];

fn default_status() -> String {
    "completed".into()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub title_nl: String,
    pub title_en: String,
    pub description_nl: String,
    pub description_en: String,
    pub category_nl: String,
    pub category_en: String,
    pub location: Option<String>,
    pub year: Option<String>,
    pub image: Option<String>,
    pub gallery: Option<Value>,
    pub featured_image: Option<String>,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl NewProject {
    pub fn validate(&self) -> Result<(), String> {
        require_text(&[
            ("titleNl", &self.title_nl),
            ("titleEn", &self.title_en),
            ("descriptionNl", &self.description_nl),
            ("descriptionEn", &self.description_en),
            ("categoryNl", &self.category_nl),
            ("categoryEn", &self.category_en),
        ])?;
        validate_status(Some(&self.status))
    }

    /// Normalizes the gallery and picks a featured image from it when none was given.
    pub fn normalize(&mut self) {
        self.gallery = self.gallery.take().and_then(normalize_gallery);
        fill_featured_image(&mut self.featured_image, self.gallery.as_ref());
    }
}

/// Partial update: absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectUpdate {
    pub title_nl: Option<String>,
    pub title_en: Option<String>,
    pub description_nl: Option<String>,
    pub description_en: Option<String>,
    pub category_nl: Option<String>,
    pub category_en: Option<String>,
    pub location: Option<String>,
    pub year: Option<String>,
    pub image: Option<String>,
    pub gallery: Option<Value>,
    pub featured_image: Option<String>,
    pub status: Option<String>,
    pub is_active: Option<bool>,
}

impl ProjectUpdate {
    pub fn validate(&self) -> Result<(), String> {
        reject_blank(&[
            ("titleNl", &self.title_nl),
            ("titleEn", &self.title_en),
            ("descriptionNl", &self.description_nl),
            ("descriptionEn", &self.description_en),
            ("categoryNl", &self.category_nl),
            ("categoryEn", &self.category_en),
        ])?;
        validate_status(self.status.as_deref())
    }

    pub fn normalize(&mut self) {
        self.gallery = self.gallery.take().and_then(normalize_gallery);
        fill_featured_image(&mut self.featured_image, self.gallery.as_ref());
    }

    pub fn apply_to(&self, project: &mut Project) {
        let text = [
            (&self.title_nl, &mut project.title_nl),
            (&self.title_en, &mut project.title_en),
            (&self.description_nl, &mut project.description_nl),
            (&self.description_en, &mut project.description_en),
            (&self.category_nl, &mut project.category_nl),
            (&self.category_en, &mut project.category_en),
        ];
        for (src, dst) in text {
            if let Some(v) = src {
                *dst = v.clone();
            }
        }
        let optional = [
            (&self.location, &mut project.location),
            (&self.year, &mut project.year),
            (&self.image, &mut project.image),
            (&self.featured_image, &mut project.featured_image),
        ];
        for (src, dst) in optional {
            if src.is_some() {
                *dst = src.clone();
            }
        }
        if self.gallery.is_some() {
            project.gallery = self.gallery.clone();
        }
        if let Some(v) = &self.status {
            project.status = v.clone();
        }
        if let Some(v) = self.is_active {
            project.is_active = v;
        }
    }
}

fn validate_status(status: Option<&str>) -> Result<(), String> {
    match status {
        Some(s) if !STATUSES.contains(&s) => Err(format!(
            "status must be one of {}",
            STATUSES.join(", ")
        )),
        _ => Ok(()),
    }
}

/// Accepts a stored array as-is or a comma-separated list of URLs, which
/// becomes `[{url, alt, order}]`. Anything else drops the gallery.
pub fn normalize_gallery(gallery: Value) -> Option<Value> {
    match gallery {
        Value::Array(_) => Some(gallery),
        Value::String(urls) => {
            let items: Vec<Value> = urls
                .split(',')
                .map(str::trim)
                .filter(|u| !u.is_empty())
                .enumerate()
                .map(|(i, url)| {
                    json!({
                        "url": url,
                        "alt": format!("Gallery image {}", i + 1),
                        "order": i,
                    })
                })
                .collect();
            Some(Value::Array(items))
        }
        _ => None,
    }
}

fn fill_featured_image(featured: &mut Option<String>, gallery: Option<&Value>) {
    if !featured.as_deref().unwrap_or_default().is_empty() {
        return;
    }
    if let Some(url) = gallery
        .and_then(Value::as_array)
        .and_then(|items| items.first())
        .and_then(|item| item.get("url"))
        .and_then(Value::as_str)
    {
        *featured = Some(url.to_string());
    }
}
