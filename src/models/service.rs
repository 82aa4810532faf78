use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{default_true, reject_blank, require_text, validate_slug};

/// A service offered by the company (new construction, renovation, ...).
///
/// Only rows with `is_active = true` are visible on the public site.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: Uuid,
    pub title_nl: String,
    pub title_en: String,
    pub description_nl: String,
    pub description_en: String,
    pub icon: Option<String>,
    pub image: Option<String>,
    pub slug_nl: Option<String>,
    pub slug_en: Option<String>,
    #[serde(rename = "order")]
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Service {
    /// True when either localized slug equals `slug`.
    pub fn matches_slug(&self, slug: &str) -> bool {
        self.slug_nl.as_deref() == Some(slug) || self.slug_en.as_deref() == Some(slug)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewService {
    pub title_nl: String,
    pub title_en: String,
    pub description_nl: String,
    pub description_en: String,
    pub icon: Option<String>,
    pub image: Option<String>,
    pub slug_nl: Option<String>,
    pub slug_en: Option<String>,
    #[serde(default, rename = "order")]
    pub sort_order: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl NewService {
    pub fn validate(&self) -> Result<(), String> {
        require_text(&[
            ("titleNl", &self.title_nl),
            ("titleEn", &self.title_en),
            ("descriptionNl", &self.description_nl),
            ("descriptionEn", &self.description_en),
        ])?;
        validate_slug("slugNl", self.slug_nl.as_deref())?;
        validate_slug("slugEn", self.slug_en.as_deref())
    }
}

/// Partial update: absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceUpdate {
    pub title_nl: Option<String>,
    pub title_en: Option<String>,
    pub description_nl: Option<String>,
    pub description_en: Option<String>,
    pub icon: Option<String>,
    pub image: Option<String>,
    pub slug_nl: Option<String>,
    pub slug_en: Option<String>,
    #[serde(rename = "order")]
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}

impl ServiceUpdate {
    pub fn validate(&self) -> Result<(), String> {
        reject_blank(&[
            ("titleNl", &self.title_nl),
            ("titleEn", &self.title_en),
            ("descriptionNl", &self.description_nl),
            ("descriptionEn", &self.description_en),
        ])?;
        validate_slug("slugNl", self.slug_nl.as_deref())?;
        validate_slug("slugEn", self.slug_en.as_deref())
    }

    pub fn apply_to(&self, svc: &mut Service) {
        if let Some(v) = &self.title_nl {
            svc.title_nl = v.clone();
        }
        if let Some(v) = &self.title_en {
            svc.title_en = v.clone();
        }
        if let Some(v) = &self.description_nl {
            svc.description_nl = v.clone();
        }
        if let Some(v) = &self.description_en {
            svc.description_en = v.clone();
        }
        if self.icon.is_some() {
            svc.icon = self.icon.clone();
        }
        if self.image.is_some() {
            svc.image = self.image.clone();
        }
        if self.slug_nl.is_some() {
            svc.slug_nl = self.slug_nl.clone();
        }
        if self.slug_en.is_some() {
            svc.slug_en = self.slug_en.clone();
        }
        if let Some(v) = self.sort_order {
            svc.sort_order = v;
        }
        if let Some(v) = self.is_active {
            svc.is_active = v;
        }
    }
}
