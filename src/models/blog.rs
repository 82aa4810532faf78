use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{reject_blank, require_text, validate_slug};

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;
pub const DEFAULT_POPULAR_LIMIT: i64 = 5;
pub const MAX_POPULAR_LIMIT: i64 = 50;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct BlogArticle {
    pub id: Uuid,
    pub title_nl: String,
    pub title_en: String,
    pub excerpt_nl: Option<String>,
    pub excerpt_en: Option<String>,
    pub content_nl: String,
    pub content_en: String,
    pub category_nl: Option<String>,
    pub category_en: Option<String>,
    pub meta_description_nl: Option<String>,
    pub meta_description_en: Option<String>,
    pub image: Option<String>,
    pub image_alt: Option<String>,
    pub slug_nl: String,
    pub slug_en: String,
    pub tags_nl: Vec<String>,
    pub tags_en: Vec<String>,
    pub is_featured: bool,
    pub is_published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub reading_time: Option<i32>,
    pub view_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BlogArticle {
    pub fn matches_slug(&self, slug: &str) -> bool {
        self.slug_nl == slug || self.slug_en == slug
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewArticle {
    pub title_nl: String,
    pub title_en: String,
    pub excerpt_nl: Option<String>,
    pub excerpt_en: Option<String>,
    pub content_nl: String,
    pub content_en: String,
    pub category_nl: Option<String>,
    pub category_en: Option<String>,
    pub meta_description_nl: Option<String>,
    pub meta_description_en: Option<String>,
    pub image: Option<String>,
    pub image_alt: Option<String>,
    pub slug_nl: String,
    pub slug_en: String,
    #[serde(default)]
    pub tags_nl: Vec<String>,
    #[serde(default)]
    pub tags_en: Vec<String>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub is_published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub reading_time: Option<i32>,
}

impl NewArticle {
    pub fn validate(&self) -> Result<(), String> {
        require_text(&[
            ("titleNl", &self.title_nl),
            ("titleEn", &self.title_en),
            ("contentNl", &self.content_nl),
            ("contentEn", &self.content_en),
            ("slugNl", &self.slug_nl),
            ("slugEn", &self.slug_en),
        ])?;
        validate_slug("slugNl", Some(&self.slug_nl))?;
        validate_slug("slugEn", Some(&self.slug_en))
    }
}

/// Partial update: absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleUpdate {
    pub title_nl: Option<String>,
    pub title_en: Option<String>,
    pub excerpt_nl: Option<String>,
    pub excerpt_en: Option<String>,
    pub content_nl: Option<String>,
    pub content_en: Option<String>,
    pub category_nl: Option<String>,
    pub category_en: Option<String>,
    pub meta_description_nl: Option<String>,
    pub meta_description_en: Option<String>,
    pub image: Option<String>,
    pub image_alt: Option<String>,
    pub slug_nl: Option<String>,
    pub slug_en: Option<String>,
    pub tags_nl: Option<Vec<String>>,
    pub tags_en: Option<Vec<String>>,
    pub is_featured: Option<bool>,
    pub is_published: Option<bool>,
    pub published_at: Option<DateTime<Utc>>,
    pub reading_time: Option<i32>,
}

impl ArticleUpdate {
    pub fn validate(&self) -> Result<(), String> {
        reject_blank(&[
            ("titleNl", &self.title_nl),
            ("titleEn", &self.title_en),
            ("contentNl", &self.content_nl),
            ("contentEn", &self.content_en),
        ])?;
        validate_slug("slugNl", self.slug_nl.as_deref())?;
        validate_slug("slugEn", self.slug_en.as_deref())
    }

    pub fn apply_to(&self, article: &mut BlogArticle) {
        let text = [
            (&self.title_nl, &mut article.title_nl),
            (&self.title_en, &mut article.title_en),
            (&self.content_nl, &mut article.content_nl),
            (&self.content_en, &mut article.content_en),
            (&self.slug_nl, &mut article.slug_nl),
            (&self.slug_en, &mut article.slug_en),
        ];
        for (src, dst) in text {
            if let Some(v) = src {
                *dst = v.clone();
            }
        }
        let optional = [
            (&self.excerpt_nl, &mut article.excerpt_nl),
            (&self.excerpt_en, &mut article.excerpt_en),
            (&self.category_nl, &mut article.category_nl),
            (&self.category_en, &mut article.category_en),
            (&self.meta_description_nl, &mut article.meta_description_nl),
            (&self.meta_description_en, &mut article.meta_description_en),
            (&self.image, &mut article.image),
            (&self.image_alt, &mut article.image_alt),
        ];
        for (src, dst) in optional {
            if src.is_some() {
                *dst = src.clone();
            }
        }
        if let Some(v) = &self.tags_nl {
            article.tags_nl = v.clone();
        }
        if let Some(v) = &self.tags_en {
            article.tags_en = v.clone();
        }
        if let Some(v) = self.is_featured {
            article.is_featured = v;
        }
        if let Some(v) = self.is_published {
            article.is_published = v;
        }
        if self.published_at.is_some() {
            article.published_at = self.published_at;
        }
        if self.reading_time.is_some() {
            article.reading_time = self.reading_time;
        }
    }
}

/// Published article count per Dutch category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct CategoryCount {
    pub category: String,
    pub count: i64,
}

#[derive(Debug, Default, Deserialize)]
pub struct PopularQuery {
    pub limit: Option<String>,
}

impl PopularQuery {
    pub fn limit(&self) -> i64 {
        parse_leading_int(self.limit.as_deref())
            .unwrap_or(DEFAULT_POPULAR_LIMIT)
            .clamp(1, MAX_POPULAR_LIMIT)
    }
}

/// Raw `?page=&limit=` query parameters. Kept as text so a bad value in
/// one field leaves the other intact.
#[derive(Debug, Default, Deserialize)]
pub struct BlogQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl PageRequest {
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl From<BlogQuery> for PageRequest {
    fn from(q: BlogQuery) -> Self {
        Self {
            page: parse_leading_int(q.page.as_deref()).unwrap_or(1).max(1),
            limit: parse_leading_int(q.limit.as_deref())
                .unwrap_or(DEFAULT_PAGE_SIZE)
                .clamp(1, MAX_PAGE_SIZE),
        }
    }
}

/// Reads an optional sign and the leading digits of `raw` (`"12abc"` is 12).
/// `None` when there are no digits to read.
pub fn parse_leading_int(raw: Option<&str>) -> Option<i64> {
    let s = raw?.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..end];
    if digits.is_empty() {
        return None;
    }
    let value = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -value } else { value })
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl Pagination {
    pub fn new(req: PageRequest, total: i64) -> Self {
        Self {
            page: req.page,
            limit: req.limit,
            total,
            total_pages: (total + req.limit - 1) / req.limit,
        }
    }
}
