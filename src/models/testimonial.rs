use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A customer quote shown on the home page.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub id: Uuid,
    pub customer_name: String,
    /// Job title or company.
    pub customer_title: Option<String>,
    pub customer_image: Option<String>,
    pub testimonial_nl: String,
    pub testimonial_en: String,
    /// 1-5
    pub rating: i32,
    pub project_type: Option<String>,
    pub location: Option<String>,
    pub featured: bool,
    #[serde(rename = "order")]
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
