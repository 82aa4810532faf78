use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}$").unwrap());

/// A contact form submission. `status` moves new → contacted → closed.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Inquiry {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub project_type: Option<String>,
    pub message: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Contact form body as posted by the site. Every field is optional here so
/// missing values surface as a 400 with a readable message.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub project_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInquiry {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub project_type: Option<String>,
    pub message: String,
}

fn present(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

impl TryFrom<ContactRequest> for NewInquiry {
    type Error = &'static str;

    fn try_from(req: ContactRequest) -> Result<Self, Self::Error> {
        let (Some(first_name), Some(last_name), Some(email), Some(message)) = (
            present(req.first_name),
            present(req.last_name),
            present(req.email),
            present(req.message),
        ) else {
            return Err("Missing required fields");
        };

        if !EMAIL_REGEX.is_match(&email) {
            return Err("Invalid email address");
        }

        Ok(NewInquiry {
            first_name,
            last_name,
            email,
            phone: present(req.phone),
            company: present(req.company),
            project_type: present(req.project_type),
            message,
        })
    }
}
