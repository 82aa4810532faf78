use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{default_true, reject_blank, require_text};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub id: Uuid,
    pub name_nl: String,
    pub name_en: String,
    pub title_nl: String,
    pub title_en: String,
    pub bio_nl: Option<String>,
    pub bio_en: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin_url: Option<String>,
    pub image: Option<String>,
    pub department: Option<String>,
    pub specialties: Vec<String>,
    pub experience_years: Option<i32>,
    pub show_in_homepage: bool,
    pub show_contact_info: bool,
    pub show_bio: bool,
    #[serde(rename = "order")]
    pub sort_order: i32,
    pub is_active: bool,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TeamMember {
    /// Strips the fields the member has not opted to publish.
    pub fn into_public(mut self) -> Self {
        if !self.show_contact_info {
            self.email = None;
            self.phone = None;
        }
        if !self.show_bio {
            self.bio_nl = None;
            self.bio_en = None;
        }
        self
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTeamMember {
    pub name_nl: String,
    pub name_en: String,
    pub title_nl: String,
    pub title_en: String,
    pub bio_nl: Option<String>,
    pub bio_en: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin_url: Option<String>,
    pub image: Option<String>,
    pub department: Option<String>,
    #[serde(default)]
    pub specialties: Vec<String>,
    pub experience_years: Option<i32>,
    #[serde(default = "default_true")]
    pub show_in_homepage: bool,
    #[serde(default)]
    pub show_contact_info: bool,
    #[serde(default = "default_true")]
    pub show_bio: bool,
    #[serde(default, rename = "order")]
    pub sort_order: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_featured: bool,
}

impl NewTeamMember {
    pub fn validate(&self) -> Result<(), String> {
        require_text(&[
            ("nameNl", &self.name_nl),
            ("nameEn", &self.name_en),
            ("titleNl", &self.title_nl),
            ("titleEn", &self.title_en),
        ])?;
        validate_experience(self.experience_years)
    }
}

/// Partial update: absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMemberUpdate {
    pub name_nl: Option<String>,
    pub name_en: Option<String>,
    pub title_nl: Option<String>,
    pub title_en: Option<String>,
    pub bio_nl: Option<String>,
    pub bio_en: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin_url: Option<String>,
    pub image: Option<String>,
    pub department: Option<String>,
    pub specialties: Option<Vec<String>>,
    pub experience_years: Option<i32>,
    pub show_in_homepage: Option<bool>,
    pub show_contact_info: Option<bool>,
    pub show_bio: Option<bool>,
    #[serde(rename = "order")]
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
    pub is_featured: Option<bool>,
}

impl TeamMemberUpdate {
    pub fn validate(&self) -> Result<(), String> {
        reject_blank(&[
            ("nameNl", &self.name_nl),
            ("nameEn", &self.name_en),
            ("titleNl", &self.title_nl),
            ("titleEn", &self.title_en),
        ])?;
        validate_experience(self.experience_years)
    }

    pub fn apply_to(&self, member: &mut TeamMember) {
        let text = [
            (&self.name_nl, &mut member.name_nl),
            (&self.name_en, &mut member.name_en),
            (&self.title_nl, &mut member.title_nl),
            (&self.title_en, &mut member.title_en),
        ];
        for (src, dst) in text {
            if let Some(v) = src {
                *dst = v.clone();
            }
        }
        let optional = [
            (&self.bio_nl, &mut member.bio_nl),
            (&self.bio_en, &mut member.bio_en),
            (&self.email, &mut member.email),
            (&self.phone, &mut member.phone),
            (&self.linkedin_url, &mut member.linkedin_url),
            (&self.image, &mut member.image),
            (&self.department, &mut member.department),
        ];
        for (src, dst) in optional {
            if src.is_some() {
                *dst = src.clone();
            }
        }
        let flags = [
            (self.show_in_homepage, &mut member.show_in_homepage),
            (self.show_contact_info, &mut member.show_contact_info),
            (self.show_bio, &mut member.show_bio),
            (self.is_active, &mut member.is_active),
            (self.is_featured, &mut member.is_featured),
        ];
        for (src, dst) in flags {
            if let Some(v) = src {
                *dst = v;
            }
        }
        if let Some(v) = &self.specialties {
            member.specialties = v.clone();
        }
        if self.experience_years.is_some() {
            member.experience_years = self.experience_years;
        }
        if let Some(v) = self.sort_order {
            member.sort_order = v;
        }
    }
}

fn validate_experience(years: Option<i32>) -> Result<(), String> {
    match years {
        Some(y) if y < 0 => Err("experienceYears must not be negative".into()),
        _ => Ok(()),
    }
}
