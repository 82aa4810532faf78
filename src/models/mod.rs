pub mod blog;
pub mod inquiry;
pub mod project;
pub mod service;
pub mod team;
pub mod testimonial;
pub mod user;

use once_cell::sync::Lazy;
use regex::Regex;

static SLUG_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap());

pub(crate) fn default_true() -> bool {
    true
}

/// Every listed field must be non-blank.
pub(crate) fn require_text(fields: &[(&str, &String)]) -> Result<(), String> {
    match fields.iter().find(|(_, v)| v.trim().is_empty()) {
        Some((field, _)) => Err(format!("{} is required", field)),
        None => Ok(()),
    }
}

/// Fields of a partial update may be absent, never blank.
pub(crate) fn reject_blank(fields: &[(&str, &Option<String>)]) -> Result<(), String> {
    match fields
        .iter()
        .find(|(_, v)| matches!(v, Some(v) if v.trim().is_empty()))
    {
        Some((field, _)) => Err(format!("{} must not be empty", field)),
        None => Ok(()),
    }
}

pub(crate) fn validate_slug(field: &str, slug: Option<&str>) -> Result<(), String> {
    match slug {
        Some(s) if !SLUG_REGEX.is_match(s) => {
            Err(format!("{} must be lowercase words separated by dashes", field))
        }
        _ => Ok(()),
    }
}
