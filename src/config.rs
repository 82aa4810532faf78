use serde::Deserialize;

const PLACEHOLDER_CSRF_SECRET: &str = "default-csrf-secret-change-in-production";
const PLACEHOLDER_SESSION_SECRET: &str = "dev-session-secret-change-in-production";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    /// HMAC key for CSRF tokens. Set via BOUWSITE_CSRF_SECRET.
    pub csrf_secret: String,
    /// Maximum CSRF token age in seconds. Set via BOUWSITE_CSRF_MAX_AGE. Default: 3600.
    pub csrf_max_age_secs: u64,
    /// HS256 key for admin session cookies. Set via BOUWSITE_SESSION_SECRET.
    pub session_secret: String,
    /// Session lifetime in hours. Set via BOUWSITE_SESSION_TTL_HOURS. Default: 168 (7 days).
    pub session_ttl_hours: u64,
    /// Origin allowed by CORS for the front-end bundle.
    pub site_origin: String,
    pub production: bool,
}

impl Config {
    /// Session cookies are only marked `Secure` in production so local http works.
    pub fn secure_cookies(&self) -> bool {
        self.production
    }

    /// Fixed configuration used by tests and local tooling.
    pub fn for_tests() -> Self {
        Self {
            port: 0,
            database_url: "postgres://localhost/bouwsite_test".into(),
            csrf_secret: "test-csrf-secret".into(),
            csrf_max_age_secs: 3600,
            session_secret: "test-session-secret".into(),
            session_ttl_hours: 168,
            site_origin: "http://localhost:3000".into(),
            production: false,
        }
    }
}

pub fn load() -> anyhow::Result<Config> {
    dotenvy::dotenv().ok();

    let production = std::env::var("BOUWSITE_ENV")
        .or_else(|_| std::env::var("RUST_ENV"))
        .map(|v| v == "production")
        .unwrap_or(false);

    let csrf_secret = secret_var("BOUWSITE_CSRF_SECRET", PLACEHOLDER_CSRF_SECRET, production)?;
    let session_secret =
        secret_var("BOUWSITE_SESSION_SECRET", PLACEHOLDER_SESSION_SECRET, production)?;

    Ok(Config {
        port: std::env::var("BOUWSITE_PORT")
            .unwrap_or_else(|_| "5000".into())
            .parse()
            .unwrap_or(5000),
        database_url: std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "postgres://localhost/bouwsite".into()),
        csrf_secret,
        csrf_max_age_secs: std::env::var("BOUWSITE_CSRF_MAX_AGE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3600),
        session_secret,
        session_ttl_hours: std::env::var("BOUWSITE_SESSION_TTL_HOURS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(168),
        site_origin: std::env::var("BOUWSITE_SITE_ORIGIN")
            .unwrap_or_else(|_| "http://localhost:3000".into()),
        production,
    })
}

fn secret_var(name: &str, placeholder: &str, production: bool) -> anyhow::Result<String> {
    let value = std::env::var(name).unwrap_or_else(|_| placeholder.to_string());
    if value == placeholder {
        if production {
            anyhow::bail!("{name} is still the insecure placeholder. Set a real secret before running in production.");
        }
        eprintln!("⚠️  {name} is not set, using insecure placeholder. Set it for production.");
    }
    Ok(value)
}
