use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bouwsite::auth::password::hash_password;
use bouwsite::cli::{self, AdminCommands};
use bouwsite::models::user::{NewUser, ROLE_ADMIN};
use bouwsite::store::postgres::PgStore;
use bouwsite::store::ContentStore;
use bouwsite::{build_app, config, jobs, AppState};

/// Shortest password `admin create` accepts.
const MIN_PASSWORD_LEN: usize = 8;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Export spans over OTLP only when a collector endpoint is configured.
    use opentelemetry::KeyValue;
    use opentelemetry_sdk::{trace as sdktrace, Resource};

    let telemetry_layer = if std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT").is_ok() {
        let tracer = opentelemetry_otlp::new_pipeline()
            .tracing()
            .with_exporter(opentelemetry_otlp::new_exporter().tonic())
            .with_trace_config(sdktrace::config().with_resource(Resource::new(vec![
                KeyValue::new("service.name", "bouwsite"),
            ])))
            .install_batch(opentelemetry_sdk::runtime::Tokio)
            .context("failed to install OpenTelemetry tracer")?;
        Some(tracing_opentelemetry::layer().with_tracer(tracer))
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "bouwsite=debug,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .with(telemetry_layer)
        .init();

    let cfg = config::load()?;
    let args = cli::Cli::parse();

    let result = match args.command {
        Some(cli::Commands::Serve { port }) => {
            let port = port.unwrap_or(cfg.port);
            run_server(cfg, port).await
        }
        Some(cli::Commands::Migrate) => {
            let db = PgStore::connect(&cfg.database_url).await?;
            db.migrate().await?;
            tracing::info!("Migrations applied");
            Ok(())
        }
        Some(cli::Commands::Admin { command }) => {
            let db = PgStore::connect(&cfg.database_url).await?;
            handle_admin_command(&db, command).await
        }
        None => {
            let port = cfg.port;
            run_server(cfg, port).await
        }
    };

    if let Err(ref e) = result {
        eprintln!("Error: {:?}", e);
    }
    result
}

async fn run_server(cfg: config::Config, port: u16) -> anyhow::Result<()> {
    tracing::info!("Connecting to database...");
    let db = PgStore::connect(&cfg.database_url)
        .await
        .context("failed to connect to database")?;

    tracing::info!("Running migrations...");
    db.migrate().await?;

    let state = Arc::new(AppState::new(Arc::new(db), cfg));
    let app = build_app(state.clone());

    jobs::cleanup::spawn(state.limiter.clone());
    tracing::info!("Background cleanup job started (rate-limit sweep every 60s)");

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("bouwsite listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

async fn handle_admin_command(db: &PgStore, cmd: AdminCommands) -> anyhow::Result<()> {
    match cmd {
        AdminCommands::Create {
            email,
            password,
            first_name,
            last_name,
        } => {
            let email = email.trim().to_lowercase();
            if !email.contains('@') {
                anyhow::bail!("'{}' is not an email address", email);
            }
            if password.len() < MIN_PASSWORD_LEN {
                anyhow::bail!("password must be at least {} characters", MIN_PASSWORD_LEN);
            }
            if db.user_by_email(&email).await?.is_some() {
                anyhow::bail!("a user with email {} already exists", email);
            }

            let user = db
                .create_user(&NewUser {
                    email,
                    password_hash: hash_password(&password).await?,
                    first_name,
                    last_name,
                    role: ROLE_ADMIN.to_string(),
                })
                .await?;

            println!("Created admin {} ({})", user.email, user.id);
        }
    }
    Ok(())
}
