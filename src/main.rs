//! Vitrine - Personal site backend

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vitrine::{
    api::{self, AppState},
    config::Config,
    db::{
        self,
        repositories::{
            SqlxBlogPostRepository, SqlxContactSubmissionRepository,
            SqlxPortfolioProjectRepository, SqlxTagRepository, SqlxUserRepository,
        },
    },
    services::{AuthService, BlogService, ContactService, PortfolioService},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vitrine=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Vitrine backend...");

    // Load configuration
    let config = Config::load_with_env(Path::new("config.yml"))?;
    config.validate()?;
    tracing::info!("Configuration loaded");

    // Initialize database
    let pool = db::create_pool(&config.database).await?;
    tracing::info!("Database connected: {:?}", config.database.driver);

    // Run migrations
    db::migrations::run_migrations(&pool).await?;
    tracing::info!("Database migrations completed");

    // Create repositories
    let user_repo = SqlxUserRepository::boxed(pool.clone());
    let tag_repo = SqlxTagRepository::boxed(pool.clone());
    let blog_repo = SqlxBlogPostRepository::boxed(pool.clone());
    let portfolio_repo = SqlxPortfolioProjectRepository::boxed(pool.clone());
    let contact_repo = SqlxContactSubmissionRepository::boxed(pool.clone());

    // Initialize services
    let auth_service = Arc::new(AuthService::new(user_repo, &config.auth));
    let blog_service = Arc::new(BlogService::new(blog_repo, tag_repo));
    let portfolio_service = Arc::new(PortfolioService::new(portfolio_repo));
    let contact_service = Arc::new(ContactService::new(contact_repo));

    let state = AppState {
        auth_service,
        blog_service,
        portfolio_service,
        contact_service,
    };

    if config.auth.enable_registration {
        tracing::info!("Account registration enabled");
    }

    // Build router
    let app = api::build_router(state, config.auth.enable_registration);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
