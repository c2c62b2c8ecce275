use std::process;
use std::sync::Arc;

use tracing::{Dispatch, Level, dispatcher, error, info};
use tracing_subscriber::fmt as tracing_fmt;

use akademi::application::admin::pages::AdminContentPageService;
use akademi::application::admin::posts::AdminPostService;
use akademi::application::content::ContentService;
use akademi::application::error::AppError;
use akademi::application::events::EventService;
use akademi::application::repos::{
    CategoriesRepo, ContentPagesRepo, EventsRepo, FaqsRepo, HeroesRepo, PostsRepo, SettingsRepo,
};
use akademi::application::seed::Seeder;
use akademi::cache::{CacheConfig, ContentCache};
use akademi::config;
use akademi::infra::{
    db::PostgresRepositories,
    error::InfraError,
    http::{self, ApiState},
    telemetry,
};

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()
        .map_err(|err| AppError::unexpected(format!("failed to load configuration: {err}")))?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Serve(config::ServeArgs::default()));

    telemetry::init(&settings.logging).map_err(AppError::from)?;

    match command {
        config::Command::Serve(_) => run_serve(settings).await,
        config::Command::Seed(_) => run_seed(settings).await,
        config::Command::Migrate(_) => run_migrate(settings).await,
    }
}

async fn init_repositories(
    settings: &config::Settings,
) -> Result<Arc<PostgresRepositories>, AppError> {
    let database_url = settings
        .database
        .url
        .as_ref()
        .ok_or_else(|| InfraError::configuration("database url is not configured"))
        .map_err(AppError::from)?;

    let pool =
        PostgresRepositories::connect(database_url, settings.database.max_connections.get())
            .await
            .map_err(|err| AppError::from(InfraError::database(err.to_string())))?;

    PostgresRepositories::run_migrations(&pool)
        .await
        .map_err(|err| AppError::from(InfraError::database(err.to_string())))?;

    Ok(Arc::new(PostgresRepositories::new(pool)))
}

fn build_services(
    repositories: &Arc<PostgresRepositories>,
    settings: &config::Settings,
) -> (Arc<ContentService>, Arc<EventService>) {
    let cache = Arc::new(ContentCache::new(CacheConfig::from(&settings.cache)));

    let posts_repo: Arc<dyn PostsRepo> = repositories.clone();
    let categories_repo: Arc<dyn CategoriesRepo> = repositories.clone();
    let settings_repo: Arc<dyn SettingsRepo> = repositories.clone();
    let heroes_repo: Arc<dyn HeroesRepo> = repositories.clone();
    let faqs_repo: Arc<dyn FaqsRepo> = repositories.clone();
    let pages_repo: Arc<dyn ContentPagesRepo> = repositories.clone();
    let events_repo: Arc<dyn EventsRepo> = repositories.clone();

    let content = Arc::new(ContentService::new(
        posts_repo,
        categories_repo,
        settings_repo,
        heroes_repo,
        faqs_repo,
        pages_repo,
        cache.clone(),
    ));
    let events = Arc::new(EventService::new(
        events_repo,
        cache,
        settings.events.timezone,
        settings.events.public_page_size.get(),
    ));

    (content, events)
}

async fn run_serve(settings: config::Settings) -> Result<(), AppError> {
    let repositories = init_repositories(&settings).await?;
    let (content, events) = build_services(&repositories, &settings);

    let router = http::build_router(ApiState { content, events });

    let listener = tokio::net::TcpListener::bind(settings.server.addr)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;

    info!(addr = %settings.server.addr, "Serving content API");
    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|err| AppError::unexpected(format!("server error: {err}")))?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("Shutdown signal received");
}

async fn run_seed(settings: config::Settings) -> Result<(), AppError> {
    let repositories = init_repositories(&settings).await?;

    // Seeding bypasses the read path entirely; nothing is cached yet.
    let cache = Arc::new(ContentCache::disabled());
    let seeder = Seeder {
        categories: repositories.clone(),
        posts_writes: repositories.clone(),
        settings: repositories.clone(),
        heroes: repositories.clone(),
        faqs: repositories.clone(),
        post_admin: AdminPostService::new(repositories.clone(), cache.clone()),
        page_admin: AdminContentPageService::new(repositories.clone(), cache),
    };

    let summary = seeder.seed_site().await?;
    info!(
        categories = summary.categories,
        posts = summary.posts,
        pages = summary.pages,
        faqs = summary.faqs,
        "Seed finished"
    );
    Ok(())
}

async fn run_migrate(settings: config::Settings) -> Result<(), AppError> {
    init_repositories(&settings).await?;
    info!("Migrations applied");
    Ok(())
}
