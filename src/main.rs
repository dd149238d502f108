use actix_web::{web, App, HttpServer};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use orgdesk::bootstrap;
use orgdesk::config::Config;
use orgdesk::middleware::RequestId;
use orgdesk::modules::configure_api;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "orgdesk=debug,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().expect("Failed to load configuration");
    config.validate().expect("Configuration validation failed");

    tracing::info!("Starting orgdesk workforce directory API");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Server binding to: {}", config.server.bind_address());

    // Create database connection pool and bring the schema up to date
    let db_pool = config
        .database
        .create_pool()
        .await
        .expect("Failed to create database pool");
    bootstrap::run_migrations(&db_pool)
        .await
        .expect("Failed to run migrations");

    if config.app.seed_on_startup {
        bootstrap::seed_if_empty(
            &db_pool,
            config.app.seed_companies,
            config.app.seed_employees,
        )
        .await
        .expect("Failed to seed database");
    }

    // Start HTTP server
    let bind_address = config.server.bind_address();
    let workers = config.server.workers;
    let app_config = config.clone();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(db_pool.clone()))
            .app_data(web::Data::new(app_config.clone()))
            .wrap(TracingLogger::default())
            .wrap(RequestId)
            .configure(configure_api)
    })
    .workers(workers)
    .bind(&bind_address)?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await
}
