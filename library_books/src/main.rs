use std::sync::Arc;

use actix_web::web::Data;
use actix_web::{App, HttpServer};
use anyhow::Context;
use paperclip::actix::OpenApiExt;
use tracing_actix_web::TracingLogger;

use library_books::app_config::{config_app, json_config};
use library_books::book_service::BookService;
use library_books::books_repository::{
    BookRepository, InMemoryBookRepository, PostgresBooksRepository,
    PostgresBooksRepositoryConfig,
};
use library_books::settings::Settings;
use library_books::telemetry::{init_telemetry, shutdown_telemetry};
use library_books::validation::BookRequestValidator;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("Failed to load settings")?;
    init_telemetry(&settings.telemetry)?;

    let validator = BookRequestValidator::new(&settings.validation.isbn_pattern)
        .context("Invalid isbn pattern")?;

    let books_repository: Arc<dyn BookRepository> = if settings.database.use_in_memory_db {
        tracing::info!("Using in memory books repository");
        Arc::new(InMemoryBookRepository::default())
    } else {
        Arc::new(
            PostgresBooksRepository::init(PostgresBooksRepositoryConfig {
                hostname: settings.database.hostname.clone(),
                username: settings.database.username.clone(),
                password: settings.database.password.clone(),
            })
            .await
            .context("Failed to init postgres")?,
        )
    };
    let book_service = BookService::new(books_repository);

    tracing::info!(
        "starting HTTP server at http://{}:{}",
        settings.server.host,
        settings.server.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap_api()
            .app_data(Data::new(book_service.clone()))
            .app_data(Data::new(validator.clone()))
            .app_data(json_config())
            .wrap(TracingLogger::default())
            .configure(config_app)
            .with_json_spec_at("/apispec/v2")
            .build()
    })
    .bind((settings.server.host.as_str(), settings.server.port))?
    .run()
    .await?;

    shutdown_telemetry();
    Ok(())
}
