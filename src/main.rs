use std::sync::Arc;

use actix_web::{App, HttpServer, middleware, web};

use gompa::archive::{ArchiveStore, SqliteArchiveStore};
use gompa::{db, handlers};
use gompa::view::HttpEventSource;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    // Ensure data directory exists
    std::fs::create_dir_all("data").expect("Failed to create data directory");

    let database_path =
        std::env::var("DATABASE_PATH").unwrap_or_else(|_| "data/app.db".to_string());
    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    let events_url = std::env::var("EVENTS_URL")
        .unwrap_or_else(|_| format!("http://{bind_addr}/api/events"));

    // Initialize database
    let pool = db::init_pool(&database_path);
    db::run_migrations(&pool);
    db::seed(&pool);

    // Store client and event source are owned here and handed to handlers
    // as injected data; no module-global clients.
    let store: Arc<dyn ArchiveStore> = Arc::new(SqliteArchiveStore::new(pool.clone()));
    let event_source = web::Data::new(HttpEventSource::new(events_url));

    log::info!("Starting server at http://{bind_addr}");

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::from(store.clone()))
            .app_data(event_source.clone())
            // Static files
            .service(actix_files::Files::new("/static", "./static"))
            // Root redirect
            .route("/", web::get().to(|| async {
                actix_web::HttpResponse::SeeOther()
                    .insert_header(("Location", "/events"))
                    .finish()
            }))
            // Events page
            .route("/events", web::get().to(handlers::event_handlers::page))
            // JSON APIs
            .route("/api/events", web::get().to(handlers::event_handlers::api_list))
            .route("/api/digital_archive", web::get().to(handlers::archive_handlers::list))
            // Default 404 handler (must be registered last)
            .default_service(web::to(|| async {
                let html = include_str!("../templates/errors/404.html");
                actix_web::HttpResponse::NotFound()
                    .content_type("text/html; charset=utf-8")
                    .body(html)
            }))
    })
    .bind(&bind_addr)?
    .run()
    .await
}
