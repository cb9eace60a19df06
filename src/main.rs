use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{http::header, middleware::NormalizePath, web, App, HttpServer};
use tracing_actix_web::TracingLogger;

use formdesk_backend::{
    background_task::start_sweep_task,
    graceful_shutdown::shutdown_signal,
    mail::transport::SmtpMailer,
    repositories::{memory::MemorySubmissionStore, submission::SubmissionStore},
    routes::configure_routes,
    settings::AppConfig,
    AppState,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt::init();

    let config = match AppConfig::new() {
        Ok(cfg) => {
            tracing::info!("Loaded configuration: {:?}", cfg);
            cfg
        }
        Err(e) => {
            tracing::error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let mailer = match SmtpMailer::from_config(&config.email) {
        Ok(mailer) => Arc::new(mailer),
        Err(e) => {
            tracing::error!("Mail transport error: {}", e);
            std::process::exit(1);
        }
    };

    let store: Arc<dyn SubmissionStore> = Arc::new(MemorySubmissionStore::new());

    let app_state = web::Data::new(AppState::new(&config, store.clone(), mailer));

    let server_addr = format!("{}:{}", config.host, config.port);

    tracing::info!(
        "Starting Formdesk API v{} on {}",
        env!("CARGO_PKG_VERSION"),
        server_addr
    );

    let cors_origins = config.cors_origins();
    let worker_count = config.worker_count;

    let server = HttpServer::new(move || {
        let mut cors = Cors::default()
            .allowed_methods(vec!["GET", "POST"])
            .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
            .max_age(3600);
        for origin in &cors_origins {
            cors = if origin == "*" {
                cors.allow_any_origin()
            } else {
                cors.allowed_origin(origin)
            };
        }

        App::new()
            .app_data(app_state.clone())
            .wrap(TracingLogger::default())
            .wrap(NormalizePath::trim())
            .wrap(cors)
            .configure(configure_routes)
    })
    .workers(worker_count)
    .bind(server_addr)?
    .run();

    tokio::spawn(start_sweep_task(store));

    tokio::select! {
        res = server => res,
        _ = shutdown_signal() => Ok(()),
    }
}
