use actix_web::{web, HttpResponse};

use crate::errors::AppError;
use crate::handlers::{home::home, system::health_check};

mod contact;
mod json_error;
mod signup;
mod subdomain_contact;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home);

    cfg.service(
        web::scope("/api")
            .configure(contact::config_routes)
            .configure(signup::config_routes),
    );

    cfg.configure(subdomain_contact::config_routes);

    cfg.service(web::scope("/admin").service(health_check));

    cfg.configure(json_error::config_routes);

    cfg.default_service(web::route().to(not_found));
}

async fn not_found() -> HttpResponse {
    AppError::NotFound("The requested resource does not exist".into()).to_http_response()
}
