use actix_web::web;

use crate::handlers::subdomain_contact;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/subdomain-contact")
            .service(
                web::resource("/submit")
                    .route(web::post().to(subdomain_contact::submit_subdomain_contact)),
            )
            .service(
                web::resource("/submissions")
                    .route(web::get().to(subdomain_contact::list_subdomain_submissions)),
            ),
    );
}
