use actix_web::web;

use crate::handlers::contact;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/contact")
            .service(web::resource("/submit").route(web::post().to(contact::submit_contact)))
            .service(
                web::resource("/submissions")
                    .route(web::get().to(contact::list_contact_submissions)),
            ),
    );
}
