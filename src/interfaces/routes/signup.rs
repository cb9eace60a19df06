use actix_web::web;

use crate::handlers::signup;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/signup")
            .service(web::resource("").route(web::post().to(signup::submit_signup)))
            .service(web::resource("/signups").route(web::get().to(signup::list_signups))),
    );
}
