use actix_web::{get, HttpResponse, Responder};

#[get("/")]
pub async fn home() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "Formdesk form submission API",
        "status": "Ok",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "/api/contact/submit",
            "/api/signup",
            "/subdomain-contact/submit"
        ]
    }))
}
