use actix_web::{web, HttpRequest, HttpResponse, Responder};

use crate::{
    constants::RATE_LIMIT_MESSAGE,
    entities::forms::ContactForm,
    entities::submission::SubmissionKind,
    errors::AppError,
    utils::get_client_ip::get_client_ip,
    AppState,
};

pub async fn submit_contact(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Json<ContactForm>,
) -> Result<impl Responder, AppError> {
    let ip = get_client_ip(&req, state.trust_x_forwarded_for);

    if !state.limiter.is_allowed(&ip) {
        return Err(AppError::RateLimited(RATE_LIMIT_MESSAGE.into()));
    }

    let response = state
        .submissions
        .submit_contact(form.into_inner(), Some(ip))
        .await?;

    Ok(HttpResponse::Ok().json(response))
}

pub async fn list_contact_submissions(
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let response = state.submissions.list(SubmissionKind::Contact).await?;
    Ok(HttpResponse::Ok().json(response))
}
