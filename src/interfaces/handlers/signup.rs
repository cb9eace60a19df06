use actix_web::{web, HttpRequest, HttpResponse, Responder};

use crate::{
    entities::forms::SignupForm,
    entities::submission::SubmissionKind,
    errors::AppError,
    utils::get_client_ip::get_client_ip,
    AppState,
};

pub async fn submit_signup(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Json<SignupForm>,
) -> Result<impl Responder, AppError> {
    let ip = get_client_ip(&req, state.trust_x_forwarded_for);

    let response = state
        .submissions
        .submit_signup(form.into_inner(), Some(ip))
        .await?;

    Ok(HttpResponse::Ok().json(response))
}

pub async fn list_signups(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let response = state.submissions.list(SubmissionKind::Signup).await?;
    Ok(HttpResponse::Ok().json(response))
}
