mod test_utils;

use std::sync::Arc;

use test_utils::{RecordingMailer, TestApp};

fn valid_body() -> serde_json::Value {
    serde_json::json!({
        "name": "Jane Doe",
        "email": "jane@example.com"
    })
}

#[actix_rt::test]
async fn valid_submission_without_phone_is_accepted() {
    let mailer = Arc::new(RecordingMailer::default());
    let app = TestApp::spawn(mailer.clone()).await;

    let response = app
        .client
        .post(app.url("/subdomain-contact/submit"))
        .json(&valid_body())
        .send()
        .await
        .expect("request failed");

    assert_eq!(response.status().as_u16(), 200);

    let listing: serde_json::Value = app
        .client
        .get(app.url("/subdomain-contact/submissions"))
        .send()
        .await
        .expect("listing request failed")
        .json()
        .await
        .expect("listing json");

    assert_eq!(listing["count"], 1);
    // no phone was given, so none is stored
    assert!(listing["data"][0].get("phone").is_none());
}

#[actix_rt::test]
async fn invalid_phone_charset_is_rejected() {
    let app = TestApp::spawn(Arc::new(RecordingMailer::default())).await;

    let mut body = valid_body();
    body["phone"] = serde_json::json!("call me maybe");

    let response = app
        .client
        .post(app.url("/subdomain-contact/submit"))
        .json(&body)
        .send()
        .await
        .expect("request failed");

    assert_eq!(response.status().as_u16(), 400);
}

#[actix_rt::test]
async fn sixth_request_within_window_is_rate_limited() {
    let app = TestApp::spawn(Arc::new(RecordingMailer::default())).await;

    for _ in 0..5 {
        let response = app
            .client
            .post(app.url("/subdomain-contact/submit"))
            .json(&valid_body())
            .send()
            .await
            .expect("request failed");
        assert_eq!(response.status().as_u16(), 200);
    }

    let response = app
        .client
        .post(app.url("/subdomain-contact/submit"))
        .json(&valid_body())
        .send()
        .await
        .expect("request failed");

    assert_eq!(response.status().as_u16(), 429);
}
