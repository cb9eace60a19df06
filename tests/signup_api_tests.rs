mod test_utils;

use std::sync::Arc;

use test_utils::{valid_signup_body, RecordingMailer, TestApp};

#[actix_rt::test]
async fn valid_signup_returns_200_and_appears_in_listing() {
    let mailer = Arc::new(RecordingMailer::default());
    let app = TestApp::spawn(mailer.clone()).await;

    let response = app
        .client
        .post(app.url("/api/signup"))
        .json(&valid_signup_body())
        .send()
        .await
        .expect("request failed");

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.expect("json body");
    assert_eq!(body["success"], true);
    let id = body["data"]["id"].as_str().expect("id in response").to_string();

    let listing: serde_json::Value = app
        .client
        .get(app.url("/api/signup/signups"))
        .send()
        .await
        .expect("listing request failed")
        .json()
        .await
        .expect("listing json");

    assert_eq!(listing["count"], 1);
    assert_eq!(listing["data"][0]["id"], id.as_str());

    // welcome email went to the signer-up
    assert_eq!(mailer.sent_to("jane@example.com").len(), 1);
}

#[actix_rt::test]
async fn signup_name_shorter_than_three_chars_is_rejected() {
    let app = TestApp::spawn(Arc::new(RecordingMailer::default())).await;

    let mut body = valid_signup_body();
    body["name"] = serde_json::json!("Jo");

    let response = app
        .client
        .post(app.url("/api/signup"))
        .json(&body)
        .send()
        .await
        .expect("request failed");

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.expect("json body");
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .expect("errors array")
        .iter()
        .filter_map(|e| e["field"].as_str())
        .collect();
    assert!(fields.contains(&"name"));
}

#[actix_rt::test]
async fn signup_phone_must_be_exactly_ten_digits() {
    let app = TestApp::spawn(Arc::new(RecordingMailer::default())).await;

    for bad_phone in ["123", "12345678901", "555-123-456"] {
        let mut body = valid_signup_body();
        body["phone"] = serde_json::json!(bad_phone);

        let response = app
            .client
            .post(app.url("/api/signup"))
            .json(&body)
            .send()
            .await
            .expect("request failed");

        assert_eq!(response.status().as_u16(), 400, "phone {:?} should fail", bad_phone);
    }
}

#[actix_rt::test]
async fn signups_are_not_rate_limited() {
    let app = TestApp::spawn(Arc::new(RecordingMailer::default())).await;

    for i in 0..6 {
        let mut body = valid_signup_body();
        body["email"] = serde_json::json!(format!("user{}@example.com", i));

        let response = app
            .client
            .post(app.url("/api/signup"))
            .json(&body)
            .send()
            .await
            .expect("request failed");
        assert_eq!(response.status().as_u16(), 200, "signup {} should pass", i + 1);
    }
}
