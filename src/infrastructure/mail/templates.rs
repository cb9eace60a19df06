use ammonia::clean_text;

use crate::entities::submission::{Submission, SubmissionKind};

/// Escape user-supplied text for embedding in markup. Escaping happens here,
/// at the render boundary, regardless of what upstream validation did.
fn esc(value: &str) -> String {
    clean_text(value)
}

fn field_row(label: &str, value: &str) -> String {
    format!(
        r#"<tr><td style="padding:6px 12px;font-weight:bold;color:#555;">{}</td><td style="padding:6px 12px;">{}</td></tr>"#,
        label,
        esc(value)
    )
}

fn optional_row(label: &str, value: Option<&str>) -> String {
    value.map(|v| field_row(label, v)).unwrap_or_default()
}

fn html_document(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
</head>
<body style="margin:0;padding:0;background:#f4f4f4;font-family:Arial,Helvetica,sans-serif;color:#333;">
<div style="max-width:600px;margin:24px auto;background:#ffffff;border-radius:8px;overflow:hidden;">
{body}
<div style="padding:16px 24px;background:#fafafa;font-size:12px;color:#999;">
This is an automated message.
</div>
</div>
</body>
</html>"#,
        title = esc(title),
        body = body
    )
}

fn kind_heading(kind: SubmissionKind) -> &'static str {
    match kind {
        SubmissionKind::Contact => "New Contact Form Submission",
        SubmissionKind::SubdomainContact => "New Inquiry",
        SubmissionKind::Signup => "New Signup",
    }
}

/// Admin notification: every captured field in a table, plus diagnostics.
pub fn render_admin_notification(record: &Submission) -> String {
    let mut rows = String::new();
    rows.push_str(&field_row("Name", &record.name));
    rows.push_str(&field_row("Email", &record.email));
    rows.push_str(&optional_row("Phone", record.phone.as_deref()));
    rows.push_str(&optional_row("Category", record.category.as_deref()));
    rows.push_str(&optional_row("Age", record.age.as_deref()));
    rows.push_str(&optional_row("Message", record.message.as_deref()));
    rows.push_str(&optional_row("Source", record.source.as_deref()));
    rows.push_str(&optional_row("IP", record.ip.as_deref()));
    rows.push_str(&field_row(
        "Received",
        &record.date.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
    ));

    let heading = kind_heading(record.kind);
    let body = format!(
        r#"<div style="padding:16px 24px;background:#2c3e50;color:#ffffff;">
<h2 style="margin:0;font-size:18px;">{heading}</h2>
</div>
<table style="width:100%;border-collapse:collapse;font-size:14px;">
{rows}
</table>"#,
    );

    html_document(heading, &body)
}

/// Confirmation sent back to the submitter.
pub fn render_user_confirmation(record: &Submission) -> String {
    let (title, intro) = match record.kind {
        SubmissionKind::Contact | SubmissionKind::SubdomainContact => (
            "We received your message",
            "Thanks for getting in touch. Your message has been received and we will get back to you as soon as possible.",
        ),
        SubmissionKind::Signup => (
            "Welcome aboard",
            "Thanks for signing up. Your registration has been received and you will hear from us shortly.",
        ),
    };

    let body = format!(
        r#"<div style="padding:16px 24px;background:#2c3e50;color:#ffffff;">
<h2 style="margin:0;font-size:18px;">{title}</h2>
</div>
<div style="padding:24px;font-size:14px;line-height:1.6;">
<p>Hi {name},</p>
<p>{intro}</p>
<p>For your records, we received your submission on {date}.</p>
</div>"#,
        title = title,
        name = esc(&record.name),
        intro = intro,
        date = record.date.format("%Y-%m-%d %H:%M UTC"),
    );

    html_document(title, &body)
}
