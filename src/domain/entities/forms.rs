use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use validator::{Validate, ValidateEmail, ValidationError};

use super::submission::{SubmissionInsert, SubmissionKind};

static CONTACT_PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9+()\-\s]{1,20}$").expect("valid phone regex"));
static SIGNUP_PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{10}$").expect("valid phone regex"));

/// Optional phone: digits, spaces and `+()-` only, at most 20 chars.
/// A blank value is treated as absent.
fn validate_contact_phone(phone: &str) -> Result<(), ValidationError> {
    if phone.trim().is_empty() || CONTACT_PHONE_RE.is_match(phone.trim()) {
        Ok(())
    } else {
        Err(ValidationError::new("phone_format"))
    }
}

fn validate_signup_phone(phone: &str) -> Result<(), ValidationError> {
    if SIGNUP_PHONE_RE.is_match(phone.trim()) {
        Ok(())
    } else {
        Err(ValidationError::new("phone_format"))
    }
}

/// Email syntax check on the trimmed value; surrounding whitespace is
/// stripped during normalization rather than rejected.
fn validate_email_format(email: &str) -> Result<(), ValidationError> {
    if email.trim().validate_email() {
        Ok(())
    } else {
        Err(ValidationError::new("email"))
    }
}

fn clean(value: &str) -> String {
    value.trim().to_string()
}

fn clean_optional(value: Option<String>) -> Option<String> {
    value.map(|s| clean(&s)).filter(|s| !s.is_empty())
}

fn normalize_email(value: &str) -> String {
    value.trim().to_lowercase()
}

#[derive(Debug, Deserialize, Validate)]
pub struct ContactForm {
    #[validate(
        required(message = "Name is required"),
        length(min = 1, max = 100, message = "Name must be 1-100 characters")
    )]
    pub name: Option<String>,

    #[validate(
        required(message = "Email is required"),
        length(max = 255, message = "Email must be at most 255 characters"),
        custom(function = "validate_email_format", message = "Invalid email format")
    )]
    pub email: Option<String>,

    #[validate(custom(
        function = "validate_contact_phone",
        message = "Phone may contain only digits, spaces, and + ( ) - up to 20 characters"
    ))]
    pub phone: Option<String>,

    #[validate(
        required(message = "Category is required"),
        length(min = 1, max = 100, message = "Category must be 1-100 characters")
    )]
    pub category: Option<String>,

    #[validate(
        required(message = "Age is required"),
        length(min = 1, max = 20, message = "Age must be 1-20 characters")
    )]
    pub age: Option<String>,

    #[validate(
        required(message = "Message is required"),
        length(min = 1, max = 2000, message = "Message must be 1-2000 characters")
    )]
    pub message: Option<String>,
}

impl ContactForm {
    pub fn into_insert(self, ip: Option<String>) -> SubmissionInsert {
        SubmissionInsert {
            kind: SubmissionKind::Contact,
            name: clean(&self.name.unwrap_or_default()),
            email: normalize_email(&self.email.unwrap_or_default()),
            phone: clean_optional(self.phone),
            category: clean_optional(self.category),
            message: clean_optional(self.message),
            age: clean_optional(self.age),
            source: None,
            ip,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct SubdomainContactForm {
    #[validate(
        required(message = "Name is required"),
        length(min = 1, max = 100, message = "Name must be 1-100 characters")
    )]
    pub name: Option<String>,

    #[validate(
        required(message = "Email is required"),
        length(max = 255, message = "Email must be at most 255 characters"),
        custom(function = "validate_email_format", message = "Invalid email format")
    )]
    pub email: Option<String>,

    #[validate(custom(
        function = "validate_contact_phone",
        message = "Phone may contain only digits, spaces, and + ( ) - up to 20 characters"
    ))]
    pub phone: Option<String>,
}

impl SubdomainContactForm {
    pub fn into_insert(self, ip: Option<String>) -> SubmissionInsert {
        SubmissionInsert {
            kind: SubmissionKind::SubdomainContact,
            name: clean(&self.name.unwrap_or_default()),
            email: normalize_email(&self.email.unwrap_or_default()),
            phone: clean_optional(self.phone),
            category: None,
            message: None,
            age: None,
            source: None,
            ip,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct SignupForm {
    #[validate(
        required(message = "Name is required"),
        length(min = 3, max = 100, message = "Name must be 3-100 characters")
    )]
    pub name: Option<String>,

    #[validate(
        required(message = "Email is required"),
        length(max = 255, message = "Email must be at most 255 characters"),
        custom(function = "validate_email_format", message = "Invalid email format")
    )]
    pub email: Option<String>,

    #[validate(
        required(message = "Phone is required"),
        custom(
            function = "validate_signup_phone",
            message = "Phone must be exactly 10 digits"
        )
    )]
    pub phone: Option<String>,

    #[validate(length(max = 100, message = "Source must be at most 100 characters"))]
    pub source: Option<String>,
}

impl SignupForm {
    pub fn into_insert(self, ip: Option<String>) -> SubmissionInsert {
        SubmissionInsert {
            kind: SubmissionKind::Signup,
            name: clean(&self.name.unwrap_or_default()),
            email: normalize_email(&self.email.unwrap_or_default()),
            phone: clean_optional(self.phone),
            category: None,
            message: None,
            age: None,
            source: clean_optional(self.source),
            ip,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_contact() -> ContactForm {
        ContactForm {
            name: Some("Jane Doe".into()),
            email: Some("jane@example.com".into()),
            phone: Some("+1 (555) 123-4567".into()),
            category: Some("General".into()),
            age: Some("34".into()),
            message: Some("Hello there".into()),
        }
    }

    #[test]
    fn valid_contact_form_passes() {
        assert!(valid_contact().validate().is_ok());
    }

    #[test]
    fn missing_required_fields_name_each_field() {
        let form = ContactForm {
            name: None,
            email: None,
            phone: None,
            category: None,
            age: None,
            message: None,
        };

        let errors = form.validate().unwrap_err();
        let fields = errors.field_errors();
        for field in ["name", "email", "category", "age", "message"] {
            assert!(fields.contains_key(field), "missing {field}");
        }
    }

    #[test]
    fn email_is_normalized_to_trimmed_lowercase() {
        let mut form = valid_contact();
        form.email = Some("Foo@EXAMPLE.com ".into());
        assert!(form.validate().is_ok());
        let insert = form.into_insert(None);
        assert_eq!(insert.email, "foo@example.com");
    }

    #[test]
    fn malformed_email_is_rejected() {
        let mut form = valid_contact();
        form.email = Some("not-an-address".into());
        let errors = form.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn contact_phone_rejects_letters() {
        let mut form = valid_contact();
        form.phone = Some("call me maybe".into());
        let errors = form.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("phone"));
    }

    #[test]
    fn contact_phone_blank_is_treated_as_absent() {
        let mut form = valid_contact();
        form.phone = Some("   ".into());
        assert!(form.validate().is_ok());
        assert_eq!(form.into_insert(None).phone, None);
    }

    #[test]
    fn signup_phone_must_be_ten_digits() {
        let form = SignupForm {
            name: Some("Jane Doe".into()),
            email: Some("jane@example.com".into()),
            phone: Some("123456789".into()),
            source: None,
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("phone"));

        let form = SignupForm {
            name: Some("Jane Doe".into()),
            email: Some("jane@example.com".into()),
            phone: Some("1234567890".into()),
            source: None,
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn signup_name_requires_three_characters() {
        let form = SignupForm {
            name: Some("Jo".into()),
            email: Some("jo@example.com".into()),
            phone: Some("1234567890".into()),
            source: None,
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn free_text_is_trimmed_on_conversion() {
        let mut form = valid_contact();
        form.name = Some("  Jane Doe  ".into());
        form.message = Some("  Hello there  ".into());
        let insert = form.into_insert(Some("203.0.113.9".into()));
        assert_eq!(insert.name, "Jane Doe");
        assert_eq!(insert.message.as_deref(), Some("Hello there"));
        assert_eq!(insert.ip.as_deref(), Some("203.0.113.9"));
    }
}
