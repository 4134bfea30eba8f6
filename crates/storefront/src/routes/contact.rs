//! Contact form route handlers.
//!
//! Submissions are forwarded to the backend, which notifies the store owner.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
};
use serde::Deserialize;
use tracing::instrument;

use super::is_valid_email;
use crate::backend::ContactSubmission;
use crate::state::AppState;

const MAX_MESSAGE_LEN: usize = 5000;

/// Contact form data.
#[derive(Debug, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub message: String,
}

impl ContactForm {
    /// Normalize and validate the form.
    ///
    /// # Errors
    ///
    /// Returns a message for the shopper when a field is invalid.
    pub fn validate(self) -> Result<ContactSubmission, &'static str> {
        let email = self.email.trim().to_lowercase();
        if !is_valid_email(&email) {
            return Err("Please enter a valid email address.");
        }

        let name = self.name.trim();
        let message = self.message.trim();
        if name.is_empty() || message.is_empty() {
            return Err("Name and message are required.");
        }
        if message.chars().count() > MAX_MESSAGE_LEN {
            return Err("Your message is too long.");
        }

        Ok(ContactSubmission {
            name: name.to_string(),
            email,
            phone: self
                .phone
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty()),
            message: message.to_string(),
        })
    }
}

/// Form outcome fragment (swapped into the form via HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/form_result.html")]
pub struct FormResultTemplate {
    pub success: bool,
    pub message: String,
}

impl FormResultTemplate {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Submit the contact form of a storefront.
///
/// Always answers with a fragment so HTMX swaps it in, including for
/// validation and backend failures.
#[instrument(skip(state, form), fields(email = %form.email))]
pub async fn submit(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Form(form): Form<ContactForm>,
) -> FormResultTemplate {
    let submission = match form.validate() {
        Ok(submission) => submission,
        Err(message) => return FormResultTemplate::failure(message),
    };

    match state.backend().submit_contact(&slug, &submission).await {
        Ok(()) => {
            tracing::info!(storefront = %slug, "Contact form submitted");
            FormResultTemplate::success("Thanks! We'll get back to you soon.")
        }
        Err(e) => {
            tracing::error!(storefront = %slug, error = %e, "Failed to submit contact form");
            FormResultTemplate::failure("Something went wrong. Please try again.")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, email: &str, phone: Option<&str>, message: &str) -> ContactForm {
        ContactForm {
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.map(String::from),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_validate_normalizes_fields() {
        let submission = form(" Sam ", " Sam@Example.COM ", Some("  "), " Hi there ")
            .validate()
            .unwrap_or_else(|e| panic!("unexpected rejection: {e}"));
        assert_eq!(submission.name, "Sam");
        assert_eq!(submission.email, "sam@example.com");
        assert_eq!(submission.phone, None);
        assert_eq!(submission.message, "Hi there");
    }

    #[test]
    fn test_validate_rejects_bad_input() {
        assert!(form("Sam", "nope", None, "Hi").validate().is_err());
        assert!(form(" ", "a@b.co", None, "Hi").validate().is_err());
        assert!(form("Sam", "a@b.co", None, "").validate().is_err());
        let long = "x".repeat(MAX_MESSAGE_LEN + 1);
        assert!(form("Sam", "a@b.co", None, &long).validate().is_err());
    }

    #[test]
    fn test_result_fragment() {
        let html = FormResultTemplate::failure("Please enter a valid email address.")
            .render()
            .unwrap_or_default();
        assert!(html.contains("form-error"));
        assert!(html.contains("valid email"));
    }
}
