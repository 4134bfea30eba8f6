//! Newsletter subscription route handlers.

use axum::{
    Form,
    extract::{Path, State},
};
use serde::Deserialize;
use tracing::instrument;

use super::contact::FormResultTemplate;
use super::is_valid_email;
use crate::backend::{BackendError, NewsletterSignup};
use crate::state::AppState;

/// Newsletter subscription form data.
#[derive(Debug, Deserialize)]
pub struct SubscribeForm {
    pub email: String,
}

/// Subscribe to a storefront's newsletter (HTMX).
///
/// An address that is already subscribed (409 from the backend) is reported
/// as a success.
#[instrument(skip(state), fields(email = %form.email))]
pub async fn subscribe(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Form(form): Form<SubscribeForm>,
) -> FormResultTemplate {
    let email = form.email.trim().to_lowercase();
    if !is_valid_email(&email) {
        return FormResultTemplate::failure("Please enter a valid email address.");
    }

    match state
        .backend()
        .subscribe_newsletter(&slug, &NewsletterSignup { email })
        .await
    {
        Ok(()) => {
            tracing::info!(storefront = %slug, "Newsletter signup");
            FormResultTemplate::success("You're subscribed. Welcome aboard!")
        }
        Err(BackendError::Status { status: 409, .. }) => {
            tracing::debug!(storefront = %slug, "Already subscribed");
            FormResultTemplate::success("You're already on the list.")
        }
        Err(e) => {
            tracing::error!(storefront = %slug, error = %e, "Newsletter signup failed");
            FormResultTemplate::failure("Something went wrong. Please try again.")
        }
    }
}
