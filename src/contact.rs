use std::time::Duration;

use futures_util::future::LocalBoxFuture;
use serde::Serialize;
use serde_json::json;

use crate::logging::{log_event, LogLevel};

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ContactError {
    #[error("{0} is required")]
    MissingField(Field),
    #[error("email address is not valid")]
    InvalidEmail,
    #[error("message could not be sent: {0}")]
    Transport(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Subject => "subject",
            Self::Message => "message",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Subject => self.subject = value,
            Field::Message => self.message = value,
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Subject => &self.subject,
            Field::Message => &self.message,
        }
    }

    pub fn validate(&self) -> Result<ContactMessage, ContactError> {
        for field in [Field::Name, Field::Email, Field::Subject, Field::Message] {
            if self.get(field).trim().is_empty() {
                return Err(ContactError::MissingField(field));
            }
        }

        let email = self.email.trim();
        if !looks_like_email(email) {
            return Err(ContactError::InvalidEmail);
        }

        Ok(ContactMessage {
            name: self.name.trim().to_owned(),
            email: email.to_owned(),
            subject: self.subject.trim().to_owned(),
            message: self.message.trim().to_owned(),
        })
    }
}

fn looks_like_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || value.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty() && !tld.is_empty() && !domain.contains('@')
}

/// Delivers a validated message somewhere outside the page.
pub trait ContactTransport {
    fn submit(&self, message: ContactMessage) -> LocalBoxFuture<'static, Result<(), ContactError>>;
}

/// Stands in for a mail endpoint: waits out a fixed round-trip, then succeeds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimulatedTransport {
    pub delay: Duration,
}

impl ContactTransport for SimulatedTransport {
    fn submit(&self, message: ContactMessage) -> LocalBoxFuture<'static, Result<(), ContactError>> {
        let delay = self.delay;
        Box::pin(async move {
            sleep(delay).await;
            log_event(
                LogLevel::Debug,
                "contact.delivered",
                json!({ "subject": message.subject, "bytes": message.message.len() }),
            );
            Ok(())
        })
    }
}

#[cfg(target_arch = "wasm32")]
async fn sleep(delay: Duration) {
    yew::platform::time::sleep(delay).await;
}

#[cfg(not(target_arch = "wasm32"))]
async fn sleep(delay: Duration) {
    tokio::time::sleep(delay).await;
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SubmitState {
    #[default]
    Idle,
    Submitting,
    Sent,
    Failed(String),
}

impl SubmitState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting)
    }
}

/// Validates and sends the form. Fields are cleared only when delivery succeeds.
pub async fn submit_form(
    form: &mut ContactForm,
    transport: &dyn ContactTransport,
) -> SubmitState {
    let message = match form.validate() {
        Ok(message) => message,
        Err(error) => return SubmitState::Failed(error.to_string()),
    };

    match transport.submit(message).await {
        Ok(()) => {
            log_event(LogLevel::Info, "contact.submitted", json!({}));
            *form = ContactForm::default();
            SubmitState::Sent
        }
        Err(error) => {
            log_event(
                LogLevel::Info,
                "contact.failed",
                json!({ "error": error.to_string() }),
            );
            SubmitState::Failed(error.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct RejectingTransport;

    impl ContactTransport for RejectingTransport {
        fn submit(&self, _message: ContactMessage) -> LocalBoxFuture<'static, Result<(), ContactError>> {
            Box::pin(async { Err(ContactError::Transport("mailbox full".to_string())) })
        }
    }

    fn filled() -> ContactForm {
        ContactForm {
            name: " Sam ".to_string(),
            email: "sam@example.com".to_string(),
            subject: "Hello".to_string(),
            message: "Loved the site.".to_string(),
        }
    }

    #[test]
    fn every_field_is_required() {
        for field in [Field::Name, Field::Email, Field::Subject, Field::Message] {
            let mut form = filled();
            form.set(field, "   ".to_string());
            assert_eq!(form.validate(), Err(ContactError::MissingField(field)));
        }
    }

    #[test]
    fn validation_trims_values() {
        let message = filled().validate().expect("form is complete");
        assert_eq!(message.name, "Sam");
    }

    #[test]
    fn email_shape_is_checked() {
        for email in ["sam", "sam@", "@example.com", "sam@example", "sam@@example.com", "s am@example.com"] {
            let mut form = filled();
            form.email = email.to_string();
            assert_eq!(form.validate(), Err(ContactError::InvalidEmail), "{email}");
        }
    }

    #[test]
    fn missing_field_message_names_the_field() {
        assert_eq!(
            ContactError::MissingField(Field::Subject).to_string(),
            "subject is required"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn simulated_submission_clears_the_form() {
        let mut form = filled();
        let transport = SimulatedTransport {
            delay: Duration::from_millis(1_500),
        };

        let state = submit_form(&mut form, &transport).await;

        assert_eq!(state, SubmitState::Sent);
        assert_eq!(form, ContactForm::default());
    }

    #[tokio::test]
    async fn failed_submission_keeps_the_fields() {
        let mut form = filled();

        let state = submit_form(&mut form, &RejectingTransport).await;

        assert_eq!(
            state,
            SubmitState::Failed("message could not be sent: mailbox full".to_string())
        );
        assert_eq!(form, filled());
    }

    #[tokio::test]
    async fn invalid_form_is_not_sent() {
        let mut form = ContactForm::default();

        let state = submit_form(&mut form, &RejectingTransport).await;

        assert_eq!(state, SubmitState::Failed("name is required".to_string()));
    }
}
