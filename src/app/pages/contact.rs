use crate::utils::validation::is_plausible_email;
use serde::Serialize;
use std::time::{Duration, Instant};
use thiserror::Error;

pub const CONTACT_CONFIRMATION: Duration = Duration::from_secs(5);
pub const NEWSLETTER_CONFIRMATION: Duration = Duration::from_secs(3);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),
}

/// What the visitor sent, captured before the form is cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
}

/// Contact page form state. Name, email, subject and message are required;
/// phone is optional.
#[derive(Debug, Default)]
pub struct ContactForm {
    pub fields: ContactSubmission,
    submitted_at: Option<Instant>,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field by its input name. Unknown names are ignored.
    pub fn set(&mut self, field: &str, value: &str) {
        let slot = match field {
            "name" => &mut self.fields.name,
            "email" => &mut self.fields.email,
            "phone" => &mut self.fields.phone,
            "subject" => &mut self.fields.subject,
            "message" => &mut self.fields.message,
            _ => return,
        };
        *slot = value.to_string();
    }

    pub fn validate(&self) -> Vec<FormError> {
        let mut errors = Vec::new();
        let required = [
            ("name", &self.fields.name),
            ("email", &self.fields.email),
            ("subject", &self.fields.subject),
            ("message", &self.fields.message),
        ];
        for (label, value) in required {
            if value.trim().is_empty() {
                errors.push(FormError::Required(label));
            }
        }
        if !self.fields.email.trim().is_empty() && !is_plausible_email(&self.fields.email) {
            errors.push(FormError::InvalidEmail(self.fields.email.clone()));
        }
        errors
    }

    /// On success the fields are cleared and the confirmation starts showing.
    pub fn submit(&mut self, now: Instant) -> Result<ContactSubmission, Vec<FormError>> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(errors);
        }
        self.submitted_at = Some(now);
        Ok(std::mem::take(&mut self.fields))
    }

    pub fn confirmation_visible(&self, now: Instant) -> bool {
        self.submitted_at
            .is_some_and(|at| now.saturating_duration_since(at) < CONTACT_CONFIRMATION)
    }
}

#[derive(Debug, Default)]
pub struct NewsletterSignup {
    pub email: String,
    subscribed_at: Option<Instant>,
}

impl NewsletterSignup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the subscribed address with surrounding whitespace removed,
    /// as an email input reports it. Blank input is ignored.
    pub fn subscribe(&mut self, now: Instant) -> Option<String> {
        let email = self.email.trim();
        if email.is_empty() {
            return None;
        }
        let email = email.to_string();
        self.email.clear();
        self.subscribed_at = Some(now);
        Some(email)
    }

    pub fn confirmation_visible(&self, now: Instant) -> bool {
        self.subscribed_at
            .is_some_and(|at| now.saturating_duration_since(at) < NEWSLETTER_CONFIRMATION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ContactForm {
        let mut form = ContactForm::new();
        form.set("name", "Meera");
        form.set("email", "meera@example.com");
        form.set("subject", "Latch help");
        form.set("message", "Baby is 5 days old and feeds are painful.");
        form
    }

    #[test]
    fn test_submit_clears_and_confirms() {
        let mut form = filled();
        let now = Instant::now();
        let sent = form.submit(now).unwrap();
        assert_eq!(sent.name, "Meera");
        assert_eq!(sent.phone, "");
        assert_eq!(form.fields, ContactSubmission::default());

        assert!(form.confirmation_visible(now + Duration::from_secs(4)));
        assert!(!form.confirmation_visible(now + Duration::from_secs(5)));
    }

    #[test]
    fn test_required_fields() {
        let mut form = ContactForm::new();
        form.set("phone", "555-0100");
        let errors = form.submit(Instant::now()).unwrap_err();
        assert_eq!(
            errors,
            vec![
                FormError::Required("name"),
                FormError::Required("email"),
                FormError::Required("subject"),
                FormError::Required("message"),
            ]
        );
        assert_eq!(form.fields.phone, "555-0100");
        assert!(!form.confirmation_visible(Instant::now()));
    }

    #[test]
    fn test_invalid_email() {
        let mut form = filled();
        form.set("email", "meera-at-example");
        form.set("unknown", "ignored");
        assert_eq!(
            form.validate(),
            vec![FormError::InvalidEmail("meera-at-example".to_string())]
        );
    }

    #[test]
    fn test_newsletter() {
        let mut signup = NewsletterSignup::new();
        let now = Instant::now();
        assert_eq!(signup.subscribe(now), None);
        assert!(!signup.confirmation_visible(now));

        signup.email = "parent@example.com".to_string();
        assert_eq!(signup.subscribe(now).as_deref(), Some("parent@example.com"));
        assert!(signup.email.is_empty());
        assert!(signup.confirmation_visible(now + Duration::from_secs(2)));
        assert!(!signup.confirmation_visible(now + Duration::from_secs(3)));
    }

    #[test]
    fn test_newsletter_blank_and_padded_input() {
        let mut signup = NewsletterSignup::new();
        let now = Instant::now();
        signup.email = "   ".to_string();
        assert_eq!(signup.subscribe(now), None);
        assert_eq!(signup.email, "   ");
        assert!(!signup.confirmation_visible(now));

        signup.email = " parent@example.com ".to_string();
        assert_eq!(signup.subscribe(now).as_deref(), Some("parent@example.com"));
        assert!(signup.email.is_empty());
    }
}
