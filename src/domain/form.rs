//! Contact Form
//!
//! Per-profile form with a fixed set of optional fields, plus the
//! submissions visitors send through it.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use super::entity::{DomainError, DomainResult, Entity};

/// The fields a contact form can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormFieldKind {
    Name,
    Email,
    Subject,
    Phone,
    Message,
}

impl FormFieldKind {
    pub const ALL: [FormFieldKind; 5] = [
        FormFieldKind::Name,
        FormFieldKind::Email,
        FormFieldKind::Subject,
        FormFieldKind::Phone,
        FormFieldKind::Message,
    ];

    /// Label used when the owner did not set a custom one
    pub fn default_label(&self) -> &'static str {
        match self {
            FormFieldKind::Name => "Name",
            FormFieldKind::Email => "Email",
            FormFieldKind::Subject => "Subject",
            FormFieldKind::Phone => "Phone",
            FormFieldKind::Message => "Message",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormFieldSettings {
    #[serde(default)]
    pub enabled: bool,
    /// Custom label, falls back to the field's default
    pub label: Option<String>,
    #[serde(default)]
    pub required: bool,
}

impl FormFieldSettings {
    fn shown() -> Self {
        Self {
            enabled: true,
            label: None,
            required: false,
        }
    }
}

/// One settings entry per `FormFieldKind`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormFields {
    pub name: FormFieldSettings,
    pub email: FormFieldSettings,
    pub subject: FormFieldSettings,
    pub phone: FormFieldSettings,
    pub message: FormFieldSettings,
}

impl Default for FormFields {
    /// New forms ask for name, email and message
    fn default() -> Self {
        Self {
            name: FormFieldSettings::shown(),
            email: FormFieldSettings::shown(),
            subject: FormFieldSettings::default(),
            phone: FormFieldSettings::default(),
            message: FormFieldSettings::shown(),
        }
    }
}

impl FormFields {
    pub fn get(&self, kind: FormFieldKind) -> &FormFieldSettings {
        match kind {
            FormFieldKind::Name => &self.name,
            FormFieldKind::Email => &self.email,
            FormFieldKind::Subject => &self.subject,
            FormFieldKind::Phone => &self.phone,
            FormFieldKind::Message => &self.message,
        }
    }

    pub fn enabled(&self) -> Vec<FormFieldKind> {
        FormFieldKind::ALL
            .into_iter()
            .filter(|kind| self.get(*kind).enabled)
            .collect()
    }

    pub fn label(&self, kind: FormFieldKind) -> String {
        self.get(kind)
            .label
            .clone()
            .filter(|l| !l.trim().is_empty())
            .unwrap_or_else(|| kind.default_label().to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactForm {
    pub profile_id: u32,
    pub fields: FormFields,
    pub title: Option<String>,
    pub submit_button_text: Option<String>,
    pub success_message: Option<String>,
    pub accepting_submissions: bool,
}

impl ContactForm {
    pub fn new(profile_id: u32) -> Self {
        Self {
            profile_id,
            fields: FormFields::default(),
            title: None,
            submit_button_text: None,
            success_message: None,
            accepting_submissions: true,
        }
    }

    /// Keep only enabled fields and enforce required ones.
    ///
    /// Blank values count as missing.
    pub fn accept(&self, input: &SubmissionValues) -> DomainResult<SubmissionValues> {
        if !self.accepting_submissions {
            return Err(DomainError::Conflict(
                "This form is not accepting submissions right now".to_string(),
            ));
        }

        let mut accepted = SubmissionValues::default();
        for kind in FormFieldKind::ALL {
            let settings = self.fields.get(kind);
            if !settings.enabled {
                continue;
            }

            let value = input
                .get(kind)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty());

            if settings.required && value.is_none() {
                return Err(DomainError::Validation(format!(
                    "{} is required",
                    self.fields.label(kind)
                )));
            }
            if kind == FormFieldKind::Email {
                if let Some(email) = &value {
                    validate_email(email)?;
                }
            }
            accepted.set(kind, value);
        }

        if accepted.is_empty() {
            return Err(DomainError::Validation("Submission is empty".to_string()));
        }
        Ok(accepted)
    }
}

impl Entity for ContactForm {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.profile_id
    }
}

/// Values of a submission, one optional entry per field
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionValues {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub phone: Option<String>,
    pub message: Option<String>,
}

impl SubmissionValues {
    pub fn get(&self, kind: FormFieldKind) -> Option<&String> {
        match kind {
            FormFieldKind::Name => self.name.as_ref(),
            FormFieldKind::Email => self.email.as_ref(),
            FormFieldKind::Subject => self.subject.as_ref(),
            FormFieldKind::Phone => self.phone.as_ref(),
            FormFieldKind::Message => self.message.as_ref(),
        }
    }

    pub fn set(&mut self, kind: FormFieldKind, value: Option<String>) {
        match kind {
            FormFieldKind::Name => self.name = value,
            FormFieldKind::Email => self.email = value,
            FormFieldKind::Subject => self.subject = value,
            FormFieldKind::Phone => self.phone = value,
            FormFieldKind::Message => self.message = value,
        }
    }

    pub fn is_empty(&self) -> bool {
        FormFieldKind::ALL.iter().all(|kind| self.get(*kind).is_none())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSubmission {
    pub id: u32,
    pub profile_id: u32,
    #[serde(flatten)]
    pub values: SubmissionValues,
    /// Unix millis
    pub sent_at: i64,
}

impl Entity for FormSubmission {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"))
}

pub fn validate_email(email: &str) -> DomainResult<()> {
    if email_pattern().is_match(email) {
        Ok(())
    } else {
        Err(DomainError::Validation(format!("Invalid email: {}", email)))
    }
}
