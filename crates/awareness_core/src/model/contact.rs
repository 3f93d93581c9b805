//! Contact form model and field validation.
//!
//! # Responsibility
//! - Hold raw form input exactly as typed.
//! - Validate input into a typed `ContactSubmission` or field-level errors.
//!
//! # Invariants
//! - Validation never fails fast: every invalid field gets its own message.
//! - Length rules count Unicode scalar values, not bytes.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}$")
        .expect("valid email regex")
});

pub const NAME_MIN_CHARS: usize = 2;
pub const SUBJECT_MIN_CHARS: usize = 5;
pub const MESSAGE_MIN_CHARS: usize = 10;

/// Enumerated contact topics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactCategory {
    General,
    Feedback,
    Partnership,
    Support,
}

impl ContactCategory {
    pub const ALL: [ContactCategory; 4] = [
        Self::General,
        Self::Feedback,
        Self::Partnership,
        Self::Support,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Feedback => "feedback",
            Self::Partnership => "partnership",
            Self::Support => "support",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::General => "Загальні питання",
            Self::Feedback => "Відгук про платформу",
            Self::Partnership => "Партнерство",
            Self::Support => "Технічна підтримка",
        }
    }

    /// Parses a select value; the value must match exactly.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == value)
    }
}

/// Form fields, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContactField {
    Name,
    Email,
    Category,
    Subject,
    Message,
}

pub type FieldErrors = BTreeMap<ContactField, &'static str>;

/// Raw, unvalidated form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    /// Raw select value; empty until the user picks one.
    pub category: String,
}

/// Validated form payload ready for transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub category: ContactCategory,
}

impl ContactForm {
    pub fn set(&mut self, field: ContactField, value: impl Into<String>) {
        let value = value.into();
        match field {
            ContactField::Name => self.name = value,
            ContactField::Email => self.email = value,
            ContactField::Category => self.category = value,
            ContactField::Subject => self.subject = value,
            ContactField::Message => self.message = value,
        }
    }

    /// Validates every field.
    ///
    /// # Errors
    /// Returns one message per invalid field.
    pub fn validate(&self) -> Result<ContactSubmission, FieldErrors> {
        let mut errors = FieldErrors::new();

        if self.name.chars().count() < NAME_MIN_CHARS {
            errors.insert(
                ContactField::Name,
                "Ім'я повинно містити принаймні 2 символи",
            );
        }
        if !EMAIL_RE.is_match(&self.email) {
            errors.insert(ContactField::Email, "Введіть коректну електронну адресу");
        }
        if self.subject.chars().count() < SUBJECT_MIN_CHARS {
            errors.insert(
                ContactField::Subject,
                "Тема повинна містити принаймні 5 символів",
            );
        }
        if self.message.chars().count() < MESSAGE_MIN_CHARS {
            errors.insert(
                ContactField::Message,
                "Повідомлення повинно містити принаймні 10 символів",
            );
        }
        let category = ContactCategory::parse(&self.category);
        if category.is_none() {
            errors.insert(ContactField::Category, "Оберіть категорію");
        }

        match category {
            Some(category) if errors.is_empty() => Ok(ContactSubmission {
                name: self.name.clone(),
                email: self.email.clone(),
                subject: self.subject.clone(),
                message: self.message.clone(),
                category,
            }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ContactCategory, ContactField, ContactForm};

    fn valid_form() -> ContactForm {
        ContactForm {
            name: "Іван".to_string(),
            email: "ivan@example.com".to_string(),
            subject: "Питання".to_string(),
            message: "Хочу долучитися до проєкту".to_string(),
            category: "partnership".to_string(),
        }
    }

    #[test]
    fn valid_form_produces_submission() {
        let submission = valid_form().validate().expect("form should be valid");
        assert_eq!(submission.category, ContactCategory::Partnership);
        assert_eq!(submission.name, "Іван");
    }

    #[test]
    fn empty_form_reports_every_field() {
        let errors = ContactForm::default()
            .validate()
            .expect_err("empty form must fail");
        assert_eq!(errors.len(), 5);
        assert_eq!(errors[&ContactField::Category], "Оберіть категорію");
    }

    #[test]
    fn length_rules_count_characters_not_bytes() {
        let mut form = valid_form();
        // two Cyrillic letters are four bytes but still two characters
        form.name = "Ія".to_string();
        assert!(form.validate().is_ok());

        form.name = "І".to_string();
        let errors = form.validate().expect_err("one char name must fail");
        assert!(errors.contains_key(&ContactField::Name));
    }

    #[test]
    fn rejects_malformed_email_shapes() {
        for email in ["", "plain", "a@b", "a b@c.com", "@example.com", "a@.com"] {
            let mut form = valid_form();
            form.email = email.to_string();
            let errors = form.validate().expect_err("bad email must fail");
            assert!(errors.contains_key(&ContactField::Email), "{email}");
        }
    }

    #[test]
    fn category_must_be_exact_enum_value() {
        assert_eq!(ContactCategory::parse("support"), Some(ContactCategory::Support));
        assert_eq!(ContactCategory::parse("Support"), None);
        assert_eq!(ContactCategory::parse(""), None);
    }
}
