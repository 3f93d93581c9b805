//! Social issue summary model.
//!
//! # Responsibility
//! - Describe one social issue as shown on cards and after a quiz.
//! - Derive URL-safe slugs from issue titles.
//!
//! # Invariants
//! - `slugify` is deterministic: equal titles always produce equal slugs.
//! - Severity only drives presentation, never business logic.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Ordinal classification of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    /// Stable string id used in serialized data.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Badge label shown on issue cards.
    pub fn label(self) -> &'static str {
        match self {
            Self::High => "Високий рівень",
            Self::Medium => "Середній рівень",
            Self::Low => "Низький рівень",
        }
    }

    /// Badge style class.
    pub fn badge_class(self) -> &'static str {
        match self {
            Self::High => "bg-red-100 text-red-800",
            Self::Medium => "bg-yellow-100 text-yellow-800",
            Self::Low => "bg-green-100 text-green-800",
        }
    }
}

/// Immutable summary of one social issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueSummary {
    pub title: String,
    pub description: String,
    pub category: String,
    pub severity: Severity,
    /// Optional cover image; cards render without one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl IssueSummary {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            category: category.into(),
            severity,
            image_url: None,
        }
    }

    pub fn with_image(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    /// Slug passed to "learn more" handlers.
    pub fn slug(&self) -> String {
        slugify(&self.title)
    }
}

/// Derives a slug: lowercase, whitespace runs collapsed to one `-`.
///
/// Leading and trailing whitespace is dropped. Titles differing only in
/// case or spacing collide; use [`SlugRegistry`] when uniqueness matters.
pub fn slugify(title: &str) -> String {
    title
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

/// Hands out slugs that are unique within one registry.
///
/// The first occurrence keeps the plain slug; repeats get `-2`, `-3`, ...
#[derive(Debug, Default)]
pub struct SlugRegistry {
    seen: HashMap<String, u32>,
}

impl SlugRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assign(&mut self, title: &str) -> String {
        let base = slugify(title);
        let count = self.seen.entry(base.clone()).or_insert(0);
        *count += 1;
        if *count == 1 {
            base
        } else {
            format!("{base}-{count}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{slugify, IssueSummary, Severity, SlugRegistry};

    #[test]
    fn slugify_lowercases_and_collapses_whitespace() {
        assert_eq!(slugify("Digital  Divide\tNow"), "digital-divide-now");
        assert_eq!(slugify("  Цифрова нерівність "), "цифрова-нерівність");
    }

    #[test]
    fn slug_registry_suffixes_collisions() {
        let mut registry = SlugRegistry::new();
        assert_eq!(registry.assign("Housing Crisis"), "housing-crisis");
        assert_eq!(registry.assign("housing  crisis"), "housing-crisis-2");
        assert_eq!(registry.assign("Other"), "other");
        assert_eq!(registry.assign("HOUSING CRISIS"), "housing-crisis-3");
    }

    #[test]
    fn severity_serializes_lowercase() {
        let issue = IssueSummary::new("t", "d", "c", Severity::Medium);
        let json = serde_json::to_value(&issue).expect("serialize issue");
        assert_eq!(json["severity"], "medium");
        assert!(json.get("imageUrl").is_none());
    }
}
