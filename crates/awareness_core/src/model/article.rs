//! Educational article record served by the articles page.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub category: String,
    pub author: String,
    pub publish_date: NaiveDate,
    /// Estimated reading time in minutes.
    pub read_time: u32,
}

impl Article {
    /// Publish date in `DD.MM.YYYY` form.
    pub fn formatted_publish_date(&self) -> String {
        self.publish_date.format("%d.%m.%Y").to_string()
    }

    pub fn read_time_label(&self) -> String {
        format!("{} хв читання", self.read_time)
    }

    /// Case-insensitive substring match over title and excerpt.
    pub fn matches_search(&self, needle_lowercase: &str) -> bool {
        self.title.to_lowercase().contains(needle_lowercase)
            || self.excerpt.to_lowercase().contains(needle_lowercase)
    }
}
