//! Articles listing with search and category filter.
//!
//! # Responsibility
//! - Load articles once from an injected source.
//! - Derive category options and the filtered list from local input.
//!
//! # Invariants
//! - Category options start with `all`, then distinct categories in
//!   first-seen order.
//! - Filtering never refetches; it only reads the loaded list.

use crate::content::mock_articles;
use crate::model::article::Article;
use log::info;
use std::thread;
use std::time::{Duration, Instant};

/// Category option that disables category filtering.
pub const ALL_CATEGORIES: &str = "all";
/// Simulated fetch latency of the built-in source.
pub const DEFAULT_FETCH_LATENCY: Duration = Duration::from_millis(1_000);

/// Supplier of the article catalog.
pub trait ArticleSource {
    fn fetch_articles(&self) -> Vec<Article>;
}

/// Built-in catalog served after a fixed, non-cancellable delay.
#[derive(Debug, Clone)]
pub struct MockArticleSource {
    latency: Duration,
    articles: Vec<Article>,
}

impl MockArticleSource {
    pub fn new(latency: Duration) -> Self {
        Self::with_articles(latency, mock_articles())
    }

    pub fn with_articles(latency: Duration, articles: Vec<Article>) -> Self {
        Self { latency, articles }
    }
}

impl Default for MockArticleSource {
    fn default() -> Self {
        Self::new(DEFAULT_FETCH_LATENCY)
    }
}

impl ArticleSource for MockArticleSource {
    fn fetch_articles(&self) -> Vec<Article> {
        if !self.latency.is_zero() {
            thread::sleep(self.latency);
        }
        self.articles.clone()
    }
}

/// What the page renders.
#[derive(Debug, PartialEq, Eq)]
pub enum ArticlesView<'a> {
    Loading,
    /// The catalog itself is empty.
    Empty,
    /// Articles exist but none match the current filter.
    NoMatches,
    List(Vec<&'a Article>),
}

/// Articles page state.
#[derive(Debug, Clone)]
pub struct ArticlesPage {
    articles: Option<Vec<Article>>,
    selected_category: String,
    search_term: String,
}

impl Default for ArticlesPage {
    fn default() -> Self {
        Self {
            articles: None,
            selected_category: ALL_CATEGORIES.to_string(),
            search_term: String::new(),
        }
    }
}

impl ArticlesPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches the catalog; blocks for the source latency.
    pub fn load(&mut self, source: &impl ArticleSource) {
        let started_at = Instant::now();
        let articles = source.fetch_articles();
        info!(
            "event=articles_load module=articles status=ok count={} duration_ms={}",
            articles.len(),
            started_at.elapsed().as_millis()
        );
        self.articles = Some(articles);
    }

    pub fn is_loading(&self) -> bool {
        self.articles.is_none()
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn select_category(&mut self, category: impl Into<String>) {
        self.selected_category = category.into();
    }

    pub fn selected_category(&self) -> &str {
        &self.selected_category
    }

    /// Category options for the select control.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories = vec![ALL_CATEGORIES];
        for article in self.articles.iter().flatten() {
            if !categories.contains(&article.category.as_str()) {
                categories.push(article.category.as_str());
            }
        }
        categories
    }

    /// Display label of a category option.
    pub fn category_label(category: &str) -> &str {
        if category == ALL_CATEGORIES {
            "Всі категорії"
        } else {
            category
        }
    }

    /// Articles matching both the category and the search term.
    pub fn filtered(&self) -> Vec<&Article> {
        let needle = self.search_term.to_lowercase();
        self.articles
            .iter()
            .flatten()
            .filter(|article| {
                self.selected_category == ALL_CATEGORIES
                    || article.category == self.selected_category
            })
            .filter(|article| article.matches_search(&needle))
            .collect()
    }

    pub fn view(&self) -> ArticlesView<'_> {
        match &self.articles {
            None => ArticlesView::Loading,
            Some(articles) if articles.is_empty() => ArticlesView::Empty,
            Some(_) => {
                let filtered = self.filtered();
                if filtered.is_empty() {
                    ArticlesView::NoMatches
                } else {
                    ArticlesView::List(filtered)
                }
            }
        }
    }
}
