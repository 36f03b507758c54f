use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum title length, in characters.
pub const TITLE_MAX_CHARS: usize = 200;

/// Maximum raw Markdown content length, in characters.
pub const CONTENT_MAX_CHARS: usize = 10_000;

/// Post entity - a blog post.
///
/// `content_html` is derived from `content` by the content pipeline at write
/// time and is never user-supplied. `id` is assigned by the storage layer;
/// `0` marks an entity that has not been persisted yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub content_html: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new, not-yet-persisted post.
    pub fn new(title: String, content: String, content_html: String) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            title,
            content,
            content_html,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace title and content wholesale and refresh `updated_at`.
    ///
    /// `created_at` and `id` stay untouched. The caller must pass the
    /// `content_html` rendered from the same `content` so the pair stays
    /// consistent.
    pub fn apply_edit(&mut self, title: String, content: String, content_html: String) {
        self.title = title;
        self.content = content;
        self.content_html = content_html;
        self.updated_at = Utc::now();
    }
}

/// User-supplied post fields, before validation and rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
}

impl PostDraft {
    pub fn new(title: String, content: String) -> Self {
        Self { title, content }
    }

    /// Check length bounds on title and content.
    ///
    /// Returns every violation, not just the first, so the client sees the
    /// full picture in one round trip. Bounds are counted in characters, not
    /// bytes.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.title.chars().count() == 0 {
            errors.push("title must not be empty".to_string());
        } else if self.title.chars().count() > TITLE_MAX_CHARS {
            errors.push(format!("title must be at most {TITLE_MAX_CHARS} characters"));
        }

        if self.content.chars().count() == 0 {
            errors.push("content must not be empty".to_string());
        } else if self.content.chars().count() > CONTENT_MAX_CHARS {
            errors.push(format!(
                "content must be at most {CONTENT_MAX_CHARS} characters"
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}
