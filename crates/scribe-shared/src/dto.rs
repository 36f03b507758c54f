//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

/// Request body for creating or fully replacing a post.
///
/// `content` is raw Markdown; the server derives the sanitized HTML itself
/// and never accepts it from the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostRequest {
    pub title: String,
    pub content: String,
}

/// A post as served by the API.
///
/// `content_html` is the precomputed sanitized rendering of `content` and is
/// safe to inject into the DOM verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub content_html: String,
    pub created_at: String,
    pub updated_at: String,
}
