//! Data models for CMS administration entities.
//!
//! These mirror the JSON shapes served by the admin API: the logged-in
//! user's profile plus the post and page listings.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: i64,
    pub username: String,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
}

impl Profile {
    /// Name to show in headers: display name when set, username otherwise.
    pub fn shown_name(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(&self.username)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(rename = "authorName", default)]
    pub author_name: Option<String>,
    #[serde(rename = "updatedAt", default)]
    pub updated_at: Option<String>,
}

impl Post {
    pub fn is_published(&self) -> bool {
        matches!(self.status.as_deref(), Some("published"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub id: i64,
    pub title: String,
    pub slug: String,
    #[serde(rename = "updatedAt", default)]
    pub updated_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_shown_name_falls_back_to_username() {
        let json = r#"{"id":1,"username":"admin","displayName":"","email":null,"role":"admin"}"#;
        let profile: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.shown_name(), "admin");

        let json = r#"{"id":1,"username":"admin","displayName":"Site Admin","email":null,"role":"admin"}"#;
        let profile: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.shown_name(), "Site Admin");
    }

    #[test]
    fn test_post_parses_with_missing_optionals() {
        let json = r#"{"id":7,"title":"Hello","slug":"hello"}"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert!(!post.is_published());
        assert_eq!(post.author_name, None);

        let json = r#"{"id":7,"title":"Hello","slug":"hello","status":"published","authorName":"admin","updatedAt":"2026-08-01T10:00:00Z"}"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert!(post.is_published());
    }
}
