use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A blog post stored in the `blog_posts` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
    #[serde(rename = "_id")]
    pub id: i64,
    /// Human-readable title.
    pub title: String,
    /// URL-safe slug, unique per post.
    pub slug: String,
    /// HTML body.
    pub content: String,
    /// Optional Markdown source; preferred over `content` when rendering.
    #[serde(default)]
    pub markdown_content: Option<String>,
    /// Short summary shown in listings.
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub featured_image: Option<String>,
    #[serde(default)]
    pub is_published: bool,
    /// Publication time. Stored as a BSON date so range filters compare correctly.
    #[serde(default, with = "optional_bson_datetime")]
    pub published_at: Option<DateTime<Utc>>,
}

impl BlogPost {
    /// A post is public once it is flagged published and its publication time has passed.
    pub fn is_visible_at(&self, now: DateTime<Utc>) -> bool {
        self.is_published && self.published_at.is_some_and(|at| at <= now)
    }

    /// Case-insensitive substring match on title, body and summary.
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self.content.to_lowercase().contains(&needle)
            || self
                .excerpt
                .as_deref()
                .is_some_and(|e| e.to_lowercase().contains(&needle))
    }
}

/// A portfolio project stored in the `projects` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(rename = "_id")]
    pub id: i64,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub markdown_content: Option<String>,
    /// Technology tags, in display order.
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub live_url: Option<String>,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub is_featured: bool,
    /// Listing order, ascending.
    #[serde(default)]
    pub sort_order: i32,
}

impl Project {
    /// Case-insensitive substring match on title and description, or an
    /// exact (case-sensitive) match against one of the technology tags.
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
            || self.technologies.iter().any(|t| t == query)
    }
}

/// A CV stored in the `cvs` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cv {
    #[serde(rename = "_id")]
    pub id: i64,
    pub title: String,
    /// HTML body, if any.
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub markdown_content: Option<String>,
    /// Path of a downloadable file (PDF), if any.
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default)]
    pub is_active: bool,
}

impl Cv {
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self
                .content
                .as_deref()
                .is_some_and(|c| c.to_lowercase().contains(&needle))
    }
}

/// Serde adapter storing `Option<DateTime<Utc>>` as a native BSON date.
pub(crate) mod optional_bson_datetime {
    use bson::DateTime as BsonDateTime;
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => BsonDateTime::from_chrono(*dt).serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<BsonDateTime>::deserialize(deserializer)?.map(|dt| dt.to_chrono()))
    }
}
