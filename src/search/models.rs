use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::db::models::{BlogPost, Cv, Project};

/// The content sources searched, in priority order.
///
/// The declaration order is the tie-break order of equally scored results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Blog,
    Project,
    Cv,
}

/// The `type` query parameter of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Blog,
    Project,
    Cv,
}

const ALL_KINDS: &[SourceKind] = &[SourceKind::Blog, SourceKind::Project, SourceKind::Cv];

impl TypeFilter {
    /// Parse the raw parameter. Missing or unrecognized values mean [`TypeFilter::All`].
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw {
            Some("blog") => TypeFilter::Blog,
            Some("project") => TypeFilter::Project,
            Some("cv") => TypeFilter::Cv,
            _ => TypeFilter::All,
        }
    }

    /// The source kinds this filter queries.
    pub fn kinds(self) -> &'static [SourceKind] {
        match self {
            TypeFilter::All => ALL_KINDS,
            TypeFilter::Blog => &[SourceKind::Blog],
            TypeFilter::Project => &[SourceKind::Project],
            TypeFilter::Cv => &[SourceKind::Cv],
        }
    }

    pub fn includes(self, kind: SourceKind) -> bool {
        self.kinds().contains(&kind)
    }
}

/// A matched record from one of the sources, before normalization.
#[derive(Debug, Clone)]
pub enum SourceRecord {
    Blog(BlogPost),
    Project(Project),
    Cv(Cv),
}

/// One entry of a search response.
///
/// `(kind, id)` identifies the result; ids alone repeat across kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: SourceKind,
    pub title: String,
    pub excerpt: String,
    pub url: String,
    /// Blog results only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    /// Project results only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technologies: Option<Vec<String>>,
    pub score: u32,
}

/// The body returned by the search endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
    pub total_results: usize,
}

impl SearchResponse {
    pub fn new(results: Vec<SearchResult>) -> Self {
        let total_results = results.len();
        Self {
            results,
            total_results,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }
}
