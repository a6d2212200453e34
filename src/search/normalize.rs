use crate::db::models::{BlogPost, Cv, Project};
use crate::rendering::text::{excerpt, EXCERPT_CHARS};
use crate::search::models::{SearchResult, SourceKind, SourceRecord};

/// Excerpt used for a CV without a body.
pub const CV_PLACEHOLDER_EXCERPT: &str = "CV content";

/// Builds absolute links to the public detail pages.
#[derive(Debug, Clone)]
pub struct LinkBuilder {
    base_url: String,
}

impl LinkBuilder {
    /// `base_url` is the public origin, e.g. `https://example.com`. A trailing
    /// slash is ignored.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn blog_post(&self, slug: &str) -> String {
        format!("{}/blog/{}", self.base_url, slug)
    }

    pub fn project(&self, id: i64) -> String {
        format!("{}/projects/{}", self.base_url, id)
    }

    /// All CVs share the single CV page.
    pub fn cv_index(&self) -> String {
        format!("{}/cv", self.base_url)
    }
}

impl SourceRecord {
    /// Map the record into the common result shape, with a zero score.
    pub fn into_result(self, links: &LinkBuilder) -> SearchResult {
        match self {
            SourceRecord::Blog(post) => from_blog_post(post, links),
            SourceRecord::Project(project) => from_project(project, links),
            SourceRecord::Cv(cv) => from_cv(cv, links),
        }
    }
}

pub fn from_blog_post(post: BlogPost, links: &LinkBuilder) -> SearchResult {
    let excerpt = match post.excerpt {
        Some(summary) if !summary.is_empty() => summary,
        _ => excerpt(&post.content, EXCERPT_CHARS),
    };

    SearchResult {
        id: post.id,
        kind: SourceKind::Blog,
        url: links.blog_post(&post.slug),
        title: post.title,
        excerpt,
        published_at: post.published_at,
        technologies: None,
        score: 0,
    }
}

pub fn from_project(project: Project, links: &LinkBuilder) -> SearchResult {
    SearchResult {
        id: project.id,
        kind: SourceKind::Project,
        url: links.project(project.id),
        excerpt: excerpt(&project.description, EXCERPT_CHARS),
        title: project.title,
        published_at: None,
        technologies: Some(project.technologies),
        score: 0,
    }
}

pub fn from_cv(cv: Cv, links: &LinkBuilder) -> SearchResult {
    let excerpt = match cv.content.as_deref() {
        Some(body) if !body.is_empty() => excerpt(body, EXCERPT_CHARS),
        _ => CV_PLACEHOLDER_EXCERPT.to_string(),
    };

    SearchResult {
        id: cv.id,
        kind: SourceKind::Cv,
        url: links.cv_index(),
        title: cv.title,
        excerpt,
        published_at: None,
        technologies: None,
        score: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn links() -> LinkBuilder {
        LinkBuilder::new("https://folio.example/")
    }

    fn post(excerpt: Option<&str>) -> BlogPost {
        BlogPost {
            id: 4,
            title: "Building Responsive UIs with Tailwind CSS".to_string(),
            slug: "building-responsive-uis".to_string(),
            content: "<p>This is a sample blog post about <em>Tailwind CSS</em>.</p>".to_string(),
            markdown_content: None,
            excerpt: excerpt.map(str::to_string),
            featured_image: None,
            is_published: true,
            published_at: Some(Utc::now()),
        }
    }

    #[test]
    fn test_blog_summary_preferred() {
        let result = from_blog_post(post(Some("Master responsive design")), &links());
        assert_eq!(result.excerpt, "Master responsive design");
        assert_eq!(result.kind, SourceKind::Blog);
        assert_eq!(result.url, "https://folio.example/blog/building-responsive-uis");
        assert!(result.published_at.is_some());
        assert!(result.technologies.is_none());
        assert_eq!(result.score, 0);
    }

    #[test]
    fn test_blog_empty_summary_falls_back_to_body() {
        for summary in [None, Some("")] {
            let result = from_blog_post(post(summary), &links());
            assert_eq!(
                result.excerpt,
                "This is a sample blog post about Tailwind CSS...."
            );
        }
    }

    #[test]
    fn test_project_copies_technologies() {
        let project = Project {
            id: 2,
            title: "E-commerce Platform".to_string(),
            description: "A full-featured <b>e-commerce</b> solution.".to_string(),
            markdown_content: None,
            technologies: vec!["Laravel".to_string(), "Vue.js".to_string()],
            image: None,
            live_url: None,
            github_url: None,
            is_featured: true,
            sort_order: 2,
        };
        let result = SourceRecord::Project(project).into_result(&links());
        assert_eq!(result.kind, SourceKind::Project);
        assert_eq!(result.url, "https://folio.example/projects/2");
        assert_eq!(result.excerpt, "A full-featured e-commerce solution....");
        assert_eq!(
            result.technologies,
            Some(vec!["Laravel".to_string(), "Vue.js".to_string()])
        );
        assert!(result.published_at.is_none());
    }

    #[test]
    fn test_cv_placeholder_and_shared_link() {
        let cv = |content: Option<&str>| Cv {
            id: 9,
            title: "Curriculum Vitae".to_string(),
            content: content.map(str::to_string),
            markdown_content: None,
            file_path: None,
            is_active: true,
        };

        let none = from_cv(cv(None), &links());
        assert_eq!(none.excerpt, CV_PLACEHOLDER_EXCERPT);
        assert_eq!(none.url, "https://folio.example/cv");

        let empty = from_cv(cv(Some("")), &links());
        assert_eq!(empty.excerpt, CV_PLACEHOLDER_EXCERPT);

        let body = from_cv(cv(Some("<h2>Experience</h2><p>Rust</p>")), &links());
        assert_eq!(body.excerpt, "ExperienceRust...");
    }
}
