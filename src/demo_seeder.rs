use chrono::{Duration, Utc};

use crate::app::AppState;
use crate::db::models::{BlogPost, Cv, Project};
use crate::error::AppError;

fn demo_posts() -> Vec<BlogPost> {
    let now = Utc::now();
    // Markdown bodies are embedded directly into the binary
    vec![
        BlogPost {
            id: 1,
            title: "Getting Started with Laravel and Inertia.js".to_string(),
            slug: "getting-started-with-laravel-and-inertia-js".to_string(),
            content: "<p>This is a sample blog post about Laravel and Inertia.js integration.</p>"
                .to_string(),
            markdown_content: Some(include_str!("../demo_data/laravel_inertia.md").to_string()),
            excerpt: Some(
                "Learn how to integrate Laravel with Inertia.js to build modern, full-stack web applications."
                    .to_string(),
            ),
            featured_image: None,
            is_published: true,
            published_at: Some(now),
        },
        BlogPost {
            id: 2,
            title: "Building Responsive UIs with Tailwind CSS".to_string(),
            slug: "building-responsive-uis-with-tailwind-css".to_string(),
            content: "<p>This is a sample blog post about Tailwind CSS.</p>".to_string(),
            markdown_content: Some(
                include_str!("../demo_data/tailwind_responsive.md").to_string(),
            ),
            excerpt: Some(
                "Master responsive design with Tailwind CSS and learn best practices for building modern user interfaces."
                    .to_string(),
            ),
            featured_image: None,
            is_published: true,
            published_at: Some(now - Duration::days(2)),
        },
        BlogPost {
            id: 3,
            title: "Database Design Principles for Web Applications".to_string(),
            slug: "database-design-principles-for-web-applications".to_string(),
            content: "<p>This is a sample blog post about database design.</p>".to_string(),
            markdown_content: Some(include_str!("../demo_data/database_design.md").to_string()),
            excerpt: None,
            featured_image: None,
            is_published: true,
            published_at: Some(now - Duration::days(8)),
        },
    ]
}

fn demo_projects() -> Vec<Project> {
    let tags = |names: &[&str]| names.iter().map(|n| n.to_string()).collect::<Vec<_>>();
    vec![
        Project {
            id: 1,
            title: "Personal Portfolio Website".to_string(),
            description:
                "A modern, responsive portfolio website built with Laravel, Inertia.js, and React."
                    .to_string(),
            markdown_content: Some(include_str!("../demo_data/portfolio_site.md").to_string()),
            technologies: tags(&["Laravel", "React", "TypeScript", "Tailwind CSS", "MySQL", "Docker"]),
            image: None,
            live_url: Some("https://example.com".to_string()),
            github_url: Some("https://github.com/example/portfolio".to_string()),
            is_featured: true,
            sort_order: 1,
        },
        Project {
            id: 2,
            title: "E-commerce Platform".to_string(),
            description: "A full-featured e-commerce solution with payment processing and inventory management."
                .to_string(),
            markdown_content: None,
            technologies: tags(&["Laravel", "Vue.js", "PostgreSQL", "Redis", "Stripe", "AWS"]),
            image: None,
            live_url: Some("https://shop.example.com".to_string()),
            github_url: Some("https://github.com/example/ecommerce".to_string()),
            is_featured: true,
            sort_order: 2,
        },
        Project {
            id: 3,
            title: "API Gateway Service".to_string(),
            description:
                "A microservices API gateway with authentication, rate limiting, and request routing."
                    .to_string(),
            markdown_content: Some(include_str!("../demo_data/api_gateway.md").to_string()),
            technologies: tags(&["Node.js", "Express", "Redis", "Docker", "Kubernetes"]),
            image: None,
            live_url: Some("https://api.example.com".to_string()),
            github_url: Some("https://github.com/example/api-gateway".to_string()),
            is_featured: false,
            sort_order: 3,
        },
    ]
}

fn demo_cvs() -> Vec<Cv> {
    vec![Cv {
        id: 1,
        title: "Curriculum Vitae".to_string(),
        content: Some(
            "<h2>Experience</h2><p>Full-stack developer building Laravel, React and Rust services.</p>"
                .to_string(),
        ),
        markdown_content: Some(include_str!("../demo_data/cv.md").to_string()),
        file_path: None,
        is_active: true,
    }]
}

fn log_outcome(kind: &str, id: i64, result: Result<(), AppError>) {
    match result {
        Ok(()) => tracing::info!("Seeded {kind} {id}."),
        Err(e) => tracing::error!("Failed to seed {kind} {id}: {e}"),
    }
}

/// Upsert the sample posts, projects and CV. Records are keyed by id, so
/// running this again overwrites rather than duplicates. Failures are logged
/// per record and never abort startup.
pub async fn seed_demo_data(state: &AppState) {
    tracing::info!("Starting demo data seeding...");

    for post in demo_posts() {
        let id = post.id;
        log_outcome("blog post", id, state.blog_repo.create_or_update(post).await);
    }

    for project in demo_projects() {
        let id = project.id;
        log_outcome("project", id, state.project_repo.create_or_update(project).await);
    }

    for cv in demo_cvs() {
        let id = cv.id;
        log_outcome("CV", id, state.cv_repo.create_or_update(cv).await);
    }

    tracing::info!("Demo data seeding completed.");
}
