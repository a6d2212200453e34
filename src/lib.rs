pub mod app;
pub mod config;
pub mod demo_seeder;
pub mod error;
pub mod db {
    pub mod blog_repository;
    pub mod cv_repository;
    pub mod memory;
    pub mod models;
    pub mod pagination;
    pub mod project_repository;
    pub mod query;
}
pub mod search {
    pub mod aggregator;
    pub mod models;
    pub mod normalize;
    pub mod scoring;
}
pub mod rendering {
    pub mod markdown;
    pub mod text;
}
pub mod api {
    pub mod content;
    pub mod errors;
    pub mod search;
}
