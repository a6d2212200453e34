//! In-memory content store.
//!
//! Implements all three repository traits over `Vec`s behind `RwLock`s, with
//! the same filtering and ordering rules as the MongoDB repositories. Used
//! when `storage.backend = "memory"` and by the integration tests.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::db::blog_repository::BlogPostRepository;
use crate::db::cv_repository::CvRepository;
use crate::db::models::{BlogPost, Cv, Project};
use crate::db::pagination::{Page, PageRequest};
use crate::db::project_repository::ProjectRepository;
use crate::error::AppError;

/// In-memory store for all content kinds. Records keep insertion order.
#[derive(Default)]
pub struct InMemoryContentStore {
    posts: RwLock<Vec<BlogPost>>,
    projects: RwLock<Vec<Project>>,
    cvs: RwLock<Vec<Cv>>,
}

impl InMemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn read<T>(lock: &RwLock<T>) -> Result<RwLockReadGuard<'_, T>, AppError> {
    lock.read()
        .map_err(|_| AppError::Database("in-memory store lock poisoned".into()))
}

fn write<T>(lock: &RwLock<T>) -> Result<RwLockWriteGuard<'_, T>, AppError> {
    lock.write()
        .map_err(|_| AppError::Database("in-memory store lock poisoned".into()))
}

/// Replace the record with the same id in place, or append it.
fn upsert_by<T>(records: &mut Vec<T>, record: T, same: impl Fn(&T) -> bool) {
    match records.iter_mut().find(|r| same(r)) {
        Some(slot) => *slot = record,
        None => records.push(record),
    }
}

impl InMemoryContentStore {
    /// Visible posts, newest first; equal timestamps fall back to id order.
    fn published_posts(&self, now: DateTime<Utc>) -> Result<Vec<BlogPost>, AppError> {
        let mut posts: Vec<BlogPost> = read(&self.posts)?
            .iter()
            .filter(|p| p.is_visible_at(now))
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.published_at.cmp(&a.published_at).then(a.id.cmp(&b.id)));
        Ok(posts)
    }

    fn ordered_projects(&self) -> Result<Vec<Project>, AppError> {
        let mut projects = read(&self.projects)?.clone();
        projects.sort_by(|a, b| a.sort_order.cmp(&b.sort_order).then(a.id.cmp(&b.id)));
        Ok(projects)
    }
}

#[async_trait]
impl BlogPostRepository for InMemoryContentStore {
    async fn search_published(
        &self,
        query: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<BlogPost>, AppError> {
        Ok(self
            .published_posts(now)?
            .into_iter()
            .filter(|p| p.matches(query))
            .collect())
    }

    async fn list_published(
        &self,
        now: DateTime<Utc>,
        page: PageRequest,
    ) -> Result<Page<BlogPost>, AppError> {
        Ok(Page::from_slice(&self.published_posts(now)?, page))
    }

    async fn find_published_by_slug(
        &self,
        slug: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<BlogPost>, AppError> {
        Ok(read(&self.posts)?
            .iter()
            .find(|p| p.slug == slug && p.is_visible_at(now))
            .cloned())
    }

    async fn create_or_update(&self, post: BlogPost) -> Result<(), AppError> {
        let id = post.id;
        upsert_by(&mut *write(&self.posts)?, post, |p| p.id == id);
        Ok(())
    }
}

#[async_trait]
impl ProjectRepository for InMemoryContentStore {
    async fn search(&self, query: &str) -> Result<Vec<Project>, AppError> {
        Ok(self
            .ordered_projects()?
            .into_iter()
            .filter(|p| p.matches(query))
            .collect())
    }

    async fn list(&self, page: PageRequest) -> Result<Page<Project>, AppError> {
        Ok(Page::from_slice(&self.ordered_projects()?, page))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Project>, AppError> {
        Ok(read(&self.projects)?.iter().find(|p| p.id == id).cloned())
    }

    async fn create_or_update(&self, project: Project) -> Result<(), AppError> {
        let id = project.id;
        upsert_by(&mut *write(&self.projects)?, project, |p| p.id == id);
        Ok(())
    }
}

#[async_trait]
impl CvRepository for InMemoryContentStore {
    async fn search_active(&self, query: &str) -> Result<Vec<Cv>, AppError> {
        Ok(read(&self.cvs)?
            .iter()
            .filter(|cv| cv.is_active && cv.matches(query))
            .cloned()
            .collect())
    }

    async fn list_active(&self) -> Result<Vec<Cv>, AppError> {
        Ok(read(&self.cvs)?
            .iter()
            .filter(|cv| cv.is_active)
            .cloned()
            .collect())
    }

    async fn create_or_update(&self, cv: Cv) -> Result<(), AppError> {
        let id = cv.id;
        upsert_by(&mut *write(&self.cvs)?, cv, |c| c.id == id);
        Ok(())
    }
}
