use async_trait::async_trait;

use crate::db::models::Project;
use crate::db::pagination::{Page, PageRequest};
use crate::error::AppError;

/// Repository trait for portfolio projects. Projects have no visibility gate.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Projects whose title or description contains `query` (case-insensitive),
    /// or whose technology list holds an element exactly equal to `query`.
    /// Ordered by `sort_order` ascending.
    async fn search(&self, query: &str) -> Result<Vec<Project>, AppError>;

    /// One page of projects ordered by `sort_order`.
    async fn list(&self, page: PageRequest) -> Result<Page<Project>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Project>, AppError>;

    /// Create a project or replace the one with the same id.
    async fn create_or_update(&self, project: Project) -> Result<(), AppError>;
}

/// MongoDB implementation of the ProjectRepository.
pub struct MongoProjectRepository {
    collection: mongodb::Collection<Project>,
}

impl MongoProjectRepository {
    pub fn new(db: &mongodb::Database) -> Self {
        Self {
            collection: db.collection("projects"),
        }
    }
}

#[async_trait]
impl ProjectRepository for MongoProjectRepository {
    async fn search(&self, query: &str) -> Result<Vec<Project>, AppError> {
        use crate::db::query::{collect_all, contains_ci};
        use mongodb::bson::doc;
        use mongodb::options::FindOptions;

        // An equality filter on an array field matches any single element.
        let clauses = vec![
            contains_ci("title", query),
            contains_ci("description", query),
            doc! { "technologies": query },
        ];
        let filter = doc! { "$or": clauses };

        let options = FindOptions::builder()
            .sort(doc! { "sort_order": 1, "_id": 1 })
            .build();

        let cursor = self.collection.find(filter).with_options(options).await?;
        collect_all(cursor).await
    }

    async fn list(&self, page: PageRequest) -> Result<Page<Project>, AppError> {
        use crate::db::query::collect_all;
        use mongodb::bson::doc;
        use mongodb::options::FindOptions;

        let total = self.collection.count_documents(doc! {}).await?;

        let options = FindOptions::builder()
            .sort(doc! { "sort_order": 1, "_id": 1 })
            .skip(page.offset())
            .limit(page.per_page as i64)
            .build();

        let cursor = self.collection.find(doc! {}).with_options(options).await?;
        let items = collect_all(cursor).await?;

        Ok(Page::new(items, page, total))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Project>, AppError> {
        use mongodb::bson::doc;

        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    async fn create_or_update(&self, project: Project) -> Result<(), AppError> {
        use mongodb::bson::doc;
        use mongodb::options::ReplaceOptions;

        let options = ReplaceOptions::builder().upsert(true).build();

        self.collection
            .replace_one(doc! { "_id": project.id }, &project)
            .with_options(options)
            .await?;

        Ok(())
    }
}
